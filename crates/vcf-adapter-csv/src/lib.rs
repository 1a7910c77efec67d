#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # vcf-adapter-csv
//!
//! CSV input adapter for the csv2vcard engine.
//!
//! Reads a delimiter-separated file whose header row names the columns,
//! decodes it from a configurable source encoding, and yields one
//! [`vcf_model::ContactRecord`] per data row.

pub mod config;
pub mod errors;
pub mod reader;

pub use config::CsvConfig;
pub use errors::{CsvError, CsvResult};
pub use reader::CsvReader;
