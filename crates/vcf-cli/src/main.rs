//! # vcf-cli
//!
//! Command-line interface for transforming CSV files into vCards.
//!
//! Wraps the pipeline behind a flat flag surface: source and output
//! paths, vCard version, an optional mapping file, and the
//! combined-output switches.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vcf_adapter_csv::CsvConfig;
use vcf_mapping::{MappingPolicy, MappingSpec};
use vcf_model::VcardVersion;
use vcf_pipeline::{ConvertConfig, Converter};

#[derive(Parser)]
#[command(name = "csv2vcard")]
#[command(about = "Transform CSV files into vCards")]
#[command(version)]
struct Cli {
    /// Path to source CSV file / folder containing CSV files
    #[arg(short, long)]
    source: PathBuf,

    /// Path to destination folder
    #[arg(short, long)]
    output: PathBuf,

    /// vCard version (3 or 4)
    #[arg(long, default_value_t = 4)]
    vcard_version: u8,

    /// Create a single VCF file with multiple entries per source
    #[arg(long)]
    single_vcard: bool,

    /// Path to optional data mapping (JSON or YAML)
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// CSV delimiter character
    #[arg(long, default_value_t = ';')]
    delimiter: char,

    /// Optional encoding label for CSV files (e.g. windows-1252)
    #[arg(long)]
    encoding: Option<String>,

    /// Optional size limit in bytes for single vCard files
    #[arg(long)]
    max_vcard_file_size: Option<u64>,

    /// Fail on the first malformed mapping entry or field instead of
    /// skipping it with a warning
    #[arg(long)]
    strict: bool,

    /// Lower-case generated filenames
    #[arg(long)]
    lowercase_filenames: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let version = VcardVersion::from_number(cli.vcard_version)
        .context("unsupported vCard version, expected 3 or 4")?;
    let policy = if cli.strict {
        MappingPolicy::Strict
    } else {
        MappingPolicy::Permissive
    };

    let mapping = match &cli.mapping {
        Some(path) => {
            let loaded = vcf_mapping::load_path(path, policy)
                .with_context(|| format!("failed to load mapping {}", path.display()))?;
            for diagnostic in &loaded.diagnostics {
                tracing::warn!(mapping = %path.display(), "{diagnostic}");
            }
            loaded.spec
        }
        None => MappingSpec::builtin_default(),
    };

    let mut csv = CsvConfig::new().delimiter(cli.delimiter);
    if let Some(encoding) = &cli.encoding {
        csv = csv.encoding(encoding);
    }

    let config = ConvertConfig::new()
        .version(version)
        .policy(policy)
        .single_file(cli.single_vcard)
        .lowercase_filenames(cli.lowercase_filenames)
        .csv(csv);
    let config = match cli.max_vcard_file_size {
        Some(bytes) => config.max_file_size(bytes),
        None => config,
    };

    let converter = Converter::new(&mapping, config);
    let stats = converter
        .convert_sources(&cli.source, &cli.output)
        .context("conversion failed")?;

    tracing::info!(
        files = stats.files,
        contacts = stats.contacts,
        converted = stats.converted,
        failed = stats.failed,
        "all conversions finished"
    );
    Ok(())
}
