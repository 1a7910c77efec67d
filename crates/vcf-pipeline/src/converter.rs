//! Batch conversion
//!
//! Ties the adapter, renderer, and exporter together. Each source file
//! becomes a [`FileReport`]; a whole run becomes [`ConvertStats`].
//! Contacts that fail to produce a usable name are counted and logged,
//! never fatal; under the strict policy the first malformed field aborts
//! the run instead.

use std::path::{Path, PathBuf};

use vcf_adapter_csv::CsvReader;
use vcf_mapping::MappingSpec;
use vcf_render::{RenderOptions, Renderer, Vcard};

use crate::config::ConvertConfig;
use crate::discover::discover_sources;
use crate::{export, Result};

/// Outcome of converting one source file
#[derive(Debug, Clone)]
pub struct FileReport {
    /// The source CSV file
    pub source: PathBuf,
    /// Contacts parsed from the source
    pub contacts: usize,
    /// Contacts that produced a document
    pub converted: usize,
    /// Contacts dropped for lacking a usable name
    pub failed: usize,
    /// Files written for this source
    pub outputs: Vec<PathBuf>,
}

/// Aggregate outcome of a conversion run
#[derive(Debug, Clone, Default)]
pub struct ConvertStats {
    /// Source files processed
    pub files: usize,
    /// Contacts parsed across all sources
    pub contacts: usize,
    /// Contacts that produced a document
    pub converted: usize,
    /// Contacts dropped for lacking a usable name
    pub failed: usize,
}

impl ConvertStats {
    fn absorb(&mut self, report: &FileReport) {
        self.files += 1;
        self.contacts += report.contacts;
        self.converted += report.converted;
        self.failed += report.failed;
    }
}

/// Converts CSV sources into vCard files against one mapping
#[derive(Debug, Clone)]
pub struct Converter<'a> {
    mapping: &'a MappingSpec,
    config: ConvertConfig,
}

impl<'a> Converter<'a> {
    /// Create a converter over a resolved mapping
    #[must_use]
    pub fn new(mapping: &'a MappingSpec, config: ConvertConfig) -> Self {
        Self { mapping, config }
    }

    /// Convert every CSV file under `source` into `output_dir`.
    ///
    /// # Errors
    ///
    /// Fails when the source cannot be resolved, a file cannot be read
    /// or written, or the strict policy rejects a field.
    pub fn convert_sources(&self, source: &Path, output_dir: &Path) -> Result<ConvertStats> {
        let mut stats = ConvertStats::default();
        for file in discover_sources(source)? {
            tracing::info!(source = %file.display(), "running conversion");
            let report = self.convert_file(&file, output_dir)?;
            stats.absorb(&report);
        }
        Ok(stats)
    }

    /// Convert one CSV file into `output_dir`.
    ///
    /// # Errors
    ///
    /// Same as [`Converter::convert_sources`].
    pub fn convert_file(&self, source: &Path, output_dir: &Path) -> Result<FileReport> {
        export::ensure_dir(output_dir)?;

        let reader = CsvReader::with_config(self.config.csv.clone());
        let contacts = reader.read_path(source)?;

        let options = RenderOptions::new(self.config.version).policy(self.config.policy);
        let renderer = Renderer::new(self.mapping, options);

        let mut report = FileReport {
            source: source.to_path_buf(),
            contacts: contacts.len(),
            converted: 0,
            failed: 0,
            outputs: Vec::new(),
        };
        let mut combined: Vec<Vcard> = Vec::new();

        for (index, contact) in contacts.iter().enumerate() {
            let outcome = renderer.render(contact)?;
            for diagnostic in &outcome.diagnostics {
                if diagnostic.is_error() {
                    tracing::error!(source = %source.display(), row = index + 1, "{diagnostic}");
                } else {
                    tracing::warn!(source = %source.display(), row = index + 1, "{diagnostic}");
                }
            }

            match outcome.vcard {
                Some(mut vcard) => {
                    if self.config.lowercase_filenames {
                        vcard.filename = vcard.filename.to_lowercase();
                    }
                    report.converted += 1;
                    if self.config.single_file {
                        combined.push(vcard);
                    } else {
                        report.outputs.push(export::write_vcard(output_dir, &vcard)?);
                    }
                }
                None => report.failed += 1,
            }
        }

        if self.config.single_file && !combined.is_empty() {
            let filename = self.combined_filename(source);
            let written =
                export::write_combined(output_dir, &filename, &combined, self.config.max_file_size)?;
            report.outputs.extend(written);
        }

        tracing::info!(
            source = %source.display(),
            contacts = report.contacts,
            converted = report.converted,
            failed = report.failed,
            "conversion finished"
        );
        Ok(report)
    }

    /// The combined output file keeps the source's own name, `.vcf`
    /// appended.
    fn combined_filename(&self, source: &Path) -> String {
        let base = source
            .file_name()
            .map_or_else(|| "contacts".to_string(), |n| n.to_string_lossy().into_owned());
        let mut filename = format!("{base}.vcf");
        if self.config.lowercase_filenames {
            filename = filename.to_lowercase();
        }
        filename
    }
}
