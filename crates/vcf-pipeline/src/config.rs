//! Conversion run configuration

use vcf_adapter_csv::CsvConfig;
use vcf_mapping::MappingPolicy;
use vcf_model::VcardVersion;

/// Configuration for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Target vCard version
    pub version: VcardVersion,
    /// Skip-and-warn or fail-fast for malformed fields
    pub policy: MappingPolicy,
    /// Write one combined multi-entry file per source instead of one
    /// file per contact
    pub single_file: bool,
    /// Size limit in bytes for combined files; exceeding it rolls over
    /// to a numbered part file
    pub max_file_size: Option<u64>,
    /// Lower-case derived filenames
    pub lowercase_filenames: bool,
    /// CSV input settings
    pub csv: CsvConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            version: VcardVersion::V4,
            policy: MappingPolicy::default(),
            single_file: false,
            max_file_size: None,
            lowercase_filenames: false,
            csv: CsvConfig::default(),
        }
    }
}

impl ConvertConfig {
    /// Create a configuration with defaults (vCard 4.0, permissive,
    /// one file per contact)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vCard version
    #[must_use]
    pub fn version(mut self, version: VcardVersion) -> Self {
        self.version = version;
        self
    }

    /// Set the field policy
    #[must_use]
    pub fn policy(mut self, policy: MappingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Combine all contacts of a source into one multi-entry file
    #[must_use]
    pub fn single_file(mut self, single_file: bool) -> Self {
        self.single_file = single_file;
        self
    }

    /// Set the combined-file size limit
    #[must_use]
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Lower-case derived filenames
    #[must_use]
    pub fn lowercase_filenames(mut self, lowercase: bool) -> Self {
        self.lowercase_filenames = lowercase;
        self
    }

    /// Set the CSV input settings
    #[must_use]
    pub fn csv(mut self, csv: CsvConfig) -> Self {
        self.csv = csv;
        self
    }
}
