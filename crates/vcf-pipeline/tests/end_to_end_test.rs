//! End-to-end pipeline tests: CSV in, vCard files out.

use std::path::{Path, PathBuf};

use vcf_mapping::{MappingPolicy, MappingSpec};
use vcf_model::VcardVersion;
use vcf_pipeline::{ConvertConfig, Converter};

const CONTACTS: &str = "\
last_name;first_name;title;email;company;phone
Gump;Forrest;Shrimp Man;forrestgump@example.com;Bubba Gump Shrimp Co.;(111) 555-1212
Blue;Bubba;;bubba@example.com;Bubba Gump Shrimp Co.;(111) 555-1213
;;;;;
";

fn write_source(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn per_contact_run_produces_one_file_per_named_contact() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "contacts.csv", CONTACTS);
    let out = dir.path().join("export");

    let mapping = MappingSpec::builtin_default();
    let converter = Converter::new(&mapping, ConvertConfig::new());
    let stats = converter.convert_sources(&source, &out).unwrap();

    assert_eq!(stats.files, 1);
    assert_eq!(stats.contacts, 3);
    assert_eq!(stats.converted, 2);
    assert_eq!(stats.failed, 1);

    let gump = std::fs::read_to_string(out.join("Gump-Forrest-Shrimp Man.vcf")).unwrap();
    assert!(gump.starts_with("BEGIN:VCARD\nVERSION:4.0\n"));
    assert!(gump.contains("N:Gump;Forrest;;Shrimp Man;\n"));
    assert!(gump.contains("EMAIL;TYPE=WORK:forrestgump@example.com\n"));
    assert!(gump.contains("TEL;TYPE=WORK,VOICE:(111) 555-1212\n"));
    assert!(gump.ends_with("END:VCARD\n"));

    assert!(out.join("Blue-Bubba.vcf").is_file());
}

#[test]
fn combined_run_honors_the_size_limit() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "contacts.csv", CONTACTS);
    let out = dir.path().join("export");

    let mapping = MappingSpec::builtin_default();
    let config = ConvertConfig::new()
        .version(VcardVersion::V3)
        .single_file(true)
        .max_file_size(200);
    let report = Converter::new(&mapping, config)
        .convert_file(&source, &out)
        .unwrap();

    assert!(report.outputs.len() > 1);
    assert!(report.outputs[0].ends_with("contacts.csv-1.vcf"));
    for path in &report.outputs {
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("BEGIN:VCARD\nVERSION:3.0\n"));
        assert!(text.ends_with("END:VCARD\n"));
    }
}

#[test]
fn strict_policy_turns_a_malformed_email_into_a_run_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(
        dir.path(),
        "contacts.csv",
        "last_name;first_name;email\nGump;Forrest;not-an-email\n",
    );
    let out = dir.path().join("export");

    let mapping = vcf_mapping::from_json_str(
        r#"{
            "FN": {"CONCAT": ["last_name", "first_name"]},
            "N": ["last_name", "first_name"],
            "EMAIL": {"TYPE": {"HOME": "email"}}
        }"#,
        MappingPolicy::Strict,
    )
    .unwrap();
    let config = ConvertConfig::new().policy(MappingPolicy::Strict);
    let err = Converter::new(&mapping.spec, config)
        .convert_sources(&source, &out)
        .unwrap_err();

    assert!(err.to_string().contains("EMAIL"));
}

#[test]
fn missing_source_aborts_the_run() {
    let out = tempfile::tempdir().unwrap();
    let mapping = MappingSpec::builtin_default();
    let converter = Converter::new(&mapping, ConvertConfig::new());
    let err = converter
        .convert_sources(Path::new("/nonexistent/contacts"), out.path())
        .unwrap_err();

    assert!(matches!(err, vcf_pipeline::Error::SourceNotFound { .. }));
}
