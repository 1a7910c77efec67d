//! The built-in table and a user file with the same content must resolve
//! to identical specifications.

use vcf_mapping::{MappingPolicy, MappingSpec, from_json_str};

const DEFAULT_TABLE_JSON: &str = r#"{
    "ADR": {
        "TYPE": {
            "HOME": ["postbox_home", "address_home", "city_home", "region_home", "zip_home", "country_home"],
            "WORK": ["postbox", "address", "city", "region", "zip", "country"]
        }
    },
    "ANNIVERSARY": "anniversary",
    "BDAY": "birthday",
    "CATEGORIES": "categories",
    "EMAIL": {"TYPE": {"HOME": "email_home", "WORK": "email"}},
    "FN": {
        "CONCAT": ["title", "last_name", "first_name"]
    },
    "GENDER": "gender",
    "GEO": "geo",
    "KEY": "key",
    "LOGO": "logo",
    "N": ["last_name", "first_name", "second_name", "title", "suffix"],
    "NOTE": "remarks",
    "NICKNAME": "nickname",
    "ORG": "company",
    "PHOTO": "photo",
    "ROLE": "role",
    "TEL": {
        "TYPE": {
            "HOME,CELL": "mobile_phone_home",
            "HOME,FAX": "fax_home",
            "HOME,PAGER": "pager_home",
            "HOME,VOICE": "phone_home",
            "HOME,VIDEO": "video_phone_home",
            "HOME,TEXTPHONE": "text_phone_home",
            "HOME,TEXT": "text_home",
            "WORK,CELL": "mobile_phone",
            "WORK,FAX": "fax",
            "WORK,PAGER": "pager",
            "WORK,VOICE": "phone",
            "WORK,VIDEO": "video_phone",
            "WORK,TEXTPHONE": "text_phone",
            "WORK,TEXT": "text"
        }
    },
    "TITLE": "title",
    "TZ": "timezone",
    "UID": "uuid",
    "URL": "webpage"
}"#;

#[test]
fn user_file_with_default_content_matches_builtin_table() {
    let loaded = from_json_str(DEFAULT_TABLE_JSON, MappingPolicy::Permissive).unwrap();
    assert!(loaded.diagnostics.is_empty());
    assert_eq!(loaded.spec, MappingSpec::builtin_default());
}

#[test]
fn strict_policy_accepts_the_default_table() {
    let loaded = from_json_str(DEFAULT_TABLE_JSON, MappingPolicy::Strict).unwrap();
    assert_eq!(loaded.spec.len(), 21);
}
