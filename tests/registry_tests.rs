//! Tests for `IdentRegistry` configuration loading.

use std::io::Write;

use dlt645_rs::payload::registry::{describe_ident, KNOWN_IDENTS};
use dlt645_rs::{ByteOrder, DataIdent, Dlt645Error, IdentRegistry};
use tempfile::NamedTempFile;

/// Tests loading a registry document from disk.
#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"ident": "02020100", "width": 3, "ratio": 0.001, "unit": "A"}},
            {{"ident": "02030000", "width": 3, "order": "big", "ratio": 0.0001, "unit": "kW"}}
        ]"#
    )
    .unwrap();

    let registry = IdentRegistry::from_json_file(file.path()).unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.idents(),
        vec![DataIdent::from_u32(0x0202_0100), DataIdent::from_u32(0x0203_0000)]
    );
    let current = registry.get(&DataIdent::from_u32(0x0202_0100)).unwrap();
    assert_eq!(current.order(), ByteOrder::Little);
    assert_eq!(current.offset(), 0.0);
    assert_eq!(
        registry.get(&DataIdent::from_u32(0x0203_0000)).unwrap().order(),
        ByteOrder::Big
    );
}

/// Tests that a missing file is a configuration error.
#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = IdentRegistry::from_json_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(Dlt645Error::Config(_))));
}

/// Tests that a bad identifier names the offending entry.
#[test]
fn test_bad_identifier_entry() {
    let err = IdentRegistry::from_json_str(r#"[{"ident": "0201", "width": 2}]"#).unwrap_err();
    let Dlt645Error::Config(message) = err else {
        panic!("expected config error");
    };
    assert!(message.contains("0201"));
}

/// Tests that loading into a defaults registry overrides matching entries.
#[test]
fn test_overlay_on_defaults() {
    let registry = IdentRegistry::with_defaults();
    let count = registry
        .load_json(r#"[{"ident": "02010100", "width": 2, "ratio": 1.0, "unit": "dV"}]"#)
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(registry.len(), KNOWN_IDENTS.len());
    assert_eq!(
        registry.get(&DataIdent::from_u32(0x0201_0100)).unwrap().unit(),
        "dV"
    );
    assert_eq!(
        describe_ident(&DataIdent::from_u32(0x0201_0100)).unwrap().name,
        "Phase A voltage"
    );
}
