use ply_doc::{Encoding, PlyDocument, PlyError};

#[test]
fn empty_and_well_formed_documents_pass() {
    let doc = PlyDocument::new();
    assert!(doc.validate().is_ok());

    let mut doc = PlyDocument::new();
    doc.add_element("vertex", 2)
        .add_property("x", vec![1.0f32, 2.0])
        .unwrap();
    assert!(doc.validate().is_ok());
}

#[test]
fn validate_is_idempotent() {
    let mut doc = PlyDocument::new();
    doc.add_element("a", 1);
    doc.add_element("a", 1);
    let first = format!("{}", doc.validate().unwrap_err());
    let second = format!("{}", doc.validate().unwrap_err());
    assert_eq!(first, second);

    let ok = PlyDocument::new();
    assert!(ok.validate().is_ok());
    assert!(ok.validate().is_ok());
}

#[test]
fn duplicate_element_names_fail_until_renamed() {
    let mut doc = PlyDocument::new();
    doc.add_element("a", 0);
    doc.add_element("a", 0);
    assert!(matches!(
        doc.validate(),
        Err(PlyError::DuplicateName { kind: "element", .. })
    ));

    doc.elements[1].name = "b".to_string();
    assert!(doc.validate().is_ok());
}

#[test]
fn duplicate_element_names_fail_until_removed() {
    let mut doc = PlyDocument::new();
    doc.add_element("a", 0);
    doc.add_element("a", 0);
    assert!(doc.validate().is_err());

    // remove_element drops every element with the offending name.
    assert!(doc.remove_element("a"));
    assert!(doc.validate().is_ok());
}

#[test]
fn whitespace_in_element_name_fails() {
    let mut doc = PlyDocument::new();
    doc.add_element("bad name", 0);
    match doc.validate().unwrap_err() {
        PlyError::WhitespaceInName { kind, name } => {
            assert_eq!(kind, "element");
            assert_eq!(name, "bad name");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_property_names_fail_until_fixed() {
    let mut doc = PlyDocument::new();
    let elem = doc.add_element("vertex", 1);
    elem.add_property("x", vec![1.0f32]).unwrap();
    elem.add_property("y", vec![2.0f32]).unwrap();
    // add_property replaces same-named columns, so force the duplicate by
    // renaming after the fact.
    elem.properties[1].name = "x".to_string();
    assert!(matches!(
        doc.validate(),
        Err(PlyError::DuplicateName { kind: "property", .. })
    ));

    doc.element_mut("vertex").unwrap().properties[1].name = "y".to_string();
    assert!(doc.validate().is_ok());
}

#[test]
fn removing_a_duplicate_property_also_recovers() {
    let mut doc = PlyDocument::new();
    let elem = doc.add_element("vertex", 1);
    elem.add_property("x", vec![1.0f32]).unwrap();
    elem.add_property("y", vec![2.0f32]).unwrap();
    elem.properties[1].name = "x".to_string();
    assert!(doc.validate().is_err());

    assert!(doc.element_mut("vertex").unwrap().remove_property("x"));
    assert!(doc.validate().is_ok());
    assert!(doc.element("vertex").unwrap().properties.is_empty());
}

#[test]
fn whitespace_in_property_name_fails() {
    let mut doc = PlyDocument::new();
    doc.add_element("vertex", 1)
        .add_property("x coord", vec![1.0f32])
        .unwrap();
    assert!(matches!(
        doc.validate(),
        Err(PlyError::WhitespaceInName { kind: "property", .. })
    ));
}

#[test]
fn column_length_must_match_declared_count() {
    let mut doc = PlyDocument::new();
    doc.add_element("vertex", 2)
        .add_property("x", vec![1.0f32, 2.0])
        .unwrap();
    // Shrinking the declared count afterwards makes the column too long.
    doc.element_mut("vertex").unwrap().count = 3;
    match doc.validate().unwrap_err() {
        PlyError::SizeMismatch {
            property,
            expected,
            actual,
        } => {
            assert_eq!(property, "x");
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn add_property_rejects_wrong_length_up_front() {
    let mut doc = PlyDocument::new();
    let elem = doc.add_element("vertex", 2);
    assert!(matches!(
        elem.add_property("x", vec![1.0f32]),
        Err(PlyError::SizeMismatch { .. })
    ));
    assert!(matches!(
        elem.add_list_property("l", vec![vec![1i32]]),
        Err(PlyError::SizeMismatch { .. })
    ));
}

#[test]
fn failed_write_emits_nothing() {
    let mut doc = PlyDocument::new();
    doc.add_element("a", 0);
    doc.add_element("a", 0);
    let mut buf = Vec::new();
    assert!(doc.write(&mut buf, Encoding::Ascii).is_err());
    assert!(buf.is_empty());
}

#[test]
fn write_validates_even_when_data_was_fine_before_mutation() {
    let mut doc = PlyDocument::new();
    doc.add_element("vertex", 1)
        .add_property("x", vec![0.5f32])
        .unwrap();
    let mut buf = Vec::new();
    doc.write(&mut buf, Encoding::Ascii).unwrap();

    doc.element_mut("vertex").unwrap().count = 9;
    let mut buf = Vec::new();
    assert!(matches!(
        doc.write(&mut buf, Encoding::Ascii),
        Err(PlyError::SizeMismatch { .. })
    ));
    assert!(buf.is_empty());
}

#[test]
fn first_violation_wins() {
    // Element-level problems are reported before property-level ones.
    let mut doc = PlyDocument::new();
    doc.add_element("bad name", 2)
        .add_property("x", vec![1.0f32])
        .unwrap_err();
    doc.add_element("bad name", 0);
    assert!(matches!(
        doc.validate(),
        Err(PlyError::WhitespaceInName { kind: "element", .. })
    ));
}
