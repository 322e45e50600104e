use super::*;
use serde_json::json;

fn pairs(items: &[(&str, serde_json::Value)]) -> Vec<(String, serde_json::Value)> {
    items.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[test]
fn insert_formats_each_value_kind() {
    let sql = build_insert(
        "LOANS",
        &pairs(&[
            ("LOAN_ID", json!(42)),
            ("BORROWER", json!("O'Brien")),
            ("ACTIVE", json!(true)),
            ("RATE", json!(4.25)),
            ("NOTES", json!(null)),
        ]),
    )
    .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO LOANS (LOAN_ID, BORROWER, ACTIVE, RATE, NOTES) \
         VALUES (42, 'O''Brien', 1, 4.25, NULL)"
    );
}

#[test]
fn date_strings_become_date_literals() {
    assert_eq!(format_value(&json!("2026-08-25")), "DATE '2026-08-25'");
    assert_eq!(
        format_value(&json!("2026-08-25T13:45:00")),
        "TIMESTAMP '2026-08-25 13:45:00'"
    );
    assert_eq!(
        format_value(&json!("2026-08-25 13:45:00.123")),
        "TIMESTAMP '2026-08-25 13:45:00.123'"
    );
    assert_eq!(
        format_value(&json!("25-AUG-2026")),
        "TO_DATE('25-AUG-2026', 'DD-MON-YYYY')"
    );
    assert_eq!(
        format_value(&json!("25/08/2026")),
        "TO_DATE('25/08/2026', 'DD/MM/YYYY')"
    );
}

#[test]
fn numeric_strings_stay_unquoted() {
    assert_eq!(format_value(&json!("12345")), "12345");
    assert_eq!(format_value(&json!("3.14")), "3.14");
    assert_eq!(format_value(&json!("12a45")), "'12a45'");
}

#[test]
fn json_documents_are_quoted_text() {
    let v = json!({"k": "v'"});
    let out = format_value(&v);
    assert!(out.starts_with('\''));
    assert!(out.contains("''"));
}

#[test]
fn update_appends_where_and_tolerates_missing_one() {
    let sql = build_update(
        "LOANS",
        &pairs(&[("RATE", json!(5.25))]),
        Some("LOAN_ID = 42"),
    )
    .unwrap();
    assert_eq!(sql, "UPDATE LOANS SET RATE = 5.25 WHERE LOAN_ID = 42");

    // No WHERE: still generated (with a logged warning), never an error.
    let sql = build_update("LOANS", &pairs(&[("RATE", json!(5.25))]), None).unwrap();
    assert_eq!(sql, "UPDATE LOANS SET RATE = 5.25");
}

#[test]
fn empty_payloads_are_rejected() {
    assert!(build_insert("LOANS", &[]).is_err());
    assert!(build_update("LOANS", &[], None).is_err());
}
