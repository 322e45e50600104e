use super::*;

fn col(name: &str, dtype: &str, pos: u32) -> ColumnDescriptor {
    ColumnDescriptor::new(name, dtype, true, pos)
}

#[test]
fn employees_shape_classifies_expected_roles() {
    let cols = vec![
        col("EMPLOYEE_ID", "NUMBER", 1),
        col("NAME", "VARCHAR2(100)", 2),
        col("MANAGER_ID", "NUMBER", 3),
        col("SALARY", "NUMBER(8,2)", 4),
        col("EMAIL", "VARCHAR2(255)", 5),
        col("HIRE_DATE", "DATE", 6),
        col("NOTES", "VARCHAR2(4000)", 7),
    ];
    let roles = classify("EMPLOYEES", &cols);
    assert_eq!(
        roles,
        vec![
            ColumnRole::Identifier,
            ColumnRole::DisplayName,
            ColumnRole::ParentReference,
            ColumnRole::Measure,
            ColumnRole::Email,
            ColumnRole::Temporal,
            ColumnRole::None,
        ]
    );
}

#[test]
fn earliest_id_suffixed_numeric_column_wins_identifier() {
    // DEPT_ID comes before WORKER_ID in ordinal order; neither matches the
    // singularized table name, so the earliest qualifying column is elected.
    let cols = vec![
        col("DEPT_ID", "NUMBER", 1),
        col("WORKER_ID", "NUMBER", 2),
        col("TITLE", "VARCHAR2(50)", 3),
    ];
    let roles = classify("ASSIGNMENTS", &cols);
    assert_eq!(roles[0], ColumnRole::Identifier);
    assert_ne!(roles[1], ColumnRole::Identifier);
}

#[test]
fn identifier_pattern_beats_measure_pattern() {
    // "SALARY_ID" carries both an identifier suffix and a measure keyword;
    // rule 1 runs before rule 5, so identifier wins.
    let cols = vec![col("SALARY_ID", "NUMBER", 1), col("SALARY", "NUMBER", 2)];
    let roles = classify("SALARIES", &cols);
    assert_eq!(roles[0], ColumnRole::Identifier);
    assert_eq!(roles[1], ColumnRole::Measure);
}

#[test]
fn textual_id_column_is_not_elected_by_suffix_rule() {
    // "*_id" suffix only qualifies numeric columns; the exact names "id" and
    // "<singular>_id" qualify regardless of type.
    let cols = vec![
        col("EXTERNAL_ID", "VARCHAR2(64)", 1),
        col("ORDER_ID", "NUMBER", 2),
    ];
    let roles = classify("ORDERS", &cols);
    assert_ne!(roles[0], ColumnRole::Identifier);
    assert_eq!(roles[1], ColumnRole::Identifier);
}

#[test]
fn singular_table_id_elected_even_when_textual() {
    let cols = vec![col("ACCOUNT_ID", "VARCHAR2(32)", 1), col("BALANCE", "NUMBER", 2)];
    let roles = classify("ACCOUNTS", &cols);
    assert_eq!(roles[0], ColumnRole::Identifier);
    assert_eq!(roles[1], ColumnRole::Measure);
}

#[test]
fn parent_reference_requires_identifier_type_family() {
    // MANAGER_NAME is text while the identifier is numeric: rule 2 fails its
    // family check and rule 4 picks the column up instead.
    let cols = vec![
        col("EMPLOYEE_ID", "NUMBER", 1),
        col("MANAGER_NAME", "VARCHAR2(100)", 2),
        col("SUPERVISOR_ID", "NUMBER", 3),
    ];
    let roles = classify("EMPLOYEES", &cols);
    assert_eq!(roles[1], ColumnRole::DisplayName);
    assert_eq!(roles[2], ColumnRole::ParentReference);
}

#[test]
fn parent_reference_without_identifier_degrades_to_numeric_check() {
    let cols = vec![
        col("LABEL", "VARCHAR2(50)", 1),
        col("PARENT_CODE", "NUMBER", 2),
    ];
    let roles = classify("REGIONS", &cols);
    assert_eq!(roles[0], ColumnRole::None);
    assert_eq!(roles[1], ColumnRole::ParentReference);
}

#[test]
fn email_beats_display_name() {
    // "EMAIL_NAME" contains both patterns; rule 3 runs before rule 4.
    let cols = vec![col("EMAIL_NAME", "VARCHAR2(255)", 1)];
    let roles = classify("CONTACTS", &cols);
    assert_eq!(roles[0], ColumnRole::Email);
}

#[test]
fn unmatched_columns_get_none() {
    let cols = vec![
        col("PAYLOAD", "CLOB", 1),
        col("FLAGS", "NUMBER", 2),
        col("GEOM", "SDO_GEOMETRY", 3),
    ];
    let roles = classify("EVENTS", &cols);
    assert!(roles.iter().all(|r| *r == ColumnRole::None));
}

#[test]
fn classification_is_deterministic() {
    let cols = vec![
        col("ITEM_ID", "NUMBER", 1),
        col("ITEM_NAME", "VARCHAR2(80)", 2),
        col("PRICE", "NUMBER(10,2)", 3),
    ];
    let a = classify("ITEMS", &cols);
    let b = classify("ITEMS", &cols);
    assert_eq!(a, b);
}
