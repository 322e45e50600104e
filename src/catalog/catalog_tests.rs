use super::*;
use crate::exec::Row;
use futures_util::future::BoxFuture;
use serde_json::json;

#[test]
fn type_family_mapping() {
    assert_eq!(TypeFamily::from_declared("NUMBER"), TypeFamily::Numeric);
    assert_eq!(TypeFamily::from_declared("NUMBER(10,2)"), TypeFamily::Numeric);
    assert_eq!(TypeFamily::from_declared("varchar2"), TypeFamily::Text);
    assert_eq!(TypeFamily::from_declared("DATE"), TypeFamily::Temporal);
    assert_eq!(TypeFamily::from_declared("TIMESTAMP(6) WITH TIME ZONE"), TypeFamily::Temporal);
    assert_eq!(TypeFamily::from_declared("INTERVAL DAY TO SECOND"), TypeFamily::Temporal);
    assert_eq!(TypeFamily::from_declared("CLOB"), TypeFamily::Lob);
    assert_eq!(TypeFamily::from_declared("VECTOR"), TypeFamily::Vector);
    assert_eq!(TypeFamily::from_declared("SDO_GEOMETRY"), TypeFamily::Other);
}

/// Scripted executor: either serves canned metadata rows or fails with a
/// fixed error message.
struct ScriptedExec {
    rows: Vec<Row>,
    fail_with: Option<String>,
}

impl Executor for ScriptedExec {
    fn query<'a>(
        &'a self,
        _sql: &'a str,
        _binds: &'a [serde_json::Value],
    ) -> BoxFuture<'a, anyhow::Result<Vec<Row>>> {
        Box::pin(async move {
            if let Some(msg) = &self.fail_with {
                anyhow::bail!("{}", msg.clone());
            }
            Ok(self.rows.clone())
        })
    }
}

fn meta_row(name: &str, dtype: &str, nullable: &str, id: u32) -> Row {
    let mut r = Row::new();
    r.insert("COLUMN_NAME".into(), json!(name));
    r.insert("DATA_TYPE".into(), json!(dtype));
    r.insert("NULLABLE".into(), json!(nullable));
    r.insert("COLUMN_ID".into(), json!(id));
    r
}

#[tokio::test]
async fn describe_orders_by_ordinal_position() {
    let exec = std::sync::Arc::new(ScriptedExec {
        // Deliberately shuffled: reader must restore ordinal order
        rows: vec![
            meta_row("SALARY", "NUMBER(8,2)", "Y", 3),
            meta_row("EMPLOYEE_ID", "NUMBER", "N", 1),
            meta_row("NAME", "VARCHAR2(100)", "Y", 2),
        ],
        fail_with: None,
    });
    let reader = OracleCatalogReader::new(exec);
    let cols = reader.describe("employees").await.unwrap();
    let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["EMPLOYEE_ID", "NAME", "SALARY"]);
    assert!(!cols[0].nullable);
    assert_eq!(cols[2].type_family, TypeFamily::Numeric);
}

#[tokio::test]
async fn empty_metadata_is_not_found() {
    let exec = std::sync::Arc::new(ScriptedExec { rows: vec![], fail_with: None });
    let reader = OracleCatalogReader::new(exec);
    let err = reader.describe("GHOST").await.unwrap_err();
    assert!(matches!(err, SynthError::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn privilege_failure_is_access_not_metadata() {
    let exec = std::sync::Arc::new(ScriptedExec {
        rows: vec![],
        fail_with: Some("ORA-01031: insufficient privileges".to_string()),
    });
    let reader = OracleCatalogReader::new(exec);
    let err = reader.describe("EMPLOYEES").await.unwrap_err();
    assert!(matches!(err, SynthError::Access { .. }), "got {err:?}");
}

#[tokio::test]
async fn driver_failure_is_metadata_error() {
    let exec = std::sync::Arc::new(ScriptedExec {
        rows: vec![],
        fail_with: Some("connection reset by peer".to_string()),
    });
    let reader = OracleCatalogReader::new(exec);
    let err = reader.describe("EMPLOYEES").await.unwrap_err();
    assert!(matches!(err, SynthError::Metadata(_)), "got {err:?}");
}

#[tokio::test]
async fn invalid_table_name_rejected_before_io() {
    let exec = std::sync::Arc::new(ScriptedExec {
        rows: vec![],
        fail_with: Some("should never be reached".to_string()),
    });
    let reader = OracleCatalogReader::new(exec);
    let err = reader.describe("EMP; DROP TABLE X").await.unwrap_err();
    assert!(matches!(err, SynthError::Invalid { .. }), "got {err:?}");
}
