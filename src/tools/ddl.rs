//! DDL template builders: users, tables, pluggable databases, profiles,
//! RMAN scripts. All identifiers pass through `ident` validation; system
//! objects are refused outright.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::ident;

/// Column definition for CREATE TABLE.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: String,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub nullable: Option<bool>,
    pub default_value: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        ColumnDef {
            name: name.into(),
            data_type: data_type.into(),
            length: None,
            precision: None,
            scale: None,
            nullable: None,
            default_value: None,
        }
    }
}

pub fn build_create_user(
    username: &str,
    password: &str,
    tablespace: Option<&str>,
    temp_tablespace: Option<&str>,
    profile: Option<&str>,
) -> SynthResult<String> {
    validate_username(username)?;
    if password.trim().is_empty() {
        return Err(SynthError::invalid("password cannot be empty"));
    }
    let mut sql = format!(
        "CREATE USER {} IDENTIFIED BY \"{}\"",
        ident::escape_identifier(username)?,
        password.replace('"', "\"\"")
    );
    if let Some(ts) = nonempty(tablespace) {
        sql.push_str(&format!(" DEFAULT TABLESPACE {}", ident::escape_identifier(ts)?));
    }
    if let Some(ts) = nonempty(temp_tablespace) {
        sql.push_str(&format!(" TEMPORARY TABLESPACE {}", ident::escape_identifier(ts)?));
    }
    if let Some(p) = nonempty(profile) {
        sql.push_str(&format!(" PROFILE {}", ident::escape_identifier(p)?));
    }
    let quota_ts = match nonempty(tablespace) {
        Some(ts) => ident::escape_identifier(ts)?,
        None => "USERS".to_string(),
    };
    sql.push_str(&format!(" QUOTA UNLIMITED ON {}", quota_ts));
    debug!(target: "orasynth::tools", "generated CREATE USER for {}", username);
    Ok(sql)
}

pub fn build_create_table(
    table: &str,
    columns: &[ColumnDef],
    primary_key: &[String],
    tablespace: Option<&str>,
) -> SynthResult<String> {
    ident::validate_object_name(table)?;
    if columns.is_empty() {
        return Err(SynthError::invalid("table must have at least one column"));
    }
    let mut lines = Vec::with_capacity(columns.len() + 1);
    for col in columns {
        lines.push(format!("  {}", build_column_definition(col)?));
    }
    if !primary_key.is_empty() {
        let mut cols = Vec::with_capacity(primary_key.len());
        for pk in primary_key {
            cols.push(ident::escape_identifier(pk)?);
        }
        lines.push(format!(
            "  CONSTRAINT {} PRIMARY KEY ({})",
            ident::escape_identifier(&format!("{}_pk", table))?,
            cols.join(", ")
        ));
    }
    let mut sql = format!("CREATE TABLE {} (\n{}\n)", ident::escape_identifier(table)?, lines.join(",\n"));
    if let Some(ts) = nonempty(tablespace) {
        sql.push_str(&format!("\nTABLESPACE {}", ident::escape_identifier(ts)?));
    }
    debug!(target: "orasynth::tools", "generated CREATE TABLE for {}", table);
    Ok(sql)
}

fn build_column_definition(col: &ColumnDef) -> SynthResult<String> {
    if col.name.trim().is_empty() {
        return Err(SynthError::invalid("column name is required"));
    }
    if col.data_type.trim().is_empty() {
        return Err(SynthError::invalid(format!("column type is required for column: {}", col.name)));
    }
    let dtype = col.data_type.trim().to_ascii_uppercase();
    let mut def = format!("{} {}", ident::escape_identifier(&col.name)?, dtype);
    if matches!(dtype.as_str(), "VARCHAR2" | "CHAR" | "NVARCHAR2" | "NCHAR") {
        if let Some(len) = col.length {
            def.push_str(&format!("({})", len));
        }
    } else if dtype == "NUMBER" {
        if let Some(p) = col.precision {
            match col.scale {
                Some(s) => def.push_str(&format!("({},{})", p, s)),
                None => def.push_str(&format!("({})", p)),
            }
        }
    }
    if let Some(d) = &col.default_value {
        def.push_str(&format!(" DEFAULT {}", d));
    }
    if col.nullable == Some(false) {
        def.push_str(" NOT NULL");
    }
    Ok(def)
}

pub fn build_create_pdb(pdb: &str, admin_user: Option<&str>, admin_password: Option<&str>) -> SynthResult<String> {
    ident::validate_object_name(pdb)?;
    let mut sql = format!("CREATE PLUGGABLE DATABASE {}", ident::escape_identifier(pdb)?);
    if let Some(user) = nonempty(admin_user) {
        sql.push_str(&format!(
            " ADMIN USER {} IDENTIFIED BY \"{}\"",
            ident::escape_identifier(user)?,
            admin_password.unwrap_or("password").replace('"', "\"\"")
        ));
    }
    sql.push_str(&format!(
        " STORAGE (MAXSIZE 2G) DEFAULT TABLESPACE users DATAFILE SIZE 100M AUTOEXTEND ON \
         FILE_NAME_CONVERT = ('pdbseed', '{}')",
        pdb.to_ascii_lowercase()
    ));
    Ok(sql)
}

pub fn build_drop_pdb(pdb: &str, force: bool) -> SynthResult<String> {
    ident::validate_object_name(pdb)?;
    let mut sql = format!("DROP PLUGGABLE DATABASE {}", ident::escape_identifier(pdb)?);
    if force {
        sql.push_str(" INCLUDING DATAFILES");
    }
    Ok(sql)
}

pub fn build_drop_database(db: &str, force: bool) -> SynthResult<String> {
    ident::validate_object_name(db)?;
    if ident::is_system_database(db) {
        return Err(SynthError::invalid(format!("cannot drop system database: {}", db)));
    }
    let mut sql = format!("DROP DATABASE {}", ident::escape_identifier(db)?);
    if force {
        sql.push_str(" INCLUDING DATAFILES");
    }
    Ok(sql)
}

pub fn build_create_profile(profile: &str, parameters: &[(String, String)]) -> SynthResult<String> {
    ident::validate_object_name(profile)?;
    let mut sql = format!("CREATE PROFILE {} LIMIT", ident::escape_identifier(profile)?);
    if parameters.is_empty() {
        for limit in [
            "SESSIONS_PER_USER UNLIMITED",
            "CPU_PER_SESSION UNLIMITED",
            "CPU_PER_CALL UNLIMITED",
            "CONNECT_TIME UNLIMITED",
            "IDLE_TIME UNLIMITED",
            "LOGICAL_READS_PER_SESSION UNLIMITED",
            "LOGICAL_READS_PER_CALL UNLIMITED",
        ] {
            sql.push_str(&format!("\n  {}", limit));
        }
    } else {
        for (key, value) in parameters {
            sql.push_str(&format!("\n  {} {}", key.to_ascii_uppercase(), value));
        }
    }
    Ok(sql)
}

pub fn build_alter_profile(profile: &str, parameters: &[(String, String)]) -> SynthResult<String> {
    ident::validate_object_name(profile)?;
    let mut sql = format!("ALTER PROFILE {} LIMIT", ident::escape_identifier(profile)?);
    for (key, value) in parameters {
        sql.push_str(&format!("\n  {} {}", key.to_ascii_uppercase(), value));
    }
    Ok(sql)
}

/// RMAN backup script; `backup_type` is "full" or "incremental".
pub fn build_rman_backup_script(backup_type: &str, backup_location: Option<&str>) -> String {
    let mut script = String::from("RUN {\n");
    if backup_type.eq_ignore_ascii_case("incremental") {
        script.push_str("  BACKUP INCREMENTAL LEVEL 1 DATABASE");
    } else {
        script.push_str("  BACKUP DATABASE");
    }
    if let Some(loc) = nonempty(backup_location) {
        script.push_str(&format!(" FORMAT '{}/backup_%d_%T_%s_%p.bkp'", loc));
    }
    script.push_str(";\n  SQL 'ALTER SYSTEM ARCHIVE LOG CURRENT';\n}");
    script
}

fn validate_username(username: &str) -> SynthResult<()> {
    ident::validate_object_name(username)?;
    if ident::is_system_user(username) {
        return Err(SynthError::invalid(format!("cannot modify system user: {}", username)));
    }
    Ok(())
}

fn nonempty(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "ddl_tests.rs"]
mod ddl_tests;
