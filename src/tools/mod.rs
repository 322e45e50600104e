//! Literal-template SQL builders for the administrative tool surface.
//! Unlike `synth`, nothing here performs inference: each function is a direct
//! mapping from named parameters to formatted SQL text, with identifier
//! validation and system-object safety checks. Execution stays with the
//! owning service.

pub mod ddl;
pub mod dml;
