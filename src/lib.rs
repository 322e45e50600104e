pub mod error;
pub mod ident;
pub mod exec;
pub mod capability;
pub mod catalog;
pub mod discovery;
pub mod synth;
pub mod session;
pub mod tools;
pub mod trace;

pub use error::{SynthError, SynthResult};
pub use session::SessionContext;
