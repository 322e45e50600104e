//! Tracing bootstrap for embedding binaries and test harnesses.
//! Honors RUST_LOG; safe to call more than once.

pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
