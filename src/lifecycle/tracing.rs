//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber filtered by
//! `RUST_LOG`. Module paths are hidden; records carry an `entity_type` field
//! instead.
//!
//! ```bash
//! # Actor lifecycle and mutations
//! RUST_LOG=info factory-floor orders list
//!
//! # Client requests, persistence and full payloads
//! RUST_LOG=debug factory-floor machines status M-02 running
//! ```
//!
//! With `RUST_LOG=info` a status change reads:
//!
//! ```text
//! INFO Loaded collection collection=prod_machines count=4
//! INFO Actor started entity_type="Machine" size=4
//! INFO Action ok entity_type="Machine" id="M-02"
//! INFO Shutdown entity_type="Machine" size=4
//! ```
//!
//! At `debug` level each client call opens a span named after the method
//! (`set_status{id="M-02" status=Running}`) and the store logs every save.

/// Initialises the global subscriber. Call once, from the binary.
///
/// Logs go to stderr; stdout carries the command output.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
