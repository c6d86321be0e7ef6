//! Reader for two-row-header DSV exports and the public visibility filter
//! applied to them.

pub mod harness;
pub mod operators;
pub mod reader;
pub mod record;

pub use {
    operators::visibility::{Visibility, VisibilityFilter, VISIBILITY_FIELD},
    reader::{read, ParseFailure, Parsed, TabularReader},
    record::{Record, RecordSet},
};

/// Installs the `fmt` subscriber, honouring `RUST_LOG` and defaulting to `warn`.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}
