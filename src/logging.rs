//! Tracing bootstrap for the desktop binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ENV_FILTER_VARS: [&str; 2] = ["SHELF_READER_LOG", "RUST_LOG"];
const DEFAULT_DIRECTIVE: &str = "info";

/// Picks the first non-empty filter directive from the environment.
pub fn directive_from_env() -> String {
    first_directive(ENV_FILTER_VARS.iter().map(|var| std::env::var(var).ok()))
}

fn first_directive(candidates: impl IntoIterator<Item = Option<String>>) -> String {
    candidates
        .into_iter()
        .find_map(|value| value.filter(|directive| !directive.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}

/// Installs the global subscriber. Calling it twice is an error from `try_init`.
pub fn init() -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(directive_from_env())
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVE))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;

    tracing::info!("Logging initialized; override with SHELF_READER_LOG or RUST_LOG");
    Ok(())
}
