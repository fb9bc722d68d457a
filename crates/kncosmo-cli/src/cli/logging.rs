use anyhow::Context;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Installs the stderr fmt subscriber once per process. `RUST_LOG` wins over
/// the verbosity-derived default.
pub(super) fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    let default_directive = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!(error))
        .context("failed to install tracing subscriber")?;

    let _ = INITIALISED.set(());
    Ok(())
}
