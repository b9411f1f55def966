//! Console logging for the riego CLI
//!
//!   riego --debug finca add ...          # store writes logged as "<op> finca, ..."
//!   RUST_LOG=riego_store=debug riego ...  # fine-grained control, wins over --debug
//!
//! Logs go to stderr so `--json` output on stdout stays parseable.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is unset.
fn default_directive(debug: bool) -> &'static str {
    if debug {
        "riego_store=debug,info"
    } else {
        "info"
    }
}

pub fn init(debug: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_only_raises_store_logs() {
        assert_eq!(default_directive(false), "info");
        assert_eq!(default_directive(true), "riego_store=debug,info");
        assert!(default_directive(true).parse::<EnvFilter>().is_ok());
    }
}
