//! Logging infrastructure for the tome CLI.
//!
//! Structured logging through the `tracing` ecosystem with verbosity flags,
//! colored output and `RUST_LOG` overrides.
//!
//! # Example
//!
//! ```rust,no_run
//! use tome_cli::logger::init_logger;
//! use tracing::{info, debug};
//!
//! init_logger(false, false, false);
//!
//! info!("Starting build");
//! debug!("Parsing document: {}", "button.mdx");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "tome_cli=debug,tome_mdx=debug,tome_docs=debug";
const QUIET_FILTER: &str = "tome_cli=error,tome_mdx=error,tome_docs=error";
const DEFAULT_FILTER: &str = "tome_cli=info,tome_mdx=info,tome_docs=info";

/// Build the filter for the given flags.
///
/// The level is determined in this order:
/// 1. `--verbose` flag: DEBUG for tome crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable
/// 4. Default: INFO for tome crates
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at the start of the program, before any logging occurs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // tracing is global and can only be initialized once per process, so
    // only the filter construction is exercised here.

    #[test]
    fn test_verbose_filter() {
        let filter = build_filter(true, false);
        assert!(filter.to_string().contains("tome_cli=debug"));
    }

    #[test]
    fn test_verbose_wins_over_quiet() {
        let filter = build_filter(true, true);
        assert!(filter.to_string().contains("debug"));
    }

    #[test]
    fn test_quiet_filter() {
        let filter = build_filter(false, true);
        assert!(filter.to_string().contains("tome_cli=error"));
    }
}
