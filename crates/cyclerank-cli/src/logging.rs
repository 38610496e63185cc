//! Tracing subscriber setup.
//!
//! Diagnostics go to stderr so stdout stays reserved for command output.
//! `RUST_LOG` wins when set; otherwise the level follows `--quiet` and
//! `--verbose`.
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Default filter directive for the given verbosity flags.
pub fn default_directive(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "cyclerank_core=debug,cyclerank=debug,warn"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(quiet: bool, verbose: bool, colors: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(colors)
                .with_target(verbose),
        )
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_default() {
        assert_eq!(default_directive(true, false), "error");
        assert_eq!(default_directive(false, false), "warn");
        assert!(default_directive(false, true).contains("cyclerank_core=debug"));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(false, false, false);
        init(true, false, false);
    }
}
