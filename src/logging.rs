//! Tracing subscriber setup for the `setlist` binary.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

/// Level selected by the global verbosity flags.
pub fn level_for(cli: &Cli) -> Level {
    if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Install the global subscriber. Logs go to stderr so rendered output on
/// stdout stays clean.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(cli))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn level(args: &[&str]) -> Level {
        level_for(&Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_levels() {
        assert_eq!(level(&["setlist", "inspect", "x.html"]), Level::WARN);
        assert_eq!(level(&["setlist", "-v", "inspect", "x.html"]), Level::DEBUG);
        assert_eq!(level(&["setlist", "inspect", "x.html", "-q"]), Level::ERROR);
    }
}
