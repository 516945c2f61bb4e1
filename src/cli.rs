mod check;
mod select;
mod terminal;

use check::Check;
use clap::ArgAction;
use select::Select;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.command.run()
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the requisitions of a listing that meet any filter
    Match(Select),

    /// Load a filter document and print what each filter constrains
    Check(Check),
}

impl Command {
    fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Match(command) => command.run(),
            Self::Check(command) => command.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_match_arguments() {
        let cli = Cli::try_parse_from([
            "reqfilter",
            "-vv",
            "match",
            "--filters",
            "filters.yaml",
            "--detailed",
            "--output",
            "json",
            "listing.json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Match(_)));
    }

    #[test]
    fn match_requires_a_filter_document() {
        assert!(Cli::try_parse_from(["reqfilter", "match", "listing.yaml"]).is_err());
    }

    #[test]
    fn parses_check_arguments() {
        let cli = Cli::try_parse_from(["reqfilter", "check", "filters.toml"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
    }
}
