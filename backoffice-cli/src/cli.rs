use std::time::Duration;

use backoffice_table::navigation::HistoryMode;
use clap::Parser;
use simplelog::LevelFilter;

use crate::script::Step;

#[derive(Parser, Debug)]
#[command(name = "backoffice-cli")]
#[command(about = "Replay table interactions against an in-memory URL")]
#[command(version)]
#[command(after_help = "\
Steps:
  page=N                 go to a 1-based page
  per-page=N             change rows per page
  sort=COL[:DIR],...     replace sorting (empty clears)
  paginate=INDEX:SIZE    renderer pagination change (0-based index)
  filter=COL:VALUE       set a column filter (empty value clears)
  hide=COL               toggle column visibility
  select=KEY             toggle row selection
  wait=MS                let timers run
  unmount                detach the table from the URL")]
/// Command-line arguments.
pub struct Cli {
    /// Starting query string (use "" for none)
    pub query: String,

    /// Steps to replay, in order
    pub steps: Vec<Step>,

    /// Push a history entry per URL change instead of replacing
    #[arg(long)]
    pub push: bool,

    /// Quiet interval before a filter change resets the page
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Level written to backoffice-cli.log
    #[arg(long, env = "BACKOFFICE_LOG", default_value = "info")]
    pub log_level: LevelFilter,
}

impl Cli {
    /// Returns the history mode selected by `--push`.
    pub fn history_mode(&self) -> HistoryMode {
        if self.push {
            HistoryMode::Push
        } else {
            HistoryMode::Replace
        }
    }

    /// Returns the debounce override, if any.
    pub fn debounce(&self) -> Option<Duration> {
        self.debounce_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "backoffice-cli",
            "--push",
            "foo=bar",
            "page=2",
            "--debounce-ms",
            "100",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.history_mode(), HistoryMode::Push);
        assert_eq!(cli.debounce(), Some(Duration::from_millis(100)));
        assert_eq!(cli.query, "foo=bar");
        assert_eq!(cli.steps, vec![Step::Page(2)]);
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["backoffice-cli", ""]).unwrap();
        assert_eq!(cli.history_mode(), HistoryMode::Replace);
        assert_eq!(cli.debounce(), None);
        assert!(cli.steps.is_empty());
    }

    #[test]
    fn test_parse_args_errors() {
        assert_eq!(
            Cli::try_parse_from(["backoffice-cli"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            Cli::try_parse_from(["backoffice-cli", "", "page=1", "nope"])
                .unwrap_err()
                .kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            Cli::try_parse_from(["backoffice-cli", "--debounce-ms", "soon", ""])
                .unwrap_err()
                .kind(),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_help_is_not_a_failure() {
        let err = Cli::try_parse_from(["backoffice-cli", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }
}
