pub mod config;
pub mod dashboard;
pub mod show;

use chrono::Datelike;
use clap::{Args, Parser, Subcommand};

use crate::error::BoardError;
use crate::settings::Settings;
use crate::source::{DataSource, FileSource, HttpSource};
use crate::window::{MONTHS_IN_YEAR, MONTH_NAMES};

/// Parse a month argument into a 0-based month index.
///
/// Accepts `1`-`12`, an English month name or any prefix of at least three
/// letters, or `current` for the local calendar month.
pub(crate) fn parse_month(value: &str) -> Result<usize, BoardError> {
    let v = value.trim().to_ascii_lowercase();
    if v == "current" || v == "now" {
        return Ok(chrono::Local::now().month0() as usize);
    }
    if let Ok(n) = v.parse::<usize>() {
        if (1..=MONTHS_IN_YEAR).contains(&n) {
            return Ok(n - 1);
        }
        return Err(BoardError::InvalidMonth(value.to_string()));
    }
    if v.len() >= 3 {
        if let Some(idx) = MONTH_NAMES
            .iter()
            .position(|name| name.to_ascii_lowercase().starts_with(&v))
        {
            return Ok(idx);
        }
    }
    Err(BoardError::InvalidMonth(value.to_string()))
}

#[derive(Parser)]
#[command(
    name = "affiliate-board",
    version,
    about = "Plan vs. fact dashboard for affiliate managers."
)]
pub struct Cli {
    #[command(flatten)]
    pub view: ViewArgs,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct ViewArgs {
    /// Endpoint to fetch instead of the configured one
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,
    /// Read the response envelope from a local JSON file
    #[arg(long)]
    pub file: Option<String>,
    /// First displayed month: 1-12, a month name, or `current`
    #[arg(long, value_parser = parse_month)]
    pub start: Option<usize>,
}

impl ViewArgs {
    pub fn source(&self, settings: &Settings) -> Box<dyn DataSource> {
        match (&self.file, &self.url) {
            (Some(path), _) => Box::new(FileSource::new(path)),
            (None, Some(url)) => Box::new(HttpSource::new(url.clone())),
            (None, None) => Box::new(HttpSource::new(settings.endpoint.clone())),
        }
    }

    pub fn start_month(&self) -> usize {
        self.start.unwrap_or(0)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the six-month table to stdout and exit.
    Show {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// View or change saved settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings.
    Show,
    /// Save the endpoint the dashboard fetches from.
    SetEndpoint {
        /// Full URL of the JSON endpoint
        url: String,
    },
    /// Restore default settings.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_month_accepts_numbers() {
        assert_eq!(parse_month("1").unwrap(), 0);
        assert_eq!(parse_month("12").unwrap(), 11);
        assert!(parse_month("0").is_err());
        assert!(parse_month("13").is_err());
    }

    #[test]
    fn parse_month_accepts_names_and_prefixes() {
        assert_eq!(parse_month("March").unwrap(), 2);
        assert_eq!(parse_month("sep").unwrap(), 8);
        assert_eq!(parse_month(" DECEMBER ").unwrap(), 11);
        assert!(parse_month("ju").is_err());
        assert!(parse_month("smarch").is_err());
    }

    #[test]
    fn parse_month_current_is_in_range() {
        assert!(parse_month("current").unwrap() < MONTHS_IN_YEAR);
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["affiliate-board", "show", "--file", "a.json", "--start", "jun"]).unwrap();
        match cli.command {
            Some(Commands::Show { view }) => {
                assert_eq!(view.file.as_deref(), Some("a.json"));
                assert_eq!(view.start_month(), 5);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn cli_rejects_url_with_file() {
        assert!(Cli::try_parse_from(["affiliate-board", "--url", "http://x", "--file", "a.json"]).is_err());
    }

    #[test]
    fn source_prefers_file_then_url_then_settings() {
        let settings = Settings::default();
        let args = ViewArgs { file: Some("a.json".into()), ..Default::default() };
        assert_eq!(args.source(&settings).describe(), "a.json");
        let args = ViewArgs { url: Some("http://x/api".into()), ..Default::default() };
        assert_eq!(args.source(&settings).describe(), "http://x/api");
        let args = ViewArgs::default();
        assert_eq!(args.source(&settings).describe(), settings.endpoint);
    }
}
