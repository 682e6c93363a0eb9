use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::settings::{config_dir, Settings};

pub const LOG_ENV: &str = "AFFILIATE_BOARD_LOG";

/// Route tracing events to a log file under the config dir. The terminal
/// belongs to the dashboard, so nothing is written to stdout or stderr.
/// Logging stays off if the file cannot be opened.
pub fn init(settings: &Settings) {
    let dir = config_dir();
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("affiliate-board.log"))
    {
        Ok(f) => f,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
