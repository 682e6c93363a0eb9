use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{BoardError, Result};
use crate::models::{ApiResponse, Payload};

/// Where the board payload comes from. `fetch` is a single attempt.
pub trait DataSource: Send {
    fn fetch(&self) -> Result<Payload>;
    fn describe(&self) -> String;
}

/// Decode the `{ success, data }` envelope.
pub fn parse_response(body: &str) -> Result<Payload> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| BoardError::Unknown(format!("Could not parse response: {e}")))?;
    if !response.success {
        return Err(BoardError::Api);
    }
    Ok(response.data.unwrap_or_default())
}

pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl DataSource for HttpSource {
    fn fetch(&self) -> Result<Payload> {
        info!(url = %self.url, "fetching board data");
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| BoardError::Unknown(format!("Could not build HTTP client: {e}")))?;

        let resp = client
            .get(&self.url)
            .send()
            .map_err(|e| BoardError::Network(format!("request failed: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "board endpoint returned an error status");
            return Err(BoardError::Network(format!("HTTP {status}")));
        }
        let body = resp
            .text()
            .map_err(|e| BoardError::Network(format!("could not read body: {e}")))?;

        let payload = parse_response(&body)?;
        info!(managers = payload.table.len(), "board data loaded");
        Ok(payload)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the same envelope from a local JSON file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<Payload> {
        info!(path = %self.path.display(), "reading board data");
        let body = std::fs::read_to_string(&self.path).map_err(|e| {
            BoardError::Unknown(format!("Could not read {}: {e}", self.path.display()))
        })?;
        parse_response(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
