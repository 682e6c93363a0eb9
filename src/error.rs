use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    /// Transport failure or a non-2xx status.
    #[error("Network response was not ok ({0})")]
    Network(String),

    /// The response parsed but carried `success: false`.
    #[error("API request was not successful")]
    Api,

    #[error("{0}")]
    Unknown(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),
}

impl BoardError {
    pub fn unknown() -> Self {
        BoardError::Unknown("An unknown error occurred".to_string())
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_have_readable_messages() {
        assert_eq!(
            BoardError::Network("HTTP 503".into()).to_string(),
            "Network response was not ok (HTTP 503)"
        );
        assert_eq!(BoardError::Api.to_string(), "API request was not successful");
        assert_eq!(BoardError::unknown().to_string(), "An unknown error occurred");
    }
}
