use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No domain provided. Use --domain or --list")]
    MissingTarget,
    #[error("Only one of --txt, --csv, or --json can be specified")]
    ConflictingFormats,
    #[error("--legacy output is always plain text; remove --txt/--csv/--json")]
    LegacyWithFormat,
    #[error("VT_API_KEY environment variable not set")]
    MissingApiKey,
    #[error("Reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    InvalidHttpResponse {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("JSON encode: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
