use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Maps the error to the process exit code. Fetch failures and parse
    /// failures must stay distinguishable at the process boundary.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Fetch(_) | AppError::InvalidUrl(_) => 2,
            AppError::Parse(_) => 3,
            _ => 1,
        }
    }
}

/// The page source could not deliver markup. Terminal for the run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Page load timed out after {0}s")]
    Timeout(u64),

    #[error("No usable browser: {0}")]
    BrowserUnavailable(String),

    #[error("Browser rendering failed: {0}")]
    Render(String),
}

/// Markup or query could not be turned into matches. Terminal for the run.
/// A query that parses but matches nothing is not an error.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to parse markup: {0}")]
    Markup(String),

    #[error("Invalid query expression: {0}")]
    Expression(String),

    #[error("Query evaluation failed: {0}")]
    Evaluation(String),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to serialize records to JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write tabular output: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write output file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
