use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds for one generation attempt. None of these are retried;
/// every error ends the attempt and propagates to the caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("missing Replicate API token (set DOODLE_REPLICATE_TOKEN)")]
    MissingToken,

    #[error("upload failed: {reason}")]
    Upload { reason: String },

    #[error("prediction create failed: HTTP {status}: {body}")]
    Submit { status: u16, body: String },

    #[error("prediction fetch failed: HTTP {status}: {body}")]
    Fetch { status: u16, body: String },

    #[error("prediction timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u128 },

    #[error("prediction failed: {message}")]
    GenerationFailed { message: String },

    #[error("unexpected prediction output format")]
    UnexpectedOutput,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
