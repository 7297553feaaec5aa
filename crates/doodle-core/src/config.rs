use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

pub const TOKEN_VAR: &str = "DOODLE_REPLICATE_TOKEN";
pub const MODEL_VERSION_VAR: &str = "DOODLE_MODEL_VERSION";
pub const API_BASE_VAR: &str = "DOODLE_API_BASE";

pub const DEFAULT_API_BASE: &str = "https://api.replicate.com/v1";

/// Pinned jagilley/controlnet-scribble version.
/// https://replicate.com/jagilley/controlnet-scribble
pub const DEFAULT_MODEL_VERSION: &str =
    "435061a1b5a4c1e26740464bf786efdfa9cb3a3ac488595a2de23e143fdb0117";

/// Polling policy for a generation attempt. Kept separate from the
/// credentials so tests can shrink the interval and budget.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Suspension between consecutive status fetches.
    pub interval: Duration,
    /// Wall-clock budget for the whole polling phase.
    pub budget: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1800),
            budget: Duration::from_millis(120_000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub api_token: String,
    pub model_version: String,
    pub poll: PollPolicy,
}

impl Config {
    /// Load from the environment, honoring a `.env` file when present.
    /// The API token is the only required value; everything else has a
    /// default. Fails before any network call is made.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_token = match env::var(TOKEN_VAR) {
            Ok(token) if !token.is_empty() => token,
            _ => return Err(Error::MissingToken),
        };
        let model_version = env::var(MODEL_VERSION_VAR)
            .unwrap_or_else(|_| DEFAULT_MODEL_VERSION.to_string());
        let api_base =
            env::var(API_BASE_VAR).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_base,
            api_token,
            model_version,
            poll: PollPolicy::default(),
        })
    }

    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_token: api_token.into(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            poll: PollPolicy::default(),
        }
    }
}
