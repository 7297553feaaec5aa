use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl PredictionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Starting | Self::Processing)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }
}

/// One remote generation job, exactly as the service reports it. The
/// service is the sole source of truth: a re-fetch replaces the whole
/// value, it is never merged into an older copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    /// Populated only on succeeded predictions. Shape varies by model
    /// (single URL or list of URLs), so it stays a raw value until
    /// output extraction.
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Input map for jagilley/controlnet-scribble. Everything except the
/// prompt and the control image is a fixed default; the upstream model
/// expects num_samples and image_resolution as strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionInput {
    pub prompt: String,
    pub image: String,
    pub num_samples: String,
    pub image_resolution: String,
    pub ddim_steps: u32,
    pub scale: u32,
    pub seed: u32,
    pub a_prompt: String,
    pub n_prompt: String,
}

impl PredictionInput {
    pub fn controlnet_scribble(prompt: &str, control_image_url: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            image: control_image_url.to_string(),
            num_samples: "1".to_string(),
            image_resolution: "768".to_string(),
            ddim_steps: 28,
            scale: 8,
            seed: 42,
            a_prompt: "best quality, highly detailed, watercolor children illustration, \
                       soft colors, gentle light"
                .to_string(),
            n_prompt: "lowres, bad anatomy, extra fingers, cropped, worst quality, \
                       low quality, jpeg artifacts"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePrediction {
    pub version: String,
    pub input: PredictionInput,
}
