use std::path::Path;

use log::info;
use serde_json::Value;
use tokio::time::{Instant, sleep};

use crate::config::{Config, PollPolicy};
use crate::error::{Error, Result};
use crate::replicate::schemas::{Prediction, PredictionInput, PredictionStatus};
use crate::replicate::{GenerationBackend, ReplicateClient};

/// Orchestrates one generation attempt against a backend: upload the
/// control image, submit the job, poll until terminal or timeout,
/// extract the output URL.
///
/// Holds no shared state; concurrent calls run as fully independent
/// attempts. Serializing them is the caller's responsibility.
pub struct Generator<B> {
    backend: B,
    poll: PollPolicy,
}

impl<B: GenerationBackend> Generator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            poll: PollPolicy::default(),
        }
    }

    pub fn with_poll_policy(backend: B, poll: PollPolicy) -> Self {
        Self { backend, poll }
    }

    /// Run one full attempt and return the generated image URL.
    pub async fn generate(&self, image: Vec<u8>, prompt: &str) -> Result<String> {
        let control_image_url = self.backend.upload(image).await?;
        info!("uploaded control image: {control_image_url}");

        let input = PredictionInput::controlnet_scribble(prompt, &control_image_url);
        let submitted = self.backend.submit(input).await?;
        info!("created prediction {}", submitted.id);

        let finished = self.await_completion(submitted).await?;
        if finished.status != PredictionStatus::Succeeded {
            let message = finished
                .error
                .unwrap_or_else(|| "prediction failed".to_string());
            return Err(Error::GenerationFailed { message });
        }

        extract_output(&finished)
    }

    /// Poll until the prediction leaves its active states. Each fetch
    /// replaces the local copy wholesale; the remote service is the
    /// sole source of truth. The budget is checked after every fetch,
    /// so a fetch landing past the deadline times out even if the
    /// prediction finished meanwhile.
    pub async fn await_completion(&self, job: Prediction) -> Result<Prediction> {
        let started = Instant::now();
        let mut current = job;

        while current.status.is_active() {
            sleep(self.poll.interval).await;
            current = self.backend.status(&current.id).await?;

            let elapsed = started.elapsed();
            if elapsed > self.poll.budget {
                return Err(Error::Timeout {
                    elapsed_ms: elapsed.as_millis(),
                });
            }
        }

        Ok(current)
    }
}

/// Pull the first usable URL out of a succeeded prediction. The model
/// returns either a list of URLs or a single one.
pub fn extract_output(prediction: &Prediction) -> Result<String> {
    match &prediction.output {
        Some(Value::Array(items)) => match items.first() {
            Some(Value::String(url)) => Ok(url.clone()),
            _ => Err(Error::UnexpectedOutput),
        },
        Some(Value::String(url)) => Ok(url.clone()),
        _ => Err(Error::UnexpectedOutput),
    }
}

/// Caller-facing entry point: turn a local scribble image into a
/// generated illustration URL using the configured Replicate model.
pub async fn generate_from_scribble(
    config: &Config,
    image_path: &Path,
    prompt: &str,
) -> Result<String> {
    let bytes = tokio::fs::read(image_path).await?;
    let generator =
        Generator::with_poll_policy(ReplicateClient::new(config), config.poll.clone());
    generator.generate(bytes, prompt).await
}
