use tokio::time::Duration;
use validator::Validate;

use crate::{
    background_task::{poll_bounded, BoundedPoll},
    entities::tts::{TtsJob, TtsJobStatus, TtsRequest, TtsView},
    errors::AppError,
    repositories::tts::TtsRepository,
    settings::AppConfig,
};

pub struct TtsHandler<R>
where
    R: TtsRepository,
{
    pub tts_repo: R,
    poll_period: Duration,
    max_attempts: u32,
}

impl<R> TtsHandler<R>
where
    R: TtsRepository,
{
    pub fn new(tts_repo: R, config: &AppConfig) -> Self {
        Self::with_polling(tts_repo, config.tts_poll_interval(), config.tts_max_attempts)
    }

    pub fn with_polling(tts_repo: R, poll_period: Duration, max_attempts: u32) -> Self {
        TtsHandler {
            tts_repo,
            poll_period,
            max_attempts,
        }
    }

    /// Submits the text and waits for the job to settle. The returned view
    /// is never loading: it carries the audio, the job's error, or a timeout.
    pub async fn generate(&self, request: TtsRequest) -> Result<TtsView, AppError> {
        request.validate()?;

        let created = self.tts_repo.generate(&request).await?;
        tracing::info!(job_id = %created.job_id, "Speech job queued");

        let outcome = poll_bounded(
            self.poll_period,
            self.max_attempts,
            || self.tts_repo.job_status(&created.job_id),
            TtsJob::is_terminal,
        )
        .await;

        Ok(view_for(outcome))
    }
}

fn view_for(outcome: BoundedPoll<TtsJob>) -> TtsView {
    let attempts = outcome.attempts();
    match outcome {
        BoundedPoll::Completed { value: job, .. } if job.status == TtsJobStatus::Completed => TtsView {
            loading: false,
            audio_url: job.audio_url,
            error: None,
            timed_out: false,
            attempts,
        },
        BoundedPoll::Completed { value: job, .. } => TtsView {
            loading: false,
            audio_url: None,
            error: Some(job.error.unwrap_or_else(|| "Speech generation failed".to_string())),
            timed_out: false,
            attempts,
        },
        BoundedPoll::Exhausted { .. } => {
            tracing::warn!(attempts, "Speech job did not finish in time");
            TtsView {
                loading: false,
                audio_url: None,
                error: Some("Timed out waiting for audio".to_string()),
                timed_out: true,
                attempts,
            }
        }
    }
}
