use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::chat::ChatProvider;
use crate::error::DebateError;

use super::config::ResilienceConfig;

/// Resilient wrapper that paces calls and retries transient failures
/// using exponential backoff.
pub struct ResilientChat {
    pub(super) inner: Box<dyn ChatProvider>,
    pub(super) cfg: ResilienceConfig,
}

impl ResilientChat {
    /// Creates a new resilient wrapper around an existing provider.
    pub fn new(inner: Box<dyn ChatProvider>, cfg: ResilienceConfig) -> Self {
        Self { inner, cfg }
    }

    pub(super) async fn retry<F, Fut, T>(&self, mut op: F) -> Result<T, DebateError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DebateError>>,
    {
        let mut attempts_left = self.cfg.max_attempts;
        let mut idx = 0usize;
        let mut last_err: Option<DebateError> = None;

        while attempts_left > 0 {
            self.pre_call_sleep().await;
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempts_left == 1 || !Self::is_retryable(&err) {
                        return Err(err);
                    }
                    log::warn!("transient generation failure, retrying: {err}");
                    last_err = Some(err);
                    self.backoff_sleep(idx).await;
                    attempts_left -= 1;
                    idx += 1;
                }
            }
        }

        Err(DebateError::RetryExceeded {
            attempts: self.cfg.max_attempts,
            last_error: last_err.map(|e| e.to_string()).unwrap_or_default(),
        })
    }

    fn is_retryable(err: &DebateError) -> bool {
        match err {
            DebateError::HttpError(_) => true,
            DebateError::ProviderError(_) => true,
            DebateError::ResponseFormatError { .. } => true,
            DebateError::JsonError(_) => true,
            DebateError::Generic(_) => true,
            DebateError::RetryExceeded { .. } => false,
            DebateError::AuthError(_) => false,
            DebateError::InvalidRequest(_) => false,
            DebateError::JudgeNonAnswer { .. } => false,
        }
    }

    async fn pre_call_sleep(&self) {
        if self.cfg.pre_call_delay_ms > 0 {
            sleep(Duration::from_millis(self.cfg.pre_call_delay_ms)).await;
        }
    }

    async fn backoff_sleep(&self, attempt_index: usize) {
        let mut delay = self
            .cfg
            .base_delay_ms
            .saturating_mul(1u64 << attempt_index.min(16));
        delay = delay.min(self.cfg.max_delay_ms);
        if self.cfg.jitter {
            let span = (delay / 2).max(1);
            let jitter = ((attempt_index as u64)
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1))
                % span;
            delay = delay.saturating_sub(jitter);
        }
        sleep(Duration::from_millis(delay)).await;
    }
}
