use async_trait::async_trait;

use crate::chat::{ChatMessage, ChatProvider, ChatResponse};
use crate::error::DebateError;

use super::wrapper::ResilientChat;

#[async_trait]
impl ChatProvider for ResilientChat {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, DebateError> {
        self.retry(|| self.inner.chat(messages)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::chat::TextResponse;
    use crate::resilient::ResilienceConfig;

    struct FlakyProvider {
        calls: Arc<AtomicUsize>,
        fail_first: usize,
        error: fn() -> DebateError,
    }

    #[async_trait]
    impl ChatProvider for FlakyProvider {
        async fn chat(
            &self,
            _messages: &[ChatMessage],
        ) -> Result<Box<dyn ChatResponse>, DebateError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                return Err((self.error)());
            }
            Ok(Box::new(TextResponse {
                text: "ok".to_string(),
            }))
        }
    }

    fn fast_config(max_attempts: usize) -> ResilienceConfig {
        ResilienceConfig {
            max_attempts,
            base_delay_ms: 1,
            max_delay_ms: 2,
            jitter: false,
            pre_call_delay_ms: 0,
        }
    }

    #[tokio::test]
    async fn retries_transient_errors_until_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = ResilientChat::new(
            Box::new(FlakyProvider {
                calls: calls.clone(),
                fail_first: 2,
                error: || DebateError::HttpError("timeout".to_string()),
            }),
            fast_config(3),
        );

        let response = provider.chat(&[]).await.expect("chat");
        assert_eq!(response.text().as_deref(), Some("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn surfaces_last_error_when_attempts_run_out() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = ResilientChat::new(
            Box::new(FlakyProvider {
                calls: calls.clone(),
                fail_first: usize::MAX,
                error: || DebateError::ProviderError("overloaded".to_string()),
            }),
            fast_config(2),
        );

        let err = provider.chat(&[]).await.unwrap_err();
        assert!(matches!(err, DebateError::ProviderError(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn does_not_retry_auth_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = ResilientChat::new(
            Box::new(FlakyProvider {
                calls: calls.clone(),
                fail_first: usize::MAX,
                error: || DebateError::AuthError("bad key".to_string()),
            }),
            fast_config(3),
        );

        let err = provider.chat(&[]).await.unwrap_err();
        assert!(matches!(err, DebateError::AuthError(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
