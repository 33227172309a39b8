//! Response gateway
//!
//! Decides between remote generation and the local catalog for each user
//! message. Every failure on the remote path is resolved here into a catalog
//! reply, so [`ResponseGateway::respond`] always yields text.

use async_trait::async_trait;
use parking_lot::Mutex;
use services::catalog;
use shared::config::CoachConfig;
use shared::message::Sender;
use shared::mode::Mode;
use std::sync::Arc;
use std::time::Duration;
use zeroize::Zeroizing;

use crate::gemini::GeminiClient;
use crate::history::ConversationHistory;
use crate::rate_limit::RateLimiter;

/// Appended to every mode's system instruction.
pub const DISCLAIMER: &str = " Keep responses conversational, supportive, and under 200 words. Always remind users to seek professional help for serious mental health concerns.";

/// A remote text generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, api_key: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Clone, Copy)]
pub struct ResponseRequest<'a> {
    pub message: &'a str,
    pub mode: Mode,
    /// Whether remote generation is wanted at all
    pub use_ai: bool,
    /// Caller-supplied key; empty means "use the default"
    pub user_api_key: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Catalog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

pub struct ResponseGateway {
    generator: Arc<dyn TextGenerator>,
    default_api_key: Option<Zeroizing<String>>,
    limiter: RateLimiter,
    history: Mutex<ConversationHistory>,
}

impl ResponseGateway {
    /// Gateway backed by the Gemini endpoint from `config`
    pub fn new(config: &CoachConfig) -> anyhow::Result<Self> {
        let client = GeminiClient::new(config.endpoint.clone(), config.request_timeout)?;
        Ok(Self::with_generator(
            Arc::new(client),
            config.default_api_key.clone(),
            config.min_call_interval,
        ))
    }

    pub fn with_generator(
        generator: Arc<dyn TextGenerator>,
        default_api_key: Option<String>,
        min_interval: Duration,
    ) -> Self {
        Self {
            generator,
            default_api_key: default_api_key
                .filter(|k| !k.is_empty())
                .map(Zeroizing::new),
            limiter: RateLimiter::new(min_interval),
            history: Mutex::new(ConversationHistory::new()),
        }
    }

    pub fn has_default_key(&self) -> bool {
        self.default_api_key.is_some()
    }

    /// Caller key if non-empty, else the process default
    fn effective_api_key(&self, user_api_key: Option<&str>) -> Option<Zeroizing<String>> {
        user_api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| Zeroizing::new(k.to_string()))
            .or_else(|| self.default_api_key.clone())
    }

    /// Full prompt text: system instruction, recent context, disclaimer and
    /// the user message.
    pub fn build_prompt(&self, mode: Mode, message: &str) -> String {
        let context = self.history.lock().context();
        let mut system = mode.system_prompt().to_string();
        if !context.is_empty() {
            system.push_str("\n\nConversation context:\n");
            system.push_str(&context);
        }
        format!("{}{}\n\nUser: {}", system, DISCLAIMER, message)
    }

    pub async fn respond(&self, request: ResponseRequest<'_>) -> Reply {
        let generation = {
            let mut history = self.history.lock();
            history.push(Sender::User, request.message);
            history.generation()
        };

        let reply = match self.effective_api_key(request.user_api_key) {
            Some(api_key) if request.use_ai => self.respond_remote(request, &api_key).await,
            _ => None,
        }
        .unwrap_or_else(|| Reply {
            text: catalog::fallback_response(request.message, request.mode),
            source: ReplySource::Catalog,
        });

        {
            let mut history = self.history.lock();
            if history.generation() == generation {
                history.push(Sender::Bot, &reply.text);
            } else {
                tracing::debug!("History cleared while replying, not recording reply");
            }
        }
        reply
    }

    async fn respond_remote(&self, request: ResponseRequest<'_>, api_key: &str) -> Option<Reply> {
        let prompt = self.build_prompt(request.mode, request.message);
        self.limiter.acquire().await;

        match self.generator.generate(&prompt, api_key).await {
            Ok(text) if !text.trim().is_empty() => Some(Reply {
                text,
                source: ReplySource::Remote,
            }),
            Ok(_) => {
                tracing::warn!("Generation API returned empty text, using fallback");
                None
            }
            Err(e) => {
                tracing::warn!("Generation API error, using fallback: {:#}", e);
                None
            }
        }
    }

    /// Forget the rolling context, e.g. after the session is reset
    pub fn clear_history(&self) {
        self.history.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use services::classifier::{classify, Category};
    use tokio::time::Instant;
    use tracing_test::traced_test;

    #[derive(Default)]
    struct RecordingGenerator {
        fail: bool,
        calls: Mutex<Vec<(String, String, Instant)>>,
    }

    impl RecordingGenerator {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str, api_key: &str) -> anyhow::Result<String> {
            self.calls
                .lock()
                .push((prompt.to_string(), api_key.to_string(), Instant::now()));
            if self.fail {
                Err(anyhow!("gemini error: 500 Internal Server Error"))
            } else {
                Ok("live answer".to_string())
            }
        }
    }

    fn gateway(generator: Arc<RecordingGenerator>, default_key: Option<&str>) -> ResponseGateway {
        ResponseGateway::with_generator(
            generator,
            default_key.map(str::to_string),
            Duration::from_millis(1000),
        )
    }

    fn request<'a>(message: &'a str, use_ai: bool, key: Option<&'a str>) -> ResponseRequest<'a> {
        ResponseRequest {
            message,
            mode: Mode::General,
            use_ai,
            user_api_key: key,
        }
    }

    fn is_stress_reply(reply: &Reply) -> bool {
        catalog::resolve(Mode::General, Category::Stress)
            .contains(&catalog::strip_prefix(&reply.text))
    }

    #[tokio::test]
    async fn test_ai_disabled_uses_catalog() {
        let generator = Arc::new(RecordingGenerator::default());
        let gw = gateway(generator.clone(), Some("default-key"));

        let reply = gw
            .respond(request("I'm feeling very stressed about exams", false, None))
            .await;

        assert_eq!(reply.source, ReplySource::Catalog);
        assert!(is_stress_reply(&reply));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_credential_uses_catalog() {
        let generator = Arc::new(RecordingGenerator::default());
        let gw = gateway(generator.clone(), None);

        let reply = gw
            .respond(request("I'm feeling very stressed about exams", true, Some("  ")))
            .await;

        assert_eq!(reply.source, ReplySource::Catalog);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_user_key_wins_over_default() {
        let generator = Arc::new(RecordingGenerator::default());
        let gw = gateway(generator.clone(), Some("default-key"));

        let reply = gw.respond(request("hello", true, Some("user-key"))).await;
        assert_eq!(reply.source, ReplySource::Remote);
        assert_eq!(reply.text, "live answer");
        assert_eq!(generator.calls.lock()[0].1, "user-key");
    }

    #[tokio::test]
    async fn test_default_key_used_when_user_key_missing() {
        let generator = Arc::new(RecordingGenerator::default());
        let gw = gateway(generator.clone(), Some("default-key"));

        gw.respond(request("hello", true, None)).await;
        assert_eq!(generator.calls.lock()[0].1, "default-key");
    }

    #[tokio::test]
    async fn test_generator_failure_falls_back() {
        let generator = Arc::new(RecordingGenerator::failing());
        let gw = gateway(generator.clone(), Some("k"));

        let reply = gw
            .respond(request("I'm feeling very stressed about exams", true, None))
            .await;

        assert_eq!(reply.source, ReplySource::Catalog);
        assert!(is_stress_reply(&reply));
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_calls_are_spaced() {
        let generator = Arc::new(RecordingGenerator::default());
        let gw = gateway(generator.clone(), Some("k"));

        gw.respond(request("one", true, None)).await;
        gw.respond(request("two", true, None)).await;

        let calls = generator.calls.lock();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].2 - calls[0].2 >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_prompt_carries_instruction_context_and_disclaimer() {
        let generator = Arc::new(RecordingGenerator::default());
        let gw = gateway(generator.clone(), None);

        // catalog-only turns still feed the rolling history
        gw.respond(request("first question", false, None)).await;

        let prompt = gw.build_prompt(Mode::Productivity, "second question");
        assert!(prompt.starts_with(Mode::Productivity.system_prompt()));
        assert!(prompt.contains("\n\nConversation context:\nuser: first question\nbot: "));
        assert!(prompt.contains(DISCLAIMER));
        assert!(prompt.ends_with("\n\nUser: second question"));
    }

    #[tokio::test]
    async fn test_prompt_without_history_has_no_context_block() {
        let gw = gateway(Arc::new(RecordingGenerator::default()), None);
        let prompt = gw.build_prompt(Mode::General, "hi");
        assert!(!prompt.contains("Conversation context"));

        gw.respond(request("hi", false, None)).await;
        gw.clear_history();
        assert!(!gw.build_prompt(Mode::General, "hi").contains("Conversation context"));
    }

    struct GatedGenerator {
        release: tokio::sync::Notify,
        started: tokio::sync::Notify,
    }

    #[async_trait]
    impl TextGenerator for GatedGenerator {
        async fn generate(&self, _prompt: &str, _api_key: &str) -> anyhow::Result<String> {
            self.started.notify_one();
            self.release.notified().await;
            Ok("reply from the old session".to_string())
        }
    }

    #[tokio::test]
    async fn test_reply_finishing_after_clear_is_not_recorded() {
        let generator = Arc::new(GatedGenerator {
            release: tokio::sync::Notify::new(),
            started: tokio::sync::Notify::new(),
        });
        let gw = Arc::new(ResponseGateway::with_generator(
            generator.clone(),
            Some("k".to_string()),
            Duration::from_millis(1),
        ));

        let task = {
            let gw = gw.clone();
            tokio::spawn(async move { gw.respond(request("old question", true, None)).await })
        };
        generator.started.notified().await;
        gw.clear_history();
        generator.release.notify_one();

        let reply = task.await.unwrap();
        assert_eq!(reply.source, ReplySource::Remote);

        let prompt = gw.build_prompt(Mode::General, "first message of the new session");
        assert!(!prompt.contains("reply from the old session"));
        assert!(!prompt.contains("Conversation context"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_http_500_falls_back() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let config = CoachConfig {
            default_api_key: Some("k".into()),
            endpoint: format!("{}/v1beta/models/gemini-pro:generateContent", server.uri()),
            ..CoachConfig::default()
        };
        let gw = ResponseGateway::new(&config).unwrap();

        let reply = gw
            .respond(request("I'm feeling very stressed about exams", true, None))
            .await;
        assert_eq!(reply.source, ReplySource::Catalog);
        assert!(is_stress_reply(&reply));
        assert_eq!(classify("I'm feeling very stressed about exams"), Category::Stress);
        assert!(logs_contain("Generation API error, using fallback"));
    }
}
