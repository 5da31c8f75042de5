//! A single debate participant's conversational state.
//!
//! An [`Agent`] owns its persona, its append-only memory and the
//! events it has observed since its last turn. Generation itself is
//! delegated to a [`ChatProvider`].

use crate::chat::{ChatMessage, ChatProvider};
use crate::error::DebateError;

/// One participant in a debate: a player, the moderator or the judge.
#[derive(Debug, Default)]
pub struct Agent {
    name: String,
    persona: Option<String>,
    turn_template: Option<String>,
    memory: Vec<ChatMessage>,
    pending_events: Vec<String>,
}

impl Agent {
    /// Creates a new agent with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The agent's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Installs the persona prompt, the immutable leading context
    /// entry for every generation call.
    ///
    /// Calling this twice is a misuse error: the persona must stay
    /// first in context, and a silent overwrite would reorder what
    /// the agent has already been conditioned on.
    pub fn set_persona(&mut self, text: impl Into<String>) -> Result<(), DebateError> {
        if self.persona.is_some() {
            return Err(DebateError::InvalidRequest(format!(
                "persona already set for agent '{}'",
                self.name
            )));
        }
        self.persona = Some(text.into());
        Ok(())
    }

    /// Installs the per-round turn prompt template. Players only;
    /// moderator and judge agents never set one.
    pub fn set_turn_template(&mut self, text: impl Into<String>) {
        self.turn_template = Some(text.into());
    }

    /// Appends an externally observed message to the pending events.
    /// Does not trigger generation.
    pub fn add_event(&mut self, text: impl Into<String>) {
        self.pending_events.push(text.into());
    }

    /// Records the agent's own prior output into memory so that
    /// subsequent turns see their own reasoning.
    pub fn add_memory(&mut self, text: impl Into<String>) {
        self.memory
            .push(ChatMessage::assistant().content(text).build());
    }

    /// Appends a debate turn prompt to memory: the turn template,
    /// optionally followed by the peers' latest arguments.
    pub fn prompt_turn(&mut self, peer_arguments: Option<&str>) {
        let mut content = self.turn_template.clone().unwrap_or_default();
        if let Some(args) = peer_arguments {
            if !content.is_empty() {
                content.push_str("\n\n");
            }
            content.push_str(args);
        }
        if content.is_empty() {
            return;
        }
        self.memory.push(ChatMessage::user().content(content).build());
    }

    /// Asks the provider for this agent's next reply.
    ///
    /// The generation context is, in order: persona, memory, pending
    /// events. Pending events are cleared once the call succeeds;
    /// callers that want them visible to later turns record the reply
    /// with [`Agent::add_memory`].
    pub async fn ask(&mut self, provider: &dyn ChatProvider) -> Result<String, DebateError> {
        let context = self.build_context();
        log::debug!(
            "agent '{}' asking with {} context messages",
            self.name,
            context.len()
        );
        let response = provider.chat(&context).await?;
        let text = response.text().ok_or_else(|| {
            DebateError::Generic(format!("no text in reply to agent '{}'", self.name))
        })?;
        self.pending_events.clear();
        Ok(text)
    }

    fn build_context(&self) -> Vec<ChatMessage> {
        let mut context = Vec::with_capacity(1 + self.memory.len() + self.pending_events.len());
        if let Some(persona) = &self.persona {
            context.push(ChatMessage::system().content(persona.clone()).build());
        }
        context.extend(self.memory.iter().cloned());
        for event in &self.pending_events {
            context.push(ChatMessage::user().content(event.clone()).build());
        }
        context
    }

    /// Messages currently held in memory, in chronological order.
    pub fn memory(&self) -> &[ChatMessage] {
        &self.memory
    }

    /// Events observed since the last completed turn.
    pub fn pending_events(&self) -> &[String] {
        &self.pending_events
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::chat::{ChatResponse, ChatRole, TextResponse};

    struct EchoProvider {
        seen: Arc<Mutex<Vec<ChatMessage>>>,
    }

    #[async_trait]
    impl ChatProvider for EchoProvider {
        async fn chat(
            &self,
            messages: &[ChatMessage],
        ) -> Result<Box<dyn ChatResponse>, DebateError> {
            let mut guard = self.seen.lock().expect("seen lock");
            guard.clear();
            guard.extend_from_slice(messages);
            Ok(Box::new(TextResponse {
                text: "reply".to_string(),
            }))
        }
    }

    #[test]
    fn set_persona_rejects_second_call() {
        let mut agent = Agent::new("Economist");
        agent.set_persona("first").expect("first persona");
        assert!(agent.set_persona("second").is_err());
    }

    #[test]
    fn prompt_turn_appends_template_and_arguments() {
        let mut agent = Agent::new("Physicist");
        agent.set_turn_template("Respond to your peers.");
        agent.prompt_turn(Some("Economist: growth matters"));
        assert_eq!(agent.memory().len(), 1);
        let turn = &agent.memory()[0];
        assert_eq!(turn.role, ChatRole::User);
        assert!(turn.content.starts_with("Respond to your peers."));
        assert!(turn.content.ends_with("Economist: growth matters"));
    }

    #[tokio::test]
    async fn ask_orders_context_and_clears_pending_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = EchoProvider { seen: seen.clone() };

        let mut agent = Agent::new("Historian");
        agent.set_persona("You are a historian.").expect("persona");
        agent.add_memory("my earlier statement");
        agent.add_event("Economist: a new argument");

        let reply = agent.ask(&provider).await.expect("ask");
        assert_eq!(reply, "reply");
        assert!(agent.pending_events().is_empty());

        let context = seen.lock().expect("seen lock").clone();
        assert_eq!(context.len(), 3);
        assert_eq!(context[0].role, ChatRole::System);
        assert_eq!(context[0].content, "You are a historian.");
        assert_eq!(context[1].role, ChatRole::Assistant);
        assert_eq!(context[2].role, ChatRole::User);
        assert_eq!(context[2].content, "Economist: a new argument");
    }

    #[tokio::test]
    async fn pending_events_survive_a_failed_ask() {
        struct FailingProvider;

        #[async_trait]
        impl ChatProvider for FailingProvider {
            async fn chat(
                &self,
                _messages: &[ChatMessage],
            ) -> Result<Box<dyn ChatResponse>, DebateError> {
                Err(DebateError::ProviderError("boom".to_string()))
            }
        }

        let mut agent = Agent::new("Biologist");
        agent.add_event("kept");
        assert!(agent.ask(&FailingProvider).await.is_err());
        assert_eq!(agent.pending_events(), ["kept".to_string()]);
    }
}
