//! A library for orchestrating multi-round debates between
//! LLM-backed agents.
//!
//! A debate seats a pool of player agents, each with its own persona
//! and private conversational memory, and runs bounded rounds of
//! argument exchange. A moderator evaluates every round for
//! consensus; when the round budget runs out without one, a judge is
//! asked to force a final answer.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use debate::backends::openai::OpenAI;
//! use debate::{Debate, DebateConfig, PromptSet, ResilienceConfig, ResilientChat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), debate::DebateError> {
//!     let backend = OpenAI::new(
//!         std::env::var("OPENAI_API_KEY").unwrap_or_default(),
//!         None,
//!         None,
//!         Some(0.0),
//!         None,
//!         None,
//!     )?;
//!     let provider = Arc::new(ResilientChat::new(
//!         Box::new(backend),
//!         ResilienceConfig::defaults(),
//!     ));
//!
//!     let config = DebateConfig::new("Is P=NP?").num_players(3).max_rounds(3);
//!     let mut debate = Debate::bootstrap(config, PromptSet::default(), provider).await?;
//!     let outcome = debate.run().await?;
//!     println!("{}", outcome.debate_answer);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod backends;
pub mod chat;
pub mod debate;
mod error;
pub mod prompts;
pub mod resilient;
pub mod roster;
pub mod verdict;

pub use agent::Agent;
pub use chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole};
pub use debate::{Debate, DebateConfig, DebateOutcome, DebateState, PlayerPool, Session};
pub use error::DebateError;
pub use prompts::PromptSet;
pub use resilient::{ResilienceConfig, ResilientChat};
pub use roster::RoleSpec;
pub use verdict::Verdict;
