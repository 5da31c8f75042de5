//! Expert roster generation.
//!
//! A one-shot "creator" agent is asked to invent the debate
//! participants for a topic. Its reply is parsed as a JSON object
//! with an `experts` list; a reply that does not parse yields an
//! empty roster, which callers treat as degraded operation rather
//! than a fatal error.

use serde::Deserialize;

use crate::agent::Agent;
use crate::chat::ChatProvider;
use crate::error::DebateError;
use crate::prompts::{render, PromptSet};
use crate::verdict::extract_json_object;

/// One participant's role, produced once per topic and immutable
/// afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleSpec {
    /// The expert's field, unique within a roster; used as the
    /// player's display name
    pub field: String,
    /// Persona prompt installed as the player's leading context
    pub prompt: String,
    /// Per-round debate turn template
    pub debate_prompt: String,
}

#[derive(Debug, Deserialize)]
struct RosterReply {
    experts: Vec<RoleSpec>,
}

/// Parses a creator reply into a roster.
///
/// Returns an empty roster when the reply has no well-formed JSON
/// object or no `experts` key; the degradation is logged, never
/// raised.
pub fn parse_roster(text: &str) -> Vec<RoleSpec> {
    let Some(json) = extract_json_object(text) else {
        log::warn!("creator reply contains no JSON object; using empty roster");
        return Vec::new();
    };
    match serde_json::from_str::<RosterReply>(json) {
        Ok(reply) => reply.experts,
        Err(err) => {
            log::warn!("creator reply did not parse as a roster: {err}");
            Vec::new()
        }
    }
}

/// Asks a one-shot creator agent for `num_players` role
/// specifications on the given topic.
pub async fn generate_roster(
    provider: &dyn ChatProvider,
    prompts: &PromptSet,
    topic: &str,
    num_players: usize,
) -> Result<Vec<RoleSpec>, DebateError> {
    let mut creator = Agent::new("Creator");
    creator.set_persona(render(
        &prompts.creator_meta_prompt,
        &[("debate_topic", topic)],
    ))?;
    creator.add_event(render(
        &prompts.creator_prompt,
        &[
            ("debate_topic", topic),
            ("num_players", &num_players.to_string()),
        ],
    ));

    let reply = creator.ask(provider).await?;
    creator.add_memory(&reply);

    let roster = parse_roster(&reply);
    log::info!(
        "roster generated: {} of {} requested roles",
        roster.len(),
        num_players
    );
    Ok(roster)
}
