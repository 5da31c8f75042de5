use crate::agent::Agent;
use crate::error::DebateError;
use crate::roster::RoleSpec;

/// Fixed-size ordered collection of player agents, each with
/// independent memory.
pub struct PlayerPool {
    players: Vec<Agent>,
}

impl PlayerPool {
    /// Builds a pool from the first `num_players` roster entries.
    ///
    /// A roster shorter than the request is a degradation, not an
    /// error: the player count is clamped to the roster size and the
    /// shortfall is logged. Blank players are never created.
    pub fn from_roster(roster: &[RoleSpec], num_players: usize) -> Result<Self, DebateError> {
        let count = num_players.min(roster.len());
        if count < num_players {
            log::warn!(
                "roster shortfall: {} roles for {} requested players; clamping player count",
                roster.len(),
                num_players
            );
        }

        let mut players = Vec::with_capacity(count);
        for spec in &roster[..count] {
            let mut player = Agent::new(&spec.field);
            player.set_persona(&spec.prompt)?;
            player.set_turn_template(&spec.debate_prompt);
            players.push(player);
        }
        Ok(Self { players })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Agent] {
        &self.players
    }

    pub(super) fn players_mut(&mut self) -> &mut [Agent] {
        &mut self.players
    }

    /// Appends a message to every player's pending events. Typical
    /// use is announcing public information to the whole panel.
    pub fn broadcast(&mut self, msg: &str) {
        for player in &mut self.players {
            player.add_event(msg);
        }
    }

    /// The speaker addresses every other player. The message is
    /// prefixed with the speaker's name when not already so prefixed,
    /// and the speaker itself never receives it; its own statement is
    /// already in its memory.
    pub fn speak(&mut self, speaker: &str, msg: &str) {
        let prefix = format!("{speaker}: ");
        let msg = if msg.starts_with(&prefix) {
            msg.to_string()
        } else {
            format!("{prefix}{msg}")
        };
        for player in &mut self.players {
            if player.name() != speaker {
                player.add_event(msg.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(fields: &[&str]) -> Vec<RoleSpec> {
        fields
            .iter()
            .map(|field| RoleSpec {
                field: field.to_string(),
                prompt: format!("You are a {field}."),
                debate_prompt: "Respond to your peers.".to_string(),
            })
            .collect()
    }

    #[test]
    fn from_roster_clamps_to_roster_size() {
        let pool = PlayerPool::from_roster(&roster(&["Economist", "Historian"]), 4).expect("pool");
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.players()[0].name(), "Economist");
    }

    #[test]
    fn broadcast_reaches_every_player() {
        let mut pool =
            PlayerPool::from_roster(&roster(&["Economist", "Historian"]), 2).expect("pool");
        pool.broadcast("the debate begins");
        for player in pool.players() {
            assert_eq!(player.pending_events(), ["the debate begins".to_string()]);
        }
    }

    #[test]
    fn speak_excludes_the_speaker_and_prefixes_once() {
        let mut pool = PlayerPool::from_roster(&roster(&["Economist", "Historian", "Biologist"]), 3)
            .expect("pool");
        pool.speak("Economist", "growth matters");
        pool.speak("Historian", "Historian: context matters");

        assert_eq!(
            pool.players()[0].pending_events(),
            ["Historian: context matters".to_string()]
        );
        assert_eq!(
            pool.players()[1].pending_events(),
            ["Economist: growth matters".to_string()]
        );
        assert_eq!(
            pool.players()[2].pending_events(),
            [
                "Economist: growth matters".to_string(),
                "Historian: context matters".to_string()
            ]
        );
    }
}
