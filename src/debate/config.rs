use crate::error::DebateError;

const DEFAULT_NUM_PLAYERS: usize = 3;
const DEFAULT_MAX_ROUNDS: usize = 3;

/// Immutable configuration for one debate session.
///
/// Mutable progress lives separately in [`crate::debate::Session`];
/// this struct never changes once the debate starts.
#[derive(Debug, Clone)]
pub struct DebateConfig {
    /// The question being debated
    pub topic: String,
    /// Requested number of players; clamped to the roster size at
    /// initialization when the roster comes up short
    pub num_players: usize,
    /// Round budget, opening round included
    pub max_rounds: usize,
}

impl DebateConfig {
    /// Creates a configuration for a topic with default player count
    /// and round budget.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            num_players: DEFAULT_NUM_PLAYERS,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Sets the requested number of players.
    pub fn num_players(mut self, num_players: usize) -> Self {
        self.num_players = num_players;
        self
    }

    /// Sets the round budget.
    pub fn max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), DebateError> {
        if self.topic.trim().is_empty() {
            return Err(DebateError::InvalidRequest(
                "debate topic must not be empty".to_string(),
            ));
        }
        if self.num_players == 0 {
            return Err(DebateError::InvalidRequest(
                "at least one player is required".to_string(),
            ));
        }
        if self.max_rounds == 0 {
            return Err(DebateError::InvalidRequest(
                "at least one round is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DebateConfig::new("Is P=NP?").validate().is_ok());
    }

    #[test]
    fn rejects_empty_topic_and_zero_bounds() {
        assert!(DebateConfig::new("  ").validate().is_err());
        assert!(DebateConfig::new("t").num_players(0).validate().is_err());
        assert!(DebateConfig::new("t").max_rounds(0).validate().is_err());
    }
}
