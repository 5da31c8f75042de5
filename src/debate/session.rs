use crate::verdict::Verdict;

/// Mutable state of a running debate, owned by the controller.
#[derive(Debug, Default)]
pub struct Session {
    pub(super) round_index: usize,
    pub(super) arguments: Vec<String>,
    pub(super) verdict: Option<Verdict>,
}

impl Session {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Zero-based index of the current round.
    pub fn round_index(&self) -> usize {
        self.round_index
    }

    /// All round arguments so far, in the order they were made.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The verdict that terminated the debate, if any.
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// The most recent `count` arguments joined into one block, the
    /// unit the moderator and judge consume.
    pub(super) fn latest_arguments(&self, count: usize) -> String {
        let len = self.arguments.len();
        let start = len.saturating_sub(count);
        self.arguments[start..].join("\n")
    }
}

/// Terminal result of a debate session.
#[derive(Debug, Clone)]
pub struct DebateOutcome {
    /// Whether a final answer was reached, by consensus or by the
    /// judge
    pub success: bool,
    /// The final answer; empty when `success` is false
    pub debate_answer: String,
    /// Summary of the deciding round
    pub summary: String,
    /// Reasoning behind the decision, or the recorded failure reason
    pub reason: String,
    /// Every round argument, all rounds concatenated
    pub transcript: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_arguments_takes_the_tail() {
        let session = Session {
            round_index: 1,
            arguments: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            verdict: None,
        };
        assert_eq!(session.latest_arguments(3), "b\nc\nd");
        assert_eq!(session.latest_arguments(10), "a\nb\nc\nd");
    }
}
