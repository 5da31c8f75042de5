//! Structured verdicts produced by the moderator and the judge.
//!
//! Model replies are never evaluated as code: a verdict is only
//! accepted if the reply contains a well-formed JSON object with all
//! three required keys. Anything else fails closed, because the
//! controller's termination decision depends on this value.

use serde::{Deserialize, Serialize};

use crate::error::DebateError;

/// The moderator's or judge's decision for one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The converged answer; empty means "not yet converged"
    pub debate_answer: String,
    /// Summary of the round's arguments
    pub summary: String,
    /// Reasoning behind the decision
    pub reason: String,
}

impl Verdict {
    /// Parses a model reply as a verdict.
    ///
    /// Accepts replies that wrap the JSON object in prose or code
    /// fences by extracting the outermost `{...}` span first. All
    /// three keys must be present.
    pub fn parse(text: &str) -> Result<Self, DebateError> {
        let json = extract_json_object(text).ok_or_else(|| DebateError::ResponseFormatError {
            message: "no JSON object found in reply".to_string(),
            raw_response: text.to_string(),
        })?;
        serde_json::from_str(json).map_err(|e| DebateError::ResponseFormatError {
            message: format!("malformed verdict: {e}"),
            raw_response: text.to_string(),
        })
    }

    /// Whether this verdict terminates the debate.
    pub fn is_converged(&self) -> bool {
        !self.debate_answer.is_empty()
    }
}

/// Extracts the outermost `{...}` span from a model reply, if any.
pub(crate) fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_json() {
        let verdict =
            Verdict::parse(r#"{"debate_answer": "42", "summary": "done", "reason": "agreed"}"#)
                .expect("parse");
        assert_eq!(verdict.debate_answer, "42");
        assert!(verdict.is_converged());
    }

    #[test]
    fn parse_accepts_fenced_json() {
        let reply = "Here is my decision:\n```json\n{\"debate_answer\": \"\", \
                     \"summary\": \"no consensus\", \"reason\": \"split opinions\"}\n```";
        let verdict = Verdict::parse(reply).expect("parse");
        assert!(!verdict.is_converged());
        assert_eq!(verdict.summary, "no consensus");
    }

    #[test]
    fn parse_rejects_missing_keys() {
        let err = Verdict::parse(r#"{"debate_answer": "42"}"#).unwrap_err();
        assert!(matches!(
            err,
            DebateError::ResponseFormatError { .. }
        ));
    }

    #[test]
    fn parse_rejects_non_object_replies() {
        assert!(Verdict::parse("I think the answer is 42.").is_err());
    }

    #[test]
    fn empty_answer_round_trips_as_continue() {
        let verdict = Verdict {
            debate_answer: String::new(),
            summary: "no consensus".to_string(),
            reason: String::new(),
        };
        let serialized = serde_json::to_string(&verdict).expect("serialize");
        let parsed = Verdict::parse(&serialized).expect("parse");
        assert_eq!(parsed, verdict);
        assert!(!parsed.is_converged());
    }
}
