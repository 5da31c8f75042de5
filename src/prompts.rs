//! Prompt templates for every role in a debate.
//!
//! Templates use `##name##` placeholders, substituted with
//! [`render`]. A [`PromptSet`] carries built-in defaults and can be
//! partially overridden from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DebateError;

/// The full set of prompt templates a debate needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSet {
    /// Persona for the one-shot roster creator (`##debate_topic##`)
    #[serde(default = "default_creator_meta_prompt")]
    pub creator_meta_prompt: String,
    /// Instruction asking the creator for a roster
    /// (`##debate_topic##`, `##num_players##`)
    #[serde(default = "default_creator_prompt")]
    pub creator_prompt: String,
    /// Persona for the moderator and the judge (`##debate_topic##`)
    #[serde(default = "default_moderator_meta_prompt")]
    pub moderator_meta_prompt: String,
    /// Per-round consensus check (`##round##`, `##mod_info##`)
    #[serde(default = "default_moderator_prompt")]
    pub moderator_prompt: String,
    /// First judge turn: enumerate answer candidates (`##mod_info##`)
    #[serde(default = "default_judge_prompt_candidates")]
    pub judge_prompt_candidates: String,
    /// Second judge turn: force a single final answer
    #[serde(default = "default_judge_prompt_select")]
    pub judge_prompt_select: String,
    /// Round argument format (`##player##`, `##answer##`)
    #[serde(default = "default_argument")]
    pub argument: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            creator_meta_prompt: default_creator_meta_prompt(),
            creator_prompt: default_creator_prompt(),
            moderator_meta_prompt: default_moderator_meta_prompt(),
            moderator_prompt: default_moderator_prompt(),
            judge_prompt_candidates: default_judge_prompt_candidates(),
            judge_prompt_select: default_judge_prompt_select(),
            argument: default_argument(),
        }
    }
}

impl PromptSet {
    /// Loads a prompt set from a JSON file. Missing keys fall back to
    /// the built-in defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DebateError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DebateError::InvalidRequest(format!("cannot read prompt file: {e}")))?;
        let prompts = serde_json::from_str(&contents)?;
        Ok(prompts)
    }
}

/// Substitutes `##name##` placeholders in a template.
///
/// Placeholders without a matching entry are left untouched.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        let pattern = format!("##{key}##");
        out = out.replace(&pattern, value);
    }
    out
}

/// English ordinal for a 1-based round number.
///
/// Rounds one through ten use the spelled-out form; beyond that the
/// numeric suffix form is produced for any round number.
pub fn ordinal(n: usize) -> String {
    const WORDS: [&str; 10] = [
        "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
        "tenth",
    ];
    if (1..=WORDS.len()).contains(&n) {
        return WORDS[n - 1].to_string();
    }
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn default_creator_meta_prompt() -> String {
    "You are organizing a panel of experts who will debate the topic: \"##debate_topic##\"."
        .to_string()
}

fn default_creator_prompt() -> String {
    "Recruit ##num_players## experts from distinct, relevant fields to debate the topic: \
     \"##debate_topic##\". Reply strictly with a JSON object of the form \
     {\"experts\": [{\"field\": \"...\", \"prompt\": \"...\", \"debate_prompt\": \"...\"}]} \
     where \"field\" names the expert's specialty, \"prompt\" introduces the expert and asks \
     for their opening statement on the topic, and \"debate_prompt\" asks the expert to \
     respond to the other debaters' latest arguments. Output nothing but the JSON object."
        .to_string()
}

fn default_moderator_meta_prompt() -> String {
    "You are the moderator of a debate on the topic: \"##debate_topic##\". After each round \
     you evaluate the debaters' arguments and decide whether they have converged on an answer."
        .to_string()
}

fn default_moderator_prompt() -> String {
    "The ##round## round of debate has concluded. These are the latest arguments:\n\n\
     ##mod_info##\n\n\
     Have the debaters reached a consensus? Reply strictly with a JSON object of the form \
     {\"debate_answer\": \"...\", \"summary\": \"...\", \"reason\": \"...\"}. If there is no \
     consensus yet, set \"debate_answer\" to an empty string."
        .to_string()
}

fn default_judge_prompt_candidates() -> String {
    "The debate has ended without consensus. These are the final arguments:\n\n\
     ##mod_info##\n\n\
     Enumerate the candidate answers that appear in these arguments."
        .to_string()
}

fn default_judge_prompt_select() -> String {
    "Select exactly one of the candidate answers as the final decision. Reply strictly with \
     a JSON object of the form {\"debate_answer\": \"...\", \"summary\": \"...\", \
     \"reason\": \"...\"}. \"debate_answer\" must not be empty."
        .to_string()
}

fn default_argument() -> String {
    "##player##: ##answer##".to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn render_substitutes_all_occurrences() {
        let out = render(
            "##who## debates ##topic## and ##who## concludes",
            &[("who", "Ada"), ("topic", "P=NP")],
        );
        assert_eq!(out, "Ada debates P=NP and Ada concludes");
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        assert_eq!(render("##missing##", &[("other", "x")]), "##missing##");
    }

    #[test]
    fn ordinal_uses_words_up_to_ten() {
        assert_eq!(ordinal(1), "first");
        assert_eq!(ordinal(2), "second");
        assert_eq!(ordinal(10), "tenth");
    }

    #[test]
    fn ordinal_suffixes_beyond_ten() {
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(23), "23rd");
        assert_eq!(ordinal(102), "102nd");
    }

    #[test]
    fn from_path_merges_partial_overrides() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{\"argument\": \"<<##player##>> ##answer##\"}}").expect("write");

        let prompts = PromptSet::from_path(file.path()).expect("load");
        assert_eq!(prompts.argument, "<<##player##>> ##answer##");
        assert_eq!(prompts.creator_prompt, PromptSet::default().creator_prompt);
    }
}
