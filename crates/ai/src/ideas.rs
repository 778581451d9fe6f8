//! Contest idea generation on top of the completion API.

use regex::Regex;
use serde::Deserialize;

use crate::client::{GenerationParams, TextGenClient};
use crate::error::AiError;

/// Contest context fed into idea generation. All fields optional except
/// the title; blanks are simply left out of the instruction.
#[derive(Debug, Clone, Deserialize)]
pub struct IdeaContext {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub submission_format: Option<String>,
    #[serde(default)]
    pub prize: Option<String>,
    #[serde(default)]
    pub precautions: Option<String>,
}

/// Generate short submission-idea strings for a contest.
///
/// All-or-nothing per call: either the full parsed list comes back or an
/// error does, never a partial list with a trailing failure. An empty
/// list is a valid outcome.
pub async fn generate_ideas(
    client: &TextGenClient,
    context: &IdeaContext,
) -> Result<Vec<String>, AiError> {
    let reply = client
        .complete(&build_instruction(context), GenerationParams::default())
        .await?;
    Ok(parse_idea_lines(&reply))
}

fn build_instruction(context: &IdeaContext) -> String {
    let mut lines = vec![format!(
        "Suggest 5 short, concrete submission ideas for the contest \"{}\".",
        context.title
    )];
    let mut push = |label: &str, value: &Option<String>| {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            lines.push(format!("{label}: {value}"));
        }
    };
    push("Description", &context.description);
    push("Theme", &context.theme);
    push("Submission format", &context.submission_format);
    push("Prize", &context.prize);
    push("Precautions", &context.precautions);
    lines.push("Answer with one idea per line, no preamble.".to_string());
    lines.join("\n")
}

/// Split a reply into idea strings, stripping list markers (`1.`, `-`, `*`)
/// and blank lines. Evaluated only after the full reply has arrived, so a
/// call can never yield a partially parsed list.
pub fn parse_idea_lines(reply: &str) -> Vec<String> {
    let marker = Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s*").expect("static pattern");
    reply
        .lines()
        .map(|line| marker.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_markers_and_blank_lines_are_stripped() {
        let reply = "1. A poster series\n\n2) An interactive map\n- A short film\n* A zine\n";
        assert_eq!(
            parse_idea_lines(reply),
            vec![
                "A poster series",
                "An interactive map",
                "A short film",
                "A zine"
            ]
        );
    }

    #[test]
    fn whitespace_only_reply_yields_an_empty_list() {
        assert!(parse_idea_lines("   \n\n  ").is_empty());
    }

    #[test]
    fn instruction_omits_blank_context_fields() {
        let context = IdeaContext {
            title: "Eco Hackathon".to_string(),
            description: Some("48h build".to_string()),
            theme: Some("  ".to_string()),
            submission_format: None,
            prize: None,
            precautions: None,
        };
        let instruction = build_instruction(&context);
        assert!(instruction.contains("Eco Hackathon"));
        assert!(instruction.contains("Description: 48h build"));
        assert!(!instruction.contains("Theme:"));
    }
}
