//! Qualitative sub-score: prompt assembly and response parsing.
//!
//! The text-generation provider returns free text; the contract here is to
//! extract the first decimal matching `[0-1].<digits>`, clamp it to [0, 1],
//! and fall back to a neutral 0.5 when nothing parses. The fallback is a
//! logged event, not an error.

use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use crate::score::extract::PromptContext;

/// Neutral midpoint used when the provider's text yields no parseable score
pub const NEUTRAL_SCORE: f64 = 0.5;

fn score_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-1]\.\d+)").expect("valid score pattern"))
}

/// Build the engagement-assessment prompt from the profile slices.
pub fn build_prompt(context: &PromptContext) -> String {
    format!(
        "Analyze the following user data:\n\
         User's top artists: {}.\n\
         User's top tracks: {}.\n\
         Artist genres: {}.\n\
         Provide a fan engagement score between 0 and 1 based on how closely \
         the user's listening habits align with the artist's style and genres.",
        context.top_artists.join(", "),
        context.top_tracks.join(", "),
        context.artist_genres.join(", "),
    )
}

/// Extract the first decimal score from free text, clamped to [0, 1].
///
/// Returns `None` when no matching pattern is present.
pub fn parse_score(text: &str) -> Option<f64> {
    let captured = score_pattern().captures(text)?;
    let score: f64 = captured.get(1)?.as_str().parse().ok()?;
    Some(score.clamp(0.0, 1.0))
}

/// Parse the provider's text, defaulting to the neutral midpoint when it is
/// unparseable rather than failing the scoring request.
pub fn score_or_neutral(text: &str) -> f64 {
    match parse_score(text) {
        Some(score) => score,
        None => {
            warn!(
                response_len = text.len(),
                fallback = NEUTRAL_SCORE,
                "qualitative response had no parseable score, using neutral fallback"
            );
            NEUTRAL_SCORE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_decimal() {
        assert_eq!(parse_score("0.85"), Some(0.85));
    }

    #[test]
    fn test_parse_embedded_in_prose() {
        let text = "I'd estimate a score of 0.73 given strong alignment.";
        assert_eq!(parse_score(text), Some(0.73));
    }

    #[test]
    fn test_parse_first_match_wins() {
        let text = "Maybe 0.4, though 0.9 is arguable.";
        assert_eq!(parse_score(text), Some(0.4));
    }

    #[test]
    fn test_parse_clamps_above_one() {
        // "1.5" matches the leading-digit pattern and is clamped
        assert_eq!(parse_score("roughly 1.5 out of 1"), Some(1.0));
    }

    #[test]
    fn test_parse_no_match() {
        assert_eq!(parse_score("The user is a dedicated fan."), None);
        assert_eq!(parse_score(""), None);
    }

    #[test]
    fn test_integer_without_decimals_does_not_match() {
        assert_eq!(parse_score("score: 1"), None);
    }

    #[test]
    fn test_neutral_fallback() {
        assert_eq!(score_or_neutral("no numbers here"), NEUTRAL_SCORE);
        assert_eq!(score_or_neutral("alignment of 0.6 overall"), 0.6);
    }

    #[test]
    fn test_build_prompt_contains_context() {
        let context = PromptContext {
            top_artists: vec!["Queen".to_string(), "Muse".to_string()],
            top_tracks: vec!["Uprising".to_string()],
            artist_genres: vec!["rock".to_string()],
        };

        let prompt = build_prompt(&context);
        assert!(prompt.contains("Queen, Muse"));
        assert!(prompt.contains("Uprising"));
        assert!(prompt.contains("Artist genres: rock."));
        assert!(prompt.contains("between 0 and 1"));
    }
}
