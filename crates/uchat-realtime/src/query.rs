//! Location extraction and query construction

use std::sync::LazyLock;

use regex::Regex;

use crate::category::QueryRule;

static IN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bin\s+").expect("location pattern must compile"));

const LOCATION_STOP_WORDS: &[&str] = &[
    "in",
    "and",
    "or",
    "today",
    "tomorrow",
    "now",
    "right",
    "this",
    "for",
    "with",
    "please",
    "currently",
    "at",
];

const MAX_LOCATION_WORDS: usize = 4;

/// Words that usually sit right before `in <place>` when a place is meant
const LOCATION_CUES: &[&str] = &[
    "weather",
    "temperature",
    "forecast",
    "rain",
    "price",
    "prices",
    "rate",
    "rates",
    "news",
    "events",
    "quality",
    "traffic",
    "happening",
];

const FILLER_WORDS: &[&str] = &[
    "show", "give", "latest", "what", "whats", "what's", "is", "are", "tell", "me", "the", "a", "an", "about", "any",
    "please", "can", "you", "i", "want", "know", "current", "today", "get", "some", "of", "on", "for", "and",
];

/// Location named by `in <place>`, if any
///
/// The capture stops at punctuation, at the first stop word, or after a few
/// words. Original casing is kept. With several candidates, the last one
/// following a cue word such as "weather" or "price" wins, else the last one.
pub fn extract_location(utterance: &str) -> Option<String> {
    let candidates: Vec<(bool, String)> = IN_RE
        .find_iter(utterance)
        .filter_map(|found| {
            let place = place_after(&utterance[found.end()..])?;
            Some((follows_cue(&utterance[..found.start()]), place))
        })
        .collect();

    let index = candidates
        .iter()
        .rposition(|(cued, _)| *cued)
        .or_else(|| candidates.len().checked_sub(1))?;

    candidates.into_iter().nth(index).map(|(_, place)| place)
}

fn place_after(rest: &str) -> Option<String> {
    let end = rest
        .find(|c: char| !c.is_ascii_alphabetic() && !c.is_whitespace())
        .unwrap_or(rest.len());

    let words = rest[..end]
        .split_whitespace()
        .take_while(|word| !LOCATION_STOP_WORDS.contains(&word.to_lowercase().as_str()))
        .take(MAX_LOCATION_WORDS)
        .collect::<Vec<_>>();

    (!words.is_empty()).then(|| words.join(" "))
}

fn follows_cue(before: &str) -> bool {
    before
        .split_whitespace()
        .last()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .is_some_and(|word| LOCATION_CUES.contains(&word.as_str()))
}

/// Lower-cased utterance with filler words and edge punctuation removed
pub fn strip_filler(utterance: &str) -> String {
    utterance
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .map(|word| word.trim_matches('\''))
        .filter(|word| !word.is_empty())
        .filter(|word| !FILLER_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the search query for a category rule
pub fn build_query(rule: QueryRule, utterance: &str, location: &str) -> String {
    match rule {
        QueryRule::Stripped { prefix, default } => {
            let stripped = strip_filler(utterance);
            match (prefix, stripped.is_empty()) {
                (_, true) => default.to_owned(),
                (Some(prefix), false) => format!("{prefix} {stripped}"),
                (None, false) => stripped,
            }
        }
        QueryRule::Located { template } => template.replace("{location}", location),
    }
}
