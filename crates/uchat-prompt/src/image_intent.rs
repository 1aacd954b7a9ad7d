use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EXPLANATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:explain\w*|describe\w*|description|define|definition|what\s+is|what\s+are|what's|how\s+does|how\s+do|how\s+is|how\s+to|why|tell\s+me\s+about|difference\s+between|meaning\s+of|compare)\b",
    )
    .expect("explanation pattern must compile")
});

static REQUEST_IMAGES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:please\s+|can\s+you\s+|could\s+you\s+)?(?:show|find|get|give|display|fetch|search|send)\b(?:\s+me)?(?:\s+[\w'-]+){0,4}?\s+(?:images?|pictures?|pics?|photos?|photographs?|wallpapers?)\b",
    )
    .expect("image request pattern must compile")
});

static NOUN_OF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:some\s+)?(?:images?|pictures?|pics?|photos?|photographs?|wallpapers?)\s+of\b")
        .expect("image noun pattern must compile")
});

const IMAGE_QUERY_NOISE: &[&str] = &[
    "please",
    "can",
    "could",
    "you",
    "show",
    "find",
    "get",
    "give",
    "display",
    "fetch",
    "search",
    "send",
    "me",
    "some",
    "a",
    "an",
    "the",
    "few",
    "more",
    "of",
    "for",
    "image",
    "images",
    "picture",
    "pictures",
    "pic",
    "pics",
    "photo",
    "photos",
    "photograph",
    "photographs",
    "wallpaper",
    "wallpapers",
];

/// What a message wants in terms of images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageIntent {
    None,
    /// Only images are wanted; fetch them up front
    PureImage,
    /// An explanation is wanted; never fetch images
    Explanation,
}

/// Classify a message, explanation taking precedence over image requests
pub fn classify_image_intent(utterance: &str) -> ImageIntent {
    if EXPLANATION_RE.is_match(utterance) {
        ImageIntent::Explanation
    } else if REQUEST_IMAGES_RE.is_match(utterance) || NOUN_OF_RE.is_match(utterance) {
        ImageIntent::PureImage
    } else {
        ImageIntent::None
    }
}

/// Subject of an image request with request words removed
///
/// Falls back to the trimmed message when nothing else is left.
pub fn image_search_query(utterance: &str) -> String {
    let subject = utterance
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
        .filter(|word| !word.is_empty())
        .filter(|word| !IMAGE_QUERY_NOISE.contains(&word.to_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ");

    if subject.is_empty() {
        utterance.trim().to_owned()
    } else {
        subject
    }
}
