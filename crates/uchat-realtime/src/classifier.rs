//! Keyword-based intent classification

use regex::Regex;
use uchat_config::MatchMode;

use crate::category::{CATEGORIES, Category};

/// Decides which realtime categories a message asks about
///
/// One compiled matcher per category, evaluated in table order.
pub struct IntentClassifier {
    matchers: Vec<(Category, Regex)>,
}

impl IntentClassifier {
    pub fn new(mode: MatchMode) -> Self {
        let matchers = CATEGORIES
            .iter()
            .filter_map(|spec| {
                let alternatives = spec
                    .keywords
                    .iter()
                    .map(|keyword| regex::escape(keyword))
                    .collect::<Vec<_>>()
                    .join("|");

                let pattern = match mode {
                    MatchMode::Word => format!(r"(?i)\b(?:{alternatives})\b"),
                    MatchMode::Substring => format!(r"(?i)(?:{alternatives})"),
                };

                match Regex::new(&pattern) {
                    Ok(regex) => Some((spec.category, regex)),
                    Err(e) => {
                        tracing::error!(category = ?spec.category, error = %e, "invalid keyword pattern");
                        None
                    }
                }
            })
            .collect();

        Self { matchers }
    }

    /// Matched categories in declaration order; empty when nothing applies
    pub fn classify(&self, utterance: &str) -> Vec<Category> {
        let utterance = utterance.to_lowercase();

        self.matchers
            .iter()
            .filter(|(_, regex)| regex.is_match(&utterance))
            .map(|(category, _)| *category)
            .collect()
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}
