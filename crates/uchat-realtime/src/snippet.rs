use std::fmt;

use serde::Serialize;
use uchat_core::Timestamp;

use crate::category::Category;

/// One line of fresh external data for a single request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub category: Category,
    pub text: String,
    pub timestamp: Timestamp,
}

impl Snippet {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
            timestamp: Timestamp::now(),
        }
    }

    pub const fn label(&self) -> &'static str {
        self.category.label()
    }
}

/// `<label> (<timestamp>): <text>`
impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.label(),
            self.timestamp.strftime("%Y-%m-%d %H:%M UTC"),
            self.text
        )
    }
}
