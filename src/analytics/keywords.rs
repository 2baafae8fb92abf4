use std::io::Read;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const FALLBACK_LABEL: &str = "Other";

/// Maps a description substring to a breakdown label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub label: String
}

impl KeywordRule {
    pub fn new(keyword: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            label: label.into()
        }
    }
}

/// Ordered keyword table used to label charges for the category breakdown.
///
/// Matching is a case-sensitive substring test and the first matching rule
/// wins. Descriptions matching nothing get the fallback label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRules {
    rules: Vec<KeywordRule>,
    fallback: String
}

impl Default for KeywordRules {
    fn default() -> Self {
        Self::new(vec![
            KeywordRule::new("UBER", "Transport"),
            KeywordRule::new("PAYPAL", "Online Services"),
            KeywordRule::new("REST", "Restaurants"),
            KeywordRule::new("SPEI", "Transfers"),
            KeywordRule::new("CLIP", "Retail"),
        ])
    }
}

impl KeywordRules {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self {
            rules,
            fallback: FALLBACK_LABEL.to_string()
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Reads a `keyword,label` CSV table. Rows with an empty keyword would
    /// match every description, so they are dropped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(reader);

        let mut rules = Vec::new();

        for result in reader.deserialize::<KeywordRule>() {
            let rule = result?;

            if rule.keyword.is_empty() {
                warn!("Ignoring keyword rule with an empty keyword for label [{}]", rule.label);
                continue;
            }

            rules.push(rule);
        }

        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn label_for(&self, description: &str) -> &str {
        self.rules.iter()
            .find(|rule| description.contains(rule.keyword.as_str()))
            .map(|rule| rule.label.as_str())
            .unwrap_or(&self.fallback)
    }
}
