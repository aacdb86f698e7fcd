use serde::Serialize;

pub mod analyzer;
pub mod contributors;
pub mod stats;

pub use analyzer::GitAnalyzer;
pub use contributors::ContributorAggregator;

/// A single author's attribution string and the lines they inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    pub name: String,
    pub lines: u64,
}

impl Contributor {
    pub fn new(name: impl Into<String>, lines: u64) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }
}

/// Contributors ranked by inserted lines, highest first.
///
/// Contributors with equal counts keep the order in which they first
/// appeared in the history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContributorList(Vec<Contributor>);
