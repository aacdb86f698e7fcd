use super::*;

// Queries over aggregated contributor data

impl ContributorList {
    pub fn as_slice(&self) -> &[Contributor] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contributor> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of inserted lines across every contributor
    pub fn total_lines(&self) -> u64 {
        self.iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.lines))
    }

    /// Get the top contributors by inserted lines
    pub fn top(&self, limit: usize) -> &[Contributor] {
        let contributors = self.as_slice();
        &contributors[..limit.min(contributors.len())]
    }
}

impl From<Vec<Contributor>> for ContributorList {
    fn from(contributors: Vec<Contributor>) -> Self {
        Self(contributors)
    }
}

impl<'a> IntoIterator for &'a ContributorList {
    type Item = &'a Contributor;
    type IntoIter = std::slice::Iter<'a, Contributor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
