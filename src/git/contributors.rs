use super::{Contributor, ContributorList};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::Regex;

const AUTHOR_TOKEN: &str = "Author:";
const INSERTION_PATTERN: &str = r"\s([0-9]+) insertion";

/// Aggregates inserted-line counts per author from `git log --stat` output.
pub struct ContributorAggregator {
    insertion: Regex,
}

impl ContributorAggregator {
    pub fn new() -> Result<Self> {
        let insertion = Regex::new(INSERTION_PATTERN)
            .with_context(|| format!("Failed to compile pattern: {}", INSERTION_PATTERN))?;

        Ok(Self { insertion })
    }

    /// Scan the log once, crediting each diff-stat summary to the most
    /// recent `Author:` line.
    ///
    /// Summaries that appear before any `Author:` line are not credited.
    pub fn aggregate(&self, log: &str) -> ContributorList {
        let mut current: Option<&str> = None;
        let mut totals: IndexMap<&str, u64> = IndexMap::new();

        for line in log.lines() {
            if let Some(author) = Self::attribution(line) {
                current = Some(author);
                continue;
            }

            let Some(lines) = self.insertions(line) else {
                continue;
            };

            if let Some(author) = current {
                let total = totals.entry(author).or_insert(0);
                *total = total.saturating_add(lines);
            }
        }

        let mut contributors: Vec<Contributor> = totals
            .into_iter()
            .map(|(name, lines)| Contributor::new(name, lines))
            .collect();

        // sort_by is stable, so ties stay in first-seen order
        contributors.sort_by(|a, b| b.lines.cmp(&a.lines));

        ContributorList::from(contributors)
    }

    fn attribution(line: &str) -> Option<&str> {
        let rest = line.strip_prefix(AUTHOR_TOKEN)?;
        if rest.is_empty() {
            return Some("");
        }
        rest.strip_prefix(' ')
    }

    /// Digit runs too large for `u64` clamp to `u64::MAX`.
    fn insertions(&self, line: &str) -> Option<u64> {
        let captures = self.insertion.captures(line)?;
        let digits = captures.get(1)?.as_str();
        Some(digits.parse().unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn aggregate(log: &str) -> Vec<Contributor> {
        ContributorAggregator::new()
            .unwrap()
            .aggregate(log)
            .as_slice()
            .to_vec()
    }

    #[test]
    fn test_aggregates_and_ranks_authors() {
        let log = "Author: A <a@x>\n 2 insertions(+)\nAuthor: B <b@x>\n 5 insertions(+)\nAuthor: A <a@x>\n 1 insertion(+)\n";

        assert_eq!(
            aggregate(log),
            vec![Contributor::new("B <b@x>", 5), Contributor::new("A <a@x>", 3)]
        );
    }

    #[test]
    fn test_realistic_git_log_stat() {
        let log = "\
commit 4f1c2a9d0e6b7a8c9d0e1f2a3b4c5d6e7f8a9b0c
Author: Jane Doe <jane@example.com>
Date:   Mon Mar 4 10:12:01 2024 +0100

    Add parser

 src/parser.rs | 40 ++++++++++++++++++++++++++++++++++++++++
 src/lib.rs    |  2 ++
 2 files changed, 42 insertions(+)

commit 0a1b2c3d4e5f60718293a4b5c6d7e8f901234567
Author: John Roe <john@example.com>
Date:   Sun Mar 3 09:00:00 2024 +0100

    Tidy up

 README.md | 10 +++++-----
 1 file changed, 5 insertions(+), 5 deletions(-)
";

        assert_eq!(
            aggregate(log),
            vec![
                Contributor::new("Jane Doe <jane@example.com>", 42),
                Contributor::new("John Roe <john@example.com>", 5),
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        assert!(aggregate("").is_empty());
        assert!(aggregate("\n\n").is_empty());
    }

    #[test]
    fn test_author_without_insertions_is_omitted() {
        let log = "Author: A <a@x>\nDate: today\n\nAuthor: B <b@x>\n 7 insertions(+)\n";

        assert_eq!(aggregate(log), vec![Contributor::new("B <b@x>", 7)]);
    }

    #[test]
    fn test_deletions_are_ignored() {
        let log = "Author: A <a@x>\n 3 files changed, 10 insertions(+), 3 deletions(-)\n";

        assert_eq!(aggregate(log), vec![Contributor::new("A <a@x>", 10)]);
    }

    #[test]
    fn test_only_first_match_per_line_counts() {
        let log = "Author: A <a@x>\n 4 insertions(+) 9 insertions(+)\n";

        assert_eq!(aggregate(log), vec![Contributor::new("A <a@x>", 4)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let log = "Author: C\n 1 insertion(+)\nAuthor: A\n 1 insertion(+)\nAuthor: B\n 1 insertion(+)\n";

        let names: Vec<_> = aggregate(log).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_bare_author_line_uses_empty_attribution() {
        let log = "Author:\n 3 insertions(+)\nAuthor: \n 2 insertions(+)\n";

        assert_eq!(aggregate(log), vec![Contributor::new("", 5)]);
    }

    #[test]
    fn test_attribution_is_kept_verbatim() {
        let log = "Author:  Spaced  Name <s@x> \n 1 insertion(+)\n";

        assert_eq!(
            aggregate(log),
            vec![Contributor::new(" Spaced  Name <s@x> ", 1)]
        );
    }

    #[test]
    fn test_author_token_must_be_followed_by_space() {
        let log = "Author: A\nAuthor:B 6 insertions(+)\n";

        // "Author:B" is not an attribution line, so its count goes to A
        assert_eq!(aggregate(log), vec![Contributor::new("A", 6)]);
    }

    #[test]
    fn test_insertions_before_any_author_are_not_credited() {
        let log = " 8 insertions(+)\nAuthor: A <a@x>\n 2 insertions(+)\n";

        assert_eq!(aggregate(log), vec![Contributor::new("A <a@x>", 2)]);
    }

    #[test]
    fn test_digits_must_follow_whitespace() {
        let log = "Author: A\nfoo12 insertions\n\t3 insertions(+)\n";

        assert_eq!(aggregate(log), vec![Contributor::new("A", 3)]);
    }

    #[test]
    fn test_totals_match_sum_of_credited_counts() {
        let log = "Author: A\n 1 insertion(+)\nAuthor: B\n 20 insertions(+)\nAuthor: C\nnothing\nAuthor: A\n 300 insertions(+)\nAuthor: B\n 4 insertions(+)\n";

        let list = ContributorAggregator::new().unwrap().aggregate(log);
        assert_eq!(list.total_lines(), 325);
        assert_eq!(list.len(), 2);

        let names: HashSet<_> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), list.len());
        assert!(list
            .as_slice()
            .windows(2)
            .all(|pair| pair[0].lines >= pair[1].lines));
    }

    #[test]
    fn test_oversized_counts_saturate() {
        let log = "Author: A\n 99999999999999999999999 insertions(+)\n 2 insertions(+)\nAuthor: B\n 1 insertion(+)\n";

        assert_eq!(
            aggregate(log),
            vec![Contributor::new("A", u64::MAX), Contributor::new("B", 1)]
        );
    }

    #[test]
    fn test_only_ascii_digits_are_counted() {
        let log = "Author: A\n \u{663} insertions 5 insertions(+)\n \u{967}\u{968} insertions(+)\n";

        assert_eq!(aggregate(log), vec![Contributor::new("A", 5)]);
    }
}
