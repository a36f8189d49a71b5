//! Search filtering over the directory.

use shared::domain::UserRecord;

/// Name matches ignore case; identifier matches are literal.
pub fn matches(record: &UserRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(&term.to_lowercase()) || record.id.as_str().contains(term)
}

pub fn filter_records<'a>(records: &'a [UserRecord], term: &str) -> Vec<&'a UserRecord> {
    records.iter().filter(|record| matches(record, term)).collect()
}

/// Search string plus the memoized indices of the records it matches.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    term: String,
    matched: Option<Vec<usize>>,
}

impl SearchState {
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Returns true when the term changed and the view must be recomputed.
    pub fn set_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.term && self.matched.is_some() {
            return false;
        }
        self.term = term;
        self.matched = None;
        true
    }

    pub fn visible<'a>(&mut self, records: &'a [UserRecord]) -> Vec<&'a UserRecord> {
        let term = &self.term;
        let indices = self.matched.get_or_insert_with(|| {
            records
                .iter()
                .enumerate()
                .filter(|(_, record)| matches(record, term))
                .map(|(index, _)| index)
                .collect()
        });
        indices.iter().filter_map(|&index| records.get(index)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Directory;

    fn names(records: &[&UserRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn empty_term_returns_full_directory_in_order() {
        let directory = Directory::builtin();
        let visible = filter_records(directory.records(), "");
        assert_eq!(visible.len(), directory.len());
        assert!(visible
            .iter()
            .zip(directory.iter())
            .all(|(left, right)| left.id == right.id));
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let directory = Directory::builtin();
        assert_eq!(
            names(&filter_records(directory.records(), "ja")),
            ["Jane Smith", "Lamar James", "Jahiem Yeager"]
        );
        assert_eq!(
            names(&filter_records(directory.records(), "ALICE")),
            ["Alice Johnson"]
        );
        assert_eq!(
            names(&filter_records(directory.records(), "JOHNSON")),
            ["Alice Johnson"]
        );
    }

    #[test]
    fn identifier_match_is_literal_substring() {
        let directory = Directory::builtin();
        assert_eq!(
            names(&filter_records(directory.records(), "316")),
            ["Alice Johnson"]
        );
        assert_eq!(filter_records(directory.records(), "1027342647").len(), 6);
    }

    #[test]
    fn identifier_match_is_case_sensitive() {
        let record = UserRecord {
            id: "AbC-1".into(),
            name: "zzz".to_string(),
            image: None,
            has_clip: false,
            video_url: None,
            reason: None,
        };
        assert!(matches(&record, "AbC"));
        assert!(!matches(&record, "ABC-"));
    }

    #[test]
    fn no_match_yields_empty_view() {
        let directory = Directory::builtin();
        assert!(filter_records(directory.records(), "nobody here").is_empty());
    }

    #[test]
    fn every_filtered_record_satisfies_the_predicate() {
        let directory = Directory::builtin();
        for term in ["a", "J", "n s", "19", "0", "xyz", "Smith", "3173"] {
            for record in filter_records(directory.records(), term) {
                assert!(
                    record.name.to_lowercase().contains(&term.to_lowercase())
                        || record.id.as_str().contains(term),
                    "{} should not match {term}",
                    record.name
                );
                assert!(directory.get(&record.id).is_some());
            }
        }
    }

    #[test]
    fn search_state_recomputes_only_on_change() {
        let directory = Directory::builtin();
        let mut search = SearchState::default();
        assert_eq!(search.visible(directory.records()).len(), 6);
        assert!(!search.set_term(""));
        assert!(search.set_term("jane"));
        assert_eq!(names(&search.visible(directory.records())), ["Jane Smith"]);
        assert!(!search.set_term("jane"));
        assert_eq!(search.term(), "jane");
    }
}
