//! Employee list filtering.
//!
//! Filtering is pure and synchronous: [`apply`] borrows the full collection
//! and returns the matching records in their original order. The search term
//! matches name or email as a case-insensitive substring; the department
//! selector matches exactly.
//!
//! # Example
//!
//! ```rust
//! use roster::domain::{Department, Employee};
//! use roster::filter::{apply, FilterCriteria};
//!
//! let records = vec![
//!     Employee::new("Ann", "a@x.com", Department::Hr),
//!     Employee::new("Bob", "b@x.com", Department::It),
//! ];
//! let criteria = FilterCriteria::search("an");
//! let visible = apply(&records, &criteria);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].name, "Ann");
//! ```

use crate::domain::{Department, Employee};

/// Search term plus department selector for the list view.
///
/// An empty `search_term` and a `None` department both mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub department: Option<Department>,
}

impl FilterCriteria {
    /// Criteria with only a search term.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            department: None,
        }
    }

    /// Criteria with only a department.
    #[must_use]
    pub const fn department(department: Department) -> Self {
        Self {
            search_term: String::new(),
            department: Some(department),
        }
    }

    /// Whether no constraint is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.department.is_none()
    }

    /// Resets both constraints.
    pub fn clear(&mut self) {
        self.search_term.clear();
        self.department = None;
    }

    /// Whether a single record passes both constraints.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        let matches_search = self.search_term.is_empty() || {
            let term = self.search_term.to_lowercase();
            employee.name.to_lowercase().contains(&term)
                || employee.email.to_lowercase().contains(&term)
        };

        let matches_department = self
            .department
            .map_or(true, |department| employee.department == department);

        matches_search && matches_department
    }
}

/// Returns the records that satisfy `criteria`, preserving input order.
///
/// Returns an empty vector when nothing matches. `records` is never mutated,
/// so repeated calls with the same arguments give the same result.
#[must_use]
pub fn apply(records: &[Employee], criteria: &FilterCriteria) -> Vec<Employee> {
    let _span = tracing::debug_span!(
        "filter_apply",
        total = records.len(),
        term_len = criteria.search_term.len(),
        department = ?criteria.department
    )
    .entered();

    let visible: Vec<Employee> = records
        .iter()
        .filter(|employee| criteria.matches(employee))
        .cloned()
        .collect();

    tracing::debug!(visible = visible.len(), "filter applied");
    visible
}

/// Character ranges of every case-insensitive occurrence of `term` in `text`.
///
/// Ranges are `(start, end)` character indices, end exclusive, and never
/// overlap. Returns nothing for an empty term. Used to highlight matches.
#[must_use]
pub fn match_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return vec![];
    }

    // Lowercase per character so indices line up with the original text.
    // Characters whose lowercase form expands are compared by first char only.
    let hay: Vec<char> = text
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= hay.len() {
        if hay[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff() -> Vec<Employee> {
        vec![
            Employee::new("Ann", "a@x.com", Department::Hr),
            Employee::new("Bob", "b@x.com", Department::It),
            Employee::new("Dana", "dana@corp.io", Department::It),
            Employee::new("Eve", "eve@ANNEX.org", Department::Finance),
        ]
    }

    fn names(records: &[Employee]) -> Vec<&str> {
        records.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn empty_criteria_returns_everything_in_order() {
        let records = staff();
        assert_eq!(apply(&records, &FilterCriteria::default()), records);
    }

    #[test]
    fn search_is_case_insensitive_on_name() {
        let records = vec![
            Employee::new("Ann", "a@x.com", Department::Hr),
            Employee::new("Bob", "b@x.com", Department::It),
        ];
        let visible = apply(&records, &FilterCriteria::search("an"));
        assert_eq!(visible, vec![records[0].clone()]);
    }

    #[test]
    fn search_also_matches_email() {
        let records = staff();
        let visible = apply(&records, &FilterCriteria::search("annex"));
        assert_eq!(names(&visible), vec!["Eve"]);

        let visible = apply(&records, &FilterCriteria::search("AN"));
        assert_eq!(names(&visible), vec!["Ann", "Dana", "Eve"]);
    }

    #[test]
    fn department_matches_exactly() {
        let records = staff();
        let visible = apply(&records, &FilterCriteria::department(Department::It));
        assert_eq!(names(&visible), vec!["Bob", "Dana"]);
        assert!(visible.iter().all(|e| e.department == Department::It));
    }

    #[test]
    fn constraints_combine() {
        let records = staff();
        let criteria = FilterCriteria {
            search_term: "a".to_string(),
            department: Some(Department::It),
        };
        assert_eq!(names(&apply(&records, &criteria)), vec!["Dana"]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let records = staff();
        assert!(apply(&records, &FilterCriteria::search("zzz")).is_empty());
        assert!(apply(&[], &FilterCriteria::search("a")).is_empty());
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let records = staff();
        let snapshot = records.clone();
        let criteria = FilterCriteria::search("b");
        let once = apply(&records, &criteria);
        let twice = apply(&records, &criteria);
        assert_eq!(once, twice);
        assert_eq!(apply(&once, &criteria), once);
        assert_eq!(records, snapshot);
    }

    #[test]
    fn clear_resets_both_constraints() {
        let mut criteria = FilterCriteria {
            search_term: "x".to_string(),
            department: Some(Department::Hr),
        };
        assert!(!criteria.is_empty());
        criteria.clear();
        assert!(criteria.is_empty());
    }

    #[test]
    fn match_ranges_finds_all_occurrences() {
        assert_eq!(match_ranges("Banana", "an"), vec![(1, 3), (3, 5)]);
        assert_eq!(match_ranges("ANN", "an"), vec![(0, 2)]);
        assert!(match_ranges("Bob", "").is_empty());
        assert!(match_ranges("Bob", "bobby").is_empty());
    }
}
