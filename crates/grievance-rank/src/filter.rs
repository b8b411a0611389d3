//! Record filters for the dashboard and the "my complaints" view.

use grievance_core::{GrievanceRecord, ParseError, Status};

use crate::error::RankError;

/// Value the dashboard selectors use for "no restriction".
pub const ALL: &str = "All";

/// Dashboard filter selection. `None` means "All".
///
/// All predicates are AND-combined. The default matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub status: Option<Status>,
    pub category: Option<String>,
    /// Case-insensitive substring of title, category, or priority label.
    pub search: String,
}

impl Filters {
    /// Build filters from the selector strings, where `"All"` disables a
    /// predicate. Status labels must be exact (`"In Progress"`).
    pub fn from_selectors(status: &str, category: &str, search: &str) -> Result<Self, RankError> {
        let status = match status {
            ALL => None,
            s => Some(s.parse()?),
        };
        let category = match category {
            ALL => None,
            c => Some(c.to_string()),
        };
        Ok(Self {
            status,
            category,
            search: search.to_string(),
        })
    }

    /// Status-only filter for the "my complaints" view, whose selector
    /// compares labels ignoring ASCII case (`"all"`, `"in progress"`).
    pub fn from_status_ignore_case(status: &str) -> Result<Self, RankError> {
        if status.eq_ignore_ascii_case(ALL) {
            return Ok(Self::default());
        }
        let status = Status::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(status))
            .ok_or_else(|| ParseError::Status(status.to_string()))?;
        Ok(Self {
            status: Some(status),
            ..Self::default()
        })
    }

    pub fn matches(&self, record: &GrievanceRecord) -> bool {
        self.matcher().matches(record)
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            filters: self,
            needle: self.search.to_lowercase(),
        }
    }
}

/// Filters with the search needle lowercased once.
struct Matcher<'a> {
    filters: &'a Filters,
    needle: String,
}

impl Matcher<'_> {
    fn matches(&self, record: &GrievanceRecord) -> bool {
        if let Some(status) = self.filters.status
            && record.status != status
        {
            return false;
        }
        if let Some(category) = &self.filters.category
            && &record.category != category
        {
            return false;
        }
        self.matches_search(record)
    }

    fn matches_search(&self, record: &GrievanceRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [
            record.title.as_str(),
            record.category.as_str(),
            record.priority_label(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Records matching `filters`, in input order.
pub fn filter<'a>(records: &'a [GrievanceRecord], filters: &Filters) -> Vec<&'a GrievanceRecord> {
    let matcher = filters.matcher();
    records.iter().filter(|r| matcher.matches(r)).collect()
}

/// Records submitted by `user_id`, in input order.
pub fn submitted_by<'a>(records: &'a [GrievanceRecord], user_id: &str) -> Vec<&'a GrievanceRecord> {
    records
        .iter()
        .filter(|r| r.submitter_user_id.as_deref() == Some(user_id))
        .collect()
}
