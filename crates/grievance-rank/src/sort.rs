//! Dashboard sort orders.
//!
//! Every order is a stable sort: records with equal keys keep their input
//! order, so the result is fully determined by the input sequence.

use std::fmt;
use std::str::FromStr;

use grievance_core::{GeoPoint, GrievanceRecord, Priority, distance_km};

use crate::error::RankError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first.
    #[default]
    Date,
    /// Oldest first.
    Oldest,
    /// Most upvoted first.
    Upvotes,
    /// `Critical` first, unknown priorities last.
    Priority,
    /// Closest to the viewer first; records without a usable location last.
    Nearest,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        Self::Date,
        Self::Oldest,
        Self::Upvotes,
        Self::Priority,
        Self::Nearest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Oldest => "oldest",
            Self::Upvotes => "upvotes",
            Self::Priority => "priority",
            Self::Nearest => "nearest",
        }
    }
}

impl FromStr for SortKey {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| RankError::UnknownSortKey(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable in-place sort of a record view by `key`.
///
/// `viewer` is only consulted for [`SortKey::Nearest`]; without it every
/// record is infinitely far away and the input order is kept.
pub fn sort(records: &mut Vec<&GrievanceRecord>, key: SortKey, viewer: Option<GeoPoint>) {
    match key {
        SortKey::Date => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => records.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Upvotes => records.sort_by(|a, b| b.upvotes.cmp(&a.upvotes)),
        SortKey::Priority => records.sort_by_key(|r| Priority::rank_of(r.priority())),
        SortKey::Nearest => sort_by_distance(records, viewer),
    }
}

fn sort_by_distance(records: &mut Vec<&GrievanceRecord>, viewer: Option<GeoPoint>) {
    let mut keyed: Vec<(f64, &GrievanceRecord)> = records
        .iter()
        .map(|r| (distance_km(viewer, r.geo_point()), *r))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    records.clear();
    records.extend(keyed.into_iter().map(|(_, r)| r));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use grievance_core::{Location, Status};

    fn record(id: &str, created: &str) -> GrievanceRecord {
        GrievanceRecord {
            id: id.into(),
            title: format!("grievance {id}"),
            description: String::new(),
            category: "Other".into(),
            ai_priority: None,
            summary: None,
            status: Status::Submitted,
            upvotes: 0,
            upvoted_by: vec![],
            submitter_user_id: None,
            created_at: created.parse::<DateTime<Utc>>().unwrap(),
            location: None,
        }
    }

    fn at(lat: f64, lon: f64) -> Option<Location> {
        Some(Location {
            latitude: Some(lat),
            longitude: Some(lon),
            address: None,
        })
    }

    fn sorted_ids(records: &[GrievanceRecord], key: SortKey, viewer: Option<GeoPoint>) -> Vec<String> {
        let mut view: Vec<&GrievanceRecord> = records.iter().collect();
        sort(&mut view, key, viewer);
        view.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn date_is_newest_first() {
        let records = vec![
            record("jan", "2024-01-01T00:00:00Z"),
            record("mar", "2024-03-01T00:00:00Z"),
            record("feb", "2024-02-01T00:00:00Z"),
        ];
        assert_eq!(sorted_ids(&records, SortKey::Date, None), vec!["mar", "feb", "jan"]);
        assert_eq!(sorted_ids(&records, SortKey::Oldest, None), vec!["jan", "feb", "mar"]);
    }

    #[test]
    fn upvotes_descending_with_stable_ties() {
        let mut records = vec![
            record("a", "2024-01-01T00:00:00Z"),
            record("b", "2024-01-01T00:00:00Z"),
            record("c", "2024-01-01T00:00:00Z"),
            record("d", "2024-01-01T00:00:00Z"),
        ];
        records[0].upvotes = 2;
        records[1].upvotes = 5;
        records[2].upvotes = 2;
        records[3].upvotes = 0;
        assert_eq!(sorted_ids(&records, SortKey::Upvotes, None), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn priority_ranks_unknown_last() {
        let mut records: Vec<GrievanceRecord> = ["m", "c", "u", "h"]
            .iter()
            .map(|id| record(id, "2024-01-01T00:00:00Z"))
            .collect();
        records[0].ai_priority = Some("Medium".into());
        records[1].ai_priority = Some("Critical".into());
        records[2].ai_priority = Some("Urgent".into());
        records[3].ai_priority = Some("High".into());
        assert_eq!(sorted_ids(&records, SortKey::Priority, None), vec!["c", "h", "m", "u"]);
    }

    #[test]
    fn priority_keeps_order_among_unknowns() {
        let mut records: Vec<GrievanceRecord> = ["x", "low", "y"]
            .iter()
            .map(|id| record(id, "2024-01-01T00:00:00Z"))
            .collect();
        records[1].ai_priority = Some("Low".into());
        records[2].ai_priority = Some("Pending".into());
        assert_eq!(sorted_ids(&records, SortKey::Priority, None), vec!["low", "x", "y"]);
    }

    #[test]
    fn nearest_puts_missing_locations_last() {
        let mut records = vec![
            record("none1", "2024-01-01T00:00:00Z"),
            record("mumbai", "2024-01-01T00:00:00Z"),
            record("none2", "2024-01-01T00:00:00Z"),
            record("agra", "2024-01-01T00:00:00Z"),
        ];
        records[1].location = at(19.0760, 72.8777);
        records[3].location = at(27.1767, 78.0081);

        let delhi = GeoPoint::new(28.6139, 77.2090);
        assert_eq!(
            sorted_ids(&records, SortKey::Nearest, delhi),
            vec!["agra", "mumbai", "none1", "none2"]
        );
    }

    #[test]
    fn nearest_without_viewer_keeps_input_order() {
        let mut records = vec![
            record("a", "2024-01-01T00:00:00Z"),
            record("b", "2024-01-01T00:00:00Z"),
            record("c", "2024-01-01T00:00:00Z"),
        ];
        records[1].location = at(10.0, 10.0);
        assert_eq!(sorted_ids(&records, SortKey::Nearest, None), vec!["a", "b", "c"]);
    }

    #[test]
    fn invalid_coordinates_count_as_missing() {
        let mut records = vec![
            record("bad", "2024-01-01T00:00:00Z"),
            record("far", "2024-01-01T00:00:00Z"),
        ];
        records[0].location = at(120.0, 0.0);
        records[1].location = at(-33.8688, 151.2093);
        let delhi = GeoPoint::new(28.6139, 77.2090);
        assert_eq!(sorted_ids(&records, SortKey::Nearest, delhi), vec!["far", "bad"]);
    }

    #[test]
    fn sort_key_parses_display_names() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert_eq!(
            "distance".parse::<SortKey>(),
            Err(RankError::UnknownSortKey("distance".into()))
        );
    }
}
