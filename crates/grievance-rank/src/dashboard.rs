//! The dashboard's visible list and summary counters.

use grievance_core::{GeoPoint, GrievanceRecord, Status};
use serde::Serialize;
use tracing::debug;

use crate::filter::{Filters, filter};
use crate::sort::{SortKey, sort};

/// Filter then order `records` for display.
///
/// Pure: the input is never modified and the result borrows from it. Records
/// with missing or malformed fields are ranked by the fallback rules in
/// [`sort`] rather than rejected.
pub fn filter_and_sort<'a>(
    records: &'a [GrievanceRecord],
    filters: &Filters,
    key: SortKey,
    viewer: Option<GeoPoint>,
) -> Vec<&'a GrievanceRecord> {
    let mut visible = filter(records, filters);
    sort(&mut visible, key, viewer);
    debug!(
        total = records.len(),
        visible = visible.len(),
        sort = %key,
        has_viewer = viewer.is_some(),
        "dashboard view built"
    );
    visible
}

/// Status counters shown above the dashboard list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub submitted: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl DashboardStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a GrievanceRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            match r.status {
                Status::Submitted => acc.submitted += 1,
                Status::InProgress => acc.in_progress += 1,
                Status::Resolved => acc.resolved += 1,
            }
            acc
        })
    }
}
