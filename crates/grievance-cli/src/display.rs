//! Plain-text rendering of dashboard views and classifications.

use std::fmt::Write;

use grievance_ai::{AliasTable, NormalizedClassification};
use grievance_core::{GeoPoint, GrievanceRecord, distance_km};
use grievance_rank::DashboardStats;

const MAX_TITLE: usize = 40;

/// One line per record: priority, status, upvotes, optional distance, title.
pub fn render_view(records: &[&GrievanceRecord], viewer: Option<GeoPoint>) -> String {
    let mut out = String::new();
    if records.is_empty() {
        out.push_str("No grievances found matching your filters.\n");
        return out;
    }

    for r in records {
        let priority = match r.priority_label() {
            "" => "-",
            label => label,
        };
        let _ = write!(
            out,
            "{:<10} {:<12} {:>4}  {:<10}",
            priority,
            r.status.as_str(),
            r.upvotes,
            r.created_at.format("%Y-%m-%d"),
        );
        if viewer.is_some() {
            let d = distance_km(viewer, r.geo_point());
            if d.is_finite() {
                let _ = write!(out, " {:>8.1} km", d);
            } else {
                let _ = write!(out, " {:>11}", "-");
            }
        }
        let _ = writeln!(out, "  {}  [{}]", truncate(&r.title, MAX_TITLE), r.category);
    }
    out
}

pub fn render_stats(stats: &DashboardStats) -> String {
    format!(
        "  {:<14} {}\n  {:<14} {}\n  {:<14} {}\n  {:<14} {}\n",
        "Total",
        stats.total,
        "Submitted",
        stats.submitted,
        "In Progress",
        stats.in_progress,
        "Resolved",
        stats.resolved,
    )
}

pub fn render_classification(c: &NormalizedClassification) -> String {
    format!(
        "  {:<10} {}\n  {:<10} {}\n  {:<10} {}\n",
        "Priority", c.ai_priority, "Category", c.category, "Summary", c.summary
    )
}

pub fn render_aliases(table: &AliasTable) -> String {
    let mut out = format!("Alias table v{} ({} entries)\n", table.version, table.len());
    for (alias, dept) in table.iter() {
        let _ = writeln!(out, "  {:<24} {}", alias, dept);
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
    t.push('…');
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use grievance_core::{Department, Priority, Status};

    fn record(title: &str) -> GrievanceRecord {
        GrievanceRecord {
            id: "1".into(),
            title: title.into(),
            description: String::new(),
            category: "Electricity".into(),
            ai_priority: Some("High".into()),
            summary: None,
            status: Status::InProgress,
            upvotes: 7,
            upvoted_by: vec![],
            submitter_user_id: None,
            created_at: "2024-02-01T00:00:00Z".parse().unwrap(),
            location: None,
        }
    }

    #[test]
    fn view_line_contains_fields() {
        let r = record("Transformer sparking");
        let out = render_view(&[&r], None);
        assert!(out.contains("High"));
        assert!(out.contains("In Progress"));
        assert!(out.contains("2024-02-01"));
        assert!(out.contains("Transformer sparking  [Electricity]"));
        assert!(!out.contains("km"));
    }

    #[test]
    fn view_shows_dash_for_unknown_distance() {
        let r = record("No location");
        let out = render_view(&[&r], GeoPoint::new(0.0, 0.0));
        assert!(!out.contains("km"));
        assert!(out.contains(" -"));
    }

    #[test]
    fn empty_view_message() {
        assert!(render_view(&[], None).contains("No grievances found"));
    }

    #[test]
    fn long_titles_are_truncated() {
        let t = truncate(&"x".repeat(60), 10);
        assert_eq!(t.chars().count(), 10);
        assert!(t.ends_with('…'));
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn classification_block() {
        let c = NormalizedClassification {
            ai_priority: Priority::Critical,
            category: Department::EmergencyServices,
            summary: "Fire in market".into(),
        };
        let out = render_classification(&c);
        assert!(out.contains("Critical"));
        assert!(out.contains("Emergency Services"));
        assert!(out.contains("Fire in market"));
    }

    #[test]
    fn aliases_listing() {
        let out = render_aliases(&AliasTable::builtin());
        assert!(out.starts_with("Alias table v1 (18 entries)"));
        assert!(out.contains("Power"));
    }
}
