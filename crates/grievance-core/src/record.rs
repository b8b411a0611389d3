//! Grievance documents as stored by the portal.
//!
//! Field names follow the portal's JSON (camelCase, `_id` accepted for `id`).
//! Required fields are checked by whoever accepts new grievances; this type
//! only fills the defaults the store would otherwise apply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::GeoPoint;
use crate::labels::{Priority, Status};

/// Where a grievance was reported. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    /// The location as a validated point, if both coordinates are usable.
    pub fn point(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.latitude?, self.longitude?)
    }
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrievanceRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub category: String,
    /// Raw priority label as stored. May be missing or outside the known set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvotes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvoted_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl GrievanceRecord {
    /// Parsed priority; `None` when missing or not one of the four levels.
    pub fn priority(&self) -> Option<Priority> {
        self.ai_priority.as_deref()?.parse().ok()
    }

    /// Raw priority label, empty when missing.
    pub fn priority_label(&self) -> &str {
        self.ai_priority.as_deref().unwrap_or("")
    }

    pub fn geo_point(&self) -> Option<GeoPoint> {
        self.location.as_ref()?.point()
    }

    pub fn has_upvoted(&self, user_id: &str) -> bool {
        self.upvoted_by.iter().any(|u| u == user_id)
    }

    /// Copy of this record with a new triage status.
    pub fn with_status(&self, status: Status) -> Self {
        tracing::debug!(id = %self.id, from = %self.status, to = %status, "status change");
        Self {
            status,
            ..self.clone()
        }
    }

    /// Copy of this record with `user_id`'s upvote toggled.
    ///
    /// Adds the user and increments the counter, or removes every occurrence
    /// of the user and decrements (never below zero).
    pub fn with_upvote_toggled(&self, user_id: &str) -> Self {
        let mut next = self.clone();
        if self.has_upvoted(user_id) {
            next.upvoted_by.retain(|u| u != user_id);
            next.upvotes = next.upvotes.saturating_sub(1);
        } else {
            next.upvoted_by.push(user_id.to_string());
            next.upvotes = next.upvotes.saturating_add(1);
        }
        tracing::debug!(id = %self.id, user = user_id, upvotes = next.upvotes, "upvote toggled");
        next
    }
}
