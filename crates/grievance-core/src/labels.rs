//! Closed label sets shared by the dashboard and the classifier.
//!
//! Each label round-trips through its display string (`"In Progress"`,
//! `"Roads & Infrastructure"`), which is also the wire format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// AI-assigned urgency of a grievance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Rank given to a missing or unrecognised priority; sorts after `Low`.
    pub const UNKNOWN_RANK: u8 = 5;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Sort rank: `Critical` = 1 through `Low` = 4.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::High => 2,
            Self::Medium => 3,
            Self::Low => 4,
        }
    }

    /// Rank of an optional priority, with [`Self::UNKNOWN_RANK`] for `None`.
    pub fn rank_of(priority: Option<Priority>) -> u8 {
        priority.map_or(Self::UNKNOWN_RANK, |p| p.rank())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    /// Exact, case-sensitive match on the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseError::Priority(s.to_string()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Triage status set by authority staff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Submitted,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl Status {
    pub const ALL: [Status; 3] = [Self::Submitted, Self::InProgress, Self::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl FromStr for Status {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseError::Status(s.to_string()))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The department that handles a grievance. This set is closed: anything the
/// classifier cannot map lands in [`Department::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Roads & Infrastructure")]
    RoadsInfrastructure,
    #[serde(rename = "Water Supply")]
    WaterSupply,
    Electricity,
    #[serde(rename = "Waste Management")]
    WasteManagement,
    #[serde(rename = "Public Safety")]
    PublicSafety,
    #[serde(rename = "Emergency Services")]
    EmergencyServices,
    Other,
}

impl Department {
    pub const ALL: [Department; 7] = [
        Self::RoadsInfrastructure,
        Self::WaterSupply,
        Self::Electricity,
        Self::WasteManagement,
        Self::PublicSafety,
        Self::EmergencyServices,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoadsInfrastructure => "Roads & Infrastructure",
            Self::WaterSupply => "Water Supply",
            Self::Electricity => "Electricity",
            Self::WasteManagement => "Waste Management",
            Self::PublicSafety => "Public Safety",
            Self::EmergencyServices => "Emergency Services",
            Self::Other => "Other",
        }
    }
}

impl FromStr for Department {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseError::Department(s.to_string()))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ranks_in_urgency_order() {
        let ranks: Vec<u8> = Priority::ALL.iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(Priority::rank_of(None), 5);
        assert!(Priority::rank_of(Some(Priority::Low)) < Priority::rank_of(None));
    }

    #[test]
    fn priority_parse_is_case_sensitive() {
        assert_eq!("Critical".parse::<Priority>(), Ok(Priority::Critical));
        assert!("critical".parse::<Priority>().is_err());
        assert_eq!(
            "Urgent".parse::<Priority>(),
            Err(ParseError::Priority("Urgent".into()))
        );
    }

    #[test]
    fn status_wire_labels() {
        assert_eq!("In Progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"In Progress\""
        );
        let parsed: Status = serde_json::from_str("\"Resolved\"").unwrap();
        assert_eq!(parsed, Status::Resolved);
        assert_eq!(Status::default(), Status::Submitted);
    }

    #[test]
    fn department_display_matches_serde() {
        for dept in Department::ALL {
            let json = serde_json::to_string(&dept).unwrap();
            assert_eq!(json, format!("\"{}\"", dept.as_str()));
            assert_eq!(dept.as_str().parse::<Department>(), Ok(dept));
        }
    }

    #[test]
    fn department_rejects_aliases() {
        assert!("Roads".parse::<Department>().is_err());
        assert!("roads & infrastructure".parse::<Department>().is_err());
    }
}
