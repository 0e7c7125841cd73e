use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::jobs::lenient_timestamp;

/// Lifecycle status of a tracked application, sent as snake_case strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    PhoneScreen,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Applied,
        ApplicationStatus::PhoneScreen,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
    ];

    /// Wire value, e.g. `phone_screen`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::PhoneScreen => "phone_screen",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    /// Human label, e.g. `Phone Screen`.
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::PhoneScreen => "Phone Screen",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Withdrawn => "Withdrawn",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("unknown application status: {s}"))
    }
}

/// A job application the user is tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub job_title: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_url: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub date_applied: Option<NaiveDate>,
    #[serde(default)]
    pub resume_version: Option<String>,
    #[serde(default)]
    pub cover_letter_version: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "lenient_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Aggregate counts from `GET /api/applications/stats`.
///
/// The backend does not report `withdrawn`; it stays zero unless present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub applied: u64,
    #[serde(default)]
    pub phone_screen: u64,
    #[serde(default)]
    pub interview: u64,
    #[serde(default)]
    pub offer: u64,
    #[serde(default)]
    pub rejected: u64,
    #[serde(default)]
    pub withdrawn: u64,
}

impl ApplicationStats {
    pub fn count(&self, status: ApplicationStatus) -> u64 {
        match status {
            ApplicationStatus::Applied => self.applied,
            ApplicationStatus::PhoneScreen => self.phone_screen,
            ApplicationStatus::Interview => self.interview,
            ApplicationStatus::Offer => self.offer,
            ApplicationStatus::Rejected => self.rejected,
            ApplicationStatus::Withdrawn => self.withdrawn,
        }
    }
}

/// Applications with the given status, order preserved. `None` keeps all.
pub fn filter_by_status(
    applications: &[Application],
    status: Option<ApplicationStatus>,
) -> Vec<Application> {
    applications
        .iter()
        .filter(|app| status.is_none_or(|s| app.status == s))
        .cloned()
        .collect()
}

// ── DTOs ──

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplication {
    pub user_id: i64,
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_applied: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplication {
    pub status: ApplicationStatus,
    pub date_applied: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
