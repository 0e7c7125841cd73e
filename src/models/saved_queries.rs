use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::jobs::{JobSearchParams, lenient_timestamp};

/// A persisted search the backend can re-run on a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuery {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub query: String,
    pub location: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default = "default_distance")]
    pub distance: u32,
    #[serde(default, with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "lenient_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default, with = "lenient_timestamp")]
    pub last_run_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub new_jobs_count: Option<u32>,
}

fn default_active() -> bool {
    true
}

fn default_distance() -> u32 {
    25
}

impl SavedQuery {
    /// Search parameters that re-execute this saved query from the dashboard.
    pub fn to_search_params(&self) -> JobSearchParams {
        JobSearchParams {
            query: self.query.clone(),
            location: self.location.clone(),
            distance: self.distance,
            excluded_terms: None,
            date_from: None,
            date_to: None,
        }
    }

    /// "Never" for queries the scheduler has not picked up yet.
    pub fn last_run_label(&self) -> String {
        self.last_run_at
            .map(|ts| ts.format("%b %-d, %Y %H:%M").to_string())
            .unwrap_or_else(|| "Never".to_string())
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSavedQuery {
    pub user_id: i64,
    pub query: String,
    pub location: String,
    pub distance: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSavedQuery {
    pub query: String,
    pub location: String,
    pub distance: u32,
    pub is_active: bool,
}
