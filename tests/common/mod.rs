#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use job_dashboard::models::JobResult;
use job_dashboard::models::users::UserDto;

pub fn found_on(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

/// A minimal job posting with the given title.
pub fn job(id: i64, title: &str) -> JobResult {
    JobResult {
        id: Some(id),
        external_id: Some(format!("ext-{id}")),
        title: title.to_string(),
        company_id: None,
        company_name: Some("Acme Corp".to_string()),
        location_id: None,
        location_name: Some("New York".to_string()),
        category_id: None,
        category_name: Some("IT Jobs".to_string()),
        salary_min: None,
        salary_max: None,
        description: String::new(),
        job_url: Some(format!("https://jobs.example.com/{id}")),
        source: Some("adzuna".to_string()),
        created_date: None,
        date_found: Some(found_on(2025, 1, 10)),
        apply_by: None,
        company: None,
        location: None,
    }
}

/// `n` jobs titled "Job 1".."Job n".
pub fn jobs(n: i64) -> Vec<JobResult> {
    (1..=n).map(|i| job(i, &format!("Job {i}"))).collect()
}

/// 23 jobs of which exactly 5 have "Engineer" in the title.
pub fn mixed_jobs() -> Vec<JobResult> {
    (1..=23)
        .map(|i| {
            let title = if i % 5 == 1 {
                format!("Senior Software Engineer {i}")
            } else {
                format!("Account Manager {i}")
            };
            job(i, &title)
        })
        .collect()
}

pub fn user(id: i64, username: &str) -> UserDto {
    UserDto {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: None,
        last_name: None,
        roles: vec!["ROLE_USER".to_string()],
    }
}
