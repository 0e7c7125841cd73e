use chrono::NaiveDate;

use crate::models::JobResult;

/// Client-side narrowing of a result set.
///
/// `text` is matched case-insensitively as a substring of the title, company,
/// location or category. The date bounds are inclusive and apply to the day a
/// job was discovered; a job without that timestamp fails any bounded filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub text: String,
    pub found_from: Option<NaiveDate>,
    pub found_to: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn found_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.found_from = from;
        self.found_to = to;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.found_from.is_none() && self.found_to.is_none()
    }

    pub fn matches(&self, job: &JobResult) -> bool {
        self.matches_text(job) && self.matches_dates(job)
    }

    fn matches_text(&self, job: &JobResult) -> bool {
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            Some(job.title.as_str()),
            job.company(),
            job.location(),
            job.category(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_dates(&self, job: &JobResult) -> bool {
        if self.found_from.is_none() && self.found_to.is_none() {
            return true;
        }
        let Some(found) = job.discovered_on() else {
            return false;
        };
        self.found_from.is_none_or(|from| found >= from)
            && self.found_to.is_none_or(|to| found <= to)
    }

    /// Jobs passing this filter, in their original order.
    pub fn apply<'a>(&self, jobs: &'a [JobResult]) -> Vec<&'a JobResult> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}
