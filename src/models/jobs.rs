use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A job posting as returned by `GET /api/jobs/search`.
///
/// Records are produced by the backend only; the dashboard never edits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, alias = "redirect_url")]
    pub job_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, with = "lenient_timestamp")]
    pub created_date: Option<NaiveDateTime>,
    #[serde(default, with = "lenient_timestamp")]
    pub date_found: Option<NaiveDateTime>,
    #[serde(default, with = "lenient_timestamp")]
    pub apply_by: Option<NaiveDateTime>,
    /// Adzuna-shaped nested company, used when `companyName` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<DisplayName>,
    /// Adzuna-shaped nested location, used when `locationName` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<DisplayName>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl JobResult {
    /// Best-effort company name: flat field first, nested object second.
    pub fn company(&self) -> Option<&str> {
        self.company_name
            .as_deref()
            .or_else(|| self.company.as_ref().and_then(|c| c.display_name.as_deref()))
    }

    /// Best-effort location name: flat field first, nested object second.
    pub fn location(&self) -> Option<&str> {
        self.location_name
            .as_deref()
            .or_else(|| self.location.as_ref().and_then(|l| l.display_name.as_deref()))
    }

    pub fn category(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    /// The calendar day the backend first saw this posting.
    pub fn discovered_on(&self) -> Option<NaiveDate> {
        self.date_found.map(|ts| ts.date())
    }

    /// Salary range formatted for display, e.g. `$80,000 - $120,000`.
    pub fn salary_label(&self) -> Option<String> {
        match (self.salary_min, self.salary_max) {
            (Some(min), Some(max)) if (min - max).abs() < f64::EPSILON => Some(dollars(min)),
            (Some(min), Some(max)) => Some(format!("{} - {}", dollars(min), dollars(max))),
            (Some(min), None) => Some(format!("from {}", dollars(min))),
            (None, Some(max)) => Some(format!("up to {}", dollars(max))),
            (None, None) => None,
        }
    }
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn dollars(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

// ── Search request / response ──

/// Query parameters for `GET /api/jobs/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchParams {
    pub query: String,
    pub location: String,
    pub distance: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchResponse {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub results: Vec<JobResult>,
}

/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` or a bare date.
/// Anything else deserializes to `None` rather than failing the whole record.
pub(crate) mod lenient_timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }
}
