//! Plain-text rendering for the terminal front end.

use crate::models::{Application, ApplicationStats, ApplicationStatus, JobResult, SavedQuery};
use crate::view::{PageItem, ViewState};

const TITLE_WIDTH: usize = 40;
const COLUMN_WIDTH: usize = 24;

/// Join rendered lines, each terminated by a newline.
fn lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// The current page of results plus the pagination footer.
pub fn results_page(view: &ViewState) -> String {
    let rows = view.visible_rows();
    if rows.is_empty() {
        return "No jobs match the current search and filter.\n".to_string();
    }

    let mut out = vec![
        format!(
            "{:<TITLE_WIDTH$}  {:<COLUMN_WIDTH$}  {:<COLUMN_WIDTH$}  Salary",
            "Title", "Company", "Location"
        ),
        "-".repeat(TITLE_WIDTH + 2 * COLUMN_WIDTH + 16),
    ];
    out.extend(rows.into_iter().map(job_row));
    out.push(String::new());

    let mut page = lines(out);
    page.push_str(&pagination_footer(view));
    page
}

pub fn job_row(job: &JobResult) -> String {
    format!(
        "{:<TITLE_WIDTH$}  {:<COLUMN_WIDTH$}  {:<COLUMN_WIDTH$}  {}",
        truncate(&job.title, TITLE_WIDTH),
        truncate(job.company().unwrap_or("-"), COLUMN_WIDTH),
        truncate(job.location().unwrap_or("-"), COLUMN_WIDTH),
        job.salary_label().unwrap_or_else(|| "-".to_string()),
    )
}

/// "Showing 11 to 20 of 23 results" plus the page control, current page in
/// brackets, e.g. `< Prev  1 [2] 3  Next >`.
pub fn pagination_footer(view: &ViewState) -> String {
    let mut out = Vec::with_capacity(2);
    if let Some((first, last, total)) = view.showing_range() {
        out.push(format!(
            "Showing {first} to {last} of {total} results ({} per page)",
            view.page_size()
        ));
    }

    let pages = view
        .page_number_sequence()
        .into_iter()
        .map(|item| match item {
            PageItem::Page(n) if n == view.current_page() => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let prev = if view.has_previous() { "< Prev" } else { "      " };
    let next = if view.has_next() { "Next >" } else { "" };
    out.push(format!("{prev}  {pages}  {next}"));
    lines(out)
}

pub fn saved_queries(queries: &[SavedQuery]) -> String {
    if queries.is_empty() {
        return "No saved searches yet.\n".to_string();
    }
    let rows = queries
        .iter()
        .map(|q| {
            format!(
                "#{:<5} {:<8} {} in {} ({} mi) | last run: {}{}",
                q.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
                if q.is_active { "active" } else { "paused" },
                q.query,
                q.location,
                q.distance,
                q.last_run_label(),
                q.new_jobs_count
                    .filter(|n| *n > 0)
                    .map(|n| format!(" | {n} new"))
                    .unwrap_or_default(),
            )
        })
        .collect();
    lines(rows)
}

pub fn applications(apps: &[Application]) -> String {
    if apps.is_empty() {
        return "No applications tracked yet.\n".to_string();
    }
    let rows = apps
        .iter()
        .map(|app| {
            format!(
                "#{:<5} {:<13} {} @ {}{}",
                app.id,
                app.status.label(),
                app.job_title,
                app.company_name.as_deref().unwrap_or("-"),
                app.date_applied
                    .map(|d| format!(" (applied {d})"))
                    .unwrap_or_default(),
            )
        })
        .collect();
    lines(rows)
}

pub fn application_detail(app: &Application) -> String {
    let fields = [
        ("Status", Some(app.status.label().to_string())),
        ("Company", app.company_name.clone()),
        ("Location", app.location.clone()),
        ("URL", app.job_url.clone()),
        ("Applied", app.date_applied.map(|d| d.to_string())),
        ("Resume", app.resume_version.clone()),
        ("Cover letter", app.cover_letter_version.clone()),
        ("Notes", app.notes.clone()),
    ];

    let mut out = vec![format!("#{} {}", app.id, app.job_title)];
    out.extend(
        fields
            .into_iter()
            .filter_map(|(label, value)| value.map(|value| format!("  {label:<13} {value}"))),
    );
    lines(out)
}

pub fn stats(stats: &ApplicationStats) -> String {
    let mut out = vec![format!("{:<13} {}", "Total", stats.total)];
    out.extend(
        ApplicationStatus::ALL
            .into_iter()
            .map(|status| format!("{:<13} {}", status.label(), stats.count(status))),
    );
    lines(out)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
