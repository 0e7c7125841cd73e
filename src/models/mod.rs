pub mod applications;
pub mod jobs;
pub mod saved_queries;
pub mod users;

pub use applications::{Application, ApplicationStats, ApplicationStatus};
pub use jobs::{JobResult, JobSearchParams, JobSearchResponse};
pub use saved_queries::SavedQuery;
pub use users::{LoginResponse, UserDto};
