//! End-to-end tests of the API client against an in-process mock backend.
//!
//! The mock is an actix-web server bound to an ephemeral port; it mimics the
//! status codes and bodies of the real job-search backend.

mod common;

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use job_dashboard::api::jobs::DUPLICATE_SEARCH;
use job_dashboard::auth::{MemorySessionStore, Session, SessionEvent, SessionStore, StoredSession};
use job_dashboard::dashboard::{Dashboard, NoticeKind, SearchForm, SearchOutcome};
use job_dashboard::models::ApplicationStatus;
use job_dashboard::models::saved_queries::CreateSavedQuery;
use job_dashboard::models::users::{LoginRequest, UserDto};
use job_dashboard::view::{FilterCriteria, PageSize, PageWindow, ViewState};
use job_dashboard::{ApiClient, ApiError, ClientConfig};

const GOOD_TOKEN: &str = "good-token";
const PASSWORD: &str = "hunter2";

// ── Mock backend ──

#[derive(Default)]
struct MockState {
    search_queries: Mutex<Vec<String>>,
    saved: Mutex<Vec<(String, String)>>,
}

fn authorized(req: &HttpRequest) -> bool {
    let expected = format!("Bearer {GOOD_TOKEN}");
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str())
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "message": "Full authentication is required to access this resource",
    }))
}

fn mock_user() -> Value {
    json!({
        "id": 7,
        "username": "alice",
        "email": "alice@example.com",
        "firstName": "Alice",
        "lastName": "Smith",
        "roles": ["ROLE_USER"],
    })
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(body: web::Json<LoginBody>) -> HttpResponse {
    if body.username == "alice" && body.password == PASSWORD {
        HttpResponse::Ok().json(json!({
            "token": GOOD_TOKEN,
            "type": "Bearer",
            "user": mock_user(),
        }))
    } else {
        HttpResponse::Unauthorized().json(json!({ "message": "Invalid username or password" }))
    }
}

#[derive(Deserialize)]
struct SearchQuery {
    query: String,
}

fn mock_job(i: usize, title: &str) -> Value {
    if i % 4 == 0 {
        // Adzuna-shaped record with nested company/location.
        json!({
            "id": i,
            "externalId": format!("ext-{i}"),
            "title": title,
            "company": { "display_name": "Nested Co" },
            "location": { "display_name": "Jersey City" },
            "description": "",
            "redirect_url": format!("https://jobs.example.com/{i}"),
            "source": "adzuna",
            "createdDate": "2025-01-09T08:00:00Z",
            "dateFound": "2025-01-10T09:30:00",
        })
    } else {
        json!({
            "id": i,
            "externalId": format!("ext-{i}"),
            "title": title,
            "companyName": "Acme Corp",
            "locationName": "New York",
            "categoryName": "IT Jobs",
            "salaryMin": 80000.0,
            "salaryMax": 120000.0,
            "description": "",
            "jobUrl": format!("https://jobs.example.com/{i}"),
            "source": "adzuna",
            "createdDate": "2025-01-09T08:00:00",
            "dateFound": "2025-01-10T09:30:00.123",
        })
    }
}

async fn search(
    req: HttpRequest,
    state: web::Data<MockState>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    state
        .search_queries
        .lock()
        .unwrap()
        .push(req.query_string().to_string());

    let results: Vec<Value> = if query.query == "sparse" {
        vec![
            json!({ "id": 1, "title": "Engineer", "companyName": "Acme", "description": null,
                    "dateFound": "2025-01-10T09:30:00" }),
            json!({ "id": 2, "title": null, "companyName": "Acme", "description": "Night shift" }),
        ]
    } else if query.query == "slow" {
        tokio::time::sleep(Duration::from_millis(300)).await;
        vec![mock_job(1, "Slow Result")]
    } else {
        (1..=23)
            .map(|i| {
                let title = if i % 5 == 1 {
                    format!("Software Engineer {i}")
                } else {
                    format!("Account Manager {i}")
                };
                mock_job(i, &title)
            })
            .collect()
    };

    HttpResponse::Ok().json(json!({ "count": results.len(), "results": results }))
}

async fn create_saved_query(
    req: HttpRequest,
    state: web::Data<MockState>,
    body: web::Json<Value>,
) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    let key = (
        body["query"].as_str().unwrap_or_default().to_string(),
        body["location"].as_str().unwrap_or_default().to_string(),
    );
    let mut saved = state.saved.lock().unwrap();
    if saved.contains(&key) {
        return HttpResponse::Conflict().body("Query already exists");
    }
    saved.push(key);
    HttpResponse::Created().body("Saved query created successfully")
}

async fn get_saved_query(req: HttpRequest, path: web::Path<i64>) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "id": path.into_inner(),
        "userId": 7,
        "query": "engineer",
        "location": "New York",
        "isActive": true,
        "distance": 25,
        "lastRunAt": null,
    }))
}

async fn get_application(req: HttpRequest, path: web::Path<i64>) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    let id = path.into_inner();
    HttpResponse::NotFound().json(json!({ "error": format!("Application {id} not found") }))
}

#[derive(Deserialize)]
struct StatusQuery {
    status: String,
}

async fn update_status(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<StatusQuery>,
) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "id": path.into_inner(),
        "userId": 7,
        "jobTitle": "Backend Engineer",
        "companyName": "Acme Corp",
        "status": query.status,
        "dateApplied": "2025-01-12",
        "createdAt": "2025-01-12T10:00:00",
    }))
}

async fn stats(req: HttpRequest) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "total": 3,
        "applied": 1,
        "phone_screen": 1,
        "interview": 1,
        "offer": 0,
        "rejected": 0,
    }))
}

/// Start the mock backend and return its base URL.
fn spawn_backend() -> (String, web::Data<MockState>) {
    let state = web::Data::new(MockState::default());
    let data = state.clone();

    let server = HttpServer::new(move || {
        App::new().app_data(data.clone()).service(
            web::scope("/api")
                .route("/auth/login", web::post().to(login))
                .route("/jobs/search", web::get().to(search))
                .route("/jobs/saved-queries", web::post().to(create_saved_query))
                .route("/jobs/saved-queries/{id}", web::get().to(get_saved_query))
                .route("/applications/stats", web::get().to(stats))
                .route("/applications/{id}", web::get().to(get_application))
                .route("/applications/{id}/status", web::patch().to(update_status)),
        )
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("bind mock backend");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    (format!("http://{addr}"), state)
}

fn user() -> UserDto {
    serde_json::from_value(mock_user()).unwrap()
}

fn client_with_token(base_url: &str, token: Option<&str>) -> (ApiClient, Arc<MemorySessionStore>) {
    let store = Arc::new(match token {
        Some(token) => MemorySessionStore::with_session(StoredSession {
            token: token.to_string(),
            user: user(),
        }),
        None => MemorySessionStore::new(),
    });
    let config = ClientConfig {
        api_base_url: base_url.to_string(),
        ..ClientConfig::default()
    };
    let session = Session::new(store.clone());
    (ApiClient::new(&config, session).unwrap(), store)
}

// ── Tests ──

#[actix_web::test]
async fn test_login_stores_session_and_authorizes_search() {
    let (url, _) = spawn_backend();
    let (api, store) = client_with_token(&url, None);

    let login = api
        .login(&LoginRequest {
            username: "alice".to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .expect("login should succeed");

    assert_eq!(login.token, GOOD_TOKEN);
    assert_eq!(login.user.display_name(), "Alice Smith");
    assert_eq!(store.load().unwrap().unwrap().token, GOOD_TOKEN);

    let params = SearchForm::new("engineer", "New York").validate().unwrap();
    let response = api.search_jobs(&params).await.unwrap();
    assert_eq!(response.count, 23);
    assert_eq!(response.results.len(), 23);
}

#[actix_web::test]
async fn test_wrong_password_does_not_force_logout() {
    let (url, _) = spawn_backend();
    let (api, _) = client_with_token(&url, None);
    let mut events = api.session().subscribe().await;

    let err = api
        .login(&LoginRequest {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        ApiError::InvalidCredentials(msg) => assert_eq!(msg, "Invalid username or password"),
        other => panic!("expected InvalidCredentials, got {other:?}"),
    }
    assert!(events.try_recv().is_err());
}

#[actix_web::test]
async fn test_unauthorized_response_forces_logout() {
    let (url, _) = spawn_backend();
    let (api, store) = client_with_token(&url, Some("revoked-token"));
    api.session().restore().await.unwrap();
    let mut events = api.session().subscribe().await;

    let params = SearchForm::new("engineer", "New York").validate().unwrap();
    let err = api.search_jobs(&params).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(
        events.recv().await,
        Some(SessionEvent::ForcedLogout {
            reason: "Session expired".to_string()
        })
    );
    assert!(!api.session().is_authenticated().await);
    assert!(store.load().unwrap().is_none());
}

#[actix_web::test]
async fn test_search_sends_optional_params_only_when_set() {
    let (url, state) = spawn_backend();
    let (api, _) = client_with_token(&url, Some(GOOD_TOKEN));
    api.session().restore().await.unwrap();

    let plain = SearchForm::new("engineer", "New York").validate().unwrap();
    api.search_jobs(&plain).await.unwrap();

    let mut form = SearchForm::new("engineer", "New York");
    form.distance = 50;
    form.excluded_terms = Some("senior".to_string());
    form.date_from = chrono::NaiveDate::from_ymd_opt(2025, 1, 1);
    api.search_jobs(&form.validate().unwrap()).await.unwrap();

    let seen = state.search_queries.lock().unwrap().clone();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].contains("query=engineer"));
    assert!(seen[0].contains("distance=25"));
    assert!(!seen[0].contains("excludedTerms"));
    assert!(!seen[0].contains("dateFrom"));
    assert!(seen[1].contains("distance=50"));
    assert!(seen[1].contains("excludedTerms=senior"));
    assert!(seen[1].contains("dateFrom=2025-01-01"));
    assert!(!seen[1].contains("dateTo"));
}

#[actix_web::test]
async fn test_search_results_decode_both_record_shapes() {
    let (url, _) = spawn_backend();
    let (api, _) = client_with_token(&url, Some(GOOD_TOKEN));
    api.session().restore().await.unwrap();

    let params = SearchForm::new("engineer", "New York").validate().unwrap();
    let results = api.search_jobs(&params).await.unwrap().results;

    let flat = &results[0];
    assert_eq!(flat.company(), Some("Acme Corp"));
    assert_eq!(flat.salary_label().as_deref(), Some("$80,000 - $120,000"));
    assert!(flat.date_found.is_some());

    let nested = &results[3];
    assert_eq!(nested.company(), Some("Nested Co"));
    assert_eq!(nested.location(), Some("Jersey City"));
    assert_eq!(nested.job_url.as_deref(), Some("https://jobs.example.com/4"));
    assert!(nested.created_date.is_some());
}

#[actix_web::test]
async fn test_duplicate_saved_search_is_a_conflict() {
    let (url, _) = spawn_backend();
    let (api, _) = client_with_token(&url, Some(GOOD_TOKEN));
    api.session().restore().await.unwrap();

    let input = CreateSavedQuery {
        user_id: 7,
        query: "engineer".to_string(),
        location: "New York".to_string(),
        distance: 25,
        is_active: Some(true),
    };

    let created = api.create_saved_query(&input).await.unwrap();
    assert_eq!(created, "Saved query created successfully");

    let err = api.create_saved_query(&input).await.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.to_string(), DUPLICATE_SEARCH);
    assert_eq!(err.status(), Some(reqwest::StatusCode::CONFLICT));
    // A conflict is not an auth failure.
    assert!(api.session().is_authenticated().await);
}

#[actix_web::test]
async fn test_not_found_carries_server_message() {
    let (url, _) = spawn_backend();
    let (api, _) = client_with_token(&url, Some(GOOD_TOKEN));
    api.session().restore().await.unwrap();

    match api.get_application(999).await.unwrap_err() {
        ApiError::NotFound(msg) => assert_eq!(msg, "Application 999 not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[actix_web::test]
async fn test_application_status_and_stats() {
    let (url, _) = spawn_backend();
    let (api, _) = client_with_token(&url, Some(GOOD_TOKEN));
    api.session().restore().await.unwrap();

    let updated = api
        .update_application_status(12, ApplicationStatus::PhoneScreen)
        .await
        .unwrap();
    assert_eq!(updated.id, 12);
    assert_eq!(updated.status, ApplicationStatus::PhoneScreen);
    assert_eq!(updated.status.label(), "Phone Screen");

    let stats = api.application_stats().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.count(ApplicationStatus::Interview), 1);
    assert_eq!(stats.count(ApplicationStatus::Withdrawn), 0);
}

#[actix_web::test]
async fn test_dashboard_applies_results_and_keeps_filter() {
    let (url, _) = spawn_backend();
    let (api, _) = client_with_token(&url, Some(GOOD_TOKEN));
    api.session().restore().await.unwrap();

    let dashboard = Dashboard::new(api, ViewState::new(PageSize::Ten, PageWindow::Standard));
    dashboard
        .view()
        .await
        .set_filter(FilterCriteria::text("engineer"));

    let outcome = dashboard
        .search(&SearchForm::new("engineer", "New York"))
        .await
        .unwrap();
    assert_eq!(outcome, SearchOutcome::Applied { count: 23 });

    let view = dashboard.view().await;
    assert_eq!(view.results().len(), 23);
    assert_eq!(view.filtered_count(), 5);
    assert_eq!(view.total_pages(), 1);
    assert!(dashboard.notice().await.is_none());
}

#[actix_web::test]
async fn test_dashboard_validation_error_sends_nothing() {
    let (url, state) = spawn_backend();
    let (api, _) = client_with_token(&url, Some(GOOD_TOKEN));
    api.session().restore().await.unwrap();
    let dashboard = Dashboard::new(api, ViewState::default());

    let err = dashboard
        .search(&SearchForm::new("engineer", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(dashboard.notice().await.unwrap().kind, NoticeKind::Validation);
    assert!(state.search_queries.lock().unwrap().is_empty());

    dashboard.dismiss_notice().await;
    assert!(dashboard.notice().await.is_none());
}

#[actix_web::test]
async fn test_stale_search_response_is_dropped() {
    let (url, _) = spawn_backend();
    let (api, _) = client_with_token(&url, Some(GOOD_TOKEN));
    api.session().restore().await.unwrap();
    let dashboard = Dashboard::new(api, ViewState::default());

    let slow = SearchForm::new("slow", "New York");
    let fast = SearchForm::new("engineer", "New York");

    let (first, second) = tokio::join!(dashboard.search(&slow), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        dashboard.search(&fast).await
    });

    assert_eq!(first.unwrap(), SearchOutcome::Stale);
    assert_eq!(second.unwrap(), SearchOutcome::Applied { count: 23 });

    let view = dashboard.view().await;
    assert_eq!(view.results().len(), 23);
    assert!(view.results().iter().all(|j| j.title != "Slow Result"));
}

#[actix_web::test]
async fn test_saved_query_runs_as_search() {
    let (url, state) = spawn_backend();
    let (api, _) = client_with_token(&url, Some(GOOD_TOKEN));
    api.session().restore().await.unwrap();
    let dashboard = Dashboard::new(api, ViewState::default());

    let outcome = dashboard.run_saved_query(3).await.unwrap();
    assert_eq!(outcome, SearchOutcome::Applied { count: 23 });

    let seen = state.search_queries.lock().unwrap().clone();
    assert!(seen[0].contains("location=New+York") || seen[0].contains("location=New%20York"));
}

#[actix_web::test]
async fn test_forced_logout_event_clears_dashboard() {
    let (url, _) = spawn_backend();
    let (api, _) = client_with_token(&url, Some(GOOD_TOKEN));
    api.session().restore().await.unwrap();
    let dashboard = Dashboard::new(api, ViewState::default());
    dashboard
        .search(&SearchForm::new("engineer", "New York"))
        .await
        .unwrap();

    let event = SessionEvent::ForcedLogout {
        reason: "Session expired".to_string(),
    };
    dashboard.handle_session_event(&event).await;

    assert!(dashboard.view().await.results().is_empty());
    let notice = dashboard.notice().await.unwrap();
    assert_eq!(notice.kind, NoticeKind::SessionEnded);
    assert_eq!(notice.message, "Session expired");
}

#[actix_web::test]
async fn test_null_text_fields_do_not_fail_the_search() {
    let (url, _) = spawn_backend();
    let (api, _) = client_with_token(&url, Some(GOOD_TOKEN));
    api.session().restore().await.unwrap();

    let params = SearchForm::new("sparse", "New York").validate().unwrap();
    let results = api.search_jobs(&params).await.unwrap().results;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Engineer");
    assert_eq!(results[0].description, "");
    assert_eq!(results[1].title, "");
    assert_eq!(results[1].description, "Night shift");
}

#[actix_web::test]
async fn test_unauthorized_search_clears_stale_rows() {
    let (url, _) = spawn_backend();
    let (api, _) = client_with_token(&url, Some("revoked-token"));
    api.session().restore().await.unwrap();
    let dashboard = Dashboard::new(api, ViewState::default());
    dashboard.view().await.set_results(common::jobs(12));

    let err = dashboard
        .search(&SearchForm::new("engineer", "New York"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(dashboard.view().await.results().is_empty());
    assert_eq!(
        dashboard.notice().await.unwrap().kind,
        NoticeKind::SessionEnded
    );
}
