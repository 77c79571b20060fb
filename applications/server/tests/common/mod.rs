//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use planzen_server::{create_router, services::AuthService, state::AppState};
use planzen_storage::Database;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Router plus handles on what sits behind it
pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

/// A captured response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `token=<jwt>` from the Set-Cookie header, ready to send back
    pub fn session_cookie(&self) -> Option<String> {
        self.header(header::SET_COOKIE)
            .and_then(|c| c.split(';').next())
            .map(str::to_string)
    }
}

/// Create a test app on a temp SQLite file with a tiny web directory
pub async fn create_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
    let db = Arc::new(Database::connect(&db_url).await.unwrap());

    let web_dir = temp_dir.path().join("web");
    std::fs::create_dir_all(&web_dir).unwrap();
    std::fs::write(web_dir.join("index.html"), fixtures::INDEX_HTML).unwrap();
    std::fs::write(web_dir.join("app.js"), "console.log('planzen');").unwrap();

    // Lowest bcrypt cost keeps the suite fast
    let auth_service = Arc::new(AuthService::new(fixtures::JWT_SECRET.to_string(), 4, false));

    let app_state = AppState::new(Arc::clone(&db), Arc::clone(&auth_service), web_dir);

    TestApp {
        router: create_router(app_state),
        db,
        auth_service,
        _temp_dir: temp_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn register(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/auth/register",
            Some(fixtures::registration(email, password)),
            None,
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/auth/login",
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Register and log in, returning the session cookie pair
    pub async fn session(&self, email: &str) -> String {
        assert_eq!(
            self.register(email, fixtures::TEST_PASSWORD).await.status,
            StatusCode::CREATED
        );
        self.login(email, fixtures::TEST_PASSWORD)
            .await
            .session_cookie()
            .expect("login sets a cookie")
    }
}

/// Test user credentials and request bodies
pub mod fixtures {
    use serde_json::{json, Value};

    pub const JWT_SECRET: &str = "test-secret-key";
    pub const TEST_EMAIL: &str = "ada@example.com";
    pub const TEST_PASSWORD: &str = "Secret123!";
    pub const INDEX_HTML: &str = "<!doctype html><title>PlanZen</title>";

    pub fn registration(email: &str, password: &str) -> Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "password": password,
            "dateOfBirth": "1990-12-10",
        })
    }

    pub fn todo(name: &str) -> Value {
        json!({
            "name": name,
            "dueDate": "2025-03-01T09:00:00Z",
            "priority": "high",
            "category": "work",
            "status": "pending",
        })
    }

    pub fn event(capacity: u32, registered: u32) -> Value {
        json!({
            "name": "RustConf",
            "startTime": "2025-09-01T09:00:00Z",
            "endTime": "2025-09-01T17:00:00Z",
            "location": "Hall A",
            "type": "conference",
            "organizer": "Rust Foundation",
            "capacity": capacity,
            "registeredAttendees": registered,
        })
    }

    pub fn routine(name: &str) -> Value {
        json!({
            "name": name,
            "startTime": "07:00",
            "endTime": "07:45",
            "frequency": "daily",
            "daysOfWeek": [0, 1, 2, 3, 4, 5, 6],
            "reminder": false,
        })
    }

    pub fn appointment(title: &str) -> Value {
        json!({
            "title": title,
            "startDate": "2025-04-02",
            "startTime": "09:30",
            "endDate": "2025-04-02",
            "endTime": "10:00",
            "location": "Clinic",
            "attendees": ["Ada"],
        })
    }
}
