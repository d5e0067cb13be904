#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use client::{ClientConfig, Navigator, SessionStore};
use serde_json::{json, Value};

pub const SUPER_ADMIN_TOKEN: &str = "token-super";
pub const TEACHER_TOKEN: &str = "token-teacher";
pub const BURSAR_TOKEN: &str = "token-bursar";

/// One request as the mock backend received it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
struct BackendState {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

pub struct MockBackend {
    pub api_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = BackendState::default();
        let seen = state.seen.clone();
        let data = web::Data::new(state);

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(handle))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind mock backend");

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        Self {
            api_url: format!("http://{}/api", addr),
            seen,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone(),
            session_path: temp_session_path(),
            timeout_ms: 5_000,
        }
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> SeenRequest {
        self.seen().last().cloned().expect("no request reached the backend")
    }
}

pub fn temp_session_path() -> PathBuf {
    std::env::temp_dir().join(format!("sms-session-{}.yaml", uuid::Uuid::new_v4()))
}

fn user_json(token: &str) -> Option<Value> {
    match token {
        SUPER_ADMIN_TOKEN => Some(json!({
            "_id": "u-1",
            "username": "superadmin",
            "email": "admin@school.test",
            "role": "super_admin",
            "permissions": [],
            "profile": { "firstName": "Ada", "lastName": "Obi" }
        })),
        TEACHER_TOKEN => Some(json!({
            "_id": "u-2",
            "username": "teacher",
            "email": "teacher@school.test",
            "role": "teacher",
            "permissions": ["attendance.mark"]
        })),
        BURSAR_TOKEN => Some(json!({
            "_id": "u-3",
            "username": "bursar",
            "role": "staff",
            "permissions": [{ "module": "fees", "actions": ["read", "write"] }]
        })),
        _ => None,
    }
}

fn bearer(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn handle(req: HttpRequest, body: web::Bytes, state: web::Data<BackendState>) -> HttpResponse {
    let authorization = bearer(&req);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let method = req.method().to_string();
    let path = req.path().to_string();

    state.seen.lock().unwrap().push(SeenRequest {
        method: method.clone(),
        path: path.clone(),
        query: req.query_string().to_string(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let token = authorization
        .as_deref()
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string();

    match (method.as_str(), path.as_str()) {
        ("POST", "/api/auth/login") => login(&body),
        ("POST", "/api/auth/logout") => {
            HttpResponse::Ok().json(json!({ "success": true, "message": "Logged out" }))
        }
        ("GET", "/api/auth/me") => match user_json(&token) {
            Some(user) => HttpResponse::Ok().json(json!({ "success": true, "data": user })),
            None => HttpResponse::Unauthorized()
                .json(json!({ "success": false, "message": "Not authorized, token failed" })),
        },
        ("GET", "/api/students") => HttpResponse::Ok().json(json!({
            "success": true,
            "count": 1,
            "pagination": { "page": 1, "pages": 1 },
            "data": [{ "_id": "s-1", "admissionNumber": "ADM/001" }]
        })),
        ("GET", "/api/students/missing") => HttpResponse::NotFound()
            .json(json!({ "success": false, "message": "Student not found" })),
        ("GET", "/api/expired") => {
            HttpResponse::Unauthorized().json(json!({ "success": false, "message": "Token expired" }))
        }
        ("GET", "/api/crash") => HttpResponse::InternalServerError().finish(),
        ("GET", "/api/broken") => HttpResponse::Ok()
            .content_type("text/html")
            .body("<html>maintenance</html>"),
        _ => HttpResponse::NotFound().json(json!({ "success": false, "message": "Route not found" })),
    }
}

fn login(body: &Value) -> HttpResponse {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let token = match (username, password) {
        ("superadmin", "Admin@123") => SUPER_ADMIN_TOKEN,
        ("teacher", "Teach@123") => TEACHER_TOKEN,
        ("bursar", "Fees@123") => BURSAR_TOKEN,
        ("tokenless", _) => {
            return HttpResponse::Ok().json(json!({
                "success": true,
                "data": user_json(TEACHER_TOKEN)
            }));
        }
        _ => {
            return HttpResponse::Unauthorized()
                .json(json!({ "success": false, "message": "Invalid credentials" }));
        }
    };

    HttpResponse::Ok().json(json!({
        "success": true,
        "token": token,
        "data": user_json(token)
    }))
}

/// Records whether the session was still authenticated at each redirect.
pub struct RecordingNavigator {
    session: SessionStore,
    redirects: Mutex<Vec<bool>>,
}

impl RecordingNavigator {
    pub fn new(session: SessionStore) -> Arc<Self> {
        Arc::new(Self {
            session,
            redirects: Mutex::new(Vec::new()),
        })
    }

    pub fn redirects(&self) -> Vec<bool> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        let authenticated = self.session.is_authenticated();
        self.redirects.lock().unwrap().push(authenticated);
    }
}
