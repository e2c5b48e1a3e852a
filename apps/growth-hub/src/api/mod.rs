//! # HTTP API
//!
//! JSON rendering of the hub's pages plus a session-scoped API for the
//! stateful ones.
//!
//! ```text
//! GET  /                 dashboard summary + route table
//! GET  /evaluation       competency catalog
//! GET  /pdi              seeded development goals
//! GET  /team             team table + summary
//! GET  /analytics        9-box grid + summary
//! GET  /feedback         seeded feedback sheet
//! GET  /settings         user directory
//! GET  /health
//!
//! POST   /api/sessions
//! DELETE /api/sessions/{id}
//! GET    /api/sessions/{id}/dashboard
//! GET    /api/sessions/{id}/evaluation
//! GET    /api/sessions/{id}/evaluation/stages/{index}
//! PUT    /api/sessions/{id}/evaluation/ratings/{competency}
//! PUT    /api/sessions/{id}/evaluation/justifications/{competency}
//! POST   /api/sessions/{id}/evaluation/{next|previous|submit}
//! GET    /api/sessions/{id}/goals            POST same path to add
//! GET    /api/sessions/{id}/users            POST same path to add
//! PUT    /api/sessions/{id}/users/{user}     DELETE same path to remove
//! GET    /api/sessions/{id}/feedback
//! POST   /api/sessions/{id}/feedback/{acknowledge|sign}
//! ```

mod handlers;
pub mod views;

use crate::config::HubConfig;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;
use growth_core::{
    EvaluationSink, GrowthError, ReceiptSink, RecordSource, Session, ValidationError,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// ROUTE TABLE
// =============================================================================

/// One addressable page of the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShellRoute {
    pub path: &'static str,
    pub title: &'static str,
}

/// Pages the shell must keep addressable.
pub const SHELL_ROUTES: [ShellRoute; 7] = [
    ShellRoute { path: "/", title: "Dashboard" },
    ShellRoute { path: "/evaluation", title: "Performance Evaluation" },
    ShellRoute { path: "/pdi", title: "Personal Development Plan" },
    ShellRoute { path: "/team", title: "Team Overview" },
    ShellRoute { path: "/analytics", title: "9-Box Talent Matrix" },
    ShellRoute { path: "/feedback", title: "Performance Feedback" },
    ShellRoute { path: "/settings", title: "Settings" },
];

// =============================================================================
// STATE
// =============================================================================

/// In-memory sessions keyed by a monotonic id.
///
/// Holds at most `capacity` sessions. Ids only grow, so the smallest live id
/// is always the oldest session and the first one evicted.
#[derive(Debug)]
pub struct SessionStore {
    sessions: BTreeMap<u64, Session>,
    next_id: u64,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(crate::config::DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: BTreeMap::new(),
            next_id: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn create(&mut self, session: Session) -> u64 {
        while self.sessions.len() >= self.capacity {
            if let Some((evicted, _)) = self.sessions.pop_first() {
                tracing::info!(session = evicted, capacity = self.capacity, "session evicted");
            }
        }
        self.next_id += 1;
        self.sessions.insert(self.next_id, session);
        self.next_id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get_mut(&mut self, id: u64) -> Result<&mut Session, ApiError> {
        self.sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))
    }

    pub fn remove(&mut self, id: u64) -> Result<Session, ApiError> {
        self.sessions.remove(&id).ok_or(ApiError::SessionNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Boxed sink shared by every request.
pub type SharedSink = Arc<Mutex<Box<dyn EvaluationSink + Send>>>;

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<HubConfig>,
    pub records: Arc<dyn RecordSource + Send + Sync>,
    pub sessions: Arc<Mutex<SessionStore>>,
    /// Receives submitted evaluations; lock after `sessions` when both are needed.
    pub sink: SharedSink,
}

impl AppState {
    /// State with a [`ReceiptSink`], which issues receipts and keeps nothing.
    pub fn new(config: HubConfig, records: Box<dyn RecordSource + Send + Sync>) -> Self {
        Self::with_sink(config, records, Box::new(ReceiptSink::new()))
    }

    pub fn with_sink(
        config: HubConfig,
        records: Box<dyn RecordSource + Send + Sync>,
        sink: Box<dyn EvaluationSink + Send>,
    ) -> Self {
        let sessions = SessionStore::with_capacity(config.max_sessions);
        Self {
            config: Arc::new(config),
            records: Arc::from(records),
            sessions: Arc::new(Mutex::new(sessions)),
            sink: Arc::new(Mutex::new(sink)),
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] GrowthError),
    #[error("session {0} not found")]
    SessionNotFound(u64),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Core(GrowthError::Validation(err))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::Core(err) => match err {
                GrowthError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                GrowthError::Persistence(_) => StatusCode::BAD_GATEWAY,
                GrowthError::UnknownCompetency(_) | GrowthError::UnknownUser(_) => {
                    StatusCode::NOT_FOUND
                }
                GrowthError::AlreadySubmitted
                | GrowthError::IllegalTransition { .. }
                | GrowthError::FeedbackNotAcknowledged => StatusCode::CONFLICT,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::SessionNotFound(_) => json!({ "error": self.to_string() }),
            Self::Core(GrowthError::Validation(validation)) => json!({
                "error": validation.to_string(),
                "issues": validation.issues,
            }),
            Self::Core(GrowthError::Persistence(sink)) => json!({
                "error": self.to_string(),
                "detail": sink.message,
            }),
            Self::Core(err) => json!({ "error": err.to_string() }),
        };
        if status.is_server_error() {
            tracing::error!(%status, body = %body, "request failed");
        } else {
            tracing::warn!(%status, body = %body, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/evaluation", get(handlers::evaluation_page))
        .route("/pdi", get(handlers::pdi_page))
        .route("/team", get(handlers::team_page))
        .route("/analytics", get(handlers::analytics_page))
        .route("/feedback", get(handlers::feedback_page))
        .route("/settings", get(handlers::settings_page))
        .route("/health", get(handlers::health))
        .route("/api/sessions", post(handlers::create_session))
        .route("/api/sessions/{id}", axum::routing::delete(handlers::delete_session))
        .route("/api/sessions/{id}/dashboard", get(handlers::session_dashboard))
        .route("/api/sessions/{id}/evaluation", get(handlers::evaluation_state))
        .route(
            "/api/sessions/{id}/evaluation/stages/{index}",
            get(handlers::evaluation_stage),
        )
        .route(
            "/api/sessions/{id}/evaluation/ratings/{competency}",
            put(handlers::set_rating),
        )
        .route(
            "/api/sessions/{id}/evaluation/justifications/{competency}",
            put(handlers::set_justification),
        )
        .route("/api/sessions/{id}/evaluation/next", post(handlers::next_stage))
        .route(
            "/api/sessions/{id}/evaluation/previous",
            post(handlers::previous_stage),
        )
        .route("/api/sessions/{id}/evaluation/submit", post(handlers::submit))
        .route(
            "/api/sessions/{id}/goals",
            get(handlers::list_goals).post(handlers::add_goal),
        )
        .route(
            "/api/sessions/{id}/users",
            get(handlers::list_users).post(handlers::add_user),
        )
        .route(
            "/api/sessions/{id}/users/{user}",
            put(handlers::update_user).delete(handlers::delete_user),
        )
        .route("/api/sessions/{id}/feedback", get(handlers::session_feedback))
        .route(
            "/api/sessions/{id}/feedback/acknowledge",
            post(handlers::acknowledge_feedback),
        )
        .route("/api/sessions/{id}/feedback/sign", post(handlers::sign_feedback))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use growth_core::sink::SinkError;

    #[test]
    fn error_status_mapping() {
        let validation = ApiError::from(ValidationError::new(Vec::new()));
        assert_eq!(validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let persistence = ApiError::from(GrowthError::Persistence(SinkError::new("down")));
        assert_eq!(persistence.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ApiError::SessionNotFound(3).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(GrowthError::AlreadySubmitted).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn session_store_assigns_increasing_ids() {
        let mut store = SessionStore::default();
        let a = store.create(Session::default());
        let b = store.create(Session::default());
        assert!(b > a);
        assert_eq!(store.len(), 2);
        assert!(store.remove(a).is_ok());
        assert!(matches!(store.get_mut(a), Err(ApiError::SessionNotFound(_))));
    }

    #[test]
    fn session_store_evicts_oldest_at_capacity() {
        let mut store = SessionStore::with_capacity(2);
        let a = store.create(Session::default());
        let b = store.create(Session::default());
        let c = store.create(Session::default());
        assert_eq!(store.len(), 2);
        assert!(matches!(store.get_mut(a), Err(ApiError::SessionNotFound(_))));
        assert!(store.get_mut(b).is_ok());
        assert!(store.get_mut(c).is_ok());

        // Removing frees a slot without evicting anyone.
        assert!(store.remove(b).is_ok());
        let d = store.create(Session::default());
        assert!(store.get_mut(c).is_ok());
        assert!(store.get_mut(d).is_ok());
    }

    #[test]
    fn zero_capacity_still_keeps_the_newest() {
        let mut store = SessionStore::with_capacity(0);
        assert_eq!(store.capacity(), 1);
        let a = store.create(Session::default());
        let b = store.create(Session::default());
        assert_eq!(store.len(), 1);
        assert!(store.get_mut(a).is_err());
        assert!(store.get_mut(b).is_ok());
    }

    #[test]
    fn persistence_error_carries_sink_message() {
        let err = ApiError::from(GrowthError::Persistence(SinkError::new("storage offline")));
        assert_eq!(err.to_string(), "persistence failed: storage offline");
    }

    #[test]
    fn shell_routes_are_unique() {
        let mut paths: Vec<&str> = SHELL_ROUTES.iter().map(|r| r.path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), SHELL_ROUTES.len());
    }
}
