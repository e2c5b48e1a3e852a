//! Request handlers.

use super::{ApiError, AppState, SHELL_ROUTES, views};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use growth_core::directory::{UserDirectory, UserDraft};
use growth_core::pdi::{GoalBoard, GoalDraft};
use growth_core::team::TeamSummary;
use growth_core::{CompetencyId, DashboardSummary, Score, Session, TalentGrid};
use serde::Deserialize;
use serde_json::{Value, json};

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

// =============================================================================
// SHELL PAGES
// =============================================================================

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

fn summary(state: &AppState, session: &Session) -> DashboardSummary {
    let records = state.records.as_ref();
    DashboardSummary::build(session, &records.team(), records.deadline(), today())
}

/// Seeded dashboard for a session nobody has touched yet.
pub async fn dashboard(State(state): State<AppState>) -> Json<Value> {
    let team = state.records.team();
    let grid = TalentGrid::classify(&state.records.individuals());
    let fresh = Session::from_source(state.records.as_ref());
    Json(json!({
        "cycle": state.records.cycle(),
        "routes": SHELL_ROUTES,
        "summary": summary(&state, &fresh),
        "team": TeamSummary::from_members(&team),
        "grid": grid.summary(),
    }))
}

pub async fn evaluation_page(State(state): State<AppState>) -> Json<Value> {
    Json(views::catalog(&state.records.catalog()))
}

pub async fn pdi_page(State(state): State<AppState>) -> Json<Value> {
    Json(views::goals(&state.records.goals(), today()))
}

pub async fn team_page(State(state): State<AppState>) -> Json<Value> {
    Json(views::team(&state.records.team()))
}

pub async fn analytics_page(State(state): State<AppState>) -> Json<Value> {
    Json(views::grid(&state.records.individuals()))
}

pub async fn feedback_page(State(state): State<AppState>) -> Json<Value> {
    Json(views::feedback(&state.records.feedback()))
}

pub async fn settings_page(State(state): State<AppState>) -> Json<Value> {
    let directory = UserDirectory::new(state.records.users());
    Json(views::directory(&directory))
}

// =============================================================================
// SESSIONS
// =============================================================================

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let session = Session::from_source(state.records.as_ref());
    let payload = views::wizard(&session.wizard);
    let id = state.sessions.lock().await.create(session);
    tracing::info!(session = id, "session created");
    (
        StatusCode::CREATED,
        Json(json!({ "session": id, "evaluation": payload })),
    )
}

pub async fn session_dashboard(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    Ok(Json(json!({ "summary": summary(&state, session) })))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.sessions.lock().await.remove(id)?;
    tracing::info!(session = id, "session closed");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// EVALUATION WIZARD
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RatingBody {
    pub score: i64,
}

#[derive(Debug, Deserialize)]
pub struct JustificationBody {
    #[serde(default)]
    pub text: String,
}

pub async fn evaluation_state(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    Ok(Json(views::wizard(&session.wizard)))
}

pub async fn evaluation_stage(
    State(state): State<AppState>,
    Path((id, index)): Path<(u64, usize)>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    // Out-of-range indices yield a null stage and no issues.
    Ok(Json(json!({
        "stage": session.wizard.stage_view(index),
        "issues": session.wizard.stage_issues(index),
    })))
}

pub async fn set_rating(
    State(state): State<AppState>,
    Path((id, competency)): Path<(u64, String)>,
    Json(body): Json<RatingBody>,
) -> Result<Json<Value>, ApiError> {
    let competency = CompetencyId::new(competency);
    let score = Score::new(body.score);
    let mut sessions = state.sessions.lock().await;
    let wizard = &mut sessions.get_mut(id)?.wizard;
    wizard.set_rating(&competency, score)?;
    tracing::debug!(session = id, %competency, %score, "rating set");
    Ok(Json(json!({
        "competency": competency,
        "score": score,
        "justification_required": wizard.needs_justification(&competency),
    })))
}

pub async fn set_justification(
    State(state): State<AppState>,
    Path((id, competency)): Path<(u64, String)>,
    Json(body): Json<JustificationBody>,
) -> Result<Json<Value>, ApiError> {
    let competency = CompetencyId::new(competency);
    let mut sessions = state.sessions.lock().await;
    let wizard = &mut sessions.get_mut(id)?.wizard;
    wizard.set_justification(&competency, body.text)?;
    Ok(Json(json!({
        "competency": competency,
        "rating": wizard.rating(&competency),
    })))
}

pub async fn next_stage(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let wizard = &mut sessions.get_mut(id)?.wizard;
    let change = if state.config.gate_next {
        wizard.try_advance()?
    } else {
        wizard.advance()
    };
    Ok(Json(json!({ "change": change, "evaluation": views::wizard(wizard) })))
}

pub async fn previous_stage(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let wizard = &mut sessions.get_mut(id)?.wizard;
    let change = wizard.retreat();
    Ok(Json(json!({ "change": change, "evaluation": views::wizard(wizard) })))
}

pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let wizard = &mut sessions.get_mut(id)?.wizard;
    let mut sink = state.sink.lock().await;
    let receipt = wizard.submit(&mut **sink)?;
    tracing::info!(session = id, receipt = receipt.id, cycle = %wizard.cycle(), "evaluation submitted");
    Ok(Json(json!({ "receipt": receipt, "evaluation": views::wizard(wizard) })))
}

// =============================================================================
// DEVELOPMENT GOALS
// =============================================================================

fn goal_payload(board: &GoalBoard) -> Value {
    views::goals(board.goals(), today())
}

pub async fn list_goals(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    Ok(Json(goal_payload(&session.goals)))
}

pub async fn add_goal(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(draft): Json<GoalDraft>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    let goal = session.goals.add_goal(draft)?;
    tracing::info!(session = id, goal = goal.id, "goal added");
    let mut shown = goal.clone();
    shown.status = goal.display_status(today());
    Ok((StatusCode::CREATED, Json(json!({ "goal": shown }))))
}

// =============================================================================
// USER DIRECTORY
// =============================================================================

pub async fn list_users(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    Ok(Json(views::directory(&session.directory)))
}

pub async fn add_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(draft): Json<UserDraft>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    let user = session.directory.add(draft)?;
    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(u64, u64)>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    let user = session.directory.update(user_id, draft)?;
    Ok(Json(json!({ "user": user })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(u64, u64)>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    let user = session.directory.remove(user_id)?;
    Ok(Json(json!({ "removed": user })))
}

// =============================================================================
// FEEDBACK
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AcknowledgeBody {
    pub acknowledged: bool,
}

pub async fn session_feedback(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    Ok(Json(views::feedback(&session.feedback)))
}

pub async fn acknowledge_feedback(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<AcknowledgeBody>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    session.feedback.acknowledge(body.acknowledged);
    Ok(Json(views::feedback(&session.feedback)))
}

pub async fn sign_feedback(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id)?;
    let signed_on = session.feedback.sign(today())?;
    tracing::info!(session = id, %signed_on, "feedback signed");
    Ok(Json(views::feedback(&session.feedback)))
}
