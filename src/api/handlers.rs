//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    CopyMessageResponse, DeitiesResponse, DeityQuery, ErrorResponse, MalaIntentResponse,
    MalaResponse, NavBlurRequest, NavFocusRequest, NavResponse, SessionResponse, SubmitRequest,
    SubmitResponse, SuccessResponse, SuggestionsResponse,
};
use super::AppState;
use crate::catalog;
use crate::mala::{self, Effect, Intent, MalaConfig, MalaState};
use crate::runtime::SessionHandle;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Guidance sessions
        .route("/api/guidance/sessions", post(create_session))
        .route(
            "/api/guidance/sessions/:id",
            get(get_session).delete(end_session),
        )
        .route("/api/guidance/sessions/:id/submit", post(submit_query))
        .route("/api/guidance/sessions/:id/stream", get(stream_session))
        .route(
            "/api/guidance/sessions/:id/messages/:message_id",
            get(copy_message),
        )
        .route("/api/guidance/suggestions", get(list_suggestions))
        // Mala counters
        .route("/api/mala", post(create_mala))
        .route("/api/mala/:id", get(get_mala).delete(end_mala))
        .route("/api/mala/:id/intent", post(dispatch_intent))
        // Bottom navigation
        .route("/api/nav", get(get_nav))
        .route("/api/nav/focus", post(focus_screen))
        .route("/api/nav/blur", post(blur_screen))
        // Home screen
        .route("/api/deities", get(search_deities))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Guidance Sessions
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let handle = state.sessions.create().await;
    Json(SessionResponse {
        session_id: handle.id.clone(),
        snapshot: handle.snapshot(),
    })
}

async fn session(state: &AppState, id: &str) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session not found: {id}")))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let handle = session(&state, &id).await?;
    Ok(Json(SessionResponse {
        session_id: id,
        snapshot: handle.snapshot(),
    }))
}

async fn submit_query(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let handle = session(&state, &id).await?;
    let queued = handle.submit(req.text).await;
    Ok(Json(SubmitResponse { queued }))
}

async fn stream_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let handle = session(&state, &id).await?;

    // Subscribe before reading the snapshot so nothing falls in between
    let broadcast_rx = handle.subscribe();
    let snapshot = handle.snapshot();

    Ok(sse_stream(id, snapshot, broadcast_rx))
}

async fn copy_message(
    State(state): State<AppState>,
    Path((id, message_id)): Path<(String, String)>,
) -> Result<Json<CopyMessageResponse>, AppError> {
    let handle = session(&state, &id).await?;
    let text = handle
        .copy_message(&message_id)
        .ok_or_else(|| AppError::NotFound(format!("Message not found: {message_id}")))?;
    Ok(Json(CopyMessageResponse { text }))
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.sessions.end(&id).await {
        return Err(AppError::NotFound(format!("Session not found: {id}")));
    }
    Ok(Json(SuccessResponse { success: true }))
}

async fn list_suggestions() -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: catalog::SUGGESTIONS,
    })
}

// ============================================================
// Mala Counters
// ============================================================

async fn create_mala(
    State(state): State<AppState>,
    config: Option<Json<MalaConfig>>,
) -> Json<MalaResponse> {
    let mut config = config.map(|Json(c)| c).unwrap_or_default();
    if config.beads_per_round.is_none() {
        config.beads_per_round = Some(i64::from(state.beads_per_round));
    }

    let counter = MalaState::initialize(&config);
    let view = counter.view();
    let id = uuid::Uuid::new_v4().to_string();
    state.malas.write().await.insert(id.clone(), counter);

    tracing::info!(mala_id = %id, name = %view.selected_name, beads_per_round = view.beads_per_round, "Mala started");

    Json(MalaResponse { mala_id: id, view })
}

async fn get_mala(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MalaResponse>, AppError> {
    let malas = state.malas.read().await;
    let counter = malas
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Mala not found: {id}")))?;
    Ok(Json(MalaResponse {
        view: counter.view(),
        mala_id: id,
    }))
}

async fn dispatch_intent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(intent): Json<Intent>,
) -> Result<Json<MalaIntentResponse>, AppError> {
    let mut malas = state.malas.write().await;
    let counter = malas
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Mala not found: {id}")))?;

    let result = mala::transition(counter, intent);
    *counter = result.new_state;

    for effect in &result.effects {
        if let Effect::RoundCompleted {
            total_count,
            rounds_completed,
        } = effect
        {
            tracing::info!(
                mala_id = %id,
                name = %counter.selected_name,
                total_count,
                rounds_completed,
                "Completed mala"
            );
        }
    }

    Ok(Json(MalaIntentResponse {
        view: counter.view(),
        mala_id: id,
        round_just_completed: result.round_just_completed,
        notifications: result.effects,
    }))
}

/// Counter screen unmounted; the counter is discarded
async fn end_mala(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Some(counter) = state.malas.write().await.remove(&id) else {
        return Err(AppError::NotFound(format!("Mala not found: {id}")));
    };
    tracing::info!(mala_id = %id, total_count = counter.count, "Mala discarded");
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Bottom Navigation
// ============================================================

async fn get_nav(State(state): State<AppState>) -> Json<NavResponse> {
    Json(NavResponse {
        visible: state.nav.visible(),
    })
}

async fn focus_screen(
    State(state): State<AppState>,
    Json(req): Json<NavFocusRequest>,
) -> Json<NavResponse> {
    state.nav.focus(&req.screen, req.options);
    Json(NavResponse {
        visible: state.nav.visible(),
    })
}

async fn blur_screen(
    State(state): State<AppState>,
    Json(req): Json<NavBlurRequest>,
) -> Json<NavResponse> {
    state.nav.blur(&req.screen);
    Json(NavResponse {
        visible: state.nav.visible(),
    })
}

// ============================================================
// Deities
// ============================================================

async fn search_deities(Query(query): Query<DeityQuery>) -> Json<DeitiesResponse> {
    let deities = catalog::search(&query.q);
    Json(DeitiesResponse {
        featured: catalog::featured(&deities).copied(),
        deities,
    })
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("mandir ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(ErrorResponse::new(self.to_string()));
        (status, body).into_response()
    }
}
