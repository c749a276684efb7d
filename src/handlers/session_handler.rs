use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{CreateSessionRequest, MessageResponse, SessionOverviewResponse},
};

#[post("/api/sessions")]
pub async fn create_session(
    state: web::Data<AppState>,
    request: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state.sessions.create_session(request).await;
    Ok(HttpResponse::Created().json(response))
}

#[get("/api/sessions/{id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.sessions.get(&id).await?;
    let session_state = session.state.lock().await;
    let overview = SessionOverviewResponse::new(session.id, &session.model, &session_state);
    Ok(HttpResponse::Ok().json(overview))
}

/// The "Start Over" button: keep the session and its credential, wipe
/// everything learned so far.
#[post("/api/sessions/{id}/reset")]
pub async fn reset_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.sessions.reset(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Session reset. Share a new profile to start over.",
    )))
}

#[delete("/api/sessions/{id}")]
pub async fn delete_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.sessions.remove(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Session ended.")))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
