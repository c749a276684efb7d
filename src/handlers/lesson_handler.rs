use actix_web::{get, post, put, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        FollowUpRequest, GenerateLessonRequest, HistoryResponse, MessageResponse,
        SubmitProfileRequest,
    },
    services::TutorService,
};

#[put("/api/sessions/{id}/profile")]
pub async fn submit_profile(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SubmitProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let session = state.sessions.get(&id).await?;
    let mut session_state = session.state.lock().await;
    TutorService::submit_profile(&mut session_state, &request.personal_info)?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Great! Thanks for sharing. Let's start learning!",
    )))
}

#[post("/api/sessions/{id}/lesson")]
pub async fn generate_lesson(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<GenerateLessonRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let session = state.sessions.get(&id).await?;
    let mut session_state = session.state.lock().await;
    let lesson =
        TutorService::generate_lesson(session.client.as_ref(), &mut session_state, &request.topic)
            .await?;

    Ok(HttpResponse::Ok().json(lesson))
}

#[post("/api/sessions/{id}/follow-up")]
pub async fn answer_follow_up(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<FollowUpRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let session = state.sessions.get(&id).await?;
    let mut session_state = session.state.lock().await;
    let response = TutorService::answer_follow_up(
        session.client.as_ref(),
        &mut session_state,
        &request.question,
    )
    .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/sessions/{id}/history")]
pub async fn get_history(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.sessions.get(&id).await?;
    let session_state = session.state.lock().await;
    Ok(HttpResponse::Ok().json(HistoryResponse::from(&*session_state)))
}
