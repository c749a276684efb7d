use actix_web::{get, post, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{GenerateQuizRequest, SubmitAnswerRequest},
    services::QuizService,
};

#[post("/api/sessions/{id}/quiz")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let session = state.sessions.get(&id).await?;
    let mut session_state = session.state.lock().await;
    let view = QuizService::generate_quiz(
        session.client.as_ref(),
        &mut session_state,
        request.difficulty,
        request.num_questions,
    )
    .await?;

    Ok(HttpResponse::Created().json(view))
}

#[get("/api/sessions/{id}/quiz")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.sessions.get(&id).await?;
    let session_state = session.state.lock().await;
    let view = QuizService::quiz_view(&session_state)?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/sessions/{id}/quiz/answer")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let session = state.sessions.get(&id).await?;
    let mut session_state = session.state.lock().await;
    let feedback = QuizService::submit_answer(&mut session_state, &request.answer)?;
    Ok(HttpResponse::Ok().json(feedback))
}

#[post("/api/sessions/{id}/quiz/restart")]
pub async fn restart_quiz(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.sessions.get(&id).await?;
    let mut session_state = session.state.lock().await;
    let view = QuizService::restart(&mut session_state)?;
    Ok(HttpResponse::Ok().json(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    use crate::app_state::AppState;
    use crate::models::domain::LearnerProfile;
    use crate::models::dto::CreateSessionRequest;
    use crate::test_utils::fixtures::scripted_app_state;

    fn quiz_payload(num_questions: usize) -> String {
        let questions: Vec<serde_json::Value> = (1..=num_questions)
            .map(|n| {
                serde_json::json!({
                    "question": format!("Question {}", n),
                    "options": ["3", "4", "5", "6"],
                    "correct_answer": 1,
                })
            })
            .collect();
        format!(
            "```json\n{}\n```",
            serde_json::to_string(&questions).expect("payload should serialize")
        )
    }

    /// Create a session and walk its state to "lesson ready" directly.
    async fn session_with_lesson(state: &AppState) -> Uuid {
        let created = state
            .sessions
            .create_session(CreateSessionRequest {
                api_key: "sk-test".to_string(),
                model: None,
            })
            .await;
        let handle = state
            .sessions
            .get(&created.session_id)
            .await
            .expect("created session should be retrievable");
        let mut session_state = handle.state.lock().await;
        session_state.profile = Some(LearnerProfile {
            personal_info: "I coach youth soccer".to_string(),
        });
        session_state.topic = Some("Gravity".to_string());
        session_state.content = Some("Gravity pulls the ball down.".to_string());
        created.session_id
    }

    #[actix_web::test]
    async fn test_generate_quiz_hides_the_correct_index() {
        let state = scripted_app_state(vec![Ok(quiz_payload(3))]);
        let session_id = session_with_lesson(&state).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/quiz", session_id))
            .set_json(serde_json::json!({ "difficulty": "easy", "num_questions": 3 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = test::read_body(resp).await;
        let text = std::str::from_utf8(&body).expect("body should be utf-8");
        assert!(text.contains("\"status\":\"in_progress\""));
        assert!(text.contains("\"total_questions\":3"));
        assert!(!text.contains("correct_answer"));
    }

    #[actix_web::test]
    async fn test_generate_quiz_without_lesson_conflicts() {
        let state = scripted_app_state(vec![Ok(quiz_payload(3))]);
        let created = state
            .sessions
            .create_session(CreateSessionRequest {
                api_key: "sk-test".to_string(),
                model: None,
            })
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/quiz", created.session_id))
            .set_json(serde_json::json!({}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_generate_quiz_rejects_out_of_range_count() {
        let state = scripted_app_state(vec![]);
        let session_id = session_with_lesson(&state).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/quiz", session_id))
            .set_json(serde_json::json!({ "num_questions": 2 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_malformed_model_reply_is_bad_gateway_and_stores_nothing() {
        let state = scripted_app_state(vec![Ok("Sure! Here are your questions.".to_string())]);
        let session_id = session_with_lesson(&state).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_quiz)
                .service(get_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/quiz", session_id))
            .set_json(serde_json::json!({ "num_questions": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "MALFORMED_JSON");

        // No partial quiz was left behind.
        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}/quiz", session_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_answer_round_trip_scores_by_option_text() {
        let state = scripted_app_state(vec![Ok(quiz_payload(3))]);
        let session_id = session_with_lesson(&state).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_quiz)
                .service(submit_answer)
                .service(get_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/quiz", session_id))
            .set_json(serde_json::json!({ "num_questions": 3 }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );

        // "4" is the correct option in every scripted question, whatever
        // position the shuffle put it in.
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/quiz/answer", session_id))
            .set_json(serde_json::json!({ "answer": "4" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["correct"], true);
        assert_eq!(body["score"], 1);
        assert!(body.get("correct_answer").is_none());

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/quiz/answer", session_id))
            .set_json(serde_json::json!({ "answer": "6" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["correct"], false);
        assert_eq!(body["correct_answer"], "4");

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/quiz/answer", session_id))
            .set_json(serde_json::json!({ "answer": "4" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["quiz_completed"], true);

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}/quiz", session_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "completed");
        assert_eq!(body["score"], 2);
        let wrong = body["wrong_answers"]
            .as_array()
            .expect("review list should be present");
        assert_eq!(wrong.len(), 1);
        assert_eq!(wrong[0]["question"], "Question 2");
    }

    #[actix_web::test]
    async fn test_restart_resets_progress() {
        let state = scripted_app_state(vec![Ok(quiz_payload(3))]);
        let session_id = session_with_lesson(&state).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_quiz)
                .service(submit_answer)
                .service(restart_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/quiz", session_id))
            .set_json(serde_json::json!({ "num_questions": 3 }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/quiz/answer", session_id))
            .set_json(serde_json::json!({ "answer": "4" }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/quiz/restart", session_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "in_progress");
        assert_eq!(body["question_number"], 1);
        assert_eq!(body["score"], 0);
    }

    #[actix_web::test]
    async fn test_quiz_view_without_quiz_conflicts() {
        let state = scripted_app_state(vec![]);
        let session_id = session_with_lesson(&state).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(get_quiz),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}/quiz", session_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "INVALID_STATE");
    }
}
