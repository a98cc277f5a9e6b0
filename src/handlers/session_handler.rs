use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        GenerateQuizRequest, ImageQuizRequest, ProgressSnapshot, QuizView, ResultsView,
        SessionCreatedResponse, SubmitAnswersRequest,
    },
};

#[post("/api/sessions")]
async fn create_session(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let session_id = state.sessions.create()?;
    Ok(HttpResponse::Created().json(SessionCreatedResponse { session_id }))
}

#[actix_web::delete("/api/sessions/{id}")]
async fn delete_session(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.sessions.remove(&id)?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/sessions/{id}/progress")]
async fn get_progress(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.sessions.get(&id)?;
    let session = session.lock().await;
    Ok(HttpResponse::Ok().json(ProgressSnapshot::from(&session.progress)))
}

#[post("/api/sessions/{id}/quizzes")]
async fn generate_quiz(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let session = state.sessions.get(&id)?;
    let mut session = session.lock().await;

    state
        .quiz_flow
        .generate_topic_quiz(&mut session, &request)
        .await?;

    let quiz = session
        .active_quiz()
        .ok_or_else(|| AppError::InternalError("generation succeeded without a quiz".into()))?;
    Ok(HttpResponse::Created().json(QuizView::from_active(
        quiz,
        state.config.seconds_per_question,
    )))
}

#[post("/api/sessions/{id}/quizzes/image")]
async fn generate_image_quiz(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
    request: web::Json<ImageQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let session = state.sessions.get(&id)?;
    let mut session = session.lock().await;

    state
        .quiz_flow
        .generate_image_quiz(&mut session, &request)
        .await?;

    let quiz = session
        .active_quiz()
        .ok_or_else(|| AppError::InternalError("generation succeeded without a quiz".into()))?;
    Ok(HttpResponse::Created().json(QuizView::from_active(
        quiz,
        state.config.seconds_per_question,
    )))
}

#[get("/api/sessions/{id}/quiz")]
async fn current_quiz(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.sessions.get(&id)?;
    let session = session.lock().await;

    let quiz = session
        .active_quiz()
        .ok_or_else(|| AppError::NotFound("no active quiz for this session".to_string()))?;
    Ok(HttpResponse::Ok().json(QuizView::from_active(
        quiz,
        state.config.seconds_per_question,
    )))
}

#[post("/api/sessions/{id}/answers")]
async fn submit_answers(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
    request: web::Json<SubmitAnswersRequest>,
) -> Result<HttpResponse, AppError> {
    let answers = request.parsed_answers()?;

    let session = state.sessions.get(&id)?;
    let mut session = session.lock().await;
    session.submit_answers(&answers)?;

    let attempt = session
        .last_attempt()
        .ok_or_else(|| AppError::InternalError("grading succeeded without an attempt".into()))?;
    let quiz = session
        .active_quiz()
        .ok_or_else(|| AppError::InternalError("grading succeeded without a quiz".into()))?;
    let results = ResultsView::build(attempt, quiz, session.newly_unlocked(), &session.progress);
    Ok(HttpResponse::Ok().json(results))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
