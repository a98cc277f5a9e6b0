use std::sync::Arc;

use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};

use quizspark_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    handlers,
    services::model_service::QuizGenerator,
};

/// Generator double that replays one canned result for every call, standing
/// in for the real model client.
struct CannedGenerator {
    response: AppResult<String>,
}

#[async_trait]
impl QuizGenerator for CannedGenerator {
    async fn generate_topic_quiz(&self, _prompt: &str) -> AppResult<String> {
        self.response.clone()
    }

    async fn generate_image_quiz(
        &self,
        _prompt: &str,
        _image_base64: &str,
        _mime_type: &str,
    ) -> AppResult<String> {
        self.response.clone()
    }
}

fn state_with(response: AppResult<String>) -> Arc<AppState> {
    let generator = Arc::new(CannedGenerator { response });
    Arc::new(AppState::with_generator(Config::test_config(), generator))
}

/// A quiz document in the exact template the generator is prompted to emit.
fn sample_quiz_markdown(question_count: usize) -> String {
    let mut text = String::from("## 📝 Your Medium Quiz on Science!\n");
    for i in 1..=question_count {
        text.push_str(&format!(
            "\n### Question {i} 🔢\n\
             **What should every curious student know about topic {i}?**\n\n\
             - A) A plausible distractor for topic {i}\n\
             - B) The correct answer for topic {i}\n\
             - C) Another distractor for topic {i}\n\
             - D) A final distractor for topic {i}\n\n\
             ✅ **Correct Answer: B**\n\n\
             > 💡 **Explanation:** Because topic {i} works exactly this way.\n\n\
             ---\n"
        ));
    }
    text.push_str(
        "\n## 🎊 Quiz Complete!\n\n\
         **Great job working through this quiz!** Keep learning and growing! 🌟\n",
    );
    text
}

macro_rules! spawn_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .service(handlers::health_check)
                .service(handlers::create_session)
                .service(handlers::delete_session)
                .service(handlers::get_progress)
                .service(handlers::generate_quiz)
                .service(handlers::generate_image_quiz)
                .service(handlers::current_quiz)
                .service(handlers::submit_answers),
        )
        .await
    };
}

macro_rules! create_session {
    ($app:expr) => {{
        let resp = test::call_service(
            &$app,
            test::TestRequest::post().uri("/api/sessions").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        body["session_id"]
            .as_str()
            .expect("session id should be a string")
            .to_string()
    }};
}

#[actix_web::test]
async fn full_quiz_round_trip_updates_progress_and_awards_badges() {
    let state = state_with(Ok(sample_quiz_markdown(5)));
    let app = spawn_app!(state);

    let session_id = create_session!(app);

    // Generate a quiz.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/quizzes"))
            .set_json(json!({ "topic": "dinosaurs" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let quiz: Value = test::read_body_json(resp).await;
    assert_eq!(quiz["topic"], "dinosaurs");
    assert_eq!(quiz["questions"].as_array().map(Vec::len), Some(5));
    let markdown = quiz["questions_markdown"]
        .as_str()
        .expect("markdown should be present");
    assert!(!markdown.contains("Correct Answer"));
    assert!(!markdown.contains("Explanation"));

    // The quiz is retrievable while answering.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/sessions/{session_id}/quiz"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // Submit a perfect set of answers.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/answers"))
            .set_json(json!({ "answers": ["B", "B", "B", "B", "B"] }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let results: Value = test::read_body_json(resp).await;
    assert_eq!(results["correct_count"], 5);
    assert_eq!(results["base_score"], 50);
    assert_eq!(results["time_bonus"], 0);
    assert_eq!(results["total_score"], 50);
    assert_eq!(results["perfect"], true);
    assert_eq!(results["questions"].as_array().map(Vec::len), Some(5));

    let unlocked: Vec<&str> = results["newly_unlocked"]
        .as_array()
        .expect("badges array")
        .iter()
        .filter_map(|badge| badge["id"].as_str())
        .collect();
    assert!(unlocked.contains(&"first_quiz"));
    assert!(unlocked.contains(&"points_50"));
    assert!(unlocked.contains(&"perfect_score"));

    // 50 XP crosses the first level threshold.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/sessions/{session_id}/progress"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let progress: Value = test::read_body_json(resp).await;
    assert_eq!(progress["total_score"], 50);
    assert_eq!(progress["level"], 2);
    assert_eq!(progress["quizzes_completed"], 1);
    assert_eq!(progress["perfect_scores"], 1);
}

#[actix_web::test]
async fn a_generation_without_answer_markers_is_rejected_as_malformed() {
    let broken = sample_quiz_markdown(5).replace("✅ **Correct Answer: B**\n\n", "");
    let state = state_with(Ok(broken));
    let app = spawn_app!(state);

    let session_id = create_session!(app);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/quizzes"))
            .set_json(json!({ "topic": "volcanoes" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 422);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "MALFORMED_GENERATION");
    assert_eq!(body["retryable"], true);

    // The session is back to collecting input, so a retry works.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/sessions/{session_id}/quiz"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn collaborator_failures_surface_as_friendly_messages() {
    let state = state_with(Err(AppError::GenerationFailed(
        "quota exceeded for project".to_string(),
    )));
    let app = spawn_app!(state);

    let session_id = create_session!(app);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/quizzes"))
            .set_json(json!({ "topic": "magnets" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 502);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("rate limit"));
    assert_eq!(body["retryable"], true);
}

#[actix_web::test]
async fn incomplete_submissions_name_the_missing_question() {
    let state = state_with(Ok(sample_quiz_markdown(3)));
    let app = spawn_app!(state);

    let session_id = create_session!(app);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/quizzes"))
            .set_json(json!({ "topic": "oceans", "question_count": 3 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/answers"))
            .set_json(json!({ "answers": ["B", null, "B"] }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "⚠️ Please answer Question 2 before submitting!"
    );
    assert_eq!(body["error_code"], "INCOMPLETE_SUBMISSION");
}

#[actix_web::test]
async fn image_quizzes_fall_back_to_a_generic_topic() {
    let state = state_with(Ok(sample_quiz_markdown(5)));
    let app = spawn_app!(state);

    let session_id = create_session!(app);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/quizzes/image"))
            .set_json(json!({
                "image_base64": "aGVsbG8=",
                "mime_type": "image/png"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let quiz: Value = test::read_body_json(resp).await;
    // No detected-topic marker in the canned response.
    assert_eq!(quiz["topic"], "Image Analysis");
}

#[actix_web::test]
async fn unknown_and_deleted_sessions_are_not_found() {
    let state = state_with(Ok(sample_quiz_markdown(5)));
    let app = spawn_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/sessions/00000000-0000-0000-0000-000000000000/progress")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);

    let session_id = create_session!(app);
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/sessions/{session_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 204);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/sessions/{session_id}/progress"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}
