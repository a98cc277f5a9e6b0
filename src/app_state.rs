use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    services::{
        model_service::{GeminiModelService, QuizGenerator},
        quiz_flow::QuizFlowService,
        session_store::SessionStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_flow: Arc<QuizFlowService>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let generator: Arc<dyn QuizGenerator> = Arc::new(GeminiModelService::new(&config)?);
        Ok(Self::with_generator(config, generator))
    }

    /// Wires the state around an arbitrary generator, letting tests substitute
    /// a canned one for the real model client.
    pub fn with_generator(config: Config, generator: Arc<dyn QuizGenerator>) -> Self {
        let quiz_flow = Arc::new(QuizFlowService::new(generator, &config));
        let sessions = Arc::new(SessionStore::new(config.seconds_per_question));
        Self {
            quiz_flow,
            sessions,
            config: Arc::new(config),
        }
    }
}
