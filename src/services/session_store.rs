//! In-memory registry of live sessions. The outer lock only guards the map;
//! each session carries its own async mutex so a slow generation on one
//! session never blocks lookups or other sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::services::quiz_session::QuizSession;

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<QuizSession>>>>,
    seconds_per_question: u64,
}

impl SessionStore {
    pub fn new(seconds_per_question: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            seconds_per_question,
        }
    }

    pub fn create(&self) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        let session = QuizSession::new(id, self.seconds_per_question);
        self.sessions
            .write()
            .map_err(|_| AppError::InternalError("session store lock poisoned".to_string()))?
            .insert(id, Arc::new(Mutex::new(session)));
        log::info!("created session {}", id);
        Ok(id)
    }

    pub fn get(&self, id: &Uuid) -> AppResult<Arc<Mutex<QuizSession>>> {
        self.sessions
            .read()
            .map_err(|_| AppError::InternalError("session store lock poisoned".to_string()))?
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("session {} not found", id)))
    }

    pub fn remove(&self, id: &Uuid) -> AppResult<()> {
        let removed = self
            .sessions
            .write()
            .map_err(|_| AppError::InternalError("session store lock poisoned".to_string()))?
            .remove(id);
        match removed {
            Some(_) => {
                log::info!("removed session {}", id);
                Ok(())
            }
            None => Err(AppError::NotFound(format!("session {} not found", id))),
        }
    }
}
