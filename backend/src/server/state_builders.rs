//! Builders for HTTP state from the configured repository adapter.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use exercise_library::domain::ExerciseService;
use exercise_library::inbound::http::state::HttpState;
use exercise_library::outbound::memory::InMemoryExerciseRepository;
use exercise_library::outbound::persistence::DieselExerciseRepository;

use super::ServerConfig;

/// Wire the exercise service onto PostgreSQL when a pool is configured,
/// otherwise onto the in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            let service = Arc::new(ExerciseService::new(Arc::new(
                DieselExerciseRepository::new(pool.clone()),
            )));
            HttpState::new(service.clone(), service)
        }
        None => {
            warn!("no database configured; exercises are kept in memory and lost on exit");
            let service = Arc::new(ExerciseService::new(Arc::new(
                InMemoryExerciseRepository::new(),
            )));
            HttpState::new(service.clone(), service)
        }
    };
    web::Data::new(state)
}
