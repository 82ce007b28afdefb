//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ExerciseCommand, ExerciseQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub exercises: Arc<dyn ExerciseCommand>,
    pub exercises_query: Arc<dyn ExerciseQuery>,
}

impl HttpState {
    /// Construct state from the exercise driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use exercise_library::domain::ExerciseService;
    /// use exercise_library::inbound::http::state::HttpState;
    /// use exercise_library::outbound::memory::InMemoryExerciseRepository;
    ///
    /// let service = Arc::new(ExerciseService::new(Arc::new(InMemoryExerciseRepository::new())));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.exercises_query.clone();
    /// ```
    pub fn new(
        exercises: Arc<dyn ExerciseCommand>,
        exercises_query: Arc<dyn ExerciseQuery>,
    ) -> Self {
        Self {
            exercises,
            exercises_query,
        }
    }
}
