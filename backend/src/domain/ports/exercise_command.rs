//! Driving port for exercise mutations.
//!
//! Update and delete treat an unknown id as a silent no-op, unlike
//! [`super::ExerciseQuery::get_exercise`] which reports `NotFound`.

use async_trait::async_trait;

use crate::domain::{Error, ExerciseId};

use super::ExercisePayload;

/// Driving port for exercise write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseCommand: Send + Sync {
    /// Store a new exercise and return it with its assigned id.
    ///
    /// Any id present on `payload` is ignored.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use exercise_library::domain::{ExerciseName, ExerciseService};
    /// # use exercise_library::domain::ports::{ExerciseCommand, ExercisePayload};
    /// # use exercise_library::outbound::memory::InMemoryExerciseRepository;
    /// # async fn example() -> Result<(), exercise_library::domain::Error> {
    /// let service = ExerciseService::new(Arc::new(InMemoryExerciseRepository::new()));
    /// let payload = ExercisePayload {
    ///     id: None,
    ///     name: ExerciseName::new("Deadlift").expect("valid name"),
    ///     notes: String::new(),
    ///     target_muscles: Default::default(),
    ///     preferred_rep_ranges: Default::default(),
    /// };
    /// let created = service.create_exercise(payload).await?;
    /// assert!(created.id.is_some());
    /// # Ok(())
    /// # }
    /// ```
    async fn create_exercise(&self, payload: ExercisePayload) -> Result<ExercisePayload, Error>;

    /// Replace name, notes and both collections of the exercise with `id`.
    ///
    /// Succeeds without effect when `id` is unknown.
    async fn update_exercise(&self, id: ExerciseId, payload: ExercisePayload)
    -> Result<(), Error>;

    /// Soft-delete the exercise with `id`.
    ///
    /// Succeeds without effect when `id` is unknown; repeated calls are
    /// harmless.
    async fn delete_exercise(&self, id: ExerciseId) -> Result<(), Error>;
}
