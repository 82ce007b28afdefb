//! Driven port for exercise persistence.
//!
//! Adapters must make `upsert` and `modify` atomic with respect to a single
//! record. `find_by_id` never filters on the soft-delete flag; only
//! `list_active` does.

use async_trait::async_trait;

use crate::domain::{Exercise, ExerciseId, ExerciseMutation};

use super::define_port_error;

define_port_error! {
    /// Errors raised by exercise repository adapters.
    pub enum ExerciseRepositoryError {
        /// Storage could not be reached or a connection could not be checked out.
        Connection { message: String } =>
            "exercise repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "exercise repository query failed: {message}",
    }
}

/// Port for reading and writing exercises.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Every exercise whose soft-delete flag is unset, ordered by id.
    async fn list_active(&self) -> Result<Vec<Exercise>, ExerciseRepositoryError>;

    /// The exercise with `id`, whether or not it has been soft-deleted.
    async fn find_by_id(&self, id: ExerciseId)
    -> Result<Option<Exercise>, ExerciseRepositoryError>;

    /// Insert `exercise` when it has no id (assigning one), otherwise
    /// overwrite the stored record with the same id.
    ///
    /// Returns the stored record, carrying its id.
    async fn upsert(&self, exercise: Exercise) -> Result<Exercise, ExerciseRepositoryError>;

    /// Load, mutate and store one exercise in a single atomic step.
    ///
    /// Returns `Ok(None)` without writing anything when `id` is unknown.
    async fn modify(
        &self,
        id: ExerciseId,
        mutation: ExerciseMutation,
    ) -> Result<Option<Exercise>, ExerciseRepositoryError>;
}
