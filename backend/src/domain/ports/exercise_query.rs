//! Driving port for exercise reads.

use async_trait::async_trait;

use crate::domain::{Error, ExerciseId};

use super::ExercisePayload;

/// Driving port for exercise read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseQuery: Send + Sync {
    /// Every exercise that has not been soft-deleted.
    async fn list_exercises(&self) -> Result<Vec<ExercisePayload>, Error>;

    /// The exercise with `id`.
    ///
    /// Soft-deleted exercises are still returned here even though
    /// [`ExerciseQuery::list_exercises`] omits them, so existing links to a
    /// retired exercise keep resolving. Fails with
    /// [`crate::domain::ErrorCode::NotFound`] only when no record exists.
    async fn get_exercise(&self, id: ExerciseId) -> Result<ExercisePayload, Error>;
}
