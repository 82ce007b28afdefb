//! Exercise catalogue domain service.
//!
//! Implements both exercise driving ports on top of an
//! [`ExerciseRepository`]. Absence is an error only for single reads; updates
//! and deletes against unknown ids complete silently.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    ExerciseCommand, ExercisePayload, ExerciseQuery, ExerciseRepository, ExerciseRepositoryError,
};
use crate::domain::{Error, Exercise, ExerciseId, ExerciseMutation};

fn map_repository_error(error: ExerciseRepositoryError) -> Error {
    match error {
        ExerciseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("exercise repository unavailable: {message}"))
        }
        ExerciseRepositoryError::Query { message } => {
            Error::internal(format!("exercise repository error: {message}"))
        }
    }
}

/// Exercise service implementing [`ExerciseCommand`] and [`ExerciseQuery`].
#[derive(Clone)]
pub struct ExerciseService<R> {
    exercise_repo: Arc<R>,
}

impl<R> ExerciseService<R> {
    /// Create a new service backed by `exercise_repo`.
    pub fn new(exercise_repo: Arc<R>) -> Self {
        Self { exercise_repo }
    }
}

impl<R> ExerciseService<R>
where
    R: ExerciseRepository,
{
    async fn apply(&self, id: ExerciseId, mutation: ExerciseMutation) -> Result<(), Error> {
        let operation = match mutation {
            ExerciseMutation::Replace(_) => "update",
            ExerciseMutation::SoftDelete => "delete",
        };
        let outcome = self
            .exercise_repo
            .modify(id, mutation)
            .await
            .map_err(map_repository_error)?;

        match outcome {
            Some(_) => info!(exercise_id = %id, operation, "exercise modified"),
            None => debug!(exercise_id = %id, operation, "exercise not found; nothing modified"),
        }
        Ok(())
    }
}

#[async_trait]
impl<R> ExerciseQuery for ExerciseService<R>
where
    R: ExerciseRepository,
{
    async fn list_exercises(&self) -> Result<Vec<ExercisePayload>, Error> {
        let exercises = self
            .exercise_repo
            .list_active()
            .await
            .map_err(map_repository_error)?;

        Ok(exercises.into_iter().map(ExercisePayload::from).collect())
    }

    async fn get_exercise(&self, id: ExerciseId) -> Result<ExercisePayload, Error> {
        self.exercise_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .map(ExercisePayload::from)
            .ok_or_else(|| Error::not_found(format!("exercise {id} not found")))
    }
}

#[async_trait]
impl<R> ExerciseCommand for ExerciseService<R>
where
    R: ExerciseRepository,
{
    async fn create_exercise(&self, payload: ExercisePayload) -> Result<ExercisePayload, Error> {
        let exercise = Exercise::new(payload.into_details());

        let stored = self
            .exercise_repo
            .upsert(exercise)
            .await
            .map_err(map_repository_error)?;

        let Some(id) = stored.id() else {
            return Err(Error::internal("exercise repository did not assign an id"));
        };
        info!(exercise_id = %id, "exercise created");
        Ok(ExercisePayload::from(stored))
    }

    async fn update_exercise(&self, id: ExerciseId, payload: ExercisePayload) -> Result<(), Error> {
        self.apply(id, ExerciseMutation::Replace(payload.into_details()))
            .await
    }

    async fn delete_exercise(&self, id: ExerciseId) -> Result<(), Error> {
        self.apply(id, ExerciseMutation::SoftDelete).await
    }
}

#[cfg(test)]
#[path = "exercise_service_tests.rs"]
mod tests;
