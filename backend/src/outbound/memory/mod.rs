//! In-process exercise store.
//!
//! Backs the service when no database is configured and gives tests a real
//! repository without PostgreSQL. Every operation runs under one async mutex,
//! so `upsert` and `modify` are atomic per call. Contents are lost when the
//! process exits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{ExerciseRepository, ExerciseRepositoryError};
use crate::domain::{Exercise, ExerciseId, ExerciseMutation};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    exercises: BTreeMap<ExerciseId, Exercise>,
}

impl Store {
    fn allocate_id(&mut self) -> ExerciseId {
        self.next_id += 1;
        ExerciseId::new(self.next_id)
    }
}

/// Exercise repository held entirely in memory.
///
/// Ids are allocated sequentially from 1, mirroring an identity column.
#[derive(Debug, Default)]
pub struct InMemoryExerciseRepository {
    store: Mutex<Store>,
}

impl InMemoryExerciseRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryExerciseRepository {
    async fn list_active(&self) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
        let store = self.store.lock().await;
        Ok(store
            .exercises
            .values()
            .filter(|exercise| !exercise.is_deleted())
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        id: ExerciseId,
    ) -> Result<Option<Exercise>, ExerciseRepositoryError> {
        let store = self.store.lock().await;
        Ok(store.exercises.get(&id).cloned())
    }

    async fn upsert(&self, exercise: Exercise) -> Result<Exercise, ExerciseRepositoryError> {
        let mut store = self.store.lock().await;
        let stored = match exercise.id() {
            Some(id) => {
                let Some(current) = store.exercises.get(&id) else {
                    return Err(ExerciseRepositoryError::query(format!(
                        "exercise {id} does not exist"
                    )));
                };
                let deleted = current.is_deleted() || exercise.is_deleted();
                Exercise::restore(id, exercise.into_details(), deleted)
            }
            None => {
                let id = store.allocate_id();
                Exercise::restore(id, exercise.into_details(), false)
            }
        };
        if let Some(id) = stored.id() {
            store.exercises.insert(id, stored.clone());
        }
        Ok(stored)
    }

    async fn modify(
        &self,
        id: ExerciseId,
        mutation: ExerciseMutation,
    ) -> Result<Option<Exercise>, ExerciseRepositoryError> {
        let mut store = self.store.lock().await;
        Ok(store.exercises.get_mut(&id).map(|exercise| {
            mutation.apply(exercise);
            exercise.clone()
        }))
    }
}
