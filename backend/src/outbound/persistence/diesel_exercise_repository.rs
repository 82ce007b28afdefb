//! PostgreSQL-backed `ExerciseRepository` implementation using Diesel ORM.
//!
//! An exercise spans three tables: the parent row plus its target muscle and
//! rep range children. Every operation runs in one transaction so readers
//! never observe a parent whose collections are half rewritten.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{ExerciseRepository, ExerciseRepositoryError};
use crate::domain::{
    Exercise, ExerciseDetails, ExerciseId, ExerciseMutation, ExerciseName, RepRanges,
    TargetMuscles,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ExerciseRow, ExerciseUpdate, NewExerciseRow, RepRangeRow, TargetMuscleRow};
use super::pool::{DbPool, PoolError};
use super::schema::{exercise_rep_ranges, exercise_target_muscles, exercises};

/// Diesel-backed implementation of the exercise repository port.
#[derive(Clone)]
pub struct DieselExerciseRepository {
    pool: DbPool,
}

impl DieselExerciseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure raised inside a repository transaction.
#[derive(Debug)]
enum TxError {
    Diesel(diesel::result::Error),
    Corrupt(String),
    Missing(ExerciseId),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> ExerciseRepositoryError {
    map_basic_pool_error(error, |message| ExerciseRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> ExerciseRepositoryError {
    map_basic_diesel_error(
        error,
        ExerciseRepositoryError::query,
        ExerciseRepositoryError::connection,
    )
}

fn map_tx_error(error: TxError) -> ExerciseRepositoryError {
    match error {
        TxError::Diesel(err) => map_diesel_error(err),
        TxError::Corrupt(message) => ExerciseRepositoryError::query(message),
        TxError::Missing(id) => {
            ExerciseRepositoryError::query(format!("exercise {id} does not exist"))
        }
    }
}

/// Child collections keyed by parent exercise id.
type Children = BTreeMap<i64, (TargetMuscles, RepRanges)>;

fn group_children(
    muscles: Vec<TargetMuscleRow>,
    ranges: Vec<RepRangeRow>,
) -> Result<Children, TxError> {
    let mut children = Children::new();
    for row in muscles {
        let group = row
            .muscle_group
            .parse()
            .map_err(|err| TxError::Corrupt(format!("exercise {}: {err}", row.exercise_id)))?;
        let factor = row
            .factor
            .parse()
            .map_err(|err| TxError::Corrupt(format!("exercise {}: {err}", row.exercise_id)))?;
        children
            .entry(row.exercise_id)
            .or_default()
            .0
            .insert(group, factor);
    }
    for row in ranges {
        let range = row
            .rep_range
            .parse()
            .map_err(|err| TxError::Corrupt(format!("exercise {}: {err}", row.exercise_id)))?;
        children.entry(row.exercise_id).or_default().1.insert(range);
    }
    Ok(children)
}

fn row_to_exercise(row: ExerciseRow, children: &mut Children) -> Result<Exercise, TxError> {
    let ExerciseRow {
        id,
        name,
        notes,
        deleted,
        ..
    } = row;
    let name = ExerciseName::new(name)
        .map_err(|err| TxError::Corrupt(format!("exercise {id}: {err}")))?;
    let (target_muscles, preferred_rep_ranges) = children.remove(&id).unwrap_or_default();
    let details = ExerciseDetails {
        name,
        notes,
        target_muscles,
        preferred_rep_ranges,
    };
    Ok(Exercise::restore(ExerciseId::new(id), details, deleted))
}

/// Load the child rows for the given parents and assemble domain exercises.
async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<ExerciseRow>,
) -> Result<Vec<Exercise>, TxError> {
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let muscles: Vec<TargetMuscleRow> = exercise_target_muscles::table
        .filter(exercise_target_muscles::exercise_id.eq_any(&ids))
        .select(TargetMuscleRow::as_select())
        .load(conn)
        .await?;
    let ranges: Vec<RepRangeRow> = exercise_rep_ranges::table
        .filter(exercise_rep_ranges::exercise_id.eq_any(&ids))
        .select(RepRangeRow::as_select())
        .load(conn)
        .await?;

    let mut children = group_children(muscles, ranges)?;
    rows.into_iter()
        .map(|row| row_to_exercise(row, &mut children))
        .collect()
}

/// Swap the child collections of `id` for those in `details`.
async fn replace_children(
    conn: &mut AsyncPgConnection,
    id: i64,
    details: &ExerciseDetails,
) -> Result<(), diesel::result::Error> {
    diesel::delete(
        exercise_target_muscles::table.filter(exercise_target_muscles::exercise_id.eq(id)),
    )
    .execute(conn)
    .await?;
    diesel::delete(exercise_rep_ranges::table.filter(exercise_rep_ranges::exercise_id.eq(id)))
        .execute(conn)
        .await?;

    let muscles: Vec<TargetMuscleRow> = details
        .target_muscles
        .iter()
        .map(|(group, factor)| TargetMuscleRow {
            exercise_id: id,
            muscle_group: group.as_str().to_owned(),
            factor: factor.as_str().to_owned(),
        })
        .collect();
    if !muscles.is_empty() {
        diesel::insert_into(exercise_target_muscles::table)
            .values(&muscles)
            .execute(conn)
            .await?;
    }

    let ranges: Vec<RepRangeRow> = details
        .preferred_rep_ranges
        .iter()
        .map(|range| RepRangeRow {
            exercise_id: id,
            rep_range: range.as_str().to_owned(),
        })
        .collect();
    if !ranges.is_empty() {
        diesel::insert_into(exercise_rep_ranges::table)
            .values(&ranges)
            .execute(conn)
            .await?;
    }
    Ok(())
}

/// Overwrite an existing parent row and its children.
///
/// The stored `deleted` flag is OR-ed with the incoming one, so a soft
/// delete survives any later overwrite. Returns the flag as persisted.
async fn overwrite(
    conn: &mut AsyncPgConnection,
    id: ExerciseId,
    exercise: &Exercise,
) -> Result<bool, TxError> {
    let details = exercise.details();
    let update = ExerciseUpdate {
        name: details.name.as_ref(),
        notes: details.notes.as_str(),
        updated_at: Utc::now(),
    };
    let deleted: Option<bool> =
        diesel::update(exercises::table.filter(exercises::id.eq(id.as_i64())))
            .set((
                &update,
                exercises::deleted.eq(exercises::deleted.or(diesel::IntoSql::into_sql::<diesel::sql_types::Bool>(exercise.is_deleted()))),
            ))
            .returning(exercises::deleted)
            .get_result(conn)
            .await
            .optional()?;
    let Some(deleted) = deleted else {
        return Err(TxError::Missing(id));
    };
    replace_children(conn, id.as_i64(), details).await?;
    Ok(deleted)
}

#[async_trait]
impl ExerciseRepository for DieselExerciseRepository {
    async fn list_active(&self) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let rows: Vec<ExerciseRow> = exercises::table
                    .filter(exercises::deleted.eq(false))
                    .order(exercises::id.asc())
                    .select(ExerciseRow::as_select())
                    .load(conn)
                    .await?;
                hydrate(conn, rows).await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn find_by_id(
        &self,
        id: ExerciseId,
    ) -> Result<Option<Exercise>, ExerciseRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let row: Option<ExerciseRow> = exercises::table
                    .filter(exercises::id.eq(id.as_i64()))
                    .select(ExerciseRow::as_select())
                    .first(conn)
                    .await
                    .optional()?;
                let Some(row) = row else {
                    return Ok(None);
                };
                Ok(hydrate(conn, vec![row]).await?.pop())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn upsert(&self, exercise: Exercise) -> Result<Exercise, ExerciseRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                if let Some(id) = exercise.id() {
                    let deleted = overwrite(conn, id, &exercise).await?;
                    return Ok(Exercise::restore(id, exercise.into_details(), deleted));
                }

                let details = exercise.details();
                let new_row = NewExerciseRow {
                    name: details.name.as_ref(),
                    notes: details.notes.as_str(),
                    deleted: false,
                };
                let row: ExerciseRow = diesel::insert_into(exercises::table)
                    .values(&new_row)
                    .returning(ExerciseRow::as_returning())
                    .get_result(conn)
                    .await?;
                replace_children(conn, row.id, details).await?;
                Ok(Exercise::restore(
                    ExerciseId::new(row.id),
                    exercise.into_details(),
                    false,
                ))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn modify(
        &self,
        id: ExerciseId,
        mutation: ExerciseMutation,
    ) -> Result<Option<Exercise>, ExerciseRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                // Row lock serialises concurrent writers to the same exercise.
                let row: Option<ExerciseRow> = exercises::table
                    .filter(exercises::id.eq(id.as_i64()))
                    .select(ExerciseRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(row) = row else {
                    return Ok(None);
                };
                let Some(mut exercise) = hydrate(conn, vec![row]).await?.pop() else {
                    return Ok(None);
                };
                mutation.apply(&mut exercise);
                overwrite(conn, id, &exercise).await?;
                Ok(Some(exercise))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }
}
