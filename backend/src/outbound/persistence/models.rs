//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{exercise_rep_ranges, exercise_target_muscles, exercises};

/// Row struct for reading from the exercises table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exercises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExerciseRow {
    pub id: i64,
    pub name: String,
    pub notes: String,
    pub deleted: bool,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating exercise records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exercises)]
pub(crate) struct NewExerciseRow<'a> {
    pub name: &'a str,
    pub notes: &'a str,
    pub deleted: bool,
}

/// Changeset struct for overwriting an existing exercise record.
///
/// `deleted` is not part of the changeset; writers may only set it, never
/// clear it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = exercises)]
pub(crate) struct ExerciseUpdate<'a> {
    pub name: &'a str,
    pub notes: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for the exercise_target_muscles table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = exercise_target_muscles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TargetMuscleRow {
    pub exercise_id: i64,
    pub muscle_group: String,
    pub factor: String,
}

/// Row struct for the exercise_rep_ranges table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = exercise_rep_ranges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RepRangeRow {
    pub exercise_id: i64,
    pub rep_range: String,
}
