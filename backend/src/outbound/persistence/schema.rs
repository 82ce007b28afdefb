//! Diesel table definitions for the exercise catalogue.
//!
//! Kept in sync with `backend/migrations`. Enumeration values are stored as
//! their wire names in `TEXT` columns guarded by `CHECK` constraints.

diesel::table! {
    /// Exercise records, including soft-deleted ones.
    exercises (id) {
        /// Identity column assigned on insert.
        id -> Int8,
        name -> Text,
        notes -> Text,
        /// Soft-delete flag; never reset once set.
        deleted -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Muscle emphasis per exercise; one row per muscle group.
    exercise_target_muscles (exercise_id, muscle_group) {
        exercise_id -> Int8,
        muscle_group -> Text,
        factor -> Text,
    }
}

diesel::table! {
    /// Preferred repetition bands per exercise.
    exercise_rep_ranges (exercise_id, rep_range) {
        exercise_id -> Int8,
        rep_range -> Text,
    }
}

diesel::joinable!(exercise_target_muscles -> exercises (exercise_id));
diesel::joinable!(exercise_rep_ranges -> exercises (exercise_id));

diesel::allow_tables_to_appear_in_same_query!(
    exercises,
    exercise_target_muscles,
    exercise_rep_ranges,
);
