//! Integration tests for `DieselExerciseRepository`.
//!
//! Runs against the PostgreSQL database named by
//! `EXERCISE_LIBRARY_TEST_DATABASE_URL`; each test skips when it is unset.
//! Assertions only concern rows the test itself created, so suites may share
//! one database.

use exercise_library::domain::ports::ExerciseRepository;
use exercise_library::domain::{
    Exercise, ExerciseDetails, ExerciseId, ExerciseMutation, ExerciseName, MuscleGroup, RepRange,
    TargetMuscleFactor,
};
use exercise_library::outbound::persistence::{
    DbPool, DieselExerciseRepository, PoolConfig, run_pending_migrations,
};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

const DATABASE_URL_VAR: &str = "EXERCISE_LIBRARY_TEST_DATABASE_URL";

struct TestContext {
    runtime: Runtime,
    repository: DieselExerciseRepository,
}

fn setup_context(database_url: &str) -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    runtime
        .block_on(run_pending_migrations(database_url))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselExerciseRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    let Ok(database_url) = std::env::var(DATABASE_URL_VAR) else {
        eprintln!("SKIP-TEST-DATABASE: {DATABASE_URL_VAR} is not set");
        return None;
    };
    match setup_context(database_url.as_str()) {
        Ok(ctx) => Some(ctx),
        Err(reason) => panic!("test database setup failed: {reason}"),
    }
}

fn back_squat() -> ExerciseDetails {
    let mut details = ExerciseDetails::named(ExerciseName::new("Back Squat").expect("valid name"));
    details
        .target_muscles
        .insert(MuscleGroup::Quads, TargetMuscleFactor::One);
    details
        .target_muscles
        .insert(MuscleGroup::Glutes, TargetMuscleFactor::PointFive);
    details.preferred_rep_ranges.insert(RepRange::FiveToTen);
    details
}

#[rstest]
fn insert_then_find_round_trips_collections(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };
    let repository = &context.repository;

    let stored = context
        .runtime
        .block_on(repository.upsert(Exercise::new(back_squat())))
        .expect("insert exercise");
    let id = stored.id().expect("id assigned");

    let found = context
        .runtime
        .block_on(repository.find_by_id(id))
        .expect("find exercise")
        .expect("exercise exists");
    assert_eq!(found.details(), &back_squat());
    assert!(!found.is_deleted());
}

#[rstest]
fn replace_swaps_collections_wholesale(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };
    let repository = &context.repository;
    let stored = context
        .runtime
        .block_on(repository.upsert(Exercise::new(back_squat())))
        .expect("insert exercise");
    let id = stored.id().expect("id assigned");

    let mut replacement =
        ExerciseDetails::named(ExerciseName::new("Front Squat").expect("valid name"));
    replacement
        .target_muscles
        .insert(MuscleGroup::Quads, TargetMuscleFactor::One);
    replacement
        .preferred_rep_ranges
        .insert(RepRange::ThreeToSix);

    let modified = context
        .runtime
        .block_on(repository.modify(id, ExerciseMutation::Replace(replacement.clone())))
        .expect("modify exercise")
        .expect("exercise exists");
    assert_eq!(modified.details(), &replacement);

    let found = context
        .runtime
        .block_on(repository.find_by_id(id))
        .expect("find exercise")
        .expect("exercise exists");
    assert_eq!(found.details(), &replacement);
}

#[rstest]
fn soft_delete_hides_from_listing_only(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };
    let repository = &context.repository;
    let stored = context
        .runtime
        .block_on(repository.upsert(Exercise::new(back_squat())))
        .expect("insert exercise");
    let id = stored.id().expect("id assigned");

    let listed_before = context
        .runtime
        .block_on(repository.list_active())
        .expect("list exercises");
    assert!(listed_before.iter().any(|exercise| exercise.id() == Some(id)));

    for _ in 0..2 {
        context
            .runtime
            .block_on(repository.modify(id, ExerciseMutation::SoftDelete))
            .expect("soft delete")
            .expect("exercise exists");
    }

    let listed_after = context
        .runtime
        .block_on(repository.list_active())
        .expect("list exercises");
    assert!(listed_after.iter().all(|exercise| exercise.id() != Some(id)));

    let found = context
        .runtime
        .block_on(repository.find_by_id(id))
        .expect("find exercise")
        .expect("deleted exercise still stored");
    assert!(found.is_deleted());
}

#[rstest]
fn unknown_ids_are_reported_as_absent(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };
    let repository = &context.repository;
    let unknown = ExerciseId::new(i64::MAX);

    let found = context
        .runtime
        .block_on(repository.find_by_id(unknown))
        .expect("find succeeds");
    assert!(found.is_none());

    let modified = context
        .runtime
        .block_on(repository.modify(unknown, ExerciseMutation::SoftDelete))
        .expect("modify succeeds");
    assert!(modified.is_none());
}

#[rstest]
fn overwrite_never_clears_soft_delete(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };
    let repository = &context.repository;
    let stored = context
        .runtime
        .block_on(repository.upsert(Exercise::new(back_squat())))
        .expect("insert exercise");
    let id = stored.id().expect("id assigned");
    context
        .runtime
        .block_on(repository.modify(id, ExerciseMutation::SoftDelete))
        .expect("soft delete")
        .expect("exercise exists");

    let overwritten = context
        .runtime
        .block_on(repository.upsert(Exercise::restore(id, back_squat(), false)))
        .expect("overwrite exercise");
    assert!(overwritten.is_deleted());

    let found = context
        .runtime
        .block_on(repository.find_by_id(id))
        .expect("find exercise")
        .expect("exercise exists");
    assert!(found.is_deleted());
    let listed = context
        .runtime
        .block_on(repository.list_active())
        .expect("list exercises");
    assert!(listed.iter().all(|exercise| exercise.id() != Some(id)));
}
