//! Tests for the exercise domain service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockExerciseRepository;
use crate::domain::{
    ErrorCode, ExerciseDetails, ExerciseName, MuscleGroup, RepRange, RepRanges,
    TargetMuscleFactor, TargetMuscles,
};
use crate::outbound::memory::InMemoryExerciseRepository;

#[fixture]
fn back_squat() -> ExercisePayload {
    ExercisePayload {
        id: None,
        name: ExerciseName::new("Back Squat").expect("valid name"),
        notes: String::new(),
        target_muscles: TargetMuscles::from([
            (MuscleGroup::Quads, TargetMuscleFactor::One),
            (MuscleGroup::Glutes, TargetMuscleFactor::PointFive),
        ]),
        preferred_rep_ranges: RepRanges::from([RepRange::FiveToTen]),
    }
}

fn in_memory_service() -> ExerciseService<InMemoryExerciseRepository> {
    ExerciseService::new(Arc::new(InMemoryExerciseRepository::new()))
}

fn mock_service(repo: MockExerciseRepository) -> ExerciseService<MockExerciseRepository> {
    ExerciseService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn create_then_get_round_trips(back_squat: ExercisePayload) {
    let service = in_memory_service();

    let created = service
        .create_exercise(back_squat.clone())
        .await
        .expect("create succeeds");
    let id = created.id.expect("id assigned");
    let fetched = service.get_exercise(id).await.expect("get succeeds");

    assert_eq!(fetched, ExercisePayload { id: Some(id), ..back_squat });
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test]
async fn create_ignores_client_supplied_id(mut back_squat: ExercisePayload) {
    let service = in_memory_service();
    back_squat.id = Some(ExerciseId::new(42));

    let created = service
        .create_exercise(back_squat)
        .await
        .expect("create succeeds");

    assert_eq!(created.id, Some(ExerciseId::new(1)));
}

#[rstest]
#[tokio::test]
async fn deleted_exercises_leave_listing_but_stay_readable(back_squat: ExercisePayload) {
    let service = in_memory_service();
    let created = service
        .create_exercise(back_squat)
        .await
        .expect("create succeeds");
    let id = created.id.expect("id assigned");

    service.delete_exercise(id).await.expect("delete succeeds");

    let listed = service.list_exercises().await.expect("list succeeds");
    assert!(listed.iter().all(|payload| payload.id != Some(id)));
    let fetched = service.get_exercise(id).await.expect("still readable");
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test]
async fn update_replaces_collections_wholesale(back_squat: ExercisePayload) {
    let service = in_memory_service();
    let id = service
        .create_exercise(back_squat.clone())
        .await
        .expect("create succeeds")
        .id
        .expect("id assigned");
    let replacement = ExercisePayload {
        id: None,
        name: ExerciseName::new("Barbell Row").expect("valid name"),
        notes: "strict".to_owned(),
        target_muscles: TargetMuscles::from([(MuscleGroup::Back, TargetMuscleFactor::PointFive)]),
        preferred_rep_ranges: RepRanges::new(),
    };

    service
        .update_exercise(id, replacement.clone())
        .await
        .expect("update succeeds");

    let fetched = service.get_exercise(id).await.expect("get succeeds");
    assert_eq!(fetched, ExercisePayload { id: Some(id), ..replacement });
}

#[rstest]
#[tokio::test]
async fn delete_twice_is_idempotent(back_squat: ExercisePayload) {
    let service = in_memory_service();
    let id = service
        .create_exercise(back_squat)
        .await
        .expect("create succeeds")
        .id
        .expect("id assigned");

    service.delete_exercise(id).await.expect("first delete");
    service.delete_exercise(id).await.expect("second delete");

    assert!(service.list_exercises().await.expect("list").is_empty());
    assert!(service.get_exercise(id).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn unknown_ids_are_silent_for_writes_but_not_reads(back_squat: ExercisePayload) {
    let service = in_memory_service();
    let unknown = ExerciseId::new(9999);

    service
        .update_exercise(unknown, back_squat)
        .await
        .expect("update of unknown id succeeds");
    service
        .delete_exercise(unknown)
        .await
        .expect("delete of unknown id succeeds");

    assert!(service.list_exercises().await.expect("list").is_empty());
    let err = service.get_exercise(unknown).await.expect_err("not found");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_sends_replace_mutation(back_squat: ExercisePayload) {
    let mut repo = MockExerciseRepository::new();
    let expected = ExerciseMutation::Replace(back_squat.clone().into_details());
    repo.expect_modify()
        .with(eq(ExerciseId::new(5)), eq(expected))
        .times(1)
        .return_once(|_, _| Ok(None));

    mock_service(repo)
        .update_exercise(ExerciseId::new(5), back_squat)
        .await
        .expect("update succeeds");
}

#[rstest]
#[tokio::test]
async fn delete_sends_soft_delete_mutation() {
    let mut repo = MockExerciseRepository::new();
    repo.expect_modify()
        .with(eq(ExerciseId::new(8)), eq(ExerciseMutation::SoftDelete))
        .times(1)
        .return_once(|id, _| {
            let details = ExerciseDetails::named(ExerciseName::new("Dip").expect("valid name"));
            Ok(Some(Exercise::restore(id, details, true)))
        });

    mock_service(repo)
        .delete_exercise(ExerciseId::new(8))
        .await
        .expect("delete succeeds");
}

#[rstest]
#[case(ExerciseRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(ExerciseRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_errors_map_to_domain_codes(
    #[case] failure: ExerciseRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockExerciseRepository::new();
    repo.expect_list_active()
        .times(1)
        .return_once(move || Err(failure));

    let err = mock_service(repo)
        .list_exercises()
        .await
        .expect_err("list fails");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn create_rejects_repository_without_assigned_id(back_squat: ExercisePayload) {
    let mut repo = MockExerciseRepository::new();
    repo.expect_upsert().times(1).return_once(Ok);

    let err = mock_service(repo)
        .create_exercise(back_squat)
        .await
        .expect_err("missing id is an internal error");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn get_does_not_consult_deleted_flag() {
    let mut repo = MockExerciseRepository::new();
    repo.expect_find_by_id()
        .with(eq(ExerciseId::new(2)))
        .times(1)
        .return_once(|id| {
            let details = ExerciseDetails::named(ExerciseName::new("Curl").expect("valid name"));
            Ok(Some(Exercise::restore(id, details, true)))
        });

    let payload = mock_service(repo)
        .get_exercise(ExerciseId::new(2))
        .await
        .expect("deleted exercise still readable");

    assert_eq!(payload.name.as_ref(), "Curl");
}
