//! Exercise catalogue HTTP handlers.
//!
//! ```text
//! GET    /api/v1/exercises
//! GET    /api/v1/exercises/{id}
//! POST   /api/v1/exercises
//! PUT    /api/v1/exercises/{id}
//! DELETE /api/v1/exercises/{id}
//! ```
//!
//! Request bodies are validated here, before any driving port is called.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::ExercisePayload;
use crate::domain::{Error, ExerciseId, RepRanges, TargetMuscles};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_id_error, json_body_error, parse_exercise_name, parse_muscle_group,
    parse_rep_range, parse_target_muscle_factor,
};

const TARGET_MUSCLES: FieldName = FieldName::new("targetMuscles");
const PREFERRED_REP_RANGES: FieldName = FieldName::new("preferredRepRanges");

#[derive(Debug, Deserialize)]
struct ExercisePath {
    id: String,
}

/// Request payload for creating or replacing an exercise.
///
/// Any `id` supplied in the body is ignored; the path (or storage, on create)
/// decides identity.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRequestBody {
    #[schema(value_type = Option<i64>)]
    pub id: Option<Value>,
    #[schema(example = "Back Squat")]
    pub name: Option<String>,
    pub notes: Option<String>,
    /// Muscle group names mapped to `ONE`/`POINT_FIVE` (or `1.0`/`0.5`).
    #[schema(value_type = Option<Object>, example = json!({"QUADS": "ONE", "GLUTES": "POINT_FIVE"}))]
    pub target_muscles: Option<BTreeMap<String, Value>>,
    #[schema(example = json!(["FIVE_TO_TEN"]))]
    pub preferred_rep_ranges: Option<Vec<String>>,
}

/// Exercise as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResponseBody {
    pub id: Option<i64>,
    pub name: String,
    pub notes: String,
    pub target_muscles: BTreeMap<String, String>,
    pub preferred_rep_ranges: Vec<String>,
}

impl From<ExercisePayload> for ExerciseResponseBody {
    fn from(value: ExercisePayload) -> Self {
        Self {
            id: value.id.map(ExerciseId::as_i64),
            name: value.name.to_string(),
            notes: value.notes,
            target_muscles: value
                .target_muscles
                .into_iter()
                .map(|(group, factor)| (group.to_string(), factor.to_string()))
                .collect(),
            preferred_rep_ranges: value
                .preferred_rep_ranges
                .into_iter()
                .map(|range| range.to_string())
                .collect(),
        }
    }
}

fn parse_exercise_id(path: ExercisePath) -> Result<ExerciseId, Error> {
    path.id
        .parse::<i64>()
        .map(ExerciseId::new)
        .map_err(|_| invalid_id_error(FieldName::new("id"), &path.id))
}

fn parse_target_muscles(raw: Option<BTreeMap<String, Value>>) -> Result<TargetMuscles, Error> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let group = parse_muscle_group(&key, TARGET_MUSCLES)?;
            let factor = parse_target_muscle_factor(&key, value, TARGET_MUSCLES)?;
            Ok((group, factor))
        })
        .collect()
}

fn parse_rep_ranges(raw: Option<Vec<String>>) -> Result<RepRanges, Error> {
    raw.unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, value)| parse_rep_range(index, value, PREFERRED_REP_RANGES))
        .collect()
}

fn parse_exercise_request(body: ExerciseRequestBody) -> Result<ExercisePayload, Error> {
    Ok(ExercisePayload {
        id: None,
        name: parse_exercise_name(body.name, FieldName::new("name"))?,
        notes: body.notes.unwrap_or_default(),
        target_muscles: parse_target_muscles(body.target_muscles)?,
        preferred_rep_ranges: parse_rep_ranges(body.preferred_rep_ranges)?,
    })
}

/// JSON extractor configuration reporting unusable bodies as `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| json_body_error(&err).into())
}

/// List every exercise that has not been deleted, ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/exercises",
    responses(
        (status = 200, description = "Active exercises", body = [ExerciseResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "listExercises"
)]
#[get("/exercises")]
pub async fn list_exercises(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ExerciseResponseBody>>> {
    let exercises = state.exercises_query.list_exercises().await?;
    Ok(web::Json(
        exercises
            .into_iter()
            .map(ExerciseResponseBody::from)
            .collect(),
    ))
}

/// Fetch one exercise by id.
///
/// Deleted exercises are still returned here even though they no longer
/// appear in the listing.
#[utoipa::path(
    get,
    path = "/api/v1/exercises/{id}",
    params(("id" = i64, Path, description = "Exercise identifier")),
    responses(
        (status = 200, description = "Exercise, including soft-deleted ones", body = ExerciseResponseBody),
        (status = 400, description = "Identifier is not an integer", body = ErrorSchema),
        (status = 404, description = "No exercise with this id", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "getExercise"
)]
#[get("/exercises/{id}")]
pub async fn get_exercise(
    state: web::Data<HttpState>,
    path: web::Path<ExercisePath>,
) -> ApiResult<web::Json<ExerciseResponseBody>> {
    let id = parse_exercise_id(path.into_inner())?;
    let exercise = state.exercises_query.get_exercise(id).await?;
    Ok(web::Json(ExerciseResponseBody::from(exercise)))
}

/// Create an exercise; storage assigns the id.
#[utoipa::path(
    post,
    path = "/api/v1/exercises",
    request_body = ExerciseRequestBody,
    responses(
        (status = 201, description = "Exercise created", body = ExerciseResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "createExercise"
)]
#[post("/exercises")]
pub async fn create_exercise(
    state: web::Data<HttpState>,
    payload: web::Json<ExerciseRequestBody>,
) -> ApiResult<HttpResponse> {
    let payload = parse_exercise_request(payload.into_inner())?;
    let created = state.exercises.create_exercise(payload).await?;
    Ok(HttpResponse::Created().json(ExerciseResponseBody::from(created)))
}

/// Replace an exercise's attributes wholesale.
///
/// An unknown id is accepted and changes nothing.
#[utoipa::path(
    put,
    path = "/api/v1/exercises/{id}",
    params(("id" = i64, Path, description = "Exercise identifier")),
    request_body = ExerciseRequestBody,
    responses(
        (status = 204, description = "Exercise replaced, or id unknown"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "updateExercise"
)]
#[put("/exercises/{id}")]
pub async fn update_exercise(
    state: web::Data<HttpState>,
    path: web::Path<ExercisePath>,
    payload: web::Json<ExerciseRequestBody>,
) -> ApiResult<HttpResponse> {
    let id = parse_exercise_id(path.into_inner())?;
    let payload = parse_exercise_request(payload.into_inner())?;
    state.exercises.update_exercise(id, payload).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Soft-delete an exercise. Repeating the call, or naming an unknown id,
/// still succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/exercises/{id}",
    params(("id" = i64, Path, description = "Exercise identifier")),
    responses(
        (status = 204, description = "Exercise deleted, already deleted, or id unknown"),
        (status = 400, description = "Identifier is not an integer", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "deleteExercise"
)]
#[delete("/exercises/{id}")]
pub async fn delete_exercise(
    state: web::Data<HttpState>,
    path: web::Path<ExercisePath>,
) -> ApiResult<HttpResponse> {
    let id = parse_exercise_id(path.into_inner())?;
    state.exercises.delete_exercise(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
