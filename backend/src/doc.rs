//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every exercise and health endpoint plus the error
//! schema wrappers, keeping domain types free of utoipa derives. The document
//! backs Swagger UI in debug builds and the `openapi-dump` binary.

use crate::inbound::http::exercises::{ExerciseRequestBody, ExerciseResponseBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise library API",
        description = "Catalogue of strength-training exercises with soft delete and full-replace updates."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::exercises::list_exercises,
        crate::inbound::http::exercises::get_exercise,
        crate::inbound::http::exercises::create_exercise,
        crate::inbound::http::exercises::update_exercise,
        crate::inbound::http::exercises::delete_exercise,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ExerciseRequestBody,
        ExerciseResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "exercises", description = "Exercise catalogue operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
