//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: hold the exercise catalogue model and its business rules free of
//! transport and storage concerns. Inbound adapters call the driving ports in
//! [`ports`]; outbound adapters implement the driven repository port.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - Exercise and friends — the catalogue entity, its id, name and enums.
//! - ExerciseService — implementation of the exercise driving ports.
//! - TraceId — request correlation identifier.

pub mod error;
pub mod exercise;
mod exercise_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::exercise::{
    Exercise, ExerciseDetails, ExerciseId, ExerciseMutation, ExerciseName,
    ExerciseValidationError, MuscleGroup, ParseCatalogueEnumError, RepRange, RepRanges,
    TargetMuscleFactor, TargetMuscles,
};
pub use self::exercise_service::ExerciseService;
pub use self::trace_id::TraceId;
