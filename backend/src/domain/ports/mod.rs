//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`ExerciseCommand`], [`ExerciseQuery`]) are called by
//! inbound adapters; the driven port ([`ExerciseRepository`]) is implemented
//! by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod exercise_command;
mod exercise_payload;
mod exercise_query;
mod exercise_repository;

#[cfg(test)]
pub use exercise_command::MockExerciseCommand;
pub use exercise_command::ExerciseCommand;
pub use exercise_payload::ExercisePayload;
#[cfg(test)]
pub use exercise_query::MockExerciseQuery;
pub use exercise_query::ExerciseQuery;
#[cfg(test)]
pub use exercise_repository::MockExerciseRepository;
pub use exercise_repository::{ExerciseRepository, ExerciseRepositoryError};
