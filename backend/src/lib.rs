//! Exercise library service: a catalogue of strength-training exercises
//! behind a REST API.
//!
//! Layout follows ports and adapters: [`domain`] holds the model, driving
//! ports and service; [`inbound`] adapts HTTP onto the driving ports;
//! [`outbound`] implements the repository port for PostgreSQL and memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
