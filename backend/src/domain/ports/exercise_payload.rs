//! Transfer shape exchanged across the exercise driving ports.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Exercise, ExerciseDetails, ExerciseId, ExerciseName, RepRanges, TargetMuscles,
};

/// Serializable exercise payload, decoupled from the stored entity.
///
/// The soft-delete flag is deliberately absent: clients never see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePayload {
    pub id: Option<ExerciseId>,
    pub name: ExerciseName,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub target_muscles: TargetMuscles,
    #[serde(default)]
    pub preferred_rep_ranges: RepRanges,
}

impl ExercisePayload {
    /// Payload without an id, as submitted by clients.
    #[must_use]
    pub fn from_details(details: ExerciseDetails) -> Self {
        let ExerciseDetails {
            name,
            notes,
            target_muscles,
            preferred_rep_ranges,
        } = details;
        Self {
            id: None,
            name,
            notes,
            target_muscles,
            preferred_rep_ranges,
        }
    }

    /// Editable attributes carried by the payload; the id is dropped.
    #[must_use]
    pub fn into_details(self) -> ExerciseDetails {
        ExerciseDetails {
            name: self.name,
            notes: self.notes,
            target_muscles: self.target_muscles,
            preferred_rep_ranges: self.preferred_rep_ranges,
        }
    }
}

impl From<Exercise> for ExercisePayload {
    fn from(value: Exercise) -> Self {
        let id = value.id();
        Self {
            id,
            ..Self::from_details(value.into_details())
        }
    }
}
