//! Exercise catalogue entity and its closed enumerations.
//!
//! An [`Exercise`] is the only persistent aggregate in the service. Its
//! identifier is assigned by storage on first insert, its collections are
//! always replaced wholesale, and its soft-delete flag only ever moves from
//! `false` to `true`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation errors raised by exercise constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExerciseValidationError {
    #[error("exercise name must not be blank")]
    BlankName,
}

/// Storage-assigned exercise identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(i64);

impl ExerciseId {
    /// Wrap a raw storage identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for ExerciseId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Human-readable exercise name; never blank.
///
/// # Examples
/// ```
/// use exercise_library::domain::ExerciseName;
///
/// let name = ExerciseName::new("Back Squat").expect("valid name");
/// assert_eq!(name.as_ref(), "Back Squat");
/// assert!(ExerciseName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExerciseName(String);

impl ExerciseName {
    /// Validate and wrap a name.
    pub fn new(value: impl Into<String>) -> Result<Self, ExerciseValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ExerciseValidationError::BlankName);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for ExerciseName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for ExerciseName {
    type Error = ExerciseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExerciseName> for String {
    fn from(value: ExerciseName) -> Self {
        value.0
    }
}

impl fmt::Display for ExerciseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a wire name does not match any enumeration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseCatalogueEnumError {
    kind: &'static str,
    value: String,
}

impl ParseCatalogueEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Generates the wire-name plumbing shared by the catalogue enumerations.
macro_rules! catalogue_enum {
    (
        $(#[$outer:meta])*
        $name:ident, $kind:literal {
            $( $(#[$variant_meta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub enum $name {
            $( $(#[$variant_meta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable wire and storage name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseCatalogueEnumError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(ParseCatalogueEnumError::new($kind, value)),
                }
            }
        }
    };
}

catalogue_enum! {
    /// Anatomical target of an exercise.
    MuscleGroup, "muscle group" {
        Quads => "QUADS",
        Hamstrings => "HAMSTRINGS",
        Calves => "CALVES",
        Glutes => "GLUTES",
        Back => "BACK",
        Traps => "TRAPS",
        FrontDelts => "FRONT_DELTS",
        SideDelts => "SIDE_DELTS",
        RearDelts => "REAR_DELTS",
        Pecs => "PECS",
        Abs => "ABS",
        Bicep => "BICEP",
        Tricep => "TRICEP",
        Forearms => "FOREARMS",
    }
}

catalogue_enum! {
    /// Emphasis an exercise places on a muscle group.
    TargetMuscleFactor, "target muscle factor" {
        /// Primary target, factor 1.0.
        One => "ONE",
        /// Secondary target, factor 0.5.
        PointFive => "POINT_FIVE",
    }
}

impl TargetMuscleFactor {
    /// Relative weighting of the muscle for this exercise.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::One => 1.0,
            Self::PointFive => 0.5,
        }
    }

    /// Match a numeric weighting back to its named factor.
    #[must_use]
    pub fn from_factor(value: f64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|factor| (factor.factor() - value).abs() < f64::EPSILON)
    }
}

catalogue_enum! {
    /// Recommended repetitions-per-set band.
    RepRange, "rep range" {
        OneToThree => "ONE_TO_THREE",
        ThreeToSix => "THREE_TO_SIX",
        FiveToTen => "FIVE_TO_TEN",
        TenToTwenty => "TEN_TO_TWENTY",
        TenToFifteen => "TEN_TO_FIFTEEN",
        TwentyToThirty => "TWENTY_TO_THIRTY",
    }
}

impl RepRange {
    /// Inclusive `(low, high)` repetition bounds.
    #[must_use]
    pub const fn bounds(self) -> (u8, u8) {
        match self {
            Self::OneToThree => (1, 3),
            Self::ThreeToSix => (3, 6),
            Self::FiveToTen => (5, 10),
            Self::TenToTwenty => (10, 20),
            Self::TenToFifteen => (10, 15),
            Self::TwentyToThirty => (20, 30),
        }
    }

    /// Lowest repetition count in the band.
    #[must_use]
    pub const fn low(self) -> u8 {
        self.bounds().0
    }

    /// Highest repetition count in the band.
    #[must_use]
    pub const fn high(self) -> u8 {
        self.bounds().1
    }
}

/// Muscle emphasis keyed by muscle group.
pub type TargetMuscles = BTreeMap<MuscleGroup, TargetMuscleFactor>;

/// Set of preferred repetition bands.
pub type RepRanges = BTreeSet<RepRange>;

/// Client-editable attributes of an exercise.
///
/// Updates replace every field of this struct at once; collections are owned
/// so no caller can mutate a stored exercise through a shared handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDetails {
    pub name: ExerciseName,
    pub notes: String,
    pub target_muscles: TargetMuscles,
    pub preferred_rep_ranges: RepRanges,
}

impl ExerciseDetails {
    /// Details with only a name; notes and collections start empty.
    #[must_use]
    pub fn named(name: ExerciseName) -> Self {
        Self {
            name,
            notes: String::new(),
            target_muscles: TargetMuscles::new(),
            preferred_rep_ranges: RepRanges::new(),
        }
    }
}

/// Stored exercise record.
///
/// ## Invariants
/// - `id` is `None` until storage assigns one and never changes afterwards.
/// - `deleted` is monotonic; only [`Exercise::mark_deleted`] touches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    id: Option<ExerciseId>,
    details: ExerciseDetails,
    deleted: bool,
}

impl Exercise {
    /// A new, unsaved, active exercise.
    #[must_use]
    pub fn new(details: ExerciseDetails) -> Self {
        Self {
            id: None,
            details,
            deleted: false,
        }
    }

    /// Rebuild a stored exercise. Intended for persistence adapters.
    #[must_use]
    pub fn restore(id: ExerciseId, details: ExerciseDetails, deleted: bool) -> Self {
        Self {
            id: Some(id),
            details,
            deleted,
        }
    }

    /// Storage identifier, once assigned.
    #[must_use]
    pub fn id(&self) -> Option<ExerciseId> {
        self.id
    }

    /// Editable attributes.
    #[must_use]
    pub fn details(&self) -> &ExerciseDetails {
        &self.details
    }

    /// Consume the record, returning its editable attributes.
    #[must_use]
    pub fn into_details(self) -> ExerciseDetails {
        self.details
    }

    /// Whether the exercise has been soft-deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Replace every editable attribute.
    pub fn replace_details(&mut self, details: ExerciseDetails) {
        self.details = details;
    }

    /// Soft-delete the exercise. Calling it again has no further effect.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

/// Single-record change applied atomically by a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseMutation {
    /// Overwrite name, notes and both collections.
    Replace(ExerciseDetails),
    /// Set the soft-delete flag.
    SoftDelete,
}

impl ExerciseMutation {
    /// Apply the change to `exercise` in place.
    pub fn apply(self, exercise: &mut Exercise) {
        match self {
            Self::Replace(details) => exercise.replace_details(details),
            Self::SoftDelete => exercise.mark_deleted(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the exercise model.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn squat() -> ExerciseDetails {
        ExerciseDetails {
            name: ExerciseName::new("Back Squat").expect("valid name"),
            notes: String::new(),
            target_muscles: TargetMuscles::from([
                (MuscleGroup::Quads, TargetMuscleFactor::One),
                (MuscleGroup::Glutes, TargetMuscleFactor::PointFive),
            ]),
            preferred_rep_ranges: RepRanges::from([RepRange::FiveToTen]),
        }
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_names_are_rejected(#[case] raw: &str) {
        assert_eq!(
            ExerciseName::new(raw),
            Err(ExerciseValidationError::BlankName)
        );
    }

    #[rstest]
    fn muscle_groups_round_trip_through_wire_names() {
        assert_eq!(MuscleGroup::ALL.len(), 14);
        for group in MuscleGroup::ALL {
            assert_eq!(group.as_str().parse::<MuscleGroup>(), Ok(*group));
        }
    }

    #[rstest]
    fn unknown_wire_name_reports_kind() {
        let err = "NECK".parse::<MuscleGroup>().expect_err("unknown group");
        assert_eq!(err.to_string(), "unknown muscle group `NECK`");
    }

    #[rstest]
    #[case(1.0, Some(TargetMuscleFactor::One))]
    #[case(0.5, Some(TargetMuscleFactor::PointFive))]
    #[case(0.25, None)]
    fn factors_match_numeric_weights(
        #[case] value: f64,
        #[case] expected: Option<TargetMuscleFactor>,
    ) {
        assert_eq!(TargetMuscleFactor::from_factor(value), expected);
    }

    #[rstest]
    #[case(RepRange::OneToThree, (1, 3))]
    #[case(RepRange::ThreeToSix, (3, 6))]
    #[case(RepRange::FiveToTen, (5, 10))]
    #[case(RepRange::TenToTwenty, (10, 20))]
    #[case(RepRange::TenToFifteen, (10, 15))]
    #[case(RepRange::TwentyToThirty, (20, 30))]
    fn rep_ranges_expose_bounds(#[case] range: RepRange, #[case] bounds: (u8, u8)) {
        assert_eq!(range.bounds(), bounds);
        assert!(range.low() <= range.high());
    }

    #[rstest]
    fn enums_serialise_by_name() {
        let value = serde_json::to_value(TargetMuscleFactor::PointFive).expect("serialise");
        assert_eq!(value, serde_json::json!("POINT_FIVE"));
        let range: RepRange = serde_json::from_str("\"TEN_TO_FIFTEEN\"").expect("deserialise");
        assert_eq!(range, RepRange::TenToFifteen);
    }

    #[rstest]
    fn new_exercise_is_unsaved_and_active(squat: ExerciseDetails) {
        let exercise = Exercise::new(squat);
        assert!(exercise.id().is_none());
        assert!(!exercise.is_deleted());
    }

    #[rstest]
    fn replace_discards_previous_collections(squat: ExerciseDetails) {
        let mut exercise = Exercise::restore(ExerciseId::new(1), squat, false);
        let mut replacement =
            ExerciseDetails::named(ExerciseName::new("Row").expect("valid name"));
        replacement
            .target_muscles
            .insert(MuscleGroup::Back, TargetMuscleFactor::PointFive);

        ExerciseMutation::Replace(replacement.clone()).apply(&mut exercise);

        assert_eq!(exercise.details(), &replacement);
        assert_eq!(exercise.id(), Some(ExerciseId::new(1)));
        assert!(exercise.details().preferred_rep_ranges.is_empty());
    }

    #[rstest]
    fn soft_delete_is_idempotent(squat: ExerciseDetails) {
        let mut exercise = Exercise::restore(ExerciseId::new(7), squat.clone(), false);
        ExerciseMutation::SoftDelete.apply(&mut exercise);
        ExerciseMutation::SoftDelete.apply(&mut exercise);
        assert!(exercise.is_deleted());
        assert_eq!(exercise.details(), &squat);
    }
}
