//! Input validation for inbound change batches.
//!
//! A malformed row rejects the entire synchronize call before any write,
//! so client and server state never silently diverge. Unrecognized enum
//! values never reach this layer; the typed enums reject them at
//! deserialization.

use crate::messages::ChangeSet;
use crate::records::{ExerciseRecord, SessionRecord, SetRecord};
use thiserror::Error;

/// A malformed inbound row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{collection} row {id:?}: {field} must not be empty")]
    EmptyField {
        /// Collection the row belongs to.
        collection: &'static str,
        /// The row's id, possibly itself empty.
        id: String,
        /// Name of the offending field.
        field: &'static str,
    },

    /// A numeric field is negative or not a finite number.
    #[error("{collection} row {id:?}: {field} must be a finite non-negative number")]
    InvalidNumber {
        /// Collection the row belongs to.
        collection: &'static str,
        /// The row's id.
        id: String,
        /// Name of the offending field.
        field: &'static str,
    },
}

impl ValidationError {
    fn empty(collection: &'static str, id: &str, field: &'static str) -> Self {
        Self::EmptyField {
            collection,
            id: id.to_string(),
            field,
        }
    }

    fn number(collection: &'static str, id: &str, field: &'static str) -> Self {
        Self::InvalidNumber {
            collection,
            id: id.to_string(),
            field,
        }
    }
}

/// Domain validation for inbound protocol values.
pub trait Validate {
    /// Checks the value, returning the first problem found.
    fn validate(&self) -> Result<(), ValidationError>;
}

fn check_finite_non_negative(
    value: Option<f64>,
    collection: &'static str,
    id: &str,
    field: &'static str,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ValidationError::number(collection, id, field)),
        _ => Ok(()),
    }
}

impl Validate for SessionRecord {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::empty("sessions", &self.id, "id"));
        }
        if self.device_id.is_empty() {
            return Err(ValidationError::empty("sessions", &self.id, "deviceId"));
        }
        Ok(())
    }
}

impl Validate for ExerciseRecord {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::empty("exercises", &self.id, "id"));
        }
        if self.name.is_empty() {
            return Err(ValidationError::empty("exercises", &self.id, "name"));
        }
        if self.device_id.is_empty() {
            return Err(ValidationError::empty("exercises", &self.id, "deviceId"));
        }
        check_finite_non_negative(self.default_weight, "exercises", &self.id, "defaultWeight")
    }
}

impl Validate for SetRecord {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::empty("sets", &self.id, "id"));
        }
        if self.session_id.is_empty() {
            return Err(ValidationError::empty("sets", &self.id, "sessionId"));
        }
        if self.exercise_id.is_empty() {
            return Err(ValidationError::empty("sets", &self.id, "exerciseId"));
        }
        if self.device_id.is_empty() {
            return Err(ValidationError::empty("sets", &self.id, "deviceId"));
        }
        check_finite_non_negative(self.weight, "sets", &self.id, "weight")?;
        check_finite_non_negative(self.rpe, "sets", &self.id, "rpe")
    }
}

impl Validate for ChangeSet {
    fn validate(&self) -> Result<(), ValidationError> {
        for row in &self.sessions {
            row.validate()?;
        }
        for row in &self.exercises {
            row.validate()?;
        }
        for row in &self.sets {
            row.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{DeleteState, SessionStatus};
    use crate::version::Version;
    use proptest::prelude::*;

    fn make_session(id: &str, device_id: &str) -> SessionRecord {
        SessionRecord {
            id: id.into(),
            started_at: 1000,
            ended_at: None,
            status: SessionStatus::InProgress,
            deleted: DeleteState::Live,
            updated_at: 1000,
            device_id: device_id.into(),
            version: Version::ZERO,
        }
    }

    fn make_set(id: &str) -> SetRecord {
        SetRecord {
            id: id.into(),
            session_id: "s1".into(),
            exercise_id: "e1".into(),
            weight: Some(60.0),
            reps: Some(8),
            unit: None,
            rpe: None,
            created_at: 1000,
            deleted: DeleteState::Live,
            updated_at: 1000,
            device_id: "dev-a".into(),
            version: Version::ZERO,
        }
    }

    #[test]
    fn valid_session_passes() {
        assert!(make_session("s1", "dev-a").validate().is_ok());
    }

    #[test]
    fn empty_id_rejected() {
        let result = make_session("", "dev-a").validate();
        assert!(matches!(
            result,
            Err(ValidationError::EmptyField { field: "id", .. })
        ));
    }

    #[test]
    fn empty_device_rejected() {
        let result = make_session("s1", "").validate();
        assert!(matches!(
            result,
            Err(ValidationError::EmptyField {
                field: "deviceId",
                ..
            })
        ));
    }

    #[test]
    fn negative_weight_rejected() {
        let mut set = make_set("z1");
        set.weight = Some(-10.0);
        assert!(matches!(
            set.validate(),
            Err(ValidationError::InvalidNumber { field: "weight", .. })
        ));
    }

    #[test]
    fn nan_rpe_rejected() {
        let mut set = make_set("z1");
        set.rpe = Some(f64::NAN);
        assert!(matches!(
            set.validate(),
            Err(ValidationError::InvalidNumber { field: "rpe", .. })
        ));
    }

    #[test]
    fn set_missing_session_reference_rejected() {
        let mut set = make_set("z1");
        set.session_id = String::new();
        assert!(matches!(
            set.validate(),
            Err(ValidationError::EmptyField {
                field: "sessionId",
                ..
            })
        ));
    }

    #[test]
    fn change_set_reports_first_bad_row() {
        let mut changes = ChangeSet::new();
        changes.sessions.push(make_session("s1", "dev-a"));
        changes.sets.push(make_set(""));

        assert!(changes.validate().is_err());
    }

    #[test]
    fn empty_change_set_is_valid() {
        assert!(ChangeSet::new().validate().is_ok());
    }

    proptest! {
        #[test]
        fn finite_non_negative_numbers_validate(
            weight in 0.0f64..2000.0,
            rpe in 0.0f64..10.0,
        ) {
            let mut set = make_set("z1");
            set.weight = Some(weight);
            set.rpe = Some(rpe);
            prop_assert!(set.validate().is_ok());
        }

        #[test]
        fn negative_weight_never_validates(weight in -2000.0f64..-0.001) {
            let mut set = make_set("z1");
            set.weight = Some(weight);
            prop_assert!(set.validate().is_err());
        }
    }
}
