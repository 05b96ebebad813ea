//! Patient profile collected before the questionnaire in the profile-first flow.

use serde::{Deserialize, Serialize};

use crate::validation::validate_age;
use crate::{PharmaError, PharmaResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// A completed profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    pub age: u8,
    pub has_other_meds: bool,
}

/// Profile being filled in. Every field starts unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub gender: Option<Gender>,
    pub age: Option<u8>,
    pub has_other_meds: Option<bool>,
}

impl ProfileDraft {
    pub fn is_complete(&self) -> bool {
        self.gender.is_some() && self.age.is_some() && self.has_other_meds.is_some()
    }

    /// Turns the draft into a profile.
    ///
    /// # Errors
    ///
    /// - `PharmaError::ProfileIncomplete` naming the first missing field
    /// - `PharmaError::InvalidInput` if the age is out of range
    pub fn finish(&self) -> PharmaResult<UserProfile> {
        let gender = self
            .gender
            .ok_or(PharmaError::ProfileIncomplete("gender"))?;
        let age = self.age.ok_or(PharmaError::ProfileIncomplete("age"))?;
        let has_other_meds = self
            .has_other_meds
            .ok_or(PharmaError::ProfileIncomplete("has_other_meds"))?;

        validate_age(age)?;

        Ok(UserProfile {
            gender,
            age,
            has_other_meds,
        })
    }
}
