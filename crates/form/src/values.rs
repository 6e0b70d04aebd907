//! Form values and their defaults.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::LabelValue;
use crate::error::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(FormError::UnknownOption {
                path: "gender".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// One entry of the education list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub year_range: String,
}

impl Education {
    pub fn new(
        school: impl Into<String>,
        degree: impl Into<String>,
        year_range: impl Into<String>,
    ) -> Self {
        Self {
            school: school.into(),
            degree: degree.into(),
            year_range: year_range.into(),
        }
    }
}

/// Everything the form collects, serialized with camelCase keys.
///
/// Unset optional fields are omitted from JSON, so a snapshot that was
/// read from JSON writes back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<LabelValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hobby: Option<LabelValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_hobby: Option<LabelValue>,
    #[serde(default)]
    pub educations: Vec<Education>,
}

impl FormValues {
    /// An empty form with a single blank education entry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            gender: None,
            birth_date: None,
            job: None,
            hobby: None,
            sub_hobby: None,
            educations: vec![Education::default()],
        }
    }

    /// True when anything differs from an empty form. The education list
    /// only counts once it holds more than one entry.
    #[must_use]
    pub fn has_values(&self) -> bool {
        !self.name.is_empty()
            || !self.email.is_empty()
            || self.gender.is_some()
            || self.birth_date.is_some()
            || self.job.is_some()
            || self.hobby.is_some()
            || self.sub_hobby.is_some()
            || self.educations.len() > 1
    }
}

impl Default for FormValues {
    fn default() -> Self {
        Self::empty()
    }
}

/// The values a form starts from and returns to on reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDefaults {
    values: FormValues,
}

impl FormDefaults {
    #[must_use]
    pub fn new(values: FormValues) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }
}

impl From<FormValues> for FormDefaults {
    fn from(values: FormValues) -> Self {
        Self::new(values)
    }
}
