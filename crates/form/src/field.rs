//! Field names, paths and typed values.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::catalog::{Catalog, LabelValue};
use crate::error::{FormError, Result};
use crate::values::{Education, Gender};

/// The top-level fields, in display and validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Gender,
    BirthDate,
    Job,
    Hobby,
    SubHobby,
    Educations,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Email,
        Field::Gender,
        Field::BirthDate,
        Field::Job,
        Field::Hobby,
        Field::SubHobby,
        Field::Educations,
    ];

    /// The camelCase key used in JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Gender => "gender",
            Self::BirthDate => "birthDate",
            Self::Job => "job",
            Self::Hobby => "hobby",
            Self::SubHobby => "subHobby",
            Self::Educations => "educations",
        }
    }

    #[must_use]
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Name | Self::Email => ValueKind::Text,
            Self::Gender => ValueKind::Gender,
            Self::BirthDate => ValueKind::Date,
            Self::Job | Self::Hobby | Self::SubHobby => ValueKind::Choice,
            Self::Educations => ValueKind::Educations,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FormError::unknown_field(s))
    }
}

/// A text field inside an education entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EducationPart {
    School,
    Degree,
    YearRange,
}

impl EducationPart {
    pub const ALL: [EducationPart; 3] = [
        EducationPart::School,
        EducationPart::Degree,
        EducationPart::YearRange,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::School => "school",
            Self::Degree => "degree",
            Self::YearRange => "yearRange",
        }
    }

    /// Label used in error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::School => "School",
            Self::Degree => "Degree",
            Self::YearRange => "Year range",
        }
    }

    #[must_use]
    pub fn get(self, entry: &Education) -> &str {
        match self {
            Self::School => &entry.school,
            Self::Degree => &entry.degree,
            Self::YearRange => &entry.year_range,
        }
    }

    pub(crate) fn get_mut(self, entry: &mut Education) -> &mut String {
        match self {
            Self::School => &mut entry.school,
            Self::Degree => &mut entry.degree,
            Self::YearRange => &mut entry.year_range,
        }
    }
}

impl FromStr for EducationPart {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|part| part.as_str() == s)
            .ok_or_else(|| FormError::unknown_field(format!("educations[].{s}")))
    }
}

/// Addresses a top-level field or one text field of an education entry.
///
/// Displays and parses as `"email"` or `"educations[2].school"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    Field(Field),
    Education { index: usize, part: EducationPart },
}

impl FieldPath {
    #[must_use]
    pub fn education(index: usize, part: EducationPart) -> Self {
        Self::Education { index, part }
    }

    /// The top-level field this path belongs to.
    #[must_use]
    pub fn field(self) -> Field {
        match self {
            Self::Field(field) => field,
            Self::Education { .. } => Field::Educations,
        }
    }

    #[must_use]
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Field(field) => field.kind(),
            Self::Education { .. } => ValueKind::Text,
        }
    }
}

impl From<Field> for FieldPath {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.write_str(field.as_str()),
            Self::Education { index, part } => {
                write!(f, "educations[{index}].{}", part.as_str())
            }
        }
    }
}

impl FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        let Some(rest) = s.strip_prefix("educations[") else {
            return s.parse().map(Self::Field);
        };
        let parsed = rest.split_once("].").and_then(|(index, part)| {
            let index = index.parse::<usize>().ok()?;
            let part = part.parse::<EducationPart>().ok()?;
            Some(Self::Education { index, part })
        });
        parsed.ok_or_else(|| FormError::unknown_field(s))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The shape of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Gender,
    Date,
    Choice,
    Educations,
}

impl ValueKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Gender => "gender",
            Self::Date => "date",
            Self::Choice => "choice",
            Self::Educations => "education list",
        }
    }
}

/// A value for one field. `None` variants clear the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Gender(Option<Gender>),
    Date(Option<DateTime<Utc>>),
    Choice(Option<LabelValue>),
    Educations(Vec<Education>),
}

impl FieldValue {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Gender(_) => ValueKind::Gender,
            Self::Date(_) => ValueKind::Date,
            Self::Choice(_) => ValueKind::Choice,
            Self::Educations(_) => ValueKind::Educations,
        }
    }

    /// Reads a JSON value for `path`.
    ///
    /// Choices accept either a full `{label, value}` object or just the
    /// `value` string, which is resolved against `catalog`. A sub-hobby
    /// given as a string is resolved against `hobby`'s sub-list.
    pub fn from_json(
        path: FieldPath,
        json: Value,
        catalog: &Catalog,
        hobby: Option<&LabelValue>,
    ) -> Result<Self> {
        let deser = |e: serde_json::Error| FormError::deserialization(path.to_string(), e.to_string());

        match (path.field(), path) {
            (_, FieldPath::Education { .. }) | (Field::Name | Field::Email, _) => {
                serde_json::from_value(json).map(Self::Text).map_err(deser)
            }
            (Field::Gender, _) => serde_json::from_value(json).map(Self::Gender).map_err(deser),
            (Field::BirthDate, _) => serde_json::from_value(json).map(Self::Date).map_err(deser),
            (Field::Educations, _) => serde_json::from_value(json)
                .map(Self::Educations)
                .map_err(deser),
            (field @ (Field::Job | Field::Hobby | Field::SubHobby), _) => match json {
                Value::Null => Ok(Self::Choice(None)),
                Value::String(value) => {
                    let found = match field {
                        Field::Job => catalog.job(&value).cloned(),
                        Field::Hobby => catalog.hobby(&value).map(|h| h.to_label_value()),
                        _ => hobby.and_then(|h| catalog.sub_hobby(&h.value, &value).cloned()),
                    };
                    found
                        .map(|choice| Self::Choice(Some(choice)))
                        .ok_or_else(|| FormError::unknown_option(path.to_string(), value))
                }
                other => serde_json::from_value(other)
                    .map(|choice| Self::Choice(Some(choice)))
                    .map_err(deser),
            },
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Option<LabelValue>> for FieldValue {
    fn from(choice: Option<LabelValue>) -> Self {
        Self::Choice(choice)
    }
}

impl From<Option<Gender>> for FieldValue {
    fn from(gender: Option<Gender>) -> Self {
        Self::Gender(gender)
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(date: Option<DateTime<Utc>>) -> Self {
        Self::Date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("name", FieldPath::Field(Field::Name))]
    #[case("subHobby", FieldPath::Field(Field::SubHobby))]
    #[case("educations", FieldPath::Field(Field::Educations))]
    #[case("educations[0].school", FieldPath::education(0, EducationPart::School))]
    #[case("educations[12].yearRange", FieldPath::education(12, EducationPart::YearRange))]
    fn test_path_round_trips(#[case] input: &str, #[case] expected: FieldPath) {
        let path: FieldPath = input.parse().unwrap();
        assert_eq!(path, expected);
        assert_eq!(path.to_string(), input);
    }

    #[rstest]
    #[case("nama")]
    #[case("educations[x].school")]
    #[case("educations[0]")]
    #[case("educations[0].city")]
    #[case("Name")]
    fn test_path_rejects(#[case] input: &str) {
        assert!(matches!(
            input.parse::<FieldPath>(),
            Err(FormError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_paths_order_by_field_then_entry() {
        let mut paths = vec![
            FieldPath::education(1, EducationPart::School),
            FieldPath::Field(Field::Educations),
            FieldPath::education(0, EducationPart::Degree),
            FieldPath::Field(Field::Name),
        ];
        paths.sort();
        assert_eq!(
            paths,
            vec![
                FieldPath::Field(Field::Name),
                FieldPath::Field(Field::Educations),
                FieldPath::education(0, EducationPart::Degree),
                FieldPath::education(1, EducationPart::School),
            ]
        );
    }

    #[test]
    fn test_choice_from_value_string() {
        let catalog = Catalog::builtin();
        let job = FieldValue::from_json(Field::Job.into(), json!("guru"), &catalog, None).unwrap();
        assert_eq!(job, FieldValue::Choice(Some(LabelValue::new("Guru", "guru"))));

        let err = FieldValue::from_json(Field::Job.into(), json!("dokter"), &catalog, None)
            .unwrap_err();
        assert_eq!(err.code(), "FORM_UNKNOWN_OPTION");
    }

    #[test]
    fn test_sub_hobby_string_needs_hobby() {
        let catalog = Catalog::builtin();
        let game = LabelValue::new("Game", "game");

        let sub = FieldValue::from_json(Field::SubHobby.into(), json!("esport"), &catalog, Some(&game))
            .unwrap();
        assert_eq!(sub, FieldValue::Choice(Some(LabelValue::new("E-Sport", "esport"))));

        assert!(
            FieldValue::from_json(Field::SubHobby.into(), json!("esport"), &catalog, None).is_err()
        );
    }

    #[test]
    fn test_wrong_json_shape() {
        let catalog = Catalog::builtin();
        let err = FieldValue::from_json(Field::Name.into(), json!(42), &catalog, None).unwrap_err();
        assert!(matches!(err, FormError::Deserialization { ref path, .. } if path == "name"));

        let date = FieldValue::from_json(
            Field::BirthDate.into(),
            json!("2000-01-31T00:00:00Z"),
            &catalog,
            None,
        )
        .unwrap();
        assert_eq!(date.kind(), ValueKind::Date);
    }
}
