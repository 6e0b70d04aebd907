//! The synchronous rule table.
//!
//! One function per field, run in [`Field::ALL`] order. Each returns the
//! field's errors with the one to show first.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use formulir_validator::prelude::*;

use crate::catalog::{Catalog, LabelValue};
use crate::config::EducationLimits;
use crate::field::{EducationPart, Field, FieldPath};
use crate::values::{Education, FormValues, Gender};

/// Errors per failing field, in field order.
pub type FieldErrors = BTreeMap<FieldPath, Vec<ValidationError>>;

#[derive(Debug, Clone)]
pub struct FormRules {
    catalog: Arc<Catalog>,
    education: EducationLimits,
}

impl FormRules {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, education: EducationLimits) -> Self {
        Self { catalog, education }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Errors for one field against the whole snapshot; `now` bounds the
    /// birth date.
    #[must_use]
    pub fn check(
        &self,
        path: FieldPath,
        values: &FormValues,
        now: DateTime<Utc>,
    ) -> Vec<ValidationError> {
        let result = match path {
            FieldPath::Field(Field::Name) => Self::name(&values.name),
            FieldPath::Field(Field::Email) => Self::email(&values.email),
            FieldPath::Field(Field::Gender) => Self::gender(values.gender),
            FieldPath::Field(Field::BirthDate) => Self::birth_date(values.birth_date, now),
            FieldPath::Field(Field::Job) => self.job(values.job.as_ref()),
            FieldPath::Field(Field::Hobby) => self.hobby(values.hobby.as_ref()),
            FieldPath::Field(Field::SubHobby) => {
                self.sub_hobby(values.hobby.as_ref(), values.sub_hobby.as_ref())
            }
            FieldPath::Field(Field::Educations) => Self::educations(&values.educations),
            FieldPath::Education { index, part } => match values.educations.get(index) {
                Some(entry) => self.education_part(part, entry),
                None => Ok(()),
            },
        };

        match result {
            Ok(()) => Vec::new(),
            Err(error) => vec![error.with_field(path.to_string())],
        }
    }

    /// Runs every rule and keeps the failing fields.
    #[must_use]
    pub fn check_all(&self, values: &FormValues, now: DateTime<Utc>) -> FieldErrors {
        paths_of(values)
            .into_iter()
            .filter_map(|path| {
                let errors = self.check(path, values, now);
                (!errors.is_empty()).then_some((path, errors))
            })
            .collect()
    }

    /// Checks only the text format of an email, as the async check needs.
    #[must_use]
    pub fn email_is_well_formed(&self, email: &str) -> bool {
        Self::email(email).is_ok()
    }

    fn name(name: &str) -> Result<(), ValidationError> {
        not_empty()
            .message("Name is required")
            .and(min_length(5).message("Name must be at least 5 characters"))
            .validate(name)
    }

    fn email(email: &str) -> Result<(), ValidationError> {
        not_empty()
            .message("Email is required")
            .and(formulir_validator::validators::email().message("Invalid email format"))
            .validate(email)
    }

    fn gender(gender: Option<Gender>) -> Result<(), ValidationError> {
        required::<Gender>()
            .message("Gender is required")
            .validate(&gender)
    }

    fn birth_date(
        birth_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let Some(date) = birth_date else {
            return Err(ValidationError::new("required", "Birth date is required"));
        };
        max(now)
            .message("Birth date cannot be in the future")
            .with_code("future_date")
            .validate(&date)
    }

    fn job(&self, job: Option<&LabelValue>) -> Result<(), ValidationError> {
        let Some(job) = job else {
            return Err(ValidationError::new("required", "Job is required"));
        };
        one_of(self.catalog.jobs.clone())
            .message("Job must be one of the listed options")
            .validate(job)
    }

    fn hobby(&self, hobby: Option<&LabelValue>) -> Result<(), ValidationError> {
        one_of(self.catalog.hobby_options())
            .message("Hobby must be one of the listed options")
            .optional()
            .validate(&hobby.cloned())
    }

    fn sub_hobby(
        &self,
        hobby: Option<&LabelValue>,
        sub_hobby: Option<&LabelValue>,
    ) -> Result<(), ValidationError> {
        match (hobby, sub_hobby) {
            (None, None) => Ok(()),
            (None, Some(_)) => Err(ValidationError::new(
                "orphan_sub_hobby",
                "Sub hobby requires a hobby",
            )),
            (Some(_), None) => Err(ValidationError::new("required", "Sub hobby is required")),
            (Some(hobby), Some(sub_hobby)) => {
                one_of(self.catalog.sub_hobbies(&hobby.value).to_vec())
                    .message("Sub hobby does not belong to the selected hobby")
                    .validate(sub_hobby)
            }
        }
    }

    fn educations(educations: &[Education]) -> Result<(), ValidationError> {
        min_size::<Education>(1)
            .message("At least one education entry is required")
            .validate(educations)
    }

    fn education_part(&self, part: EducationPart, entry: &Education) -> Result<(), ValidationError> {
        let min = match part {
            EducationPart::School => self.education.school,
            EducationPart::Degree => self.education.degree,
            EducationPart::YearRange => self.education.year_range,
        };
        let label = part.label();
        not_empty()
            .message(format!("{label} is required"))
            .and(min_length(min).message(format!("{label} must be at least {min} characters")))
            .validate(part.get(entry))
    }
}

/// Every path the rules look at for `values`, in order.
#[must_use]
pub fn paths_of(values: &FormValues) -> Vec<FieldPath> {
    let mut paths: Vec<FieldPath> = Field::ALL.into_iter().map(FieldPath::Field).collect();
    for index in 0..values.educations.len() {
        paths.extend(
            EducationPart::ALL
                .into_iter()
                .map(|part| FieldPath::education(index, part)),
        );
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn rules() -> FormRules {
        FormRules::new(Arc::new(Catalog::builtin()), EducationLimits::default())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn messages(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_ref()).collect()
    }

    #[rstest]
    #[case("", Some("Name is required"))]
    #[case("Andi", Some("Name must be at least 5 characters"))]
    #[case("Andi Saputra", None)]
    fn test_name(#[case] name: &str, #[case] expected: Option<&str>) {
        let values = FormValues {
            name: name.into(),
            ..FormValues::empty()
        };
        let errors = rules().check(Field::Name.into(), &values, now());
        assert_eq!(messages(&errors).first().copied(), expected);
    }

    #[rstest]
    #[case("", Some("Email is required"))]
    #[case("not-an-email", Some("Invalid email format"))]
    #[case("x@y.com", None)]
    fn test_email(#[case] email: &str, #[case] expected: Option<&str>) {
        let values = FormValues {
            email: email.into(),
            ..FormValues::empty()
        };
        let errors = rules().check(Field::Email.into(), &values, now());
        assert_eq!(messages(&errors).first().copied(), expected);
    }

    #[test]
    fn test_birth_date_bounded_by_now() {
        let rules = rules();
        let mut values = FormValues::empty();

        let errors = rules.check(Field::BirthDate.into(), &values, now());
        assert_eq!(messages(&errors), ["Birth date is required"]);

        values.birth_date = Some(now());
        assert!(rules.check(Field::BirthDate.into(), &values, now()).is_empty());

        values.birth_date = Some(now() + chrono::TimeDelta::days(1));
        let errors = rules.check(Field::BirthDate.into(), &values, now());
        assert_eq!(errors[0].code, "future_date");
    }

    #[test]
    fn test_job_must_come_from_catalog() {
        let rules = rules();
        let mut values = FormValues::empty();
        assert_eq!(
            messages(&rules.check(Field::Job.into(), &values, now())),
            ["Job is required"]
        );

        values.job = Some(LabelValue::new("Dokter", "dokter"));
        assert_eq!(
            rules.check(Field::Job.into(), &values, now())[0].code,
            "one_of"
        );

        values.job = Some(LabelValue::new("Guru", "guru"));
        assert!(rules.check(Field::Job.into(), &values, now()).is_empty());
    }

    #[rstest]
    #[case(None, None, None)]
    #[case(Some(("Game", "game")), None, Some("required"))]
    #[case(Some(("Game", "game")), Some(("Komik", "Komik")), Some("one_of"))]
    #[case(Some(("Game", "game")), Some(("E-Sport", "esport")), None)]
    #[case(None, Some(("Novel", "Novel")), Some("orphan_sub_hobby"))]
    fn test_sub_hobby_depends_on_hobby(
        #[case] hobby: Option<(&str, &str)>,
        #[case] sub_hobby: Option<(&str, &str)>,
        #[case] code: Option<&str>,
    ) {
        let values = FormValues {
            hobby: hobby.map(|(l, v)| LabelValue::new(l, v)),
            sub_hobby: sub_hobby.map(|(l, v)| LabelValue::new(l, v)),
            ..FormValues::empty()
        };
        let errors = rules().check(Field::SubHobby.into(), &values, now());
        assert_eq!(errors.first().map(|e| e.code.as_ref()), code);
    }

    #[test]
    fn test_education_entries() {
        let rules = rules();
        let values = FormValues {
            educations: vec![Education::new("SD", "-", "2010-2016")],
            ..FormValues::empty()
        };

        let school = rules.check(FieldPath::education(0, EducationPart::School), &values, now());
        assert_eq!(messages(&school), ["School must be at least 5 characters"]);
        assert_eq!(school[0].field.as_deref(), Some("educations[0].school"));

        let degree = rules.check(FieldPath::education(0, EducationPart::Degree), &values, now());
        assert!(degree.is_empty());

        // out of range entries have nothing to check
        let missing = rules.check(FieldPath::education(3, EducationPart::School), &values, now());
        assert!(missing.is_empty());
    }

    #[test]
    fn test_check_all_on_broken_snapshot() {
        let values = FormValues {
            name: String::new(),
            email: "not-an-email".into(),
            gender: Some(Gender::Male),
            birth_date: Some(now() - chrono::TimeDelta::days(9000)),
            educations: Vec::new(),
            ..FormValues::empty()
        };
        let errors = rules().check_all(&values, now());

        let failing: Vec<String> = errors.keys().map(ToString::to_string).collect();
        assert_eq!(failing, ["name", "email", "job", "educations"]);
    }

    #[test]
    fn test_check_all_on_valid_snapshot() {
        let values = FormValues {
            name: "Andi Saputra".into(),
            email: "x@y.com".into(),
            gender: Some(Gender::Male),
            birth_date: Some(now() - chrono::TimeDelta::days(9000)),
            job: Some(LabelValue::new("Guru", "guru")),
            hobby: None,
            sub_hobby: None,
            educations: vec![Education::new("SDN 1", "-", "2010-2016")],
        };
        assert_eq!(rules().check_all(&values, now()), FieldErrors::new());
    }
}
