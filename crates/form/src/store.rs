//! Field Store: values plus per-field state.

use crate::catalog::LabelValue;
use crate::error::{FormError, Result};
use crate::field::{EducationPart, Field, FieldPath, FieldValue};
use crate::state::FieldMeta;
use crate::values::{Education, FormValues};

#[derive(Debug, Clone, Default)]
struct EducationMeta {
    school: FieldMeta,
    degree: FieldMeta,
    year_range: FieldMeta,
}

impl EducationMeta {
    fn part(&self, part: EducationPart) -> &FieldMeta {
        match part {
            EducationPart::School => &self.school,
            EducationPart::Degree => &self.degree,
            EducationPart::YearRange => &self.year_range,
        }
    }

    fn part_mut(&mut self, part: EducationPart) -> &mut FieldMeta {
        match part {
            EducationPart::School => &mut self.school,
            EducationPart::Degree => &mut self.degree,
            EducationPart::YearRange => &mut self.year_range,
        }
    }
}

/// Current values and the state of every field.
///
/// Purely synchronous; validation and dependency handling live in
/// [`Form`](crate::Form). `version` increases on every mutation.
#[derive(Debug, Clone)]
pub struct FieldStore {
    values: FormValues,
    fields: [FieldMeta; Field::ALL.len()],
    educations: Vec<EducationMeta>,
    version: u64,
}

impl FieldStore {
    #[must_use]
    pub fn new(values: FormValues) -> Self {
        let educations = vec![EducationMeta::default(); values.educations.len()];
        Self {
            values,
            fields: std::array::from_fn(|_| FieldMeta::new()),
            educations,
            version: 0,
        }
    }

    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The value at `path`; `None` for an education index out of range.
    #[must_use]
    pub fn value(&self, path: FieldPath) -> Option<FieldValue> {
        let values = &self.values;
        let value = match path {
            FieldPath::Field(Field::Name) => FieldValue::Text(values.name.clone()),
            FieldPath::Field(Field::Email) => FieldValue::Text(values.email.clone()),
            FieldPath::Field(Field::Gender) => FieldValue::Gender(values.gender),
            FieldPath::Field(Field::BirthDate) => FieldValue::Date(values.birth_date),
            FieldPath::Field(Field::Job) => FieldValue::Choice(values.job.clone()),
            FieldPath::Field(Field::Hobby) => FieldValue::Choice(values.hobby.clone()),
            FieldPath::Field(Field::SubHobby) => FieldValue::Choice(values.sub_hobby.clone()),
            FieldPath::Field(Field::Educations) => {
                FieldValue::Educations(values.educations.clone())
            }
            FieldPath::Education { index, part } => {
                FieldValue::Text(part.get(values.educations.get(index)?).to_owned())
            }
        };
        Some(value)
    }

    #[must_use]
    pub fn field_meta(&self, field: Field) -> &FieldMeta {
        &self.fields[field as usize]
    }

    pub fn field_meta_mut(&mut self, field: Field) -> &mut FieldMeta {
        &mut self.fields[field as usize]
    }

    #[must_use]
    pub fn meta(&self, path: FieldPath) -> Option<&FieldMeta> {
        match path {
            FieldPath::Field(field) => Some(self.field_meta(field)),
            FieldPath::Education { index, part } => {
                self.educations.get(index).map(|meta| meta.part(part))
            }
        }
    }

    pub fn meta_mut(&mut self, path: FieldPath) -> Option<&mut FieldMeta> {
        match path {
            FieldPath::Field(field) => Some(self.field_meta_mut(field)),
            FieldPath::Education { index, part } => self
                .educations
                .get_mut(index)
                .map(|meta| meta.part_mut(part)),
        }
    }

    /// Replaces the value at `path` and marks the field touched, and dirty
    /// when the value actually changed. Returns whether it changed.
    ///
    /// A disabled field accepts only being cleared.
    pub fn set(&mut self, path: FieldPath, value: FieldValue) -> Result<bool> {
        if value.kind() != path.kind() {
            return Err(FormError::invalid_type(
                path.to_string(),
                path.kind().as_str(),
                value.kind().as_str(),
            ));
        }
        // a disabled field can only be cleared
        if self.meta(path).is_some_and(|meta| !meta.is_enabled())
            && !matches!(value, FieldValue::Choice(None))
        {
            return Err(FormError::disabled(path.to_string()));
        }

        let changed = match (path, value) {
            (FieldPath::Field(Field::Name), FieldValue::Text(text)) => {
                replace(&mut self.values.name, text)
            }
            (FieldPath::Field(Field::Email), FieldValue::Text(text)) => {
                replace(&mut self.values.email, text)
            }
            (FieldPath::Field(Field::Gender), FieldValue::Gender(gender)) => {
                replace(&mut self.values.gender, gender)
            }
            (FieldPath::Field(Field::BirthDate), FieldValue::Date(date)) => {
                replace(&mut self.values.birth_date, date)
            }
            (FieldPath::Field(Field::Job), FieldValue::Choice(choice)) => {
                replace(&mut self.values.job, choice)
            }
            (FieldPath::Field(Field::Hobby), FieldValue::Choice(choice)) => {
                replace(&mut self.values.hobby, choice)
            }
            (FieldPath::Field(Field::SubHobby), FieldValue::Choice(choice)) => {
                replace(&mut self.values.sub_hobby, choice)
            }
            (FieldPath::Field(Field::Educations), FieldValue::Educations(entries)) => {
                self.educations = vec![EducationMeta::default(); entries.len()];
                replace(&mut self.values.educations, entries)
            }
            (FieldPath::Education { index, part }, FieldValue::Text(text)) => {
                let entry = self
                    .values
                    .educations
                    .get_mut(index)
                    .ok_or_else(|| FormError::unknown_field(path.to_string()))?;
                replace(part.get_mut(entry), text)
            }
            (path, value) => {
                return Err(FormError::invalid_type(
                    path.to_string(),
                    path.kind().as_str(),
                    value.kind().as_str(),
                ));
            }
        };

        if let Some(meta) = self.meta_mut(path) {
            meta.mark_touched();
            if changed {
                meta.mark_dirty();
            }
        }
        if changed {
            self.version += 1;
        }
        Ok(changed)
    }

    /// Sets `sub_hobby` to `None` and gives it fresh state.
    pub fn clear_sub_hobby(&mut self) -> Option<LabelValue> {
        self.version += 1;
        *self.field_meta_mut(Field::SubHobby) = FieldMeta::new();
        self.values.sub_hobby.take()
    }

    /// Appends an entry; returns its index.
    pub fn push_education(&mut self, entry: Education) -> usize {
        self.values.educations.push(entry);
        self.educations.push(EducationMeta::default());
        self.touch_educations();
        self.values.educations.len() - 1
    }

    /// Removes the entry at `index`, keeping the order of the rest. The last
    /// remaining entry is never removed.
    pub fn remove_education(&mut self, index: usize) -> bool {
        if self.values.educations.len() <= 1 || index >= self.values.educations.len() {
            return false;
        }
        self.values.educations.remove(index);
        if index < self.educations.len() {
            self.educations.remove(index);
        }
        self.touch_educations();
        true
    }

    /// Replaces every value and clears all state.
    pub fn reset(&mut self, values: FormValues) {
        let version = self.version + 1;
        *self = Self::new(values);
        self.version = version;
    }

    /// Every path with state, in validation order.
    #[must_use]
    pub fn paths(&self) -> Vec<FieldPath> {
        crate::rules::paths_of(&self.values)
    }

    fn touch_educations(&mut self) {
        self.version += 1;
        let meta = self.field_meta_mut(Field::Educations);
        meta.mark_touched();
        meta.mark_dirty();
    }
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new(FormValues::empty())
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Gender;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_marks_touched_and_dirty() {
        let mut store = FieldStore::default();

        let changed = store.set(Field::Name.into(), "Andi Saputra".into()).unwrap();
        assert!(changed);

        let meta = store.meta(Field::Name.into()).unwrap();
        assert!(meta.is_touched());
        assert!(meta.is_dirty());
        assert_eq!(store.values().name, "Andi Saputra");
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_disabled_field_only_accepts_clearing() {
        let mut store = FieldStore::default();
        store.field_meta_mut(Field::SubHobby).set_enabled(false);

        let novel = FieldValue::Choice(Some(LabelValue::new("Novel", "Novel")));
        assert_eq!(
            store.set(Field::SubHobby.into(), novel),
            Err(FormError::disabled("subHobby"))
        );
        assert_eq!(store.values().sub_hobby, None);
        assert!(!store.field_meta(Field::SubHobby).is_touched());

        assert_eq!(store.set(Field::SubHobby.into(), FieldValue::Choice(None)), Ok(false));
    }

    #[test]
    fn test_same_value_touches_without_version_bump() {
        let mut store = FieldStore::default();
        let changed = store.set(Field::Email.into(), "".into()).unwrap();

        assert!(!changed);
        assert_eq!(store.version(), 0);
        let meta = store.meta(Field::Email.into()).unwrap();
        assert!(meta.is_touched());
        assert!(!meta.is_dirty());
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let mut store = FieldStore::default();
        let err = store
            .set(Field::Gender.into(), FieldValue::Text("male".into()))
            .unwrap_err();
        assert_eq!(
            err,
            FormError::invalid_type("gender", "gender", "text")
        );

        assert!(store.set(Field::Gender.into(), Some(Gender::Male).into()).unwrap());
    }

    #[test]
    fn test_education_paths() {
        let mut store = FieldStore::default();
        let path = FieldPath::education(0, EducationPart::School);

        store.set(path, "SDN 1".into()).unwrap();
        assert_eq!(store.value(path), Some(FieldValue::Text("SDN 1".into())));
        assert!(store.meta(path).unwrap().is_dirty());

        let missing = FieldPath::education(4, EducationPart::School);
        assert!(store.value(missing).is_none());
        assert!(matches!(
            store.set(missing, "x".into()),
            Err(FormError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_remove_keeps_last_entry() {
        let mut store = FieldStore::default();
        assert!(!store.remove_education(0));
        assert_eq!(store.values().educations.len(), 1);

        store.push_education(Education::new("SMP 2", "-", "2016-2019"));
        assert!(!store.remove_education(7));
        assert!(store.remove_education(0));
        assert_eq!(
            store.values().educations,
            vec![Education::new("SMP 2", "-", "2016-2019")]
        );
    }

    #[test]
    fn test_remove_shifts_entry_state() {
        let mut store = FieldStore::default();
        store.push_education(Education::default());
        store.push_education(Education::default());
        store
            .set(FieldPath::education(2, EducationPart::Degree), "S1".into())
            .unwrap();

        assert!(store.remove_education(1));

        let moved = store.meta(FieldPath::education(1, EducationPart::Degree)).unwrap();
        assert!(moved.is_dirty());
        assert!(store.meta(FieldPath::education(2, EducationPart::Degree)).is_none());
    }

    #[test]
    fn test_reset_clears_state_and_bumps_version() {
        let mut store = FieldStore::default();
        store.set(Field::Name.into(), "Andi".into()).unwrap();
        let before = store.version();

        store.reset(FormValues::empty());

        assert_eq!(store.values(), &FormValues::empty());
        assert!(!store.meta(Field::Name.into()).unwrap().is_touched());
        assert_eq!(store.version(), before + 1);
    }
}
