//! Static reference data: jobs, hobbies with their sub-hobbies, genders.

use serde::{Deserialize, Serialize};

use crate::values::Gender;

/// A `{label, value}` option as shown in a picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelValue {
    pub label: String,
    pub value: String,
}

impl LabelValue {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A hobby and the sub-hobbies that may be chosen under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HobbyOption {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub items: Vec<LabelValue>,
}

impl HobbyOption {
    /// The option without its sub-list, as stored in `FormValues::hobby`.
    #[must_use]
    pub fn to_label_value(&self) -> LabelValue {
        LabelValue::new(self.label.clone(), self.value.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderOption {
    pub label: String,
    pub value: Gender,
}

/// Reference data a form is validated against.
///
/// Passed to the form at construction; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub jobs: Vec<LabelValue>,
    pub hobbies: Vec<HobbyOption>,
    pub genders: Vec<GenderOption>,
}

impl Catalog {
    /// The built-in lists.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            jobs: vec![
                LabelValue::new("TNI", "tni"),
                LabelValue::new("Polisi", "polisi"),
                LabelValue::new("Guru", "guru"),
                LabelValue::new("Petani", "petani"),
            ],
            hobbies: vec![
                HobbyOption {
                    label: "Membaca".into(),
                    value: "membaca".into(),
                    items: vec![
                        LabelValue::new("Novel", "Novel"),
                        LabelValue::new("Komik", "Komik"),
                    ],
                },
                HobbyOption {
                    label: "Game".into(),
                    value: "game".into(),
                    items: vec![
                        LabelValue::new("E-Sport", "esport"),
                        LabelValue::new("Sepak Bola", "sepak-bola"),
                    ],
                },
            ],
            genders: vec![
                GenderOption {
                    label: "Laki-laki".into(),
                    value: Gender::Male,
                },
                GenderOption {
                    label: "Perempuan".into(),
                    value: Gender::Female,
                },
            ],
        }
    }

    #[must_use]
    pub fn job(&self, value: &str) -> Option<&LabelValue> {
        self.jobs.iter().find(|job| job.value == value)
    }

    #[must_use]
    pub fn hobby(&self, value: &str) -> Option<&HobbyOption> {
        self.hobbies.iter().find(|hobby| hobby.value == value)
    }

    /// Hobbies as plain options, in catalog order.
    #[must_use]
    pub fn hobby_options(&self) -> Vec<LabelValue> {
        self.hobbies.iter().map(HobbyOption::to_label_value).collect()
    }

    /// Sub-hobbies of the hobby with `hobby_value`; empty for unknown hobbies.
    #[must_use]
    pub fn sub_hobbies(&self, hobby_value: &str) -> &[LabelValue] {
        match self.hobby(hobby_value) {
            Some(hobby) => &hobby.items,
            None => &[],
        }
    }

    /// Looks `value` up in `hobby_value`'s sub-list.
    #[must_use]
    pub fn sub_hobby(&self, hobby_value: &str, value: &str) -> Option<&LabelValue> {
        self.sub_hobbies(hobby_value)
            .iter()
            .find(|item| item.value == value)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
