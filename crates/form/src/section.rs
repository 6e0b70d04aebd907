//! Sections group fields the way the form lays them out.

use std::fmt;

use crate::field::{Field, FieldPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Personal,
    Job,
    Other,
    Education,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Personal,
        Section::Job,
        Section::Other,
        Section::Education,
    ];

    #[must_use]
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Personal => &[Field::Name, Field::Email, Field::Gender, Field::BirthDate],
            Self::Job => &[Field::Job],
            Self::Other => &[Field::Hobby, Field::SubHobby],
            Self::Education => &[Field::Educations],
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal Information",
            Self::Job => "Job",
            Self::Other => "Other",
            Self::Education => "Education",
        }
    }

    /// Education entries belong to the education section.
    #[must_use]
    pub fn contains(self, path: FieldPath) -> bool {
        self.fields().contains(&path.field())
    }

    #[must_use]
    pub fn of(field: Field) -> Self {
        Self::ALL
            .into_iter()
            .find(|section| section.fields().contains(&field))
            .unwrap_or(Self::Education)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
