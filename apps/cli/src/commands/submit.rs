//! `formulir submit`: load a snapshot or edit list, apply it through the
//! form, and submit.

use std::path::Path;

use anyhow::{Context, bail};
use formulir_form::prelude::*;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A single `{field, value}` edit.
#[derive(Debug, Deserialize)]
struct Edit {
    field: String,
    value: Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Input {
    Edits(Vec<Edit>),
    Snapshot(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Pretty JSON of the submitted request.
    Submitted(String),
    /// First error message per failing field, in field order.
    Invalid(Vec<(String, String)>),
}

impl Report {
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submitted(json) => f.write_str(json),
            Self::Invalid(errors) => {
                writeln!(f, "Form is invalid:")?;
                for (path, message) in errors {
                    writeln!(f, "  {path}: {message}")?;
                }
                Ok(())
            }
        }
    }
}

pub async fn run(path: &Path, config: FormConfig, check_email: bool) -> anyhow::Result<Report> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let input: Input =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;

    let form = Form::new(config)?;
    match input {
        Input::Snapshot(snapshot) => apply_snapshot(&form, snapshot).await?,
        Input::Edits(edits) => apply_edits(&form, edits).await?,
    }

    if check_email {
        form.blur(Field::Email)?;
        form.settled().await;
    }

    let outcome = form.submit(&MemorySink::new())?;
    form.close();

    match outcome {
        SubmitOutcome::Submitted(values) => Ok(Report::Submitted(render_request(&values)?)),
        SubmitOutcome::Invalid { errors } => Ok(Report::Invalid(
            errors
                .into_iter()
                .filter_map(|(path, errors)| {
                    let first = errors.into_iter().next()?;
                    Some((path.to_string(), first.message.into_owned()))
                })
                .collect(),
        )),
        SubmitOutcome::Pending { fields } => bail!("checks still running on {fields:?}"),
        SubmitOutcome::Busy => bail!("form is already submitting"),
    }
}

/// Sets fields in display order so the hobby lands before its sub-hobby.
async fn apply_snapshot(form: &Form, mut snapshot: Map<String, Value>) -> anyhow::Result<()> {
    if let Some(unknown) = snapshot.keys().find(|key| key.parse::<Field>().is_err()) {
        bail!("unknown field `{unknown}`");
    }
    for field in Field::ALL {
        if let Some(value) = snapshot.remove(field.as_str()) {
            set(form, field.as_str(), value).await?;
        }
    }
    Ok(())
}

async fn apply_edits(form: &Form, edits: Vec<Edit>) -> anyhow::Result<()> {
    for Edit { field, value } in edits {
        match (field.as_str(), value) {
            ("educations[+]", value) => {
                let entry: Education = serde_json::from_value(value)
                    .context("`educations[+]` takes an education entry")?;
                form.push_education(entry)?;
            }
            ("educations[-]", value) => {
                let index: usize = serde_json::from_value(value)
                    .context("`educations[-]` takes an index")?;
                form.remove_education(index)?;
            }
            (path, value) => set(form, path, value).await?,
        }
    }
    Ok(())
}

async fn set(form: &Form, path: &str, value: Value) -> anyhow::Result<()> {
    form.set_json(path, value)
        .with_context(|| format!("setting `{path}`"))?;
    if path == Field::Hobby.as_str() {
        form.settled().await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    fn fast() -> FormConfig {
        FormConfig {
            email_check_delay_ms: 0,
            hobby_debounce_ms: 0,
            hobby_lookup_delay_ms: 0,
            ..FormConfig::default()
        }
    }

    fn write(value: &Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(value.to_string().as_bytes()).unwrap();
        file
    }

    fn snapshot() -> Value {
        json!({
            "name": "Andi Saputra",
            "email": "budi@rubin.com",
            "gender": "female",
            "birthDate": "1998-02-03T00:00:00Z",
            "job": "guru",
            "hobby": "membaca",
            "subHobby": "Komik",
            "educations": [
                {"school": "SMAN 3 Bandung", "degree": "-", "yearRange": "2013-2016"}
            ]
        })
    }

    #[tokio::test]
    async fn test_snapshot_with_catalog_values_submits() {
        let file = write(&snapshot());

        let report = run(file.path(), fast(), true).await.unwrap();

        let Report::Submitted(json) = report else {
            panic!("expected submit, got {report:?}");
        };
        let submitted: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(submitted["job"], json!({"label": "Guru", "value": "guru"}));
        assert_eq!(submitted["subHobby"], json!({"label": "Komik", "value": "Komik"}));
    }

    #[tokio::test]
    async fn test_registered_email_is_reported() {
        let mut input = snapshot();
        input["email"] = json!("Andi@Rubin.com");
        let file = write(&input);

        let report = run(file.path(), fast(), true).await.unwrap();

        assert_eq!(
            report,
            Report::Invalid(vec![(
                "email".to_string(),
                "Email is already registered".to_string()
            )])
        );
    }

    #[tokio::test]
    async fn test_edit_list() {
        let file = write(&json!([
            {"field": "name", "value": "Andi"},
            {"field": "educations[+]", "value": {"school": "S", "degree": "", "yearRange": ""}},
            {"field": "educations[-]", "value": 0}
        ]));

        let report = run(file.path(), fast(), false).await.unwrap();

        let Report::Invalid(errors) = report else {
            panic!("incomplete form must not submit");
        };
        let paths: Vec<&str> = errors.iter().map(|(path, _)| path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "name",
                "email",
                "gender",
                "birthDate",
                "job",
                "educations[0].school",
                "educations[0].degree",
                "educations[0].yearRange",
            ]
        );
        assert_eq!(errors[0].1, "Name must be at least 5 characters");
    }

    #[tokio::test]
    async fn test_unknown_field_fails() {
        let file = write(&json!({"nama": "Andi"}));
        let error = run(file.path(), fast(), false).await.unwrap_err();
        assert!(error.to_string().contains("nama"));
    }
}
