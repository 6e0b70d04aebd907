use std::fmt::Write as _;

use formulir_form::Catalog;

/// The catalog as printed by `formulir catalog`.
pub fn render(catalog: &Catalog, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(catalog)?);
    }

    let mut out = String::new();
    writeln!(out, "Jobs:")?;
    for job in &catalog.jobs {
        writeln!(out, "  {:<10} {}", job.value, job.label)?;
    }
    writeln!(out, "Hobbies:")?;
    for hobby in &catalog.hobbies {
        writeln!(out, "  {:<10} {}", hobby.value, hobby.label)?;
        for item in &hobby.items {
            writeln!(out, "    {:<10} {}", item.value, item.label)?;
        }
    }
    writeln!(out, "Genders:")?;
    for gender in &catalog.genders {
        writeln!(out, "  {:<10} {}", gender.value, gender.label)?;
    }
    Ok(out)
}
