//! # formulir-form
//!
//! A registration form model: typed values, per-field state, a synchronous
//! rule table, async checks with stale-result discarding, and the
//! dependencies between fields.
//!
//! ## Field dependencies
//!
//! - Changing `hobby` clears `subHobby`, recomputes its options and loads
//!   them again after a debounce.
//! - Changing `email` clears the verified flag; blurring it runs the
//!   availability check.
//! - A valid `birthDate` advances to `job`, a `job` advances to `hobby`.
//!
//! ## Quick start
//!
//! ```no_run
//! use formulir_form::prelude::*;
//!
//! # fn demo() -> formulir_form::Result<()> {
//! let form = Form::builder().build()?;
//! form.set_value(Field::Name, "Andi Saputra")?;
//! form.set_json("job", serde_json::json!("guru"))?;
//!
//! match form.submit(&MemorySink::new())? {
//!     SubmitOutcome::Submitted(values) => println!("{}", render_request(&values)?),
//!     SubmitOutcome::Invalid { errors } => println!("{} fields failed", errors.len()),
//!     _ => {}
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod checks;
pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod form;
pub mod manual;
pub mod rules;
pub mod section;
pub mod state;
pub mod store;
pub mod submit;
pub mod values;

pub use catalog::{Catalog, GenderOption, HobbyOption, LabelValue};
pub use config::{EducationLimits, FormConfig};
pub use error::{FormError, Result};
pub use event::FormEvent;
pub use field::{EducationPart, Field, FieldPath, FieldValue, ValueKind};
pub use form::{Form, FormBuilder};
pub use manual::{ManualErrors, ManualForm, ManualSubmit};
pub use rules::{FieldErrors, FormRules};
pub use section::Section;
pub use state::{FieldFlags, FieldMeta};
pub use store::FieldStore;
pub use submit::{MemorySink, SubmitOutcome, SubmitPhase, SubmitSink, render_request};
pub use values::{Education, FormDefaults, FormValues, Gender};

pub mod prelude {
    pub use crate::{
        Catalog, Education, EducationPart, Field, FieldPath, FieldValue, Form, FormConfig,
        FormDefaults, FormError, FormEvent, FormValues, Gender, LabelValue, MemorySink, Section,
        SubmitOutcome, SubmitSink, render_request,
    };
}
