//! Registration form state machine
//!
//! Collects the applicant's details and two identity-document images, uploads
//! each image as soon as it is picked, gates submission on the required fields
//! and outstanding uploads, and relays the finished [`Lead`](intake_core::Lead)
//! to the lead sink.
//!
//! The form is owned by a single task. Uploads run as spawned tasks and report
//! back through a channel; the owner applies those completions in arrival order.

pub mod draft;
pub mod error;
pub mod form;
pub mod setup;

pub use draft::{FormDraft, Phase, SubmitBlocker, UploadSlot};
pub use error::FormError;
pub use form::{RegistrationForm, UploadEvent};
pub use setup::{build_form, create_lead_sink};
