use intake_core::SideTag;
use thiserror::Error;

use crate::draft::{Phase, SubmitBlocker};

/// Illegal form transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Form cannot be submitted: {}", format_blockers(.0))]
    SubmitBlocked(Vec<SubmitBlocker>),

    #[error("Form is not editable in the {0:?} phase")]
    NotEditing(Phase),

    #[error("Form can only be reset after submission (current phase: {0:?})")]
    NotSubmitted(Phase),

    #[error("Images can only be uploaded for the front or back side, not {0}")]
    UnsupportedSide(SideTag),
}

fn format_blockers(blockers: &[SubmitBlocker]) -> String {
    blockers
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
