//! Form data and the submit gate.
//!
//! Everything here is synchronous; the async parts live in `form`.

use chrono::{DateTime, Utc};
use intake_core::{Lead, SelectedFile, SideTag};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Outer phase of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitting,
    Submitted,
}

/// One reason the submit control is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocker {
    MissingFullName,
    MissingPhone,
    MissingFrontImage,
    UploadInProgress(SideTag),
}

impl Display for SubmitBlocker {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SubmitBlocker::MissingFullName => f.write_str("full name is required"),
            SubmitBlocker::MissingPhone => f.write_str("phone is required"),
            SubmitBlocker::MissingFrontImage => f.write_str("front image is required"),
            SubmitBlocker::UploadInProgress(side) => write!(f, "{} image is still uploading", side),
        }
    }
}

/// Upload state for one side of the document.
#[derive(Debug, Clone, Default)]
pub struct UploadSlot {
    /// Most recently picked file
    pub selected: Option<SelectedFile>,
    /// URL of the upload that completed last
    pub url: Option<String>,
    /// Uploads started for this side that have not completed yet
    pub pending: usize,
}

impl UploadSlot {
    pub fn is_uploading(&self) -> bool {
        self.pending > 0
    }
}

/// Everything the user has entered so far.
#[derive(Debug, Clone, Default)]
pub struct FormDraft {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub email_visible: bool,
    pub has_biometric: bool,
    pub front: UploadSlot,
    pub back: UploadSlot,
}

impl FormDraft {
    pub fn slot(&self, side: SideTag) -> Option<&UploadSlot> {
        match side {
            SideTag::Front => Some(&self.front),
            SideTag::Back => Some(&self.back),
            SideTag::Unknown => None,
        }
    }

    pub fn slot_mut(&mut self, side: SideTag) -> Option<&mut UploadSlot> {
        match side {
            SideTag::Front => Some(&mut self.front),
            SideTag::Back => Some(&mut self.back),
            SideTag::Unknown => None,
        }
    }

    /// Reasons the draft cannot be submitted, in display order. Empty when the gate is open.
    pub fn submit_blockers(&self) -> Vec<SubmitBlocker> {
        let mut blockers = Vec::new();
        if self.full_name.trim().is_empty() {
            blockers.push(SubmitBlocker::MissingFullName);
        }
        if self.phone.trim().is_empty() {
            blockers.push(SubmitBlocker::MissingPhone);
        }
        if self.front.url.is_none() {
            blockers.push(SubmitBlocker::MissingFrontImage);
        }
        if self.front.is_uploading() {
            blockers.push(SubmitBlocker::UploadInProgress(SideTag::Front));
        }
        if self.back.is_uploading() {
            blockers.push(SubmitBlocker::UploadInProgress(SideTag::Back));
        }
        blockers
    }

    /// Build the lead for submission at `submitted_at`.
    ///
    /// Both URLs are sent as they stand, whatever the biometric flag; a blank email is sent as null.
    pub fn to_lead(&self, submitted_at: DateTime<Utc>) -> Lead {
        let email = self.email.trim();
        Lead {
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: (!email.is_empty()).then(|| email.to_string()),
            id_front_url: self.front.url.clone(),
            id_back_url: self.back.url.clone(),
            has_biometric: self.has_biometric,
            submitted_at,
        }
    }
}
