use chrono::{DateTime, Utc};
use intake_core::{ImageUploader, Lead, LeadSink, SelectedFile, SideTag, UploadResponse};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::draft::{FormDraft, Phase, SubmitBlocker};
use crate::error::FormError;

/// Completion of one upload, delivered back to the form's owner.
#[derive(Debug)]
pub struct UploadEvent {
    pub side: SideTag,
    pub result: Result<UploadResponse, String>,
}

/// Stateful registration form.
///
/// Field edits and file selection are only legal while `Editing`. Each file
/// selection spawns an upload task; its completion must be fed back through
/// [`apply`](Self::apply) (or the helpers built on it) before the URL shows up.
pub struct RegistrationForm {
    uploader: Arc<dyn ImageUploader>,
    sink: Arc<dyn LeadSink>,
    phase: Phase,
    draft: FormDraft,
    front_task: Option<JoinHandle<()>>,
    back_task: Option<JoinHandle<()>>,
    events_tx: mpsc::UnboundedSender<UploadEvent>,
    events_rx: mpsc::UnboundedReceiver<UploadEvent>,
}

impl RegistrationForm {
    pub fn new(uploader: Arc<dyn ImageUploader>, sink: Arc<dyn LeadSink>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            uploader,
            sink,
            phase: Phase::Editing,
            draft: FormDraft::default(),
            front_task: None,
            back_task: None,
            events_tx,
            events_rx,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn submit_blockers(&self) -> Vec<SubmitBlocker> {
        self.draft.submit_blockers()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Editing && self.draft.submit_blockers().is_empty()
    }

    pub fn is_uploading(&self, side: SideTag) -> bool {
        self.draft
            .slot(side)
            .map(|slot| slot.is_uploading())
            .unwrap_or(false)
    }

    pub fn uploaded_url(&self, side: SideTag) -> Option<&str> {
        self.draft.slot(side).and_then(|slot| slot.url.as_deref())
    }

    pub fn selected_file(&self, side: SideTag) -> Option<&SelectedFile> {
        self.draft.slot(side).and_then(|slot| slot.selected.as_ref())
    }

    /// The back-image control is only shown for biometric documents.
    pub fn is_back_upload_visible(&self) -> bool {
        self.draft.has_biometric
    }

    pub fn is_email_visible(&self) -> bool {
        self.draft.email_visible
    }

    fn ensure_editing(&self) -> Result<(), FormError> {
        if self.phase == Phase::Editing {
            Ok(())
        } else {
            Err(FormError::NotEditing(self.phase))
        }
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editing()?;
        self.draft.full_name = value.into();
        Ok(())
    }

    pub fn set_phone(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editing()?;
        self.draft.phone = value.into();
        Ok(())
    }

    pub fn set_email(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editing()?;
        self.draft.email = value.into();
        Ok(())
    }

    /// Show or hide the optional email input. Hiding keeps the typed value.
    pub fn toggle_email_field(&mut self) -> Result<bool, FormError> {
        self.ensure_editing()?;
        self.draft.email_visible = !self.draft.email_visible;
        Ok(self.draft.email_visible)
    }

    /// Flip the biometric flag. Uploaded URLs are left untouched either way.
    pub fn toggle_biometric(&mut self) -> Result<bool, FormError> {
        self.ensure_editing()?;
        self.draft.has_biometric = !self.draft.has_biometric;
        Ok(self.draft.has_biometric)
    }

    /// Pick a file for `side` and start uploading it.
    ///
    /// A previous upload for the same side keeps running; whichever completes
    /// last decides the side's URL.
    pub fn select_file(&mut self, side: SideTag, file: SelectedFile) -> Result<(), FormError> {
        self.ensure_editing()?;
        let slot = self
            .draft
            .slot_mut(side)
            .ok_or(FormError::UnsupportedSide(side))?;
        slot.selected = Some(file.clone());
        slot.pending += 1;

        tracing::debug!(
            side = %side,
            file_name = %file.file_name,
            size_bytes = file.size(),
            pending = slot.pending,
            "Starting image upload"
        );

        let uploader = Arc::clone(&self.uploader);
        let events_tx = self.events_tx.clone();
        let handle = tokio::spawn(async move {
            let result = uploader
                .upload(side, file)
                .await
                .map_err(|e| format!("{:#}", e));
            if events_tx
                .send(UploadEvent { side, result })
                .is_err()
            {
                tracing::debug!(side = %side, "Form dropped before upload completed");
            }
        });

        let task = match side {
            SideTag::Front => &mut self.front_task,
            _ => &mut self.back_task,
        };
        // Replaced, not aborted.
        if let Some(previous) = task.replace(handle) {
            if !previous.is_finished() {
                tracing::debug!(side = %side, "Earlier upload for this side is still running");
            }
        }
        Ok(())
    }

    /// Apply one upload completion. Returns false if the side has no slot.
    pub fn apply(&mut self, event: UploadEvent) -> bool {
        let Some(slot) = self.draft.slot_mut(event.side) else {
            return false;
        };
        slot.pending = slot.pending.saturating_sub(1);

        match event.result {
            Ok(response) => {
                tracing::info!(
                    side = %event.side,
                    pathname = %response.pathname,
                    "Image upload completed"
                );
                slot.url = Some(response.url);
            }
            Err(error) => {
                tracing::error!(side = %event.side, error = %error, "Image upload failed");
            }
        }
        true
    }

    /// Wait for the next upload completion without applying it.
    pub async fn next_upload_event(&mut self) -> Option<UploadEvent> {
        self.events_rx.recv().await
    }

    /// Apply completions that have already arrived. Returns how many were applied.
    pub fn apply_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.apply(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait until no upload is pending on either side.
    ///
    /// Never returns if an upload hangs.
    pub async fn settle_uploads(&mut self) {
        while self.draft.front.is_uploading() || self.draft.back.is_uploading() {
            match self.events_rx.recv().await {
                Some(event) => {
                    self.apply(event);
                }
                None => break,
            }
        }
    }

    pub async fn submit(&mut self) -> Result<Lead, FormError> {
        self.submit_at(Utc::now()).await
    }

    /// Submit the draft, stamping the lead with `submitted_at`.
    ///
    /// Lead delivery failures are logged and otherwise ignored: the form ends
    /// up `Submitted` either way.
    pub async fn submit_at(&mut self, submitted_at: DateTime<Utc>) -> Result<Lead, FormError> {
        self.ensure_editing()?;
        let blockers = self.draft.submit_blockers();
        if !blockers.is_empty() {
            return Err(FormError::SubmitBlocked(blockers));
        }

        self.phase = Phase::Submitting;
        let lead = self.draft.to_lead(submitted_at);

        match self.sink.deliver(&lead).await {
            Ok(()) => tracing::info!(has_biometric = lead.has_biometric, "Lead submitted"),
            Err(e) => tracing::error!(
                error = %format!("{:#}", e),
                "Lead delivery failed; reporting success to the user"
            ),
        }

        self.phase = Phase::Submitted;
        Ok(lead)
    }

    /// Start over with an empty draft. Only legal once submitted.
    ///
    /// Submission required every upload to have been applied, so no upload
    /// can still be pending here.
    pub fn reset(&mut self) -> Result<(), FormError> {
        if self.phase != Phase::Submitted {
            return Err(FormError::NotSubmitted(self.phase));
        }
        debug_assert!(!self.draft.front.is_uploading() && !self.draft.back.is_uploading());
        self.draft = FormDraft::default();
        self.front_task = None;
        self.back_task = None;
        self.phase = Phase::Editing;
        Ok(())
    }
}
