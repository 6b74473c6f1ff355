//! Test doubles for the form's ports.

#![allow(dead_code)]

use async_trait::async_trait;
use intake_core::{ImageUploader, Lead, LeadSink, SelectedFile, SideTag, UploadResponse};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub fn png(name: &str) -> SelectedFile {
    SelectedFile::new(name, "image/png", bytes::Bytes::from_static(b"png-bytes"))
}

pub fn response_for(side: SideTag, name: &str) -> UploadResponse {
    UploadResponse {
        url: format!("https://blob/id-{}-123-{}", side, name),
        pathname: format!("id-{}-123-{}", side, name),
    }
}

/// Uploader that answers immediately.
pub struct InstantUploader {
    pub fail_sides: Vec<SideTag>,
}

impl InstantUploader {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail_sides: Vec::new(),
        })
    }

    pub fn failing_for(side: SideTag) -> Arc<Self> {
        Arc::new(Self {
            fail_sides: vec![side],
        })
    }
}

#[async_trait]
impl ImageUploader for InstantUploader {
    async fn upload(&self, side: SideTag, file: SelectedFile) -> anyhow::Result<UploadResponse> {
        if self.fail_sides.contains(&side) {
            anyhow::bail!("API request failed with status 500: Failed to upload file");
        }
        Ok(response_for(side, &file.file_name))
    }
}

/// Uploader whose calls only complete when the test releases them.
///
/// Each upload waits on the gate registered for its file name.
#[derive(Default)]
pub struct GatedUploader {
    gates: Mutex<HashMap<String, oneshot::Receiver<anyhow::Result<UploadResponse>>>>,
}

pub struct Gates {
    senders: HashMap<String, oneshot::Sender<anyhow::Result<UploadResponse>>>,
}

impl Gates {
    pub fn release(&mut self, file_name: &str, result: anyhow::Result<UploadResponse>) {
        let sender = self
            .senders
            .remove(file_name)
            .expect("gate already released");
        assert!(sender.send(result).is_ok(), "upload task is gone");
    }
}

impl GatedUploader {
    pub fn with_gates(file_names: &[&str]) -> (Arc<Self>, Gates) {
        let uploader = GatedUploader::default();
        let mut senders = HashMap::new();
        {
            let mut gates = uploader.gates.lock().unwrap();
            for name in file_names {
                let (tx, rx) = oneshot::channel();
                senders.insert(name.to_string(), tx);
                gates.insert(name.to_string(), rx);
            }
        }
        (Arc::new(uploader), Gates { senders })
    }
}

#[async_trait]
impl ImageUploader for GatedUploader {
    async fn upload(&self, _side: SideTag, file: SelectedFile) -> anyhow::Result<UploadResponse> {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .remove(&file.file_name)
            .expect("no gate for file");
        gate.await?
    }
}

/// Sink that records every delivered lead.
#[derive(Default)]
pub struct RecordingSink {
    pub leads: Mutex<Vec<Lead>>,
}

impl RecordingSink {
    pub fn delivered(&self) -> Vec<Lead> {
        self.leads.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeadSink for RecordingSink {
    async fn deliver(&self, lead: &Lead) -> anyhow::Result<()> {
        self.leads.lock().unwrap().push(lead.clone());
        Ok(())
    }
}

/// Sink that always fails, like an unreachable webhook.
pub struct FailingSink;

#[async_trait]
impl LeadSink for FailingSink {
    async fn deliver(&self, _lead: &Lead) -> anyhow::Result<()> {
        anyhow::bail!("Lead webhook returned non-2xx status: 502 - Bad Gateway")
    }
}

/// Sink that accepts and drops every lead.
pub struct NoOpLeadSink;

#[async_trait]
impl LeadSink for NoOpLeadSink {
    async fn deliver(&self, _lead: &Lead) -> anyhow::Result<()> {
        Ok(())
    }
}
