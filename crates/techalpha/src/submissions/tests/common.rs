use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::submissions::domain::{
    ContactSubmission, EnrollmentSubmission, PartneringSubmission, RecordId, SubmissionKind,
    SubmissionRecord,
};
use crate::submissions::mailer::{MailError, Mailer, OutboundEmail};
use crate::submissions::repository::{RepositoryError, SubmissionRepository};
use crate::submissions::SubmissionService;

pub(super) const NOTIFY_ADDRESS: &str = "admissions@techalphahub.com";

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<SubmissionRecord>>,
}

impl MemoryRepository {
    pub(super) fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().expect("repository mutex poisoned").clone()
    }

    pub(super) fn count(&self, kind: SubmissionKind) -> usize {
        self.records()
            .iter()
            .filter(|record| record.kind() == kind)
            .count()
    }
}

#[async_trait]
impl SubmissionRepository for MemoryRepository {
    async fn insert(&self, record: SubmissionRecord) -> Result<RecordId, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.push(record);
        Ok(RecordId(format!("rec-{:04}", guard.len())))
    }
}

pub(super) struct UnavailableRepository;

#[async_trait]
impl SubmissionRepository for UnavailableRepository {
    async fn insert(&self, _record: SubmissionRecord) -> Result<RecordId, RepositoryError> {
        let reason = "connection refused".to_string();
        Err(RepositoryError::Unavailable(reason))
    }
}

#[derive(Default)]
pub(super) struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    pub(super) fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        self.sent.lock().expect("mailer mutex poisoned").push(email);
        Ok(())
    }
}

pub(super) struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: OutboundEmail) -> Result<(), MailError> {
        let reason = "535 authentication failed".to_string();
        Err(MailError::Transport(reason))
    }
}

pub(super) type MemoryService = SubmissionService<MemoryRepository, RecordingMailer>;

pub(super) fn build_service() -> (Arc<MemoryService>, Arc<MemoryRepository>, Arc<RecordingMailer>) {
    let repository = Arc::new(MemoryRepository::default());
    let mailer = Arc::new(RecordingMailer::default());
    let service = Arc::new(SubmissionService::new(
        repository.clone(),
        mailer.clone(),
        NOTIFY_ADDRESS,
    ));
    (service, repository, mailer)
}

pub(super) fn contact() -> ContactSubmission {
    ContactSubmission {
        name: Some("Tunde Bakare".to_string()),
        email: Some("tunde@example.com".to_string()),
        message: Some("Is the data analysis class still open?".to_string()),
    }
}

pub(super) fn enrollment() -> EnrollmentSubmission {
    EnrollmentSubmission {
        first_name: Some("Ada".to_string()),
        last_name: Some("Obi".to_string()),
        location: Some("Lekki, Lagos".to_string()),
        city: None,
        state: None,
        class_type: Some("Weekend".to_string()),
        gender: Some("Female".to_string()),
        pre_knowledge: Some("Beginner".to_string()),
        course: Some("Product Design".to_string()),
        email: None,
        phone: None,
    }
}

pub(super) fn partnering() -> PartneringSubmission {
    PartneringSubmission {
        first_name: Some("Chidi".to_string()),
        last_name: Some("Eze".to_string()),
        email: Some("chidi@northwind.ng".to_string()),
        phone: Some("+2348030000000".to_string()),
        address: Some("12 Marina Road, Lagos".to_string()),
        gender: Some("Male".to_string()),
        reason: Some("Sponsor a scholarship cohort".to_string()),
        program: Some("Women in Tech".to_string()),
    }
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
