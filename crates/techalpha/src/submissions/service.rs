use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    ContactSubmission, EnrollmentSubmission, PartneringSubmission, RecordId, SubmissionReceipt,
    SubmissionRecord,
};
use super::mailer::{MailError, Mailer, OutboundEmail};
use super::repository::{RepositoryError, SubmissionRepository};
use super::templates;
use super::validation::{
    validate_contact, validate_enrollment, validate_partnering, ValidationError,
};

pub const CONTACT_RECEIVED: &str = "Form submitted successfully, and email sent!";
pub const ENROLLMENT_RECEIVED: &str = "Registration successful, and email sent!";
pub const PARTNERING_RECEIVED: &str = "Partnership request submitted successfully, and email sent!";

/// Service composing validation, the submission store, and the mailer.
pub struct SubmissionService<R, M> {
    repository: Arc<R>,
    mailer: Arc<M>,
    notify_address: String,
}

impl<R, M> SubmissionService<R, M>
where
    R: SubmissionRepository + 'static,
    M: Mailer + 'static,
{
    /// `notify_address` receives internal notices for new registrations.
    pub fn new(repository: Arc<R>, mailer: Arc<M>, notify_address: impl Into<String>) -> Self {
        Self {
            repository,
            mailer,
            notify_address: notify_address.into(),
        }
    }

    pub async fn submit_contact(
        &self,
        submission: ContactSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let contact = validate_contact(submission, Utc::now())?;
        let email = templates::contact_confirmation(&contact);

        let id = self.persist(SubmissionRecord::Contact(contact)).await?;
        self.mailer.send(email).await?;

        Ok(SubmissionReceipt {
            id,
            message: CONTACT_RECEIVED,
        })
    }

    pub async fn submit_enrollment(
        &self,
        submission: EnrollmentSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let enrollment = validate_enrollment(submission, Utc::now())?;
        let notification = templates::enrollment_notification(&enrollment, &self.notify_address);
        let mut outbound = vec![notification];
        outbound.extend(templates::enrollment_confirmation(&enrollment));

        let id = self.persist(SubmissionRecord::Enrollment(enrollment)).await?;
        self.deliver(outbound).await?;

        Ok(SubmissionReceipt {
            id,
            message: ENROLLMENT_RECEIVED,
        })
    }

    pub async fn submit_partnering(
        &self,
        submission: PartneringSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let partnering = validate_partnering(submission, Utc::now())?;
        let email = templates::partnering_confirmation(&partnering);

        let id = self.persist(SubmissionRecord::Partnering(partnering)).await?;
        self.mailer.send(email).await?;

        Ok(SubmissionReceipt {
            id,
            message: PARTNERING_RECEIVED,
        })
    }

    async fn persist(&self, record: SubmissionRecord) -> Result<RecordId, SubmissionError> {
        let collection = record.kind().collection();
        let id = self.repository.insert(record).await?;
        info!(collection, id = %id.0, "submission persisted");
        Ok(id)
    }

    /// Stops at the first failure; earlier messages are not recalled.
    async fn deliver(&self, outbound: Vec<OutboundEmail>) -> Result<(), SubmissionError> {
        for email in outbound {
            self.mailer.send(email).await?;
        }
        Ok(())
    }
}

/// Error raised by the submission service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Mail(#[from] MailError),
}
