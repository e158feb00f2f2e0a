//! Contact, registration, and partnership form intake.
//!
//! Each form follows the same path: validate the payload, persist one document, then send the
//! confirmation or notification mail. A mail failure after the insert leaves the document in
//! place.

pub mod domain;
pub mod mailer;
pub mod mongo;
pub mod repository;
pub mod router;
pub mod service;
pub mod templates;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Contact, ContactSubmission, Enrollment, EnrollmentLocation, EnrollmentSubmission, Partnering,
    PartneringSubmission, RecordId, SubmissionKind, SubmissionReceipt, SubmissionRecord,
};
pub use mailer::{MailError, Mailer, OutboundEmail, SmtpMailer};
pub use mongo::MongoSubmissionRepository;
pub use repository::{RepositoryError, SubmissionRepository};
pub use router::submission_router;
pub use service::{SubmissionError, SubmissionService};
pub use validation::ValidationError;
