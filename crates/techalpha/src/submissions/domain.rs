use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store when a submission is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

/// Raw contact form payload. Every field is optional so that absent keys surface as
/// validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Raw class registration payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentSubmission {
    #[serde(alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(alias = "lastName")]
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(alias = "classType")]
    pub class_type: Option<String>,
    pub gender: Option<String>,
    #[serde(alias = "preKnowledge")]
    pub pre_knowledge: Option<String>,
    pub course: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Raw partnership enquiry payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartneringSubmission {
    #[serde(alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(alias = "lastName")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub reason: Option<String>,
    pub program: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Where a student will attend from. Forms send either a free-text location or a city/state pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EnrollmentLocation {
    Freeform { location: String },
    CityState { city: String, state: String },
}

impl EnrollmentLocation {
    pub fn display(&self) -> String {
        match self {
            EnrollmentLocation::Freeform { location } => location.clone(),
            EnrollmentLocation::CityState { city, state } => format!("{city}, {state}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrollment {
    pub first_name: String,
    pub last_name: String,
    pub location: EnrollmentLocation,
    pub class_type: String,
    pub gender: String,
    pub pre_knowledge: String,
    pub course: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partnering {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub gender: String,
    pub reason: String,
    pub program: String,
    pub submitted_at: DateTime<Utc>,
}

/// Collections the service writes to, one per form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    Contact,
    Enrollment,
    Partnering,
}

impl SubmissionKind {
    pub fn collection(self) -> &'static str {
        match self {
            SubmissionKind::Contact => "contacts",
            SubmissionKind::Enrollment => "enrollments",
            SubmissionKind::Partnering => "partnerings",
        }
    }
}

/// A validated submission ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionRecord {
    Contact(Contact),
    Enrollment(Enrollment),
    Partnering(Partnering),
}

impl SubmissionRecord {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            SubmissionRecord::Contact(_) => SubmissionKind::Contact,
            SubmissionRecord::Enrollment(_) => SubmissionKind::Enrollment,
            SubmissionRecord::Partnering(_) => SubmissionKind::Partnering,
        }
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        match self {
            SubmissionRecord::Contact(record) => record.submitted_at,
            SubmissionRecord::Enrollment(record) => record.submitted_at,
            SubmissionRecord::Partnering(record) => record.submitted_at,
        }
    }
}

/// Result handed back to the HTTP layer after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub id: RecordId,
    pub message: &'static str,
}
