use chrono::{DateTime, Utc};

use super::domain::{
    Contact, ContactSubmission, Enrollment, EnrollmentLocation, EnrollmentSubmission, Partnering,
    PartneringSubmission,
};

/// Rejection raised before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl ValidationError {
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            ValidationError::MissingFields(fields) => fields,
        }
    }
}

/// Trims a field and treats blank input as absent.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Collects missing field names in declaration order.
#[derive(Debug, Default)]
pub(crate) struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub(crate) fn take(&mut self, name: &'static str, value: Option<String>) -> String {
        self.check(name, present(value)).unwrap_or_default()
    }

    /// Records `name` as missing when `value` is absent and hands the value back.
    pub(crate) fn check<T>(&mut self, name: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(name);
        }
        value
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        self.finish_with(Some(()))
    }

    /// Resolves a value passed through [`Required::check`] once every field has been seen.
    pub(crate) fn finish_with<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.missing.is_empty() => Ok(value),
            _ => Err(ValidationError::MissingFields(self.missing)),
        }
    }
}

pub fn validate_contact(
    submission: ContactSubmission,
    submitted_at: DateTime<Utc>,
) -> Result<Contact, ValidationError> {
    let mut required = Required::default();
    let name = required.take("name", submission.name);
    let email = required.take("email", submission.email);
    let message = required.take("message", submission.message);
    required.finish()?;

    Ok(Contact {
        name,
        email,
        message,
        submitted_at,
    })
}

pub fn validate_enrollment(
    submission: EnrollmentSubmission,
    submitted_at: DateTime<Utc>,
) -> Result<Enrollment, ValidationError> {
    let mut required = Required::default();
    let first_name = required.take("first_name", submission.first_name);
    let last_name = required.take("last_name", submission.last_name);

    let location = match (
        present(submission.location),
        present(submission.city),
        present(submission.state),
    ) {
        (Some(location), _, _) => Some(EnrollmentLocation::Freeform { location }),
        (None, Some(city), Some(state)) => Some(EnrollmentLocation::CityState { city, state }),
        _ => None,
    };
    let location = required.check("location", location);

    let class_type = required.take("class_type", submission.class_type);
    let gender = required.take("gender", submission.gender);
    let pre_knowledge = required.take("pre_knowledge", submission.pre_knowledge);
    let course = required.take("course", submission.course);
    let location = required.finish_with(location)?;

    Ok(Enrollment {
        first_name,
        last_name,
        location,
        class_type,
        gender,
        pre_knowledge,
        course,
        email: present(submission.email),
        phone: present(submission.phone),
        submitted_at,
    })
}

pub fn validate_partnering(
    submission: PartneringSubmission,
    submitted_at: DateTime<Utc>,
) -> Result<Partnering, ValidationError> {
    let mut required = Required::default();
    let first_name = required.take("first_name", submission.first_name);
    let last_name = required.take("last_name", submission.last_name);
    let email = required.take("email", submission.email);
    let phone = required.take("phone", submission.phone);
    let address = required.take("address", submission.address);
    let gender = required.take("gender", submission.gender);
    let reason = required.take("reason", submission.reason);
    let program = required.take("program", submission.program);
    required.finish()?;

    Ok(Partnering {
        first_name,
        last_name,
        email,
        phone,
        address,
        gender,
        reason,
        program,
        submitted_at,
    })
}
