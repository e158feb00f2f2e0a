//! Plain-text bodies for the confirmation and notification mails.

use super::domain::{Contact, Enrollment, Partnering};
use super::mailer::OutboundEmail;

const BRAND: &str = "TechAlpha Hub";

fn signature() -> String {
    format!("Best regards,\n{BRAND} Team")
}

pub fn contact_confirmation(contact: &Contact) -> OutboundEmail {
    OutboundEmail {
        to: contact.email.clone(),
        subject: format!("Thank You for Contacting {BRAND}"),
        body: format!(
            "Hello {},\n\nThank you for reaching out to us. We have received your message:\n\"{}\"\n\nWe'll get back to you soon.\n\n{}",
            contact.name,
            contact.message,
            signature()
        ),
    }
}

/// Internal heads-up so staff can follow up on a new registration.
pub fn enrollment_notification(enrollment: &Enrollment, notify_address: &str) -> OutboundEmail {
    let mut lines = vec![
        format!("Name: {}", enrollment.full_name()),
        format!("Course: {}", enrollment.course),
        format!("Class type: {}", enrollment.class_type),
        format!("Location: {}", enrollment.location.display()),
        format!("Gender: {}", enrollment.gender),
        format!("Prior knowledge: {}", enrollment.pre_knowledge),
    ];
    if let Some(email) = &enrollment.email {
        lines.push(format!("Email: {email}"));
    }
    if let Some(phone) = &enrollment.phone {
        lines.push(format!("Phone: {phone}"));
    }
    lines.push(format!(
        "Submitted: {}",
        enrollment.submitted_at.format("%Y-%m-%d %H:%M UTC")
    ));

    OutboundEmail {
        to: notify_address.to_string(),
        subject: format!(
            "New {} registration: {}",
            enrollment.course,
            enrollment.full_name()
        ),
        body: format!("A new student has registered.\n\n{}\n", lines.join("\n")),
    }
}

/// Only sent when the student left an email address.
pub fn enrollment_confirmation(enrollment: &Enrollment) -> Option<OutboundEmail> {
    let email = enrollment.email.as_ref()?;
    Some(OutboundEmail {
        to: email.clone(),
        subject: format!("Your {BRAND} Registration"),
        body: format!(
            "Hello {},\n\nThank you for registering for {} ({}). Our team will contact you shortly with onboarding details.\n\n{}",
            enrollment.first_name,
            enrollment.course,
            enrollment.class_type,
            signature()
        ),
    })
}

pub fn partnering_confirmation(partnering: &Partnering) -> OutboundEmail {
    OutboundEmail {
        to: partnering.email.clone(),
        subject: format!("Thank You for Partnering with {BRAND}"),
        body: format!(
            "Hello {},\n\nThank you for your interest in partnering with us on the {} program. We have received your details and will be in touch soon.\n\n{}",
            partnering.first_name,
            partnering.program,
            signature()
        ),
    }
}
