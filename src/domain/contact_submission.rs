use super::{EmailAddress, MessageBody, MessageSubject, SubmitterName};

/// One contact-form request's validated field set.
/// Lives for a single request/response cycle; it is never stored.
#[derive(Debug)]
pub struct ContactSubmission {
    pub name: SubmitterName,
    pub email: EmailAddress,
    pub subject: MessageSubject,
    pub message: MessageBody,
}
