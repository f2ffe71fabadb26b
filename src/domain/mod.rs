mod contact_submission;
mod email_address;
mod message_body;
mod message_subject;
mod submitter_name;

pub use contact_submission::ContactSubmission;
pub use email_address::EmailAddress;
pub use message_body::MessageBody;
pub use message_subject::MessageSubject;
pub use submitter_name::SubmitterName;
