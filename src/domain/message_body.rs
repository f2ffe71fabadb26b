/// Trimmed, non-empty message text of a contact submission.
/// Interior newlines are preserved; they matter when the relay renders the
/// HTML variant of the notification email.
#[derive(Debug)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Message is required".to_string());
        }
        if trimmed.chars().count() > 4096 {
            return Err("Message must be 4096 characters or fewer".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl std::fmt::Display for MessageBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
