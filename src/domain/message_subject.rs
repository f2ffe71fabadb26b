/// Trimmed, non-empty subject line of a contact submission.
#[derive(Debug)]
pub struct MessageSubject(String);

impl MessageSubject {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Subject is required".to_string());
        }
        if trimmed.chars().count() > 256 {
            return Err("Subject must be 256 characters or fewer".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl std::fmt::Display for MessageSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MessageSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
