use validator::validate_email;

/// Represents a syntactically valid, normalized email address.
/// Normalization is trim + lowercase; no existence verification happens here.
#[derive(Debug, Clone)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: String) -> Result<Self, String> {
        let normalized = s.trim().to_lowercase();

        if validate_email(&normalized) {
            Ok(Self(normalized))
        } else {
            Err("Valid email is required".to_string())
        }
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
