use unicode_segmentation::UnicodeSegmentation;

/// Struct to hold the validated name of the person submitting the form.
/// The only way to create a `SubmitterName` is through [`SubmitterName::parse`],
/// so consumers of this type are always guaranteed a trimmed, non-empty name.
///
/// The error messages returned here are surfaced verbatim as the API's
/// per-field validation messages.
#[derive(Debug)]
pub struct SubmitterName(String);

impl SubmitterName {
    /// Returns an instance of `SubmitterName` if the input satisfies all
    /// our validation constraints on submitter names.
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Name is required".to_string());
        }

        // Using graphemes as some characters are perceived as a single character
        // but are composed of several.
        if trimmed.graphemes(true).count() > 256 {
            return Err("Name must be 256 characters or fewer".to_string());
        }

        let forbidden_characters = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        if trimmed.chars().any(|g| forbidden_characters.contains(&g)) {
            return Err("Name contains invalid characters".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl std::fmt::Display for SubmitterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubmitterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
