use serde::{Deserialize, Serialize};

/// Descriptive metadata of an adapter.
///
/// # Example
/// ```
/// use channel_connector::Manifest;
///
/// let manifest = Manifest::new("webhook", "Webhook", "POSTs content to a URL", "1.0.0");
/// assert_eq!(manifest.name(), "webhook");
/// assert_eq!(manifest.label(), "Webhook");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    name: String,
    label: String,
    description: String,
    version: String,
}

impl Manifest {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: description.into(),
            version: version.into(),
        }
    }

    /// Unique adapter identifier (lowercase, URL safe).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human readable name shown in the admin pages.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Input kind of an adapter option. Drives both rendering and validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Free text.
    Text,
    /// Text rendered as a password input.
    Secret,
    /// Absolute http(s) URL.
    Url,
    /// Signed integer.
    Integer,
}

/// One field of an adapter's configuration schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionField {
    /// Key in `Config::options`.
    pub key: String,
    pub label: String,
    pub kind: OptionKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl OptionField {
    /// Creates an optional field without help text.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            help: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Checks a submitted value against this field's rules.
    ///
    /// Empty optional values are always accepted. The error is a
    /// user-facing message.
    pub fn validate(&self, value: &str) -> Result<(), String> {
        let value = value.trim();

        if value.is_empty() {
            if self.required {
                return Err("This value should not be blank.".to_string());
            }
            return Ok(());
        }

        match self.kind {
            OptionKind::Text | OptionKind::Secret => Ok(()),
            OptionKind::Url => match url::Url::parse(value) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
                _ => Err("This value is not a valid URL.".to_string()),
            },
            OptionKind::Integer => value
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| "This value should be a valid number.".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_blank_rejected() {
        let field = OptionField::new("token", "Token", OptionKind::Secret).required();
        assert!(field.validate("").is_err());
        assert!(field.validate("   ").is_err());
        assert!(field.validate("abc").is_ok());
    }

    #[test]
    fn test_optional_blank_accepted() {
        let field = OptionField::new("endpoint", "Endpoint", OptionKind::Url);
        assert!(field.validate("").is_ok());
    }

    #[test]
    fn test_url_kind() {
        let field = OptionField::new("endpoint", "Endpoint", OptionKind::Url);
        assert!(field.validate("https://example.com/hook").is_ok());
        assert!(field.validate("http://localhost:8080").is_ok());
        assert!(field.validate("ftp://example.com").is_err());
        assert!(field.validate("not a url").is_err());
    }

    #[test]
    fn test_integer_kind() {
        let field = OptionField::new("timeout", "Timeout", OptionKind::Integer);
        assert!(field.validate("30").is_ok());
        assert!(field.validate("-1").is_ok());
        assert!(field.validate("thirty").is_err());
    }

    #[test]
    fn test_option_kind_serializes_lowercase() {
        let json = serde_json::to_string(&OptionKind::Secret).unwrap();
        assert_eq!(json, "\"secret\"");
    }
}
