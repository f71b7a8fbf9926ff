//! Validated values built from raw request input.
//!
//! Each `parse` takes the field name so a failure can point at the offending
//! input. Values hold the normalized form; uniqueness checks compare that form.

use crate::domain::error::DomainError;

pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_TEXT_LENGTH: usize = 500;
pub const MIN_PASSWORD_LENGTH: usize = 8;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Case-folded form used for case-insensitive uniqueness.
///
/// Folding happens here rather than in SQL: SQLite's `lower()` only folds ASCII.
pub fn match_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Trimmed, non-empty, bounded text identifying something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    pub fn parse(field: &str, raw: &str, max_len: usize) -> Result<Self, DomainError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(DomainError::validation(field, "must not be empty"));
        }
        let len = value.chars().count();
        if len > max_len {
            return Err(DomainError::validation(
                field,
                format!("too long: {len} characters (max: {max_len})"),
            ));
        }
        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Lower-cased e-mail address with a plausible shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn parse(field: &str, raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim().to_lowercase();
        let invalid = || DomainError::validation(field, format!("invalid email: '{}'", raw.trim()));

        if value.is_empty() || value.len() > MAX_EMAIL_LENGTH {
            return Err(invalid());
        }
        if value.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(invalid());
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Phone number reduced to an optional `+` and digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(field: &str, raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let (plus, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '(' | ')' => {}
                _ => {
                    return Err(DomainError::validation(
                        field,
                        format!("invalid character '{c}' in phone number"),
                    ))
                }
            }
        }

        if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
            return Err(DomainError::validation(
                field,
                format!("phone number must have {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits"),
            ));
        }
        Ok(Self(if plus { format!("+{digits}") } else { digits }))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Absolute `http`/`https` URL, kept as entered (trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebUrl(String);

impl WebUrl {
    pub fn parse(field: &str, raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim();
        let url = url::Url::parse(value)
            .map_err(|e| DomainError::validation(field, format!("invalid url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::validation(field, "url scheme must be http or https"));
        }
        if url.host_str().is_none() {
            return Err(DomainError::validation(field, "url must have a host"));
        }
        Ok(Self(value.to_owned()))
    }

    /// `None` and blank input both mean "no URL".
    pub fn parse_optional(field: &str, raw: Option<&str>) -> Result<Option<String>, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) => Self::parse(field, v).map(|u| Some(u.0)),
        }
    }
}

/// Plain-text password before hashing.
pub struct Password(String);

impl Password {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::validation(
                "password",
                format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Free text: trimmed, blank becomes `None`.
pub struct OptionalText;

impl OptionalText {
    pub fn parse(field: &str, raw: Option<&str>) -> Result<Option<String>, DomainError> {
        let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        let len = value.chars().count();
        if len > MAX_TEXT_LENGTH {
            return Err(DomainError::validation(
                field,
                format!("too long: {len} characters (max: {MAX_TEXT_LENGTH})"),
            ));
        }
        Ok(Some(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(e: DomainError) -> String {
        match e {
            DomainError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn name_trims_and_bounds() {
        assert_eq!(Name::parse("name", "  Acme  ", 10).unwrap().as_str(), "Acme");
        assert_eq!(field_of(Name::parse("name", "   ", 10).unwrap_err()), "name");
        assert!(Name::parse("name", "abcdefghijk", 10).is_err());
        // Length counts characters, not bytes.
        assert!(Name::parse("name", "ééééé", 5).is_ok());
    }

    #[test]
    fn match_key_folds_beyond_ascii() {
        assert_eq!(match_key(" École "), match_key("ÉCOLE"));
        assert_eq!(match_key("Straße"), "straße");
    }

    #[test]
    fn email_is_normalized() {
        let e = Email::parse("email", "  Ada.Lovelace@Example.COM ").unwrap();
        assert_eq!(e.as_str(), "ada.lovelace@example.com");
    }

    #[test]
    fn email_rejects_bad_shapes() {
        for bad in [
            "",
            "plain",
            "@example.com",
            "a@b",
            "a@b..com",
            "a@.com",
            "a@b.com.",
            "a@@b.com",
            "a@b@c.com",
            "a b@c.com",
        ] {
            assert!(Email::parse("email", bad).is_err(), "{bad}");
        }
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(Email::parse("email", &long).is_err());
    }

    #[test]
    fn phone_numbers_normalize() {
        assert_eq!(
            PhoneNumber::parse("phone", "+1 (555) 123-4567").unwrap().as_str(),
            "+15551234567"
        );
        assert_eq!(
            PhoneNumber::parse("phone", "555 1234").unwrap().as_str(),
            "5551234"
        );
        assert!(PhoneNumber::parse("phone", "12345").is_err());
        assert!(PhoneNumber::parse("phone", "1234567890123456").is_err());
        assert!(PhoneNumber::parse("phone", "555-CALL-NOW").is_err());
        assert!(PhoneNumber::parse("phone", "++15551234567").is_err());
    }

    #[test]
    fn web_urls_need_http_and_host() {
        assert!(WebUrl::parse("website", "https://acme.example").is_ok());
        assert!(WebUrl::parse("website", "http://localhost:8080/x").is_ok());
        assert!(WebUrl::parse("website", "ftp://acme.example").is_err());
        assert!(WebUrl::parse("website", "acme.example").is_err());
        assert_eq!(WebUrl::parse_optional("website", Some("  ")).unwrap(), None);
        assert_eq!(WebUrl::parse_optional("website", None).unwrap(), None);
    }

    #[test]
    fn optional_text_drops_blank() {
        assert_eq!(OptionalText::parse("d", Some("  hi ")).unwrap().as_deref(), Some("hi"));
        assert_eq!(OptionalText::parse("d", Some("   ")).unwrap(), None);
        assert!(OptionalText::parse("d", Some(&"x".repeat(501))).is_err());
    }

    #[test]
    fn password_length_and_redaction() {
        assert!(Password::parse("short").is_err());
        let p = Password::parse("long-enough").unwrap();
        assert_eq!(p.expose(), "long-enough");
        assert_eq!(format!("{p:?}"), "Password(***)");
    }
}
