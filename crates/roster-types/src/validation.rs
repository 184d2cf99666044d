//! Field-level constraints shared by all entities.
//!
//! Text fields are checked for blankness and character length; the player
//! email additionally goes through [`validate_email`].

use std::net::IpAddr;

use crate::error::ValidationError;

/// Maximum length, in characters, of every bounded text column.
pub const MAX_FIELD_LENGTH: usize = 255;

const MAX_DOMAIN_LABEL: usize = 63;

/// Characters allowed in an unquoted local part besides ASCII alphanumerics.
const ATEXT_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

/// Reject blank values and values longer than `max` characters (if bounded).
pub fn require_text(
    field: &'static str,
    value: &str,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    check_length(field, value, max)
}

/// Length check only; empty values pass.
pub fn check_length(
    field: &'static str,
    value: &str,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    if let Some(max) = max {
        let actual = value.chars().count();
        if actual > max {
            return Err(ValidationError::TooLong { field, max, actual });
        }
    }
    Ok(())
}

/// Validate an email address.
///
/// Accepts `local@domain` where the local part is a dot-atom or a quoted
/// string, and the domain is `localhost`, a dotted hostname whose last label
/// is at least two characters, or a bracketed IP literal (`user@[10.0.0.1]`).
/// Internationalized domains are not accepted.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidEmail(value.to_string());

    let (local, domain) = value.rsplit_once('@').ok_or_else(invalid)?;

    if !is_valid_local_part(local) || !is_valid_domain(domain) {
        return Err(invalid());
    }
    Ok(())
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() {
        return false;
    }
    if local.len() >= 2 && local.starts_with('"') && local.ends_with('"') {
        return is_valid_quoted_string(&local[1..local.len() - 1]);
    }
    local.split('.').all(|atom| {
        !atom.is_empty()
            && atom
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || ATEXT_SPECIALS.contains(c))
    })
}

fn is_valid_quoted_string(inner: &str) -> bool {
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) if escaped.is_ascii() && escaped != '\r' && escaped != '\n' => {}
                _ => return false,
            },
            '"' => return false,
            c if c.is_ascii() && c != '\r' && c != '\n' && c != '\0' => {}
            _ => return false,
        }
    }
    true
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.eq_ignore_ascii_case("localhost") {
        return true;
    }

    if let Some(literal) = domain
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return literal.parse::<IpAddr>().is_ok();
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };
    if hosts.is_empty() {
        return false;
    }

    let tld_ok = (2..=MAX_DOMAIN_LABEL).contains(&tld.len())
        && !tld.ends_with('-')
        && tld.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    tld_ok && hosts.iter().all(|label| is_valid_host_label(label))
}

fn is_valid_host_label(label: &str) -> bool {
    (1..=MAX_DOMAIN_LABEL).contains(&label.len())
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_blank() {
        assert_eq!(
            require_text("name", "   ", Some(MAX_FIELD_LENGTH)),
            Err(ValidationError::Empty { field: "name" })
        );
    }

    #[test]
    fn test_require_text_counts_characters_not_bytes() {
        let name = "é".repeat(MAX_FIELD_LENGTH);
        assert!(require_text("name", &name, Some(MAX_FIELD_LENGTH)).is_ok());

        let too_long = "é".repeat(MAX_FIELD_LENGTH + 1);
        assert_eq!(
            require_text("name", &too_long, Some(MAX_FIELD_LENGTH)),
            Err(ValidationError::TooLong {
                field: "name",
                max: MAX_FIELD_LENGTH,
                actual: MAX_FIELD_LENGTH + 1,
            })
        );
    }

    #[test]
    fn test_require_text_unbounded() {
        let long = "x".repeat(10_000);
        assert!(require_text("description", &long, None).is_ok());
    }

    #[test]
    fn test_valid_emails() {
        for email in [
            "arwen@rivendell.me",
            "first.last+tag@mail.example.org",
            "o'brien@example.co.uk",
            "root@localhost",
            "admin@[192.168.0.1]",
            "\"john doe\"@example.com",
            "x@a-b.io",
        ] {
            assert!(validate_email(email).is_ok(), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@example",
            "user@example.c",
            "user@-example.com",
            "user@example-.com",
            "user..dots@example.com",
            ".user@example.com",
            "user@exa mple.com",
            "user@[not-an-ip]",
            "user@example.com-",
        ] {
            assert_eq!(
                validate_email(email),
                Err(ValidationError::InvalidEmail(email.to_string())),
                "{email} should be invalid"
            );
        }
    }
}
