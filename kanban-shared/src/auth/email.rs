//! Email address validation
//!
//! Builds on the `validator` crate's HTML5 email check and tightens it:
//! the domain needs a dot and an alphabetic top-level domain of at least two
//! letters, and the local part may not start, end or repeat dots.

use validator::ValidateEmail;

const LOCAL_PART_SYMBOLS: &str = "!#$%&'*+/=?^_`{|}~.-";

/// Returns `true` if `email` is an acceptable account address
///
/// # Example
///
/// ```
/// use kanban_shared::auth::email::is_valid_email;
///
/// assert!(is_valid_email("dana.k@mail.example.com"));
/// assert!(!is_valid_email("dana..k@example.com"));
/// assert!(!is_valid_email("dana@localhost"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    valid_local_part(local) && valid_domain(domain)
}

fn valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SYMBOLS.contains(c))
}

fn valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld = labels[labels.len() - 1];
    labels_ok && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in [
            "user@example.com",
            "first.last@sub.example.org",
            "o'brien+tag@example.co.il",
            "UPPER@EXAMPLE.COM",
        ] {
            assert!(is_valid_email(email), "{} should be valid", email);
        }
    }

    #[test]
    fn test_invalid_local_parts() {
        for email in [
            ".user@example.com",
            "user.@example.com",
            "us..er@example.com",
            "@example.com",
            "us er@example.com",
        ] {
            assert!(!is_valid_email(email), "{} should be invalid", email);
        }
    }

    #[test]
    fn test_invalid_domains() {
        for email in [
            "user@localhost",
            "user@example.c",
            "user@example.123",
            "user@-example.com",
            "user@example..com",
            "user@[127.0.0.1]",
            "user",
            "",
        ] {
            assert!(!is_valid_email(email), "{} should be invalid", email);
        }
    }
}
