//! Masking of recipients and user identifiers for log output

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)]
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

/// Check whether a recipient looks like an email address
pub fn is_email_address(recipient: &str) -> bool {
    EMAIL_REGEX.is_match(recipient.trim())
}

/// Mask a recipient for display
///
/// Email addresses keep the first character of the local part and the
/// domain (`a****@example.com`); anything else keeps its last four
/// characters (`****5678`).
pub fn mask_recipient(recipient: &str) -> String {
    let recipient = recipient.trim();

    if is_email_address(recipient) {
        if let Some((local, domain)) = recipient.split_once('@') {
            let first: String = local.chars().take(1).collect();
            return format!("{}****@{}", first, domain);
        }
    }

    let chars: Vec<char> = recipient.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
