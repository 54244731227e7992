//! Email address format validation. Used at the boundary wherever a caller
//! supplies a domain or address directly (`providedDomain`, a person's prior
//! `verifiedEmail`), before it reaches DNS or SMTP. Never consults the
//! network.

mod domain;
mod local;
mod types;

pub use types::{EmailError, NormalizedEmail, ValidationMode, ValidationReport};

use domain::check_domain;
use local::{is_local_relaxed, is_local_strict};

/// Validates the **format** of an email address (no MX/SMTP).
///
/// # Examples
/// ```
/// use mailguess_lib::{validate_email, ValidationMode};
/// let r = validate_email("alice@example.com", ValidationMode::Strict).unwrap();
/// assert!(r.ok);
/// ```
pub fn validate_email(email: &str, mode: ValidationMode) -> Result<ValidationReport, EmailError> {
    let input = email.trim();

    let mut reasons = Vec::new();

    // RFC 5321: 254 max including the '@'.
    if input.len() > 254 {
        reasons.push(format!("total length {} > 254", input.len()));
    }

    let parts: Vec<&str> = input.split('@').collect();
    if parts.len() != 2 {
        reasons.push("must contain exactly one '@'".to_string());
        return Ok(ValidationReport { ok: false, reasons });
    }
    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() || local.len() > 64 {
        reasons.push(format!(
            "local part length {} invalid (1..=64)",
            local.len()
        ));
    }

    check_domain(domain, &mut reasons);

    let local_ok = match mode {
        ValidationMode::Strict => is_local_strict(local),
        ValidationMode::Relaxed => is_local_relaxed(local),
    };
    if !local_ok {
        reasons.push(match mode {
            ValidationMode::Strict => "invalid local part (strict rules)".into(),
            ValidationMode::Relaxed => "invalid local part (relaxed rules)".into(),
        });
    }

    let ok = reasons.is_empty();
    Ok(ValidationReport { ok, reasons })
}

/// Splits `email` into local-part/domain and folds the domain to ASCII via
/// IDNA. The local-part is left untouched — SMTP local-parts are
/// case-sensitive in principle; callers that need case-insensitive matching
/// fold separately.
pub fn normalize_email(email: &str, mode: ValidationMode) -> Result<NormalizedEmail, EmailError> {
    let original = email.to_string();
    let report = validate_email(email, mode)?;

    let trimmed = email.trim();
    let (mut local, mut domain) = (String::new(), String::new());
    if let Some((l, d)) = trimmed.split_once('@') {
        local = l.to_string();
        domain = d.to_string();
    }

    let ascii_domain = idna::domain_to_ascii(&domain).unwrap_or_default();

    Ok(NormalizedEmail {
        original,
        local,
        domain,
        ascii_domain,
        mode,
        valid: report.ok,
        reasons: report.reasons,
    })
}
