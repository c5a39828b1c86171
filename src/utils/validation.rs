//! Offline address checks. Nothing here touches the network.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

/// Dot-atom local part and a dotted hostname ending in an alphabetic TLD.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .expect("Email syntax regex failed to compile. This is a bug.")
});

static DISPOSABLE_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "10minutemail.com",
        "guerrillamail.com",
        "mailinator.com",
        "tempmail.org",
        "yopmail.com",
        "throwaway.email",
        "temp-mail.org",
        "getnada.com",
        "trashmail.com",
        "sharklasers.com",
        "dispostable.com",
        "maildrop.cc",
    ]
    .into_iter()
    .collect()
});

/// Permissive RFC 5322 style syntax check.
///
/// Accepts plus-addressing, subdomains and long TLDs. Non-ASCII addresses are
/// always rejected.
pub fn is_valid_syntax(email: &str) -> bool {
    if email.len() > MAX_ADDRESS_LEN {
        return false;
    }
    match email.split_once('@') {
        Some((local, _)) if local.len() <= MAX_LOCAL_LEN => EMAIL_REGEX.is_match(email),
        _ => false,
    }
}

/// Lower-cased text after the first `@`, or `None` when there is no `@`.
///
/// This is a plain split, not validation: `user@middle@example.com` yields
/// `middle@example.com`.
pub fn extract_domain(email: &str) -> Option<String> {
    email
        .split_once('@')
        .map(|(_, domain)| domain.to_lowercase())
}

/// Case-insensitive lookup in the built-in list of throwaway mail domains.
pub fn is_disposable_domain(domain: &str) -> bool {
    DISPOSABLE_DOMAINS.contains(domain.trim().to_lowercase().as_str())
}

/// Whether the address's domain is a known disposable one.
pub fn is_disposable_email(email: &str) -> bool {
    extract_domain(email).is_some_and(|domain| is_disposable_domain(&domain))
}
