//! Question-classification patterns.
//!
//! PII-request patterns match questions asking for personal contact or
//! identification details. Behavioral patterns match requests for a
//! structured (STAR-style) example.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! request_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── PII requests ───────────────────────────────────────────────────────────
request_pattern!(RE_PHONE_REQUEST, r"(?i)\b(your|his|her|their)\s+(phone|mobile|cell)\b|\b(phone|mobile|cell)\s+number\b");
request_pattern!(RE_EMAIL_REQUEST, r"(?i)\b(your|his|her|their)\s+e?mail\b|\be?mail\s+address\b");
request_pattern!(RE_ADDRESS_REQUEST, r"(?i)\b(home|street|mailing)\s+address\b|\bwhere\s+do(es)?\s+\w+\s+live\b");
request_pattern!(RE_SSN_REQUEST, r"(?i)\bsocial\s+security\b|\bssn\b|\b\d{3}-\d{2}-\d{4}\b");
request_pattern!(RE_DOB_REQUEST, r"(?i)\bdate\s+of\s+birth\b|\bbirthday\b|\bhow\s+old\s+(are|is)\b");
request_pattern!(RE_CONTACT_REQUEST, r"(?i)\bcontact\s+(details|information|info)\b|\bwhatsapp\b|\btelegram\s+number\b");
request_pattern!(RE_ID_REQUEST, r"(?i)\b(passport|driver'?s?\s+licen[cs]e|national\s+id)\s*(number)?\b");

// ── Behavioral (STAR-style) requests ──────────────────────────────────────
request_pattern!(RE_TELL_ME_ABOUT_A_TIME, r"(?i)\btell\s+(me|us)\s+about\s+a\s+time\b");
request_pattern!(RE_DESCRIBE_SITUATION, r"(?i)\bdescribe\s+a\s+(situation|time|challenge|conflict)\b");
request_pattern!(RE_GIVE_AN_EXAMPLE, r"(?i)\bgive\s+(me\s+|us\s+)?an?\s+example\s+of\b");
request_pattern!(RE_HOW_DID_YOU_HANDLE, r"(?i)\bhow\s+(did|do|would)\s+you\s+(handle|deal\s+with|approach|resolve)\b");
request_pattern!(RE_HAVE_YOU_EVER, r"(?i)\bhave\s+you\s+ever\s+(dealt|handled|faced|led|managed)\b");
request_pattern!(RE_WALK_ME_THROUGH, r"(?i)\bwalk\s+(me|us)\s+through\s+a\b");
request_pattern!(RE_SHARE_EXPERIENCE, r"(?i)\bshare\s+an?\s+(example|experience|story)\b");

/// Patterns whose match marks the question as PII-seeking.
pub fn pii_request_patterns() -> Vec<&'static LazyLock<Option<Regex>>> {
    vec![
        &RE_PHONE_REQUEST,
        &RE_EMAIL_REQUEST,
        &RE_ADDRESS_REQUEST,
        &RE_SSN_REQUEST,
        &RE_DOB_REQUEST,
        &RE_CONTACT_REQUEST,
        &RE_ID_REQUEST,
    ]
}

/// Patterns whose match marks the question as behavioral.
pub fn behavioral_patterns() -> Vec<&'static LazyLock<Option<Regex>>> {
    vec![
        &RE_TELL_ME_ABOUT_A_TIME,
        &RE_DESCRIBE_SITUATION,
        &RE_GIVE_AN_EXAMPLE,
        &RE_HOW_DID_YOU_HANDLE,
        &RE_HAVE_YOU_EVER,
        &RE_WALK_ME_THROUGH,
        &RE_SHARE_EXPERIENCE,
    ]
}
