// ── Field validation ──
//
// Pure format checks shared by every resource. Each predicate answers
// "is this value well-formed"; the resources decide which fields are
// required and which message to report.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Largest tracking area code (24 bits).
pub const TAC_MAX: u32 = 16_777_215;
/// MTU bounds accepted for a device group's IP domain.
pub const MTU_RANGE: std::ops::RangeInclusive<u32> = 1200..=9000;

static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$")
        .expect("IPv4 pattern is valid")
});

static CIDR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}/[0-9]{1,2}$").expect("CIDR pattern is valid")
});

// ── Validation result ────────────────────────────────────────────────

/// Outcome of validating one form: every failed rule, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<String>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` unless `ok` holds.
    pub fn check(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.errors.push(message.into());
        }
    }

    /// Record `message` when `value` is blank. Returns whether it was present.
    pub fn require(&mut self, value: &str, message: impl Into<String>) -> bool {
        let present = !value.trim().is_empty();
        self.check(present, message);
        present
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CoreError::Validation {
                errors: self.errors,
            })
        }
    }
}

// ── Predicates ───────────────────────────────────────────────────────

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn all_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Exactly 15 decimal digits.
pub fn is_imsi(s: &str) -> bool {
    s.len() == 15 && all_digits(s)
}

/// Exactly 3 decimal digits.
pub fn is_mcc(s: &str) -> bool {
    s.len() == 3 && all_digits(s)
}

/// 2 or 3 decimal digits.
pub fn is_mnc(s: &str) -> bool {
    (2..=3).contains(&s.len()) && all_digits(s)
}

/// MCC followed by MNC: 5 or 6 decimal digits.
pub fn is_plmn_id(s: &str) -> bool {
    (5..=6).contains(&s.len()) && all_digits(s)
}

/// Tracking area code in `1..=16777215`.
pub fn is_tac(s: &str) -> bool {
    parse_in_range(s, 1..=TAC_MAX).is_some()
}

/// Slice differentiator: empty, or exactly 6 hex characters.
pub fn is_sd(s: &str) -> bool {
    s.is_empty() || (s.len() == 6 && all_hex(s))
}

/// Slice/service type: an 8-bit integer.
pub fn is_sst(s: &str) -> bool {
    parse_in_range(s, 0..=255).is_some()
}

/// 128-bit key written as exactly 32 hex characters (K4, Ki, OPc).
pub fn is_hex_key(s: &str) -> bool {
    s.len() == 32 && all_hex(s)
}

/// Dotted-quad IPv4 address, each octet 0-255.
pub fn is_ipv4(s: &str) -> bool {
    IPV4.is_match(s)
}

/// Dotted quad followed by `/` and a 1-2 digit prefix length.
pub fn is_cidr(s: &str) -> bool {
    CIDR.is_match(s)
}

pub fn is_mtu(s: &str) -> bool {
    parse_in_range(s, MTU_RANGE).is_some()
}

/// TCP/UDP port in `1..=65535`.
pub fn is_port(s: &str) -> bool {
    parse_in_range(s, 1..=65_535).is_some()
}

/// Non-negative integer.
pub fn is_non_negative(s: &str) -> bool {
    all_digits(s) && s.parse::<u64>().is_ok()
}

/// Parse a decimal integer and keep it only when it lies in `range`.
pub fn parse_in_range(s: &str, range: std::ops::RangeInclusive<u32>) -> Option<u32> {
    if !all_digits(s) {
        return None;
    }
    s.parse::<u32>().ok().filter(|n| range.contains(n))
}
