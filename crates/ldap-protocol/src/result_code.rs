//! Standard directory result codes and their descriptions.
//!
//! The code values and texts follow RFC 4511 section 4.1.9. The lookup
//! never returns an empty string: unknown codes map to a generic
//! description so a non-zero outcome always carries a human-readable
//! explanation.

/// Result code of a successful operation.
pub const SUCCESS: i32 = 0;
/// Result code for invalid credentials during bind.
pub const INVALID_CREDENTIALS: i32 = 49;

/// Returns the standard description for a directory result code.
///
/// The returned text is never empty; codes outside the standard table
/// yield `"unknown result code"`.
#[must_use]
pub fn error_text(code: i32) -> &'static str {
    match code {
        0 => "success",
        1 => "operations error",
        2 => "protocol error",
        3 => "time limit exceeded",
        4 => "size limit exceeded",
        5 => "compare false",
        6 => "compare true",
        7 => "authentication method not supported",
        8 => "stronger authentication required",
        10 => "referral",
        11 => "administrative limit exceeded",
        12 => "unavailable critical extension",
        13 => "confidentiality required",
        14 => "SASL bind in progress",
        16 => "no such attribute",
        17 => "undefined attribute type",
        18 => "inappropriate matching",
        19 => "constraint violation",
        20 => "attribute or value exists",
        21 => "invalid attribute syntax",
        32 => "no such object",
        33 => "alias problem",
        34 => "invalid DN syntax",
        36 => "alias dereferencing problem",
        48 => "inappropriate authentication",
        49 => "invalid credentials",
        50 => "insufficient access rights",
        51 => "busy",
        52 => "unavailable",
        53 => "unwilling to perform",
        54 => "loop detected",
        60 => "sort control missing",
        61 => "offset range error",
        64 => "naming violation",
        65 => "object class violation",
        66 => "not allowed on non-leaf",
        67 => "not allowed on RDN",
        68 => "entry already exists",
        69 => "object class modifications prohibited",
        71 => "affects multiple DSAs",
        76 => "virtual list view error",
        80 => "other",
        _ => "unknown result code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(error_text(SUCCESS), "success");
        assert_eq!(error_text(INVALID_CREDENTIALS), "invalid credentials");
        assert_eq!(error_text(32), "no such object");
        assert_eq!(error_text(68), "entry already exists");
    }

    #[test]
    fn lookup_is_never_empty() {
        for code in -2..200 {
            assert!(!error_text(code).is_empty(), "empty text for code {code}");
        }
    }
}
