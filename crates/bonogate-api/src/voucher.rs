//! Voucher code parsing.
//!
//! Codes arrive as external strings of the form `H-Q-S`, for example
//! `1332-8584OGDTFXURK-1`. Only `h` and `q` are transmitted to the portal;
//! the trailing check segment is retained for display.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An immutable, well-formed voucher code.
///
/// Construction goes through [`FromStr`]; a value of this type is guaranteed
/// to have exactly three non-empty segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherCode {
    h: String,
    q: String,
    s: String,
}

impl VoucherCode {
    /// Identifier segment (e.g. `1332`), sent as the `h` form field.
    pub fn h(&self) -> &str {
        &self.h
    }

    /// Central code segment (e.g. `8584OGDTFXURK`), sent as the `q` form field.
    pub fn q(&self) -> &str {
        &self.q
    }

    /// Trailing check segment. Never transmitted.
    pub fn s(&self) -> &str {
        &self.s
    }
}

impl FromStr for VoucherCode {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Error> {
        let parts: Vec<&str> = raw.split('-').collect();
        match parts.as_slice() {
            [h, q, s] if !h.is_empty() && !q.is_empty() && !s.is_empty() => Ok(Self {
                h: (*h).to_owned(),
                q: (*q).to_owned(),
                s: (*s).to_owned(),
            }),
            _ => Err(Error::Format {
                code: raw.to_owned(),
                reason: "expected exactly 3 non-empty dash-separated segments (XXXX-CODE-X)".into(),
            }),
        }
    }
}

impl fmt::Display for VoucherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.h, self.q, self.s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_code_preserves_segments() {
        let code: VoucherCode = "1332-8584OGDTFXURK-1".parse().expect("should parse");
        assert_eq!(code.h(), "1332");
        assert_eq!(code.q(), "8584OGDTFXURK");
        assert_eq!(code.s(), "1");
    }

    #[test]
    fn display_round_trips() {
        let code: VoucherCode = "1332-8584OGDTFXURK-1".parse().expect("should parse");
        assert_eq!(code.to_string(), "1332-8584OGDTFXURK-1");
    }

    #[test]
    fn two_segments_rejected() {
        let result = "1332-8584OGDTFXURK".parse::<VoucherCode>();
        assert!(matches!(result, Err(Error::Format { .. })));
    }

    #[test]
    fn four_segments_rejected() {
        let result = "1332-8584-OGDT-1".parse::<VoucherCode>();
        assert!(matches!(result, Err(Error::Format { .. })));
    }

    #[test]
    fn empty_segment_rejected() {
        assert!("1332--1".parse::<VoucherCode>().is_err());
        assert!("-8584OGDTFXURK-1".parse::<VoucherCode>().is_err());
        assert!("1332-8584OGDTFXURK-".parse::<VoucherCode>().is_err());
    }

    #[test]
    fn empty_string_rejected() {
        assert!("".parse::<VoucherCode>().is_err());
    }

    #[test]
    fn format_error_carries_the_offending_code() {
        match "oops".parse::<VoucherCode>() {
            Err(Error::Format { code, .. }) => assert_eq!(code, "oops"),
            other => panic!("expected Format error, got: {other:?}"),
        }
    }
}
