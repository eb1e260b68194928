//! Tag UID normalization.
//!
//! Readers report the UID in their native byte order, either as
//! colon-separated groups (`04:A3:B1:9F`) or as a contiguous hex string
//! (`04A3B19F`). The canonical identity is the decimal value of the first
//! `declared_length` byte groups read in reverse order, left-padded to at
//! least ten digits.
//!
//! The padding only aligns numeric and lexical lookups. It does not keep tags
//! of different native widths apart: `01:00:00:00` read as four bytes and `01`
//! read as one byte both canonicalize to `0000000001`. Principals are matched
//! on this value alone, so mixed-width reader fleets can collide.

/// Number of byte groups kept when the reader does not declare a length.
pub const DEFAULT_DECLARED_LENGTH: usize = 4;

/// Minimum width of the canonical decimal identity.
pub const CANONICAL_MIN_DIGITS: usize = 10;

const SEPARATOR: char = ':';

/// Decode diagnostics for one scanned tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedUid {
    /// Tag as received, trimmed
    pub original: String,
    /// All byte groups, zero-padded and uppercased, colon-separated
    pub standardized: String,
    /// Truncated then reversed groups, colon-separated
    pub processed: String,
    pub declared_length: usize,
    /// Canonical identity; `None` when the processed groups are not valid hex
    pub identity: Option<String>,
}

impl DecodedUid {
    pub fn is_decodable(&self) -> bool {
        self.identity.is_some()
    }

    /// Numeric value behind the canonical identity.
    pub fn value(&self) -> Option<u128> {
        self.identity.as_deref().and_then(|digits| digits.parse().ok())
    }
}

/// Declared lengths of zero or none fall back to the default.
pub fn effective_length(declared_length: Option<u32>) -> usize {
    match declared_length {
        Some(length) if length > 0 => length as usize,
        _ => DEFAULT_DECLARED_LENGTH,
    }
}

/// Canonicalizes a raw tag.
///
/// Never fails: a tag that does not parse as hex yields a `DecodedUid` without
/// identity, and the scan is still processed as an unknown identity.
pub fn canonicalize(raw_tag: &str, declared_length: Option<u32>) -> DecodedUid {
    let original = raw_tag.trim().to_string();
    let length = effective_length(declared_length);

    let groups = split_groups(&original);
    let mut processed: Vec<String> = groups.iter().take(length).cloned().collect();
    processed.reverse();

    DecodedUid {
        standardized: groups.join(":"),
        identity: parse_identity(&processed.concat()),
        processed: processed.join(":"),
        declared_length: length,
        original,
    }
}

fn split_groups(tag: &str) -> Vec<String> {
    let groups: Vec<String> = if tag.contains(SEPARATOR) {
        tag.split(SEPARATOR).map(|group| group.trim().to_string()).collect()
    } else {
        let chars: Vec<char> = tag.chars().filter(|c| !c.is_whitespace()).collect();
        chars.chunks(2).map(|pair| pair.iter().collect()).collect()
    };

    groups
        .into_iter()
        .map(|group| format!("{:0>2}", group.to_ascii_uppercase()))
        .collect()
}

fn parse_identity(hex: &str) -> Option<String> {
    // from_str_radix tolerates a leading '+', tags must not
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u128::from_str_radix(hex, 16)
        .ok()
        .map(|value| format!("{:0width$}", value, width = CANONICAL_MIN_DIGITS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_reference_tag() {
        let decoded = canonicalize("04:A3:B1:9F", Some(4));

        assert_eq!(decoded.original, "04:A3:B1:9F");
        assert_eq!(decoded.standardized, "04:A3:B1:9F");
        assert_eq!(decoded.processed, "9F:B1:A3:04");
        assert_eq!(decoded.identity.as_deref(), Some("2679218948"));
        assert_eq!(decoded.value(), Some(0x9FB1A304));
    }

    #[test]
    fn test_declared_length_beyond_tag_keeps_every_group() {
        let decoded = canonicalize("04:A3:B1:9F", Some(33));
        assert_eq!(decoded.processed, "9F:B1:A3:04");
        assert_eq!(decoded.identity.as_deref(), Some("2679218948"));
        assert_eq!(decoded.declared_length, 33);
    }

    #[test]
    fn test_canonicalize_is_separator_insensitive() {
        let with_separator = canonicalize("04:A3:B1:9F", Some(4));
        let contiguous = canonicalize("04A3B19F", Some(4));

        assert_eq!(with_separator.identity, contiguous.identity);
        assert_eq!(with_separator.standardized, contiguous.standardized);
        assert_eq!(with_separator.processed, contiguous.processed);
    }

    #[test]
    fn test_canonicalize_pads_and_uppercases_groups() {
        let decoded = canonicalize(" 4:a3:b1:9f ", Some(4));

        assert_eq!(decoded.original, "4:a3:b1:9f");
        assert_eq!(decoded.standardized, "04:A3:B1:9F");
        assert_eq!(decoded.identity.as_deref(), Some("2679218948"));
    }

    #[test]
    fn test_canonicalize_table() {
        let cases: [(&str, Option<u32>, &str, Option<&str>); 9] = [
            ("04:A3:B1:9F:11:22:33", Some(4), "9F:B1:A3:04", Some("2679218948")),
            ("04:A3:B1:9F:11:22:33", Some(2), "A3:04", Some("0000041732")),
            ("04:A3:B1:9F:11:22:33", Some(7), "33:22:11:9F:B1:A3:04", Some("14392682901250820")),
            ("04:A3", Some(7), "A3:04", Some("0000041732")),
            ("04A3B19F", None, "9F:B1:A3:04", Some("2679218948")),
            ("04A3B19F", Some(0), "9F:B1:A3:04", Some("2679218948")),
            ("00:00:00:01", Some(4), "01:00:00:00", Some("0016777216")),
            ("ZZ:A3", Some(4), "A3:ZZ", None),
            ("+1", Some(4), "+1", None),
        ];

        for (raw, length, processed, identity) in cases {
            let decoded = canonicalize(raw, length);
            assert_eq!(decoded.processed, processed, "processed for {raw} / {length:?}");
            assert_eq!(decoded.identity.as_deref(), identity, "identity for {raw} / {length:?}");
        }
    }

    #[test]
    fn test_truncation_happens_before_reversal() {
        let decoded = canonicalize("A3:04:FF:FF", Some(1));
        assert_eq!(decoded.processed, "A3");
        assert_eq!(decoded.identity.as_deref(), Some("0000000163"));
    }

    #[test]
    fn test_canonicalize_is_idempotent_on_its_own_output() {
        for raw in ["04:A3:B1:9F", "4:a3:b1:9f", "04A3B19F", "01:02:03:04:05:06:07", "a:b"] {
            let first = canonicalize(raw, Some(4));
            let again = canonicalize(&first.standardized, Some(4));

            assert_eq!(first.standardized, again.standardized);
            assert_eq!(first.processed, again.processed);
            assert_eq!(first.identity, again.identity);
            assert_eq!(canonicalize(raw, Some(4)), first);
        }
    }

    #[test]
    fn test_odd_contiguous_tag_pads_the_last_group() {
        let decoded = canonicalize("4A3B1", Some(4));
        assert_eq!(decoded.standardized, "4A:3B:01");
        assert_eq!(decoded.processed, "01:3B:4A");
    }

    #[test]
    fn test_mixed_width_tags_collide() {
        let four_bytes = canonicalize("01:00:00:00", Some(4));
        let one_byte = canonicalize("01", Some(1));
        assert_eq!(four_bytes.identity, one_byte.identity);
        assert_eq!(one_byte.identity.as_deref(), Some("0000000001"));
    }

    #[test]
    fn test_empty_or_oversized_tags_have_no_identity() {
        assert_eq!(canonicalize("", Some(4)).identity, None);

        let seventeen_bytes = vec!["FF"; 17].join(":");
        assert_eq!(canonicalize(&seventeen_bytes, Some(17)).identity, None);
        assert!(canonicalize(&seventeen_bytes, Some(16)).is_decodable());
    }
}
