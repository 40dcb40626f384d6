/// Decode a raw SSID as ASCII text.
///
/// Trailing NUL padding is dropped and bytes outside printable ASCII are
/// shown as `?`.
pub fn decode_ssid(raw: &[u8]) -> String {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    raw[..end]
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '?'
            }
        })
        .collect()
}

/// Map a dBm reading onto a 0..=100 link quality.
///
/// -100 dBm and below is 0, -50 dBm and above is 100, linear in between.
pub fn dbm_to_quality(dbm: i32) -> u8 {
    dbm.saturating_add(100).saturating_mul(2).clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn trims_trailing_nuls_only() {
        assert_eq!(decode_ssid(b"cafe\0\0"), "cafe");
        assert_eq!(decode_ssid(b"\0\0\0\0"), "");
        assert_eq!(decode_ssid(b""), "");
        assert_eq!(decode_ssid(b"a\0b\0"), "a?b");
    }

    #[test]
    fn non_ascii_becomes_placeholder_char() {
        assert_eq!(decode_ssid(&[0x63, 0xc3, 0xa9]), "c??");
        assert_eq!(decode_ssid(b"my net"), "my net");
    }

    #[test]
    fn quality_curve_endpoints() {
        assert_eq!(dbm_to_quality(-100), 0);
        assert_eq!(dbm_to_quality(-120), 0);
        assert_eq!(dbm_to_quality(-75), 50);
        assert_eq!(dbm_to_quality(-50), 100);
        assert_eq!(dbm_to_quality(-20), 100);
    }

    proptest! {
        #[test]
        fn quality_is_always_in_range(dbm in any::<i32>()) {
            prop_assert!(dbm_to_quality(dbm) <= 100);
        }

        #[test]
        fn decoded_ssid_never_ends_with_nul(raw in proptest::collection::vec(any::<u8>(), 0..40)) {
            prop_assert!(!decode_ssid(&raw).ends_with('\0'));
        }
    }
}
