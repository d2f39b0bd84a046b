//! Compact `YYYYMMDD=YYYYMMDD;...` codec for the persisted date map

use crate::models::DateMap;

const PAIR_SEPARATOR: char = ';';
const KEY_VALUE_SEPARATOR: char = '=';

/// Decode a serialized map, silently dropping malformed pairs
///
/// Empty segments and segments without `=` are ignored. Each pair is split on
/// the first `=` only and both halves are trimmed before validation.
pub fn decode(serialized: &str) -> DateMap {
    let mut map = DateMap::new();

    for segment in serialized.split(PAIR_SEPARATOR) {
        let segment = segment.trim();
        let Some((key, value)) = segment.split_once(KEY_VALUE_SEPARATOR) else {
            continue;
        };
        map.insert(key.trim(), value.trim());
    }

    map
}

/// Encode a map as `k=v` pairs joined by `;` in iteration order
pub fn encode(map: &DateMap) -> String {
    map.iter()
        .map(|(key, value)| format!("{key}{KEY_VALUE_SEPARATOR}{value}"))
        .collect::<Vec<_>>()
        .join(&PAIR_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple() {
        let map = decode("20251128=20251126;20251129=20251126");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("20251128"), Some("20251126"));
        assert_eq!(map.get("20251129"), Some("20251126"));
    }

    #[test]
    fn test_decode_tolerates_whitespace_and_empty_segments() {
        assert_eq!(decode(" 20251128 = 20251126 ;; "), decode("20251128=20251126"));
        assert_eq!(decode(";;20251128=20251126;"), decode("20251128=20251126"));
    }

    #[test]
    fn test_decode_drops_malformed_pairs() {
        let map = decode("20251128=20251126;bad=20251126;20251129=2025;novalue;=;20251130=");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("20251128"), Some("20251126"));
    }

    #[test]
    fn test_decode_splits_on_first_equals_only() {
        // The value keeps its '=' and then fails validation
        let map = decode("20251128=2025=1126");
        assert!(map.is_empty());
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode("").is_empty());
        assert!(decode("   ").is_empty());
        assert!(decode(";;;").is_empty());
    }

    #[test]
    fn test_decode_duplicate_key_last_wins() {
        let map = decode("20251128=20251126;20251128=20251127");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("20251128"), Some("20251127"));
    }

    #[test]
    fn test_encode_preserves_order() {
        let map = decode("20251201=20251128;20251128=20251126");
        assert_eq!(encode(&map), "20251201=20251128;20251128=20251126");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&DateMap::new()), "");
    }

    #[test]
    fn test_reencode_is_canonical() {
        let inputs = [
            " 20251128 = 20251126 ;; 20251129=20251126;junk",
            "20251128=20251126;20251128=20251125",
            "",
            "=;;=20251126",
        ];
        for input in inputs {
            let decoded = decode(input);
            assert_eq!(decode(&encode(&decoded)), decoded, "input: {input:?}");
        }
    }
}
