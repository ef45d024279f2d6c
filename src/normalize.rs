//! Text normalization: party aliasing, romanized slugs and hiragana readings.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Verbose/variant party names mapped to their canonical short labels.
/// Lookup is exact-match; unknown names pass through unchanged.
static PARTY_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("自民党", "自民"),
        ("立憲民主党", "立憲"),
        ("日本維新の会", "維新"),
        ("日本共産党", "共産"),
        ("れいわ新選組", "れいわ"),
        ("日本保守党", "日保"),
        ("無所属連合", "諸派"),
        ("その他", "諸派"),
        ("無所属", "無所属"),
        ("公明党", "公明"),
        ("社民党", "社民"),
        ("国民民主党", "国民"),
        ("参政党", "参政"),
        ("みんなでつくる党", "みんつく"),
        ("NHK党", "N国"),
        ("再生の道", "再道"),
        ("チームみらい", "みらい"),
        ("日本改革党", "日改"),
    ])
});

pub fn unify_party(name: &str) -> String {
    PARTY_ALIASES
        .get(name)
        .map(|s| s.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// True when `text` names a party the alias table knows about, either by its
/// full name or its canonical label. Used for party sub-headings on grouped
/// candidate lists.
pub fn is_party_name(text: &str) -> bool {
    PARTY_ALIASES.contains_key(text) || PARTY_ALIASES.values().any(|v| *v == text)
}

/// Romanize Japanese text into a URL/ID-safe slug: lowercase latin letters
/// and digits, runs of anything else collapsed to a single hyphen.
pub fn slugify_jp(text: &str) -> String {
    let romaji = kakasi::convert(text).romaji.to_lowercase();
    let mut slug = String::with_capacity(romaji.len());
    let mut pending_hyphen = false;
    for c in romaji.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Best-effort hiragana reading for Japanese text.
pub fn to_hiragana(text: &str) -> String {
    kakasi::convert(text).hiragana
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unify_party_maps_known_aliases() {
        assert_eq!(unify_party("自民党"), "自民");
        assert_eq!(unify_party("立憲民主党"), "立憲");
        assert_eq!(unify_party("NHK党"), "N国");
        assert_eq!(unify_party("その他"), "諸派");
    }

    #[test]
    fn unify_party_is_idempotent_on_canonical_labels() {
        for canonical in ["自民", "立憲", "維新", "れいわ", "諸派", "無所属"] {
            assert_eq!(unify_party(&unify_party(canonical)), canonical);
        }
    }

    #[test]
    fn unify_party_passes_unknown_names_through() {
        assert_eq!(unify_party("架空政党"), "架空政党");
    }

    #[test]
    fn is_party_name_accepts_full_and_short_forms() {
        assert!(is_party_name("自民党"));
        assert!(is_party_name("自民"));
        assert!(is_party_name("無所属"));
        assert!(!is_party_name("山田太郎"));
    }

    #[test]
    fn slugify_output_is_lowercase_alphanumeric_with_single_hyphens() {
        for input in ["山田 太郎", "東京", "比例", "Abe, Shinzo!!", "  --x--  "] {
            let slug = slugify_jp(input);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "bad chars in slug {:?}",
                slug
            );
            assert!(!slug.starts_with('-'), "leading hyphen in {:?}", slug);
            assert!(!slug.ends_with('-'), "trailing hyphen in {:?}", slug);
            assert!(!slug.contains("--"), "doubled hyphen in {:?}", slug);
        }
    }

    #[test]
    fn slugify_ascii_input_keeps_word_boundaries() {
        assert_eq!(slugify_jp("Hello, World!"), "hello-world");
        assert_eq!(slugify_jp("B01"), "b01");
    }

    #[test]
    fn slugify_romanizes_japanese() {
        let slug = slugify_jp("山田太郎");
        assert!(!slug.is_empty());
        assert!(slug.is_ascii());
    }

    #[test]
    fn to_hiragana_converts_katakana() {
        assert_eq!(to_hiragana("ヤマダ"), "やまだ");
    }
}
