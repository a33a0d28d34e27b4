//! Locale part of [`ResTableConfig`]: packed language/region codes, BCP-47 tags
//! and the region heuristics used by the best-match comparator.

use std::cmp::Ordering;

use log::warn;

use crate::res_table_config::{ResTableConfig, copy_truncated};

pub(crate) const ENGLISH: [u8; 2] = *b"en";
pub(crate) const UNITED_STATES: [u8; 2] = *b"US";
pub(crate) const TAGALOG: [u8; 2] = *b"tl";
/// `fil` packed as a three letter code
pub(crate) const FILIPINO: [u8; 2] = [0xad, 0x05];

/// Regions whose English is treated as US English rather than International
/// English (`en-001`) descendants.
const US_ENGLISH_REGIONS: [&[u8; 2]; 8] = [b"US", b"AS", b"GU", b"MH", b"MP", b"PR", b"UM", b"VI"];

/// Pack a language or region code into two bytes.
///
/// Two character codes are stored as-is, three character codes are packed
/// into 15 bits relative to `base` with the high bit set:
///
/// ```text
/// {1, t, t, t, t, t, s, s, s, s, s, f, f, f, f, f}
/// ```
pub(crate) fn pack_language_or_region(value: &str, base: u8) -> [u8; 2] {
    let bytes = value.as_bytes();

    match bytes.len() {
        0 | 1 => [0, 0],
        2 => [bytes[0], bytes[1]],
        _ if bytes[2] == b'-' => [bytes[0], bytes[1]],
        _ => {
            let first = bytes[0].wrapping_sub(base) & 0x7f;
            let second = bytes[1].wrapping_sub(base) & 0x7f;
            let third = bytes[2].wrapping_sub(base) & 0x7f;

            [0x80 | (third << 2) | (second >> 3), (second << 5) | first]
        }
    }
}

/// Reverse of [`pack_language_or_region`], empty for the "any" value
pub(crate) fn unpack_language_or_region(value: [u8; 2], base: u8) -> String {
    if value == [0, 0] {
        return String::new();
    }

    if value[0] & 0x80 != 0 {
        let first = value[1] & 0x1f;
        let second = ((value[1] & 0xe0) >> 5) + ((value[0] & 0x03) << 3);
        let third = (value[0] & 0x7c) >> 2;

        return [first, second, third]
            .iter()
            .map(|v| base.wrapping_add(*v) as char)
            .collect();
    }

    value.iter().map(|v| *v as char).collect()
}

/// Zero-terminated ASCII field as a string
fn field_str(field: &[u8]) -> String {
    field
        .iter()
        .take_while(|b| **b != 0)
        .map(|b| *b as char)
        .collect()
}

pub(crate) fn langs_are_equivalent(lang1: [u8; 2], lang2: [u8; 2]) -> bool {
    lang1 == lang2
        || (lang1 == TAGALOG && lang2 == FILIPINO)
        || (lang1 == FILIPINO && lang2 == TAGALOG)
}

/// Returns true if English in `region` should prefer US English resources
pub(crate) fn is_close_to_us_english(region: [u8; 2]) -> bool {
    region == [0, 0] || US_ENGLISH_REGIONS.iter().any(|r| **r == region)
}

/// Compare how well two candidate regions serve the requested region.
///
/// Positive means `left` is closer. The exact region wins, then a candidate
/// without a region (the parent of every region), then anything else.
pub(crate) fn compare_regions(left: [u8; 2], right: [u8; 2], requested: [u8; 2]) -> i32 {
    if left == right {
        return 0;
    }

    let score = |region: [u8; 2]| match region {
        r if r == requested => 2,
        [0, 0] => 1,
        _ => 0,
    };

    score(left) - score(right)
}

/// Likely script for a language and region.
///
/// No likely-subtags data is bundled, so the script is always unknown and
/// locale matching falls back to comparing regions.
pub(crate) fn compute_script(_language: [u8; 2], _region: [u8; 2]) -> [u8; 4] {
    [0; 4]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bcp47State {
    Base,
    UnicodeExtension,
    IgnoreTheRest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnicodeState {
    /// Right after the `u` singleton, a keyword or an attribute is expected
    NoKey,
    ExpectKey,
    /// Unsupported key, its value is skipped
    IgnoreKey,
    NumberingSystem,
}

impl ResTableConfig {
    pub(crate) fn pack_language(&mut self, language: &str) {
        self.language = pack_language_or_region(language, b'a');
    }

    pub(crate) fn pack_region(&mut self, region: &str) {
        self.country = pack_language_or_region(region, b'0');
    }

    /// Language code, empty if not specified
    pub fn language(&self) -> String {
        unpack_language_or_region(self.language, b'a')
    }

    /// Region code, empty if not specified
    pub fn region(&self) -> String {
        unpack_language_or_region(self.country, b'0')
    }

    /// Script code, computed or provided
    pub fn script(&self) -> String {
        field_str(&self.locale_script)
    }

    pub fn locale_script_was_computed(&self) -> bool {
        self.locale_script_was_computed
    }

    pub fn variant(&self) -> String {
        field_str(&self.locale_variant)
    }

    pub fn numbering_system(&self) -> String {
        field_str(&self.locale_numbering_system)
    }

    fn script_was_provided(&self) -> bool {
        self.locale_script[0] != 0 && !self.locale_script_was_computed
    }

    /// Render the locale as a BCP-47 tag, empty for the "any" locale.
    ///
    /// With `canonicalize`, Tagalog is replaced by Filipino.
    pub fn bcp47_locale(&self, canonicalize: bool) -> String {
        if self.language[0] == 0 && self.country[0] == 0 {
            return String::new();
        }

        let mut parts: Vec<String> = Vec::with_capacity(4);

        if self.language[0] != 0 {
            if canonicalize && self.language == TAGALOG {
                parts.push("fil".to_owned());
            } else {
                parts.push(self.language());
            }
        }
        if self.script_was_provided() {
            parts.push(self.script());
        }
        if self.country[0] != 0 {
            parts.push(self.region());
        }
        if self.locale_variant[0] != 0 {
            parts.push(self.variant());
        }

        let mut tag = parts.join("-");
        if self.locale_numbering_system[0] != 0 && !tag.is_empty() {
            tag.push_str("-u-nu-");
            tag.push_str(&self.numbering_system());
        }

        tag
    }

    fn clear_locale(&mut self) {
        self.language = [0; 2];
        self.country = [0; 2];
        self.locale_script = [0; 4];
        self.locale_script_was_computed = false;
        self.locale_variant = [0; 8];
        self.locale_numbering_system = [0; 8];
    }

    /// Replace the locale with a `-` separated BCP-47 tag.
    ///
    /// Only the `nu` key of the Unicode extension is kept, other extensions and
    /// anything after an invalid subtag are ignored.
    pub(crate) fn set_bcp47_locale(&mut self, tag: &str) {
        self.clear_locale();

        let mut state = Bcp47State::Base;
        let mut unicode = UnicodeState::NoKey;

        for subtag in tag.split('-') {
            if state == Bcp47State::UnicodeExtension {
                (state, unicode) = self.assign_unicode_subtag(subtag, unicode);
            } else {
                state = self.assign_base_subtag(subtag);
            }

            if state == Bcp47State::IgnoreTheRest {
                if !tag.is_empty() {
                    warn!("invalid BCP-47 locale string: {}", tag);
                }
                break;
            }
        }

        self.locale_script_was_computed = self.locale_script[0] == 0;
        if self.locale_script_was_computed {
            self.locale_script = compute_script(self.language, self.country);
        }
    }

    fn assign_base_subtag(&mut self, subtag: &str) -> Bcp47State {
        let bytes = subtag.as_bytes();
        if !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return Bcp47State::IgnoreTheRest;
        }

        match bytes.len() {
            1 if bytes[0].eq_ignore_ascii_case(&b'u') => Bcp47State::UnicodeExtension,
            2 | 3 => {
                if self.language[0] != 0 {
                    self.pack_region(subtag);
                } else {
                    self.pack_language(subtag);
                }
                Bcp47State::Base
            }
            4 if bytes.iter().all(u8::is_ascii_alphabetic) => {
                let mut script = subtag.to_ascii_lowercase();
                script[..1].make_ascii_uppercase();
                self.locale_script = [0; 4];
                copy_truncated(&mut self.locale_script, &script);
                Bcp47State::Base
            }
            4..=8 => {
                self.locale_variant = [0; 8];
                copy_truncated(&mut self.locale_variant, &subtag.to_ascii_lowercase());
                Bcp47State::Base
            }
            _ => Bcp47State::IgnoreTheRest,
        }
    }

    fn assign_unicode_subtag(
        &mut self,
        subtag: &str,
        unicode: UnicodeState,
    ) -> (Bcp47State, UnicodeState) {
        if !subtag.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return (Bcp47State::IgnoreTheRest, unicode);
        }

        match (subtag.len(), unicode) {
            // other extensions are not supported
            (1, _) => (Bcp47State::IgnoreTheRest, unicode),
            (2, UnicodeState::NoKey | UnicodeState::ExpectKey) => {
                if subtag.eq_ignore_ascii_case("nu") {
                    (Bcp47State::UnicodeExtension, UnicodeState::NumberingSystem)
                } else {
                    (Bcp47State::UnicodeExtension, UnicodeState::IgnoreKey)
                }
            }
            (2, _) => (Bcp47State::IgnoreTheRest, unicode),
            (3..=8, UnicodeState::NumberingSystem) => {
                // only the first numbering system is accepted
                if self.locale_numbering_system[0] == 0 {
                    copy_truncated(
                        &mut self.locale_numbering_system,
                        &subtag.to_ascii_lowercase(),
                    );
                    (Bcp47State::UnicodeExtension, UnicodeState::ExpectKey)
                } else {
                    (Bcp47State::IgnoreTheRest, unicode)
                }
            }
            (3..=8, UnicodeState::IgnoreKey) => {
                (Bcp47State::UnicodeExtension, UnicodeState::ExpectKey)
            }
            // a keyword followed by an attribute
            (3..=8, UnicodeState::ExpectKey) => (Bcp47State::IgnoreTheRest, unicode),
            // extension attribute
            (3..=8, UnicodeState::NoKey) => (Bcp47State::UnicodeExtension, unicode),
            _ => (Bcp47State::IgnoreTheRest, unicode),
        }
    }

    /// Locale in resource directory form: `en-rUS` or `b+sr+Latn+RS`
    pub(crate) fn dir_locale(&self) -> Option<String> {
        if self.language[0] == 0 {
            return None;
        }

        let script_provided = self.script_was_provided();
        if !script_provided
            && self.locale_variant[0] == 0
            && self.locale_numbering_system[0] == 0
        {
            let mut out = self.language();
            if self.country[0] != 0 {
                out.push_str("-r");
                out.push_str(&self.region());
            }
            return Some(out);
        }

        let mut out = format!("b+{}", self.language());
        if script_provided {
            out.push('+');
            out.push_str(&self.script());
        }
        if self.country[0] != 0 {
            out.push('+');
            out.push_str(&self.region());
        }
        if self.locale_variant[0] != 0 {
            out.push('+');
            out.push_str(&self.variant());
        }
        if self.locale_numbering_system[0] != 0 {
            out.push_str("+u+nu+");
            out.push_str(&self.numbering_system());
        }

        Some(out)
    }

    /// Stable order of two locales, computed scripts are treated as empty
    pub(crate) fn compare_locales(&self, o: &ResTableConfig) -> Ordering {
        let script = |c: &ResTableConfig| {
            if c.locale_script_was_computed {
                [0; 4]
            } else {
                c.locale_script
            }
        };

        self.locale()
            .cmp(&o.locale())
            .then_with(|| script(self).cmp(&script(o)))
            .then_with(|| self.locale_variant.cmp(&o.locale_variant))
            .then_with(|| {
                self.locale_numbering_system
                    .cmp(&o.locale_numbering_system)
            })
    }

    /// Variants weigh more than scripts, the numbering system weighs least
    pub(crate) fn locale_importance_score(&self) -> i32 {
        let mut score = 0;
        if self.locale_variant[0] != 0 {
            score += 4;
        }
        if self.script_was_provided() {
            score += 2;
        }
        if self.locale_numbering_system[0] != 0 {
            score += 1;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_two_letter_codes() {
        assert_eq!(pack_language_or_region("en", b'a'), *b"en");
        assert_eq!(pack_language_or_region("", b'a'), [0, 0]);
        assert_eq!(unpack_language_or_region(*b"US", b'0'), "US");
    }

    #[test]
    fn pack_three_letter_language() {
        assert_eq!(pack_language_or_region("fil", b'a'), FILIPINO);
        assert_eq!(unpack_language_or_region(FILIPINO, b'a'), "fil");
    }

    #[test]
    fn pack_three_digit_region() {
        let packed = pack_language_or_region("419", b'0');
        assert_ne!(packed[0] & 0x80, 0);
        assert_eq!(unpack_language_or_region(packed, b'0'), "419");
    }

    #[test]
    fn bcp47_canonicalizes_tagalog() {
        let config = ResTableConfig::builder().language("tl").region("ph").build();

        assert_eq!(config.bcp47_locale(true), "fil-ph");
        assert_eq!(config.bcp47_locale(false), "tl-ph");
    }

    #[test]
    fn bcp47_keeps_other_languages() {
        let config = ResTableConfig::builder().language("ja").region("jp").build();

        assert_eq!(config.bcp47_locale(true), "ja-jp");
        assert_eq!(ResTableConfig::default().bcp47_locale(true), "");
    }

    #[test]
    fn bcp47_includes_script_variant_and_numbering() {
        let config = ResTableConfig::builder()
            .language("sr")
            .script("Latn")
            .region("RS")
            .variant("posix")
            .numbering_system("latn")
            .build();

        assert_eq!(config.bcp47_locale(false), "sr-Latn-RS-posix-u-nu-latn");
    }

    #[test]
    fn set_bcp47_locale_parses_subtags() {
        let config = ResTableConfig::builder()
            .bcp47_locale("zh-Hant-TW-u-ca-chinese-nu-hanidec")
            .build();

        assert_eq!(config.language(), "zh");
        assert_eq!(config.script(), "Hant");
        assert!(!config.locale_script_was_computed());
        assert_eq!(config.region(), "TW");
        assert_eq!(config.numbering_system(), "hanidec");
    }

    #[test]
    fn set_bcp47_locale_marks_missing_script_computed() {
        let config = ResTableConfig::builder().bcp47_locale("en-US").build();

        assert_eq!(config.language(), "en");
        assert_eq!(config.region(), "US");
        assert!(config.locale_script_was_computed());
        assert_eq!(config.bcp47_locale(false), "en-US");
    }

    #[test]
    fn set_bcp47_locale_stops_at_invalid_subtag() {
        let config = ResTableConfig::builder()
            .bcp47_locale("de-DE-x-private")
            .build();

        assert_eq!(config.language(), "de");
        assert_eq!(config.region(), "DE");
        assert_eq!(config.variant(), "");
    }

    #[test]
    fn set_bcp47_locale_rejects_non_ascii_subtags() {
        // four bytes but two characters, neither a script nor a variant
        let config = ResTableConfig::builder().bcp47_locale("sr-éé-RS").build();

        assert_eq!(config.language(), "sr");
        assert_eq!(config.region(), "");
        assert!(config.locale_script_was_computed());
        assert_eq!(config.variant(), "");

        let config = ResTableConfig::builder().bcp47_locale("de-1901").build();
        assert_eq!(config.variant(), "1901");
        assert!(config.locale_script_was_computed());

        let config = ResTableConfig::builder().bcp47_locale("ar-EG-u-nu-arñb").build();
        assert_eq!(config.region(), "EG");
        assert_eq!(config.numbering_system(), "");
    }

    #[test]
    fn regions_prefer_exact_then_parent() {
        assert!(compare_regions(*b"GB", [0, 0], *b"GB") > 0);
        assert!(compare_regions([0, 0], *b"AU", *b"GB") > 0);
        assert_eq!(compare_regions(*b"AU", *b"CA", *b"GB"), 0);
    }

    #[test]
    fn us_english_regions() {
        assert!(is_close_to_us_english([0, 0]));
        assert!(is_close_to_us_english(*b"PR"));
        assert!(!is_close_to_us_english(*b"GB"));
    }

    #[test]
    fn dir_locale_forms() {
        let legacy = ResTableConfig::builder().language("en").region("US").build();
        assert_eq!(legacy.dir_locale().as_deref(), Some("en-rUS"));

        let modified = ResTableConfig::builder()
            .language("sr")
            .script("Latn")
            .build();
        assert_eq!(modified.dir_locale().as_deref(), Some("b+sr+Latn"));

        assert_eq!(ResTableConfig::default().dir_locale(), None);
    }
}
