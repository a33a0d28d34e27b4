//! Parser for dash-separated resource qualifier strings such as `en-rUS-sw600dp-land-v21`.
//!
//! Every token must appear in the canonical order of the axes, see
//! [App resource overview. Table 2](https://developer.android.com/guide/topics/resources/providing-resources#AlternativeResources)

use std::iter::Peekable;
use std::str::Split;

use log::debug;
use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;

use crate::res_table_config::{
    DENSITY_ANY, DENSITY_DEFAULT, DENSITY_HIGH, DENSITY_LOW, DENSITY_MEDIUM, DENSITY_NONE,
    DENSITY_TV, DENSITY_XHIGH, DENSITY_XXHIGH, DENSITY_XXXHIGH, Hdr, KeysHidden, Keyboard,
    LayoutDir, MNC_ZERO, NavHidden, Navigation, Orientation, ResTableConfig, ScreenLong,
    ScreenRound, ScreenSize, Touchscreen, UIModeNight, UIModeType, WideColorGamut,
};

const WILDCARD: &str = "any";

const SDK_DONUT: u16 = 4;
const SDK_FROYO: u16 = 8;
const SDK_HONEYCOMB_MR2: u16 = 13;
const SDK_LOLLIPOP: u16 = 21;
const SDK_MNC: u16 = 23;
const SDK_O: u16 = 26;

static MCC_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^mcc(\d+)$").unwrap());
static MNC_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^mnc(\d+)$").unwrap());
static SMALLEST_SCREEN_WIDTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^sw(\d+)dp$").unwrap());
static SCREEN_WIDTH_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^w(\d+)dp$").unwrap());
static SCREEN_HEIGHT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^h(\d+)dp$").unwrap());
static DENSITY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)dpi$").unwrap());
static WIDTH_HEIGHT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)x(\d+)$").unwrap());
static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^v(\d+)(?:\.(\d+))?$").unwrap());

static DENSITY_NAMES: phf::Map<&'static str, u16> = phf_map! {
    "any" => DENSITY_DEFAULT,
    "anydpi" => DENSITY_ANY,
    "nodpi" => DENSITY_NONE,
    "ldpi" => DENSITY_LOW,
    "mdpi" => DENSITY_MEDIUM,
    "tvdpi" => DENSITY_TV,
    "hdpi" => DENSITY_HIGH,
    "xhdpi" => DENSITY_XHIGH,
    "xxhdpi" => DENSITY_XXHIGH,
    "xxxhdpi" => DENSITY_XXXHIGH,
};

/// Result of [`parse`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQualifiers {
    /// Axes recognized before parsing stopped
    pub config: ResTableConfig,

    /// True if every token was consumed
    pub success: bool,
}

type Parts<'a> = Peekable<Split<'a, char>>;

type AxisParser = fn(&str, &mut ResTableConfig) -> bool;

/// Axes that come after the locale, in canonical order
const TRAILING_AXES: [AxisParser; 20] = [
    parse_layout_direction,
    parse_smallest_screen_width_dp,
    parse_screen_width_dp,
    parse_screen_height_dp,
    parse_screen_layout_size,
    parse_screen_layout_long,
    parse_screen_round,
    parse_wide_color_gamut,
    parse_hdr,
    parse_orientation,
    parse_ui_mode_type,
    parse_ui_mode_night,
    parse_density,
    parse_touchscreen,
    parse_keys_hidden,
    parse_keyboard,
    parse_nav_hidden,
    parse_navigation,
    parse_screen_size,
    parse_version,
];

/// Parse a qualifier string and raise the sdk version to the first platform
/// that understands the qualifiers present.
pub fn parse(qualifiers: &str) -> ParsedQualifiers {
    parse_with(qualifiers, true)
}

/// Parse a qualifier string, optionally skipping the compatibility version bump
pub fn parse_with(qualifiers: &str, apply_version_compat: bool) -> ParsedQualifiers {
    let mut config = ResTableConfig::default();

    if qualifiers.is_empty() {
        return ParsedQualifiers {
            config,
            success: true,
        };
    }

    let lowered = qualifiers.to_lowercase();
    let mut parts: Parts = lowered.split('-').peekable();

    apply_axis(&mut parts, &mut config, parse_mcc);
    apply_axis(&mut parts, &mut config, parse_mnc);

    if parts.peek().is_some() {
        // locale spans several tokens, so it drives the iterator itself
        let mut locale = LocaleValue::default();
        if locale.init_from_parts(&mut parts).is_none() {
            debug!("malformed locale in qualifiers {:?}", qualifiers);
            return ParsedQualifiers {
                config,
                success: false,
            };
        }
        locale.write_to(&mut config);
    }

    for parser in TRAILING_AXES {
        apply_axis(&mut parts, &mut config, parser);
    }

    let success = parts.peek().is_none();
    if !success {
        debug!(
            "unrecognized qualifier {:?} in {:?}",
            parts.peek().copied().unwrap_or_default(),
            qualifiers
        );
    } else if apply_version_compat {
        apply_version_for_compatibility(&mut config);
    }

    ParsedQualifiers { config, success }
}

/// Consume the next token if it belongs to the given axis
#[inline]
fn apply_axis(parts: &mut Parts, config: &mut ResTableConfig, parser: AxisParser) {
    if let Some(part) = parts.peek() {
        if parser(part, config) {
            parts.next();
        }
    }
}

fn capture_u16(pattern: &Regex, name: &str) -> Option<u16> {
    pattern.captures(name)?.get(1)?.as_str().parse().ok()
}

fn parse_mcc(name: &str, config: &mut ResTableConfig) -> bool {
    if name == WILDCARD {
        config.mcc = 0;
        return true;
    }

    match capture_u16(&MCC_PATTERN, name) {
        Some(mcc) => {
            config.mcc = mcc;
            true
        }
        None => false,
    }
}

fn parse_mnc(name: &str, config: &mut ResTableConfig) -> bool {
    if name == WILDCARD {
        config.mnc = 0;
        return true;
    }

    match capture_u16(&MNC_PATTERN, name) {
        Some(0) => {
            config.mnc = MNC_ZERO;
            true
        }
        Some(mnc) => {
            config.mnc = mnc;
            true
        }
        None => false,
    }
}

fn parse_layout_direction(name: &str, config: &mut ResTableConfig) -> bool {
    match LayoutDir::from_token(name) {
        Some(value) => {
            config.screen_layout = (config.screen_layout & !LayoutDir::MASK) | value.bits();
            true
        }
        None => false,
    }
}

fn parse_dp(pattern: &Regex, name: &str, out: &mut u16) -> bool {
    if name == WILDCARD {
        *out = 0;
        return true;
    }

    match capture_u16(pattern, name) {
        Some(value) => {
            *out = value;
            true
        }
        None => false,
    }
}

fn parse_smallest_screen_width_dp(name: &str, config: &mut ResTableConfig) -> bool {
    parse_dp(
        &SMALLEST_SCREEN_WIDTH_PATTERN,
        name,
        &mut config.smallest_screen_width_dp,
    )
}

fn parse_screen_width_dp(name: &str, config: &mut ResTableConfig) -> bool {
    parse_dp(&SCREEN_WIDTH_PATTERN, name, &mut config.screen_width_dp)
}

fn parse_screen_height_dp(name: &str, config: &mut ResTableConfig) -> bool {
    parse_dp(&SCREEN_HEIGHT_PATTERN, name, &mut config.screen_height_dp)
}

fn parse_screen_layout_size(name: &str, config: &mut ResTableConfig) -> bool {
    match ScreenSize::from_token(name) {
        Some(value) => {
            config.screen_layout = (config.screen_layout & !ScreenSize::MASK) | value.bits();
            true
        }
        None => false,
    }
}

fn parse_screen_layout_long(name: &str, config: &mut ResTableConfig) -> bool {
    match ScreenLong::from_token(name) {
        Some(value) => {
            config.screen_layout = (config.screen_layout & !ScreenLong::MASK) | value.bits();
            true
        }
        None => false,
    }
}

fn parse_screen_round(name: &str, config: &mut ResTableConfig) -> bool {
    match ScreenRound::from_token(name) {
        Some(value) => {
            config.screen_layout2 = (config.screen_layout2 & !ScreenRound::MASK) | value.bits();
            true
        }
        None => false,
    }
}

fn parse_wide_color_gamut(name: &str, config: &mut ResTableConfig) -> bool {
    match WideColorGamut::from_token(name) {
        Some(value) => {
            config.color_mode = (config.color_mode & !WideColorGamut::MASK) | value.bits();
            true
        }
        None => false,
    }
}

fn parse_hdr(name: &str, config: &mut ResTableConfig) -> bool {
    match Hdr::from_token(name) {
        Some(value) => {
            config.color_mode = (config.color_mode & !Hdr::MASK) | value.bits();
            true
        }
        None => false,
    }
}

fn parse_orientation(name: &str, config: &mut ResTableConfig) -> bool {
    match Orientation::from_token(name) {
        Some(value) => {
            config.orientation = value.bits();
            true
        }
        None => false,
    }
}

fn parse_ui_mode_type(name: &str, config: &mut ResTableConfig) -> bool {
    match UIModeType::from_token(name) {
        // `normal` was a screen size, it is not a ui mode qualifier
        Some(UIModeType::Normal) | None => false,
        Some(value) => {
            config.ui_mode = (config.ui_mode & !UIModeType::MASK) | value.bits();
            true
        }
    }
}

fn parse_ui_mode_night(name: &str, config: &mut ResTableConfig) -> bool {
    match UIModeNight::from_token(name) {
        Some(value) => {
            config.ui_mode = (config.ui_mode & !UIModeNight::MASK) | value.bits();
            true
        }
        None => false,
    }
}

fn parse_density(name: &str, config: &mut ResTableConfig) -> bool {
    if let Some(density) = DENSITY_NAMES.get(name) {
        config.density = *density;
        return true;
    }

    // check that we have 'dpi' after the last digit
    match capture_u16(&DENSITY_PATTERN, name) {
        Some(density) => {
            config.density = density;
            true
        }
        None => false,
    }
}

fn parse_touchscreen(name: &str, config: &mut ResTableConfig) -> bool {
    match Touchscreen::from_token(name) {
        Some(value) => {
            config.touchscreen = value.bits();
            true
        }
        None => false,
    }
}

fn parse_keys_hidden(name: &str, config: &mut ResTableConfig) -> bool {
    match KeysHidden::from_token(name) {
        Some(value) => {
            config.input_flags = (config.input_flags & !KeysHidden::MASK) | value.bits();
            true
        }
        None => false,
    }
}

fn parse_keyboard(name: &str, config: &mut ResTableConfig) -> bool {
    match Keyboard::from_token(name) {
        Some(value) => {
            config.keyboard = value.bits();
            true
        }
        None => false,
    }
}

fn parse_nav_hidden(name: &str, config: &mut ResTableConfig) -> bool {
    match NavHidden::from_token(name) {
        Some(value) => {
            config.input_flags = (config.input_flags & !NavHidden::MASK) | value.bits();
            true
        }
        None => false,
    }
}

fn parse_navigation(name: &str, config: &mut ResTableConfig) -> bool {
    match Navigation::from_token(name) {
        Some(value) => {
            config.navigation = value.bits();
            true
        }
        None => false,
    }
}

/// Screen size in pixels, `WxH` with the larger side first
fn parse_screen_size(name: &str, config: &mut ResTableConfig) -> bool {
    if name == WILDCARD {
        config.screen_width = 0;
        config.screen_height = 0;
        return true;
    }

    let Some(captures) = WIDTH_HEIGHT_PATTERN.captures(name) else {
        return false;
    };
    let (Ok(width), Ok(height)) = (captures[1].parse::<u16>(), captures[2].parse::<u16>()) else {
        return false;
    };
    if width < height {
        return false;
    }

    config.screen_width = width;
    config.screen_height = height;
    true
}

fn parse_version(name: &str, config: &mut ResTableConfig) -> bool {
    if name == WILDCARD {
        config.sdk_version = 0;
        config.minor_version = 0;
        return true;
    }

    let Some(captures) = VERSION_PATTERN.captures(name) else {
        return false;
    };
    let Some(sdk) = captures.get(1).and_then(|m| m.as_str().parse::<u16>().ok()) else {
        return false;
    };
    let minor = match captures.get(2) {
        Some(m) => match m.as_str().parse::<u16>() {
            Ok(minor) => minor,
            Err(_) => return false,
        },
        None => 0,
    };

    config.sdk_version = sdk;
    config.minor_version = minor;
    true
}

/// Raise the sdk version to the platform that introduced the newest qualifier present
fn apply_version_for_compatibility(config: &mut ResTableConfig) {
    let min_sdk = if config.ui_mode_type() == UIModeType::VrHeadset
        || config.color_mode & (WideColorGamut::MASK | Hdr::MASK) != 0
    {
        SDK_O
    } else if config.screen_layout2 & ScreenRound::MASK != 0 {
        SDK_MNC
    } else if config.density == DENSITY_ANY {
        SDK_LOLLIPOP
    } else if config.smallest_screen_width_dp != 0
        || config.screen_width_dp != 0
        || config.screen_height_dp != 0
    {
        SDK_HONEYCOMB_MR2
    } else if config.ui_mode & (UIModeType::MASK | UIModeNight::MASK) != 0 {
        SDK_FROYO
    } else if config.screen_layout & (ScreenSize::MASK | ScreenLong::MASK) != 0
        || config.density != DENSITY_DEFAULT
    {
        SDK_DONUT
    } else {
        0
    };

    if min_sdk > config.sdk_version {
        config.sdk_version = min_sdk;
    }
}

/// Locale components collected from the qualifier tokens
#[derive(Debug, Default)]
struct LocaleValue {
    language: String,
    region: String,
    script: String,
    variant: String,
    numbering_system: String,
}

impl LocaleValue {
    fn set_language(&mut self, language: &str) {
        self.language = language.trim().to_ascii_lowercase();
    }

    fn set_region(&mut self, region: &str) {
        self.region = region.trim().to_ascii_uppercase();
    }

    fn set_script(&mut self, script: &str) {
        let mut script = script.to_ascii_lowercase();
        if let Some(first) = script.get_mut(..1) {
            first.make_ascii_uppercase();
        }
        self.script = script;
    }

    fn set_variant(&mut self, variant: &str) {
        self.variant = variant.trim().to_owned();
    }

    /// Consume a locale from the tokens if one is present.
    ///
    /// Returns `None` for a malformed modified BCP-47 tag (`b+...`).
    fn init_from_parts(&mut self, parts: &mut Parts) -> Option<()> {
        let Some(part) = parts.peek().copied() else {
            return Some(());
        };

        if let Some(tag) = part.strip_prefix("b+") {
            // "modified" BCP-47 tag, '+' separates the subtags
            let mut subtags: Vec<&str> = tag.split('+').collect();
            while subtags.last().is_some_and(|s| s.is_empty()) {
                subtags.pop();
            }

            // trailing unicode extension, only `u+nu+<numbering system>`
            if let [.., u, nu, numbering] = subtags[..] {
                if u.eq_ignore_ascii_case("u")
                    && nu.eq_ignore_ascii_case("nu")
                    && (3..=8).contains(&numbering.len())
                    && numbering.bytes().all(|b| b.is_ascii_alphanumeric())
                {
                    self.numbering_system = numbering.to_ascii_lowercase();
                    subtags.truncate(subtags.len() - 3);
                }
            }

            if !subtags
                .iter()
                .all(|s| s.bytes().all(|b| b.is_ascii_alphanumeric()))
            {
                return None;
            }

            match subtags.as_slice() {
                [language] => self.set_language(language),
                [language, second] => {
                    self.set_language(language);

                    // region, script or variant
                    match second.len() {
                        2 | 3 => self.set_region(second),
                        4 if !second.starts_with(|c: char| c.is_ascii_digit()) => {
                            self.set_script(second)
                        }
                        4..=8 => self.set_variant(second),
                        _ => return None,
                    }
                }
                [language, second, third] => {
                    self.set_language(language);

                    match second.len() {
                        4 => self.set_script(second),
                        2 | 3 => self.set_region(second),
                        _ => return None,
                    }

                    // region after a script, variant after a region
                    if third.len() >= 4 {
                        self.set_variant(third);
                    } else {
                        self.set_region(third);
                    }
                }
                [language, script, region, variant] => {
                    self.set_language(language);
                    self.set_script(script);
                    self.set_region(region);
                    self.set_variant(variant);
                }
                _ => return None,
            }

            parts.next();
        } else if matches!(part.len(), 2 | 3)
            && part.chars().all(char::is_alphabetic)
            && part != "car"
        {
            self.set_language(part);
            parts.next();

            if let Some(region) = parts.peek().and_then(|p| p.strip_prefix('r')) {
                if region.len() == 2 {
                    self.set_region(region);
                    parts.next();
                }
            }
        }

        Some(())
    }

    fn write_to(&self, config: &mut ResTableConfig) {
        config.pack_language(&self.language);
        config.pack_region(&self.region);

        config.locale_script = [0; 4];
        crate::res_table_config::copy_truncated(&mut config.locale_script, &self.script);

        config.locale_variant = [0; 8];
        crate::res_table_config::copy_truncated(&mut config.locale_variant, &self.variant);

        config.locale_numbering_system = [0; 8];
        crate::res_table_config::copy_truncated(
            &mut config.locale_numbering_system,
            &self.numbering_system,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_default() {
        let parsed = parse("");

        assert!(parsed.success);
        assert!(parsed.config.is_default());
    }

    #[test]
    fn canonical_order_succeeds() {
        let parsed = parse("en-rUS-sw320dp-v7");

        assert!(parsed.success);
        assert_eq!(parsed.config.language(), "en");
        assert_eq!(parsed.config.region(), "US");
        assert_eq!(parsed.config.smallest_screen_width_dp(), 320);
        // sw qualifiers require at least v13
        assert_eq!(parsed.config.sdk_version(), 13);
    }

    #[test]
    fn out_of_order_fails() {
        assert!(!parse("v7-en-rUS-sw320dp").success);
        assert!(!parse("land-en").success);
        assert!(!parse("en-rUS-bogus").success);
    }

    #[test]
    fn mcc_and_mnc() {
        let parsed = parse("mcc310-mnc004");
        assert!(parsed.success);
        assert_eq!(parsed.config.mcc(), 310);
        assert_eq!(parsed.config.mnc(), 4);

        let parsed = parse("MCC310");
        assert!(parsed.success);
        assert_eq!(parsed.config.mcc(), 310);
    }

    #[test]
    fn mnc_zero_sentinel() {
        let parsed = parse("mcc310-mnc00");

        assert!(parsed.success);
        assert_eq!(parsed.config.mnc(), MNC_ZERO);
    }

    #[test]
    fn screen_size_requires_landscape_order() {
        let parsed = parse("320x480");
        assert!(!parsed.success);
        assert_eq!(parsed.config.screen_width(), 0);
        assert_eq!(parsed.config.screen_height(), 0);

        let parsed = parse("480x320");
        assert!(parsed.success);
        assert_eq!(parsed.config.screen_width(), 480);
        assert_eq!(parsed.config.screen_height(), 320);
    }

    #[test]
    fn version_resets_minor() {
        let parsed = parse("v21");

        assert!(parsed.success);
        assert_eq!(parsed.config.sdk_version(), 21);
        assert_eq!(parsed.config.minor_version(), 0);
    }

    #[test]
    fn car_is_ui_mode_not_language() {
        let parsed = parse("car");

        assert!(parsed.success);
        assert_eq!(parsed.config.language(), "");
        assert_eq!(parsed.config.ui_mode_type(), UIModeType::Car);
    }

    #[test]
    fn normal_is_screen_size() {
        let parsed = parse_with("normal", false);

        assert!(parsed.success);
        assert_eq!(parsed.config.screen_size(), ScreenSize::Normal);
        assert_eq!(parsed.config.ui_mode_type(), UIModeType::Any);
    }

    #[test]
    fn modified_bcp47_locales() {
        let parsed = parse("b+sr+Latn");
        assert!(parsed.success);
        assert_eq!(parsed.config.language(), "sr");
        assert_eq!(parsed.config.script(), "Latn");

        let parsed = parse("b+es+419");
        assert!(parsed.success);
        assert_eq!(parsed.config.language(), "es");
        assert_eq!(parsed.config.region(), "419");

        let parsed = parse("b+de+Latn+DE+1901");
        assert!(parsed.success);
        assert_eq!(parsed.config.region(), "DE");
        assert_eq!(parsed.config.variant(), "1901");

        assert!(!parse("b+en+toolongvariant").success);
        assert!(!parse("b+a+b+c+d+e").success);
    }

    #[test]
    fn wildcard_is_accepted() {
        let parsed = parse("any");

        assert!(parsed.success);
        assert!(parsed.config.is_default());
    }

    #[test]
    fn all_axes_in_order() {
        let parsed = parse_with(
            "mcc310-mnc260-fr-rCA-ldrtl-sw600dp-w720dp-h1024dp-large-long-round-widecg-highdr-port-television-night-xxhdpi-finger-keysexposed-qwerty-navhidden-dpad-1920x1080-v30",
            false,
        );
        assert!(parsed.success);

        let config = parsed.config;
        assert_eq!(config.mcc(), 310);
        assert_eq!(config.mnc(), 260);
        assert_eq!(config.language(), "fr");
        assert_eq!(config.region(), "CA");
        assert_eq!(config.layout_direction(), LayoutDir::Rtl);
        assert_eq!(config.smallest_screen_width_dp(), 600);
        assert_eq!(config.screen_width_dp(), 720);
        assert_eq!(config.screen_height_dp(), 1024);
        assert_eq!(config.screen_size(), ScreenSize::Large);
        assert_eq!(config.screen_long(), ScreenLong::Yes);
        assert_eq!(config.screen_round(), ScreenRound::Yes);
        assert_eq!(config.wide_color_gamut(), WideColorGamut::Yes);
        assert_eq!(config.hdr(), Hdr::Yes);
        assert_eq!(config.orientation(), Orientation::Port);
        assert_eq!(config.ui_mode_type(), UIModeType::Television);
        assert_eq!(config.ui_mode_night(), UIModeNight::Yes);
        assert_eq!(config.density(), DENSITY_XXHIGH);
        assert_eq!(config.touchscreen(), Touchscreen::Finger);
        assert_eq!(config.keys_hidden(), KeysHidden::No);
        assert_eq!(config.keyboard(), Keyboard::Qwerty);
        assert_eq!(config.nav_hidden(), NavHidden::Yes);
        assert_eq!(config.navigation(), Navigation::Dpad);
        assert_eq!(config.screen_width(), 1920);
        assert_eq!(config.screen_height(), 1080);
        assert_eq!(config.sdk_version(), 30);
    }

    #[test]
    fn serialized_form_parses_back() {
        let inputs = [
            "mcc310-mnc00",
            "en-rUS",
            "b+sr+Latn+RS",
            "b+de+1901",
            "ldltr-sw360dp-w400dp-h640dp",
            "small-notlong-notround-nowidecg-lowdr",
            "land-desk-notnight",
            "watch-anydpi",
            "vrheadset-nodpi-stylus-keyssoft-12key-navexposed-trackball",
            "420dpi-notouch-keyshidden-nokeys-nonav",
            "tvdpi-wheel-800x480-v21",
            "fr-rCA-xlarge-long-square-appliance-night-mdpi",
            "land-v21.3",
            "b+sr+RS+u+nu+latn",
            "b+sr+Latn+RS+posix+u+nu+latn",
        ];

        for input in inputs {
            let parsed = parse_with(input, false);
            assert!(parsed.success, "can't parse {input}");

            let serialized = parsed.config.qualifier_string();
            let reparsed = parse_with(&serialized, false);

            assert!(reparsed.success, "can't parse serialized {serialized}");
            assert_eq!(reparsed.config, parsed.config, "{input} -> {serialized}");
        }
    }

    #[test]
    fn minor_version_round_trip() {
        let config = ResTableConfig::builder()
            .sdk_version(21)
            .minor_version(3)
            .build();
        assert_eq!(config.qualifier_string(), "v21.3");

        let parsed = parse_with("v21.3", false);
        assert!(parsed.success);
        assert_eq!(parsed.config.sdk_version(), 21);
        assert_eq!(parsed.config.minor_version(), 3);

        assert!(!parse("v21.").success);
        assert!(!parse("v21.3.1").success);
    }

    #[test]
    fn numbering_system_round_trip() {
        let config = ResTableConfig::builder()
            .language("sr")
            .region("RS")
            .numbering_system("latn")
            .build();
        let serialized = config.qualifier_string();
        assert_eq!(serialized, "b+sr+RS+u+nu+latn");

        let parsed = parse_with(&serialized, false);
        assert!(parsed.success, "can't parse {serialized}");
        assert_eq!(parsed.config.language(), "sr");
        assert_eq!(parsed.config.region(), "RS");
        assert_eq!(parsed.config.numbering_system(), "latn");
        assert_eq!(parsed.config.qualifier_string(), serialized);

        // only the numbering system key is understood
        assert!(!parse("b+sr+RS+u+ca+latn").success);
        assert!(!parse("b+sr+éé").success);
    }

    #[test]
    fn version_for_compatibility() {
        let sdk = |q: &str| parse(q).config.sdk_version();

        assert_eq!(sdk("widecg"), 26);
        assert_eq!(sdk("vrheadset"), 26);
        assert_eq!(sdk("round"), 23);
        assert_eq!(sdk("anydpi"), 21);
        assert_eq!(sdk("w400dp"), 13);
        assert_eq!(sdk("night"), 8);
        assert_eq!(sdk("large"), 4);
        assert_eq!(sdk("hdpi"), 4);
        assert_eq!(sdk("land"), 0);
        // an explicit newer version wins
        assert_eq!(sdk("sw600dp-v26"), 26);
        assert_eq!(parse_with("sw600dp", false).config.sdk_version(), 0);
    }
}
