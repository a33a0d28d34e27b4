//! Selection of the best resource configuration for a device configuration.
//!
//! Candidates are first filtered with [`ResTableConfig::matches`], the
//! survivors are reduced pairwise with [`ResTableConfig::is_better_than`].
//!
//! [Source Code](https://cs.android.com/android/platform/superproject/main/+/main:frameworks/base/libs/androidfw/ResourceTypes.cpp;l=2540?q=ResTable_config::isBetterThan)

use crate::locale::{
    ENGLISH, UNITED_STATES, compare_regions, compute_script, is_close_to_us_english,
    langs_are_equivalent,
};
use crate::res_table_config::{
    DENSITY_ANY, DENSITY_MEDIUM, Hdr, KeysHidden, LayoutDir, NavHidden, ResTableConfig,
    ScreenLong, ScreenRound, ScreenSize, UIModeNight, UIModeType, WideColorGamut,
};

/// Returns true if `a` is a strictly better match than `b` for `requested`
#[inline]
pub fn is_better_match(a: &ResTableConfig, b: &ResTableConfig, requested: &ResTableConfig) -> bool {
    a.is_better_than(b, Some(requested))
}

/// Decide between two densities for the requested one, true if `this` wins.
///
/// `anydpi` always wins, otherwise the closest bucket wins with scaling down
/// counted as twice as good as scaling up.
fn is_density_better(this: u16, other: u16, requested: u16) -> bool {
    // no density means the system default
    let this = if this != 0 { this } else { DENSITY_MEDIUM };
    let other = if other != 0 { other } else { DENSITY_MEDIUM };

    if this == DENSITY_ANY {
        return true;
    } else if other == DENSITY_ANY {
        return false;
    }

    let requested = match requested {
        0 | DENSITY_ANY => DENSITY_MEDIUM,
        density => density,
    } as i64;

    let (mut h, mut l) = (this as i64, other as i64);
    let mut im_bigger = true;
    if l > h {
        std::mem::swap(&mut h, &mut l);
        im_bigger = false;
    }

    if requested >= h {
        // requested value higher than both, give h
        return im_bigger;
    }
    if l >= requested {
        // requested value lower than both, give l
        return !im_bigger;
    }

    if ((2 * l) - requested) * h > requested * requested {
        !im_bigger
    } else {
        im_bigger
    }
}

/// "Specified beats unspecified" check for one axis.
///
/// `Some(result)` decides the comparison, `None` moves on to the next axis.
#[inline]
fn prefer_specified(mine: u32, other: u32) -> Option<bool> {
    if mine != other {
        if mine == 0 {
            return Some(false);
        }
        if other == 0 {
            return Some(true);
        }
    }
    None
}

impl ResTableConfig {
    /// Returns true if this configuration can be used on a device with `settings`
    pub fn matches(&self, settings: &ResTableConfig) -> bool {
        if self.imsi() != 0 {
            if self.mcc != 0 && self.mcc != settings.mcc {
                return false;
            }
            if self.mnc != 0 && self.mnc != settings.mnc {
                return false;
            }
        }

        if self.locale() != 0 && !self.locale_matches(settings) {
            return false;
        }

        if self.screen_config() != 0 {
            let layout_dir = self.screen_layout & LayoutDir::MASK;
            if layout_dir != 0 && layout_dir != settings.screen_layout & LayoutDir::MASK {
                return false;
            }

            // screen sizes for larger screens than the device don't match
            let screen_size = self.screen_layout & ScreenSize::MASK;
            if screen_size != 0 && screen_size > settings.screen_layout & ScreenSize::MASK {
                return false;
            }

            let screen_long = self.screen_layout & ScreenLong::MASK;
            if screen_long != 0 && screen_long != settings.screen_layout & ScreenLong::MASK {
                return false;
            }

            let ui_mode_type = self.ui_mode & UIModeType::MASK;
            if ui_mode_type != 0 && ui_mode_type != settings.ui_mode & UIModeType::MASK {
                return false;
            }

            let ui_mode_night = self.ui_mode & UIModeNight::MASK;
            if ui_mode_night != 0 && ui_mode_night != settings.ui_mode & UIModeNight::MASK {
                return false;
            }

            if self.smallest_screen_width_dp != 0
                && self.smallest_screen_width_dp > settings.smallest_screen_width_dp
            {
                return false;
            }
        }

        let screen_round = self.screen_layout2 & ScreenRound::MASK;
        if screen_round != 0 && screen_round != settings.screen_layout2 & ScreenRound::MASK {
            return false;
        }

        let hdr = self.color_mode & Hdr::MASK;
        if hdr != 0 && hdr != settings.color_mode & Hdr::MASK {
            return false;
        }

        let wide_color_gamut = self.color_mode & WideColorGamut::MASK;
        if wide_color_gamut != 0
            && wide_color_gamut != settings.color_mode & WideColorGamut::MASK
        {
            return false;
        }

        if self.screen_width_dp != 0 && self.screen_width_dp > settings.screen_width_dp {
            return false;
        }
        if self.screen_height_dp != 0 && self.screen_height_dp > settings.screen_height_dp {
            return false;
        }

        // density always matches, it can be scaled
        if self.orientation != 0 && self.orientation != settings.orientation {
            return false;
        }
        if self.touchscreen != 0 && self.touchscreen != settings.touchscreen {
            return false;
        }

        if self.input() != 0 {
            let keys_hidden = self.input_flags & KeysHidden::MASK;
            let set_keys_hidden = settings.input_flags & KeysHidden::MASK;
            // a request for soft keys also matches "keys exposed"
            if keys_hidden != 0
                && keys_hidden != set_keys_hidden
                && (keys_hidden != KeysHidden::No.bits() || set_keys_hidden != KeysHidden::Soft.bits())
            {
                return false;
            }

            let nav_hidden = self.input_flags & NavHidden::MASK;
            if nav_hidden != 0 && nav_hidden != settings.input_flags & NavHidden::MASK {
                return false;
            }
            if self.keyboard != 0 && self.keyboard != settings.keyboard {
                return false;
            }
            if self.navigation != 0 && self.navigation != settings.navigation {
                return false;
            }
        }

        if self.screen_width != 0 && self.screen_width > settings.screen_width {
            return false;
        }
        if self.screen_height != 0 && self.screen_height > settings.screen_height {
            return false;
        }

        if self.sdk_version != 0 && self.sdk_version > settings.sdk_version {
            return false;
        }
        if self.minor_version != 0 && self.minor_version != settings.minor_version {
            return false;
        }

        true
    }

    /// Language must be equivalent, the region must match unless both scripts are known
    fn locale_matches(&self, settings: &ResTableConfig) -> bool {
        if !langs_are_equivalent(self.language, settings.language) {
            return false;
        }

        let script = if settings.locale_script[0] == 0 {
            // the request's script is unknown
            None
        } else if self.locale_script[0] == 0 && !self.locale_script_was_computed {
            Some(compute_script(self.language, self.country)).filter(|s| s[0] != 0)
        } else {
            Some(self.locale_script)
        };

        match script {
            Some(script) => script == settings.locale_script,
            None => self.country[0] == 0 || self.country == settings.country,
        }
    }

    /// Returns true if this configuration is a better match than `o` for `requested`.
    ///
    /// Both configurations are expected to already [`matches`](Self::matches) the
    /// request. Without a request, falls back to [`is_more_specific_than`](Self::is_more_specific_than).
    pub fn is_better_than(&self, o: &ResTableConfig, requested: Option<&ResTableConfig>) -> bool {
        let Some(requested) = requested else {
            return self.is_more_specific_than(o);
        };

        if self.imsi() != 0 || o.imsi() != 0 {
            if self.mcc != o.mcc && requested.mcc != 0 {
                return self.mcc != 0;
            }
            if self.mnc != o.mnc && requested.mnc != 0 {
                return self.mnc != 0;
            }
        }

        if self.is_locale_better_than(o, requested) {
            return true;
        } else if o.is_locale_better_than(self, requested) {
            return false;
        }

        if self.screen_layout != 0 || o.screen_layout != 0 {
            let diff = self.screen_layout ^ o.screen_layout;
            if diff & LayoutDir::MASK != 0 && requested.screen_layout & LayoutDir::MASK != 0 {
                return self.screen_layout & LayoutDir::MASK > o.screen_layout & LayoutDir::MASK;
            }
        }

        // larger configs were filtered out, the largest remaining one is the closest
        if (self.smallest_screen_width_dp != 0 || o.smallest_screen_width_dp != 0)
            && self.smallest_screen_width_dp != o.smallest_screen_width_dp
            && requested.smallest_screen_width_dp != 0
        {
            return self.smallest_screen_width_dp > o.smallest_screen_width_dp;
        }

        if self.screen_size_dp() != 0 || o.screen_size_dp() != 0 {
            let (mut my_delta, mut other_delta) = (0i32, 0i32);
            if requested.screen_width_dp != 0 {
                my_delta += requested.screen_width_dp as i32 - self.screen_width_dp as i32;
                other_delta += requested.screen_width_dp as i32 - o.screen_width_dp as i32;
            }
            if requested.screen_height_dp != 0 {
                my_delta += requested.screen_height_dp as i32 - self.screen_height_dp as i32;
                other_delta += requested.screen_height_dp as i32 - o.screen_height_dp as i32;
            }
            if my_delta != other_delta {
                return my_delta < other_delta;
            }
        }

        if self.screen_layout != 0 || o.screen_layout != 0 {
            let diff = self.screen_layout ^ o.screen_layout;
            let requested_size = requested.screen_layout & ScreenSize::MASK;

            if diff & ScreenSize::MASK != 0 && requested_size != 0 {
                let my_size = self.screen_layout & ScreenSize::MASK;
                let other_size = o.screen_layout & ScreenSize::MASK;

                // undefined counts as normal, unless a smaller screen is requested
                let (mut fixed_mine, mut fixed_other) = (my_size, other_size);
                if requested_size >= ScreenSize::Normal.bits() {
                    if fixed_mine == 0 {
                        fixed_mine = ScreenSize::Normal.bits();
                    }
                    if fixed_other == 0 {
                        fixed_other = ScreenSize::Normal.bits();
                    }
                }

                if fixed_mine == fixed_other {
                    return my_size != 0;
                }
                return fixed_mine > fixed_other;
            }

            if diff & ScreenLong::MASK != 0 && requested.screen_layout & ScreenLong::MASK != 0 {
                return self.screen_layout & ScreenLong::MASK != 0;
            }
        }

        if (self.screen_layout2 ^ o.screen_layout2) & ScreenRound::MASK != 0
            && requested.screen_layout2 & ScreenRound::MASK != 0
        {
            return self.screen_layout2 & ScreenRound::MASK != 0;
        }

        if self.color_mode != 0 || o.color_mode != 0 {
            let diff = self.color_mode ^ o.color_mode;
            if diff & WideColorGamut::MASK != 0
                && requested.color_mode & WideColorGamut::MASK != 0
            {
                return self.color_mode & WideColorGamut::MASK != 0;
            }
            if diff & Hdr::MASK != 0 && requested.color_mode & Hdr::MASK != 0 {
                return self.color_mode & Hdr::MASK != 0;
            }
        }

        if self.orientation != o.orientation && requested.orientation != 0 {
            return self.orientation != 0;
        }

        if self.ui_mode != 0 || o.ui_mode != 0 {
            let diff = self.ui_mode ^ o.ui_mode;
            if diff & UIModeType::MASK != 0 && requested.ui_mode & UIModeType::MASK != 0 {
                return self.ui_mode & UIModeType::MASK != 0;
            }
            if diff & UIModeNight::MASK != 0 && requested.ui_mode & UIModeNight::MASK != 0 {
                return self.ui_mode & UIModeNight::MASK != 0;
            }
        }

        if self.screen_type() != 0 || o.screen_type() != 0 {
            if self.density != o.density {
                return is_density_better(self.density, o.density, requested.density);
            }

            if self.touchscreen != o.touchscreen && requested.touchscreen != 0 {
                return self.touchscreen != 0;
            }
        }

        if self.input() != 0 || o.input() != 0 {
            let keys_hidden = self.input_flags & KeysHidden::MASK;
            let other_keys_hidden = o.input_flags & KeysHidden::MASK;
            let requested_keys_hidden = requested.input_flags & KeysHidden::MASK;

            if keys_hidden != other_keys_hidden && requested_keys_hidden != 0 {
                if keys_hidden == 0 {
                    return false;
                }
                if other_keys_hidden == 0 {
                    return true;
                }
                // "keys exposed" also matches "soft keys", the exact one is more specific
                if requested_keys_hidden == keys_hidden {
                    return true;
                }
                if requested_keys_hidden == other_keys_hidden {
                    return false;
                }
            }

            let nav_hidden = self.input_flags & NavHidden::MASK;
            let other_nav_hidden = o.input_flags & NavHidden::MASK;
            if nav_hidden != other_nav_hidden && requested.input_flags & NavHidden::MASK != 0 {
                if nav_hidden == 0 {
                    return false;
                }
                if other_nav_hidden == 0 {
                    return true;
                }
            }

            if self.keyboard != o.keyboard && requested.keyboard != 0 {
                return self.keyboard != 0;
            }

            if self.navigation != o.navigation && requested.navigation != 0 {
                return self.navigation != 0;
            }
        }

        if self.screen_size_px() != 0 || o.screen_size_px() != 0 {
            let (mut my_delta, mut other_delta) = (0i32, 0i32);
            if requested.screen_width != 0 {
                my_delta += requested.screen_width as i32 - self.screen_width as i32;
                other_delta += requested.screen_width as i32 - o.screen_width as i32;
            }
            if requested.screen_height != 0 {
                my_delta += requested.screen_height as i32 - self.screen_height as i32;
                other_delta += requested.screen_height as i32 - o.screen_height as i32;
            }
            if my_delta != other_delta {
                return my_delta < other_delta;
            }
        }

        if self.version() != 0 || o.version() != 0 {
            if self.sdk_version != o.sdk_version && requested.sdk_version != 0 {
                return self.sdk_version > o.sdk_version;
            }
            if self.minor_version != o.minor_version && requested.minor_version != 0 {
                return self.minor_version != 0;
            }
        }

        false
    }

    fn is_locale_better_than(&self, o: &ResTableConfig, requested: &ResTableConfig) -> bool {
        // without a requested locale no resource is better than the other
        if requested.locale() == 0 {
            return false;
        }
        if self.locale() == 0 && o.locale() == 0 {
            return false;
        }

        if !langs_are_equivalent(self.language, o.language) {
            // Only one of them has a language. No-language resources are
            // where US English traditionally lives, so they beat languages
            // of regions further from US English.
            if requested.language == ENGLISH {
                if requested.country == UNITED_STATES {
                    if self.language[0] != 0 {
                        return self.country[0] == 0 || self.country == UNITED_STATES;
                    }
                    return !(o.country[0] == 0 || o.country == UNITED_STATES);
                } else if is_close_to_us_english(requested.country) {
                    if self.language[0] != 0 {
                        return is_close_to_us_english(self.country);
                    }
                    return !is_close_to_us_english(o.country);
                }
            }
            return self.language[0] != 0;
        }

        let region_comparison = compare_regions(self.country, o.country, requested.country);
        if region_comparison != 0 {
            return region_comparison > 0;
        }

        let variant_matches = self.locale_variant == requested.locale_variant;
        let other_variant_matches = o.locale_variant == requested.locale_variant;
        if variant_matches != other_variant_matches {
            return variant_matches;
        }

        let numbering_matches = self.locale_numbering_system == requested.locale_numbering_system;
        let other_numbering_matches = o.locale_numbering_system == requested.locale_numbering_system;
        if numbering_matches != other_numbering_matches {
            return numbering_matches;
        }

        // identical beats equivalent, eg. `tl` and `fil`
        self.language == requested.language && o.language != requested.language
    }

    fn is_locale_more_specific_than(&self, o: &ResTableConfig) -> i32 {
        if self.locale() != 0 || o.locale() != 0 {
            if self.language[0] != o.language[0] {
                if self.language[0] == 0 {
                    return -1;
                }
                if o.language[0] == 0 {
                    return 1;
                }
            }
            if self.country[0] != o.country[0] {
                if self.country[0] == 0 {
                    return -1;
                }
                if o.country[0] == 0 {
                    return 1;
                }
            }
        }

        self.locale_importance_score() - o.locale_importance_score()
    }

    /// Returns true if this configuration specifies an axis that `o` leaves
    /// unspecified, checking axes in order of importance.
    ///
    /// Density is never more specific, the default just means 160.
    pub fn is_more_specific_than(&self, o: &ResTableConfig) -> bool {
        if self.imsi() != 0 || o.imsi() != 0 {
            if let Some(result) = prefer_specified(self.mcc.into(), o.mcc.into()) {
                return result;
            }
            if let Some(result) = prefer_specified(self.mnc.into(), o.mnc.into()) {
                return result;
            }
        }

        if self.locale() != 0 || o.locale() != 0 {
            let diff = self.is_locale_more_specific_than(o);
            if diff != 0 {
                return diff > 0;
            }
        }

        let masked = |mine: u8, other: u8, mask: u8| {
            prefer_specified((mine & mask).into(), (other & mask).into())
        };

        let axes = [
            masked(self.screen_layout, o.screen_layout, LayoutDir::MASK),
            prefer_specified(
                self.smallest_screen_width_dp.into(),
                o.smallest_screen_width_dp.into(),
            ),
            prefer_specified(self.screen_width_dp.into(), o.screen_width_dp.into()),
            prefer_specified(self.screen_height_dp.into(), o.screen_height_dp.into()),
            masked(self.screen_layout, o.screen_layout, ScreenSize::MASK),
            masked(self.screen_layout, o.screen_layout, ScreenLong::MASK),
            masked(self.screen_layout2, o.screen_layout2, ScreenRound::MASK),
            masked(self.color_mode, o.color_mode, Hdr::MASK),
            masked(self.color_mode, o.color_mode, WideColorGamut::MASK),
            prefer_specified(self.orientation.into(), o.orientation.into()),
            masked(self.ui_mode, o.ui_mode, UIModeType::MASK),
            masked(self.ui_mode, o.ui_mode, UIModeNight::MASK),
            prefer_specified(self.touchscreen.into(), o.touchscreen.into()),
            masked(self.input_flags, o.input_flags, KeysHidden::MASK),
            masked(self.input_flags, o.input_flags, NavHidden::MASK),
            prefer_specified(self.keyboard.into(), o.keyboard.into()),
            prefer_specified(self.navigation.into(), o.navigation.into()),
            prefer_specified(self.screen_width.into(), o.screen_width.into()),
            prefer_specified(self.screen_height.into(), o.screen_height.into()),
            prefer_specified(self.sdk_version.into(), o.sdk_version.into()),
            prefer_specified(self.minor_version.into(), o.minor_version.into()),
        ];

        axes.into_iter().flatten().next().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qualifiers::parse_with;
    use crate::res_table_config::{
        DENSITY_HIGH, DENSITY_LOW, DENSITY_XHIGH, DENSITY_XXHIGH, MNC_ZERO, Orientation,
    };

    fn config(qualifiers: &str) -> ResTableConfig {
        let parsed = parse_with(qualifiers, false);
        assert!(parsed.success, "can't parse {qualifiers}");
        parsed.config
    }

    #[test]
    fn identical_is_never_better() {
        let requested = config("en-rUS-sw400dp-land-hdpi-v28");

        for candidate in ["", "en", "en-rUS-land", "sw320dp-hdpi", "mcc310"] {
            let c = config(candidate);
            assert!(!is_better_match(&c, &c, &requested), "{candidate}");
        }
    }

    #[test]
    fn mcc_beats_empty() {
        let requested = ResTableConfig::builder().mcc(310).build();
        let with_mcc = config("mcc310");
        let empty = ResTableConfig::default();

        assert!(is_better_match(&with_mcc, &empty, &requested));
        assert!(!is_better_match(&empty, &with_mcc, &requested));
    }

    #[test]
    fn mnc_ranking() {
        let requested = ResTableConfig::builder().mcc(310).mnc(4).build();
        let exact = config("mcc310-mnc004");
        let mcc_only = config("mcc310");
        let none = ResTableConfig::default();

        assert!(is_better_match(&exact, &mcc_only, &requested));
        assert!(is_better_match(&mcc_only, &none, &requested));
        assert!(is_better_match(&exact, &none, &requested));
        assert!(!is_better_match(&none, &exact, &requested));
    }

    #[test]
    fn mnc_zero_only_matches_zero() {
        let candidate = config("mcc310-mnc00");

        assert!(candidate.matches(&ResTableConfig::builder().mcc(310).mnc(MNC_ZERO).build()));
        assert!(!candidate.matches(&ResTableConfig::builder().mcc(310).mnc(4).build()));
    }

    #[test]
    fn language_beats_no_language() {
        let requested = config("fr-rFR");

        assert!(is_better_match(&config("fr"), &config(""), &requested));
        assert!(is_better_match(&config("fr-rFR"), &config("fr"), &requested));
        assert!(!is_better_match(&config("fr"), &config("fr-rFR"), &requested));
    }

    #[test]
    fn region_prefers_exact_then_parent() {
        let requested = config("en-rGB");

        assert!(is_better_match(&config("en"), &config("en-rAU"), &requested));
        assert!(is_better_match(&config("en-rGB"), &config("en"), &requested));
    }

    #[test]
    fn us_english_prefers_no_language_over_other_regions() {
        let requested = config("en-rUS");

        assert!(is_better_match(&config(""), &config("en-rGB"), &requested));
        assert!(is_better_match(&config("en-rUS"), &config(""), &requested));
        assert!(is_better_match(&config("en"), &config(""), &requested));
    }

    #[test]
    fn tagalog_and_filipino_are_equivalent() {
        let requested = ResTableConfig::builder().language("fil").region("PH").build();
        let tagalog = config("tl-rPH");
        let filipino = config("fil-rPH");

        assert!(tagalog.matches(&requested));
        assert!(is_better_match(&filipino, &tagalog, &requested));
        assert!(!is_better_match(&tagalog, &filipino, &requested));
    }

    #[test]
    fn locale_filter() {
        let requested = config("fr-rCA");

        assert!(config("fr").matches(&requested));
        assert!(config("fr-rCA").matches(&requested));
        assert!(!config("fr-rFR").matches(&requested));
        assert!(!config("de").matches(&requested));
    }

    #[test]
    fn smallest_width_filter_and_rank() {
        let requested = config("sw400dp");

        assert!(!config("sw600dp").matches(&requested));
        assert!(config("sw320dp").matches(&requested));
        assert!(is_better_match(&config("sw320dp"), &config("sw200dp"), &requested));
        assert!(is_better_match(&config("sw200dp"), &config(""), &requested));
    }

    #[test]
    fn screen_dp_prefers_smaller_delta() {
        let requested = config("w800dp-h600dp");

        assert!(is_better_match(&config("w720dp"), &config("w480dp"), &requested));
        assert!(!config("w1024dp").matches(&requested));
    }

    #[test]
    fn screen_size_class() {
        let requested = config("large");

        assert!(!config("xlarge").matches(&requested));
        assert!(is_better_match(&config("large"), &config("normal"), &requested));
        // undefined counts as normal for a large request
        assert!(is_better_match(&config("normal"), &config(""), &requested));
        assert!(!is_better_match(&config(""), &config("normal"), &requested));
    }

    #[test]
    fn orientation_and_night() {
        let requested = ResTableConfig::builder()
            .orientation(Orientation::Land)
            .ui_mode_night(UIModeNight::Yes)
            .build();

        assert!(!config("port").matches(&requested));
        assert!(is_better_match(&config("land"), &config(""), &requested));
        assert!(is_better_match(&config("night"), &config(""), &requested));
        assert!(!config("notnight").matches(&requested));
    }

    #[test]
    fn density_scaling() {
        // exact bucket
        assert!(is_density_better(DENSITY_XHIGH, DENSITY_HIGH, DENSITY_XHIGH));
        // anydpi beats scaling
        assert!(is_density_better(DENSITY_ANY, DENSITY_XHIGH, DENSITY_XHIGH));
        assert!(!is_density_better(DENSITY_XHIGH, DENSITY_ANY, DENSITY_XHIGH));
        // both lower: the higher one
        assert!(is_density_better(DENSITY_HIGH, DENSITY_LOW, DENSITY_XXHIGH));
        // both higher: the lower one
        assert!(is_density_better(DENSITY_XHIGH, DENSITY_XXHIGH, DENSITY_HIGH));
        // scaling down from 320 to 240 beats scaling up from 160
        assert!(is_density_better(DENSITY_XHIGH, DENSITY_MEDIUM, DENSITY_HIGH));
        // requested 300: 320 is close enough to scale down
        assert!(is_density_better(DENSITY_XHIGH, DENSITY_HIGH, 300));
        // requested 250: 240 wins over scaling 480 down
        assert!(is_density_better(DENSITY_HIGH, DENSITY_XXHIGH, 250));
    }

    #[test]
    fn density_through_comparator() {
        let requested = config("xhdpi");

        assert!(is_better_match(&config("xhdpi"), &config("hdpi"), &requested));
        assert!(is_better_match(&config("xhdpi"), &config(""), &requested));
        assert!(is_better_match(&config("anydpi"), &config("xhdpi"), &requested));
    }

    #[test]
    fn keys_hidden_soft_matches_exposed() {
        let requested = ResTableConfig::builder().keys_hidden(KeysHidden::Soft).build();
        let exposed = ResTableConfig::builder().keys_hidden(KeysHidden::No).build();
        let soft = ResTableConfig::builder().keys_hidden(KeysHidden::Soft).build();

        assert!(exposed.matches(&requested));
        assert!(!config("keyshidden").matches(&requested));
        assert!(is_better_match(&soft, &exposed, &requested));
    }

    #[test]
    fn version_filter_and_rank() {
        let requested = config("v28");

        assert!(!config("v29").matches(&requested));
        assert!(is_better_match(&config("v26"), &config("v21"), &requested));
        assert!(is_better_match(&config("v21"), &config(""), &requested));
    }

    #[test]
    fn locale_decides_before_smallest_width() {
        let requested = config("fr-rCA-sw720dp");
        let french = config("fr-rCA");
        let tablet = config("sw600dp");

        assert!(is_better_match(&french, &tablet, &requested));
        assert!(!is_better_match(&tablet, &french, &requested));
    }

    #[test]
    fn unspecified_request_axis_decides_nothing() {
        let requested = config("en");

        assert!(!is_better_match(&config("land"), &config("port"), &requested));
        assert!(!is_better_match(&config("port"), &config("land"), &requested));

        assert!(!is_better_match(&config("sw600dp"), &config(""), &requested));
        assert!(!is_better_match(&config(""), &config("sw600dp"), &requested));
        assert!(!is_better_match(&config("sw600dp"), &config("sw360dp"), &requested));

        assert!(!is_better_match(&config("w800dp"), &config(""), &requested));
        assert!(!is_better_match(&config("h600dp"), &config("h400dp"), &requested));
        assert!(!is_better_match(&config("h400dp"), &config("h600dp"), &requested));

        // a missing density stands for the system default
        assert!(is_better_match(&config("mdpi"), &config("hdpi"), &requested));
        assert!(!is_better_match(&config("hdpi"), &config("mdpi"), &requested));
    }

    #[test]
    fn more_specific_without_request() {
        assert!(config("en").is_better_than(&config(""), None));
        assert!(!config("").is_better_than(&config("en"), None));
        assert!(config("mcc310").is_more_specific_than(&config("en-rUS")));
        assert!(config("land").is_more_specific_than(&config("")));
        // density is never more specific
        assert!(!config("hdpi").is_more_specific_than(&config("")));
    }
}
