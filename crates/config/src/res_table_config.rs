use std::cmp::Ordering;
use std::fmt::{Display, Write};
use std::str::FromStr;

use bitflags::bitflags;
use log::warn;
use winnow::binary::{Endianness, le_u32, u8};
use winnow::prelude::*;
use winnow::token::take;

use crate::errors::ConfigError;
use crate::qualifiers;

/// Size of the structure written by [`ResTableConfig::to_bytes`]
pub const RES_TABLE_CONFIG_SIZE: u32 = 64;

/// MNC value for a literal `mnc00`, because 0 already means "any"
pub const MNC_ZERO: u16 = 0xffff;

pub const DENSITY_DEFAULT: u16 = 0;
pub const DENSITY_LOW: u16 = 120;
pub const DENSITY_MEDIUM: u16 = 160;
pub const DENSITY_TV: u16 = 213;
pub const DENSITY_HIGH: u16 = 240;
pub const DENSITY_XHIGH: u16 = 320;
pub const DENSITY_XXHIGH: u16 = 480;
pub const DENSITY_XXXHIGH: u16 = 640;
pub const DENSITY_ANY: u16 = 0xfffe;
pub const DENSITY_NONE: u16 = 0xffff;

bitflags! {
    /// Bitmask of configuration axes, as used in Android's AConfiguration.
    ///
    /// Returned by [`ResTableConfig::diff`].
    ///
    /// [Source Code](https://cs.android.com/android/platform/superproject/main/+/main:frameworks/native/include/android/configuration.h;l=57;drc=61197364367c9e404c7da6900658f1b16c42d0da;bpv=0;bpt=1)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConfigFlags: u32 {
        /// Mobile Country Code (MCC).
        const MCC = 0x0001;

        /// Mobile Network Code (MNC).
        const MNC = 0x0002;

        /// Language, region, script, variant or numbering system.
        const LOCALE = 0x0004;

        const TOUCHSCREEN = 0x0008;
        const KEYBOARD = 0x0010;

        /// Keyboard or navigation availability (hidden/exposed).
        const KEYBOARD_HIDDEN = 0x0020;

        const NAVIGATION = 0x0040;
        const ORIENTATION = 0x0080;
        const DENSITY = 0x0100;

        /// Screen size in pixels or in dp.
        const SCREEN_SIZE = 0x0200;

        const VERSION = 0x0400;

        /// Screen size class and long/notlong.
        const SCREEN_LAYOUT = 0x0800;

        const UI_MODE = 0x1000;
        const SMALLEST_SCREEN_SIZE = 0x2000;
        const LAYOUTDIR = 0x4000;
        const SCREEN_ROUND = 0x8000;

        /// Wide color gamut and HDR.
        const COLOR_MODE = 0x10000;
    }
}

/// Declares a masked qualifier axis: the enum, its raw bits and the qualifier token
/// for every value.
macro_rules! qualifier_axis {
    (
        $(#[$meta:meta])*
        $name:ident, mask = $mask:expr, {
            $($variant:ident = $value:expr => $token:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr(u8)]
        pub enum $name {
            /// Not specified
            #[default]
            Any = 0,
            $($variant = $value,)+
        }

        impl $name {
            pub const MASK: u8 = $mask;

            #[inline]
            pub fn bits(self) -> u8 {
                self as u8
            }

            /// Lookup value by the qualifier token, `any` maps to [`Self::Any`]
            pub fn from_token(token: &str) -> Option<Self> {
                match token {
                    "any" => Some(Self::Any),
                    $($token => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                match value & $mask {
                    $(v if v == $value => Self::$variant,)+
                    _ => Self::Any,
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    Self::Any => write!(f, "any"),
                    $(Self::$variant => write!(f, $token),)+
                }
            }
        }
    };
}

qualifier_axis! {
    /// Layout direction (`ldltr`, `ldrtl`)
    /// See: <https://developer.android.com/guide/topics/resources/providing-resources.html#LayoutDirectionQualifier>
    LayoutDir, mask = 0xc0, {
        Ltr = 0x01 << 6 => "ldltr",
        Rtl = 0x02 << 6 => "ldrtl",
    }
}

qualifier_axis! {
    /// Screen size class
    /// See: <https://developer.android.com/guide/topics/resources/providing-resources#ScreenSizeQualifier>
    ScreenSize, mask = 0x0f, {
        Small = 0x01 => "small",
        Normal = 0x02 => "normal",
        Large = 0x03 => "large",
        XLarge = 0x04 => "xlarge",
    }
}

qualifier_axis! {
    ScreenLong, mask = 0x30, {
        No = 0x01 << 4 => "notlong",
        Yes = 0x02 << 4 => "long",
    }
}

qualifier_axis! {
    /// Stored in `screenLayout2`
    ScreenRound, mask = 0x03, {
        No = 0x01 => "notround",
        Yes = 0x02 => "round",
    }
}

qualifier_axis! {
    WideColorGamut, mask = 0x03, {
        No = 0x01 => "nowidecg",
        Yes = 0x02 => "widecg",
    }
}

qualifier_axis! {
    Hdr, mask = 0x0c, {
        No = 0x01 << 2 => "lowdr",
        Yes = 0x02 << 2 => "highdr",
    }
}

qualifier_axis! {
    Orientation, mask = 0xff, {
        Port = 0x01 => "port",
        Land = 0x02 => "land",
        Square = 0x03 => "square",
    }
}

qualifier_axis! {
    /// UI mode type. `Normal` has no qualifier of its own: the `normal` token is
    /// a screen size.
    UIModeType, mask = 0x0f, {
        Normal = 0x01 => "normal",
        Desk = 0x02 => "desk",
        Car = 0x03 => "car",
        Television = 0x04 => "television",
        Appliance = 0x05 => "appliance",
        Watch = 0x06 => "watch",
        VrHeadset = 0x07 => "vrheadset",
    }
}

qualifier_axis! {
    UIModeNight, mask = 0x30, {
        No = 0x01 << 4 => "notnight",
        Yes = 0x02 << 4 => "night",
    }
}

qualifier_axis! {
    Touchscreen, mask = 0xff, {
        NoTouch = 0x01 => "notouch",
        Stylus = 0x02 => "stylus",
        Finger = 0x03 => "finger",
    }
}

qualifier_axis! {
    /// Hardware keyboard availability, stored in `inputFlags`
    KeysHidden, mask = 0x03, {
        No = 0x01 => "keysexposed",
        Yes = 0x02 => "keyshidden",
        Soft = 0x03 => "keyssoft",
    }
}

qualifier_axis! {
    Keyboard, mask = 0xff, {
        NoKeys = 0x01 => "nokeys",
        Qwerty = 0x02 => "qwerty",
        TwelveKey = 0x03 => "12key",
    }
}

qualifier_axis! {
    /// Navigation keys availability, stored in `inputFlags`
    NavHidden, mask = 0x0c, {
        No = 0x01 << 2 => "navexposed",
        Yes = 0x02 << 2 => "navhidden",
    }
}

qualifier_axis! {
    Navigation, mask = 0xff, {
        NoNav = 0x01 => "nonav",
        Dpad = 0x02 => "dpad",
        Trackball = 0x03 => "trackball",
        Wheel = 0x04 => "wheel",
    }
}

/// Qualifier token of a density value
pub fn density_token(density: u16) -> Option<String> {
    let name = match density {
        DENSITY_DEFAULT => return None,
        DENSITY_LOW => "ldpi",
        DENSITY_MEDIUM => "mdpi",
        DENSITY_TV => "tvdpi",
        DENSITY_HIGH => "hdpi",
        DENSITY_XHIGH => "xhdpi",
        DENSITY_XXHIGH => "xxhdpi",
        DENSITY_XXXHIGH => "xxxhdpi",
        DENSITY_ANY => "anydpi",
        DENSITY_NONE => "nodpi",
        other => return Some(format!("{}dpi", other)),
    };

    Some(name.to_owned())
}

/// Describes a particular resource configuration.
///
/// Mirrors `ResTable_config` from AOSP, every axis uses 0 as "unspecified".
/// Instances are immutable, use [`ResTableConfigBuilder`] to create or derive one.
///
/// [Source Code](https://cs.android.com/android/platform/superproject/main/+/main:frameworks/base/libs/androidfw/include/androidfw/ResourceTypes.h;l=1000)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResTableConfig {
    /// Mobile country code (from SIM)
    pub(crate) mcc: u16,

    /// Mobile network code (from SIM), [`MNC_ZERO`] for a literal `00`
    pub(crate) mnc: u16,

    /// Either two 7-bit ASCII letters or a packed ISO-639-2 code
    pub(crate) language: [u8; 2],

    /// Either two 7-bit ASCII letters or a packed UN M.49 code
    pub(crate) country: [u8; 2],

    pub(crate) orientation: u8,
    pub(crate) touchscreen: u8,
    pub(crate) density: u16,

    pub(crate) keyboard: u8,
    pub(crate) navigation: u8,
    pub(crate) input_flags: u8,

    pub(crate) screen_width: u16,
    pub(crate) screen_height: u16,

    pub(crate) sdk_version: u16,
    pub(crate) minor_version: u16,

    /// Layout direction, screen size class and screen long
    pub(crate) screen_layout: u8,
    pub(crate) ui_mode: u8,
    pub(crate) smallest_screen_width_dp: u16,

    pub(crate) screen_width_dp: u16,
    pub(crate) screen_height_dp: u16,

    /// The ISO-15924 short name of the script, eg. `Latn`
    pub(crate) locale_script: [u8; 4],

    /// A single BCP-47 variant subtag, 4 to 8 chars
    pub(crate) locale_variant: [u8; 8],

    /// Round/notround
    pub(crate) screen_layout2: u8,

    /// Wide color gamut and HDR
    pub(crate) color_mode: u8,

    /// If true, `locale_script` was not provided but computed from language and region
    pub(crate) locale_script_was_computed: bool,

    /// The value of the BCP-47 Unicode extension for key `nu`, 3 to 8 chars
    pub(crate) locale_numbering_system: [u8; 8],
}

/// `uint16_t` in device byte order, see [`ResTableConfig::from_dtoh`]
#[inline]
fn device_u16(input: &mut &[u8]) -> ModalResult<u16> {
    winnow::binary::u16(Endianness::Native).parse_next(input)
}

#[inline]
fn byte_array<const N: usize>(input: &mut &[u8]) -> ModalResult<[u8; N]> {
    take(N)
        .map(|bytes: &[u8]| {
            let mut out = [0u8; N];
            out.copy_from_slice(bytes);
            out
        })
        .parse_next(input)
}

/// Implementation of the binary codec
impl ResTableConfig {
    /// Parse `ResTable_config` in the on-disk little-endian layout.
    ///
    /// Fields beyond the declared size keep their defaults, unknown trailing bytes are consumed.
    pub fn parse(input: &mut &[u8]) -> ModalResult<ResTableConfig> {
        // to keep track of how many bytes was consumed
        let start = input.len();

        let size = le_u32.parse_next(input)?;

        // fields are copied as-is and swapped to host order at the end
        let mut device = ResTableConfig::default();

        if size >= 8 {
            (device.mcc, device.mnc) = (device_u16, device_u16).parse_next(input)?;
        }
        if size >= 12 {
            (device.language, device.country) =
                (byte_array::<2>, byte_array::<2>).parse_next(input)?;
        }
        if size >= 16 {
            (device.orientation, device.touchscreen, device.density) =
                (u8, u8, device_u16).parse_next(input)?;
        }
        if size >= 20 {
            // the last byte is grammatical inflection, which is not a qualifier here
            (device.keyboard, device.navigation, device.input_flags, _) =
                (u8, u8, u8, u8).parse_next(input)?;
        }
        if size >= 24 {
            (device.screen_width, device.screen_height) = (device_u16, device_u16).parse_next(input)?;
        }
        if size >= 28 {
            (device.sdk_version, device.minor_version) = (device_u16, device_u16).parse_next(input)?;
        }
        if size >= 32 {
            (
                device.screen_layout,
                device.ui_mode,
                device.smallest_screen_width_dp,
            ) = (u8, u8, device_u16).parse_next(input)?;
        }
        if size >= 36 {
            (device.screen_width_dp, device.screen_height_dp) =
                (device_u16, device_u16).parse_next(input)?;
        }
        if size >= 40 {
            device.locale_script = byte_array::<4>.parse_next(input)?;
        }
        if size >= 48 {
            device.locale_variant = byte_array::<8>.parse_next(input)?;
        }
        if size >= 52 {
            // screenConfigPad2 is reserved
            (device.screen_layout2, device.color_mode, _) = (u8, u8, device_u16).parse_next(input)?;
        }
        if size >= 53 {
            device.locale_script_was_computed = u8.parse_next(input)? != 0;
        }
        if size >= 61 {
            device.locale_numbering_system = byte_array::<8>.parse_next(input)?;
        }
        if size > RES_TABLE_CONFIG_SIZE {
            warn!(
                "got ResTable_config with unexpected size {}, extra fields are ignored",
                size
            );
        }

        // consume padding and leftovers
        let consumed = start - input.len();
        let _ = take((size as usize).saturating_sub(consumed)).parse_next(input)?;

        Ok(ResTableConfig::from_dtoh(&device))
    }

    /// Convert a structure copied from device memory to host byte order.
    ///
    /// Only the 16-bit fields are swapped, sentinels such as [`MNC_ZERO`] and
    /// [`DENSITY_ANY`] survive the conversion.
    pub fn from_dtoh(device: &ResTableConfig) -> ResTableConfig {
        ResTableConfig {
            mcc: u16::from_le(device.mcc),
            mnc: u16::from_le(device.mnc),
            density: u16::from_le(device.density),
            screen_width: u16::from_le(device.screen_width),
            screen_height: u16::from_le(device.screen_height),
            sdk_version: u16::from_le(device.sdk_version),
            minor_version: u16::from_le(device.minor_version),
            smallest_screen_width_dp: u16::from_le(device.smallest_screen_width_dp),
            screen_width_dp: u16::from_le(device.screen_width_dp),
            screen_height_dp: u16::from_le(device.screen_height_dp),
            ..device.clone()
        }
    }

    /// Serialize to the on-disk layout, always [`RES_TABLE_CONFIG_SIZE`] bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(RES_TABLE_CONFIG_SIZE as usize);

        out.extend_from_slice(&RES_TABLE_CONFIG_SIZE.to_le_bytes());
        out.extend_from_slice(&self.mcc.to_le_bytes());
        out.extend_from_slice(&self.mnc.to_le_bytes());
        out.extend_from_slice(&self.language);
        out.extend_from_slice(&self.country);
        out.extend_from_slice(&[self.orientation, self.touchscreen]);
        out.extend_from_slice(&self.density.to_le_bytes());
        out.extend_from_slice(&[self.keyboard, self.navigation, self.input_flags, 0]);
        out.extend_from_slice(&self.screen_width.to_le_bytes());
        out.extend_from_slice(&self.screen_height.to_le_bytes());
        out.extend_from_slice(&self.sdk_version.to_le_bytes());
        out.extend_from_slice(&self.minor_version.to_le_bytes());
        out.extend_from_slice(&[self.screen_layout, self.ui_mode]);
        out.extend_from_slice(&self.smallest_screen_width_dp.to_le_bytes());
        out.extend_from_slice(&self.screen_width_dp.to_le_bytes());
        out.extend_from_slice(&self.screen_height_dp.to_le_bytes());
        out.extend_from_slice(&self.locale_script);
        out.extend_from_slice(&self.locale_variant);
        out.extend_from_slice(&[self.screen_layout2, self.color_mode, 0, 0]);
        out.push(self.locale_script_was_computed as u8);
        out.extend_from_slice(&self.locale_numbering_system);
        // end padding
        out.extend_from_slice(&[0, 0, 0]);

        out
    }
}

/// Axis accessors
impl ResTableConfig {
    pub fn builder() -> ResTableConfigBuilder {
        ResTableConfigBuilder::default()
    }

    /// Start a builder from a copy of this configuration
    pub fn to_builder(&self) -> ResTableConfigBuilder {
        ResTableConfigBuilder {
            config: self.clone(),
        }
    }

    pub fn mcc(&self) -> u16 {
        self.mcc
    }

    pub fn mnc(&self) -> u16 {
        self.mnc
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from(self.orientation)
    }

    pub fn touchscreen(&self) -> Touchscreen {
        Touchscreen::from(self.touchscreen)
    }

    pub fn density(&self) -> u16 {
        self.density
    }

    pub fn keyboard(&self) -> Keyboard {
        Keyboard::from(self.keyboard)
    }

    pub fn navigation(&self) -> Navigation {
        Navigation::from(self.navigation)
    }

    pub fn keys_hidden(&self) -> KeysHidden {
        KeysHidden::from(self.input_flags)
    }

    pub fn nav_hidden(&self) -> NavHidden {
        NavHidden::from(self.input_flags)
    }

    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }

    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }

    pub fn sdk_version(&self) -> u16 {
        self.sdk_version
    }

    pub fn minor_version(&self) -> u16 {
        self.minor_version
    }

    pub fn layout_direction(&self) -> LayoutDir {
        LayoutDir::from(self.screen_layout)
    }

    pub fn screen_size(&self) -> ScreenSize {
        ScreenSize::from(self.screen_layout)
    }

    pub fn screen_long(&self) -> ScreenLong {
        ScreenLong::from(self.screen_layout)
    }

    pub fn screen_round(&self) -> ScreenRound {
        ScreenRound::from(self.screen_layout2)
    }

    pub fn wide_color_gamut(&self) -> WideColorGamut {
        WideColorGamut::from(self.color_mode)
    }

    pub fn hdr(&self) -> Hdr {
        Hdr::from(self.color_mode)
    }

    pub fn ui_mode_type(&self) -> UIModeType {
        UIModeType::from(self.ui_mode)
    }

    pub fn ui_mode_night(&self) -> UIModeNight {
        UIModeNight::from(self.ui_mode)
    }

    pub fn smallest_screen_width_dp(&self) -> u16 {
        self.smallest_screen_width_dp
    }

    pub fn screen_width_dp(&self) -> u16 {
        self.screen_width_dp
    }

    pub fn screen_height_dp(&self) -> u16 {
        self.screen_height_dp
    }

    /// Returns true if every axis is unspecified
    pub fn is_default(&self) -> bool {
        *self == ResTableConfig::default()
    }

    /// `mcc` and `mnc` as the `imsi` union
    #[inline]
    pub(crate) fn imsi(&self) -> u32 {
        ((self.mcc as u32) << 16) | self.mnc as u32
    }

    /// Language and country as the big-endian `locale` union
    #[inline]
    pub(crate) fn locale(&self) -> u32 {
        u32::from_be_bytes([
            self.language[0],
            self.language[1],
            self.country[0],
            self.country[1],
        ])
    }

    #[inline]
    pub(crate) fn screen_type(&self) -> u32 {
        self.orientation as u32 | (self.touchscreen as u32) << 8 | (self.density as u32) << 16
    }

    #[inline]
    pub(crate) fn input(&self) -> u32 {
        self.keyboard as u32 | (self.navigation as u32) << 8 | (self.input_flags as u32) << 16
    }

    #[inline]
    pub(crate) fn screen_size_px(&self) -> u32 {
        self.screen_width as u32 | (self.screen_height as u32) << 16
    }

    #[inline]
    pub(crate) fn version(&self) -> u32 {
        self.sdk_version as u32 | (self.minor_version as u32) << 16
    }

    #[inline]
    pub(crate) fn screen_config(&self) -> u32 {
        self.screen_layout as u32
            | (self.ui_mode as u32) << 8
            | (self.smallest_screen_width_dp as u32) << 16
    }

    #[inline]
    pub(crate) fn screen_size_dp(&self) -> u32 {
        self.screen_width_dp as u32 | (self.screen_height_dp as u32) << 16
    }
}

/// Comparison helpers
impl ResTableConfig {
    /// Returns the set of axes that differ between two configurations
    pub fn diff(&self, o: &ResTableConfig) -> ConfigFlags {
        let mut diffs = ConfigFlags::empty();

        diffs.set(ConfigFlags::MCC, self.mcc != o.mcc);
        diffs.set(ConfigFlags::MNC, self.mnc != o.mnc);
        diffs.set(ConfigFlags::ORIENTATION, self.orientation != o.orientation);
        diffs.set(ConfigFlags::DENSITY, self.density != o.density);
        diffs.set(ConfigFlags::TOUCHSCREEN, self.touchscreen != o.touchscreen);
        diffs.set(
            ConfigFlags::KEYBOARD_HIDDEN,
            (self.input_flags ^ o.input_flags) & (KeysHidden::MASK | NavHidden::MASK) != 0,
        );
        diffs.set(ConfigFlags::KEYBOARD, self.keyboard != o.keyboard);
        diffs.set(ConfigFlags::NAVIGATION, self.navigation != o.navigation);
        diffs.set(
            ConfigFlags::VERSION,
            self.version() != o.version(),
        );
        diffs.set(
            ConfigFlags::LAYOUTDIR,
            (self.screen_layout ^ o.screen_layout) & LayoutDir::MASK != 0,
        );
        diffs.set(
            ConfigFlags::SCREEN_LAYOUT,
            (self.screen_layout ^ o.screen_layout) & !LayoutDir::MASK != 0,
        );
        diffs.set(
            ConfigFlags::SCREEN_ROUND,
            (self.screen_layout2 ^ o.screen_layout2) & ScreenRound::MASK != 0,
        );
        diffs.set(
            ConfigFlags::COLOR_MODE,
            (self.color_mode ^ o.color_mode) & (WideColorGamut::MASK | Hdr::MASK) != 0,
        );
        diffs.set(ConfigFlags::UI_MODE, self.ui_mode != o.ui_mode);
        diffs.set(
            ConfigFlags::SMALLEST_SCREEN_SIZE,
            self.smallest_screen_width_dp != o.smallest_screen_width_dp,
        );
        if self.screen_size_px() != o.screen_size_px() || self.screen_size_dp() != o.screen_size_dp()
        {
            diffs |= ConfigFlags::SCREEN_SIZE;
        }
        if self.compare_locales(o) != Ordering::Equal {
            diffs |= ConfigFlags::LOCALE;
        }

        diffs
    }

    /// Stable total order used to sort candidates, it carries no "better match" meaning
    pub fn compare(&self, o: &ResTableConfig) -> Ordering {
        self.imsi()
            .cmp(&o.imsi())
            .then_with(|| self.compare_locales(o))
            .then_with(|| self.screen_type().cmp(&o.screen_type()))
            .then_with(|| self.input().cmp(&o.input()))
            .then_with(|| self.screen_size_px().cmp(&o.screen_size_px()))
            .then_with(|| self.version().cmp(&o.version()))
            .then_with(|| self.screen_layout.cmp(&o.screen_layout))
            .then_with(|| self.screen_layout2.cmp(&o.screen_layout2))
            .then_with(|| self.color_mode.cmp(&o.color_mode))
            .then_with(|| self.ui_mode.cmp(&o.ui_mode))
            .then_with(|| {
                self.smallest_screen_width_dp
                    .cmp(&o.smallest_screen_width_dp)
            })
            .then_with(|| self.screen_size_dp().cmp(&o.screen_size_dp()))
    }
}

impl PartialOrd for ResTableConfig {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResTableConfig {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
            // computed scripts are ignored by `compare`, keep Ord consistent with Eq
            .then_with(|| {
                self.locale_script_was_computed
                    .cmp(&other.locale_script_was_computed)
            })
            .then_with(|| self.locale_script.cmp(&other.locale_script))
    }
}

/// Qualifier string conversions
impl ResTableConfig {
    /// Parse a qualifier string such as `en-rUS-sw600dp-land`
    pub fn from_qualifiers(qualifiers: &str) -> Result<ResTableConfig, ConfigError> {
        let parsed = qualifiers::parse(qualifiers);
        if parsed.success {
            Ok(parsed.config)
        } else {
            Err(ConfigError::InvalidQualifiers(qualifiers.to_owned()))
        }
    }

    /// Parse the configuration of a resource directory such as `values-fr-rCA`.
    ///
    /// Everything up to the first `-` is the resource type and is skipped,
    /// a directory without qualifiers has the default configuration.
    pub fn from_dir_name(dir_name: &str) -> Result<ResTableConfig, ConfigError> {
        match dir_name.split_once('-') {
            Some((_, qualifiers)) => ResTableConfig::from_qualifiers(qualifiers),
            None => Ok(ResTableConfig::default()),
        }
    }

    /// Render the canonical qualifier string, empty for the default configuration.
    ///
    /// The result parses back into an equal configuration.
    ///
    /// [Source Code](https://cs.android.com/android/platform/superproject/main/+/main:frameworks/base/libs/androidfw/ResourceTypes.cpp;l=3368;drc=61197364367c9e404c7da6900658f1b16c42d0da;bpv=0;bpt=1?q=ResTable_config::toString)
    pub fn qualifier_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if self.mcc != 0 {
            parts.push(format!("mcc{}", self.mcc));
        }
        match self.mnc {
            0 => {}
            MNC_ZERO => parts.push("mnc00".to_owned()),
            mnc => parts.push(format!("mnc{}", mnc)),
        }
        if let Some(locale) = self.dir_locale() {
            parts.push(locale);
        }

        if self.layout_direction() != LayoutDir::Any {
            parts.push(self.layout_direction().to_string());
        }
        if self.smallest_screen_width_dp != 0 {
            parts.push(format!("sw{}dp", self.smallest_screen_width_dp));
        }
        if self.screen_width_dp != 0 {
            parts.push(format!("w{}dp", self.screen_width_dp));
        }
        if self.screen_height_dp != 0 {
            parts.push(format!("h{}dp", self.screen_height_dp));
        }

        let masked = [
            (self.screen_size() != ScreenSize::Any).then(|| self.screen_size().to_string()),
            (self.screen_long() != ScreenLong::Any).then(|| self.screen_long().to_string()),
            (self.screen_round() != ScreenRound::Any).then(|| self.screen_round().to_string()),
            (self.wide_color_gamut() != WideColorGamut::Any)
                .then(|| self.wide_color_gamut().to_string()),
            (self.hdr() != Hdr::Any).then(|| self.hdr().to_string()),
            (self.orientation() != Orientation::Any).then(|| self.orientation().to_string()),
            // `normal` would be read back as a screen size
            (!matches!(self.ui_mode_type(), UIModeType::Any | UIModeType::Normal))
                .then(|| self.ui_mode_type().to_string()),
            (self.ui_mode_night() != UIModeNight::Any).then(|| self.ui_mode_night().to_string()),
            density_token(self.density),
            (self.touchscreen() != Touchscreen::Any).then(|| self.touchscreen().to_string()),
            (self.keys_hidden() != KeysHidden::Any).then(|| self.keys_hidden().to_string()),
            (self.keyboard() != Keyboard::Any).then(|| self.keyboard().to_string()),
            (self.nav_hidden() != NavHidden::Any).then(|| self.nav_hidden().to_string()),
            (self.navigation() != Navigation::Any).then(|| self.navigation().to_string()),
        ];
        parts.extend(masked.into_iter().flatten());

        if self.screen_size_px() != 0 {
            parts.push(format!("{}x{}", self.screen_width, self.screen_height));
        }
        if self.version() != 0 {
            let mut version = format!("v{}", self.sdk_version);
            if self.minor_version != 0 {
                let _ = write!(version, ".{}", self.minor_version);
            }
            parts.push(version);
        }

        parts.join("-")
    }
}

impl Display for ResTableConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_default() {
            write!(f, "default")
        } else {
            write!(f, "{}", self.qualifier_string())
        }
    }
}

impl FromStr for ResTableConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResTableConfig::from_qualifiers(s)
    }
}

/// Builder for [`ResTableConfig`]
#[derive(Debug, Clone, Default)]
pub struct ResTableConfigBuilder {
    config: ResTableConfig,
}

impl ResTableConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mcc(mut self, mcc: u16) -> Self {
        self.config.mcc = mcc;
        self
    }

    /// Pass [`MNC_ZERO`] for a literal `mnc00`
    pub fn mnc(mut self, mnc: u16) -> Self {
        self.config.mnc = mnc;
        self
    }

    /// Two or three letter language code, stored as given
    pub fn language(mut self, language: &str) -> Self {
        self.config.pack_language(language);
        self
    }

    /// Two letter or three digit region code, stored as given
    pub fn region(mut self, region: &str) -> Self {
        self.config.pack_region(region);
        self
    }

    /// Explicitly provided four letter script code
    pub fn script(mut self, script: &str) -> Self {
        self.config.locale_script = [0; 4];
        copy_truncated(&mut self.config.locale_script, script);
        self.config.locale_script_was_computed = false;
        self
    }

    pub fn variant(mut self, variant: &str) -> Self {
        self.config.locale_variant = [0; 8];
        copy_truncated(&mut self.config.locale_variant, variant);
        self
    }

    pub fn numbering_system(mut self, numbering_system: &str) -> Self {
        self.config.locale_numbering_system = [0; 8];
        copy_truncated(&mut self.config.locale_numbering_system, numbering_system);
        self
    }

    /// Replace the whole locale with a BCP-47 tag such as `sr-Latn-RS-u-nu-latn`
    pub fn bcp47_locale(mut self, tag: &str) -> Self {
        self.config.set_bcp47_locale(tag);
        self
    }

    pub fn layout_direction(mut self, value: LayoutDir) -> Self {
        self.config.screen_layout = (self.config.screen_layout & !LayoutDir::MASK) | value.bits();
        self
    }

    pub fn screen_size(mut self, value: ScreenSize) -> Self {
        self.config.screen_layout = (self.config.screen_layout & !ScreenSize::MASK) | value.bits();
        self
    }

    pub fn screen_long(mut self, value: ScreenLong) -> Self {
        self.config.screen_layout = (self.config.screen_layout & !ScreenLong::MASK) | value.bits();
        self
    }

    pub fn screen_round(mut self, value: ScreenRound) -> Self {
        self.config.screen_layout2 =
            (self.config.screen_layout2 & !ScreenRound::MASK) | value.bits();
        self
    }

    pub fn wide_color_gamut(mut self, value: WideColorGamut) -> Self {
        self.config.color_mode = (self.config.color_mode & !WideColorGamut::MASK) | value.bits();
        self
    }

    pub fn hdr(mut self, value: Hdr) -> Self {
        self.config.color_mode = (self.config.color_mode & !Hdr::MASK) | value.bits();
        self
    }

    pub fn orientation(mut self, value: Orientation) -> Self {
        self.config.orientation = value.bits();
        self
    }

    pub fn ui_mode_type(mut self, value: UIModeType) -> Self {
        self.config.ui_mode = (self.config.ui_mode & !UIModeType::MASK) | value.bits();
        self
    }

    pub fn ui_mode_night(mut self, value: UIModeNight) -> Self {
        self.config.ui_mode = (self.config.ui_mode & !UIModeNight::MASK) | value.bits();
        self
    }

    /// Density in dpi, or one of [`DENSITY_ANY`], [`DENSITY_NONE`]
    pub fn density(mut self, density: u16) -> Self {
        self.config.density = density;
        self
    }

    pub fn touchscreen(mut self, value: Touchscreen) -> Self {
        self.config.touchscreen = value.bits();
        self
    }

    pub fn keys_hidden(mut self, value: KeysHidden) -> Self {
        self.config.input_flags = (self.config.input_flags & !KeysHidden::MASK) | value.bits();
        self
    }

    pub fn keyboard(mut self, value: Keyboard) -> Self {
        self.config.keyboard = value.bits();
        self
    }

    pub fn nav_hidden(mut self, value: NavHidden) -> Self {
        self.config.input_flags = (self.config.input_flags & !NavHidden::MASK) | value.bits();
        self
    }

    pub fn navigation(mut self, value: Navigation) -> Self {
        self.config.navigation = value.bits();
        self
    }

    /// Screen size in pixels
    pub fn screen_pixels(mut self, width: u16, height: u16) -> Self {
        self.config.screen_width = width;
        self.config.screen_height = height;
        self
    }

    pub fn smallest_screen_width_dp(mut self, value: u16) -> Self {
        self.config.smallest_screen_width_dp = value;
        self
    }

    pub fn screen_width_dp(mut self, value: u16) -> Self {
        self.config.screen_width_dp = value;
        self
    }

    pub fn screen_height_dp(mut self, value: u16) -> Self {
        self.config.screen_height_dp = value;
        self
    }

    pub fn sdk_version(mut self, value: u16) -> Self {
        self.config.sdk_version = value;
        self
    }

    pub fn minor_version(mut self, value: u16) -> Self {
        self.config.minor_version = value;
        self
    }

    pub fn build(self) -> ResTableConfig {
        self.config
    }
}

/// Copy ASCII bytes into a zero-filled fixed buffer, dropping the overflow
pub(crate) fn copy_truncated(out: &mut [u8], value: &str) {
    for (dst, src) in out.iter_mut().zip(value.bytes()) {
        *dst = src;
    }
}
