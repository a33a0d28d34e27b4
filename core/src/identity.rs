//! Resource identity: namespaced names, packed ids and inferred value types.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;
use serde::Serialize;

use crate::errors::ResourceError;

/// Package name of the platform resources
pub const FRAMEWORK_PACKAGE: &str = "android";

/// Package id reserved for the platform resources
pub const FRAMEWORK_PACKAGE_ID: u8 = 0x01;

/// Single place that decides whether a package is the framework namespace
#[inline]
pub fn is_framework_package(package: &str) -> bool {
    package == FRAMEWORK_PACKAGE
}

/// Packed resource identifier `0xPPTTEEEE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(pub u32);

impl ResourceId {
    #[inline]
    pub const fn pack(package_id: u8, type_id: u8, entry_id: u16) -> ResourceId {
        ResourceId(((package_id as u32) << 24) | ((type_id as u32) << 16) | entry_id as u32)
    }

    #[inline]
    pub const fn unpack(self) -> (u8, u8, u16) {
        (self.package_id(), self.type_id(), self.entry_id())
    }

    #[inline]
    pub const fn package_id(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn type_id(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn entry_id(self) -> u16 {
        self.0 as u16
    }

    #[inline]
    pub const fn is_framework_resource(self) -> bool {
        self.package_id() == FRAMEWORK_PACKAGE_ID
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        ResourceId(value)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Value type inferred from the textual shape of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Color,
    Boolean,
    Dimension,
    Integer,
    Fraction,
    #[default]
    CharSequence,
}

static COLOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
});
static DIMENSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(?:\.\d+)?(?:dp|sp|pt|px|in|mm)$").unwrap());
static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").unwrap());
static FRACTION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d*\.\d+$").unwrap());

impl ValueType {
    /// Infer type from text, the check order matters
    pub fn infer(text: &str) -> ValueType {
        if COLOR_PATTERN.is_match(text) {
            ValueType::Color
        } else if text == "true" || text == "false" {
            ValueType::Boolean
        } else if DIMENSION_PATTERN.is_match(text) {
            ValueType::Dimension
        } else if INTEGER_PATTERN.is_match(text) {
            ValueType::Integer
        } else if FRACTION_PATTERN.is_match(text) {
            ValueType::Fraction
        } else {
            ValueType::CharSequence
        }
    }
}

/// Resource type, the `type` part of `@type/name`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResType {
    Anim,
    Animator,
    Array,
    Attr,
    Bool,
    Color,
    Dimen,
    Drawable,
    Font,
    Fraction,
    Id,
    Integer,
    Layout,
    Menu,
    Mipmap,
    Plurals,
    Raw,
    String,
    Style,
    Styleable,
    Transition,
    Xml,
}

static RES_TYPE_NAMES: phf::Map<&'static str, ResType> = phf_map! {
    "anim" => ResType::Anim,
    "animator" => ResType::Animator,
    "array" => ResType::Array,
    "attr" => ResType::Attr,
    "bool" => ResType::Bool,
    "color" => ResType::Color,
    "dimen" => ResType::Dimen,
    "drawable" => ResType::Drawable,
    "font" => ResType::Font,
    "fraction" => ResType::Fraction,
    "id" => ResType::Id,
    "integer" => ResType::Integer,
    "layout" => ResType::Layout,
    "menu" => ResType::Menu,
    "mipmap" => ResType::Mipmap,
    "plurals" => ResType::Plurals,
    "raw" => ResType::Raw,
    "string" => ResType::String,
    "style" => ResType::Style,
    "styleable" => ResType::Styleable,
    "transition" => ResType::Transition,
    "xml" => ResType::Xml,
};

impl ResType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResType::Anim => "anim",
            ResType::Animator => "animator",
            ResType::Array => "array",
            ResType::Attr => "attr",
            ResType::Bool => "bool",
            ResType::Color => "color",
            ResType::Dimen => "dimen",
            ResType::Drawable => "drawable",
            ResType::Font => "font",
            ResType::Fraction => "fraction",
            ResType::Id => "id",
            ResType::Integer => "integer",
            ResType::Layout => "layout",
            ResType::Menu => "menu",
            ResType::Mipmap => "mipmap",
            ResType::Plurals => "plurals",
            ResType::Raw => "raw",
            ResType::String => "string",
            ResType::Style => "style",
            ResType::Styleable => "styleable",
            ResType::Transition => "transition",
            ResType::Xml => "xml",
        }
    }

    /// Type declared by an element of a `values` file
    ///
    /// `<item type="...">` and `<declare-styleable>` are handled by the caller.
    pub fn from_value_tag(tag: &str) -> Option<ResType> {
        match tag {
            "string-array" | "integer-array" => Some(ResType::Array),
            "item" | "declare-styleable" | "eat-comment" | "skip" => None,
            tag => RES_TYPE_NAMES.get(tag).copied(),
        }
    }
}

impl FromStr for ResType {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RES_TYPE_NAMES
            .get(s)
            .copied()
            .ok_or_else(|| ResourceError::InvalidName(s.to_owned()))
    }
}

impl fmt::Display for ResType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully qualified resource name `package:type/name`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ResName {
    pub package: String,
    #[serde(rename = "type")]
    pub res_type: ResType,
    pub name: String,
}

impl ResName {
    pub fn new(package: impl Into<String>, res_type: ResType, name: impl Into<String>) -> ResName {
        ResName {
            package: package.into(),
            res_type,
            name: name.into(),
        }
    }

    /// Parse `package:type/name`
    pub fn parse(value: &str) -> Result<ResName, ResourceError> {
        let invalid = || ResourceError::InvalidName(value.to_owned());

        let (package, rest) = value.split_once(':').ok_or_else(invalid)?;
        let (res_type, name) = rest.split_once('/').ok_or_else(invalid)?;
        if package.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        Ok(ResName::new(package, res_type.parse()?, name))
    }

    /// Qualify a possibly partial reference
    ///
    /// Accepts `@type/name`, `@pkg:type/name`, `@+id/name`, `@*pkg:type/name`,
    /// `?attr`, `?pkg:attr`, `?pkg:attr/name` and bare `name`.
    pub fn qualify(reference: &str, default_package: &str, default_type: ResType) -> Option<ResName> {
        let reference = reference.trim();
        let reference = reference
            .strip_prefix('@')
            .or_else(|| reference.strip_prefix('?'))
            .unwrap_or(reference);
        let reference = reference
            .strip_prefix('+')
            .or_else(|| reference.strip_prefix('*'))
            .unwrap_or(reference);

        let (package, rest) = match reference.split_once(':') {
            Some((package, rest)) if !package.is_empty() => (package, rest),
            Some(_) => return None,
            None => (default_package, reference),
        };

        let (res_type, name) = match rest.split_once('/') {
            Some((res_type, name)) => (res_type.parse().ok()?, name),
            None => (default_type, rest),
        };

        if name.is_empty() {
            return None;
        }

        Some(ResName::new(package, res_type, name))
    }

    /// Same type and name, the package is ignored
    #[inline]
    pub fn is_same_name(&self, other: &ResName) -> bool {
        self.res_type == other.res_type && self.name == other.name
    }

    #[inline]
    pub fn is_framework(&self) -> bool {
        is_framework_package(&self.package)
    }

    pub fn with_package(&self, package: &str) -> ResName {
        ResName::new(package, self.res_type, self.name.clone())
    }

    pub fn fully_qualified_name(&self) -> String {
        self.to_string()
    }
}

impl FromStr for ResName {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResName::parse(s)
    }
}

impl fmt::Display for ResName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.package, self.res_type, self.name)
    }
}
