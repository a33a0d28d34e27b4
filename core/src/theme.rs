use std::sync::Arc;

use smallvec::SmallVec;

use crate::identity::ResName;
use crate::style::{AttributeResource, StyleData};

/// Styles applied to a theme, in application order
///
/// Owned by a single theme, clone it to derive another one.
#[derive(Debug, Clone, Default)]
pub struct ThemeStyleSet {
    forced: SmallVec<[Arc<StyleData>; 2]>,
    regular: SmallVec<[Arc<StyleData>; 4]>,
}

impl ThemeStyleSet {
    pub fn new() -> ThemeStyleSet {
        ThemeStyleSet::default()
    }

    /// Append a style, forced ones take precedence over all regular ones
    pub fn apply(&mut self, style: impl Into<Arc<StyleData>>, forced: bool) {
        let style = style.into();
        if forced {
            self.forced.push(style);
        } else {
            self.regular.push(style);
        }
    }

    /// Earliest forced style defining the attribute, else the earliest regular one
    pub fn get_attr_value(&self, attr: &ResName) -> Option<&AttributeResource> {
        self.forced
            .iter()
            .chain(self.regular.iter())
            .find_map(|style| style.get_attr_value(attr))
    }

    /// Replace the content with another theme's styles
    pub fn set_to(&mut self, other: &ThemeStyleSet) {
        self.forced.clone_from(&other.forced);
        self.regular.clone_from(&other.regular);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forced.is_empty() && self.regular.is_empty()
    }

    /// Applied styles in lookup order, with the forced flag
    pub fn styles(&self) -> impl Iterator<Item = (&StyleData, bool)> {
        self.forced
            .iter()
            .map(|style| (style.as_ref(), true))
            .chain(self.regular.iter().map(|style| (style.as_ref(), false)))
    }
}
