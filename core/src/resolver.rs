//! Resolution of resources, references and style attributes for one
//! requested configuration.

use std::sync::Arc;

use ahash::AHashSet;
use log::{debug, warn};
use res_resolver_config::ResTableConfig;

use crate::errors::ResourceError;
use crate::identity::{ResName, ResType};
use crate::style::{AttributeResource, StyleData};
use crate::table::{ResourceTable, TypedResource};
use crate::theme::ThemeStyleSet;

/// Resolves resources of a table for a requested configuration
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a ResourceTable,
    requested: &'a ResTableConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a ResourceTable, requested: &'a ResTableConfig) -> Resolver<'a> {
        Resolver { table, requested }
    }

    #[inline]
    pub fn requested(&self) -> &'a ResTableConfig {
        self.requested
    }

    /// Best variant of a resource
    pub fn resolve(&self, name: &ResName) -> Option<&'a TypedResource> {
        self.table
            .get(name, self.requested)
            .map(|candidate| &candidate.resource)
    }

    pub fn style(&self, name: &ResName) -> Option<&'a Arc<StyleData>> {
        self.table.get_style(name, self.requested)
    }

    /// Follow `@type/name` references until a plain value
    ///
    /// References without a target end the walk with `None`.
    pub fn resolve_value(&self, name: &ResName) -> Result<Option<&'a TypedResource>, ResourceError> {
        let mut visited = AHashSet::new();
        let mut current = name.clone();

        loop {
            if !visited.insert(current.clone()) {
                return Err(ResourceError::ReferenceCycle(current.to_string()));
            }

            let Some(resource) = self.resolve(&current) else {
                debug!("{current}: no variant for {}", self.requested);
                return Ok(None);
            };

            if !resource.is_reference() {
                return Ok(Some(resource));
            }

            let Some(reference) = resource
                .as_text()
                .and_then(|text| ResName::qualify(text, &current.package, current.res_type))
            else {
                warn!("{current}: malformed reference {:?}", resource.as_text());
                return Ok(None);
            };

            current = reference;
        }
    }

    /// Attribute value of a style, walking its parents and then the theme
    ///
    /// Parents are looked up in the table with the requested configuration.
    pub fn style_attr(
        &self,
        style: &'a StyleData,
        attr: &ResName,
        theme: Option<&'a ThemeStyleSet>,
    ) -> Result<Option<&'a AttributeResource>, ResourceError> {
        let mut visited = AHashSet::new();
        let mut current = style;

        loop {
            if !visited.insert(current.res_name()) {
                return Err(ResourceError::StyleCycle(current.res_name().to_string()));
            }

            if let Some(value) = current.get_attr_value(attr) {
                return Ok(Some(value));
            }

            let Some(parent_name) = current.parent_name() else {
                break;
            };

            match self.style(&parent_name) {
                Some(parent) => current = parent.as_ref(),
                None => {
                    // implicit dotted parents are optional
                    if current.parent().is_some() {
                        warn!("{}: parent {parent_name} not found", current.res_name());
                    }
                    break;
                }
            }
        }

        Ok(theme.and_then(|theme| theme.get_attr_value(attr)))
    }

    /// Attribute through a style name, see [`Resolver::style_attr`]
    pub fn style_attr_by_name(
        &self,
        style: &ResName,
        attr: &ResName,
        theme: Option<&'a ThemeStyleSet>,
    ) -> Result<Option<&'a AttributeResource>, ResourceError> {
        match self.style(style) {
            Some(style) => self.style_attr(style, attr, theme),
            None => Ok(theme.and_then(|theme| theme.get_attr_value(attr))),
        }
    }

    /// All attributes visible through a style and its parents, nearest definition first
    pub fn flatten_style(&self, style: &'a StyleData) -> Result<Vec<&'a AttributeResource>, ResourceError> {
        let mut visited = AHashSet::new();
        let mut attrs: Vec<&AttributeResource> = Vec::new();
        let mut current = Some(style);

        while let Some(style) = current {
            if !visited.insert(style.res_name()) {
                return Err(ResourceError::StyleCycle(style.res_name().to_string()));
            }

            for item in style.items() {
                if !attrs.iter().any(|seen| seen.attr == item.attr) {
                    attrs.push(item);
                }
            }

            current = style
                .parent_name()
                .and_then(|parent| self.style(&parent))
                .map(Arc::as_ref);
        }

        Ok(attrs)
    }

    /// Build a theme from a style and its parents
    ///
    /// The style is applied before its parents, so its own definitions win.
    pub fn theme_from_style(&self, style: &ResName) -> Result<ThemeStyleSet, ResourceError> {
        let mut theme = ThemeStyleSet::new();
        let Some(style) = self.style(style) else {
            return Ok(theme);
        };

        let mut chain = vec![Arc::clone(style)];
        let mut visited = AHashSet::new();
        visited.insert(style.res_name());

        while let Some(parent) = chain
            .last()
            .and_then(|style| style.parent_name())
            .and_then(|parent| self.style(&parent))
        {
            if !visited.insert(parent.res_name()) {
                return Err(ResourceError::StyleCycle(parent.res_name().to_string()));
            }
            chain.push(Arc::clone(parent));
        }

        for style in chain {
            theme.apply(style, false);
        }

        Ok(theme)
    }

    /// Resolve a `?attr` reference of an attribute value against a theme
    pub fn theme_reference(
        &self,
        value: &AttributeResource,
        theme: &'a ThemeStyleSet,
    ) -> Result<Option<&'a AttributeResource>, ResourceError> {
        let mut visited = AHashSet::new();
        let mut current = match value.style_reference() {
            Some(attr) => attr,
            None => return Ok(None),
        };

        loop {
            if !visited.insert(current.clone()) {
                return Err(ResourceError::ReferenceCycle(current.to_string()));
            }

            let Some(found) = theme.get_attr_value(&current) else {
                return Ok(None);
            };

            match found.style_reference() {
                Some(next) if next.res_type == ResType::Attr => current = next,
                _ => return Ok(Some(found)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ResType;
    use res_resolver_config::qualifiers::parse_with;

    const APP: &str = "com.example";

    fn config(qualifiers: &str) -> ResTableConfig {
        let parsed = parse_with(qualifiers, false);
        assert!(parsed.success, "can't parse {qualifiers}");
        parsed.config
    }

    fn attr(package: &str, name: &str) -> ResName {
        ResName::new(package, ResType::Attr, name)
    }

    fn style(package: &str, name: &str, parent: Option<&str>, items: &[(&str, &str)]) -> StyleData {
        StyleData::new(
            package,
            name,
            parent.map(str::to_owned),
            items
                .iter()
                .map(|(name, value)| AttributeResource::new(attr(package, name), *value, package))
                .collect(),
        )
    }

    fn style_name(package: &str, name: &str) -> ResName {
        ResName::new(package, ResType::Style, name)
    }

    fn themed_table() -> ResourceTable {
        let mut builder = ResourceTable::builder();
        builder
            .add_style(
                style("android", "Theme", None, &[("textColor", "#000"), ("windowBg", "#fff")]),
                config(""),
            )
            .add_style(
                style("android", "Theme", None, &[("textColor", "#eee"), ("windowBg", "#111")]),
                config("night"),
            )
            .add_style(
                style(APP, "Theme.App", Some("@android:style/Theme"), &[("accent", "@color/accent")]),
                config(""),
            )
            .add_style(style(APP, "Theme.App.Dark", None, &[("accent", "#f00")]), config(""))
            .add_style(style(APP, "Loop.A", Some("Loop.B"), &[]), config(""))
            .add_style(style(APP, "Loop.B", Some("Loop.A"), &[]), config(""))
            .add(
                ResName::new(APP, ResType::Color, "accent"),
                TypedResource::new("@color/brand"),
                config(""),
            )
            .add(
                ResName::new(APP, ResType::Color, "brand"),
                TypedResource::new("#3F51B5"),
                config(""),
            )
            .add(
                ResName::new(APP, ResType::Color, "ping"),
                TypedResource::new("@color/pong"),
                config(""),
            )
            .add(
                ResName::new(APP, ResType::Color, "pong"),
                TypedResource::new("@color/ping"),
                config(""),
            )
            .add(
                ResName::new(APP, ResType::Color, "dangling"),
                TypedResource::new("@color/missing"),
                config(""),
            );
        builder.build()
    }

    #[test]
    fn explicit_parent_chain() {
        let table = themed_table();
        let requested = config("");
        let resolver = Resolver::new(&table, &requested);

        let value = resolver
            .style_attr_by_name(&style_name(APP, "Theme.App"), &attr("android", "textColor"), None)
            .unwrap()
            .unwrap();
        assert_eq!(value.value, "#000");
    }

    #[test]
    fn parent_follows_requested_config() {
        let table = themed_table();
        let requested = config("night");
        let resolver = Resolver::new(&table, &requested);

        let value = resolver
            .style_attr_by_name(&style_name(APP, "Theme.App"), &attr("android", "windowBg"), None)
            .unwrap()
            .unwrap();
        assert_eq!(value.value, "#111");
    }

    #[test]
    fn implicit_dotted_parent() {
        let table = themed_table();
        let requested = config("");
        let resolver = Resolver::new(&table, &requested);
        let dark = style_name(APP, "Theme.App.Dark");

        let accent = resolver
            .style_attr_by_name(&dark, &attr(APP, "accent"), None)
            .unwrap()
            .unwrap();
        assert_eq!(accent.value, "#f00");

        // Theme.App.Dark -> Theme.App -> android:Theme
        let text_color = resolver
            .style_attr_by_name(&dark, &attr("android", "textColor"), None)
            .unwrap()
            .unwrap();
        assert_eq!(text_color.value, "#000");
    }

    #[test]
    fn theme_fallback() {
        let table = themed_table();
        let requested = config("");
        let resolver = Resolver::new(&table, &requested);

        let mut theme = ThemeStyleSet::new();
        theme.apply(style(APP, "Overlay", None, &[("elevation", "4dp")]), false);

        let value = resolver
            .style_attr_by_name(&style_name(APP, "Theme.App"), &attr(APP, "elevation"), Some(&theme))
            .unwrap()
            .unwrap();
        assert_eq!(value.value, "4dp");

        let missing = resolver
            .style_attr_by_name(&style_name(APP, "Theme.App"), &attr(APP, "nothing"), Some(&theme))
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn parent_cycle_is_an_error() {
        let table = themed_table();
        let requested = config("");
        let resolver = Resolver::new(&table, &requested);

        let result = resolver.style_attr_by_name(&style_name(APP, "Loop.A"), &attr(APP, "x"), None);
        assert!(matches!(result, Err(ResourceError::StyleCycle(_))));

        let loop_style = resolver.style(&style_name(APP, "Loop.A")).unwrap();
        assert!(matches!(
            resolver.flatten_style(loop_style),
            Err(ResourceError::StyleCycle(_))
        ));
    }

    #[test]
    fn follows_references() {
        let table = themed_table();
        let requested = config("");
        let resolver = Resolver::new(&table, &requested);

        let brand = resolver
            .resolve_value(&ResName::new(APP, ResType::Color, "accent"))
            .unwrap()
            .unwrap();
        assert_eq!(brand.as_text(), Some("#3F51B5"));

        assert!(matches!(
            resolver.resolve_value(&ResName::new(APP, ResType::Color, "ping")),
            Err(ResourceError::ReferenceCycle(_))
        ));
        assert!(
            resolver
                .resolve_value(&ResName::new(APP, ResType::Color, "dangling"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn flatten_prefers_nearest() {
        let table = themed_table();
        let requested = config("");
        let resolver = Resolver::new(&table, &requested);

        let dark = resolver.style(&style_name(APP, "Theme.App.Dark")).unwrap();
        let attrs = resolver.flatten_style(dark).unwrap();
        let values: Vec<(&str, &str)> = attrs
            .iter()
            .map(|item| (item.attr.name.as_str(), item.value.as_str()))
            .collect();

        assert_eq!(
            values,
            vec![("accent", "#f00"), ("textColor", "#000"), ("windowBg", "#fff")]
        );
    }

    #[test]
    fn theme_from_style_chain() {
        let table = themed_table();
        let requested = config("");
        let resolver = Resolver::new(&table, &requested);

        let theme = resolver
            .theme_from_style(&style_name(APP, "Theme.App.Dark"))
            .unwrap();
        assert_eq!(theme.get_attr_value(&attr(APP, "accent")).unwrap().value, "#f00");
        assert_eq!(
            theme.get_attr_value(&attr("android", "windowBg")).unwrap().value,
            "#fff"
        );

        let item = AttributeResource::new(attr(APP, "tint"), "?accent", APP);
        let resolved = resolver.theme_reference(&item, &theme).unwrap().unwrap();
        assert_eq!(resolved.value, "#f00");
    }
}
