//! Styles and the attributes they carry.

use serde::Serialize;

use crate::identity::{ResName, ResType, is_framework_package};

/// Attribute value inside a style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeResource {
    /// Attribute identity, its package is the namespace the attribute was declared in
    pub attr: ResName,
    /// Raw text as written in the style
    pub value: String,
    /// Package whose resources this value belongs to, references resolve against it
    pub context_package: String,
}

impl AttributeResource {
    pub fn new(attr: ResName, value: impl Into<String>, context_package: impl Into<String>) -> Self {
        AttributeResource {
            attr,
            value: value.into(),
            context_package: context_package.into(),
        }
    }

    #[inline]
    pub fn trimmed_value(&self) -> &str {
        self.value.trim()
    }

    /// `@null`
    #[inline]
    pub fn is_null(&self) -> bool {
        self.trimmed_value() == "@null"
    }

    /// `@empty`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trimmed_value() == "@empty"
    }

    /// `@[package:]type/name`
    pub fn is_resource_reference(&self) -> bool {
        let value = self.trimmed_value();
        value.starts_with('@') && !self.is_null() && !self.is_empty()
    }

    /// `?[package:][attr/]name`
    #[inline]
    pub fn is_style_reference(&self) -> bool {
        self.trimmed_value().starts_with('?')
    }

    /// Target of a `@` reference, qualified against the context package
    pub fn resource_reference(&self) -> Option<ResName> {
        if !self.is_resource_reference() {
            return None;
        }
        ResName::qualify(self.trimmed_value(), &self.context_package, self.attr.res_type)
    }

    /// Attribute named by a `?` reference
    pub fn style_reference(&self) -> Option<ResName> {
        if !self.is_style_reference() {
            return None;
        }
        ResName::qualify(self.trimmed_value(), &self.context_package, ResType::Attr)
    }
}

/// A `<style>` with its own attributes, parents are not merged in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleData {
    package: String,
    name: String,
    parent: Option<String>,
    items: Vec<AttributeResource>,
}

impl StyleData {
    pub fn new(
        package: impl Into<String>,
        name: impl Into<String>,
        parent: Option<String>,
        items: Vec<AttributeResource>,
    ) -> StyleData {
        StyleData {
            package: package.into(),
            name: name.into(),
            parent: parent.filter(|parent| !parent.trim().is_empty()),
            items,
        }
    }

    #[inline]
    pub fn package(&self) -> &str {
        &self.package
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[inline]
    pub fn items(&self) -> &[AttributeResource] {
        &self.items
    }

    pub fn res_name(&self) -> ResName {
        ResName::new(self.package.as_str(), ResType::Style, self.name.as_str())
    }

    /// Explicit parent, or the implicit one given by the dotted name
    /// (`Theme.Foo.Bar` inherits `Theme.Foo` from the same package).
    pub fn parent_name(&self) -> Option<ResName> {
        match &self.parent {
            Some(parent) => ResName::qualify(parent, &self.package, ResType::Style),
            None => self
                .name
                .rsplit_once('.')
                .filter(|(parent, _)| !parent.is_empty())
                .map(|(parent, _)| ResName::new(self.package.as_str(), ResType::Style, parent)),
        }
    }

    /// Look up an attribute defined directly by this style.
    ///
    /// Framework styles only expose attributes declared in the framework
    /// namespace. Other styles prefer the exact attribute, then any
    /// same-named attribute declared outside of the framework.
    pub fn get_attr_value(&self, attr: &ResName) -> Option<&AttributeResource> {
        if is_framework_package(&self.package) {
            return self
                .items
                .iter()
                .find(|item| item.attr == *attr && item.attr.is_framework());
        }

        if let Some(item) = self.items.iter().find(|item| item.attr == *attr) {
            return Some(item);
        }

        if attr.is_framework() {
            return None;
        }

        self.items
            .iter()
            .find(|item| item.attr.is_same_name(attr) && !item.attr.is_framework())
    }

    pub fn has_attr(&self, attr: &ResName) -> bool {
        self.get_attr_value(attr).is_some()
    }
}
