use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, warn};
use res_resolver_config::ResTableConfig;

use crate::identity::{ResName, ResType, ValueType};
use crate::style::StyleData;

/// Raw resource content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceValue {
    Text(String),
    Style(Arc<StyleData>),
}

/// Resource value with its inferred type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedResource {
    value: ResourceValue,
    value_type: ValueType,
}

impl TypedResource {
    /// Text value, the type is inferred from its shape
    pub fn new(text: impl Into<String>) -> TypedResource {
        let text = text.into();
        TypedResource {
            value_type: ValueType::infer(&text),
            value: ResourceValue::Text(text),
        }
    }

    pub fn with_type(text: impl Into<String>, value_type: ValueType) -> TypedResource {
        TypedResource {
            value: ResourceValue::Text(text.into()),
            value_type,
        }
    }

    pub fn style(style: impl Into<Arc<StyleData>>) -> TypedResource {
        TypedResource {
            value: ResourceValue::Style(style.into()),
            value_type: ValueType::CharSequence,
        }
    }

    #[inline]
    pub fn value(&self) -> &ResourceValue {
        &self.value
    }

    #[inline]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            ResourceValue::Text(text) => Some(text),
            ResourceValue::Style(_) => None,
        }
    }

    pub fn as_style(&self) -> Option<&Arc<StyleData>> {
        match &self.value {
            ResourceValue::Style(style) => Some(style),
            ResourceValue::Text(_) => None,
        }
    }

    /// `@[package:]type/name` text, `@null` and `@empty` are values on their own
    pub fn is_reference(&self) -> bool {
        self.as_text()
            .map(str::trim)
            .is_some_and(|text| text.starts_with('@') && text != "@null" && text != "@empty")
    }
}

/// One configuration variant of a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub config: ResTableConfig,
    pub resource: TypedResource,
}

/// Read-only index of resource variants
#[derive(Debug, Default)]
pub struct ResourceTable {
    entries: AHashMap<ResName, Vec<Candidate>>,
}

impl ResourceTable {
    pub fn builder() -> ResourceTableBuilder {
        ResourceTableBuilder::default()
    }

    /// All variants of a resource, ordered by configuration
    pub fn candidates(&self, name: &ResName) -> &[Candidate] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Best variant for the requested configuration
    ///
    /// Variants that can't be used with `requested` are skipped, the rest is
    /// reduced keeping the better match.
    pub fn get(&self, name: &ResName, requested: &ResTableConfig) -> Option<&Candidate> {
        let best = self
            .candidates(name)
            .iter()
            .filter(|candidate| candidate.config.matches(requested))
            .fold(None::<&Candidate>, |best, candidate| match best {
                Some(best) if !candidate.config.is_better_than(&best.config, Some(requested)) => {
                    Some(best)
                }
                _ => Some(candidate),
            });

        if let Some(best) = best {
            debug!("{name}: picked {} for {}", best.config, requested);
        }

        best
    }

    /// Best style variant, `None` if the resource isn't a style
    pub fn get_style(&self, name: &ResName, requested: &ResTableConfig) -> Option<&Arc<StyleData>> {
        self.get(name, requested)
            .and_then(|candidate| candidate.resource.as_style())
    }

    /// Resources of the same type and name from any package
    pub fn find_same_name<'a>(&'a self, name: &'a ResName) -> impl Iterator<Item = &'a ResName> {
        self.entries.keys().filter(move |key| key.is_same_name(name))
    }

    /// Resource names sorted for stable output
    pub fn names(&self) -> Vec<&ResName> {
        let mut names: Vec<&ResName> = self.entries.keys().collect();
        names.sort();
        names
    }

    pub fn names_of_type(&self, res_type: ResType) -> Vec<&ResName> {
        let mut names = self.names();
        names.retain(|name| name.res_type == res_type);
        names
    }

    #[inline]
    pub fn contains(&self, name: &ResName) -> bool {
        self.entries.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects resources during loading, single writer
#[derive(Debug, Default)]
pub struct ResourceTableBuilder {
    entries: AHashMap<ResName, Vec<Candidate>>,
}

impl ResourceTableBuilder {
    pub fn new() -> ResourceTableBuilder {
        ResourceTableBuilder::default()
    }

    /// Add a variant, a later value for the same configuration replaces the earlier one
    pub fn add(&mut self, name: ResName, resource: TypedResource, config: ResTableConfig) -> &mut Self {
        let candidates = self.entries.entry(name).or_default();

        match candidates.iter_mut().find(|candidate| candidate.config == config) {
            Some(existing) => {
                warn!("duplicate resource for config {config}, replacing");
                existing.resource = resource;
            }
            None => candidates.push(Candidate { config, resource }),
        }

        self
    }

    pub fn add_style(&mut self, style: StyleData, config: ResTableConfig) -> &mut Self {
        let name = style.res_name();
        self.add(name, TypedResource::style(style), config)
    }

    /// Freeze the table, candidates get a deterministic order
    pub fn build(self) -> ResourceTable {
        let mut entries = self.entries;
        for candidates in entries.values_mut() {
            candidates.sort_by(|a, b| a.config.cmp(&b.config));
        }

        debug!("built resource table with {} resources", entries.len());
        ResourceTable { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use res_resolver_config::qualifiers::parse_with;

    const APP: &str = "com.example";

    fn config(qualifiers: &str) -> ResTableConfig {
        let parsed = parse_with(qualifiers, false);
        assert!(parsed.success, "can't parse {qualifiers}");
        parsed.config
    }

    fn string(name: &str) -> ResName {
        ResName::new(APP, ResType::String, name)
    }

    fn text<'a>(table: &'a ResourceTable, name: &ResName, requested: &str) -> Option<&'a str> {
        table
            .get(name, &config(requested))
            .and_then(|candidate| candidate.resource.as_text())
    }

    fn greeting_table() -> ResourceTable {
        let mut builder = ResourceTable::builder();
        builder
            .add(string("greeting"), TypedResource::new("hello"), config(""))
            .add(string("greeting"), TypedResource::new("bonjour"), config("fr"))
            .add(string("greeting"), TypedResource::new("salut"), config("fr-rCA"))
            .add(string("greeting"), TypedResource::new("hallo"), config("de-v21"))
            .add(string("greeting"), TypedResource::new("hello tablet"), config("sw600dp"));
        builder.build()
    }

    #[test]
    fn picks_best_variant() {
        let table = greeting_table();
        let greeting = string("greeting");

        assert_eq!(text(&table, &greeting, "en-rUS"), Some("hello"));
        assert_eq!(text(&table, &greeting, "fr-rFR"), Some("bonjour"));
        assert_eq!(text(&table, &greeting, "fr-rCA"), Some("salut"));
        assert_eq!(text(&table, &greeting, "fr-rCA-sw720dp"), Some("salut"));
        assert_eq!(text(&table, &greeting, "sw720dp"), Some("hello tablet"));
        assert_eq!(text(&table, &greeting, "sw320dp"), Some("hello"));
        // v21 variant needs at least that version
        assert_eq!(text(&table, &greeting, "de-v19"), Some("hello"));
        assert_eq!(text(&table, &greeting, "de-v28"), Some("hallo"));
    }

    #[test]
    fn missing_resource() {
        let table = greeting_table();

        assert!(table.get(&string("farewell"), &config("")).is_none());
        assert!(table.candidates(&string("farewell")).is_empty());
    }

    #[test]
    fn no_matching_variant() {
        let mut builder = ResourceTable::builder();
        builder.add(string("only_fr"), TypedResource::new("oui"), config("fr"));
        let table = builder.build();

        assert!(table.get(&string("only_fr"), &config("de")).is_none());
    }

    #[test]
    fn candidates_are_ordered() {
        let table = greeting_table();
        let configs: Vec<String> = table
            .candidates(&string("greeting"))
            .iter()
            .map(|candidate| candidate.config.to_string())
            .collect();

        assert_eq!(configs.first().map(String::as_str), Some("default"));
        assert_eq!(configs.len(), 5);
    }

    #[test]
    fn duplicate_config_replaces() {
        let mut builder = ResourceTable::builder();
        builder
            .add(string("dup"), TypedResource::new("first"), config("en"))
            .add(string("dup"), TypedResource::new("second"), config("en"));
        let table = builder.build();

        assert_eq!(table.candidates(&string("dup")).len(), 1);
        assert_eq!(text(&table, &string("dup"), "en"), Some("second"));
    }

    #[test]
    fn typed_values() {
        assert_eq!(TypedResource::new("16dp").value_type(), ValueType::Dimension);
        assert_eq!(
            TypedResource::with_type("10", ValueType::CharSequence).value_type(),
            ValueType::CharSequence
        );
        assert!(TypedResource::new("@string/other").is_reference());
        assert!(!TypedResource::new("@null").is_reference());
        assert!(!TypedResource::new("plain").is_reference());
    }

    #[test]
    fn styles_and_names() {
        let mut builder = ResourceTable::builder();
        builder
            .add_style(StyleData::new(APP, "Theme.App", None, vec![]), config(""))
            .add(string("app_name"), TypedResource::new("Demo"), config(""))
            .add(
                ResName::new("com.library", ResType::String, "app_name"),
                TypedResource::new("Library"),
                config(""),
            );
        let table = builder.build();

        let theme = ResName::new(APP, ResType::Style, "Theme.App");
        assert_eq!(table.get_style(&theme, &config("")).unwrap().name(), "Theme.App");
        assert!(table.get_style(&string("app_name"), &config("")).is_none());
        assert_eq!(table.names_of_type(ResType::String).len(), 2);
        assert_eq!(table.find_same_name(&string("app_name")).count(), 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResourceTable>();
    }
}
