//! Ingestion of `res/values*/*.xml` files into a resource table.
//!
//! Only flat values are understood: simple typed values, `<item type="...">`
//! and `<style>` blocks. Everything else is skipped.

use std::borrow::Cow;
use std::path::Path;

use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use res_resolver_config::ResTableConfig;
use res_resolver_zip::ZipArchive;

use crate::errors::ResourceError;
use crate::identity::{ResName, ResType, ValueType};
use crate::style::{AttributeResource, StyleData};
use crate::table::{ResourceTable, ResourceTableBuilder, TypedResource};

/// Bucket directory of a values file, `res/values-fr/strings.xml` -> `values-fr`
pub fn values_dir_name(path: &str) -> Option<&str> {
    let path = path.strip_suffix(".xml")?;
    let mut segments = path.rsplit('/');
    let _file = segments.next()?;
    let dir = segments.next()?;

    (dir == "values" || dir.starts_with("values-")).then_some(dir)
}

/// Builds a resource table for one package
#[derive(Debug)]
pub struct ResourceLoader {
    package: String,
    builder: ResourceTableBuilder,
}

impl ResourceLoader {
    pub fn new(package: impl Into<String>) -> ResourceLoader {
        ResourceLoader {
            package: package.into(),
            builder: ResourceTableBuilder::new(),
        }
    }

    #[inline]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Load one values file, `dir_name` gives the configuration
    ///
    /// Returns the number of added resources.
    pub fn add_values_xml(&mut self, dir_name: &str, xml: &[u8]) -> Result<usize, ResourceError> {
        let config = ResTableConfig::from_dir_name(dir_name)?;
        self.add_values_xml_with_config(&config, xml)
    }

    pub fn add_values_xml_with_config(
        &mut self,
        config: &ResTableConfig,
        xml: &[u8],
    ) -> Result<usize, ResourceError> {
        let values = ValuesParser::new(xml, &self.package).parse()?;
        let count = values.len();

        for value in values {
            match value {
                Value::Simple(name, resource) => self.builder.add(name, resource, config.clone()),
                Value::Style(style) => self.builder.add_style(style, config.clone()),
            };
        }

        debug!("loaded {count} resources for {config}");
        Ok(count)
    }

    /// Load every values file of a bundle
    ///
    /// Buckets with unknown qualifiers are skipped.
    pub fn add_archive(&mut self, archive: &ZipArchive) -> Result<usize, ResourceError> {
        let mut count = 0;

        for name in archive.names() {
            let Some(dir_name) = values_dir_name(name) else {
                continue;
            };

            let xml = archive.read(name)?;
            match self.add_values_xml(dir_name, &xml) {
                Ok(added) => count += added,
                Err(ResourceError::ConfigError(err)) => {
                    warn!("skipping {name}: {err}");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(count)
    }

    pub fn finish(self) -> ResourceTable {
        self.builder.build()
    }
}

/// Read a zip bundle from disk and load all of its values
pub fn load_archive(path: impl AsRef<Path>, package: &str) -> Result<ResourceTable, ResourceError> {
    let archive = ZipArchive::open(path)?;
    let mut loader = ResourceLoader::new(package);
    loader.add_archive(&archive)?;
    Ok(loader.finish())
}

enum Value {
    Simple(ResName, TypedResource),
    Style(StyleData),
}

/// Owned view of the xml events the parser cares about
enum XmlEvent {
    Start(Element),
    Empty(Element),
    End,
    Text(String),
    Eof,
}

struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, ResourceError> {
    std::str::from_utf8(bytes).map_err(|err| ResourceError::XmlError(err.to_string()))
}

fn unescape(text: &str) -> Result<Cow<'_, str>, ResourceError> {
    quick_xml::escape::unescape(text).map_err(|err| ResourceError::XmlError(err.to_string()))
}

fn element(start: &BytesStart) -> Result<Element, ResourceError> {
    let tag = utf8(start.name().as_ref())?.to_owned();
    let mut attributes = Vec::new();

    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = utf8(attribute.key.as_ref())?.to_owned();
        let value = unescape(utf8(&attribute.value)?)?.into_owned();
        attributes.push((key, value));
    }

    Ok(Element { tag, attributes })
}

struct ValuesParser<'a> {
    reader: Reader<&'a [u8]>,
    buf: Vec<u8>,
    package: &'a str,
}

impl<'a> ValuesParser<'a> {
    fn new(xml: &'a [u8], package: &'a str) -> ValuesParser<'a> {
        ValuesParser {
            reader: Reader::from_reader(xml),
            buf: Vec::new(),
            package,
        }
    }

    fn next_event(&mut self) -> Result<XmlEvent, ResourceError> {
        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(start) => XmlEvent::Start(element(&start)?),
                Event::Empty(start) => XmlEvent::Empty(element(&start)?),
                Event::End(_) => XmlEvent::End,
                Event::Text(text) => XmlEvent::Text(unescape(utf8(&text)?)?.into_owned()),
                Event::CData(data) => XmlEvent::Text(utf8(&data)?.to_owned()),
                Event::GeneralRef(reference) => {
                    let entity = format!("&{};", utf8(&reference)?);
                    match unescape(&entity) {
                        Ok(text) => XmlEvent::Text(text.into_owned()),
                        Err(_) => {
                            warn!("unknown entity {entity}, keeping it as text");
                            XmlEvent::Text(entity)
                        }
                    }
                }
                Event::Eof => XmlEvent::Eof,
                // declarations, comments, processing instructions
                _ => continue,
            };
            return Ok(event);
        }
    }

    fn parse(mut self) -> Result<Vec<Value>, ResourceError> {
        let root = loop {
            match self.next_event()? {
                XmlEvent::Start(root) => break root,
                XmlEvent::Empty(_) | XmlEvent::Eof => return Ok(Vec::new()),
                XmlEvent::Text(_) => continue,
                XmlEvent::End => {
                    return Err(ResourceError::XmlError("unexpected closing tag".into()));
                }
            }
        };

        if root.tag != "resources" {
            warn!("not a values file, root element is <{}>", root.tag);
            return Ok(Vec::new());
        }

        let mut values = Vec::new();
        loop {
            match self.next_event()? {
                XmlEvent::Start(element) => {
                    if let Some(value) = self.parse_value(element, true)? {
                        values.push(value);
                    }
                }
                XmlEvent::Empty(element) => {
                    if let Some(value) = self.parse_value(element, false)? {
                        values.push(value);
                    }
                }
                XmlEvent::End | XmlEvent::Eof => break,
                XmlEvent::Text(_) => {}
            }
        }

        Ok(values)
    }

    fn parse_value(&mut self, element: Element, has_body: bool) -> Result<Option<Value>, ResourceError> {
        let res_type = match element.tag.as_str() {
            "item" => element
                .attribute("type")
                .and_then(|res_type| res_type.parse::<ResType>().ok()),
            tag => ResType::from_value_tag(tag),
        };

        let Some(res_type) = res_type else {
            debug!("skipping <{}>", element.tag);
            return self.skip(has_body).map(|_| None);
        };

        let Some(name) = element.attribute("name").map(str::to_owned) else {
            warn!("<{}> without a name, skipping", element.tag);
            return self.skip(has_body).map(|_| None);
        };

        match res_type {
            ResType::Style => self.parse_style(&element, name, has_body).map(Some),
            ResType::Array | ResType::Plurals | ResType::Attr | ResType::Styleable => {
                warn!("ignoring <{}> {name}", element.tag);
                self.skip(has_body).map(|_| None)
            }
            res_type => {
                let raw = if has_body { self.read_text()? } else { String::new() };
                let resource = if res_type == ResType::String {
                    TypedResource::with_type(format_string(&raw), ValueType::CharSequence)
                } else {
                    TypedResource::new(raw.trim())
                };

                Ok(Some(Value::Simple(
                    ResName::new(self.package, res_type, name),
                    resource,
                )))
            }
        }
    }

    fn parse_style(&mut self, element: &Element, name: String, has_body: bool) -> Result<Value, ResourceError> {
        let parent = element.attribute("parent").map(str::to_owned);
        let mut items = Vec::new();

        while has_body {
            match self.next_event()? {
                XmlEvent::Start(item) if item.tag == "item" => {
                    let value = self.read_text()?;
                    items.extend(self.style_item(&item, value.trim()));
                }
                XmlEvent::Empty(item) if item.tag == "item" => {
                    items.extend(self.style_item(&item, ""));
                }
                XmlEvent::Start(other) => {
                    warn!("unexpected <{}> in style {name}", other.tag);
                    self.skip(true)?;
                }
                XmlEvent::End | XmlEvent::Eof => break,
                XmlEvent::Empty(_) | XmlEvent::Text(_) => {}
            }
        }

        Ok(Value::Style(StyleData::new(self.package, name, parent, items)))
    }

    fn style_item(&self, item: &Element, value: &str) -> Option<AttributeResource> {
        let attr = item
            .attribute("name")
            .and_then(|name| ResName::qualify(name, self.package, ResType::Attr));

        match attr {
            Some(attr) => Some(AttributeResource::new(attr, value, self.package)),
            None => {
                warn!("style item without a valid name");
                None
            }
        }
    }

    /// Text content up to the end of the current element, inline markup is dropped
    fn read_text(&mut self) -> Result<String, ResourceError> {
        let mut text = String::new();
        let mut depth = 0usize;

        loop {
            match self.next_event()? {
                XmlEvent::Text(chunk) => text.push_str(&chunk),
                XmlEvent::Start(_) => depth += 1,
                XmlEvent::Empty(_) => {}
                XmlEvent::End if depth == 0 => return Ok(text),
                XmlEvent::End => depth -= 1,
                XmlEvent::Eof => {
                    return Err(ResourceError::XmlError("unexpected end of file".into()));
                }
            }
        }
    }

    fn skip(&mut self, has_body: bool) -> Result<(), ResourceError> {
        if has_body {
            self.read_text()?;
        }
        Ok(())
    }
}

/// Apply the resource compiler's string rules: surrounding whitespace is
/// trimmed, unquoted whitespace collapses, quotes are removed and backslash
/// escapes are decoded.
fn format_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut quoted = false;
    let mut chars = raw.trim().chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        Some(decoded) => out.push(decoded),
                        None => {
                            out.push_str("\\u");
                            out.push_str(&hex);
                        }
                    }
                }
                Some(other) => out.push(other),
                None => {}
            },
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            c => out.push(c),
        }
    }

    out
}
