use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use res_resolver::{AttributeResource, ResName, ResType, Resolver, ValueType};
use serde::Serialize;

use crate::commands::bundle::{load_bundle, requested_config};

#[derive(Serialize, Debug)]
struct ResolvedJson<'a> {
    name: &'a ResName,
    requested: String,
    config: String,
    value_type: ValueType,
    value: Option<&'a str>,
    resolved: Option<&'a str>,
    attributes: Vec<&'a AttributeResource>,
}

pub(crate) fn command_resolve(
    bundle: &Path,
    name: &str,
    config: Option<&str>,
    package: &str,
    json: bool,
) -> Result<()> {
    let table = load_bundle(bundle, package)?;
    let requested = requested_config(config)?;
    let name = ResName::qualify(name, package, ResType::String)
        .with_context(|| format!("invalid resource name: {:?}", name))?;

    let resolver = Resolver::new(&table, &requested);
    let Some(candidate) = table.get(&name, &requested) else {
        if table.contains(&name) {
            bail!("no variant of {} matches {}", name, requested);
        }
        bail!("resource {} not found in {:?}", name, bundle);
    };

    let resolved = resolver
        .resolve_value(&name)
        .with_context(|| format!("can't follow references of {}", name))?;
    let attributes = match candidate.resource.as_style() {
        Some(style) => resolver
            .flatten_style(style)
            .with_context(|| format!("can't collect attributes of {}", name))?,
        None => Vec::new(),
    };

    if json {
        let output = ResolvedJson {
            name: &name,
            requested: requested.to_string(),
            config: candidate.config.to_string(),
            value_type: candidate.resource.value_type(),
            value: candidate.resource.as_text(),
            resolved: resolved.and_then(|resource| resource.as_text()),
            attributes,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}: {}", "Resource", name.to_string().green());
    println!("{}: {}", "Requested", requested.to_string().green());
    println!("{}: {}", "Picked", candidate.config.to_string().green());

    if let Some(value) = candidate.resource.as_text() {
        println!("{}: {:?}", "Value", value);
        println!("{}: {:?}", "Type", candidate.resource.value_type());

        if candidate.resource.is_reference() {
            match resolved.and_then(|resource| resource.as_text()) {
                Some(text) => println!("{}: {:?}", "Resolved", text),
                None => println!("{}: {}", "Resolved", "-".red()),
            }
        }
    }

    if !attributes.is_empty() {
        println!("\n{}:", "Attributes".blue().bold());
        for item in attributes {
            println!("  {}: {}", item.attr.to_string().green(), item.value);
        }
    }

    Ok(())
}
