use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use res_resolver::{ResType, ResourceValue};

use crate::commands::bundle::load_bundle;

pub(crate) fn command_list(bundle: &Path, res_type: Option<&str>, package: &str) -> Result<()> {
    let table = load_bundle(bundle, package)?;

    let names = match res_type {
        Some(res_type) => {
            let res_type: ResType = res_type
                .parse()
                .with_context(|| format!("unknown resource type: {:?}", res_type))?;
            table.names_of_type(res_type)
        }
        None => table.names(),
    };

    for name in names {
        println!("{}", name.to_string().green());

        for candidate in table.candidates(name) {
            match candidate.resource.value() {
                ResourceValue::Text(text) => println!("  {}: {:?}", candidate.config, text),
                ResourceValue::Style(style) => println!(
                    "  {}: {} items, parent {}",
                    candidate.config,
                    style.items().len(),
                    style.parent().unwrap_or("-")
                ),
            }
        }
    }

    Ok(())
}
