use std::path::Path;

use anyhow::{Context, Result, bail};
use log::warn;
use res_resolver::{ResourceError, ResourceLoader, ResourceTable, values_dir_name};
use res_resolver_config::{ResTableConfig, parse_with};
use res_resolver_zip::ZipArchive;
use walkdir::WalkDir;

/// Load a zip bundle, or a directory holding `values*/` folders
pub(crate) fn load_bundle(path: &Path, package: &str) -> Result<ResourceTable> {
    let mut loader = ResourceLoader::new(package);

    if path.is_dir() {
        load_directory(&mut loader, path)?;
    } else {
        let archive = ZipArchive::open(path)
            .with_context(|| format!("got error while opening bundle: {:?}", path))?;
        loader
            .add_archive(&archive)
            .with_context(|| format!("got error while loading resources from {:?}", path))?;
    }

    Ok(loader.finish())
}

fn load_directory(loader: &mut ResourceLoader, root: &Path) -> Result<()> {
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            e.file_name()
                .to_str()
                .map(|s| !s.starts_with('.'))
                .unwrap_or(false)
        })
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
    {
        let path = entry.path().to_string_lossy().replace('\\', "/");
        let Some(dir_name) = values_dir_name(&path) else {
            continue;
        };

        let xml = std::fs::read(entry.path()).with_context(|| format!("can't read file: {:?}", path))?;
        match loader.add_values_xml(dir_name, &xml) {
            Ok(_) => {}
            Err(ResourceError::ConfigError(err)) => warn!("skipping {path}: {err}"),
            Err(err) => return Err(err).with_context(|| format!("got error while loading {:?}", path)),
        }
    }

    Ok(())
}

/// Device configuration from qualifiers, the default one matches only unqualified axes
pub(crate) fn requested_config(qualifiers: Option<&str>) -> Result<ResTableConfig> {
    let Some(qualifiers) = qualifiers else {
        return Ok(ResTableConfig::default());
    };

    // a device reports its real sdk version, nothing is implied
    let parsed = parse_with(qualifiers, false);
    if !parsed.success {
        bail!("invalid device qualifiers: {:?}", qualifiers);
    }

    Ok(parsed.config)
}
