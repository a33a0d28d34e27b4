use anyhow::Result;
use colored::Colorize;
use res_resolver_config::{ResTableConfig, parse_with};
use serde::Serialize;

#[derive(Serialize, Debug)]
struct QualifiersJson<'a> {
    input: &'a str,
    success: bool,
    canonical: String,
    locale: String,
    mcc: u16,
    mnc: u16,
    density: u16,
    smallest_screen_width_dp: u16,
    screen_width_dp: u16,
    screen_height_dp: u16,
    sdk_version: u16,
}

impl<'a> QualifiersJson<'a> {
    fn new(input: &'a str, success: bool, config: &ResTableConfig) -> Self {
        QualifiersJson {
            input,
            success,
            canonical: config.qualifier_string(),
            locale: config.bcp47_locale(true),
            mcc: config.mcc(),
            mnc: config.mnc(),
            density: config.density(),
            smallest_screen_width_dp: config.smallest_screen_width_dp(),
            screen_width_dp: config.screen_width_dp(),
            screen_height_dp: config.screen_height_dp(),
            sdk_version: config.sdk_version(),
        }
    }
}

pub(crate) fn command_qualifiers(qualifiers: &[String], version_compat: bool, json: bool) -> Result<()> {
    let parsed: Vec<_> = qualifiers
        .iter()
        .map(|input| (input.as_str(), parse_with(input, version_compat)))
        .collect();

    if json {
        let output: Vec<_> = parsed
            .iter()
            .map(|(input, parsed)| QualifiersJson::new(input, parsed.success, &parsed.config))
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (input, parsed) in &parsed {
        let status = if parsed.success {
            "ok".green()
        } else {
            "invalid".red()
        };

        println!("{} [{}]: {}", input.blue().bold(), status, parsed.config);
    }

    Ok(())
}
