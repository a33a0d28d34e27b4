use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{command_entries, command_list, command_qualifiers, command_resolve};

mod commands;

/// Package used for resources of a bundle when none is given
const DEFAULT_PACKAGE: &str = "app";

#[derive(Parser)]
#[command(version, about, arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    commands: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse qualifier strings and show the resulting configuration
    Qualifiers {
        #[arg(required = true)]
        qualifiers: Vec<String>,

        #[arg(long, default_value_t = false, help = "don't add the implied minimum sdk version")]
        no_compat: bool,

        #[arg(long, default_value_t = false, help = "print as json")]
        json: bool,
    },
    /// Pick the best variant of a resource for a device configuration
    Resolve {
        #[arg(required = true, help = "zip bundle or res/ directory")]
        bundle: PathBuf,

        #[arg(required = true, help = "resource name, e.g. string/app_name or @style/Theme.App")]
        name: String,

        #[arg(short, long, help = "device qualifiers, e.g. fr-rCA-night-v30")]
        config: Option<String>,

        #[arg(short, long, default_value = DEFAULT_PACKAGE, help = "package of the bundle")]
        package: String,

        #[arg(long, default_value_t = false, help = "print as json")]
        json: bool,
    },
    /// List resources of a bundle with all their variants
    List {
        #[arg(required = true)]
        bundle: PathBuf,

        #[arg(short, long, help = "only show resources of this type")]
        r#type: Option<String>,

        #[arg(short, long, default_value = DEFAULT_PACKAGE, help = "package of the bundle")]
        package: String,
    },
    /// Show the entries of a zip bundle
    Entries {
        #[arg(required = true)]
        path: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.commands {
        Some(Commands::Qualifiers {
            qualifiers,
            no_compat,
            json,
        }) => command_qualifiers(qualifiers, !no_compat, *json),
        Some(Commands::Resolve {
            bundle,
            name,
            config,
            package,
            json,
        }) => command_resolve(bundle, name, config.as_deref(), package, *json),
        Some(Commands::List {
            bundle,
            r#type,
            package,
        }) => command_list(bundle, r#type.as_deref(), package),
        Some(Commands::Entries { path }) => command_entries(path),
        None => Ok(()),
    };

    if let Err(err) = result {
        eprintln!("{:#}", err);
    }
}
