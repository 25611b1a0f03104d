use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use std::io::{self, Write};
use url::Url;

use gcm_core::Settings;

use super::Context;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Resolve a setting from the environment and Git configuration
    Get(ConfigGetArgs),
}

#[derive(Args, Debug)]
pub struct ConfigGetArgs {
    /// Configuration section, e.g. `credential`
    pub section: String,

    /// Configuration property, e.g. `provider`
    pub property: String,

    /// Environment variable that overrides the setting
    #[arg(long, value_name = "NAME")]
    pub envar: Option<String>,

    /// Remote URL whose scopes are considered
    #[arg(long)]
    pub url: Option<String>,

    /// Treat values as paths (expand `~`, make absolute)
    #[arg(long)]
    pub path: bool,

    /// Print every value in precedence order instead of the winning one
    #[arg(long)]
    pub all: bool,
}

pub fn execute(command: ConfigCommands) -> Result<i32> {
    let ctx = Context::discover()?;
    let stdout = io::stdout();
    match command {
        ConfigCommands::Get(args) => get(&ctx, args, stdout.lock()),
    }
}

/// Prints the value(s); exits with 1 when the setting is not set.
pub fn get<W: Write>(ctx: &Context, args: ConfigGetArgs, mut writer: W) -> Result<i32> {
    let url = args
        .url
        .as_deref()
        .map(Url::parse)
        .transpose()
        .context("Invalid --url")?;

    let settings = Settings::new(ctx.environment.clone(), ctx.configuration.clone(), url);
    let envar = args.envar.as_deref();

    let values = if args.all {
        settings.get_values(envar, &args.section, &args.property, args.path)
    } else {
        settings
            .try_get(envar, &args.section, &args.property, args.path)
            .into_iter()
            .collect()
    };

    if values.is_empty() {
        return Ok(1);
    }

    for value in values {
        writeln!(writer, "{}", value)?;
    }
    Ok(0)
}
