use anyhow::{Context as _, Result};
use clap::Args;
use std::io::{self, Write};
use url::Url;

use gcm_core::git_configuration_scopes;

#[derive(Args, Debug)]
pub struct ScopesArgs {
    /// Remote URL
    #[arg(value_name = "URL")]
    pub url: String,
}

pub fn execute(args: ScopesArgs) -> Result<i32> {
    let stdout = io::stdout();
    run(args, stdout.lock())
}

pub fn run<W: Write>(args: ScopesArgs, mut writer: W) -> Result<i32> {
    let url = Url::parse(&args.url).with_context(|| format!("Invalid URL '{}'", args.url))?;

    for scope in git_configuration_scopes(&url) {
        writeln!(writer, "{}", scope)?;
    }
    Ok(0)
}
