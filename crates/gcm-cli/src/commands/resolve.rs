use anyhow::{Context as _, Result};
use clap::Args;
use std::io::{self, BufRead, Write};
use url::Url;

use gcm_core::InputArguments;

use super::Context;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Remote URL; credential input is read from stdin when omitted
    #[arg(value_name = "URL")]
    pub url: Option<String>,
}

pub async fn execute(args: ResolveArgs) -> Result<i32> {
    let ctx = Context::discover()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&ctx, args, stdin.lock(), stdout.lock()).await
}

pub async fn run<R: BufRead, W: Write>(
    ctx: &Context,
    args: ResolveArgs,
    reader: R,
    mut writer: W,
) -> Result<i32> {
    let input = match &args.url {
        Some(url) => {
            let url = Url::parse(url).with_context(|| format!("Invalid URL '{}'", url))?;
            InputArguments::from_url(&url)
        }
        None => InputArguments::parse(reader).context("Failed to read credential input")?,
    };

    let provider = ctx.registry(&input)?.resolve(&input).await?;
    writeln!(writer, "{}", provider.id())?;
    Ok(0)
}
