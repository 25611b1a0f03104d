//! `get`, `store` and `erase`: the operations Git invokes on a credential
//! helper.

use anyhow::{Context as _, Result};
use std::io::{self, BufRead, Write};

use gcm_core::InputArguments;

use super::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Store,
    Erase,
}

impl Operation {
    pub fn as_str(&self) -> &str {
        match self {
            Operation::Get => "get",
            Operation::Store => "store",
            Operation::Erase => "erase",
        }
    }
}

pub async fn execute(operation: Operation) -> Result<i32> {
    let ctx = Context::discover()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&ctx, operation, stdin.lock(), stdout.lock()).await
}

pub async fn run<R: BufRead, W: Write>(
    ctx: &Context,
    operation: Operation,
    reader: R,
    mut writer: W,
) -> Result<i32> {
    let input = InputArguments::parse(reader).context("Failed to read credential input")?;

    let registry = ctx.registry(&input)?;
    let provider = registry.resolve(&input).await?;
    log::debug!("Host provider '{}' selected for '{}'", provider.id(), operation.as_str());

    if operation == Operation::Get {
        input.write(&mut writer)?;
        writeln!(writer, "provider={}", provider.id())?;
        writer.flush()?;
    }

    Ok(0)
}
