use std::process::ExitCode;

use anyhow::Context;
use forkdiff_discovery::{HttpClient, ReqwestClient, Resolver};
use tracing::{debug, warn};

use crate::cli::{App, Commands, PairArg};
use crate::{config, known};

pub fn run(app: App) -> anyhow::Result<ExitCode> {
    let options = config::load(&app.global)?;
    let client = ReqwestClient::new(&options).context("failed to build HTTP client")?;
    let resolver = Resolver::new(client, options);

    match app.cmd {
        Commands::Resolve(arg) => Ok(resolve_all(&resolver, &arg.identifiers)),
        Commands::Pair(arg) => pair(&resolver, &arg),
    }
}

/// Resolve every identifier, reporting failures without stopping.
fn resolve_all<C: HttpClient>(resolver: &Resolver<C>, identifiers: &[String]) -> ExitCode {
    let mut failed = 0usize;
    for identifier in identifiers {
        match resolve_one(resolver, identifier) {
            Ok(root) => println!("{identifier} -> {root}"),
            Err(e) => {
                failed += 1;
                eprintln!("{identifier}: {e:#}");
            }
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        warn!(failed, total = identifiers.len(), "some identifiers could not be resolved");
        ExitCode::FAILURE
    }
}

fn pair<C: HttpClient>(resolver: &Resolver<C>, arg: &PairArg) -> anyhow::Result<ExitCode> {
    let old = resolve_one(resolver, &arg.old)
        .context("could not resolve old repository from module path")?;
    let new = resolve_one(resolver, &arg.new)
        .context("could not resolve new repository from module path")?;
    println!("{} -> {old}", arg.old);
    println!("{} -> {new}", arg.new);
    Ok(ExitCode::SUCCESS)
}

pub fn resolve_one<C: HttpClient>(resolver: &Resolver<C>, identifier: &str) -> anyhow::Result<String> {
    if let Some(root) = known::known_root(identifier) {
        debug!(identifier, %root, "repository root known without discovery");
        return Ok(root);
    }
    let root = resolver
        .resolve(identifier)
        .with_context(|| format!("could not determine repository root for {identifier}"))?;
    Ok(root.to_string())
}
