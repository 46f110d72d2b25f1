mod cli;
mod fixture;
mod format;

use clap::Parser;
use cli::{Cli, Command};
use fixture::{Fixture, FixtureError};
use itemresolve::{ConfigError, Resolver, ResolverConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "config failed");
            eprintln!("itemresolve: {e}");
            std::process::exit(1);
        }
    };

    let outcome = match cli.command {
        Command::Parse { ids } => Ok(parse(&config, ids)),
        Command::Providers { fixture } => providers(&config, &fixture),
        Command::Resolve { fixture, ids } => resolve(&config, &fixture, ids).await,
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("itemresolve: {e}");
            std::process::exit(1);
        }
    }
}

/// Config file (or defaults) plus command-line overrides.
fn load_config(cli: &Cli) -> Result<ResolverConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => ResolverConfig::from_file(path)?,
        None => ResolverConfig::default(),
    };
    if let Some(namespace) = &cli.default_namespace {
        config.default_namespace = namespace.clone();
        config.validate()?;
    }
    Ok(config)
}

fn parse(config: &ResolverConfig, ids: Vec<String>) -> bool {
    let namespace = config.default_namespace();
    let results: Vec<_> = ids
        .into_iter()
        .map(|raw| {
            let parsed = itemresolve::Identifier::parse(&raw, &namespace);
            (raw, parsed)
        })
        .collect();
    format::print_parsed(&results)
}

fn providers(config: &ResolverConfig, path: &std::path::Path) -> Result<bool, AppError> {
    let fixture = Fixture::from_file(path)?;
    let resolver = Resolver::new(config, fixture.candidates(), &fixture.host())?;
    format::print_providers(resolver.registry().descriptors());
    Ok(true)
}

async fn resolve(
    config: &ResolverConfig,
    path: &std::path::Path,
    ids: Vec<String>,
) -> Result<bool, AppError> {
    let fixture = Fixture::from_file(path)?;
    let resolver = Resolver::new(config, fixture.candidates(), &fixture.host())?;

    let results = resolver.resolve_many(&ids).await;
    let rows: Vec<_> = ids.into_iter().zip(results).collect();
    let ok = format::print_resolved(&rows);

    resolver.shutdown();
    Ok(ok)
}
