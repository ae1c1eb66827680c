//! Command line interface
//!
//! Inspection commands over the global manifest. Configuration is loaded
//! first, so bindings and exclusions from `cdi.toml` or `CDI__` variables
//! apply to `resolve` and `demo`.

use std::io::{self, Write};
use std::path::PathBuf;

use cdi_application::{Injector, Result};
use cdi_infrastructure::error_ext::ErrorContext;
use cdi_infrastructure::{ConfigLoader, init_app};
use clap::{Parser, Subcommand};

use crate::sample::Report;

/// Command line interface for CDI
#[derive(Parser, Debug)]
#[command(name = "cdi")]
#[command(about = "CDI - Dependency injection and interception runtime")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List registered component types
    Components,
    /// List registered interceptors
    Interceptors,
    /// Resolve a descriptor such as `<Nameable>` and print the chosen type
    Resolve {
        /// Descriptor text: `TypeName`, `<Cap>...` or `@`
        descriptor: String,

        /// Narrow the descriptor to this concrete type
        #[arg(long = "type")]
        type_name: Option<String>,
    },
    /// Read one record twice through the intercepted sample store
    Demo {
        /// Record id
        #[arg(default_value_t = 7)]
        id: u64,
    },
}

/// Load configuration, initialize logging and the injector, then run the command
pub fn run(cli: &Cli) -> Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let context = init_app(loader.load()?)?;

    let stdout = io::stdout();
    execute(&cli.command, &context.injector, &mut stdout.lock())
}

/// Run one command against `injector`, writing the report to `out`
pub fn execute(command: &Commands, injector: &Injector, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Components => list_components(injector, out),
        Commands::Interceptors => list_interceptors(injector, out),
        Commands::Resolve {
            descriptor,
            type_name,
        } => resolve(injector, descriptor, type_name.as_deref(), out),
        Commands::Demo { id } => demo(injector, *id, out),
    }
}

fn list_components(injector: &Injector, out: &mut impl Write) -> Result<()> {
    let registry = injector.registry();
    for (name, description) in registry.list_components() {
        writeln!(out, "{name:<20} {description}").io_context("Failed to write output")?;

        let capabilities: Vec<&str> = registry
            .effective_capabilities(name)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        if !capabilities.is_empty() {
            writeln!(out, "    capabilities: {}", capabilities.join(", "))
                .io_context("Failed to write output")?;
        }
        if let Some(entry) = registry.get(name)
            && entry.is_intercepted()
        {
            writeln!(out, "    interceptors: {}", entry.interceptors.join(" -> "))
                .io_context("Failed to write output")?;
        }
    }
    Ok(())
}

fn list_interceptors(injector: &Injector, out: &mut impl Write) -> Result<()> {
    for (name, description) in injector.registry().list_interceptors() {
        writeln!(out, "{name:<20} {description}").io_context("Failed to write output")?;
    }
    Ok(())
}

fn resolve(
    injector: &Injector,
    descriptor: &str,
    type_name: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let resolved = injector.resolve(descriptor, type_name)?;
    let marker = if resolved.is_proxied() { " (proxied)" } else { "" };
    writeln!(out, "{descriptor} -> {}{marker}", resolved.type_name())
        .io_context("Failed to write output")?;
    Ok(())
}

fn demo(injector: &Injector, id: u64, out: &mut impl Write) -> Result<()> {
    let report = injector.create_as::<Report>("Report")?;
    for attempt in ["first", "second"] {
        let line = report.line(id)?;
        writeln!(out, "{attempt:<7} {line}").io_context("Failed to write output")?;
    }
    Ok(())
}
