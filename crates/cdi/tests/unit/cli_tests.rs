//! CLI Tests

use std::io::Write;

use cdi::Injector;
use cdi::cli::{Cli, Commands, execute, run};
use clap::Parser;

fn output(injector: &Injector, command: &Commands) -> String {
    let mut out = Vec::new();
    execute(command, injector, &mut out).expect("command succeeds");
    String::from_utf8(out).expect("utf-8 output")
}

#[test]
fn test_parse_resolve_with_type() {
    let cli = Cli::try_parse_from(["cdi", "resolve", "<Nameable>", "--type", "FrenchGreeter"])
        .expect("valid arguments");
    assert_eq!(
        cli.command,
        Commands::Resolve {
            descriptor: "<Nameable>".to_string(),
            type_name: Some("FrenchGreeter".to_string()),
        }
    );
    assert!(cli.config.is_none());
}

#[test]
fn test_parse_global_config_flag() {
    let cli = Cli::try_parse_from(["cdi", "demo", "--config", "cdi.toml"]).expect("valid arguments");
    assert_eq!(cli.command, Commands::Demo { id: 7 });
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("cdi.toml")));
}

#[test]
fn test_parse_requires_command() {
    assert!(Cli::try_parse_from(["cdi"]).is_err());
}

#[test]
fn test_components_listing() {
    let injector = Injector::global().expect("registry");
    let listing = output(&injector, &Commands::Components);
    assert!(listing.contains("Object"));
    assert!(listing.contains("EnglishGreeter"));
    assert!(listing.contains("capabilities: Nameable"));
    assert!(listing.contains("interceptors: Logging -> Caching"));
}

#[test]
fn test_interceptor_listing() {
    let injector = Injector::global().expect("registry");
    let listing = output(&injector, &Commands::Interceptors);
    assert!(listing.contains("Caching"));
    assert!(listing.contains("Logging"));
}

#[test]
fn test_resolve_command() {
    let injector = Injector::global().expect("registry");
    let line = output(
        &injector,
        &Commands::Resolve {
            descriptor: "<RecordStore>".to_string(),
            type_name: None,
        },
    );
    assert_eq!(line, "<RecordStore> -> DatabaseStore (proxied)\n");

    let mut out = Vec::new();
    let err = execute(
        &Commands::Resolve {
            descriptor: "<Nameable>".to_string(),
            type_name: None,
        },
        &injector,
        &mut out,
    )
    .expect_err("ambiguous");
    assert!(err.to_string().contains("EnglishGreeter, FrenchGreeter"));
}

#[test]
fn test_demo_command() {
    let injector = Injector::global().expect("registry");
    let lines = output(&injector, &Commands::Demo { id: 5 });
    assert_eq!(lines, "first   5: record #5\nsecond  5: record #5\n");
}

#[test]
fn test_run_applies_configured_binding() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(
        b"[[injection.bindings]]\nrequested = \"<Nameable>\"\nimplementation = \"EnglishGreeter\"\n",
    )
    .expect("write config");

    let path = file.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from(["cdi", "--config", &path, "resolve", "<Nameable>"])
        .expect("valid arguments");
    run(&cli).expect("binding settles the ambiguity");
}
