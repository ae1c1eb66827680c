//! CDI - Entry Point
//!
//! Binary entry point for the `cdi` inspection CLI.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cdi components` | List registered component types |
//! | `cdi interceptors` | List registered interceptors |
//! | `cdi resolve <descriptor> [--type T]` | Resolve a descriptor and print the chosen type |
//! | `cdi demo` | Run the intercepted record-store scenario |

use clap::Parser;

use cdi::cli::{Cli, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(&cli)?;
    Ok(())
}
