//! CLI entry point: read a service description, write the generated modules.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hookgen::generator::{generate_from_json, write_files};
use hookgen::{EmissionMode, GeneratorOptions, KeyConvention};

#[derive(Parser, Debug)]
#[command(name = "hookgen", about = "Generate React Query hooks for a service description")]
struct Cli {
    /// Path to the service description JSON
    #[arg(long = "service", value_name = "SERVICE_JSON")]
    service: PathBuf,

    /// Directory the generated modules are written to
    #[arg(long = "out", value_name = "OUT_DIR")]
    out: PathBuf,

    /// Which call-site surface to emit
    #[arg(long = "mode", value_enum, default_value_t = ModeArg::Both)]
    mode: ModeArg,

    /// Cache key convention
    #[arg(long = "keys", value_enum, default_value_t = KeysArg::Flat)]
    keys: KeysArg,

    /// Module specifier for generated type imports
    #[arg(long = "types-module", value_name = "SPECIFIER", default_value = "../types")]
    types_module: String,

    /// Module specifier of the generated HTTP client
    #[arg(long = "client-module", value_name = "SPECIFIER", default_value = "../http-client")]
    client_module: String,

    /// Import react as a namespace instead of named imports
    #[arg(long = "react-namespace")]
    react_namespace: bool,

    /// Emit plain imports instead of `import type`
    #[arg(long = "no-type-imports")]
    no_type_imports: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ModeArg {
    Legacy,
    Options,
    Both,
}

impl From<ModeArg> for EmissionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Legacy => Self::LegacyHooksOnly,
            ModeArg::Options => Self::OptionsExportsOnly,
            ModeArg::Both => Self::Both,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum KeysArg {
    Flat,
    Resource,
}

impl From<KeysArg> for KeyConvention {
    fn from(keys: KeysArg) -> Self {
        match keys {
            KeysArg::Flat => Self::FlatTuple,
            KeysArg::Resource => Self::ResourcePath,
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let json = fs::read_to_string(&cli.service)
        .map_err(|err| format!("Failed to read {}: {err}", cli.service.display()))?;
    let opts = GeneratorOptions {
        types_module: cli.types_module.clone(),
        client_module: cli.client_module.clone(),
        react_namespace_import: cli.react_namespace,
        type_only_imports: !cli.no_type_imports,
        emission_mode: cli.mode.into(),
        key_convention: cli.keys.into(),
    };
    let files = generate_from_json(&json, &opts)?;
    write_files(&files, &cli.out)?;
    info!(files = files.len(), out_dir = %cli.out.display(), "generation complete");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
