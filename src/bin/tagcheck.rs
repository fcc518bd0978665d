use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tagcheck::config::{Args, Config};

/// Exit status when the run itself fails (I/O or configuration)
const FAULT: u8 = 2;

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(FAULT)
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let config = Config::from_args(args).context("invalid configuration")?;

    if config.list_vocabularies {
        let registry = config.load_registry();
        for name in registry.names() {
            match registry.get(name).and_then(|v| v.vocabulary.description()) {
                Some(description) => println!("{}\t{}", name, description),
                None => println!("{}", name),
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let summary = tagcheck::run(&config, std::io::stdout().lock())?;
    log::info!(
        "Checked {} documents, {} diagnostics",
        summary.documents,
        summary.diagnostics
    );

    Ok(if summary.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
