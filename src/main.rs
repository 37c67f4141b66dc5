use clap::Parser;
use log::{debug, info, LevelFilter};
use snafu::{ErrorCompat, OptionExt, ResultExt};
use std::path::Path;

mod args;
mod shift;

use crate::args::Args;
use crate::shift::config_reader::*;
use crate::shift::*;

// Builds the configuration from the command line, on top of the configuration file if any.
fn build_config(args: &Args) -> ShiftResult<(ShiftConfig, String)> {
    let (mut config, root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .display()
                .to_string();
            (config, root)
        }
        None => {
            let year_a = args.year_a.clone().context(MissingSourcesSnafu {})?;
            let year_b = args.year_b.clone().context(MissingSourcesSnafu {})?;
            let config = ShiftConfig {
                output_settings: OutputSettings::default(),
                sources: Sources {
                    year_a: YearSource {
                        label: None,
                        file_path: year_a,
                    },
                    year_b: YearSource {
                        label: None,
                        file_path: year_b,
                    },
                },
                display: DisplaySettings::default(),
            };
            (config, ".".to_string())
        }
    };

    // Paths given on the command line are relative to the working directory.
    let cwd = std::env::current_dir().context(CurrentDirSnafu {})?;
    if let Some(p) = &args.year_a {
        config.sources.year_a.file_path = cwd.join(p).display().to_string();
    }
    if let Some(p) = &args.year_b {
        config.sources.year_b.file_path = cwd.join(p).display().to_string();
    }
    if let Some(s) = &args.sort {
        config.display.sort_mode = Some(s.clone());
    }
    if let Some(n) = &args.count {
        config.display.display_count = Some(serde_json::Value::String(n.clone()));
    }
    Ok((config, root))
}

fn run(args: &Args) -> ShiftResult<()> {
    let (config, root) = build_config(args)?;
    debug!("main: config: {:?}", config);
    run_with_config(
        &config,
        Path::new(root.as_str()),
        args.out.as_deref(),
        args.reference.as_deref(),
    )
}

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
    info!("args: {:?}", args);

    if let Err(e) = run(&args) {
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            debug!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
