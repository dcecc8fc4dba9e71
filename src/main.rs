use framehandling::cli::{Args, CliCommand};
use framehandling::config::{SETTINGS_FILE, Settings};
use framehandling::core::commands::{Command, FrameHandler};
use framehandling::entities::{Extraction, Script};
use framehandling::paths;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

fn main() {
    let args = Args::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(args: &Args, path_config: &paths::PathConfig) -> Result<()> {
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| paths::data_file("framehandling.log", path_config));

        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        // Console logging (respects RUST_LOG if set)
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp_millis()
            .init();
    }
    Ok(())
}

/// Returns false when the command ran but failed (warning already printed)
fn run(args: Args) -> Result<bool> {
    let path_config = paths::PathConfig::from_env_and_cli(args.config_dir.clone());
    if let Err(e) = paths::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }
    init_logging(&args, &path_config)?;
    debug!("Command-line args: {:?}", args);

    let settings_path = paths::config_file(SETTINGS_FILE, &path_config);
    info!("Config path: {}", settings_path.display());
    let handler = FrameHandler::new(Settings::load_or_default(&settings_path))?;

    let (command, typed_frame) = match &args.command {
        CliCommand::Parse { label } => {
            match handler.parser().parse(label) {
                Extraction::Range(range) => println!("range {}", range),
                Extraction::SingleFrame(frame) => println!("frame {}", frame),
                Extraction::NoData => println!("none"),
            }
            return Ok(true);
        }
        CliCommand::Set { frame: None } => (Command::SetToCurrentFrame, None),
        CliCommand::Set { frame: Some(text) } => (Command::SetToUserFrame, Some(text.clone())),
        CliCommand::Goto => (Command::GoToReference, None),
        CliCommand::Clear => (Command::ClearInOut, None),
    };

    let script_path = args
        .script
        .as_ref()
        .context("this command needs a script snapshot (--script FILE)")?;
    let mut script = Script::from_json(script_path)
        .with_context(|| format!("Failed to load script: {}", script_path.display()))?;
    info!("Loaded script: {}", script_path.display());

    // The typed text answers the frame prompt
    if typed_frame.is_some() {
        script.push_input(typed_frame);
    }

    let ok = handler.run(&mut script, command);
    for msg in script.warnings().iter().chain(script.messages()) {
        eprintln!("{}", msg);
    }

    match &args.output {
        Some(path) => {
            script
                .to_json(path)
                .with_context(|| format!("Failed to write script: {}", path.display()))?;
            info!("Script saved: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&script)?),
    }
    Ok(ok)
}
