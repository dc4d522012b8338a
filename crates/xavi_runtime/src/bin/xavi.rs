//! Xavi CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::info;
use xavi_runtime::{Session, load_from_file, logging, save_to_file};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    scenario: Option<PathBuf>,
    json: bool,
    pack: Option<PathBuf>,
    verbosity: i8,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--verbose" => config.verbosity = config.verbosity.saturating_add(1),
            arg if arg.starts_with("-v") && arg[1..].bytes().all(|b| b == b'v') => {
                let count = i8::try_from(arg.len() - 1).unwrap_or(i8::MAX);
                config.verbosity = config.verbosity.saturating_add(count);
            }
            "-q" | "--quiet" => config.verbosity = -1,
            "--json" => config.json = true,
            "--pack" => {
                i += 1;
                if i >= args.len() {
                    return Err("--pack requires an output path".into());
                }
                config.pack = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => {
                if config.scenario.is_some() {
                    return Err(format!("unexpected argument: {path}").into());
                }
                config.scenario = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("xavi {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(path) = config.scenario else {
        print_help();
        return Err("no scenario given".into());
    };

    logging::init(config.verbosity)?;

    let scenario = load_from_file(&path)?;
    info!(path = %path.display(), "loaded scenario");

    if let Some(out) = &config.pack {
        save_to_file(&scenario, out)?;
        info!(path = %out.display(), "packed scenario");
    }

    let session = Session::from_scenario(&scenario);
    let report = session.report(&scenario.queries);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    match report.failures() {
        0 => Ok(()),
        1 => Err("1 query could not be answered".into()),
        n => Err(format!("{n} queries could not be answered").into()),
    }
}

fn print_help() {
    println!(
        "\x1b[1mXavi\x1b[0m - Causal query resolution over driving scenarios

\x1b[1mUSAGE:\x1b[0m
    xavi [OPTIONS] SCENARIO

\x1b[1mARGUMENTS:\x1b[0m
    SCENARIO      Scenario file (.json, .msgpack, or .mpk)

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -v, --verbose      Show more log output (repeatable)
    -q, --quiet        Only log errors
    --json             Print the report as JSON
    --pack OUT         Save the scenario to OUT (format from extension)

\x1b[1mENVIRONMENT:\x1b[0m
    RUST_LOG           Log filter; overrides -v and -q

\x1b[1mEXAMPLES:\x1b[0m
    xavi scenario.json                    Answer every query in the scenario
    xavi --json scenario.json             Same, as JSON
    xavi -vv scenario.json                Log resolved anchors
    xavi --pack out.msgpack scenario.json Convert to MessagePack"
    );
}
