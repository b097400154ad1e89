//! `waypoint-sim` command line: run scenario files, check config files

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use waypoint_core::WaypointConfig;
use waypoint_sim::{Scenario, ScenarioReport, ScenarioRunner};

fn cli() -> Command {
    Command::new("waypoint-sim")
        .version(waypoint_sim::VERSION)
        .about("Waypoint navigation scenario simulator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Run scenario files against a simulated browser tab")
                .arg(
                    Arg::new("files")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf))
                        .help("Scenario YAML files"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output reports as JSON"),
                )
                .arg(
                    Arg::new("max-entries")
                        .long("max-entries")
                        .value_parser(value_parser!(usize))
                        .help("Navigation stack cap (overrides the config file)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Waypoint TOML config"),
                ),
        )
        .subcommand(
            Command::new("check-config")
                .about("Validate a Waypoint TOML config and print it with defaults filled in")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Config file"),
                ),
        )
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>, max_entries: Option<usize>) -> anyhow::Result<WaypointConfig> {
    let mut config = match path {
        Some(path) => WaypointConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WaypointConfig::default(),
    };
    if let Some(max) = max_entries {
        config = config.with_max_entries(max);
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(args: &clap::ArgMatches) -> anyhow::Result<bool> {
    let config = load_config(
        args.get_one::<PathBuf>("config"),
        args.get_one::<usize>("max-entries").copied(),
    )?;
    let json = args.get_flag("json");
    let runner = ScenarioRunner::new(config);

    let mut reports: Vec<ScenarioReport> = Vec::new();
    let mut all_passed = true;
    for path in args.get_many::<PathBuf>("files").into_iter().flatten() {
        let scenario = match Scenario::load(path) {
            Ok(scenario) => scenario,
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                all_passed = false;
                continue;
            }
        };
        let report = runner.run(&scenario);
        all_passed &= report.passed();
        if !json {
            println!("{}", report.generate_text());
        }
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        let passed = reports.iter().filter(|r| r.passed()).count();
        println!("{passed}/{} scenarios passed", reports.len());
    }
    Ok(all_passed)
}

fn check_config(args: &clap::ArgMatches) -> anyhow::Result<bool> {
    let Some(path) = args.get_one::<PathBuf>("path") else {
        return Ok(false);
    };
    let config = load_config(Some(path), None)?;
    print!("{}", config.to_toml_string()?);
    Ok(true)
}

fn main() -> ExitCode {
    init_tracing();
    let matches = cli().get_matches();

    let result = match matches.subcommand() {
        Some(("run", args)) => run(args),
        Some(("check-config", args)) => check_config(args),
        _ => Ok(false),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
