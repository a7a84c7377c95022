//! eco-compute entry point — CLI wiring and config-driven startup.

use std::path::Path;
use std::process;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eco_compute::config::ServiceConfig;
use eco_compute::grid::GridSimulator;
use eco_compute::io::export::export_grid_csv;
use eco_compute::jobs::JobRegistry;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    port_override: Option<u16>,
    profile_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "tui")]
    tui: bool,
}

fn print_help() {
    eprintln!("eco-compute — grid-aware compute workload simulator");
    eprintln!();
    eprintln!("Usage: eco-compute [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load service config from TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (demo, strict)");
    eprintln!("  --seed <u64>             Fix the grid random seed");
    eprintln!("  --port <u16>             API server port (overrides $PORT)");
    eprintln!("  --profile-out <path>     Export the 24-hour grid profile to CSV");
    #[cfg(feature = "api")]
    eprintln!("  --serve                  Start the REST API server");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Open the terminal dashboard");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the demo preset is used.");
}

/// Returns the value following flag `args[*i]`, advancing `i`.
fn flag_value<'a>(args: &'a [String], i: &mut usize, expected: &str) -> &'a str {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("error: {flag} requires {expected}");
            process::exit(1);
        }
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str, kind: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("error: {flag} value \"{value}\" is not a valid {kind}");
        process::exit(1);
    })
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        preset: None,
        seed_override: None,
        port_override: None,
        profile_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "tui")]
        tui: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                cli.config_path = Some(flag_value(&args, &mut i, "a path argument").to_string());
            }
            "--preset" => {
                cli.preset = Some(flag_value(&args, &mut i, "a name argument").to_string());
            }
            "--seed" => {
                let v = flag_value(&args, &mut i, "a u64 argument");
                cli.seed_override = Some(parse_number("--seed", v, "u64"));
            }
            "--port" => {
                let v = flag_value(&args, &mut i, "a u16 argument");
                cli.port_override = Some(parse_number("--port", v, "u16"));
            }
            "--profile-out" => {
                cli.profile_out = Some(flag_value(&args, &mut i, "a path argument").to_string());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.config_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --config and --preset are mutually exclusive");
        process::exit(1);
    }

    cli
}

/// Loads config from file or preset, then applies env and CLI overrides.
fn load_config(cli: &CliArgs) -> ServiceConfig {
    let loaded = if let Some(ref path) = cli.config_path {
        ServiceConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ServiceConfig::from_preset(name)
    } else {
        Ok(ServiceConfig::demo())
    };
    let mut config = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Err(e) = config.apply_env(|key| std::env::var(key).ok()) {
        eprintln!("{e}");
        process::exit(1);
    }
    if let Some(seed) = cli.seed_override {
        config.grid.seed = Some(seed);
    }
    if let Some(port) = cli.port_override {
        config.server.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    config
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eco_compute=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = parse_args();
    init_tracing();

    let config = load_config(&cli);
    let mut simulator = GridSimulator::from_seed_option(config.grid.seed);
    let registry = JobRegistry::initialize(config.registry_policy());
    info!(
        seed = ?config.grid.seed,
        policy = ?registry.policy(),
        "simulator and job registry ready"
    );

    #[cfg(feature = "tui")]
    if cli.tui {
        let app = eco_compute::tui::runtime::App::new(simulator, registry);
        if let Err(e) = eco_compute::tui::run(app) {
            error!("dashboard failed: {e}");
            process::exit(1);
        }
        return;
    }

    // Print the day profile and the job table
    let profile = simulator.day_profile();
    for state in &profile {
        println!("{state}");
    }
    println!();
    for job in registry.list_jobs() {
        println!(
            "{:<22} {:<10} {:>5} kW  {:<5} {:<10} {}",
            job.id,
            job.job_type,
            job.power_consumption_kw,
            job.urgency,
            job.status,
            job.location
        );
    }

    if let Some(ref path) = cli.profile_out {
        if let Err(e) = export_grid_csv(&profile, Path::new(path)) {
            error!("failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path, "grid profile written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        let addr = config.socket_addr().unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        });
        let state = eco_compute::api::AppState::new(simulator, registry);
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            error!("failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(eco_compute::api::serve(state, addr)) {
            error!("server error: {e}");
            process::exit(1);
        }
    }
}
