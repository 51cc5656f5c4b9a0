//! bess-dispatch entry point — CLI wiring over the forecast engine and
//! dispatch scheduler.

use std::path::Path;
use std::process;

use rand::{SeedableRng, rngs::StdRng};

use bess_dispatch::config::AppConfig;
use bess_dispatch::dispatch::{BessRating, PlanSummary, schedule};
use bess_dispatch::forecast::ForecastEngine;
use bess_dispatch::io::export::{export_forecast_csv, export_schedule_csv};
use bess_dispatch::io::import::read_series_csv;
use bess_dispatch::registry::ModelRegistry;
use bess_dispatch::series::format_timestamp;

/// Parsed CLI arguments.
struct CliArgs {
    input: Option<String>,
    config_path: Option<String>,
    horizon_override: Option<u32>,
    model_override: Option<String>,
    power_override: Option<f64>,
    energy_override: Option<f64>,
    seed_override: Option<u64>,
    models_dir_override: Option<String>,
    forecast_out: Option<String>,
    schedule_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: Option<u16>,
}

fn print_help() {
    eprintln!("bess-dispatch — hourly MCP forecasting and BESS dispatch planning");
    eprintln!();
    eprintln!("Usage: bess-dispatch [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input <path>           Hourly timestamp,mcp CSV to process");
    eprintln!("  --config <path>          Load configuration from TOML file");
    eprintln!("  --horizon <days>         Forecast horizon in days (>= 1)");
    eprintln!("  --model <name>           Requested forecast model name");
    eprintln!("  --power <mw>             Battery power rating (MW)");
    eprintln!("  --energy <mwh>           Battery energy capacity (MWh)");
    eprintln!("  --seed <u64>             Noise seed for reproducible forecasts");
    eprintln!("  --models-dir <path>      Model artifact directory");
    eprintln!("  --forecast-out <path>    Export the forecast to CSV");
    eprintln!("  --schedule-out <path>    Export the dispatch plan to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start the REST API server");
        eprintln!("  --port <u16>             API server port (default: 8000)");
    }
    eprintln!("  --help                   Show this help message");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        input: None,
        config_path: None,
        horizon_override: None,
        model_override: None,
        power_override: None,
        energy_override: None,
        seed_override: None,
        models_dir_override: None,
        forecast_out: None,
        schedule_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--input" => cli.input = Some(take_value(&args, &mut i, "--input")),
            "--config" => cli.config_path = Some(take_value(&args, &mut i, "--config")),
            "--horizon" => {
                cli.horizon_override = Some(parse_value(&args, &mut i, "--horizon"));
            }
            "--model" => cli.model_override = Some(take_value(&args, &mut i, "--model")),
            "--power" => cli.power_override = Some(parse_value(&args, &mut i, "--power")),
            "--energy" => cli.energy_override = Some(parse_value(&args, &mut i, "--energy")),
            "--seed" => cli.seed_override = Some(parse_value(&args, &mut i, "--seed")),
            "--models-dir" => {
                cli.models_dir_override = Some(take_value(&args, &mut i, "--models-dir"));
            }
            "--forecast-out" => {
                cli.forecast_out = Some(take_value(&args, &mut i, "--forecast-out"));
            }
            "--schedule-out" => {
                cli.schedule_out = Some(take_value(&args, &mut i, "--schedule-out"));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => cli.port = Some(parse_value(&args, &mut i, "--port")),
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Consumes the value following a flag, exiting with a message if missing.
fn take_value(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    if *i >= args.len() {
        eprintln!("error: {flag} requires a value");
        process::exit(1);
    }
    args[*i].clone()
}

/// Consumes and parses the value following a flag.
fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> T {
    let raw = take_value(args, i, flag);
    raw.parse::<T>().unwrap_or_else(|_| {
        eprintln!("error: {flag} value \"{raw}\" is invalid");
        process::exit(1);
    })
}

/// Applies CLI overrides on top of the loaded configuration.
fn apply_overrides(config: &mut AppConfig, cli: &CliArgs) {
    if let Some(h) = cli.horizon_override {
        config.forecast.horizon_days = h;
    }
    if let Some(ref m) = cli.model_override {
        config.forecast.model_name = m.clone();
    }
    if let Some(p) = cli.power_override {
        config.bess.power_mw = p;
    }
    if let Some(e) = cli.energy_override {
        config.bess.energy_mwh = e;
    }
    if let Some(s) = cli.seed_override {
        config.forecast.seed = Some(s);
    }
    if let Some(ref d) = cli.models_dir_override {
        config.models.dir = d.clone();
    }
    #[cfg(feature = "api")]
    if let Some(p) = cli.port {
        config.server.port = p;
    }
}

fn main() {
    let cli = parse_args();

    let mut config = if let Some(ref path) = cli.config_path {
        match AppConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        AppConfig::default_config()
    };

    apply_overrides(&mut config, &cli);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // One registry load per process; forecasts share it read-only.
    let registry = ModelRegistry::load(Path::new(&config.models.dir));
    let available = registry.available();
    if available.is_empty() {
        eprintln!("no model artifacts in {}; using naive baseline", config.models.dir);
    } else {
        eprintln!("model artifacts loaded: {}", available.join(", "));
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(bess_dispatch::api::AppState { registry });
        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(bess_dispatch::api::serve(state, addr));
        return;
    }

    let Some(ref input) = cli.input else {
        eprintln!("error: --input <csv> is required in batch mode");
        print_help();
        process::exit(1);
    };

    let series = match read_series_csv(Path::new(input)) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("error: failed to read {input}: {e}");
            process::exit(1);
        }
    };

    let mut rng = match config.forecast.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let engine = ForecastEngine::new(&registry);
    let forecast = match engine.forecast_with_rng(
        &series,
        config.forecast.horizon_days,
        &config.forecast.model_name,
        &mut rng,
    ) {
        Ok(forecast) => forecast,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let rating = BessRating::new(config.bess.power_mw, config.bess.energy_mwh);
    let plan = match schedule(&series, &rating, config.forecast.horizon_days) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    println!(
        "Forecast ({} days, model \"{}\"):",
        config.forecast.horizon_days, config.forecast.model_name
    );
    for p in &forecast {
        println!("{} | mcp={:>8.2}", format_timestamp(p.timestamp), p.mcp);
    }

    println!("\nDispatch plan ({} hours):", plan.len());
    for p in &plan {
        println!("{p}");
    }

    println!("\n{}", PlanSummary::from_plan(&plan));

    if let Some(ref path) = cli.forecast_out {
        if let Err(e) = export_forecast_csv(&forecast, Path::new(path)) {
            eprintln!("error: failed to write forecast CSV: {e}");
            process::exit(1);
        }
        eprintln!("Forecast written to {path}");
    }
    if let Some(ref path) = cli.schedule_out {
        if let Err(e) = export_schedule_csv(&plan, Path::new(path)) {
            eprintln!("error: failed to write schedule CSV: {e}");
            process::exit(1);
        }
        eprintln!("Schedule written to {path}");
    }
}
