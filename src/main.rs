use clap::Parser;
use pumpwise::cli::{CheckArgs, Cli, Commands};
use pumpwise::config::{Config, API_KEY_ENV};
use pumpwise::datasources::{FixedWeather, OpenWeatherMapClient, WeatherProvider};
use pumpwise::error::{PumpwiseError, Result};
use pumpwise::logic::{DecisionEngine, IrrigationCheck};
use pumpwise::models::FieldState;
use tracing_subscriber::EnvFilter;

/// Temperature reported for offline checks when --temp is not given.
const OFFLINE_TEMPERATURE_C: f64 = 25.0;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config)?;

    match cli.command.unwrap_or(Commands::Check(CheckArgs::default())) {
        Commands::Check(args) => run_check(&config, args).await,
        Commands::Crops => {
            let table = config.crop_table()?;
            println!(
                "{:<12} {:>10} {:>10} {:>10}",
                "Crop", "Dry <(%)", "L/m²", "Opt. °C"
            );
            for crop in table.profiles() {
                let optimal = crop
                    .optimal_temp_c
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".into());
                let marker = if crop.name == table.fallback().name {
                    "  (default)"
                } else {
                    ""
                };
                println!(
                    "{:<12} {:>10} {:>10} {:>10}{}",
                    crop.name,
                    crop.soil_moisture_threshold,
                    crop.water_need_per_m2,
                    optimal,
                    marker
                );
            }
            Ok(())
        }
        Commands::Rules => {
            let engine = DecisionEngine::with_thresholds(config.engine);
            for (i, (id, name)) in engine.list_rules().into_iter().enumerate() {
                println!("{}. {:<14} {}", i + 1, id, name);
            }
            println!(
                "   low tank < {}%, rain >= {} mm",
                config.engine.low_tank_percent, config.engine.rain_skip_mm
            );
            Ok(())
        }
    }
}

async fn run_check(config: &Config, args: CheckArgs) -> Result<()> {
    let location = args
        .location
        .clone()
        .unwrap_or_else(|| config.field.location.clone());
    let field = field_state(config, &args);
    let crops = config.crop_table()?;
    let engine = DecisionEngine::with_thresholds(config.engine);

    match args.rain {
        Some(rain_mm) => {
            let provider =
                FixedWeather::new(args.temp.unwrap_or(OFFLINE_TEMPERATURE_C), rain_mm)?;
            let check = IrrigationCheck::new(crops, engine, provider);
            report(&check, &location, &field, args.json).await
        }
        None => {
            let owm = config.openweathermap.clone().ok_or_else(|| {
                PumpwiseError::Config(format!(
                    "OpenWeatherMap is not configured; set {} or pass --rain",
                    API_KEY_ENV
                ))
            })?;
            let check = IrrigationCheck::new(crops, engine, OpenWeatherMapClient::new(owm));
            report(&check, &location, &field, args.json).await
        }
    }
}

fn field_state(config: &Config, args: &CheckArgs) -> FieldState {
    let mut field = config.field.field_state();
    if let Some(crop) = &args.crop {
        field.crop_name = crop.clone();
    }
    if let Some(soil) = args.soil {
        field.soil_moisture_percent = soil;
    }
    if let Some(tank) = args.tank {
        field.tank_level_percent = tank;
    }
    if let Some(area) = args.area {
        field.field_area_m2 = area;
    }
    if let Some(flow) = args.flow {
        field.pump_flow_rate_lpm = flow;
    }
    if let Some(capacity) = args.capacity {
        field.tank_capacity_liters = capacity;
    }
    field
}

async fn report<P: WeatherProvider>(
    check: &IrrigationCheck<P>,
    location: &str,
    field: &FieldState,
    json: bool,
) -> Result<()> {
    let report = check.run(location, field).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
