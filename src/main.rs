use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use iss_passes::clock::{reference_time, SystemClock};
use iss_passes::geometry::{
    compute_bearing, estimate_elevation, great_circle_distance_km, initial_bearing_deg, GeoPoint,
};
use iss_passes::predict::{
    predict_passes, PassRecord, DEFAULT_MAX_PASS_COUNT, DEFAULT_PASS_COUNT,
};
use iss_passes::web::{run_server, Config};

#[derive(Parser)]
#[command(name = "iss-passes")]
#[command(about = "ISS viewing direction and pass predictions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming passes for an observer
    Predict {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
        #[arg(long, default_value_t = DEFAULT_PASS_COUNT)]
        count: usize,
        /// Reference time: now, T+2h, or RFC3339
        #[arg(long)]
        at: Option<String>,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Viewing direction from one "lat,lon" point to another
    Bearing {
        #[arg(allow_hyphen_values = true)]
        from: String,
        #[arg(allow_hyphen_values = true)]
        to: String,
    },
    /// Elevation estimate of the ISS above a "lat,lon" point
    Elevation {
        #[arg(allow_hyphen_values = true)]
        from: String,
        #[arg(allow_hyphen_values = true)]
        to: String,
    },
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "config.yaml")]
        config: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Predict {
            lat,
            lon,
            count,
            at,
            seed,
            json,
        } => predict(lat, lon, count, at.as_deref(), seed, json),
        Commands::Bearing { from, to } => bearing(&from, &to),
        Commands::Elevation { from, to } => elevation(&from, &to),
        Commands::Serve { config } => serve(&config),
    }
}

fn predict(
    lat: Option<f64>,
    lon: Option<f64>,
    count: usize,
    at: Option<&str>,
    seed: Option<u64>,
    json: bool,
) -> ExitCode {
    if count == 0 || count > DEFAULT_MAX_PASS_COUNT {
        eprintln!("--count must be between 1 and {}", DEFAULT_MAX_PASS_COUNT);
        return ExitCode::FAILURE;
    }

    let observer = match (lat, lon) {
        (Some(lat), Some(lon)) => match GeoPoint::new(lat, lon) {
            Ok(p) => Some(p),
            Err(e) => {
                eprintln!("Invalid observer: {}", e);
                return ExitCode::FAILURE;
            }
        },
        _ => None,
    };

    let reference_time = match reference_time(at, &SystemClock) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let passes = predict_passes(observer.as_ref(), reference_time, count, &mut rng);

    if json {
        return match serde_json::to_string_pretty(&passes) {
            Ok(s) => {
                println!("{}", s);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error encoding passes: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    print!("{}", render_passes(observer.is_some(), &passes));
    ExitCode::SUCCESS
}

fn render_passes(observer_known: bool, passes: &[PassRecord]) -> String {
    if !observer_known {
        return "Observer location unknown, pass --lat and --lon to see pass predictions\n"
            .to_string();
    }
    if passes.is_empty() {
        return "No upcoming visible passes\n".to_string();
    }

    let mut out = String::from("Next visible passes\n");
    for pass in passes {
        out.push_str(&render_pass(pass));
    }
    out
}

fn render_pass(pass: &PassRecord) -> String {
    format!(
        "  {}\n    Duration: {} minutes  Direction: {}  Max Elevation: {}°\n",
        pass.start_time.format("%Y-%m-%d %H:%M:%S UTC"),
        pass.duration_minutes,
        pass.direction,
        pass.max_elevation_deg
    )
}

fn parse_pair(from: &str, to: &str) -> Option<(GeoPoint, GeoPoint)> {
    let parse = |s: &str| match GeoPoint::from_coordinates(s) {
        Ok(p) => Some(p),
        Err(e) => {
            eprintln!("{}", e);
            None
        }
    };
    Some((parse(from)?, parse(to)?))
}

fn bearing(from: &str, to: &str) -> ExitCode {
    let Some((origin, target)) = parse_pair(from, to) else {
        return ExitCode::FAILURE;
    };
    println!(
        "{} ({:.2}°)",
        compute_bearing(&origin, &target),
        initial_bearing_deg(&origin, &target)
    );
    ExitCode::SUCCESS
}

fn elevation(from: &str, to: &str) -> ExitCode {
    let Some((origin, target)) = parse_pair(from, to) else {
        return ExitCode::FAILURE;
    };
    println!(
        "{}° at {:.1} km",
        estimate_elevation(&origin, &target),
        great_circle_distance_km(&origin, &target)
    );
    ExitCode::SUCCESS
}

fn serve(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
