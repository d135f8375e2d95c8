use std::{process::ExitCode, time::Duration};

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};
use log::{error, info};

use merai::{
    display::{DescribedTable, VisibleTableExt},
    enrichment::geolocation::{GeoLocation, GeoLocator, IpGeoLocator},
    env_state::MeraiEnv,
    jpl_ephem::download_jpl_file::EphemSource,
    merai::{Merai, MeraiConfig},
    merai_errors::MeraiError,
    observers::ObserverFrame,
    sky_chart::{
        render::{ChartRenderer, JsonFigureRenderer, SvgRenderer},
        zoom::ZoomLevel,
    },
    time::{now_utc, parse_utc_instant},
};

#[derive(Parser)]
#[command(name = "merai", version, about = "What is above your horizon right now")]
struct Cli {
    /// Ephemeris: a .bsp path or naif:<VERSION>
    #[arg(long, default_value = "naif:DE421")]
    ephemeris: String,

    /// Star catalog: Hipparcos hip_main.dat or a HYG-style .csv
    #[arg(long, default_value = "hip_main.dat")]
    catalog: Utf8PathBuf,

    /// CSV file with `hip` and `con` columns
    #[arg(long, default_value = "hygdata_v41.csv")]
    constellations: Utf8PathBuf,

    /// Timeout of every network call, seconds
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Location {
    /// Latitude in degrees, north positive (located from the IP address when omitted)
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// UTC instant, YYYY-MM-DDTHH:MM:SS (now when omitted)
    #[arg(long)]
    time: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartFormat {
    Svg,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Table of the objects above the horizon
    Visible {
        #[command(flatten)]
        location: Location,
        /// Highest objects first
        #[arg(long)]
        sorted: bool,
    },
    /// Polar sky chart
    Chart {
        #[command(flatten)]
        location: Location,
        /// Zoom factor, one of 0.7, 1.0, 1.3, 1.6, 2.0
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
        /// Steps towards the zenith window
        #[arg(long, default_value_t = 0)]
        zoom_in: usize,
        /// Steps towards the full sky
        #[arg(long, default_value_t = 0)]
        zoom_out: usize,
        #[arg(long, value_enum, default_value = "svg")]
        format: ChartFormat,
        /// Output file (sky_chart.svg or sky_chart.json by default)
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },
    /// Visible objects with their Wikipedia summary
    Describe {
        #[command(flatten)]
        location: Location,
    },
    /// Observer location from the public IP address
    Locate,
}

fn setup_logging(base_level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(base_level)?
        .log_to_file(FileSpec::default().directory("logs"))
        .duplicate_to_stderr(Duplicate::Warn)
        .rotate(
            Criterion::Size(1024 * 1024),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .start()
}

fn observer_frame(merai: &Merai, location: &Location) -> Result<ObserverFrame, MeraiError> {
    let instant = match &location.time {
        Some(text) => parse_utc_instant(text)?,
        None => now_utc()?,
    };

    match (location.lat, location.lon) {
        (Some(lat), Some(lon)) => ObserverFrame::new(lat, lon, instant),
        _ => {
            let GeoLocation {
                latitude,
                longitude,
                label,
            } = merai.locate()?;
            info!("Observer located in {label}");
            ObserverFrame::new(latitude, longitude, instant)
        }
    }
}

fn run(cli: Cli) -> Result<(), MeraiError> {
    let config = MeraiConfig {
        ephemeris: EphemSource::try_from(cli.ephemeris.as_str())?,
        star_catalog: cli.catalog,
        constellation_file: cli.constellations,
        http_timeout: Duration::from_secs(cli.timeout),
    };

    if let Commands::Locate = cli.command {
        let locator = IpGeoLocator::new(MeraiEnv::with_timeout(config.http_timeout));
        let found = locator.resolve_location()?;
        println!("{}: {:.4}, {:.4}", found.label, found.latitude, found.longitude);
        return Ok(());
    }

    let merai = Merai::new(config)?;

    match cli.command {
        Commands::Visible { location, sorted } => {
            let observer = observer_frame(&merai, &location)?;
            let objects = merai.visible_objects(&observer);
            println!("{observer}");
            if sorted {
                println!("{}", objects.table().sorted_by_altitude());
            } else {
                println!("{}", objects.table());
            }
        }
        Commands::Chart {
            location,
            zoom,
            zoom_in,
            zoom_out,
            format,
            output,
        } => {
            let observer = observer_frame(&merai, &location)?;
            let mut level = ZoomLevel::from_factor(zoom);
            for _ in 0..zoom_in {
                level = level.zoom_in();
            }
            for _ in 0..zoom_out {
                level = level.zoom_out();
            }

            let spec = merai.sky_chart(&observer, level);
            let (content, default_name) = match format {
                ChartFormat::Svg => (SvgRenderer::default().render(&spec)?, "sky_chart.svg"),
                ChartFormat::Json => (
                    serde_json::to_string_pretty(&JsonFigureRenderer.render(&spec)?)?,
                    "sky_chart.json",
                ),
            };
            let path = output.unwrap_or_else(|| Utf8PathBuf::from(default_name));
            std::fs::write(&path, content)?;
            println!(
                "{} objects plotted at zoom {level}, chart written to {path}",
                spec.points.len()
            );
        }
        Commands::Describe { location } => {
            let observer = observer_frame(&merai, &location)?;
            let described = merai.describe(&merai.visible_objects(&observer));
            println!("{observer}");
            println!("{}", DescribedTable::new(&described));
        }
        Commands::Locate => {}
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logger = match setup_logging(&cli.log_level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Logger initialization failed with {e}");
            None
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            if logger.is_none() {
                eprintln!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}
