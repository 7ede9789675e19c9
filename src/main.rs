use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::net::TcpListener;
use tracing::info;

use weather_explorer::api::SharedSource;
use weather_explorer::client::{
    ExplorerSession, ProxyClient, StaticLocation, Tab, WeatherCardView, render_text,
    share_message,
};
use weather_explorer::models::Coordinate;
use weather_explorer::upstream::OpenWeatherClient;
use weather_explorer::{ExplorerConfig, telemetry, web};

#[derive(Parser, Debug)]
#[command(name = "weather-explorer", version)]
#[command(about = "OpenWeatherMap proxy and terminal weather client")]
struct Cli {
    /// Configuration file (TOML); environment variables take precedence
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the proxy service
    Serve {
        /// Listen port, overrides PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Fetch weather through a running proxy and print it
    Show {
        /// Latitude of your location. Without it the default location is used
        #[arg(long, allow_negative_numbers = true, requires = "lon", value_parser = parse_degrees)]
        lat: Option<f64>,

        /// Longitude of your location
        #[arg(long, allow_negative_numbers = true, requires = "lat", value_parser = parse_degrees)]
        lon: Option<f64>,

        /// Pick a point as if clicked on the map. Example: 48.85,2.35
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        select: Option<Coordinate>,

        /// Show temperatures in Fahrenheit
        #[arg(long, default_value_t = false)]
        fahrenheit: bool,

        /// Tab to print
        #[arg(long, value_enum)]
        tab: Option<TabArg>,

        /// Proxy base URL, overrides PROXY_URL
        #[arg(long)]
        proxy: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TabArg {
    MyLocation,
    Selected,
    Map,
}

impl From<TabArg> for Tab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::MyLocation => Tab::MyLocation,
            TabArg::Selected => Tab::Selected,
            TabArg::Map => Tab::Map,
        }
    }
}

fn parse_degrees(input: &str) -> std::result::Result<f64, String> {
    input
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("expected a finite number, got '{input}'"))
}

fn parse_coordinate(input: &str) -> std::result::Result<Coordinate, String> {
    Coordinate::parse(input).ok_or_else(|| format!("expected LAT,LON, got '{input}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ExplorerConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    if cli.verbose {
        config.log_level = "debug".to_string();
    }
    let _telemetry = telemetry::init(&config).context("Failed to initialize logging")?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await
        }
        Command::Show {
            lat,
            lon,
            select,
            fahrenheit,
            tab,
            proxy,
        } => {
            let proxy_url = proxy.unwrap_or_else(|| config.proxy_url.clone());
            let own = lat.zip(lon).map(|(lat, lon)| Coordinate::new(lat, lon));
            show(&proxy_url, own, select, fahrenheit, tab.map(Tab::from)).await
        }
    }
}

async fn serve(config: ExplorerConfig) -> Result<()> {
    let client = OpenWeatherClient::new(&config).context("Failed to create weather client")?;
    info!("Relaying to {}", config.openweather_base_url);
    let source: SharedSource = Arc::new(client);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    web::run(listener, web::app(source, config.static_dir.clone())).await?;
    Ok(())
}

async fn show(
    proxy_url: &str,
    own: Option<Coordinate>,
    select: Option<Coordinate>,
    fahrenheit: bool,
    tab: Option<Tab>,
) -> Result<()> {
    let proxy = ProxyClient::new(proxy_url).context("Failed to create proxy client")?;
    let session = ExplorerSession::new(proxy);

    session.start(&StaticLocation(own)).await;
    if let Some(point) = select {
        session.select_point(point).await;
    }
    if fahrenheit {
        session.toggle_unit().await;
    }
    if let Some(tab) = tab {
        session.select_tab(tab).await;
    }

    let state = session.state().await;
    print!("{}", render_text(&state));

    let shown = match state.active_tab {
        Tab::MyLocation => state.own.report.as_ref(),
        Tab::Selected => state.selected.report.as_ref(),
        Tab::Map => None,
    };
    if let Some(report) = shown {
        let card = WeatherCardView::from_current(&report.current, state.unit);
        println!("\n{}", share_message(&card));
    }
    Ok(())
}
