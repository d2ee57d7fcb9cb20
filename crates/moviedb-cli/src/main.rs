//! moviedb - browse, search and inspect TMDB movies from the terminal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use moviedb_api::tmdb::{TimeWindow, TmdbApi, TmdbClient, image_url};
use moviedb_cli::config::{API_KEY_ENV, AppConfig, resolve_config_path};
use moviedb_cli::pages::Screen;
use moviedb_cli::route::Route;
use moviedb_cli::tui::run_browser;
use moviedb_cli::view::list::movie_list;
use moviedb_cli::view::render_page;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show trending and popular movies.
    Home,
    /// List popular movies.
    Popular(PageArgs),
    /// List top rated movies.
    TopRated(PageArgs),
    /// List trending movies.
    Trending(TrendingArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// Show movie details.
    Movie(MovieArgs),
    /// Render the view at a location (e.g. "/search?q=alien", "/movie/27205").
    Open(OpenArgs),
    /// Print a TMDB image CDN URL.
    ImageUrl(ImageUrlArgs),
    /// Browse movies interactively via TUI.
    Browse(BrowseArgs),
}

/// Arguments for paginated listings.
#[derive(clap::Args)]
struct PageArgs {
    /// Page number (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `trending` subcommand.
#[derive(clap::Args)]
struct TrendingArgs {
    /// Time window: "day" or "week".
    #[arg(long, default_value = "day")]
    window: TimeWindow,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Inception").
    #[arg(long, required = true)]
    query: String,
    /// Page number (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `open` subcommand.
#[derive(clap::Args)]
struct OpenArgs {
    /// Location to render.
    location: String,
}

/// Arguments for the `image-url` subcommand.
#[derive(clap::Args)]
struct ImageUrlArgs {
    /// Image path from a TMDB response (e.g. "/abc.jpg"). Omit for the placeholder.
    #[arg(long)]
    path: Option<String>,
    /// Size token (e.g. "w185", "w500", "original").
    #[arg(long, default_value = "w500")]
    size: String,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Starting location.
    #[arg(default_value = "/")]
    location: String,
}

/// Builds the TMDB client from the config file and environment.
///
/// A missing API key is not an error here; the client logs it and every
/// request is rejected upstream.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(dir: Option<&PathBuf>) -> Result<TmdbClient> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    let settings = config.client_settings(std::env::var(API_KEY_ENV).ok())?;

    let mut builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = settings.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(api_key) = settings.api_key {
        builder = builder.api_key(api_key);
    }
    builder.build().context("failed to build TMDB client")
}

/// Loads the view for `route` and prints it.
///
/// View-level failures are rendered as messages; only setup failures
/// are returned.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build.
#[instrument(skip_all, fields(location = %route))]
async fn run_page(route: Route, page: Option<u32>, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(dir)?;

    let mut screen = Screen::for_route(&route);
    if let Some(page) = page {
        screen.set_page(page);
    }
    screen.load(&client).await;

    for line in render_page(&route, &screen) {
        tracing::info!("{line}");
    }

    Ok(())
}

/// Runs the `trending` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_trending(args: &TrendingArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(dir)?;

    let response = client
        .trending_movies(args.window)
        .await
        .context("TMDB trending request failed")?;

    tracing::info!("Trending this {}", args.window);
    for line in movie_list(&response.results) {
        tracing::info!("{line}");
    }
    tracing::info!("Total: {} movies", response.total_results);

    Ok(())
}

/// Runs the `open` subcommand.
///
/// # Errors
///
/// Returns an error if the location is invalid or the TMDB client fails to build.
async fn run_open(args: &OpenArgs, dir: Option<&PathBuf>) -> Result<()> {
    let route = Route::parse(&args.location)?;
    run_page(route, None, dir).await
}

/// Runs the `image-url` subcommand.
fn run_image_url(args: &ImageUrlArgs) {
    tracing::info!("{}", image_url(args.path.as_deref(), &args.size));
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the location is invalid, the TMDB client fails to
/// build, or the TUI fails.
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let route = Route::parse(&args.location)?;
    let client = build_tmdb_client(dir)?;
    run_browser(client, route).await.context("movie browser TUI failed")
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log lines would tear the browser's alternate screen.
    let writer = if matches!(cli.command, Commands::Browse(_)) {
        BoxMakeWriter::new(std::io::sink)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Home => run_page(Route::Home, None, dir).await,
        Commands::Popular(args) => run_page(Route::Popular, Some(args.page), dir).await,
        Commands::TopRated(args) => run_page(Route::TopRated, Some(args.page), dir).await,
        Commands::Trending(args) => run_trending(&args, dir).await,
        Commands::Search(args) => run_page(Route::search(&args.query), Some(args.page), dir).await,
        Commands::Movie(args) => run_page(Route::movie(args.id), None, dir).await,
        Commands::Open(args) => run_open(&args, dir).await,
        Commands::ImageUrl(args) => {
            run_image_url(&args);
            Ok(())
        }
        Commands::Browse(args) => run_browse(&args, dir).await,
    }
}
