use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use restaurant_desk::config::{AppConfig, ConfigError, normalize_base_url};
use restaurant_desk::form::editor::{EditError, RestaurantForm};
use restaurant_desk::form::search::SearchForm;
use restaurant_desk::form::submit::{SubmissionOrchestrator, SubmitOutcome};
use restaurant_desk::form::types::{ImageFile, RestaurantDraft, SearchQuery};
use restaurant_desk::form::validate::ValidationErrors;
use restaurant_desk::transport::http::HttpTransport;
use restaurant_desk::transport::{
    RestaurantSource, SearchParams, SearchService, TracingNotifier, TransportError,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("validation failed: {0}")]
    Invalid(ValidationErrors),
    #[error("a submission is already in flight")]
    Busy,
}

#[derive(Parser, Debug)]
#[command(name = "restaurant-desk", about = "Manage and search restaurants from the terminal")]
struct Cli {
    #[arg(long, env = "RESTAURANT_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "RESTAURANT_API_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the form's starting draft: the existing restaurant or create-mode defaults.
    Show,
    /// Validate a draft JSON file and create or update the restaurant.
    Submit {
        #[arg(long)]
        draft: PathBuf,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Search restaurants in a city.
    Search {
        #[arg(long)]
        city: String,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long = "cuisine")]
        cuisines: Vec<String>,
        #[arg(long, default_value = "bestMatch")]
        sort: String,
    },
    /// List selectable cuisines.
    Cuisines,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    debug!(base_url = %config.api_base_url, "config loaded");

    match cli.command {
        Command::Show => run_show(&config).await,
        Command::Submit { draft, image } => run_submit(&config, &draft, image.as_deref()).await,
        Command::Search { city, query, page, cuisines, sort } => {
            let params = SearchParams { search_query: String::new(), page, selected_cuisines: cuisines, sort_option: sort };
            run_search(&config, &city, query, params).await
        }
        Command::Cuisines => {
            for cuisine in config.cuisines.iter() {
                println!("{cuisine}");
            }
            Ok(())
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, CliError> {
    let mut config = AppConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.api_base_url = normalize_base_url(base_url)?;
    }
    if let Some(token) = &cli.token {
        config.api_token = Some(token.clone());
    }
    Ok(config)
}

async fn load_form(config: &AppConfig, transport: &HttpTransport) -> Result<RestaurantForm, CliError> {
    let existing = transport.fetch_my_restaurant().await?;
    Ok(RestaurantForm::from_fetched(config.cuisines.clone(), existing.as_ref()))
}

async fn run_show(config: &AppConfig) -> Result<(), CliError> {
    let transport = HttpTransport::new(config)?;
    let form = load_form(config, &transport).await?;
    info!(mode = form.mode().label(), "loaded restaurant form");
    print_json(form.draft())
}

async fn run_submit(config: &AppConfig, draft_path: &Path, image: Option<&Path>) -> Result<(), CliError> {
    let transport = Arc::new(HttpTransport::new(config)?);
    let mut form = load_form(config, &transport).await?;

    let raw = read_file(draft_path).await?;
    let draft: RestaurantDraft = serde_json::from_slice(&raw)?;
    form.load_draft(draft)?;

    if let Some(path) = image {
        let bytes = read_file(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_owned(), |name| name.to_string_lossy().into_owned());
        form.set_image_file(Some(ImageFile::new(file_name, bytes)));
    }

    let orchestrator = SubmissionOrchestrator::new(transport, Arc::new(TracingNotifier));
    match orchestrator.submit(&mut form).await {
        SubmitOutcome::Sent { reply, .. } => {
            println!("{}", reply.message);
            Ok(())
        }
        SubmitOutcome::Failed { error, .. } => Err(error.into()),
        SubmitOutcome::Invalid(errors) => {
            for (path, message) in errors.iter() {
                eprintln!("{path}: {message}");
            }
            Err(CliError::Invalid(errors))
        }
        SubmitOutcome::Rejected => Err(CliError::Busy),
    }
}

async fn run_search(config: &AppConfig, city: &str, query: String, mut params: SearchParams) -> Result<(), CliError> {
    let mut bar = SearchForm::new(query, |query: &SearchQuery| {
        debug!(query = %query.search_query, "search submitted");
    });
    let query = bar.submit().map_err(CliError::Invalid)?;
    params.search_query = query.search_query;

    let transport = HttpTransport::new(config)?;
    let response = transport.search(city, &params).await?;
    info!(
        total = response.pagination.total,
        page = response.pagination.page,
        pages = response.pagination.pages,
        "search complete"
    );
    print_json(&response)
}

async fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| CliError::Io { path: path.to_path_buf(), source })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
