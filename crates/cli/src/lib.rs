use anyhow::{Context as AnyhowContext, Result};
use axum::{
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use clap::{Args, Parser, Subcommand};
use command::{CommandAction, CommandRequest};
use config::{AppData, DataConfig};
use crave_progress::UserActivityCounters;
use crave_protocol::serialize_json;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

mod command;
mod config;
mod http_api;
mod server_security;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serialize_json(value)?
    };
    print_stdout(&output)
}

#[derive(Parser)]
#[command(name = "crave")]
#[command(about = "Find plant-based alternatives for animal-product cravings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Catalog dataset (JSON or TOML) replacing the built-in one
    #[arg(long, global = true, env = "CRAVE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Gamification dataset (JSON or TOML) replacing the built-in one
    #[arg(long, global = true, env = "CRAVE_GAMIFICATION")]
    gamification: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a JSON Command API request
    Command(CommandArgs),

    /// Resolve a craving to a catalog record
    Search(SearchArgs),

    /// Show the achievement tier and progress for a set of counters
    Progress(CounterArgs),

    /// Estimate environmental impact for a set of counters
    Impact(CounterArgs),

    /// List favorited alternatives by id
    Favorites(FavoritesArgs),

    /// Summarize the catalog, or show one record
    #[command(name = "catalog")]
    CatalogInfo(CatalogArgs),

    /// Show the tip and facts for a day
    Tip(TipArgs),

    /// Load and validate both datasets, then print a summary
    Validate,

    /// Serve Command API over HTTP (POST /command)
    ServeHttp(ServeArgs),
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON request (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing the JSON request
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text craving, e.g. "chicken wings"
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Maximum "did you mean" suggestions when nothing matches
    #[arg(long, short = 'n', default_value_t = command::domain::DEFAULT_SUGGESTION_LIMIT)]
    limit: usize,
}

#[derive(Args)]
struct CounterArgs {
    #[arg(long, default_value_t = 0)]
    searches: u32,

    #[arg(long, default_value_t = 0)]
    favorites: u32,

    #[arg(long, default_value_t = 0)]
    recipes_viewed: u32,

    #[arg(long, default_value_t = 0)]
    reviews_written: u32,

    #[arg(long, default_value_t = 0)]
    days_active: u32,
}

impl CounterArgs {
    fn counters(&self) -> UserActivityCounters {
        UserActivityCounters {
            searches: self.searches,
            favorites: self.favorites,
            recipes_viewed: self.recipes_viewed,
            reviews_written: self.reviews_written,
            days_active: self.days_active,
        }
    }
}

#[derive(Args)]
struct FavoritesArgs {
    /// Favorited alternative ids
    ids: Vec<u32>,

    /// Ids to add if absent or remove if present
    #[arg(long, value_delimiter = ',')]
    toggle: Vec<u32>,
}

#[derive(Args)]
struct CatalogArgs {
    /// Record key to show in full
    #[arg(long)]
    key: Option<String>,
}

#[derive(Args)]
struct TipArgs {
    /// Day number (days since the Unix epoch); defaults to today
    #[arg(long)]
    day: Option<u64>,
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:7700
    #[arg(long, default_value = "127.0.0.1:7700")]
    bind: String,

    /// Allow binding to non-loopback addresses
    #[arg(long)]
    public: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // every subcommand except serve-http prints JSON on stdout
    let json_output = !matches!(cli.command, Commands::ServeHttp(_));
    if json_output && !cli.verbose {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let data = DataConfig {
        catalog: cli.catalog.clone(),
        gamification: cli.gamification.clone(),
    }
    .load()?;
    let pretty = cli.pretty;

    match cli.command {
        Commands::Command(args) => run_command(args, &data, pretty)?,
        Commands::Search(args) => {
            let payload = json!({ "query": args.query.join(" "), "suggestion_limit": args.limit });
            run_action(CommandAction::Search, payload, &data, pretty)?
        }
        Commands::Progress(args) => {
            let payload = json!({ "counters": args.counters() });
            run_action(CommandAction::Progress, payload, &data, pretty)?
        }
        Commands::Impact(args) => {
            let payload = json!({ "counters": args.counters() });
            run_action(CommandAction::Impact, payload, &data, pretty)?
        }
        Commands::Favorites(args) => {
            let payload = json!({ "ids": args.ids, "toggle": args.toggle });
            run_action(CommandAction::Favorites, payload, &data, pretty)?
        }
        Commands::CatalogInfo(args) => {
            let payload = match args.key {
                Some(key) => json!({ "key": key }),
                None => json!({}),
            };
            run_action(CommandAction::Catalog, payload, &data, pretty)?
        }
        Commands::Tip(args) => {
            let payload = match args.day {
                Some(day) => json!({ "day": day }),
                None => json!({}),
            };
            run_action(CommandAction::Tip, payload, &data, pretty)?
        }
        Commands::Validate => {
            log::info!("Datasets are valid");
            print_json(&data.summary(), pretty)?
        }
        Commands::ServeHttp(args) => serve_http(args, data).await?,
    }

    Ok(())
}

fn run_command(args: CommandArgs, data: &AppData, pretty: bool) -> Result<()> {
    let raw = read_payload(&args)?;
    let request: CommandRequest =
        serde_json::from_str(&raw).context("Invalid JSON passed to --json/--file")?;
    respond(request, data, pretty)
}

fn run_action(
    action: CommandAction,
    payload: serde_json::Value,
    data: &AppData,
    pretty: bool,
) -> Result<()> {
    respond(CommandRequest::new(action, payload), data, pretty)
}

fn respond(request: CommandRequest, data: &AppData, pretty: bool) -> Result<()> {
    let response = command::execute(request, data);
    print_json(&response, pretty)?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn read_payload(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;

    if buffer.trim().is_empty() {
        anyhow::bail!("Command request is empty. Provide --json, --file, or pipe JSON via stdin.");
    }

    Ok(buffer)
}

async fn serve_http(args: ServeArgs, data: AppData) -> Result<()> {
    let addrs = server_security::resolve_guarded_bind_addrs(&args.bind, args.public).await?;

    let state = Arc::new(HttpState { data });
    let app = Router::new()
        .route(
            "/command",
            post({
                let state = state.clone();
                move |body| http_handler(body, state.clone())
            }),
        )
        .route(
            "/health",
            get({
                let state = state.clone();
                move || http_health(state.clone())
            }),
        );

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    let local_addr = listener.local_addr()?;
    let base_url = format!("http://{local_addr}");

    print_stdout(&format!("Serving Command API: {base_url}/command"))?;
    print_stdout(&format!("Health endpoint: {base_url}/health"))?;
    if args.public {
        let addrs = addrs
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        print_stdout(&format!(
            "Public bind enabled (--public). Resolved addresses: {addrs}"
        ))?;
    }
    print_stdout(&format!(
        "Try: curl -X POST {base_url}/command -H 'Content-Type: application/json' -d '{{\"action\":\"search\",\"payload\":{{\"query\":\"beef\"}}}}'"
    ))?;

    axum::serve(listener, app).await?;
    Ok(())
}

async fn http_handler(
    body: axum::body::Bytes,
    state: Arc<HttpState>,
) -> Result<Response, StatusCode> {
    let request: CommandRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            let response =
                http_api::error_response("invalid_request", format!("Invalid JSON request: {err}"));
            return http_api::build_response(StatusCode::BAD_REQUEST, &response);
        }
    };
    let response = command::execute(request, &state.data);
    http_api::build_response(http_api::status_for(&response), &response)
}

async fn http_health(state: Arc<HttpState>) -> Result<Response, StatusCode> {
    let report = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "datasets": state.data.summary(),
    });
    let bytes = serde_json::to_vec(&report).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    http_api::json_response(StatusCode::OK, bytes)
}

struct HttpState {
    data: AppData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Bytes};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn state() -> Arc<HttpState> {
        Arc::new(HttpState {
            data: AppData::builtin().unwrap(),
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post(body: &'static str) -> (StatusCode, Value) {
        let response = http_handler(Bytes::from_static(body.as_bytes()), state())
            .await
            .unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    #[tokio::test]
    async fn command_endpoint_resolves_search() {
        let (status, body) = post(r#"{"action":"search","payload":{"query":"bacon"}}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["data"]["match"]["key"], "bacon");
    }

    #[tokio::test]
    async fn command_endpoint_rejects_malformed_json() {
        let (status, body) = post("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn command_endpoint_reports_unknown_key_as_not_found() {
        let (status, body) = post(r#"{"action":"catalog","payload":{"key":"tofu"}}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn command_endpoint_maps_bad_payload_to_bad_request() {
        let (status, body) = post(r#"{"action":"search","payload":{"query":" "}}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn health_reports_dataset_counts() {
        let response = http_health(state()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["datasets"]["catalog"]["source"], "builtin");
        assert_eq!(body["datasets"]["catalog"]["records"], 23);
        assert_eq!(body["datasets"]["gamification"]["tiers"], 6);
    }
}
