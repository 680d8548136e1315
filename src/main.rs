use anyhow::Context;
use hackrx::{
    api::routes::create_router,
    cli::{commands, output::Output, Cli, Commands},
    rag::indexer::IndexPaths,
    AppState, Config, RagPipeline,
};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?;
    init_tracing(&config.server.log_level, cli.verbose, cli.json_logs);

    let api_key = config
        .google_api_key()
        .context("A Google API key is required to reach the embedding and generation models")?;
    let pipeline = RagPipeline::from_config(&config, api_key)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, pipeline, &output).await,
        Commands::Ingest {
            source,
            output_dir,
            base_name,
        } => {
            let base = base_name.unwrap_or_else(|| config.rag.index_base_name.clone());
            let paths = IndexPaths::for_base(&output_dir, &base);
            commands::ingest(&pipeline, &source, &paths, &output).await?;
            Ok(())
        }
        Commands::Query {
            output_dir,
            base_name,
            questions,
        } => {
            let base = base_name.unwrap_or_else(|| config.rag.index_base_name.clone());
            let paths = IndexPaths::for_base(&output_dir, &base);
            let index = commands::load_index(&paths, &output)?;
            output.info(&format!("Loaded {} chunks from {}", index.len(), paths.index.display()));

            let mut stdout = std::io::stdout();
            if questions.is_empty() {
                let stdin = BufReader::new(tokio::io::stdin());
                commands::interactive(&pipeline, &index, stdin, &mut stdout, &output).await?;
            } else {
                commands::answer_questions(&pipeline, &index, &questions, &mut stdout).await?;
            }
            Ok(())
        }
    }
}

fn init_tracing(level: &str, verbose: bool, json: bool) {
    let level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "hackrx={0},policy_vector={0},tower_http={0}",
            level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn serve(config: Config, pipeline: RagPipeline, output: &Output) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let bearer_token = config.bearer_token();

    let state = AppState {
        config: Arc::new(config),
        pipeline: Arc::new(pipeline),
        bearer_token: bearer_token.into(),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    output.banner(&addr);
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
