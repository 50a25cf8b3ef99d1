use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use recap_pipeline::{
    media::ytdlp::YtDlpFetcher, notify::TelegramNotifier, openai::OpenAIClient,
    tracing::init_tracing_subscriber, webhook, JobId, JobProcessor, JobProcessorBuilder,
    SummarizeConfig,
};
use recap_store::FsObjectStore;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "recap-bot", about = "Chat-driven video summarization bot")]
struct Cli {
    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN")]
    telegram_token: String,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_key: String,

    /// Completion model used for map and reduce calls
    #[arg(long, env = "RECAP_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// Directory where transcripts and summaries are persisted
    #[arg(long, env = "RECAP_DATA_DIR", default_value = "/var/lib/recap-bot")]
    data_dir: PathBuf,

    /// Working directory for downloaded audio
    #[arg(long, default_value = "/var/tmp/recap-bot")]
    workdir: PathBuf,

    /// Path to yt-dlp cookies file
    #[arg(long, env = "YTDLP_COOKIES_PATH")]
    cookies_path: Option<PathBuf>,

    /// Transcript chunk size in characters
    #[arg(long, default_value = "3000")]
    max_chunk_chars: usize,

    /// Maximum concurrent map-stage provider calls
    #[arg(long, default_value = "4")]
    map_concurrency: usize,

    /// Per-call provider timeout in seconds
    #[arg(long, default_value = "60")]
    request_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the Telegram webhook
    Serve {
        /// Webhook bind address
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
        bind: SocketAddr,
    },
    /// Summarize a single URL and deliver to a chat, then exit
    Run {
        url: String,
        #[arg(long)]
        chat_id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let openai = OpenAIClient::new(&cli.openai_key).with_model(&cli.model);
    let notifier = TelegramNotifier::new(&cli.telegram_token);
    let mut fetcher = YtDlpFetcher::new();
    if let Some(cookies_path) = &cli.cookies_path {
        fetcher = fetcher.with_cookies(cookies_path);
    }
    let store = FsObjectStore::init(&cli.data_dir).await?;

    let summarize_config = SummarizeConfig {
        max_chunk_chars: cli.max_chunk_chars,
        map_concurrency: cli.map_concurrency,
        request_timeout: Duration::from_secs(cli.request_timeout_secs),
        ..SummarizeConfig::default()
    };

    let processor = JobProcessorBuilder::new(&cli.workdir)
        .fetcher(fetcher)
        .transcriber(openai.clone())
        .completion_client(openai)
        .notifier(notifier)
        .store(store)
        .summarize_config(summarize_config)
        .build();

    match cli.command {
        Command::Serve { bind } => serve(processor, bind).await?,
        Command::Run { url, chat_id } => {
            let job = JobId::new();
            tracing::info!(%job, "Running single summarization job...");
            processor.process(chat_id, &url, &job).await?;
        }
    }

    Ok(())
}

async fn serve<F, T, C, N, O>(
    processor: JobProcessor<F, T, C, N, O>,
    bind: SocketAddr,
) -> anyhow::Result<()>
where
    F: recap_pipeline::AudioFetcher + Send + Sync + 'static,
    T: recap_pipeline::Transcriber + Send + Sync + 'static,
    C: recap_pipeline::CompletionClient + Send + Sync + 'static,
    N: recap_pipeline::Notifier + Send + Sync + 'static,
    O: recap_store::ObjectStore + Send + Sync + 'static,
{
    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            signal_token.cancel();
        }
    });

    let app = webhook::router(Arc::new(processor));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "Listening for Telegram webhooks");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
