//! page-classifier-cli: label the text of a page from the command line
//! =====================================================================
//!
//! Plays the role of the extension popup: keeps the OpenRouter API key,
//! extracts the visible text of a page and prints one label.
//!
//! ## Quick start
//! ```bash
//! page-classifier-cli key save sk-or-v1-...
//! page-classifier-cli sentiment --url https://example.org/review
//! curl -s https://example.org/news | page-classifier-cli leaning --html
//! ```
//!
//! ## Subcommands
//! | Command        | What it does                                                         |
//! |----------------|----------------------------------------------------------------------|
//! | **key save**   | Trim and persist the API key.                                        |
//! | **key status** | Report whether a key is saved.                                       |
//! | **sentiment**  | Positive / Negative / Neutral.                                       |
//! | **leaning**    | Right-leaning / Left-leaning / Unbiased.                             |
//! | **relay**      | Answer newline-delimited JSON messages on stdin, one reply per line. |
//!
//! Page text comes from exactly one of `--text`, `--file`, `--url`, or stdin
//! when none is given.
//!
//! ## Exit codes
//! * `0`: label printed / key saved
//! * `1`: analysis or storage error
//! * `2`: argument parsing error (from **clap**)

use colorful::Colorful;
use page_classifier::*;
use std::{io::IsTerminal, path::PathBuf, process::ExitCode};
use tokio::io::AsyncReadExt;

#[derive(Debug, clap::Parser)]
#[command(name = "page-classifier-cli", version)]
struct Cli {
    /// Credential file. Defaults to the per-user config location.
    #[arg(long, value_name = "PATH", global = true)]
    store: Option<PathBuf>,

    /// OpenRouter-compatible API base url.
    #[arg(long, value_name = "URL", global = true)]
    api_base_url: Option<String>,

    /// Model id to classify with.
    #[arg(long, value_name = "MODEL", global = true)]
    model: Option<String>,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    /// Disable the terminal and file loggers.
    #[arg(long, global = true)]
    no_log: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, clap::Subcommand)]
enum Cmd {
    /// Manage the stored API key.
    #[command(subcommand)]
    Key(KeyCmd),

    /// Classify sentiment: Positive, Negative or Neutral.
    Sentiment(AnalyzeArgs),

    /// Classify political leaning: Right-leaning, Left-leaning or Unbiased.
    Leaning(AnalyzeArgs),

    /// Answer JSON messages from stdin, one per line.
    Relay,
}

#[derive(Debug, clap::Subcommand)]
enum KeyCmd {
    /// Save the API key, replacing any previous one.
    Save { key: String },
    /// Show whether an API key is saved.
    Status,
}

#[derive(Debug, clap::Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Treat `--text` or stdin as HTML.
    #[arg(long)]
    html: bool,

    /// Use this key instead of the stored one.
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,
}

#[derive(Debug, clap::Args)]
#[group(multiple = false)]
struct SourceArgs {
    /// Page text given inline.
    #[arg(long)]
    text: Option<String>,

    /// Saved page; `.html`/`.htm` files are rendered to visible text.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Page to fetch.
    #[arg(long)]
    url: Option<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn main() -> ExitCode {
    let cli = <Cli as clap::Parser>::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", format!("Error: {e:#}").color(colorful::Color::Red));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match &cli.cmd {
        // ─────────────────────────────── Key ────────────────────────────────
        Cmd::Key(KeyCmd::Save { key }) => {
            let mut session = open_session(&cli)?;
            let status = session.save_credential(key)?;
            println!("{status}");
            Ok(if status.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Cmd::Key(KeyCmd::Status) => {
            let session = open_session(&cli)?;
            let status = session.credential_status();
            println!("{status}");
            Ok(if status.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        // ───────────────────────────── Analyze ──────────────────────────────
        Cmd::Sentiment(args) => analyze(&cli, ClassificationKind::Sentiment, args).await,
        Cmd::Leaning(args) => analyze(&cli, ClassificationKind::Leaning, args).await,

        // ────────────────────────────── Relay ───────────────────────────────
        Cmd::Relay => {
            let relay = MessageRelay::new(build_backend(&cli, "relay")?);
            relay
                .run(
                    tokio::io::BufReader::new(tokio::io::stdin()),
                    tokio::io::stdout(),
                )
                .await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn analyze(
    cli: &Cli,
    kind: ClassificationKind,
    args: &AnalyzeArgs,
) -> anyhow::Result<ExitCode> {
    let mut session = open_session(cli)?.with_credential_override(args.api_key.as_deref());
    // stdin may never close, so report a missing key before reading the page
    if let Err(state) = session.require_credential() {
        return Ok(render(&state));
    }
    let page = page_source(args).await?;
    let state = session.analyze(kind, &page).await;
    Ok(render(&state))
}

fn open_session(cli: &Cli) -> anyhow::Result<ClassifierSession<ConfyStore>> {
    let store = match &cli.store {
        Some(path) => ConfyStore::new(path),
        None => ConfyStore::user_default()?,
    };
    Ok(ClassifierSession::new(build_backend(cli, "page_classifier")?, store))
}

fn build_backend(cli: &Cli, logger_name: &str) -> anyhow::Result<OpenRouterBackend> {
    let mut builder = PageClassifier::openrouter()
        .logger_name(logger_name)
        .logging_enabled(!cli.no_log)
        .log_level(cli.log_level.into());
    if let Some(base_url) = &cli.api_base_url {
        builder = builder.with_api_base_url(base_url);
    }
    if let Some(model) = &cli.model {
        builder = builder.with_model(model);
    }
    builder.init()
}

async fn page_source(args: &AnalyzeArgs) -> anyhow::Result<PageSource> {
    let SourceArgs { text, file, url } = &args.source;
    if let Some(file) = file {
        return Ok(PageSource::File(file.clone()));
    }
    if let Some(url) = url {
        return Ok(PageSource::Url(url.clone()));
    }
    let text = match text {
        Some(text) => text.clone(),
        None => {
            let mut input = String::new();
            tokio::io::stdin().read_to_string(&mut input).await?;
            input
        }
    };
    Ok(if args.html {
        PageSource::Html(text)
    } else {
        PageSource::Text(text)
    })
}

fn render(state: &DisplayState) -> ExitCode {
    match state {
        DisplayState::Label { label, tone, .. } => {
            if std::io::stdout().is_terminal() {
                println!("{}", label.as_str().color(tone_color(*tone)).bold());
            } else {
                println!("{label}");
            }
            ExitCode::SUCCESS
        }
        DisplayState::Error(message) => {
            eprintln!("{}", message.as_str().color(tone_color(Tone::Red)));
            ExitCode::FAILURE
        }
    }
}

fn tone_color(tone: Tone) -> colorful::RGB {
    match tone {
        Tone::Green => colorful::RGB::new(34, 197, 94),
        Tone::Red => colorful::RGB::new(239, 68, 68),
        Tone::Blue => colorful::RGB::new(59, 130, 246),
        Tone::Gray => colorful::RGB::new(107, 114, 128),
    }
}
