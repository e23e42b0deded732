mod commands;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Command;
use pdf_chat_client::config::{parse_timeout, DEFAULT_API_URL};
use pdf_chat_client::{ClientConfig, ClientError, DocumentSession, FileCandidate, HttpDocumentApi, SessionView};
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::watch;

/// Line input that remembers when it hit end of file.
struct Input<R> {
    lines: Lines<R>,
    open: bool,
}

impl<R: AsyncBufRead + Unpin> Input<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            open: true,
        }
    }

    /// `None` once the input is closed or unreadable.
    async fn next_line(&mut self) -> Option<String> {
        if !self.open {
            return None;
        }
        match self.lines.next_line().await {
            Ok(Some(line)) => Some(line),
            Ok(None) => {
                self.open = false;
                None
            }
            Err(e) => {
                log::warn!("stdin: {}", e);
                self.open = false;
                None
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Upload a PDF and chat with it through a question-answering backend")]
struct Args {
    /// Base URL of the backend serving /upload and /ask
    #[arg(long, env = "PDF_CHAT_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Give up on a request after this many seconds (waits forever when unset)
    #[arg(long, env = "PDF_CHAT_TIMEOUT_SECS", value_parser = timeout_arg)]
    timeout_secs: Option<Duration>,

    /// PDF to select at startup
    #[arg(long)]
    file: Option<PathBuf>,

    /// Upload --file right away
    #[arg(long, requires = "file")]
    upload: bool,
}

fn timeout_arg(raw: &str) -> std::result::Result<Duration, String> {
    parse_timeout(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = ClientConfig::new(&args.api_url, args.timeout_secs).context("invalid configuration")?;
    log::info!("Using backend at {}", config.base_url());

    let api = Arc::new(HttpDocumentApi::new(config)?);
    let mut session = DocumentSession::new(api);
    let view = session.subscribe();
    let mut input = Input::new(BufReader::new(tokio::io::stdin()));
    let mut printed = 0;

    println!("PDF Question & Answer (type /help for commands)");

    if let Some(path) = &args.file {
        open(&mut session, path).await;
        if args.upload {
            execute(&mut session, Command::Upload, &mut input, &view).await;
        }
        flush_output(&mut session, &mut printed);
    }

    loop {
        let current = view.borrow().clone();
        println!("-- {}", render::footer(&current));
        print!("{}", render::prompt(&current));
        std::io::stdout().flush().ok();

        let Some(line) = input.next_line().await else {
            break;
        };

        match commands::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", commands::HELP),
            Ok(command) => execute(&mut session, command, &mut input, &view).await,
            Err(usage) => println!("{}", usage),
        }

        flush_output(&mut session, &mut printed);
    }

    log::info!("Session ended with {} messages", session.transcript().len());
    Ok(())
}

async fn open(session: &mut DocumentSession, path: &Path) {
    let candidate = match FileCandidate::from_path(path).await {
        Ok(candidate) => candidate,
        Err(e) => {
            println!("Cannot read {}: {}", path.display(), e);
            return;
        }
    };

    match session.select_file(candidate) {
        Ok(()) => println!("Selected {}", path.display()),
        // the warning notification says it already
        Err(ClientError::InvalidFileType { .. }) => {}
        Err(e) => println!("{}", rejection(&e)),
    }
}

async fn execute<R>(
    session: &mut DocumentSession,
    command: Command,
    input: &mut Input<R>,
    view: &watch::Receiver<SessionView>,
) where
    R: AsyncBufRead + Unpin,
{
    let outcome = match command {
        Command::Open(path) => {
            open(session, &path).await;
            return;
        }
        Command::Dismiss => {
            session.drain_notifications();
            return;
        }
        Command::Status => session.refresh_job_status().await.map(|_| ()),
        Command::Health => session.check_health().await.map(|_| ()),
        command if command.needs_backend() => {
            guarded(submit(session, command), input, view, &mut std::io::stdout()).await
        }
        _ => Ok(()),
    };

    match outcome {
        // failures from the backend arrive as notifications
        Err(e) if e.is_request_failure() => {}
        Err(ClientError::EmptyQuestion) => {}
        Err(e) => println!("{}", rejection(&e)),
        Ok(()) => {}
    }
}

async fn submit(session: &mut DocumentSession, command: Command) -> pdf_chat_client::Result<()> {
    match command {
        Command::Upload => session.submit_upload().await,
        Command::Ask(text) => {
            session.set_question(text);
            session.submit_draft().await
        }
        _ => Ok(()),
    }
}

/// Runs one backend request while still reading input, refusing every
/// submission until the request settles.
async fn guarded<F, R, W>(request: F, input: &mut Input<R>, view: &watch::Receiver<SessionView>, out: &mut W) -> F::Output
where
    F: Future,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    tokio::pin!(request);

    loop {
        let reading = input.open;
        tokio::select! {
            outcome = &mut request => return outcome,
            line = input.next_line(), if reading => {
                if line.is_some() {
                    let phase = view.borrow().phase;
                    writeln!(out, "{}", render::busy_hint(phase)).ok();
                }
            }
        }
    }
}

fn rejection(err: &ClientError) -> String {
    match err {
        ClientError::NoFileSelected => "Pick a PDF first with /open <path>".to_string(),
        ClientError::NotLoaded => "Upload the PDF with /upload before asking".to_string(),
        ClientError::AlreadyLoaded => "A PDF is already loaded for this session".to_string(),
        ClientError::NoJob => "The backend did not return a job id for this document".to_string(),
        other => other.to_string(),
    }
}

/// Prints transcript entries not shown yet, then any pending notifications.
fn flush_output(session: &mut DocumentSession, printed: &mut usize) {
    for message in &session.transcript().messages()[*printed..] {
        print!("{}", render::message(message));
    }
    *printed = session.transcript().len();

    for notification in session.drain_notifications() {
        println!("{}", render::notification(&notification));
    }
}
