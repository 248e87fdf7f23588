use treeline::app::{App, AppEvent};
use treeline::cli::{parse_args, print_usage, print_version, CliCommand};
use treeline::error::TreelineError;
use treeline::pager::Pager;
use treeline::render::render_line;
use treeline::session::Session;
use treeline::terminal::{setup_panic_hook, TerminalManager};
use treeline::ui;

use color_eyre::Result;
use crossterm::event::EventStream;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    match parse_args(std::env::args()) {
        CliCommand::Version => {
            print_version();
            Ok(())
        }
        CliCommand::Usage => {
            print_usage();
            Ok(())
        }
        CliCommand::View(path) => run(path).await,
    }
}

/// Optional file logging: set TREELINE_LOG to a path to capture traces,
/// filtered by RUST_LOG. Logging to stdout would corrupt the TUI.
fn init_logging() {
    let Ok(path) = std::env::var("TREELINE_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(path) else {
        return;
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("treeline=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}

async fn run(path: PathBuf) -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let mut pager = Pager::new(Box::new(render_line));
    let mut session = match Session::open(&path).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    // The validation gate runs before the terminal is touched: a rejected
    // file prints its message to a normal shell, never a torn-down TUI.
    if let Err(e) = session.wait_until_valid(&mut pager).await {
        eprintln!("{}", TreelineError::from(e).user_message());
        std::process::exit(1);
    }

    setup_panic_hook();
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(session, pager);
    let mut events = EventStream::new();

    while app.is_running() {
        manager
            .terminal()
            .draw(|frame| ui::render(frame, &mut app))?;

        let event = if app.stream_open() {
            tokio::select! {
                input = events.next() => match input {
                    Some(Ok(ev)) => AppEvent::Input(ev),
                    Some(Err(_)) | None => break,
                },
                batch = app.session.next_batch() => match batch {
                    Some(batch) => AppEvent::Batch(batch),
                    None => AppEvent::StreamClosed,
                },
            }
        } else {
            match events.next().await {
                Some(Ok(ev)) => AppEvent::Input(ev),
                _ => break,
            }
        };
        app.handle_event(event);
    }

    Ok(())
}
