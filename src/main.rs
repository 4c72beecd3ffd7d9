mod app;
mod clock;
mod domain;
mod i18n;
mod input;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::Local;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use i18n::{resolve_language, Translator};
use notifications::TerminalCue;
use persistence::{data_dir, ensure_dir, log_file, JsonStore, Store};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kidstimer")]
#[command(about = "A colourful task timer for children, with a clock that shows the time left", long_about = None)]
struct Cli {
    /// Directory for tasks and settings. Defaults to ~/.kidstimer
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// UI language (de or en). Saved for the next run.
    #[arg(long)]
    lang: Option<String>,

    /// Turn autoplay on or off. Saved for the next run.
    #[arg(long)]
    autoplay: Option<bool>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the saved tasks
    List,
    /// Mark every saved task as not done
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dir = data_dir(cli.data_dir.as_deref())?;
    ensure_dir(&dir)?;
    init_logging(&dir);

    let store = JsonStore::new(&dir);

    match cli.command {
        Some(Commands::List) => {
            list_tasks(&store);
            Ok(())
        }
        Some(Commands::Reset) => {
            let mut tasks = store.load_tasks();
            for task in &mut tasks {
                task.completed = false;
            }
            store.save_tasks(&tasks)?;
            println!("Reset {} tasks in {}", tasks.len(), dir.display());
            Ok(())
        }
        None => run_tui(store, cli.lang, cli.autoplay),
    }
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(dir: &Path) {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let path = std::env::var_os("KIDSTIMER_LOG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| log_file(dir));

    // Without a writable log file we run silently
    if let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
    }
}

fn list_tasks(store: &JsonStore) {
    let settings = store.load_settings();
    let env_lang = std::env::var("LANG").ok();
    let translator = Translator::new(resolve_language(settings.lang.as_deref(), env_lang.as_deref()));

    let tasks = store.load_tasks();
    if tasks.is_empty() {
        println!("{}", translator.t("tasks.empty"));
        return;
    }
    for task in tasks {
        let status = if task.completed { "✓" } else { " " };
        println!(
            "[{}] {}  {} {}  {}",
            status,
            task.name,
            task.duration_minutes,
            translator.t("task.minutes"),
            task.color
        );
    }
}

fn run_tui(store: JsonStore, lang: Option<String>, autoplay: Option<bool>) -> Result<()> {
    tracing::info!(dir = %store.dir().display(), "starting");

    let tasks = store.load_tasks();
    let mut settings = store.load_settings();
    let mut settings_changed = false;
    if let Some(lang) = lang {
        settings.lang = Some(lang);
        settings_changed = true;
    }
    if let Some(autoplay) = autoplay {
        settings.autoplay = autoplay;
        settings_changed = true;
    }

    let env_lang = std::env::var("LANG").ok();
    let translator = Translator::new(resolve_language(settings.lang.as_deref(), env_lang.as_deref()));
    tracing::info!(lang = translator.lang(), "language selected");

    let mut app = AppState::new(
        tasks,
        settings,
        translator,
        Box::new(store),
        Box::new(TerminalCue),
    );
    app.settings_need_save = settings_changed;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = app.save() {
        tracing::error!(error = %e, "failed to save on exit");
        eprintln!("Error saving state: {}", e);
    }

    if let Err(err) = result {
        tracing::error!(error = %err, "exited with error");
        eprintln!("Error: {}", err);
    }

    tracing::info!("stopped");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let frame_rate = ticker::frame_duration();

    loop {
        // Handle events with timeout so frames keep coming
        if event::poll(frame_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key, Local::now()) {
                    return Ok(());
                }
            }
        }

        let now = Local::now();
        app.frame(now);

        terminal
            .draw(|f| ui::render(f, app, now))
            .context("Failed to draw frame")?;

        // Autosave if needed; a failed write keeps its flag and is retried next frame
        if let Err(e) = app.save() {
            tracing::error!(error = %e, "failed to save");
        }
    }
}
