use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{poll as event_poll, read as event_read, Event as CrosstermEvent};
use paraload::app::App;
use paraload::config::Config;
use paraload::model::dir_size;
use paraload::model::filesystem::{FileSystem, StdFileSystem};
use paraload::services::roots::{RootsProvider, SystemRoots};
use paraload::services::terminal_modes::{self, TerminalModes};
use paraload::services::{log_dirs, tracing_setup};
use ratatui::Terminal;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Browse to a directory and download a URL into it
#[derive(Parser, Debug)]
#[command(name = "paraload")]
#[command(about = "A terminal file picker that downloads a URL into the directory you browse to", long_about = None)]
#[command(version)]
struct Args {
    /// Directory to select at startup (default: config start_dir, else the current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// URL to prefill
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file (default: the state directory, see --show-paths)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print the paths paraload uses and exit
    #[arg(long)]
    show_paths: bool,

    /// Print the total size of PATH in bytes and exit
    #[arg(long, value_name = "PATH")]
    size: Option<PathBuf>,
}

fn main() -> AnyhowResult<ExitCode> {
    let args = Args::parse();

    if args.show_paths {
        log_dirs::print_all_paths(args.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(path) = &args.size {
        return Ok(print_size(path));
    }

    let config = Config::load(args.config.as_deref(), Config::default_path())
        .context("Failed to load configuration")?;

    if args.dump_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    let log_file = args.log_file.clone().unwrap_or_else(log_dirs::main_log_path);
    tracing_setup::init_global(&log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
    log_dirs::cleanup_stale_logs();
    tracing::info!("paraload starting");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let roots = SystemRoots::new()
        .with_extra(config.explorer.extra_roots.clone())
        .roots();
    let start_dir = resolve_start_dir(fs.as_ref(), &args, &config)?;

    let mut app = App::new(config, fs, roots);
    if let Some(url) = &args.url {
        app.set_url(url);
    }
    app.start_at(&start_dir);

    let mut terminal_modes = TerminalModes::enable().context("Failed to set up the terminal")?;
    let backend = ratatui::backend::CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.clear()?;

    let result = run_event_loop(&mut app, &mut terminal);

    terminal_modes.undo();
    result?;

    if let Some(chosen) = app.chosen() {
        println!("{}", chosen);
    }
    tracing::info!("paraload exiting");
    Ok(ExitCode::SUCCESS)
}

/// `--size`: report `total_size` without starting the UI
fn print_size(path: &Path) -> ExitCode {
    let size = dir_size::total_size(path);
    println!("{}", size.bytes);
    match size.error {
        None => ExitCode::SUCCESS,
        Some(e) => {
            eprintln!("Error: size of {} is incomplete: {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn resolve_start_dir(fs: &dyn FileSystem, args: &Args, config: &Config) -> AnyhowResult<PathBuf> {
    let requested = match args.dir.clone().or_else(|| config.explorer.start_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    // Paths are matched as strings against the tree, so make them absolute
    // and free of `..` first
    match fs.canonicalize(&requested) {
        Ok(dir) => Ok(dir),
        Err(e) => {
            tracing::warn!("Cannot canonicalize {:?}: {}", requested, e);
            Ok(requested)
        }
    }
}

fn run_event_loop(
    app: &mut App,
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
) -> AnyhowResult<()> {
    const FRAME_DURATION: Duration = Duration::from_millis(16); // 60fps
    let mut last_render = Instant::now();
    let mut needs_render = true;

    loop {
        // Download results arrive from the worker thread
        if app.process_async_messages() {
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }

        if needs_render && last_render.elapsed() >= FRAME_DURATION {
            terminal.draw(|frame| app.render(frame))?;
            last_render = Instant::now();
            needs_render = false;
        }

        let timeout = if needs_render {
            FRAME_DURATION.saturating_sub(last_render.elapsed())
        } else {
            Duration::from_millis(50)
        };
        if !event_poll(timeout)? {
            continue;
        }

        match event_read()? {
            CrosstermEvent::Key(key_event) => {
                app.handle_key(key_event);
                needs_render = true;
            }
            CrosstermEvent::Mouse(mouse_event) => {
                if app.handle_mouse(mouse_event) {
                    needs_render = true;
                }
            }
            CrosstermEvent::Resize(_, _) => {
                needs_render = true;
            }
            CrosstermEvent::Paste(text) => {
                app.paste_text(&text);
                needs_render = true;
            }
            _ => {}
        }
    }

    Ok(())
}
