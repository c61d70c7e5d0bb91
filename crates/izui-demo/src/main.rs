#![forbid(unsafe_code)]

//! IzenDoc call-log filter demo entry point.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::process;
use std::sync::Mutex;

use izui_core::event::Event;
use izui_demo::app::{App, AppConfig};
use izui_demo::cli;
use izui_demo::terminal::{self, TerminalSession};
use izui_i18n::{I18nError, StringCatalog};
use izui_render::frame::Frame;
use izui_style::{Theme, ThemeMode};
use izui_widgets::multi_select::default_catalog;
use izui_widgets::multi_select::strings::ALL_KEYS;
use tracing_subscriber::EnvFilter;

/// Why the catalog could not be prepared.
#[derive(Debug)]
enum StringsError {
    Read(io::Error),
    Parse(I18nError),
}

impl std::fmt::Display for StringsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "cannot read strings file: {err}"),
            Self::Parse(err) => write!(f, "invalid strings file: {err}"),
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(io::Error::other)
}

fn build_catalog(locale: &str, strings: Option<&Path>) -> Result<StringCatalog, StringsError> {
    let mut catalog = default_catalog().clone();
    if let Some(path) = strings {
        let text = fs::read_to_string(path).map_err(StringsError::Read)?;
        catalog.load_locale(locale, &text).map_err(StringsError::Parse)?;
        tracing::info!(locale, path = %path.display(), "strings loaded");
    }
    let missing = catalog.missing_keys(locale, &ALL_KEYS);
    if !missing.is_empty() {
        tracing::warn!(locale, ?missing, "locale falls back for some strings");
    }
    Ok(catalog)
}

fn run(mut app: App, mouse: bool) -> io::Result<()> {
    let session = TerminalSession::new(mouse)?;
    let mut stdout = io::stdout();
    let (mut width, mut height) = session.size()?;

    loop {
        let mut frame = Frame::with_hit_grid(width, height);
        app.render(&mut frame);
        terminal::present(&mut stdout, &frame)?;
        if app.should_quit() {
            break;
        }

        let Some(event) = Event::from_crossterm(crossterm::event::read()?) else {
            continue;
        };
        if let Event::Resize {
            width: w,
            height: h,
        } = event
        {
            width = w;
            height = h;
            terminal::clear(&mut stdout)?;
            tracing::debug!(width, height, "resized");
            continue;
        }
        app.handle(&event);
    }

    drop(session);
    Ok(())
}

fn main() {
    let opts = cli::Opts::parse();

    if let Some(path) = opts.log_file.as_deref()
        && let Err(err) = init_logging(path)
    {
        eprintln!("Failed to open log file {}: {err}", path.display());
        process::exit(1);
    }

    let catalog = match build_catalog(&opts.locale, opts.strings.as_deref()) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    let mode = ThemeMode::detect();
    tracing::info!(?mode, locale = %opts.locale, max_chips = opts.max_chips, "starting demo");
    let app = App::new(AppConfig {
        status_searchable: opts.searchable,
        max_chips: opts.max_chips,
        locale: opts.locale.clone(),
        catalog,
        theme: Theme::for_mode(mode),
    });

    if let Err(err) = run(app, opts.mouse) {
        eprintln!("Runtime error: {err}");
        process::exit(1);
    }
}
