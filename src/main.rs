use color_eyre::{Result, eyre::WrapErr};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::Path;

use neon_assault::Settings;
use neon_assault::app::App;
use neon_assault::assets::load_hud_font;

fn init_logging(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file)
        .wrap_err_with(|| format!("opening log file {}", log_file.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let settings_path = Settings::resolve_path();
    let loaded = settings_path
        .as_deref()
        .map(Settings::load_from)
        .transpose();
    let settings = match &loaded {
        Ok(Some(settings)) => settings.clone(),
        _ => Settings::default(),
    };

    init_logging(&settings.log_file)?;
    log::info!("Neon Assault starting...");
    if let Err(err) = &loaded {
        log::warn!("Using default settings: {err:#}");
    }

    let font = load_hud_font(&settings.font_path);

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    log::info!("Keyboard enhancement supported: {supports_keyboard_enhancement}");

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = App::new(&settings, font.as_ref(), supports_keyboard_enhancement).run(&mut terminal);

    // Cleanup runs every step even when one fails
    let cleanup = first_error([
        disable_raw_mode(),
        execute!(terminal.backend_mut(), LeaveAlternateScreen),
        if supports_keyboard_enhancement {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
        } else {
            Ok(())
        },
        terminal.show_cursor(),
    ]);

    result?;
    cleanup.wrap_err("restoring terminal")
}

/// The first failure among steps that have all already run
fn first_error(steps: impl IntoIterator<Item = std::io::Result<()>>) -> std::io::Result<()> {
    steps.into_iter().fold(Ok(()), |acc, step| acc.and(step))
}
