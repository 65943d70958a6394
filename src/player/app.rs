//! Terminal UI state and control flow.
//!
//! The left pane lists the music directory with a "play all" entry on top;
//! the right pane shows what the engine is doing. Key handling produces an
//! `Action`, which the event loop applies to the engine.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    error::Error,
    io,
    path::PathBuf,
    time::{Duration, Instant},
};
use twindeck::config::Config;
use twindeck::engine::{Engine, OutputDriver, PlaybackStatus, PlayerError};
use twindeck::library::{scan_directory, track_title};

use super::{Target, init_logging, resolve_target, ui};

const MESSAGE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    PlayAll,
    PlayFile(PathBuf),
    TogglePause,
    Next,
    Previous,
    Stop,
    Quit,
}

pub struct App {
    pub should_quit: bool,
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
    /// 0 is the "play all" entry, `n` is `files[n - 1]`
    pub selected: usize,
    pub status: PlaybackStatus,
    pub message: Option<String>,
    message_timer: Option<Instant>,
}

impl App {
    pub fn new(directory: PathBuf, files: Vec<PathBuf>) -> Self {
        Self {
            should_quit: false,
            directory,
            files,
            selected: 0,
            status: PlaybackStatus::default(),
            message: None,
            message_timer: None,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.files.len() + 1
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entry_count() {
            self.selected += 1;
        }
    }

    /// Action for the highlighted entry
    pub fn activate(&self) -> Action {
        match self.selected {
            0 => Action::PlayAll,
            n => Action::PlayFile(self.files[n - 1].clone()),
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Enter => Some(self.activate()),
            KeyCode::Char(' ') => Some(Action::TogglePause),
            KeyCode::Char('.') => Some(Action::Next),
            KeyCode::Char(',') => Some(Action::Previous),
            KeyCode::Char('s') => Some(Action::Stop),
            _ => None,
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.message_timer = Some(Instant::now());
    }

    fn expire_message(&mut self) {
        if let Some(timer) = self.message_timer
            && timer.elapsed() > MESSAGE_TIMEOUT
        {
            self.message = None;
            self.message_timer.take();
        }
    }

    /// Whether `files[index]` is the track currently loaded
    pub fn is_playing_entry(&self, index: usize) -> bool {
        self.status.current_path.as_ref() == self.files.get(index)
    }

    pub fn apply<D: OutputDriver>(&mut self, engine: &mut Engine<D>, action: Action) {
        let result = match &action {
            Action::PlayAll => engine.play_playlist(&self.files),
            Action::PlayFile(path) => engine.play_file(path),
            Action::TogglePause => {
                engine.toggle_pause();
                Ok(())
            }
            Action::Next => engine.skip_next(),
            Action::Previous => engine.skip_previous(),
            Action::Stop => engine.stop(),
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
        };

        match result {
            Ok(()) => {}
            Err(PlayerError::EmptyPlaylist) => {
                self.set_message(format!("No audio files in {}", self.directory.display()));
            }
            Err(e @ PlayerError::NotSkippable(_)) => self.set_message(e.to_string()),
            Err(e) => {
                error!("{action:?} failed: {e}");
                self.set_message(e.to_string());
            }
        }
        self.status = engine.status();
    }
}

pub fn run(path: Option<&str>) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    init_logging(&config)?;
    info!("Starting twindeck");

    let target = resolve_target(path, &config)?;
    let directory = target.directory();
    let files = match scan_directory(&directory, config.show_hidden) {
        Ok(files) => files,
        Err(e) => {
            warn!("Could not scan directory: {e}");
            Vec::new()
        }
    };

    // Open the device before touching the terminal so a failure prints cleanly
    let mut engine = Engine::with_default_device(config.sample_rate, config.channels)?;
    let mut app = App::new(directory, files);

    if let Target::File(file) = &target {
        if let Some(position) = app.files.iter().position(|f| f == file) {
            app.selected = position + 1;
        }
        app.apply(&mut engine, Action::PlayFile(file.clone()));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &mut engine);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    engine.shutdown()?;

    if let Err(e) = &res {
        eprintln!("Error: {e}");
    }
    res
}

fn run_app<B: ratatui::backend::Backend, D: OutputDriver>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    engine: &mut Engine<D>,
) -> Result<(), Box<dyn Error>> {
    let mut shown = None;
    loop {
        app.status = engine.status();
        if let Some(e) = engine.take_preload_failure() {
            warn!("Preload failed: {e}");
            app.set_message(e.to_string());
        }
        if app.status.current_path != shown {
            if let Some(path) = &app.status.current_path {
                info!("Showing {}", track_title(path));
            }
            shown = app.status.current_path.clone();
        }
        app.expire_message();

        terminal.draw(|f| ui::draw(f, app))?;

        // Poll with a short timeout so track changes show up promptly
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = app.handle_key(key.code)
        {
            app.apply(engine, action);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
