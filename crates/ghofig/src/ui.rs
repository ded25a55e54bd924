//! Full-screen browser for Ghostty configuration options.

use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use tracing::{debug, info};

use crate::config_file::ConfigFile;
use crate::settings::Settings;
use crate::store::{ConfigEntry, LookupStore};

mod detail;
mod editor;
mod input;
mod menu;
mod render;
mod search;
mod state;
mod worker;

use detail::DetailState;
use editor::EditorState;
use menu::MenuState;
use search::SearchState;
use worker::{Completion, Dispatch, Job, Origin, Worker};

const COLOR_PRIMARY: Color = Color::Rgb(0, 112, 243);
const COLOR_SECONDARY: Color = Color::Rgb(82, 168, 255);
const COLOR_MUTED: Color = Color::Rgb(135, 135, 135);
const COLOR_TEXT: Color = Color::Rgb(237, 237, 237);
const COLOR_SUCCESS: Color = Color::Rgb(70, 167, 88);
const COLOR_ERROR: Color = Color::Rgb(229, 72, 77);
const COLOR_CURSOR_LINE: Color = Color::Rgb(41, 41, 41);

/// Screen the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum View {
    Menu,
    Search,
    Detail,
    Editor,
}

/// Single-line text input with a character cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TextInput {
    value: String,
    cursor: usize,
    limit: usize,
}

impl TextInput {
    fn with_limit(limit: usize) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            limit,
        }
    }

    fn set(&mut self, text: &str) {
        self.value = text.chars().take(self.limit).collect();
        self.cursor = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(idx, _)| idx)
    }

    /// Apply an editing key. Returns `true` when the value changed.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                if self.cursor == 0 {
                    return false;
                }
                let end = self.byte_index(self.cursor);
                self.value.replace_range(..end, "");
                self.cursor = 0;
                true
            }
            KeyCode::Char(ch)
                if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) && !ch.is_control() =>
            {
                if self.char_len() >= self.limit {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.insert(at, ch);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let at = self.byte_index(self.cursor - 1);
                self.value.remove(at);
                self.cursor -= 1;
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_len() {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                false
            }
            _ => false,
        }
    }
}

/// Epoch counters so results for discarded screens can be recognised.
#[derive(Debug, Default, Clone, Copy)]
struct Epochs {
    search: u64,
    detail: u64,
    editor: u64,
}

struct UiState {
    view: View,
    width: u16,
    height: u16,
    config: ConfigFile,
    epochs: Epochs,
    menu: MenuState,
    search: SearchState,
    detail: DetailState,
    editor: EditorState,
}

impl UiState {
    fn new(config: ConfigFile, width: u16, height: u16) -> Self {
        let epochs = Epochs::default();
        let mut state = Self {
            view: View::Menu,
            width,
            height,
            config,
            epochs,
            menu: MenuState::new(),
            search: SearchState::new(),
            detail: DetailState::new(),
            editor: EditorState::new(),
        };
        state.resize(width, height);
        state
    }

    fn origin(&self, view: View) -> Origin {
        let epoch = match view {
            View::Menu => 0,
            View::Search => self.epochs.search,
            View::Detail => self.epochs.detail,
            View::Editor => self.epochs.editor,
        };
        Origin { view, epoch }
    }

    fn resize(&mut self, width: u16, height: u16) {
        state::resize(self, width, height);
    }
}

pub fn run_ui(store: LookupStore, config: ConfigFile, settings: &Settings) -> anyhow::Result<()> {
    let mut worker = Worker::spawn(store, config.clone())?;
    let tick = settings.tick;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    let mut state = UiState::new(config, size.width, size.height);
    info!(width = size.width, height = size.height, "ui started");

    let result = (|| {
        loop {
            while let Some(done) = worker.try_completion() {
                apply_completion(&mut state, done);
            }

            terminal.draw(|frame| render_ui(frame.size(), frame, &state))?;

            if event::poll(tick)? {
                match event::read()? {
                    Event::Key(key) => {
                        if handle_key(key, &mut state, &mut worker) {
                            break;
                        }
                    }
                    Event::Resize(width, height) => state.resize(width, height),
                    _ => {}
                }
            }
        }
        Ok(())
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("ui stopped");
    result
}

fn handle_key(key: KeyEvent, state: &mut UiState, jobs: &mut impl Dispatch) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    input::handle_key(key, state, jobs)
}

fn apply_completion(state: &mut UiState, done: Completion) {
    let origin = done.origin();
    if origin != state.origin(origin.view) {
        debug!(?origin, "dropping result for a discarded screen");
        return;
    }
    state::apply_completion(state, done);
}

fn render_ui(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    render::render_ui(area, frame, state);
}

fn title_style() -> Style {
    Style::default()
        .fg(COLOR_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

fn muted_style() -> Style {
    Style::default().fg(COLOR_MUTED)
}

fn message_style(is_error: bool) -> Style {
    Style::default().fg(if is_error { COLOR_ERROR } else { COLOR_SUCCESS })
}

fn help_line(text: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(text.to_string(), muted_style())))
}

fn row(area: Rect, offset: u16, height: u16) -> Rect {
    let y = area.y.saturating_add(offset).min(area.bottom());
    Rect {
        x: area.x,
        y,
        width: area.width,
        height: height.min(area.bottom().saturating_sub(y)),
    }
}

/// Split `text` into spans, styling case-insensitive matches of `query`.
fn highlight_spans(text: &str, query: &str, base: Style, matched: Style) -> Vec<Span<'static>> {
    if query.is_empty() {
        return vec![Span::styled(text.to_string(), base)];
    }
    let lower = text.to_ascii_lowercase();
    let needle = query.to_ascii_lowercase();
    let mut spans = Vec::new();
    let mut last = 0;
    while let Some(found) = lower[last..].find(&needle) {
        let start = last + found;
        let end = start + needle.len();
        if start > last {
            spans.push(Span::styled(text[last..start].to_string(), base));
        }
        spans.push(Span::styled(text[start..end].to_string(), matched));
        last = end;
    }
    if last < text.len() {
        spans.push(Span::styled(text[last..].to_string(), base));
    }
    spans
}
