use super::*;

use tracing::warn;

use crate::config_file::ConfigFile;
use crate::error::ConfigFileError;

const INPUT_LIMIT: usize = 500;
// Title, blank, two action rows, blank above the description; indicator,
// blank and help below it, plus one spare row.
const CHROME_ROWS: u16 = 9;
const MARGIN: u16 = 2;

pub(super) fn viewport_height_for(height: u16) -> usize {
    usize::from(height.saturating_sub(CHROME_ROWS).max(1))
}

pub(super) struct DetailState {
    pub(super) entry: Option<ConfigEntry>,
    pub(super) input: TextInput,
    pub(super) editing: bool,
    pub(super) message: Option<String>,
    pub(super) is_error: bool,
    // A write for the current input is in flight.
    pending: bool,
    has_existing_value: bool,
    lines: Vec<String>,
    scroll: usize,
    width: u16,
    pub(super) viewport_height: usize,
}

impl DetailState {
    pub(super) fn new() -> Self {
        Self {
            entry: None,
            input: TextInput::with_limit(INPUT_LIMIT),
            editing: false,
            message: None,
            is_error: false,
            pending: false,
            has_existing_value: false,
            lines: Vec::new(),
            scroll: 0,
            width: 0,
            viewport_height: viewport_height_for(0),
        }
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.viewport_height = viewport_height_for(height);
        self.rewrap();
    }

    pub(super) fn show(&mut self, entry: ConfigEntry) {
        self.entry = Some(entry);
        self.editing = false;
        self.pending = false;
        self.message = None;
        self.is_error = false;
        self.input.set("");
        self.scroll = 0;
        self.rewrap();
    }

    fn rewrap(&mut self) {
        let width = usize::from(self.width.saturating_sub(MARGIN * 2).max(10));
        self.lines = self
            .entry
            .as_ref()
            .map(|entry| wrap_text(&entry.description, width))
            .unwrap_or_default();
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_height)
    }

    fn scroll_by(&mut self, delta: isize) {
        let next = self.scroll.saturating_add_signed(delta);
        self.scroll = next.min(self.max_scroll());
    }

    pub(super) fn handle_key(
        &mut self,
        key: KeyEvent,
        config: &ConfigFile,
        origin: Origin,
    ) -> Option<Job> {
        let title = self.entry.as_ref()?.title.clone();
        if self.editing {
            match key.code {
                KeyCode::Enter if self.pending => {}
                KeyCode::Enter => {
                    self.pending = true;
                    return Some(self.confirm(&title, origin));
                }
                KeyCode::Esc => self.editing = false,
                _ => {
                    self.input.handle_key(key);
                }
            }
            return None;
        }

        let half_page = (self.viewport_height / 2).max(1) as isize;
        match key.code {
            KeyCode::Enter => self.start_edit(&title, config),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-half_page),
            KeyCode::PageDown => self.scroll_by(half_page),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = self.max_scroll(),
            _ => {}
        }
        None
    }

    fn start_edit(&mut self, title: &str, config: &ConfigFile) {
        self.editing = true;
        self.message = None;
        self.is_error = false;
        let existing = config.get_value(title).unwrap_or_else(|err| {
            warn!(option = title, error = %err, "could not read current value");
            String::new()
        });
        self.has_existing_value = !existing.is_empty();
        if self.has_existing_value {
            self.input.set(&format!("{title} = {existing}"));
        } else {
            self.input.set(&format!("{title} = "));
        }
    }

    fn confirm(&self, title: &str, origin: Origin) -> Job {
        let value = self.input.value.clone();
        if is_blank_assignment(value.trim(), title) {
            Job::CommentOut {
                origin,
                key: title.to_string(),
            }
        } else {
            Job::AppendLine {
                origin,
                line: value,
            }
        }
    }

    pub(super) fn apply_appended(&mut self, result: Result<(), ConfigFileError>) {
        self.pending = false;
        match result {
            Ok(()) => self.finish("✓ Added to config file"),
            Err(err) => self.fail(&err),
        }
    }

    pub(super) fn apply_commented(&mut self, result: Result<bool, ConfigFileError>) {
        self.pending = false;
        match result {
            Ok(true) => self.finish("✓ Commented out from config file"),
            Ok(false) => self.finish("Option not found in config file"),
            Err(err) => self.fail(&err),
        }
    }

    fn finish(&mut self, message: &str) {
        self.message = Some(message.to_string());
        self.is_error = false;
        self.editing = false;
    }

    fn fail(&mut self, err: &ConfigFileError) {
        self.message = Some(format!("Error: {err}"));
        self.is_error = true;
    }
}

/// Input that means "remove this option" rather than "set it".
fn is_blank_assignment(trimmed: &str, key: &str) -> bool {
    if trimmed.is_empty() || trimmed == key {
        return true;
    }
    trimmed
        .strip_prefix(key)
        .is_some_and(|rest| rest == "=" || rest == " =")
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.lines() {
        if line.chars().count() <= width {
            out.push(line.to_string());
            continue;
        }
        let indent: String = line.chars().take_while(|ch| ch.is_whitespace()).collect();
        let mut current = String::new();
        let mut current_len = 0;
        for word in line.split_whitespace() {
            let word_len = word.chars().count();
            let sep = usize::from(current_len > 0);
            if current_len > 0 && current_len + sep + word_len > width {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len == 0 {
                let prefix = if out.is_empty() || indent.len() >= width {
                    ""
                } else {
                    indent.as_str()
                };
                current.push_str(prefix);
                current_len = prefix.chars().count();
            } else {
                current.push(' ');
                current_len += 1;
            }
            for ch in word.chars() {
                if current_len >= width {
                    out.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(ch);
                current_len += 1;
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    out
}

pub(super) fn render(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let detail = &state.detail;
    let Some(entry) = detail.entry.as_ref() else {
        frame.render_widget(Paragraph::new("No option selected"), area);
        return;
    };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(entry.title.clone(), title_style()))),
        row(area, 0, 1),
    );

    let action = row(area, 2, 1);
    let hint = row(area, 3, 1);
    if detail.editing {
        let input_line = Line::from(vec![
            Span::raw("  > "),
            Span::styled(detail.input.value.clone(), Style::default().fg(COLOR_SECONDARY)),
        ]);
        frame.render_widget(Paragraph::new(input_line), action);
        frame.set_cursor(action.x + 4 + detail.input.cursor as u16, action.y);
        let hint_line = match (&detail.message, detail.is_error) {
            (Some(message), true) => Line::from(Span::styled(
                format!("  {message}"),
                message_style(true),
            )),
            _ => {
                let mut text = "  Enter: save to config, Esc: cancel".to_string();
                if detail.has_existing_value {
                    text.push_str(" | Clear value to comment out");
                }
                Line::from(Span::styled(text, muted_style()))
            }
        };
        frame.render_widget(Paragraph::new(hint_line), hint);
    } else if let Some(message) = &detail.message {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("  {message}"),
                message_style(detail.is_error),
            ))),
            action,
        );
    } else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("  ➤ ○ Open Editor For `{}`", entry.title),
                Style::default().fg(COLOR_PRIMARY),
            ))),
            action,
        );
    }

    let body_rows = area.height.saturating_sub(8);
    let viewport_rows = detail.viewport_height.min(usize::from(body_rows));
    let body = row(area, 5, viewport_rows as u16);
    let body = Rect {
        x: body.x + MARGIN,
        width: body.width.saturating_sub(MARGIN),
        ..body
    };
    let lines: Vec<Line> = detail
        .lines
        .iter()
        .skip(detail.scroll)
        .take(viewport_rows)
        .map(|line| Line::from(Span::styled(line.clone(), Style::default().fg(COLOR_TEXT))))
        .collect();
    frame.render_widget(Paragraph::new(lines), body);

    if detail.scroll < detail.max_scroll() {
        let indicator = row(area, 5 + viewport_rows as u16, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("↓ scroll for more", muted_style())))
                .alignment(ratatui::layout::Alignment::Right),
            indicator,
        );
    }

    let help = if detail.editing {
        "enter: save • esc: cancel"
    } else {
        "enter: edit • ↑/↓: scroll • pgup/pgdn: page • esc: back • q: quit"
    };
    frame.render_widget(help_line(help), row(area, area.height.saturating_sub(1), 1));
}
