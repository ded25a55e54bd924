use super::*;

use crate::error::ConfigFileError;

// Title, path and a blank row above the buffer; status and help below.
const CHROME_ROWS: u16 = 5;
const TAB: &str = "  ";

pub(super) fn viewport_height_for(height: u16) -> usize {
    usize::from(height.saturating_sub(CHROME_ROWS).max(1))
}

/// Multi-line text buffer with a (row, char column) cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TextBuffer {
    lines: Vec<String>,
    row: usize,
    col: usize,
    top: usize,
    left: usize,
}

impl TextBuffer {
    fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            top: 0,
            left: 0,
        }
    }

    pub(super) fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.row = 0;
        self.col = 0;
        self.top = 0;
        self.left = 0;
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |line| line.chars().count())
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices().nth(col).map_or(line.len(), |(idx, _)| idx)
    }

    fn insert_str(&mut self, text: &str) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.col);
        line.insert_str(at, text);
        self.col += text.chars().count();
    }

    fn split_line(&mut self) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.col);
        let rest = line.split_off(at);
        self.row += 1;
        self.col = 0;
        self.lines.insert(self.row, rest);
    }

    fn backspace(&mut self) -> bool {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
            return true;
        }
        if self.row == 0 {
            return false;
        }
        let current = self.lines.remove(self.row);
        self.row -= 1;
        self.col = self.line_len(self.row);
        self.lines[self.row].push_str(&current);
        true
    }

    fn delete(&mut self) -> bool {
        if self.col < self.line_len(self.row) {
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.col);
            line.remove(at);
            return true;
        }
        if self.row + 1 >= self.lines.len() {
            return false;
        }
        let next = self.lines.remove(self.row + 1);
        self.lines[self.row].push_str(&next);
        true
    }

    fn move_vertical(&mut self, delta: isize) {
        let last = self.lines.len().saturating_sub(1);
        self.row = self.row.saturating_add_signed(delta).min(last);
        self.col = self.col.min(self.line_len(self.row));
    }

    fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    /// Apply an editing or movement key. Returns `true` when the text changed.
    fn handle_key(&mut self, key: KeyEvent, page: usize) -> bool {
        let modified = key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::ALT);
        let page = page.max(1) as isize;
        match key.code {
            KeyCode::Char(ch) if !modified && !ch.is_control() => {
                let mut buf = [0u8; 4];
                self.insert_str(ch.encode_utf8(&mut buf));
                true
            }
            KeyCode::Tab => {
                self.insert_str(TAB);
                true
            }
            KeyCode::Enter => {
                self.split_line();
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Up => {
                self.move_vertical(-1);
                false
            }
            KeyCode::Down => {
                self.move_vertical(1);
                false
            }
            KeyCode::PageUp => {
                self.move_vertical(-page);
                false
            }
            KeyCode::PageDown => {
                self.move_vertical(page);
                false
            }
            KeyCode::Home => {
                self.col = 0;
                false
            }
            KeyCode::End => {
                self.col = self.line_len(self.row);
                false
            }
            _ => false,
        }
    }

    /// Scroll so the cursor is inside a `rows` x `cols` window.
    fn follow_cursor(&mut self, rows: usize, cols: usize) {
        let rows = rows.max(1);
        let cols = cols.max(1);
        if self.row < self.top {
            self.top = self.row;
        } else if self.row >= self.top + rows {
            self.top = self.row + 1 - rows;
        }
        if self.col < self.left {
            self.left = self.col;
        } else if self.col >= self.left + cols {
            self.left = self.col + 1 - cols;
        }
    }
}

pub(super) struct EditorState {
    pub(super) buffer: TextBuffer,
    loaded: bool,
    pub(super) path: Option<String>,
    pub(super) message: Option<String>,
    is_error: bool,
    saved_text: String,
    pending_save: Option<String>,
    width: u16,
    pub(super) viewport_height: usize,
}

impl EditorState {
    pub(super) fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
            loaded: false,
            path: None,
            message: None,
            is_error: false,
            saved_text: String::new(),
            pending_save: None,
            width: 0,
            viewport_height: viewport_height_for(0),
        }
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.viewport_height = viewport_height_for(height);
        let cols = self.text_columns();
        self.buffer.follow_cursor(self.viewport_height, cols);
    }

    pub(super) fn is_modified(&self) -> bool {
        self.loaded && self.buffer.text() != self.saved_text
    }

    fn gutter_width(&self) -> usize {
        self.buffer.lines.len().to_string().len().max(3) + 1
    }

    fn text_columns(&self) -> usize {
        usize::from(self.width).saturating_sub(self.gutter_width())
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent, origin: Origin) -> Option<Job> {
        if !self.loaded {
            return None;
        }
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            let content = self.buffer.text();
            self.pending_save = Some(content.clone());
            return Some(Job::SaveFile { origin, content });
        }
        if self.buffer.handle_key(key, self.viewport_height) {
            self.message = None;
        }
        let cols = self.text_columns();
        self.buffer.follow_cursor(self.viewport_height, cols);
        None
    }

    pub(super) fn apply_loaded(&mut self, result: Result<String, ConfigFileError>) {
        match result {
            Ok(text) => {
                self.buffer.set_text(&text);
                self.saved_text = text;
                self.loaded = true;
                self.message = None;
                self.is_error = false;
            }
            Err(err) => {
                self.message = Some(format!("Error loading config: {err}"));
                self.is_error = true;
            }
        }
    }

    pub(super) fn apply_saved(&mut self, result: Result<(), ConfigFileError>) {
        let saved = self.pending_save.take();
        match result {
            Ok(()) => {
                self.saved_text = saved.unwrap_or_else(|| self.buffer.text());
                self.message = Some("Saved successfully".to_string());
                self.is_error = false;
            }
            Err(err) => {
                self.message = Some(format!("Error saving: {err}"));
                self.is_error = true;
            }
        }
    }
}

pub(super) fn render(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let editor = &state.editor;

    let mut title = vec![Span::styled("Config Editor", title_style())];
    if editor.is_modified() {
        title.push(Span::styled("  [modified]", Style::default().fg(COLOR_SECONDARY)));
    }
    frame.render_widget(Paragraph::new(Line::from(title)), row(area, 0, 1));
    let path = editor.path.as_deref().unwrap_or("(no config path)");
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(path.to_string(), muted_style()))),
        row(area, 1, 1),
    );

    let rows = editor
        .viewport_height
        .min(usize::from(area.height.saturating_sub(CHROME_ROWS)));
    let body = row(area, 3, rows as u16);
    if editor.loaded {
        let buffer = &editor.buffer;
        let gutter = editor.gutter_width();
        let cols = usize::from(body.width).saturating_sub(gutter);
        let lines: Vec<Line> = buffer
            .lines
            .iter()
            .enumerate()
            .skip(buffer.top)
            .take(rows)
            .map(|(index, text)| {
                let visible: String = text.chars().skip(buffer.left).take(cols).collect();
                let number = format!("{:>width$} ", index + 1, width = gutter - 1);
                let mut line = Line::from(vec![
                    Span::styled(number, muted_style()),
                    Span::styled(visible, Style::default().fg(COLOR_TEXT)),
                ]);
                if index == buffer.row {
                    line.style = Style::default().bg(COLOR_CURSOR_LINE);
                }
                line
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), body);
        if buffer.row >= buffer.top && buffer.row < buffer.top + rows {
            let x = body.x + (gutter + buffer.col.saturating_sub(buffer.left)) as u16;
            let y = body.y + (buffer.row - buffer.top) as u16;
            frame.set_cursor(x.min(body.right().saturating_sub(1)), y);
        }
    } else if editor.message.is_none() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("Loading...", muted_style()))),
            body,
        );
    }

    if let Some(message) = &editor.message {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                message.clone(),
                message_style(editor.is_error),
            ))),
            row(area, area.height.saturating_sub(2), 1),
        );
    }
    frame.render_widget(
        help_line("Ctrl+S: save | Esc: back to menu"),
        row(area, area.height.saturating_sub(1), 1),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(buffer: &mut TextBuffer, code: KeyCode) -> bool {
        buffer.handle_key(KeyEvent::from(code), 10)
    }

    #[test]
    fn text_round_trips_trailing_newline() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("a = 1\nb = 2\n");
        assert_eq!(buffer.lines.len(), 3);
        assert_eq!(buffer.text(), "a = 1\nb = 2\n");
        buffer.set_text("");
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn enter_and_backspace_split_and_join_lines() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("keybind");
        for _ in 0..3 {
            press(&mut buffer, KeyCode::Right);
        }
        assert!(press(&mut buffer, KeyCode::Enter));
        assert_eq!(buffer.text(), "key\nbind");
        assert_eq!((buffer.row, buffer.col), (1, 0));
        assert!(press(&mut buffer, KeyCode::Backspace));
        assert_eq!(buffer.text(), "keybind");
        assert_eq!((buffer.row, buffer.col), (0, 3));
        press(&mut buffer, KeyCode::Home);
        assert!(!press(&mut buffer, KeyCode::Backspace));
    }

    #[test]
    fn delete_at_line_end_pulls_next_line_up() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("a\nb");
        press(&mut buffer, KeyCode::End);
        assert!(press(&mut buffer, KeyCode::Delete));
        assert_eq!(buffer.text(), "ab");
        press(&mut buffer, KeyCode::End);
        assert!(!press(&mut buffer, KeyCode::Delete));
    }

    #[test]
    fn vertical_moves_clamp_column_and_wrap_horizontally() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("long line\nab\nlonger line");
        press(&mut buffer, KeyCode::End);
        press(&mut buffer, KeyCode::Down);
        assert_eq!((buffer.row, buffer.col), (1, 2));
        press(&mut buffer, KeyCode::Right);
        assert_eq!((buffer.row, buffer.col), (2, 0));
        press(&mut buffer, KeyCode::Left);
        assert_eq!((buffer.row, buffer.col), (1, 2));
        press(&mut buffer, KeyCode::PageDown);
        assert_eq!(buffer.row, 2);
        press(&mut buffer, KeyCode::PageUp);
        assert_eq!(buffer.row, 0);
    }

    #[test]
    fn cursor_window_follows_edits() {
        let mut buffer = TextBuffer::new();
        buffer.set_text(&"x\n".repeat(20));
        for _ in 0..8 {
            press(&mut buffer, KeyCode::Down);
        }
        buffer.follow_cursor(5, 20);
        assert_eq!(buffer.top, 4);
        press(&mut buffer, KeyCode::PageUp);
        buffer.follow_cursor(5, 20);
        assert_eq!(buffer.top, 0);
    }

    #[test]
    fn keys_before_load_and_failed_saves() {
        let origin = Origin {
            view: View::Editor,
            epoch: 0,
        };
        let mut editor = EditorState::new();
        editor.resize(80, 24);
        assert!(editor
            .handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), origin)
            .is_none());

        editor.apply_loaded(Ok("font-size = 12".to_string()));
        editor.handle_key(KeyEvent::from(KeyCode::Char('#')), origin);
        assert!(editor.is_modified());
        let job = editor.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), origin);
        assert!(matches!(job, Some(Job::SaveFile { ref content, .. }) if content == "#font-size = 12"));

        editor.apply_saved(Err(ConfigFileError::io(
            "/readonly/config",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        )));
        assert!(editor.is_modified());
        assert!(editor
            .message
            .as_deref()
            .is_some_and(|msg| msg.starts_with("Error saving: ")));
    }

    #[test]
    fn load_failure_is_reported_and_blocks_editing() {
        let mut editor = EditorState::new();
        editor.apply_loaded(Err(ConfigFileError::io(
            "/locked/config",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked"),
        )));
        assert!(editor
            .message
            .as_deref()
            .is_some_and(|msg| msg.starts_with("Error loading config: ")));
        let origin = Origin {
            view: View::Editor,
            epoch: 0,
        };
        editor.handle_key(KeyEvent::from(KeyCode::Char('x')), origin);
        assert_eq!(editor.buffer.text(), "");
    }
}
