use super::*;

use crate::error::StoreError;

const QUERY_LIMIT: usize = 100;
// Title, blank, input, blank above the list; help line and margin below.
const CHROME_ROWS: u16 = 6;

pub(super) fn visible_rows_for(height: u16) -> usize {
    usize::from(height.saturating_sub(CHROME_ROWS).max(3))
}

pub(super) struct SearchState {
    pub(super) input: TextInput,
    focused: bool,
    pub(super) query: String,
    pub(super) results: Vec<ConfigEntry>,
    pub(super) cursor: usize,
    pub(super) error: Option<String>,
    pub(super) visible_rows: usize,
}

impl SearchState {
    pub(super) fn new() -> Self {
        Self {
            input: TextInput::with_limit(QUERY_LIMIT),
            focused: true,
            query: String::new(),
            results: Vec::new(),
            cursor: 0,
            error: None,
            visible_rows: visible_rows_for(0),
        }
    }

    pub(super) fn resize(&mut self, _width: u16, height: u16) {
        self.visible_rows = visible_rows_for(height);
    }

    pub(super) fn input_focused(&self) -> bool {
        self.focused
    }

    pub(super) fn selected(&self) -> Option<&ConfigEntry> {
        self.results.get(self.cursor)
    }

    /// Handle a navigation or editing key; returns the new query when it changed.
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> Option<String> {
        match key.code {
            KeyCode::Up | KeyCode::Down => {
                self.focused = false;
                if key.code == KeyCode::Up {
                    self.cursor = self.cursor.saturating_sub(1);
                } else if !self.results.is_empty() {
                    self.cursor = (self.cursor + 1).min(self.results.len() - 1);
                }
                None
            }
            _ => {
                self.focused = true;
                if self.input.handle_key(key) {
                    self.cursor = 0;
                    Some(self.input.value.clone())
                } else {
                    None
                }
            }
        }
    }

    pub(super) fn apply_results(
        &mut self,
        query: String,
        result: Result<Vec<ConfigEntry>, StoreError>,
    ) {
        self.query = query;
        self.cursor = 0;
        match result {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(err) => {
                self.results.clear();
                self.error = Some(err.to_string());
            }
        }
    }

    /// First result index shown so the cursor stays on screen.
    fn window_start(&self, rows: usize) -> usize {
        if rows == 0 || self.cursor < rows {
            0
        } else {
            self.cursor + 1 - rows
        }
    }
}

pub(super) fn render(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let search = &state.search;

    let mut title = vec![Span::styled("Search", title_style())];
    if !search.results.is_empty() || !search.query.is_empty() {
        let current = if search.results.is_empty() {
            0
        } else {
            search.cursor + 1
        };
        title.push(Span::raw("  "));
        title.push(Span::styled(
            format!("{current}/{} results", search.results.len()),
            muted_style(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(title)), row(area, 0, 1));

    let input_area = row(area, 2, 1);
    let input_line = if search.input.value.is_empty() {
        Line::from(vec![
            Span::styled("> ", muted_style()),
            Span::styled("type to search...", muted_style()),
        ])
    } else {
        Line::from(vec![
            Span::styled("> ", muted_style()),
            Span::styled(search.input.value.clone(), Style::default().fg(COLOR_TEXT)),
        ])
    };
    frame.render_widget(Paragraph::new(input_line), input_area);
    if search.focused {
        frame.set_cursor(input_area.x + 2 + search.input.cursor as u16, input_area.y);
    }

    let list_height = area.height.saturating_sub(CHROME_ROWS - 2);
    let rows = search.visible_rows.min(usize::from(list_height));
    let list_area = row(area, 4, rows as u16);
    // Highlight against the query that produced these rows, not the live input.
    let query = search.query.as_str();
    let lines: Vec<Line> = if let Some(error) = &search.error {
        vec![Line::from(Span::styled(
            format!("Error: {error}"),
            message_style(true),
        ))]
    } else if search.results.is_empty() {
        if search.query.is_empty() {
            Vec::new()
        } else {
            vec![Line::from(Span::styled("0 results", muted_style()))]
        }
    } else {
        let start = search.window_start(rows);
        search
            .results
            .iter()
            .enumerate()
            .skip(start)
            .take(rows)
            .map(|(index, entry)| {
                let matched = Style::default()
                    .fg(COLOR_SECONDARY)
                    .add_modifier(Modifier::BOLD);
                if index == search.cursor {
                    let mut spans = vec![Span::styled("➤ ○ ", Style::default().fg(COLOR_PRIMARY))];
                    spans.extend(highlight_spans(
                        &entry.title,
                        query,
                        Style::default().fg(COLOR_PRIMARY),
                        matched,
                    ));
                    Line::from(spans)
                } else {
                    let mut spans = vec![Span::raw("  ○ ")];
                    spans.extend(highlight_spans(&entry.title, query, Style::default(), matched));
                    Line::from(spans)
                }
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines), list_area);

    let help = if search.results.is_empty() {
        "type to search • esc: back • q: quit"
    } else {
        "↑/↓: navigate • enter: select • esc: back • q: quit"
    };
    frame.render_widget(help_line(help), row(area, area.height.saturating_sub(1), 1));
}
