use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MenuItem {
    BrowseOptions,
    ConfigEditor,
}

const MENU_ITEMS: [MenuItem; 2] = [MenuItem::BrowseOptions, MenuItem::ConfigEditor];

impl MenuItem {
    fn title(self) -> &'static str {
        match self {
            MenuItem::BrowseOptions => "Browse Options",
            MenuItem::ConfigEditor => "Config Editor",
        }
    }

    fn description(self) -> &'static str {
        match self {
            MenuItem::BrowseOptions => "Search Ghostty configuration options",
            MenuItem::ConfigEditor => "Edit your Ghostty config file directly",
        }
    }

    pub(super) fn from_number(ch: char) -> Option<Self> {
        let index = ch.to_digit(10)?.checked_sub(1)?;
        MENU_ITEMS.get(index as usize).copied()
    }
}

pub(super) struct MenuState {
    index: usize,
    height: u16,
}

impl MenuState {
    pub(super) fn new() -> Self {
        Self {
            index: 0,
            height: 0,
        }
    }

    pub(super) fn resize(&mut self, _width: u16, height: u16) {
        self.height = height;
    }

    pub(super) fn selected(&self) -> MenuItem {
        MENU_ITEMS[self.index]
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.index = self.index.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.index = (self.index + 1).min(MENU_ITEMS.len() - 1);
            }
            _ => {}
        }
    }
}

const HEADER: [&str; 2] = ["ghofig", "Browse and manage Ghostty config."];

pub(super) fn render(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let menu = &state.menu;
    let mut lines = vec![
        Line::from(Span::styled(HEADER[0], title_style())),
        Line::from(Span::styled(HEADER[1], muted_style())),
        Line::default(),
    ];
    // Drop the header first when the terminal is too short for everything.
    let needed = (lines.len() + MENU_ITEMS.len() + 2) as u16;
    if menu.height > 0 && menu.height < needed {
        lines.clear();
    }

    let title_width = MENU_ITEMS
        .iter()
        .map(|item| item.title().len())
        .max()
        .unwrap_or_default();
    for (index, item) in MENU_ITEMS.iter().enumerate() {
        let selected = index == menu.index;
        let marker = if selected { "➤" } else { " " };
        let label = format!("{marker} {}. {:<title_width$}", index + 1, item.title());
        let label_style = if selected {
            Style::default().fg(COLOR_PRIMARY)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        lines.push(Line::from(vec![
            Span::styled(label, label_style),
            Span::raw("        "),
            Span::styled(item.description(), muted_style()),
        ]));
    }

    let body_height = area.height.saturating_sub(1);
    frame.render_widget(Paragraph::new(lines), row(area, 0, body_height));
    frame.render_widget(
        help_line("↑/↓: navigate • enter: select • q: quit"),
        row(area, body_height, 1),
    );
}
