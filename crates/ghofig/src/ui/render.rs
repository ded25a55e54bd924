use super::*;

pub(super) fn render_ui(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    match state.view {
        View::Menu => menu::render(area, frame, state),
        View::Search => search::render(area, frame, state),
        View::Detail => detail::render(area, frame, state),
        View::Editor => editor::render(area, frame, state),
    }
}
