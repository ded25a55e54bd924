use super::*;

pub(super) fn handle_key(key: KeyEvent, state: &mut UiState, jobs: &mut impl Dispatch) -> bool {
    if is_quit(key) && quit_allowed(state) {
        return true;
    }

    match state.view {
        View::Menu => handle_menu_key(key, state, jobs),
        View::Search => handle_search_key(key, state, jobs),
        View::Detail => handle_detail_key(key, state, jobs),
        View::Editor => handle_editor_key(key, state, jobs),
    }
    false
}

fn is_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => key.modifiers.is_empty(),
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Quit is held back while the user is composing text.
fn quit_allowed(state: &UiState) -> bool {
    match state.view {
        View::Menu => true,
        View::Search => !state.search.input_focused(),
        View::Detail => !state.detail.editing,
        View::Editor => false,
    }
}

fn is_back(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Backspace)
}

fn handle_menu_key(key: KeyEvent, state: &mut UiState, jobs: &mut impl Dispatch) {
    let choice = match key.code {
        KeyCode::Enter => Some(state.menu.selected()),
        KeyCode::Char(ch @ '1'..='9') => menu::MenuItem::from_number(ch),
        _ => {
            state.menu.handle_key(key);
            None
        }
    };
    match choice {
        Some(menu::MenuItem::BrowseOptions) => state::open_search(state, jobs),
        Some(menu::MenuItem::ConfigEditor) => state::open_editor(state, jobs),
        None => {}
    }
}

fn handle_search_key(key: KeyEvent, state: &mut UiState, jobs: &mut impl Dispatch) {
    match key.code {
        KeyCode::Esc => state::close_search(state),
        KeyCode::Enter => {
            if let Some(entry) = state.search.selected().cloned() {
                state::open_detail(state, entry);
            }
        }
        _ => {
            if let Some(query) = state.search.handle_key(key) {
                jobs.dispatch(Job::Search {
                    origin: state.origin(View::Search),
                    query,
                });
            }
        }
    }
}

fn handle_detail_key(key: KeyEvent, state: &mut UiState, jobs: &mut impl Dispatch) {
    if !state.detail.editing && is_back(key) {
        state.view = View::Search;
        return;
    }
    let origin = state.origin(View::Detail);
    if let Some(job) = state.detail.handle_key(key, &state.config, origin) {
        jobs.dispatch(job);
    }
}

fn handle_editor_key(key: KeyEvent, state: &mut UiState, jobs: &mut impl Dispatch) {
    if key.code == KeyCode::Esc {
        state::close_editor(state);
        return;
    }
    let origin = state.origin(View::Editor);
    if let Some(job) = state.editor.handle_key(key, origin) {
        jobs.dispatch(job);
    }
}
