use super::*;

pub(super) fn resize(state: &mut UiState, width: u16, height: u16) {
    state.width = width;
    state.height = height;
    state.menu.resize(width, height);
    state.search.resize(width, height);
    state.detail.resize(width, height);
    state.editor.resize(width, height);
}

pub(super) fn open_search(state: &mut UiState, jobs: &mut impl Dispatch) {
    state.view = View::Search;
    jobs.dispatch(Job::Search {
        origin: state.origin(View::Search),
        query: state.search.input.value.clone(),
    });
}

/// Leave search for the menu with a fresh search screen.
pub(super) fn close_search(state: &mut UiState) {
    state.epochs.search += 1;
    state.search = SearchState::new();
    state.search.resize(state.width, state.height);
    state.view = View::Menu;
}

pub(super) fn open_detail(state: &mut UiState, entry: ConfigEntry) {
    state.epochs.detail += 1;
    state.detail = DetailState::new();
    state.detail.resize(state.width, state.height);
    state.detail.show(entry);
    state.view = View::Detail;
}

pub(super) fn open_editor(state: &mut UiState, jobs: &mut impl Dispatch) {
    state.view = View::Editor;
    state.editor.path = Some(state.config.path().display().to_string());
    jobs.dispatch(Job::LoadFile {
        origin: state.origin(View::Editor),
    });
}

/// Leave the editor for the menu, dropping any unsaved buffer.
pub(super) fn close_editor(state: &mut UiState) {
    state.epochs.editor += 1;
    state.editor = EditorState::new();
    state.editor.resize(state.width, state.height);
    state.view = View::Menu;
}

pub(super) fn apply_completion(state: &mut UiState, done: Completion) {
    match done {
        Completion::Search { query, result, .. } => state.search.apply_results(query, result),
        Completion::Loaded { result, .. } => state.editor.apply_loaded(result),
        Completion::Saved { result, .. } => state.editor.apply_saved(result),
        Completion::Appended { result, .. } => state.detail.apply_appended(result),
        Completion::CommentedOut { result, .. } => state.detail.apply_commented(result),
    }
}
