use super::{CandidateList, DebounceScheduler, FieldQuery, PanelState, PanelView, Visibility};

/// Everything one autocomplete input owns. Never shared between fields.
#[derive(Clone, Debug)]
pub(crate) struct FieldState {
    pub(super) text: String,
    pub(super) scheduler: DebounceScheduler,
    pub(super) candidates: CandidateList,
    pub(super) panel: PanelState,
    pub(super) visibility: Visibility,
}

impl FieldState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            scheduler: DebounceScheduler::default(),
            candidates: CandidateList::default(),
            panel: PanelState::Idle,
            visibility: Visibility::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn is_focused(&self) -> bool {
        self.visibility.is_focused()
    }

    pub fn is_lookup_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn view(&self) -> PanelView {
        PanelView::resolve(&self.visibility, self.panel, &self.candidates, &self.text)
    }

    pub(super) fn query(&self, scope: Option<String>) -> FieldQuery {
        FieldQuery::new(self.text.clone(), scope)
    }

    pub(super) fn clear_suggestions(&mut self) {
        self.candidates.clear();
        self.panel.hide();
    }

    /// Text, pending lookup, candidates and selection back to empty.
    /// Focus is left alone: it belongs to the DOM, not to the value.
    pub(super) fn reset(&mut self) {
        self.text.clear();
        self.scheduler.cancel();
        self.clear_suggestions();
    }
}
