use super::{CandidateList, PanelState};

/// Focus tracking with a grace period on blur.
///
/// A click on a candidate blurs the input before the click lands, so blur only
/// arms a timer; the field counts as focused until that timer elapses.
#[derive(Clone, Debug, Default)]
pub(crate) struct Visibility {
    focused: bool,
    blur_generation: u64,
    pending_blur: Option<u64>,
}

impl Visibility {
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.pending_blur = None;
    }

    /// Arm the grace timer. Returns its generation.
    pub fn blur(&mut self) -> u64 {
        self.blur_generation = self.blur_generation.saturating_add(1);
        self.pending_blur = Some(self.blur_generation);
        self.blur_generation
    }

    /// Grace timer elapsed. True if the field actually lost focus now.
    pub fn blur_elapsed(&mut self, generation: u64) -> bool {
        if self.pending_blur != Some(generation) {
            return false;
        }
        self.pending_blur = None;
        self.focused = false;
        true
    }
}

/// What the suggestion panel of a field should render right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PanelView {
    Hidden,
    Suggestions {
        items: Vec<String>,
        highlighted: Option<usize>,
        loading: bool,
    },
    NoResults {
        text: String,
    },
}

impl PanelView {
    pub fn resolve(
        visibility: &Visibility,
        state: PanelState,
        list: &CandidateList,
        text: &str,
    ) -> Self {
        if !visibility.is_focused() {
            return PanelView::Hidden;
        }

        match state {
            PanelState::Browsing { highlighted } if !list.is_empty() => PanelView::Suggestions {
                items: list.items().to_vec(),
                highlighted,
                loading: list.is_loading(),
            },
            PanelState::NoMatches if !text.is_empty() && !list.is_loading() && list.is_empty() => {
                PanelView::NoResults {
                    text: text.to_string(),
                }
            }
            _ => PanelView::Hidden,
        }
    }

    pub fn is_shown(&self) -> bool {
        !matches!(self, PanelView::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::{FieldKind, FieldQuery};

    fn focused() -> Visibility {
        let mut v = Visibility::default();
        v.focus();
        v
    }

    fn loaded(items: &[&str], text: &str) -> CandidateList {
        let mut list = CandidateList::default();
        let q = FieldQuery::new(text, None);
        let t = list.begin(FieldKind::Make, q.clone());
        list.resolve(&t, items.iter().map(|s| s.to_string()).collect(), &q)
            .unwrap();
        list
    }

    #[test]
    fn test_blur_waits_for_grace_timer() {
        let mut v = focused();
        let g = v.blur();
        assert!(v.is_focused());
        assert!(v.blur_elapsed(g));
        assert!(!v.is_focused());
    }

    #[test]
    fn test_refocus_cancels_pending_blur() {
        let mut v = focused();
        let g = v.blur();
        v.focus();
        assert!(!v.blur_elapsed(g));
        assert!(v.is_focused());
    }

    #[test]
    fn test_hidden_without_focus() {
        let list = loaded(&["Kia"], "K");
        let view = PanelView::resolve(
            &Visibility::default(),
            PanelState::Browsing { highlighted: None },
            &list,
            "K",
        );
        assert_eq!(view, PanelView::Hidden);
    }

    #[test]
    fn test_suggestions_when_browsing() {
        let list = loaded(&["Kia", "Koenigsegg"], "K");
        let view = PanelView::resolve(
            &focused(),
            PanelState::Browsing {
                highlighted: Some(1),
            },
            &list,
            "K",
        );
        assert_eq!(
            view,
            PanelView::Suggestions {
                items: vec!["Kia".into(), "Koenigsegg".into()],
                highlighted: Some(1),
                loading: false
            }
        );
    }

    #[test]
    fn test_no_results_rules() {
        let empty = loaded(&[], "Zz");
        let v = focused();

        assert_eq!(
            PanelView::resolve(&v, PanelState::NoMatches, &empty, "Zz"),
            PanelView::NoResults { text: "Zz".into() }
        );
        // Empty input never shows the message.
        assert!(!PanelView::resolve(&v, PanelState::NoMatches, &empty, "").is_shown());

        // Nor while a lookup is in flight.
        let mut in_flight = CandidateList::default();
        in_flight.begin(FieldKind::Make, FieldQuery::new("Zz", None));
        assert!(!PanelView::resolve(&v, PanelState::NoMatches, &in_flight, "Zz").is_shown());
    }
}
