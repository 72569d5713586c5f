/// Keyboard/pointer selection state of one suggestion panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum PanelState {
    /// Panel hidden.
    #[default]
    Idle,
    /// Panel shows candidates; `None` means nothing is highlighted yet.
    Browsing { highlighted: Option<usize> },
    /// Panel shows the "no results" message; the lookup has finished.
    NoMatches,
}

/// Keys the panel reacts to. Everything else passes through to the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowDown" => Key::ArrowDown,
            "ArrowUp" => Key::ArrowUp,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CommitSource {
    /// Picked from the candidate list.
    Suggestion,
    /// Free text typed by the user, accepted without matching.
    Manual,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum KeyOutcome {
    Ignored,
    Moved,
    Dismissed,
    Commit { value: String, source: CommitSource },
}

impl KeyOutcome {
    /// Whether the host should `preventDefault()` the originating event.
    pub fn consumed(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }
}

impl PanelState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, PanelState::Idle)
    }

    pub fn highlighted(&self) -> Option<usize> {
        match self {
            PanelState::Browsing { highlighted } => *highlighted,
            _ => None,
        }
    }

    /// A fresh candidate list arrived for the field.
    pub fn on_results(&mut self, count: usize) {
        *self = if count > 0 {
            PanelState::Browsing { highlighted: None }
        } else {
            PanelState::NoMatches
        };
    }

    pub fn hide(&mut self) {
        *self = PanelState::Idle;
    }

    pub fn handle_key(&mut self, key: Key, items: &[String], text: &str) -> KeyOutcome {
        let highlighted = match *self {
            PanelState::Browsing { highlighted } if !items.is_empty() => highlighted,
            _ => return self.handle_key_without_list(key, text),
        };
        let last = items.len() - 1;

        match key {
            Key::ArrowDown => {
                let next = match highlighted {
                    None => 0,
                    Some(i) => (i + 1).min(last),
                };
                *self = PanelState::Browsing {
                    highlighted: Some(next),
                };
                KeyOutcome::Moved
            }
            Key::ArrowUp => {
                let next = match highlighted {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                };
                *self = PanelState::Browsing { highlighted: next };
                KeyOutcome::Moved
            }
            Key::Enter => {
                let index = highlighted.filter(|i| *i <= last).unwrap_or(0);
                *self = PanelState::Idle;
                KeyOutcome::Commit {
                    value: items[index].clone(),
                    source: CommitSource::Suggestion,
                }
            }
            Key::Escape => {
                *self = PanelState::Idle;
                KeyOutcome::Dismissed
            }
            Key::Other => KeyOutcome::Ignored,
        }
    }

    // Idle, NoMatches, or a visible panel with nothing in it.
    fn handle_key_without_list(&mut self, key: Key, text: &str) -> KeyOutcome {
        match key {
            Key::Enter => {
                let value = text.trim();
                if value.is_empty() {
                    return KeyOutcome::Ignored;
                }
                *self = PanelState::Idle;
                KeyOutcome::Commit {
                    value: value.to_string(),
                    source: CommitSource::Manual,
                }
            }
            Key::Escape if self.is_visible() => {
                *self = PanelState::Idle;
                KeyOutcome::Dismissed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Pointer hover shares the keyboard highlight.
    pub fn hover(&mut self, index: usize, len: usize) {
        if let PanelState::Browsing { highlighted } = self {
            if index < len {
                *highlighted = Some(index);
            }
        }
    }

    /// Pointer click on a candidate behaves like Enter on that item.
    pub fn pick(&mut self, index: usize, items: &[String]) -> Option<KeyOutcome> {
        if !matches!(self, PanelState::Browsing { .. }) {
            return None;
        }
        let value = items.get(index)?.clone();
        *self = PanelState::Idle;
        Some(KeyOutcome::Commit {
            value,
            source: CommitSource::Suggestion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn browsing() -> PanelState {
        PanelState::Browsing { highlighted: None }
    }

    #[test]
    fn test_arrow_down_clamps_at_last() {
        let list = items(&["A", "B"]);
        let mut p = browsing();
        for _ in 0..5 {
            assert_eq!(p.handle_key(Key::ArrowDown, &list, "x"), KeyOutcome::Moved);
            assert!(p.highlighted().unwrap() < list.len());
        }
        assert_eq!(p.highlighted(), Some(1));
    }

    #[test]
    fn test_arrow_up_clamps_at_none() {
        let list = items(&["A", "B", "C"]);
        let mut p = PanelState::Browsing {
            highlighted: Some(1),
        };
        p.handle_key(Key::ArrowUp, &list, "x");
        assert_eq!(p.highlighted(), Some(0));
        p.handle_key(Key::ArrowUp, &list, "x");
        assert_eq!(p.highlighted(), None);
        p.handle_key(Key::ArrowUp, &list, "x");
        assert_eq!(p.highlighted(), None);
        assert!(p.is_visible());
    }

    #[test]
    fn test_enter_without_highlight_commits_first() {
        let list = items(&["Civic", "Accord", "CR-V"]);
        let mut p = browsing();
        let out = p.handle_key(Key::Enter, &list, "c");
        assert_eq!(
            out,
            KeyOutcome::Commit {
                value: "Civic".into(),
                source: CommitSource::Suggestion
            }
        );
        assert_eq!(p, PanelState::Idle);
    }

    #[test]
    fn test_enter_commits_highlighted() {
        let list = items(&["Civic", "Accord", "CR-V"]);
        let mut p = browsing();
        p.handle_key(Key::ArrowDown, &list, "c");
        p.handle_key(Key::ArrowDown, &list, "c");
        let out = p.handle_key(Key::Enter, &list, "c");
        assert!(matches!(out, KeyOutcome::Commit { ref value, .. } if value == "Accord"));
    }

    #[test]
    fn test_manual_entry_when_no_list() {
        let mut p = PanelState::NoMatches;
        let out = p.handle_key(Key::Enter, &[], "  Lada  ");
        assert_eq!(
            out,
            KeyOutcome::Commit {
                value: "Lada".into(),
                source: CommitSource::Manual
            }
        );
        assert_eq!(p, PanelState::Idle);

        let mut idle = PanelState::Idle;
        assert_eq!(idle.handle_key(Key::Enter, &[], "   "), KeyOutcome::Ignored);
        assert_eq!(idle.handle_key(Key::ArrowDown, &[], "x"), KeyOutcome::Ignored);
    }

    #[test]
    fn test_idle_enter_ignores_stale_list() {
        // Candidates exist but the panel was dismissed: Enter takes the typed text.
        let list = items(&["Toyota"]);
        let mut p = PanelState::Idle;
        let out = p.handle_key(Key::Enter, &list, "Toyo");
        assert!(matches!(
            out,
            KeyOutcome::Commit { ref value, source: CommitSource::Manual } if value == "Toyo"
        ));
    }

    #[test]
    fn test_escape_hides_without_commit() {
        let list = items(&["A"]);
        let mut p = PanelState::Browsing {
            highlighted: Some(0),
        };
        assert_eq!(p.handle_key(Key::Escape, &list, "a"), KeyOutcome::Dismissed);
        assert_eq!(p, PanelState::Idle);

        let mut nm = PanelState::NoMatches;
        assert_eq!(nm.handle_key(Key::Escape, &[], "zz"), KeyOutcome::Dismissed);

        let mut idle = PanelState::Idle;
        assert!(!idle.handle_key(Key::Escape, &[], "zz").consumed());
    }

    #[test]
    fn test_hover_and_pick() {
        let list = items(&["A", "B", "C"]);
        let mut p = browsing();
        p.hover(2, list.len());
        assert_eq!(p.highlighted(), Some(2));
        p.hover(7, list.len());
        assert_eq!(p.highlighted(), Some(2));

        let out = p.pick(1, &list).expect("click commits");
        assert!(matches!(out, KeyOutcome::Commit { ref value, .. } if value == "B"));
        assert_eq!(p, PanelState::Idle);
        assert!(p.pick(0, &list).is_none());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_key_name("Esc"), Key::Escape);
        assert_eq!(Key::from_key_name("a"), Key::Other);
    }
}
