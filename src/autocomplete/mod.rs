//! Make/model suggestion engine.
//!
//! Everything in here is DOM-free: handlers take semantic events (text changed,
//! key pressed, timer elapsed, lookup finished) and hand back [`Effect`]s for the
//! host to execute. The Leptos side (`state::lookup`) owns the real timers,
//! network calls and focus changes.

mod field;
mod form;
mod panel;
mod scheduler;
mod store;
mod visibility;

pub(crate) use field::FieldState;
pub(crate) use form::{AutocompleteForm, CommittedCriteria, Effect, FocusTarget};
pub(crate) use panel::{Key, PanelState};
pub(crate) use scheduler::DebounceScheduler;
pub(crate) use store::{CandidateList, FieldQuery, LookupRequest, LookupTicket};
pub(crate) use visibility::{PanelView, Visibility};

/// Quiet period before a lookup is issued for the latest text.
pub(crate) const DEFAULT_DEBOUNCE_MS: u32 = 300;
/// Delay between input blur and the panel actually hiding.
pub(crate) const DEFAULT_BLUR_GRACE_MS: u32 = 150;
/// Upper bound on model suggestions requested per lookup.
pub(crate) const DEFAULT_MODEL_LIMIT: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum FieldKind {
    Make,
    Model,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Make => "Make",
            FieldKind::Model => "Model",
        }
    }

    /// Plural noun used in "No makes found" style messages.
    pub fn plural(self) -> &'static str {
        match self {
            FieldKind::Make => "makes",
            FieldKind::Model => "models",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct AutocompleteConfig {
    pub debounce_ms: u32,
    pub blur_grace_ms: u32,
    pub model_limit: u32,
}

impl AutocompleteConfig {
    /// Apply numeric overrides (as read from `window.ENV`). Non-finite, negative
    /// or zero-limit values are ignored.
    pub fn with_overrides(
        mut self,
        debounce_ms: Option<f64>,
        blur_grace_ms: Option<f64>,
        model_limit: Option<f64>,
    ) -> Self {
        let as_u32 = |v: f64| {
            if v.is_finite() && v >= 0.0 && v <= u32::MAX as f64 {
                Some(v.round() as u32)
            } else {
                None
            }
        };

        if let Some(ms) = debounce_ms.and_then(as_u32) {
            self.debounce_ms = ms;
        }
        if let Some(ms) = blur_grace_ms.and_then(as_u32) {
            self.blur_grace_ms = ms;
        }
        if let Some(limit) = model_limit.and_then(as_u32).filter(|l| *l > 0) {
            self.model_limit = limit;
        }
        self
    }
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            blur_grace_ms: DEFAULT_BLUR_GRACE_MS,
            model_limit: DEFAULT_MODEL_LIMIT,
        }
    }
}

/// Locally contained failures of the suggestion subsystem. None of them is fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum AutocompleteError {
    /// A lookup result that no longer matches the field's latest query.
    StaleResponse { field: FieldKind, seq: u64 },
    /// Interaction with a dependent field before its prerequisite is committed.
    DependencyViolation { field: FieldKind, requires: FieldKind },
    /// Lookup failed in transport or returned a non-success status.
    TransportFailure { field: FieldKind, message: String },
}

impl AutocompleteError {
    /// Blocking notice shown to the user, if this error is user-facing at all.
    pub fn user_notice(&self) -> Option<String> {
        match self {
            AutocompleteError::DependencyViolation { requires, .. } => {
                Some(format!("Please select a {} first", requires.label()))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for AutocompleteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutocompleteError::StaleResponse { field, seq } => {
                write!(f, "discarded stale {field} lookup #{seq}")
            }
            AutocompleteError::DependencyViolation { field, requires } => {
                write!(f, "{field} requires a committed {requires}")
            }
            AutocompleteError::TransportFailure { field, message } => {
                write!(f, "{field} lookup failed: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_names() {
        assert_eq!(FieldKind::Make.to_string(), "make");
        assert_eq!(FieldKind::Model.as_ref(), "model");
        assert_eq!(FieldKind::Model.plural(), "models");
    }

    #[test]
    fn test_config_defaults_match_reference_timings() {
        let c = AutocompleteConfig::default();
        assert_eq!(c.debounce_ms, 300);
        assert_eq!(c.blur_grace_ms, 150);
        assert_eq!(c.model_limit, 20);
    }

    #[test]
    fn test_config_overrides_ignore_garbage() {
        let c = AutocompleteConfig::default().with_overrides(
            Some(f64::NAN),
            Some(-5.0),
            Some(0.0),
        );
        assert_eq!(c, AutocompleteConfig::default());

        let c = AutocompleteConfig::default().with_overrides(Some(120.0), None, Some(5.0));
        assert_eq!(c.debounce_ms, 120);
        assert_eq!(c.blur_grace_ms, 150);
        assert_eq!(c.model_limit, 5);
    }

    #[test]
    fn test_dependency_violation_notice() {
        let e = AutocompleteError::DependencyViolation {
            field: FieldKind::Model,
            requires: FieldKind::Make,
        };
        assert_eq!(e.user_notice().as_deref(), Some("Please select a Make first"));

        let stale = AutocompleteError::StaleResponse {
            field: FieldKind::Make,
            seq: 3,
        };
        assert!(stale.user_notice().is_none());
    }
}
