use super::panel::KeyOutcome;
use super::{
    AutocompleteConfig, AutocompleteError, FieldKind, FieldState, Key, LookupRequest, LookupTicket,
    PanelState, PanelView,
};

/// Values that actually go into a search, as opposed to whatever is typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CommittedCriteria {
    pub make: String,
    pub model: String,
}

/// Where focus goes after a commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FocusTarget {
    Model,
    Color,
}

/// Side effects the host must carry out after a handler returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
    /// (Re)arm the field's debounce timer. Any timer already armed for the
    /// field must be cleared first; on expiry call `debounce_elapsed`.
    ScheduleLookup {
        field: FieldKind,
        generation: u64,
        delay_ms: u32,
    },
    /// Clear the field's debounce timer.
    CancelLookup { field: FieldKind },
    /// Send the lookup and report back through `lookup_resolved`.
    IssueLookup(LookupRequest),
    /// Arm the blur grace timer; on expiry call `blur_elapsed`.
    ScheduleBlur {
        field: FieldKind,
        generation: u64,
        delay_ms: u32,
    },
    /// Move input focus once the DOM has caught up.
    Focus(FocusTarget),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct KeyResponse {
    /// The key was handled; suppress the browser default.
    pub consumed: bool,
    pub effects: Vec<Effect>,
}

/// Two-stage make → model autocomplete.
///
/// Model state only ever flows downstream from make: `set_make` is the single
/// place that writes the committed make and it resets the whole model field in
/// the same call.
#[derive(Clone, Debug)]
pub(crate) struct AutocompleteForm {
    config: AutocompleteConfig,
    make: FieldState,
    model: FieldState,
    criteria: CommittedCriteria,
}

impl AutocompleteForm {
    pub fn new(config: AutocompleteConfig) -> Self {
        Self {
            config,
            make: FieldState::new(),
            model: FieldState::new(),
            criteria: CommittedCriteria::default(),
        }
    }

    pub fn field(&self, kind: FieldKind) -> &FieldState {
        match kind {
            FieldKind::Make => &self.make,
            FieldKind::Model => &self.model,
        }
    }

    fn field_mut(&mut self, kind: FieldKind) -> &mut FieldState {
        match kind {
            FieldKind::Make => &mut self.make,
            FieldKind::Model => &mut self.model,
        }
    }

    pub fn criteria(&self) -> &CommittedCriteria {
        &self.criteria
    }

    pub fn text(&self, kind: FieldKind) -> &str {
        self.field(kind).text()
    }

    pub fn view(&self, kind: FieldKind) -> PanelView {
        self.field(kind).view()
    }

    /// Model accepts interaction only once a make is committed.
    pub fn model_enabled(&self) -> bool {
        !self.criteria.make.is_empty()
    }

    fn scope_for(&self, kind: FieldKind) -> Option<String> {
        match kind {
            FieldKind::Make => None,
            FieldKind::Model => Some(self.criteria.make.clone()),
        }
    }

    fn limit_for(&self, kind: FieldKind) -> Option<u32> {
        match kind {
            FieldKind::Make => None,
            FieldKind::Model => Some(self.config.model_limit),
        }
    }

    /// The input text of `kind` changed.
    pub fn input(&mut self, kind: FieldKind, text: &str) -> Vec<Effect> {
        let gated = kind == FieldKind::Model && !self.model_enabled();
        let delay_ms = self.config.debounce_ms;
        let field = self.field_mut(kind);
        field.text = text.to_string();

        if text.is_empty() || gated {
            let cancelled = field.scheduler.cancel();
            field.clear_suggestions();
            return if cancelled {
                vec![Effect::CancelLookup { field: kind }]
            } else {
                Vec::new()
            };
        }

        // "No results" described the previous text; keep a visible list though.
        if field.panel == PanelState::NoMatches {
            field.panel.hide();
        }

        let generation = field.scheduler.schedule();
        vec![Effect::ScheduleLookup {
            field: kind,
            generation,
            delay_ms,
        }]
    }

    /// A debounce timer fired. Only the latest armed timer issues a lookup.
    pub fn debounce_elapsed(&mut self, kind: FieldKind, generation: u64) -> Vec<Effect> {
        if kind == FieldKind::Model && !self.model_enabled() {
            self.model.scheduler.cancel();
            return Vec::new();
        }

        let scope = self.scope_for(kind);
        let limit = self.limit_for(kind);
        let field = self.field_mut(kind);
        if !field.scheduler.fire(generation) || field.text.is_empty() {
            return Vec::new();
        }

        let query = field.query(scope);
        let ticket = field.candidates.begin(kind, query);
        vec![Effect::IssueLookup(LookupRequest { ticket, limit })]
    }

    /// A lookup came back. Stale responses are rejected without touching state;
    /// failures leave the field with an empty list and are reported for logging.
    pub fn lookup_resolved<E: std::fmt::Display>(
        &mut self,
        ticket: &LookupTicket,
        result: Result<Vec<String>, E>,
    ) -> Result<usize, AutocompleteError> {
        let kind = ticket.field;
        let scope = self.scope_for(kind);
        let field = self.field_mut(kind);
        let current = field.query(scope);

        match result {
            Ok(items) => {
                let count = field.candidates.resolve(ticket, items, &current)?;
                field.panel.on_results(count);
                Ok(count)
            }
            Err(e) => {
                field.candidates.fail(ticket, &current)?;
                field.panel.on_results(0);
                Err(AutocompleteError::TransportFailure {
                    field: kind,
                    message: e.to_string(),
                })
            }
        }
    }

    pub fn key(&mut self, kind: FieldKind, key: Key) -> KeyResponse {
        let field = self.field_mut(kind);
        let outcome = field
            .panel
            .handle_key(key, field.candidates.items(), &field.text);

        let consumed = outcome.consumed();
        let effects = match outcome {
            KeyOutcome::Commit { value, .. } => self.commit(kind, value),
            _ => Vec::new(),
        };
        KeyResponse { consumed, effects }
    }

    pub fn hover(&mut self, kind: FieldKind, index: usize) {
        let field = self.field_mut(kind);
        let len = field.candidates.len();
        field.panel.hover(index, len);
    }

    /// Pointer click on candidate `index`.
    pub fn click(&mut self, kind: FieldKind, index: usize) -> Vec<Effect> {
        let field = self.field_mut(kind);
        let picked = field.panel.pick(index, field.candidates.items());
        match picked {
            Some(KeyOutcome::Commit { value, .. }) => self.commit(kind, value),
            _ => Vec::new(),
        }
    }

    fn commit(&mut self, kind: FieldKind, value: String) -> Vec<Effect> {
        let mut effects = Vec::new();
        {
            let field = self.field_mut(kind);
            if field.scheduler.cancel() {
                effects.push(Effect::CancelLookup { field: kind });
            }
            field.clear_suggestions();
            field.text = value.clone();
        }

        match kind {
            FieldKind::Make => {
                effects.extend(self.set_make(value));
                effects.push(Effect::Focus(FocusTarget::Model));
            }
            FieldKind::Model => {
                self.criteria.model = value;
                effects.push(Effect::Focus(FocusTarget::Color));
            }
        }
        effects
    }

    /// The only writer of the committed make. Resets the model field entirely.
    pub fn set_make(&mut self, value: String) -> Vec<Effect> {
        self.criteria.make = value;
        self.criteria.model.clear();

        let had_pending = self.model.is_lookup_pending();
        self.model.reset();
        if had_pending {
            vec![Effect::CancelLookup {
                field: FieldKind::Model,
            }]
        } else {
            Vec::new()
        }
    }

    /// Clear button on the make input: wipes make and, through `set_make`, model.
    pub fn clear_make(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.make.is_lookup_pending() {
            effects.push(Effect::CancelLookup {
                field: FieldKind::Make,
            });
        }
        self.make.reset();
        effects.extend(self.set_make(String::new()));
        effects
    }

    /// Focus request from the DOM. Model is refused while no make is committed;
    /// nothing changes in that case.
    pub fn focus(&mut self, kind: FieldKind) -> Result<(), AutocompleteError> {
        if kind == FieldKind::Model && !self.model_enabled() {
            return Err(AutocompleteError::DependencyViolation {
                field: FieldKind::Model,
                requires: FieldKind::Make,
            });
        }
        self.field_mut(kind).visibility.focus();
        Ok(())
    }

    pub fn blur(&mut self, kind: FieldKind) -> Vec<Effect> {
        let delay_ms = self.config.blur_grace_ms;
        let generation = self.field_mut(kind).visibility.blur();
        vec![Effect::ScheduleBlur {
            field: kind,
            generation,
            delay_ms,
        }]
    }

    pub fn blur_elapsed(&mut self, kind: FieldKind, generation: u64) {
        let field = self.field_mut(kind);
        if field.visibility.blur_elapsed(generation) {
            field.panel.hide();
        }
    }

    /// Pointer went down outside both the input and its panel.
    pub fn pointer_down_outside(&mut self, kind: FieldKind) {
        self.field_mut(kind).panel.hide();
    }
}

impl Default for AutocompleteForm {
    fn default() -> Self {
        Self::new(AutocompleteConfig::default())
    }
}
