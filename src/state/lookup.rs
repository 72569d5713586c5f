use crate::api::ApiClient;
use crate::autocomplete::{
    AutocompleteConfig, AutocompleteError, AutocompleteForm, CommittedCriteria, Effect, FieldKind,
    FocusTarget, Key, LookupRequest, PanelView,
};
use crate::util::{alert, focus_element, set_timeout};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wasm_bindgen::JsCast;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum TimerSlot {
    Lookup(FieldKind),
    Blur(FieldKind),
}

/// Runs the make/model suggestion engine against the real browser.
///
/// Responsibilities:
/// - forwards DOM events (input, keydown, focus, blur, hover, click) to
///   [`AutocompleteForm`]
/// - executes the returned effects: debounce and blur timers, backend lookups,
///   focus moves
/// - document-level `mousedown` for click-outside dismissal
///
/// Non-responsibilities:
/// - rendering (see `components::autocomplete`)
/// - search submission
#[derive(Clone)]
pub(crate) struct FormController {
    form: RwSignal<AutocompleteForm>,
    api_client: RwSignal<ApiClient>,

    /// One live browser timer per slot; rescheduling clears the previous one.
    timers: Arc<Mutex<HashMap<TimerSlot, i32>>>,

    make_input: NodeRef<html::Input>,
    model_input: NodeRef<html::Input>,
    color_select: NodeRef<html::Select>,
    make_container: NodeRef<html::Div>,
    model_container: NodeRef<html::Div>,

    _mousedown_handle: StoredValue<Option<WindowListenerHandle>>,
}

impl FormController {
    pub fn new(api_client: RwSignal<ApiClient>, config: AutocompleteConfig) -> Self {
        let s = Self {
            form: RwSignal::new(AutocompleteForm::new(config)),
            api_client,
            timers: Arc::new(Mutex::new(HashMap::new())),
            make_input: NodeRef::new(),
            model_input: NodeRef::new(),
            color_select: NodeRef::new(),
            make_container: NodeRef::new(),
            model_container: NodeRef::new(),
            _mousedown_handle: StoredValue::new(None),
        };

        s.start_global_listeners();
        s
    }

    pub fn input_ref(&self, kind: FieldKind) -> NodeRef<html::Input> {
        match kind {
            FieldKind::Make => self.make_input,
            FieldKind::Model => self.model_input,
        }
    }

    pub fn container_ref(&self, kind: FieldKind) -> NodeRef<html::Div> {
        match kind {
            FieldKind::Make => self.make_container,
            FieldKind::Model => self.model_container,
        }
    }

    pub fn color_select_ref(&self) -> NodeRef<html::Select> {
        self.color_select
    }

    // ---- reads (tracked, for views) ----

    pub fn text(&self, kind: FieldKind) -> String {
        self.form.with(|f| f.text(kind).to_string())
    }

    pub fn view(&self, kind: FieldKind) -> PanelView {
        self.form.with(|f| f.view(kind))
    }

    pub fn model_enabled(&self) -> bool {
        self.form.with(|f| f.model_enabled())
    }

    pub fn committed_make(&self) -> String {
        self.form.with(|f| f.criteria().make.clone())
    }

    pub fn criteria(&self) -> CommittedCriteria {
        self.form.with(|f| f.criteria().clone())
    }

    pub fn criteria_untracked(&self) -> CommittedCriteria {
        self.form.with_untracked(|f| f.criteria().clone())
    }

    // ---- DOM event entry points ----

    pub fn on_input(&self, kind: FieldKind, text: String) {
        let effects = self
            .form
            .try_update(|f| f.input(kind, &text))
            .unwrap_or_default();
        self.run(effects);
    }

    pub fn on_keydown(&self, kind: FieldKind, ev: &web_sys::KeyboardEvent) {
        let key = Key::from_key_name(&ev.key());
        if key == Key::Other {
            return;
        }

        let Some(resp) = self.form.try_update(|f| f.key(kind, key)) else {
            return;
        };
        if resp.consumed {
            ev.prevent_default();
        }
        self.run(resp.effects);
    }

    pub fn on_focus(&self, kind: FieldKind, ev: &web_sys::FocusEvent) {
        let Some(Err(e)) = self.form.try_update(|f| f.focus(kind)) else {
            return;
        };

        // Drop focus before the modal alert, otherwise closing it refocuses the
        // input and we alert again.
        if let Some(el) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = el.blur();
        }
        if let Some(notice) = e.user_notice() {
            alert(&notice);
        }
    }

    pub fn on_blur(&self, kind: FieldKind) {
        let effects = self.form.try_update(|f| f.blur(kind)).unwrap_or_default();
        self.run(effects);
    }

    pub fn on_hover(&self, kind: FieldKind, index: usize) {
        let current = self.form.with_untracked(|f| f.field(kind).panel().highlighted());
        if current != Some(index) {
            self.form.update(|f| f.hover(kind, index));
        }
    }

    pub fn on_click(&self, kind: FieldKind, index: usize) {
        let effects = self
            .form
            .try_update(|f| f.click(kind, index))
            .unwrap_or_default();
        self.run(effects);
    }

    pub fn on_clear_make(&self) {
        let effects = self.form.try_update(|f| f.clear_make()).unwrap_or_default();
        self.run(effects);
        focus_element(self.make_input.get_untracked());
    }

    // ---- timer / network completions ----

    fn debounce_elapsed(&self, kind: FieldKind, generation: u64) {
        if let Ok(mut map) = self.timers.lock() {
            map.remove(&TimerSlot::Lookup(kind));
        }
        let effects = self
            .form
            .try_update(|f| f.debounce_elapsed(kind, generation))
            .unwrap_or_default();
        self.run(effects);
    }

    fn blur_elapsed(&self, kind: FieldKind, generation: u64) {
        if let Ok(mut map) = self.timers.lock() {
            map.remove(&TimerSlot::Blur(kind));
        }
        self.form.update(|f| f.blur_elapsed(kind, generation));
    }

    fn lookup_finished(form: RwSignal<AutocompleteForm>, req: &LookupRequest, result: crate::api::ApiResult<Vec<String>>) {
        // The page may have been torn down while the request was in flight.
        let Some(outcome) = form.try_update(|f| f.lookup_resolved(&req.ticket, result)) else {
            return;
        };

        match outcome {
            Ok(_) => {}
            Err(e @ AutocompleteError::StaleResponse { .. }) => {
                leptos::logging::log!("{e} (query {:?})", req.text());
            }
            Err(e) => {
                leptos::logging::warn!("{e}");
            }
        }
    }

    // ---- effect execution ----

    fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleLookup {
                    field,
                    generation,
                    delay_ms,
                } => {
                    let s2 = self.clone();
                    self.arm_timer(TimerSlot::Lookup(field), delay_ms, move || {
                        s2.debounce_elapsed(field, generation);
                    });
                }
                Effect::CancelLookup { field } => self.clear_timer(TimerSlot::Lookup(field)),
                Effect::IssueLookup(req) => self.issue_lookup(req),
                Effect::ScheduleBlur {
                    field,
                    generation,
                    delay_ms,
                } => {
                    let s2 = self.clone();
                    self.arm_timer(TimerSlot::Blur(field), delay_ms, move || {
                        s2.blur_elapsed(field, generation);
                    });
                }
                Effect::Focus(target) => self.focus_later(target),
            }
        }
    }

    fn issue_lookup(&self, req: LookupRequest) {
        let api_client = self.api_client.get_untracked();
        let form = self.form;
        spawn_local(async move {
            let result = api_client.lookup(&req).await;
            Self::lookup_finished(form, &req, result);
        });
    }

    fn focus_later(&self, target: FocusTarget) {
        // The model input only becomes interactive after the commit re-renders,
        // so wait a tick like the browser would for a setTimeout(0).
        let model_input = self.model_input;
        let color_select = self.color_select;
        set_timeout(0, move || match target {
            FocusTarget::Model => focus_element(model_input.get_untracked()),
            FocusTarget::Color => focus_element(color_select.get_untracked()),
        });
    }

    fn clear_timer(&self, slot: TimerSlot) {
        let Some(win) = web_sys::window() else {
            return;
        };
        if let Ok(mut map) = self.timers.lock() {
            if let Some(tid) = map.remove(&slot) {
                win.clear_timeout_with_handle(tid);
            }
        }
    }

    fn arm_timer(&self, slot: TimerSlot, delay_ms: u32, f: impl FnOnce() + 'static) {
        self.clear_timer(slot);
        if let Some(tid) = set_timeout(delay_ms, f) {
            if let Ok(mut map) = self.timers.lock() {
                map.insert(slot, tid);
            }
        }
    }

    fn start_global_listeners(&self) {
        let s2 = self.clone();
        let mousedown = window_event_listener(ev::mousedown, move |ev: web_sys::MouseEvent| {
            s2.pointer_down(&ev);
        });
        self._mousedown_handle.set_value(Some(mousedown));
    }

    fn pointer_down(&self, ev: &web_sys::MouseEvent) {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok()) else {
            return;
        };

        for kind in [FieldKind::Make, FieldKind::Model] {
            let inside = self
                .container_ref(kind)
                .get_untracked()
                .map(|el| el.contains(Some(&target)))
                .unwrap_or(false);
            let visible = self
                .form
                .with_untracked(|f| f.field(kind).panel().is_visible());

            if !inside && visible {
                self.form.update(|f| f.pointer_down_outside(kind));
            }
        }
    }
}
