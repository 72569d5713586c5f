mod lookup;

pub(crate) use lookup::FormController;

use crate::api::{ApiClient, EnvConfig};
use crate::models::SearchMode;
use leptos::prelude::*;

/// Outcome of the last search submission, shown under the form.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SearchStatus {
    Complete(String),
    Failed(String),
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Make/model autocomplete engine plus the browser plumbing around it.
    pub search_form: FormController,

    pub mode: RwSignal<SearchMode>,
    pub color: RwSignal<String>,
    pub license_plate: RwSignal<String>,
    pub description: RwSignal<String>,

    /// Search in flight: disables the submit button and the model input.
    pub submitting: RwSignal<bool>,
    pub status: RwSignal<Option<SearchStatus>>,
}

impl AppState {
    pub fn new() -> Self {
        let env = EnvConfig::new();
        let api_client = RwSignal::new(ApiClient::from_env(&env));

        Self {
            api_client,
            search_form: FormController::new(api_client, env.autocomplete),
            mode: RwSignal::new(SearchMode::default()),
            color: RwSignal::new(String::new()),
            license_plate: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            submitting: RwSignal::new(false),
            status: RwSignal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
