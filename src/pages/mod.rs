use crate::api::ApiErrorKind;
use crate::autocomplete::FieldKind;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader,
    CardTitle, Input, Label, Spinner, StatusAlert,
};
use crate::components::AutocompleteField;
use crate::models::{query_preview, SearchCriteria, SearchMode, COLORS};
use crate::state::{AppContext, SearchStatus};
use crate::util::{alert, read_media_file};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

const NO_MEDIA_NOTICE: &str = "Please insert a media file first.";
const CONNECT_FAILED: &str = "Failed to connect to backend.";

#[component]
pub fn SearchPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let ctl = StoredValue::new(app_state.0.search_form.clone());

    let mode = app_state.0.mode;
    let color = app_state.0.color;
    let license_plate = app_state.0.license_plate;
    let description = app_state.0.description;
    let submitting = app_state.0.submitting;
    let status = app_state.0.status;
    let api_client = app_state.0.api_client;

    // `web_sys::File` is not Send, so it stays in a page-local signal.
    let media = RwSignal::new_local(None::<web_sys::File>);
    let media_name = RwSignal::new(None::<String>);

    let make_placeholder = Signal::derive(|| "Type to search makes...".to_string());
    let model_placeholder = Signal::derive(move || {
        let make = ctl.get_value().committed_make();
        if make.is_empty() {
            "Select a make first".to_string()
        } else {
            format!("Type to search {make} models...")
        }
    });
    let model_hint = Signal::derive(move || {
        let make = ctl.get_value().committed_make();
        if make.is_empty() {
            String::new()
        } else {
            format!("for {make}")
        }
    });

    let on_media_change = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));

        media_name.set(file.as_ref().map(|f| f.name()));
        media.set(file);
        status.set(None);
    };

    let on_color_change = move |ev: web_sys::Event| {
        if let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        {
            color.set(select.value());
        }
    };

    let run_search = move || {
        if submitting.get_untracked() {
            return;
        }
        let Some(file) = media.get_untracked() else {
            alert(NO_MEDIA_NOTICE);
            return;
        };

        let committed = ctl.get_value().criteria_untracked();
        let criteria = match mode.get_untracked() {
            SearchMode::Simple => SearchCriteria::simple(
                &committed,
                &color.get_untracked(),
                &license_plate.get_untracked(),
            ),
            SearchMode::Advanced => SearchCriteria::advanced(
                &committed,
                &color.get_untracked(),
                &license_plate.get_untracked(),
                &description.get_untracked(),
            ),
        };

        submitting.set(true);
        status.set(None);

        let api_client = api_client.get_untracked();
        read_media_file(file, move |upload| {
            let upload = match upload {
                Ok(u) => u,
                Err(msg) => {
                    leptos::logging::warn!("media read failed: {msg}");
                    status.set(Some(SearchStatus::Failed(msg)));
                    submitting.set(false);
                    return;
                }
            };

            spawn_local(async move {
                let outcome = match api_client.search(upload, &criteria).await {
                    Ok(resp) => {
                        if let Some(analysis) = resp.analysis.as_deref() {
                            leptos::logging::log!("search analysis: {analysis}");
                        }
                        SearchStatus::Complete("Search complete.".to_string())
                    }
                    Err(e) if e.kind == ApiErrorKind::Network => {
                        leptos::logging::error!("search request failed: {e}");
                        SearchStatus::Failed(CONNECT_FAILED.to_string())
                    }
                    Err(e) => {
                        leptos::logging::warn!("search rejected: {e}");
                        SearchStatus::Failed(e.message)
                    }
                };

                let _ = status.try_set(Some(outcome));
                let _ = submitting.try_set(false);
            });
        });
    };

    let summary = move || match mode.get() {
        SearchMode::Simple => {
            let chips = SearchCriteria::simple(
                &ctl.get_value().criteria(),
                &color.get(),
                &license_plate.get(),
            )
            .summary_chips();
            (!chips.is_empty()).then(|| ("Searching for:", chips))
        }
        SearchMode::Advanced => {
            let text = description.get();
            (!text.trim().is_empty()).then(|| ("Advanced Query:", vec![query_preview(&text)]))
        }
    };

    let mode_button = move |target: SearchMode, label: &'static str| {
        view! {
            <Button
                variant=if mode.get() == target { ButtonVariant::Default } else { ButtonVariant::Outline }
                size=ButtonSize::Sm
                attr:aria-pressed=move || (mode.get() == target).to_string()
                attr:disabled=move || submitting.get()
                on:click=move |_| mode.set(target)
            >
                {label}
            </Button>
        }
    };

    view! {
        <div class="flex min-h-screen items-start justify-center bg-background px-4 py-10">
            <Card>
                <CardHeader>
                    <CardTitle>"Vehicle Search"</CardTitle>
                    <CardDescription>
                        "Upload footage, then describe the vehicle you are looking for."
                    </CardDescription>
                </CardHeader>

                <CardContent>
                    <div class="flex gap-2" role="group" aria-label="Search mode">
                        {move || mode_button(SearchMode::Simple, "Simple")}
                        {move || mode_button(SearchMode::Advanced, "Advanced")}
                    </div>

                    <div class="flex flex-col gap-2">
                        <Label html_for="media-input">"Media"</Label>
                        <input
                            id="media-input"
                            type="file"
                            accept="image/*,video/*"
                            class="text-sm file:mr-3 file:rounded-md file:border-0 file:bg-secondary file:px-3 file:py-1.5 file:text-sm file:font-medium"
                            disabled=move || submitting.get()
                            on:change=on_media_change
                        />
                        {move || media_name.get().map(|name| view! {
                            <p class="truncate text-xs text-muted-foreground">{name}</p>
                        })}
                    </div>

                    <Show
                        when=move || mode.get() == SearchMode::Simple
                        fallback=move || view! {
                            <div class="flex flex-col gap-2">
                                <Label html_for="description-input">"Description"</Label>
                                <textarea
                                    id="description-input"
                                    rows="4"
                                    class="min-h-24 w-full rounded-md border border-input bg-transparent px-3 py-2 text-sm shadow-xs outline-none focus-visible:ring-2 focus-visible:ring-ring/50"
                                    placeholder="e.g. a red pickup truck with a roof rack"
                                    disabled=move || submitting.get()
                                    prop:value=move || description.get()
                                    on:input=move |ev| {
                                        if let Some(el) = ev
                                            .target()
                                            .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
                                        {
                                            description.set(el.value());
                                        }
                                    }
                                />
                            </div>
                        }
                    >
                        <div class="flex flex-col gap-2">
                            <Label html_for=format!("{}-input", FieldKind::Make)>"Make"</Label>
                            <AutocompleteField
                                kind=FieldKind::Make
                                placeholder=make_placeholder
                                disabled=Signal::derive(move || submitting.get())
                                on_clear=Callback::new(move |_| ctl.get_value().on_clear_make())
                            />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for=format!("{}-input", FieldKind::Model) hint=model_hint>
                                "Model"
                            </Label>
                            <AutocompleteField
                                kind=FieldKind::Model
                                placeholder=model_placeholder
                                readonly=Signal::derive(move || !ctl.get_value().model_enabled())
                                disabled=Signal::derive(move || submitting.get())
                            />
                            <Show when=move || {
                                let c = ctl.get_value();
                                !c.model_enabled() && c.text(FieldKind::Model).is_empty()
                            }>
                                <p class="text-xs text-muted-foreground">
                                    "⬆ Select a make first to search models"
                                </p>
                            </Show>
                        </div>

                        <div class="grid grid-cols-2 gap-4">
                            <div class="flex flex-col gap-2">
                                <Label html_for="color-select">"Color"</Label>
                                <select
                                    id="color-select"
                                    class="h-9 rounded-md border border-input bg-transparent px-3 text-sm shadow-xs outline-none focus-visible:ring-2 focus-visible:ring-ring/50"
                                    disabled=move || submitting.get()
                                    prop:value=move || color.get()
                                    on:change=on_color_change
                                    node_ref=ctl.get_value().color_select_ref()
                                >
                                    <option value="">"Select Color"</option>
                                    {COLORS
                                        .iter()
                                        .map(|c| view! { <option value=*c>{*c}</option> })
                                        .collect_view()}
                                </select>
                            </div>

                            <div class="flex flex-col gap-2">
                                <Label html_for="plate-input">"License plate"</Label>
                                <Input
                                    id="plate-input"
                                    placeholder="Optional"
                                    bind_value=license_plate
                                    disabled=Signal::derive(move || submitting.get())
                                />
                            </div>
                        </div>
                    </Show>

                    {move || summary().map(|(title, chips)| view! {
                        <div class="flex flex-col gap-2 rounded-md border border-border bg-muted p-3 text-sm">
                            <strong class="font-medium">{title}</strong>
                            <div class="flex flex-wrap gap-1.5">
                                {chips
                                    .into_iter()
                                    .map(|c| view! {
                                        <span class="rounded-md bg-background px-2 py-0.5 text-xs break-all">{c}</span>
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    })}
                </CardContent>

                <CardFooter>
                    <Button
                        size=ButtonSize::Lg
                        attr:disabled=move || submitting.get()
                        on:click=move |_| run_search()
                    >
                        <Show
                            when=move || submitting.get()
                            fallback=|| view! { "Execute Search" }
                        >
                            <Spinner />
                            "Analyzing..."
                        </Show>
                    </Button>

                    {move || status.get().map(|s| view! { <StatusAlert status=s /> })}
                </CardFooter>
            </Card>
        </div>
    }
}
