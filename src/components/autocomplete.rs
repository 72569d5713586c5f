use crate::autocomplete::{FieldKind, PanelView};
use crate::components::ui::{input_class, Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use icons::X;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

const PANEL_CLASS: &str = "absolute top-full left-0 z-20 mt-1 max-h-64 w-full overflow-y-auto rounded-md border border-border bg-popover p-1 text-popover-foreground shadow-md";

/// Text input with a suggestion dropdown, driven by the shared
/// [`crate::state::FormController`].
///
/// `readonly` keeps the input focusable (so a premature focus can be reported)
/// while refusing typing; `disabled` is the hard off switch used during search.
#[component]
pub fn AutocompleteField(
    kind: FieldKind,
    #[prop(into)] placeholder: Signal<String>,
    #[prop(into, optional)] readonly: MaybeProp<bool>,
    #[prop(into, optional)] disabled: MaybeProp<bool>,
    #[prop(optional)] on_clear: Option<Callback<()>>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let ctl = StoredValue::new(app_state.0.search_form.clone());

    let input_id = format!("{kind}-input");
    let listbox_id = format!("{kind}-suggestions");

    let is_readonly = move || readonly.get().unwrap_or(false);

    let on_input = move |ev: web_sys::Event| {
        if let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            ctl.get_value().on_input(kind, input.value());
        }
    };

    let show_clear = move || on_clear.is_some() && !ctl.get_value().text(kind).is_empty();

    let panel = move || match ctl.get_value().view(kind) {
        PanelView::Hidden => None,
        PanelView::Suggestions {
            items,
            highlighted,
            loading,
        } => Some(
            view! {
                <div id=format!("{kind}-suggestions") role="listbox" class=PANEL_CLASS>
                    {loading.then(|| view! {
                        <div class="px-2 py-1.5 text-xs text-muted-foreground">"Searching..."</div>
                    })}
                    {items
                        .into_iter()
                        .enumerate()
                        .map(|(i, item)| {
                            let selected = highlighted == Some(i);
                            view! {
                                <div
                                    id=format!("{kind}-option-{i}")
                                    role="option"
                                    aria-selected=if selected { "true" } else { "false" }
                                    data-selected=selected.to_string()
                                    class="cursor-pointer rounded-sm px-2 py-1.5 text-sm data-[selected=true]:bg-accent data-[selected=true]:text-accent-foreground"
                                    on:mouseenter=move |_| ctl.get_value().on_hover(kind, i)
                                    on:click=move |_| ctl.get_value().on_click(kind, i)
                                >
                                    {item}
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            }
            .into_any(),
        ),
        PanelView::NoResults { text } => Some(
            view! {
                <div class=PANEL_CLASS>
                    <div class="px-2 py-1.5 text-sm text-muted-foreground">
                        {format!("No {} found for \"{}\"", kind.plural(), text)}
                    </div>
                </div>
            }
            .into_any(),
        ),
    };

    let active_descendant = move || match ctl.get_value().view(kind) {
        PanelView::Suggestions {
            highlighted: Some(i),
            ..
        } => format!("{kind}-option-{i}"),
        _ => String::new(),
    };

    view! {
        <div class="relative" node_ref=ctl.get_value().container_ref(kind)>
            <input
                id=input_id
                type="text"
                role="combobox"
                autocomplete="off"
                aria-autocomplete="list"
                aria-controls=listbox_id
                aria-expanded=move || ctl.get_value().view(kind).is_shown().to_string()
                aria-activedescendant=active_descendant
                aria-disabled=move || is_readonly().to_string()
                class=input_class("pr-9")
                placeholder=move || placeholder.get()
                readonly=is_readonly
                disabled=move || disabled.get().unwrap_or(false)
                prop:value=move || ctl.get_value().text(kind)
                on:input=on_input
                on:keydown=move |ev: web_sys::KeyboardEvent| ctl.get_value().on_keydown(kind, &ev)
                on:focus=move |ev: web_sys::FocusEvent| ctl.get_value().on_focus(kind, &ev)
                on:blur=move |_| ctl.get_value().on_blur(kind)
                node_ref=ctl.get_value().input_ref(kind)
            />

            <Show when=show_clear>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="absolute top-1 right-1"
                    attr:aria-label=format!("Clear {}", kind.label())
                    on:click=move |_| {
                        if let Some(cb) = on_clear {
                            cb.run(());
                        }
                    }
                >
                    <X />
                </Button>
            </Show>

            {panel}
        </div>
    }
}
