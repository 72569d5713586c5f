use leptos::prelude::*;
use tw_merge::*;

/// Field label with an optional muted hint after the text ("for Toyota").
#[component]
pub fn Label(
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] html_for: String,
    #[prop(optional, into)] hint: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let class = tw_merge!(
        "flex items-baseline gap-2 text-sm leading-none font-medium select-none",
        class
    );

    view! {
        <label class=class r#for=html_for>
            {children()}
            {move || {
                hint.get()
                    .filter(|h| !h.is_empty())
                    .map(|h| view! { <span class="text-xs font-normal text-muted-foreground">{h}</span> })
            }}
        </label>
    }
}
