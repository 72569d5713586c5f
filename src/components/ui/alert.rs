use crate::state::SearchStatus;
use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm"}
    clx! {AlertDescription, p, "text-sm [&_p]:leading-relaxed"}
}

pub use components::*;

#[component]
pub fn StatusAlert(status: SearchStatus) -> impl IntoView {
    let (class, text) = match status {
        SearchStatus::Complete(msg) => ("border-success/40 bg-success/10", msg),
        SearchStatus::Failed(msg) => ("border-destructive/40 bg-destructive/10 text-destructive", msg),
    };

    view! {
        <Alert class=class attr:role="status">
            <AlertDescription>{text}</AlertDescription>
        </Alert>
    }
}
