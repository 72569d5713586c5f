use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex w-full max-w-xl flex-col gap-6 rounded-xl border py-6 shadow-sm"}
    clx! {CardHeader, div, "flex flex-col items-start gap-1.5 px-6"}
    clx! {CardTitle, h1, "text-lg leading-none font-semibold"}
    clx! {CardDescription, p, "text-muted-foreground text-sm"}
    clx! {CardContent, div, "flex flex-col gap-5 px-6"}
    clx! {CardFooter, footer, "flex flex-col items-stretch gap-3 px-6"}
}

pub use components::*;
