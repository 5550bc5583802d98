use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-4 rounded-xl border py-5 shadow-sm"}
    clx! {CardHeader, div, "flex flex-col items-start gap-1.5 px-5"}
    clx! {CardTitle, h2, "leading-none font-semibold"}
    clx! {CardDescription, p, "text-muted-foreground text-sm"}
    clx! {CardContent, div, "px-5"}

    // Dashboard layout pieces.
    clx! {StatGrid, div, "grid grid-cols-2 gap-3 md:grid-cols-4"}
    clx! {ItemGrid, div, "grid grid-cols-1 gap-3 sm:grid-cols-2 xl:grid-cols-3"}
    clx! {EmptyState, div, "rounded-md border border-dashed px-4 py-8 text-center text-xs text-muted-foreground"}
}

#[allow(unused_imports)]
pub use components::*;
