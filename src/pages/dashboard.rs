use crate::components::item_card::{ItemCard, RecentItems, NO_ITEMS};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, EmptyState, Input, ItemGrid, Label,
    NativeSelect, Spinner, StatGrid, Textarea,
};
use crate::models::{Category, ContentType, Priority};
use crate::state::{
    extra_fields, AppContext, ContentView, DashboardState, ExtraFields, ItemDraft, LoadStatus,
    SubmitState,
};
use crate::util::filter_items;
use icons::{LogOut, Plus, Search};
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::{event_target_checked, window_event_listener};

/// An action waiting on the in-app confirmation dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingConfirm {
    Logout,
    Delete(i64),
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let dash = DashboardState::new(app_state.0);

    let add_open: RwSignal<bool> = RwSignal::new(false);
    let confirm: RwSignal<Option<PendingConfirm>> = RwSignal::new(None);

    dash.verify_session();

    // Esc closes whichever overlay is open.
    let key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            add_open.set(false);
            confirm.set(None);
        }
    });
    on_cleanup(move || key_handle.remove());

    view! {
        <Show
            when=move || dash.session_ok.get()
            fallback=|| view! {
                <div class="flex min-h-screen items-center justify-center gap-2 text-sm text-muted-foreground">
                    <Spinner />
                    "Checking session..."
                </div>
            }
        >
            <div class="flex min-h-screen bg-background">
                <Sidebar dash=dash add_open=add_open confirm=confirm />

                <main class="flex min-w-0 flex-1 flex-col">
                    <DashboardHeader dash=dash />
                    <div class="flex-1 p-6">
                        {move || match dash.current_view.get() {
                            ContentView::Dashboard => view! { <DashboardOverview dash=dash /> }.into_any(),
                            _ => view! { <ContentList dash=dash confirm=confirm /> }.into_any(),
                        }}
                    </div>
                </main>
            </div>
        </Show>

        <Show when=move || add_open.get() fallback=|| ()>
            <AddItemModal dash=dash open=add_open />
        </Show>

        {move || {
            confirm
                .get()
                .map(|pending| view! { <ConfirmDialog dash=dash confirm=confirm pending=pending /> })
        }}
    }
}

#[component]
fn Sidebar(
    dash: DashboardState,
    add_open: RwSignal<bool>,
    confirm: RwSignal<Option<PendingConfirm>>,
) -> impl IntoView {
    view! {
        <aside class="flex w-56 shrink-0 flex-col gap-3 border-r border-border bg-muted/30 p-3">
            <div class="px-2 pt-1 text-sm font-semibold">"Organizer"</div>

            <Button class="w-full" size=ButtonSize::Sm on:click=move |_| add_open.set(true)>
                <Plus class="size-4" />
                "Add item"
            </Button>

            <nav class="flex flex-1 flex-col gap-0.5">
                {ContentView::NAV
                    .into_iter()
                    .map(|content_view| {
                        let nav_class = move || {
                            if dash.current_view.get() == content_view {
                                "rounded-md bg-accent px-2 py-1.5 text-left text-sm font-medium text-accent-foreground"
                            } else {
                                "rounded-md px-2 py-1.5 text-left text-sm text-muted-foreground hover:bg-accent/60 hover:text-foreground"
                            }
                        };
                        view! {
                            <button
                                type="button"
                                data-view=content_view.slug()
                                class=nav_class
                                on:click=move |_| dash.navigate(content_view)
                            >
                                {content_view.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Sm
                class="w-full justify-start text-muted-foreground"
                attr:data-action="logout"
                on:click=move |_| confirm.set(Some(PendingConfirm::Logout))
            >
                <LogOut class="size-4" />
                "Log out"
            </Button>
        </aside>
    }
}

#[component]
fn DashboardHeader(dash: DashboardState) -> impl IntoView {
    let username = move || dash.user.get().map(|u| u.username).unwrap_or_default();
    let is_list = move || dash.current_view.get() != ContentView::Dashboard;

    view! {
        <header class="flex h-14 items-center justify-between gap-4 border-b border-border px-6">
            <h1 class="text-base font-semibold">{move || dash.current_view.get().label()}</h1>

            <div class="flex items-center gap-3">
                <Show when=is_list fallback=|| ()>
                    <div class="relative">
                        <Search class="pointer-events-none absolute top-2.5 left-2.5 size-4 text-muted-foreground" />
                        <Input
                            class="w-64 pl-8"
                            r#type="search"
                            placeholder="Search items..."
                            bind_value=dash.search_query
                        />
                    </div>
                </Show>
                <span class="text-sm text-muted-foreground">{username}</span>
            </div>
        </header>
    }
}

#[component]
fn StatCard(label: &'static str, value: u64) -> impl IntoView {
    view! {
        <Card class="gap-1 py-4">
            <CardContent>
                <div class="text-2xl font-semibold">{value.to_string()}</div>
                <div class="text-xs text-muted-foreground">{label}</div>
            </CardContent>
        </Card>
    }
}

#[component]
fn DashboardOverview(dash: DashboardState) -> impl IntoView {
    let on_star = Callback::new(move |id: i64| dash.toggle_star(id));
    let is_busy = Callback::new(move |id: i64| dash.is_item_pending(id));

    move || match dash.stats.get() {
        LoadStatus::Loading => view! { <EmptyState>"Loading..."</EmptyState> }.into_any(),
        LoadStatus::Failed => view! {
            <EmptyState>
                <span class="text-destructive">"Error loading dashboard data"</span>
            </EmptyState>
        }
        .into_any(),
        LoadStatus::Ready(stats) => view! {
            <div class="flex flex-col gap-6">
                <StatGrid>
                    <StatCard label="Total Items" value=stats.total_items />
                    <StatCard label="Completed Tasks" value=stats.completed_tasks />
                    <StatCard label="Starred Items" value=stats.starred_items />
                    <StatCard label="Pending Tasks" value=stats.pending_tasks />
                </StatGrid>

                <section class="flex flex-col gap-2">
                    <h2 class="text-sm font-medium">"Recent Items"</h2>
                    <RecentItems items=stats.recent_items is_busy=is_busy on_star=on_star />
                </section>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn ContentList(dash: DashboardState, confirm: RwSignal<Option<PendingConfirm>>) -> impl IntoView {
    let on_star = Callback::new(move |id: i64| dash.toggle_star(id));
    let on_complete = Callback::new(move |id: i64| dash.toggle_complete(id));
    let on_delete = Callback::new(move |id: i64| confirm.set(Some(PendingConfirm::Delete(id))));

    move || match dash.list.get() {
        LoadStatus::Loading => view! { <EmptyState>"Loading..."</EmptyState> }.into_any(),
        LoadStatus::Failed => view! {
            <EmptyState>
                <span class="text-destructive">"Error loading items"</span>
            </EmptyState>
        }
        .into_any(),
        LoadStatus::Ready(items) if items.is_empty() => {
            view! { <EmptyState>{NO_ITEMS}</EmptyState> }.into_any()
        }
        LoadStatus::Ready(items) => {
            let shown = filter_items(&items, &dash.search_query.get());
            if shown.is_empty() {
                return view! { <EmptyState>"No items match your search."</EmptyState> }.into_any();
            }

            view! {
                <ItemGrid>
                    {shown
                        .into_iter()
                        .map(|item| {
                            let id = item.id;
                            view! {
                                <ItemCard
                                    item=item
                                    busy=Signal::derive(move || dash.is_item_pending(id))
                                    on_star=on_star
                                    on_complete=on_complete
                                    on_delete=on_delete
                                />
                            }
                        })
                        .collect_view()}
                </ItemGrid>
            }
            .into_any()
        }
    }
}

#[component]
fn AddItemModal(dash: DashboardState, open: RwSignal<bool>) -> impl IntoView {
    let content_type: RwSignal<String> = RwSignal::new(ContentType::default().to_string());
    let title: RwSignal<String> = RwSignal::new(String::new());
    let content: RwSignal<String> = RwSignal::new(String::new());
    let category: RwSignal<String> = RwSignal::new(Category::default().to_string());
    let priority: RwSignal<String> = RwSignal::new(Priority::default().to_string());
    let due_date: RwSignal<String> = RwSignal::new(String::new());
    let url: RwSignal<String> = RwSignal::new(String::new());
    let language: RwSignal<String> = RwSignal::new(String::new());
    let tags: RwSignal<String> = RwSignal::new(String::new());
    let is_starred: RwSignal<bool> = RwSignal::new(false);
    let status: RwSignal<SubmitState> = RwSignal::new(SubmitState::Idle);

    let selected_type = Signal::derive(move || {
        content_type
            .get()
            .parse::<ContentType>()
            .unwrap_or_default()
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let draft = ItemDraft {
            content_type: selected_type.get_untracked(),
            title: title.get_untracked(),
            content: content.get_untracked(),
            category: category.get_untracked().parse().unwrap_or_default(),
            priority: priority.get_untracked().parse().unwrap_or_default(),
            due_date: due_date.get_untracked(),
            url: url.get_untracked(),
            language: language.get_untracked(),
            tags: tags.get_untracked(),
            is_starred: is_starred.get_untracked(),
        };

        if draft.title.trim().is_empty() {
            status.set(SubmitState::Error("Title is required".to_string()));
            return;
        }

        dash.add_item(draft.to_request(), status, move || open.set(false));
    };

    let type_options: Vec<(&'static str, &'static str)> = ContentType::ALL
        .into_iter()
        .map(|t| (<&'static str>::from(t), t.label()))
        .collect();

    view! {
        <div
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
            on:click=move |_| open.set(false)
        >
            <div
                data-name="AddItemModal"
                class="w-full max-w-md rounded-md border border-border bg-background p-4 shadow-lg"
                on:click=|ev| ev.stop_propagation()
            >
                <div class="mb-3 text-sm font-medium">"Add new item"</div>

                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="item-type">"Type"</Label>
                        <NativeSelect id="item-type" name="content_type" options=type_options bind_value=content_type />
                    </div>

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="item-title">"Title"</Label>
                        <Input id="item-title" name="title" bind_value=title required=true autofocus=true />
                    </div>

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="item-content">"Content"</Label>
                        <Textarea id="item-content" name="content" bind_value=content />
                    </div>

                    {move || match extra_fields(selected_type.get()) {
                        ExtraFields::Task => view! {
                            <div class="grid grid-cols-2 gap-3">
                                <div class="flex flex-col gap-1.5">
                                    <Label html_for="item-priority">"Priority"</Label>
                                    <NativeSelect
                                        id="item-priority"
                                        name="priority"
                                        options=vec![("low", "Low"), ("medium", "Medium"), ("high", "High")]
                                        bind_value=priority
                                    />
                                </div>
                                <div class="flex flex-col gap-1.5">
                                    <Label html_for="item-due-date">"Due date"</Label>
                                    <Input id="item-due-date" name="due_date" r#type="date" bind_value=due_date />
                                </div>
                            </div>
                        }
                        .into_any(),
                        ExtraFields::Link => view! {
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="item-url">"URL"</Label>
                                <Input
                                    id="item-url"
                                    name="url"
                                    r#type="url"
                                    placeholder="https://"
                                    bind_value=url
                                />
                            </div>
                        }
                        .into_any(),
                        ExtraFields::Code => view! {
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="item-language">"Language"</Label>
                                <Input id="item-language" name="language" placeholder="rust" bind_value=language />
                            </div>
                        }
                        .into_any(),
                        ExtraFields::None => ().into_any(),
                    }}

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="item-category">"Category"</Label>
                        <NativeSelect
                            id="item-category"
                            name="category"
                            options=vec![("personal", "Personal"), ("work", "Work")]
                            bind_value=category
                        />
                    </div>

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="item-tags">"Tags"</Label>
                        <Input id="item-tags" name="tags" placeholder="comma,separated" bind_value=tags />
                    </div>

                    <label class="flex items-center gap-2 text-xs text-muted-foreground">
                        <input
                            type="checkbox"
                            name="is_starred"
                            prop:checked=move || is_starred.get()
                            on:change=move |ev| is_starred.set(event_target_checked(&ev))
                        />
                        "Star this item"
                    </label>

                    {move || {
                        status.get().error().map(|e| {
                            view! { <p class="text-xs text-destructive">{e.to_string()}</p> }
                        })
                    }}

                    <div class="flex justify-end gap-2 pt-1">
                        <button
                            type="button"
                            class="h-8 rounded-md border border-border bg-background px-3 text-sm shadow-xs hover:bg-accent"
                            on:click=move |_| open.set(false)
                        >
                            "Cancel"
                        </button>
                        <Button size=ButtonSize::Sm attr:disabled=move || status.get().is_pending()>
                            {move || if status.get().is_pending() { "Saving..." } else { "Add item" }}
                        </Button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[component]
fn ConfirmDialog(
    dash: DashboardState,
    confirm: RwSignal<Option<PendingConfirm>>,
    pending: PendingConfirm,
) -> impl IntoView {
    let status: RwSignal<SubmitState> = RwSignal::new(SubmitState::Idle);

    let (title, body, action) = match pending {
        PendingConfirm::Logout => (
            "Log out?",
            "You will need to sign in again to see your items.",
            "Log out",
        ),
        PendingConfirm::Delete(_) => ("Delete item?", "This cannot be undone.", "Delete"),
    };

    let on_confirm = move |_: ev::MouseEvent| match pending {
        PendingConfirm::Logout => dash.logout(status),
        PendingConfirm::Delete(id) => {
            confirm.set(None);
            dash.delete_item(id);
        }
    };

    view! {
        <div
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
            on:click=move |_| confirm.set(None)
        >
            <div
                data-name="ConfirmDialog"
                class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg"
                on:click=|ev| ev.stop_propagation()
            >
                <div class="mb-3 space-y-1">
                    <div class="text-sm font-medium">{title}</div>
                    <div class="text-xs text-muted-foreground">{body}</div>
                </div>

                {move || {
                    status.get().error().map(|e| {
                        view! { <p class="mb-2 text-xs text-destructive">{e.to_string()}</p> }
                    })
                }}

                <div class="flex justify-end gap-2">
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=move |_| confirm.set(None)
                    >
                        "Cancel"
                    </Button>
                    <Button
                        variant=ButtonVariant::Destructive
                        size=ButtonSize::Sm
                        attr:data-action="confirm"
                        attr:disabled=move || status.get().is_pending()
                        on:click=on_confirm
                    >
                        {action}
                    </Button>
                </div>
            </div>
        </div>
    }
}
