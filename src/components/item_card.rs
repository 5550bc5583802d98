use crate::components::ui::EmptyState;
use crate::models::{ContentItem, ContentType, Priority};
use crate::util::{format_date, is_safe_href};
use icons::{Check, Code, FileText, Link, RotateCcw, Star, StickyNote, Trash2};
use leptos::prelude::*;

pub(crate) const NO_RECENT_ITEMS: &str = "No recent items. Start by adding some content!";
pub(crate) const NO_ITEMS: &str = "No items found. Add some content to get started!";

/// Type-dependent body of an item card. Every string is user data and is
/// only ever rendered as text.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ItemBody {
    Text(String),
    Placeholder(&'static str),
    Task {
        priority: Option<Priority>,
        due_date: Option<String>,
    },
    Link(String),
    /// A URL with a scheme we refuse to turn into an anchor.
    InertLink(String),
    Code(String),
    Document(String),
}

fn present(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn item_body(item: &ContentItem) -> ItemBody {
    match item.content_type {
        ContentType::Note => present(item.content.as_deref())
            .map(ItemBody::Text)
            .unwrap_or(ItemBody::Placeholder("No content")),
        ContentType::Task => ItemBody::Task {
            priority: item.priority,
            due_date: present(item.due_date.as_deref()),
        },
        ContentType::Link => match present(item.url.as_deref()) {
            Some(url) if is_safe_href(&url) => ItemBody::Link(url),
            Some(url) => ItemBody::InertLink(url),
            None => ItemBody::Placeholder("No URL"),
        },
        ContentType::Code => present(item.content.as_deref())
            .map(ItemBody::Code)
            .unwrap_or(ItemBody::Placeholder("No code")),
        ContentType::Document => item
            .file_name()
            .map(|name| ItemBody::Document(name.to_string()))
            .unwrap_or(ItemBody::Placeholder("No document")),
    }
}

/// `"complete"` for an open task, `"undo"` for a finished one.
pub(crate) fn complete_affordance(item: &ContentItem) -> Option<&'static str> {
    (item.content_type == ContentType::Task).then(|| {
        if item.is_completed {
            "undo"
        } else {
            "complete"
        }
    })
}

#[component]
pub(crate) fn ItemIcon(content_type: ContentType) -> impl IntoView {
    match content_type {
        ContentType::Note => view! { <StickyNote class="size-4" /> }.into_any(),
        ContentType::Task => view! { <Check class="size-4" /> }.into_any(),
        ContentType::Link => view! { <Link class="size-4" /> }.into_any(),
        ContentType::Code => view! { <Code class="size-4" /> }.into_any(),
        ContentType::Document => view! { <FileText class="size-4" /> }.into_any(),
    }
}

fn priority_class(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "bg-emerald-100 text-emerald-700",
        Priority::Medium => "bg-amber-100 text-amber-700",
        Priority::High => "bg-red-100 text-red-700",
    }
}

#[component]
fn ItemBodyView(body: ItemBody) -> impl IntoView {
    match body {
        ItemBody::Text(text) => view! {
            <p class="whitespace-pre-wrap text-sm">{text}</p>
        }
        .into_any(),
        ItemBody::Placeholder(text) => view! {
            <em class="text-xs text-muted-foreground">{text}</em>
        }
        .into_any(),
        ItemBody::Task { priority, due_date } => view! {
            <div class="flex items-center gap-2 text-xs">
                {priority.map(|p| view! {
                    <span class=format!("rounded px-2 py-0.5 font-medium {}", priority_class(p))>
                        {p.to_string()}
                    </span>
                })}
                {due_date.map(|d| view! {
                    <span class="text-muted-foreground">{format!("Due: {}", format_date(&d))}</span>
                })}
            </div>
        }
        .into_any(),
        ItemBody::Link(url) => {
            let href = url.clone();
            view! {
            <a
                class="break-all text-sm text-primary underline underline-offset-4"
                href=href
                target="_blank"
                rel="noopener noreferrer"
            >
                {url}
            </a>
            }
            .into_any()
        }
        ItemBody::InertLink(url) => view! {
            <span class="break-all text-sm text-muted-foreground">{url}</span>
        }
        .into_any(),
        ItemBody::Code(code) => view! {
            <pre class="overflow-x-auto rounded-md bg-muted px-3 py-2 text-xs"><code>{code}</code></pre>
        }
        .into_any(),
        ItemBody::Document(name) => view! {
            <em class="text-sm">{format!("Document: {name}")}</em>
        }
        .into_any(),
    }
}

#[component]
fn StarButton(
    item_id: i64,
    starred: bool,
    #[prop(into)] busy: Signal<bool>,
    on_star: Callback<i64>,
) -> impl IntoView {
    let (title, class) = if starred {
        ("Unstar", "rounded p-1 text-amber-500 hover:bg-accent disabled:opacity-50")
    } else {
        ("Star", "rounded p-1 text-muted-foreground hover:bg-accent disabled:opacity-50")
    };

    view! {
        <button
            type="button"
            data-action="star"
            title=title
            class=class
            disabled=move || busy.get()
            on:click=move |ev| {
                ev.stop_propagation();
                on_star.run(item_id);
            }
        >
            <Star class="size-4" />
        </button>
    }
}

/// Grid card for one item.
#[component]
pub(crate) fn ItemCard(
    item: ContentItem,
    #[prop(into)] busy: Signal<bool>,
    on_star: Callback<i64>,
    on_complete: Callback<i64>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    let id = item.id;
    let affordance = complete_affordance(&item);
    let body = item_body(&item);
    let created = item.created_at.as_deref().map(format_date).unwrap_or_default();

    view! {
        <div data-name="ItemCard" data-id=id.to_string() class="flex flex-col gap-3 rounded-lg border bg-card p-4 shadow-xs">
            <div class="flex items-start justify-between gap-2">
                <div class="flex min-w-0 items-center gap-2">
                    <ItemIcon content_type=item.content_type />
                    <div class="truncate text-sm font-medium">{item.title.clone()}</div>
                </div>
                <span class="shrink-0 rounded bg-muted px-2 py-0.5 text-[11px] text-muted-foreground">
                    {item.content_type.to_string()}
                </span>
            </div>

            <div class="min-h-6">
                <ItemBodyView body=body />
            </div>

            <div class="flex items-center justify-between text-xs text-muted-foreground">
                <span>{created}</span>
                <div class="flex items-center gap-1">
                    <StarButton item_id=id starred=item.is_starred busy=busy on_star=on_star />
                    {affordance.map(|action| {
                        let title = if action == "undo" { "Mark as not done" } else { "Mark complete" };
                        view! {
                        <button
                            type="button"
                            data-action=action
                            title=title
                            class="rounded p-1 hover:bg-accent disabled:opacity-50"
                            disabled=move || busy.get()
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_complete.run(id);
                            }
                        >
                            {if action == "undo" {
                                view! { <RotateCcw class="size-4" /> }.into_any()
                            } else {
                                view! { <Check class="size-4" /> }.into_any()
                            }}
                        </button>
                        }
                    })}
                    <button
                        type="button"
                        data-action="delete"
                        title="Delete"
                        class="rounded p-1 hover:bg-accent hover:text-destructive disabled:opacity-50"
                        disabled=move || busy.get()
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_delete.run(id);
                        }
                    >
                        <Trash2 class="size-4" />
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Compact row used in the dashboard's recent-items list.
#[component]
pub(crate) fn RecentItemRow(
    item: ContentItem,
    #[prop(into)] busy: Signal<bool>,
    on_star: Callback<i64>,
) -> impl IntoView {
    let created = item.created_at.as_deref().map(format_date).unwrap_or_default();

    view! {
        <div data-name="RecentItem" data-id=item.id.to_string() class="flex items-center gap-3 rounded-md border px-3 py-2">
            <div class="text-muted-foreground">
                <ItemIcon content_type=item.content_type />
            </div>
            <div class="min-w-0 flex-1">
                <h4 class="truncate text-sm font-medium">{item.title.clone()}</h4>
                <p class="text-xs text-muted-foreground">
                    {format!("{created} • {}", item.content_type)}
                </p>
            </div>
            <StarButton item_id=item.id starred=item.is_starred busy=busy on_star=on_star />
        </div>
    }
}

#[component]
pub(crate) fn RecentItems(
    items: Vec<ContentItem>,
    is_busy: Callback<i64, bool>,
    on_star: Callback<i64>,
) -> impl IntoView {
    if items.is_empty() {
        return view! { <EmptyState>{NO_RECENT_ITEMS}</EmptyState> }.into_any();
    }

    view! {
        <div data-name="RecentItems" class="flex flex-col gap-2">
            {items
                .into_iter()
                .map(|item| {
                    let id = item.id;
                    view! {
                        <RecentItemRow
                            item=item
                            busy=Signal::derive(move || is_busy.run(id))
                            on_star=on_star
                        />
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(content_type: ContentType) -> ContentItem {
        ContentItem {
            id: 1,
            title: "t".to_string(),
            content_type,
            content: None,
            created_at: None,
            updated_at: None,
            is_starred: false,
            category: None,
            priority: None,
            due_date: None,
            is_completed: false,
            url: None,
            language: None,
            file: None,
            tags: None,
        }
    }

    #[test]
    fn test_note_body_is_raw_content_or_placeholder() {
        let mut note = item(ContentType::Note);
        assert_eq!(item_body(&note), ItemBody::Placeholder("No content"));

        note.content = Some("<b>hi</b>".to_string());
        // Kept verbatim as data; the view inserts it as a text node.
        assert_eq!(item_body(&note), ItemBody::Text("<b>hi</b>".to_string()));
    }

    #[test]
    fn test_task_body_carries_priority_and_due_date() {
        let mut task = item(ContentType::Task);
        task.priority = Some(Priority::High);
        task.due_date = Some("2024-06-01".to_string());
        assert_eq!(
            item_body(&task),
            ItemBody::Task {
                priority: Some(Priority::High),
                due_date: Some("2024-06-01".to_string()),
            }
        );
    }

    #[test]
    fn test_link_body_refuses_script_urls() {
        let mut link = item(ContentType::Link);
        assert_eq!(item_body(&link), ItemBody::Placeholder("No URL"));

        link.url = Some("https://rust-lang.org".to_string());
        assert_eq!(item_body(&link), ItemBody::Link("https://rust-lang.org".to_string()));

        link.url = Some("javascript:alert(1)".to_string());
        assert_eq!(
            item_body(&link),
            ItemBody::InertLink("javascript:alert(1)".to_string())
        );
    }

    #[test]
    fn test_code_and_document_bodies() {
        let mut code = item(ContentType::Code);
        assert_eq!(item_body(&code), ItemBody::Placeholder("No code"));
        code.content = Some("fn main() {}".to_string());
        assert_eq!(item_body(&code), ItemBody::Code("fn main() {}".to_string()));

        let mut doc = item(ContentType::Document);
        assert_eq!(item_body(&doc), ItemBody::Placeholder("No document"));
        doc.file = Some("documents/2024/01/02/cv.pdf".to_string());
        assert_eq!(item_body(&doc), ItemBody::Document("cv.pdf".to_string()));
    }

    #[test]
    fn test_complete_affordance_follows_completion() {
        let mut task = item(ContentType::Task);
        assert_eq!(complete_affordance(&task), Some("complete"));
        task.is_completed = true;
        assert_eq!(complete_affordance(&task), Some("undo"));
        assert_eq!(complete_affordance(&item(ContentType::Note)), None);
    }
}
