mod api;
mod app;
mod components;
mod models;
mod pages;
mod session;
mod state;
mod util;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::app::{PageKind, PageShell};
    use crate::components::item_card::{ItemCard, RecentItems, NO_RECENT_ITEMS};
    use crate::components::toast::ToastHost;
    use crate::models::{ContentItem, ContentType};
    use crate::state::Toaster;
    use gloo_timers::future::TimeoutFuture;
    use leptos::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Fresh container appended to `<body>`.
    fn probe_root() -> web_sys::HtmlElement {
        let doc = document();
        let el = doc
            .create_element("div")
            .expect("create probe element")
            .dyn_into::<web_sys::HtmlElement>()
            .expect("probe is an HtmlElement");
        doc.body()
            .expect("document has a body")
            .append_child(&el)
            .expect("append probe");
        el
    }

    fn item(id: i64, content_type: ContentType, title: &str) -> ContentItem {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "content_type": content_type,
        }))
        .expect("item should build")
    }

    fn noop() -> Callback<i64> {
        Callback::new(|_: i64| {})
    }

    #[wasm_bindgen_test]
    fn test_item_card_renders_markup_as_text() {
        let root = probe_root();
        let mut hostile = item(1, ContentType::Note, "<script>alert(1)</script>");
        hostile.content = Some("<img src=x onerror=alert(1)>".to_string());

        leptos::mount::mount_to(root.clone(), move || {
            view! {
                <ItemCard
                    item=hostile
                    busy=Signal::stored(false)
                    on_star=noop()
                    on_complete=noop()
                    on_delete=noop()
                />
            }
        })
        .forget();

        let html = root.inner_html();
        assert!(html.contains("&lt;script&gt;"), "{html}");
        assert!(root.query_selector("script").ok().flatten().is_none());
        assert!(root.query_selector("img").ok().flatten().is_none());
    }

    #[wasm_bindgen_test]
    fn test_task_card_offers_complete_or_undo() {
        let root = probe_root();
        let open = item(2, ContentType::Task, "Open task");
        let mut done = item(3, ContentType::Task, "Done task");
        done.is_completed = true;

        leptos::mount::mount_to(root.clone(), move || {
            view! {
                <ItemCard item=open busy=Signal::stored(false) on_star=noop() on_complete=noop() on_delete=noop() />
                <ItemCard item=done busy=Signal::stored(false) on_star=noop() on_complete=noop() on_delete=noop() />
            }
        })
        .forget();

        let open_card = root
            .query_selector("[data-id='2']")
            .ok()
            .flatten()
            .expect("open task card");
        assert!(open_card.query_selector("[data-action=complete]").ok().flatten().is_some());

        let done_card = root
            .query_selector("[data-id='3']")
            .ok()
            .flatten()
            .expect("done task card");
        assert!(done_card.query_selector("[data-action=undo]").ok().flatten().is_some());
        assert!(done_card.query_selector("[data-action=complete]").ok().flatten().is_none());
    }

    #[wasm_bindgen_test]
    fn test_link_card_anchors_only_safe_urls() {
        let root = probe_root();
        let mut safe = item(4, ContentType::Link, "Docs");
        safe.url = Some("https://example.com/a".to_string());
        let mut unsafe_url = item(5, ContentType::Link, "Trap");
        unsafe_url.url = Some("javascript:alert(1)".to_string());

        leptos::mount::mount_to(root.clone(), move || {
            view! {
                <ItemCard item=safe busy=Signal::stored(false) on_star=noop() on_complete=noop() on_delete=noop() />
                <ItemCard item=unsafe_url busy=Signal::stored(false) on_star=noop() on_complete=noop() on_delete=noop() />
            }
        })
        .forget();

        let anchors = root.query_selector_all("a").expect("query anchors");
        assert_eq!(anchors.length(), 1);
        let anchor = anchors
            .item(0)
            .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            .expect("anchor element");
        assert_eq!(anchor.get_attribute("href").as_deref(), Some("https://example.com/a"));
        assert_eq!(anchor.text_content().as_deref(), Some("https://example.com/a"));
        assert!(root.text_content().unwrap_or_default().contains("javascript:alert(1)"));
    }

    #[wasm_bindgen_test]
    fn test_auth_page_starts_on_login_card() {
        let root = probe_root();

        leptos::mount::mount_to(root.clone(), || view! { <PageShell kind=PageKind::Auth /> })
            .forget();

        assert!(root.query_selector("[data-name=LoginCard]").ok().flatten().is_some());
        assert!(root.query_selector("[data-name=RegisterCard]").ok().flatten().is_none());
    }

    #[wasm_bindgen_test]
    fn test_empty_recent_items_shows_placeholder_only() {
        let root = probe_root();

        leptos::mount::mount_to(root.clone(), move || {
            view! {
                <RecentItems
                    items=vec![]
                    is_busy=Callback::new(|_: i64| false)
                    on_star=noop()
                />
            }
        })
        .forget();

        assert!(root.text_content().unwrap_or_default().contains(NO_RECENT_ITEMS));
        assert!(root.query_selector("[data-name=RecentItem]").ok().flatten().is_none());
    }

    #[wasm_bindgen_test]
    async fn test_newer_toast_replaces_older_one() {
        let root = probe_root();
        let slot: Rc<Cell<Option<Toaster>>> = Rc::new(Cell::new(None));

        let slot_in = slot.clone();
        leptos::mount::mount_to(root.clone(), move || {
            let toaster = Toaster::new();
            slot_in.set(Some(toaster));
            view! { <ToastHost toaster=toaster /> }
        })
        .forget();

        let toaster = slot.get().expect("toaster created during mount");
        toaster.success("first");
        toaster.error("second");
        TimeoutFuture::new(50).await;

        let toasts = root
            .query_selector_all("[data-toast]")
            .expect("query toasts");
        assert_eq!(toasts.length(), 1);
        let text = toasts
            .item(0)
            .and_then(|n| n.text_content())
            .unwrap_or_default();
        assert!(text.contains("second"), "{text}");
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    app::mount_controllers();
}
