use super::{report_failure, AppState, SubmitState, Toaster};
use crate::api::{ApiClient, ApiResult, ContentFilter, CreateItemRequest};
use crate::models::{Category, ContentItem, ContentType, CurrentUser, DashboardStats};
use crate::session::{redirect, LOGIN_PATH, ROOT_PATH};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use strum::IntoStaticStr;

/// What the main area is showing. Changed only by sidebar navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ContentView {
    #[default]
    Dashboard,
    All,
    Notes,
    Tasks,
    Links,
    Code,
    Documents,
    Starred,
    Work,
    Personal,
}

impl ContentView {
    pub const NAV: [ContentView; 10] = [
        ContentView::Dashboard,
        ContentView::All,
        ContentView::Notes,
        ContentView::Tasks,
        ContentView::Links,
        ContentView::Code,
        ContentView::Documents,
        ContentView::Starred,
        ContentView::Work,
        ContentView::Personal,
    ];

    pub fn slug(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentView::Dashboard => "Dashboard",
            ContentView::All => "All Items",
            ContentView::Notes => "Notes",
            ContentView::Tasks => "Tasks",
            ContentView::Links => "Links",
            ContentView::Code => "Code Snippets",
            ContentView::Documents => "Documents",
            ContentView::Starred => "Starred Items",
            ContentView::Work => "Work Items",
            ContentView::Personal => "Personal Items",
        }
    }

    /// `None` for the stats dashboard, which is not a list.
    pub fn filter(self) -> Option<ContentFilter> {
        Some(match self {
            ContentView::Dashboard => return None,
            ContentView::All => ContentFilter::All,
            ContentView::Notes => ContentFilter::Type(ContentType::Note),
            ContentView::Tasks => ContentFilter::Type(ContentType::Task),
            ContentView::Links => ContentFilter::Type(ContentType::Link),
            ContentView::Code => ContentFilter::Type(ContentType::Code),
            ContentView::Documents => ContentFilter::Type(ContentType::Document),
            ContentView::Starred => ContentFilter::Starred,
            ContentView::Work => ContentFilter::Category(Category::Work),
            ContentView::Personal => ContentFilter::Category(Category::Personal),
        })
    }
}

/// Outcome of the latest fenced load for one region of the page.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum LoadStatus<T> {
    Loading,
    Ready(T),
    Failed,
}

/// Dashboard controller state. Every field is a signal, so the whole struct
/// is `Copy` and can be moved into any handler.
#[derive(Clone, Copy)]
pub(crate) struct DashboardState {
    pub api_client: RwSignal<ApiClient>,
    pub toaster: Toaster,

    /// Set once the session probe gets a success status; nothing loads before that.
    pub session_ok: RwSignal<bool>,
    /// Whatever the probe body told us, for the header only.
    pub user: RwSignal<Option<CurrentUser>>,

    pub current_view: RwSignal<ContentView>,
    pub stats: RwSignal<LoadStatus<DashboardStats>>,
    pub list: RwSignal<LoadStatus<Vec<ContentItem>>>,
    pub search_query: RwSignal<String>,

    /// Bumped on every view load; responses carrying an older id are dropped.
    pub request_id: RwSignal<u64>,

    /// Items with a star/complete/delete call in flight.
    pub pending_items: RwSignal<Vec<i64>>,
}

impl DashboardState {
    pub fn new(app: AppState) -> Self {
        Self {
            api_client: app.api_client,
            toaster: app.toaster,
            session_ok: RwSignal::new(false),
            user: RwSignal::new(None),
            current_view: RwSignal::new(ContentView::Dashboard),
            stats: RwSignal::new(LoadStatus::Loading),
            list: RwSignal::new(LoadStatus::Loading),
            search_query: RwSignal::new(String::new()),
            request_id: RwSignal::new(0),
            pending_items: RwSignal::new(vec![]),
        }
    }

    fn next_request_id(self) -> u64 {
        let rid = self.request_id.get_untracked().saturating_add(1);
        self.request_id.set(rid);
        rid
    }

    fn is_current(self, rid: u64) -> bool {
        self.request_id.get_untracked() == rid
    }

    /// Advisory only: the server still checks every request.
    pub fn verify_session(self) {
        let api_client = self.api_client.get_untracked();
        spawn_local(async move {
            match api_client.current_user().await {
                Ok(user) => {
                    self.user.set(user);
                    self.session_ok.set(true);
                    self.refresh();
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("session check failed: {e}").into());
                    redirect(LOGIN_PATH);
                }
            }
        });
    }

    pub fn navigate(self, view: ContentView) {
        self.current_view.set(view);
        self.search_query.set(String::new());

        // Before the session probe answers, the probe itself loads the view.
        if self.session_ok.get_untracked() {
            self.refresh();
        }
    }

    /// Re-fetch whatever the active view shows.
    pub fn refresh(self) {
        let view = self.current_view.get_untracked();
        match view.filter() {
            None => self.load_dashboard_data(),
            Some(filter) => self.load_content_view(filter),
        }
    }

    /// Counters already on screen stay up while a refresh is in flight.
    pub fn load_dashboard_data(self) {
        let rid = self.next_request_id();
        if !matches!(self.stats.get_untracked(), LoadStatus::Ready(_)) {
            self.stats.set(LoadStatus::Loading);
        }
        let api_client = self.api_client.get_untracked();

        spawn_local(async move {
            let result = api_client.dashboard_stats().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("dashboard stats: {e}").into());
            }
            self.apply_stats(rid, result);
        });
    }

    /// Returns `false` when `rid` is stale and the result was dropped.
    pub(crate) fn apply_stats(self, rid: u64, result: ApiResult<DashboardStats>) -> bool {
        if !self.is_current(rid) {
            return false;
        }

        match result {
            Ok(stats) => self.stats.set(LoadStatus::Ready(stats)),
            Err(e) => {
                self.stats.set(LoadStatus::Failed);
                if e.is_transport() {
                    self.toaster
                        .error("Network error. Please check your connection.");
                } else {
                    self.toaster.error("Error loading dashboard data");
                }
            }
        }
        true
    }

    /// "Loading..." is shown before the request leaves.
    pub fn load_content_view(self, filter: ContentFilter) {
        let rid = self.next_request_id();
        self.list.set(LoadStatus::Loading);
        let api_client = self.api_client.get_untracked();

        spawn_local(async move {
            let result = api_client.list_items(filter).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("content list: {e}").into());
            }
            self.apply_list(rid, result);
        });
    }

    /// Returns `false` when `rid` is stale and the result was dropped.
    pub(crate) fn apply_list(self, rid: u64, result: ApiResult<Vec<ContentItem>>) -> bool {
        if !self.is_current(rid) {
            return false;
        }

        match result {
            Ok(items) => self.list.set(LoadStatus::Ready(items)),
            Err(e) => {
                self.list.set(LoadStatus::Failed);
                self.toaster.error(e.describe("Error loading items"));
            }
        }
        true
    }

    pub fn is_item_pending(self, item_id: i64) -> bool {
        self.pending_items.with(|p| p.contains(&item_id))
    }

    /// Fire the call, then re-fetch the active view whatever the outcome.
    fn run_item_action<F, Fut>(self, item_id: i64, action: F, ok: &'static str, failed: &'static str)
    where
        F: FnOnce(ApiClient) -> Fut + 'static,
        Fut: Future<Output = ApiResult<()>> + 'static,
    {
        if self.pending_items.with_untracked(|p| p.contains(&item_id)) {
            return;
        }
        self.pending_items.update(|p| p.push(item_id));

        let api_client = self.api_client.get_untracked();
        spawn_local(async move {
            let result = action(api_client).await;
            self.pending_items.update(|p| p.retain(|id| *id != item_id));

            match result {
                Ok(()) => self.toaster.success(ok),
                Err(e) => self.toaster.error(e.describe(failed)),
            }
            self.refresh();
        });
    }

    pub fn toggle_star(self, item_id: i64) {
        self.run_item_action(
            item_id,
            move |c| async move { c.toggle_star(item_id).await },
            "Item updated!",
            "Error updating item",
        );
    }

    pub fn toggle_complete(self, item_id: i64) {
        self.run_item_action(
            item_id,
            move |c| async move { c.toggle_complete(item_id).await },
            "Task updated!",
            "Error updating task",
        );
    }

    pub fn delete_item(self, item_id: i64) {
        self.run_item_action(
            item_id,
            move |c| async move { c.delete_item(item_id).await },
            "Item deleted",
            "Error deleting item",
        );
    }

    /// `on_created` runs only on success (closes the modal).
    pub fn add_item(
        self,
        req_body: CreateItemRequest,
        status: RwSignal<SubmitState>,
        on_created: impl FnOnce() + 'static,
    ) {
        if status.get_untracked().is_pending() {
            return;
        }
        status.set(SubmitState::Pending);

        let api_client = self.api_client.get_untracked();
        spawn_local(async move {
            match api_client.create_item(&req_body).await {
                Ok(_) => {
                    status.set(SubmitState::Idle);
                    on_created();
                    self.toaster.success("Item added successfully!");
                    self.refresh();
                }
                Err(e) => report_failure(status, self.toaster, &e, "Failed to add item"),
            }
        });
    }

    pub fn logout(self, status: RwSignal<SubmitState>) {
        if status.get_untracked().is_pending() {
            return;
        }
        status.set(SubmitState::Pending);

        let api_client = self.api_client.get_untracked();
        spawn_local(async move {
            match api_client.logout().await {
                Ok(()) => redirect(ROOT_PATH),
                Err(e) => {
                    web_sys::console::error_1(&format!("logout: {e}").into());
                    self.toaster.error("Error logging out");
                    status.set(SubmitState::Error("Error logging out".to_string()));
                }
            }
        });
    }
}
