use crate::components::toast::ToastHost;
use crate::pages::{AuthPage, DashboardPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Element the server renders on the login/registration page.
pub(crate) const AUTH_ROOT_ID: &str = "auth-root";
/// Element the server renders on the dashboard page.
pub(crate) const DASHBOARD_ROOT_ID: &str = "dashboard-root";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PageKind {
    Auth,
    Dashboard,
}

impl PageKind {
    pub const ALL: [PageKind; 2] = [PageKind::Auth, PageKind::Dashboard];

    pub fn root_id(self) -> &'static str {
        match self {
            PageKind::Auth => AUTH_ROOT_ID,
            PageKind::Dashboard => DASHBOARD_ROOT_ID,
        }
    }
}

/// Per-page root: one `AppState`, the page itself and its toast slot.
#[component]
pub(crate) fn PageShell(kind: PageKind) -> impl IntoView {
    let app_state = AppState::new();
    provide_context(AppContext(app_state));

    view! {
        {match kind {
            PageKind::Auth => view! { <AuthPage /> }.into_any(),
            PageKind::Dashboard => view! { <DashboardPage /> }.into_any(),
        }}
        <ToastHost toaster=app_state.toaster />
    }
}

/// Mount a controller into every page root present in the document.
///
/// There is no router: the server decides which page is served, and the page
/// decides which controller runs by the element it carries.
pub(crate) fn mount_controllers() -> usize {
    let doc = document();
    let mut mounted = 0;

    for kind in PageKind::ALL {
        let Some(el) = doc
            .get_element_by_id(kind.root_id())
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            continue;
        };

        el.set_inner_html("");
        leptos::mount::mount_to(el, move || view! { <PageShell kind=kind /> }).forget();
        mounted += 1;
    }

    if mounted == 0 {
        web_sys::console::warn_1(
            &format!("no #{AUTH_ROOT_ID} or #{DASHBOARD_ROOT_ID} element; nothing mounted").into(),
        );
    }

    mounted
}
