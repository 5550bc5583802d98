use crate::api::ApiResult;
use crate::components::ui::{
    Button, ButtonSize, Card, CardContent, CardDescription, CardHeader, CardTitle, Input, Label,
    Spinner,
};
use crate::session::{redirect_after, DASHBOARD_PATH, REDIRECT_DELAY_MS};
use crate::state::{report_failure, AppContext, SubmitState, Toaster};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthPanel {
    Login,
    Register,
}

/// Drive one credential submission. On success the control stays disabled
/// until the redirect fires; on failure it goes back to idle-with-error.
fn submit_credentials<Fut>(
    status: RwSignal<SubmitState>,
    toaster: Toaster,
    call: Fut,
    success: &'static str,
    fallback: &'static str,
) where
    Fut: Future<Output = ApiResult<()>> + 'static,
{
    status.set(SubmitState::Pending);

    spawn_local(async move {
        match call.await {
            Ok(()) => {
                toaster.success(success);
                redirect_after(DASHBOARD_PATH, REDIRECT_DELAY_MS);
            }
            Err(e) => report_failure(status, toaster, &e, fallback),
        }
    });
}

#[component]
fn SubmitButton(
    status: RwSignal<SubmitState>,
    idle: &'static str,
    pending: &'static str,
) -> impl IntoView {
    view! {
        <Button
            class="w-full"
            size=ButtonSize::Sm
            attr:disabled=move || status.get().is_pending()
        >
            <span class="inline-flex items-center gap-2">
                <Show when=move || status.get().is_pending() fallback=|| ()>
                    <Spinner />
                </Show>
                {move || if status.get().is_pending() { pending } else { idle }}
            </span>
        </Button>
    }
}

#[component]
fn InlineError(status: RwSignal<SubmitState>) -> impl IntoView {
    move || {
        status.get().error().map(|e| {
            view! { <p class="text-xs text-destructive">{e.to_string()}</p> }
        })
    }
}

#[component]
fn LoginCard(panel: RwSignal<AuthPanel>) -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let status: RwSignal<SubmitState> = RwSignal::new(SubmitState::Idle);

    let app_state = expect_context::<AppContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().is_pending() {
            return;
        }

        let username_val = username.get_untracked();
        let password_val = password.get_untracked();
        let api_client = app_state.0.api_client.get_untracked();

        submit_credentials(
            status,
            app_state.0.toaster,
            async move { api_client.login(&username_val, &password_val).await },
            "Login successful! Redirecting...",
            "Login failed",
        );
    };

    view! {
        <Card attr:data-name="LoginCard">
            <CardHeader>
                <CardTitle class="text-lg">"Sign in"</CardTitle>
                <CardDescription class="text-xs">"Welcome back. Pick up where you left off."</CardDescription>
            </CardHeader>

            <CardContent>
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="login-username">"Username"</Label>
                        <Input id="login-username" name="username" bind_value=username required=true autofocus=true />
                    </div>

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="login-password">"Password"</Label>
                        <Input
                            id="login-password"
                            name="password"
                            r#type="password"
                            placeholder="••••••••"
                            bind_value=password
                            required=true
                        />
                    </div>

                    <InlineError status=status />
                    <SubmitButton status=status idle="Sign in" pending="Logging in..." />

                    <div class="pt-1 text-xs text-muted-foreground">
                        "No account? "
                        <a
                            href="#"
                            class="text-primary underline underline-offset-4"
                            on:click=move |ev| {
                                ev.prevent_default();
                                panel.set(AuthPanel::Register);
                            }
                        >
                            "Create one"
                        </a>
                    </div>
                </form>
            </CardContent>
        </Card>
    }
}

#[component]
fn RegisterCard(panel: RwSignal<AuthPanel>) -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let status: RwSignal<SubmitState> = RwSignal::new(SubmitState::Idle);

    let app_state = expect_context::<AppContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().is_pending() {
            return;
        }

        let username_val = username.get_untracked();
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let api_client = app_state.0.api_client.get_untracked();

        submit_credentials(
            status,
            app_state.0.toaster,
            async move {
                api_client
                    .register(&username_val, &email_val, &password_val)
                    .await
            },
            "Registration successful! Redirecting...",
            "Registration failed",
        );
    };

    view! {
        <Card attr:data-name="RegisterCard">
            <CardHeader>
                <CardTitle class="text-lg">"Create account"</CardTitle>
                <CardDescription class="text-xs">"Notes, tasks, links and snippets in one place."</CardDescription>
            </CardHeader>

            <CardContent>
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="register-username">"Username"</Label>
                        <Input id="register-username" name="username" bind_value=username required=true />
                    </div>

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="register-email">"Email"</Label>
                        <Input
                            id="register-email"
                            name="email"
                            r#type="email"
                            placeholder="you@example.com"
                            bind_value=email
                            required=true
                        />
                    </div>

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="register-password">"Password"</Label>
                        <Input
                            id="register-password"
                            name="password"
                            r#type="password"
                            placeholder="••••••••"
                            bind_value=password
                            required=true
                        />
                    </div>

                    <InlineError status=status />
                    <SubmitButton status=status idle="Create account" pending="Creating account..." />

                    <div class="pt-1 text-xs text-muted-foreground">
                        "Already have an account? "
                        <a
                            href="#"
                            class="text-primary underline underline-offset-4"
                            on:click=move |ev| {
                                ev.prevent_default();
                                panel.set(AuthPanel::Login);
                            }
                        >
                            "Sign in"
                        </a>
                    </div>
                </form>
            </CardContent>
        </Card>
    }
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let panel: RwSignal<AuthPanel> = RwSignal::new(AuthPanel::Login);

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"Organizer"</a>
                </div>

                <Show
                    when=move || panel.get() == AuthPanel::Login
                    fallback=move || view! { <RegisterCard panel=panel /> }
                >
                    <LoginCard panel=panel />
                </Show>
            </div>
        </div>
    }
}
