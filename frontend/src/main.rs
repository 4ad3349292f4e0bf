mod components;
mod hooks;
mod services;

use admin_dashboard_client::ClientConfig;
use yew::prelude::*;

use components::admin_list::AdminsPanel;
use components::header::{Header, Tab};
use components::login_form::LoginForm;
use components::notification_list::{NotificationScope, NotificationsPanel};
use components::password_reset::{ForgotPasswordForm, ResetPasswordForm};
use components::plan_list::PlansPanel;
use components::register_form::RegisterForm;
use services::api::ApiClient;
use services::context::AppContext;
use services::logging::Logger;

#[derive(Debug, Clone, PartialEq)]
enum AuthView {
    Login,
    Register,
    ForgotPassword,
    ResetPassword(String),
}

/// Pull `token` out of a query string such as `?token=abc&from=email`
fn reset_token_from_query(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "token")
        .map(|(_, value)| value.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn initial_auth_view() -> AuthView {
    gloo::utils::window()
        .location()
        .search()
        .ok()
        .and_then(|search| reset_token_from_query(&search))
        .map(AuthView::ResetPassword)
        .unwrap_or(AuthView::Login)
}

#[function_component(AuthScreen)]
fn auth_screen() -> Html {
    let view = use_state(initial_auth_view);

    let show = |next: AuthView| {
        let view = view.clone();
        Callback::from(move |_: ()| view.set(next.clone()))
    };

    html! {
        <main class="auth-screen">
            {match &*view {
                AuthView::Login => html! {
                    <LoginForm
                        on_register={show(AuthView::Register)}
                        on_forgot_password={show(AuthView::ForgotPassword)}
                    />
                },
                AuthView::Register => html! { <RegisterForm on_sign_in={show(AuthView::Login)} /> },
                AuthView::ForgotPassword => html! { <ForgotPasswordForm on_sign_in={show(AuthView::Login)} /> },
                AuthView::ResetPassword(token) => html! {
                    <ResetPasswordForm token={token.clone()} on_sign_in={show(AuthView::Login)} />
                },
            }}
        </main>
    }
}

#[function_component(Dashboard)]
fn dashboard() -> Html {
    let active_tab = use_state(Tab::default);
    let notification_scope = use_state(NotificationScope::default);

    let on_select_tab = {
        let active_tab = active_tab.clone();
        Callback::from(move |tab: Tab| active_tab.set(tab))
    };

    let on_scope_change = {
        let notification_scope = notification_scope.clone();
        Callback::from(move |scope: NotificationScope| notification_scope.set(scope))
    };

    let on_view_notifications = {
        let notification_scope = notification_scope.clone();
        let active_tab = active_tab.clone();
        Callback::from(move |scope: NotificationScope| {
            notification_scope.set(scope);
            active_tab.set(Tab::Notifications);
        })
    };

    html! {
        <>
            <Header active_tab={*active_tab} {on_select_tab} />
            <main class="main">
                <div class="container">
                    {match *active_tab {
                        Tab::Plans => html! { <PlansPanel /> },
                        Tab::Notifications => html! {
                            <NotificationsPanel scope={(*notification_scope).clone()} {on_scope_change} />
                        },
                        Tab::Admins => html! { <AdminsPanel {on_view_notifications} /> },
                    }}
                </div>
            </main>
        </>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: ClientConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let api = use_memo(props.config.clone(), |config| ApiClient::new(config.clone()));
    let signed_in = use_state(|| api.auth.is_signed_in());

    // Built once; the stores must outlive every re-render
    let context = {
        let api = api.clone();
        let signed_in = signed_in.clone();
        use_memo((), move |_| {
            let on_session_change = Callback::from(move |active: bool| signed_in.set(active));
            AppContext::new((*api).clone(), on_session_change)
        })
    };

    html! {
        <ContextProvider<AppContext> context={(*context).clone()}>
            {if *signed_in {
                html! { <Dashboard /> }
            } else {
                html! { <AuthScreen /> }
            }}
        </ContextProvider<AppContext>>
    }
}

fn main() {
    let config = ClientConfig::default();
    Logger::init(config.log_level);
    log::info!("Admin dashboard using backend {}", config.base_url);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
