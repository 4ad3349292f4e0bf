use shared::forms::LoginFormData;
use shared::LoginResponse;
use yew::prelude::*;

use super::form_message::{input_value, FormMessage, SubmitButton};
use crate::hooks::use_form::use_form;
use crate::services::context::use_app_context;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub on_register: Callback<()>,
    pub on_forgot_password: Callback<()>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let ctx = use_app_context();
    let form = use_form(LoginFormData::default());

    let on_email_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            form.edit(|data| data.email = value);
        })
    };

    let on_password_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            form.edit(|data| data.password = value);
        })
    };

    let on_submit = {
        let form = form.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = ctx.api.clone();
            let on_session_change = ctx.on_session_change.clone();
            form.submit(
                move |request| async move { api.auth.login(&request).await },
                move |response: LoginResponse| {
                    let who = response
                        .admin
                        .as_ref()
                        .map(|admin| admin.email.clone())
                        .unwrap_or_else(|| "admin".to_string());
                    Logger::info_with_component("login_form", &format!("Signed in as {}", who));
                    on_session_change.emit(true);
                    response.message
                },
            );
        })
    };

    let on_register = {
        let on_register = props.on_register.clone();
        Callback::from(move |_: MouseEvent| on_register.emit(()))
    };

    let on_forgot_password = {
        let on_forgot_password = props.on_forgot_password.clone();
        Callback::from(move |_: MouseEvent| on_forgot_password.emit(()))
    };

    let state = form.snapshot();
    let submitting = state.is_submitting();

    html! {
        <section class="auth-card">
            <h2>{"Admin Sign In"}</h2>
            <FormMessage
                error={state.error().map(str::to_string)}
                success={state.success().map(str::to_string)}
            />
            <form class="auth-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="login-email">{"Email"}</label>
                    <input
                        id="login-email"
                        type="email"
                        placeholder="admin@example.com"
                        value={state.data.email.clone()}
                        oninput={on_email_input}
                        disabled={submitting}
                    />
                </div>
                <div class="form-group">
                    <label for="login-password">{"Password"}</label>
                    <input
                        id="login-password"
                        type="password"
                        value={state.data.password.clone()}
                        oninput={on_password_input}
                        disabled={submitting}
                    />
                </div>
                <SubmitButton label="Sign In" busy_label="Signing in..." {submitting} />
            </form>
            <div class="auth-links">
                <button type="button" class="link-button" onclick={on_forgot_password}>
                    {"Forgot your password?"}
                </button>
                <button type="button" class="link-button" onclick={on_register}>
                    {"Create an admin account"}
                </button>
            </div>
        </section>
    }
}
