use shared::forms::{ForgotPasswordFormData, ResetPasswordFormData};
use shared::MessageResponse;
use yew::prelude::*;

use super::form_message::{input_value, FormMessage, SubmitButton};
use crate::hooks::use_form::use_form;
use crate::services::context::use_app_context;

#[derive(Properties, PartialEq)]
pub struct ForgotPasswordFormProps {
    pub on_sign_in: Callback<()>,
}

/// Asks the backend to email a reset link
#[function_component(ForgotPasswordForm)]
pub fn forgot_password_form(props: &ForgotPasswordFormProps) -> Html {
    let ctx = use_app_context();
    let form = use_form(ForgotPasswordFormData::default());

    let on_email_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            form.edit(|data| data.email = value);
        })
    };

    let on_submit = {
        let form = form.clone();
        let api = ctx.api.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            form.submit(
                move |request| async move { api.auth.request_password_reset(&request).await },
                |response: MessageResponse| {
                    Some(
                        response
                            .message
                            .unwrap_or_else(|| "Check your inbox for a reset link".to_string()),
                    )
                },
            );
        })
    };

    let on_sign_in = {
        let on_sign_in = props.on_sign_in.clone();
        Callback::from(move |_: MouseEvent| on_sign_in.emit(()))
    };

    let state = form.snapshot();
    let submitting = state.is_submitting();

    html! {
        <section class="auth-card">
            <h2>{"Reset Password"}</h2>
            <FormMessage
                error={state.error().map(str::to_string)}
                success={state.success().map(str::to_string)}
            />
            <form class="auth-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="forgot-email">{"Email"}</label>
                    <input
                        id="forgot-email"
                        type="email"
                        value={state.data.email.clone()}
                        oninput={on_email_input}
                        disabled={submitting}
                    />
                </div>
                <SubmitButton label="Send Reset Link" busy_label="Sending..." {submitting} />
            </form>
            <div class="auth-links">
                <button type="button" class="link-button" onclick={on_sign_in}>
                    {"Back to sign in"}
                </button>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResetPasswordFormProps {
    /// Token from the emailed link
    pub token: AttrValue,
    pub on_sign_in: Callback<()>,
}

#[function_component(ResetPasswordForm)]
pub fn reset_password_form(props: &ResetPasswordFormProps) -> Html {
    let ctx = use_app_context();
    let form = use_form(ResetPasswordFormData {
        token: props.token.to_string(),
        ..ResetPasswordFormData::default()
    });

    let on_password_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            form.edit(|data| data.new_password = value);
        })
    };

    let on_confirm_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            form.edit(|data| data.confirm_password = value);
        })
    };

    let on_submit = {
        let form = form.clone();
        let api = ctx.api.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            form.submit(
                move |request| async move { api.auth.reset_password(&request).await },
                |response: MessageResponse| {
                    Some(
                        response
                            .message
                            .unwrap_or_else(|| "Password updated, you can sign in now".to_string()),
                    )
                },
            );
        })
    };

    let on_sign_in = {
        let on_sign_in = props.on_sign_in.clone();
        Callback::from(move |_: MouseEvent| on_sign_in.emit(()))
    };

    let state = form.snapshot();
    let submitting = state.is_submitting();

    html! {
        <section class="auth-card">
            <h2>{"Choose a New Password"}</h2>
            <FormMessage
                error={state.error().map(str::to_string)}
                success={state.success().map(str::to_string)}
            />
            <form class="auth-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="reset-password">{"New password"}</label>
                    <input
                        id="reset-password"
                        type="password"
                        value={state.data.new_password.clone()}
                        oninput={on_password_input}
                        disabled={submitting}
                    />
                </div>
                <div class="form-group">
                    <label for="reset-confirm">{"Confirm password"}</label>
                    <input
                        id="reset-confirm"
                        type="password"
                        value={state.data.confirm_password.clone()}
                        oninput={on_confirm_input}
                        disabled={submitting}
                    />
                </div>
                <SubmitButton label="Update Password" busy_label="Updating..." {submitting} />
            </form>
            <div class="auth-links">
                <button type="button" class="link-button" onclick={on_sign_in}>
                    {"Back to sign in"}
                </button>
            </div>
        </section>
    }
}
