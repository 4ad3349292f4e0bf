use shared::forms::RegisterFormData;
use shared::MessageResponse;
use yew::prelude::*;

use super::form_message::{input_value, FormMessage, SubmitButton};
use crate::hooks::use_form::use_form;
use crate::services::context::use_app_context;

#[derive(Properties, PartialEq)]
pub struct RegisterFormProps {
    pub on_sign_in: Callback<()>,
}

#[function_component(RegisterForm)]
pub fn register_form(props: &RegisterFormProps) -> Html {
    let ctx = use_app_context();
    let form = use_form(RegisterFormData::default());

    let on_name_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            form.edit(|data| data.name = value);
        })
    };

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
        let api = ctx.api.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            form.submit(
                move |request| async move { api.auth.register(&request).await },
                |response: MessageResponse| {
                    Some(
                        response
                            .message
                            .unwrap_or_else(|| "Account created, you can sign in now".to_string()),
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
            <h2>{"Create Admin Account"}</h2>
            <FormMessage
                error={state.error().map(str::to_string)}
                success={state.success().map(str::to_string)}
            />
            <form class="auth-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="register-name">{"Name"}</label>
                    <input
                        id="register-name"
                        type="text"
                        value={state.data.name.clone()}
                        oninput={on_name_input}
                        disabled={submitting}
                    />
                </div>
                <div class="form-group">
                    <label for="register-email">{"Email"}</label>
                    <input
                        id="register-email"
                        type="email"
                        value={state.data.email.clone()}
                        oninput={on_email_input}
                        disabled={submitting}
                    />
                </div>
                <div class="form-group">
                    <label for="register-password">{"Password"}</label>
                    <input
                        id="register-password"
                        type="password"
                        value={state.data.password.clone()}
                        oninput={on_password_input}
                        disabled={submitting}
                    />
                </div>
                <SubmitButton label="Register" busy_label="Registering..." {submitting} />
            </form>
            <div class="auth-links">
                <button type="button" class="link-button" onclick={on_sign_in}>
                    {"Back to sign in"}
                </button>
            </div>
        </section>
    }
}
