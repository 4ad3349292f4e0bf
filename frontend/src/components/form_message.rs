use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FormMessageProps {
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub success: Option<String>,
}

/// Error or success banner shown above a form
#[function_component(FormMessage)]
pub fn form_message(props: &FormMessageProps) -> Html {
    html! {
        <>
            {if let Some(error) = props.error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}
            {if let Some(success) = props.success.as_ref() {
                html! { <div class="form-message success">{success}</div> }
            } else { html! {} }}
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct SubmitButtonProps {
    pub label: AttrValue,
    pub busy_label: AttrValue,
    pub submitting: bool,
}

/// Submit button that disables itself and shows a spinner while a request runs
#[function_component(SubmitButton)]
pub fn submit_button(props: &SubmitButtonProps) -> Html {
    html! {
        <button type="submit" class="btn btn-primary" disabled={props.submitting}>
            {if props.submitting {
                html! { <><span class="spinner" aria-hidden="true"></span>{props.busy_label.clone()}</> }
            } else {
                html! { {props.label.clone()} }
            }}
        </button>
    }
}

pub fn input_value(e: &InputEvent) -> String {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value()
}

pub fn textarea_value(e: &InputEvent) -> String {
    let textarea: HtmlTextAreaElement = e.target_unchecked_into();
    textarea.value()
}
