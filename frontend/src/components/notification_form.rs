use std::future::Future;
use std::pin::Pin;

use shared::forms::NotificationFormData;
use shared::{ApiError, ApiResponse, Notification, UpdateNotificationRequest, WeeklySchedule};
use yew::prelude::*;

use super::form_message::{input_value, textarea_value, FormMessage, SubmitButton};
use super::schedule_editor::ScheduleEditor;
use crate::hooks::use_form::use_form;
use crate::services::context::use_app_context;

type SaveNotification = Pin<Box<dyn Future<Output = Result<Notification, ApiError>>>>;

#[derive(Properties, PartialEq)]
pub struct NotificationFormProps {
    #[prop_or_default]
    pub editing: Option<Notification>,
    pub on_done: Callback<()>,
}

fn initial_data(editing: Option<&Notification>) -> NotificationFormData {
    editing.map(NotificationFormData::from_notification).unwrap_or_default()
}

#[function_component(NotificationForm)]
pub fn notification_form(props: &NotificationFormProps) -> Html {
    let ctx = use_app_context();
    let form = use_form(initial_data(props.editing.as_ref()));

    {
        let form = form.clone();
        use_effect_with(props.editing.clone(), move |editing| {
            form.reset(initial_data(editing.as_ref()));
            || ()
        });
    }

    let on_title_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            form.edit(|data| data.title = value);
        })
    };

    let on_message_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = textarea_value(&e);
            form.edit(|data| data.message = value);
        })
    };

    let on_schedule_change = {
        let form = form.clone();
        Callback::from(move |schedule: WeeklySchedule| {
            form.edit(|data| data.schedule = schedule);
        })
    };

    let on_submit = {
        let form = form.clone();
        let ctx = ctx.clone();
        let editing_id = props.editing.as_ref().map(|notification| notification.id.clone());
        let on_done = props.on_done.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = ctx.api.clone();
            let notifications = ctx.notifications.clone();
            let editing_id = editing_id.clone();
            let on_done = on_done.clone();
            form.submit(
                move |request| -> SaveNotification {
                    match editing_id {
                        Some(id) => {
                            let update = UpdateNotificationRequest::from(request);
                            Box::pin(notifications.dispatch_update(async move {
                                api.notifications
                                    .update(&id, &update)
                                    .await
                                    .map(ApiResponse::into_data)
                            }))
                        }
                        None => Box::pin(notifications.dispatch_create(async move {
                            api.notifications.create(&request).await.map(ApiResponse::into_data)
                        })),
                    }
                },
                move |notification: Notification| {
                    on_done.emit(());
                    Some(format!("Notification \"{}\" scheduled", notification.title))
                },
            );
        })
    };

    let on_cancel = {
        let on_done = props.on_done.clone();
        Callback::from(move |_: MouseEvent| on_done.emit(()))
    };

    let state = form.snapshot();
    let submitting = state.is_submitting();
    let is_editing = props.editing.is_some();

    html! {
        <section class="notification-form-section">
            <h2>{if is_editing { "Edit Notification" } else { "New Notification" }}</h2>
            <FormMessage
                error={state.error().map(str::to_string)}
                success={state.success().map(str::to_string)}
            />
            <form class="notification-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="notification-title">{"Title"}</label>
                    <input
                        id="notification-title"
                        type="text"
                        value={state.data.title.clone()}
                        oninput={on_title_input}
                        disabled={submitting}
                    />
                </div>
                <div class="form-group">
                    <label for="notification-message">{"Message"}</label>
                    <textarea
                        id="notification-message"
                        rows="3"
                        value={state.data.message.clone()}
                        oninput={on_message_input}
                        disabled={submitting}
                    />
                </div>
                <ScheduleEditor
                    value={state.data.schedule.clone()}
                    on_change={on_schedule_change}
                    disabled={submitting}
                />
                <div class="form-buttons">
                    <SubmitButton
                        label={if is_editing { "Save Changes" } else { "Create Notification" }}
                        busy_label="Saving..."
                        {submitting}
                    />
                    {if is_editing {
                        html! {
                            <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={submitting}>
                                {"Cancel"}
                            </button>
                        }
                    } else { html! {} }}
                </div>
            </form>
        </section>
    }
}
