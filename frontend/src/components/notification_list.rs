use chrono::{DateTime, Utc};
use shared::{ApiResponse, Notification, WeeklySchedule};
use yew::prelude::*;

use super::notification_form::NotificationForm;
use crate::hooks::use_store::use_store;
use crate::services::context::use_app_context;

/// Whose notifications the panel lists
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NotificationScope {
    #[default]
    Mine,
    AllAdmins,
    Admin { id: String, name: String },
}

impl NotificationScope {
    fn title(&self) -> String {
        match self {
            NotificationScope::Mine => "My Notifications".to_string(),
            NotificationScope::AllAdmins => "All Notifications".to_string(),
            NotificationScope::Admin { name, .. } => format!("Notifications from {}", name),
        }
    }
}

/// "Mon 09:00-10:00, Fri 14:00-15:30"
fn schedule_summary(schedule: &WeeklySchedule) -> String {
    if schedule.is_empty() {
        return "Not scheduled".to_string();
    }
    schedule
        .iter()
        .map(|(day, range)| format!("{} {}-{}", &day.label()[..3], range.start_time, range.end_time))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_created_at(created_at: Option<&DateTime<Utc>>) -> String {
    created_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct NotificationsPanelProps {
    pub scope: NotificationScope,
    pub on_scope_change: Callback<NotificationScope>,
}

#[function_component(NotificationsPanel)]
pub fn notifications_panel(props: &NotificationsPanelProps) -> Html {
    let ctx = use_app_context();
    let notifications = use_store(&ctx.notifications);
    let editing = use_state(|| Option::<Notification>::None);

    // Reload whenever the scope changes
    {
        let ctx = ctx.clone();
        use_effect_with(props.scope.clone(), move |scope| {
            let api = ctx.api.clone();
            let scope = scope.clone();
            ctx.spawn_dispatch(
                "notification_list",
                ctx.notifications.dispatch(async move {
                    let response = match scope {
                        NotificationScope::Mine => api.notifications.list().await,
                        NotificationScope::AllAdmins => api.notifications.list_all_admin().await,
                        NotificationScope::Admin { id, .. } => api.notifications.list_for_admin(&id).await,
                    };
                    response.map(ApiResponse::into_data)
                }),
            );
            || ()
        });
    }

    let on_form_done = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    let scope_button = |scope: NotificationScope, label: &'static str| {
        let active = props.scope == scope;
        let on_scope_change = props.on_scope_change.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_scope_change.emit(scope.clone()));
        html! {
            <button class={classes!("btn", "btn-tab", active.then_some("active"))} {onclick}>{label}</button>
        }
    };

    let rows = notifications.data().iter().map(|notification| {
        let on_edit = {
            let editing = editing.clone();
            let notification = notification.clone();
            Callback::from(move |_: MouseEvent| editing.set(Some(notification.clone())))
        };
        let on_delete = {
            let ctx = ctx.clone();
            let id = notification.id.clone();
            Callback::from(move |_: MouseEvent| {
                let api = ctx.api.clone();
                let target = id.clone();
                ctx.spawn_dispatch(
                    "notification_list",
                    ctx.notifications.dispatch_delete(target.clone(), async move {
                        api.notifications.delete(&target).await
                    }),
                );
            })
        };
        html! {
            <tr key={notification.id.clone()}>
                <td>{notification.title.clone()}</td>
                <td>{notification.message.clone()}</td>
                <td>{schedule_summary(&notification.schedule)}</td>
                <td>{format_created_at(notification.created_at.as_ref())}</td>
                <td class="row-actions">
                    <button class="btn btn-secondary" onclick={on_edit} disabled={notifications.is_pending()}>{"Edit"}</button>
                    <button class="btn btn-danger" onclick={on_delete} disabled={notifications.is_pending()}>{"Delete"}</button>
                </td>
            </tr>
        }
    });

    html! {
        <div class="panel notifications-panel">
            <NotificationForm editing={(*editing).clone()} on_done={on_form_done} />

            <section class="notification-list-section">
                <div class="section-header">
                    <h2>{props.scope.title()}</h2>
                    <div class="scope-tabs">
                        {scope_button(NotificationScope::Mine, "Mine")}
                        {scope_button(NotificationScope::AllAdmins, "All admins")}
                    </div>
                </div>
                {if let Some(error) = notifications.error() {
                    html! { <div class="form-message error">{error.message().to_string()}</div> }
                } else { html! {} }}
                {if notifications.is_pending() && notifications.data().is_empty() {
                    html! { <div class="loading"><span class="spinner"></span>{"Loading notifications..."}</div> }
                } else if notifications.data().is_empty() {
                    html! { <div class="empty-state">{"No notifications yet"}</div> }
                } else {
                    html! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{"Title"}</th>
                                    <th>{"Message"}</th>
                                    <th>{"Schedule"}</th>
                                    <th>{"Created"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>{for rows}</tbody>
                        </table>
                    }
                }}
            </section>
        </div>
    }
}
