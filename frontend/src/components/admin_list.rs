use shared::forms::AdminFormData;
use shared::{Admin, ApiResponse};
use yew::prelude::*;

use super::form_message::{input_value, FormMessage, SubmitButton};
use super::notification_list::NotificationScope;
use crate::hooks::use_form::use_form;
use crate::hooks::use_store::use_store;
use crate::services::context::use_app_context;

#[derive(Properties, PartialEq)]
struct AdminEditorProps {
    admin: Admin,
    on_done: Callback<()>,
}

#[function_component(AdminEditor)]
fn admin_editor(props: &AdminEditorProps) -> Html {
    let ctx = use_app_context();
    let form = use_form(AdminFormData::from_admin(&props.admin));

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

    let on_role_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            form.edit(|data| data.role = value);
        })
    };

    let on_submit = {
        let form = form.clone();
        let ctx = ctx.clone();
        let id = props.admin.id.clone();
        let on_done = props.on_done.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = ctx.api.clone();
            let admins = ctx.admins.clone();
            let id = id.clone();
            let on_done = on_done.clone();
            form.submit(
                move |request| {
                    admins.dispatch_update(async move {
                        api.admins.update(&id, &request).await.map(ApiResponse::into_data)
                    })
                },
                move |_: Admin| {
                    on_done.emit(());
                    None
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

    html! {
        <tr class="admin-editor-row">
            <td colspan="4">
                <FormMessage error={state.error().map(str::to_string)} />
                <form class="admin-editor" onsubmit={on_submit}>
                    <input
                        type="text"
                        aria-label="Name"
                        value={state.data.name.clone()}
                        oninput={on_name_input}
                        disabled={submitting}
                    />
                    <input
                        type="email"
                        aria-label="Email"
                        value={state.data.email.clone()}
                        oninput={on_email_input}
                        disabled={submitting}
                    />
                    <input
                        type="text"
                        aria-label="Role"
                        placeholder="Role"
                        value={state.data.role.clone()}
                        oninput={on_role_input}
                        disabled={submitting}
                    />
                    <SubmitButton label="Save" busy_label="Saving..." {submitting} />
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={submitting}>
                        {"Cancel"}
                    </button>
                </form>
            </td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
pub struct AdminsPanelProps {
    pub on_view_notifications: Callback<NotificationScope>,
}

#[function_component(AdminsPanel)]
pub fn admins_panel(props: &AdminsPanelProps) -> Html {
    let ctx = use_app_context();
    let admins = use_store(&ctx.admins);
    let editing_id = use_state(|| Option::<String>::None);

    {
        let ctx = ctx.clone();
        use_effect_with((), move |_| {
            let api = ctx.api.clone();
            ctx.spawn_dispatch(
                "admin_list",
                ctx.admins
                    .dispatch(async move { api.admins.list().await.map(ApiResponse::into_data) }),
            );
            || ()
        });
    }

    let on_editor_done = {
        let editing_id = editing_id.clone();
        Callback::from(move |_: ()| editing_id.set(None))
    };

    let rows = admins.data().iter().map(|admin| {
        if (*editing_id).as_deref() == Some(admin.id.as_str()) {
            return html! {
                <AdminEditor key={admin.id.clone()} admin={admin.clone()} on_done={on_editor_done.clone()} />
            };
        }

        let on_edit = {
            let editing_id = editing_id.clone();
            let id = admin.id.clone();
            Callback::from(move |_: MouseEvent| editing_id.set(Some(id.clone())))
        };
        let on_notifications = {
            let on_view_notifications = props.on_view_notifications.clone();
            let scope = NotificationScope::Admin {
                id: admin.id.clone(),
                name: admin.name.clone(),
            };
            Callback::from(move |_: MouseEvent| on_view_notifications.emit(scope.clone()))
        };
        let on_delete = {
            let ctx = ctx.clone();
            let id = admin.id.clone();
            Callback::from(move |_: MouseEvent| {
                let api = ctx.api.clone();
                let target = id.clone();
                ctx.spawn_dispatch(
                    "admin_list",
                    ctx.admins.dispatch_delete(target.clone(), async move {
                        api.admins.delete(&target).await
                    }),
                );
            })
        };

        html! {
            <tr key={admin.id.clone()}>
                <td>{admin.name.clone()}</td>
                <td>{admin.email.clone()}</td>
                <td>{admin.role.clone().unwrap_or_default()}</td>
                <td class="row-actions">
                    <button class="btn btn-secondary" onclick={on_notifications}>{"Notifications"}</button>
                    <button class="btn btn-secondary" onclick={on_edit} disabled={admins.is_pending()}>{"Edit"}</button>
                    <button class="btn btn-danger" onclick={on_delete} disabled={admins.is_pending()}>{"Delete"}</button>
                </td>
            </tr>
        }
    });

    html! {
        <div class="panel admins-panel">
            <section class="admin-list-section">
                <h2>{"Admins"}</h2>
                {if let Some(error) = admins.error() {
                    html! { <div class="form-message error">{error.message().to_string()}</div> }
                } else { html! {} }}
                {if admins.is_pending() && admins.data().is_empty() {
                    html! { <div class="loading"><span class="spinner"></span>{"Loading admins..."}</div> }
                } else if admins.data().is_empty() {
                    html! { <div class="empty-state">{"No admins found"}</div> }
                } else {
                    html! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{"Name"}</th>
                                    <th>{"Email"}</th>
                                    <th>{"Role"}</th>
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
