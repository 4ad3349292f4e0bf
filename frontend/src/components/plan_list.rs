use shared::{ApiResponse, Plan};
use yew::prelude::*;

use super::plan_form::PlanForm;
use crate::hooks::use_store::use_store;
use crate::services::context::use_app_context;

fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Plan catalogue with the create/edit form beside it
#[function_component(PlansPanel)]
pub fn plans_panel() -> Html {
    let ctx = use_app_context();
    let plans = use_store(&ctx.plans);
    let editing = use_state(|| Option::<Plan>::None);

    // Load plans when the panel mounts
    {
        let ctx = ctx.clone();
        use_effect_with((), move |_| {
            let api = ctx.api.clone();
            ctx.spawn_dispatch(
                "plan_list",
                ctx.plans
                    .dispatch(async move { api.plans.list().await.map(ApiResponse::into_data) }),
            );
            || ()
        });
    }

    let on_form_done = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    let rows = plans.data().iter().map(|plan| {
        let on_edit = {
            let editing = editing.clone();
            let plan = plan.clone();
            Callback::from(move |_: MouseEvent| editing.set(Some(plan.clone())))
        };
        let on_delete = {
            let ctx = ctx.clone();
            let editing = editing.clone();
            let id = plan.id.clone();
            Callback::from(move |_: MouseEvent| {
                let api = ctx.api.clone();
                let target = id.clone();
                if (*editing).as_ref().map(|plan| plan.id == target).unwrap_or(false) {
                    editing.set(None);
                }
                ctx.spawn_dispatch(
                    "plan_list",
                    ctx.plans.dispatch_delete(target.clone(), async move {
                        api.plans.delete(&target).await
                    }),
                );
            })
        };
        html! {
            <tr key={plan.id.clone()}>
                <td>{plan.name.clone()}</td>
                <td>{format_price(plan.monthly_price)}</td>
                <td>{format_price(plan.yearly_price)}</td>
                <td>
                    <ul class="plan-features">
                        {for plan.details.iter().map(|detail| html! { <li>{detail.clone()}</li> })}
                    </ul>
                </td>
                <td class="row-actions">
                    <button class="btn btn-secondary" onclick={on_edit} disabled={plans.is_pending()}>{"Edit"}</button>
                    <button class="btn btn-danger" onclick={on_delete} disabled={plans.is_pending()}>{"Delete"}</button>
                </td>
            </tr>
        }
    });

    html! {
        <div class="panel plans-panel">
            <PlanForm editing={(*editing).clone()} on_done={on_form_done} />

            <section class="plan-list-section">
                <h2>{"Plans"}</h2>
                {if let Some(error) = plans.error() {
                    html! { <div class="form-message error">{error.message().to_string()}</div> }
                } else { html! {} }}
                {if plans.is_pending() && plans.data().is_empty() {
                    html! { <div class="loading"><span class="spinner"></span>{"Loading plans..."}</div> }
                } else if plans.data().is_empty() {
                    html! { <div class="empty-state">{"No plans yet"}</div> }
                } else {
                    html! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{"Name"}</th>
                                    <th>{"Monthly"}</th>
                                    <th>{"Yearly"}</th>
                                    <th>{"Features"}</th>
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
