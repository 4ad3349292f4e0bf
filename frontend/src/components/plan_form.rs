use std::future::Future;
use std::pin::Pin;

use shared::forms::{PlanFormData, MIN_PLAN_DETAILS};
use shared::{ApiError, ApiResponse, Plan, UpdatePlanRequest};
use yew::prelude::*;

use super::form_message::{input_value, FormMessage, SubmitButton};
use crate::hooks::use_form::use_form;
use crate::services::context::use_app_context;

#[derive(Properties, PartialEq)]
pub struct PlanFormProps {
    /// Plan being edited; `None` creates a new one
    #[prop_or_default]
    pub editing: Option<Plan>,
    pub on_done: Callback<()>,
}

type SavePlan = Pin<Box<dyn Future<Output = Result<Plan, ApiError>>>>;

fn initial_data(editing: Option<&Plan>) -> PlanFormData {
    editing.map(PlanFormData::from_plan).unwrap_or_default()
}

#[function_component(PlanForm)]
pub fn plan_form(props: &PlanFormProps) -> Html {
    let ctx = use_app_context();
    let form = use_form(initial_data(props.editing.as_ref()));

    // Reload the fields whenever a different plan is picked
    {
        let form = form.clone();
        use_effect_with(props.editing.clone(), move |editing| {
            form.reset(initial_data(editing.as_ref()));
            || ()
        });
    }

    let on_name_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            form.edit(|data| data.name = value);
        })
    };

    let on_monthly_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            form.edit(|data| data.monthly_price = value);
        })
    };

    let on_yearly_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            form.edit(|data| data.yearly_price = value);
        })
    };

    let on_add_detail = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            form.edit(|data| {
                data.add_detail("");
            });
        })
    };

    let on_submit = {
        let form = form.clone();
        let ctx = ctx.clone();
        let editing_id = props.editing.as_ref().map(|plan| plan.id.clone());
        let on_done = props.on_done.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = ctx.api.clone();
            let plans = ctx.plans.clone();
            let editing_id = editing_id.clone();
            let on_done = on_done.clone();
            form.submit(
                move |request| -> SavePlan {
                    match editing_id {
                        Some(id) => {
                            let update = UpdatePlanRequest::from(request);
                            Box::pin(plans.dispatch_update(async move {
                                api.plans.update(&id, &update).await.map(ApiResponse::into_data)
                            }))
                        }
                        None => Box::pin(plans.dispatch_create(async move {
                            api.plans.create(&request).await.map(ApiResponse::into_data)
                        })),
                    }
                },
                move |plan: Plan| {
                    on_done.emit(());
                    Some(format!("Plan \"{}\" saved", plan.name))
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
        <section class="plan-form-section">
            <h2>{if is_editing { "Edit Plan" } else { "New Plan" }}</h2>
            <FormMessage
                error={state.error().map(str::to_string)}
                success={state.success().map(str::to_string)}
            />
            <form class="plan-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="plan-name">{"Name"}</label>
                    <input
                        id="plan-name"
                        type="text"
                        placeholder="Pro"
                        value={state.data.name.clone()}
                        oninput={on_name_input}
                        disabled={submitting}
                    />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="plan-monthly">{"Monthly price"}</label>
                        <input
                            id="plan-monthly"
                            type="number"
                            step="0.01"
                            min="0"
                            value={state.data.monthly_price.clone()}
                            oninput={on_monthly_input}
                            disabled={submitting}
                        />
                    </div>
                    <div class="form-group">
                        <label for="plan-yearly">{"Yearly price"}</label>
                        <input
                            id="plan-yearly"
                            type="number"
                            step="0.01"
                            min="0"
                            value={state.data.yearly_price.clone()}
                            oninput={on_yearly_input}
                            disabled={submitting}
                        />
                    </div>
                </div>

                <div class="form-group plan-details">
                    <label>{format!("Features (at least {})", MIN_PLAN_DETAILS)}</label>
                    {for state.data.details.iter().map(|detail| {
                        let id = detail.id.clone();
                        let on_input = {
                            let form = form.clone();
                            let id = id.clone();
                            Callback::from(move |e: InputEvent| {
                                let value = input_value(&e);
                                form.edit(|data| {
                                    data.update_detail(&id, value);
                                });
                            })
                        };
                        let on_remove = {
                            let form = form.clone();
                            Callback::from(move |_: MouseEvent| {
                                form.edit(|data| {
                                    data.remove_detail(&id);
                                });
                            })
                        };
                        html! {
                            <div class="plan-detail-row" key={detail.id.clone()}>
                                <input
                                    type="text"
                                    value={detail.text.clone()}
                                    oninput={on_input}
                                    disabled={submitting}
                                />
                                <button
                                    type="button"
                                    class="btn btn-secondary"
                                    onclick={on_remove}
                                    disabled={submitting}
                                >
                                    {"Remove"}
                                </button>
                            </div>
                        }
                    })}
                    <button type="button" class="btn btn-secondary" onclick={on_add_detail} disabled={submitting}>
                        {"+ Add feature"}
                    </button>
                </div>

                <div class="form-buttons">
                    <SubmitButton
                        label={if is_editing { "Save Changes" } else { "Create Plan" }}
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
