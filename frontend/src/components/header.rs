use yew::prelude::*;

use crate::services::context::use_app_context;
use crate::services::logging::Logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Plans,
    Notifications,
    Admins,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Plans, Tab::Notifications, Tab::Admins];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Plans => "Plans",
            Tab::Notifications => "Notifications",
            Tab::Admins => "Admins",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub active_tab: Tab,
    pub on_select_tab: Callback<Tab>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let ctx = use_app_context();

    let on_logout = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            Logger::info_with_component("header", "Admin signed out");
            ctx.end_session();
        })
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"Admin Dashboard"}</h1>
                <nav class="header-tabs">
                    {for Tab::ALL.iter().map(|&tab| {
                        let on_select_tab = props.on_select_tab.clone();
                        let onclick = Callback::from(move |_: MouseEvent| on_select_tab.emit(tab));
                        html! {
                            <button
                                class={classes!("btn", "btn-tab", (tab == props.active_tab).then_some("active"))}
                                {onclick}
                            >
                                {tab.label()}
                            </button>
                        }
                    })}
                </nav>
                <div class="header-right">
                    <button class="btn btn-secondary" onclick={on_logout}>{"Sign Out"}</button>
                </div>
            </div>
        </header>
    }
}
