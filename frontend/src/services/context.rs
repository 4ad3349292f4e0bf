use std::future::Future;

use admin_dashboard_client::Store;
use shared::{Admin, ApiError, Notification, Plan};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::api::ApiClient;
use super::logging::Logger;

/// Shared by every dashboard view through a `ContextProvider`
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub plans: Store<Vec<Plan>>,
    pub notifications: Store<Vec<Notification>>,
    pub admins: Store<Vec<Admin>>,
    /// Signals a signed-in (`true`) or signed-out (`false`) session
    pub on_session_change: Callback<bool>,
}

impl AppContext {
    pub fn new(api: ApiClient, on_session_change: Callback<bool>) -> Self {
        Self {
            api,
            plans: Store::new(),
            notifications: Store::new(),
            admins: Store::new(),
            on_session_change,
        }
    }

    /// Sign out and forget everything cached for the previous admin
    pub fn end_session(&self) {
        self.api.auth.logout();
        self.plans.reset();
        self.notifications.reset();
        self.admins.reset();
        self.on_session_change.emit(false);
    }

    /// Run a store dispatch in the background, logging a rejection under `component`.
    ///
    /// A 401 means the session token is no longer accepted, so the session ends.
    pub fn spawn_dispatch<R, F>(&self, component: &'static str, dispatch: F)
    where
        R: 'static,
        F: Future<Output = Result<R, ApiError>> + 'static,
    {
        let ctx = self.clone();
        spawn_local(async move {
            if let Err(e) = dispatch.await {
                Logger::warn_with_component(component, &e.to_string());
                if e.is_unauthorized() {
                    Logger::info_with_component(component, "Session rejected by the backend, signing out");
                    ctx.end_session();
                }
            }
        });
    }
}

// The API client is fixed for the lifetime of the app
impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        self.plans == other.plans
            && self.notifications == other.notifications
            && self.admins == other.admins
            && self.on_session_change == other.on_session_change
    }
}

/// The app's context, or a detached one when rendered outside the provider
#[hook]
pub fn use_app_context() -> AppContext {
    let context = use_context::<AppContext>();
    let fallback = use_memo((), |_| {
        AppContext::new(ApiClient::default(), Callback::from(|_: bool| ()))
    });
    context.unwrap_or_else(|| {
        Logger::error_with_component("context", "AppContext provider is missing, using a detached context");
        (*fallback).clone()
    })
}
