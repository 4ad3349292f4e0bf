use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::{ApiError, FormError, FormState, Validate};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_mounted::use_mounted;
use crate::services::logging::Logger;

/// How long a success banner stays up
const SUCCESS_MESSAGE_MS: u32 = 3000;

/// Form state that survives across awaits.
///
/// The state lives in a shared cell instead of `use_state`, so a response
/// arriving after further renders updates the current form, not a stale copy.
pub struct UseFormHandle<D> {
    state: Rc<RefCell<FormState<D>>>,
    is_mounted: Rc<RefCell<bool>>,
    refresh: UseForceUpdateHandle,
}

impl<D> Clone for UseFormHandle<D> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            is_mounted: Rc::clone(&self.is_mounted),
            refresh: self.refresh.clone(),
        }
    }
}

impl<D> UseFormHandle<D>
where
    D: Validate + Default + Clone + 'static,
{
    pub fn snapshot(&self) -> FormState<D> {
        self.state.borrow().clone()
    }

    pub fn edit(&self, update: impl FnOnce(&mut D)) {
        self.state.borrow_mut().edit(update);
        self.refresh.force_update();
    }

    /// Replace the fields, e.g. when a record is picked for editing
    pub fn reset(&self, data: D) {
        self.state.borrow_mut().replace(data);
        self.refresh.force_update();
    }

    /// Validate, then run `send` with the payload.
    ///
    /// `on_success` turns the response into the success message. Nothing
    /// touches the form once the component has unmounted.
    pub fn submit<R, Fut>(
        &self,
        send: impl FnOnce(D::Payload) -> Fut,
        on_success: impl FnOnce(R) -> Option<String> + 'static,
    ) where
        R: 'static,
        Fut: Future<Output = Result<R, ApiError>> + 'static,
    {
        let started = self.state.borrow_mut().begin_submit();
        self.refresh.force_update();
        let payload = match started {
            Ok(payload) => payload,
            Err(FormError::Busy) => return,
            Err(e) => {
                Logger::debug_with_component("use_form", &format!("Rejected before sending: {}", e));
                return;
            }
        };

        let request = send(payload);
        let handle = self.clone();
        spawn_local(async move {
            let result = request.await;
            if !handle.mounted() {
                Logger::debug_with_component("use_form", "Form unmounted before its response arrived");
                return;
            }
            match result {
                Ok(response) => {
                    let message = on_success(response);
                    let show_banner = message.is_some();
                    let banner = handle.state.borrow_mut().succeed(message);
                    handle.refresh.force_update();
                    if show_banner {
                        TimeoutFuture::new(SUCCESS_MESSAGE_MS).await;
                        // a later submit may have put up its own banner meanwhile
                        if handle.mounted() && handle.state.borrow_mut().dismiss_success(banner) {
                            handle.refresh.force_update();
                        }
                    }
                }
                Err(e) => {
                    handle.state.borrow_mut().fail(&e);
                    handle.refresh.force_update();
                }
            }
        });
    }

    fn mounted(&self) -> bool {
        *self.is_mounted.borrow()
    }
}

#[hook]
pub fn use_form<D>(initial: D) -> UseFormHandle<D>
where
    D: Validate + Default + Clone + 'static,
{
    let state = use_mut_ref(move || FormState::new(initial));
    let is_mounted = use_mounted();
    let refresh = use_force_update();

    UseFormHandle {
        state,
        is_mounted,
        refresh,
    }
}
