use admin_dashboard_client::{Collection, Store};
use yew::prelude::*;

/// Re-render whenever `store` changes and return its current state.
///
/// The subscription is dropped on unmount, so a late response never
/// reaches a destroyed component.
#[hook]
pub fn use_store<T>(store: &Store<T>) -> Collection<T>
where
    T: Clone + 'static,
{
    let refresh = use_force_update();

    use_effect_with(store.clone(), move |store| {
        let subscription = store.subscribe(move || refresh.force_update());
        move || drop(subscription)
    });

    store.snapshot().clone()
}
