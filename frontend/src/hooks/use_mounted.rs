use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

/// Flag that flips to `false` when the component unmounts.
///
/// Async work checks it before touching component state.
#[hook]
pub fn use_mounted() -> Rc<RefCell<bool>> {
    let is_mounted = use_mut_ref(|| true);

    {
        let is_mounted = is_mounted.clone();
        use_effect_with((), move |_| {
            *is_mounted.borrow_mut() = true;
            move || {
                *is_mounted.borrow_mut() = false;
            }
        });
    }

    is_mounted
}
