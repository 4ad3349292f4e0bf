//! Request-state container for resource collections.
//!
//! A [`Store`] owns one collection's cached data plus the status of the last
//! request issued against it. Dispatching marks the collection `Pending`
//! right away, before the request future is even polled, and settles it when
//! the future resolves.
//!
//! Two kinds of dispatch exist:
//!
//! - A load ([`Store::dispatch`]) replaces the data. Only the newest load may
//!   settle, so a slow early response cannot overwrite a newer one.
//! - A patch ([`Store::dispatch_patch`] and the list mutations) edits the
//!   data in place and always applies. A patch that lands while a load is in
//!   flight is replayed onto that load's result, so the load cannot undo it.
//!   Patches must be idempotent.
//!
//! Only the newest dispatch of either kind decides the displayed status. The
//! caller of a fenced dispatch still gets its own result back.

use std::cell::{Ref, RefCell};
use std::future::Future;
use std::rc::{Rc, Weak};

use log::debug;
use shared::{ApiError, Identified, RequestStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket(u64);

/// An in-place edit of the collection data
pub type Patch<T> = Rc<dyn Fn(&mut T)>;

#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    status: RequestStatus,
    data: T,
    error: Option<ApiError>,
}

impl<T: Default> Default for Collection<T> {
    fn default() -> Self {
        Self {
            status: RequestStatus::Idle,
            data: T::default(),
            error: None,
        }
    }
}

impl<T> Collection<T> {
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Error of the last rejected request, cleared by the next dispatch
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    fn record<R>(&mut self, result: &Result<R, ApiError>) {
        match result {
            Ok(_) => self.status = RequestStatus::Fulfilled,
            Err(error) => {
                self.error = Some(error.clone());
                self.status = RequestStatus::Rejected;
            }
        }
    }
}

/// Ticket bookkeeping kept beside the collection
struct Ledger<T> {
    /// Newest ticket handed out
    latest: u64,
    /// Newest load ticket
    newest_load: u64,
    /// Tickets at or below this were issued before the last reset
    floor: u64,
    loads_in_flight: Vec<u64>,
    /// Patches applied while a load was in flight, stamped with `latest` at
    /// the time they applied
    journal: Vec<(u64, Patch<T>)>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            latest: 0,
            newest_load: 0,
            floor: 0,
            loads_in_flight: Vec::new(),
            journal: Vec::new(),
        }
    }
}

impl<T> Ledger<T> {
    fn issue(&mut self, load: bool) -> Ticket {
        self.latest += 1;
        if load {
            self.newest_load = self.latest;
            self.loads_in_flight.push(self.latest);
        }
        Ticket(self.latest)
    }

    fn is_before_reset(&self, ticket: Ticket) -> bool {
        ticket.0 <= self.floor
    }

    fn is_newest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Forget patches no in-flight load can still overwrite
    fn prune(&mut self) {
        match self.loads_in_flight.iter().min().copied() {
            Some(oldest) => self.journal.retain(|(stamp, _)| *stamp >= oldest),
            None => self.journal.clear(),
        }
    }
}

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Shared handle to a collection; clones observe the same state
pub struct Store<T> {
    state: Rc<RefCell<Collection<T>>>,
    ledger: Rc<RefCell<Ledger<T>>>,
    listeners: Rc<RefCell<Listeners>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            ledger: Rc::clone(&self.ledger),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(Collection::default())),
            ledger: Rc::new(RefCell::new(Ledger::default())),
            listeners: Rc::new(RefCell::new(Listeners::default())),
        }
    }
}

impl<T> PartialEq for Store<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl<T: Default> Store<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached data and ignore every request still in flight.
    /// Called when the session ends.
    pub fn reset(&self) {
        {
            let mut ledger = self.ledger.borrow_mut();
            ledger.floor = ledger.latest;
            ledger.loads_in_flight.clear();
            ledger.journal.clear();
        }
        *self.state.borrow_mut() = Collection::default();
        self.notify();
    }
}

impl<T> Store<T> {
    pub fn status(&self) -> RequestStatus {
        self.state.borrow().status
    }

    pub fn snapshot(&self) -> Ref<'_, Collection<T>> {
        self.state.borrow()
    }

    /// Call `listener` after every state change until the returned
    /// [`Subscription`] is dropped
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        listeners.next_id += 1;
        let id = listeners.next_id;
        listeners.entries.push((id, Rc::new(listener)));
        let registry: Weak<RefCell<Listeners>> = Rc::downgrade(&self.listeners);
        Subscription {
            id,
            listeners: registry,
        }
    }

    fn begin(&self, load: bool) -> Ticket {
        let ticket = self.ledger.borrow_mut().issue(load);
        {
            let mut state = self.state.borrow_mut();
            state.status = RequestStatus::Pending;
            state.error = None;
        }
        self.notify();
        ticket
    }

    /// Load the collection, replacing its data with the response.
    ///
    /// The status flips to `Pending` before this returns. A load superseded
    /// by a newer one leaves the collection alone.
    pub fn dispatch<F>(&self, request: F) -> impl Future<Output = Result<T, ApiError>>
    where
        F: Future<Output = Result<T, ApiError>>,
        T: Clone,
    {
        let ticket = self.begin(true);
        let store = self.clone();
        async move {
            let result = request.await;
            if store.settle_load(ticket, &result) {
                store.notify();
            } else {
                debug!("Dropping stale response for request {:?}", ticket);
            }
            result
        }
    }

    /// Run a mutation and, on success, apply the patch built from its
    /// response to the current data
    pub fn dispatch_patch<R, F, P>(&self, request: F, patch: P) -> impl Future<Output = Result<R, ApiError>>
    where
        F: Future<Output = Result<R, ApiError>>,
        P: FnOnce(&R) -> Patch<T>,
    {
        let ticket = self.begin(false);
        let store = self.clone();
        async move {
            let result = request.await;
            if store.settle_patch(ticket, &result, patch) {
                store.notify();
            } else {
                debug!("Ignoring response for request {:?} issued before reset", ticket);
            }
            result
        }
    }

    fn settle_load(&self, ticket: Ticket, result: &Result<T, ApiError>) -> bool
    where
        T: Clone,
    {
        let mut ledger = self.ledger.borrow_mut();
        ledger.loads_in_flight.retain(|t| *t != ticket.0);
        let fresh = !ledger.is_before_reset(ticket) && ticket.0 == ledger.newest_load;
        if fresh {
            let mut state = self.state.borrow_mut();
            if let Ok(value) = result {
                let mut data = value.clone();
                for (_, patch) in ledger.journal.iter().filter(|(stamp, _)| *stamp >= ticket.0) {
                    patch(&mut data);
                }
                state.data = data;
            }
            if ledger.is_newest(ticket) {
                state.record(result);
            }
        }
        ledger.prune();
        fresh
    }

    fn settle_patch<R>(&self, ticket: Ticket, result: &Result<R, ApiError>, patch: impl FnOnce(&R) -> Patch<T>) -> bool {
        let mut ledger = self.ledger.borrow_mut();
        if ledger.is_before_reset(ticket) {
            return false;
        }
        let mut state = self.state.borrow_mut();
        if let Ok(value) = result {
            let patch = patch(value);
            patch(&mut state.data);
            if !ledger.loads_in_flight.is_empty() {
                let stamp = ledger.latest;
                ledger.journal.push((stamp, patch));
            }
        }
        if ledger.is_newest(ticket) {
            state.record(result);
        }
        true
    }

    fn notify(&self) {
        // Snapshot first so listeners may read the store or unsubscribe
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

fn upsert<T: Identified + Clone>(items: &mut Vec<T>, record: &T) {
    match items.iter().position(|item| item.id() == record.id()) {
        Some(index) => items[index] = record.clone(),
        None => items.push(record.clone()),
    }
}

impl<T: Identified + Clone + 'static> Store<Vec<T>> {
    /// Create a record and append it to the cached list
    pub fn dispatch_create<F>(&self, request: F) -> impl Future<Output = Result<T, ApiError>>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.dispatch_patch(request, |created: &T| -> Patch<Vec<T>> {
            let created = created.clone();
            Rc::new(move |items: &mut Vec<T>| upsert(items, &created))
        })
    }

    /// Update a record and replace the cached copy with the same id
    pub fn dispatch_update<F>(&self, request: F) -> impl Future<Output = Result<T, ApiError>>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.dispatch_patch(request, |updated: &T| -> Patch<Vec<T>> {
            let updated = updated.clone();
            Rc::new(move |items: &mut Vec<T>| upsert(items, &updated))
        })
    }

    /// Delete record `id` and drop it from the cached list
    pub fn dispatch_delete<R, F>(&self, id: String, request: F) -> impl Future<Output = Result<R, ApiError>>
    where
        F: Future<Output = Result<R, ApiError>>,
    {
        self.dispatch_patch(request, move |_: &R| -> Patch<Vec<T>> {
            Rc::new(move |items: &mut Vec<T>| items.retain(|item| item.id() != id))
        })
    }
}

/// Keeps a listener registered; dropping it unsubscribes
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    use shared::Plan;
    use tokio::sync::oneshot;
    use tokio::time::timeout;

    type Reply<T> = oneshot::Sender<Result<T, ApiError>>;

    /// A request future the test resolves by hand
    fn deferred<T>() -> (Reply<T>, impl Future<Output = Result<T, ApiError>>) {
        let (tx, rx) = oneshot::channel();
        let request = async move {
            rx.await
                .unwrap_or_else(|_| Err(ApiError::network("request dropped")))
        };
        (tx, request)
    }

    fn plan(id: &str, name: &str) -> Plan {
        Plan {
            id: id.to_string(),
            name: name.to_string(),
            monthly_price: 10.0,
            yearly_price: 100.0,
            details: vec!["a".into(), "b".into(), "c".into()],
        }
    }

    #[tokio::test]
    async fn test_dispatch_is_pending_until_the_request_resolves() {
        let store: Store<Vec<u32>> = Store::new();
        assert_eq!(store.status(), RequestStatus::Idle);

        let (reply, request) = deferred();
        let mut task = Box::pin(store.dispatch(request));

        // pending before the future was ever polled
        assert_eq!(store.status(), RequestStatus::Pending);

        assert!(timeout(Duration::from_millis(20), &mut task).await.is_err());
        assert_eq!(store.status(), RequestStatus::Pending);
        assert!(store.snapshot().data().is_empty());

        reply.send(Ok(vec![1, 2, 3])).unwrap();
        assert_eq!(task.await, Ok(vec![1, 2, 3]));
        assert_eq!(store.status(), RequestStatus::Fulfilled);
        assert_eq!(store.snapshot().data(), &vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_listeners_see_pending_before_settled() {
        let store: Store<Vec<u32>> = Store::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _subscription = {
            let seen = Rc::clone(&seen);
            let observed = store.clone();
            store.subscribe(move || seen.borrow_mut().push(observed.status()))
        };

        store.dispatch(async { Ok(vec![1]) }).await.unwrap();
        store.dispatch(async { Err(ApiError::network("down")) }).await.unwrap_err();

        assert_eq!(
            *seen.borrow(),
            vec![
                RequestStatus::Pending,
                RequestStatus::Fulfilled,
                RequestStatus::Pending,
                RequestStatus::Rejected,
            ]
        );
    }

    #[tokio::test]
    async fn test_rejection_keeps_data_and_records_error() {
        let store: Store<Vec<u32>> = Store::new();
        store.dispatch(async { Ok(vec![5]) }).await.unwrap();

        let error = store
            .dispatch(async { Err(ApiError::rejected(500, "Failed to load plans")) })
            .await
            .unwrap_err();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.status(), RequestStatus::Rejected);
        assert_eq!(snapshot.data(), &vec![5]);
        assert_eq!(snapshot.error(), Some(&error));
        assert_eq!(snapshot.error().unwrap().to_string(), "Failed to load plans");
    }

    #[tokio::test]
    async fn test_next_dispatch_clears_previous_error() {
        let store: Store<Vec<u32>> = Store::new();
        store.dispatch(async { Err(ApiError::network("down")) }).await.unwrap_err();

        let (_reply, request) = deferred();
        let _task = store.dispatch(request);

        assert_eq!(store.status(), RequestStatus::Pending);
        assert!(store.snapshot().error().is_none());
    }

    #[tokio::test]
    async fn test_stale_response_does_not_overwrite_newer_one() {
        let store: Store<Vec<u32>> = Store::new();
        let (slow_reply, slow) = deferred();
        let (fast_reply, fast) = deferred();

        let slow_task = store.dispatch(slow);
        let fast_task = store.dispatch(fast);

        fast_reply.send(Ok(vec![2])).unwrap();
        assert_eq!(fast_task.await, Ok(vec![2]));
        assert_eq!(store.status(), RequestStatus::Fulfilled);

        slow_reply.send(Ok(vec![1])).unwrap();
        // the slow caller still sees its own answer
        assert_eq!(slow_task.await, Ok(vec![1]));
        assert_eq!(store.snapshot().data(), &vec![2]);
    }

    #[tokio::test]
    async fn test_stale_response_leaves_newer_request_pending() {
        let store: Store<Vec<u32>> = Store::new();
        let (old_reply, old) = deferred();
        let (_new_reply, new) = deferred();

        let old_task = store.dispatch(old);
        let _new_task = store.dispatch(new);

        old_reply.send(Err(ApiError::network("timeout"))).unwrap();
        assert!(old_task.await.is_err());
        assert_eq!(store.status(), RequestStatus::Pending);
        assert!(store.snapshot().error().is_none());
    }

    #[tokio::test]
    async fn test_dropped_subscription_stops_notifications() {
        let store: Store<Vec<u32>> = Store::new();
        let calls = Rc::new(Cell::new(0));
        let subscription = {
            let calls = Rc::clone(&calls);
            store.subscribe(move || calls.set(calls.get() + 1))
        };

        store.dispatch(async { Ok(vec![1]) }).await.unwrap();
        assert_eq!(calls.get(), 2);

        drop(subscription);
        store.dispatch(async { Ok(vec![2]) }).await.unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_list_mutations_patch_cached_records() {
        let store: Store<Vec<Plan>> = Store::new();
        store
            .dispatch(async { Ok(vec![plan("p1", "Basic"), plan("p2", "Pro")]) })
            .await
            .unwrap();

        store.dispatch_create(async { Ok(plan("p3", "Team")) }).await.unwrap();
        store.dispatch_update(async { Ok(plan("p2", "Pro+")) }).await.unwrap();
        store
            .dispatch_delete("p1".to_string(), async { Ok(()) })
            .await
            .unwrap();

        let names: Vec<String> = store.snapshot().data().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Pro+", "Team"]);
        assert_eq!(store.status(), RequestStatus::Fulfilled);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_record() {
        let store: Store<Vec<Plan>> = Store::new();
        store.dispatch(async { Ok(vec![plan("p1", "Basic")]) }).await.unwrap();

        store
            .dispatch_delete("p1".to_string(), async { Err::<(), _>(ApiError::rejected(404, "Plan not found")) })
            .await
            .unwrap_err();

        assert_eq!(store.snapshot().data().len(), 1);
        assert_eq!(store.status(), RequestStatus::Rejected);
    }

    fn ids(store: &Store<Vec<Plan>>) -> Vec<String> {
        store.snapshot().data().iter().map(|p| p.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_overlapping_deletes_both_apply() {
        let store: Store<Vec<Plan>> = Store::new();
        store
            .dispatch(async { Ok(vec![plan("a", "A"), plan("b", "B"), plan("c", "C")]) })
            .await
            .unwrap();

        let (first_reply, first) = deferred::<()>();
        let (second_reply, second) = deferred::<()>();
        let first_task = store.dispatch_delete("a".to_string(), first);
        let second_task = store.dispatch_delete("b".to_string(), second);

        first_reply.send(Ok(())).unwrap();
        first_task.await.unwrap();
        assert_eq!(ids(&store), vec!["b", "c"]);
        // the newer delete still owns the status
        assert_eq!(store.status(), RequestStatus::Pending);

        second_reply.send(Ok(())).unwrap();
        second_task.await.unwrap();
        assert_eq!(ids(&store), vec!["c"]);
        assert_eq!(store.status(), RequestStatus::Fulfilled);
    }

    #[tokio::test]
    async fn test_create_during_load_survives_the_load() {
        let store: Store<Vec<Plan>> = Store::new();
        let (load_reply, load) = deferred();
        let load_task = store.dispatch(load);

        store.dispatch_create(async { Ok(plan("new", "New")) }).await.unwrap();
        assert_eq!(ids(&store), vec!["new"]);

        load_reply.send(Ok(vec![plan("a", "A"), plan("b", "B")])).unwrap();
        load_task.await.unwrap();

        assert_eq!(ids(&store), vec!["a", "b", "new"]);
        assert_eq!(store.status(), RequestStatus::Fulfilled);
    }

    #[tokio::test]
    async fn test_replayed_create_is_not_duplicated() {
        let store: Store<Vec<Plan>> = Store::new();
        let (load_reply, load) = deferred();
        let load_task = store.dispatch(load);

        store.dispatch_create(async { Ok(plan("new", "New")) }).await.unwrap();
        // the backend already included the new record in the listing
        load_reply.send(Ok(vec![plan("a", "A"), plan("new", "New")])).unwrap();
        load_task.await.unwrap();

        assert_eq!(ids(&store), vec!["a", "new"]);
    }

    #[tokio::test]
    async fn test_delete_during_load_is_replayed() {
        let store: Store<Vec<Plan>> = Store::new();
        let (load_reply, load) = deferred();
        let load_task = store.dispatch(load);

        store
            .dispatch_delete("a".to_string(), async { Ok(()) })
            .await
            .unwrap();
        load_reply.send(Ok(vec![plan("a", "A"), plan("b", "B")])).unwrap();
        load_task.await.unwrap();

        assert_eq!(ids(&store), vec!["b"]);
    }

    #[tokio::test]
    async fn test_patches_after_load_settled_are_not_replayed_later() {
        let store: Store<Vec<Plan>> = Store::new();
        store.dispatch(async { Ok(vec![plan("a", "A")]) }).await.unwrap();
        store
            .dispatch_delete("a".to_string(), async { Ok(()) })
            .await
            .unwrap();

        // a later listing that contains "a" again is taken as is
        store.dispatch(async { Ok(vec![plan("a", "A")]) }).await.unwrap();
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[tokio::test]
    async fn test_reset_clears_data_and_ignores_in_flight_requests() {
        let store: Store<Vec<Plan>> = Store::new();
        store.dispatch(async { Ok(vec![plan("a", "A")]) }).await.unwrap();

        let (load_reply, load) = deferred();
        let (create_reply, create) = deferred();
        let load_task = store.dispatch(load);
        let create_task = store.dispatch_create(create);

        store.reset();
        assert_eq!(store.status(), RequestStatus::Idle);
        assert!(store.snapshot().data().is_empty());

        create_reply.send(Ok(plan("late", "Late"))).unwrap();
        load_reply.send(Ok(vec![plan("old", "Old")])).unwrap();
        // callers still get their answers
        assert!(create_task.await.is_ok());
        assert!(load_task.await.is_ok());

        assert!(store.snapshot().data().is_empty());
        assert_eq!(store.status(), RequestStatus::Idle);

        store.dispatch(async { Ok(vec![plan("b", "B")]) }).await.unwrap();
        assert_eq!(ids(&store), vec!["b"]);
    }

    #[test]
    fn test_clones_share_state() {
        let store: Store<Vec<u32>> = Store::new();
        let other = store.clone();
        assert!(store == other);
        assert!(store != Store::new());
    }
}
