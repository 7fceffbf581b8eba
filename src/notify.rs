//! Change notification - observers keyed by content URI
//!
//! A change on URI `U` reaches an observer registered on `R` when
//! - `R == U`,
//! - `R` lies below `U` (a change to the collection touches every row), or
//! - `R` lies above `U` and the observer asked for descendants.
//!
//! Delivery is synchronous: every matching observer has been invoked (or
//! had the URI queued on its channel) before `notify_change` returns.
//! Observers whose channel has no receiver left are dropped on the next
//! delivery attempt.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};

use crate::uri::ContentUri;

/// Callback invoked after data under a watched URI changed.
pub trait ChangeObserver: Send + Sync {
    fn on_change(&self, uri: &ContentUri);
}

impl<F> ChangeObserver for F
where
    F: Fn(&ContentUri) + Send + Sync,
{
    fn on_change(&self, uri: &ContentUri) {
        self(uri)
    }
}

/// Handle returned by registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

enum Target {
    Callback(Arc<dyn ChangeObserver>),
    Channel(Sender<ContentUri>),
}

struct Registration {
    id: ObserverId,
    uri: ContentUri,
    notify_for_descendants: bool,
    target: Target,
}

impl Registration {
    fn wants(&self, changed: &ContentUri) -> bool {
        self.uri == *changed
            || changed.is_ancestor_of(&self.uri)
            || (self.notify_for_descendants && self.uri.is_ancestor_of(changed))
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    observers: Vec<Registration>,
}

/// Observer list shared by a provider and the cursors it hands out.
#[derive(Default)]
pub struct ChangeNotifier {
    registry: Mutex<Registry>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback on `uri`
    pub fn register(
        &self,
        uri: &ContentUri,
        notify_for_descendants: bool,
        observer: Arc<dyn ChangeObserver>,
    ) -> ObserverId {
        self.insert(uri, notify_for_descendants, Target::Callback(observer))
    }

    /// Register a channel on `uri`; each matching change sends the changed URI
    pub fn register_sender(
        &self,
        uri: &ContentUri,
        notify_for_descendants: bool,
        sender: Sender<ContentUri>,
    ) -> ObserverId {
        self.insert(uri, notify_for_descendants, Target::Channel(sender))
    }

    /// Register a fresh channel on `uri` and return its receiving end.
    /// The registration is removed when the subscription is dropped.
    pub fn subscribe(self: &Arc<Self>, uri: &ContentUri, notify_for_descendants: bool) -> Subscription {
        let (tx, rx) = channel::unbounded();
        let id = self.register_sender(uri, notify_for_descendants, tx);
        Subscription {
            id,
            receiver: rx,
            notifier: Arc::downgrade(self),
        }
    }

    /// Remove a registration; false if it was already gone
    pub fn unregister(&self, id: ObserverId) -> bool {
        let mut registry = self.lock();
        let before = registry.observers.len();
        registry.observers.retain(|r| r.id != id);
        registry.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    /// Deliver a change on `uri` to every interested observer. Returns the
    /// number of observers reached.
    pub fn notify_change(&self, uri: &ContentUri) -> usize {
        // Snapshot the targets so observers may register or unregister while running
        let targets: Vec<(ObserverId, Target)> = self
            .lock()
            .observers
            .iter()
            .filter(|r| r.wants(uri))
            .map(|r| {
                let target = match &r.target {
                    Target::Callback(cb) => Target::Callback(Arc::clone(cb)),
                    Target::Channel(tx) => Target::Channel(tx.clone()),
                };
                (r.id, target)
            })
            .collect();

        let mut delivered = 0;
        let mut dead = Vec::new();
        for (id, target) in targets {
            match target {
                Target::Callback(cb) => {
                    cb.on_change(uri);
                    delivered += 1;
                }
                Target::Channel(tx) => match tx.send(uri.clone()) {
                    Ok(()) => delivered += 1,
                    Err(_) => dead.push(id),
                },
            }
        }

        if !dead.is_empty() {
            tracing::debug!("Dropping {} disconnected observers", dead.len());
            self.lock().observers.retain(|r| !dead.contains(&r.id));
        }

        tracing::debug!("Notified {} observers of change on {}", delivered, uri);
        delivered
    }

    fn insert(&self, uri: &ContentUri, notify_for_descendants: bool, target: Target) -> ObserverId {
        let mut registry = self.lock();
        let id = ObserverId(registry.next_id);
        registry.next_id += 1;
        registry.observers.push(Registration {
            id,
            uri: uri.clone(),
            notify_for_descendants,
            target,
        });
        id
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        // The registry holds no invariant a panicking observer could break
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Receiving end of a channel registration.
pub struct Subscription {
    id: ObserverId,
    receiver: Receiver<ContentUri>,
    notifier: Weak<ChangeNotifier>,
}

impl Subscription {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Next queued change, without blocking
    pub fn try_recv(&self) -> Option<ContentUri> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next change. `None` on timeout or when
    /// the notifier is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ContentUri> {
        match self.receiver.recv_timeout(timeout) {
            Ok(uri) => Some(uri),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Drain every change queued so far
    pub fn drain(&self) -> Vec<ContentUri> {
        self.receiver.try_iter().collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(notifier) = self.notifier.upgrade() {
            notifier.unregister(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::content_uri;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_exact_match_delivers() {
        let notifier = Arc::new(ChangeNotifier::new());
        let sub = notifier.subscribe(&content_uri(), false);

        assert_eq!(notifier.notify_change(&content_uri()), 1);
        assert_eq!(sub.try_recv(), Some(content_uri()));
        assert_eq!(sub.try_recv(), None);
    }

    #[test]
    fn test_collection_change_reaches_item_watchers() {
        let notifier = Arc::new(ChangeNotifier::new());
        let item = notifier.subscribe(&content_uri().with_appended_id(3), false);

        notifier.notify_change(&content_uri());
        assert_eq!(item.drain(), vec![content_uri()]);
    }

    #[test]
    fn test_item_change_needs_descendants_flag() {
        let notifier = Arc::new(ChangeNotifier::new());
        let shallow = notifier.subscribe(&content_uri(), false);
        let deep = notifier.subscribe(&content_uri(), true);
        let changed = content_uri().with_appended_id(9);

        assert_eq!(notifier.notify_change(&changed), 1);
        assert!(shallow.drain().is_empty());
        assert_eq!(deep.drain(), vec![changed]);
    }

    #[test]
    fn test_sibling_rows_are_independent() {
        let notifier = Arc::new(ChangeNotifier::new());
        let one = notifier.subscribe(&content_uri().with_appended_id(1), true);

        assert_eq!(notifier.notify_change(&content_uri().with_appended_id(2)), 0);
        assert!(one.drain().is_empty());
    }

    #[test]
    fn test_callback_observer_and_unregister() {
        let notifier = ChangeNotifier::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = notifier.register(
            &content_uri(),
            true,
            Arc::new(move |_: &ContentUri| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        notifier.notify_change(&content_uri().with_appended_id(1));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(notifier.unregister(id));
        assert!(!notifier.unregister(id));
        notifier.notify_change(&content_uri());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_subscription_unregisters() {
        let notifier = Arc::new(ChangeNotifier::new());
        let sub = notifier.subscribe(&content_uri(), false);
        assert_eq!(notifier.observer_count(), 1);

        drop(sub);
        assert_eq!(notifier.observer_count(), 0);
    }

    #[test]
    fn test_disconnected_sender_is_pruned() {
        let notifier = ChangeNotifier::new();
        let (tx, rx) = channel::unbounded();
        notifier.register_sender(&content_uri(), false, tx);
        drop(rx);

        assert_eq!(notifier.notify_change(&content_uri()), 0);
        assert_eq!(notifier.observer_count(), 0);
    }
}
