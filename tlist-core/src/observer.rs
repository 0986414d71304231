//! Change notification for transformation lists
//!
//! Observers are called synchronously, in subscription order, after a
//! mutation has been committed and the composite cache invalidated. A handler
//! may query the composer it is handed (including the complete transform)
//! and will see the new state.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::composer::TransformComposer;

/// Receives a notification whenever a [`TransformComposer`] changes structurally.
pub trait ChangeObserver {
    fn transformations_changed(&mut self, composer: &TransformComposer);
}

impl<F> ChangeObserver for F
where
    F: FnMut(&TransformComposer),
{
    fn transformations_changed(&mut self, composer: &TransformComposer) {
        self(composer)
    }
}

/// Handle returned by [`TransformComposer::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Handler = Rc<RefCell<dyn ChangeObserver>>;

/// Ordered set of subscribed observers.
///
/// The registry stays in place while it is notifying; a handler that panics
/// releases only its own borrow and every subscription survives.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Handler)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: impl ChangeObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        let handler: Handler = Rc::new(RefCell::new(observer));
        self.entries.push((id, handler));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&self, composer: &TransformComposer) {
        for (_, handler) in &self.entries {
            handler.borrow_mut().transformations_changed(composer);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
