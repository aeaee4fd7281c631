// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Field-cleared notifications scoped to one panel.
//!
//! Field handlers subscribe when mounted and unsubscribe when unmounted. Delivery is
//! synchronous: every matching listener has run before `notify` returns.

use std::fmt;

use crate::models::condition::FieldId;

/// Signal that all active conditions of a field were removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldCleared {
    pub field: FieldId,
}

/// Handle returned by [`FieldClearedListeners::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&FieldCleared)>;

/// Registry of field-keyed listeners.
#[derive(Default)]
pub struct FieldClearedListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, FieldId, Listener)>,
}

impl fmt::Debug for FieldClearedListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldClearedListeners")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FieldClearedListeners {
    /// Register a listener for notifications about `field`.
    pub fn subscribe(
        &mut self,
        field: FieldId,
        listener: impl FnMut(&FieldCleared) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, field, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false when the id was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver to every listener keyed on the cleared field, in subscription order.
    /// Returns the number of listeners reached.
    pub fn notify(&mut self, event: &FieldCleared) -> usize {
        let mut delivered = 0;
        for (_, field, listener) in self.listeners.iter_mut() {
            if *field == event.field {
                listener(event);
                delivered += 1;
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn cleared(field: &str) -> FieldCleared {
        FieldCleared {
            field: FieldId::from(field),
        }
    }

    #[test]
    fn delivers_only_to_matching_field() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = FieldClearedListeners::default();

        let sink = Rc::clone(&seen);
        registry.subscribe(FieldId::from("color"), move |ev| {
            sink.borrow_mut().push(format!("color:{}", ev.field))
        });
        let sink = Rc::clone(&seen);
        registry.subscribe(FieldId::from("price"), move |ev| {
            sink.borrow_mut().push(format!("price:{}", ev.field))
        });

        assert_eq!(registry.notify(&cleared("color")), 1);
        assert_eq!(*seen.borrow(), vec!["color:color"]);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let hits = Rc::new(RefCell::new(0));
        let mut registry = FieldClearedListeners::default();

        let sink = Rc::clone(&hits);
        let id = registry.subscribe(FieldId::from("name"), move |_| *sink.borrow_mut() += 1);

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        assert!(registry.is_empty());
        assert_eq!(registry.notify(&cleared("name")), 0);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut registry = FieldClearedListeners::default();
        let a = registry.subscribe(FieldId::from("a"), |_| {});
        registry.unsubscribe(a);
        let b = registry.subscribe(FieldId::from("a"), |_| {});
        assert_ne!(a, b);
    }
}
