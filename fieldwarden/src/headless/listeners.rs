use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::widget::{ListenerKey, Subscription};

struct Slot<A> {
    key: ListenerKey,
    generation: u64,
    listener: Rc<dyn Fn(A)>,
}

struct Table<A> {
    generation: u64,
    slots: Vec<Slot<A>>,
}

/// Keyed listener list.
///
/// Inserting under an existing key replaces that listener in place. A
/// [`Subscription`] only removes the exact registration it was issued for,
/// so dropping a stale guard never removes its replacement.
pub struct Listeners<A> {
    table: Rc<RefCell<Table<A>>>,
}

impl<A: Copy + 'static> Listeners<A> {
    pub fn new() -> Self {
        Self {
            table: Rc::new(RefCell::new(Table {
                generation: 0,
                slots: Vec::new(),
            })),
        }
    }

    pub fn insert(&self, key: ListenerKey, listener: Rc<dyn Fn(A)>) -> Subscription {
        let generation = {
            let mut table = self.table.borrow_mut();
            table.generation += 1;
            let generation = table.generation;
            match table.slots.iter_mut().find(|slot| slot.key == key) {
                Some(slot) => {
                    slot.generation = generation;
                    slot.listener = listener;
                }
                None => table.slots.push(Slot {
                    key,
                    generation,
                    listener,
                }),
            }
            generation
        };

        let table: Weak<RefCell<Table<A>>> = Rc::downgrade(&self.table);
        Subscription::new(move || {
            if let Some(table) = table.upgrade() {
                table
                    .borrow_mut()
                    .slots
                    .retain(|slot| !(slot.key == key && slot.generation == generation));
            }
        })
    }

    /// Call every listener with `arg`.
    ///
    /// Listeners may add or remove listeners while being called; changes
    /// take effect from the next emit.
    pub fn emit(&self, arg: A) {
        let listeners: Vec<Rc<dyn Fn(A)>> = self
            .table
            .borrow()
            .slots
            .iter()
            .map(|slot| Rc::clone(&slot.listener))
            .collect();
        for listener in listeners {
            listener(arg);
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A: Copy + 'static> Default for Listeners<A> {
    fn default() -> Self {
        Self::new()
    }
}
