//! Session notifications and the observer list that delivers them.
//!
//! Listeners are invoked synchronously, in no guaranteed order, on the thread
//! that mutated the session. A listener must not assume it runs before or
//! after any other listener.

use super::GameState;

/// Notification emitted by a [`GameSession`](super::GameSession)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    ScoreChanged(u32),
    TimeChanged(f32),
    StateChanged(GameState),
    /// Countdown reached zero; fired once per round
    TimeExpired,
    /// Fish advanced to a new level
    LevelChanged(u8),
    /// Final score of a won round
    WinScore(u32),
    EnemyEaten { level: u8 },
}

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&SessionEvent)>;

#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was not subscribed
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: SessionEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_every_listener() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = Rc::clone(&seen);
        bus.subscribe(move |e| a.borrow_mut().push(("a", *e)));
        let b = Rc::clone(&seen);
        bus.subscribe(move |e| b.borrow_mut().push(("b", *e)));

        bus.emit(SessionEvent::ScoreChanged(10));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&("a", SessionEvent::ScoreChanged(10))));
        assert!(seen.contains(&("b", SessionEvent::ScoreChanged(10))));
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));

        let c = Rc::clone(&count);
        let id = bus.subscribe(move |_| *c.borrow_mut() += 1);
        bus.emit(SessionEvent::TimeExpired);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(SessionEvent::TimeExpired);

        assert_eq!(*count.borrow(), 1);
        assert!(bus.is_empty());
    }
}
