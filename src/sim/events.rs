//! Progression notifications
//!
//! Delivered synchronously, in subscription order, from inside the call that
//! raised them.

use std::fmt;

/// Something observers of the player may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionEvent {
    /// Cumulative run score after a score gain
    ScoreChanged(u32),
    /// Level went up by one; read the new level from the player
    LevelUp,
    /// Run ended with this cumulative score
    Died(u32),
}

/// Handle returned by [`Observers::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

type Callback = Box<dyn FnMut(&ProgressionEvent)>;

/// Ordered list of event callbacks
#[derive(Default)]
pub struct Observers {
    callbacks: Vec<(ObserverId, Callback)>,
    next_id: u32,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&ProgressionEvent) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(cid, _)| *cid != id);
        self.callbacks.len() != before
    }

    pub fn emit(&mut self, event: ProgressionEvent) {
        for (_, callback) in &mut self.callbacks {
            callback(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
