//! Event bus
//!
//! Events are delivered one at a time, in FIFO order, to the whole tree.
//! Each delivery is a pass; anything components emit during a pass is
//! appended to the queue. Draining stops once a pass leaves the queue empty.

use std::collections::VecDeque;
use tracing::{debug, trace};

use super::component::ComponentTree;
use super::events::TableEvent;
use crate::error::{Error, Result};
use crate::table::TableState;

/// Default upper bound on passes in one drain
pub const DEFAULT_MAX_PASSES: usize = 10_000;

/// What one drain delivered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub passes: usize,
    /// Every delivered event, in delivery order
    pub delivered: Vec<TableEvent>,
}

impl DispatchReport {
    pub fn count(&self, pred: impl Fn(&TableEvent) -> bool) -> usize {
        self.delivered.iter().filter(|event| pred(event)).count()
    }

    /// Delivered game events, skipping pointer and hover traffic
    pub fn game_events(&self) -> impl Iterator<Item = &TableEvent> {
        self.delivered.iter().filter(|event| !event.is_input())
    }
}

pub struct EventBus {
    queue: VecDeque<TableEvent>,
    max_passes: usize,
}

impl EventBus {
    pub fn new(max_passes: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            max_passes,
        }
    }

    pub fn emit(&mut self, event: TableEvent) {
        self.queue.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = TableEvent>) {
        self.queue.extend(events);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Deliver queued events until none remain.
    ///
    /// A handler error or a runaway cascade abandons whatever is still queued.
    pub fn drain(&mut self, tree: &mut ComponentTree, state: &mut TableState) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();

        while let Some(event) = self.queue.pop_front() {
            if report.passes >= self.max_passes {
                self.queue.clear();
                return Err(Error::CascadeOverflow { passes: report.passes });
            }

            let mut emitted = Vec::new();
            if let Err(e) = tree.dispatch(&event, state, &mut emitted) {
                self.queue.clear();
                return Err(e);
            }

            if event.is_input() {
                trace!(event = event.name(), emitted = emitted.len(), "event delivered");
            } else {
                debug!(event = event.name(), emitted = emitted.len(), "event delivered");
            }

            report.passes += 1;
            report.delivered.push(event);
            self.queue.extend(emitted);
        }

        Ok(report)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PASSES)
    }
}
