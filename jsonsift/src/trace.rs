// SPDX-License-Identifier: Apache-2.0

use crate::Event;

/// Observes every event the decoder dispatches.
///
/// `depth` is the object depth after the event was applied and `retained`
/// tells whether the event contributed to the record. Tracing never changes
/// what is decoded.
pub trait EventTrace {
    fn on_event(&mut self, event: &Event<'_>, depth: usize, retained: bool);
}

impl<F> EventTrace for F
where
    F: FnMut(&Event<'_>, usize, bool),
{
    fn on_event(&mut self, event: &Event<'_>, depth: usize, retained: bool) {
        self(event, depth, retained)
    }
}
