use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces tick, render and terminal events in order.
///
/// A render is requested after every tick or terminal event. Without a tick
/// interval the loop only waits for terminal events.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            // First frame
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    /// Blocks until the next tick is due, a render is pending, or a terminal
    /// event arrives.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.is_tick_due(now) {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn is_tick_due(&self, now: Instant) -> bool {
        self.tick_interval
            .is_some_and(|interval| now.duration_since(self.last_tick) >= interval)
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_timeout_without_tick_interval() {
        let events = EventLoop::new();
        assert_eq!(events.compute_timeout(Instant::now()), None);
        assert!(!events.is_tick_due(Instant::now() + Duration::from_secs(60)));
    }

    #[test]
    fn test_timeout_counts_down_to_next_tick() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(50)));
        let start = events.last_tick;

        assert_eq!(
            events.compute_timeout(start + Duration::from_millis(20)),
            Some(Duration::from_millis(30))
        );
        assert_eq!(
            events.compute_timeout(start + Duration::from_millis(80)),
            Some(Duration::ZERO)
        );
        assert!(!events.is_tick_due(start + Duration::from_millis(49)));
        assert!(events.is_tick_due(start + Duration::from_millis(50)));
    }

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        assert_eq!(events.next().unwrap(), TuiEvent::Render);
    }
}
