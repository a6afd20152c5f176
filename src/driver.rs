//! Per-frame callback loop.
//!
//! Every animated thing on the page (particles, typewriter, counters, skill
//! bars, smooth scrolling) registers a callback here and keeps the returned
//! [`FrameLoop`] for as long as it wants to be animated. Dropping the handle
//! is the only teardown step.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// What a frame callback wants after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

type FrameCallback<C> = Box<dyn FnMut(&mut C, Duration) -> Flow>;

struct Slot<C> {
    alive: Rc<Cell<bool>>,
    callback: FrameCallback<C>,
}

/// Handle to a running frame loop. Dropping it stops the loop.
#[must_use = "dropping a FrameLoop stops it immediately"]
#[derive(Debug)]
pub struct FrameLoop {
    alive: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn is_running(&self) -> bool {
        self.alive.get()
    }

    /// Stop explicitly. Same as dropping the handle.
    pub fn stop(self) {}
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

/// Runs registered callbacks once per display refresh, in registration order.
///
/// `C` is the state the callbacks mutate; it is passed in on every tick so
/// the driver never holds a borrow of it between frames.
pub struct AnimationDriver<C> {
    slots: Vec<Slot<C>>,
    last: Option<Duration>,
}

impl<C> Default for AnimationDriver<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> AnimationDriver<C> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            last: None,
        }
    }

    pub fn start<F>(&mut self, callback: F) -> FrameLoop
    where
        F: FnMut(&mut C, Duration) -> Flow + 'static,
    {
        let alive = Rc::new(Cell::new(true));
        self.slots.push(Slot {
            alive: Rc::clone(&alive),
            callback: Box::new(callback),
        });
        FrameLoop { alive }
    }

    /// Number of loops that will run on the next tick.
    pub fn active(&self) -> usize {
        self.slots.iter().filter(|slot| slot.alive.get()).count()
    }

    /// Run one frame. Returns how many callbacks were invoked.
    ///
    /// Timestamps never go backwards: a `now` earlier than the previous tick
    /// is clamped to the previous timestamp.
    pub fn tick(&mut self, ctx: &mut C, now: Duration) -> usize {
        let now = match self.last {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last = Some(now);

        let mut invoked = 0;
        for slot in &mut self.slots {
            if !slot.alive.get() {
                continue;
            }
            invoked += 1;
            if (slot.callback)(ctx, now) == Flow::Stop {
                slot.alive.set(false);
            }
        }
        self.slots.retain(|slot| slot.alive.get());
        invoked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn callbacks_run_in_registration_order() {
        let mut driver: AnimationDriver<Vec<&'static str>> = AnimationDriver::new();
        let _a = driver.start(|log, _| {
            log.push("a");
            Flow::Continue
        });
        let _b = driver.start(|log, _| {
            log.push("b");
            Flow::Continue
        });

        let mut log = Vec::new();
        driver.tick(&mut log, ms(0));
        driver.tick(&mut log, ms(16));
        assert_eq!(log, vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn dropping_the_handle_stops_invocations() {
        let mut driver: AnimationDriver<u32> = AnimationDriver::new();
        let handle = driver.start(|count, _| {
            *count += 1;
            Flow::Continue
        });

        let mut count = 0;
        driver.tick(&mut count, ms(0));
        drop(handle);
        driver.tick(&mut count, ms(16));
        driver.tick(&mut count, ms(32));
        assert_eq!(count, 1);
        assert_eq!(driver.active(), 0);
    }

    #[test]
    fn stop_flow_ends_the_loop() {
        let mut driver: AnimationDriver<u32> = AnimationDriver::new();
        let handle = driver.start(|count, _| {
            *count += 1;
            if *count == 3 {
                Flow::Stop
            } else {
                Flow::Continue
            }
        });

        let mut count = 0;
        for frame in 0..10 {
            driver.tick(&mut count, ms(frame * 16));
        }
        assert_eq!(count, 3);
        assert!(!handle.is_running());
    }

    #[test]
    fn timestamps_never_decrease() {
        let mut driver: AnimationDriver<Vec<Duration>> = AnimationDriver::new();
        let _handle = driver.start(|seen, now| {
            seen.push(now);
            Flow::Continue
        });

        let mut seen = Vec::new();
        for now in [ms(10), ms(30), ms(20), ms(40)] {
            driver.tick(&mut seen, now);
        }
        assert_eq!(seen, vec![ms(10), ms(30), ms(30), ms(40)]);
    }

    #[test]
    fn explicit_stop_is_the_same_as_drop() {
        let mut driver: AnimationDriver<u32> = AnimationDriver::new();
        let handle = driver.start(|count, _| {
            *count += 1;
            Flow::Continue
        });
        handle.stop();

        let mut count = 0;
        assert_eq!(driver.tick(&mut count, ms(0)), 0);
        assert_eq!(count, 0);
    }
}
