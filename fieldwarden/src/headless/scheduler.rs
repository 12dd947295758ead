use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::surface::{Scheduler, TimerControl, TimerHandle};
use crate::widget::Subscription;

/// Shortest interval a timer may repeat at, so a zero interval cannot spin.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

type Tick = Box<dyn FnMut() -> TimerControl>;

struct Timer {
    id: u64,
    interval: Duration,
    due: Duration,
    /// Taken out while the tick runs.
    tick: Option<Tick>,
}

#[derive(Default)]
struct Timers {
    next_id: u64,
    timers: Vec<Timer>,
}

/// A scheduler whose clock only moves when [`advance`](Self::advance) is
/// called.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    timers: Rc<RefCell<Timers>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn active_timers(&self) -> usize {
        self.timers.borrow().timers.len()
    }

    /// Move the clock forward, firing every tick that falls due, in order.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        while let Some((id, due, mut tick)) = self.take_next_due(target) {
            self.now.set(due);
            let control = tick();

            let mut timers = self.timers.borrow_mut();
            let position = timers.timers.iter().position(|timer| timer.id == id);
            match (position, control) {
                (Some(position), TimerControl::Continue) => {
                    let timer = &mut timers.timers[position];
                    timer.due += timer.interval;
                    timer.tick = Some(tick);
                }
                (Some(position), TimerControl::Stop) => {
                    timers.timers.remove(position);
                }
                // Cancelled while ticking.
                (None, _) => {}
            }
        }
        self.now.set(target);
    }

    fn take_next_due(&self, limit: Duration) -> Option<(u64, Duration, Tick)> {
        let mut timers = self.timers.borrow_mut();
        let timer = timers
            .timers
            .iter_mut()
            .filter(|timer| timer.tick.is_some() && timer.due <= limit)
            .min_by_key(|timer| (timer.due, timer.id))?;
        let tick = timer.tick.take()?;
        Some((timer.id, timer.due, tick))
    }
}

impl Scheduler for ManualScheduler {
    fn repeat(&self, interval: Duration, tick: Box<dyn FnMut() -> TimerControl>) -> TimerHandle {
        let interval = interval.max(MIN_INTERVAL);
        let id = {
            let mut timers = self.timers.borrow_mut();
            timers.next_id += 1;
            let id = timers.next_id;
            timers.timers.push(Timer {
                id,
                interval,
                due: self.now.get() + interval,
                tick: Some(tick),
            });
            id
        };

        let timers: Weak<RefCell<Timers>> = Rc::downgrade(&self.timers);
        Subscription::new(move || {
            if let Some(timers) = timers.upgrade() {
                let removed: Vec<Timer> = {
                    let mut timers = timers.borrow_mut();
                    let (removed, kept) = std::mem::take(&mut timers.timers)
                        .into_iter()
                        .partition(|timer| timer.id == id);
                    timers.timers = kept;
                    removed
                };
                drop(removed);
            }
        })
    }
}
