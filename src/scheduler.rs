use std::time::Duration;

/// Identifies one periodic schedule. Handles are never reused.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerHandle(u64);

/// What a firing timer asks the controller to do.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TimerEvent {
    Render,
    FoodRefresh,
}

#[derive(Debug, Clone)]
struct PeriodicTimer {
    handle: TimerHandle,
    event: TimerEvent,
    period: Duration,
    next_due: Duration,
}

/// Single-threaded periodic timers over a virtual clock.
///
/// The clock only moves when the owner drains due timers, so the same
/// sequence of `pop_due` calls always fires the same events in the same order.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    timers: Vec<PeriodicTimer>,
    next_id: u64,
    now: Duration,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `event` every `period`, first firing one period from now.
    pub fn schedule_periodic(&mut self, event: TimerEvent, period: Duration) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        self.timers.push(PeriodicTimer {
            handle,
            event,
            period,
            next_due: self.now + period,
        });

        handle
    }

    /// Removes a schedule. Returns false when the handle was not live.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        self.timers.len() != before
    }

    #[must_use]
    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Fires the earliest live timer due at or before `until`.
    ///
    /// The clock jumps to that timer's due time and the timer is rescheduled
    /// one period later. Timers due at the same instant fire in the order they
    /// were scheduled.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, TimerEvent)> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|timer| timer.next_due <= until)
            .min_by_key(|timer| (timer.next_due, timer.handle))?;

        self.now = self.now.max(timer.next_due);
        timer.next_due += timer.period;

        Some((timer.handle, timer.event))
    }

    /// Moves the clock to `until` once nothing more is due.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Scheduler, TimerEvent};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn periodic_timer_fires_once_per_period() {
        let mut scheduler = Scheduler::new();
        let render = scheduler.schedule_periodic(TimerEvent::Render, ms(400));

        assert_eq!(scheduler.pop_due(ms(399)), None);

        let mut fired = Vec::new();
        while let Some(fire) = scheduler.pop_due(ms(1200)) {
            fired.push(fire);
        }

        assert_eq!(fired, vec![(render, TimerEvent::Render); 3]);
        assert_eq!(scheduler.now(), ms(1200));
    }

    #[test]
    fn simultaneous_timers_fire_in_scheduling_order() {
        let mut scheduler = Scheduler::new();
        let refresh = scheduler.schedule_periodic(TimerEvent::FoodRefresh, ms(800));
        let render = scheduler.schedule_periodic(TimerEvent::Render, ms(400));

        let mut fired = Vec::new();
        while let Some((handle, _)) = scheduler.pop_due(ms(800)) {
            fired.push(handle);
        }

        assert_eq!(fired, vec![render, refresh, render]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut scheduler = Scheduler::new();
        let render = scheduler.schedule_periodic(TimerEvent::Render, ms(400));

        assert!(scheduler.cancel(render));
        assert!(!scheduler.cancel(render));
        assert!(!scheduler.is_active(render));
        assert_eq!(scheduler.pop_due(ms(10_000)), None);
    }

    #[test]
    fn rescheduling_after_settle_counts_from_the_new_time() {
        let mut scheduler = Scheduler::new();
        scheduler.settle(ms(1000));
        let render = scheduler.schedule_periodic(TimerEvent::Render, ms(400));

        assert_eq!(scheduler.pop_due(ms(1399)), None);
        assert_eq!(scheduler.pop_due(ms(1400)), Some((render, TimerEvent::Render)));
        assert_eq!(scheduler.active_count(), 1);
    }
}
