//! Virtual page clock. Timers only fire when the caller moves the clock.

use super::*;

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerCallback {
    CloseAlert(NodeId),
    DetachAlert(NodeId),
    RevertSubmitButton(NodeId),
    SubmitSearch(NodeId),
    RemoveNotification(NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    /// Scheduling sequence; breaks ties between timers due at the same time.
    pub order: i64,
}

/// Pending timers keyed by `(due_at, order)`, so iteration is firing order.
#[derive(Debug)]
pub(crate) struct TimerQueue {
    timers: BTreeMap<(i64, i64), (i64, TimerCallback)>,
    pub(crate) now_ms: i64,
    pub(crate) step_limit: usize,
    next_id: i64,
    next_order: i64,
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self {
            timers: BTreeMap::new(),
            now_ms: 0,
            step_limit: 10_000,
            next_id: 1,
            next_order: 0,
        }
    }
}

impl TimerQueue {
    fn insert(&mut self, callback: TimerCallback, delay_ms: i64) -> PendingTimer {
        let timer = PendingTimer {
            id: self.next_id,
            due_at: self.now_ms.saturating_add(delay_ms.max(0)),
            order: self.next_order,
        };
        self.next_id += 1;
        self.next_order += 1;
        self.timers
            .insert((timer.due_at, timer.order), (timer.id, callback));
        timer
    }

    fn cancel(&mut self, id: i64) -> bool {
        let before = self.timers.len();
        self.timers.retain(|_, (timer_id, _)| *timer_id != id);
        self.timers.len() != before
    }

    /// Earliest timer, if it is due at or before `until` (`None` means any).
    fn next_due(&self, until: Option<i64>) -> Option<PendingTimer> {
        let (&(due_at, order), &(id, _)) = self.timers.first_key_value()?;
        until
            .is_none_or(|limit| due_at <= limit)
            .then_some(PendingTimer { id, due_at, order })
    }

    fn take(&mut self, timer: &PendingTimer) -> Option<TimerCallback> {
        self.timers
            .remove(&(timer.due_at, timer.order))
            .map(|(_, callback)| callback)
    }

    fn pending(&self) -> Vec<PendingTimer> {
        self.timers
            .iter()
            .map(|(&(due_at, order), &(id, _))| PendingTimer { id, due_at, order })
            .collect()
    }

    fn clear(&mut self) -> usize {
        let cleared = self.timers.len();
        self.timers.clear();
        cleared
    }
}

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.timers.now_ms
    }

    /// Pending timers in the order they will fire.
    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.timers.pending()
    }

    pub fn clear_timer(&mut self, timer_id: i64) -> bool {
        let removed = self.timers.cancel(timer_id);
        self.trace_timer_line(format!("[timer] clear id={timer_id} removed={removed}"));
        removed
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.timers.clear();
        self.enhancer.search_timers.clear();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        self.move_clock_to(self.timers.now_ms.saturating_add(delta_ms))
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.timers.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.timers.now_ms
            )));
        }
        self.move_clock_to(target_ms)
    }

    /// Fires every pending timer, including ones scheduled along the way.
    pub fn flush(&mut self) -> Result<()> {
        let fired = self.fire_timers(None)?;
        self.trace_timer_line(format!(
            "[timer] flush now_ms={} fired={fired}",
            self.timers.now_ms
        ));
        Ok(())
    }

    /// Fires the earliest pending timer, jumping the clock to its due time.
    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(timer) = self.timers.next_due(None) else {
            return Ok(false);
        };
        self.fire(timer)?;
        Ok(true)
    }

    /// Fires the timers already due, leaving the clock where it is.
    pub fn run_due_timers(&mut self) -> Result<usize> {
        self.fire_timers(Some(self.timers.now_ms))
    }

    pub(crate) fn schedule_timeout(&mut self, callback: TimerCallback, delay_ms: i64) -> i64 {
        let timer = self.timers.insert(callback, delay_ms);
        self.trace_timer_line(format!(
            "[timer] schedule id={} due_at={} callback={callback:?}",
            timer.id, timer.due_at
        ));
        timer.id
    }

    fn move_clock_to(&mut self, target_ms: i64) -> Result<()> {
        let from = self.timers.now_ms;
        let fired = self.fire_timers(Some(target_ms))?;
        self.timers.now_ms = target_ms;
        self.trace_timer_line(format!(
            "[timer] advance from={from} to={target_ms} fired={fired}"
        ));
        Ok(())
    }

    fn fire_timers(&mut self, until: Option<i64>) -> Result<usize> {
        let mut fired = 0usize;
        while let Some(timer) = self.timers.next_due(until) {
            if fired >= self.timers.step_limit {
                return Err(Error::Runtime(format!(
                    "timer queue exceeded max task steps: limit={}, now_ms={}, pending_tasks={}, next_task=id={},due_at={}",
                    self.timers.step_limit,
                    self.timers.now_ms,
                    self.timers.timers.len(),
                    timer.id,
                    timer.due_at
                )));
            }
            self.fire(timer)?;
            fired += 1;
        }
        Ok(fired)
    }

    // The clock reads the timer's own due time while its callback runs, so
    // follow-up timers are scheduled relative to it.
    fn fire(&mut self, timer: PendingTimer) -> Result<()> {
        let Some(callback) = self.timers.take(&timer) else {
            return Ok(());
        };
        self.timers.now_ms = self.timers.now_ms.max(timer.due_at);
        self.trace_timer_line(format!(
            "[timer] run id={} due_at={} callback={callback:?}",
            timer.id, timer.due_at
        ));

        stacker::grow(PAGE_STACK_SIZE, || match callback {
            TimerCallback::CloseAlert(alert) => self.close_alert(alert),
            TimerCallback::DetachAlert(alert) => self.detach_alert(alert),
            TimerCallback::RevertSubmitButton(button) => self.revert_submit_button(button),
            TimerCallback::SubmitSearch(input) => self.submit_search(input),
            TimerCallback::RemoveNotification(toast) => self.remove_notification(toast),
        })
    }
}
