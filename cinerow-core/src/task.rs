//! Single-slot owned tasks.
//!
//! A [`TaskSlot`] holds at most one spawned task for one purpose: a
//! debounce or dwell timer, a periodic refresh, or an in-flight lookup
//! started with [`TaskSlot::start`]. Putting a new task in the slot aborts
//! whatever it held before, so two tasks of the same purpose are never
//! live on one controller.

use parking_lot::Mutex;
use std::{future::Future, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

#[derive(Debug, Default)]
pub struct TaskSlot {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once after `delay`, replacing whatever the slot holds.
    pub fn arm<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.replace(tokio::spawn(async move {
            time::sleep(delay).await;
            task.await;
        }));
    }

    /// Run `tick` immediately and then every `period`, replacing any
    /// pending timer. A tick that overruns the period delays the next one
    /// instead of bunching them up.
    pub fn arm_every<F, Fut>(&self, period: Duration, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let period = period.max(Duration::from_millis(1));
        self.replace(tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick().await;
            }
        }));
    }

    /// Run `task` right away in the slot, so a later arm or cancel aborts it.
    pub fn start<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.replace(tokio::spawn(task));
    }

    /// Abort the held task. Returns whether one was still running.
    pub fn cancel(&self) -> bool {
        match self.handle.lock().take() {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn replace(&self, handle: JoinHandle<()>) {
        if let Some(previous) = self.handle.lock().replace(handle) {
            previous.abort();
        }
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.get_mut().take() {
            handle.abort();
        }
    }
}
