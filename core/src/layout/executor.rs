//! Plan executors.
//!
//! The window manager never acknowledges that a command has taken effect,
//! so the live executor waits a fixed settle delay after every dispatch and
//! an extra delay at each [`Step::Pause`]. A failed dispatch is logged and
//! the rest of the plan still runs.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Result;
use crate::layout::planner::{Plan, Step};
use crate::types::config::Settings;
use crate::wm::{Dispatch, WmClient};


pub trait Executor {
    fn execute(&mut self, plan: &Plan) -> Result<()>;
}


/// Replays plans against a window manager.
pub struct WmExecutor<'a, C: WmClient + ?Sized> {
    client: &'a mut C,
    settle: Duration,
    arrive: Duration,
}


impl<'a, C: WmClient + ?Sized> WmExecutor<'a, C> {
    pub fn new(client: &'a mut C, settings: &Settings) -> Self {
        WmExecutor {
            client,
            settle: settings.settle_delay(),
            arrive: settings.arrive_delay(),
        }
    }

    fn wait(duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}


impl<C: WmClient + ?Sized> Executor for WmExecutor<'_, C> {
    fn execute(&mut self, plan: &Plan) -> Result<()> {
        let mut failed = 0usize;
        for step in plan.steps() {
            match step {
                Step::Dispatch(cmd) => {
                    debug!(%cmd, "dispatch");
                    if let Err(e) = self.client.dispatch(cmd) {
                        warn!(%cmd, error = %e, "dispatch failed, continuing");
                        failed += 1;
                    }
                    Self::wait(self.settle);
                }
                Step::Pause => Self::wait(self.arrive),
            }
        }
        if failed > 0 {
            warn!(failed, "some window commands did not apply");
        }
        Ok(())
    }
}


/// Records what would be dispatched without touching the window manager.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    steps: Vec<Step>,
}


impl DryRunExecutor {
    pub fn new() -> Self {
        DryRunExecutor::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn dispatches(&self) -> Vec<Dispatch> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                Step::Dispatch(d) => Some(d.clone()),
                Step::Pause => None,
            })
            .collect()
    }
}


impl Executor for DryRunExecutor {
    fn execute(&mut self, plan: &Plan) -> Result<()> {
        self.steps.extend(plan.steps().iter().cloned());
        Ok(())
    }
}
