//! Desktop notifications.

use std::cell::RefCell;
use std::process::{Command, Stdio};
use std::rc::Rc;

use tracing::debug;


pub trait Notifier {
    /// Fire and forget; delivery failures are only logged.
    fn notify(&self, summary: &str, body: Option<&str>);
}


impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, summary: &str, body: Option<&str>) {
        (**self).notify(summary, body)
    }
}


/// Sends notifications through `notify-send`.
#[derive(Debug, Clone)]
pub struct NotifySend {
    program: String,
    icon: String,
}


impl Default for NotifySend {
    fn default() -> Self {
        NotifySend {
            program: "notify-send".into(),
            icon: "dialog-information".into(),
        }
    }
}


impl NotifySend {
    pub fn args(&self, summary: &str, body: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "-a".to_string(),
            "relayout".to_string(),
            "-i".to_string(),
            self.icon.clone(),
            summary.to_string(),
        ];
        if let Some(body) = body.filter(|b| !b.is_empty()) {
            args.push(body.to_string());
        }
        args
    }
}


impl Notifier for NotifySend {
    fn notify(&self, summary: &str, body: Option<&str>) {
        let spawned = Command::new(&self.program)
            .args(self.args(summary, body))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = spawned {
            debug!(program = %self.program, error = %e, "notification not sent");
        }
    }
}


/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;


impl Notifier for Silent {
    fn notify(&self, _summary: &str, _body: Option<&str>) {}
}


/// Keeps notifications in memory.
#[derive(Debug, Default)]
pub struct Recorded {
    sent: RefCell<Vec<String>>,
}


impl Recorded {
    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}


impl Notifier for Recorded {
    fn notify(&self, summary: &str, body: Option<&str>) {
        let line = match body {
            Some(body) => format!("{}: {}", summary, body),
            None => summary.to_string(),
        };
        self.sent.borrow_mut().push(line);
    }
}
