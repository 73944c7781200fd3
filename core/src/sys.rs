use tracing::{info, warn};

use crate::command::Command;
use crate::error::{Error, Result};
use crate::layout::capture::capture_layout;
use crate::layout::executor::{DryRunExecutor, Executor, WmExecutor};
use crate::layout::planner::{plan_focus_restore, Plan, Step};
use crate::layout::restore::{plan_workspace, Outcome, RestoreOptions};
use crate::layout::snapshot::saved_rows;
use crate::layout::store::LayoutStore;
use crate::layout::targeting::{self, Target};
use crate::notify::{Notifier, NotifySend, Silent};
use crate::response::Response;
use crate::types::config::Settings;
use crate::types::layout::{SavedLayout, Slot};
use crate::types::window::WorkspaceId;
use crate::wm::{Dispatch, WmClient};


/// Central runtime for relayout. Owns the window-manager client and the
/// layout store, and dispatches commands.
pub struct Sys<C: WmClient> {
    client: C,
    settings: Settings,
    store: LayoutStore,
    notifier: Box<dyn Notifier>,
    actions: Vec<Dispatch>,
}


impl<C: WmClient> Sys<C> {
    pub fn new(client: C, settings: Settings) -> Sys<C> {
        let store = LayoutStore::new(settings.layout_path.clone());
        let notifier: Box<dyn Notifier> = if settings.notify {
            Box::new(NotifySend::default())
        } else {
            Box::new(Silent)
        };
        Sys {
            client,
            settings,
            store,
            notifier,
            actions: Vec::new(),
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Sys<C> {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// The single dispatch method.
    pub fn execute(&mut self, cmd: Command) -> Response {
        self.actions.clear();
        let result = match cmd {
            Command::Save { dry_run } => self.cmd_save(dry_run),
            Command::Restore {
                workspace,
                top,
                all,
                dry_run,
            } => self.cmd_restore(workspace, top, all, dry_run),
            Command::Show => self.cmd_show(),
            Command::Help { topic } => Ok(self.cmd_help(topic)),
        };
        result.unwrap_or_else(|e| {
            warn!(error = %e, "command failed");
            Response::error(e.to_string())
        })
    }

    /// Window commands planned during the last execute() call, whether or
    /// not they were run.
    pub fn pending_actions(&self) -> &[Dispatch] {
        &self.actions
    }

    /// Take and clear accumulated actions.
    pub fn drain_actions(&mut self) -> Vec<Dispatch> {
        std::mem::take(&mut self.actions)
    }

    // -----------------------------------------------------------------------
    // Save
    // -----------------------------------------------------------------------

    fn cmd_save(&mut self, dry_run: bool) -> Result<Response> {
        let previous = self.store.load();
        let capture = capture_layout(&self.client, &self.settings, previous.as_ref())?;
        let layout = capture.layout;
        if layout.workspaces.is_empty() {
            return Ok(Response::noop("No tiled windows to save."));
        }
        let summary = format!(
            "{} windows across {} workspace(s)",
            layout.window_count(),
            layout.workspaces.len()
        );
        if dry_run {
            return Ok(Response::ok(serde_json::to_string_pretty(&layout)?));
        }

        self.store.save(&layout)?;
        info!(path = %self.store.path().display(), changed = capture.changed, "layout saved");
        self.notifier.notify("Layout saved", Some(&summary));
        let status = if capture.changed { "Saved" } else { "Saved (unchanged)" };
        Ok(Response::ok(format!(
            "{} {} to {}",
            status,
            summary,
            self.store.path().display()
        )))
    }

    // -----------------------------------------------------------------------
    // Restore
    // -----------------------------------------------------------------------

    fn cmd_restore(
        &mut self,
        workspace: Option<WorkspaceId>,
        top: Option<usize>,
        all: bool,
        dry_run: bool,
    ) -> Result<Response> {
        let monitors = self.client.monitors()?;
        let live = self.client.clients()?;
        let saved = self.store.load();
        let scratch = self.settings.scratch_workspace;

        let target = Target::from_options(workspace, all);
        let ids = targeting::resolve(target, &monitors, &live, saved.as_ref(), scratch)?;
        let opts = RestoreOptions::from_settings(&self.settings, top);

        let mut plan = Plan::new();
        let mut lines = Vec::new();
        let mut rebuilt = 0usize;
        for id in ids {
            let saved_ws = saved.as_ref().and_then(|l| l.usable_workspace(id));
            let outcome = plan_workspace(&live, id, saved_ws, &opts);
            lines.push(outcome.summary());
            if let Outcome::Rebuilt { plan: p, .. } = outcome {
                plan.append(p);
                rebuilt += 1;
            }
        }

        if rebuilt == 0 {
            if lines.is_empty() {
                lines.push("No workspaces to rearrange.".to_string());
            }
            let body = lines.join("\n");
            if !dry_run {
                self.notifier.notify("Nothing to rearrange", Some(&body));
            }
            return Ok(Response::noop(body));
        }

        if all {
            if let Some(layout) = &saved {
                plan.append(plan_focus_restore(&layout.active_workspaces, &monitors));
            }
        }
        self.actions = plan.dispatches().cloned().collect();

        if dry_run {
            let mut dry = DryRunExecutor::new();
            dry.execute(&plan)?;
            lines.push(String::new());
            lines.extend(render_steps(dry.steps()));
            return Ok(Response::ok(lines.join("\n")));
        }

        WmExecutor::new(&mut self.client, &self.settings).execute(&plan)?;
        let body = lines.join("\n");
        self.notifier.notify("Layout restored", Some(&body));
        Ok(Response::ok(body))
    }

    // -----------------------------------------------------------------------
    // Show
    // -----------------------------------------------------------------------

    fn cmd_show(&self) -> Result<Response> {
        let layout = self
            .store
            .load()
            .ok_or_else(|| Error::NoSavedLayout(self.store.path().to_path_buf()))?;
        Ok(Response::ok(describe_layout(&layout, self.settings.y_threshold)))
    }

    // -----------------------------------------------------------------------
    // Help
    // -----------------------------------------------------------------------

    fn cmd_help(&self, topic: Option<String>) -> Response {
        Response::ok(crate::help::help_text(topic.as_deref()))
    }
}


fn render_steps(steps: &[Step]) -> Vec<String> {
    steps
        .iter()
        .map(|s| match s {
            Step::Dispatch(d) => format!("  {}", d),
            Step::Pause => "  pause".to_string(),
        })
        .collect()
}


/// Human summary of a saved layout: rows of slots per workspace and the
/// launch commands recorded for them.
pub fn describe_layout(layout: &SavedLayout, y_threshold: i32) -> String {
    let mut out = vec![format!(
        "Saved layout: {} windows across {} workspace(s)",
        layout.window_count(),
        layout.workspaces.len()
    )];
    for (id, ws) in &layout.workspaces {
        out.push(String::new());
        out.push(format!("Workspace {} ({}):", id, ws.monitor));
        let rows = saved_rows(ws, y_threshold);
        for row in &rows {
            let cells: Vec<String> = row.iter().map(slot_label).collect();
            out.push(format!("  {}", cells.join(" | ")));
        }
        for cmd in rows.iter().flatten().flat_map(|s| s.commands.iter()) {
            out.push(format!("  launch: {} &", cmd));
        }
    }
    if !layout.active_workspaces.is_empty() {
        out.push(String::new());
        let active: Vec<String> = layout
            .active_workspaces
            .iter()
            .map(|(m, ws)| format!("{} -> {}", m, ws))
            .collect();
        out.push(format!("Active: {}", active.join(", ")));
    }
    out.join("\n")
}


fn slot_label(slot: &Slot) -> String {
    if slot.is_tab {
        format!("[{}]", slot.classes.join(", "))
    } else {
        slot.classes.join(", ")
    }
}
