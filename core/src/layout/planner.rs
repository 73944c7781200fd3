//! Tree rebuild planner — turn matched rows into an ordered command log.
//!
//! hy3 has no way to set a tree directly. A tree is grown by moving the
//! focus cursor, wrapping the focused node in a new group, and moving
//! windows onto the workspace, where each lands as the next sibling of
//! the focused node. The planner emits that sequence into a [`Plan`]
//! without touching the window manager; an executor replays it.
//!
//! Order of a rebuild:
//!
//! 1. every window is moved silently to the scratch workspace;
//! 2. the target workspace is shown;
//! 3. row representatives are chained in a vertical group, then each row
//!    is widened with a horizontal group (a single row skips the vertical
//!    group);
//! 4. tab groups are filled last, so no spatial wrap ever targets a tab
//!    container;
//! 5. saved sizes are applied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::layout::MatchedSlot;
use crate::types::window::{Monitor, WorkspaceId};
use crate::wm::{Dispatch, GroupDirection};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Dispatch(Dispatch),
    /// Extra settle time on top of the per-dispatch delay.
    Pause,
}


/// Ordered command log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    steps: Vec<Step>,
}


impl Plan {
    pub fn new() -> Self {
        Plan::default()
    }

    pub fn push(&mut self, cmd: Dispatch) {
        self.steps.push(Step::Dispatch(cmd));
    }

    pub fn pause(&mut self) {
        self.steps.push(Step::Pause);
    }

    pub fn append(&mut self, other: Plan) {
        self.steps.extend(other.steps);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn dispatches(&self) -> impl Iterator<Item = &Dispatch> {
        self.steps.iter().filter_map(|s| match s {
            Step::Dispatch(d) => Some(d),
            Step::Pause => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}


/// The planner's model of hy3's focus: which window is focused and which
/// kind of group the next insertion lands in, when known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    focused: Option<String>,
    group: Option<GroupDirection>,
}


impl Cursor {
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn group(&self) -> Option<GroupDirection> {
        self.group
    }

    /// Focusing a window forgets the group: its parent is not tracked.
    pub fn focus(self, plan: &mut Plan, address: &str) -> Cursor {
        plan.push(Dispatch::Focus {
            address: address.to_string(),
        });
        Cursor {
            focused: Some(address.to_string()),
            group: None,
        }
    }

    pub fn wrap(self, plan: &mut Plan, direction: GroupDirection) -> Cursor {
        plan.push(Dispatch::WrapGroup { direction });
        Cursor {
            group: Some(direction),
            ..self
        }
    }

    /// A visible insert follows the window; a silent one leaves the cursor.
    pub fn insert(self, plan: &mut Plan, address: &str, workspace: WorkspaceId, silent: bool) -> Cursor {
        trace!(address, workspace, silent, after = ?self.focused, group = ?self.group, "insert");
        plan.push(Dispatch::InsertWindow {
            address: address.to_string(),
            workspace,
            silent,
        });
        if silent {
            self
        } else {
            Cursor {
                focused: Some(address.to_string()),
                ..self
            }
        }
    }
}


/// Plan the full rebuild of `workspace` from `rows`.
///
/// Fewer than two rows builds a single horizontal row. Slots with a saved
/// size are resized at the end. Slots without addresses and rows left empty
/// are skipped.
pub fn plan_rebuild(workspace: WorkspaceId, scratch: WorkspaceId, rows: &[Vec<MatchedSlot>]) -> (Plan, Cursor) {
    let kept: Vec<Vec<MatchedSlot>> = rows
        .iter()
        .map(|r| r.iter().filter(|s| !s.addresses.is_empty()).cloned().collect::<Vec<_>>())
        .filter(|r| !r.is_empty())
        .collect();
    let rows: Vec<&[MatchedSlot]> = kept.iter().map(|r| r.as_slice()).collect();
    let mut plan = Plan::new();
    let mut cursor = Cursor::default();

    for slot in rows.iter().flat_map(|r| r.iter()) {
        for address in &slot.addresses {
            cursor = cursor.insert(&mut plan, address, scratch, true);
        }
    }

    plan.push(Dispatch::SwitchWorkspace { id: workspace });
    plan.pause();

    cursor = match rows.len() {
        0 => cursor,
        1 => single_row(&mut plan, cursor, workspace, rows[0]),
        _ => stacked_rows(&mut plan, cursor, workspace, &rows),
    };

    for slot in rows.iter().flat_map(|r| r.iter()) {
        if slot.is_tab && slot.addresses.len() >= 2 {
            cursor = fill_tab_group(&mut plan, cursor, workspace, slot);
        }
    }

    let sized: Vec<(&str, [i32; 2])> = rows
        .iter()
        .flat_map(|r| r.iter())
        .filter_map(|s| s.size.map(|size| (s.representative(), size)))
        .collect();
    if !sized.is_empty() {
        plan.pause();
        for (address, [w, h]) in sized {
            plan.push(Dispatch::Resize {
                address: address.to_string(),
                w,
                h,
            });
        }
    }

    (plan, cursor)
}


fn single_row(plan: &mut Plan, cursor: Cursor, workspace: WorkspaceId, row: &[MatchedSlot]) -> Cursor {
    let first = row[0].representative();
    let cursor = cursor.insert(plan, first, workspace, false);
    widen_row(plan, cursor, workspace, row)
}


fn stacked_rows(plan: &mut Plan, cursor: Cursor, workspace: WorkspaceId, rows: &[&[MatchedSlot]]) -> Cursor {
    let reps: Vec<&str> = rows.iter().map(|r| r[0].representative()).collect();

    let mut cursor = cursor.insert(plan, reps[0], workspace, false);
    cursor = cursor.focus(plan, reps[0]);
    cursor = cursor.wrap(plan, GroupDirection::Vertical);
    cursor = cursor.insert(plan, reps[1], workspace, false);
    for pair in reps.windows(2).skip(1) {
        cursor = cursor.focus(plan, pair[0]);
        cursor = cursor.insert(plan, pair[1], workspace, false);
    }

    for row in rows {
        cursor = widen_row(plan, cursor, workspace, row);
    }
    cursor
}


/// Focus the row's first representative and, if the row has more slots,
/// wrap it horizontally and bring in the rest.
fn widen_row(plan: &mut Plan, cursor: Cursor, workspace: WorkspaceId, row: &[MatchedSlot]) -> Cursor {
    let mut cursor = cursor.focus(plan, row[0].representative());
    if row.len() > 1 {
        cursor = cursor.wrap(plan, GroupDirection::Horizontal);
        for slot in &row[1..] {
            cursor = cursor.insert(plan, slot.representative(), workspace, false);
        }
    }
    cursor
}


fn fill_tab_group(plan: &mut Plan, cursor: Cursor, workspace: WorkspaceId, slot: &MatchedSlot) -> Cursor {
    let mut cursor = cursor.focus(plan, slot.representative());
    cursor = cursor.wrap(plan, GroupDirection::Tab);
    for address in &slot.addresses[1..] {
        cursor = cursor.insert(plan, address, workspace, false);
    }
    cursor
}


/// How many windows go in the top row when no saved layout applies.
///
/// Up to three windows share one row; more are split `ceil(n/2)` on top.
/// An explicit count is clamped to `[1, n-1]`.
pub fn top_count(n: usize, forced: Option<usize>) -> usize {
    match forced {
        Some(_) if n < 2 => n,
        Some(top) => top.clamp(1, n - 1),
        None if n <= 3 => n,
        None => n.div_ceil(2),
    }
}


/// Heuristic rows over windows in enumeration order.
pub fn split_rows(addresses: &[String], forced_top: Option<usize>) -> Vec<Vec<MatchedSlot>> {
    let top = top_count(addresses.len(), forced_top);
    let (upper, lower) = addresses.split_at(top);
    [upper, lower]
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.iter().map(|a| MatchedSlot::window(a.clone())).collect())
        .collect()
}


/// Show each monitor's saved workspace again, then return focus to the
/// monitor that had it. Monitors that are no longer connected are skipped.
pub fn plan_focus_restore(active: &BTreeMap<String, WorkspaceId>, monitors: &[Monitor]) -> Plan {
    let mut plan = Plan::new();
    for (name, ws) in active {
        if !monitors.iter().any(|m| &m.name == name) {
            continue;
        }
        plan.push(Dispatch::FocusMonitor { name: name.clone() });
        plan.push(Dispatch::SwitchWorkspace { id: *ws });
    }
    if plan.is_empty() {
        return plan;
    }
    if let Some(original) = monitors.iter().find(|m| m.focused) {
        plan.push(Dispatch::FocusMonitor {
            name: original.name.clone(),
        });
    }
    plan
}
