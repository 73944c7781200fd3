//! Tab group detection.
//!
//! hy3 does not report tab groups. Tabbed windows are stacked on one
//! region, so they share position and size exactly; that coincidence is
//! taken as group membership. Two unrelated windows with identical
//! geometry would be grouped as well, which is accepted.

use crate::types::layout::{SavedWindow, Slot};


/// Find windows with identical `(x, y, w, h)` and tag each member of a
/// multi-window bucket with its group index. Returns the groups as index
/// lists into `windows`, in first-seen order.
pub fn detect_tab_groups(windows: &mut [SavedWindow]) -> Vec<Vec<usize>> {
    let mut buckets: Vec<([i32; 4], Vec<usize>)> = Vec::new();
    for (i, w) in windows.iter().enumerate() {
        let key = [w.at[0], w.at[1], w.size[0], w.size[1]];
        if let Some(entry) = buckets.iter_mut().find(|(k, _)| *k == key) {
            entry.1.push(i);
        } else {
            buckets.push((key, vec![i]));
        }
    }

    let groups: Vec<Vec<usize>> = buckets
        .into_iter()
        .map(|(_, members)| members)
        .filter(|members| members.len() >= 2)
        .collect();
    for (tag, members) in groups.iter().enumerate() {
        for &i in members {
            windows[i].tab_group = Some(tag);
        }
    }
    groups
}


/// Collapse tagged windows into one tab slot per group, placed where the
/// group's first member appears. Untagged windows become single slots.
pub fn collapse_slots(windows: &[SavedWindow]) -> Vec<Slot> {
    let mut slots: Vec<Slot> = Vec::new();
    let mut seen: Vec<usize> = Vec::new();
    for w in windows {
        match w.tab_group {
            Some(tag) => {
                if seen.contains(&tag) {
                    continue;
                }
                seen.push(tag);
                let peers: Vec<&SavedWindow> =
                    windows.iter().filter(|p| p.tab_group == Some(tag)).collect();
                slots.push(Slot {
                    classes: peers.iter().map(|p| p.class.clone()).collect(),
                    is_tab: true,
                    at: w.at,
                    size: w.size,
                    commands: peers.iter().filter_map(|p| p.cmd.clone()).collect(),
                });
            }
            None => slots.push(Slot {
                classes: vec![w.class.clone()],
                is_tab: false,
                at: w.at,
                size: w.size,
                commands: w.cmd.iter().cloned().collect(),
            }),
        }
    }
    slots
}
