//! Slot matcher — re-associate live windows with saved slots by class.
//!
//! Addresses do not survive a window-manager restart, so the window class
//! is the only identity available. Matching is greedy: each saved class
//! takes the first remaining live window of that class in pool order.
//! With duplicate classes, which window lands in which slot depends only
//! on that order.

use tracing::debug;

use crate::types::layout::{MatchedSlot, Row};
use crate::types::window::WindowRecord;


/// Match saved rows against a pool of live windows.
///
/// Every saved slot is filled before leftovers are considered. Live windows
/// that match no slot are appended to the last row as plain slots. Slots
/// and rows that end up empty are dropped.
pub fn match_slots(saved: &[Row], pool: &[WindowRecord]) -> Vec<Vec<MatchedSlot>> {
    let mut remaining: Vec<&WindowRecord> = pool.iter().collect();
    let mut matched: Vec<Vec<MatchedSlot>> = Vec::new();

    for row in saved {
        let mut out = Vec::new();
        for slot in row {
            let mut addresses = Vec::new();
            for class in &slot.classes {
                if let Some(i) = remaining.iter().position(|w| &w.class == class) {
                    addresses.push(remaining.remove(i).address.clone());
                } else {
                    debug!(class = %class, "saved window has no live match");
                }
            }
            if !addresses.is_empty() {
                out.push(MatchedSlot {
                    addresses,
                    size: Some(slot.size),
                    is_tab: slot.is_tab,
                });
            }
        }
        if !out.is_empty() {
            matched.push(out);
        }
    }

    if !remaining.is_empty() {
        debug!(count = remaining.len(), "unmatched live windows appended to last row");
        if matched.is_empty() {
            matched.push(Vec::new());
        }
        if let Some(last) = matched.last_mut() {
            last.extend(remaining.iter().map(|w| MatchedSlot::window(w.address.clone())));
        }
    }

    matched
}


/// Total number of windows placed across all matched rows.
pub fn window_count(rows: &[Vec<MatchedSlot>]) -> usize {
    rows.iter().flatten().map(|s| s.addresses.len()).sum()
}
