//! Row clustering — group positioned items into top-to-bottom rows.
//!
//! A single linear pass over items sorted by Y. Each item is compared
//! against the *first* member of the current row, so a row is anchored at
//! its topmost member rather than at a running centroid.

use crate::types::layout::{SavedWindow, Slot};
use crate::types::window::WindowRecord;


/// Anything with a top-left corner.
pub trait Positioned {
    fn x(&self) -> i32;
    fn y(&self) -> i32;
}

impl Positioned for WindowRecord {
    fn x(&self) -> i32 {
        self.at[0]
    }
    fn y(&self) -> i32 {
        self.at[1]
    }
}

impl Positioned for SavedWindow {
    fn x(&self) -> i32 {
        self.at[0]
    }
    fn y(&self) -> i32 {
        self.at[1]
    }
}

impl Positioned for Slot {
    fn x(&self) -> i32 {
        self.at[0]
    }
    fn y(&self) -> i32 {
        self.at[1]
    }
}


/// Cluster items into rows, top to bottom, each row left to right.
///
/// Both sorts are stable: items at identical coordinates keep their input
/// order.
pub fn cluster_rows<T: Positioned>(mut items: Vec<T>, y_threshold: i32) -> Vec<Vec<T>> {
    items.sort_by_key(|item| item.y());

    let mut rows: Vec<Vec<T>> = Vec::new();
    for item in items {
        let starts_row = rows
            .last()
            .map_or(true, |row| (item.y() - row[0].y()).abs() >= y_threshold);
        match rows.last_mut() {
            Some(row) if !starts_row => row.push(item),
            _ => rows.push(vec![item]),
        }
    }

    for row in &mut rows {
        row.sort_by_key(|item| item.x());
    }
    rows
}


/// Items flattened in row-major reading order.
pub fn reading_order<T: Positioned>(items: Vec<T>, y_threshold: i32) -> Vec<T> {
    cluster_rows(items, y_threshold).into_iter().flatten().collect()
}
