//! Local selection state for the availability calendar.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::AvailabilitySlot;

/// Calendar days picked for a pending create, plus the shift-click anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSelection {
    dates: Vec<NaiveDate>,
    last_clicked: Option<NaiveDate>,
}

impl DateSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn last_clicked(&self) -> Option<NaiveDate> {
        self.last_clicked
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.dates.contains(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Replace the whole selection. `None` deselects everything.
    ///
    /// The caller owns deduplication; the calendar widget never hands over the
    /// same day twice.
    pub fn select(&mut self, dates: Option<Vec<NaiveDate>>) {
        self.dates = dates.unwrap_or_default();
    }

    /// Apply a click on `day`.
    ///
    /// With the range modifier held and an anchor present, every day between the
    /// anchor and `day` is added. A plain click toggles `day`. Disabled days are
    /// ignored and leave the anchor alone.
    pub fn click_day(&mut self, day: NaiveDate, range_modifier: bool, disabled: bool) {
        if disabled {
            return;
        }

        match (self.last_clicked, range_modifier) {
            (Some(anchor), true) => self.extend_range(anchor, day),
            _ => self.toggle(day),
        }

        self.last_clicked = Some(day);
    }

    /// Drop the selection and the anchor.
    pub fn clear(&mut self) {
        self.dates.clear();
        self.last_clicked = None;
    }

    fn toggle(&mut self, day: NaiveDate) {
        if let Some(pos) = self.dates.iter().position(|d| *d == day) {
            self.dates.remove(pos);
        } else {
            self.dates.push(day);
        }
    }

    fn extend_range(&mut self, anchor: NaiveDate, day: NaiveDate) {
        let (start, end) = if anchor <= day {
            (anchor, day)
        } else {
            (day, anchor)
        };

        for date in start.iter_days().take_while(|d| *d <= end) {
            if !self.contains(date) {
                self.dates.push(date);
            }
        }
    }
}

/// Ids of persisted slots picked for a bulk delete.
///
/// Only ever holds ids of slots that are currently loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSelection {
    ids: BTreeSet<String>,
}

impl SlotSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Flip membership of `id`; unknown ids are ignored.
    pub fn toggle(&mut self, id: &str, loaded: &[AvailabilitySlot]) {
        if self.ids.remove(id) {
            return;
        }
        if loaded.iter().any(|s| s.id == id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Select every loaded slot, or clear when all of them already are.
    pub fn toggle_all(&mut self, loaded: &[AvailabilitySlot]) {
        let all_selected = loaded.iter().all(|s| self.ids.contains(&s.id));
        if all_selected {
            self.ids.clear();
        } else {
            self.ids = loaded.iter().map(|s| s.id.clone()).collect();
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Forget ids that are no longer part of the loaded slots.
    pub fn retain_loaded(&mut self, loaded: &[AvailabilitySlot]) {
        self.ids.retain(|id| loaded.iter().any(|s| &s.id == id));
    }
}
