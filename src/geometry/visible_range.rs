//! Visible day range calculation result

use crate::model::DayIndex;

/// Day columns intersecting the viewport.
///
/// Unlike most ranges in the crate this one is inclusive at both ends:
/// `last` is the column that the right edge of the viewport falls into (or
/// touches), and `current_date` is derived from it.
///
/// # Invariants
/// - `first <= last`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleDayRange {
    /// First visible day (inclusive). May be negative.
    pub first: DayIndex,
    /// Last visible day (inclusive).
    pub last: DayIndex,
}

impl VisibleDayRange {
    /// Create new visible range.
    ///
    /// # Panics
    /// In debug builds, panics if first > last.
    pub fn new(first: DayIndex, last: DayIndex) -> Self {
        debug_assert!(first <= last, "VisibleDayRange: {first:?} > {last:?}");
        Self { first, last }
    }

    /// Number of days in the range.
    pub fn len(&self) -> usize {
        usize::try_from(self.last.get().saturating_sub(self.first.get()))
            .map(|span| span.saturating_add(1))
            .unwrap_or(0)
    }

    /// An inclusive range always holds at least one day when well-formed.
    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }

    /// Visible day indices in drawing order (left to right).
    pub fn indices(&self) -> Vec<DayIndex> {
        (self.first.get()..=self.last.get())
            .map(DayIndex::new)
            .collect()
    }

    /// Check if a specific day is visible.
    pub fn contains(&self, day: DayIndex) -> bool {
        self.first <= day && day <= self.last
    }
}
