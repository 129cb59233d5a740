//! Raw log events.

use super::Activity;

/// A single event of a process instance (case).
///
/// Events are produced by an external event-log mapper and never mutated or
/// deduplicated by the engine: two events that agree in every field are still
/// two events. The timestamp type `T` is generic so logs can carry epoch
/// millis, dates, or any other totally ordered representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<T> {
    /// The activity performed by this event.
    pub activity: Activity,
    /// When the event occurred.
    pub timestamp: T,
    /// Identifier of the case (process instance) this event belongs to.
    pub case_id: String,
    /// Index of the immediately preceding event within the same case, if any.
    pub predecessor_index: Option<usize>,
    /// Index of the immediately following event within the same case, if any.
    pub successor_index: Option<usize>,
}

impl<T> Event<T> {
    /// Create an event without predecessor/successor links.
    pub fn new(activity: Activity, timestamp: T, case_id: impl Into<String>) -> Self {
        Self {
            activity,
            timestamp,
            case_id: case_id.into(),
            predecessor_index: None,
            successor_index: None,
        }
    }

    /// Set the predecessor link.
    pub fn with_predecessor(mut self, index: usize) -> Self {
        self.predecessor_index = Some(index);
        self
    }

    /// Set the successor link.
    pub fn with_successor(mut self, index: usize) -> Self {
        self.successor_index = Some(index);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_not_deduplicated_by_value() {
        let a = Event::new(Activity::new("a"), 1u64, "case-1");
        let b = Event::new(Activity::new("a"), 1u64, "case-1");

        // Equal as values, but the engine keeps both occurrences.
        assert_eq!(a, b);
        let held = vec![a, b];
        assert_eq!(held.len(), 2);
    }

    #[test]
    fn test_links() {
        let e = Event::new(Activity::new("a"), 5u64, "c")
            .with_predecessor(3)
            .with_successor(7);
        assert_eq!(e.predecessor_index, Some(3));
        assert_eq!(e.successor_index, Some(7));
    }
}
