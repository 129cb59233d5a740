//! Activity labels.

use std::fmt;
use std::sync::Arc;

/// An activity label within a process.
///
/// Activities compare, hash, and order by name. The label is reference
/// counted so that states, transitions, and events can share it without
/// copying the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Activity(Arc<str>);

impl Activity {
    /// Create an activity from its name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The activity name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Activity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_by_name() {
        let a = Activity::new("register");
        let b = Activity::new("register");
        let c = Activity::new("review");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(c);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_ordering_by_name() {
        let mut labels = vec![Activity::new("c"), Activity::new("a"), Activity::new("b")];
        labels.sort();
        let names: Vec<&str> = labels.iter().map(Activity::name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
