//! Data-driven conformance scenarios.
//!
//! A scenario is data, not code: a name and the ordered labels to
//! click. One runner consumes all of them uniformly, whether the case
//! is a single leaf, a sibling pair, a branch, or the full tree.

use serde::{Deserialize, Serialize};

/// One named conformance case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Human-readable case name, reported verbatim.
    pub name: String,
    /// Node labels clicked in order.
    pub targets: Vec<String>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            targets: Vec::new(),
        }
    }

    /// Append one target label (builder style).
    pub fn target(mut self, label: impl Into<String>) -> Self {
        self.targets.push(label.into());
        self
    }

    /// Append several target labels at once.
    pub fn targets<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets.extend(labels.into_iter().map(Into::into));
        self
    }
}
