//! Object collections
//!
//! Collections group stage objects by name so that repeated scene imports
//! can be kept apart from whatever the base stage already contains.

use serde::{Deserialize, Serialize};

/// A named grouping of stage objects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection name
    pub name: String,

    /// Names of the member objects, in insertion order
    pub members: Vec<String>,
}

impl Collection {
    /// Create an empty collection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Whether an object belongs to this collection
    #[must_use]
    pub fn contains(&self, object_name: &str) -> bool {
        self.members.iter().any(|m| m == object_name)
    }

    /// Add an object to the collection if it is not already a member
    pub fn link(&mut self, object_name: &str) {
        if !self.contains(object_name) {
            self.members.push(object_name.to_owned());
        }
    }

    /// Remove an object from the collection
    pub fn unlink(&mut self, object_name: &str) {
        self.members.retain(|m| m != object_name);
    }
}
