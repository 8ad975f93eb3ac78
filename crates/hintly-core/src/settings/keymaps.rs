//! Key-sequence to operation bindings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bound operation: a discriminant string plus free-form arguments kept as
/// JSON so new operation kinds don't require a schema change here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(flatten, default)]
    pub args: Map<String, Value>,
}

impl Operation {
    /// An operation with no arguments.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            args: Map::new(),
        }
    }

    /// An operation with a single argument.
    pub fn with_arg(kind: impl Into<String>, key: &str, value: Value) -> Self {
        let mut args = Map::new();
        args.insert(key.to_string(), value);
        Self {
            kind: kind.into(),
            args,
        }
    }
}

/// Ordered map from a key sequence (e.g. `"zi"`) to the operation it runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Keymaps(BTreeMap<String, Operation>);

impl Keymaps {
    pub fn new(entries: BTreeMap<String, Operation>) -> Self {
        Self(entries)
    }

    /// The built-in bindings used when no stored keymaps exist.
    pub fn with_defaults() -> Self {
        let entries = [
            ("j", Operation::with_arg("scroll.vertically", "count", 1.into())),
            (
                "k",
                Operation::with_arg("scroll.vertically", "count", (-1).into()),
            ),
            (
                "h",
                Operation::with_arg("scroll.horizontally", "count", (-1).into()),
            ),
            (
                "l",
                Operation::with_arg("scroll.horizontally", "count", 1.into()),
            ),
            ("gg", Operation::new("scroll.top")),
            ("G", Operation::new("scroll.bottom")),
            ("d", Operation::new("tabs.close")),
            ("u", Operation::new("tabs.reopen")),
            ("H", Operation::new("navigate.history.prev")),
            ("L", Operation::new("navigate.history.next")),
            ("f", Operation::with_arg("follow.start", "newTab", false.into())),
            ("F", Operation::with_arg("follow.start", "newTab", true.into())),
            ("o", Operation::with_arg("command.show.open", "alter", false.into())),
            ("t", Operation::with_arg("command.show.tabopen", "alter", false.into())),
            ("/", Operation::new("find.start")),
            ("n", Operation::new("find.next")),
            ("N", Operation::new("find.prev")),
            ("zi", Operation::new("zoom.in")),
            ("zo", Operation::new("zoom.out")),
            ("zz", Operation::new("zoom.neutral")),
        ];
        Self(
            entries
                .into_iter()
                .map(|(keys, op)| (keys.to_string(), op))
                .collect(),
        )
    }

    /// Look up the operation bound to an exact key sequence.
    pub fn get(&self, keys: &str) -> Option<&Operation> {
        self.0.get(keys)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.0.iter().map(|(keys, op)| (keys.as_str(), op))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Keymaps {
    fn default() -> Self {
        Self::with_defaults()
    }
}
