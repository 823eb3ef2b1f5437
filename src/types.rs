use crate::error::{PassfitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fitness assigned to an individual whose transformed artifact failed to run.
pub const WORST_FITNESS: f64 = f64::MAX;

/// Fitness returned for object types with no evaluator.
pub const NEUTRAL_FITNESS: f64 = 100.0;

/// Default number of timed repetitions per benchmark.
pub const DEFAULT_REPETITIONS: u32 = 5;

/// Which fitness protocol applies to an individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Simple,        // String-like transformations over an abstract representation
    Assembler,     // Assembly-level sequences
    RawString,     // Raw string genomes
    LlvmPass,      // Compiler pass orderings, benchmarked through opt/lli
    BinaryUpTo512, // Fixed-size binary genomes
    /// A tag emitted by genome code this engine does not know about yet.
    Unmapped(u32),
}

impl ObjectType {
    pub fn from_tag(tag: u32) -> Self {
        match tag {
            0 => ObjectType::Simple,
            1 => ObjectType::Assembler,
            2 => ObjectType::RawString,
            3 => ObjectType::LlvmPass,
            4 => ObjectType::BinaryUpTo512,
            other => ObjectType::Unmapped(other),
        }
    }

    pub fn tag(&self) -> u32 {
        match self {
            ObjectType::Simple => 0,
            ObjectType::Assembler => 1,
            ObjectType::RawString => 2,
            ObjectType::LlvmPass => 3,
            ObjectType::BinaryUpTo512 => 4,
            ObjectType::Unmapped(tag) => *tag,
        }
    }
}

impl Default for ObjectType {
    fn default() -> Self {
        ObjectType::LlvmPass
    }
}

/// One operation in an individual's sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationNode {
    pub object_type: ObjectType,
    pub name: String,
}

impl OperationNode {
    pub fn new(object_type: ObjectType, name: impl Into<String>) -> Self {
        Self {
            object_type,
            name: name.into(),
        }
    }
}

impl fmt::Display for OperationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An ordered operation sequence. Every node carries the same object type.
///
/// The "next" node is simply the following element; iteration ends after the
/// last node. The engine only ever borrows individuals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    object_type: ObjectType,
    nodes: Vec<OperationNode>,
}

impl Individual {
    /// Build an individual of a single object type from operation names.
    pub fn new<I, S>(object_type: ObjectType, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nodes = names
            .into_iter()
            .map(|name| OperationNode::new(object_type, name))
            .collect();
        Self { object_type, nodes }
    }

    /// Build an individual from existing nodes, rejecting mixed type tags.
    pub fn from_nodes(nodes: Vec<OperationNode>) -> Result<Self> {
        let object_type = match nodes.first() {
            Some(node) => node.object_type,
            None => {
                return Err(PassfitError::InvalidIndividual(
                    "cannot infer the object type of an empty sequence".to_string(),
                ))
            }
        };

        if let Some(odd) = nodes.iter().find(|n| n.object_type != object_type) {
            return Err(PassfitError::InvalidIndividual(format!(
                "node '{}' has type {:?} but the sequence is {:?}",
                odd.name, odd.object_type, object_type
            )));
        }

        Ok(Self { object_type, nodes })
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationNode> {
        self.nodes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stable key identifying this sequence, used for memoisation and deduplication
    pub fn canonical_key(&self) -> String {
        let names: Vec<&str> = self.names().collect();
        serde_json::to_string(&(self.object_type.tag(), names)).unwrap_or_default()
    }
}
