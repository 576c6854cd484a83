use std::fmt::{Debug, Display};
use std::hash::Hash;

use num_traits::{Bounded, PrimInt, Zero};

use crate::{Error, Result};

/// Integer edge weight (and path length) type accepted by the engines
///
/// Path lengths share the weight type. The largest representable value is
/// reserved as the "unreached" sentinel and additions saturate at it, so an
/// overflowing sum degrades to "unreachable" instead of wrapping.
pub trait Weight: PrimInt + Debug + Display + Send + Sync + 'static {
    /// The "no path known" sentinel
    fn infinity() -> Self {
        <Self as Bounded>::max_value()
    }

    /// Returns true if this value is the "no path known" sentinel
    fn is_infinite(self) -> bool {
        self == Self::infinity()
    }

    /// Extends a path length by one edge
    fn extend(self, weight: Self) -> Self {
        self.checked_add(&weight).unwrap_or_else(Self::infinity)
    }

    /// Converts the sentinel into `None`
    fn finite(self) -> Option<Self> {
        if self.is_infinite() {
            None
        } else {
            Some(self)
        }
    }
}

impl<T> Weight for T where T: PrimInt + Debug + Display + Send + Sync + 'static {}

/// Original node identifier type (integers, strings, ...)
pub trait NodeId: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T> NodeId for T where T: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

/// Trait representing an immutable weighted directed graph
///
/// Nodes are addressed by a dense index in `0..node_count()`; the original
/// identifiers are kept on the side and resolved in O(1).
pub trait Graph: Debug {
    type Node: NodeId;
    type Weight: Weight;

    /// Returns the number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Returns the number of directed arcs in the graph
    fn edge_count(&self) -> usize;

    /// Resolves an original identifier to its dense index
    fn index_of(&self, node: &Self::Node) -> Option<usize>;

    /// Resolves a dense index back to its original identifier
    fn node_id(&self, index: usize) -> Option<&Self::Node>;

    /// Outgoing `(neighbor index, weight)` pairs of a node, in insertion order
    fn neighbors(&self, index: usize) -> &[(usize, Self::Weight)];

    /// Returns true if the node exists in the graph
    fn contains(&self, node: &Self::Node) -> bool {
        self.index_of(node).is_some()
    }

    /// Like [`Graph::index_of`], but reports a missing node as an error
    fn require_index(&self, node: &Self::Node) -> Result<usize> {
        self.index_of(node)
            .ok_or_else(|| Error::UnknownNode(format!("{:?}", node)))
    }

    /// Fails with [`Error::InvalidGraph`] on the first negative arc
    fn validate_non_negative(&self) -> Result<()> {
        for u in 0..self.node_count() {
            for &(v, weight) in self.neighbors(u) {
                if weight < <Self::Weight as Zero>::zero() {
                    return Err(Error::InvalidGraph {
                        from: self.describe(u),
                        to: self.describe(v),
                        weight: weight.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Debug rendering of the node at `index`, used in error messages
    fn describe(&self, index: usize) -> String {
        match self.node_id(index) {
            Some(node) => format!("{:?}", node),
            None => format!("#{}", index),
        }
    }
}
