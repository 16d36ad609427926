//! Dislocation network snapshot: nodes, segments, and read-only accessors.
//!
//! A [`DisNetwork`] is the node/link set at one instant. Nodes are held in
//! insertion order; links reference nodes by tag (lookup only, no back
//! references from nodes). Every link endpoint is validated at construction,
//! so a dangling reference is a data-integrity error here and never a
//! render-time surprise.
//!
//! Segment attributes are oriented source → target when the link is built
//! and are handed back verbatim by the accessors — nothing downstream
//! recomputes or re-orients them.

use std::collections::HashMap;

use nalgebra::Vector3;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::Cell;

/// Node identifier. Unique within one network.
pub type NodeTag = usize;

/// Errors from snapshot construction.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("link {link_index} references missing node {tag}")]
    MissingNode { link_index: usize, tag: NodeTag },

    #[error("duplicate node tag {0}")]
    DuplicateNode(NodeTag),
}

/// Motion constraint on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Unconstrained,
    Pinned,
}

/// Per-node attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeAttr {
    /// Position in cell coordinates (b).
    pub position: Vector3<f64>,
    pub constraint: Constraint,
}

/// Per-segment attributes.
///
/// The plane normal is by convention unit length and perpendicular to the
/// local line direction when the segment is built; the data structure does
/// not enforce this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkAttr {
    /// Burgers vector of the segment.
    pub burgers: Vector3<f64>,
    /// Glide-plane normal of the segment.
    pub plane_normal: Vector3<f64>,
}

/// A directed segment between two nodes, referenced by tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeTag,
    pub target: NodeTag,
    #[serde(flatten)]
    pub attr: LinkAttr,
}

/// A point-in-time snapshot of a dislocation network inside one [`Cell`].
#[derive(Debug, Clone)]
pub struct DisNetwork {
    cell: Cell,
    nodes: Vec<(NodeTag, NodeAttr)>,
    links: Vec<Link>,
    index: HashMap<NodeTag, usize>,
    outgoing: HashMap<NodeTag, Vec<usize>>,
}

impl DisNetwork {
    /// Build a snapshot, validating link endpoints against the node set.
    pub fn new(
        cell: Cell,
        nodes: Vec<(NodeTag, NodeAttr)>,
        links: Vec<Link>,
    ) -> Result<Self, NetworkError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, (tag, _)) in nodes.iter().enumerate() {
            if index.insert(*tag, i).is_some() {
                return Err(NetworkError::DuplicateNode(*tag));
            }
        }

        let mut outgoing: HashMap<NodeTag, Vec<usize>> = HashMap::new();
        for (link_index, link) in links.iter().enumerate() {
            for tag in [link.source, link.target] {
                if !index.contains_key(&tag) {
                    return Err(NetworkError::MissingNode { link_index, tag });
                }
            }
            outgoing.entry(link.source).or_default().push(link_index);
        }

        Ok(Self {
            cell,
            nodes,
            links,
            index,
            outgoing,
        })
    }

    /// The cell this network lives in.
    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of segments.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Attributes of one node, if present.
    pub fn node(&self, tag: NodeTag) -> Option<&NodeAttr> {
        self.index.get(&tag).map(|&i| &self.nodes[i].1)
    }

    /// Iterate all nodes in insertion order. Order is stable across calls
    /// within one snapshot.
    pub fn all_nodes(&self) -> impl Iterator<Item = (NodeTag, &NodeAttr)> + '_ {
        self.nodes.iter().map(|(tag, attr)| (*tag, attr))
    }

    /// Outgoing segments of `tag` as `(neighbor, attributes)` pairs, the
    /// attributes exactly as given at construction. Unknown or unlinked
    /// tags yield an empty iterator, not an error.
    pub fn neighbors(&self, tag: NodeTag) -> impl Iterator<Item = (NodeTag, &LinkAttr)> + '_ {
        self.outgoing
            .get(&tag)
            .map(|links| links.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&i| (self.links[i].target, &self.links[i].attr))
    }

    /// All segments, in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Node positions as an N×3 array, in insertion order.
    pub fn position_array(&self) -> Array2<f64> {
        let mut out = Array2::zeros((self.nodes.len(), 3));
        for (i, (_, attr)) in self.nodes.iter().enumerate() {
            for axis in 0..3 {
                out[[i, axis]] = attr.position[axis];
            }
        }
        out
    }

    /// Serialisable mirror of this snapshot.
    pub fn to_document(&self) -> NetworkDocument {
        NetworkDocument {
            cell: self.cell.clone(),
            nodes: self
                .nodes
                .iter()
                .map(|(tag, attr)| NodeRecord {
                    tag: *tag,
                    attr: attr.clone(),
                })
                .collect(),
            links: self.links.clone(),
        }
    }

    /// Rebuild a snapshot from a document, re-running integrity validation.
    pub fn from_document(document: NetworkDocument) -> Result<Self, NetworkError> {
        Self::new(
            document.cell,
            document
                .nodes
                .into_iter()
                .map(|record| (record.tag, record.attr))
                .collect(),
            document.links,
        )
    }
}

/// Structured-file form of a [`DisNetwork`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub cell: Cell,
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<Link>,
}

/// One node entry in a [`NetworkDocument`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub tag: NodeTag,
    #[serde(flatten)]
    pub attr: NodeAttr,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cell() -> Cell {
        Cell::cubic(100.0, true).unwrap()
    }

    fn node(position: [f64; 3]) -> NodeAttr {
        NodeAttr {
            position: Vector3::from(position),
            constraint: Constraint::Unconstrained,
        }
    }

    fn link(source: NodeTag, target: NodeTag) -> Link {
        Link {
            source,
            target,
            attr: LinkAttr {
                burgers: Vector3::x(),
                plane_normal: Vector3::z(),
            },
        }
    }

    #[test]
    fn test_all_nodes_insertion_order() {
        let nodes = vec![
            (7, node([1.0, 0.0, 0.0])),
            (2, node([2.0, 0.0, 0.0])),
            (5, node([3.0, 0.0, 0.0])),
        ];
        let net = DisNetwork::new(sample_cell(), nodes, vec![]).unwrap();
        let tags: Vec<NodeTag> = net.all_nodes().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec![7, 2, 5]);
        // stable across calls
        let again: Vec<NodeTag> = net.all_nodes().map(|(tag, _)| tag).collect();
        assert_eq!(tags, again);
    }

    #[test]
    fn test_neighbors_verbatim_attributes() {
        let nodes = vec![(0, node([0.0; 3])), (1, node([5.0, 0.0, 0.0]))];
        let mut l = link(0, 1);
        l.attr.burgers = Vector3::new(0.3, -0.4, 0.5);
        let net = DisNetwork::new(sample_cell(), nodes, vec![l]).unwrap();

        let out: Vec<_> = net.neighbors(0).collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0, 1);
        assert_eq!(out[0].1.burgers, Vector3::new(0.3, -0.4, 0.5));

        // target node has no outgoing links
        assert_eq!(net.neighbors(1).count(), 0);
        // unknown tag is empty, not an error
        assert_eq!(net.neighbors(99).count(), 0);
    }

    #[test]
    fn test_missing_node_rejected_at_construction() {
        let nodes = vec![(0, node([0.0; 3]))];
        let result = DisNetwork::new(sample_cell(), nodes, vec![link(0, 3)]);
        assert!(matches!(
            result,
            Err(NetworkError::MissingNode { link_index: 0, tag: 3 })
        ));
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let nodes = vec![(4, node([0.0; 3])), (4, node([1.0, 0.0, 0.0]))];
        let result = DisNetwork::new(sample_cell(), nodes, vec![]);
        assert!(matches!(result, Err(NetworkError::DuplicateNode(4))));
    }

    #[test]
    fn test_position_array_shape_and_order() {
        let nodes = vec![(0, node([1.0, 2.0, 3.0])), (1, node([4.0, 5.0, 6.0]))];
        let net = DisNetwork::new(sample_cell(), nodes, vec![]).unwrap();
        let positions = net.position_array();
        assert_eq!(positions.shape(), &[2, 3]);
        assert_eq!(positions[[0, 1]], 2.0);
        assert_eq!(positions[[1, 2]], 6.0);
    }

    #[test]
    fn test_document_round_trip() {
        let nodes = vec![(0, node([0.0; 3])), (1, node([5.0, 0.0, 0.0]))];
        let net = DisNetwork::new(sample_cell(), nodes, vec![link(0, 1)]).unwrap();

        let json = serde_json::to_string(&net.to_document()).unwrap();
        let document: NetworkDocument = serde_json::from_str(&json).unwrap();
        let back = DisNetwork::from_document(document).unwrap();

        assert_eq!(back.len(), 2);
        assert_eq!(back.link_count(), 1);
        assert_eq!(back.neighbors(0).count(), 1);
    }

    #[test]
    fn test_document_import_validates_links() {
        let document = NetworkDocument {
            cell: sample_cell(),
            nodes: vec![NodeRecord {
                tag: 0,
                attr: node([0.0; 3]),
            }],
            links: vec![link(0, 9)],
        };
        assert!(DisNetwork::from_document(document).is_err());
    }
}
