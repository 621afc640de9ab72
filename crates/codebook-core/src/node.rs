//! Workflow node types.
//!
//! A net consists of typed nodes connected by labeled output edges. The node
//! kind decides two capabilities: whether the node may contribute codebook
//! items (Form and Process nodes, conditionally on their parts) and whether
//! it contributes boolean conditions toward its successors (Rule and Router
//! nodes).

use std::fmt;

use crate::part::ConceptPart;

/// Index of a node in a [`Net`](crate::net::Net) arena.
pub type NodeId = usize;

/// The variant tag of a workflow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// No recognized type marker was present in the node block.
    NoType,
    /// A data-entry form; its parts describe collected concepts.
    Form,
    /// A call into another net.
    Call,
    /// A branching node carrying rule fragments.
    Rule,
    /// A branching node routing on a single referenced field.
    Router,
    /// A processing step; may log collected concepts.
    Process,
}

impl NodeKind {
    /// Whether this kind can supply a boolean condition toward a successor.
    pub fn is_rule_contributor(self) -> bool {
        matches!(self, NodeKind::Rule | NodeKind::Router)
    }

    /// The uppercase tag used in debug output columns.
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::NoType => "NOTYPE",
            NodeKind::Form => "FORM",
            NodeKind::Call => "CALL",
            NodeKind::Rule => "RULE",
            NodeKind::Router => "ROUTER",
            NodeKind::Process => "PROCESS",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A directed, labeled edge leaving a node.
///
/// The label holds the criterion under which the edge is taken (`"true"`,
/// `"nee"`, ...), the target holds the id of the destination node. Multiple
/// edges may share one target; each is a separate condition path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputEdge {
    pub label: String,
    pub target: String,
    pub can_stop: String,
}

impl OutputEdge {
    /// An edge with no label, target, or stop marker carries no information.
    pub fn is_blank(&self) -> bool {
        self.label.is_empty() && self.target.is_empty() && self.can_stop.is_empty()
    }
}

/// One typed record in a net's graph.
///
/// The id, start flag, edges, and parts are fixed at parse time; the
/// predecessor list and connected flag are connectivity bookkeeping owned by
/// the walk in [`Net::connect`](crate::net::Net::connect).
#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub id: String,
    pub start: bool,
    pub is_silent: String,
    pub edges: Vec<OutputEdge>,
    pub parts: Vec<ConceptPart>,
    pub(crate) prev_rule_nodes: Vec<NodeId>,
    pub(crate) connected: bool,
}

impl Node {
    pub fn new(
        kind: NodeKind,
        id: String,
        start: bool,
        is_silent: String,
        edges: Vec<OutputEdge>,
        parts: Vec<ConceptPart>,
    ) -> Self {
        Self {
            kind,
            id,
            start,
            is_silent,
            edges,
            parts,
            prev_rule_nodes: Vec::new(),
            connected: false,
        }
    }

    /// Whether the connectivity walk has reached this node.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The rule-contributing predecessors wired by the walk, one entry per
    /// incoming condition path.
    pub fn predecessors(&self) -> &[NodeId] {
        &self.prev_rule_nodes
    }

    /// Labels of the edges targeting `child_id`.
    ///
    /// Several edges may point at the same child; their labels are the
    /// alternative criteria under which the child is reached.
    pub fn edge_labels_to(&self, child_id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|edge| edge.target.eq_ignore_ascii_case(child_id))
            .map(|edge| edge.label.as_str())
            .collect()
    }

    /// Marks the parts that satisfy the eligibility predicate for this
    /// node's kind and reports whether any did.
    ///
    /// Form nodes require a part to carry a path; Process and NoType nodes
    /// require both a path and a log marker. Other kinds never qualify.
    pub fn mark_eligible_parts(&mut self) -> bool {
        let mut any = false;
        match self.kind {
            NodeKind::Form => {
                for part in &mut self.parts {
                    if part.has_path() {
                        part.eligible = true;
                        any = true;
                    }
                }
            }
            NodeKind::Process | NodeKind::NoType => {
                for part in &mut self.parts {
                    if part.has_path() && part.has_log() {
                        part.eligible = true;
                        any = true;
                    }
                }
            }
            _ => {}
        }
        any
    }
}
