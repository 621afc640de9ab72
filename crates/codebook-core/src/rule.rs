//! Entry-condition derivation for rule-contributing nodes.

use log::warn;

use crate::net::Net;
use crate::node::{NodeId, NodeKind};

impl Net {
    /// The full boolean condition a rule-contributing node imposes on the
    /// path toward `child_id`.
    ///
    /// The node's own condition (its criterion tested against the labels of
    /// the edges leading to the child) is ANDed with the OR across the
    /// derived rules of its own rule-contributing predecessors, recursively.
    /// A node with no such predecessors yields its local condition alone.
    pub fn derive_rule(&self, idx: NodeId, child_id: &str) -> String {
        let node = self.node(idx);
        let local = self.local_rule(idx, child_id);
        if node.predecessors().is_empty() {
            return local;
        }
        let upstream = node
            .predecessors()
            .iter()
            .map(|&pred| self.derive_rule(pred, &node.id))
            .collect::<Vec<_>>()
            .join(" OR ");
        format!("{upstream} AND {local}")
    }

    /// The condition this node alone imposes: `[<criterion> == <labels>]`.
    ///
    /// Rule nodes test their rendered rule fragments; router nodes test the
    /// single field named by their rule-marked part. The labels are those of
    /// all edges from this node to the child, OR-joined, since each labeled
    /// edge is an alternative way to reach it.
    fn local_rule(&self, idx: NodeId, child_id: &str) -> String {
        let node = self.node(idx);
        let criterion = match node.kind {
            NodeKind::Rule => node
                .parts
                .iter()
                .map(|part| part.fragment_rule())
                .filter(|rule| !rule.is_empty())
                .collect::<Vec<_>>()
                .join(" OR "),
            NodeKind::Router => {
                let mut fields = node.parts.iter().filter(|part| !part.rule.is_empty());
                let first = fields.next().map(|part| part.rule.clone()).unwrap_or_default();
                if fields.next().is_some() {
                    warn!(net = self.name(), id = node.id;
                        "router carries more than one rule field, using the first");
                }
                if first.is_empty() {
                    warn!(net = self.name(), id = node.id; "router has no rule field");
                }
                first
            }
            _ => return String::new(),
        };
        let labels = node.edge_labels_to(child_id).join(" OR ");
        format!("[{criterion} == {labels}]")
    }
}
