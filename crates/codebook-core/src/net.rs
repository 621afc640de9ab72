//! One workflow graph instance: the node arena, connectivity walk, and item
//! aggregation.

use std::collections::{BTreeMap, HashMap};

use log::{info, warn};

use crate::item::CodebookItem;
use crate::node::{Node, NodeId, NodeKind};

/// A parsed net: metadata plus an id-indexed node arena.
///
/// Nodes live in a flat arena and reference each other through arena
/// indices, so the connectivity walk and rule derivation never chase owned
/// references.
#[derive(Debug, Default)]
pub struct Net {
    name: String,
    version: String,
    stamp: String,
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    start: Option<NodeId>,
    codebook_nodes: Vec<NodeId>,
}

impl Net {
    pub fn new(name: String, version: String, stamp: String) -> Self {
        Self {
            name,
            version,
            stamp,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Nodes collected by [`connect`](Self::connect), in visitation order.
    pub fn codebook_nodes(&self) -> &[NodeId] {
        &self.codebook_nodes
    }

    /// Adds a node to the arena and indexes it by id.
    ///
    /// A duplicate id keeps the first node; the newcomer is dropped and
    /// logged, never corrected.
    pub fn push_node(&mut self, node: Node) -> Option<NodeId> {
        if self.index.contains_key(&node.id) {
            info!(net = self.name, id = node.id; "duplicate node id, keeping the first occurrence");
            return None;
        }
        let idx = self.nodes.len();
        self.index.insert(node.id.clone(), idx);
        self.nodes.push(node);
        Some(idx)
    }

    pub fn set_start(&mut self, idx: NodeId) {
        self.start = Some(idx);
    }

    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    /// Depth-first connectivity walk from the start node.
    ///
    /// Marks visited nodes, collects codebook-eligible nodes in visitation
    /// order, and wires each rule-contributing node as a predecessor of its
    /// edge targets (one entry per edge, so duplicates are intentional).
    /// Nodes unreachable from the start belong to a disconnected side-graph
    /// and are ignored. Uses an explicit frame stack; graph depth cannot
    /// overflow the call stack.
    pub fn connect(&mut self) {
        let Some(start) = self.start else {
            return;
        };
        // (node, next edge cursor) frames reproduce recursive pre-order.
        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        self.enter(start, &mut stack);
        while let Some((current, cursor)) = stack.pop() {
            if cursor >= self.nodes[current].edges.len() {
                continue;
            }
            stack.push((current, cursor + 1));
            let target_id = self.nodes[current].edges[cursor].target.clone();
            if target_id.is_empty() {
                continue;
            }
            let Some(target) = self.lookup(&target_id) else {
                warn!(net = self.name, source = self.nodes[current].id, target = target_id;
                    "edge target not present in net, skipping");
                continue;
            };
            if self.nodes[current].kind.is_rule_contributor() {
                self.nodes[target].prev_rule_nodes.push(current);
            }
            if !self.nodes[target].connected {
                self.enter(target, &mut stack);
            }
        }
    }

    fn enter(&mut self, idx: NodeId, stack: &mut Vec<(NodeId, usize)>) {
        let node = &mut self.nodes[idx];
        node.connected = true;
        match node.kind {
            NodeKind::Form | NodeKind::Process => {
                if node.mark_eligible_parts() {
                    self.codebook_nodes.push(idx);
                }
            }
            NodeKind::NoType => {
                if node.mark_eligible_parts() {
                    warn!(net = self.name, id = node.id;
                        "untyped node has eligible parts, excluded from the codebook");
                }
            }
            _ => {}
        }
        stack.push((idx, 0));
    }

    /// Appends one item per eligible part of every codebook node, grouped
    /// by normalized path. The sorted map keeps traversal deterministic.
    pub fn collect_items(&self, map: &mut BTreeMap<String, Vec<CodebookItem>>) {
        for &idx in &self.codebook_nodes {
            let node = &self.nodes[idx];
            let entry_rule = self.entry_condition(idx);
            for part in node.parts.iter().filter(|part| part.eligible) {
                let mut item = CodebookItem::new(
                    &part.path,
                    &part.caption,
                    &part.data_type,
                    &part.name,
                    part.options.clone(),
                    part.rendered_validation_rules(),
                );
                item.set_log(&part.log);
                item.set_entry_rule(&entry_rule);
                item.set_node_id(&node.id);
                item.set_node_type(node.kind.tag());
                item.set_net(&self.name);
                map.entry(item.path().to_string()).or_default().push(item);
            }
        }
    }

    /// The boolean condition under which `idx` is entered: the OR across
    /// the derived rules of its direct rule-contributing predecessors, or
    /// empty when it has none (always entered).
    pub fn entry_condition(&self, idx: NodeId) -> String {
        let node = &self.nodes[idx];
        node.prev_rule_nodes
            .iter()
            .map(|&pred| self.derive_rule(pred, &node.id))
            .collect::<Vec<_>>()
            .join(" OR ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::OutputEdge;
    use crate::part::ConceptPart;

    fn edge(label: &str, target: &str) -> OutputEdge {
        OutputEdge {
            label: label.to_string(),
            target: target.to_string(),
            can_stop: String::new(),
        }
    }

    fn form_node(id: &str, path: &str, edges: Vec<OutputEdge>) -> Node {
        Node::new(
            NodeKind::Form,
            id.to_string(),
            false,
            String::new(),
            edges,
            vec![ConceptPart {
                path: path.to_string(),
                ..ConceptPart::default()
            }],
        )
    }

    fn plain_node(id: &str, edges: Vec<OutputEdge>) -> Node {
        Node::new(
            NodeKind::NoType,
            id.to_string(),
            false,
            String::new(),
            edges,
            vec![],
        )
    }

    fn net_with(nodes: Vec<Node>, start: &str) -> Net {
        let mut net = Net::new("testnet".into(), "1".into(), String::new());
        let mut start_idx = None;
        for node in nodes {
            let is_start = node.id == start;
            if let Some(idx) = net.push_node(node) {
                if is_start {
                    start_idx = Some(idx);
                }
            }
        }
        if let Some(idx) = start_idx {
            net.set_start(idx);
        }
        net
    }

    #[test]
    fn duplicate_ids_keep_the_first_node() {
        let mut net = Net::new("n".into(), "1".into(), String::new());
        let first = net.push_node(form_node("5", "path.a", vec![]));
        let second = net.push_node(form_node("5", "path.b", vec![]));
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(net.node_count(), 1);
        assert_eq!(net.node(0).parts[0].path, "path.a");
    }

    #[test]
    fn walk_collects_codebook_nodes_in_visitation_order() {
        let net_nodes = vec![
            plain_node("1", vec![edge("", "2"), edge("", "3")]),
            form_node("2", "first", vec![]),
            form_node("3", "second", vec![]),
        ];
        let mut net = net_with(net_nodes, "1");
        net.connect();
        let collected: Vec<&str> = net
            .codebook_nodes()
            .iter()
            .map(|&idx| net.node(idx).id.as_str())
            .collect();
        assert_eq!(collected, ["2", "3"]);
    }

    #[test]
    fn walk_survives_cycles() {
        let net_nodes = vec![
            plain_node("1", vec![edge("", "2")]),
            plain_node("2", vec![edge("", "1")]),
        ];
        let mut net = net_with(net_nodes, "1");
        net.connect();
        assert!(net.node(0).is_connected());
        assert!(net.node(1).is_connected());
    }

    #[test]
    fn unreachable_nodes_stay_unconnected() {
        let net_nodes = vec![
            form_node("1", "seen", vec![]),
            form_node("9", "side.graph", vec![]),
        ];
        let mut net = net_with(net_nodes, "1");
        net.connect();
        assert!(net.node(0).is_connected());
        assert!(!net.node(1).is_connected());
        assert_eq!(net.codebook_nodes().len(), 1);
    }

    #[test]
    fn rule_contributors_register_once_per_edge() {
        let mut router = Node::new(
            NodeKind::Router,
            "1".into(),
            false,
            String::new(),
            vec![edge("yes", "2"), edge("no", "2")],
            vec![],
        );
        router.parts.push(ConceptPart {
            rule: "F".into(),
            ..ConceptPart::default()
        });
        let net_nodes = vec![router, form_node("2", "c", vec![])];
        let mut net = net_with(net_nodes, "1");
        net.connect();
        let target = net.lookup("2").unwrap();
        assert_eq!(net.node(target).predecessors().len(), 2);
    }

    #[test]
    fn missing_edge_targets_are_skipped() {
        let net_nodes = vec![plain_node("1", vec![edge("", "404"), edge("", "2")]),
            form_node("2", "still.reached", vec![])];
        let mut net = net_with(net_nodes, "1");
        net.connect();
        assert_eq!(net.codebook_nodes().len(), 1);
    }

    #[test]
    fn items_carry_node_and_net_metadata() {
        let net_nodes = vec![form_node("7", "some.path", vec![])];
        let mut net = net_with(net_nodes, "7");
        net.connect();
        let mut map = BTreeMap::new();
        net.collect_items(&mut map);
        let items = &map["some.path"];
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].node_id(), "7");
        assert_eq!(items[0].node_type(), "FORM");
        assert_eq!(items[0].net(), "testnet");
        assert_eq!(items[0].entry_rule(), "");
    }
}
