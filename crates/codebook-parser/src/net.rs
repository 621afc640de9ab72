//! Whole-net parsing.

use log::warn;

use codebook_core::net::Net;

use crate::blocks::element_block;
use crate::fields::{bare_field, quoted_field};
use crate::node::parse_node;

/// Parses one raw net dump into a connected [`Net`].
///
/// The dump is split on blank lines: the first block holds the net metadata,
/// every following block one node. A block that yields no node id is
/// malformed and skipped with a warning. After the nodes are in place the
/// connectivity walk runs, so the returned net is ready for item collection.
pub fn parse_net(data: &str) -> Net {
    let mut blocks = data.split("\n\n");
    let mut net = parse_metadata(blocks.next().unwrap_or_default());
    for block in blocks {
        if block.trim().is_empty() {
            continue;
        }
        let node = parse_node(block);
        if node.id.is_empty() {
            warn!(net = net.name(); "node block without an id, skipping");
            continue;
        }
        let start = node.start;
        if let Some(idx) = net.push_node(node) {
            if start {
                net.set_start(idx);
            }
        }
    }
    net.connect();
    net
}

/// Reads the metadata block. An embedded `datamodel` element carries its own
/// `name` and `version`; it is blanked out before the net's own fields are
/// read so they cannot shadow them.
fn parse_metadata(data: &str) -> Net {
    let datamodel = element_block(data, "datamodel");
    let data = if datamodel.is_empty() {
        data.to_string()
    } else {
        data.replace(&datamodel, "datamodel=\n")
    };
    Net::new(
        quoted_field(&data, "name"),
        bare_field(&data, "version"),
        bare_field(&data, "stamp"),
    )
}
