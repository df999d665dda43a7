//! Mira Torus Topology
//!
//! Rack numbering, node card addressing and partition naming for the Mira
//! Blue Gene/Q machine.
//!
//! # Physical Layout
//!
//! The machine is 48 racks arranged in 6 rows (groups) of 8. Each rack holds
//! 2 midplanes and each midplane holds 16 node cards of 32 compute nodes:
//!
//! - 1 node card = 32 nodes
//! - 1 midplane  = 16 node cards = 512 nodes
//! - 1 rack      = 2 midplanes   = 1024 nodes
//!
//! # Rack Numbering
//!
//! Rack ids are two decimal digits: the row followed by the position in the
//! row. Rows hold at most 8 racks, so ids skip from `07` to `10`, `17` to
//! `20` and so on. The enumeration index of a rack (its position 0..48 in
//! row-major order) is therefore not its id:
//!
//! ```
//! use mira_topology::RackTopology;
//!
//! let topology = RackTopology::mira().unwrap();
//! assert_eq!(topology.rack_id(7).unwrap().value(), 7);
//! assert_eq!(topology.rack_id(8).unwrap().value(), 10);
//! assert_eq!(topology.rack_id(47).unwrap().value(), 57);
//! ```

mod error;
mod naming;
mod nodecard;
mod rack;

pub use error::{Result, TopologyError};
pub use naming::{partition_name, Extent, PartitionName, SizeClass};
pub use nodecard::{midplane_cards, rack_cards, span_cards, Midplane, NodeCardAddr, RackSpan};
pub use rack::{rack_id_for_index, Rack, RackId, RackTopology, TopologyConfig};

/// Site prefix carried by every partition name.
pub const SITE_PREFIX: &str = "ANL";

/// Number of racks in the production machine.
pub const MIRA_RACK_COUNT: usize = 48;

/// Midplanes per rack.
pub const MIDPLANES_PER_RACK: usize = 2;

/// Node cards per midplane.
pub const NODE_CARDS_PER_MIDPLANE: usize = 16;

/// Node cards per rack.
pub const NODE_CARDS_PER_RACK: usize = MIDPLANES_PER_RACK * NODE_CARDS_PER_MIDPLANE;

/// Compute nodes on one node card.
pub const NODES_PER_NODE_CARD: usize = 32;

/// Compute nodes in one midplane (the half-rack size label).
pub const NODES_PER_MIDPLANE: usize = NODE_CARDS_PER_MIDPLANE * NODES_PER_NODE_CARD;

/// Compute nodes in one rack (the full-rack size label).
pub const NODES_PER_RACK: usize = MIDPLANES_PER_RACK * NODES_PER_MIDPLANE;

/// Distance in id-space between the first racks of consecutive groups.
pub const GROUP_STRIDE: u8 = 10;

/// Groups that fit in a two-digit rack id.
pub const MAX_GROUPS: u8 = 10;

/// Racks a single group may hold (offsets 0..=7).
pub const MAX_GROUP_SIZE: u8 = 8;

// The size labels in partition names depend on these exact values
const _: () = assert!(NODES_PER_MIDPLANE == 512);
const _: () = assert!(NODES_PER_RACK == 1024);
const _: () = assert!(MAX_GROUP_SIZE <= GROUP_STRIDE);
