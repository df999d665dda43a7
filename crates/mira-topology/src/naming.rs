//! Partition extents and names.
//!
//! | Extent     | Name                      |
//! |------------|---------------------------|
//! | full rack  | `ANL-R<id>-1024`          |
//! | midplane   | `ANL-R<id>-M<m>-512`      |
//! | rack span  | `ANL-R<first>-R<last>-<n>`|
//!
//! Span names carry the ids of both boundary racks and the node count, so
//! names never collide: rack and midplane names have a different shape, and
//! two spans with the same boundaries are the same span.

use crate::{
    midplane_cards, span_cards, Midplane, NodeCardAddr, RackSpan, RackTopology, Result,
    NODES_PER_NODE_CARD, NODE_CARDS_PER_MIDPLANE, NODE_CARDS_PER_RACK, SITE_PREFIX,
};

/// Size class of a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeClass {
    /// Both midplanes of one rack
    FullRack,
    /// One midplane
    HalfRack,
    /// Two or more consecutive racks
    MultiRack,
}

/// Physical extent of a partition, by rack enumeration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Extent {
    /// A whole rack
    Rack(usize),
    /// One midplane of a rack
    Midplane(usize, Midplane),
    /// Consecutive racks
    Span(RackSpan),
}

impl Extent {
    pub fn size_class(&self) -> SizeClass {
        match self {
            Extent::Rack(_) => SizeClass::FullRack,
            Extent::Midplane(..) => SizeClass::HalfRack,
            Extent::Span(_) => SizeClass::MultiRack,
        }
    }

    /// Racks touched by this extent.
    pub fn racks(&self) -> RackSpan {
        match *self {
            Extent::Rack(index) | Extent::Midplane(index, _) => RackSpan::single(index),
            Extent::Span(span) => span,
        }
    }

    /// Number of node cards in the extent.
    pub fn node_card_count(&self) -> usize {
        match self {
            Extent::Midplane(..) => NODE_CARDS_PER_MIDPLANE,
            _ => self.racks().len() * NODE_CARDS_PER_RACK,
        }
    }

    /// Number of compute nodes; the size label in the partition name.
    pub fn size(&self) -> usize {
        self.node_card_count() * NODES_PER_NODE_CARD
    }

    /// Whether every node card of `other` is also in this extent.
    pub fn contains(&self, other: &Extent) -> bool {
        match (self, other) {
            (Extent::Midplane(a, m), Extent::Midplane(b, n)) => a == b && m == n,
            (Extent::Midplane(..), _) => false,
            _ => self.racks().covers(&other.racks()),
        }
    }

    /// The extent's node cards in address order.
    pub fn node_cards(&self, topology: &RackTopology) -> Result<Vec<NodeCardAddr>> {
        match *self {
            Extent::Midplane(index, midplane) => {
                let rack = topology.rack_id(index)?;
                Ok(midplane_cards(rack, midplane).collect())
            }
            _ => Ok(span_cards(topology, self.racks())?.collect()),
        }
    }
}

/// Unique partition name, e.g. `ANL-R00-R10-9216`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionName(String);

impl PartitionName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PartitionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for PartitionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PartitionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the name of the partition covering `extent`.
pub fn partition_name(topology: &RackTopology, extent: &Extent) -> Result<PartitionName> {
    let size = extent.size();
    let name = match *extent {
        Extent::Rack(index) => {
            format!("{}-R{}-{}", SITE_PREFIX, topology.rack_id(index)?, size)
        }
        Extent::Midplane(index, midplane) => {
            format!("{}-R{}-{}-{}", SITE_PREFIX, topology.rack_id(index)?, midplane, size)
        }
        Extent::Span(span) => format!(
            "{}-R{}-R{}-{}",
            SITE_PREFIX,
            topology.rack_id(span.first())?,
            topology.rack_id(span.last())?,
            size
        ),
    };
    Ok(PartitionName(name))
}
