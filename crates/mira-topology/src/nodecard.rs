//! Node card addressing.
//!
//! A node card is addressed by rack id, midplane and card index, rendered as
//! `R<rack>-M<midplane>-N<card>`. Every address set produced here is ordered
//! by rack enumeration index, then midplane, then card.

use std::ops::RangeInclusive;

use crate::{RackId, RackTopology, Result, TopologyError, MIDPLANES_PER_RACK, NODE_CARDS_PER_MIDPLANE};

/// One of the two midplanes in a rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8"))]
pub struct Midplane(u8);

impl TryFrom<u8> for Midplane {
    type Error = TopologyError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value).ok_or(TopologyError::MidplaneOutOfRange(value))
    }
}

impl Midplane {
    /// Lower midplane.
    pub const M0: Self = Self(0);

    /// Upper midplane.
    pub const M1: Self = Self(1);

    /// Both midplanes in address order.
    pub const ALL: [Self; MIDPLANES_PER_RACK] = [Self::M0, Self::M1];

    /// Midplane by index, if it exists.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < MIDPLANES_PER_RACK {
            Some(Self(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Midplane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "M{}", self.0)
    }
}

/// Fully-qualified node card address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawNodeCardAddr"))]
pub struct NodeCardAddr {
    /// Rack holding the card
    pub rack: RackId,
    /// Midplane within the rack
    pub midplane: Midplane,
    /// Card index within the midplane (0..16)
    pub node_card: u8,
}

impl NodeCardAddr {
    /// Address a card, rejecting card indices past the end of the midplane.
    pub fn new(rack: RackId, midplane: Midplane, node_card: u8) -> Result<Self> {
        if node_card as usize >= NODE_CARDS_PER_MIDPLANE {
            return Err(TopologyError::NodeCardOutOfRange(node_card));
        }
        Ok(Self { rack, midplane, node_card })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawNodeCardAddr {
    rack: RackId,
    midplane: Midplane,
    node_card: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawNodeCardAddr> for NodeCardAddr {
    type Error = TopologyError;

    fn try_from(raw: RawNodeCardAddr) -> Result<Self> {
        Self::new(raw.rack, raw.midplane, raw.node_card)
    }
}

impl std::fmt::Display for NodeCardAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}-{}-N{:02}", self.rack, self.midplane, self.node_card)
    }
}

/// An inclusive run of racks by enumeration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRackSpan"))]
pub struct RackSpan {
    first: usize,
    last: usize,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRackSpan {
    first: usize,
    last: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRackSpan> for RackSpan {
    type Error = TopologyError;

    fn try_from(raw: RawRackSpan) -> Result<Self> {
        Self::new(raw.first, raw.last).ok_or(TopologyError::ReversedSpan {
            first: raw.first,
            last: raw.last,
        })
    }
}

impl RackSpan {
    /// Span from `first` through `last`, or `None` if `first > last`.
    pub const fn new(first: usize, last: usize) -> Option<Self> {
        if first <= last {
            Some(Self { first, last })
        } else {
            None
        }
    }

    /// A span covering one rack.
    pub const fn single(index: usize) -> Self {
        Self { first: index, last: index }
    }

    #[inline]
    pub const fn first(&self) -> usize {
        self.first
    }

    #[inline]
    pub const fn last(&self) -> usize {
        self.last
    }

    /// Number of racks in the span (never zero).
    #[inline]
    pub const fn len(&self) -> usize {
        self.last - self.first + 1
    }

    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        self.first <= index && index <= self.last
    }

    /// Whether every rack of `other` lies in this span.
    #[inline]
    pub const fn covers(&self, other: &RackSpan) -> bool {
        self.first <= other.first && other.last <= self.last
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// The 16 cards of one midplane, in card order.
pub fn midplane_cards(
    rack: RackId,
    midplane: Midplane,
) -> impl Iterator<Item = NodeCardAddr> + Clone {
    (0..NODE_CARDS_PER_MIDPLANE as u8).map(move |node_card| NodeCardAddr {
        rack,
        midplane,
        node_card,
    })
}

/// The 32 cards of one rack: midplane 0 then midplane 1.
pub fn rack_cards(rack: RackId) -> impl Iterator<Item = NodeCardAddr> + Clone {
    Midplane::ALL
        .into_iter()
        .flat_map(move |midplane| midplane_cards(rack, midplane))
}

/// The cards of every rack in `span`, in enumeration order.
///
/// Fails if the span runs past the end of the topology.
pub fn span_cards(
    topology: &RackTopology,
    span: RackSpan,
) -> Result<impl Iterator<Item = NodeCardAddr> + Clone + '_> {
    if span.last() >= topology.len() {
        return Err(TopologyError::IndexOutOfRange {
            index: span.last(),
            len: topology.len(),
        });
    }
    Ok(topology.ids()[span.indices()]
        .iter()
        .flat_map(|&rack| rack_cards(rack)))
}
