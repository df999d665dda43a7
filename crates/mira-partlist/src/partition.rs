//! Partition enumeration.
//!
//! For each rack index `r` in ascending order the list holds:
//!
//! 1. the full rack `r`,
//! 2. midplane 0 then midplane 1 of rack `r`,
//! 3. every span ending at `r`, narrowest first (`r-1..=r` down to `0..=r`).
//!
//! Rack `r` therefore contributes `3 + r` partitions; the 48-rack machine
//! has `48 + 96 + 1128 = 1272`.

use std::collections::HashMap;
use std::io::Write;

use mira_topology::{
    partition_name, Extent, Midplane, NodeCardAddr, PartitionName, RackSpan, RackTopology,
};
use tracing::{debug, info};

use crate::document::{write_document, Element, RenderStyle};
use crate::{Error, Result};

/// Root tag of the document.
pub const BG_TAG: &str = "BG";
/// Container of all partitions.
pub const PARTITION_LIST_TAG: &str = "PartitionList";
/// One partition, carrying a `name` attribute.
pub const PARTITION_TAG: &str = "Partition";
/// One node card, carrying an `id` attribute.
pub const NODE_CARD_TAG: &str = "NodeCard";

/// Extents of every partition in emission order.
pub fn extents(topology: &RackTopology) -> impl Iterator<Item = Extent> + '_ {
    (0..topology.len()).flat_map(|last| {
        let rack = std::iter::once(Extent::Rack(last));
        let halves = Midplane::ALL
            .into_iter()
            .map(move |midplane| Extent::Midplane(last, midplane));
        let spans = (0..last)
            .rev()
            .filter_map(move |first| RackSpan::new(first, last))
            .map(Extent::Span);
        rack.chain(halves).chain(spans)
    })
}

/// A named set of node cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    name: PartitionName,
    extent: Extent,
    node_cards: Vec<NodeCardAddr>,
}

impl Partition {
    /// Resolve the name and members of `extent`.
    pub fn new(topology: &RackTopology, extent: Extent) -> Result<Self> {
        Ok(Self {
            name: partition_name(topology, &extent)?,
            node_cards: extent.node_cards(topology)?,
            extent,
        })
    }

    pub fn name(&self) -> &PartitionName {
        &self.name
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    /// Members in rack, midplane, card order.
    pub fn node_cards(&self) -> &[NodeCardAddr] {
        &self.node_cards
    }

    /// Compute nodes in the partition.
    pub fn size(&self) -> usize {
        self.extent.size()
    }

    /// Whether `other` is a sub-partition of this one (or the same one).
    pub fn contains(&self, other: &Partition) -> bool {
        self.extent.contains(&other.extent)
    }

    /// `<Partition name=…>` with one `<NodeCard id=…/>` per member.
    pub fn to_element(&self) -> Element {
        Element::new(PARTITION_TAG)
            .with_attr("name", self.name.as_str())
            .with_children(
                self.node_cards
                    .iter()
                    .map(|card| Element::new(NODE_CARD_TAG).with_attr("id", card.to_string())),
            )
    }
}

/// Every partition of a topology in emission order.
#[derive(Debug, Clone)]
pub struct PartitionList {
    partitions: Vec<Partition>,
    by_name: HashMap<PartitionName, usize>,
}

impl PartitionList {
    /// Enumerate all partitions of `topology`.
    pub fn build(topology: &RackTopology) -> Result<Self> {
        let mut partitions = Vec::new();
        let mut by_name = HashMap::new();

        for extent in extents(topology) {
            if let Extent::Rack(index) = extent {
                let rack = topology.rack_id(index)?;
                debug!(%rack, index, "enumerating rack");
            }
            let partition = Partition::new(topology, extent)?;
            if by_name
                .insert(partition.name.clone(), partitions.len())
                .is_some()
            {
                return Err(Error::DuplicateName(partition.name.to_string()));
            }
            partitions.push(partition);
        }

        let list = Self { partitions, by_name };
        info!(
            racks = topology.len(),
            partitions = list.len(),
            node_cards = list.node_card_total(),
            "partition list built"
        );
        Ok(list)
    }

    /// The production 48-rack machine.
    pub fn mira() -> Result<Self> {
        Self::build(&RackTopology::mira()?)
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Partition> {
        self.partitions.iter()
    }

    /// Look a partition up by name.
    pub fn get(&self, name: &str) -> Option<&Partition> {
        self.by_name.get(name).map(|&i| &self.partitions[i])
    }

    /// Every partition strictly inside `name`, in emission order.
    ///
    /// `None` if no partition has that name.
    pub fn children_of(&self, name: &str) -> Option<Vec<&Partition>> {
        let parent = self.get(name)?;
        Some(
            self.partitions
                .iter()
                .filter(|p| p.name != parent.name && parent.contains(p))
                .collect(),
        )
    }

    /// Sum of node card entries over all partitions.
    pub fn node_card_total(&self) -> usize {
        self.partitions.iter().map(|p| p.node_cards.len()).sum()
    }

    /// `<BG><PartitionList>…</PartitionList></BG>`.
    pub fn to_document(&self) -> Element {
        Element::new(BG_TAG).with_child(
            Element::new(PARTITION_LIST_TAG)
                .with_children(self.partitions.iter().map(Partition::to_element)),
        )
    }

    /// Render the document to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W, style: &RenderStyle) -> Result<()> {
        write_document(out, &self.to_document(), style)?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a PartitionList {
    type Item = &'a Partition;
    type IntoIter = std::slice::Iter<'a, Partition>;

    fn into_iter(self) -> Self::IntoIter {
        self.partitions.iter()
    }
}
