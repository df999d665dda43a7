//! Rack numbering.
//!
//! Racks are enumerated row-major: index `r` lives in group `r / group_size`
//! at offset `r % group_size`, and its id is `group * 10 + offset`. Ids are
//! strictly increasing along the enumeration but leave gaps wherever a group
//! holds fewer than ten racks.

use crate::{
    Result, TopologyError, GROUP_STRIDE, MAX_GROUPS, MAX_GROUP_SIZE, MIRA_RACK_COUNT,
};

/// A two-digit rack identifier such as `R00` or `R57`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8"))]
pub struct RackId(u8);

impl TryFrom<u8> for RackId {
    type Error = TopologyError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RackId> for u8 {
    fn from(value: RackId) -> Self {
        value.0
    }
}

impl RackId {
    /// Create a rack id, rejecting anything that is not two digits with a
    /// valid offset.
    pub fn new(id: u8) -> Result<Self> {
        if id >= GROUP_STRIDE * MAX_GROUPS {
            return Err(TopologyError::RackIdOutOfRange(id));
        }
        let rack = Self(id);
        if rack.offset() >= MAX_GROUP_SIZE {
            return Err(TopologyError::RackOffsetOutOfRange { id, offset: rack.offset() });
        }
        Ok(rack)
    }

    /// Raw numeric id.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Row the rack sits in.
    #[inline]
    pub const fn group(&self) -> u8 {
        self.0 / GROUP_STRIDE
    }

    /// Position within the row.
    #[inline]
    pub const fn offset(&self) -> u8 {
        self.0 % GROUP_STRIDE
    }
}

impl std::fmt::Display for RackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A rack together with its enumeration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rack {
    /// Position in the enumeration order
    pub index: usize,
    /// Physical id
    pub id: RackId,
}

/// Rack id at enumeration index `index` for groups of `group_size` racks.
///
/// Fails for a group size outside 1..=8 or an index past the last
/// two-digit group.
pub fn rack_id_for_index(index: usize, group_size: u8) -> Result<RackId> {
    if group_size == 0 || group_size > MAX_GROUP_SIZE {
        return Err(TopologyError::GroupSize(group_size));
    }
    let size = group_size as usize;
    let group = index / size;
    if group >= MAX_GROUPS as usize {
        return Err(TopologyError::IndexOutOfRange {
            index,
            len: MAX_GROUPS as usize * size,
        });
    }
    Ok(RackId((group * GROUP_STRIDE as usize + index % size) as u8))
}

/// The two parameters of the rack numbering formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologyConfig {
    /// Number of rack rows
    pub group_count: u8,
    /// Racks per row
    pub group_size: u8,
}

impl TopologyConfig {
    /// The production machine: 6 rows of 8 racks.
    pub const MIRA: Self = Self {
        group_count: 6,
        group_size: 8,
    };

    /// Total racks described by this configuration.
    pub const fn rack_count(&self) -> usize {
        self.group_count as usize * self.group_size as usize
    }

    /// Check the configuration fits the two-digit id scheme.
    pub fn validate(&self) -> Result<()> {
        if self.group_count == 0 || self.group_count > MAX_GROUPS {
            return Err(TopologyError::GroupCount(self.group_count));
        }
        if self.group_size == 0 || self.group_size > MAX_GROUP_SIZE {
            return Err(TopologyError::GroupSize(self.group_size));
        }
        Ok(())
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self::MIRA
    }
}

/// Ordered, validated sequence of rack ids.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RackList"))]
pub struct RackTopology {
    racks: Vec<RackId>,
}

/// Unchecked wire form of [`RackTopology`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RackList {
    racks: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RackList> for RackTopology {
    type Error = TopologyError;

    fn try_from(list: RackList) -> Result<Self> {
        Self::from_ids(list.racks)
    }
}

impl RackTopology {
    /// Generate the rack sequence from a configuration.
    pub fn new(config: TopologyConfig) -> Result<Self> {
        config.validate()?;
        let racks = (0..config.rack_count())
            .map(|index| rack_id_for_index(index, config.group_size))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { racks })
    }

    /// The production 48-rack machine.
    pub fn mira() -> Result<Self> {
        let topology = Self::new(TopologyConfig::MIRA)?;
        if topology.len() != MIRA_RACK_COUNT {
            return Err(TopologyError::RackCount {
                expected: MIRA_RACK_COUNT,
                actual: topology.len(),
            });
        }
        Ok(topology)
    }

    /// Build a topology from an explicit list of ids.
    ///
    /// The ids must be non-empty, strictly increasing and individually valid.
    pub fn from_ids<I>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = u8>,
    {
        let racks = ids
            .into_iter()
            .map(RackId::new)
            .collect::<Result<Vec<_>>>()?;

        if racks.is_empty() {
            return Err(TopologyError::EmptyTopology);
        }
        for (index, pair) in racks.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                return Err(TopologyError::RackOrder {
                    index: index + 1,
                    prev: pair[0].value(),
                    next: pair[1].value(),
                });
            }
        }
        Ok(Self { racks })
    }

    /// Number of racks.
    #[inline]
    pub fn len(&self) -> usize {
        self.racks.len()
    }

    /// Never true for a validated topology.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.racks.is_empty()
    }

    /// Rack id at an enumeration index.
    pub fn rack_id(&self, index: usize) -> Result<RackId> {
        self.racks
            .get(index)
            .copied()
            .ok_or(TopologyError::IndexOutOfRange { index, len: self.len() })
    }

    /// Rack at an enumeration index.
    pub fn rack(&self, index: usize) -> Result<Rack> {
        self.rack_id(index).map(|id| Rack { index, id })
    }

    /// Enumeration index of a rack id, if present.
    pub fn index_of(&self, id: RackId) -> Option<usize> {
        self.racks.binary_search(&id).ok()
    }

    /// All ids in enumeration order.
    pub fn ids(&self) -> &[RackId] {
        &self.racks
    }

    /// All racks in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = Rack> + '_ {
        self.racks
            .iter()
            .enumerate()
            .map(|(index, &id)| Rack { index, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIRA_IDS: [u8; 48] = [
        0, 1, 2, 3, 4, 5, 6, 7, 10, 11, 12, 13, 14, 15, 16, 17, 20, 21, 22, 23, 24, 25, 26, 27,
        30, 31, 32, 33, 34, 35, 36, 37, 40, 41, 42, 43, 44, 45, 46, 47, 50, 51, 52, 53, 54, 55,
        56, 57,
    ];

    #[test]
    fn mira_matches_rack_inventory() {
        let topology = RackTopology::mira().unwrap();
        let ids: Vec<u8> = topology.ids().iter().map(RackId::value).collect();
        assert_eq!(ids, MIRA_IDS);
        assert_eq!(topology, RackTopology::from_ids(MIRA_IDS).unwrap());
    }

    #[test]
    fn formula_skips_unused_offsets() {
        let id = |index| rack_id_for_index(index, 8).unwrap().value();
        assert_eq!(id(0), 0);
        assert_eq!(id(7), 7);
        assert_eq!(id(8), 10);
        assert_eq!(id(15), 17);
        assert_eq!(id(16), 20);
        assert_eq!(id(47), 57);
    }

    #[test]
    fn formula_rejects_bad_inputs() {
        assert_eq!(rack_id_for_index(0, 0), Err(TopologyError::GroupSize(0)));
        assert_eq!(rack_id_for_index(3, 9), Err(TopologyError::GroupSize(9)));
        assert_eq!(
            rack_id_for_index(80, 8),
            Err(TopologyError::IndexOutOfRange { index: 80, len: 80 })
        );
        assert_eq!(
            rack_id_for_index(usize::MAX, 1),
            Err(TopologyError::IndexOutOfRange { index: usize::MAX, len: 10 })
        );
        assert_eq!(rack_id_for_index(79, 8).unwrap().value(), 97);
    }

    #[test]
    fn try_from_u8_validates() {
        assert_eq!(RackId::try_from(27).map(u8::from), Ok(27));
        assert_eq!(RackId::try_from(28), Err(TopologyError::RackOffsetOutOfRange { id: 28, offset: 8 }));
    }

    #[test]
    fn ids_strictly_increase() {
        let topology = RackTopology::mira().unwrap();
        for pair in topology.ids().windows(2) {
            assert!(pair[0] < pair[1], "{} not before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn group_and_offset() {
        let id = RackId::new(36).unwrap();
        assert_eq!(id.group(), 3);
        assert_eq!(id.offset(), 6);
        assert_eq!(id.to_string(), "36");
        assert_eq!(RackId::new(4).unwrap().to_string(), "04");
    }

    #[test]
    fn rejects_invalid_ids() {
        assert_eq!(RackId::new(100), Err(TopologyError::RackIdOutOfRange(100)));
        assert_eq!(
            RackId::new(18),
            Err(TopologyError::RackOffsetOutOfRange { id: 18, offset: 8 })
        );
        assert_eq!(
            RackId::new(9),
            Err(TopologyError::RackOffsetOutOfRange { id: 9, offset: 9 })
        );
    }

    #[test]
    fn rejects_invalid_configs() {
        let config = TopologyConfig { group_count: 6, group_size: 9 };
        assert_eq!(RackTopology::new(config), Err(TopologyError::GroupSize(9)));

        let config = TopologyConfig { group_count: 0, group_size: 8 };
        assert_eq!(RackTopology::new(config), Err(TopologyError::GroupCount(0)));

        let config = TopologyConfig { group_count: 11, group_size: 8 };
        assert_eq!(RackTopology::new(config), Err(TopologyError::GroupCount(11)));
    }

    #[test]
    fn smaller_machine_is_valid() {
        let topology = RackTopology::new(TopologyConfig { group_count: 2, group_size: 4 }).unwrap();
        let ids: Vec<u8> = topology.ids().iter().map(RackId::value).collect();
        assert_eq!(ids, [0, 1, 2, 3, 10, 11, 12, 13]);
    }

    #[test]
    fn from_ids_rejects_bad_order() {
        assert_eq!(
            RackTopology::from_ids([0, 1, 1]),
            Err(TopologyError::RackOrder { index: 2, prev: 1, next: 1 })
        );
        assert_eq!(
            RackTopology::from_ids([10, 2]),
            Err(TopologyError::RackOrder { index: 1, prev: 10, next: 2 })
        );
        assert_eq!(RackTopology::from_ids(Vec::new()), Err(TopologyError::EmptyTopology));
    }

    #[test]
    fn index_lookup() {
        let topology = RackTopology::mira().unwrap();
        assert_eq!(topology.index_of(RackId::new(10).unwrap()), Some(8));
        assert_eq!(topology.index_of(RackId::new(57).unwrap()), Some(47));
        assert_eq!(
            topology.rack_id(48),
            Err(TopologyError::IndexOutOfRange { index: 48, len: 48 })
        );

        let rack = topology.rack(9).unwrap();
        assert_eq!(rack.index, 9);
        assert_eq!(rack.id.value(), 11);
    }

    #[test]
    fn iter_pairs_index_and_id() {
        let topology = RackTopology::mira().unwrap();
        for rack in topology.iter() {
            assert_eq!(Ok(rack.id), rack_id_for_index(rack.index, 8));
        }
        assert_eq!(topology.iter().count(), 48);
    }
}
