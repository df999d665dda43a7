//! Error types for mira-topology.

use thiserror::Error;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Configuration-integrity failures.
///
/// None of these are reachable with [`TopologyConfig::MIRA`](crate::TopologyConfig::MIRA);
/// they exist so a change to the machine constants fails at startup instead
/// of producing malformed partitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// The topology would contain no racks.
    #[error("topology contains no racks")]
    EmptyTopology,

    /// Group count does not fit the two-digit rack id scheme.
    #[error("group count {0} out of range (expected 1..={max})", max = crate::MAX_GROUPS)]
    GroupCount(u8),

    /// Group size would produce rack offsets above the highest valid offset.
    #[error("group size {0} out of range (expected 1..={max})", max = crate::MAX_GROUP_SIZE)]
    GroupSize(u8),

    /// A rack id does not fit in two digits.
    #[error("rack id {0} does not fit in two digits")]
    RackIdOutOfRange(u8),

    /// A rack id names an offset that does not exist within its group.
    #[error("rack id {id:02} has offset {offset} (highest valid offset is {max})", max = crate::MAX_GROUP_SIZE - 1)]
    RackOffsetOutOfRange { id: u8, offset: u8 },

    /// Rack ids must be strictly increasing in enumeration order.
    #[error("rack id {next:02} at index {index} does not follow {prev:02}")]
    RackOrder { index: usize, prev: u8, next: u8 },

    /// The machine does not have the expected number of racks.
    #[error("expected {expected} racks, topology has {actual}")]
    RackCount { expected: usize, actual: usize },

    /// A rack has no midplane with this index.
    #[error("midplane {0} out of range (expected 0..{max})", max = crate::MIDPLANES_PER_RACK)]
    MidplaneOutOfRange(u8),

    /// A midplane has no node card with this index.
    #[error("node card {0} out of range (expected 0..{max})", max = crate::NODE_CARDS_PER_MIDPLANE)]
    NodeCardOutOfRange(u8),

    /// A span whose first rack comes after its last.
    #[error("rack span {first}..={last} is reversed")]
    ReversedSpan { first: usize, last: usize },

    /// An enumeration index past the end of the topology.
    #[error("rack index {index} out of range for {len} racks")]
    IndexOutOfRange { index: usize, len: usize },
}
