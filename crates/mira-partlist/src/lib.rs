//! Mira Partition List
//!
//! Enumerates every allocatable partition of the Mira machine and renders
//! the set as a `<BG><PartitionList>` document for the scheduler.
//!
//! # Architecture
//!
//! - **Partition**: enumeration order, naming and membership
//! - **Document**: tag tree and its text rendering
//!
//! # Example
//!
//! ```no_run
//! use mira_partlist::{PartitionList, RenderStyle};
//!
//! fn main() -> Result<(), mira_partlist::Error> {
//!     let list = PartitionList::mira()?;
//!     let stdout = std::io::stdout();
//!     list.write_to(&mut stdout.lock(), &RenderStyle::legacy())?;
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod error;
pub mod partition;

pub use document::{render_to_string, write_document, Element, Quote, RenderStyle};
pub use error::{Error, Result};
pub use partition::{
    extents, Partition, PartitionList, BG_TAG, NODE_CARD_TAG, PARTITION_LIST_TAG, PARTITION_TAG,
};
