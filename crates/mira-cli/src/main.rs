//! mira-partitions binary
//!
//! Writes the partition list for the 48-rack Mira machine to stdout.
//! Takes no arguments. Diagnostics go to stderr, filtered by `RUST_LOG`.

use std::io::{self, BufWriter, Write};

use mira_partlist::{PartitionList, RenderStyle};
use mira_topology::RackTopology;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "mira_partitions=info,mira_partlist=info,mira_topology=info";

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Fails here, before any output, if the machine constants are inconsistent
    let topology = RackTopology::mira()?;
    let list = PartitionList::build(&topology)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    list.write_to(&mut out, &RenderStyle::legacy())?;
    out.flush()?;

    tracing::info!(partitions = list.len(), "partition list written");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    run().map_err(|e| {
        tracing::error!("failed to write partition list: {}", e);
        e
    })
}
