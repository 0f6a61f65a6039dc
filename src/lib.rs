// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # wirenet - Sparse Message Connectivity
//!
//! Storage and traversal of the wiring between collections of a simulation
//! model. A message dispatch subsystem asks a connection container, for an
//! entry on one side, which entries on the other side it reaches.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! wirenet = "0.1"  # Default: serde snapshots + observability
//! ```
//!
//! ## Feature Flags
//!
//! - **`serde`** (default): snapshot types for containers, tables and sparse stores
//! - **`observability`** (default): `init_logging` and `--debug-{crate}` flags
//! - **`file-logging`**: rolling log files on top of `observability`
//!
//! ## Usage
//!
//! ```rust
//! use wirenet::prelude::*;
//!
//! let a = ElementInfo::new(1, 3);
//! let b = ElementInfo::new(2, 2);
//!
//! let mut table = ConnectionTable::new(&ConnectivityConfig::default());
//! table.connect(&a, 1, &b, 0, MsgSlot(0), MsgSlot(0))?;
//! table.connect(&a, 2, &b, 0, MsgSlot(0), MsgSlot(0))?;
//!
//! let wiring = table.outgoing(a.id)[0];
//! let sources: Vec<u32> = wiring
//!     .traversal(0, Direction::Reverse)?
//!     .map(|peer| peer.entry)
//!     .collect();
//! assert_eq!(sources, vec![1, 2]);
//! # Ok::<(), ConnectivityError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: wirenet-config, wirenet-sparse             │
//! │  (Settings, compressed-row adjacency store)             │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Connectivity: wirenet-connectivity                     │
//! │  (Containers, traversal handles, connection table)      │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: wirenet-observability                  │
//! │  (Logging initialization, per-crate debug flags)        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use wirenet_config as config;
pub use wirenet_sparse as sparse;

// Re-export connectivity
pub use wirenet_connectivity as connectivity;

// Re-export infrastructure
#[cfg(feature = "observability")]
pub use wirenet_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::connectivity::{
        Collection, ConnectOutcome, ConnectionContainer, ConnectionKind, ConnectionTable,
        Connectivity, ConnectivityError, Direction, ElementId, ElementInfo, Endpoints,
        Many2ManyContainer, MergeOutcome, MsgSlot, OneToOneContainer, Peer, Peers,
        SimpleContainer, Traversal,
    };
    pub use crate::config::{ConnectivityConfig, MergePolicy, WirenetConfig};
    pub use crate::sparse::SparseMatrix;

    #[cfg(feature = "observability")]
    pub use crate::observability::{init_logging, parse_debug_flags, CrateDebugFlags};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let info = ElementInfo::new(0, 1);
        assert_eq!(info.id(), ElementId(0));
    }
}
