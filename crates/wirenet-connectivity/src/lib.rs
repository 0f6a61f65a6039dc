// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # wirenet-connectivity
//!
//! Message connectivity between collections of a simulation model.
//!
//! This crate provides:
//! - **Containers**: `SimpleContainer` (one pair), `OneToOneContainer` (identity)
//!   and `Many2ManyContainer` (arbitrary sparse wiring with auxiliary indices)
//! - **Trait** `ConnectionContainer`: the read contract the dispatch subsystem
//!   uses to route messages
//! - **Traversal handles**: forward and reverse cursors with `flip`
//! - **ConnectionTable**: per-model registry keyed by wiring endpoints
//!
//! ## Features
//! - `serde` (default): snapshot types for containers and tables
//!
//! ## Usage
//!
//! ```rust
//! use wirenet_connectivity::{
//!     ConnectionContainer, Direction, ElementInfo, Many2ManyContainer, MsgSlot,
//! };
//!
//! let a = ElementInfo::new(1, 3);
//! let b = ElementInfo::new(2, 2);
//! let container = Many2ManyContainer::new(&a, &b, MsgSlot(0), MsgSlot(0), 1, 0)?;
//!
//! let mut forward = container.traversal(1, Direction::Forward)?;
//! let peer = forward.next().expect("one peer");
//! assert_eq!((peer.entry, peer.aux), (0, 0));
//!
//! let reverse = forward.flip()?;
//! assert!(reverse.peers().contains(1));
//! # Ok::<(), wirenet_connectivity::ConnectivityError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod connectivity;
pub mod container;
pub mod error;
pub mod ids;
pub mod many2many;
pub mod one2one;
pub mod simple;
pub mod table;
pub mod traversal;

pub use connectivity::{Connectivity, SerializableConnectivity};
pub use container::{wired_pairs, ConnectionContainer, ConnectionKind, Direction, Peer, Peers};
pub use error::{ConnectivityError, Result};
pub use ids::{Collection, ElementId, ElementInfo, Endpoints, MsgSlot, Side};
pub use many2many::{Many2ManyContainer, MergeOutcome};
pub use one2one::OneToOneContainer;
pub use simple::SimpleContainer;
pub use table::{ConnectOutcome, ConnectionTable, SerializableConnectionTable, WireKey};
pub use traversal::Traversal;

pub use wirenet_config::{ConnectivityConfig, MergePolicy};
