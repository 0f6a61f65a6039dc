// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Connection container abstraction
//!
//! Every relation kind (simple, one-to-one, many-to-many) answers the same
//! questions through [`ConnectionContainer`]: which peers does an entry have
//! in a given direction, and how is the relation rebuilt for cloned
//! collections. The dispatch subsystem uses the trait (usually through the
//! [`Connectivity`](crate::Connectivity) enum) and never the concrete types.

use crate::connectivity::Connectivity;
use crate::error::{ConnectivityError, Result};
use crate::ids::{Collection, Endpoints};
use crate::traversal::Traversal;
use core::fmt;
use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Traversal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Source entry -> destination entries (one row)
    Forward,
    /// Destination entry -> source entries (one column)
    Reverse,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    pub fn is_reverse(self) -> bool {
        self == Direction::Reverse
    }
}

/// Relation kind of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConnectionKind {
    Simple,
    OneToOne,
    ManyToMany,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Simple => write!(f, "simple"),
            ConnectionKind::OneToOne => write!(f, "one-to-one"),
            ConnectionKind::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

/// One peer produced by a lookup or traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Peer {
    /// Peer entry index (destination for forward, source for reverse)
    pub entry: u32,
    /// Auxiliary destination index stored with the wiring
    pub aux: u32,
}

/// Peers of one entry in one direction, ascending by entry index
///
/// Borrowed from the container when its storage holds them contiguously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peers<'a> {
    entries: Cow<'a, [u32]>,
    aux: Cow<'a, [u32]>,
}

impl<'a> Peers<'a> {
    pub fn borrowed(entries: &'a [u32], aux: &'a [u32]) -> Self {
        debug_assert_eq!(entries.len(), aux.len());
        Self {
            entries: Cow::Borrowed(entries),
            aux: Cow::Borrowed(aux),
        }
    }

    pub fn owned(entries: Vec<u32>, aux: Vec<u32>) -> Self {
        debug_assert_eq!(entries.len(), aux.len());
        Self {
            entries: Cow::Owned(entries),
            aux: Cow::Owned(aux),
        }
    }

    pub fn empty() -> Self {
        Self::borrowed(&[], &[])
    }

    /// Number of peers
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    pub fn aux(&self) -> &[u32] {
        &self.aux
    }

    pub fn get(&self, position: usize) -> Option<Peer> {
        Some(Peer {
            entry: *self.entries.get(position)?,
            aux: *self.aux.get(position)?,
        })
    }

    pub fn contains(&self, entry: u32) -> bool {
        self.entries.binary_search(&entry).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = Peer> + '_ {
        self.entries
            .iter()
            .zip(self.aux.iter())
            .map(|(&entry, &aux)| Peer { entry, aux })
    }

    pub fn into_owned(self) -> Peers<'static> {
        Peers {
            entries: Cow::Owned(self.entries.into_owned()),
            aux: Cow::Owned(self.aux.into_owned()),
        }
    }
}

/// Connectivity relation between two collections
///
/// Implementations are read-only during traversal; mutation goes through
/// the concrete types and needs `&mut`, so no traversal can be alive while
/// the relation changes.
pub trait ConnectionContainer: fmt::Debug + Send + Sync {
    fn kind(&self) -> ConnectionKind;

    /// Collections and message slots this wiring serves
    fn endpoints(&self) -> &Endpoints;

    /// (source entries, destination entries) snapshot taken at construction
    fn dimensions(&self) -> (u32, u32);

    /// Number of wired (source, destination) pairs
    fn num_connections(&self) -> usize;

    /// Destinations reachable from `source_entry`
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if `source_entry` is outside the source dimension.
    fn row(&self, source_entry: u32) -> Result<Peers<'_>>;

    /// Sources reaching `dest_entry`
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if `dest_entry` is outside the destination dimension.
    fn column(&self, dest_entry: u32) -> Result<Peers<'_>>;

    /// Cursor over the peers of `entry` in `direction`
    ///
    /// An entry with no peers yields an empty traversal, not an error.
    fn traversal(&self, entry: u32, direction: Direction) -> Result<Traversal<'_>>;

    /// Cursor over the `connection_slot`-th connection of `entry`
    ///
    /// Returns `Ok(None)` for any slot other than 0.
    fn single_traversal(
        &self,
        entry: u32,
        direction: Direction,
        connection_slot: u32,
    ) -> Result<Option<Traversal<'_>>>;

    /// Same relation bound to two new collections
    ///
    /// # Errors
    ///
    /// `IncompatibleCopyTarget` if the new collections' entry counts differ
    /// from [`dimensions`](Self::dimensions).
    fn copy(&self, new_source: &dyn Collection, new_dest: &dyn Collection) -> Result<Connectivity>;
}

/// Every wired (source, destination, aux) triple, row-major
pub fn wired_pairs(container: &dyn ConnectionContainer) -> Result<Vec<(u32, u32, u32)>> {
    let mut pairs = Vec::with_capacity(container.num_connections());
    for source_entry in 0..container.dimensions().0 {
        pairs.extend(
            container
                .row(source_entry)?
                .iter()
                .map(|peer| (source_entry, peer.entry, peer.aux)),
        );
    }
    Ok(pairs)
}

pub(crate) fn check_copy_target(
    expected: (u32, u32),
    new_source: &dyn Collection,
    new_dest: &dyn Collection,
) -> Result<()> {
    let actual = (new_source.num_entries(), new_dest.num_entries());
    if actual != expected {
        tracing::warn!(
            target: "wirenet-connectivity",
            "Rejected copy onto {} / {}: expected {:?} entries, got {:?}",
            new_source.id(),
            new_dest.id(),
            expected,
            actual
        );
        return Err(ConnectivityError::IncompatibleCopyTarget { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_reversed() {
        assert_eq!(Direction::Forward.reversed(), Direction::Reverse);
        assert_eq!(Direction::Reverse.reversed(), Direction::Forward);
        assert!(Direction::Reverse.is_reverse());
    }

    #[test]
    fn test_peers_accessors() {
        let peers = Peers::owned(vec![1, 4], vec![10, 40]);
        assert_eq!(peers.count(), 2);
        assert!(peers.contains(4));
        assert!(!peers.contains(2));
        assert_eq!(peers.get(1), Some(Peer { entry: 4, aux: 40 }));
        assert_eq!(peers.get(2), None);
        assert_eq!(
            peers.iter().collect::<Vec<_>>(),
            vec![Peer { entry: 1, aux: 10 }, Peer { entry: 4, aux: 40 }]
        );
        assert!(Peers::empty().is_empty());
    }
}
