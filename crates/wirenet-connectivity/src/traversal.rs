// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Traversal handles
//!
//! A [`Traversal`] is a value-typed cursor over the peers of one entry in
//! one direction. It borrows the container it walks, so it cannot outlive it
//! and the container cannot be mutated while it exists. Dropping it is the
//! only cleanup.

use crate::container::{ConnectionContainer, ConnectionKind, Direction, Peer, Peers};
use crate::error::{ConnectivityError, Result};
use crate::ids::Endpoints;

/// Read-only cursor over one row (forward) or one column (reverse)
#[derive(Debug, Clone)]
pub struct Traversal<'a> {
    container: &'a dyn ConnectionContainer,
    bound_entry: u32,
    direction: Direction,
    peers: Peers<'a>,
    position: usize,
}

impl<'a> Traversal<'a> {
    /// Bind a cursor to `entry` of `container`
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if `entry` is outside the dimension of the bound side.
    pub fn open(
        container: &'a dyn ConnectionContainer,
        entry: u32,
        direction: Direction,
    ) -> Result<Self> {
        let peers = match direction {
            Direction::Forward => container.row(entry)?,
            Direction::Reverse => container.column(entry)?,
        };
        Ok(Self {
            container,
            bound_entry: entry,
            direction,
            peers,
            position: 0,
        })
    }

    /// Entry whose peers this cursor enumerates
    pub fn bound_entry(&self) -> u32 {
        self.bound_entry
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn kind(&self) -> ConnectionKind {
        self.container.kind()
    }

    pub fn endpoints(&self) -> &Endpoints {
        self.container.endpoints()
    }

    /// Full peer set, independent of the cursor position
    pub fn peers(&self) -> &Peers<'a> {
        &self.peers
    }

    /// Peer most recently produced by `next`
    pub fn current(&self) -> Option<Peer> {
        self.position
            .checked_sub(1)
            .and_then(|position| self.peers.get(position))
    }

    /// Peers not yet produced
    pub fn remaining(&self) -> usize {
        self.peers.count().saturating_sub(self.position)
    }

    /// Move the cursor back before the first peer
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Cursor in the opposite direction, bound to the current peer
    ///
    /// From a forward cursor positioned on destination `j`, this walks the
    /// sources reaching `j` in the same container (and the converse for a
    /// reverse cursor).
    ///
    /// # Errors
    ///
    /// `FlipBeforeAdvance` if `next` has not produced a peer yet.
    pub fn flip(&self) -> Result<Traversal<'a>> {
        let peer = self.current().ok_or(ConnectivityError::FlipBeforeAdvance)?;
        Traversal::open(self.container, peer.entry, self.direction.reversed())
    }
}

impl Iterator for Traversal<'_> {
    type Item = Peer;

    fn next(&mut self) -> Option<Peer> {
        let peer = self.peers.get(self.position)?;
        self.position += 1;
        Some(peer)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Traversal<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ElementInfo, MsgSlot};
    use crate::many2many::Many2ManyContainer;
    use wirenet_config::MergePolicy;

    fn container() -> Many2ManyContainer {
        let a = ElementInfo::new(1, 4);
        let b = ElementInfo::new(2, 3);
        let mut container =
            Many2ManyContainer::new(&a, &b, MsgSlot(0), MsgSlot(1), 0, 2).unwrap();
        container.add(0, 0, MergePolicy::KeepExisting).unwrap();
        container.add(3, 2, MergePolicy::KeepExisting).unwrap();
        container.add(1, 2, MergePolicy::KeepExisting).unwrap();
        container
    }

    #[test]
    fn test_forward_enumerates_row() {
        let container = container();
        let traversal = container.traversal(0, Direction::Forward).unwrap();
        assert_eq!(traversal.len(), 2);
        let entries: Vec<u32> = traversal.map(|peer| peer.entry).collect();
        assert_eq!(entries, vec![0, 2]);
    }

    #[test]
    fn test_reverse_enumerates_column() {
        let container = container();
        let entries: Vec<u32> = container
            .traversal(2, Direction::Reverse)
            .unwrap()
            .map(|peer| peer.entry)
            .collect();
        assert_eq!(entries, vec![0, 1, 3]);
    }

    #[test]
    fn test_empty_traversal_is_valid() {
        let container = container();
        let mut traversal = container.traversal(2, Direction::Forward).unwrap();
        assert_eq!(traversal.remaining(), 0);
        assert_eq!(traversal.next(), None);
        assert_eq!(traversal.current(), None);
    }

    #[test]
    fn test_out_of_range_entry_rejected() {
        let container = container();
        assert!(matches!(
            container.traversal(4, Direction::Forward),
            Err(ConnectivityError::InvalidIndex { entry: 4, bound: 4, .. })
        ));
        assert!(matches!(
            container.traversal(3, Direction::Reverse),
            Err(ConnectivityError::InvalidIndex { entry: 3, bound: 3, .. })
        ));
    }

    #[test]
    fn test_flip_before_advance() {
        let container = container();
        let traversal = container.traversal(0, Direction::Forward).unwrap();
        assert_eq!(
            traversal.flip().unwrap_err(),
            ConnectivityError::FlipBeforeAdvance
        );
    }

    #[test]
    fn test_flip_binds_current_peer() {
        let container = container();
        let mut forward = container.traversal(1, Direction::Forward).unwrap();
        assert_eq!(forward.next().map(|peer| peer.entry), Some(2));

        let reverse = forward.flip().unwrap();
        assert_eq!(reverse.direction(), Direction::Reverse);
        assert_eq!(reverse.bound_entry(), 2);
        assert!(reverse.peers().contains(1));
        assert_eq!(reverse.endpoints(), container.endpoints());
    }

    #[test]
    fn test_flip_back_to_forward() {
        let container = container();
        let mut reverse = container.traversal(0, Direction::Reverse).unwrap();
        let source = reverse.next().unwrap();
        let forward = reverse.flip().unwrap();
        assert_eq!(forward.direction(), Direction::Forward);
        assert_eq!(forward.bound_entry(), source.entry);
        assert!(forward.peers().contains(0));
    }

    #[test]
    fn test_rewind() {
        let container = container();
        let mut traversal = container.traversal(2, Direction::Reverse).unwrap();
        assert_eq!(traversal.by_ref().count(), 3);
        traversal.rewind();
        assert_eq!(traversal.remaining(), 3);
        assert_eq!(traversal.next().map(|peer| peer.entry), Some(0));
    }
}
