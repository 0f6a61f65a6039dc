// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! One-to-one connection container
//!
//! Entry `i` of the source wired to entry `i` of the destination for every
//! `i`. Nothing is stored per pair.

use crate::connectivity::Connectivity;
use crate::container::{check_copy_target, ConnectionContainer, ConnectionKind, Direction, Peers};
use crate::error::{check_entry, ConnectivityError, Result};
use crate::ids::{Collection, Endpoints, MsgSlot, Side};
use crate::traversal::Traversal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneToOneContainer {
    endpoints: Endpoints,
    num_entries: u32,
}

impl OneToOneContainer {
    /// # Errors
    ///
    /// `DimensionMismatch` if the collections have different entry counts.
    pub fn new(
        source: &dyn Collection,
        dest: &dyn Collection,
        source_slot: MsgSlot,
        dest_slot: MsgSlot,
    ) -> Result<Self> {
        let (source_entries, dest_entries) = (source.num_entries(), dest.num_entries());
        if source_entries != dest_entries {
            return Err(ConnectivityError::DimensionMismatch {
                source_entries,
                dest_entries,
            });
        }
        Ok(Self {
            endpoints: Endpoints::new(source.id(), dest.id(), source_slot, dest_slot),
            num_entries: source_entries,
        })
    }

    pub(crate) fn from_parts(endpoints: Endpoints, num_entries: u32) -> Self {
        Self {
            endpoints,
            num_entries,
        }
    }

    fn identity(&self, side: Side, entry: u32) -> Result<Peers<'static>> {
        check_entry(side, entry, self.num_entries)?;
        Ok(Peers::owned(vec![entry], vec![entry]))
    }
}

impl ConnectionContainer for OneToOneContainer {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::OneToOne
    }

    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.num_entries, self.num_entries)
    }

    fn num_connections(&self) -> usize {
        self.num_entries as usize
    }

    fn row(&self, source_entry: u32) -> Result<Peers<'_>> {
        self.identity(Side::Source, source_entry)
    }

    fn column(&self, dest_entry: u32) -> Result<Peers<'_>> {
        self.identity(Side::Dest, dest_entry)
    }

    fn traversal(&self, entry: u32, direction: Direction) -> Result<Traversal<'_>> {
        Traversal::open(self, entry, direction)
    }

    fn single_traversal(
        &self,
        entry: u32,
        direction: Direction,
        connection_slot: u32,
    ) -> Result<Option<Traversal<'_>>> {
        if connection_slot != 0 {
            return Ok(None);
        }
        Traversal::open(self, entry, direction).map(Some)
    }

    fn copy(&self, new_source: &dyn Collection, new_dest: &dyn Collection) -> Result<Connectivity> {
        check_copy_target(self.dimensions(), new_source, new_dest)?;
        Ok(Connectivity::OneToOne(Self::from_parts(
            self.endpoints.rebind(new_source.id(), new_dest.id()),
            self.num_entries,
        )))
    }
}
