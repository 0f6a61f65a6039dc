// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Single-pair connection container

use crate::connectivity::Connectivity;
use crate::container::{check_copy_target, ConnectionContainer, ConnectionKind, Direction, Peers};
use crate::error::{check_entry, Result};
use crate::ids::{Collection, Endpoints, MsgSlot, Side};
use crate::traversal::Traversal;
use std::slice;

/// Exactly one wired pair: `source_entry -> dest_entry`, aux `dest_entry`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleContainer {
    endpoints: Endpoints,
    dimensions: (u32, u32),
    source_entry: u32,
    dest_entry: u32,
}

impl SimpleContainer {
    /// # Errors
    ///
    /// `InvalidIndex` if either entry lies outside its collection.
    pub fn new(
        source: &dyn Collection,
        dest: &dyn Collection,
        source_slot: MsgSlot,
        dest_slot: MsgSlot,
        source_entry: u32,
        dest_entry: u32,
    ) -> Result<Self> {
        let dimensions = (source.num_entries(), dest.num_entries());
        check_entry(Side::Source, source_entry, dimensions.0)?;
        check_entry(Side::Dest, dest_entry, dimensions.1)?;
        Ok(Self {
            endpoints: Endpoints::new(source.id(), dest.id(), source_slot, dest_slot),
            dimensions,
            source_entry,
            dest_entry,
        })
    }

    pub(crate) fn from_parts(
        endpoints: Endpoints,
        dimensions: (u32, u32),
        source_entry: u32,
        dest_entry: u32,
    ) -> Result<Self> {
        check_entry(Side::Source, source_entry, dimensions.0)?;
        check_entry(Side::Dest, dest_entry, dimensions.1)?;
        Ok(Self {
            endpoints,
            dimensions,
            source_entry,
            dest_entry,
        })
    }

    pub fn source_entry(&self) -> u32 {
        self.source_entry
    }

    pub fn dest_entry(&self) -> u32 {
        self.dest_entry
    }
}

impl ConnectionContainer for SimpleContainer {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::Simple
    }

    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    fn num_connections(&self) -> usize {
        1
    }

    fn row(&self, source_entry: u32) -> Result<Peers<'_>> {
        check_entry(Side::Source, source_entry, self.dimensions.0)?;
        if source_entry != self.source_entry {
            return Ok(Peers::empty());
        }
        Ok(Peers::borrowed(
            slice::from_ref(&self.dest_entry),
            slice::from_ref(&self.dest_entry),
        ))
    }

    fn column(&self, dest_entry: u32) -> Result<Peers<'_>> {
        check_entry(Side::Dest, dest_entry, self.dimensions.1)?;
        if dest_entry != self.dest_entry {
            return Ok(Peers::empty());
        }
        Ok(Peers::borrowed(
            slice::from_ref(&self.source_entry),
            slice::from_ref(&self.dest_entry),
        ))
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
        check_copy_target(self.dimensions, new_source, new_dest)?;
        Ok(Connectivity::Simple(Self {
            endpoints: self.endpoints.rebind(new_source.id(), new_dest.id()),
            dimensions: self.dimensions,
            source_entry: self.source_entry,
            dest_entry: self.dest_entry,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ElementInfo;

    fn wired() -> SimpleContainer {
        let a = ElementInfo::new(1, 3);
        let b = ElementInfo::new(2, 4);
        SimpleContainer::new(&a, &b, MsgSlot(0), MsgSlot(0), 2, 3).unwrap()
    }

    #[test]
    fn test_row_and_column() {
        let container = wired();
        assert_eq!(container.row(2).unwrap().entries(), &[3]);
        assert_eq!(container.row(2).unwrap().aux(), &[3]);
        assert!(container.row(0).unwrap().is_empty());
        assert_eq!(container.column(3).unwrap().entries(), &[2]);
        assert!(container.column(1).unwrap().is_empty());
        assert!(container.row(3).is_err());
        assert!(container.column(4).is_err());
    }

    #[test]
    fn test_single_traversal_honors_entry() {
        let container = wired();
        let traversal = container
            .single_traversal(2, Direction::Forward, 0)
            .unwrap()
            .unwrap();
        assert_eq!(traversal.bound_entry(), 2);
        assert_eq!(traversal.len(), 1);
        assert!(container
            .single_traversal(2, Direction::Forward, 1)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_copy() {
        let container = wired();
        let copy = container
            .copy(&ElementInfo::new(7, 3), &ElementInfo::new(8, 4))
            .unwrap();
        assert_eq!(copy.kind(), ConnectionKind::Simple);
        assert_eq!(copy.row(2).unwrap(), container.row(2).unwrap());
        assert!(container
            .copy(&ElementInfo::new(7, 3), &ElementInfo::new(8, 3))
            .is_err());
    }
}
