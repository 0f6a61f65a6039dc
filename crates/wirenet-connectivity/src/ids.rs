// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identity types for collections, message slots and wirings

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Collection ID (stable identity of an element owned elsewhere)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({})", self.0)
    }
}

/// Message slot assigned by the dispatch subsystem. Never interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MsgSlot(pub i32);

impl fmt::Display for MsgSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Msg({})", self.0)
    }
}

/// Owning aggregate of entries, as seen by a connection container
///
/// Containers only read the identity and the entry count; they never
/// allocate or free collections.
pub trait Collection {
    fn id(&self) -> ElementId;

    /// Current number of addressable entries
    fn num_entries(&self) -> u32;
}

impl<C: Collection + ?Sized> Collection for &C {
    fn id(&self) -> ElementId {
        (**self).id()
    }

    fn num_entries(&self) -> u32 {
        (**self).num_entries()
    }
}

/// Plain snapshot of a collection's identity and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementInfo {
    pub id: ElementId,
    pub num_entries: u32,
}

impl ElementInfo {
    pub fn new(id: u32, num_entries: u32) -> Self {
        Self {
            id: ElementId(id),
            num_entries,
        }
    }
}

impl Collection for ElementInfo {
    fn id(&self) -> ElementId {
        self.id
    }

    fn num_entries(&self) -> u32 {
        self.num_entries
    }
}

/// Which side of a wiring an entry index belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Dest,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Dest => write!(f, "destination"),
        }
    }
}

/// Identity of one wiring: the two collections and the two message slots
///
/// Fixed at construction. Doubles as the connection table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Endpoints {
    source: ElementId,
    dest: ElementId,
    source_slot: MsgSlot,
    dest_slot: MsgSlot,
}

impl Endpoints {
    pub fn new(source: ElementId, dest: ElementId, source_slot: MsgSlot, dest_slot: MsgSlot) -> Self {
        Self {
            source,
            dest,
            source_slot,
            dest_slot,
        }
    }

    pub fn source(&self) -> ElementId {
        self.source
    }

    pub fn dest(&self) -> ElementId {
        self.dest
    }

    pub fn source_slot(&self) -> MsgSlot {
        self.source_slot
    }

    pub fn dest_slot(&self) -> MsgSlot {
        self.dest_slot
    }

    /// Same message slots, bound to two other collections
    pub fn rebind(&self, source: ElementId, dest: ElementId) -> Self {
        Self::new(source, dest, self.source_slot, self.dest_slot)
    }
}

impl fmt::Display for Endpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} -> {}/{}",
            self.source, self.source_slot, self.dest, self.dest_slot
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebind_keeps_slots() {
        let endpoints = Endpoints::new(ElementId(1), ElementId(2), MsgSlot(3), MsgSlot(-4));
        let rebound = endpoints.rebind(ElementId(10), ElementId(20));
        assert_eq!(rebound.source(), ElementId(10));
        assert_eq!(rebound.dest(), ElementId(20));
        assert_eq!(rebound.source_slot(), MsgSlot(3));
        assert_eq!(rebound.dest_slot(), MsgSlot(-4));
    }

    #[test]
    fn test_display() {
        let endpoints = Endpoints::new(ElementId(1), ElementId(2), MsgSlot(0), MsgSlot(1));
        assert_eq!(endpoints.to_string(), "Element(1)/Msg(0) -> Element(2)/Msg(1)");
    }
}
