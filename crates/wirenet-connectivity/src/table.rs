// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Connection table
//!
//! Per-model registry of wirings, keyed by their [`Endpoints`]. Model build
//! goes through [`ConnectionTable::connect`]; array cloning goes through
//! [`ConnectionTable::duplicate`].

use crate::connectivity::{Connectivity, SerializableConnectivity};
use crate::container::ConnectionContainer;
use crate::error::{check_entry, ConnectivityError, Result};
use crate::ids::{Collection, ElementId, Endpoints, MsgSlot, Side};
use crate::many2many::{Many2ManyContainer, MergeOutcome};
use ahash::AHashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, info, trace};
use wirenet_config::{ConnectivityConfig, MergePolicy};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Key of one wiring in the table
pub type WireKey = Endpoints;

/// What `connect` did with the requested pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectOutcome {
    /// First wiring for the key; a many-to-many container was created
    Created,
    /// Pair added to an existing container
    Inserted,
    /// Pair already wired and kept as is
    AlreadyPresent,
    /// Pair already wired; its auxiliary value was reset
    Overwritten,
    /// Existing simple or one-to-one container promoted to many-to-many
    Promoted,
}

impl From<MergeOutcome> for ConnectOutcome {
    fn from(outcome: MergeOutcome) -> Self {
        match outcome {
            MergeOutcome::Inserted => ConnectOutcome::Inserted,
            MergeOutcome::AlreadyPresent => ConnectOutcome::AlreadyPresent,
            MergeOutcome::Overwritten => ConnectOutcome::Overwritten,
        }
    }
}

/// Registry of every wiring of one model
#[derive(Debug, Clone)]
pub struct ConnectionTable {
    merge_policy: MergePolicy,
    containers: AHashMap<WireKey, Connectivity>,
}

impl ConnectionTable {
    pub fn new(config: &ConnectivityConfig) -> Self {
        debug!(
            target: "wirenet-connectivity",
            "Initializing connection table (merge_policy={}, capacity={})",
            config.merge_policy, config.table_capacity
        );
        Self {
            merge_policy: config.merge_policy,
            containers: AHashMap::with_capacity(config.table_capacity),
        }
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    /// Wire `source_entry` of `source` to `dest_entry` of `dest`
    ///
    /// The first wiring for a key creates a many-to-many container sized to
    /// both collections. Later wirings merge into it with the table's merge
    /// policy. A simple or one-to-one container that does not hold the pair
    /// yet is promoted to many-to-many first.
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if either entry lies outside the container dimensions.
    /// The table is unchanged on error.
    pub fn connect(
        &mut self,
        source: &dyn Collection,
        source_entry: u32,
        dest: &dyn Collection,
        dest_entry: u32,
        source_slot: MsgSlot,
        dest_slot: MsgSlot,
    ) -> Result<ConnectOutcome> {
        let key = Endpoints::new(source.id(), dest.id(), source_slot, dest_slot);
        let policy = self.merge_policy;

        let existing = match self.containers.entry(key) {
            Entry::Vacant(slot) => {
                let container = Many2ManyContainer::new(
                    source,
                    dest,
                    source_slot,
                    dest_slot,
                    source_entry,
                    dest_entry,
                )?;
                slot.insert(container.into());
                return Ok(ConnectOutcome::Created);
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        if let Some(container) = existing.as_many_to_many_mut() {
            return container
                .add(source_entry, dest_entry, policy)
                .map(ConnectOutcome::from);
        }

        let (_, dest_entries) = existing.dimensions();
        check_entry(Side::Dest, dest_entry, dest_entries)?;
        if existing.row(source_entry)?.contains(dest_entry) {
            return Ok(match policy {
                MergePolicy::KeepExisting => ConnectOutcome::AlreadyPresent,
                MergePolicy::Overwrite => ConnectOutcome::Overwritten,
            });
        }

        let mut promoted = existing.to_many_to_many()?;
        promoted.add(source_entry, dest_entry, policy)?;
        *existing = promoted.into();
        trace!(
            target: "wirenet-connectivity",
            "{}: promoted while wiring ({}, {})",
            key, source_entry, dest_entry
        );
        Ok(ConnectOutcome::Promoted)
    }

    /// Register a prebuilt container under its own endpoints
    ///
    /// # Errors
    ///
    /// `DuplicateWiring` if the key is already registered.
    pub fn insert(&mut self, container: impl Into<Connectivity>) -> Result<WireKey> {
        let container = container.into();
        let key = *container.endpoints();
        match self.containers.entry(key) {
            Entry::Occupied(_) => Err(ConnectivityError::DuplicateWiring(key)),
            Entry::Vacant(slot) => {
                trace!(
                    target: "wirenet-connectivity",
                    "Registered {} wiring {}",
                    container.kind(),
                    key
                );
                slot.insert(container);
                Ok(key)
            }
        }
    }

    pub fn get(&self, key: &WireKey) -> Option<&Connectivity> {
        self.containers.get(key)
    }

    pub fn get_mut(&mut self, key: &WireKey) -> Option<&mut Connectivity> {
        self.containers.get_mut(key)
    }

    pub fn contains(&self, key: &WireKey) -> bool {
        self.containers.contains_key(key)
    }

    pub fn remove(&mut self, key: &WireKey) -> Option<Connectivity> {
        self.containers.remove(key)
    }

    /// Wirings whose source is `element`, ordered by key
    pub fn outgoing(&self, element: ElementId) -> Vec<&Connectivity> {
        self.sorted_by(|key| key.source() == element)
    }

    /// Wirings whose destination is `element`, ordered by key
    pub fn incoming(&self, element: ElementId) -> Vec<&Connectivity> {
        self.sorted_by(|key| key.dest() == element)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Every registered wiring, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&WireKey, &Connectivity)> {
        self.containers.iter()
    }

    /// Copy one wiring onto two other collections and register the copy
    ///
    /// # Errors
    ///
    /// `UnknownWiring` if `key` is not registered, `IncompatibleCopyTarget`
    /// if the new collections differ in size, `DuplicateWiring` if the copy's
    /// key is already taken.
    pub fn duplicate(
        &mut self,
        key: &WireKey,
        new_source: &dyn Collection,
        new_dest: &dyn Collection,
    ) -> Result<WireKey> {
        let original = self
            .containers
            .get(key)
            .ok_or(ConnectivityError::UnknownWiring(*key))?;
        let copy = original.copy(new_source, new_dest)?;
        self.insert(copy)
    }

    /// Drop every wiring touching `element`. Returns how many were removed.
    pub fn disconnect_element(&mut self, element: ElementId) -> usize {
        let before = self.containers.len();
        self.containers
            .retain(|key, _| key.source() != element && key.dest() != element);
        let removed = before - self.containers.len();
        if removed > 0 {
            info!(
                target: "wirenet-connectivity",
                "Disconnected {} ({} wirings removed, {} remaining)",
                element,
                removed,
                self.containers.len()
            );
        }
        removed
    }

    /// Serializable snapshot of the whole table, ordered by key
    pub fn to_serializable(&self) -> Result<SerializableConnectionTable> {
        let wirings = self
            .sorted_by(|_| true)
            .into_iter()
            .map(Connectivity::to_serializable)
            .collect::<Result<Vec<_>>>()?;
        Ok(SerializableConnectionTable {
            merge_policy: self.merge_policy,
            wirings,
        })
    }

    /// Rebuild a table from its snapshot
    ///
    /// # Errors
    ///
    /// `InvalidSnapshot` for a malformed wiring, `DuplicateWiring` if two
    /// wirings share a key.
    pub fn try_from_serializable(snapshot: SerializableConnectionTable) -> Result<Self> {
        let mut table = Self {
            merge_policy: snapshot.merge_policy,
            containers: AHashMap::with_capacity(snapshot.wirings.len()),
        };
        for wiring in snapshot.wirings {
            table.insert(Connectivity::try_from_serializable(wiring)?)?;
        }
        Ok(table)
    }

    fn sorted_by(&self, keep: impl Fn(&WireKey) -> bool) -> Vec<&Connectivity> {
        let mut selected: Vec<(&WireKey, &Connectivity)> = self
            .containers
            .iter()
            .filter(|(key, _)| keep(key))
            .collect();
        selected.sort_unstable_by_key(|(key, _)| **key);
        selected.into_iter().map(|(_, container)| container).collect()
    }
}

impl Default for ConnectionTable {
    fn default() -> Self {
        Self::new(&ConnectivityConfig::default())
    }
}

/// Serializable version of `ConnectionTable`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerializableConnectionTable {
    pub merge_policy: MergePolicy,
    pub wirings: Vec<SerializableConnectivity>,
}
