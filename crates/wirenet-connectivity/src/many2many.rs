// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Many-to-many connection container
//!
//! Wiring between two collections stored in a `SparseMatrix<u32>` sized
//! (source entries × destination entries). Cell (r, c) holds the auxiliary
//! destination index used to resolve the concrete destination sub-entry
//! when logical and physical indexing differ.

use crate::connectivity::Connectivity;
use crate::container::{check_copy_target, ConnectionContainer, ConnectionKind, Direction, Peers};
use crate::error::{check_entry, Result};
use crate::ids::{Collection, Endpoints, MsgSlot, Side};
use crate::traversal::Traversal;
use tracing::{debug, trace};
use wirenet_config::MergePolicy;
use wirenet_sparse::SparseMatrix;

/// Result of merging one wiring into an existing container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeOutcome {
    /// The pair was not wired and has been added
    Inserted,
    /// The pair was already wired and was left untouched
    AlreadyPresent,
    /// The pair was already wired; its auxiliary value was reset
    Overwritten,
}

/// Many-to-many relation between two collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Many2ManyContainer {
    endpoints: Endpoints,
    entries: SparseMatrix<u32>,
    default_source_index: u32,
}

impl Many2ManyContainer {
    /// Wire `source_entry` to `dest_entry`, creating the relation
    ///
    /// The store is sized to both collections' current entry counts. The
    /// seeded cell's auxiliary value is `dest_entry`.
    ///
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
        let (n_source, n_dest) = (source.num_entries(), dest.num_entries());
        check_entry(Side::Source, source_entry, n_source)?;
        check_entry(Side::Dest, dest_entry, n_dest)?;

        let mut entries = SparseMatrix::new(n_source, n_dest);
        entries.set(source_entry, dest_entry, dest_entry)?;

        let endpoints = Endpoints::new(source.id(), dest.id(), source_slot, dest_slot);
        debug!(
            target: "wirenet-connectivity",
            "Created many-to-many wiring {} ({} x {}) seeded at ({}, {})",
            endpoints, n_source, n_dest, source_entry, dest_entry
        );

        Ok(Self {
            endpoints,
            entries,
            default_source_index: source_entry,
        })
    }

    pub(crate) fn from_parts(
        endpoints: Endpoints,
        entries: SparseMatrix<u32>,
        default_source_index: u32,
    ) -> Self {
        Self {
            endpoints,
            entries,
            default_source_index,
        }
    }

    /// Source entry of the first wired pair
    pub fn default_source_index(&self) -> u32 {
        self.default_source_index
    }

    /// Read-only access to the adjacency store
    pub fn entries(&self) -> &SparseMatrix<u32> {
        &self.entries
    }

    pub fn contains(&self, source_entry: u32, dest_entry: u32) -> bool {
        self.entries.contains(source_entry, dest_entry)
    }

    /// Insert or overwrite a wiring with an explicit auxiliary value
    ///
    /// Returns the previous auxiliary value if the pair was already wired.
    pub fn set(&mut self, source_entry: u32, dest_entry: u32, aux: u32) -> Result<Option<u32>> {
        self.check_pair(source_entry, dest_entry)?;
        trace!(
            target: "wirenet-connectivity",
            "{}: set ({}, {}) = {}",
            self.endpoints, source_entry, dest_entry, aux
        );
        Ok(self.entries.set(source_entry, dest_entry, aux)?)
    }

    /// Merge one wiring into the relation
    ///
    /// A new pair is inserted with auxiliary value `dest_entry`. An existing
    /// pair is kept or reset according to `policy`.
    pub fn add(
        &mut self,
        source_entry: u32,
        dest_entry: u32,
        policy: MergePolicy,
    ) -> Result<MergeOutcome> {
        self.check_pair(source_entry, dest_entry)?;

        let outcome = match (self.entries.get(source_entry, dest_entry), policy) {
            (None, _) => {
                self.entries.set(source_entry, dest_entry, dest_entry)?;
                MergeOutcome::Inserted
            }
            (Some(_), MergePolicy::KeepExisting) => MergeOutcome::AlreadyPresent,
            (Some(_), MergePolicy::Overwrite) => {
                self.entries.set(source_entry, dest_entry, dest_entry)?;
                MergeOutcome::Overwritten
            }
        };
        trace!(
            target: "wirenet-connectivity",
            "{}: add ({}, {}) -> {:?}",
            self.endpoints, source_entry, dest_entry, outcome
        );
        Ok(outcome)
    }

    /// Remove one wiring. Returns whether the pair was wired.
    pub fn disconnect(&mut self, source_entry: u32, dest_entry: u32) -> Result<bool> {
        self.check_pair(source_entry, dest_entry)?;
        Ok(self.entries.unset(source_entry, dest_entry)?.is_some())
    }

    fn check_pair(&self, source_entry: u32, dest_entry: u32) -> Result<()> {
        check_entry(Side::Source, source_entry, self.entries.n_rows())?;
        check_entry(Side::Dest, dest_entry, self.entries.n_columns())
    }
}

impl ConnectionContainer for Many2ManyContainer {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::ManyToMany
    }

    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn dimensions(&self) -> (u32, u32) {
        self.entries.dimensions()
    }

    fn num_connections(&self) -> usize {
        self.entries.nnz()
    }

    fn row(&self, source_entry: u32) -> Result<Peers<'_>> {
        check_entry(Side::Source, source_entry, self.entries.n_rows())?;
        let row = self.entries.row(source_entry)?;
        Ok(Peers::borrowed(row.columns, row.values))
    }

    fn column(&self, dest_entry: u32) -> Result<Peers<'_>> {
        check_entry(Side::Dest, dest_entry, self.entries.n_columns())?;
        let column = self.entries.column(dest_entry)?;
        Ok(Peers::owned(column.rows, column.values))
    }

    fn traversal(&self, entry: u32, direction: Direction) -> Result<Traversal<'_>> {
        Traversal::open(self, entry, direction)
    }

    /// Only slot 0 is supported, and the cursor is always bound to entry 0
    /// whatever `entry` is. `entry` is still bounds-checked.
    fn single_traversal(
        &self,
        entry: u32,
        direction: Direction,
        connection_slot: u32,
    ) -> Result<Option<Traversal<'_>>> {
        if connection_slot != 0 {
            return Ok(None);
        }
        let bound = match direction {
            Direction::Forward => (Side::Source, self.entries.n_rows()),
            Direction::Reverse => (Side::Dest, self.entries.n_columns()),
        };
        check_entry(bound.0, entry, bound.1)?;
        // TODO: confirm with the dispatch owners whether `entry` should be honored here
        Traversal::open(self, 0, direction).map(Some)
    }

    fn copy(&self, new_source: &dyn Collection, new_dest: &dyn Collection) -> Result<Connectivity> {
        check_copy_target(self.entries.dimensions(), new_source, new_dest)?;

        let endpoints = self.endpoints.rebind(new_source.id(), new_dest.id());
        debug!(
            target: "wirenet-connectivity",
            "Copied many-to-many wiring {} onto {} ({} connections)",
            self.endpoints, endpoints, self.entries.nnz()
        );
        Ok(Connectivity::ManyToMany(Self::from_parts(
            endpoints,
            self.entries.clone(),
            self.default_source_index,
        )))
    }
}
