// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Closed set of relation kinds
//!
//! [`Connectivity`] is what the dispatch subsystem holds per wiring. It
//! forwards every [`ConnectionContainer`] call to the variant it wraps.

use crate::container::{wired_pairs, ConnectionContainer, ConnectionKind, Direction, Peers};
use crate::error::{ConnectivityError, Result};
use crate::ids::{Collection, Endpoints};
use crate::many2many::Many2ManyContainer;
use crate::one2one::OneToOneContainer;
use crate::simple::SimpleContainer;
use crate::traversal::Traversal;
use tracing::debug;
use wirenet_sparse::{SerializableSparseMatrix, SparseMatrix};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wiring between two collections, of any relation kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connectivity {
    Simple(SimpleContainer),
    OneToOne(OneToOneContainer),
    ManyToMany(Many2ManyContainer),
}

impl Connectivity {
    fn inner(&self) -> &dyn ConnectionContainer {
        match self {
            Connectivity::Simple(container) => container,
            Connectivity::OneToOne(container) => container,
            Connectivity::ManyToMany(container) => container,
        }
    }

    pub fn as_many_to_many(&self) -> Option<&Many2ManyContainer> {
        match self {
            Connectivity::ManyToMany(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_many_to_many_mut(&mut self) -> Option<&mut Many2ManyContainer> {
        match self {
            Connectivity::ManyToMany(container) => Some(container),
            _ => None,
        }
    }

    /// Every wired (source, destination, aux) triple, row-major
    pub fn pairs(&self) -> Result<Vec<(u32, u32, u32)>> {
        wired_pairs(self.inner())
    }

    /// Many-to-many container with the same endpoints and wired pairs
    ///
    /// The default source index of a promoted simple container is its
    /// source entry; for one-to-one it is 0.
    pub fn to_many_to_many(&self) -> Result<Many2ManyContainer> {
        let (source_entries, dest_entries) = self.dimensions();
        let default_source_index = match self {
            Connectivity::ManyToMany(container) => return Ok(container.clone()),
            Connectivity::Simple(container) => container.source_entry(),
            Connectivity::OneToOne(_) => 0,
        };
        let entries = SparseMatrix::from_triplets(source_entries, dest_entries, self.pairs()?)?;
        debug!(
            target: "wirenet-connectivity",
            "Promoted {} wiring {} to many-to-many ({} connections)",
            self.kind(),
            self.endpoints(),
            entries.nnz()
        );
        Ok(Many2ManyContainer::from_parts(
            *self.endpoints(),
            entries,
            default_source_index,
        ))
    }

    /// Serializable snapshot of the wiring
    pub fn to_serializable(&self) -> Result<SerializableConnectivity> {
        let (n_rows, n_columns) = self.dimensions();
        let (cells, default_source_index) = match self {
            Connectivity::ManyToMany(container) => (
                container.entries().to_serializable().cells,
                container.default_source_index(),
            ),
            Connectivity::Simple(container) => (self.pairs()?, container.source_entry()),
            Connectivity::OneToOne(_) => (Vec::new(), 0),
        };
        Ok(SerializableConnectivity {
            kind: self.kind(),
            endpoints: *self.endpoints(),
            default_source_index,
            entries: SerializableSparseMatrix {
                n_rows,
                n_columns,
                cells,
            },
        })
    }

    /// Rebuild a wiring from its snapshot, validating it against its kind
    ///
    /// # Errors
    ///
    /// `InvalidSnapshot` if the cells do not describe a wiring of `kind`.
    pub fn try_from_serializable(snapshot: SerializableConnectivity) -> Result<Self> {
        let SerializableConnectivity {
            kind,
            endpoints,
            default_source_index,
            entries,
        } = snapshot;
        let invalid = |reason: String| ConnectivityError::InvalidSnapshot(format!("{}: {}", kind, reason));

        match kind {
            ConnectionKind::ManyToMany => {
                let matrix = SparseMatrix::try_from_serializable(entries)
                    .map_err(|e| invalid(e.to_string()))?;
                if default_source_index >= matrix.n_rows() && matrix.n_rows() > 0 {
                    return Err(invalid(format!(
                        "default source index {} outside {} rows",
                        default_source_index,
                        matrix.n_rows()
                    )));
                }
                Ok(Connectivity::ManyToMany(Many2ManyContainer::from_parts(
                    endpoints,
                    matrix,
                    default_source_index,
                )))
            }
            ConnectionKind::Simple => match entries.cells.as_slice() {
                [(source_entry, dest_entry, aux)] if aux == dest_entry => {
                    SimpleContainer::from_parts(
                        endpoints,
                        (entries.n_rows, entries.n_columns),
                        *source_entry,
                        *dest_entry,
                    )
                    .map(Connectivity::Simple)
                    .map_err(|e| invalid(e.to_string()))
                }
                cells => Err(invalid(format!(
                    "expected one cell with aux equal to its column, found {} cells",
                    cells.len()
                ))),
            },
            ConnectionKind::OneToOne => {
                if entries.n_rows != entries.n_columns || !entries.cells.is_empty() {
                    return Err(invalid(format!(
                        "expected a square {} x {} snapshot without cells",
                        entries.n_rows, entries.n_columns
                    )));
                }
                Ok(Connectivity::OneToOne(OneToOneContainer::from_parts(
                    endpoints,
                    entries.n_rows,
                )))
            }
        }
    }
}

impl ConnectionContainer for Connectivity {
    fn kind(&self) -> ConnectionKind {
        self.inner().kind()
    }

    fn endpoints(&self) -> &Endpoints {
        self.inner().endpoints()
    }

    fn dimensions(&self) -> (u32, u32) {
        self.inner().dimensions()
    }

    fn num_connections(&self) -> usize {
        self.inner().num_connections()
    }

    fn row(&self, source_entry: u32) -> Result<Peers<'_>> {
        self.inner().row(source_entry)
    }

    fn column(&self, dest_entry: u32) -> Result<Peers<'_>> {
        self.inner().column(dest_entry)
    }

    fn traversal(&self, entry: u32, direction: Direction) -> Result<Traversal<'_>> {
        self.inner().traversal(entry, direction)
    }

    fn single_traversal(
        &self,
        entry: u32,
        direction: Direction,
        connection_slot: u32,
    ) -> Result<Option<Traversal<'_>>> {
        self.inner()
            .single_traversal(entry, direction, connection_slot)
    }

    fn copy(&self, new_source: &dyn Collection, new_dest: &dyn Collection) -> Result<Connectivity> {
        self.inner().copy(new_source, new_dest)
    }
}

impl From<SimpleContainer> for Connectivity {
    fn from(container: SimpleContainer) -> Self {
        Connectivity::Simple(container)
    }
}

impl From<OneToOneContainer> for Connectivity {
    fn from(container: OneToOneContainer) -> Self {
        Connectivity::OneToOne(container)
    }
}

impl From<Many2ManyContainer> for Connectivity {
    fn from(container: Many2ManyContainer) -> Self {
        Connectivity::ManyToMany(container)
    }
}

/// Serializable version of `Connectivity`
///
/// One-to-one wirings carry no cells; simple wirings carry their one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerializableConnectivity {
    pub kind: ConnectionKind,
    pub endpoints: Endpoints,
    pub default_source_index: u32,
    pub entries: SerializableSparseMatrix<u32>,
}
