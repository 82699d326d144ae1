//! Molecule definitions and registry

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in molecule IDs
pub struct MoleculeId;

impl MoleculeId {
    pub const AIR: u8 = 0;
    pub const WATER: u8 = 1;
    pub const SAND: u8 = 2;
    pub const GASOLINE: u8 = 3;
    pub const SMOKE: u8 = 4;
    pub const SOOT: u8 = 5;
}

/// Lookup with an identifier that was never registered. Cells only ever
/// hold catalog-produced identifiers, so hitting this means a corrupted
/// cell value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unknown molecule identifier {id}")]
pub struct UnknownMoleculeError {
    pub id: u8,
}

/// Immutable properties of one molecule kind
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoleculeKind {
    pub id: u8,
    pub name: String,
    /// Base display color (RGB)
    pub color: [u8; 3],
    /// Density in kg/m^3, drives displacement ordering
    pub density: f32,
    pub flammable: bool,
    /// Liquids and gases flow: they spread sideways and denser material
    /// can push through them. Granular kinds do not.
    pub flows: bool,
}

/// Registry of all molecule kinds, indexed by ID
#[derive(Clone, Debug)]
pub struct MoleculeCatalog {
    kinds: Vec<MoleculeKind>,
}

impl MoleculeCatalog {
    /// Create the registry with all built-in kinds
    pub fn new() -> Self {
        let mut catalog = Self { kinds: Vec::new() };

        catalog.register(MoleculeKind {
            id: MoleculeId::AIR,
            name: "Air".to_string(),
            color: [2, 2, 2],
            density: 1.29,
            flammable: false,
            flows: true,
        });
        catalog.register(MoleculeKind {
            id: MoleculeId::WATER,
            name: "Water".to_string(),
            color: [60, 60, 254],
            density: 997.0,
            flammable: false,
            flows: true,
        });
        catalog.register(MoleculeKind {
            id: MoleculeId::SAND,
            name: "Sand".to_string(),
            color: [194, 178, 128],
            density: 1602.0,
            flammable: false,
            flows: false,
        });
        catalog.register(MoleculeKind {
            id: MoleculeId::GASOLINE,
            name: "Gasoline".to_string(),
            color: [230, 172, 39],
            density: 740.0,
            flammable: true,
            flows: true,
        });
        catalog.register(MoleculeKind {
            id: MoleculeId::SMOKE,
            name: "Smoke".to_string(),
            color: [38, 30, 20],
            density: 1.2,
            flammable: false,
            flows: true,
        });
        catalog.register(MoleculeKind {
            id: MoleculeId::SOOT,
            name: "Soot".to_string(),
            color: [22, 20, 20],
            density: 1820.0,
            flammable: false,
            flows: false,
        });

        catalog
    }

    fn register(&mut self, kind: MoleculeKind) {
        debug_assert_eq!(kind.id as usize, self.kinds.len(), "ids must be dense");
        self.kinds.push(kind);
    }

    /// Look up a kind by identifier
    pub fn lookup(&self, id: u8) -> Result<&MoleculeKind, UnknownMoleculeError> {
        self.kinds
            .get(id as usize)
            .ok_or(UnknownMoleculeError { id })
    }

    /// Registered identifiers, in registration order. The selection UI
    /// cycles through this sequence, so it must be stable across runs.
    pub fn identifiers(&self) -> impl Iterator<Item = u8> + '_ {
        self.kinds.iter().map(|kind| kind.id)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for MoleculeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
