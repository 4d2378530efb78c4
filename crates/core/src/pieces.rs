//! Pieces module - piece templates and the catalog
//!
//! Shapes are declared as strings of `'0'`/`'1'`, one per rotation, read
//! row-major. A 9-character string is a 3x3 grid, a 16-character string is a
//! 4x4 grid. The strings are parsed once when a catalog is built; gameplay only
//! ever touches the resulting bitmask [`Shape`]s.

use crate::config::ConfigError;
use crate::piece::PieceInstance;
use crate::rng::SimpleRng;
use crate::types::{ColorId, ROTATION_COUNT};

/// Largest bounding square supported by [`Shape`]
pub const MAX_SHAPE_SIDE: u8 = 4;

/// One orientation of a piece: a square bitmask of side 3 or 4.
///
/// Bit `y * MAX_SHAPE_SIDE + x` is set when the cell at `(x, y)` is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    side: u8,
    mask: u16,
}

impl Shape {
    /// Parse a `'0'`/`'1'` string of length 9 (side 3) or 16 (side 4).
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let side = match pattern.len() {
            9 => 3,
            16 => 4,
            _ => return Err(ConfigError::ShapeLength(pattern.to_string())),
        };

        let mut mask = 0u16;
        for (i, ch) in pattern.chars().enumerate() {
            let x = (i % side) as u8;
            let y = (i / side) as u8;
            match ch {
                '0' => {}
                '1' => mask |= Self::bit(x, y),
                _ => return Err(ConfigError::ShapeChar(pattern.to_string())),
            }
        }

        if mask == 0 {
            return Err(ConfigError::EmptyShape(pattern.to_string()));
        }

        Ok(Self {
            side: side as u8,
            mask,
        })
    }

    #[inline(always)]
    fn bit(x: u8, y: u8) -> u16 {
        1 << (y * MAX_SHAPE_SIDE + x)
    }

    /// Side length of the bounding square
    pub fn side(&self) -> u8 {
        self.side
    }

    /// Whether the cell at `(x, y)` inside the bounding square is filled
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        x < self.side && y < self.side && self.mask & Self::bit(x, y) != 0
    }

    /// Filled cells as `(x, y)` offsets, row-major
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let side = self.side;
        (0..side * side).filter_map(move |i| {
            let (x, y) = (i % side, i / side);
            self.is_filled(x, y).then_some((x as i8, y as i8))
        })
    }

    /// Number of filled cells
    pub fn cell_count(&self) -> u32 {
        self.mask.count_ones()
    }
}

/// Declarative description of a piece: a name and four rotation patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTemplate {
    pub name: &'static str,
    pub rotations: [&'static str; ROTATION_COUNT as usize],
}

/// The standard set: two L variants, two Z variants, a T, a block and a line.
pub const STANDARD_TEMPLATES: [PieceTemplate; 7] = [
    PieceTemplate {
        name: "reverse-l",
        rotations: ["010010110", "000100111", "110100100", "000111001"],
    },
    PieceTemplate {
        name: "l",
        rotations: ["010010011", "000111100", "011001001", "000001111"],
    },
    PieceTemplate {
        name: "z",
        rotations: ["000110011", "010110100", "000110011", "010110100"],
    },
    PieceTemplate {
        name: "reverse-z",
        rotations: ["000011110", "100110010", "000011110", "100110010"],
    },
    PieceTemplate {
        name: "t",
        rotations: ["000010111", "100110100", "000111010", "010110010"],
    },
    PieceTemplate {
        name: "block",
        rotations: ["000110110", "000110110", "000110110", "000110110"],
    },
    PieceTemplate {
        name: "line",
        rotations: [
            "0100010001000100",
            "0000111100000000",
            "0100010001000100",
            "0000111100000000",
        ],
    },
];

/// Immutable piece definition: four pre-rotated shapes and a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceDefinition {
    /// Index in the owning catalog
    pub id: usize,
    pub name: &'static str,
    pub side: u8,
    pub rotations: [Shape; ROTATION_COUNT as usize],
    pub color: ColorId,
}

/// Immutable set of piece definitions, built once per game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCatalog {
    definitions: Vec<PieceDefinition>,
}

impl PieceCatalog {
    /// The seven standard pieces.
    pub fn standard() -> Self {
        // The standard table is a compile-time constant and always parses.
        match Self::from_templates(&STANDARD_TEMPLATES) {
            Ok(catalog) => catalog,
            Err(e) => unreachable!("standard piece table is malformed: {e}"),
        }
    }

    /// Build a catalog from templates.
    ///
    /// Colors are assigned from the template index (`index + 1`), so every
    /// entry gets a distinct non-empty color id. All four rotations of a
    /// template must share one side length.
    pub fn from_templates(templates: &[PieceTemplate]) -> Result<Self, ConfigError> {
        if templates.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if templates.len() > ColorId::MAX as usize {
            return Err(ConfigError::CatalogTooLarge(templates.len()));
        }

        let mut definitions = Vec::with_capacity(templates.len());
        for (id, template) in templates.iter().enumerate() {
            let mut rotations = [Shape { side: 0, mask: 0 }; ROTATION_COUNT as usize];
            for (slot, pattern) in rotations.iter_mut().zip(template.rotations.iter()) {
                *slot = Shape::parse(pattern)?;
            }

            let side = rotations[0].side();
            if rotations.iter().any(|s| s.side() != side) {
                return Err(ConfigError::MixedShapeSides(template.name.to_string()));
            }

            definitions.push(PieceDefinition {
                id,
                name: template.name,
                side,
                rotations,
                color: (id + 1) as ColorId,
            });
        }

        Ok(Self { definitions })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&PieceDefinition> {
        self.definitions.get(id)
    }

    pub fn definitions(&self) -> &[PieceDefinition] {
        &self.definitions
    }

    /// Instance of definition `id` at the spawn location for a board of `board_width`.
    pub fn spawn(&self, id: usize, board_width: u8) -> Option<PieceInstance> {
        self.get(id)
            .map(|def| PieceInstance::from_definition(def, board_width))
    }

    /// Uniformly random instance at the spawn location.
    pub fn random(&self, rng: &mut SimpleRng, board_width: u8) -> PieceInstance {
        let id = rng.next_range(self.definitions.len() as u32) as usize;
        PieceInstance::from_definition(&self.definitions[id], board_width)
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
