//! # Talent Grid (9-box)
//!
//! Places individuals on a 3×3 performance/potential matrix.
//!
//! ```text
//!  potential
//!   High │ Low Pot. High Perf. │ High Pot. High Perf. │ Star Performer
//!   Med  │ Core Performer      │ Solid Performer      │ Growth Potential
//!   Low  │ Under Performer     │ Development Needed   │ Inconsistent Performer
//!        └───── Low ─────────────── Medium ──────────────── High ──── performance
//! ```
//!
//! Bucketing uses half-open thresholds: exactly 40 and exactly 70 land in the
//! higher bucket. Values outside [0, 100] are accepted as-is and fall wherever
//! the inequalities put them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scores below this are `Low`.
pub const MEDIUM_THRESHOLD: f64 = 40.0;
/// Scores at or above this are `High`.
pub const HIGH_THRESHOLD: f64 = 70.0;

/// Members per row inside one cell.
pub const CELL_COLUMNS: usize = 2;

// =============================================================================
// BUCKETS AND CELLS
// =============================================================================

/// Three-way classification of a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Low,
    Medium,
    High,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Low, Bucket::Medium, Bucket::High];

    /// Grid coordinate, 0 to 2.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

/// Classify a score: `< 40` low, `< 70` medium, anything else high.
#[must_use]
pub fn bucket(value: f64) -> Bucket {
    if value < MEDIUM_THRESHOLD {
        Bucket::Low
    } else if value < HIGH_THRESHOLD {
        Bucket::Medium
    } else {
        Bucket::High
    }
}

/// One of the nine (performance, potential) cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub performance: Bucket,
    pub potential: Bucket,
}

impl Cell {
    #[must_use]
    pub fn new(performance: Bucket, potential: Bucket) -> Self {
        Self {
            performance,
            potential,
        }
    }

    /// Cell for a raw score pair.
    #[must_use]
    pub fn classify(performance: f64, potential: f64) -> Self {
        Self::new(bucket(performance), bucket(potential))
    }

    /// `(x, y)` with x = performance, y = potential.
    #[must_use]
    pub fn coordinate(self) -> (usize, usize) {
        (self.performance.index(), self.potential.index())
    }

    /// Static label and styling for this cell.
    #[must_use]
    pub fn info(self) -> &'static CellInfo {
        &CELL_INFO[self.potential.index()][self.performance.index()]
    }

    /// All nine cells in render order: top row (high potential) first,
    /// left to right.
    pub fn all() -> impl Iterator<Item = Cell> {
        Bucket::ALL
            .into_iter()
            .rev()
            .flat_map(|potential| Bucket::ALL.into_iter().map(move |p| Cell::new(p, potential)))
    }
}

/// Fixed label, tier description and colour token of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellInfo {
    pub label: &'static str,
    pub tier: &'static str,
    pub color: &'static str,
}

const fn info(label: &'static str, tier: &'static str, color: &'static str) -> CellInfo {
    CellInfo { label, tier, color }
}

/// Indexed `[potential][performance]`.
const CELL_INFO: [[CellInfo; 3]; 3] = [
    [
        info("Under Performer", "Needs Development", "bg-alert-red/10"),
        info("Development Needed", "Needs Development", "bg-secondary-medium/10"),
        info("Inconsistent Performer", "Needs Development", "bg-muted/30"),
    ],
    [
        info("Core Performer", "Strong Contributors", "bg-muted/40"),
        info("Solid Performer", "Strong Contributors", "bg-primary-medium/10"),
        info("Growth Potential", "Strong Contributors", "bg-primary-light/20"),
    ],
    [
        info("Low Potential High Performer", "Strong Contributors", "bg-secondary-light/20"),
        info("High Potential High Performer", "Strong Contributors", "bg-cyan-accent/20"),
        info("Star Performer", "High Potential + High Performance", "bg-primary-light/30"),
    ],
];

// =============================================================================
// INDIVIDUALS AND PLACEMENT
// =============================================================================

/// A person plotted on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub id: u64,
    pub display_name: String,
    /// Delivery / results score, nominally 0-100.
    pub performance: f64,
    /// Potential score, nominally 0-100.
    pub potential: f64,
}

impl Individual {
    #[must_use]
    pub fn new(id: u64, display_name: impl Into<String>, performance: f64, potential: f64) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            performance,
            potential,
        }
    }

    #[must_use]
    pub fn cell(&self) -> Cell {
        Cell::classify(self.performance, self.potential)
    }

    /// Avatar fallback: first letter of each name part.
    #[must_use]
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }

    /// Badge text under the avatar.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.display_name.split_whitespace().next().unwrap_or("")
    }
}

/// Position of a member inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub column: usize,
    pub row: usize,
}

impl Slot {
    /// Slot for the `index`-th member of a cell (2-column wrap).
    #[must_use]
    pub fn for_index(index: usize) -> Self {
        Self {
            column: index % CELL_COLUMNS,
            row: index / CELL_COLUMNS,
        }
    }

    /// Horizontal offset in percent of the cell width.
    #[must_use]
    pub fn left_pct(self) -> usize {
        self.column * 50 + 20
    }

    /// Vertical offset in percent of the cell height.
    #[must_use]
    pub fn top_pct(self) -> usize {
        self.row * 40 + 30
    }
}

/// An individual placed in a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub individual: Individual,
    pub cell: Cell,
    pub slot: Slot,
}

/// Rendered cell: static info plus members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView<'a> {
    pub x: usize,
    pub y: usize,
    pub info: &'static CellInfo,
    pub members: &'a [Placement],
}

/// Headline counts under the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSummary {
    pub total: usize,
    /// Anyone with high potential, whatever the performance.
    pub high_potential: usize,
    /// High/high corner.
    pub stars: usize,
    /// Low/low corner.
    pub development_focus: usize,
}

impl GridSummary {
    /// Share of the team in whole percent, rounded down.
    #[must_use]
    pub fn percent(&self, count: usize) -> usize {
        if self.total == 0 {
            0
        } else {
            count * 100 / self.total
        }
    }
}

/// Individuals grouped into cells with stable sub-positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TalentGrid {
    cells: BTreeMap<Cell, Vec<Placement>>,
}

impl TalentGrid {
    /// Classify individuals. Members of a cell keep their input order.
    #[must_use]
    pub fn classify(individuals: &[Individual]) -> Self {
        let mut cells: BTreeMap<Cell, Vec<Placement>> = BTreeMap::new();
        for individual in individuals {
            let cell = individual.cell();
            let members = cells.entry(cell).or_default();
            let slot = Slot::for_index(members.len());
            members.push(Placement {
                individual: individual.clone(),
                cell,
                slot,
            });
        }
        Self { cells }
    }

    /// Members of one cell (empty slice when nobody is there).
    #[must_use]
    pub fn members(&self, cell: Cell) -> &[Placement] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Placement of one individual by id.
    #[must_use]
    pub fn placement_of(&self, id: u64) -> Option<&Placement> {
        self.cells
            .values()
            .flatten()
            .find(|p| p.individual.id == id)
    }

    /// All nine cells in render order, occupied or not.
    pub fn view(&self) -> impl Iterator<Item = CellView<'_>> {
        Cell::all().map(|cell| {
            let (x, y) = cell.coordinate();
            CellView {
                x,
                y,
                info: cell.info(),
                members: self.members(cell),
            }
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> GridSummary {
        let count_where = |pred: fn(&Cell) -> bool| -> usize {
            self.cells
                .iter()
                .filter(|(cell, _)| pred(cell))
                .map(|(_, members)| members.len())
                .sum()
        };
        GridSummary {
            total: self.len(),
            high_potential: count_where(|c| c.potential == Bucket::High),
            stars: count_where(|c| c.potential == Bucket::High && c.performance == Bucket::High),
            development_focus: count_where(|c| {
                c.potential == Bucket::Low && c.performance == Bucket::Low
            }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
