//! Render model for the board. Pure bookkeeping: which squares carry which
//! highlight markers, plus the static cell facts (checker shade, coordinate
//! labels) the view needs. No chess knowledge lives here.

use std::collections::{BTreeMap, BTreeSet};

use rules::types::Square;

/// Highlight markers a square can carry. Several can coexist on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Marker {
    /// The square of the currently selected piece.
    Selected,
    /// A legal non-capturing destination of the selection.
    ReachableQuiet,
    /// A legal capturing destination of the selection.
    ReachableCapture,
    /// An endpoint of the most recently executed move.
    LastMove,
}

#[derive(Debug, Clone)]
pub struct SquareCell {
    pub is_light: bool,
    /// File letter, present only on the rank-1 edge.
    pub file_label: Option<char>,
    /// Rank digit, present only on the a-file edge.
    pub rank_label: Option<char>,
    markers: BTreeSet<Marker>,
}

impl SquareCell {
    pub fn has(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }
}

/// One cell per square, iterated in draw order (rank 8 first, a to h).
#[derive(Debug, Clone)]
pub struct BoardMap {
    cells: BTreeMap<Square, SquareCell>,
}

impl BoardMap {
    pub fn new() -> BoardMap {
        let cells = Square::all()
            .map(|square| {
                let cell = SquareCell {
                    is_light: (square.file() + square.rank()) % 2 == 1,
                    file_label: (square.rank() == 0).then(|| square.file_char()),
                    rank_label: (square.file() == 0).then(|| square.rank_char()),
                    markers: BTreeSet::new(),
                };
                (square, cell)
            })
            .collect();
        BoardMap { cells }
    }

    /// Every square is present by construction.
    pub fn cell(&self, square: Square) -> &SquareCell {
        &self.cells[&square]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Square, &SquareCell)> {
        self.cells.iter()
    }

    pub fn highlight(&mut self, square: Square, marker: Marker) {
        if let Some(cell) = self.cells.get_mut(&square) {
            cell.markers.insert(marker);
        }
    }

    /// Removes every marker from every square.
    pub fn clear_all(&mut self) {
        for cell in self.cells.values_mut() {
            cell.markers.clear();
        }
    }

    /// Removes selection markers but keeps last-move markers, so the
    /// previous move stays visible while the user changes their mind.
    pub fn clear_selection_only(&mut self) {
        for cell in self.cells.values_mut() {
            cell.markers.remove(&Marker::Selected);
            cell.markers.remove(&Marker::ReachableQuiet);
            cell.markers.remove(&Marker::ReachableCapture);
        }
    }
}

impl Default for BoardMap {
    fn default() -> BoardMap {
        BoardMap::new()
    }
}
