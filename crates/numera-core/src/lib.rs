//! Board primitives for number-place (Sudoku) puzzles.
//!
//! This crate provides the typed foundation the Numera engine is built
//! on: digits, board positions, houses (rows, columns, and 3×3 boxes),
//! allocation-free digit sets, and a 9×9 grid of optional digits with a
//! row-major 81-character text form.
//!
//! Nothing in this crate is game-specific: there is no notion of givens,
//! players, or sessions here, only the board geometry and its
//! no-duplicate rule helpers.

pub use self::{
    digit::Digit,
    digit_grid::{DigitGrid, GridParseError},
    digit_set::DigitSet,
    house::{House, has_duplicate},
    position::Position,
};

mod digit;
mod digit_grid;
mod digit_set;
mod house;
mod position;
