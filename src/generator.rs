/*
generator.rs

Copyright 2025 Hervé Quatremain

This file is part of Cacapalavras.

Cacapalavras is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Cacapalavras is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Cacapalavras. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Generate word-search boards.
//!
//! A board is composed of two parts:
//!
//! * A square [`crate::grid::Grid`] of letters.
//!   Its size depends on the level (see [`crate::grid::grid_size`]).
//!
//! * The list of [`placement::PlacedWord`] objects that record where each target word is
//!   hidden.
//!
//! Before placing the words, the list is cleaned by [`normalize::normalize_words`]: letters are
//! uppercased, Portuguese diacritics are removed, and unusable entries are dropped.
//!
//! You create a board by creating a [`placement::BoardGenerator`] object and by using its
//! [`placement::BoardGenerator::generate`] method.
//! Words that cannot be placed after a bounded number of random tries are dropped and listed in
//! [`placement::Board::dropped_words`].
//! If too many words are dropped, then the method returns an error and the caller can retry
//! with a new random state.
//!
//! Once the grid is filled, the generator verifies the board with [`scan::find_occurrences`],
//! which searches the words in the grid without using the placement data.

pub mod normalize;
pub mod placement;
pub mod scan;
