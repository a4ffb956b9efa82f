/*
words.rs

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

//! Retrieve the target words for a level.
//!
//! The words come from an external [`supplier::WordSupplier`].
//! Because the supplier can be slow or unavailable, it is called through a
//! [`fetch::WordFetcher`] object, which runs the call in a worker thread and waits for the
//! answer for a limited time.
//! If the supplier fails, times out, or returns too few words, then the fetcher falls back, in
//! that order, to:
//!
//! * the last list received for that level, if it is still in the [`cache::WordCache`];
//! * a random list from the [`bundled`] words for the difficulty tier of the level;
//! * the [`bundled::EMERGENCY_WORDS`] list.

pub mod bundled;
pub mod cache;
pub mod fetch;
pub mod supplier;
