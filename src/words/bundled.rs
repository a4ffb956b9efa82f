/*
bundled.rs

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

//! Word lists shipped with the engine.

use rand::Rng;
use rand::seq::SliceRandom;

use super::supplier::{SupplyError, WordConstraints, WordSupplier};
use crate::difficulty::Difficulty;

/// Short words used when everything else failed. They fit in any grid.
pub const EMERGENCY_WORDS: [&str; 5] = ["SOL", "MAR", "LUA", "CEU", "RIO"];

// For developers: keep the words in uppercase, without diacritics.
const EASY: [&str; 30] = [
    "SOL", "MAR", "LUA", "RIO", "CEU", "PAO", "MEL", "FLOR", "GATO", "CASA", "BOLA", "PATO",
    "RATO", "VACA", "SAPO", "LEAO", "FOCA", "URSO", "TREM", "MESA", "AVIAO", "NUVEM", "PRAIA",
    "LIVRO", "PEIXE", "CARRO", "FRUTA", "VERDE", "PORTA", "BARCO",
];

const MEDIUM: [&str; 28] = [
    "FOGO", "AGUA", "PEDRA", "PONTE", "CHUVA", "JANELA", "ESCOLA", "BANANA", "TOMATE", "CAVALO",
    "COELHO", "MACACO", "GIRAFA", "ABELHA", "BRANCO", "CAMISA", "PANELA", "CIDADE", "JARDIM",
    "CADEIRA", "LARANJA", "ESTRELA", "PLANETA", "AMARELO", "RELOGIO", "TESOURA", "CANETAS",
    "BALEIA",
];

const HARD: [&str; 24] = [
    "TIGRE", "ABACAXI", "MORANGO", "CORACAO", "FLORESTA", "MONTANHA", "ELEFANTE", "TELEFONE",
    "CAMINHAO", "AVENTURA", "PIRAMIDE", "UNIVERSO", "ARCOIRIS", "BORBOLETA", "BICICLETA",
    "CHOCOLATE", "TARTARUGA", "ASTRONAUTA", "HIPOPOTAMO", "COMPUTADOR", "GUARDANAPO",
    "DINOSSAURO", "PAPAGAIO", "GIRASSOL",
];

/// Return the bundled words of the tier.
pub fn tier_words(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    }
}

/// Return the emergency words.
pub fn emergency_words() -> Vec<String> {
    EMERGENCY_WORDS.iter().map(|w| w.to_string()).collect()
}

/// Pick random words from the tier of the level.
///
/// Excluded words are avoided while the tier has enough other words. The returned list is
/// sorted by length so that the last word is the longest one.
pub fn pick<R: Rng + ?Sized>(level: u32, constraints: &WordConstraints, rng: &mut R) -> Vec<String> {
    let tier: &[&str] = tier_words(Difficulty::for_level(level));

    let mut candidates: Vec<&str> = tier.iter().copied().filter(|w| constraints.accepts(w)).collect();
    if candidates.len() < constraints.count {
        // Not enough words without the excluded ones: allow them again
        candidates = tier
            .iter()
            .copied()
            .filter(|w| w.len() >= constraints.min_len && w.len() <= constraints.max_len)
            .collect();
    }
    candidates.shuffle(rng);
    candidates.truncate(constraints.count);

    let mut words: Vec<String> = candidates.into_iter().map(String::from).collect();
    words.sort_by_key(|w| w.len());
    words
}

/// Supplier that serves the bundled words.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledSupplier;

impl WordSupplier for BundledSupplier {
    fn get_words(&self, level: u32, constraints: &WordConstraints) -> Result<Vec<String>, SupplyError> {
        Ok(pick(level, constraints, &mut rand::rng()))
    }
}
