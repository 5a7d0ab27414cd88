// This file is part of passgen.
//
// Copyright (c) 2025  René Coignard <contact@renecoignard.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

pub const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &[u8] = b"0123456789";
pub const SYMBOLS: &[u8] = b"!@#$%^&*-_+=[]{}~`";

/// Ordered set of characters a password may be drawn from.
///
/// Letters are always present, so an alphabet is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<u8>,
}

impl Alphabet {
    pub fn new(include_digits: bool, include_symbols: bool) -> Self {
        let mut chars = Vec::with_capacity(LETTERS.len() + DIGITS.len() + SYMBOLS.len());
        chars.extend_from_slice(LETTERS);
        if include_digits {
            chars.extend_from_slice(DIGITS);
        }
        if include_symbols {
            chars.extend_from_slice(SYMBOLS);
        }
        Self { chars }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Whether `ch` may appear in a password drawn from this alphabet.
    pub fn contains(&self, ch: char) -> bool {
        ch.is_ascii() && self.chars.contains(&(ch as u8))
    }

    /// Estimated entropy in bits of a `length`-character password drawn from
    /// this alphabet.
    pub fn entropy_bits(&self, length: usize) -> f64 {
        length as f64 * (self.len() as f64).log2()
    }
}

/// Whether `ch` belongs to the digit class a password can be required to hold.
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii() && DIGITS.contains(&(ch as u8))
}

pub fn is_symbol(ch: char) -> bool {
    ch.is_ascii() && SYMBOLS.contains(&(ch as u8))
}
