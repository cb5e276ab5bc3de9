// ed25519-arith, field and group arithmetic of Ed25519
// Copyright (C) 2025 A. Russon
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
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Arithmetic over the twisted Edwards curve Ed25519.
//!
//! Field elements live in GF(2^255 - 19), held as ten signed limbs in
//! radix 2^25.5. Points are held in one of several coordinate systems, and
//! each operation takes and returns the system best suited to it.

// the field and point formulas are adapted from the C code of libsodium:
// https://github.com/jedisct1/libsodium/blob/master/src/libsodium/crypto_core/ed25519/ref10/ed25519_ref10.c

mod element;
mod encoding;
mod field;
mod points;
mod scalarmult;
pub mod errors;

#[cfg(test)]
mod oracle_tests;

pub use element::{
    CoordinateSystem,
    GroupElement
};

pub use encoding::CompressedPoint;

pub use errors::{
    Error,
    Result
};

pub use field::Fe;

pub use points::{
    AffinePoint,
    CachedPoint,
    CompletedPoint,
    ExtendedPoint,
    PrecomputedPoint,
    ProjectivePoint
};

pub use scalarmult::PrecomputationTable;
