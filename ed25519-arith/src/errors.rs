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

use crate::element::CoordinateSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // a decoded encoding does not satisfy the curve equation
    InvalidPoint,

    // the tagged-union conversion has no formula between these systems
    UnsupportedConversion {
        from: CoordinateSystem,
        to: CoordinateSystem
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPoint => write!(f, "Ed25519: invalid point."),
            Self::UnsupportedConversion { from, to } => write!(
                f,
                "Ed25519: no conversion from {from} to {to}."
            )
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
