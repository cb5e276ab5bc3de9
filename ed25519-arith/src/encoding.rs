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

use subtle::{
    Choice,
    ConditionallyNegatable,
    ConditionallySelectable
};

use crate::{
    errors::{
        Error,
        Result
    },
    field::Fe,
    points::{
        AffinePoint,
        ExtendedPoint,
        ProjectivePoint
    }
};

/// Compressed point: canonical y, with the sign of x in bit 255.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressedPoint(pub [u8; 32]);

impl CompressedPoint {
    /// Encoding of the neutral element (0, 1).
    pub const IDENTITY: CompressedPoint = CompressedPoint([
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0
    ]);

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn decompress(&self) -> Result<ExtendedPoint> {
        ExtendedPoint::try_from(&self.0)
    }

    pub fn affine_x(&self) -> Result<Fe> {
        recover_x(&self.affine_y(), self.0[31] >> 7)
    }

    pub fn affine_y(&self) -> Fe {
        Fe::from_bytes(&self.0)
    }
}

impl From<[u8; 32]> for CompressedPoint {
    fn from(value: [u8; 32]) -> Self {
        CompressedPoint(value)
    }
}

impl std::fmt::Display for CompressedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl std::fmt::Debug for CompressedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompressedPoint({})", hex::encode(self.0))
    }
}

// Recovers x from y, with x^2 = (y^2 - 1) / (d*y^2 + 1).
fn recover_x(y: &Fe, sign: u8) -> Result<Fe> {
    let mut u = y.sqr();
    let mut v = &u * &Fe::D;
    u -= &Fe::ONE; // u = y^2-1
    v += &Fe::ONE; // v = dy^2+1

    let v3 = &v.sqr() * &v;            // v^3
    let uv7 = &(&u * &v3.sqr()) * &v;  // uv^7
    let mut x = &(&u * &v3) * &uv7.pow22523(); // uv^3(uv^7)^((p-5)/8)

    let vxx = &x.sqr() * &v;
    let has_m_root = (&vxx - &u).is_zero(); // vx^2 = u
    let has_p_root = (&vxx + &u).is_zero(); // vx^2 = -u
    let x_sqrtm1 = &x * &Fe::SQRTM1;
    x.conditional_assign(&x_sqrtm1, Choice::from(has_p_root as u8));

    let cond = x.is_negative() as u8 ^ sign;
    x.conditional_negate(Choice::from(cond));

    match has_m_root | has_p_root {
        true => Ok(x),
        false => Err(Error::InvalidPoint)
    }
}

impl TryFrom<&[u8; 32]> for ExtendedPoint {
    type Error = Error;

    fn try_from(value: &[u8; 32]) -> Result<Self> {
        let y = Fe::from_bytes(value);
        let x = recover_x(&y, value[31] >> 7)?;
        Ok(ExtendedPoint::new(x, y, Fe::ONE, &x * &y))
    }
}

impl AffinePoint {
    pub fn compress(&self) -> CompressedPoint {
        let mut s = self.y.to_bytes();
        s[31] ^= (self.x.is_negative() as u8) << 7;
        CompressedPoint(s)
    }
}

impl ProjectivePoint {
    pub fn compress(&self) -> CompressedPoint {
        self.to_affine().compress()
    }
}

impl ExtendedPoint {
    pub fn compress(&self) -> CompressedPoint {
        self.to_affine().compress()
    }
}

impl std::fmt::Display for AffinePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(x: {}, y: {})",
            hex::encode(self.x.to_bytes()),
            hex::encode(self.y.to_bytes())
        )
    }
}

impl std::fmt::Display for ExtendedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_affine())
    }
}
