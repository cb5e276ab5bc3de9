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

use std::ops::{
    Add, AddAssign,
    Neg,
    Sub, SubAssign
};

use hex_literal::hex;
use subtle::{
    Choice,
    ConditionallySelectable
};
use zeroize::Zeroize;

use crate::field::Fe;

/// P2: projective (X:Y:Z), with x = X/Z and y = Y/Z.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint {
    pub(crate) x: Fe,
    pub(crate) y: Fe,
    pub(crate) z: Fe
}

/// P3: extended (X:Y:Z:T), with x = X/Z, y = Y/Z and X*Y = Z*T.
#[derive(Clone, Copy, Debug)]
pub struct ExtendedPoint {
    pub(crate) x: Fe,
    pub(crate) y: Fe,
    pub(crate) z: Fe,
    pub(crate) t: Fe
}

/// P1xP1: output of doubling and addition, with x = X/Z and y = Y/T.
#[derive(Clone, Copy, Debug)]
pub struct CompletedPoint {
    pub(crate) x: Fe,
    pub(crate) y: Fe,
    pub(crate) z: Fe,
    pub(crate) t: Fe
}

/// Cached: (Y+X, Y-X, Z, 2d*T), the right operand of additions.
#[derive(Clone, Copy, Debug, Zeroize)]
pub struct CachedPoint {
    pub(crate) y_plus_x: Fe,
    pub(crate) y_minus_x: Fe,
    pub(crate) z: Fe,
    pub(crate) t2d: Fe
}

/// Precomputed: affine (y+x, y-x, 2d*x*y), for mixed additions with fixed tables.
#[derive(Clone, Copy, Debug, Zeroize)]
pub struct PrecomputedPoint {
    pub(crate) y_plus_x: Fe,
    pub(crate) y_minus_x: Fe,
    pub(crate) xy2d: Fe
}

/// Affine (x, y).
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    pub(crate) x: Fe,
    pub(crate) y: Fe
}

impl ProjectivePoint {
    pub const IDENTITY: ProjectivePoint = ProjectivePoint {
        x: Fe::ZERO,
        y: Fe::ONE,
        z: Fe::ONE
    };

    pub fn new(x: Fe, y: Fe, z: Fe) -> ProjectivePoint {
        ProjectivePoint { x, y, z }
    }

    pub fn dbl(&self) -> CompletedPoint {
        // A = X1^2
        let xx = self.x.sqr();

        // B = Y1^2
        let yy = self.y.sqr();

        // C = 2*Z1^2
        let mut zz2 = self.z.sqr();
        zz2 = &zz2 + &zz2;

        // H = A+B, G = B-A
        let yy_plus_xx = &yy + &xx;
        let yy_minus_xx = &yy - &xx;

        // E = (X1+Y1)^2-H
        let x_plus_y = &self.x + &self.y;
        let e = &x_plus_y.sqr() - &yy_plus_xx;

        // F = C-G
        CompletedPoint {
            x: e,
            y: yy_plus_xx,
            z: yy_minus_xx,
            t: &zz2 - &yy_minus_xx
        }
    }

    pub fn to_extended(&self) -> ExtendedPoint {
        ExtendedPoint {
            x: &self.x * &self.z,
            y: &self.y * &self.z,
            z: self.z.sqr(),
            t: &self.x * &self.y
        }
    }

    pub fn to_completed(&self) -> CompletedPoint {
        CompletedPoint {
            x: self.x,
            y: self.y,
            z: self.z,
            t: self.z
        }
    }

    pub fn to_affine(&self) -> AffinePoint {
        let recip = self.z.invert();
        AffinePoint {
            x: &self.x * &recip,
            y: &self.y * &recip
        }
    }
}

impl ExtendedPoint {
    /// The neutral element (0, 1).
    pub const IDENTITY: ExtendedPoint = ExtendedPoint {
        x: Fe::ZERO,
        y: Fe::ONE,
        z: Fe::ONE,
        t: Fe::ZERO
    };

    /// The standard base point, y = 4/5 and x even.
    pub const BASEPOINT: ExtendedPoint = ExtendedPoint {
        x: Fe::from_bytes(&hex!("1ad5258f602d56c9b2a7259560c72c695cdcd6fd31e2a4c0fe536ecdd3366921")),
        y: Fe::from_bytes(&hex!("5866666666666666666666666666666666666666666666666666666666666666")),
        z: Fe::ONE,
        t: Fe::from_bytes(&hex!("a3ddb7a5b38ade6df5525177809ff0207de3ab648e4eea6665768bd70f5f8767"))
    };

    pub fn new(x: Fe, y: Fe, z: Fe, t: Fe) -> ExtendedPoint {
        ExtendedPoint { x, y, z, t }
    }

    pub fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x,
            y: self.y,
            z: self.z
        }
    }

    pub fn to_completed(&self) -> CompletedPoint {
        CompletedPoint {
            x: self.x,
            y: self.y,
            z: self.z,
            t: self.z
        }
    }

    pub fn to_cached(&self) -> CachedPoint {
        CachedPoint {
            y_plus_x: &self.y + &self.x,
            y_minus_x: &self.y - &self.x,
            z: self.z,
            t2d: &self.t * &Fe::D2
        }
    }

    pub fn to_precomputed(&self) -> PrecomputedPoint {
        let recip = self.z.invert();
        let x = &self.x * &recip;
        let y = &self.y * &recip;
        PrecomputedPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d: &(&x * &y) * &Fe::D2
        }
    }

    pub fn to_affine(&self) -> AffinePoint {
        self.to_projective().to_affine()
    }

    pub fn dbl(&self) -> CompletedPoint {
        self.to_projective().dbl()
    }

    /// 2^k * self.
    pub fn mul_by_pow2(&self, k: u32) -> ExtendedPoint {
        if k == 0 {
            return *self;
        }
        let mut s = self.to_projective();
        for _ in 1..k {
            s = s.dbl().to_projective();
        }
        s.dbl().to_extended()
    }

    pub fn has_small_order(&self) -> bool {
        self.mul_by_pow2(3).to_projective().x.is_zero()
    }
}

impl CompletedPoint {
    pub fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: &self.x * &self.t,
            y: &self.y * &self.z,
            z: &self.z * &self.t
        }
    }

    pub fn to_extended(&self) -> ExtendedPoint {
        ExtendedPoint {
            x: &self.x * &self.t,
            y: &self.y * &self.z,
            z: &self.z * &self.t,
            t: &self.x * &self.y
        }
    }
}

impl CachedPoint {
    pub const IDENTITY: CachedPoint = CachedPoint {
        y_plus_x: Fe::ONE,
        y_minus_x: Fe::ONE,
        z: Fe::ONE,
        t2d: Fe::ZERO
    };
}

impl PrecomputedPoint {
    pub const IDENTITY: PrecomputedPoint = PrecomputedPoint {
        y_plus_x: Fe::ONE,
        y_minus_x: Fe::ONE,
        xy2d: Fe::ZERO
    };
}

impl AffinePoint {
    pub const IDENTITY: AffinePoint = AffinePoint {
        x: Fe::ZERO,
        y: Fe::ONE
    };

    pub fn new(x: Fe, y: Fe) -> AffinePoint {
        AffinePoint { x, y }
    }

    pub fn x(&self) -> Fe {
        self.x
    }

    pub fn y(&self) -> Fe {
        self.y
    }

    pub fn to_extended(&self) -> ExtendedPoint {
        ExtendedPoint {
            x: self.x,
            y: self.y,
            z: Fe::ONE,
            t: &self.x * &self.y
        }
    }
}

impl Add<&CachedPoint> for &ExtendedPoint {
    type Output = CompletedPoint;
    fn add(self, rhs: &CachedPoint) -> Self::Output {
        // A = (Y1-X1)*(Y2-X2)
        let mm = &(&self.y - &self.x) * &rhs.y_minus_x;

        // B = (Y1+X1)*(Y2+X2)
        let pp = &(&self.y + &self.x) * &rhs.y_plus_x;

        // C = T1*2*d*T2
        let tt2d = &self.t * &rhs.t2d;

        // D = Z1*2*Z2
        let zz = &self.z * &rhs.z;
        let zz2 = &zz + &zz;

        // E = B-A, H = B+A, G = D+C, F = D-C
        CompletedPoint {
            x: &pp - &mm,
            y: &pp + &mm,
            z: &zz2 + &tt2d,
            t: &zz2 - &tt2d
        }
    }
}

impl Sub<&CachedPoint> for &ExtendedPoint {
    type Output = CompletedPoint;
    fn sub(self, rhs: &CachedPoint) -> Self::Output {
        // same as addition of (Y2-X2, Y2+X2, Z2, -2*d*T2)
        let mm = &(&self.y - &self.x) * &rhs.y_plus_x;
        let pp = &(&self.y + &self.x) * &rhs.y_minus_x;
        let tt2d = &self.t * &rhs.t2d;
        let zz = &self.z * &rhs.z;
        let zz2 = &zz + &zz;

        CompletedPoint {
            x: &pp - &mm,
            y: &pp + &mm,
            z: &zz2 - &tt2d,
            t: &zz2 + &tt2d
        }
    }
}

impl Add<&PrecomputedPoint> for &ExtendedPoint {
    type Output = CompletedPoint;
    fn add(self, rhs: &PrecomputedPoint) -> Self::Output {
        // Z2 = 1
        let mm = &(&self.y - &self.x) * &rhs.y_minus_x;
        let pp = &(&self.y + &self.x) * &rhs.y_plus_x;
        let txy2d = &self.t * &rhs.xy2d;
        let z2 = &self.z + &self.z;

        CompletedPoint {
            x: &pp - &mm,
            y: &pp + &mm,
            z: &z2 + &txy2d,
            t: &z2 - &txy2d
        }
    }
}

impl Sub<&PrecomputedPoint> for &ExtendedPoint {
    type Output = CompletedPoint;
    fn sub(self, rhs: &PrecomputedPoint) -> Self::Output {
        let mm = &(&self.y - &self.x) * &rhs.y_plus_x;
        let pp = &(&self.y + &self.x) * &rhs.y_minus_x;
        let txy2d = &self.t * &rhs.xy2d;
        let z2 = &self.z + &self.z;

        CompletedPoint {
            x: &pp - &mm,
            y: &pp + &mm,
            z: &z2 - &txy2d,
            t: &z2 + &txy2d
        }
    }
}

impl Add<&ExtendedPoint> for &ExtendedPoint {
    type Output = ExtendedPoint;
    fn add(self, rhs: &ExtendedPoint) -> Self::Output {
        (self + &rhs.to_cached()).to_extended()
    }
}

impl AddAssign<&ExtendedPoint> for ExtendedPoint {
    fn add_assign(&mut self, rhs: &ExtendedPoint) {
        *self = &*self + rhs;
    }
}

impl Sub<&ExtendedPoint> for &ExtendedPoint {
    type Output = ExtendedPoint;
    fn sub(self, rhs: &ExtendedPoint) -> Self::Output {
        (self - &rhs.to_cached()).to_extended()
    }
}

impl SubAssign<&ExtendedPoint> for ExtendedPoint {
    fn sub_assign(&mut self, rhs: &ExtendedPoint) {
        *self = &*self - rhs;
    }
}

impl Neg for &ExtendedPoint {
    type Output = ExtendedPoint;
    fn neg(self) -> Self::Output {
        ExtendedPoint {
            x: -&self.x,
            y: self.y,
            z: self.z,
            t: -&self.t
        }
    }
}

impl Neg for &CachedPoint {
    type Output = CachedPoint;
    fn neg(self) -> Self::Output {
        CachedPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            z: self.z,
            t2d: -&self.t2d
        }
    }
}

impl Neg for &PrecomputedPoint {
    type Output = PrecomputedPoint;
    fn neg(self) -> Self::Output {
        PrecomputedPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            xy2d: -&self.xy2d
        }
    }
}

impl ConditionallySelectable for CachedPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        CachedPoint {
            y_plus_x: Fe::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: Fe::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            z: Fe::conditional_select(&a.z, &b.z, choice),
            t2d: Fe::conditional_select(&a.t2d, &b.t2d, choice)
        }
    }
}

impl ConditionallySelectable for PrecomputedPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        PrecomputedPoint {
            y_plus_x: Fe::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: Fe::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            xy2d: Fe::conditional_select(&a.xy2d, &b.xy2d, choice)
        }
    }
}

impl From<&ExtendedPoint> for ProjectivePoint {
    fn from(value: &ExtendedPoint) -> Self {
        value.to_projective()
    }
}

impl From<&ExtendedPoint> for CompletedPoint {
    fn from(value: &ExtendedPoint) -> Self {
        value.to_completed()
    }
}

impl From<&ExtendedPoint> for CachedPoint {
    fn from(value: &ExtendedPoint) -> Self {
        value.to_cached()
    }
}

impl From<&ExtendedPoint> for PrecomputedPoint {
    fn from(value: &ExtendedPoint) -> Self {
        value.to_precomputed()
    }
}

impl From<&ProjectivePoint> for ExtendedPoint {
    fn from(value: &ProjectivePoint) -> Self {
        value.to_extended()
    }
}

impl From<&CompletedPoint> for ExtendedPoint {
    fn from(value: &CompletedPoint) -> Self {
        value.to_extended()
    }
}

impl From<&CompletedPoint> for ProjectivePoint {
    fn from(value: &CompletedPoint) -> Self {
        value.to_projective()
    }
}

impl From<&AffinePoint> for ExtendedPoint {
    fn from(value: &AffinePoint) -> Self {
        value.to_extended()
    }
}
