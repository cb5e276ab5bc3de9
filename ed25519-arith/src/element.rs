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

use crate::{
    errors::{
        Error,
        Result
    },
    field::Fe,
    points::{
        AffinePoint,
        CachedPoint,
        CompletedPoint,
        ExtendedPoint,
        PrecomputedPoint,
        ProjectivePoint
    }
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSystem {
    Affine,
    P2,
    P3,
    P1xP1,
    Precomputed,
    Cached
}

impl std::fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Affine      => write!(f, "AFFINE"),
            Self::P2          => write!(f, "P2"),
            Self::P3          => write!(f, "P3"),
            Self::P1xP1       => write!(f, "P1xP1"),
            Self::Precomputed => write!(f, "PRECOMPUTED"),
            Self::Cached      => write!(f, "CACHED")
        }
    }
}

/// A curve point tagged with the coordinate system it is held in.
///
/// Equality compares the affine points, whatever the systems of both sides.
#[derive(Clone, Copy, Debug)]
pub enum GroupElement {
    Affine(AffinePoint),
    P2(ProjectivePoint),
    P3(ExtendedPoint),
    P1xP1(CompletedPoint),
    Precomputed(PrecomputedPoint),
    Cached(CachedPoint)
}

// (X, Zx, Y, Zy) with x = X/Zx and y = Y/Zy
struct Fractions {
    x: Fe,
    zx: Fe,
    y: Fe,
    zy: Fe
}

impl GroupElement {
    pub fn coordinate_system(&self) -> CoordinateSystem {
        match self {
            Self::Affine(_)      => CoordinateSystem::Affine,
            Self::P2(_)          => CoordinateSystem::P2,
            Self::P3(_)          => CoordinateSystem::P3,
            Self::P1xP1(_)       => CoordinateSystem::P1xP1,
            Self::Precomputed(_) => CoordinateSystem::Precomputed,
            Self::Cached(_)      => CoordinateSystem::Cached
        }
    }

    fn fractions(&self) -> Fractions {
        match self {
            Self::Affine(p) => Fractions { x: p.x, zx: Fe::ONE, y: p.y, zy: Fe::ONE },
            Self::P2(p) => Fractions { x: p.x, zx: p.z, y: p.y, zy: p.z },
            Self::P3(p) => Fractions { x: p.x, zx: p.z, y: p.y, zy: p.z },
            Self::P1xP1(p) => Fractions { x: p.x, zx: p.z, y: p.y, zy: p.t },
            Self::Precomputed(p) => {
                // x = ((y+x) - (y-x)) / 2, y = ((y+x) + (y-x)) / 2
                let two = &Fe::ONE + &Fe::ONE;
                Fractions {
                    x: &p.y_plus_x - &p.y_minus_x,
                    zx: two,
                    y: &p.y_plus_x + &p.y_minus_x,
                    zy: two
                }
            },
            Self::Cached(p) => {
                let z2 = &p.z + &p.z;
                Fractions {
                    x: &p.y_plus_x - &p.y_minus_x,
                    zx: z2,
                    y: &p.y_plus_x + &p.y_minus_x,
                    zy: z2
                }
            }
        }
    }

    /// Checks -x^2 + y^2 = 1 + d*x^2*y^2 on the affine point, without division.
    pub fn is_on_curve(&self) -> bool {
        let f = self.fractions();
        if f.zx.is_zero() || f.zy.is_zero() {
            return false;
        }

        // -X^2*Zy^2 + Y^2*Zx^2 = Zx^2*Zy^2 + d*X^2*Y^2
        let xx = f.x.sqr();
        let yy = f.y.sqr();
        let zzx = f.zx.sqr();
        let zzy = f.zy.sqr();
        let lhs = &(&yy * &zzx) - &(&xx * &zzy);
        let rhs = &(&zzx * &zzy) + &(&Fe::D * &(&xx * &yy));
        if lhs != rhs {
            return false;
        }

        match self {
            // X*Y = Z*T
            Self::P3(p) => &p.x * &p.y == &p.z * &p.t,
            _ => true
        }
    }

    /// Moves the point to another coordinate system.
    ///
    /// Cached and precomputed points only feed additions: they cannot be
    /// converted back, and the other systems cannot be converted to them
    /// without going through P3.
    pub fn to_representation(&self, target: CoordinateSystem) -> Result<GroupElement> {
        use CoordinateSystem as C;

        let output = match (self, target) {
            (_, target) if target == self.coordinate_system() => *self,

            (Self::P3(p), C::Affine)      => Self::Affine(p.to_affine()),
            (Self::P3(p), C::P2)          => Self::P2(p.to_projective()),
            (Self::P3(p), C::P1xP1)       => Self::P1xP1(p.to_completed()),
            (Self::P3(p), C::Precomputed) => Self::Precomputed(p.to_precomputed()),
            (Self::P3(p), C::Cached)      => Self::Cached(p.to_cached()),

            (Self::P2(p), C::Affine)      => Self::Affine(p.to_affine()),
            (Self::P2(p), C::P3)          => Self::P3(p.to_extended()),
            (Self::P2(p), C::P1xP1)       => Self::P1xP1(p.to_completed()),

            (Self::P1xP1(p), C::Affine)   => Self::Affine(p.to_projective().to_affine()),
            (Self::P1xP1(p), C::P2)       => Self::P2(p.to_projective()),
            (Self::P1xP1(p), C::P3)       => Self::P3(p.to_extended()),

            (Self::Affine(p), C::P3)      => Self::P3(p.to_extended()),
            (Self::Affine(p), target)     => Self::P3(p.to_extended()).to_representation(target)?,

            (_, target) => return Err(Error::UnsupportedConversion {
                from: self.coordinate_system(),
                to: target
            })
        };
        Ok(output)
    }
}

impl PartialEq for GroupElement {
    fn eq(&self, other: &Self) -> bool {
        let f = self.fractions();
        let g = other.fractions();
        &f.x * &g.zx == &g.x * &f.zx && &f.y * &g.zy == &g.y * &f.zy
    }
}

impl Eq for GroupElement {}

macro_rules! group_element_from {
    ($point:ty, $variant:ident) => {
        impl From<$point> for GroupElement {
            fn from(value: $point) -> Self {
                GroupElement::$variant(value)
            }
        }

        impl From<&$point> for GroupElement {
            fn from(value: &$point) -> Self {
                GroupElement::$variant(*value)
            }
        }
    };
}

group_element_from!(AffinePoint, Affine);
group_element_from!(ProjectivePoint, P2);
group_element_from!(ExtendedPoint, P3);
group_element_from!(CompletedPoint, P1xP1);
group_element_from!(PrecomputedPoint, Precomputed);
group_element_from!(CachedPoint, Cached);

impl PartialEq for ExtendedPoint {
    fn eq(&self, other: &Self) -> bool {
        GroupElement::P3(*self) == GroupElement::P3(*other)
    }
}

impl Eq for ExtendedPoint {}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        GroupElement::P2(*self) == GroupElement::P2(*other)
    }
}

impl Eq for ProjectivePoint {}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for AffinePoint {}

impl ExtendedPoint {
    pub fn is_on_curve(&self) -> bool {
        GroupElement::P3(*self).is_on_curve()
    }
}
