// ed25519-oracle, reference arithmetic of Ed25519
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

//! Reference arithmetic for Ed25519 over arbitrary precision integers.
//!
//! Everything here works on affine coordinates with the textbook formulas,
//! and is slow on purpose: it only serves as a yardstick for the optimized
//! arithmetic in tests.

use std::{
    ops::{
        Add,
        Mul,
        Neg,
        Sub
    },
    sync::OnceLock
};

use hex_literal::hex;
use num_bigint::BigUint;
use rand::RngCore;

// x of the base point, little-endian
const BASE_X: [u8; 32] = hex!("1ad5258f602d56c9b2a7259560c72c695cdcd6fd31e2a4c0fe536ecdd3366921");

// group order 2^252 + 27742317777372353535851937790883648493, little-endian
const GROUP_ORDER: [u8; 32] = hex!("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010");

/// 2^255 - 19
pub fn prime() -> &'static BigUint {
    static P: OnceLock<BigUint> = OnceLock::new();
    P.get_or_init(|| (BigUint::from(1u8) << 255usize) - BigUint::from(19u8))
}

pub fn group_order() -> &'static BigUint {
    static L: OnceLock<BigUint> = OnceLock::new();
    L.get_or_init(|| BigUint::from_bytes_le(&GROUP_ORDER))
}

/// Element of GF(p), always held reduced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement(BigUint);

impl FieldElement {
    pub fn new(value: BigUint) -> FieldElement {
        FieldElement(value % prime())
    }

    pub fn zero() -> FieldElement {
        FieldElement(BigUint::from(0u8))
    }

    pub fn one() -> FieldElement {
        FieldElement(BigUint::from(1u8))
    }

    /// d = -121665/121666
    pub fn d() -> FieldElement {
        static D: OnceLock<FieldElement> = OnceLock::new();
        D.get_or_init(|| {
            -&(&FieldElement::from(121665) * &FieldElement::from(121666).invert())
        }).clone()
    }

    /// sqrt(-1) = 2^((p-1)/4)
    pub fn sqrt_m1() -> FieldElement {
        static I: OnceLock<FieldElement> = OnceLock::new();
        I.get_or_init(|| {
            let e = (prime() - BigUint::from(1u8)) >> 2usize;
            FieldElement(BigUint::from(2u8).modpow(&e, prime()))
        }).clone()
    }

    /// Little-endian, bit 255 ignored, reduced mod p.
    pub fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        let mut b = *bytes;
        b[31] &= 0x7f;
        FieldElement::new(BigUint::from_bytes_le(&b))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        let le = self.0.to_bytes_le();
        out[..le.len()].copy_from_slice(&le);
        out
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigUint::from(0u8)
    }

    pub fn is_negative(&self) -> bool {
        self.0.bit(0)
    }

    pub fn square(&self) -> FieldElement {
        self * self
    }

    /// self^(p-2), which maps zero to zero.
    pub fn invert(&self) -> FieldElement {
        let e = prime() - BigUint::from(2u8);
        FieldElement(self.0.modpow(&e, prime()))
    }

    /// A square root, if self is a square.
    pub fn sqrt(&self) -> Option<FieldElement> {
        // p = 5 mod 8: candidate self^((p+3)/8), fixed with sqrt(-1)
        let e = (prime() + BigUint::from(3u8)) >> 3usize;
        let candidate = FieldElement(self.0.modpow(&e, prime()));
        if candidate.square() == *self {
            return Some(candidate);
        }
        let candidate = &candidate * &FieldElement::sqrt_m1();
        match candidate.square() == *self {
            true => Some(candidate),
            false => None
        }
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        FieldElement::new(BigUint::from(value))
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &FieldElement) -> Self::Output {
        FieldElement::new(&self.0 + &rhs.0)
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &FieldElement) -> Self::Output {
        FieldElement::new(&self.0 + prime() - &rhs.0)
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &FieldElement) -> Self::Output {
        FieldElement::new(&self.0 * &rhs.0)
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;
    fn neg(self) -> Self::Output {
        &FieldElement::zero() - self
    }
}

/// Coordinate systems of the optimized arithmetic, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    Affine,
    P2,
    P3,
    P1xP1,
    Precomputed,
    Cached
}

/// Affine point on -x^2 + y^2 = 1 + d*x^2*y^2.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefPoint {
    pub x: FieldElement,
    pub y: FieldElement
}

impl RefPoint {
    pub fn neutral() -> RefPoint {
        RefPoint {
            x: FieldElement::zero(),
            y: FieldElement::one()
        }
    }

    /// The standard base point, y = 4/5 and x even.
    pub fn base_point() -> RefPoint {
        RefPoint {
            x: FieldElement::new(BigUint::from_bytes_le(&BASE_X)),
            y: &FieldElement::from(4) * &FieldElement::from(5).invert()
        }
    }

    pub fn is_on_curve(&self) -> bool {
        let xx = self.x.square();
        let yy = self.y.square();
        let lhs = &yy - &xx;
        let rhs = &FieldElement::one() + &(&FieldElement::d() * &(&xx * &yy));
        lhs == rhs
    }

    /// Canonical y, with the parity of x in bit 255.
    pub fn encode(&self) -> [u8; 32] {
        let mut out = self.y.to_bytes();
        out[31] |= (self.x.is_negative() as u8) << 7;
        out
    }

    /// None if no x matches the encoded y. A zero x takes either sign bit.
    pub fn decode(bytes: &[u8; 32]) -> Option<RefPoint> {
        let y = FieldElement::from_bytes(bytes);
        let sign = bytes[31] >> 7 == 1;

        // x^2 = (y^2 - 1) / (d*y^2 + 1)
        let yy = y.square();
        let u = &yy - &FieldElement::one();
        let v = &(&FieldElement::d() * &yy) + &FieldElement::one();
        let mut x = (&u * &v.invert()).sqrt()?;
        if x.is_negative() != sign {
            x = -&x;
        }
        Some(RefPoint { x, y })
    }

    pub fn add(&self, other: &RefPoint) -> RefPoint {
        // x3 = (x1*y2 + y1*x2) / (1 + d*x1*x2*y1*y2)
        // y3 = (y1*y2 + x1*x2) / (1 - d*x1*x2*y1*y2)
        let dxxyy = &FieldElement::d() * &(&(&self.x * &other.x) * &(&self.y * &other.y));
        let x_num = &(&self.x * &other.y) + &(&self.y * &other.x);
        let y_num = &(&self.y * &other.y) + &(&self.x * &other.x);
        let x_den = &FieldElement::one() + &dxxyy;
        let y_den = &FieldElement::one() - &dxxyy;

        // one inversion for both denominators
        let inv = (&x_den * &y_den).invert();
        RefPoint {
            x: &(&x_num * &y_den) * &inv,
            y: &(&y_num * &x_den) * &inv
        }
    }

    pub fn double(&self) -> RefPoint {
        self.add(self)
    }

    pub fn negate(&self) -> RefPoint {
        RefPoint {
            x: -&self.x,
            y: self.y.clone()
        }
    }

    /// a * self by double-and-add over all 256 bits of a, little-endian.
    pub fn scalar_mul(&self, a: &[u8; 32]) -> RefPoint {
        let mut h = RefPoint::neutral();
        for i in (0..256).rev() {
            h = h.double();
            if (a[i >> 3] >> (i & 7)) & 1 == 1 {
                h = h.add(self);
            }
        }
        h
    }

    /// Encoded coordinates of the point in a coordinate system, with the
    /// projective coordinates scaled by z.
    pub fn to_representation(&self, system: CoordinateSystem, z: &FieldElement) -> Vec<[u8; 32]> {
        let xz = &self.x * z;
        let yz = &self.y * z;
        let xy = &self.x * &self.y;
        let xyz = &xy * z;
        let two_d = &FieldElement::d() + &FieldElement::d();
        let coordinates = match system {
            CoordinateSystem::Affine => vec![self.x.clone(), self.y.clone()],
            CoordinateSystem::P2 => vec![xz, yz, z.clone()],
            CoordinateSystem::P3 => vec![xz, yz, z.clone(), xyz],
            CoordinateSystem::P1xP1 => vec![xz, yz, z.clone(), z.clone()],
            CoordinateSystem::Precomputed => vec![
                &self.y + &self.x,
                &self.y - &self.x,
                &two_d * &xy
            ],
            CoordinateSystem::Cached => vec![
                &yz + &xz,
                &yz - &xz,
                z.clone(),
                &two_d * &xyz
            ]
        };
        coordinates.iter().map(FieldElement::to_bytes).collect()
    }
}

/// Uniform in GF(p).
pub fn random_field_element<R: RngCore + ?Sized>(rng: &mut R) -> FieldElement {
    let mut bytes = [0u8; 32];
    loop {
        rng.fill_bytes(&mut bytes);
        bytes[31] &= 0x7f;
        let value = BigUint::from_bytes_le(&bytes);
        if value < *prime() {
            return FieldElement(value);
        }
    }
}

/// Random curve point, from a random y and sign until the pair decodes.
pub fn random_group_element<R: RngCore + ?Sized>(rng: &mut R) -> RefPoint {
    loop {
        let mut bytes = random_field_element(rng).to_bytes();
        bytes[31] |= ((rng.next_u32() & 1) as u8) << 7;
        if let Some(point) = RefPoint::decode(&bytes) {
            return point;
        }
    }
}

/// Uniform in [0, l), little-endian.
pub fn random_scalar<R: RngCore + ?Sized>(rng: &mut R) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    loop {
        rng.fill_bytes(&mut bytes);
        bytes[31] &= 0x1f;
        if BigUint::from_bytes_le(&bytes) < *group_order() {
            return bytes;
        }
    }
}
