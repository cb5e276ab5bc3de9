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

use std::sync::OnceLock;

use subtle::{
    Choice,
    ConditionallyNegatable,
    ConditionallySelectable,
    ConstantTimeEq
};
use zeroize::Zeroize;

use crate::points::{
    CachedPoint,
    ExtendedPoint,
    PrecomputedPoint,
    ProjectivePoint
};

// Signed radix-16 digits of a 256-bit scalar, least significant first.
// Each of e[0..64] is between -8 and 7, e[64] is 0 or 1.
fn radix16(a: &[u8; 32]) -> [i8; 65] {
    let mut e = [0i8; 65];

    for (ee, &aa) in e.chunks_exact_mut(2).zip(a.iter()) {
        ee[0] = (aa & 15) as i8;
        ee[1] = ((aa >> 4) & 15) as i8;
    }

    // each e[i] is between 0 and 15

    let mut carry = 0i8;
    for ee in e.iter_mut().take(64) {
        *ee += carry;
        carry = *ee + 8;
        carry >>= 4;
        *ee -= carry * (1i8 << 4);
    }
    e[64] = carry;

    e
}

// Width-5 non-adjacent form of a 256-bit scalar, least significant first.
// Nonzero digits are odd, between -15 and 15, and at least 5 positions apart.
// The extra digit holds the carry out of the top bit.
fn non_adjacent_form(a: &[u8; 32]) -> [i8; 257] {
    let mut r = [0i8; 257];
    for (i, rr) in r.iter_mut().take(256).enumerate() {
        *rr = ((a[i >> 3] >> (i & 7)) & 1) as i8;
    }

    for i in 0..257 {
        if r[i] == 0 {
            continue;
        }
        for b in 1..=6 {
            if i + b >= 257 {
                break;
            }
            if r[i + b] == 0 {
                continue;
            }
            let rb = r[i + b] << b;
            if r[i] + rb <= 15 {
                r[i] += rb;
                r[i + b] = 0;
            } else if r[i] - rb >= -15 {
                r[i] -= rb;
                for rk in r.iter_mut().skip(i + b) {
                    if *rk == 0 {
                        *rk = 1;
                        break;
                    }
                    *rk = 0;
                }
            } else {
                break;
            }
        }
    }

    r
}

fn negative(b: i8) -> u8 {
    (b as u8) >> 7 // 1: yes; 0: no
}

// Constant-time lookup of b*P in [P, 2P, ..., 8P], with b between -8 and 8.
fn select(row: &[CachedPoint; 8], b: i8) -> CachedPoint {
    let bnegative = negative(b);
    let babs = b - ((bnegative as i8).wrapping_neg() & b) * (1i8 << 1);

    let mut t = CachedPoint::IDENTITY;
    for (j, entry) in row.iter().enumerate() {
        t.conditional_assign(entry, (babs as u8).ct_eq(&(j as u8 + 1)));
    }
    t.conditional_negate(Choice::from(bnegative));
    t
}

// [P, 2P, ..., 8P]
fn multiples(p: &ExtendedPoint) -> [CachedPoint; 8] {
    let cached = p.to_cached();
    let mut row = [cached; 8];
    let mut acc = *p;
    for entry in row.iter_mut().skip(1) {
        acc = (&acc + &cached).to_extended();
        *entry = acc.to_cached();
    }
    row
}

// [P, 3P, ..., 15P], indexed by the odd digits of a NAF
#[derive(Clone, Copy, Debug)]
struct NafLookupTable<T>([T; 8]);

impl<T> NafLookupTable<T> {
    // |digit| * P, for odd digit
    fn get(&self, digit: i8) -> &T {
        &self.0[(digit.unsigned_abs() / 2) as usize]
    }
}

impl NafLookupTable<ExtendedPoint> {
    fn new(p: &ExtendedPoint) -> NafLookupTable<ExtendedPoint> {
        let p2 = p.dbl().to_extended().to_cached();
        let mut odd = [*p; 8];
        for i in 1..8 {
            odd[i] = (&odd[i - 1] + &p2).to_extended();
        }
        NafLookupTable(odd)
    }

    fn to_cached(&self) -> NafLookupTable<CachedPoint> {
        NafLookupTable(self.0.map(|p| p.to_cached()))
    }

    fn to_precomputed(&self) -> NafLookupTable<PrecomputedPoint> {
        NafLookupTable(self.0.map(|p| p.to_precomputed()))
    }
}

/// Multiples k * 256^j * B of a fixed base B, for j in 0..=32 and k in 1..=8.
///
/// Building the table costs 231 additions and 256 doublings. A multiplication
/// with it then costs 65 additions and 4 doublings.
#[derive(Clone, Debug)]
pub struct PrecomputationTable {
    base: ExtendedPoint,
    rows: Vec<[CachedPoint; 8]>
}

impl PrecomputationTable {
    pub const ROWS: usize = 33;

    pub fn new(base: &ExtendedPoint) -> PrecomputationTable {
        let mut rows = Vec::with_capacity(Self::ROWS);
        let mut start = *base;
        for j in 0..Self::ROWS {
            rows.push(multiples(&start));
            if j + 1 < Self::ROWS {
                start = start.mul_by_pow2(8);
            }
        }
        PrecomputationTable { base: *base, rows }
    }

    /// Table of the standard base point, built on first use.
    pub fn basepoint() -> &'static PrecomputationTable {
        static TABLE: OnceLock<PrecomputationTable> = OnceLock::new();
        TABLE.get_or_init(|| PrecomputationTable::new(&ExtendedPoint::BASEPOINT))
    }

    pub fn base(&self) -> &ExtendedPoint {
        &self.base
    }

    /// k * 256^j * B, for k between 1 and 8.
    pub fn get(&self, j: usize, k: usize) -> Option<&CachedPoint> {
        match k {
            1..=8 => self.rows.get(j).map(|row| &row[k - 1]),
            _ => None
        }
    }

    /// a * B in constant time.
    pub fn scalar_mul(&self, a: &[u8; 32]) -> ExtendedPoint {
        let mut e = radix16(a);
        let mut t = CachedPoint::IDENTITY;
        let mut h = ExtendedPoint::IDENTITY;

        // digits at odd positions: 16 * 256^j
        for i in (1..65).step_by(2) {
            t = select(&self.rows[i / 2], e[i]);
            h = (&h + &t).to_extended();
        }

        h = h.mul_by_pow2(4);

        // digits at even positions: 256^j
        for i in (0..65).step_by(2) {
            t = select(&self.rows[i / 2], e[i]);
            h = (&h + &t).to_extended();
        }

        t.zeroize();
        e.zeroize();

        h
    }
}

fn basepoint_naf_table() -> &'static NafLookupTable<PrecomputedPoint> {
    static ODD: OnceLock<NafLookupTable<PrecomputedPoint>> = OnceLock::new();
    ODD.get_or_init(|| {
        NafLookupTable::<ExtendedPoint>::new(&ExtendedPoint::BASEPOINT).to_precomputed()
    })
}

impl ExtendedPoint {
    /// a * self in constant time, for any 256-bit a.
    pub fn scalar_mul(&self, a: &[u8; 32]) -> ExtendedPoint {
        let mut row = multiples(self);
        let mut e = radix16(a);

        let mut t = select(&row, e[64]);
        let mut h = (&ExtendedPoint::IDENTITY + &t).to_extended();
        for i in (0..64).rev() {
            h = h.mul_by_pow2(4);
            t = select(&row, e[i]);
            h = (&h + &t).to_extended();
        }

        t.zeroize();
        e.zeroize();
        row.zeroize();

        h
    }

    /// a * B, with B the standard base point.
    pub fn mul_base(a: &[u8; 32]) -> ExtendedPoint {
        PrecomputationTable::basepoint().scalar_mul(a)
    }

    /// a * point + b * B, with B the standard base point.
    ///
    /// The running time depends on the scalars: use it only on public inputs.
    pub fn double_scalar_mul_vartime(a: &[u8; 32], point: &ExtendedPoint, b: &[u8; 32]) -> ExtendedPoint {
        let aslide = non_adjacent_form(a);
        let bslide = non_adjacent_form(b);

        let ai = NafLookupTable::<ExtendedPoint>::new(point).to_cached();
        let bi = basepoint_naf_table();

        let top = (0..257).rev().find(|&i| aslide[i] != 0 || bslide[i] != 0);
        let Some(top) = top else {
            return ExtendedPoint::IDENTITY;
        };

        let mut r = ProjectivePoint::IDENTITY;
        for i in (0..=top).rev() {
            let mut t = r.dbl();

            if aslide[i] > 0 {
                t = &t.to_extended() + ai.get(aslide[i]);
            } else if aslide[i] < 0 {
                t = &t.to_extended() - ai.get(aslide[i]);
            }

            if bslide[i] > 0 {
                t = &t.to_extended() + bi.get(bslide[i]);
            } else if bslide[i] < 0 {
                t = &t.to_extended() - bi.get(bslide[i]);
            }

            r = t.to_projective();
        }

        r.to_extended()
    }
}
