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
    Index, IndexMut,
    Mul, MulAssign,
    Neg,
    Sub, SubAssign,
};

use hex_literal::hex;
use subtle::{
    Choice,
    ConditionallySelectable,
    ConstantTimeEq
};
use zeroize::Zeroize;

// limb i starts at bit ceil(25.5 * i)
const WIDTHS: [u32; 10] = [26, 25, 26, 25, 26, 25, 26, 25, 26, 25];

// 2p spread over the limbs, added before a subtraction so that no limb goes negative
const TWO_P: [i64; 10] = [
    0x7ffffda, 0x3fffffe, 0x7fffffe, 0x3fffffe, 0x7fffffe,
    0x3fffffe, 0x7fffffe, 0x3fffffe, 0x7fffffe, 0x3fffffe
];

/// Element of GF(p), p = 2^255 - 19.
///
/// Ten signed limbs in radix 2^25.5: limb `i` is the coefficient of
/// 2^ceil(25.5 * i). Every operation hands back a carried element, each limb
/// within about 2^25 (even index) or 2^24 (odd index), so the 64-bit
/// accumulators of the next product never overflow.
#[derive(Clone, Copy, Default, Zeroize)]
pub struct Fe {
    pub(crate) buf: [i32; 10]
}

// Constants
impl Fe {
    pub const ZERO: Fe = Fe { buf: [0; 10] };
    pub const ONE: Fe = Fe { buf: [1, 0, 0, 0, 0, 0, 0, 0, 0, 0] };

    // sqrt(-1)
    pub const SQRTM1: Fe = Fe::from_bytes(
        &hex!("b0a00e4a271beec478e42fad0618432fa7d7fb3d99004d2b0bdfc14f8024832b")
    );

    // d = -121665/121666
    pub const D: Fe = Fe::from_bytes(
        &hex!("a3785913ca4deb75abd841414d0a700098e879777940c78c73fe6f2bee6c0352")
    );

    // 2 * d
    pub const D2: Fe = Fe::from_bytes(
        &hex!("59f1b226949bd6eb56b183829a14e00030d1f3eef2808e19e7fcdf56dcd90624")
    );
}

impl Index<usize> for Fe {
    type Output = i32;
    fn index(&self, index: usize) -> &Self::Output {
        &self.buf[index]
    }
}

impl IndexMut<usize> for Fe {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.buf[index]
    }
}

// Signed carry pass over 64-bit limbs, folding 2^255 back as 19.
fn carry(mut h: [i64; 10]) -> Fe {
    for i in [0, 4, 1, 5, 2, 6, 3, 7, 4, 8, 9, 0] {
        let w = WIDTHS[i];
        let c = (h[i] + (1i64 << (w - 1))) >> w;
        h[i] -= c << w;
        if i == 9 {
            h[0] += 19 * c;
        } else {
            h[i + 1] += c;
        }
    }
    Fe { buf: h.map(|x| x as i32) }
}

impl AddAssign<&Fe> for Fe {
    fn add_assign(&mut self, rhs: &Fe) {
        *self = carry(std::array::from_fn(|i| self[i] as i64 + rhs[i] as i64));
    }
}

impl Add<&Fe> for &Fe {
    type Output = Fe;
    fn add(self, rhs: &Fe) -> Self::Output {
        let mut out = *self;
        out += rhs;
        out
    }
}

impl SubAssign<&Fe> for Fe {
    fn sub_assign(&mut self, rhs: &Fe) {
        *self = carry(std::array::from_fn(|i| {
            (self[i] as i64 + TWO_P[i]) - rhs[i] as i64
        }));
    }
}

impl Sub<&Fe> for &Fe {
    type Output = Fe;
    fn sub(self, rhs: &Fe) -> Self::Output {
        let mut out = *self;
        out -= rhs;
        out
    }
}

impl Neg for &Fe {
    type Output = Fe;
    fn neg(self) -> Self::Output {
        &Fe::ZERO - self
    }
}

impl MulAssign<&Fe> for Fe {
    fn mul_assign(&mut self, rhs: &Fe) {
        let mut h = [0i64; 10];
        for i in 0..10 {
            let f = self[i] as i64;
            for j in 0..10 {
                // two odd limbs land one bit above their column
                let r = f * rhs[j] as i64 * (1 + (i & j & 1) as i64);
                if i + j < 10 {
                    h[i + j] += r;
                } else {
                    h[i + j - 10] += 19 * r;
                }
            }
        }
        *self = carry(h);
    }
}

impl Mul<&Fe> for &Fe {
    type Output = Fe;
    fn mul(self, rhs: &Fe) -> Self::Output {
        let mut output = *self;
        output *= rhs;
        output
    }
}

impl ConditionallySelectable for Fe {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fe { buf: std::array::from_fn(|i| i32::conditional_select(&a[i], &b[i], choice)) }
    }
}

impl ConstantTimeEq for Fe {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for Fe {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Fe {}

impl std::fmt::Debug for Fe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fe({})", hex::encode(self.to_bytes()))
    }
}

impl Fe {
    /// Builds an element from raw limbs, limb `i` being the coefficient of
    /// 2^ceil(25.5 * i).
    ///
    /// The limbs are taken as they are: they must stay within 2^26 (even
    /// index) and 2^25 (odd index) in absolute value, or the next product
    /// may overflow its accumulators.
    pub const fn from_limbs(limbs: [i32; 10]) -> Fe {
        Fe { buf: limbs }
    }

    /// Decodes 32 little-endian bytes, ignoring the top bit.
    ///
    /// Values between p and 2^255 - 1 are kept as they are and behave as
    /// their residue modulo p.
    pub const fn from_bytes(input: &[u8; 32]) -> Fe {
        let mut buf = [0i32; 10];
        let mut acc = 0u64;
        let mut bits = 0u32;
        let mut k = 0;
        let mut i = 0;
        while i < 10 {
            while bits < WIDTHS[i] {
                acc |= (input[k] as u64) << bits;
                k += 1;
                bits += 8;
            }
            buf[i] = (acc & ((1u64 << WIDTHS[i]) - 1)) as i32;
            acc >>= WIDTHS[i];
            bits -= WIDTHS[i];
            i += 1;
        }
        Fe { buf }
    }

    // canonical limbs: value in [0, p), each limb in [0, 2^width)
    fn reduce(&self) -> [i64; 10] {
        let mut h = carry(self.buf.map(|x| x as i64)).buf.map(|x| x as i64);

        // q = 1 if the value is at least p, 0 otherwise
        let mut q = (19 * h[9] + (1 << 24)) >> 25;
        for (hi, w) in h.iter().zip(WIDTHS) {
            q = (hi + q) >> w;
        }

        // subtract q * p: add 19q, then drop q * 2^255 with the last carry
        h[0] += 19 * q;
        for i in 0..9 {
            let c = h[i] >> WIDTHS[i];
            h[i + 1] += c;
            h[i] -= c << WIDTHS[i];
        }
        h[9] &= (1 << 25) - 1;
        h
    }

    /// Canonical little-endian encoding, fully reduced modulo p.
    pub fn to_bytes(&self) -> [u8; 32] {
        let h = self.reduce();
        let mut output = [0u8; 32];
        let mut acc = 0u64;
        let mut bits = 0u32;
        let mut k = 0;
        for (hi, w) in h.iter().zip(WIDTHS) {
            acc |= (*hi as u64) << bits;
            bits += w;
            while bits >= 8 {
                output[k] = acc as u8;
                acc >>= 8;
                bits -= 8;
                k += 1;
            }
        }
        output[k] = acc as u8;
        output
    }

    /// Parity of the canonical representative, the sign bit of compressed points.
    pub fn is_negative(&self) -> bool {
        let s = self.to_bytes();
        (s[0] & 1) == 1
    }

    pub fn is_zero(&self) -> bool {
        let zero = [0u8; 32];
        let buf = self.to_bytes();
        buf.ct_eq(&zero).into()
    }

    pub fn sqr(&self) -> Fe {
        let mut h = [0i64; 10];
        for i in 0..10 {
            let f = self[i] as i64;
            for j in i..10 {
                let mut r = f * self[j] as i64;
                // cross terms are computed once and doubled
                if i != j {
                    r *= 2;
                }
                if i & j & 1 == 1 {
                    r *= 2;
                }
                if i + j < 10 {
                    h[i + j] += r;
                } else {
                    h[i + j - 10] += 19 * r;
                }
            }
        }
        carry(h)
    }

    // self^(2^k)
    fn pow2k(&self, k: u32) -> Fe {
        let mut output = self.sqr();
        for _ in 1..k {
            output = output.sqr();
        }
        output
    }

    // returns (z^(2^250-1), z^11), the common prefix of invert and pow22523
    fn pow22501(&self) -> (Fe, Fe) {
        let z2 = self.sqr();
        let z9 = &z2.pow2k(2) * self;
        let z11 = &z9 * &z2;
        let z_5_0 = &z11.sqr() * &z9;
        let z_10_0 = &z_5_0.pow2k(5) * &z_5_0;
        let z_20_0 = &z_10_0.pow2k(10) * &z_10_0;
        let z_40_0 = &z_20_0.pow2k(20) * &z_20_0;
        let z_50_0 = &z_40_0.pow2k(10) * &z_10_0;
        let z_100_0 = &z_50_0.pow2k(50) * &z_50_0;
        let z_200_0 = &z_100_0.pow2k(100) * &z_100_0;
        let z_250_0 = &z_200_0.pow2k(50) * &z_50_0;
        (z_250_0, z11)
    }

    /// z^(p-2), the inverse of z. Zero has no inverse and maps to zero.
    pub fn invert(&self) -> Fe {
        let (z_250_0, z11) = self.pow22501();
        // 2^255 - 32 + 11 = p - 2
        &z_250_0.pow2k(5) * &z11
    }

    // returns z^((p-5)/8) = z^(2^252-3)
    // used to compute square roots since we have p=5 (mod 8); see Cohen and Frey.
    pub(crate) fn pow22523(&self) -> Fe {
        let (z_250_0, _) = self.pow22501();
        &z_250_0.pow2k(2) * self
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore;
    use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable};
    use super::Fe;
    use hex_literal::hex;

    fn random_fe() -> Fe {
        let mut buf = [0u8; 32];
        rand::rng().fill_bytes(&mut buf);
        Fe::from_bytes(&buf)
    }

    fn small(n: u32) -> Fe {
        let mut buf = [0u8; 32];
        buf[..4].copy_from_slice(&n.to_le_bytes());
        Fe::from_bytes(&buf)
    }

    fn is_carried(a: &Fe) -> bool {
        a.buf.iter().all(|&limb| limb.abs() <= 1 << 26)
    }

    #[test]
    fn test_field25519_mul() {
        let a = hex!("b1dc286313d7299a176f9374958367d4a3d56d9608c0cad7678523c802eda07f");
        let expected = hex!("ce6a443014d9739f7fc518b426243183a09c4edb1a4686297c57a8e4da052c11");

        // Square-and-multiply to compute base^exponent
        let base = Fe::from_bytes(&a);
        let mut acc = Fe::ONE;
        let exponent = hex!("2f837addb1f94760139aaecb986f16159a3ce78e1c2fb7f4dc56b98caf92be79");

        for b in exponent {
            for i in (0..8).rev() {
                let bit = (b >> i) & 1;
                acc = acc.sqr();
                if bit == 1 {
                    acc *= &base;
                }
            }
        }
        let res = acc.to_bytes();
        assert_eq!(res, expected);
    }

    #[test]
    fn test_known_product_and_inverse() {
        let a = Fe::from_bytes(
            &hex!("efcdab8967452301efcdab8967452301efcdab8967452301efcdab8967452301")
        );
        let b = Fe::from_bytes(
            &hex!("2332547698badcfe1032547698badcfe1032547698badcfe1032547698badc7e")
        );
        assert_eq!(
            (&a * &b).to_bytes(),
            hex!("131ffa090bb9cf0ad6a38ed0254af9ee9628239740db22d357adb75d5b6c4c37")
        );
        assert_eq!(
            a.invert().to_bytes(),
            hex!("9c747763e16bcf1d1429795441e43cee864470b36bfef34ce81c9fa5e8a65601")
        );
    }

    #[test]
    fn test_field25519_invert() {
        for _ in 0..100 {
            let a = random_fe();
            if a.is_zero() {
                continue;
            }
            let b = a.invert();
            let c = &a * &b;
            assert_eq!(c, Fe::ONE);
            let mut e = [0u8; 32];
            e[0] = 1;
            assert_eq!(c.to_bytes(), e);
        }
    }

    #[test]
    fn test_invert_zero_is_zero() {
        assert_eq!(Fe::ZERO.invert(), Fe::ZERO);
        assert!(Fe::ZERO.invert().is_zero());
        // p itself is another representation of zero
        let p = Fe::from_bytes(&hex!("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f"));
        assert!(p.invert().is_zero());
    }

    #[test]
    fn test_add() {
        let mut buf = [0u8; 32];
        rand::rng().fill_bytes(&mut buf);
        let mut a = Fe::from_bytes(&buf);
        rand::rng().fill_bytes(&mut buf);
        let b = Fe::from_bytes(&buf);

        let c = &a + &b; // a + b
        let d = &c - &b; // a

        let a_bytes = a.to_bytes();
        let d_bytes = d.to_bytes();

        assert_eq!(a_bytes, d_bytes);

        a += &b; // a + b

        let apb_bytes = a.to_bytes();
        let c_bytes = c.to_bytes();
        assert_eq!(apb_bytes, c_bytes);

        a -= &b; // a

        let a_bytes2 = a.to_bytes();
        assert_eq!(a_bytes, a_bytes2);
    }

    #[test]
    fn test_identities() {
        for _ in 0..100 {
            let a = random_fe();
            assert_eq!(&a + &Fe::ZERO, a);
            assert_eq!(&a * &Fe::ONE, a);
            assert_eq!(&a - &a, Fe::ZERO);
            assert_eq!(&a + &(-&a), Fe::ZERO);
            assert_eq!(-&(-&a), a);
        }
    }

    #[test]
    fn test_ring_laws() {
        for _ in 0..100 {
            let a = random_fe();
            let b = random_fe();
            let c = random_fe();

            assert_eq!(&a + &b, &b + &a);
            assert_eq!(&a * &b, &b * &a);
            assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
            assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
            assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
            assert_eq!(a.sqr(), &a * &a);
        }
    }

    #[test]
    fn test_limbs_stay_bounded() {
        let mut a = random_fe();
        let b = random_fe();
        for _ in 0..1000 {
            a = &(&(&a - &b) * &a) + &b.sqr();
            a = &a - &(-&a);
            assert!(is_carried(&a));
        }
    }

    #[test]
    fn test_from_limbs() {
        assert_eq!(Fe::from_limbs([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]), Fe::ONE);
        assert_eq!(Fe::from_limbs([-1, 0, 0, 0, 0, 0, 0, 0, 0, 0]), -&Fe::ONE);

        // limb 1 starts at bit 26, limb 9 at bit 230
        let mut buf = [0u8; 32];
        buf[3] = 0x04;
        assert_eq!(Fe::from_limbs([0, 1, 0, 0, 0, 0, 0, 0, 0, 0]).to_bytes(), buf);
        let mut buf = [0u8; 32];
        buf[28] = 0x40;
        assert_eq!(Fe::from_limbs([0, 0, 0, 0, 0, 0, 0, 0, 0, 1]).to_bytes(), buf);

        let a = random_fe();
        assert_eq!(Fe::from_limbs(a.buf), a);
    }

    #[test]
    fn test_sqrtm1() {
        // I * I + 1 = 0
        let i2 = Fe::SQRTM1.sqr();
        assert_eq!(&i2 + &Fe::ONE, Fe::ZERO);
        assert_eq!(i2, -&Fe::ONE);
    }

    #[test]
    fn test_curve_constants() {
        // d * 121666 = -121665
        let lhs = &Fe::D * &small(121666);
        assert_eq!(&lhs + &small(121665), Fe::ZERO);
        assert_eq!(Fe::D2, &Fe::D + &Fe::D);
    }

    #[test]
    fn test_encoding_reduces() {
        // 2^255 - 1 = p + 18
        let all_ones = Fe::from_bytes(&[0xff; 32]);
        assert_eq!(
            all_ones.to_bytes(),
            hex!("1200000000000000000000000000000000000000000000000000000000000000")
        );

        let p = Fe::from_bytes(&hex!("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f"));
        assert_eq!(p.to_bytes(), [0u8; 32]);

        let p_minus_1 = hex!("ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert_eq!(Fe::from_bytes(&p_minus_1).to_bytes(), p_minus_1);
        assert_eq!(Fe::from_bytes(&p_minus_1), -&Fe::ONE);
    }

    #[test]
    fn test_encoding_roundtrip() {
        for _ in 0..100 {
            let a = random_fe();
            let bytes = a.to_bytes();
            assert_eq!(bytes[31] & 0x80, 0);
            assert_eq!(Fe::from_bytes(&bytes), a);
            assert_eq!(Fe::from_bytes(&bytes).to_bytes(), bytes);
        }
    }

    #[test]
    fn test_sign() {
        assert!(!Fe::ZERO.is_negative());
        assert!(Fe::ONE.is_negative());
        // -1 = p - 1 is even
        assert!(!(-&Fe::ONE).is_negative());
    }

    #[test]
    fn test_conditional_ops() {
        let a = random_fe();
        let b = random_fe();
        assert_eq!(Fe::conditional_select(&a, &b, Choice::from(0)), a);
        assert_eq!(Fe::conditional_select(&a, &b, Choice::from(1)), b);

        let mut c = a;
        c.conditional_negate(Choice::from(0));
        assert_eq!(c, a);
        c.conditional_negate(Choice::from(1));
        assert_eq!(c, -&a);
    }

    #[test]
    fn test_pow22523() {
        // (z^((p-5)/8))^2 * z^2 = z^((p-1)/4) * z, a fourth root of unity times z
        let z = random_fe();
        let w = z.pow22523();
        let s = &w.sqr() * &z.sqr();
        let zi = &z * &Fe::SQRTM1;
        assert!(s == z || s == -&z || s == zi || s == -&zi);
    }
}
