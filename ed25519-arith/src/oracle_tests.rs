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

// Agreement with the arbitrary precision arithmetic of ed25519-oracle.

use ed25519_oracle::{
    self as oracle,
    FieldElement,
    RefPoint
};
use rand::{
    rngs::ThreadRng,
    RngCore
};

use crate::{
    element::{
        CoordinateSystem,
        GroupElement
    },
    encoding::CompressedPoint,
    field::Fe,
    points::ExtendedPoint,
    scalarmult::PrecomputationTable
};

const ALL: [CoordinateSystem; 6] = [
    CoordinateSystem::Affine,
    CoordinateSystem::P2,
    CoordinateSystem::P3,
    CoordinateSystem::P1xP1,
    CoordinateSystem::Precomputed,
    CoordinateSystem::Cached
];

fn to_oracle_system(system: CoordinateSystem) -> oracle::CoordinateSystem {
    match system {
        CoordinateSystem::Affine      => oracle::CoordinateSystem::Affine,
        CoordinateSystem::P2          => oracle::CoordinateSystem::P2,
        CoordinateSystem::P3          => oracle::CoordinateSystem::P3,
        CoordinateSystem::P1xP1       => oracle::CoordinateSystem::P1xP1,
        CoordinateSystem::Precomputed => oracle::CoordinateSystem::Precomputed,
        CoordinateSystem::Cached      => oracle::CoordinateSystem::Cached
    }
}

fn random_z(rng: &mut ThreadRng) -> FieldElement {
    loop {
        let z = oracle::random_field_element(rng);
        if !z.is_zero() {
            return z;
        }
    }
}

// the oracle point in P3, with a random Z
fn to_extended(p: &RefPoint, rng: &mut ThreadRng) -> ExtendedPoint {
    let c = p.to_representation(oracle::CoordinateSystem::P3, &random_z(rng));
    ExtendedPoint::new(
        Fe::from_bytes(&c[0]),
        Fe::from_bytes(&c[1]),
        Fe::from_bytes(&c[2]),
        Fe::from_bytes(&c[3])
    )
}

fn coordinates(g: &GroupElement) -> Vec<[u8; 32]> {
    let fes = match g {
        GroupElement::Affine(p)      => vec![p.x, p.y],
        GroupElement::P2(p)          => vec![p.x, p.y, p.z],
        GroupElement::P3(p)          => vec![p.x, p.y, p.z, p.t],
        GroupElement::P1xP1(p)       => vec![p.x, p.y, p.z, p.t],
        GroupElement::Precomputed(p) => vec![p.y_plus_x, p.y_minus_x, p.xy2d],
        GroupElement::Cached(p)      => vec![p.y_plus_x, p.y_minus_x, p.z, p.t2d]
    };
    fes.iter().map(Fe::to_bytes).collect()
}

fn random_bytes(rng: &mut ThreadRng) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    bytes
}

#[test]
fn test_field_ops_match_oracle() {
    let mut rng = rand::rng();
    for _ in 0..1000 {
        let a = oracle::random_field_element(&mut rng);
        let b = oracle::random_field_element(&mut rng);
        let fa = Fe::from_bytes(&a.to_bytes());
        let fb = Fe::from_bytes(&b.to_bytes());

        assert_eq!((&fa + &fb).to_bytes(), (&a + &b).to_bytes());
        assert_eq!((&fa - &fb).to_bytes(), (&a - &b).to_bytes());
        assert_eq!((-&fa).to_bytes(), (-&a).to_bytes());
        assert_eq!((&fa * &fb).to_bytes(), (&a * &b).to_bytes());
        assert_eq!(fa.sqr().to_bytes(), a.square().to_bytes());
        assert_eq!(fa.invert().to_bytes(), a.invert().to_bytes());
        assert_eq!(fa.is_negative(), a.is_negative());
    }
}

#[test]
fn test_double_matches_oracle() {
    let mut rng = rand::rng();
    for _ in 0..1000 {
        let g = oracle::random_group_element(&mut rng);
        let p = to_extended(&g, &mut rng);
        let expected = g.double().encode();

        assert_eq!(p.dbl().to_extended().compress().0, expected);
        assert_eq!(p.to_projective().dbl().to_projective().compress().0, expected);
    }
}

#[test]
fn test_add_matches_oracle() {
    let mut rng = rand::rng();
    for _ in 0..1000 {
        let g = oracle::random_group_element(&mut rng);
        let h = oracle::random_group_element(&mut rng);
        let p = to_extended(&g, &mut rng);
        let q = to_extended(&h, &mut rng);

        let sum = g.add(&h).encode();
        assert_eq!((&p + &q.to_cached()).to_extended().compress().0, sum);
        assert_eq!((&p + &q.to_precomputed()).to_extended().compress().0, sum);
        assert_eq!((&p + &q).compress().0, sum);

        let diff = g.add(&h.negate()).encode();
        assert_eq!((&p - &q.to_cached()).to_extended().compress().0, diff);
        assert_eq!((&p - &q.to_precomputed()).to_extended().compress().0, diff);
        assert_eq!((&p - &q).compress().0, diff);

        assert_eq!((-&p).compress().0, g.negate().encode());
    }
}

#[test]
fn test_group_identities_on_random_points() {
    let mut rng = rand::rng();
    for _ in 0..1000 {
        let g = oracle::random_group_element(&mut rng);
        let p = to_extended(&g, &mut rng);

        // P + (-P) = 0
        assert_eq!((&p + &(-&p).to_cached()).to_extended(), ExtendedPoint::IDENTITY);
        assert_eq!((&p + &(-&p).to_precomputed()).to_extended(), ExtendedPoint::IDENTITY);
        assert_eq!((&p - &p.to_cached()).to_extended(), ExtendedPoint::IDENTITY);

        // P + 0 = P
        assert_eq!((&p + &ExtendedPoint::IDENTITY.to_cached()).to_extended(), p);
        assert_eq!(g.add(&RefPoint::neutral()), g);
    }

    for _ in 0..50 {
        let g = oracle::random_group_element(&mut rng);
        let p = to_extended(&g, &mut rng);

        // 0 * P = 0
        assert_eq!(p.scalar_mul(&[0; 32]), ExtendedPoint::IDENTITY);
        assert_eq!(PrecomputationTable::new(&p).scalar_mul(&[0; 32]), ExtendedPoint::IDENTITY);
        assert_eq!(
            ExtendedPoint::double_scalar_mul_vartime(&[0; 32], &p, &[0; 32]),
            ExtendedPoint::IDENTITY
        );
        assert_eq!(g.scalar_mul(&[0; 32]), RefPoint::neutral());
    }
}

fn check_scalar_mul(count: usize) {
    let mut rng = rand::rng();
    let base = RefPoint::base_point();
    for _ in 0..count {
        let g = oracle::random_group_element(&mut rng);
        let p = to_extended(&g, &mut rng);
        let a = random_bytes(&mut rng);
        let b = oracle::random_scalar(&mut rng);

        let expected = g.scalar_mul(&a);
        assert_eq!(p.scalar_mul(&a).compress().0, expected.encode());

        let base_b = base.scalar_mul(&b);
        assert_eq!(ExtendedPoint::mul_base(&b).compress().0, base_b.encode());
        assert_eq!(
            ExtendedPoint::double_scalar_mul_vartime(&a, &p, &b).compress().0,
            expected.add(&base_b).encode()
        );
    }
}

#[test]
fn test_scalar_mul_matches_oracle() {
    check_scalar_mul(100);
}

#[ignore]
#[test]
fn test_scalar_mul_matches_oracle_long() {
    // this test is long, so it is ignored by default
    check_scalar_mul(1000);
}

#[test]
fn test_precomputation_table_matches_oracle() {
    let mut rng = rand::rng();
    let g = oracle::random_group_element(&mut rng);
    let table = PrecomputationTable::new(&to_extended(&g, &mut rng));
    for _ in 0..10 {
        let a = random_bytes(&mut rng);
        assert_eq!(table.scalar_mul(&a).compress().0, g.scalar_mul(&a).encode());
    }
}

#[test]
fn test_representations_match_oracle() {
    let mut rng = rand::rng();
    for _ in 0..100 {
        let g = oracle::random_group_element(&mut rng);
        let z = random_z(&mut rng);
        let c = g.to_representation(oracle::CoordinateSystem::P3, &z);
        let p = GroupElement::P3(ExtendedPoint::new(
            Fe::from_bytes(&c[0]),
            Fe::from_bytes(&c[1]),
            Fe::from_bytes(&c[2]),
            Fe::from_bytes(&c[3])
        ));

        for system in ALL {
            let q = p.to_representation(system).unwrap();
            assert_eq!(coordinates(&q), g.to_representation(to_oracle_system(system), &z));
        }
    }
}

#[test]
fn test_representation_invariance() {
    let mut rng = rand::rng();
    for _ in 0..1000 {
        let g = oracle::random_group_element(&mut rng);
        let p = GroupElement::P3(to_extended(&g, &mut rng));

        let forms: Vec<GroupElement> = ALL.iter()
            .map(|&system| p.to_representation(system).unwrap())
            .collect();
        for f in &forms {
            assert!(f.is_on_curve());
            for h in &forms {
                assert_eq!(f, h);
            }
        }

        // P3 -> P2 -> P3 and P3 -> P1xP1 -> P3
        for system in [CoordinateSystem::P2, CoordinateSystem::P1xP1, CoordinateSystem::Affine] {
            let back = p.to_representation(system)
                .and_then(|q| q.to_representation(CoordinateSystem::P3))
                .unwrap();
            assert_eq!(back, p);
            assert!(back.is_on_curve());
        }
    }
}

#[test]
fn test_decode_matches_oracle() {
    let mut rng = rand::rng();
    for _ in 0..1000 {
        let bytes = random_bytes(&mut rng);
        let encoded = CompressedPoint(bytes);
        match RefPoint::decode(&bytes) {
            Some(g) => {
                let p = encoded.decompress().unwrap();
                assert!(p.is_on_curve());
                assert_eq!(p.compress().0, g.encode());
                assert_eq!(encoded.affine_x().unwrap().to_bytes(), g.x.to_bytes());
                assert_eq!(encoded.affine_y().to_bytes(), g.y.to_bytes());
            },
            None => {
                assert!(encoded.decompress().is_err());
                assert!(encoded.affine_x().is_err());
            }
        }
    }
}

#[test]
fn test_encode_decode_roundtrip() {
    let mut rng = rand::rng();
    for _ in 0..1000 {
        let g = oracle::random_group_element(&mut rng);
        let encoded = g.encode();
        let p = CompressedPoint(encoded).decompress().unwrap();
        assert_eq!(p.compress().0, encoded);
        assert_eq!(p.to_affine().x().to_bytes(), g.x.to_bytes());
        assert_eq!(p.to_affine().y().to_bytes(), g.y.to_bytes());
        assert_eq!(GroupElement::P3(p).to_representation(CoordinateSystem::Affine).map(|a| coordinates(&a)),
                   Ok(g.to_representation(oracle::CoordinateSystem::Affine, &FieldElement::one())));
    }
}
