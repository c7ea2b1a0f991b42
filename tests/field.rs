use eddsa::Error;
use eddsa::math::curve::ED25519_Q;
use eddsa::math::{BigFieldElement, Fe25519, FieldElement, FiniteField};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn random_bytes(rng: &mut StdRng) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    bytes
}

fn pair(bytes: &[u8; 32]) -> (Fe25519, BigFieldElement) {
    (
        Fe25519::from_bytes(bytes).unwrap(),
        BigFieldElement::from_bytes(bytes).unwrap(),
    )
}

#[test]
fn limb_backend_matches_big_integer_backend() {
    let mut rng = StdRng::seed_from_u64(0x25519);

    for _ in 0..200 {
        let (a, a_ref) = pair(&random_bytes(&mut rng));
        let (b, b_ref) = pair(&random_bytes(&mut rng));

        assert_eq!(a.to_bytes(), a_ref.to_bytes(), "decode");
        assert_eq!(a.add(&b).to_bytes(), a_ref.add(&b_ref).to_bytes(), "add");
        assert_eq!(
            a.subtract(&b).to_bytes(),
            a_ref.subtract(&b_ref).to_bytes(),
            "subtract"
        );
        assert_eq!(
            a.multiply(&b).to_bytes(),
            a_ref.multiply(&b_ref).to_bytes(),
            "multiply"
        );
        assert_eq!(a.square().to_bytes(), a_ref.square().to_bytes(), "square");
        assert_eq!(
            a.square_and_double().to_bytes(),
            a_ref.square_and_double().to_bytes(),
            "square_and_double"
        );
        assert_eq!(a.negate().to_bytes(), a_ref.negate().to_bytes(), "negate");
        assert_eq!(a.invert().to_bytes(), a_ref.invert().to_bytes(), "invert");
        assert_eq!(
            a.pow22523().to_bytes(),
            a_ref.pow22523().to_bytes(),
            "pow22523"
        );
        assert_eq!(a.is_negative(), a_ref.is_negative(), "is_negative");
    }
}

#[test]
fn long_operation_chains_stay_reduced() {
    let mut rng = StdRng::seed_from_u64(7);
    let (mut a, mut a_ref) = pair(&random_bytes(&mut rng));
    let (b, b_ref) = pair(&random_bytes(&mut rng));

    for _ in 0..100 {
        a = a.add(&b).multiply(&a).subtract(&b).negate().square_and_double();
        a_ref = a_ref
            .add(&b_ref)
            .multiply(&a_ref)
            .subtract(&b_ref)
            .negate()
            .square_and_double();
    }

    assert_eq!(a.to_bytes(), a_ref.to_bytes());
}

#[test]
fn invert_is_multiplicative_inverse() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..50 {
        let a = Fe25519::from_bytes(&random_bytes(&mut rng)).unwrap();
        if !a.is_non_zero() {
            continue;
        }
        assert_eq!(a.multiply(&a.invert()), Fe25519::one());
        assert_eq!(a.divide(&a), Fe25519::one());
    }
}

#[test]
fn exponent_chains_match_generic_pow() {
    let field = FiniteField::<Fe25519>::new(256, &ED25519_Q).unwrap();
    let mut rng = StdRng::seed_from_u64(13);

    for _ in 0..10 {
        let a = Fe25519::from_bytes(&random_bytes(&mut rng)).unwrap();
        assert_eq!(a.pow(field.q_minus_2()), a.invert());
        assert_eq!(a.pow(field.q_minus_5_div_8()), a.pow22523());
    }
}

#[test]
fn field_constants() {
    let field = FiniteField::<Fe25519>::new(256, &ED25519_Q).unwrap();

    assert_eq!(field.b(), 256);
    assert_eq!(field.q(), &ED25519_Q);
    assert_eq!(field.zero(), &Fe25519::zero());
    assert_eq!(field.one(), &Fe25519::one());
    assert_eq!(field.two(), &Fe25519::one().add_one());
    assert_eq!(field.four(), &field.two().add(field.two()));
    assert_eq!(field.five(), &field.four().add_one());
    assert_eq!(field.eight(), &field.four().add(field.four()));

    let mut q_minus_2 = ED25519_Q;
    q_minus_2[0] -= 2;
    assert_eq!(field.q_minus_2(), &q_minus_2);

    // (2^255 - 24) / 8 = 2^252 - 3
    let mut expected = [0xffu8; 32];
    expected[0] = 0xfd;
    expected[31] = 0x0f;
    assert_eq!(field.q_minus_5_div_8(), &expected);
}

#[test]
fn encoding_is_canonical() {
    // q itself decodes to zero, q + 1 to one.
    let zero = Fe25519::from_bytes(&ED25519_Q).unwrap();
    assert_eq!(zero.to_bytes(), [0u8; 32]);
    assert!(!zero.is_non_zero());

    let mut q_plus_1 = ED25519_Q;
    q_plus_1[0] += 1;
    assert_eq!(Fe25519::from_bytes(&q_plus_1).unwrap(), Fe25519::one());

    // Bit 255 is ignored.
    let mut high = [0u8; 32];
    high[0] = 9;
    high[31] = 0x80;
    let mut low = [0u8; 32];
    low[0] = 9;
    assert_eq!(
        Fe25519::from_bytes(&high).unwrap(),
        Fe25519::from_bytes(&low).unwrap()
    );

    // 2^255 - 1 reduces to 18.
    let mut all = [0xffu8; 32];
    all[31] = 0x7f;
    let mut eighteen = [0u8; 32];
    eighteen[0] = 18;
    assert_eq!(Fe25519::from_bytes(&all).unwrap().to_bytes(), eighteen);
}

#[test]
fn negative_means_odd() {
    let one = Fe25519::one();
    assert!(one.is_negative());
    assert!(!one.add_one().is_negative());
    // -1 = q - 1 is even.
    assert!(!one.negate().is_negative());
    assert_eq!(one.subtract_one(), Fe25519::zero());
}

#[test]
fn cmov_selects_without_mixing() {
    let a = Fe25519::one();
    let b = Fe25519::one().add_one().add_one();

    assert_eq!(a.cmov(&b, 0), a);
    assert_eq!(a.cmov(&b, 1), b);

    let a_ref = BigFieldElement::one();
    let b_ref = a_ref.add_one();
    assert_eq!(a_ref.cmov(&b_ref, 1), b_ref);
    assert_eq!(a_ref.cmov(&b_ref, 0), a_ref);
}

#[test]
fn wrong_length_is_rejected() {
    assert_eq!(
        Fe25519::from_bytes(&[0u8; 31]).unwrap_err(),
        Error::InvalidLength {
            expected: 32,
            actual: 31
        }
    );
    assert!(BigFieldElement::from_bytes(&[0u8; 33]).is_err());
    assert!(FiniteField::<Fe25519>::new(256, &[0u8; 16]).is_err());
}
