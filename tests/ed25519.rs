use std::sync::Arc;

use eddsa::keys::clamp;
use eddsa::{Engine, Error, KeyPairGenerator, Mode, PrivateKey, PublicKey, Signature, params};

use rand::SeedableRng;
use rand::rngs::StdRng;

struct Vector {
    seed: &'static str,
    public: &'static str,
    message: &'static str,
    signature: &'static str,
}

const VECTORS: &[Vector] = &[
    // RFC 8032 §7.1, TEST 1
    Vector {
        seed: "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
        public: "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
        message: "",
        signature: "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
    },
    // RFC 8032 §7.1, TEST 2
    Vector {
        seed: "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
        public: "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
        message: "72",
        signature: "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
    },
    // RFC 8032 §7.1, TEST 3
    Vector {
        seed: "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
        public: "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
        message: "af82",
        signature: "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
    },
];

const ZERO_SEED_PUBLIC: &str = "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29";
const ZERO_SEED_SIGNATURE: &str = "94825896c7075c31bcb81f06dba2bdcd9dcf16e79288d4b9f87c248215c8468d475f429f3de3b4a2cf67fe17077ae19686020364d6d4fa7a0174bab4a123ba0f";
const SECRET_MESSAGE: &[u8] = b"This is a secret message";

fn key_from_hex(seed: &str) -> PrivateKey {
    PrivateKey::from_seed(&hex::decode(seed).unwrap(), params::ed25519().unwrap()).unwrap()
}

fn sign(key: &PrivateKey, message: &[u8]) -> Signature {
    let mut engine = Engine::new();
    engine.init_sign(key).unwrap();
    engine.update(message).unwrap();
    engine.sign().unwrap()
}

fn verify(key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
    let mut engine = Engine::new();
    engine.init_verify(key).unwrap();
    engine.update(message).unwrap();
    engine.verify(signature).unwrap()
}

#[test]
fn rfc8032_vectors() {
    for vector in VECTORS {
        let key = key_from_hex(vector.seed);
        let message = hex::decode(vector.message).unwrap();

        assert_eq!(hex::encode(key.public_key().as_bytes()), vector.public);

        let signature = sign(&key, &message);
        assert_eq!(hex::encode(signature.as_bytes()), vector.signature);

        assert!(
            verify(key.public_key(), &message, signature.as_bytes()),
            "reference signature should be valid"
        );
    }
}

#[test]
fn zero_seed_vector() {
    let key = PrivateKey::from_seed(&[0u8; 32], params::ed25519().unwrap()).unwrap();
    assert_eq!(hex::encode(key.public_key().as_bytes()), ZERO_SEED_PUBLIC);

    let signature = sign(&key, SECRET_MESSAGE);
    assert_eq!(hex::encode(signature.as_bytes()), ZERO_SEED_SIGNATURE);

    let public =
        PublicKey::from_bytes(&hex::decode(ZERO_SEED_PUBLIC).unwrap(), params::ed25519().unwrap())
            .unwrap();
    assert_eq!(&public, key.public_key());
    assert!(verify(&public, SECRET_MESSAGE, signature.as_bytes()));
}

#[test]
fn tampering_is_detected() {
    let key = key_from_hex(VECTORS[1].seed);
    let message = b"Hello, world!";
    let signature = sign(&key, message).to_bytes();

    for byte in [0, 17, 31, 32, 44, 63] {
        let mut forged = signature;
        forged[byte] ^= 0x10;
        assert!(
            !verify(key.public_key(), message, &forged),
            "flip in byte {byte} must be detected"
        );
    }

    assert!(
        !verify(key.public_key(), b"Hello, world?", &signature),
        "message modification must be detected"
    );

    let other = key_from_hex(VECTORS[0].seed);
    assert!(
        !verify(other.public_key(), message, &signature),
        "signature must not verify under another key"
    );

    for bit in [0, 9, 100, 254, 255] {
        let mut bytes = key.public_key().to_bytes();
        bytes[bit / 8] ^= 1 << (bit % 8);
        match PublicKey::from_bytes(&bytes, params::ed25519().unwrap()) {
            Ok(flipped) => assert!(
                !verify(&flipped, message, &signature),
                "flip in public key bit {bit} must be detected"
            ),
            Err(err) => assert_eq!(err, Error::InvalidPoint),
        }
    }
}

#[test]
fn non_canonical_s_is_rejected() {
    let key = key_from_hex(VECTORS[0].seed);
    let signature = sign(&key, b"malleable").to_bytes();

    // S + ℓ names the same residue but must not be accepted.
    let mut forged = signature;
    let order = eddsa::math::scalar::GROUP_ORDER;
    let mut carry = 0u16;
    for i in 0..32 {
        let sum = forged[32 + i] as u16 + order[i] as u16 + carry;
        forged[32 + i] = sum as u8;
        carry = sum >> 8;
    }
    assert_eq!(carry, 0);

    assert!(verify(key.public_key(), b"malleable", &signature));
    assert!(!verify(key.public_key(), b"malleable", &forged));
}

#[test]
fn streaming_updates_match_single_update() {
    let key = key_from_hex(VECTORS[2].seed);
    let message = b"the quick brown fox jumps over the lazy dog";

    let mut engine = Engine::new();
    engine.init_sign(&key).unwrap();
    let (head, tail) = message.split_at(10);
    engine.update(head).unwrap();
    for &byte in &tail[..5] {
        engine.update_byte(byte).unwrap();
    }
    engine.update(&tail[5..]).unwrap();
    let streamed = engine.sign().unwrap();

    assert_eq!(streamed, sign(&key, message));
}

#[test]
fn engine_is_reusable_after_sign_and_verify() {
    let key = key_from_hex(VECTORS[0].seed);

    let mut signer = Engine::new();
    signer.init_sign(&key).unwrap();
    signer.update(b"first").unwrap();
    let first = signer.sign().unwrap();
    signer.update(b"second").unwrap();
    let second = signer.sign().unwrap();
    let empty = signer.sign().unwrap();

    assert_eq!(first, sign(&key, b"first"));
    assert_eq!(second, sign(&key, b"second"));
    assert_eq!(hex::encode(empty.as_bytes()), VECTORS[0].signature);

    let mut verifier = Engine::new();
    verifier.init_verify(key.public_key()).unwrap();
    verifier.update(b"first").unwrap();
    assert!(verifier.verify(second.as_bytes()).is_ok_and(|valid| !valid));
    verifier.update(b"second").unwrap();
    assert!(verifier.verify(second.as_bytes()).unwrap());
}

#[test]
fn reset_discards_pending_message() {
    let key = key_from_hex(VECTORS[1].seed);

    let mut engine = Engine::new();
    engine.init_sign(&key).unwrap();
    engine.update(b"discarded").unwrap();
    engine.reset();
    engine.update(&[0x72]).unwrap();

    assert_eq!(hex::encode(engine.sign().unwrap().as_bytes()), VECTORS[1].signature);
}

#[test]
fn one_shot_mode() {
    let key = key_from_hex(VECTORS[1].seed);
    let message = [0x72u8];

    let mut engine = Engine::new();
    engine.init_sign(&key).unwrap();
    let signature = engine.sign_one_shot(&message).unwrap();
    assert_eq!(hex::encode(signature.as_bytes()), VECTORS[1].signature);
    assert!(!engine.is_one_shot(), "one-shot ends with the session");

    engine.set_one_shot().unwrap();
    engine.update(&message).unwrap();
    assert_eq!(engine.update(&message).unwrap_err(), Error::OneShotReentry);
    assert_eq!(engine.update_byte(0x72).unwrap_err(), Error::OneShotByteUpdate);
    assert_eq!(engine.sign().unwrap(), signature);

    engine.update(b"buffered").unwrap();
    assert_eq!(engine.set_one_shot().unwrap_err(), Error::OneShotAfterUpdate);
    engine.reset();

    let mut verifier = Engine::new();
    verifier.init_verify(key.public_key()).unwrap();
    assert!(verifier.verify_one_shot(&message, signature.as_bytes()).unwrap());
    assert!(!verifier.verify_one_shot(b"other", signature.as_bytes()).unwrap());
}

#[test]
fn one_shot_without_update_signs_the_empty_message() {
    let key = key_from_hex(VECTORS[0].seed);

    let mut engine = Engine::new();
    engine.init_sign(&key).unwrap();
    engine.set_one_shot().unwrap();

    assert_eq!(hex::encode(engine.sign().unwrap().as_bytes()), VECTORS[0].signature);
}

#[test]
fn engine_state_errors() {
    let key = key_from_hex(VECTORS[0].seed);

    let mut engine: Engine = Engine::new();
    assert_eq!(engine.mode(), None);
    assert_eq!(engine.update(b"x").unwrap_err(), Error::NotInitialized);
    assert_eq!(engine.update_byte(1).unwrap_err(), Error::NotInitialized);
    assert_eq!(engine.sign().unwrap_err(), Error::NotInitialized);
    assert_eq!(engine.verify(&[0u8; 64]).unwrap_err(), Error::NotInitialized);

    engine.init_verify(key.public_key()).unwrap();
    assert_eq!(engine.mode(), Some(Mode::Verify));
    assert_eq!(
        engine.sign().unwrap_err(),
        Error::WrongMode {
            expected: Mode::Sign,
            actual: Mode::Verify
        }
    );

    engine.init_sign(&key).unwrap();
    assert_eq!(engine.mode(), Some(Mode::Sign));
    assert_eq!(
        engine.verify(&[0u8; 64]).unwrap_err(),
        Error::WrongMode {
            expected: Mode::Verify,
            actual: Mode::Sign
        }
    );
}

#[test]
fn wrong_signature_length_is_an_error_and_resets() {
    let key = key_from_hex(VECTORS[1].seed);
    let signature = hex::decode(VECTORS[1].signature).unwrap();

    let mut engine = Engine::new();
    engine.init_verify(key.public_key()).unwrap();
    engine.update(b"stale").unwrap();
    assert_eq!(
        engine.verify(&signature[..63]).unwrap_err(),
        Error::InvalidSignatureLength {
            expected: 64,
            actual: 63
        }
    );

    engine.update(&[0x72]).unwrap();
    assert!(engine.verify(&signature).unwrap());

    assert!(Signature::from_bytes(&signature[..10]).is_err());
    let parsed = Signature::from_bytes(&signature).unwrap();
    assert_eq!(parsed.r_bytes(), &signature[..32]);
    assert_eq!(parsed.s_bytes(), &signature[32..]);
}

#[test]
fn digest_mismatch_is_rejected() {
    let key = key_from_hex(VECTORS[0].seed);

    let mut engine = Engine::with_digest(eddsa::HashAlgorithm::Sha256);
    assert_eq!(
        engine.init_sign(&key).unwrap_err(),
        Error::DigestMismatch {
            engine: eddsa::HashAlgorithm::Sha256,
            key: eddsa::HashAlgorithm::Sha512,
        }
    );

    let mut engine = Engine::with_digest(eddsa::HashAlgorithm::Sha512);
    engine.init_verify(key.public_key()).unwrap();
}

#[test]
fn private_key_material() {
    let key = key_from_hex(VECTORS[0].seed);
    let seed = hex::decode(VECTORS[0].seed).unwrap();

    assert_eq!(key.seed().map(|s| &s[..]), Some(&seed[..]));

    let hash = key.hash_of_seed();
    let mut low = [0u8; 32];
    low.copy_from_slice(&hash[..32]);
    let clamped = low;
    clamp(&mut low);
    assert_eq!(low, clamped, "stored hash is already clamped");
    assert_eq!(key.scalar(), &clamped);
    assert_eq!(key.prefix(), &hash[32..]);

    let rebuilt = PrivateKey::from_hash(&hash[..], Arc::clone(key.params())).unwrap();
    assert!(rebuilt.seed().is_none());
    assert_eq!(rebuilt, key);
    assert_eq!(rebuilt.public_key(), key.public_key());

    assert!(matches!(
        PrivateKey::from_seed(&[0u8; 31], params::ed25519().unwrap()),
        Err(Error::InvalidSeedLength {
            expected: 32,
            actual: 31
        })
    ));
    assert!(matches!(
        PrivateKey::from_seed(&[0u8; 33], params::ed25519().unwrap()),
        Err(Error::InvalidSeedLength {
            expected: 32,
            actual: 33
        })
    ));
    assert!(matches!(
        PrivateKey::from_hash(&[0u8; 32], params::ed25519().unwrap()),
        Err(Error::InvalidHashLength { .. })
    ));

    let debug = format!("{key:?}");
    assert!(!debug.contains(VECTORS[0].seed), "secrets must not be printed");
}

#[test]
fn public_key_decoding() {
    let params = params::ed25519().unwrap();

    let mut invalid = None;
    for y in 2u8..66 {
        let mut bytes = [0u8; 32];
        bytes[0] = y;
        if let Err(err) = PublicKey::from_bytes(&bytes, Arc::clone(&params)) {
            invalid = Some(err);
            break;
        }
    }
    assert_eq!(invalid, Some(Error::InvalidPoint));

    assert!(matches!(
        PublicKey::from_bytes(&[0u8; 33], params),
        Err(Error::InvalidLength {
            expected: 32,
            actual: 33
        })
    ));
}

#[test]
fn generated_keys_sign_and_verify() {
    let mut rng = StdRng::seed_from_u64(0xed);
    let generator = KeyPairGenerator::new().unwrap();

    let (private, public) = generator.generate(&mut rng).unwrap();
    assert_eq!(private.public_key(), &public);

    let signature = sign(&private, b"generated");
    assert!(verify(&public, b"generated", signature.as_bytes()));

    let (other, _) = generator.generate(&mut rng).unwrap();
    assert_ne!(other, private);
}

#[test]
fn reused_engine_accepts_short_lived_buffers() {
    let key = key_from_hex(VECTORS[2].seed);

    let mut signer = Engine::new();
    signer.init_sign(&key).unwrap();
    let mut verifier = Engine::new();
    verifier.init_verify(key.public_key()).unwrap();

    for i in 0..3u8 {
        let buffer = vec![i; 4];
        signer.update(&buffer).unwrap();
        let signature = signer.sign().unwrap();
        assert_eq!(signature, sign(&key, &[i; 4]));

        verifier.update(&buffer).unwrap();
        assert!(
            verifier.verify(signature.as_bytes()).unwrap(),
            "round {i} should verify"
        );
    }
}

#[test]
fn update_one_shot_borrows_for_one_session() {
    let key = key_from_hex(VECTORS[1].seed);
    let message = [0x72u8];

    let mut engine = Engine::new();
    assert_eq!(engine.update_one_shot(&message).unwrap_err(), Error::NotInitialized);
    assert!(!engine.is_one_shot());

    engine.init_sign(&key).unwrap();
    engine.update_one_shot(&message).unwrap();
    assert!(engine.is_one_shot());
    assert_eq!(engine.update_one_shot(&message).unwrap_err(), Error::OneShotReentry);
    assert_eq!(engine.update(&message).unwrap_err(), Error::OneShotReentry);
    assert_eq!(hex::encode(engine.sign().unwrap().as_bytes()), VECTORS[1].signature);

    engine.update(b"buffered").unwrap();
    assert_eq!(
        engine.update_one_shot(&message).unwrap_err(),
        Error::OneShotAfterUpdate
    );
}

#[test]
fn public_key_from_point_checks_the_curve_equation() {
    let params = params::ed25519().unwrap();
    let one = eddsa::math::Fe25519::ONE;

    // (1, 1) satisfies −x² + y² = 0, never 1 + d·x²·y².
    let off_curve = eddsa::math::GroupElement::p3(one, one, one, one);
    assert_eq!(
        PublicKey::from_point(off_curve, Arc::clone(&params)).unwrap_err(),
        Error::InvalidPoint
    );

    let key = key_from_hex(VECTORS[0].seed);
    let rebuilt = PublicKey::from_point(key.public_key().point().clone(), params).unwrap();
    assert_eq!(&rebuilt, key.public_key());
}
