use rand::SeedableRng;
use rand::rngs::StdRng;
use schnorr::{PublicKey, Signature, SigningKey, content_hash, verify_raw};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let pk = PublicKey::from(&sk);

    let sk_bytes = bincode::serialize(&sk).expect("serialize sk");
    let pk_bytes = bincode::serialize(&pk).expect("serialize pk");

    let msg = content_hash("hello schnorr");
    let sig = sk.sign_with_rng(&mut rng, &msg).expect("sign");
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");

    let sk2: SigningKey = bincode::deserialize(&sk_bytes).expect("deserialize sk");
    let pk2: PublicKey = bincode::deserialize(&pk_bytes).expect("deserialize pk");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    assert!(pk2.verify(&msg, &sig2));
    assert!(!pk2.verify(&content_hash("hello schnorr!"), &sig2));
    assert_eq!(sk2.public_key(), pk);

    // Same check over raw wire bytes, x-only and full key forms
    let raw_sig = sig.to_bytes();
    let full = pk.to_uncompressed().expect("full key");
    assert!(verify_raw(msg.as_bytes(), &raw_sig, &full));
    assert!(verify_raw(msg.as_bytes(), &raw_sig, &pk.x_only()));

    println!("public key x: {:02x?}", pk.x_only());
    println!("signature:    {:02x?}", raw_sig);
}
