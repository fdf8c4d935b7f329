use passcrypt::password::{
    self, Algorithm, Config, Crypter, ErrorKind, Scrypt, ScryptParams,
};

const SAMPLE: &str = "$scrypt,N=1,r=2,p=3,len=4$AAEC$AwQF";

fn fast() -> Config {
    Config::new(Algorithm::Scrypt, ScryptParams::new(1 << 10, 8, 1, 32))
}

/// Outcome of decoding, comparable across runs.
fn outcome(src: &str) -> Result<String, (ErrorKind, Option<usize>)> {
    match password::from_encoded(src) {
        Ok(crypter) => crypter.marshal().map_err(|e| (e.kind(), e.offset())),
        Err(e) => Err((e.kind(), e.offset())),
    }
}

#[test]
fn marshal_literal() {
    let scheme = Scrypt::from_parts(ScryptParams::new(1, 2, 3, 4), vec![0, 1, 2], vec![3, 4, 5]);
    assert_eq!(scheme.marshal().unwrap(), SAMPLE);
}

#[test]
fn unmarshal_literal() {
    let mut scheme = Scrypt::empty();
    scheme.unmarshal(SAMPLE).unwrap();

    assert_eq!(scheme.id(), "scrypt");
    assert_eq!(*scheme.params(), ScryptParams::new(1, 2, 3, 4));
    assert_eq!(scheme.salt(), &[0, 1, 2]);
    assert_eq!(scheme.digest(), &[3, 4, 5]);
}

#[test]
fn hash_compare_rehash() {
    let mut scheme = fast().crypter();

    scheme.hash(b"something").unwrap();
    scheme.compare(b"something").unwrap();
    assert!(scheme.compare(b"else").unwrap_err().is_mismatch());

    scheme.hash(b"else").unwrap();
    assert!(scheme.compare(b"something").unwrap_err().is_mismatch());
    scheme.compare(b"else").unwrap();
}

#[test]
fn stored_credential_round_trip() {
    let stored = password::hash_password(&fast(), b"correct horse").unwrap();

    let restored = password::from_encoded(&stored).unwrap();
    assert_eq!(restored.marshal().unwrap(), stored);
    restored.compare(b"correct horse").unwrap();
    assert_eq!(
        restored.compare(b"battery staple").unwrap_err().kind(),
        ErrorKind::PasswordMismatch
    );
}

#[test]
fn empty_and_binary_passwords() {
    for pw in [&b""[..], &[0, 255, 0, 255][..], "pässwörd".as_bytes()] {
        let stored = password::hash_password(&fast(), pw).unwrap();
        password::verify_password(&stored, pw).unwrap();
    }
}

#[test]
fn short_salt_segment() {
    let err = password::from_encoded("$scrypt,N=16,r=1,p=1,len=16$AAEC$AwQFBgcICQoLDA0ODxAREhMU")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSerialization);
}

#[test]
fn unknown_parameter_key() {
    let err = password::from_encoded("$scrypt,N=1,r=2,q=5,len=4$AAEC$AwQF").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSerialization);
}

#[test]
fn unknown_identifier() {
    let err = password::from_encoded("$pbkdf2,N=1,r=2,p=3,len=4$AAEC$AwQF").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownId);
}

#[test]
fn zero_parameter() {
    let err = password::from_encoded("$scrypt,N=1,r=0,p=3,len=4$AAEC$AwQF").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidObject);
}

#[test]
fn truncations_never_panic_and_are_stable() {
    let stored = password::hash_password(&fast(), b"something").unwrap();

    let hash_start = stored.rfind('$').unwrap() + 1;

    for end in 0..stored.len() {
        let src = &stored[..end];
        let first = outcome(src);
        if end <= hash_start {
            assert!(first.is_err(), "truncation to {end} decoded: {src:?}");
        }
        assert_eq!(first, outcome(src), "input: {src:?}");
    }
}

#[test]
fn mutations_never_panic_and_are_stable() {
    let replacements = ['$', ',', '=', 'A', '-', '_', '0', '9', 'x', ' ', 'é'];

    for (at, _) in SAMPLE.char_indices() {
        for with in replacements {
            let mut src = String::with_capacity(SAMPLE.len() + 1);
            src.push_str(&SAMPLE[..at]);
            src.push(with);
            src.push_str(&SAMPLE[at + 1..]);

            assert_eq!(outcome(&src), outcome(&src), "input: {src:?}");
        }
    }
}

#[test]
fn oversized_cost_is_rejected_before_hashing() {
    let err = password::verify_password("$scrypt,N=1099511627776,r=8,p=1,len=4$AAEC$AwQF", b"x")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyDerivationFailure);
}
