use ark_serialize::{CanonicalDeserialize, SerializationError};

/// Serializes any `CanonicalSerialize` value to a byte vector in compressed
/// form, returning `Result<Vec<u8>, SerializationError>`.
#[macro_export]
macro_rules! to_bytes {
    ($x:expr) => {{
        let mut buf = ark_std::vec![];
        ark_serialize::CanonicalSerialize::serialize_compressed($x, &mut buf).map(|_| buf)
    }};
}

/// Reads back a value written with `to_bytes!`, rejecting trailing bytes.
pub fn from_bytes<T: CanonicalDeserialize>(bytes: &[u8]) -> Result<T, SerializationError> {
    let mut reader = bytes;
    let value = T::deserialize_compressed(&mut reader)?;
    if !reader.is_empty() {
        return Err(SerializationError::InvalidData);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::Polynomial;
    use ark_bls12_381::Fq;
    use ark_std::UniformRand;

    #[test]
    fn test_bytes_roundtrip() {
        let rng = &mut ark_std::test_rng();
        let poly = Polynomial::new((0..5).map(|_| Fq::rand(rng)).collect());
        let bytes = to_bytes!(&poly).unwrap();
        assert_eq!(from_bytes::<Polynomial<Fq>>(&bytes).unwrap(), poly);
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let poly = Polynomial::<Fq>::one();
        let mut bytes = to_bytes!(&poly).unwrap();
        bytes.push(0);
        assert!(from_bytes::<Polynomial<Fq>>(&bytes).is_err());
    }
}
