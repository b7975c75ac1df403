#[cfg(test)]
mod tests {
    use ark_bls12_381::{g1::Config, Fq, G1Affine};
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
    use ark_std::UniformRand;
    use divisor_witness::curve::random_point;
    use divisor_witness::utils::from_bytes;
    use divisor_witness::witness::incremental_witness;
    use divisor_witness::{to_bytes, Divisor, FunctionFelt, Place, Polynomial, RationalFunction};

    #[test]
    fn test_polynomial_bytes() {
        let rng = &mut ark_std::test_rng();
        let poly = Polynomial::new((0..6).map(|_| Fq::rand(rng)).collect());
        let bytes = to_bytes!(&poly).unwrap();
        assert_eq!(bytes.len(), poly.serialized_size(ark_serialize::Compress::Yes));
        assert_eq!(from_bytes::<Polynomial<Fq>>(&bytes).unwrap(), poly);

        let zero = to_bytes!(&Polynomial::<Fq>::zero()).unwrap();
        assert!(from_bytes::<Polynomial<Fq>>(&zero).unwrap().is_zero());
    }

    #[test]
    fn test_rational_function_is_reduced_on_read() {
        let rng = &mut ark_std::test_rng();
        let common = Polynomial::new(vec![Fq::rand(rng), Fq::rand(rng)]);
        let num = Polynomial::new(vec![Fq::rand(rng), Fq::rand(rng), Fq::rand(rng)]);
        let den = Polynomial::new(vec![Fq::rand(rng), Fq::rand(rng)]);

        // an unreduced pair written field by field
        let mut bytes = vec![];
        (&num * &common).serialize_compressed(&mut bytes).unwrap();
        (&den * &common).serialize_compressed(&mut bytes).unwrap();

        let read = RationalFunction::<Fq>::deserialize_compressed(&bytes[..]).unwrap();
        assert_eq!(read, RationalFunction::new(num, den).unwrap());

        let mut zero_den = vec![];
        Polynomial::<Fq>::one().serialize_compressed(&mut zero_den).unwrap();
        Polynomial::<Fq>::zero().serialize_compressed(&mut zero_den).unwrap();
        assert!(RationalFunction::<Fq>::deserialize_compressed(&zero_den[..]).is_err());
    }

    #[test]
    fn test_divisor_and_witness_bytes() {
        let rng = &mut ark_std::test_rng();
        let p = random_point::<Config, _>(rng);
        let q = random_point::<Config, _>(rng);
        let s = random_point::<Config, _>(rng);
        let t = (p + q - s).into_affine();
        let d = Divisor::from_affine([(p, 1), (q, 1), (s, -1), (t, -1)]);
        assert!(d.is_principal());

        let bytes = to_bytes!(&d).unwrap();
        let read: Divisor<Config> = from_bytes(&bytes).unwrap();
        assert_eq!(read, d);
        assert_eq!(read.multiplicity(&Place::from(s)), -1);

        let f = incremental_witness(&d).unwrap();
        let read: FunctionFelt<Config> = from_bytes(&to_bytes!(&f).unwrap()).unwrap();
        assert_eq!(read, f);
    }

    #[test]
    fn test_place_tags() {
        let infinity = to_bytes!(&Place::<Fq>::Infinity).unwrap();
        assert_eq!(infinity, vec![1u8]);
        assert_eq!(from_bytes::<Place<Fq>>(&infinity).unwrap(), Place::Infinity);
        assert!(from_bytes::<Place<Fq>>(&[7u8]).is_err());

        let g = G1Affine::generator();
        let bytes = to_bytes!(&Place::from(g)).unwrap();
        assert_eq!(bytes[0], 0);
        assert_eq!(from_bytes::<Place<Fq>>(&bytes).unwrap().to_affine::<Config>(), g);
    }
}
