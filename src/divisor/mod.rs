use ark_ec::short_weierstrass::{Affine, Projective, SWCurveConfig};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::Zero;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use ark_std::collections::BTreeMap;
use ark_std::fmt;
use ark_std::ops::{Add, Neg, Sub};
use ark_std::vec::Vec;

use crate::curve::Place;
use crate::errors::WitnessError;

// Symmetric bound on stored multiplicities, so negation never overflows
const MAX_MULTIPLICITY: i64 = i64::MAX;

/// Formal sum of places of the curve with integer multiplicities.
///
/// Places are kept in an ordered map; repeated places are merged by summing
/// their multiplicities and places whose multiplicity cancels to zero are
/// dropped, so two divisors are equal iff they have the same entries.
pub struct Divisor<P: SWCurveConfig> {
    points: BTreeMap<Place<P::BaseField>, i64>,
}

impl<P: SWCurveConfig> Divisor<P> {
    /// Builds a divisor from `(place, multiplicity)` pairs. No validation is
    /// done: places need not be on the curve and the divisor need not be
    /// principal.
    ///
    /// Multiplicities are kept in `-i64::MAX..=i64::MAX`: a merged value
    /// outside that range saturates at its end. Use `try_new` to reject such
    /// input instead.
    pub fn new(entries: impl IntoIterator<Item = (Place<P::BaseField>, i64)>) -> Self {
        Self::from_merged(Self::merge(entries))
    }

    /// Like `new`, but fails with `WitnessError::InvalidDivisor` when a
    /// merged multiplicity leaves `-i64::MAX..=i64::MAX`.
    pub fn try_new(
        entries: impl IntoIterator<Item = (Place<P::BaseField>, i64)>,
    ) -> Result<Self, WitnessError> {
        let merged = Self::merge(entries);
        if merged.values().any(|m| m.unsigned_abs() > MAX_MULTIPLICITY as u128) {
            return Err(WitnessError::InvalidDivisor(
                "multiplicity out of range".to_string(),
            ));
        }
        Ok(Self::from_merged(merged))
    }

    // Sums repeated places exactly
    fn merge(
        entries: impl IntoIterator<Item = (Place<P::BaseField>, i64)>,
    ) -> BTreeMap<Place<P::BaseField>, i128> {
        let mut merged = BTreeMap::new();
        for (place, multiplicity) in entries {
            *merged.entry(place).or_insert(0i128) += multiplicity as i128;
        }
        merged
    }

    fn from_merged(merged: BTreeMap<Place<P::BaseField>, i128>) -> Self {
        let bound = MAX_MULTIPLICITY as i128;
        let points = merged
            .into_iter()
            .filter(|(_, multiplicity)| *multiplicity != 0)
            .map(|(place, multiplicity)| (place, multiplicity.clamp(-bound, bound) as i64))
            .collect();
        Self { points }
    }

    pub fn from_affine(entries: impl IntoIterator<Item = (Affine<P>, i64)>) -> Self {
        Self::new(
            entries
                .into_iter()
                .map(|(point, multiplicity)| (Place::from(point), multiplicity)),
        )
    }

    /// The principal divisor `[P_1] + ... + [P_n] + [-(P_1 + ... + P_n)] - (n + 1)[O]`.
    pub fn completing(points: &[Affine<P>]) -> Self {
        let sum: Projective<P> = points.iter().fold(Projective::zero(), |acc, p| acc + p);
        let closing = -sum.into_affine();
        let n = points.len() as i64;
        Self::from_affine(
            points
                .iter()
                .map(|p| (*p, 1))
                .chain([(closing, 1), (Affine::identity(), -(n + 1))]),
        )
    }

    /// Sum of all multiplicities, the point at infinity included. Summed in
    /// `i128`, which no divisor that fits in memory can overflow.
    pub fn degree(&self) -> i128 {
        self.points.values().map(|m| *m as i128).sum()
    }

    pub fn multiplicity(&self, place: &Place<P::BaseField>) -> i64 {
        self.points.get(place).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Place<P::BaseField>, i64)> + '_ {
        self.points.iter().map(|(place, multiplicity)| (place, *multiplicity))
    }

    /// Places with a nonzero multiplicity, in key order.
    pub fn support(&self) -> impl Iterator<Item = &Place<P::BaseField>> + '_ {
        self.points.keys()
    }

    pub fn support_size(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Affine points of the finite support with their multiplicities.
    pub fn finite_points(&self) -> impl Iterator<Item = (Affine<P>, i64)> + '_ {
        self.iter()
            .filter(|(place, _)| !place.is_infinity())
            .map(|(place, multiplicity)| (place.to_affine(), multiplicity))
    }

    /// Group law sum of the finite places weighted by their multiplicities.
    /// The point at infinity is the identity and contributes nothing.
    pub fn group_sum(&self) -> Affine<P> {
        self.finite_points()
            .fold(Projective::<P>::zero(), |acc, (point, multiplicity)| {
                let weighted = point.mul_bigint([multiplicity.unsigned_abs()]);
                if multiplicity < 0 {
                    acc - weighted
                } else {
                    acc + weighted
                }
            })
            .into_affine()
    }

    /// A divisor is principal iff it has degree zero and its places sum to
    /// the identity of the curve group.
    pub fn is_principal(&self) -> bool {
        self.degree() == 0 && self.group_sum().infinity
    }

    pub fn ensure_principal(&self) -> Result<(), WitnessError> {
        let degree = self.degree();
        if degree != 0 {
            return Err(WitnessError::NonPrincipalDivisor(format!(
                "degree is {degree}, expected 0"
            )));
        }
        if !self.group_sum().infinity {
            return Err(WitnessError::NonPrincipalDivisor(
                "points do not sum to the identity".to_string(),
            ));
        }
        Ok(())
    }

    /// Splits the finite part into the points of positive and of negative
    /// multiplicity, each point repeated `|multiplicity|` times.
    pub(crate) fn point_sequences(&self) -> (Vec<Affine<P>>, Vec<Affine<P>>) {
        let mut positive = Vec::new();
        let mut negative = Vec::new();
        for (point, multiplicity) in self.finite_points() {
            let target = if multiplicity > 0 {
                &mut positive
            } else {
                &mut negative
            };
            target.extend(ark_std::iter::repeat(point).take(multiplicity.unsigned_abs() as usize));
        }
        (positive, negative)
    }
}

impl<P: SWCurveConfig> Clone for Divisor<P> {
    fn clone(&self) -> Self {
        Self {
            points: self.points.clone(),
        }
    }
}

impl<P: SWCurveConfig> PartialEq for Divisor<P> {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl<P: SWCurveConfig> Eq for Divisor<P> {}

impl<P: SWCurveConfig> fmt::Debug for Divisor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.points.iter()).finish()
    }
}

impl<'a, P: SWCurveConfig> Neg for &'a Divisor<P> {
    type Output = Divisor<P>;

    fn neg(self) -> Divisor<P> {
        Divisor::new(self.iter().map(|(place, multiplicity)| (*place, -multiplicity)))
    }
}

impl<'a, 'b, P: SWCurveConfig> Add<&'a Divisor<P>> for &'b Divisor<P> {
    type Output = Divisor<P>;

    fn add(self, other: &'a Divisor<P>) -> Divisor<P> {
        Divisor::new(self.iter().chain(other.iter()).map(|(place, m)| (*place, m)))
    }
}

impl<'a, 'b, P: SWCurveConfig> Sub<&'a Divisor<P>> for &'b Divisor<P> {
    type Output = Divisor<P>;

    fn sub(self, other: &'a Divisor<P>) -> Divisor<P> {
        self + &(-other)
    }
}

// Multiplicities are written as two's complement u64 words
impl<P: SWCurveConfig> CanonicalSerialize for Divisor<P> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        (self.points.len() as u64).serialize_with_mode(&mut writer, compress)?;
        for (place, multiplicity) in self.points.iter() {
            place.serialize_with_mode(&mut writer, compress)?;
            (*multiplicity as u64).serialize_with_mode(&mut writer, compress)?;
        }
        Ok(())
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.points
            .keys()
            .map(|place| place.serialized_size(compress) + 8)
            .sum::<usize>()
            + 8
    }
}

impl<P: SWCurveConfig> Valid for Divisor<P> {
    fn check(&self) -> Result<(), SerializationError> {
        self.points.keys().try_for_each(|place| place.check())
    }
}

impl<P: SWCurveConfig> CanonicalDeserialize for Divisor<P> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let len = u64::deserialize_with_mode(&mut reader, compress, validate)?;
        let mut entries = Vec::new();
        for _ in 0..len {
            let place = Place::deserialize_with_mode(&mut reader, compress, validate)?;
            let multiplicity = u64::deserialize_with_mode(&mut reader, compress, validate)? as i64;
            entries.push((place, multiplicity));
        }
        Ok(Self::new(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::random_point;
    use ark_bls12_381::{g1::Config, G1Affine};

    #[test]
    fn test_merging_and_degree() {
        let rng = &mut ark_std::test_rng();
        let p = random_point::<Config, _>(rng);
        let q = random_point::<Config, _>(rng);

        let d = Divisor::from_affine([(p, 2), (q, 1), (p, -1), (q, -1)]);
        assert_eq!(d.multiplicity(&Place::from(p)), 1);
        assert_eq!(d.multiplicity(&Place::from(q)), 0);
        assert_eq!(d.support_size(), 1);
        assert_eq!(d.degree(), 1);
    }

    #[test]
    fn test_principal_triangle() {
        let rng = &mut ark_std::test_rng();
        let p = random_point::<Config, _>(rng);
        let q = random_point::<Config, _>(rng);
        let r = (-(p + q)).into_affine();

        let d = Divisor::from_affine([(p, 1), (q, 1), (r, 1), (G1Affine::identity(), -3)]);
        assert_eq!(d.degree(), 0);
        assert!(d.is_principal());
        assert!(d.ensure_principal().is_ok());
        assert_eq!(d, Divisor::completing(&[p, q]));
    }

    #[test]
    fn test_flipped_sign_is_not_principal() {
        let rng = &mut ark_std::test_rng();
        let points: Vec<G1Affine> = (0..5).map(|_| random_point::<Config, _>(rng)).collect();
        let d = Divisor::completing(&points);
        assert!(d.is_principal());

        let mut entries: Vec<_> = d.iter().map(|(place, m)| (*place, m)).collect();
        entries[0].1 = -entries[0].1;
        let flipped = Divisor::<Config>::new(entries);
        assert_ne!(flipped.degree(), 0);
        assert!(!flipped.is_principal());
        assert!(matches!(
            flipped.ensure_principal(),
            Err(WitnessError::NonPrincipalDivisor(_))
        ));
    }

    #[test]
    fn test_degree_zero_but_not_principal() {
        let rng = &mut ark_std::test_rng();
        let p = random_point::<Config, _>(rng);
        let q = random_point::<Config, _>(rng);
        let d = Divisor::from_affine([(p, 1), (q, 1), (G1Affine::identity(), -2)]);
        assert_eq!(d.degree(), 0);
        assert!(!d.is_principal());
    }

    #[test]
    fn test_weighted_group_sum() {
        let rng = &mut ark_std::test_rng();
        let p = random_point::<Config, _>(rng);
        let three_p = (p + p + p).into_affine();
        let d = Divisor::from_affine([(p, 3), (three_p, -1), (G1Affine::identity(), -2)]);
        assert_eq!(d.degree(), 0);
        assert!(d.is_principal());
    }

    #[test]
    fn test_divisor_arithmetic() {
        let rng = &mut ark_std::test_rng();
        let p = random_point::<Config, _>(rng);
        let q = random_point::<Config, _>(rng);
        let a = Divisor::completing(&[p]);
        let b = Divisor::completing(&[q]);

        let sum = &a + &b;
        assert!(sum.is_principal());
        assert_eq!(&sum - &b, a);
        assert!((&a - &a).is_empty());
        assert_eq!((-&a).degree(), 0);
    }

    #[test]
    fn test_huge_multiplicities() {
        let rng = &mut ark_std::test_rng();
        let p = random_point::<Config, _>(rng);
        let o = G1Affine::identity();

        // the true degree is 2^64, which wraps to 0 in i64
        let d = Divisor::from_affine([(p, i64::MAX), (-p, i64::MAX), (o, 2)]);
        assert_eq!(d.degree(), 2 * i64::MAX as i128 + 2);
        assert!(!d.is_principal());
        assert!(matches!(
            d.ensure_principal(),
            Err(WitnessError::NonPrincipalDivisor(_))
        ));
    }

    #[test]
    fn test_multiplicity_saturation() {
        let rng = &mut ark_std::test_rng();
        let p = random_point::<Config, _>(rng);

        let merged = Divisor::from_affine([(p, i64::MAX), (p, 1)]);
        assert_eq!(merged.multiplicity(&Place::from(p)), i64::MAX);
        assert!(matches!(
            Divisor::<Config>::try_new([(Place::from(p), i64::MAX), (Place::from(p), 1)]),
            Err(WitnessError::InvalidDivisor(_))
        ));

        // merging that comes back into range is exact
        let d = Divisor::<Config>::try_new([
            (Place::from(p), i64::MAX),
            (Place::from(p), 1),
            (Place::from(p), -2),
        ])
        .unwrap();
        assert_eq!(d.multiplicity(&Place::from(p)), i64::MAX - 1);

        let lowest = Divisor::from_affine([(p, i64::MIN)]);
        assert_eq!(lowest.multiplicity(&Place::from(p)), -i64::MAX);
        assert_eq!((-&lowest).multiplicity(&Place::from(p)), i64::MAX);
        assert!(Divisor::<Config>::try_new([(Place::from(p), i64::MIN)]).is_err());
    }

    #[test]
    fn test_point_sequences() {
        let rng = &mut ark_std::test_rng();
        let p = random_point::<Config, _>(rng);
        let q = random_point::<Config, _>(rng);
        let d = Divisor::from_affine([(p, 2), (q, -3), (G1Affine::identity(), 1)]);
        let (positive, negative) = d.point_sequences();
        assert_eq!(positive, vec![p, p]);
        assert_eq!(negative, vec![q, q, q]);
    }
}
