use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ec::CurveGroup;
use ark_std::marker::PhantomData;
use ark_std::{end_timer, start_timer};

use crate::arithmetic::{Polynomial, RationalFunction};
use crate::divisor::Divisor;
use crate::errors::WitnessError;
use crate::function_field::FunctionFelt;
use crate::WitnessScheme;

// Below this many points both halves are built on the current thread
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 16;

/// Witness construction by recursive halving.
///
/// The finite part of the divisor is split into the points of positive and
/// of negative multiplicity. For each of the two point sequences a function
/// with divisor `[P_1] + ... + [P_n] - [S] - (n - 1)[O]` is built, where
/// `S` is the sum of the sequence, by splitting the sequence in half and
/// gluing the two halves back together with a line through their sums. For
/// a principal divisor both sequences have the same sum, and the quotient of
/// the two functions is the witness.
pub struct IncrementalWitness<P: SWCurveConfig> {
    _curve: PhantomData<P>,
}

impl<P: SWCurveConfig> WitnessScheme<P> for IncrementalWitness<P> {
    fn construct(d: &Divisor<P>) -> Result<FunctionFelt<P>, WitnessError> {
        incremental_witness(d)
    }
}

pub fn incremental_witness<P: SWCurveConfig>(
    d: &Divisor<P>,
) -> Result<FunctionFelt<P>, WitnessError> {
    let witness_timer =
        start_timer!(|| format!("Incremental witness for {} places", d.support_size()));

    d.ensure_principal()?;

    if let Some(line) = collinear_witness(d)? {
        end_timer!(witness_timer);
        return Ok(line);
    }

    let (positive, negative) = d.point_sequences();

    let build_timer = start_timer!(|| format!(
        "Building {} zeros and {} poles",
        positive.len(),
        negative.len()
    ));
    let (zeros, _) = build(&positive)?;
    let (poles, _) = build(&negative)?;
    end_timer!(build_timer);

    let witness = zeros.checked_div(&poles)?;

    end_timer!(witness_timer);
    Ok(witness)
}

// Three simple zeros on a common line: the line itself
fn collinear_witness<P: SWCurveConfig>(
    d: &Divisor<P>,
) -> Result<Option<FunctionFelt<P>>, WitnessError> {
    let zeros: Vec<(Affine<P>, i64)> = d.finite_points().collect();
    if zeros.len() != 3 || zeros.iter().any(|(_, multiplicity)| *multiplicity != 1) {
        return Ok(None);
    }

    let coordinates: Vec<_> = zeros.iter().map(|(p, _)| (p.x, p.y)).collect();
    if !Polynomial::is_collinear(&coordinates) {
        return Ok(None);
    }
    FunctionFelt::line(&zeros[0].0, &zeros[1].0).map(Some)
}

// Returns (f, S) with S the sum of `points` and
// div f = [P_1] + ... + [P_n] - [S] - (n - 1)[O]
fn build<P: SWCurveConfig>(
    points: &[Affine<P>],
) -> Result<(FunctionFelt<P>, Affine<P>), WitnessError> {
    match points {
        [] => Ok((FunctionFelt::one(), Affine::identity())),
        [p] => Ok((FunctionFelt::one(), *p)),
        _ => {
            let (left, right) = points.split_at(points.len() / 2);
            let ((f_left, s_left), (f_right, s_right)) = build_halves(left, right)?;
            let (g, sum) = conciliator(&s_left, &s_right)?;
            Ok((&(&f_left * &f_right) * &g, sum))
        }
    }
}

type Halves<P> = (
    (FunctionFelt<P>, Affine<P>),
    (FunctionFelt<P>, Affine<P>),
);

#[cfg(feature = "parallel")]
fn build_halves<P: SWCurveConfig>(
    left: &[Affine<P>],
    right: &[Affine<P>],
) -> Result<Halves<P>, WitnessError> {
    if left.len() + right.len() < PARALLEL_THRESHOLD {
        return Ok((build(left)?, build(right)?));
    }
    let (l, r) = rayon::join(|| build(left), || build(right));
    Ok((l?, r?))
}

#[cfg(not(feature = "parallel"))]
fn build_halves<P: SWCurveConfig>(
    left: &[Affine<P>],
    right: &[Affine<P>],
) -> Result<Halves<P>, WitnessError> {
    Ok((build(left)?, build(right)?))
}

/// Function with divisor `[A] + [B] - [A + B] - [O]`, returned together
/// with `A + B`.
fn conciliator<P: SWCurveConfig>(
    a: &Affine<P>,
    b: &Affine<P>,
) -> Result<(FunctionFelt<P>, Affine<P>), WitnessError> {
    let sum = (*a + b).into_affine();
    if a.infinity || b.infinity {
        return Ok((FunctionFelt::one(), sum));
    }
    if sum.infinity {
        return Ok((FunctionFelt::vertical(a.x), sum));
    }

    let line = FunctionFelt::line(a, b)?;
    let vertical_inv = RationalFunction::new(Polynomial::one(), Polynomial::linear(sum.x))?;
    Ok((line.scale(&vertical_inv), sum))
}
