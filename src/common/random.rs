use elliptic_curve::Field;
use k256::Scalar;
use rand::rngs::OsRng;

/// Draws a uniformly random scalar in `[1, n)` from the operating system RNG.
///
/// Zero is rejected and redrawn; the protocol requires nonzero ephemeral
/// scalars throughout. The RNG is fixed on purpose: every draw must be
/// independent, so no seeding hook is offered.
pub(crate) fn random_nonzero_scalar() -> Scalar {
    loop {
        let scalar = Scalar::random(&mut OsRng);
        if scalar != Scalar::ZERO {
            return scalar;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_nonzero_scalar() {
        let a = random_nonzero_scalar();
        let b = random_nonzero_scalar();
        assert_ne!(a, Scalar::ZERO);
        assert_ne!(b, Scalar::ZERO);
        assert_ne!(a, b);
    }
}
