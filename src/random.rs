//! Bounded random draws on top of an injected [`Rng`].

use crate::error::{ClusterError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic generator when `seed` is set, entropy-seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draws uniformly from `[min, max)`, or the floor of such a draw when
/// `integer` is set.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, integer: bool) -> Result<f64> {
    // NaN bounds fail the comparison as well
    if !(min < max) || !(max - min).is_finite() {
        return Err(ClusterError::InvalidRange { min, max });
    }
    if integer && !(min.ceil() < max) {
        return Err(ClusterError::InvalidRange { min, max });
    }

    let value = rng.gen_range(min..max);
    Ok(if integer { value.floor() } else { value })
}

/// Picks one bucket uniformly and scales it by `1 + uniform(-deviation, deviation)`.
///
/// Used to fabricate demo data that sits near a handful of typical values.
pub fn bucket_with_jitter<R: Rng + ?Sized>(
    rng: &mut R,
    buckets: &[f64],
    deviation: f64,
) -> Result<f64> {
    if buckets.is_empty() {
        return Err(ClusterError::InvalidParameter(
            "bucket list must not be empty".to_string(),
        ));
    }
    if !(deviation >= 0.0) || !deviation.is_finite() {
        return Err(ClusterError::InvalidRange {
            min: -deviation,
            max: deviation,
        });
    }

    let bucket = buckets[rng.gen_range(0..buckets.len())];
    if deviation == 0.0 {
        return Ok(bucket);
    }

    Ok(bucket * (1.0 + uniform(rng, -deviation, deviation, false)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_in_range() {
        let mut rng = seeded_rng(Some(42));
        for _ in 0..1000 {
            let value = uniform(&mut rng, -2.5, 3.0, false).unwrap();
            assert!((-2.5..3.0).contains(&value));
        }
    }

    #[test]
    fn test_uniform_integer() {
        let mut rng = seeded_rng(Some(1));
        let mut seen = [false; 3];
        for _ in 0..200 {
            let value = uniform(&mut rng, 0.0, 3.0, true).unwrap();
            assert_eq!(value.fract(), 0.0);
            seen[value as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_uniform_invalid_range() {
        let mut rng = seeded_rng(Some(0));
        assert!(uniform(&mut rng, 1.0, 1.0, false).is_err());
        assert!(uniform(&mut rng, 2.0, 1.0, false).is_err());
        assert!(uniform(&mut rng, f64::NAN, 1.0, false).is_err());
        assert!(uniform(&mut rng, 0.0, f64::INFINITY, false).is_err());
        // no integer inside [0.2, 0.9)
        assert!(uniform(&mut rng, 0.2, 0.9, true).is_err());
    }

    #[test]
    fn test_seeded_rng_reproducible() {
        let mut a = seeded_rng(Some(9));
        let mut b = seeded_rng(Some(9));
        for _ in 0..10 {
            assert_eq!(
                uniform(&mut a, 0.0, 1.0, false).unwrap(),
                uniform(&mut b, 0.0, 1.0, false).unwrap()
            );
        }
    }

    #[test]
    fn test_bucket_with_jitter() {
        let mut rng = seeded_rng(Some(3));
        let buckets = [10.0, 50.0, 90.0];
        let mut hit_last = false;
        for _ in 0..300 {
            let value = bucket_with_jitter(&mut rng, &buckets, 0.1).unwrap();
            let near = buckets
                .iter()
                .any(|&b| value >= b * 0.9 && value <= b * 1.1);
            assert!(near, "{} is not near any bucket", value);
            hit_last |= value >= 81.0;
        }
        assert!(hit_last);

        assert_eq!(bucket_with_jitter(&mut rng, &[4.0], 0.0).unwrap(), 4.0);
        assert!(matches!(
            bucket_with_jitter(&mut rng, &[], 0.1),
            Err(ClusterError::InvalidParameter(_))
        ));
        assert!(matches!(
            bucket_with_jitter(&mut rng, &buckets, -0.1),
            Err(ClusterError::InvalidRange { .. })
        ));
    }
}
