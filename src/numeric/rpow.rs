// ============================================================================
// Fixed-Point Exponentiation
// x^n at RAY scale by repeated squaring
// ============================================================================

use super::errors::RateResult;
use super::ray::Ray;

/// Exponentiate `x` to `n` by squaring.
///
/// `x` carries 27 decimals, `n` is a plain integer. Every squaring of `x` and
/// every accumulation into `z` goes through [`Ray::checked_rmul`], so each
/// intermediate product is checked for recoverability and rounded half-up
/// before rescaling. A failure anywhere rejects the whole call.
///
/// Runs in `O(log n)` multiplications.
///
/// # Errors
/// Returns `ArithmeticOverflow` if any intermediate product or rounding step
/// exceeds 256 bits.
///
/// # Example
/// ```
/// use rate_conv::numeric::{rpow, Ray};
///
/// let two: Ray = "2".parse().unwrap();
/// assert_eq!(rpow(two, 10).unwrap(), "1024".parse().unwrap());
/// ```
pub fn rpow(x: Ray, n: u64) -> RateResult<Ray> {
    if x.is_zero() {
        return Ok(if n == 0 { Ray::ONE } else { Ray::ZERO });
    }

    let mut x = x;
    let mut z = if n % 2 == 0 { Ray::ONE } else { x };
    let mut n = n / 2;

    while n != 0 {
        x = x.checked_rmul(x)?;
        if n % 2 == 1 {
            z = z.checked_rmul(x)?;
        }
        n /= 2;
    }

    Ok(z)
}
