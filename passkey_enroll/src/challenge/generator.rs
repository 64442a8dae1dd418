use ring::rand::{SecureRandom, SystemRandom};

use crate::utils::UtilError;

/// Generate `count` decimal digits, each drawn uniformly from `[min, max]`.
///
/// Digits are concatenated in draw order. The values double as identity ids
/// and authentication challenges, so they come from the OS CSPRNG. Bytes
/// that would bias the modulo reduction are rejected and redrawn.
///
/// # Errors
/// - `UtilError::Format` when `min > max` or `max > 9`
/// - `UtilError::Crypto` when the system random source fails
pub fn generate_digits(count: usize, min: u8, max: u8) -> Result<String, UtilError> {
    if min > max || max > 9 {
        return Err(UtilError::Format(format!(
            "Invalid digit range: [{min}, {max}]"
        )));
    }

    let span = u16::from(max - min + 1);
    let limit = 256 - (256 % span);

    let rng = SystemRandom::new();
    let mut digits = String::with_capacity(count);
    let mut buf = [0u8; 32];

    while digits.len() < count {
        rng.fill(&mut buf)
            .map_err(|_| UtilError::Crypto("Failed to generate random digits".to_string()))?;

        for byte in buf.iter().map(|b| u16::from(*b)) {
            if byte >= limit {
                continue;
            }
            digits.push(char::from(b'0' + min + (byte % span) as u8));
            if digits.len() == count {
                break;
            }
        }
    }

    Ok(digits)
}
