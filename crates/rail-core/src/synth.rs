//! Synthetic surface roughness.
//!
//! Noise is a sum of sinusoids over a small harmonic set. Each harmonic `i`
//! gets a random phase in `[0, 1)` added straight into the sine argument and a
//! random weight in `[0, 1)` scaled by `amplitude / i`, so higher harmonics
//! contribute less.

use crate::error::RailError;
use crate::profile::Profile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use std::ops::RangeInclusive;

pub const HARMONICS: RangeInclusive<u32> = 3..=7;

/// Harmonic `i` runs at `frequency * i / HARMONIC_SCALE`.
pub const HARMONIC_SCALE: f64 = 5.0;

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// Draws the noise component. Consumes two values from `rng` per harmonic,
/// phase first.
pub fn synthesize_noise<R: Rng + ?Sized>(
    length: usize,
    amplitude: f64,
    frequency: f64,
    rng: &mut R,
) -> Result<Profile, RailError> {
    validate(length, amplitude, frequency)?;

    let mut noise = vec![0.0_f64; length];
    for i in HARMONICS {
        let phase: f64 = rng.gen();
        let weight = rng.gen::<f64>() * amplitude / f64::from(i);
        let freq = frequency * (f64::from(i) / HARMONIC_SCALE);

        for (x, sample) in noise.iter_mut().enumerate() {
            *sample += weight * (2.0 * PI * freq * x as f64 + phase).sin();
        }
    }

    Ok(Profile::from_samples(noise))
}

/// Ideal (all-zero) profile plus a fresh noise component.
pub fn synthesize_defect_profile<R: Rng + ?Sized>(
    length: usize,
    amplitude: f64,
    frequency: f64,
    rng: &mut R,
) -> Result<Profile, RailError> {
    let noise = synthesize_noise(length, amplitude, frequency, rng)?;
    Profile::baseline(length, 0.0).try_add(&noise)
}

fn validate(length: usize, amplitude: f64, frequency: f64) -> Result<(), RailError> {
    if length == 0 {
        return Err(RailError::InvalidArgument(
            "profile length must be positive".into(),
        ));
    }
    if !amplitude.is_finite() || amplitude < 0.0 {
        return Err(RailError::InvalidArgument(format!(
            "amplitude must be finite and non-negative, got {amplitude}"
        )));
    }
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(RailError::InvalidArgument(format!(
            "frequency must be finite and positive, got {frequency}"
        )));
    }
    Ok(())
}
