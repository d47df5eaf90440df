//! Echo duration → distance.
//!
//! Speed of sound ≈ 343 m/s = 0.0343 cm/µs; the pulse travels there and
//! back, so the one-way distance is half.

/// Centimetres travelled by sound per microsecond.
const SOUND_CM_PER_US: f32 = 0.0343;

/// Convert a round-trip echo duration (µs) to whole centimetres.
///
/// `None` (no echo inside the acquisition timeout) stays `None`: a dead
/// sensor must never read as someone standing in front of it.
pub fn estimate_cm(echo_us: Option<u32>) -> Option<u32> {
    echo_us.map(|us| (us as f32 * SOUND_CM_PER_US / 2.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_millisecond_is_17_cm() {
        assert_eq!(estimate_cm(Some(1000)), Some(17));
    }

    #[test]
    fn truncates_toward_zero() {
        // 58 µs * 0.0343 / 2 = 0.9947
        assert_eq!(estimate_cm(Some(58)), Some(0));
        assert_eq!(estimate_cm(Some(0)), Some(0));
    }

    #[test]
    fn presence_boundary_duration() {
        // 5831 µs → 100.00 cm, 5890 µs → 101.01 cm
        assert_eq!(estimate_cm(Some(5831)), Some(100));
        assert_eq!(estimate_cm(Some(5890)), Some(101));
    }

    #[test]
    fn no_echo_is_unknown() {
        assert_eq!(estimate_cm(None), None);
    }
}
