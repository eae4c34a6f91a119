//! Antenna dimension calculators
//!
//! Pure formulas mapping a transmission frequency to physical antenna
//! dimensions. All lengths are in meters, frequencies in hertz, gains in
//! dBi, and impedances in ohms.

/// Speed of light in a vacuum, m/s
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e8;

/// Velocity factor of the folded dipole's bent conductor
const FOLDED_DIPOLE_VELOCITY_FACTOR: f64 = 0.8567;

/// Invalid calculator input
#[derive(Debug, PartialEq)]
pub enum AntennaError {
    /// Frequency must be strictly positive
    InvalidFrequency(f64),
    /// Helix needs at least one turn
    InvalidTurnCount(u32),
}

impl std::fmt::Display for AntennaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AntennaError::InvalidFrequency(freq) => {
                write!(f, "frequency must be positive, got {} Hz", freq)
            }
            AntennaError::InvalidTurnCount(turns) => {
                write!(f, "helix needs at least one turn, got {}", turns)
            }
        }
    }
}

impl std::error::Error for AntennaError {}

fn wavelength(frequency_hz: f64) -> Result<f64, AntennaError> {
    if frequency_hz <= 0.0 || !frequency_hz.is_finite() {
        return Err(AntennaError::InvalidFrequency(frequency_hz));
    }
    Ok(SPEED_OF_LIGHT / frequency_hz)
}

/// Half-wave dipole dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DipoleDesign {
    pub wavelength: f64,
    /// End-to-end element length (λ/2)
    pub element_length: f64,
    pub gain_dbi: f64,
    pub impedance: f64,
}

/// Calculate half-wave dipole dimensions for a frequency
pub fn dipole(frequency_hz: f64) -> Result<DipoleDesign, AntennaError> {
    let lambda = wavelength(frequency_hz)?;
    Ok(DipoleDesign {
        wavelength: lambda,
        element_length: lambda / 2.0,
        gain_dbi: 2.15,
        impedance: 73.1,
    })
}

/// Axial-mode helix dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelixDesign {
    pub wavelength: f64,
    /// Circumference of one turn (λ for axial mode)
    pub circumference: f64,
    pub diameter: f64,
    /// Spacing between adjacent turns (λ/4)
    pub turn_spacing: f64,
    /// Pitch angle in degrees
    pub pitch_deg: f64,
    /// Axial length of the whole helix
    pub axial_length: f64,
    /// Total conductor length
    pub wire_length: f64,
    pub gain_dbi: f64,
    pub impedance: f64,
    pub reflector_diameter: f64,
}

/// Calculate axial-mode helix dimensions for a frequency and turn count
pub fn helix(frequency_hz: f64, turns: u32) -> Result<HelixDesign, AntennaError> {
    if turns == 0 {
        return Err(AntennaError::InvalidTurnCount(turns));
    }
    let lambda = wavelength(frequency_hz)?;
    let n = turns as f64;

    let circumference = lambda;
    let turn_spacing = 0.25 * lambda;
    let pitch_deg = turn_spacing.atan2(circumference).to_degrees();
    Ok(HelixDesign {
        wavelength: lambda,
        circumference,
        diameter: circumference / std::f64::consts::PI,
        turn_spacing,
        pitch_deg,
        axial_length: n * turn_spacing,
        wire_length: n * (circumference.powi(2) + turn_spacing.powi(2)).sqrt(),
        gain_dbi: 10.0 * (0.8 * n).log10(),
        impedance: 140.0 * circumference / lambda,
        reflector_diameter: 1.1 * lambda,
    })
}

/// Folded dipole segment dimensions
///
/// Segment names follow the construction drawing: two straight runs (`a`,
/// `d`), the long fold (`c`), the short return (`b`), and semicircular bends
/// of radius `bend_radius`, with a `feed_gap` at the feed point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoldedDipoleDesign {
    pub wavelength: f64,
    pub impedance: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub bend_radius: f64,
    pub feed_gap: f64,
    pub rod_diameter: f64,
    /// Total conductor length (λ scaled by the velocity factor)
    pub total_length: f64,
}

/// Calculate folded dipole dimensions for a frequency
pub fn folded_dipole(frequency_hz: f64) -> Result<FoldedDipoleDesign, AntennaError> {
    let lambda = wavelength(frequency_hz)?;
    let scaled = lambda * FOLDED_DIPOLE_VELOCITY_FACTOR;
    Ok(FoldedDipoleDesign {
        wavelength: lambda,
        impedance: 292.0,
        a: 0.19 * scaled,
        b: 0.10 * scaled,
        c: 0.40 * scaled,
        d: 0.20 * scaled,
        bend_radius: 0.10 * scaled / std::f64::consts::PI,
        feed_gap: 0.01 * scaled,
        rod_diameter: lambda / 300.0,
        total_length: scaled,
    })
}

/// Bi-quad loop dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiQuadDesign {
    pub wavelength: f64,
    pub l1: f64,
    pub l2: f64,
    pub wire_diameter: f64,
    pub wire_length: f64,
    /// Reflector width (λ/2)
    pub width: f64,
    /// Reflector height (twice the width)
    pub height: f64,
}

/// Calculate bi-quad dimensions for a frequency
pub fn bi_quad(frequency_hz: f64) -> Result<BiQuadDesign, AntennaError> {
    let lambda = wavelength(frequency_hz)?;
    let wire_diameter = 0.6 * (frequency_hz / 1e6).powf(-0.8);
    let width = 0.5 * lambda;
    Ok(BiQuadDesign {
        wavelength: lambda,
        l1: 0.025 * 9.7 * lambda,
        l2: 0.7 * 9.7 * lambda,
        wire_diameter,
        wire_length: (20.0 * lambda * 1e6 + 40.0 * std::f64::consts::PI * wire_diameter) / 1e7,
        width,
        height: 2.0 * width,
    })
}

/// Yagi-Uda driven element dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YagiUdaDesign {
    pub wavelength: f64,
    /// Driven element length (λ/2)
    pub driven_element_length: f64,
}

/// Calculate Yagi-Uda driven element dimensions for a frequency
pub fn yagi_uda(frequency_hz: f64) -> Result<YagiUdaDesign, AntennaError> {
    let lambda = wavelength(frequency_hz)?;
    Ok(YagiUdaDesign {
        wavelength: lambda,
        driven_element_length: lambda / 2.0,
    })
}

/// Turnstile element dimensions (two crossed half-wave dipoles)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnstileDesign {
    pub wavelength: f64,
    /// Length of each crossed element (λ/2)
    pub element_length: f64,
}

/// Calculate turnstile element dimensions for a frequency
pub fn turnstile(frequency_hz: f64) -> Result<TurnstileDesign, AntennaError> {
    let lambda = wavelength(frequency_hz)?;
    Ok(TurnstileDesign {
        wavelength: lambda,
        element_length: lambda / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MHZ: f64 = 1e6;

    #[test]
    fn test_dipole_at_100_mhz() {
        let design = dipole(100.0 * MHZ).unwrap();
        assert!((design.wavelength - 2.997_924_58).abs() < 1e-9);
        assert!((design.element_length - 1.498_962_29).abs() < 1e-8);
        assert_eq!(design.gain_dbi, 2.15);
        assert_eq!(design.impedance, 73.1);
    }

    #[test]
    fn test_dipole_rejects_bad_frequency() {
        assert_eq!(dipole(0.0), Err(AntennaError::InvalidFrequency(0.0)));
        assert_eq!(dipole(-5.0), Err(AntennaError::InvalidFrequency(-5.0)));
    }

    #[test]
    fn test_helix_geometry() {
        let design = helix(1.0e9, 10).unwrap();
        // Axial mode: one turn's circumference is a full wavelength
        assert!((design.circumference - design.wavelength).abs() < 1e-12);
        assert!(
            (design.diameter - design.circumference / std::f64::consts::PI).abs() < 1e-12
        );
        assert!((design.turn_spacing - 0.25 * design.wavelength).abs() < 1e-12);
        // atan(1/4) pitch angle
        assert!((design.pitch_deg - 14.036_243_467).abs() < 1e-6);
        assert!((design.axial_length - 10.0 * design.turn_spacing).abs() < 1e-12);
        // Impedance reduces to 140 ohms when circumference equals lambda
        assert!((design.impedance - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_helix_gain_grows_with_turns() {
        let few = helix(1.0e9, 5).unwrap();
        let many = helix(1.0e9, 20).unwrap();
        assert!(many.gain_dbi > few.gain_dbi);
    }

    #[test]
    fn test_helix_rejects_zero_turns() {
        assert_eq!(helix(1.0e9, 0), Err(AntennaError::InvalidTurnCount(0)));
    }

    #[test]
    fn test_folded_dipole_segments_sum_near_total() {
        let design = folded_dipole(144.0 * MHZ).unwrap();
        // Straight segments cover 0.89 of the scaled wavelength; the
        // remainder is in the bends
        let straight = design.a + design.b + design.c + design.d;
        assert!(straight < design.total_length);
        assert!((straight / design.total_length - 0.89).abs() < 1e-9);
        assert_eq!(design.impedance, 292.0);
    }

    #[test]
    fn test_bi_quad_proportions() {
        let design = bi_quad(2_400.0 * MHZ).unwrap();
        assert!((design.height - 2.0 * design.width).abs() < 1e-12);
        assert!((design.width - 0.5 * design.wavelength).abs() < 1e-12);
        assert!(design.wire_diameter > 0.0);
        assert!(design.wire_length > 0.0);
    }

    #[test]
    fn test_wavelength_scales_inversely() {
        let low = yagi_uda(100.0 * MHZ).unwrap();
        let high = yagi_uda(200.0 * MHZ).unwrap();
        assert!((low.wavelength / high.wavelength - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_turnstile_elements_are_half_wave() {
        let design = turnstile(433.0 * MHZ).unwrap();
        assert!((design.element_length - design.wavelength / 2.0).abs() < 1e-12);
    }
}
