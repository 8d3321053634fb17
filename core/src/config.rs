use crate::error::{ReceiverError, Result};
use crate::{
    DEFAULT_BIT_RATE, DEFAULT_RELEASE_CODE, DEFAULT_SAMPLE_RATE, DEFAULT_THRESHOLD,
    DEFAULT_TONE0_HZ, DEFAULT_TONE1_HZ, DEFAULT_WINDOW_SIZE,
};

/// Receiver deployment parameters, fixed at construction time.
///
/// Tone 0 carries bit value 0, tone 1 carries bit value 1. The detection
/// window must be much shorter than the bit period so the symbol decision
/// has settled by the time the bit clock samples it; `validate` enforces
/// at least two windows per bit.
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    /// ADC sampling rate in Hz.
    pub sample_rate_hz: f32,
    /// Carrier frequency for bit value 0, in Hz.
    pub tone0_hz: f32,
    /// Carrier frequency for bit value 1, in Hz.
    pub tone1_hz: f32,
    /// Transmitter bit rate in bits per second.
    pub bit_rate_bps: f32,
    /// Samples accumulated per tone-energy estimate.
    pub window_size: usize,
    /// Absolute energy threshold a tone must exceed to win a window.
    pub threshold: f32,
    /// Expected release command, compared byte-for-byte against the
    /// decoded frame payload.
    pub release_code: Vec<u8>,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE,
            tone0_hz: DEFAULT_TONE0_HZ,
            tone1_hz: DEFAULT_TONE1_HZ,
            bit_rate_bps: DEFAULT_BIT_RATE,
            window_size: DEFAULT_WINDOW_SIZE,
            threshold: DEFAULT_THRESHOLD,
            release_code: DEFAULT_RELEASE_CODE.to_vec(),
        }
    }
}

impl ReceiverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.release_code.is_empty() {
            return Err(ReceiverError::EmptyReleaseCode);
        }
        if self.window_size < 2 {
            return Err(ReceiverError::WindowTooSmall);
        }
        if !(self.sample_rate_hz > 0.0) {
            return Err(ReceiverError::InvalidConfig(
                "sample rate must be positive".into(),
            ));
        }
        let nyquist = self.sample_rate_hz / 2.0;
        for &tone in &[self.tone0_hz, self.tone1_hz] {
            if !(tone > 0.0) || tone >= nyquist {
                return Err(ReceiverError::ToneOutOfRange(tone));
            }
        }
        if (self.tone0_hz - self.tone1_hz).abs() < f32::EPSILON {
            return Err(ReceiverError::InvalidConfig(
                "tone frequencies must differ".into(),
            ));
        }
        if !(self.bit_rate_bps > 0.0) {
            return Err(ReceiverError::InvalidConfig(
                "bit rate must be positive".into(),
            ));
        }
        // Context B tolerates a decision up to one window stale; that only
        // works when at least two windows complete per bit period.
        if self.samples_per_bit() < self.window_size * 2 {
            return Err(ReceiverError::BitRateTooFast);
        }
        if !(self.threshold > 0.0) {
            return Err(ReceiverError::InvalidThreshold);
        }
        Ok(())
    }

    /// ADC samples spanned by one transmitted bit.
    pub fn samples_per_bit(&self) -> usize {
        (self.sample_rate_hz / self.bit_rate_bps).round() as usize
    }

    /// Bit-timer period in microseconds, for the hardware timer collaborator.
    pub fn bit_period_us(&self) -> f32 {
        1_000_000.0 / self.bit_rate_bps
    }

    /// Frame length in bits: one sync bit plus the full code width.
    pub fn frame_bits(&self) -> usize {
        self.release_code.len() * 8 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReceiverConfig::default();
        config.validate().expect("default config must validate");
    }

    #[test]
    fn test_default_timing_relationships() {
        let config = ReceiverConfig::default();
        // 300 kHz sampling at 100 bit/s: 3000 samples per bit, 15 windows.
        assert_eq!(config.samples_per_bit(), 3000);
        assert_eq!(config.bit_period_us(), 10_000.0);
        assert_eq!(config.frame_bits(), 17);
    }

    #[test]
    fn test_empty_code_rejected() {
        let config = ReceiverConfig {
            release_code: vec![],
            ..ReceiverConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ReceiverError::EmptyReleaseCode)
        ));
    }

    #[test]
    fn test_tone_above_nyquist_rejected() {
        let config = ReceiverConfig {
            tone1_hz: 200_000.0,
            ..ReceiverConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ReceiverError::ToneOutOfRange(_))
        ));
    }

    #[test]
    fn test_bit_rate_faster_than_window_rejected() {
        // 300 kHz / 1000 bit/s = 300 samples per bit, less than two
        // 200-sample windows.
        let config = ReceiverConfig {
            bit_rate_bps: 1000.0,
            ..ReceiverConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ReceiverError::BitRateTooFast)
        ));
    }

    #[test]
    fn test_identical_tones_rejected() {
        let config = ReceiverConfig {
            tone1_hz: DEFAULT_TONE0_HZ,
            ..ReceiverConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
