use std::f32::consts::PI;

use crate::config::ReceiverConfig;
use crate::Sample;

/// ADC mid-scale the synthesized signal is centered on (8-bit converter).
const ADC_MID: f32 = 128.0;

/// Peak deviation around mid-scale; kept inside the 8-bit range.
const TONE_AMPLITUDE: f32 = 100.0;

/// Tone-0 bit periods emitted before the sync bit so the receiver's level
/// has settled at 0 when the frame starts.
const LEAD_IN_BITS: usize = 2;

/// Tone-0 bit periods appended after the last payload bit so the final bit
/// sample lands on a settled window.
const TAIL_BITS: usize = 1;

/// Wire bit layout of one release frame: the sync bit (always 1) followed by
/// the code bytes MSB-first.
pub fn encode_frame_bits(code: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(code.len() * 8 + 1);
    bits.push(1);
    for &byte in code {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1);
        }
    }
    bits
}

/// Transmitter counterpart of the receiver pipeline.
///
/// Synthesizes the two-tone FSK signal for a release command in the unsigned
/// ADC sample domain, one tone burst per bit, so the output can be replayed
/// straight into [`crate::Receiver::process_buffer`] or written out as a
/// test vector.
pub struct FskModulator {
    sample_rate_hz: f32,
    tone0_hz: f32,
    tone1_hz: f32,
    samples_per_bit: usize,
}

impl FskModulator {
    pub fn new(config: &ReceiverConfig) -> Self {
        Self {
            sample_rate_hz: config.sample_rate_hz,
            tone0_hz: config.tone0_hz,
            tone1_hz: config.tone1_hz,
            samples_per_bit: config.samples_per_bit(),
        }
    }

    /// Synthesize a full transmission of `code`: tone-0 lead-in, sync bit,
    /// payload MSB-first, tone-0 tail.
    pub fn modulate(&self, code: &[u8]) -> Vec<Sample> {
        let mut bits = vec![0u8; LEAD_IN_BITS];
        bits.extend(encode_frame_bits(code));
        bits.extend(std::iter::repeat(0).take(TAIL_BITS));
        self.modulate_bits(&bits)
    }

    /// Synthesize an arbitrary bit sequence, one tone burst per bit.
    pub fn modulate_bits(&self, bits: &[u8]) -> Vec<Sample> {
        let mut samples = Vec::with_capacity(bits.len() * self.samples_per_bit);
        for &bit in bits {
            let freq = if bit == 1 { self.tone1_hz } else { self.tone0_hz };
            let base = samples.len();
            for n in 0..self.samples_per_bit {
                let t = (base + n) as f32 / self.sample_rate_hz;
                let value = ADC_MID + TONE_AMPLITUDE * (2.0 * PI * freq * t).sin();
                samples.push(value.round() as Sample);
            }
        }
        samples
    }

    /// Samples emitted per transmitted bit.
    pub fn samples_per_bit(&self) -> usize {
        self.samples_per_bit
    }
}
