use log::debug;

/// Result of one frame attempt. Every outcome, including `Accept`, returns
/// the decoder to idle: the receiver never stops listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Decoded payload matched the release code.
    Accept,
    /// A full frame arrived but the payload differed from the release code.
    Reject,
    /// The bit cursor ran past the frame boundary without a comparison
    /// firing. Defensive guard; unreachable through `push_bit` because the
    /// boundary check fires first.
    Overflow,
}

/// Frame-synchronization and code-matching state machine.
///
/// Idle until a 1 bit arrives (the sync bit), then accumulates payload bits
/// MSB-first into a fixed buffer. The cursor counts the sync bit together
/// with the payload, so a frame attempt closes at `code_len*8 + 1` received
/// bits — the wire format's boundary, kept as-is for transmitter
/// compatibility. The sync bit's value is enforced by the idle transition
/// itself; the comparison covers the payload bytes.
///
/// There is no error path. Mismatched, garbled, or truncated frames reset
/// the state and the decoder resynchronizes on the next 1 bit.
pub struct FrameDecoder {
    code: Vec<u8>,
    buffer: Vec<u8>,
    bit_count: usize,
    synced: bool,
}

impl FrameDecoder {
    pub fn new(release_code: &[u8]) -> Self {
        Self {
            code: release_code.to_vec(),
            buffer: vec![0; release_code.len()],
            bit_count: 0,
            synced: false,
        }
    }

    /// Total bits per frame attempt: sync bit plus full code width.
    fn frame_bits(&self) -> usize {
        self.code.len() * 8 + 1
    }

    /// Consume one recovered bit.
    ///
    /// Returns an outcome when this bit closed a frame attempt, `None` while
    /// idle or mid-frame.
    pub fn push_bit(&mut self, bit: u8) -> Option<FrameOutcome> {
        if !self.synced {
            // A 0 bit while idle is channel noise or inter-frame silence.
            if bit == 1 {
                self.synced = true;
                self.buffer.fill(0);
                self.bit_count = 1;
                debug!("frame sync acquired");
            }
            return None;
        }

        let payload_index = self.bit_count - 1;
        if payload_index < self.code.len() * 8 && bit == 1 {
            self.buffer[payload_index / 8] |= 0x80 >> (payload_index % 8);
        }
        self.bit_count += 1;

        if self.bit_count == self.frame_bits() {
            let outcome = if self.buffer == self.code {
                FrameOutcome::Accept
            } else {
                FrameOutcome::Reject
            };
            debug!("frame closed: {:?} (payload {:02X?})", outcome, self.buffer);
            self.reset();
            Some(outcome)
        } else if self.bit_count > self.frame_bits() {
            debug!("frame overflow at {} bits", self.bit_count);
            self.reset();
            Some(FrameOutcome::Overflow)
        } else {
            None
        }
    }

    pub fn is_synced(&self) -> bool {
        self.synced
    }

    fn reset(&mut self) {
        self.synced = false;
        self.bit_count = 0;
        self.buffer.fill(0);
    }

    /// Force the cursor past the frame boundary to exercise the overflow
    /// guard, which `push_bit` alone cannot reach.
    #[cfg(test)]
    fn force_cursor(&mut self, bit_count: usize) {
        self.synced = true;
        self.bit_count = bit_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: [u8; 2] = [0xAA, 0xAA];

    /// Sync bit followed by the code bytes MSB-first.
    fn frame_stream(code: &[u8]) -> Vec<u8> {
        let mut bits = vec![1u8];
        for &byte in code {
            for i in (0..8).rev() {
                bits.push((byte >> i) & 1);
            }
        }
        bits
    }

    fn feed(decoder: &mut FrameDecoder, bits: &[u8]) -> Vec<FrameOutcome> {
        bits.iter().filter_map(|&b| decoder.push_bit(b)).collect()
    }

    #[test]
    fn test_exact_code_accepts_once() {
        let mut decoder = FrameDecoder::new(&CODE);
        // 17-bit stream: sync + 0xAA 0xAA payload.
        let bits = frame_stream(&CODE);
        assert_eq!(bits, [1, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0]);

        let outcomes = feed(&mut decoder, &bits);
        assert_eq!(outcomes, vec![FrameOutcome::Accept]);
        assert!(!decoder.is_synced(), "decoder must return to idle");
    }

    #[test]
    fn test_final_bit_flipped_rejects() {
        let mut decoder = FrameDecoder::new(&CODE);
        let mut bits = frame_stream(&CODE);
        *bits.last_mut().unwrap() = 1;

        let outcomes = feed(&mut decoder, &bits);
        assert_eq!(outcomes, vec![FrameOutcome::Reject]);
        assert!(!decoder.is_synced());
    }

    #[test]
    fn test_any_payload_difference_rejects() {
        let mut decoder = FrameDecoder::new(&CODE);
        for flip in 0..16 {
            let mut bits = frame_stream(&CODE);
            bits[1 + flip] ^= 1;
            let outcomes = feed(&mut decoder, &bits);
            assert_eq!(
                outcomes,
                vec![FrameOutcome::Reject],
                "bit {flip} flip must reject"
            );
        }
    }

    #[test]
    fn test_zero_bits_ignored_while_idle() {
        let mut decoder = FrameDecoder::new(&CODE);
        for _ in 0..100 {
            assert_eq!(decoder.push_bit(0), None);
        }
        assert!(!decoder.is_synced());
    }

    #[test]
    fn test_resynchronizes_after_reject() {
        let mut decoder = FrameDecoder::new(&CODE);

        let mut garbled = frame_stream(&CODE);
        garbled[5] ^= 1;
        assert_eq!(feed(&mut decoder, &garbled), vec![FrameOutcome::Reject]);

        // Inter-frame silence, then a clean frame.
        feed(&mut decoder, &[0, 0, 0]);
        let outcomes = feed(&mut decoder, &frame_stream(&CODE));
        assert_eq!(outcomes, vec![FrameOutcome::Accept]);
    }

    #[test]
    fn test_back_to_back_frames_both_accept() {
        let mut decoder = FrameDecoder::new(&CODE);
        let mut bits = frame_stream(&CODE);
        bits.extend(frame_stream(&CODE));

        let outcomes = feed(&mut decoder, &bits);
        assert_eq!(outcomes, vec![FrameOutcome::Accept, FrameOutcome::Accept]);
    }

    #[test]
    fn test_all_zero_payload_is_a_reject_not_a_hang() {
        let mut decoder = FrameDecoder::new(&CODE);
        let mut bits = vec![1u8];
        bits.extend(std::iter::repeat(0).take(16));
        assert_eq!(feed(&mut decoder, &bits), vec![FrameOutcome::Reject]);
    }

    #[test]
    fn test_overflow_guard_forces_reset() {
        let mut decoder = FrameDecoder::new(&CODE);
        decoder.force_cursor(CODE.len() * 8 + 1);
        assert_eq!(decoder.push_bit(0), Some(FrameOutcome::Overflow));
        assert!(!decoder.is_synced());

        // Still usable afterwards.
        let outcomes: Vec<_> = frame_stream(&CODE)
            .iter()
            .filter_map(|&b| decoder.push_bit(b))
            .collect();
        assert_eq!(outcomes, vec![FrameOutcome::Accept]);
    }

    #[test]
    fn test_cursor_never_overruns_buffer() {
        // Push far more bits than one frame; every frame boundary must close
        // an attempt and restart cleanly without indexing past the buffer.
        let mut decoder = FrameDecoder::new(&CODE);
        let mut outcomes = 0;
        for _ in 0..(17 * 50) {
            if decoder.push_bit(1).is_some() {
                outcomes += 1;
            }
        }
        assert!(outcomes >= 49, "steady 1s must keep closing frames");
    }

    #[test]
    fn test_longer_codes_work() {
        let code = [0xDE, 0xAD, 0xBE, 0xEF];
        let mut decoder = FrameDecoder::new(&code);
        let outcomes = feed(&mut decoder, &frame_stream(&code));
        assert_eq!(outcomes, vec![FrameOutcome::Accept]);
    }
}
