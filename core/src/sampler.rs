use std::sync::Arc;

use crate::detector::SharedLevel;

/// Raw-bit callback, one value per bit period, for debugging the recovered
/// stream.
pub type BitObserver = Box<dyn FnMut(u8) + Send>;

/// Fixed-interval bit sampler, the boundary between the high-frequency
/// sampling clock and the bit-rate clock.
///
/// Fired once per bit period by the external hardware timer. Holds no
/// decoding state of its own: it reads whatever level the detector last
/// decided and forwards it as the next bit in the stream.
pub struct BitSampler {
    level: Arc<SharedLevel>,
    observer: Option<BitObserver>,
}

impl BitSampler {
    pub fn new(level: Arc<SharedLevel>) -> Self {
        Self {
            level,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: BitObserver) {
        self.observer = Some(observer);
    }

    /// Sample the current symbol level as one bit.
    pub fn sample_bit(&mut self) -> u8 {
        let bit = self.level.load().to_bit();
        if let Some(observer) = self.observer.as_mut() {
            observer(bit);
        }
        bit
    }
}
