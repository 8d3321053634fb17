use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::config::ReceiverConfig;
use crate::goertzel::GoertzelFilter;
use crate::Sample;

/// Decided FSK symbol for the most recent decisive detection window.
///
/// `Low` means tone 0 dominated (bit value 0), `High` means tone 1 dominated
/// (bit value 1). `Indeterminate` only exists before the first decisive
/// window; it reads as bit 0 so a silent channel can never start a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolLevel {
    Indeterminate,
    Low,
    High,
}

impl SymbolLevel {
    pub fn to_bit(self) -> u8 {
        match self {
            SymbolLevel::High => 1,
            SymbolLevel::Low | SymbolLevel::Indeterminate => 0,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            LEVEL_LOW => SymbolLevel::Low,
            LEVEL_HIGH => SymbolLevel::High,
            _ => SymbolLevel::Indeterminate,
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            SymbolLevel::Indeterminate => LEVEL_INDETERMINATE,
            SymbolLevel::Low => LEVEL_LOW,
            SymbolLevel::High => LEVEL_HIGH,
        }
    }
}

const LEVEL_INDETERMINATE: u8 = 0;
const LEVEL_LOW: u8 = 1;
const LEVEL_HIGH: u8 = 2;

/// The single shared cell between the sample-interrupt context (writer) and
/// the bit-interrupt context (reader).
///
/// This is a last-writer-wins slot, not a queue: no backpressure, no
/// delivery guarantee beyond "most recent store visible to the next load".
/// One word wide so loads can never tear, single producer and single
/// consumer, and the reader tolerates a value up to one detection window
/// stale. Relaxed ordering suffices; there is no other data to order
/// against.
#[derive(Debug)]
pub struct SharedLevel(AtomicU8);

impl SharedLevel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self(AtomicU8::new(LEVEL_INDETERMINATE)))
    }

    pub fn store(&self, level: SymbolLevel) {
        self.0.store(level.to_u8(), Ordering::Relaxed);
    }

    pub fn load(&self) -> SymbolLevel {
        SymbolLevel::from_u8(self.0.load(Ordering::Relaxed))
    }
}

/// Per-window callback mirroring the decided level, the software analogue of
/// the debug pin the original hardware toggled.
pub type LevelObserver = Box<dyn FnMut(SymbolLevel) + Send>;

/// Dual-tone symbol slicer driven from the sample-interrupt context.
///
/// Both Goertzel filters share one window size, so they finalize in lockstep
/// on the same call. A window is decisive only when exactly one tone is
/// above threshold and the other below; anything else (both above, both
/// below) holds the previous level, so a single ambiguous window never flips
/// a decoded bit.
pub struct SymbolDetector {
    tone0: GoertzelFilter,
    tone1: GoertzelFilter,
    threshold: f32,
    level: Arc<SharedLevel>,
    observer: Option<LevelObserver>,
}

impl SymbolDetector {
    pub fn new(config: &ReceiverConfig, level: Arc<SharedLevel>) -> Self {
        Self {
            tone0: GoertzelFilter::new(config.tone0_hz, config.sample_rate_hz, config.window_size),
            tone1: GoertzelFilter::new(config.tone1_hz, config.sample_rate_hz, config.window_size),
            threshold: config.threshold,
            level,
            observer: None,
        }
    }

    /// Install an observer invoked once per decisive window.
    pub fn set_observer(&mut self, observer: LevelObserver) {
        self.observer = Some(observer);
    }

    /// Feed one ADC sample through both tone filters.
    ///
    /// Returns the freshly decided level when this sample completed a
    /// decisive window, `None` otherwise. The shared cell is only written on
    /// decisive windows, so the bit sampler keeps seeing the held value
    /// through ambiguous ones.
    pub fn process_sample(&mut self, sample: Sample) -> Option<SymbolLevel> {
        let mag0 = self.tone0.update(sample);
        let mag1 = self.tone1.update(sample);

        let (mag0, mag1) = match (mag0, mag1) {
            (Some(m0), Some(m1)) => (m0, m1),
            _ => return None,
        };

        let decided = if mag0 > self.threshold && mag1 < self.threshold {
            Some(SymbolLevel::Low)
        } else if mag1 > self.threshold && mag0 < self.threshold {
            Some(SymbolLevel::High)
        } else {
            None
        };

        if let Some(level) = decided {
            self.level.store(level);
            if let Some(observer) = self.observer.as_mut() {
                observer(level);
            }
        }
        decided
    }
}
