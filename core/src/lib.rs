//! Acoustic FSK release-trigger receiver
//!
//! Demodulates a two-tone FSK bitstream from a continuously sampled analog
//! channel, reconstructs a framed command code and fires an actuator when it
//! matches the configured release code. The pipeline mirrors the two
//! interrupt contexts of the target hardware:
//!
//! ```text
//! samples → Goertzel ×2 → SymbolDetector → SharedLevel cell
//!                                              ↓ (bit clock)
//!                          BitSampler → FrameDecoder → TriggerActuator
//! ```
//!
//! All signal logic is platform-free: hardware delivers samples and bit
//! ticks, this crate makes the decisions.

pub mod config;
pub mod detector;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod goertzel;
pub mod receiver;
pub mod sampler;
pub mod trigger;

pub use config::ReceiverConfig;
pub use detector::{SharedLevel, SymbolDetector, SymbolLevel};
pub use encoder::{encode_frame_bits, FskModulator};
pub use error::{ReceiverError, Result};
pub use frame::{FrameDecoder, FrameOutcome};
pub use goertzel::GoertzelFilter;
pub use receiver::Receiver;
pub use sampler::BitSampler;
pub use trigger::{LoggingTrigger, TriggerActuator};

/// One unsigned amplitude reading from the ADC (8–12 bit deployments).
pub type Sample = u16;

// Default deployment parameters, matching the reference hardware: 8-bit ADC
// at 300 kHz, 200-sample detection windows, 100 bit/s command rate.
pub const DEFAULT_SAMPLE_RATE: f32 = 300_000.0;
pub const DEFAULT_TONE0_HZ: f32 = 25_000.0;
pub const DEFAULT_TONE1_HZ: f32 = 31_500.0;
pub const DEFAULT_BIT_RATE: f32 = 100.0;
pub const DEFAULT_WINDOW_SIZE: usize = 200;
pub const DEFAULT_THRESHOLD: f32 = 2_000_000.0;
pub const DEFAULT_RELEASE_CODE: [u8; 2] = [0xAA, 0xAA];
