use log::info;

/// External collaborator performing the physical release action.
///
/// Invoked exactly once per accepted frame. Implementations decide whether
/// sampling may stall during the release sequence: the original hardware
/// busy-waited for seconds while toggling a drive pin, which suspends bit
/// sampling for the duration. An implementation that must keep listening
/// should hand the sequence to its own timer and return immediately.
pub trait TriggerActuator {
    fn activate(&mut self);
}

/// Actuator surrogate for captures and bench runs: records the event in the
/// log and returns immediately.
#[derive(Debug, Default)]
pub struct LoggingTrigger {
    activations: u32,
}

impl LoggingTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activations(&self) -> u32 {
        self.activations
    }
}

impl TriggerActuator for LoggingTrigger {
    fn activate(&mut self) {
        self.activations += 1;
        info!("release triggered (activation #{})", self.activations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_trigger_counts_activations() {
        let mut trigger = LoggingTrigger::new();
        assert_eq!(trigger.activations(), 0);
        trigger.activate();
        trigger.activate();
        assert_eq!(trigger.activations(), 2);
    }
}
