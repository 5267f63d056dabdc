// tagloop/src/demo/button.rs

/// What a debounced button press does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonAction {
    /// Flip wake-up mode and restart discovery
    #[default]
    ToggleWakeup,
    /// Step through the NDEF menu features
    CycleFeature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Released,
    Pending { since_ms: u64 },
    Held,
}

/// Edge debouncer sampled once per tick. A press is reported once the
/// input has read low for `debounce_ms`; the next press needs a release
/// first.
#[derive(Debug, Clone)]
pub struct Debouncer {
    phase: Phase,
    debounce_ms: u32,
}

impl Debouncer {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            phase: Phase::Released,
            debounce_ms,
        }
    }

    /// Feed one sample. Returns `true` exactly once per press.
    pub fn update(&mut self, low: bool, now_ms: u64) -> bool {
        let (next, pressed) = match (self.phase, low) {
            (Phase::Released, false) => (Phase::Released, false),
            (Phase::Released, true) if self.debounce_ms == 0 => (Phase::Held, true),
            (Phase::Released, true) => (Phase::Pending { since_ms: now_ms }, false),
            (Phase::Pending { since_ms }, true) => {
                if now_ms.saturating_sub(since_ms) >= u64::from(self.debounce_ms) {
                    (Phase::Held, true)
                } else {
                    (Phase::Pending { since_ms }, false)
                }
            }
            // bounce
            (Phase::Pending { .. }, false) => (Phase::Released, false),
            (Phase::Held, true) => (Phase::Held, false),
            (Phase::Held, false) => (Phase::Released, false),
        };
        self.phase = next;
        pressed
    }

    pub fn is_held(&self) -> bool {
        self.phase == Phase::Held
    }
}
