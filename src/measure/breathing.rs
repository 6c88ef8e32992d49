#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl std::fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = match self {
            BreathPhase::Inhale => "Inhale",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Exhale",
        };

        write!(f, "{}", result)
    }
}

/// 4-4-6-2 box breathing.
pub const BREATHING_SEQUENCE: [(BreathPhase, u8); 4] = [
    (BreathPhase::Inhale, 4),
    (BreathPhase::Hold, 4),
    (BreathPhase::Exhale, 6),
    (BreathPhase::Hold, 2),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidedBreathing {
    index: usize,
    remaining: u8,
}

impl GuidedBreathing {
    pub fn new() -> Self {
        GuidedBreathing {
            index: 0,
            remaining: BREATHING_SEQUENCE[0].1,
        }
    }

    pub fn phase(&self) -> BreathPhase {
        BREATHING_SEQUENCE[self.index].0
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn scale(&self) -> f32 {
        match self.phase() {
            BreathPhase::Inhale => 1.15,
            BreathPhase::Exhale => 0.9,
            BreathPhase::Hold => 1.0,
        }
    }

    /// Called once per second.
    pub fn advance(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            self.index = (self.index + 1) % BREATHING_SEQUENCE.len();
            self.remaining = BREATHING_SEQUENCE[self.index].1;
        }
    }
}

impl Default for GuidedBreathing {
    fn default() -> Self {
        Self::new()
    }
}
