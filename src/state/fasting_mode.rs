//! Fixed catalog of fasting modes

use serde::Serialize;

use crate::error::TimerError;

const SECONDS_PER_HOUR: u64 = 3600;

/// A named pair of eating-window and fasting-window hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FastingMode {
    pub eat_hours: u64,
    pub fast_hours: u64,
    pub display_name: &'static str,
}

impl FastingMode {
    /// Fast 20h, eat 4h
    pub const TWENTY_FOUR: FastingMode = FastingMode {
        eat_hours: 4,
        fast_hours: 20,
        display_name: "20:4",
    };

    /// Fast 16h, eat 8h
    pub const SIXTEEN_EIGHT: FastingMode = FastingMode {
        eat_hours: 8,
        fast_hours: 16,
        display_name: "16:8",
    };

    /// Fast 18h, eat 6h
    pub const EIGHTEEN_SIX: FastingMode = FastingMode {
        eat_hours: 6,
        fast_hours: 18,
        display_name: "18:6",
    };

    /// The complete catalog, in display order
    pub const ALL: [FastingMode; 3] = [
        Self::TWENTY_FOUR,
        Self::SIXTEEN_EIGHT,
        Self::EIGHTEEN_SIX,
    ];

    /// Look up a mode by display name. `16-8` is accepted as a URL friendly
    /// spelling of `16:8`.
    pub fn find(name: &str) -> Result<Self, TimerError> {
        let normalized = name.trim().replace('-', ":");
        Self::ALL
            .iter()
            .find(|mode| mode.display_name == normalized)
            .copied()
            .ok_or_else(|| TimerError::UnknownMode(name.to_string()))
    }

    pub fn eat_seconds(&self) -> u64 {
        self.eat_hours * SECONDS_PER_HOUR
    }

    pub fn fast_seconds(&self) -> u64 {
        self.fast_hours * SECONDS_PER_HOUR
    }

    /// Upper bound for the remaining-time counter under this mode
    pub fn max_phase_seconds(&self) -> u64 {
        self.eat_seconds().max(self.fast_seconds())
    }
}

impl std::fmt::Display for FastingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name)
    }
}
