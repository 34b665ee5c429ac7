//! Position type.

/// Long or short position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Long position (buyer).
    Long,
    /// Short position (seller).
    Short,
}

impl Position {
    /// Build from the `is_long` flag carried by option-like instruments.
    pub fn from_is_long(is_long: bool) -> Self {
        if is_long {
            Position::Long
        } else {
            Position::Short
        }
    }

    /// Return the sign (+1 for Long, -1 for Short).
    pub fn sign(&self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Short => -1.0,
        }
    }

    /// The opposite position.
    pub fn flip(&self) -> Self {
        match self {
            Position::Long => Position::Short,
            Position::Short => Position::Long,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Long => write!(f, "Long"),
            Position::Short => write!(f, "Short"),
        }
    }
}
