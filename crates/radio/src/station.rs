//! Station code table.

/// One station of the radio network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Station {
    Game,
    Ocr,
    Cover,
    Chip,
    All,
}

impl Station {
    /// Parse a user-supplied station code. Unknown codes are a validation
    /// failure the caller turns into help text.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "game" => Some(Self::Game),
            "ocr" => Some(Self::Ocr),
            "cover" => Some(Self::Cover),
            "chip" => Some(Self::Chip),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Numeric station id used in API paths and dedup keys.
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            Self::Game => 1,
            Self::Ocr => 2,
            Self::Cover => 3,
            Self::Chip => 4,
            Self::All => 5,
        }
    }

    /// Display name used in every status line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Game => "Game channel",
            Self::Ocr => "OCR channel",
            Self::Cover => "Covers channel",
            Self::Chip => "Chiptune channel",
            Self::All => "All channel",
        }
    }

    /// All codes, for help text.
    pub const CODES: [&'static str; 5] = ["game", "ocr", "cover", "chip", "all"];
}
