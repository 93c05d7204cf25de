use crossterm::style::Color;

/// Palette for the two site moods. Dormant is the muted default; waking
/// the system up brightens the chrome and saturates the accent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Theme {
    pub(crate) fg: Color,
    pub(crate) dim: Color,
    pub(crate) frame: Color,
    pub(crate) accent: Color,
    pub(crate) highlight: Color,
}

impl Theme {
    pub(crate) fn dormant() -> Self {
        Self {
            fg: Color::Grey,
            dim: Color::DarkGrey,
            frame: Color::DarkGrey,
            accent: Color::DarkRed,
            highlight: Color::White,
        }
    }

    pub(crate) fn awakened() -> Self {
        Self {
            fg: Color::White,
            dim: Color::Grey,
            frame: Color::Grey,
            accent: Color::Red,
            highlight: Color::White,
        }
    }

    pub(crate) fn for_state(awakened: bool) -> Self {
        if awakened {
            Self::awakened()
        } else {
            Self::dormant()
        }
    }
}
