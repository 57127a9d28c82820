use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Letters placed by the layout service
    pub letter: Color,
    /// Empty-cell dot color
    pub empty: Color,
    /// Focused cell background
    pub selected_bg: Color,
    /// Conflict cell color
    pub conflict: Color,
    /// Error message color
    pub error: Color,
    /// Success/done color
    pub success: Color,
    /// Secondary info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Pick a theme by CLI name; unknown names fall back to dark.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "high-contrast" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            letter: Color::Rgb { r: 255, g: 255, b: 255 },
            empty: Color::Rgb { r: 90, g: 95, b: 115 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            conflict: Color::Rgb { r: 255, g: 90, b: 90 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            letter: Color::Rgb { r: 0, g: 0, b: 0 },
            empty: Color::Rgb { r: 170, g: 170, b: 185 },
            selected_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            conflict: Color::Rgb { r: 220, g: 50, b: 50 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            letter: Color::Yellow,
            empty: Color::Grey,
            selected_bg: Color::Blue,
            conflict: Color::Red,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}
