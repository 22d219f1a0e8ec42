//! Color themes for the interactive terminal.

use crossterm::style::Color;

/// A named palette. Colors are true-color RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub display_name: &'static str,
    pub bg: Color,
    pub text: Color,
    pub accent: Color,
    pub prompt: Color,
    pub error: Color,
}

pub const DEFAULT_THEME: &str = "cyberpunk";

const fn rgb(hex: u32) -> Color {
    Color::Rgb {
        r: ((hex >> 16) & 0xff) as u8,
        g: ((hex >> 8) & 0xff) as u8,
        b: (hex & 0xff) as u8,
    }
}

static THEMES: [Theme; 6] = [
    Theme {
        name: "matrix",
        display_name: "Matrix",
        bg: rgb(0x0d1117),
        text: rgb(0x00ff41),
        accent: rgb(0x00ff41),
        prompt: rgb(0x00cc33),
        error: rgb(0xff0000),
    },
    Theme {
        name: "vscode",
        display_name: "VS Code Dark+",
        bg: rgb(0x1e1e1e),
        text: rgb(0xd4d4d4),
        accent: rgb(0x4ec9b0),
        prompt: rgb(0x569cd6),
        error: rgb(0xf48771),
    },
    Theme {
        name: "dracula",
        display_name: "Dracula",
        bg: rgb(0x282a36),
        text: rgb(0xf8f8f2),
        accent: rgb(0xbd93f9),
        prompt: rgb(0xff79c6),
        error: rgb(0xff5555),
    },
    Theme {
        name: "nord",
        display_name: "Nord",
        bg: rgb(0x2e3440),
        text: rgb(0xd8dee9),
        accent: rgb(0x88c0d0),
        prompt: rgb(0x81a1c1),
        error: rgb(0xbf616a),
    },
    Theme {
        name: "ubuntu",
        display_name: "Ubuntu",
        bg: rgb(0x300a24),
        text: rgb(0xffffff),
        accent: rgb(0xe95420),
        prompt: rgb(0xdd4814),
        error: rgb(0xff4136),
    },
    Theme {
        name: "cyberpunk",
        display_name: "Cyberpunk",
        bg: rgb(0x0a0e27),
        text: rgb(0x00fff9),
        accent: rgb(0xff006e),
        prompt: rgb(0xffbe0b),
        error: rgb(0xfb5607),
    },
];

pub fn all() -> &'static [Theme] {
    &THEMES
}

/// Case-insensitive lookup by name.
pub fn by_name(name: &str) -> Option<&'static Theme> {
    let name = name.trim();
    THEMES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Resolve a configured theme name, falling back to the default when the
/// name is unknown.
pub fn resolve(name: &str) -> &'static Theme {
    by_name(name).unwrap_or_else(|| {
        tracing::warn!(theme = %name, fallback = DEFAULT_THEME, "Unknown theme");
        THEMES
            .iter()
            .find(|t| t.name == DEFAULT_THEME)
            .unwrap_or(&THEMES[0])
    })
}
