//! Theme System for spark-gui.
//!
//! A theme answers one question for the draw pass: given a component type
//! name, which styles and characters should it use?
//!
//! - [`ThemeColor`]: terminal default, ANSI palette index or RGB
//! - [`ThemeStyle`]: foreground, background and attributes
//! - [`ThemeDefinition`]: `normal` / `active` (focused) / `insensitive`
//!   (disabled) styles plus named characters with caller-supplied fallbacks
//! - [`Theme`]: a base definition and per-type overrides
//!
//! # Example
//!
//! ```
//! use spark_gui::theme::{get_preset, ThemeDefinition};
//!
//! let mut theme = get_preset("nord").unwrap();
//! theme.set_definition("Button", ThemeDefinition::default().with_character("LEFT", '<'));
//! assert_eq!(theme.definition("Button").character("LEFT", '['), '<');
//! assert_eq!(theme.definition("Label").character("LEFT", '['), '[');
//! ```

use std::collections::HashMap;

use crate::types::{Attr, Rgba};

pub mod presets;

pub use presets::*;

// =============================================================================
// ThemeColor
// =============================================================================

/// A theme color: terminal default, ANSI palette index, or explicit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeColor {
    /// Use terminal's default color.
    #[default]
    Default,
    /// ANSI palette index (0-255).
    /// - 0-7: Standard colors
    /// - 8-15: Bright colors
    /// - 16-231: 6x6x6 RGB cube
    /// - 232-255: Grayscale
    Ansi(u8),
    /// Explicit RGB color.
    Rgb(Rgba),
}

impl ThemeColor {
    pub fn resolve(&self) -> Rgba {
        match self {
            Self::Default => Rgba::TERMINAL_DEFAULT,
            Self::Ansi(i) => Rgba::ansi(*i),
            Self::Rgb(c) => *c,
        }
    }
}

/// `u8` is an ANSI index.
impl From<u8> for ThemeColor {
    fn from(index: u8) -> Self {
        Self::Ansi(index)
    }
}

/// `u32` is an RGB integer (0xRRGGBB).
impl From<u32> for ThemeColor {
    fn from(rgb: u32) -> Self {
        Self::Rgb(Rgba::from_rgb_int(rgb))
    }
}

impl From<Rgba> for ThemeColor {
    fn from(color: Rgba) -> Self {
        Self::Rgb(color)
    }
}

// =============================================================================
// ThemeStyle
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeStyle {
    pub fg: ThemeColor,
    pub bg: ThemeColor,
    pub attrs: Attr,
}

impl ThemeStyle {
    pub fn new(fg: impl Into<ThemeColor>, bg: impl Into<ThemeColor>) -> Self {
        Self {
            fg: fg.into(),
            bg: bg.into(),
            attrs: Attr::NONE,
        }
    }

    pub fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }
}

// =============================================================================
// ThemeDefinition
// =============================================================================

/// Styles and characters for one component type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThemeDefinition {
    pub normal: ThemeStyle,
    /// Used while the component holds focus.
    pub active: ThemeStyle,
    /// Used while the component is disabled.
    pub insensitive: ThemeStyle,
    characters: HashMap<String, char>,
}

impl ThemeDefinition {
    pub fn new(normal: ThemeStyle, active: ThemeStyle, insensitive: ThemeStyle) -> Self {
        Self {
            normal,
            active,
            insensitive,
            characters: HashMap::new(),
        }
    }

    /// Named character, or `fallback` if the theme does not define it.
    pub fn character(&self, name: &str, fallback: char) -> char {
        self.characters.get(name).copied().unwrap_or(fallback)
    }

    pub fn set_character(&mut self, name: impl Into<String>, ch: char) {
        self.characters.insert(name.into(), ch);
    }

    pub fn with_character(mut self, name: impl Into<String>, ch: char) -> Self {
        self.set_character(name, ch);
        self
    }
}

// =============================================================================
// Theme
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name (e.g., "dracula", "nord").
    pub name: String,
    /// Theme description.
    pub description: String,
    base: ThemeDefinition,
    overrides: HashMap<String, ThemeDefinition>,
}

impl Default for Theme {
    fn default() -> Self {
        terminal()
    }
}

impl Theme {
    pub fn new(name: impl Into<String>, description: impl Into<String>, base: ThemeDefinition) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            base,
            overrides: HashMap::new(),
        }
    }

    /// Definition for `type_name`, falling back to the base definition.
    pub fn definition(&self, type_name: &str) -> &ThemeDefinition {
        self.overrides.get(type_name).unwrap_or(&self.base)
    }

    pub fn base_definition(&self) -> &ThemeDefinition {
        &self.base
    }

    pub fn set_definition(&mut self, type_name: impl Into<String>, definition: ThemeDefinition) {
        self.overrides.insert(type_name.into(), definition);
    }

    pub fn with_definition(mut self, type_name: impl Into<String>, definition: ThemeDefinition) -> Self {
        self.set_definition(type_name, definition);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_color_resolve() {
        assert_eq!(ThemeColor::Default.resolve(), Rgba::TERMINAL_DEFAULT);
        assert_eq!(ThemeColor::Ansi(4).resolve(), Rgba::ansi(4));
        assert_eq!(ThemeColor::from(0xff0000u32).resolve(), Rgba::RED);
    }

    #[test]
    fn test_definition_falls_back_to_base() {
        let mut theme = Theme::new("t", "", ThemeDefinition::default());
        let button = ThemeDefinition::new(
            ThemeStyle::new(1u8, ThemeColor::Default),
            ThemeStyle::default(),
            ThemeStyle::default(),
        );
        theme.set_definition("Button", button.clone());
        assert_eq!(theme.definition("Button"), &button);
        assert_eq!(theme.definition("Label"), theme.base_definition());
    }

    #[test]
    fn test_character_fallback() {
        let definition = ThemeDefinition::default().with_character("MARK", '*');
        assert_eq!(definition.character("MARK", '-'), '*');
        assert_eq!(definition.character("OTHER", '-'), '-');
    }
}
