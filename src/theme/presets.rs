//! Built-in theme presets.
//!
//! - `terminal` - ANSI colors, respects the user's terminal scheme
//! - `dracula` - dark theme with vivid colors
//! - `nord` - arctic, bluish colors

use crate::types::Attr;

use super::{Theme, ThemeColor, ThemeDefinition, ThemeStyle};

/// Names accepted by [`get_preset`].
pub const PRESET_NAMES: [&str; 3] = ["terminal", "dracula", "nord"];

/// Look up a preset by name.
pub fn get_preset(name: &str) -> Option<Theme> {
    match name {
        "terminal" => Some(terminal()),
        "dracula" => Some(dracula()),
        "nord" => Some(nord()),
        _ => None,
    }
}

/// Shared shape of every preset: plain text, reversed focus highlight on
/// interactables, dimmed disabled text, and a border color of its own.
fn build(
    name: &str,
    description: &str,
    text: ThemeColor,
    background: ThemeColor,
    focus: ThemeColor,
    disabled: ThemeColor,
    border: ThemeColor,
) -> Theme {
    let base = ThemeDefinition::new(
        ThemeStyle::new(text, background),
        ThemeStyle::new(text, background).with_attrs(Attr::REVERSE),
        ThemeStyle::new(disabled, background),
    );
    let border = ThemeDefinition::new(
        ThemeStyle::new(border, background),
        ThemeStyle::new(focus, background),
        ThemeStyle::new(disabled, background),
    );
    let button = ThemeDefinition::new(
        ThemeStyle::new(text, background),
        ThemeStyle::new(background, focus).with_attrs(Attr::BOLD),
        ThemeStyle::new(disabled, background),
    );
    Theme::new(name, description, base)
        .with_definition("Border", border)
        .with_definition("Button", button)
}

// =============================================================================
// Terminal Theme (Default)
// =============================================================================

/// Terminal - uses ANSI colors to respect user's terminal color scheme.
pub fn terminal() -> Theme {
    build(
        "terminal",
        "Uses terminal default colors",
        ThemeColor::Default,
        ThemeColor::Default,
        ThemeColor::Ansi(12), // bright blue
        ThemeColor::Ansi(8),
        ThemeColor::Ansi(7),
    )
}

// =============================================================================
// Dracula Theme
// =============================================================================

pub fn dracula() -> Theme {
    build(
        "dracula",
        "Dracula dark theme",
        0xf8f8f2u32.into(),
        0x282a36u32.into(),
        0xbd93f9u32.into(),
        0x44475au32.into(),
        0x6272a4u32.into(),
    )
}

// =============================================================================
// Nord Theme
// =============================================================================

pub fn nord() -> Theme {
    build(
        "nord",
        "Nord arctic theme",
        0xd8dee9u32.into(),
        0x2e3440u32.into(),
        0x88c0d0u32.into(),
        0x3b4252u32.into(),
        0x4c566au32.into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba;

    #[test]
    fn test_all_presets_resolve() {
        for name in PRESET_NAMES {
            let theme = get_preset(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(get_preset("missing").is_none());
    }

    #[test]
    fn test_terminal_uses_defaults() {
        let theme = terminal();
        let base = theme.base_definition();
        assert_eq!(base.normal.fg.resolve(), Rgba::TERMINAL_DEFAULT);
        assert!(base.active.attrs.contains(Attr::REVERSE));
    }

    #[test]
    fn test_border_override() {
        let theme = dracula();
        assert_eq!(
            theme.definition("Border").normal.fg.resolve(),
            Rgba::from_rgb_int(0x6272a4)
        );
    }
}
