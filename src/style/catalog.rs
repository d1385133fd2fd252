//! Style catalog: recognized kinds, value types, and defaults.

use std::fmt;
use std::str::FromStr;

/// A formatting attribute that a span can apply to its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "kebab-case"))]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    /// Foreground color. Carries a [`Color`].
    TextColor,
    /// Highlight color. Carries a [`Color`].
    BackgroundColor,
}

impl StyleKind {
    /// Every kind, in catalog order.
    pub const ALL: [StyleKind; 6] = [
        StyleKind::Bold,
        StyleKind::Italic,
        StyleKind::Underline,
        StyleKind::Strikethrough,
        StyleKind::TextColor,
        StyleKind::BackgroundColor,
    ];

    /// Stable name used by the CLI and host bindings.
    pub fn name(self) -> &'static str {
        match self {
            StyleKind::Bold => "bold",
            StyleKind::Italic => "italic",
            StyleKind::Underline => "underline",
            StyleKind::Strikethrough => "strikethrough",
            StyleKind::TextColor => "text-color",
            StyleKind::BackgroundColor => "background-color",
        }
    }

    /// Whether spans of this kind carry a value (color kinds) or are
    /// presence-only.
    pub fn carries_value(self) -> bool {
        matches!(self, StyleKind::TextColor | StyleKind::BackgroundColor)
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known [`StyleKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style kind `{0}`")]
pub struct ParseStyleKindError(String);

impl FromStr for StyleKind {
    type Err = ParseStyleKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStyleKindError(s.to_string()))
    }
}

/// A color value. Comparison is case-insensitive: the string is trimmed and
/// lowercased on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(from = "String", into = "String"))]
pub struct Color(String);

impl Color {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A style kind with its payload. Two spans are "identical" when their
/// `Style`s are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(
    feature = "cli",
    serde(tag = "kind", content = "value", rename_all = "kebab-case")
)]
pub enum Style {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    TextColor(Color),
    BackgroundColor(Color),
}

impl Style {
    pub fn kind(&self) -> StyleKind {
        match self {
            Style::Bold => StyleKind::Bold,
            Style::Italic => StyleKind::Italic,
            Style::Underline => StyleKind::Underline,
            Style::Strikethrough => StyleKind::Strikethrough,
            Style::TextColor(_) => StyleKind::TextColor,
            Style::BackgroundColor(_) => StyleKind::BackgroundColor,
        }
    }

    /// The color payload, for the color kinds.
    pub fn color(&self) -> Option<&Color> {
        match self {
            Style::TextColor(color) | Style::BackgroundColor(color) => Some(color),
            _ => None,
        }
    }

    /// Whether this style is of `kind` and, when `value` is given, carries
    /// that color.
    pub fn matches(&self, kind: StyleKind, value: Option<&Color>) -> bool {
        if self.kind() != kind {
            return false;
        }
        match (value, self.color()) {
            (Some(wanted), Some(have)) => wanted == have,
            _ => true,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color() {
            Some(color) => write!(f, "{}({})", self.kind(), color),
            None => write!(f, "{}", self.kind()),
        }
    }
}

/// Default values for the value-carrying kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(default, rename_all = "kebab-case"))]
pub struct StyleCatalog {
    pub text_color: Color,
    pub background_color: Color,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self {
            text_color: Color::new("#ff0000"),
            background_color: Color::new("#ffff00"),
        }
    }
}

impl StyleCatalog {
    /// The default value for `kind`, if it carries one.
    pub fn default_value(&self, kind: StyleKind) -> Option<&Color> {
        match kind {
            StyleKind::TextColor => Some(&self.text_color),
            StyleKind::BackgroundColor => Some(&self.background_color),
            _ => None,
        }
    }

    /// Build the style for `kind`.
    ///
    /// Presence-only kinds ignore `value`. Color kinds fall back to the
    /// catalog default when `value` is `None` or empty.
    pub fn style(&self, kind: StyleKind, value: Option<Color>) -> Style {
        let color = || {
            value
                .clone()
                .filter(|c| !c.is_empty())
                .or_else(|| self.default_value(kind).cloned())
                .unwrap_or_else(|| Color::new(""))
        };
        match kind {
            StyleKind::Bold => Style::Bold,
            StyleKind::Italic => Style::Italic,
            StyleKind::Underline => Style::Underline,
            StyleKind::Strikethrough => Style::Strikethrough,
            StyleKind::TextColor => Style::TextColor(color()),
            StyleKind::BackgroundColor => Style::BackgroundColor(color()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in StyleKind::ALL {
            assert_eq!(kind.name().parse::<StyleKind>(), Ok(kind));
        }
        assert_eq!("BOLD".parse::<StyleKind>(), Ok(StyleKind::Bold));
        assert!("sparkle".parse::<StyleKind>().is_err());
    }

    #[test]
    fn test_value_carrying_kinds() {
        let carrying: Vec<_> = StyleKind::ALL
            .into_iter()
            .filter(|k| k.carries_value())
            .collect();
        assert_eq!(
            carrying,
            vec![StyleKind::TextColor, StyleKind::BackgroundColor]
        );
    }

    #[test]
    fn test_color_is_case_insensitive() {
        assert_eq!(Color::new("#FF00aa"), Color::new(" #ff00AA "));
        assert_eq!(
            Style::TextColor("#ABC".into()),
            Style::TextColor("#abc".into())
        );
    }

    #[test]
    fn test_catalog_defaults() {
        let catalog = StyleCatalog::default();
        assert_eq!(catalog.style(StyleKind::Bold, None), Style::Bold);
        assert_eq!(
            catalog.style(StyleKind::Bold, Some("#123456".into())),
            Style::Bold
        );
        assert_eq!(
            catalog.style(StyleKind::TextColor, None),
            Style::TextColor("#ff0000".into())
        );
        assert_eq!(
            catalog.style(StyleKind::BackgroundColor, Some("".into())),
            Style::BackgroundColor("#ffff00".into())
        );
        assert_eq!(
            catalog.style(StyleKind::TextColor, Some("#00FF00".into())),
            Style::TextColor("#00ff00".into())
        );
    }

    #[test]
    fn test_style_matches() {
        let red = Style::TextColor("#ff0000".into());
        assert!(red.matches(StyleKind::TextColor, None));
        assert!(red.matches(StyleKind::TextColor, Some(&"#FF0000".into())));
        assert!(!red.matches(StyleKind::TextColor, Some(&"#00ff00".into())));
        assert!(!red.matches(StyleKind::BackgroundColor, None));
        assert!(Style::Bold.matches(StyleKind::Bold, Some(&"#ff0000".into())));
    }
}
