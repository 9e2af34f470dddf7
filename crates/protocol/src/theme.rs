use serde::{Deserialize, Serialize};

use crate::types::Color;

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    /// The animated phase accent (`--accent`).
    Accent,
    /// The accent at glow strength, for halos and drop shadows.
    AccentGlow,

    Background,
    Surface,
    Glass,
    Border,
    BorderFaint,

    TextPrimary,
    TextSecondary,
    TextMuted,
    TextFaint,

    /// The "SYSTEM: ONLINE" indicator.
    StatusOnline,

    /// Splash screen cyan, fixed regardless of phase.
    SplashAccent,
    SplashGrid,

    ProgressTrack,
    MatrixIdle,

    /// Text/icons drawn on top of an accent fill.
    OnAccent,
}

impl ThemeToken {
    /// Whether the token follows the phase accent.
    pub fn is_accent(self) -> bool {
        matches!(self, Self::Accent | Self::AccentGlow)
    }

    /// The dark palette every renderer shares. `accent` is the current
    /// phase color.
    pub fn resolve(self, accent: Color) -> Color {
        match self {
            Self::Accent => accent,
            Self::AccentGlow => accent.with_alpha(accent.a * 0.4),
            Self::Background => Color::from_rgb8(0x05, 0x05, 0x05),
            Self::Surface => Color::from_rgb8(0x0a, 0x0a, 0x0a).with_alpha(0.9),
            Self::Glass => Color::rgba(0.0, 0.0, 0.0, 0.4),
            Self::Border => Color::WHITE.with_alpha(0.1),
            Self::BorderFaint => Color::WHITE.with_alpha(0.05),
            Self::TextPrimary => Color::WHITE,
            Self::TextSecondary => Color::from_rgb8(0x9c, 0xa3, 0xaf),
            Self::TextMuted => Color::from_rgb8(0x6b, 0x72, 0x80),
            Self::TextFaint => Color::from_rgb8(0x4b, 0x55, 0x63),
            Self::StatusOnline => Color::from_rgb8(0x22, 0xc5, 0x5e),
            Self::SplashAccent => Color::from_rgb8(0x00, 0xf5, 0xff),
            Self::SplashGrid => Color::WHITE.with_alpha(0.08),
            Self::ProgressTrack => Color::WHITE.with_alpha(0.05),
            Self::MatrixIdle => Color::WHITE.with_alpha(0.1),
            Self::OnAccent => Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_tokens_follow_the_phase_color() {
        let gold = Color::from_rgb8(0xff, 0xb7, 0x03);
        assert_eq!(ThemeToken::Accent.resolve(gold), gold);
        assert_eq!(ThemeToken::AccentGlow.resolve(gold).to_hex(), "#ffb703");
        assert!(ThemeToken::AccentGlow.resolve(gold).a < 1.0);
        assert_eq!(ThemeToken::SplashAccent.resolve(gold).to_hex(), "#00f5ff");
    }
}
