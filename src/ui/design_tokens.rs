// SPDX-License-Identifier: MPL-2.0
//! Colors, spacing, and sizes shared by the viewer's panels.

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    pub const WHITE: Color = Color::WHITE;
    /// Canvas background behind the image.
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    /// Panels drawn over the image.
    pub const OVERLAY_STRONG: f32 = 0.8;
}

// ============================================================================
// Spacing Scale (8px grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
}

// ============================================================================
// Sizing
// ============================================================================

pub mod sizing {
    pub const INFO_PANEL_WIDTH: f32 = 340.0;
    pub const PATHS_FORM_WIDTH: f32 = 420.0;
}

// ============================================================================
// Typography
// ============================================================================

pub mod typography {
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
    pub const TITLE: f32 = 16.0;
}

// ============================================================================
// Radius
// ============================================================================

pub mod radius {
    pub const MD: f32 = 8.0;
}
