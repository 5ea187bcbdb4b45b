//! Width budget for the message column.

/// Widths reserved around the message text, in layout units.
///
/// The message column gets whatever remains of the container after the
/// timestamp column, username column, action-button column, and margins.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservedColumns {
    pub timestamp: f64,
    pub username: f64,
    pub action_button: f64,
    pub margins: f64,
}

impl ReservedColumns {
    /// Pixel-space defaults from the reference layout.
    pub const TIMESTAMP_WIDTH: f64 = 60.0;
    pub const USERNAME_WIDTH: f64 = 100.0;
    pub const ACTION_BUTTON_WIDTH: f64 = 80.0;
    pub const MARGINS: f64 = 24.0;

    /// Cell-based reservations for the terminal renderer: `HH:MM:SS` plus a
    /// gap, a right-aligned name column, the `[Not Toxic]` cell, and gaps.
    pub fn terminal() -> Self {
        Self {
            timestamp: 9.0,
            username: 17.0,
            action_button: 12.0,
            margins: 4.0,
        }
    }

    fn total(&self) -> f64 {
        self.timestamp + self.username + self.action_button + self.margins
    }
}

impl Default for ReservedColumns {
    fn default() -> Self {
        Self {
            timestamp: Self::TIMESTAMP_WIDTH,
            username: Self::USERNAME_WIDTH,
            action_button: Self::ACTION_BUTTON_WIDTH,
            margins: Self::MARGINS,
        }
    }
}

/// Tracks the container width and derives the width left for message text.
///
/// The width is set once on mount and again on each resize event; nothing
/// here polls or recomputes on its own.
#[derive(Debug, Clone)]
pub struct Viewport {
    container_width: f64,
    reserved: ReservedColumns,
}

impl Viewport {
    pub fn new(reserved: ReservedColumns) -> Self {
        Self {
            container_width: 0.0,
            reserved,
        }
    }

    pub fn set_container_width(&mut self, width: f64) {
        self.container_width = width;
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Width available for message text; saturates at zero.
    pub fn message_width(&self) -> f64 {
        (self.container_width - self.reserved.total()).max(0.0)
    }

    pub fn reserved(&self) -> &ReservedColumns {
        &self.reserved
    }
}
