//! Display enumeration and break-overlay seams.
//!
//! The break scheduler only ever talks to these traits. The real desktop
//! backends live behind them; the default implementations below keep the
//! daemon functional on a headless box (and give tests something cheap to
//! stand in for real windows).

use crate::libs::error::FocusError;

/// One display's pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A physically attached display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInfo {
    pub id: u32,
    pub bounds: Bounds,
}

/// How heavy the blocking overlay is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStyle {
    /// Lighter-weight always-on-top cover, used for short breaks.
    Banner,
    /// True fullscreen kiosk: no resize, move, minimize, or maximize.
    Kiosk,
}

pub trait DisplayEnumerator: Send + Sync {
    fn list_displays(&self) -> Vec<DisplayInfo>;
}

/// A live blocking overlay on one display.
pub trait Overlay: Send {
    fn display_id(&self) -> u32;

    /// While enabled, the overlay re-acquires input focus whenever it
    /// loses it. Disabled just before teardown so closing cannot race the
    /// refocus handler.
    fn set_focus_guard(&mut self, enabled: bool);

    /// Asks the overlay to close. Returns false if it did not close
    /// within the grace period, in which case the caller force-destroys.
    fn close(&mut self) -> bool;

    fn force_destroy(&mut self);
}

pub trait OverlayFactory: Send + Sync {
    fn create(&self, display: &DisplayInfo, style: OverlayStyle) -> Result<Box<dyn Overlay>, FocusError>;
}

/// Fallback enumerator reporting a single nominal display.
pub struct SingleDisplay;

impl DisplayEnumerator for SingleDisplay {
    fn list_displays(&self) -> Vec<DisplayInfo> {
        vec![DisplayInfo {
            id: 0,
            bounds: Bounds {
                x: 0,
                y: 0,
                width: 1920,
                height: 1080,
            },
        }]
    }
}

/// Overlay that only exists in the logs. Used when no windowing backend
/// is wired in, so break timing still runs end to end.
pub struct LoggingOverlay {
    display_id: u32,
}

impl Overlay for LoggingOverlay {
    fn display_id(&self) -> u32 {
        self.display_id
    }

    fn set_focus_guard(&mut self, _enabled: bool) {}

    fn close(&mut self) -> bool {
        true
    }

    fn force_destroy(&mut self) {}
}

pub struct LoggingOverlayFactory;

impl OverlayFactory for LoggingOverlayFactory {
    fn create(&self, display: &DisplayInfo, _style: OverlayStyle) -> Result<Box<dyn Overlay>, FocusError> {
        Ok(Box::new(LoggingOverlay { display_id: display.id }))
    }
}
