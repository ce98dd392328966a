//! TFT LCD Driver Implementation
//!
//! Turns rectangle fills into address-window commands and row-sized pixel bursts.
//!
//! ## Architecture
//!
//! ### Startup
//! - `new()` - Reset the panel and write the power-on orientation
//!
//! ### Command Encoding
//! - `set_column_window()` / `set_row_window()` - Program one axis of the address window
//! - `write_orientation()` - Write a memory access control value
//!
//! ### Cooperative Fill
//! - `fill_rect()` - Program a window, or keep streaming the one already programmed
//! - `stream_next_row()` - Send exactly one scan row of the programmed window
//!
//! ### Blocking Helpers
//! - `fill_rect_blocking()` - Run one fill to completion
//! - `clear()` - Full-screen fill at the current geometry
//!
//! ### Orientation
//! - `advance_orientation()` - Step to the next orientation in the cycle
//! - `set_orientation()` - Jump straight to a given orientation
//!
//! ## Pixel Format
//!
//! The panel runs in 16-bit RGB565. Pixels go out low byte first, so `0xF800`
//! (red) is sent as `0x00, 0xF8`.
//!
//! ## Reprogramming
//!
//! While a window still has rows left to send, `fill_rect()` ignores its arguments
//! and only streams. The address window is reprogrammed only after the previous
//! rectangle has been fully streamed, otherwise the panel's write pointer and the
//! rows already sent would disagree.

pub use display_interface::DisplayError;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::IntoStorage;

use crate::tftlcd::cmd::Cmd;
use crate::tftlcd::flag::Flag;
use crate::tftlcd::interface::Transport;
use crate::tftlcd::orientation::{Geometry, Orientation};
use crate::tftlcd::ROW_CAPACITY;

/// A clipped, normalized rectangle in panel coordinates, corners included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Window {
    /// Order the corners per axis and clip them to `geometry`
    pub fn clipped(x1: u16, y1: u16, x2: u16, y2: u16, geometry: Geometry) -> Self {
        let (x1, x2) = if x2 < x1 { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if y2 < y1 { (y2, y1) } else { (y1, y2) };
        Window {
            x1: x1.min(geometry.last_column()),
            y1: y1.min(geometry.last_row()),
            x2: x2.min(geometry.last_column()),
            y2: y2.min(geometry.last_row()),
        }
    }

    /// Pixels per row
    pub const fn width(&self) -> u16 {
        self.x2 - self.x1 + 1
    }

    /// Number of rows
    pub const fn height(&self) -> u16 {
        self.y2 - self.y1 + 1
    }
}

/// Outcome of sending one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// More rows remain in the window
    Continuing,
    /// The window is fully streamed (or nothing was programmed)
    Done,
}

/// Outcome of one `fill_rect()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStatus {
    /// A new window was programmed, no pixels sent yet
    Programmed,
    /// A row went out and more remain
    Streaming,
    /// The last row went out
    Complete,
}

impl FillStatus {
    pub fn is_complete(self) -> bool {
        self == FillStatus::Complete
    }
}

impl From<RowStatus> for FillStatus {
    fn from(status: RowStatus) -> Self {
        match status {
            RowStatus::Continuing => FillStatus::Streaming,
            RowStatus::Done => FillStatus::Complete,
        }
    }
}

/// The one window currently being streamed
#[derive(Debug, Clone, Copy)]
struct StreamSession {
    window: Window,
    color: Rgb565,
    /// Next row to send, always within `window.y1..=window.y2`
    row: u16,
}

/// TFT LCD driver
///
/// Owns the transport plus everything that has to survive between calls:
/// orientation, geometry, the in-flight window and the row buffers.
pub struct TftLcd<T> {
    transport: T,
    orientation: Orientation,
    geometry: Geometry,
    session: Option<StreamSession>,
    row: [u16; ROW_CAPACITY],
    bytes: [u8; 2 * ROW_CAPACITY],
}

impl<T> TftLcd<T>
where
    T: Transport,
{
    /// Reset the panel and bring it up in [`Orientation::LandscapeUp`]
    ///
    /// The power-on value is written first and then immediately replaced by the
    /// landscape value; both writes go out, in that order.
    pub fn new(transport: T) -> Result<Self, DisplayError> {
        let mut tft = TftLcd {
            transport,
            orientation: Orientation::LandscapeUp,
            geometry: Orientation::LandscapeUp.geometry(),
            session: None,
            row: [0; ROW_CAPACITY],
            bytes: [0; 2 * ROW_CAPACITY],
        };
        tft.init()?;
        Ok(tft)
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        log::info!("Initializing TFT panel");

        self.transport.reset()?;
        self.write_orientation(Flag::MADCTL_POWER_ON)?;

        self.session = None;
        self.orientation = Orientation::LandscapeUp;
        self.write_orientation(self.orientation.register())?;
        self.geometry = self.orientation.geometry();

        log::info!(
            "Panel ready: {} ({}x{})",
            self.orientation,
            self.geometry.width(),
            self.geometry.height()
        );
        Ok(())
    }

    // ==================== Command Encoding ====================

    fn address_window(&mut self, command: u8, start: u16, end: u16) -> Result<(), DisplayError> {
        self.transport.send_command(command)?;
        for byte in start.to_be_bytes().into_iter().chain(end.to_be_bytes()) {
            self.transport.send_data(byte)?;
        }
        Ok(())
    }

    /// Column address window, both ends big-endian
    pub fn set_column_window(&mut self, x1: u16, x2: u16) -> Result<(), DisplayError> {
        self.address_window(Cmd::COLUMN_ADDRESS_SET, x1, x2)
    }

    /// Row address window, both ends big-endian
    pub fn set_row_window(&mut self, y1: u16, y2: u16) -> Result<(), DisplayError> {
        self.address_window(Cmd::ROW_ADDRESS_SET, y1, y2)
    }

    /// Memory access control register
    pub fn write_orientation(&mut self, register: u8) -> Result<(), DisplayError> {
        self.transport.send_command(Cmd::MEMORY_ACCESS_CONTROL)?;
        self.transport.send_data(register)
    }

    // ==================== Cooperative Fill ====================

    /// Fill `(x1, y1)-(x2, y2)` with `color`, one step per call
    ///
    /// The first call programs the window and returns [`FillStatus::Programmed`].
    /// Every following call sends one row until [`FillStatus::Complete`]. Calls made
    /// while a window is still streaming keep streaming that window, whatever
    /// coordinates they pass.
    pub fn fill_rect(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Rgb565,
    ) -> Result<FillStatus, DisplayError> {
        if self.session.is_some() {
            return self.stream_next_row().map(FillStatus::from);
        }

        let window = Window::clipped(x1, y1, x2, y2, self.geometry);
        log::debug!(
            "Programming window ({},{})-({},{}) color 0x{:04X}",
            window.x1,
            window.y1,
            window.x2,
            window.y2,
            color.into_storage()
        );

        self.set_column_window(window.x1, window.x2)?;
        self.set_row_window(window.y1, window.y2)?;
        self.transport.send_command(Cmd::MEMORY_WRITE)?;

        self.session = Some(StreamSession {
            window,
            color,
            row: window.y1,
        });
        Ok(FillStatus::Programmed)
    }

    /// Send one row of the programmed window
    ///
    /// Without a programmed window this sends nothing and reports [`RowStatus::Done`].
    /// On a transport error the row is not counted as sent.
    pub fn stream_next_row(&mut self) -> Result<RowStatus, DisplayError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(RowStatus::Done);
        };

        let pixels = session.window.width() as usize;
        debug_assert!(pixels <= ROW_CAPACITY, "row wider than the row buffer");

        self.row[..pixels].fill(session.color.into_storage());
        for (out, pixel) in self.bytes.chunks_exact_mut(2).zip(&self.row[..pixels]) {
            out.copy_from_slice(&pixel.to_le_bytes());
        }
        self.transport.send_data_burst(&self.bytes[..2 * pixels])?;
        log::trace!("Row {} sent ({} px)", session.row, pixels);

        session.row += 1;
        if session.row > session.window.y2 {
            self.session = None;
            Ok(RowStatus::Done)
        } else {
            Ok(RowStatus::Continuing)
        }
    }

    // ==================== Blocking Helpers ====================

    /// Send whatever rows the in-flight window still has
    pub fn finish_stream(&mut self) -> Result<(), DisplayError> {
        while self.session.is_some() {
            self.stream_next_row()?;
        }
        Ok(())
    }

    /// Fill a rectangle and only return once every row is out
    ///
    /// A window still in flight is finished first, so this always draws the
    /// rectangle it was asked for.
    pub fn fill_rect_blocking(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.finish_stream()?;
        while !self.fill_rect(x1, y1, x2, y2, color)?.is_complete() {}
        Ok(())
    }

    /// Fill the whole panel at the current geometry
    pub fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        let geometry = self.geometry;
        self.fill_rect_blocking(0, 0, geometry.last_column(), geometry.last_row(), color)
    }

    // ==================== Orientation ====================

    /// Rotate to the next orientation in the cycle and return the new geometry
    pub fn advance_orientation(&mut self) -> Result<Geometry, DisplayError> {
        self.set_orientation(self.orientation.next())
    }

    /// Switch to `orientation` and return its geometry
    ///
    /// A window still in flight is finished first; pixel data must directly follow
    /// its memory write, never the orientation command.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<Geometry, DisplayError> {
        self.finish_stream()?;
        self.write_orientation(orientation.register())?;
        self.orientation = orientation;
        self.geometry = orientation.geometry();
        log::info!(
            "Orientation now {} ({}x{})",
            orientation,
            self.geometry.width(),
            self.geometry.height()
        );
        Ok(self.geometry)
    }
}

impl<T> TftLcd<T> {
    /// Current orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Geometry new windows are clipped against
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Select the geometry for the next programmed window
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    /// Whether a window is programmed and still has rows to send
    pub fn is_streaming(&self) -> bool {
        self.session.is_some()
    }

    /// The window being streamed, if any
    pub fn active_window(&self) -> Option<Window> {
        self.session.map(|s| s.window)
    }

    /// Next row the streamer will send, if a window is in flight
    pub fn next_row(&self) -> Option<u16> {
        self.session.map(|s| s.row)
    }

    /// Give back the transport
    pub fn release(self) -> T {
        self.transport
    }

    #[cfg(test)]
    pub(crate) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
