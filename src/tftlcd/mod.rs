//! TFT LCD Panel Driver
//!
//! Drives a 320x240 RGB565 TFT panel over a command/data byte link and runs
//! the cycling rectangle demo on top of it.
//!
//! ### Usage
//! Nothing in here ever blocks on the panel. To put something on screen you:
//!
//! 1. wrap the SPI bus and pins in an [`interface::SpiInterface`] (or any other
//!    [`interface::Transport`])
//! 1. start the panel with [`driver::TftLcd::new`]
//! 1. either call [`driver::TftLcd::fill_rect`] repeatedly until it reports
//!    completion, or hand the driver to [`demo::Demo`] and call
//!    [`demo::Demo::tick`] from your main loop
//!
//! Each call moves at most one scan row over the wire, so the caller's loop
//! keeps control between rows.

pub mod cmd;
pub mod demo;
pub mod driver;
pub mod flag;
pub mod interface;
pub mod orientation;
pub mod pins;

/// Panel width in pixels, landscape
pub const WIDTH: u16 = 320;

/// Panel height in pixels, landscape
pub const HEIGHT: u16 = 240;

/// Capacity of the row buffer, the longest scan row in any orientation
pub const ROW_CAPACITY: usize = WIDTH as usize;

#[cfg(test)]
pub(crate) mod mock {
    use super::interface::Transport;
    use display_interface::DisplayError;

    /// One thing that went over the wire
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        Reset,
        Command(u8),
        Data(u8),
        Burst(Vec<u8>),
    }

    /// Transport that records everything it is asked to send
    #[derive(Debug, Default)]
    pub struct RecordingPort {
        pub events: Vec<Event>,
        pub fail_bursts: bool,
    }

    impl RecordingPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn take(&mut self) -> Vec<Event> {
            std::mem::take(&mut self.events)
        }

        pub fn bursts(&self) -> Vec<&Vec<u8>> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Burst(bytes) => Some(bytes),
                    _ => None,
                })
                .collect()
        }
    }

    impl Transport for RecordingPort {
        fn reset(&mut self) -> Result<(), DisplayError> {
            self.events.push(Event::Reset);
            Ok(())
        }

        fn send_command(&mut self, command: u8) -> Result<(), DisplayError> {
            self.events.push(Event::Command(command));
            Ok(())
        }

        fn send_data(&mut self, data: u8) -> Result<(), DisplayError> {
            self.events.push(Event::Data(data));
            Ok(())
        }

        fn send_data_burst(&mut self, data: &[u8]) -> Result<(), DisplayError> {
            if self.fail_bursts {
                return Err(DisplayError::BusWriteError);
            }
            self.events.push(Event::Burst(data.to_vec()));
            Ok(())
        }
    }
}
