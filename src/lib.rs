//! Cooperative TFT LCD demo driver
//!
//! Streams solid rectangles to a 320x240 RGB565 panel one scan row at a time and
//! rotates the panel through its four orientations between runs of the demo script.
//!
//! See [`tftlcd`] for the driver and [`tftlcd::demo`] for the script.
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod tftlcd;

pub use crate::tftlcd::cmd::Cmd;
pub use crate::tftlcd::flag::Flag;
pub use crate::tftlcd::pins::Pins;

pub use crate::tftlcd::demo::{Demo, DemoConfig, Step};
pub use crate::tftlcd::driver::{DisplayError, FillStatus, RowStatus, TftLcd, Window};
pub use crate::tftlcd::interface::{SpiInterface, Transport};
pub use crate::tftlcd::orientation::{Geometry, Orientation};
