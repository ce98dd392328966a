//! Pin definitions for the TFT panel
//!
//! This module contains all GPIO pin assignments used in the hardware configuration.

/// Pin configuration constants for the TFT panel
pub struct Pins;

#[allow(dead_code)]
impl Pins {
    // SPI Display pins
    /// Chip Select pin for SPI display
    pub const CS: u8 = 10;
    /// Data/Command control pin (High for data, Low for command)
    pub const DC: u8 = 9;
    /// Reset pin for display (active low)
    pub const RST: u8 = 8;
    /// SPI Clock pin
    pub const SCK: u8 = 12;
    /// SPI Master Out Slave In
    pub const MOSI: u8 = 11;
}
