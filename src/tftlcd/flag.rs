/// Register values written after [`Cmd::MEMORY_ACCESS_CONTROL`](super::cmd::Cmd)
///
/// Bit 7 is MY (row order), bit 6 MX (column order), bit 5 MV (row/column exchange),
/// bit 4 ML, bit 2 MH. The four orientation values below only ever touch MY, MX and MV.
pub struct Flag;
impl Flag {
    // Memory Access Control (0x36) values for the four orientations
    pub const MADCTL_LANDSCAPE_UP: u8 = 0xA0; // MY | MV
    pub const MADCTL_LANDSCAPE_DOWN: u8 = 0x20; // MV
    pub const MADCTL_PORTRAIT_UP: u8 = 0xC0; // MY | MX
    pub const MADCTL_PORTRAIT_DOWN: u8 = 0x00;

    // Written once right after reset, before the orientation cycle takes over.
    // Portrait, driver IC on the right (MY | MV | ML | MH)
    pub const MADCTL_POWER_ON: u8 = 0xB4;
}
