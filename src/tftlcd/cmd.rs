/// Command opcodes understood by the panel controller
pub struct Cmd;
impl Cmd {
    // Address window
    pub const COLUMN_ADDRESS_SET: u8 = 0x2A;
    pub const ROW_ADDRESS_SET: u8 = 0x2B;

    // Pixel data
    pub const MEMORY_WRITE: u8 = 0x2C;

    // Scan direction / orientation
    pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;
}

/*
Vendor init code had these:
0x2A - Column Address Set (XS[15:8], XS[7:0], XE[15:8], XE[7:0])
0x2B - Row Address Set (YS[15:8], YS[7:0], YE[15:8], YE[7:0])
0x2C - Memory Write (pixel data follows)
0x36 - Memory Access Control (MY, MX, MV, ML, BGR, MH)
*/
