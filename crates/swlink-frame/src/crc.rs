//! Table-driven CRC-16-CCITT.
//!
//! Polynomial 0x1021, MSB first, no reflection, no final XOR. The frame
//! trailer uses the 0xFFFF initial value; [`crc16_with_init`] exposes the
//! register seed for peers that run the zero-seeded (XMODEM) variant.

/// Generator polynomial x^16 + x^12 + x^5 + 1.
pub const CRC16_POLY: u16 = 0x1021;

/// Initial register value used for frame trailers.
pub const CRC16_INIT: u16 = 0xFFFF;

/// Lookup table, one entry per leading byte.
pub const CRC16_TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ CRC16_POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

#[inline]
fn step(crc: u16, byte: u8) -> u16 {
    (crc << 8) ^ CRC16_TABLE[usize::from((crc >> 8) as u8 ^ byte)]
}

/// CRC over `data` with the 0xFFFF seed.
///
/// An empty span leaves the register untouched and yields 0xFFFF.
pub fn crc16(data: &[u8]) -> u16 {
    crc16_with_init(data, CRC16_INIT)
}

/// CRC over `data` starting from an explicit register value.
pub fn crc16_with_init(data: &[u8], init: u16) -> u16 {
    data.iter().fold(init, |crc, &byte| step(crc, byte))
}

/// Incremental CRC for data that arrives in pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16 {
    value: u16,
}

impl Crc16 {
    pub fn new() -> Self {
        Self { value: CRC16_INIT }
    }

    pub fn with_init(init: u16) -> Self {
        Self { value: init }
    }

    /// Feed more bytes into the register.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.value = crc16_with_init(data, self.value);
        self
    }

    /// Current register value. Does not reset the digest.
    pub fn finish(&self) -> u16 {
        self.value
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}
