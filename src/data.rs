/// Encrypted blob recovered from the target. The trailing NUL is part of the
/// stored message and is never decrypted.
pub const CIPHERTEXT: [u8; 35] = [
    0xa6, 0xcb, 0x8d, 0xc9, 0x70, 0x96, 0xd1, 0x71, 0x6f,
    0x97, 0x66, 0xa7, 0x9d, 0xa6, 0x24, 0x61, 0xd6, 0xea,
    0x5e, 0x82, 0xeb, 0xdb, 0x1e, 0x22, 0xa5, 0x4f, 0xf6,
    0x02, 0x86, 0x97, 0x1c, 0x6c, 0x01, 0xb8, 0x00,
];

/// First four key bytes, fixed in the target binary.
pub const KEY_PREFIX: [u8; 4] = *b"b00!";

/// A decryption is considered successful when it starts with this marker.
pub const MARKER: [u8; 4] = *b"Key:";

pub const KEY_LEN: usize = 11;

// Offsets the target adds to each environmental value before storing it in
// the key. All stores are one byte wide, so the sums wrap modulo 256.
pub const MONTH_OFFSET: u8 = 0x35;
pub const DAY_OFFSET: u8 = 0x29;
pub const HOUR_OFFSET: u8 = 0x40;
pub const MAJOR_OFFSET: u8 = 0x73;
pub const MINOR_OFFSET: u8 = 0x5d;
pub const DEBUG_OFFSET: u8 = 0x3f;
pub const LANGUAGE_OFFSET: u8 = 0x6b;
