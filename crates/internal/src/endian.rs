//! Endianness utility functions

/// Convert a u32 from big-endian byte order to native byte order
pub fn u32_from_be_bytes(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Convert a u32 from native byte order to big-endian bytes
pub fn u32_to_be_bytes(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Read a big-endian word of up to eight bytes, as found at the most
/// significant end of a big-endian integer whose length is not a multiple of
/// eight
pub fn u64_from_be_partial(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}
