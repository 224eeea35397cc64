//! Big-endian field decoding.
//!
//! Every multi-byte TSIP field arrives most-significant byte first,
//! independent of host byte order. Floating point fields are IEEE-754
//! single/double precision, again MSB first, and must reproduce the wire
//! bits exactly; `from_be_bytes` gives the bit-for-bit reinterpretation on
//! any host.
//!
//! Callers are expected to have checked the payload length; these accessors
//! index the slice directly.

/// Read a big-endian `u16` at `offset`.
///
/// # Panics
/// If `dat` is shorter than `offset + 2`.
#[must_use]
pub fn u16_be(dat: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([dat[offset], dat[offset + 1]])
}

/// Read a big-endian `i16` at `offset`.
///
/// # Panics
/// If `dat` is shorter than `offset + 2`.
#[must_use]
pub fn i16_be(dat: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes([dat[offset], dat[offset + 1]])
}

/// Read a big-endian `u32` at `offset`.
///
/// # Panics
/// If `dat` is shorter than `offset + 4`.
#[must_use]
pub fn u32_be(dat: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([dat[offset], dat[offset + 1], dat[offset + 2], dat[offset + 3]])
}

/// Read a big-endian IEEE-754 single at `offset`.
///
/// # Panics
/// If `dat` is shorter than `offset + 4`.
#[must_use]
pub fn f32_be(dat: &[u8], offset: usize) -> f32 {
    f32::from_be_bytes([dat[offset], dat[offset + 1], dat[offset + 2], dat[offset + 3]])
}

/// Read a big-endian IEEE-754 double at `offset`.
///
/// # Panics
/// If `dat` is shorter than `offset + 8`.
#[must_use]
pub fn f64_be(dat: &[u8], offset: usize) -> f64 {
    f64::from_be_bytes([
        dat[offset],
        dat[offset + 1],
        dat[offset + 2],
        dat[offset + 3],
        dat[offset + 4],
        dat[offset + 5],
        dat[offset + 6],
        dat[offset + 7],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u16_be_assembles_msb_first() {
        let dat = [0x00, 0x01, 0x51, 0x80];
        assert_eq!(u16_be(&dat, 0), 1);
        assert_eq!(u16_be(&dat, 2), 0x5180);
    }

    #[test]
    fn u32_be_assembles_msb_first() {
        let dat = [0x00, 0x01, 0x51, 0x80];
        assert_eq!(u32_be(&dat, 0), 86400);
    }

    #[test]
    fn i16_be_is_twos_complement() {
        assert_eq!(i16_be(&[0xff, 0xfe], 0), -2);
        assert_eq!(i16_be(&[0x00, 0x12], 0), 18);
    }

    #[test]
    fn f32_be_reproduces_wire_bits() {
        // pi, rounded to single precision
        let dat = [0x40, 0x49, 0x0f, 0xdb];
        let got = f32_be(&dat, 0);
        assert_eq!(got.to_bits(), 0x4049_0fdb);
        assert!((got - std::f32::consts::PI).abs() < f32::EPSILON);
    }

    #[test]
    fn f64_be_reproduces_wire_bits() {
        let dat = [0x3f, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(f64_be(&dat, 0), 1.0);

        let dat = [0xc0, 0x5e, 0xdc, 0xcc, 0xcc, 0xcc, 0xcc, 0xcd];
        assert_eq!(f64_be(&dat, 0).to_bits(), 0xc05e_dccc_cccc_cccd);
    }

    #[test]
    fn f32_be_preserves_nan_payload() {
        let dat = [0x7f, 0xc0, 0x00, 0x01];
        let got = f32_be(&dat, 0);
        assert!(got.is_nan());
        assert_eq!(got.to_bits(), 0x7fc0_0001);
    }

    #[test]
    fn offsets_are_relative_to_slice_start() {
        let dat = [0xaa, 0xbb, 0x40, 0x49, 0x0f, 0xdb];
        assert_eq!(f32_be(&dat, 2).to_bits(), 0x4049_0fdb);
    }
}
