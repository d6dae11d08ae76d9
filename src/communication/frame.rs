//! Frame constants and CRC-8
//!
//! One frame carries one length-prefixed, CRC-protected payload:
//!
//! ```text
//! [0]        START_BYTE (0x8D)
//! [1]        length n (1..=255; 0 is an explicit no-op frame)
//! [2..2+n)   payload
//! [2+n]      crc8(payload)
//! [3+n]      END_BYTE (0x8F)
//! ```
//!
//! The checksum is a classic bit-wise CRC-8 with generator 0x31, zero
//! initial value, no reflection and no final XOR. Appending the checksum
//! to the payload drives the register back to zero, so the receiver
//! validates by checking for a zero residue over payload + crc byte.

use heapless::Vec;

/// Begin-of-packet marker
pub const START_BYTE: u8 = 0x8D;

/// End-of-packet marker; triggers validation
pub const END_BYTE: u8 = 0x8F;

/// Sent by the receiver after a successfully persisted packet
pub const ACK_BYTE: u8 = 0x90;

/// Triggers full readback of the persisted region
pub const PLAYBACK_BYTE: u8 = 0xFF;

/// CRC-8 generator polynomial
pub const CRC_GENERATOR: u8 = 0x31;

/// Maximum payload length (the length prefix is one byte)
pub const MAX_PAYLOAD_LEN: usize = 255;

/// Maximum encoded frame length: START + length + payload + crc + END
pub const MAX_FRAME_LEN: usize = MAX_PAYLOAD_LEN + 4;

/// Frame construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Payload is empty (a zero length is reserved for the no-op frame)
    EmptyPayload,
    /// Payload exceeds the one-byte length prefix
    PayloadTooLong,
}

/// Compute the CRC-8 of `data`
///
/// Bit-wise implementation: the accumulator starts at zero; each input
/// byte is XORed in, then shifted out bit by bit, XORing in `generator`
/// whenever the MSB is set. O(len * 8), deliberately not table-driven -
/// one serial byte period at 2400 baud leaves plenty of room.
pub fn crc8(data: &[u8], generator: u8) -> u8 {
    let mut crc: u8 = 0x00;

    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ generator;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}

/// Validate a received payload + crc byte sequence
///
/// `buf` must hold the payload followed by its checksum byte. Valid iff
/// the CRC-8 residue over the whole buffer is zero.
pub fn frame_is_valid(buf: &[u8]) -> bool {
    crc8(buf, CRC_GENERATOR) == 0
}

/// Build the wire frame for `payload`
///
/// Sender-side counterpart of the receiver; used by tests and host tools
/// that feed the datalogger.
///
/// # Errors
///
/// Returns `FrameError` if the payload is empty or longer than 255 bytes.
pub fn encode(payload: &[u8]) -> Result<Vec<u8, MAX_FRAME_LEN>, FrameError> {
    if payload.is_empty() {
        return Err(FrameError::EmptyPayload);
    }
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(FrameError::PayloadTooLong);
    }

    let mut frame = Vec::new();
    // Infallible: MAX_FRAME_LEN bounds the total
    let _ = frame.push(START_BYTE);
    let _ = frame.push(payload.len() as u8);
    let _ = frame.extend_from_slice(payload);
    let _ = frame.push(crc8(payload, CRC_GENERATOR));
    let _ = frame.push(END_BYTE);

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc8_known_values() {
        assert_eq!(crc8(&[], CRC_GENERATOR), 0x00);
        assert_eq!(crc8(&[0x01], CRC_GENERATOR), 0x31);
        assert_eq!(crc8(b"ABC", CRC_GENERATOR), 0x8A);
        assert_eq!(crc8(b"hello", CRC_GENERATOR), 0x86);
        assert_eq!(crc8(b"123456789", CRC_GENERATOR), 0xA2);
    }

    #[test]
    fn test_crc8_self_consistency() {
        // crc8(p || crc8(p)) == 0 for arbitrary p
        let payloads: &[&[u8]] = &[
            b"A",
            b"ABC",
            b"hello world",
            &[0x00, 0x00, 0x00],
            &[0xFF; 255],
            &[0x8D, 0x8F, 0x90, 0xFF], // marker bytes are ordinary data
        ];
        for p in payloads {
            let mut buf = heapless::Vec::<u8, 256>::new();
            buf.extend_from_slice(p).unwrap();
            buf.push(crc8(p, CRC_GENERATOR)).unwrap();
            assert!(frame_is_valid(&buf), "residue not zero for {:?}", p);
        }
    }

    #[test]
    fn test_crc8_detects_corruption() {
        let payload = b"ABC";
        let mut buf = [payload[0], payload[1], payload[2], crc8(payload, CRC_GENERATOR)];
        assert!(frame_is_valid(&buf));

        buf[1] ^= 0x01;
        assert!(!frame_is_valid(&buf));
    }

    #[test]
    fn test_crc8_matches_table_driven_reference() {
        // Same parameters expressed for the table-driven `crc` crate
        const REFERENCE: crc::Algorithm<u8> = crc::Algorithm {
            width: 8,
            poly: 0x31,
            init: 0x00,
            refin: false,
            refout: false,
            xorout: 0x00,
            check: 0xA2,
            residue: 0x00,
        };
        let reference = crc::Crc::<u8>::new(&REFERENCE);

        let inputs: &[&[u8]] = &[b"", b"Q", b"123456789", b"The quick brown fox", &[0x80; 32]];
        for input in inputs {
            assert_eq!(crc8(input, CRC_GENERATOR), reference.checksum(input));
        }
    }

    #[test]
    fn test_encode_layout() {
        let frame = encode(b"ABC").unwrap();
        assert_eq!(&frame[..], &[0x8D, 0x03, 0x41, 0x42, 0x43, 0x8A, 0x8F]);
    }

    #[test]
    fn test_encode_rejects_bad_lengths() {
        assert_eq!(encode(&[]).unwrap_err(), FrameError::EmptyPayload);
        assert_eq!(encode(&[0u8; 256]).unwrap_err(), FrameError::PayloadTooLong);
        assert!(encode(&[0u8; 255]).is_ok());
    }

    #[test]
    fn test_encode_max_frame_len() {
        let frame = encode(&[0xAB; 255]).unwrap();
        assert_eq!(frame.len(), MAX_FRAME_LEN);
        assert_eq!(frame[0], START_BYTE);
        assert_eq!(frame[1], 255);
        assert_eq!(frame[MAX_FRAME_LEN - 1], END_BYTE);
    }
}
