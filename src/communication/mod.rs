//! Wire protocol
//!
//! This module implements the point-to-point serial protocol of the
//! datalogger:
//!
//! - **Framing/CRC** ([`frame`]): marker bytes, length-prefixed payloads,
//!   bit-wise CRC-8 over payload + checksum byte
//! - **Receiver** ([`receiver`]): the packet reception state machine that
//!   validates frames, commits payloads to the flash store, acknowledges,
//!   and serves the playback command
//!
//! Packet wire layout:
//!
//! ```text
//! START(0x8D), length(1), payload(length), crc(1), END(0x8F)
//! ```
//!
//! The receiver answers a persisted packet with one ACK byte (0x90) and
//! answers the playback command (0xFF) with the raw persisted byte stream.
//! Malformed or corrupted packets are dropped silently; the absence of an
//! ACK is the sender's only failure signal.

pub mod frame;
pub mod receiver;

pub use frame::{ACK_BYTE, END_BYTE, PLAYBACK_BYTE, START_BYTE};
pub use receiver::{PacketReceiver, ReceiverConfig, ReceiverStats};
