//! Packet receiver state machine
//!
//! Byte-at-a-time reception of the wire protocol. The receiver owns its
//! in-flight state across polls, so it sits directly on the non-blocking
//! UART read interface: the firmware main loop calls [`PacketReceiver::poll`]
//! and the machine consumes whatever bytes are pending.
//!
//! # States
//!
//! ```text
//! Idle --START--> ReadingLength --n>0--> ReadingPayload --n+1 bytes-->
//! AwaitingEnd --END+CRC ok--> commit + ACK --> Idle
//! ```
//!
//! `Idle` also serves the playback command synchronously. Every failure
//! path (wrong end marker, CRC residue, zero length, timeout, capacity
//! rejection) drops the packet silently and returns to `Idle`; no ACK or
//! NACK is ever sent for a failed packet, and the write cursor does not
//! move. Failures are only visible through [`ReceiverStats`].

use crate::communication::frame::{
    self, ACK_BYTE, END_BYTE, PLAYBACK_BYTE, START_BYTE,
};
use crate::platform::{FlashInterface, Result, TimerInterface, UartInterface};
use crate::storage::{FlashStore, StoreError};
use crate::{log_debug, log_warn};
use heapless::Vec;

/// Receive buffer size: maximum payload plus the trailing CRC byte
pub const RX_BUFFER_SIZE: usize = frame::MAX_PAYLOAD_LEN + 1;

/// Receiver statistics for monitoring and diagnostics
///
/// Counters only; nothing here feeds back into the wire protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiverStats {
    /// Packets validated, persisted and acknowledged
    pub packets_accepted: u32,
    /// Packets dropped on a CRC residue mismatch
    pub crc_errors: u32,
    /// Packets dropped on a wrong end marker
    pub framing_errors: u32,
    /// Zero-length no-op packets
    pub zero_length: u32,
    /// Packets aborted by the reception timeout
    pub timeouts: u32,
    /// Valid packets rejected because the flash region is full
    pub capacity_rejections: u32,
    /// Playback commands served
    pub playbacks: u32,
}

/// Receiver configuration
#[derive(Debug, Clone, Copy)]
pub struct ReceiverConfig {
    /// Abort a partially received packet after this many microseconds
    /// without completion; 0 disables the timeout
    pub timeout_us: u64,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        // ~320 byte times at 2400 baud 8N1 is well past any full frame
        Self {
            timeout_us: 1_000_000,
        }
    }
}

/// Reception states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RxState {
    /// Waiting for a start marker or the playback command
    Idle,
    /// Start marker seen, next byte is the payload length
    ReadingLength,
    /// Collecting payload plus CRC byte
    ReadingPayload,
    /// Buffer full, next byte must be the end marker
    AwaitingEnd,
}

/// Packet receiver state machine
///
/// Drives the receive/persist/playback sequence as the single consumer of
/// the serial link and the single owner of the flash write cursor. The
/// payload buffer is a fixed-capacity [`heapless::Vec`]; no allocation
/// happens per packet.
///
/// # Example
///
/// ```
/// use framelog::communication::{PacketReceiver, ReceiverConfig};
/// use framelog::platform::mock::{MockFlash, MockTimer, MockUart};
/// use framelog::storage::FlashStore;
///
/// let mut uart = MockUart::new(Default::default());
/// let mut flash = MockFlash::new();
/// let timer = MockTimer::new();
/// let mut store = FlashStore::init(&mut flash, 127, 127).unwrap();
/// let mut receiver = PacketReceiver::new(ReceiverConfig::default());
///
/// uart.inject_rx_data(&[0x8D, 0x03, 0x41, 0x42, 0x43, 0x8A, 0x8F]);
/// receiver.poll(&mut uart, &mut flash, &mut store, &timer).unwrap();
///
/// assert_eq!(uart.tx_buffer(), [0x90]); // ACK
/// assert_eq!(store.len(), 3);
/// ```
pub struct PacketReceiver {
    state: RxState,
    /// Payload length from the frame's length byte
    expected: usize,
    /// Payload + CRC byte of the in-flight packet
    buf: Vec<u8, RX_BUFFER_SIZE>,
    /// Timestamp of the in-flight packet's start marker
    packet_start_us: u64,
    config: ReceiverConfig,
    stats: ReceiverStats,
}

impl PacketReceiver {
    /// Create a new receiver in `Idle`
    pub fn new(config: ReceiverConfig) -> Self {
        Self {
            state: RxState::Idle,
            expected: 0,
            buf: Vec::new(),
            packet_start_us: 0,
            config,
            stats: ReceiverStats::default(),
        }
    }

    /// Get receiver statistics
    pub fn stats(&self) -> ReceiverStats {
        self.stats
    }

    /// Reset receiver statistics
    pub fn reset_stats(&mut self) {
        self.stats = ReceiverStats::default();
    }

    /// True when no packet is in flight
    pub fn is_idle(&self) -> bool {
        self.state == RxState::Idle
    }

    /// Consume all pending UART bytes
    ///
    /// Call from the firmware main loop. Processes every byte the UART has
    /// buffered, enforcing the reception timeout between bytes, and
    /// returns once the line is idle. Protocol failures are absorbed into
    /// [`ReceiverStats`]; only driver errors surface.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` if the UART or flash driver fails. The
    /// receiver drops any in-flight packet and is ready to poll again.
    pub fn poll<U, F, T>(
        &mut self,
        uart: &mut U,
        flash: &mut F,
        store: &mut FlashStore,
        timer: &T,
    ) -> Result<()>
    where
        U: UartInterface,
        F: FlashInterface,
        T: TimerInterface,
    {
        loop {
            self.check_timeout(timer.now_us());

            let Some(byte) = uart.read_byte()? else {
                return Ok(());
            };

            if let Err(e) = self.process_byte(byte, uart, flash, store, timer.now_us()) {
                // Driver failure mid-packet: drop the packet, surface the error
                self.abort();
                return Err(e);
            }
        }
    }

    /// Advance the state machine by one received byte
    fn process_byte<U, F>(
        &mut self,
        byte: u8,
        uart: &mut U,
        flash: &mut F,
        store: &mut FlashStore,
        now_us: u64,
    ) -> Result<()>
    where
        U: UartInterface,
        F: FlashInterface,
    {
        match self.state {
            RxState::Idle => match byte {
                START_BYTE => {
                    self.packet_start_us = now_us;
                    self.state = RxState::ReadingLength;
                }
                PLAYBACK_BYTE => self.playback(uart, flash, store)?,
                // Anything else on an idle line is discarded
                _ => {}
            },
            RxState::ReadingLength => {
                if byte == 0 {
                    // Explicit no-op frame, not an error
                    self.stats.zero_length += 1;
                    self.state = RxState::Idle;
                } else {
                    self.expected = byte as usize;
                    self.buf.clear();
                    self.state = RxState::ReadingPayload;
                }
            }
            RxState::ReadingPayload => {
                // Cannot overflow: expected + 1 <= RX_BUFFER_SIZE
                let _ = self.buf.push(byte);
                if self.buf.len() == self.expected + 1 {
                    self.state = RxState::AwaitingEnd;
                }
            }
            RxState::AwaitingEnd => {
                self.finish_packet(byte, uart, flash, store)?;
                self.state = RxState::Idle;
            }
        }
        Ok(())
    }

    /// Validate and commit the buffered packet once the end marker is due
    fn finish_packet<U, F>(
        &mut self,
        byte: u8,
        uart: &mut U,
        flash: &mut F,
        store: &mut FlashStore,
    ) -> Result<()>
    where
        U: UartInterface,
        F: FlashInterface,
    {
        if byte != END_BYTE {
            self.stats.framing_errors += 1;
            log_debug!("dropped frame: bad end marker");
            return Ok(());
        }

        if !frame::frame_is_valid(&self.buf) {
            self.stats.crc_errors += 1;
            log_debug!("dropped frame: CRC mismatch");
            return Ok(());
        }

        match store.commit(flash, &self.buf[..self.expected]) {
            Ok(()) => {
                // ACK strictly after the program completed
                uart.write_byte(ACK_BYTE)?;
                self.stats.packets_accepted += 1;
            }
            Err(StoreError::CapacityExceeded) => {
                self.stats.capacity_rejections += 1;
                log_warn!("flash region full, packet rejected");
            }
            Err(StoreError::Platform(e)) => return Err(e),
        }
        Ok(())
    }

    /// Stream the persisted region back over the serial link
    ///
    /// Reads one byte at a time from offset 0 to the cursor and writes it
    /// straight out. Packet boundaries are not persisted, so the output is
    /// a flat byte stream. Blocks the receiver for the full readback.
    fn playback<U, F>(
        &mut self,
        uart: &mut U,
        flash: &mut F,
        store: &FlashStore,
    ) -> Result<()>
    where
        U: UartInterface,
        F: FlashInterface,
    {
        let mut byte = [0u8; 1];
        for offset in 0..store.len() {
            store.read(flash, offset, &mut byte)?;
            uart.write_byte(byte[0])?;
        }
        self.stats.playbacks += 1;
        Ok(())
    }

    /// Abort a stalled packet if the reception timeout expired
    fn check_timeout(&mut self, now_us: u64) {
        if self.config.timeout_us == 0 || self.state == RxState::Idle {
            return;
        }
        if now_us.saturating_sub(self.packet_start_us) > self.config.timeout_us {
            self.stats.timeouts += 1;
            log_debug!("dropped frame: reception timeout");
            self.abort();
        }
    }

    /// Drop the in-flight packet and return to `Idle`
    fn abort(&mut self) {
        self.buf.clear();
        self.expected = 0;
        self.state = RxState::Idle;
    }
}

impl Default for PacketReceiver {
    fn default() -> Self {
        Self::new(ReceiverConfig::default())
    }
}
