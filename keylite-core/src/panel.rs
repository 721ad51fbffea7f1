//! Cooperative panel loop
//!
//! One [`Panel::tick`] per loop iteration polls every collaborator at most
//! once, in a fixed order:
//!
//! 1. startup status queries (first tick only)
//! 2. key matrix event -> command to the receiver
//! 3. proximity sample
//! 4. dim button edge
//! 5. received bytes -> frame assembly -> status decoding
//! 6. fade deadline
//!
//! Channel changes from any step are pushed to the LED driver once at the
//! end of the tick. Nothing here blocks.

use keylite_protocol::{
    ButtonId, Codec, FrameAssembler, FrameError, ReceiverStatus, STARTUP_QUERIES,
};

use crate::config::IlluminationConfig;
use crate::illumination::IlluminationEngine;
use crate::input::Edge;
use crate::traits::{EdgeSource, KeySource, LedDriver, LevelSource, ReceiverLink};

/// Bytes read from the link per tick
pub const RX_CHUNK_SIZE: usize = 64;

/// Errors surfaced by a tick
///
/// All of them are recoverable: the panel state stays consistent and the
/// next tick carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Sending to the receiver failed
    SerialWrite,
    /// Reading from the receiver failed
    SerialRead,
    /// Pushing channel levels to the LED driver failed
    LedCommit,
    /// A command could not be framed
    Protocol(FrameError),
}

impl From<FrameError> for PanelError {
    fn from(err: FrameError) -> Self {
        PanelError::Protocol(err)
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Startup queries were sent
    pub queries_sent: bool,
    /// Button whose command was sent
    pub key_sent: Option<ButtonId>,
    /// Proximity sensor level
    pub proximity: bool,
    /// New dim preset index after a dim press
    pub dim_index: Option<usize>,
    /// Bytes read from the link
    pub bytes_received: usize,
    /// Received codes that mapped to a status
    pub decoded: u8,
    /// Received codes that did not
    pub unrecognized: u8,
    /// Last status decoded
    pub status: Option<ReceiverStatus>,
    /// The receive buffer overflowed and a partial frame was dropped
    pub overflow: bool,
    /// Channel levels were committed to the LEDs
    pub led_refresh: bool,
}

/// The panel: protocol, illumination and collaborators
pub struct Panel<K, E, P, L, D> {
    codec: Codec,
    assembler: FrameAssembler,
    engine: IlluminationEngine,
    keys: K,
    dim: E,
    proximity: P,
    link: L,
    leds: D,
    booted: bool,
    dirty: bool,
}

impl<K, E, P, L, D> Panel<K, E, P, L, D>
where
    K: KeySource,
    E: EdgeSource,
    P: LevelSource,
    L: ReceiverLink,
    D: LedDriver,
{
    /// Create a panel; the lamp test is committed on the first tick
    pub fn new(
        codec: Codec,
        config: &IlluminationConfig,
        keys: K,
        dim: E,
        proximity: P,
        link: L,
        leds: D,
    ) -> Self {
        let engine = IlluminationEngine::new(config, codec.power_button());
        Self {
            codec,
            assembler: FrameAssembler::new(),
            engine,
            keys,
            dim,
            proximity,
            link,
            leds,
            booted: false,
            dirty: true,
        }
    }

    /// Illumination state
    pub fn engine(&self) -> &IlluminationEngine {
        &self.engine
    }

    /// Button/code mapping
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Receiver link
    pub fn link(&self) -> &L {
        &self.link
    }

    /// LED driver
    pub fn leds(&self) -> &D {
        &self.leds
    }

    /// True once the startup queries have gone out
    pub fn is_booted(&self) -> bool {
        self.booted
    }

    /// Run one loop iteration at `now_ms`
    ///
    /// A send failure skips the remaining steps of this tick. A read
    /// failure is reported only after the fade step and the LED commit
    /// have run. Channel changes that could not be committed stay pending
    /// for a later tick.
    pub fn tick(&mut self, now_ms: u64) -> Result<TickReport, PanelError> {
        let mut report = TickReport::default();

        if !self.booted {
            // Once per lifetime, even if a send fails
            self.booted = true;
            for code in STARTUP_QUERIES {
                let command = self.codec.query(code)?;
                self.link
                    .send(command.as_bytes())
                    .map_err(|_| PanelError::SerialWrite)?;
            }
            report.queries_sent = true;
        }

        if let Some(event) = self.keys.poll_key(now_ms) {
            if event.pressed {
                if let Some(command) = self.codec.encode(event.key_id) {
                    self.link
                        .send(command.as_bytes())
                        .map_err(|_| PanelError::SerialWrite)?;
                    report.key_sent = ButtonId::new(event.key_id);
                }
            }
        }

        report.proximity = self.proximity.is_asserted();
        self.dirty |= self.engine.proximity(report.proximity, now_ms);

        if let Some(Edge::Falling) = self.dim.poll_edge(now_ms) {
            self.dirty |= self.engine.dim_pressed();
            report.dim_index = Some(self.engine.dim_index());
        }

        // A read failure still lets the fade run and the LEDs refresh
        let received = self.receive(now_ms, &mut report);

        self.dirty |= self.engine.advance(now_ms);

        if self.dirty {
            self.leds.set_all(self.engine.channels());
            self.leds.commit().map_err(|_| PanelError::LedCommit)?;
            self.dirty = false;
            report.led_refresh = true;
        }

        received?;
        Ok(report)
    }

    fn receive(&mut self, now_ms: u64, report: &mut TickReport) -> Result<(), PanelError> {
        let mut buf = [0u8; RX_CHUNK_SIZE];
        let count = self
            .link
            .receive(&mut buf)
            .map_err(|_| PanelError::SerialRead)?;
        let count = count.min(buf.len());
        if count == 0 {
            return Ok(());
        }
        report.bytes_received = count;

        if self.assembler.feed(&buf[..count]).is_err() {
            report.overflow = true;
        }

        let Some(frame) = self.assembler.drain() else {
            return Ok(());
        };

        for code in frame.commands() {
            match self.codec.decode_status(&code) {
                Some(status) => {
                    self.dirty |= self.engine.apply_status(status, now_ms);
                    report.status = Some(status);
                    report.decoded = report.decoded.saturating_add(1);
                }
                None => report.unrecognized = report.unrecognized.saturating_add(1),
            }
        }

        Ok(())
    }
}
