//! Serial link command/report correlation.
//!
//! TSIP has no sequence numbers, so a response is matched to its request by
//! kind alone: clear the store's freshness flags, send the command, then
//! decode packets until the expected kind shows up fresh. Spontaneous
//! broadcast reports decoded along the way still land in the store, they
//! just do not satisfy the correlation.

use std::io::{Read, Write};

use tracing::trace;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::framing::Framer;
use crate::report::{PrimaryTime, Report, ReportKind, SecondaryTime, SoftwareVersion};
use crate::store::ReportStore;

/// Default bound on packets decoded while waiting for a response.
///
/// The ThunderBolt broadcasts at most a handful of reports per second, so a
/// requested report not seen within this many packets is not coming.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// A TSIP session over any byte channel, typically a serial port.
///
/// Blocking on the channel is the caller's concern; a port opened without a
/// read timeout can stall [request](Self::request) indefinitely.
pub struct Link<P> {
    port: P,
    framer: Framer,
    store: ReportStore,
}

impl<P> Link<P>
where
    P: Read + Write,
{
    pub fn new(port: P) -> Self {
        Link {
            port,
            framer: Framer::new(),
            store: ReportStore::new(),
        }
    }

    /// Every report decoded so far, fresh or stale.
    #[must_use]
    pub fn reports(&self) -> &ReportStore {
        &self.store
    }

    /// Consume the link, returning the underlying channel.
    pub fn into_port(self) -> P {
        self.port
    }

    /// Send a command without waiting for any response.
    ///
    /// # Errors
    /// [Error::PayloadTooLong] or any channel write error.
    pub fn send(&mut self, cmd: &Command) -> Result<()> {
        let wire = cmd.encode()?;
        trace!(code = cmd.code, subcode = cmd.subcode, len = wire.len(), "sending command");
        self.port.write_all(&wire)?;
        self.port.flush()?;
        Ok(())
    }

    /// Send a command and decode packets until a fresh report of `expect`
    /// arrives, up to `max_attempts` decoded packets.
    ///
    /// On success the report is in [reports](Self::reports). Unrelated
    /// reports decoded while waiting are stored too.
    ///
    /// # Errors
    /// [Error::NoReport] if the attempt budget runs out, or any channel
    /// error.
    pub fn request(&mut self, cmd: &Command, expect: ReportKind, max_attempts: u32) -> Result<()> {
        self.store.clear_freshness();
        self.send(cmd)?;
        for attempt in 0..max_attempts {
            self.pump_packet()?;
            if self.store.is_fresh(expect) {
                trace!(?expect, attempt, "report correlated");
                return Ok(());
            }
        }
        Err(Error::NoReport {
            code: cmd.code,
            subcode: cmd.subcode,
            attempts: max_attempts,
        })
    }

    /// Request the primary timing report (8F-AB) and return it.
    ///
    /// # Errors
    /// See [request](Self::request).
    pub fn fetch_primary_time(&mut self, max_attempts: u32) -> Result<PrimaryTime> {
        let cmd = Command::request_primary_time();
        self.request(&cmd, ReportKind::PrimaryTime, max_attempts)?;
        match self.store.primary_time() {
            Some(t) => Ok(*t),
            None => Err(Error::NoReport {
                code: cmd.code,
                subcode: cmd.subcode,
                attempts: max_attempts,
            }),
        }
    }

    /// Request the secondary timing report (8F-AC) and return it.
    ///
    /// # Errors
    /// See [request](Self::request).
    pub fn fetch_secondary_time(&mut self, max_attempts: u32) -> Result<SecondaryTime> {
        let cmd = Command::request_secondary_time();
        self.request(&cmd, ReportKind::SecondaryTime, max_attempts)?;
        match self.store.secondary_time() {
            Some(t) => Ok(*t),
            None => Err(Error::NoReport {
                code: cmd.code,
                subcode: cmd.subcode,
                attempts: max_attempts,
            }),
        }
    }

    /// Request the software version report (0x45) and return it.
    ///
    /// # Errors
    /// See [request](Self::request).
    pub fn fetch_software_version(&mut self, max_attempts: u32) -> Result<SoftwareVersion> {
        let cmd = Command::request_software_version();
        self.request(&cmd, ReportKind::SoftwareVersion, max_attempts)?;
        match self.store.software_version() {
            Some(v) => Ok(*v),
            None => Err(Error::NoReport {
                code: cmd.code,
                subcode: cmd.subcode,
                attempts: max_attempts,
            }),
        }
    }

    /// Read until exactly one complete packet decodes, then store it.
    fn pump_packet(&mut self) -> Result<()> {
        loop {
            let byte = self.read_byte()?;
            let Some(packet) = self.framer.push(byte) else {
                continue;
            };
            if let Some(report) = Report::decode(&packet) {
                trace!(kind = ?report.kind(), len = packet.len(), "decoded report");
                self.store.insert(report);
            }
            return Ok(());
        }
    }

    fn read_byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.port.read_exact(&mut buf)?;
        Ok(buf[0])
    }
}
