//! Trimble Standard Interface Protocol (TSIP) for the ThunderBolt GPS
//! disciplined clock.
//!
//! TSIP is a binary request/response protocol spoken over a serial line.
//! This crate provides the frame codec ([framing]), typed report decoding
//! ([report]), command construction ([command]), and a blocking session
//! layer ([Link]) that correlates requests with their responses.
//!
//! Packet layouts follow the ThunderBolt GPS Disciplined Clock User Guide
//! (v5.0, part 35326-30), and apply equally to the ThunderBolt-E.
//!
//! # Example
//! ```no_run
//! use std::fs::OpenOptions;
//!
//! use tsip::{Command, Link, ReportKind, DEFAULT_MAX_ATTEMPTS};
//!
//! # fn main() -> tsip::Result<()> {
//! let port = OpenOptions::new()
//!     .read(true)
//!     .write(true)
//!     .open("/dev/ttyS0")?;
//! let mut link = Link::new(port);
//!
//! let time = link.fetch_primary_time(DEFAULT_MAX_ATTEMPTS)?;
//! println!("GPS week {} sow {}", time.week_number, time.seconds_of_week);
//!
//! link.request(
//!     &Command::set_utc_mode(),
//!     ReportKind::UtcGpsTime,
//!     DEFAULT_MAX_ATTEMPTS,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod command;
mod error;
pub mod fields;
pub mod framing;
mod link;
pub mod report;
pub mod store;

pub use command::Command;
pub use error::{Error, Result};
pub use link::{Link, DEFAULT_MAX_ATTEMPTS};
pub use report::{Report, ReportKind};
pub use store::ReportStore;
