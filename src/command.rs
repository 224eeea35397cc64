//! TSIP command construction and encoding.
//!
//! A command is a code, an optional super-packet subcode, and a payload.
//! The named constructors cover the commands the ThunderBolt needs for
//! normal operation; [Command::builder] is available for anything else the
//! firmware understands.

use typed_builder::TypedBuilder;

use crate::error::{Error, Result};
use crate::framing;
use crate::report::ReportKind;

/// Cold reset to factory defaults (0x1E).
pub const COLD_FACTORY_RESET: u8 = 0x1e;
/// Request software version (0x1F).
pub const REQUEST_SOFTWARE_VERSION: u8 = 0x1f;
/// Warm reset with self test (0x25).
pub const WARM_RESET_SELF_TEST: u8 = 0x25;
/// Set packet I/O options (0x35).
pub const SET_IO_OPTIONS: u8 = 0x35;
/// Request current position (0x37).
pub const REQUEST_POSITION: u8 = 0x37;
/// Super-packet command code (0x8E); a subcode byte follows.
pub const SUPER_COMMAND: u8 = 0x8e;

/// Revert EEPROM segment to factory default (8E-45).
pub const SUBCODE_REVERT_TO_DEFAULT: u8 = 0x45;
/// Save segment to EEPROM (8E-4C).
pub const SUBCODE_SAVE_TO_EEPROM: u8 = 0x4c;
/// Set or request the UTC/GPS time flags (8E-A2).
pub const SUBCODE_UTC_GPS_TIME: u8 = 0xa2;
/// Start self-survey (8E-A6).
pub const SUBCODE_SELF_SURVEY: u8 = 0xa6;
/// Set self-survey parameters (8E-A9).
pub const SUBCODE_SURVEY_PARAMS: u8 = 0xa9;
/// Request the primary timing report (8E-AB).
pub const SUBCODE_PRIMARY_TIME: u8 = 0xab;
/// Request the secondary timing report (8E-AC).
pub const SUBCODE_SECONDARY_TIME: u8 = 0xac;

/// All EEPROM segments, for [Command::revert_to_default] and
/// [Command::save_to_eeprom].
pub const SEGMENT_ALL: u8 = 0xff;

/// Maximum command payload length, after the code and subcode bytes.
pub const MAX_PAYLOAD: usize = 61;

/// One TSIP command, ready to encode onto the wire.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct Command {
    pub code: u8,
    #[builder(default, setter(strip_option))]
    pub subcode: Option<u8>,
    #[builder(default)]
    pub payload: Vec<u8>,
}

impl Command {
    fn new(code: u8) -> Self {
        Command {
            code,
            subcode: None,
            payload: Vec::new(),
        }
    }

    fn super_command(subcode: u8, payload: Vec<u8>) -> Self {
        Command {
            code: SUPER_COMMAND,
            subcode: Some(subcode),
            payload,
        }
    }

    /// 0x1E: cold reset, clearing all settings to factory defaults. The
    /// unit answers with a software version report (0x45) once it is back
    /// up.
    #[must_use]
    pub fn cold_factory_reset() -> Self {
        Command::new(COLD_FACTORY_RESET)
    }

    /// 0x1F: request the software version report (0x45).
    #[must_use]
    pub fn request_software_version() -> Self {
        Command::new(REQUEST_SOFTWARE_VERSION)
    }

    /// 0x25: warm reset and self test. The unit answers with a software
    /// version report (0x45) once it is back up.
    #[must_use]
    pub fn warm_reset_self_test() -> Self {
        Command::new(WARM_RESET_SELF_TEST)
    }

    /// 0x35: set the packet I/O option bytes. The unit answers with an I/O
    /// options report (0x55) echoing the settings.
    #[must_use]
    pub fn set_io_options(position: u8, velocity: u8, timing: u8, auxiliary: u8) -> Self {
        Command {
            payload: vec![position, velocity, timing, auxiliary],
            ..Command::new(SET_IO_OPTIONS)
        }
    }

    /// 0x37: request the current position and velocity reports.
    #[must_use]
    pub fn request_position() -> Self {
        Command::new(REQUEST_POSITION)
    }

    /// 8E-A2: set date/time and PPS alignment to UTC. The unit answers
    /// with an 8F-A2 report echoing the flags.
    #[must_use]
    pub fn set_utc_mode() -> Self {
        Command::super_command(SUBCODE_UTC_GPS_TIME, vec![0x03])
    }

    /// 8E-AB with an empty payload: request the primary timing report.
    #[must_use]
    pub fn request_primary_time() -> Self {
        Command::super_command(SUBCODE_PRIMARY_TIME, Vec::new())
    }

    /// 8E-AC with an empty payload: request the secondary timing report.
    #[must_use]
    pub fn request_secondary_time() -> Self {
        Command::super_command(SUBCODE_SECONDARY_TIME, Vec::new())
    }

    /// 8E-45: revert an EEPROM segment to factory default, or all of them
    /// with [SEGMENT_ALL].
    #[must_use]
    pub fn revert_to_default(segment: u8) -> Self {
        Command::super_command(SUBCODE_REVERT_TO_DEFAULT, vec![segment])
    }

    /// 8E-4C: save a configuration segment to EEPROM, or all of them with
    /// [SEGMENT_ALL].
    #[must_use]
    pub fn save_to_eeprom(segment: u8) -> Self {
        Command::super_command(SUBCODE_SAVE_TO_EEPROM, vec![segment])
    }

    /// 8E-A6: restart the self-survey.
    #[must_use]
    pub fn start_self_survey() -> Self {
        Command::super_command(SUBCODE_SELF_SURVEY, vec![0])
    }

    /// 8E-A9: set the self-survey parameters. `length` is the number of
    /// fixes to average.
    #[must_use]
    pub fn set_self_survey_params(enable: bool, save_position: bool, length: u32) -> Self {
        let mut payload = vec![u8::from(enable), u8::from(save_position)];
        payload.extend(length.to_be_bytes());
        payload.extend([0u8; 4]); // reserved
        Command::super_command(SUBCODE_SURVEY_PARAMS, payload)
    }

    /// The report kind this command is answered with, or `None` for
    /// fire-and-forget commands.
    #[must_use]
    pub fn expected_report(&self) -> Option<ReportKind> {
        match (self.code, self.subcode) {
            (COLD_FACTORY_RESET | REQUEST_SOFTWARE_VERSION | WARM_RESET_SELF_TEST, _) => {
                Some(ReportKind::SoftwareVersion)
            }
            (SET_IO_OPTIONS, _) => Some(ReportKind::IoOptions),
            (REQUEST_POSITION, _) => Some(ReportKind::EcefPositionSingle),
            (SUPER_COMMAND, Some(SUBCODE_UTC_GPS_TIME)) => Some(ReportKind::UtcGpsTime),
            (SUPER_COMMAND, Some(SUBCODE_PRIMARY_TIME)) => Some(ReportKind::PrimaryTime),
            (SUPER_COMMAND, Some(SUBCODE_SECONDARY_TIME)) => Some(ReportKind::SecondaryTime),
            _ => None,
        }
    }

    /// Build the framed wire bytes for this command.
    ///
    /// # Errors
    /// [Error::PayloadTooLong] if the payload exceeds [MAX_PAYLOAD].
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.payload.len() > MAX_PAYLOAD {
            return Err(Error::PayloadTooLong {
                actual: self.payload.len(),
                max: MAX_PAYLOAD,
            });
        }
        Ok(framing::encode_frame(self.code, self.subcode, &self.payload))
    }
}
