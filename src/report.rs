//! TSIP report decoding.
//!
//! The first byte of an unescaped packet is the report code. Code
//! [SUPER_REPORT] marks a super-packet whose second byte is a subcode;
//! dispatch is then on the (code, subcode) pair. Undocumented pairs and
//! truncated payloads decode to [Report::Unknown] — the protocol is designed
//! to tolerate reports a given firmware emits but a client does not model.
//!
//! Field layouts follow the ThunderBolt GPS Disciplined Clock User Guide
//! (v5.0, 35326-30). All offsets below are relative to the start of the
//! payload, after the code and subcode bytes.

use serde::{Deserialize, Serialize};

use crate::fields::{f32_be, f64_be, i16_be, u16_be, u32_be};

/// Single precision ECEF position (0x42).
pub const ECEF_POSITION_SINGLE: u8 = 0x42;
/// ECEF velocity (0x43).
pub const ECEF_VELOCITY: u8 = 0x43;
/// Software version (0x45).
pub const SOFTWARE_VERSION: u8 = 0x45;
/// Single precision LLA position (0x4A).
pub const SINGLE_POSITION: u8 = 0x4a;
/// Packet I/O options (0x55).
pub const IO_OPTIONS: u8 = 0x55;
/// East-North-Up velocity (0x56).
pub const ENU_VELOCITY: u8 = 0x56;
/// Double precision ECEF position (0x83).
pub const ECEF_POSITION_DOUBLE: u8 = 0x83;
/// Double precision LLA position (0x84).
pub const DOUBLE_POSITION: u8 = 0x84;
/// Super-packet report code (0x8F); a subcode byte follows.
pub const SUPER_REPORT: u8 = 0x8f;

/// UTC/GPS time flag report (8F-A2).
pub const SUBCODE_UTC_GPS_TIME: u8 = 0xa2;
/// Primary timing report (8F-AB).
pub const SUBCODE_PRIMARY_TIME: u8 = 0xab;
/// Secondary timing/status report (8F-AC).
pub const SUBCODE_SECONDARY_TIME: u8 = 0xac;

/// The closed set of report kinds the store tracks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    EcefPositionSingle,
    EcefPositionDouble,
    EcefVelocity,
    SoftwareVersion,
    SinglePosition,
    DoublePosition,
    IoOptions,
    EnuVelocity,
    UtcGpsTime,
    PrimaryTime,
    SecondaryTime,
    Unknown,
}

/// Single precision XYZ Earth Centered Earth Fixed position (0x42).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EcefPositionSingle {
    /// X, meters
    pub x: f32,
    /// Y, meters
    pub y: f32,
    /// Z, meters
    pub z: f32,
    /// Time of fix, GPS or UTC seconds per the I/O timing option
    pub time_of_fix: f32,
}

impl EcefPositionSingle {
    pub const LEN: usize = 16;

    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(EcefPositionSingle {
            x: f32_be(dat, 0),
            y: f32_be(dat, 4),
            z: f32_be(dat, 8),
            time_of_fix: f32_be(dat, 12),
        })
    }
}

/// XYZ Earth Centered Earth Fixed velocity (0x43).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EcefVelocity {
    /// X, meters/second
    pub x: f32,
    /// Y, meters/second
    pub y: f32,
    /// Z, meters/second
    pub z: f32,
    /// Clock bias rate, meters/second
    pub bias_rate: f32,
    /// Time of fix, GPS or UTC seconds
    pub time_of_fix: f32,
}

impl EcefVelocity {
    pub const LEN: usize = 20;

    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(EcefVelocity {
            x: f32_be(dat, 0),
            y: f32_be(dat, 4),
            z: f32_be(dat, 8),
            bias_rate: f32_be(dat, 12),
            time_of_fix: f32_be(dat, 16),
        })
    }
}

/// Software version report (0x45).
///
/// Years are offset from 1900.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftwareVersion {
    pub app_major: u8,
    pub app_minor: u8,
    pub app_month: u8,
    pub app_day: u8,
    pub app_year: u8,
    pub gps_major: u8,
    pub gps_minor: u8,
    pub gps_month: u8,
    pub gps_day: u8,
    pub gps_year: u8,
}

impl SoftwareVersion {
    pub const LEN: usize = 10;

    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(SoftwareVersion {
            app_major: dat[0],
            app_minor: dat[1],
            app_month: dat[2],
            app_day: dat[3],
            app_year: dat[4],
            gps_major: dat[5],
            gps_minor: dat[6],
            gps_month: dat[7],
            gps_day: dat[8],
            gps_year: dat[9],
        })
    }
}

/// Single precision latitude/longitude/altitude fix (0x4A).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SinglePosition {
    /// Radians, + north / - south
    pub latitude: f32,
    /// Radians, + east / - west
    pub longitude: f32,
    /// Meters
    pub altitude: f32,
    /// Meters relative to GPS
    pub clock_bias: f32,
    /// Seconds, GPS or UTC
    pub time_of_fix: f32,
}

impl SinglePosition {
    pub const LEN: usize = 20;

    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(SinglePosition {
            latitude: f32_be(dat, 0),
            longitude: f32_be(dat, 4),
            altitude: f32_be(dat, 8),
            clock_bias: f32_be(dat, 12),
            time_of_fix: f32_be(dat, 16),
        })
    }
}

/// Position option byte from the 0x55 report.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions(pub u8);

impl PositionOptions {
    pub const ECEF: u8 = 0x01;
    pub const LLA: u8 = 0x02;
    pub const MSL_ALTITUDE: u8 = 0x04;
    pub const DOUBLE_PRECISION: u8 = 0x10;

    #[must_use]
    pub fn ecef(self) -> bool {
        self.0 & Self::ECEF != 0
    }

    #[must_use]
    pub fn lla(self) -> bool {
        self.0 & Self::LLA != 0
    }

    #[must_use]
    pub fn msl_altitude(self) -> bool {
        self.0 & Self::MSL_ALTITUDE != 0
    }

    #[must_use]
    pub fn double_precision(self) -> bool {
        self.0 & Self::DOUBLE_PRECISION != 0
    }
}

/// Velocity option byte from the 0x55 report.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VelocityOptions(pub u8);

impl VelocityOptions {
    pub const ECEF: u8 = 0x01;
    pub const ENU: u8 = 0x02;

    #[must_use]
    pub fn ecef(self) -> bool {
        self.0 & Self::ECEF != 0
    }

    #[must_use]
    pub fn enu(self) -> bool {
        self.0 & Self::ENU != 0
    }
}

/// Timing option byte from the 0x55 report.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingOptions(pub u8);

impl TimingOptions {
    pub const UTC: u8 = 0x01;

    #[must_use]
    pub fn utc(self) -> bool {
        self.0 & Self::UTC != 0
    }
}

/// Auxiliary option byte from the 0x55 report.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxiliaryOptions(pub u8);

impl AuxiliaryOptions {
    pub const PACKET_5A: u8 = 0x01;
    pub const FILTERED_PRS: u8 = 0x02;
    pub const DBHZ: u8 = 0x08;

    #[must_use]
    pub fn packet_5a(self) -> bool {
        self.0 & Self::PACKET_5A != 0
    }

    #[must_use]
    pub fn filtered_prs(self) -> bool {
        self.0 & Self::FILTERED_PRS != 0
    }

    #[must_use]
    pub fn dbhz(self) -> bool {
        self.0 & Self::DBHZ != 0
    }
}

/// Packet I/O options report (0x55).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoOptions {
    pub position: PositionOptions,
    pub velocity: VelocityOptions,
    pub timing: TimingOptions,
    pub auxiliary: AuxiliaryOptions,
}

impl IoOptions {
    pub const LEN: usize = 4;

    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(IoOptions {
            position: PositionOptions(dat[0]),
            velocity: VelocityOptions(dat[1]),
            timing: TimingOptions(dat[2]),
            auxiliary: AuxiliaryOptions(dat[3]),
        })
    }
}

/// Single precision East-North-Up velocity fix (0x56).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EnuVelocity {
    /// m/s, + east / - west
    pub east: f32,
    /// m/s, + north / - south
    pub north: f32,
    /// m/s, + up / - down
    pub up: f32,
    /// Clock bias rate, meters/second
    pub clock_bias: f32,
    /// Seconds, GPS or UTC
    pub time_of_fix: f32,
}

impl EnuVelocity {
    pub const LEN: usize = 20;

    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(EnuVelocity {
            east: f32_be(dat, 0),
            north: f32_be(dat, 4),
            up: f32_be(dat, 8),
            clock_bias: f32_be(dat, 12),
            time_of_fix: f32_be(dat, 16),
        })
    }
}

/// Double precision XYZ Earth Centered Earth Fixed position (0x83).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EcefPositionDouble {
    /// X, meters
    pub x: f64,
    /// Y, meters
    pub y: f64,
    /// Z, meters
    pub z: f64,
    /// Clock bias, meters
    pub clock_bias: f64,
    /// Time of fix, GPS or UTC seconds
    pub time_of_fix: f32,
}

impl EcefPositionDouble {
    pub const LEN: usize = 36;

    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(EcefPositionDouble {
            x: f64_be(dat, 0),
            y: f64_be(dat, 8),
            z: f64_be(dat, 16),
            clock_bias: f64_be(dat, 24),
            time_of_fix: f32_be(dat, 32),
        })
    }
}

/// Double precision latitude/longitude/altitude fix (0x84).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DoublePosition {
    /// Radians, + north / - south
    pub latitude: f64,
    /// Radians, + east / - west
    pub longitude: f64,
    /// Meters
    pub altitude: f64,
    /// Meters relative to GPS
    pub clock_bias: f64,
    /// Seconds, GPS or UTC
    pub time_of_fix: f64,
}

impl DoublePosition {
    pub const LEN: usize = 40;

    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(DoublePosition {
            latitude: f64_be(dat, 0),
            longitude: f64_be(dat, 8),
            altitude: f64_be(dat, 16),
            clock_bias: f64_be(dat, 24),
            time_of_fix: f64_be(dat, 32),
        })
    }
}

/// Flag byte from the 8F-A2 UTC/GPS time report.
///
/// A clear bit means GPS time, a set bit means UTC.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFormatFlags(pub u8);

impl TimeFormatFlags {
    /// Bit 0: date/time reported in UTC rather than GPS time.
    pub const UTC_DATE_TIME: u8 = 0x01;
    /// Bit 1: PPS aligned to UTC rather than GPS.
    pub const UTC_PPS: u8 = 0x02;

    #[must_use]
    pub fn date_time_is_utc(self) -> bool {
        self.0 & Self::UTC_DATE_TIME != 0
    }

    #[must_use]
    pub fn pps_is_utc(self) -> bool {
        self.0 & Self::UTC_PPS != 0
    }
}

/// UTC/GPS time flag report (8F-A2).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcGpsTime {
    pub flags: TimeFormatFlags,
}

impl UtcGpsTime {
    pub const LEN: usize = 1;

    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.is_empty() {
            return None;
        }
        Some(UtcGpsTime {
            flags: TimeFormatFlags(dat[0]),
        })
    }
}

/// Timing flag byte from the 8F-AB primary timing report.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingFlags(pub u8);

impl TimingFlags {
    /// Bit 0: time is UTC (set) or GPS (clear).
    pub const UTC_TIME: u8 = 0x01;
    /// Bit 1: PPS is UTC (set) or GPS (clear).
    pub const UTC_PPS: u8 = 0x02;
    /// Bit 2: time is not yet set.
    pub const TIME_NOT_SET: u8 = 0x04;
    /// Bit 3: UTC offset information is not available.
    pub const NO_UTC_INFO: u8 = 0x08;
    /// Bit 4: time is from a user-set test mode, not GPS.
    pub const TEST_MODE_TIME: u8 = 0x10;

    #[must_use]
    pub fn utc_time(self) -> bool {
        self.0 & Self::UTC_TIME != 0
    }

    #[must_use]
    pub fn utc_pps(self) -> bool {
        self.0 & Self::UTC_PPS != 0
    }

    #[must_use]
    pub fn time_not_set(self) -> bool {
        self.0 & Self::TIME_NOT_SET != 0
    }

    #[must_use]
    pub fn no_utc_info(self) -> bool {
        self.0 & Self::NO_UTC_INFO != 0
    }

    #[must_use]
    pub fn test_mode_time(self) -> bool {
        self.0 & Self::TEST_MODE_TIME != 0
    }
}

/// Primary timing report (8F-AB).
///
/// Layout, all big-endian:
/// `0:u32 seconds-of-week, 4:u16 week-number, 6:i16 utc-offset,
/// 8:flags, 9:u8 seconds, 10:u8 minutes, 11:u8 hours, 12:u8 day,
/// 13:u8 month, 14:u16 year`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryTime {
    /// GPS seconds since GPS Sunday 00:00:00
    pub seconds_of_week: u32,
    /// GPS week number
    pub week_number: u16,
    /// GPS-UTC difference, seconds
    pub utc_offset: i16,
    pub flags: TimingFlags,
    /// 0-59, UTC or GPS per flags bit 0
    pub seconds: u8,
    /// 0-59
    pub minutes: u8,
    /// 0-23
    pub hours: u8,
    /// 1-31
    pub day: u8,
    /// 1-12
    pub month: u8,
    /// Four digit year
    pub year: u16,
}

impl PrimaryTime {
    pub const LEN: usize = 16;

    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(PrimaryTime {
            seconds_of_week: u32_be(dat, 0),
            week_number: u16_be(dat, 4),
            utc_offset: i16_be(dat, 6),
            flags: TimingFlags(dat[8]),
            seconds: dat[9],
            minutes: dat[10],
            hours: dat[11],
            day: dat[12],
            month: dat[13],
            year: u16_be(dat, 14),
        })
    }
}

/// Critical alarm bits from the 8F-AC report. Any set bit means the unit
/// is not usable.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriticalAlarms(pub u16);

impl CriticalAlarms {
    pub const ROM_CHECKSUM_ERROR: u16 = 0x0001;
    pub const RAM_CHECK_FAILED: u16 = 0x0002;
    pub const POWER_SUPPLY_FAILURE: u16 = 0x0004;
    pub const FPGA_CHECK_FAILED: u16 = 0x0008;
    pub const CONTROL_VOLTAGE_AT_RAIL: u16 = 0x0010;

    #[must_use]
    pub fn any(self) -> bool {
        self.0 != 0
    }

    #[must_use]
    pub fn contains(self, mask: u16) -> bool {
        self.0 & mask != 0
    }
}

/// Minor alarm bits from the 8F-AC report.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinorAlarms(pub u16);

impl MinorAlarms {
    pub const CONTROL_VOLTAGE_NEAR_RAIL: u16 = 0x0001;
    pub const ANTENNA_OPEN: u16 = 0x0002;
    pub const ANTENNA_SHORTED: u16 = 0x0004;
    pub const NOT_TRACKING_SATELLITES: u16 = 0x0008;
    pub const NOT_DISCIPLINING: u16 = 0x0010;
    pub const SELF_SURVEY_IN_PROGRESS: u16 = 0x0020;
    pub const NO_STORED_POSITION: u16 = 0x0040;
    pub const LEAP_SECOND_PENDING: u16 = 0x0080;
    pub const TEST_MODE: u16 = 0x0100;
    pub const INACCURATE_POSITION: u16 = 0x0200;
    pub const EEPROM_SEGMENT_CORRUPT: u16 = 0x0400;
    pub const ALMANAC_INCOMPLETE: u16 = 0x0800;

    #[must_use]
    pub fn any(self) -> bool {
        self.0 != 0
    }

    #[must_use]
    pub fn contains(self, mask: u16) -> bool {
        self.0 & mask != 0
    }

    #[must_use]
    pub fn self_survey_in_progress(self) -> bool {
        self.contains(Self::SELF_SURVEY_IN_PROGRESS)
    }

    #[must_use]
    pub fn leap_second_pending(self) -> bool {
        self.contains(Self::LEAP_SECOND_PENDING)
    }
}

/// Secondary timing and status report (8F-AC).
///
/// Layout, all big-endian:
/// `0:u8 receiver-mode, 1:u8 disciplining-mode, 2:u8 self-survey-progress,
/// 3:u32 holdover-seconds, 7:u16 critical-alarms, 9:u16 minor-alarms,
/// 11:u8 decoding-status, 12:u8 disciplining-activity, 13-14 spare,
/// 15:f32 pps-offset-ns, 19:f32 10MHz-offset-ppb, 23:u32 dac-value,
/// 27:f32 dac-voltage, 31:f32 temperature-C, 35:f64 latitude-rad,
/// 43:f64 longitude-rad, 51:f64 altitude-m, 59-66 spare`.
///
/// The spare bytes are required on the wire but not retained.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SecondaryTime {
    /// See the `RX_*` constants
    pub receiver_mode: u8,
    /// See the `DISC_*` constants
    pub disciplining_mode: u8,
    /// Self-survey progress, 0-100%
    pub self_survey_progress: u8,
    /// Holdover duration, seconds
    pub holdover_duration: u32,
    pub critical_alarms: CriticalAlarms,
    pub minor_alarms: MinorAlarms,
    /// See the `STATUS_*` constants
    pub gps_decoding_status: u8,
    /// See the `ACTIVITY_*` constants
    pub disciplining_activity: u8,
    /// Estimated PPS offset from UTC/GPS, nanoseconds
    pub pps_offset: f32,
    /// Estimated 10 MHz offset from UTC/GPS, ppb
    pub ten_mhz_offset: f32,
    /// Oscillator control DAC, raw value
    pub dac_value: u32,
    /// Oscillator control DAC, volts
    pub dac_voltage: f32,
    /// Board temperature, degrees C
    pub temperature: f32,
    /// Radians
    pub latitude: f64,
    /// Radians
    pub longitude: f64,
    /// Meters
    pub altitude: f64,
}

impl SecondaryTime {
    pub const LEN: usize = 67;

    // Receiver mode
    pub const RX_AUTOMATIC: u8 = 0;
    pub const RX_SINGLE_SATELLITE: u8 = 1;
    pub const RX_HORIZONTAL_2D: u8 = 3;
    pub const RX_FULL_POSITION: u8 = 4;
    pub const RX_DGPS_REFERENCE: u8 = 5;
    pub const RX_CLOCK_HOLD_2D: u8 = 6;
    pub const RX_OVERDETERMINED_CLOCK: u8 = 7;

    // Disciplining mode
    pub const DISC_NORMAL: u8 = 0;
    pub const DISC_POWER_UP: u8 = 1;
    pub const DISC_AUTO_HOLDOVER: u8 = 2;
    pub const DISC_MANUAL_HOLDOVER: u8 = 3;
    pub const DISC_RECOVERY: u8 = 4;
    pub const DISC_DISABLED: u8 = 6;

    // GPS decoding status
    pub const STATUS_DOING_FIXES: u8 = 0;
    pub const STATUS_NO_GPS_TIME: u8 = 1;
    pub const STATUS_PDOP_TOO_HIGH: u8 = 3;
    pub const STATUS_NO_SATELLITES: u8 = 8;
    pub const STATUS_ONE_SATELLITE: u8 = 9;
    pub const STATUS_TWO_SATELLITES: u8 = 0x0a;
    pub const STATUS_THREE_SATELLITES: u8 = 0x0b;
    pub const STATUS_CHOSEN_SAT_UNUSABLE: u8 = 0x0c;
    pub const STATUS_TRAIM_REJECTED_FIX: u8 = 0x10;

    // Disciplining activity
    pub const ACTIVITY_PHASE_LOCKING: u8 = 0;
    pub const ACTIVITY_OSC_WARMUP: u8 = 1;
    pub const ACTIVITY_FREQUENCY_LOCKING: u8 = 2;
    pub const ACTIVITY_PLACING_PPS: u8 = 3;
    pub const ACTIVITY_INIT_LOOP_FILTER: u8 = 4;
    pub const ACTIVITY_COMPENSATING_OCXO: u8 = 5;
    pub const ACTIVITY_INACTIVE: u8 = 6;
    pub const ACTIVITY_RECOVERY: u8 = 8;

    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(SecondaryTime {
            receiver_mode: dat[0],
            disciplining_mode: dat[1],
            self_survey_progress: dat[2],
            holdover_duration: u32_be(dat, 3),
            critical_alarms: CriticalAlarms(u16_be(dat, 7)),
            minor_alarms: MinorAlarms(u16_be(dat, 9)),
            gps_decoding_status: dat[11],
            disciplining_activity: dat[12],
            pps_offset: f32_be(dat, 15),
            ten_mhz_offset: f32_be(dat, 19),
            dac_value: u32_be(dat, 23),
            dac_voltage: f32_be(dat, 27),
            temperature: f32_be(dat, 31),
            latitude: f64_be(dat, 35),
            longitude: f64_be(dat, 43),
            altitude: f64_be(dat, 51),
        })
    }
}

/// A report this library does not model; the raw payload is retained.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UnknownReport {
    pub code: u8,
    pub subcode: Option<u8>,
    pub data: Vec<u8>,
}

/// One decoded TSIP report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Report {
    EcefPositionSingle(EcefPositionSingle),
    EcefPositionDouble(EcefPositionDouble),
    EcefVelocity(EcefVelocity),
    SoftwareVersion(SoftwareVersion),
    SinglePosition(SinglePosition),
    DoublePosition(DoublePosition),
    IoOptions(IoOptions),
    EnuVelocity(EnuVelocity),
    UtcGpsTime(UtcGpsTime),
    PrimaryTime(PrimaryTime),
    SecondaryTime(SecondaryTime),
    Unknown(UnknownReport),
}

impl Report {
    /// Decode one unescaped packet: code byte, subcode byte for
    /// super-packets, then payload.
    ///
    /// Undocumented codes and truncated payloads decode to
    /// [Report::Unknown] rather than an error. Returns `None` only for an
    /// empty packet, which the framer never emits.
    #[must_use]
    pub fn decode(packet: &[u8]) -> Option<Report> {
        let (&code, rest) = packet.split_first()?;
        let report = match code {
            ECEF_POSITION_SINGLE => {
                EcefPositionSingle::decode(rest).map(Report::EcefPositionSingle)
            }
            ECEF_VELOCITY => EcefVelocity::decode(rest).map(Report::EcefVelocity),
            SOFTWARE_VERSION => SoftwareVersion::decode(rest).map(Report::SoftwareVersion),
            SINGLE_POSITION => SinglePosition::decode(rest).map(Report::SinglePosition),
            IO_OPTIONS => IoOptions::decode(rest).map(Report::IoOptions),
            ENU_VELOCITY => EnuVelocity::decode(rest).map(Report::EnuVelocity),
            ECEF_POSITION_DOUBLE => {
                EcefPositionDouble::decode(rest).map(Report::EcefPositionDouble)
            }
            DOUBLE_POSITION => DoublePosition::decode(rest).map(Report::DoublePosition),
            SUPER_REPORT => rest.split_first().and_then(|(&subcode, dat)| match subcode {
                SUBCODE_UTC_GPS_TIME => UtcGpsTime::decode(dat).map(Report::UtcGpsTime),
                SUBCODE_PRIMARY_TIME => PrimaryTime::decode(dat).map(Report::PrimaryTime),
                SUBCODE_SECONDARY_TIME => SecondaryTime::decode(dat).map(Report::SecondaryTime),
                _ => None,
            }),
            _ => None,
        };
        Some(report.unwrap_or_else(|| Report::unknown(code, packet)))
    }

    fn unknown(code: u8, packet: &[u8]) -> Report {
        let (subcode, data) = if code == SUPER_REPORT && packet.len() >= 2 {
            (Some(packet[1]), &packet[2..])
        } else {
            (None, &packet[1..])
        };
        Report::Unknown(UnknownReport {
            code,
            subcode,
            data: data.to_vec(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::EcefPositionSingle(_) => ReportKind::EcefPositionSingle,
            Report::EcefPositionDouble(_) => ReportKind::EcefPositionDouble,
            Report::EcefVelocity(_) => ReportKind::EcefVelocity,
            Report::SoftwareVersion(_) => ReportKind::SoftwareVersion,
            Report::SinglePosition(_) => ReportKind::SinglePosition,
            Report::DoublePosition(_) => ReportKind::DoublePosition,
            Report::IoOptions(_) => ReportKind::IoOptions,
            Report::EnuVelocity(_) => ReportKind::EnuVelocity,
            Report::UtcGpsTime(_) => ReportKind::UtcGpsTime,
            Report::PrimaryTime(_) => ReportKind::PrimaryTime,
            Report::SecondaryTime(_) => ReportKind::SecondaryTime,
            Report::Unknown(_) => ReportKind::Unknown,
        }
    }
}
