//! Last-known-value store for decoded reports.
//!
//! The device emits reports both on request and spontaneously, so the link
//! keeps every decoded report in a per-kind slot. A slot remembers the last
//! value and whether that value arrived since the current correlation cycle
//! began; request/response matching is a freshness check, not a value check.

use crate::report::{
    DoublePosition, EcefPositionDouble, EcefPositionSingle, EcefVelocity, EnuVelocity, IoOptions,
    PrimaryTime, Report, ReportKind, SecondaryTime, SinglePosition, SoftwareVersion, UnknownReport,
    UtcGpsTime,
};

#[derive(Debug, Clone)]
struct Slot<T> {
    value: Option<T>,
    fresh: bool,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot {
            value: None,
            fresh: false,
        }
    }
}

impl<T> Slot<T> {
    fn set(&mut self, value: T) {
        self.value = Some(value);
        self.fresh = true;
    }
}

/// Holds the most recent report of each kind.
///
/// Insertion is last-write-wins. Clearing freshness leaves the values in
/// place so stale-but-known state remains readable between correlation
/// cycles.
#[derive(Debug, Clone, Default)]
pub struct ReportStore {
    ecef_position_single: Slot<EcefPositionSingle>,
    ecef_position_double: Slot<EcefPositionDouble>,
    ecef_velocity: Slot<EcefVelocity>,
    software_version: Slot<SoftwareVersion>,
    single_position: Slot<SinglePosition>,
    double_position: Slot<DoublePosition>,
    io_options: Slot<IoOptions>,
    enu_velocity: Slot<EnuVelocity>,
    utc_gps_time: Slot<UtcGpsTime>,
    primary_time: Slot<PrimaryTime>,
    secondary_time: Slot<SecondaryTime>,
    unknown: Slot<UnknownReport>,
}

impl ReportStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every slot stale without discarding its value. Called at the
    /// start of a correlation cycle.
    pub fn clear_freshness(&mut self) {
        self.ecef_position_single.fresh = false;
        self.ecef_position_double.fresh = false;
        self.ecef_velocity.fresh = false;
        self.software_version.fresh = false;
        self.single_position.fresh = false;
        self.double_position.fresh = false;
        self.io_options.fresh = false;
        self.enu_velocity.fresh = false;
        self.utc_gps_time.fresh = false;
        self.primary_time.fresh = false;
        self.secondary_time.fresh = false;
        self.unknown.fresh = false;
    }

    /// Store a decoded report in its slot, replacing any previous value.
    pub fn insert(&mut self, report: Report) {
        match report {
            Report::EcefPositionSingle(r) => self.ecef_position_single.set(r),
            Report::EcefPositionDouble(r) => self.ecef_position_double.set(r),
            Report::EcefVelocity(r) => self.ecef_velocity.set(r),
            Report::SoftwareVersion(r) => self.software_version.set(r),
            Report::SinglePosition(r) => self.single_position.set(r),
            Report::DoublePosition(r) => self.double_position.set(r),
            Report::IoOptions(r) => self.io_options.set(r),
            Report::EnuVelocity(r) => self.enu_velocity.set(r),
            Report::UtcGpsTime(r) => self.utc_gps_time.set(r),
            Report::PrimaryTime(r) => self.primary_time.set(r),
            Report::SecondaryTime(r) => self.secondary_time.set(r),
            Report::Unknown(r) => self.unknown.set(r),
        }
    }

    /// True if a report of this kind arrived since the last
    /// [clear_freshness](Self::clear_freshness).
    #[must_use]
    pub fn is_fresh(&self, kind: ReportKind) -> bool {
        match kind {
            ReportKind::EcefPositionSingle => self.ecef_position_single.fresh,
            ReportKind::EcefPositionDouble => self.ecef_position_double.fresh,
            ReportKind::EcefVelocity => self.ecef_velocity.fresh,
            ReportKind::SoftwareVersion => self.software_version.fresh,
            ReportKind::SinglePosition => self.single_position.fresh,
            ReportKind::DoublePosition => self.double_position.fresh,
            ReportKind::IoOptions => self.io_options.fresh,
            ReportKind::EnuVelocity => self.enu_velocity.fresh,
            ReportKind::UtcGpsTime => self.utc_gps_time.fresh,
            ReportKind::PrimaryTime => self.primary_time.fresh,
            ReportKind::SecondaryTime => self.secondary_time.fresh,
            ReportKind::Unknown => self.unknown.fresh,
        }
    }

    #[must_use]
    pub fn ecef_position_single(&self) -> Option<&EcefPositionSingle> {
        self.ecef_position_single.value.as_ref()
    }

    #[must_use]
    pub fn ecef_position_double(&self) -> Option<&EcefPositionDouble> {
        self.ecef_position_double.value.as_ref()
    }

    #[must_use]
    pub fn ecef_velocity(&self) -> Option<&EcefVelocity> {
        self.ecef_velocity.value.as_ref()
    }

    #[must_use]
    pub fn software_version(&self) -> Option<&SoftwareVersion> {
        self.software_version.value.as_ref()
    }

    #[must_use]
    pub fn single_position(&self) -> Option<&SinglePosition> {
        self.single_position.value.as_ref()
    }

    #[must_use]
    pub fn double_position(&self) -> Option<&DoublePosition> {
        self.double_position.value.as_ref()
    }

    #[must_use]
    pub fn io_options(&self) -> Option<&IoOptions> {
        self.io_options.value.as_ref()
    }

    #[must_use]
    pub fn enu_velocity(&self) -> Option<&EnuVelocity> {
        self.enu_velocity.value.as_ref()
    }

    #[must_use]
    pub fn utc_gps_time(&self) -> Option<&UtcGpsTime> {
        self.utc_gps_time.value.as_ref()
    }

    #[must_use]
    pub fn primary_time(&self) -> Option<&PrimaryTime> {
        self.primary_time.value.as_ref()
    }

    #[must_use]
    pub fn secondary_time(&self) -> Option<&SecondaryTime> {
        self.secondary_time.value.as_ref()
    }

    /// The last report that did not match any modeled kind.
    #[must_use]
    pub fn unknown(&self) -> Option<&UnknownReport> {
        self.unknown.value.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TimeFormatFlags;

    fn utc_report(flags: u8) -> Report {
        Report::UtcGpsTime(UtcGpsTime {
            flags: TimeFormatFlags(flags),
        })
    }

    #[test]
    fn insert_marks_fresh_and_stores_value() {
        let mut store = ReportStore::new();
        assert!(!store.is_fresh(ReportKind::UtcGpsTime));
        assert!(store.utc_gps_time().is_none());

        store.insert(utc_report(0x03));
        assert!(store.is_fresh(ReportKind::UtcGpsTime));
        assert_eq!(store.utc_gps_time().unwrap().flags.0, 0x03);
        // other slots unaffected
        assert!(!store.is_fresh(ReportKind::PrimaryTime));
    }

    #[test]
    fn clear_freshness_keeps_values() {
        let mut store = ReportStore::new();
        store.insert(utc_report(0x03));
        store.clear_freshness();

        assert!(!store.is_fresh(ReportKind::UtcGpsTime));
        assert_eq!(store.utc_gps_time().unwrap().flags.0, 0x03);
    }

    #[test]
    fn insert_is_last_write_wins() {
        let mut store = ReportStore::new();
        store.insert(utc_report(0x01));
        store.insert(utc_report(0x02));
        assert_eq!(store.utc_gps_time().unwrap().flags.0, 0x02);
    }

    #[test]
    fn unknown_reports_land_in_their_own_slot() {
        let mut store = ReportStore::new();
        store.insert(Report::Unknown(UnknownReport {
            code: 0x99,
            subcode: None,
            data: vec![1, 2],
        }));

        assert!(store.is_fresh(ReportKind::Unknown));
        assert_eq!(store.unknown().unwrap().code, 0x99);
        assert!(!store.is_fresh(ReportKind::PrimaryTime));
    }
}
