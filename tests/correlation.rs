//! End-to-end command/report correlation over a scripted byte channel.

use std::io::{Cursor, Read, Write};

use tsip::framing::encode_frame;
use tsip::report::{
    SUBCODE_PRIMARY_TIME, SUBCODE_SECONDARY_TIME, SUPER_REPORT, SOFTWARE_VERSION,
};
use tsip::{Command, Error, Link, ReportKind, DEFAULT_MAX_ATTEMPTS};

/// A fake serial port: reads come from a pre-scripted byte stream, writes
/// are captured for inspection.
struct ScriptedPort {
    input: Cursor<Vec<u8>>,
    written: Vec<u8>,
}

impl ScriptedPort {
    fn new(input: Vec<u8>) -> Self {
        ScriptedPort {
            input: Cursor::new(input),
            written: Vec::new(),
        }
    }
}

impl Read for ScriptedPort {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for ScriptedPort {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn primary_time_frame() -> Vec<u8> {
    let payload = hex::decode("0001518000010000031e2d0c0f0607e8").unwrap();
    let mut packet = vec![SUBCODE_PRIMARY_TIME];
    packet.extend(payload);
    encode_frame(SUPER_REPORT, None, &packet)
}

fn secondary_time_frame() -> Vec<u8> {
    let mut payload = vec![SUBCODE_SECONDARY_TIME];
    payload.extend([7, 0, 100]); // mode, disciplining, survey done
    payload.extend(0u32.to_be_bytes());
    payload.extend(0u16.to_be_bytes());
    payload.extend(0u16.to_be_bytes());
    payload.extend([0, 0, 0, 0]);
    payload.extend(3.25f32.to_be_bytes());
    payload.extend(0.01f32.to_be_bytes());
    payload.extend(550_000u32.to_be_bytes());
    payload.extend(0.5f32.to_be_bytes());
    payload.extend(40.0f32.to_be_bytes());
    payload.extend(0.74f64.to_be_bytes());
    payload.extend((-1.87f64).to_be_bytes());
    payload.extend(200.0f64.to_be_bytes());
    payload.extend([0u8; 8]);
    encode_frame(SUPER_REPORT, None, &payload)
}

fn version_frame() -> Vec<u8> {
    encode_frame(SOFTWARE_VERSION, None, &[3, 0, 11, 20, 103, 1, 2, 6, 5, 100])
}

#[test]
fn primary_time_request_round_trip() {
    let mut link = Link::new(ScriptedPort::new(primary_time_frame()));

    let time = link.fetch_primary_time(DEFAULT_MAX_ATTEMPTS).unwrap();
    assert_eq!(time.seconds_of_week, 86400);
    assert_eq!(time.week_number, 1);
    assert_eq!(time.hours, 12);
    assert_eq!(time.minutes, 45);
    assert_eq!(time.seconds, 30);
    assert_eq!(time.year, 2024);

    // exactly one request frame went out: 10 8E AB 10 03
    let port = link.into_port();
    assert_eq!(port.written, [0x10, 0x8e, 0xab, 0x10, 0x03]);
}

#[test]
fn unrelated_reports_are_stored_but_do_not_satisfy_the_request() {
    let mut input = Vec::new();
    input.extend(version_frame());
    input.extend(secondary_time_frame());
    input.extend(primary_time_frame());
    let mut link = Link::new(ScriptedPort::new(input));

    let time = link.fetch_primary_time(DEFAULT_MAX_ATTEMPTS).unwrap();
    assert_eq!(time.week_number, 1);

    // bystander reports were retained along the way
    assert_eq!(link.reports().software_version().unwrap().app_major, 3);
    assert_eq!(link.reports().secondary_time().unwrap().receiver_mode, 7);
}

#[test]
fn unknown_reports_are_tolerated() {
    let mut input = Vec::new();
    input.extend(encode_frame(0x99, None, &[1, 2, 3]));
    input.extend(encode_frame(SUPER_REPORT, None, &[0x42, 0xaa]));
    input.extend(version_frame());
    let mut link = Link::new(ScriptedPort::new(input));

    let version = link.fetch_software_version(DEFAULT_MAX_ATTEMPTS).unwrap();
    assert_eq!(version.gps_minor, 2);
    assert_eq!(link.reports().unknown().unwrap().code, SUPER_REPORT);
}

#[test]
fn attempt_budget_is_exact() {
    // script more wrong-kind frames than the budget allows
    let frame = version_frame();
    let mut input = Vec::new();
    for _ in 0..DEFAULT_MAX_ATTEMPTS + 5 {
        input.extend(&frame);
    }
    let mut link = Link::new(ScriptedPort::new(input));

    match link.fetch_primary_time(DEFAULT_MAX_ATTEMPTS) {
        Err(Error::NoReport {
            code,
            subcode,
            attempts,
        }) => {
            assert_eq!(code, 0x8e);
            assert_eq!(subcode, Some(0xab));
            assert_eq!(attempts, DEFAULT_MAX_ATTEMPTS);
        }
        other => panic!("expected NoReport, got {other:?}"),
    }

    // exactly max_attempts packets were consumed, no more
    let port = link.into_port();
    let consumed = port.input.position() as usize;
    assert_eq!(consumed, frame.len() * DEFAULT_MAX_ATTEMPTS as usize);
}

#[test]
fn noise_between_frames_does_not_count_against_the_budget() {
    let mut input = vec![0x00, 0x7f, 0x42, 0xfe, 0xca];
    input.extend(primary_time_frame());
    let mut link = Link::new(ScriptedPort::new(input));

    // noise bytes are consumed by the framer without producing packets
    let time = link.fetch_primary_time(1).unwrap();
    assert_eq!(time.seconds_of_week, 86400);
}

#[test]
fn fire_and_forget_send_reads_nothing() {
    let mut link = Link::new(ScriptedPort::new(Vec::new()));
    link.send(&Command::start_self_survey()).unwrap();

    let port = link.into_port();
    assert_eq!(port.written, [0x10, 0x8e, 0xa6, 0x00, 0x10, 0x03]);
    assert_eq!(port.input.position(), 0);
}

#[test]
fn channel_eof_surfaces_as_io_error() {
    // stream ends mid-frame
    let mut link = Link::new(ScriptedPort::new(vec![0x10, 0x8f, 0xab, 0x00]));

    match link.fetch_primary_time(DEFAULT_MAX_ATTEMPTS) {
        Err(Error::Io(err)) => {
            assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn set_utc_mode_correlates_on_the_echo() {
    let input = encode_frame(SUPER_REPORT, None, &[0xa2, 0x03]);
    let mut link = Link::new(ScriptedPort::new(input));

    link.request(
        &Command::set_utc_mode(),
        ReportKind::UtcGpsTime,
        DEFAULT_MAX_ATTEMPTS,
    )
    .unwrap();

    let flags = link.reports().utc_gps_time().unwrap().flags;
    assert!(flags.date_time_is_utc());
    assert!(flags.pps_is_utc());
}
