//! GT1151 register protocol against an in-memory I2C bus

use std::collections::VecDeque;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use gt1151::{COORD_REG, DEFAULT_ADDRESS, Error, Gt1151, Rotation};
use touch_ui::{TouchSample, TouchSampler};

/// Fake bus answering reads from a queue and recording every write
#[derive(Default)]
struct FakeBus {
    reads: VecDeque<Result<Vec<u8>, ErrorKind>>,
    writes: Vec<Vec<u8>>,
}

impl FakeBus {
    fn report(mut self, status: u8, x: u16, y: u16) -> Self {
        let [xl, xh] = x.to_le_bytes();
        let [yl, yh] = y.to_le_bytes();
        self.reads
            .push_back(Ok(vec![status, 0, xl, xh, yl, yh, 0, 0, 0]));
        self
    }

    fn failure(mut self) -> Self {
        self.reads.push_back(Err(ErrorKind::Other));
        self
    }

    fn raw(mut self, bytes: &[u8]) -> Self {
        self.reads.push_back(Ok(bytes.to_vec()));
        self
    }
}

impl ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        assert_eq!(address, DEFAULT_ADDRESS);
        for operation in operations {
            match operation {
                Operation::Write(bytes) => self.writes.push(bytes.to_vec()),
                Operation::Read(buffer) => {
                    let data = self.reads.pop_front().unwrap_or(Err(ErrorKind::Other))?;
                    let len = buffer.len().min(data.len());
                    buffer[..len].copy_from_slice(&data[..len]);
                }
            }
        }
        Ok(())
    }
}

fn clear_status() -> Vec<u8> {
    let [hi, lo] = COORD_REG.to_be_bytes();
    vec![hi, lo, 0]
}

#[test]
fn ready_report_is_read_and_acknowledged() {
    let bus = FakeBus::default().report(0x81, 40, 100);
    let mut touch = Gt1151::new(bus, Rotation::Deg0, (122, 250));

    assert_eq!(touch.sample(), TouchSample::at(40, 100));

    let bus = touch.release();
    assert_eq!(bus.writes.len(), 2);
    assert_eq!(bus.writes[0], COORD_REG.to_be_bytes().to_vec());
    assert_eq!(bus.writes[1], clear_status());
}

#[test]
fn not_ready_keeps_previous_sample_without_clearing() {
    let bus = FakeBus::default().report(0x81, 10, 20).report(0x00, 0, 0);
    let mut touch = Gt1151::new(bus, Rotation::Deg0, (122, 250));

    assert_eq!(touch.sample(), TouchSample::at(10, 20));
    assert_eq!(touch.sample(), TouchSample::at(10, 20));

    let bus = touch.release();
    let clears = bus.writes.iter().filter(|w| **w == clear_status()).count();
    assert_eq!(clears, 1);
}

#[test]
fn ready_with_no_points_is_a_release() {
    let bus = FakeBus::default().report(0x81, 10, 20).report(0x80, 0, 0);
    let mut touch = Gt1151::new(bus, Rotation::Deg0, (122, 250));

    assert!(touch.sample().touched);
    assert!(!touch.sample().touched);
}

#[test]
fn coordinates_are_rotated_into_display_space() {
    let bus = FakeBus::default().report(0x81, 0, 0);
    let mut touch = Gt1151::new(bus, Rotation::Deg90, (122, 250));
    assert_eq!(touch.sample(), TouchSample::at(249, 0));
}

#[test]
fn bus_errors_are_logged_and_swallowed() {
    let _ = env_logger::builder().is_test(true).try_init();
    let bus = FakeBus::default().report(0x81, 5, 6).failure();
    let mut touch = Gt1151::new(bus, Rotation::Deg0, (122, 250));

    assert_eq!(touch.sample(), TouchSample::at(5, 6));
    assert_eq!(touch.sample(), TouchSample::at(5, 6));
}

#[test]
fn read_reports_bus_errors() {
    let bus = FakeBus::default().failure();
    let mut touch = Gt1151::new(bus, Rotation::Deg0, (122, 250));
    assert_eq!(touch.read(), Err(Error::I2c(ErrorKind::Other)));
}

#[test]
fn product_id_must_be_ascii_digits() {
    let bus = FakeBus::default().raw(b"1158").raw(&[0xff, 0, 1, 2]);
    let mut touch = Gt1151::new(bus, Rotation::Deg0, (122, 250));

    assert_eq!(touch.product_id().unwrap(), "1158");
    assert_eq!(touch.product_id(), Err(Error::ProductId([0xff, 0, 1, 2])));
}

#[test]
fn sleep_sends_command() {
    let mut touch = Gt1151::new(FakeBus::default(), Rotation::Deg0, (122, 250));
    touch.sleep().unwrap();
    assert_eq!(touch.release().writes, vec![vec![0x80, 0x40, 0x05]]);
}

