//! Load, read, and unload cycles against mocked buses.

use bmp280_chardev::{
    AcquisitionError, Address, Bmp280, Config, I2cTransport, InitError, LegacyI2cTransport, NodeError,
    SensorState, StoreError, TemperatureNode, TransportError,
};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_hal_1::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;

const CALIB: [u8; 6] = [0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC];

#[test]
fn legacy_bus_full_cycle() {
    use embedded_hal_mock::eh0::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    let i2c = I2cMock::new(&[
        I2cTransaction::write(0x77, vec![0xE0, 0xB6]),
        I2cTransaction::write(0x77, vec![0xF4, 0x27]),
        I2cTransaction::write_read(0x77, vec![0x88], CALIB.to_vec()),
        I2cTransaction::write_read(0x77, vec![0xFA], vec![0x7E, 0xED, 0x00]),
        // ut = 0x65A00, -7.51 C
        I2cTransaction::write_read(0x77, vec![0xFA], vec![0x65, 0xA0, 0x00]),
    ]);
    let sensor: Bmp280<NoopRawMutex, _> =
        Bmp280::new(LegacyI2cTransport::new(i2c, Address::Secondary), Config::default());
    sensor.initialize(&mut NoopDelay::new()).unwrap();

    let node = TemperatureNode::new(&sensor);
    let mut buf = [0u8; 16];
    let n = node.read(&mut buf, 0).unwrap();
    assert_eq!(&buf[..n], b"2508\n");

    let n = node.read(&mut buf, 0).unwrap();
    assert_eq!(&buf[..n], b"-751\n");

    sensor.release().release().done();
}

#[test]
fn failed_initialization_rejects_every_read() {
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    let i2c = I2cMock::new(&[
        I2cTransaction::write(0x76, vec![0xE0, 0xB6]),
        I2cTransaction::write(0x76, vec![0xF4, 0x27]).with_error(ErrorKind::Other),
    ]);
    let sensor: Bmp280<NoopRawMutex, _> = Bmp280::new(I2cTransport::new_primary(i2c), Config::default());

    assert_eq!(
        sensor.initialize(&mut NoopDelay::new()),
        Err(InitError::ConfigureFailed(TransportError::Bus(ErrorKind::Other)))
    );
    assert_eq!(sensor.state(), SensorState::Faulted);
    assert_eq!(sensor.calibration(), Err(StoreError::NotCalibrated));

    let node = TemperatureNode::new(&sensor);
    for _ in 0..3 {
        assert_eq!(
            node.read(&mut [0u8; 16], 0),
            Err(NodeError::Acquisition(AcquisitionError::NotReady))
        );
    }
    assert_eq!(sensor.read_raw(), Err(AcquisitionError::NotReady));

    sensor.release().release().done();
}

#[test]
fn raw_reading_matches_register_bytes() {
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    let i2c = I2cMock::new(&[
        I2cTransaction::write(0x76, vec![0xE0, 0xB6]),
        I2cTransaction::write(0x76, vec![0xF4, 0x27]),
        I2cTransaction::write_read(0x76, vec![0x88], CALIB.to_vec()),
        I2cTransaction::write_read(0x76, vec![0xFA], vec![0x7E, 0xED, 0x00]),
    ]);
    let sensor: Bmp280<NoopRawMutex, _> = Bmp280::new(I2cTransport::new_primary(i2c), Config::default());
    sensor.initialize(&mut NoopDelay::new()).unwrap();
    assert_eq!(sensor.read_raw().map(|raw| raw.value()), Ok(519888));
    sensor.release().release().done();
}
