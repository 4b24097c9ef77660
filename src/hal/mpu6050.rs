//! MPU-6050 driver over any blocking I2C bus.
//!
//! Generic over the bus so the sensor can sit behind a shared-bus proxy
//! next to the OLED. Runs on the host against a fake bus.

use crate::accel::{MpuRawData, ACCEL_XOUT_H, PWR_MGMT_1, RAW_FRAME_LEN};
use crate::traits::Accelerometer;
use embedded_hal_02::blocking::i2c;
use log::info;

/// MPU-6050 at a fixed address on `I2C`.
///
/// ```ignore
/// let bus = shared_bus::new_std!(I2cDriver<'static> = i2c).unwrap();
/// let accel = Mpu6050::new(bus.acquire_i2c(), MPU6050_ADDR);
/// let display = Esp32Display::new(bus.acquire_i2c())?;
/// ```
pub struct Mpu6050<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Mpu6050<I2C> {
    /// Targets the sensor at `address`. Nothing is sent until `init`.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Sensor address on the bus.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>, E> Accelerometer for Mpu6050<I2C> {
    type Error = E;

    fn init(&mut self) -> Result<(), Self::Error> {
        // Clear the sleep bit
        self.i2c.write(self.address, &[PWR_MGMT_1, 0x00])?;
        info!("accel: MPU-6050 awake at {:#04x}", self.address);
        Ok(())
    }

    fn read_raw(&mut self) -> Result<MpuRawData, Self::Error> {
        let mut frame = [0u8; RAW_FRAME_LEN];
        self.i2c.write_read(self.address, &[ACCEL_XOUT_H], &mut frame)?;
        Ok(MpuRawData::from_be_bytes(&frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accel::MPU6050_ADDR;
    use alloc::vec::Vec;

    /// Register file behind one address, recording every write.
    struct FakeBus {
        registers: [u8; 128],
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl FakeBus {
        fn new() -> Self {
            Self {
                registers: [0; 128],
                writes: Vec::new(),
                fail: false,
            }
        }
    }

    impl i2c::Write for FakeBus {
        type Error = ();

        fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes.push((address, bytes.to_vec()));
            Ok(())
        }
    }

    impl i2c::WriteRead for FakeBus {
        type Error = ();

        fn write_read(&mut self, address: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), ()> {
            if self.fail || address != MPU6050_ADDR {
                return Err(());
            }
            let start = usize::from(bytes[0]);
            buffer.copy_from_slice(&self.registers[start..start + buffer.len()]);
            Ok(())
        }
    }

    #[test]
    fn init_clears_sleep_bit() {
        let mut accel = Mpu6050::new(FakeBus::new(), MPU6050_ADDR);
        accel.init().unwrap();
        let bus = accel.release();
        assert_eq!(bus.writes, [(MPU6050_ADDR, alloc::vec![PWR_MGMT_1, 0x00])]);
    }

    #[test]
    fn read_decodes_register_burst() {
        let mut bus = FakeBus::new();
        let start = usize::from(ACCEL_XOUT_H);
        // x = 0x0102, y = -2, temp = 0x0340
        bus.registers[start..start + 4].copy_from_slice(&[0x01, 0x02, 0xFF, 0xFE]);
        bus.registers[start + 6..start + 8].copy_from_slice(&[0x03, 0x40]);

        let mut accel = Mpu6050::new(bus, MPU6050_ADDR);
        let raw = accel.read_raw().unwrap();
        assert_eq!(raw.x_acc, 0x0102);
        assert_eq!(raw.y_acc, -2);
        assert_eq!(raw.temp, 0x0340);
        assert_eq!(raw.z_gyro, 0);
    }

    #[test]
    fn bus_errors_propagate() {
        let bus = FakeBus {
            fail: true,
            ..FakeBus::new()
        };
        let mut accel = Mpu6050::new(bus, MPU6050_ADDR);
        assert_eq!(accel.init(), Err(()));
        assert_eq!(accel.read_raw(), Err(()));
    }

    #[test]
    fn wrong_address_is_not_answered() {
        let mut accel = Mpu6050::new(FakeBus::new(), 0x69);
        assert_eq!(accel.address(), 0x69);
        assert!(accel.read_raw().is_err());
    }
}
