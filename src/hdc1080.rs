use embedded_hal::{
    delay::DelayNs,
    i2c::{Error as _, ErrorKind, I2c},
};

use crate::decode;
use crate::error::HdcError;

/// Factory-default 7-bit bus address of the HDC1080.
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// Combined temperature + humidity measurement register (4-byte read).
const REG_MEASUREMENT: u8 = 0x00;
/// Manufacturer ID register (2-byte read).
const REG_MANUFACTURER_ID: u8 = 0xFE;
/// Device ID register (2-byte read).
const REG_DEVICE_ID: u8 = 0xFF;

/// Texas Instruments manufacturer ID.
const MANUFACTURER_ID: u16 = 0x5449;
/// HDC1080 device ID.
const DEVICE_ID: u16 = 0x1050;

/// Settle time after a NAKed read attempt. The sensor NAKs while its
/// conversion is still in flight; this is the datasheet conversion
/// time, not a tunable.
const NAK_SETTLE_MS: u32 = 20;

/// Pause between the reads of the drying loop.
const DRY_INTERVAL_MS: u32 = 10;
/// Number of self-heating reads performed by [`Hdc1080::dry`].
const DRY_ITERATIONS: u32 = 1000;

/// Driver for the HDC1080 temperature and humidity sensor.
pub struct Hdc1080<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    strict_id: bool,
}

/// Reading returned by the HDC1080 sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub relative_humidity: f64,
}

impl<I2C, D> Hdc1080<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Creates a new instance of the HDC1080 driver at the factory
    /// bus address 0x40.
    ///
    /// # Arguments
    ///
    /// * `i2c` - The I2C bus the sensor is attached to. Opening and
    ///   closing the bus is the platform HAL's job; the driver only
    ///   borrows it for transactions.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::new_with_address(i2c, delay, DEFAULT_ADDRESS)
    }

    /// Creates a driver for a sensor at a non-default bus address.
    pub fn new_with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Hdc1080 {
            i2c,
            delay,
            address,
            strict_id: false,
        }
    }

    /// Sets whether [`init`](Self::init) rejects a device whose ID
    /// registers do not match the HDC1080 datasheet values.
    ///
    /// Off by default, which tolerates compatible clones: the IDs are
    /// read and reported but not enforced.
    pub fn with_strict_identification(mut self, strict: bool) -> Self {
        self.strict_id = strict;
        self
    }

    /// Confirms the sensor answers by reading its device ID and
    /// manufacturer ID registers.
    ///
    /// In the default permissive mode the values are only reported (via
    /// `defmt`, when enabled); `init` succeeds as long as the bus
    /// transactions do. With strict identification enabled, values
    /// other than 0x1050 / 0x5449 fail with
    /// [`HdcError::UnknownDevice`].
    pub fn init(&mut self) -> Result<(), HdcError<I2C::Error>> {
        let device_id = self.read_register_u16(REG_DEVICE_ID)?;
        let manufacturer_id = self.read_register_u16(REG_MANUFACTURER_ID)?;
        let id_ok = device_id == DEVICE_ID && manufacturer_id == MANUFACTURER_ID;

        if id_ok {
            #[cfg(feature = "defmt")]
            defmt::info!(
                "hdc1080: identified device {=u16:#x} / manufacturer {=u16:#x}",
                device_id,
                manufacturer_id
            );
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "hdc1080: unexpected device {=u16:#x} / manufacturer {=u16:#x}",
                device_id,
                manufacturer_id
            );
        }

        if self.strict_id && !id_ok {
            return Err(HdcError::UnknownDevice {
                device_id,
                manufacturer_id,
            });
        }
        Ok(())
    }

    /// Placeholder for a software reset.
    ///
    /// The HDC1080 resets through a configuration register write that
    /// this driver does not implement yet; no bytes are sent on the
    /// wire and the call always succeeds.
    pub fn reset(&mut self) -> Result<(), HdcError<I2C::Error>> {
        Ok(())
    }

    /// Reads the current temperature in degrees Celsius.
    pub fn read_temperature(&mut self) -> Result<f64, HdcError<I2C::Error>> {
        Ok(decode::temperature_from_raw(self.read_measurement()?))
    }

    /// Reads the current relative humidity in percent.
    pub fn read_humidity(&mut self) -> Result<f64, HdcError<I2C::Error>> {
        Ok(decode::humidity_from_raw(self.read_measurement()?))
    }

    /// Reads temperature and humidity together.
    ///
    /// Issues a single 4-byte measurement read and decodes both values
    /// from it, so the pair always comes from one conversion instead of
    /// two separate bus transactions that could straddle a measurement.
    pub fn read(&mut self) -> Result<Reading, HdcError<I2C::Error>> {
        let raw = self.read_measurement()?;
        Ok(Reading {
            temperature: decode::temperature_from_raw(raw),
            relative_humidity: decode::humidity_from_raw(raw),
        })
    }

    /// Drives off residual moisture by self-heating the sensor with
    /// 1000 back-to-back temperature reads, 10 ms apart.
    ///
    /// Failures of intermediate reads are discarded; the loop always
    /// runs to completion and the result of the final read is returned
    /// as-is, error included.
    pub fn dry(&mut self) -> Result<f64, HdcError<I2C::Error>> {
        let mut last = self.read_temperature();
        self.delay.delay_ms(DRY_INTERVAL_MS);
        for _ in 1..DRY_ITERATIONS {
            last = self.read_temperature();
            self.delay.delay_ms(DRY_INTERVAL_MS);
        }
        last
    }

    /// Consumes the driver and hands back the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Triggers and reads one combined measurement, returning the raw
    /// 32-bit sample word.
    fn read_measurement(&mut self) -> Result<u32, HdcError<I2C::Error>> {
        let mut buf = [0u8; 4];
        self.read_register(REG_MEASUREMENT, &mut buf)?;
        decode::combined_sample(&buf)
    }

    /// Reads a 2-byte register as a big-endian word.
    fn read_register_u16(&mut self, reg: u8) -> Result<u16, HdcError<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.read_register(reg, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Fills `buf` from the register selected by `reg`.
    ///
    /// Tries a combined write-read first. The sensor NAKs the combined
    /// transaction while a conversion is in flight, in which case the
    /// pointer is written on its own, the conversion time is waited
    /// out, and a plain read fetches the result. The fallback runs at
    /// most once per call; any further failure propagates.
    fn read_register(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), HdcError<I2C::Error>> {
        match self.i2c.write_read(self.address, &[reg], buf) {
            Ok(()) => Ok(()),
            Err(e) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "hdc1080: NAK on combined read of register {=u8:#x}, retrying after settle",
                    reg
                );
                self.i2c.write(self.address, &[reg])?;
                self.delay.delay_ms(NAK_SETTLE_MS);
                self.i2c.read(self.address, buf)?;
                Ok(())
            }
            Err(e) => Err(HdcError::I2c(e)),
        }
    }
}
