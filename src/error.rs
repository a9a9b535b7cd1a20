/// Possible errors from the HDC1080 driver.
#[derive(Debug, PartialEq, Eq)]
pub enum HdcError<E> {
    /// The measurement register returned fewer bytes than the sample
    /// width requires, so no value could be decoded.
    TruncatedSample,
    /// Strict identification was requested and the ID registers did not
    /// match the HDC1080 datasheet values.
    UnknownDevice {
        /// Contents of the device ID register (0xFF).
        device_id: u16,
        /// Contents of the manufacturer ID register (0xFE).
        manufacturer_id: u16,
    },
    /// Error from the I2C bus.
    I2c(E),
}

impl<E> From<E> for HdcError<E> {
    fn from(value: E) -> Self {
        Self::I2c(value)
    }
}
