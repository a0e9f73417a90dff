use std::time::Duration;

#[cfg(windows)]
pub use serialport::COMPort as SerialPortImpl;

#[cfg(unix)]
pub use serialport::TTYPort as SerialPortImpl;

/// Line rate of the dock connector serial link: 19200 baud, 8N1.
const BAUD_RATE: u32 = 19_200;

/// Opens a serial port to the player, depending on the local operating system.
///
/// # Errors
/// For errors please refer to [`SerialPort::open()`](serialport::SerialPort) and [`serialport::new()`]
pub fn open<'a>(path: impl Into<std::borrow::Cow<'a, str>>) -> serialport::Result<SerialPortImpl> {
    SerialPortImpl::open(&serialport::new(path, BAUD_RATE).timeout(Duration::from_millis(100)))
}
