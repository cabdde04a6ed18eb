//! Serial device transport.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;

use eekv_runtime::StreamTransport;

use crate::ShellError;

/// Transport over an open serial device.
pub type SerialTransport = StreamTransport<File, BufWriter<File>>;

/// termios speed constant for `baud`, if the platform has one.
pub fn baud_constant(baud: u32) -> Option<libc::speed_t> {
    let speed = match baud {
        1200 => libc::B1200,
        2400 => libc::B2400,
        4800 => libc::B4800,
        9600 => libc::B9600,
        19_200 => libc::B19200,
        38_400 => libc::B38400,
        57_600 => libc::B57600,
        115_200 => libc::B115200,
        230_400 => libc::B230400,
        _ => return None,
    };
    Some(speed)
}

/// Open `path` and configure it raw, 8 data bits, no parity, 1 stop bit.
///
/// Reads block until at least one byte arrives; there is no timeout.
pub fn open_serial(path: &Path, baud: u32) -> Result<SerialTransport, ShellError> {
    let speed = baud_constant(baud).ok_or(ShellError::UnsupportedBaud(baud))?;
    let serial_error = |source| ShellError::Serial {
        path: path.to_path_buf(),
        source,
    };

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(libc::O_NOCTTY)
        .open(path)
        .map_err(serial_error)?;
    configure_8n1(file.as_raw_fd(), speed).map_err(serial_error)?;
    let writer = file.try_clone().map_err(serial_error)?;

    tracing::info!(device = %path.display(), baud, "serial device ready");
    Ok(StreamTransport::new(file, BufWriter::new(writer)))
}

fn configure_8n1(fd: RawFd, speed: libc::speed_t) -> io::Result<()> {
    // SAFETY: termios is plain data; tcgetattr fills it before use.
    let mut tty: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut tty) } != 0 {
        return Err(io::Error::last_os_error());
    }

    unsafe { libc::cfmakeraw(&mut tty) };
    tty.c_cflag &= !(libc::PARENB | libc::CSTOPB | libc::CSIZE);
    tty.c_cflag |= libc::CS8 | libc::CREAD | libc::CLOCAL;
    tty.c_cc[libc::VMIN] = 1;
    tty.c_cc[libc::VTIME] = 0;

    let rc = unsafe {
        if libc::cfsetispeed(&mut tty, speed) != 0 || libc::cfsetospeed(&mut tty, speed) != 0 {
            -1
        } else {
            libc::tcsetattr(fd, libc::TCSANOW, &tty)
        }
    };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_rates_are_supported() {
        assert_eq!(baud_constant(115_200), Some(libc::B115200));
        assert_eq!(baud_constant(9600), Some(libc::B9600));
        assert_eq!(baud_constant(12_345), None);
    }

    #[test]
    fn unsupported_rate_fails_before_opening() {
        let err = open_serial(Path::new("/nonexistent/tty"), 1234).unwrap_err();
        assert!(matches!(err, ShellError::UnsupportedBaud(1234)));
    }

    #[test]
    fn missing_device_is_reported() {
        let err = open_serial(Path::new("/nonexistent/tty"), 115_200).unwrap_err();
        assert!(matches!(err, ShellError::Serial { .. }));
    }

    #[test]
    fn regular_file_is_not_a_tty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = open_serial(file.path(), 115_200).unwrap_err();
        assert!(matches!(err, ShellError::Serial { .. }));
    }
}
