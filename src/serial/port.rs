//! Serial port sessions
//!
//! Opens the device named by each interface descriptor and applies its line
//! settings. The OS side sits behind [`SerialIo`] so the registry logic does
//! not care whether it talks to `tokio-serial` or to something scripted.

use crate::error::{Error, Result};
use crate::interface::settings::DEFAULT_BAUD_RATE;
use crate::interface::{CharSize, InterfaceDescriptor, LineSettings, Parity, StopBits};
use log::{debug, info};
use std::fmt;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_serial::{SerialPort, SerialPortBuilderExt, SerialStream};

/// Capacity of the per-session read buffer
pub const READ_BUFFER_SIZE: usize = 1024;

/// One configuration option applied after a port is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortOption {
    BaudRate(u32),
    Parity(Parity),
    StopBits(StopBits),
    CharSize(CharSize),
}

impl PortOption {
    /// Options for `settings`, in the order they are applied
    pub fn sequence(settings: &LineSettings) -> [PortOption; 4] {
        [
            PortOption::BaudRate(settings.baud_rate),
            PortOption::Parity(settings.parity),
            PortOption::StopBits(settings.stop_bits),
            PortOption::CharSize(settings.char_size),
        ]
    }

    /// Human readable option name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            PortOption::BaudRate(_) => "baud rate",
            PortOption::Parity(_) => "parity",
            PortOption::StopBits(_) => "stop bits",
            PortOption::CharSize(_) => "character size",
        }
    }
}

impl fmt::Display for PortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortOption::BaudRate(baud) => write!(f, "{} {}", self.name(), baud),
            PortOption::Parity(parity) => write!(f, "{} {}", self.name(), parity),
            PortOption::StopBits(stop_bits) => write!(f, "{} {}", self.name(), stop_bits),
            PortOption::CharSize(size) => write!(f, "{} {}", self.name(), size),
        }
    }
}

/// Asynchronous serial I/O provider
pub trait SerialIo {
    type Handle: AsyncRead + Unpin;

    /// Open the device at `path`
    fn open(&mut self, path: &str) -> io::Result<Self::Handle>;

    /// Apply one configuration option to an open handle
    fn set_option(&mut self, handle: &mut Self::Handle, option: PortOption) -> io::Result<()>;
}

/// Native serial ports through `tokio-serial`
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSerialIo;

impl SerialIo for TokioSerialIo {
    type Handle = SerialStream;

    fn open(&mut self, path: &str) -> io::Result<SerialStream> {
        tokio_serial::new(path, DEFAULT_BAUD_RATE)
            .open_native_async()
            .map_err(io::Error::from)
    }

    fn set_option(&mut self, handle: &mut SerialStream, option: PortOption) -> io::Result<()> {
        let result = match option {
            PortOption::BaudRate(baud) => handle.set_baud_rate(baud),
            PortOption::Parity(parity) => handle.set_parity(parity.into()),
            PortOption::StopBits(StopBits::OnePointFive) => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "1.5 stop bits are not supported by this platform",
                ));
            }
            PortOption::StopBits(StopBits::One) => handle.set_stop_bits(tokio_serial::StopBits::One),
            PortOption::StopBits(StopBits::Two) => handle.set_stop_bits(tokio_serial::StopBits::Two),
            PortOption::CharSize(size) => handle.set_data_bits(size.into()),
        };

        result.map_err(io::Error::from)
    }
}

impl From<Parity> for tokio_serial::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => tokio_serial::Parity::None,
            Parity::Odd => tokio_serial::Parity::Odd,
            Parity::Even => tokio_serial::Parity::Even,
        }
    }
}

impl From<CharSize> for tokio_serial::DataBits {
    fn from(size: CharSize) -> Self {
        match size {
            CharSize::Seven => tokio_serial::DataBits::Seven,
            CharSize::Eight => tokio_serial::DataBits::Eight,
        }
    }
}

/// An open, configured port together with its read buffer
pub struct PortSession<H> {
    descriptor: InterfaceDescriptor,
    handle: H,
    buffer: Box<[u8]>,
}

impl<H: AsyncRead + Unpin> PortSession<H> {
    pub fn new(descriptor: InterfaceDescriptor, handle: H) -> Self {
        Self {
            descriptor,
            handle,
            buffer: vec![0u8; READ_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    pub fn descriptor(&self) -> &InterfaceDescriptor {
        &self.descriptor
    }

    /// Wait for the next chunk of input
    ///
    /// The session travels with the pending read and comes back with its
    /// result, so a session never has more than one read in flight.
    pub async fn read_next(mut self) -> (Self, io::Result<usize>) {
        let result = self.handle.read(&mut self.buffer[..]).await;
        (self, result)
    }

    /// Bytes delivered by the last read of `len` bytes
    pub fn received(&self, len: usize) -> &[u8] {
        &self.buffer[..len]
    }
}

/// Open and configure the port for one descriptor
///
/// A failing option aborts the open; the half-configured handle is simply
/// dropped.
pub fn open<S: SerialIo>(io: &mut S, descriptor: InterfaceDescriptor) -> Result<PortSession<S::Handle>> {
    let device = descriptor.device();

    debug!("Opening {}", device);
    let mut handle = io
        .open(device)
        .map_err(|e| Error::device_open(device, e))?;

    for option in PortOption::sequence(descriptor.settings()) {
        debug!("Setting {} on {}", option, device);
        io.set_option(&mut handle, option)
            .map_err(|e| Error::option_set(device, option.name(), e))?;
    }

    info!(
        "Opened {} as {} ({})",
        device,
        descriptor.alias(),
        descriptor.settings()
    );

    Ok(PortSession::new(descriptor, handle))
}

/// Open every descriptor in order, stopping at the first failure
pub fn open_all<S: SerialIo>(
    io: &mut S,
    descriptors: Vec<InterfaceDescriptor>,
) -> Result<Vec<PortSession<S::Handle>>> {
    if descriptors.is_empty() {
        return Err(Error::NoInterfaces);
    }

    descriptors
        .into_iter()
        .map(|descriptor| open(io, descriptor))
        .collect()
}
