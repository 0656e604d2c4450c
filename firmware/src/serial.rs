use embassy_sync::{blocking_mutex::raw::NoopRawMutex, pipe::Pipe};
use touchsense::{PacketDrain, PipeSink};

pub const SERIAL_PIPE_LEN: usize = 256;

/// Bytes waiting for the USB serial port.
pub type SerialPipe = Pipe<NoopRawMutex, SERIAL_PIPE_LEN>;

/// Queues whole lines for the USB serial task without waiting.
pub type SerialSink<'p> = PipeSink<'p, SERIAL_PIPE_LEN>;

/// Reads queued bytes back out in packets of at most `C` bytes.
pub type SerialDrain<'p, const C: usize> = PacketDrain<'p, SERIAL_PIPE_LEN, C>;
