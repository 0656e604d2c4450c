use embassy_sync::{blocking_mutex::raw::NoopRawMutex, pipe::Pipe};

use crate::{Error, LineFormat, OutputSink, Result, SampleRecord, LINE_ENDING};

/// Sink that queues whole lines into a byte pipe without waiting.
///
/// If the reader on the other end is not draining the pipe and a full line no
/// longer fits, the line is dropped and the pipe is left untouched.
pub struct PipeSink<'p, const N: usize> {
    pipe: &'p Pipe<NoopRawMutex, N>,
    format: LineFormat,
}

impl<'p, const N: usize> PipeSink<'p, N> {
    pub fn new(pipe: &'p Pipe<NoopRawMutex, N>, format: LineFormat) -> Self {
        Self { pipe, format }
    }

    pub fn format(&self) -> LineFormat {
        self.format
    }

    fn push_line(&self, line: &str) -> Result<()> {
        if self.pipe.free_capacity() < line.len() + LINE_ENDING.len() {
            return Err(Error::SinkUnavailable);
        }
        for bytes in [line.as_bytes(), LINE_ENDING.as_bytes()] {
            match self.pipe.try_write(bytes) {
                Ok(written) if written == bytes.len() => {}
                _ => return Err(Error::SinkUnavailable),
            }
        }
        Ok(())
    }
}

impl<const N: usize> OutputSink for PipeSink<'_, N> {
    async fn emit(&mut self, record: &SampleRecord) -> Result<()> {
        let line = self.format.render(record)?;
        self.push_line(&line)
    }

    async fn announce(&mut self, message: &str) -> Result<()> {
        self.push_line(message)
    }
}

/// Reads a pipe in chunks of at most `C` bytes for a packet transport.
///
/// A chunk stays pending until [`PacketDrain::mark_sent`] is called, so a
/// chunk whose send failed is offered again on the next
/// [`PacketDrain::next_chunk`] instead of being lost.
pub struct PacketDrain<'p, const N: usize, const C: usize> {
    pipe: &'p Pipe<NoopRawMutex, N>,
    buf: [u8; C],
    pending: usize,
}

impl<'p, const N: usize, const C: usize> PacketDrain<'p, N, C> {
    pub fn new(pipe: &'p Pipe<NoopRawMutex, N>) -> Self {
        Self {
            pipe,
            buf: [0; C],
            pending: 0,
        }
    }

    /// Returns the unsent chunk, waiting for bytes if there is none.
    pub async fn next_chunk(&mut self) -> &[u8] {
        if self.pending == 0 {
            self.pending = self.pipe.read(&mut self.buf).await;
        }
        &self.buf[..self.pending]
    }

    pub fn mark_sent(&mut self) {
        self.pending = 0;
    }

    pub fn has_pending(&self) -> bool {
        self.pending > 0
    }
}
