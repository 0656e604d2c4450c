use core::fmt::Write as _;
use embedded_io_async::Write;
use heapless::String;

use crate::{Error, Result, SampleRecord, MAX_CHANNELS};

/// Longest line a record can render to: eight `"<id>: <0|1>"` columns with
/// ids up to eight characters.
pub const MAX_LINE_LEN: usize = MAX_CHANNELS * 13;

/// Terminator appended to every line, matching what serial monitors expect.
pub const LINE_ENDING: &str = "\r\n";

pub type Line = String<MAX_LINE_LEN>;

/// How a record is rendered for a human watching the serial console.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineFormat {
    /// `Touched!` when any channel reads HIGH, otherwise `Not touched`.
    TouchLabel,
    /// `<id>: <0|1>` columns separated by two spaces.
    ChannelLevels,
}

impl LineFormat {
    const TOUCHED: &'static str = "Touched!";
    const NOT_TOUCHED: &'static str = "Not touched";
    const COLUMN_SEPARATOR: &'static str = "  ";

    pub fn render(&self, record: &SampleRecord) -> Result<Line> {
        let mut line = Line::new();
        match self {
            Self::TouchLabel => {
                let touched = record.samples().iter().any(|sample| sample.level);
                let label = if touched {
                    Self::TOUCHED
                } else {
                    Self::NOT_TOUCHED
                };
                line.push_str(label).map_err(|_| Error::LineOverflow)?;
            }
            Self::ChannelLevels => {
                for (index, sample) in record.samples().iter().enumerate() {
                    if index > 0 {
                        line.push_str(Self::COLUMN_SEPARATOR)
                            .map_err(|_| Error::LineOverflow)?;
                    }
                    write!(line, "{}: {}", sample.channel_id, u8::from(sample.level))
                        .map_err(|_| Error::LineOverflow)?;
                }
            }
        }
        Ok(line)
    }
}

/// Destination for formatted sample records.
///
/// Lines must reach the transport in the order they are handed over. A sink
/// that cannot take a line right now reports [`Error::SinkUnavailable`] and
/// drops it; it never queues it for later.
pub trait OutputSink {
    #[allow(async_fn_in_trait)]
    async fn emit(&mut self, record: &SampleRecord) -> Result<()>;

    /// Emits a one-off informational line such as a startup banner.
    #[allow(async_fn_in_trait)]
    async fn announce(&mut self, message: &str) -> Result<()>;
}

/// Sink that writes rendered lines to any async byte writer.
pub struct WriterSink<W: Write> {
    writer: W,
    format: LineFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: LineFormat) -> Self {
        Self { writer, format }
    }

    pub fn format(&self) -> LineFormat {
        self.format
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(|_| Error::SinkUnavailable)?;
        self.writer
            .write_all(LINE_ENDING.as_bytes())
            .await
            .map_err(|_| Error::SinkUnavailable)
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    async fn emit(&mut self, record: &SampleRecord) -> Result<()> {
        let line = self.format.render(record)?;
        self.write_line(&line).await
    }

    async fn announce(&mut self, message: &str) -> Result<()> {
        self.write_line(message).await
    }
}
