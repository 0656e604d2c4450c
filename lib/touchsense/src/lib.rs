#![cfg_attr(not(feature = "std"), no_std)]

use core::fmt::Display;

// This must stay first so the logging macros are visible to every other module.
#[macro_use]
mod fmt;

mod config;
mod input;
mod pipe;
mod record;
mod scheduler;
mod sink;

pub use config::{Channel, Mode, ScheduleConfig, MAX_CHANNELS};
pub use input::{DigitalInputSource, PinBank};
pub use pipe::{PacketDrain, PipeSink};
pub use record::{Sample, SampleRecord};
pub use scheduler::{RunState, SampleScheduler, StopSignal};
pub use sink::{Line, LineFormat, OutputSink, WriterSink, LINE_ENDING, MAX_LINE_LEN};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    InvalidChannel(&'static str),
    SinkUnavailable,
    LineOverflow,
    NoChannels,
    TooManyChannels(usize),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidChannel(id) => write!(f, "channel {} cannot be read", id),
            Self::SinkUnavailable => write!(f, "output sink unavailable"),
            Self::LineOverflow => write!(f, "output line too long"),
            Self::NoChannels => write!(f, "no channels configured"),
            Self::TooManyChannels(count) => {
                write!(f, "{} channels configured, at most {}", count, MAX_CHANNELS)
            }
        }
    }
}
