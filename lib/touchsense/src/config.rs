use embassy_time::Duration;
use heapless::Vec;

use crate::{Error, LineFormat, Result};

/// Upper bound on the number of channels a single scheduler samples.
pub const MAX_CHANNELS: usize = 8;

/// One sensor input.
///
/// `pin` is the platform's GPIO number. The sampling core never looks at it;
/// it is carried so adapters and logs can tie a channel back to the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    pub id: &'static str,
    pub pin: u8,
}

impl Channel {
    pub const fn new(id: &'static str, pin: u8) -> Self {
        Self { id, pin }
    }
}

/// Fixed channel list and tick interval, built once at startup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleConfig {
    channels: Vec<Channel, MAX_CHANNELS>,
    interval: Duration,
}

impl ScheduleConfig {
    pub fn new(channels: &[Channel], interval: Duration) -> Result<Self> {
        if channels.is_empty() {
            return Err(Error::NoChannels);
        }
        let channels =
            Vec::from_slice(channels).map_err(|_| Error::TooManyChannels(channels.len()))?;
        Ok(Self { channels, interval })
    }

    /// Channels in sampling (and output column) order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

static SINGLE_TOUCH_CHANNELS: [Channel; 1] = [Channel::new("TOUCH", 15)];

static FIVE_TOUCH_CHANNELS: [Channel; 5] = [
    Channel::new("S1", 15),
    Channel::new("S2", 4),
    Channel::new("S3", 18),
    Channel::new("S4", 19),
    Channel::new("S5", 21),
];

/// The two shipped sensor layouts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// One sensor on GPIO15, reported as `Touched!` / `Not touched`.
    SingleTouch,
    /// Five sensors reported as `S1: 0  S2: 1 ...`.
    FiveTouch,
}

impl Mode {
    pub fn channels(&self) -> &'static [Channel] {
        match self {
            Self::SingleTouch => &SINGLE_TOUCH_CHANNELS,
            Self::FiveTouch => &FIVE_TOUCH_CHANNELS,
        }
    }

    pub const fn interval(&self) -> Duration {
        match self {
            Self::SingleTouch => Duration::from_millis(100),
            Self::FiveTouch => Duration::from_millis(150),
        }
    }

    pub const fn format(&self) -> LineFormat {
        match self {
            Self::SingleTouch => LineFormat::TouchLabel,
            Self::FiveTouch => LineFormat::ChannelLevels,
        }
    }

    /// Line printed once before the first tick.
    pub const fn banner(&self) -> Option<&'static str> {
        match self {
            Self::SingleTouch => None,
            Self::FiveTouch => Some("Touch sensors initialized..."),
        }
    }

    pub fn config(&self) -> Result<ScheduleConfig> {
        ScheduleConfig::new(self.channels(), self.interval())
    }
}
