use heapless::Vec;

use crate::{Error, Result, MAX_CHANNELS};

/// Level read from one channel during one tick. `true` is HIGH.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub channel_id: &'static str,
    pub level: bool,
}

impl Sample {
    pub const fn new(channel_id: &'static str, level: bool) -> Self {
        Self { channel_id, level }
    }
}

/// Every channel's sample for a single tick, in configuration order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleRecord {
    samples: Vec<Sample, MAX_CHANNELS>,
}

impl SampleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_samples(samples: &[Sample]) -> Result<Self> {
        let samples =
            Vec::from_slice(samples).map_err(|_| Error::TooManyChannels(samples.len()))?;
        Ok(Self { samples })
    }

    pub fn push(&mut self, sample: Sample) -> Result<()> {
        self.samples
            .push(sample)
            .map_err(|_| Error::TooManyChannels(MAX_CHANNELS + 1))
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn level(&self, channel_id: &str) -> Option<bool> {
        self.samples
            .iter()
            .find(|sample| sample.channel_id == channel_id)
            .map(|sample| sample.level)
    }
}
