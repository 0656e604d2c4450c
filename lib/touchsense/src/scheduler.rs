use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::NoopRawMutex, signal::Signal};
use embassy_time::Timer;

use crate::{DigitalInputSource, OutputSink, Result, Sample, SampleRecord, ScheduleConfig};

/// Raised to make [`SampleScheduler::run`] return. Checked before every tick
/// and raced against the interval sleep.
pub type StopSignal = Signal<NoopRawMutex, ()>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    Idle,
    Running,
    Stopped,
}

/// Fixed-rate sampling loop.
///
/// Each tick reads every configured channel in order, hands the resulting
/// record to the sink and then sleeps for the configured interval. A tick
/// whose read or emit fails is logged and dropped; the loop carries on.
pub struct SampleScheduler<I: DigitalInputSource, O: OutputSink> {
    config: ScheduleConfig,
    input: I,
    sink: O,
    banner: Option<&'static str>,
    state: RunState,
}

impl<I: DigitalInputSource, O: OutputSink> SampleScheduler<I, O> {
    pub fn new(config: ScheduleConfig, input: I, sink: O) -> Self {
        Self {
            config,
            input,
            sink,
            banner: None,
            state: RunState::Idle,
        }
    }

    /// Announces `banner` through the sink once, before the first tick.
    pub fn with_banner(mut self, banner: &'static str) -> Self {
        self.banner = Some(banner);
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn sink(&self) -> &O {
        &self.sink
    }

    pub fn into_parts(self) -> (I, O) {
        (self.input, self.sink)
    }

    pub async fn run(&mut self, stop: &StopSignal) {
        self.state = RunState::Running;
        info!(
            "sampling {} channels every {} ms",
            self.config.channels().len(),
            self.config.interval().as_millis()
        );

        if let Some(banner) = self.banner {
            if let Err(e) = self.sink.announce(banner).await {
                warn!("banner dropped: {}", e);
            }
        }

        loop {
            if stop.signaled() {
                break;
            }

            match self.tick().await {
                Ok(()) => debug!("tick emitted"),
                Err(e) => warn!("tick dropped: {}", e),
            }

            if let Either::Second(()) =
                select(Timer::after(self.config.interval()), stop.wait()).await
            {
                break;
            }
        }

        self.state = RunState::Stopped;
        info!("sampling stopped");
    }

    /// Samples every channel and emits one record. Nothing is emitted if any
    /// read fails.
    pub async fn tick(&mut self) -> Result<()> {
        let record = self.sample().await?;
        self.sink.emit(&record).await
    }

    async fn sample(&mut self) -> Result<SampleRecord> {
        let mut record = SampleRecord::new();
        for channel in self.config.channels() {
            let level = self.input.read(channel).await?;
            record.push(Sample::new(channel.id, level))?;
        }
        Ok(record)
    }
}
