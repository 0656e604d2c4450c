use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{PIN_25, WATCHDOG};
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Duration, Ticker};

const FEED_PERIOD: Duration = Duration::from_millis(500);

/// Feeds the hardware watchdog and blinks the status LED.
///
/// Runs on the same executor as the sampling loop, so a loop that stops
/// yielding starves this task and the chip resets.
pub async fn keep_alive(watchdog: WATCHDOG, led: PIN_25) -> ! {
    let mut watchdog = Watchdog::new(watchdog);
    watchdog.start(FEED_PERIOD * 2);

    let mut led = Output::new(led, Level::Low);

    let mut ticker = Ticker::every(FEED_PERIOD);
    loop {
        watchdog.feed();
        led.toggle();
        ticker.next().await;
    }
}
