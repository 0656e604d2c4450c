use defmt::{info, unwrap, warn};
use embassy_futures::join::join3;
use embassy_rp::bind_interrupts;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::gpio::Input;
use embassy_rp::peripherals::{FLASH, PIN_25, USB, WATCHDOG};
use embassy_rp::usb::InterruptHandler;
use touchsense::{Mode, PinBank, SampleScheduler, StopSignal};

use crate::serial::{SerialPipe, SerialSink};
use crate::usb::Usb;
use crate::watchdog;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Peripherals shared by every sensor layout.
pub struct Board {
    pub usb: USB,
    pub flash: FLASH,
    pub watchdog: WATCHDOG,
    pub led: PIN_25,
}

/// Runs `mode` against `inputs` until the chip resets.
pub async fn run<const N: usize>(
    board: Board,
    mode: Mode,
    inputs: PinBank<Input<'static>, N>,
) {
    let mut unique_id = [0u8; 8];
    let mut flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(board.flash);
    if flash.blocking_unique_id(&mut unique_id).is_err() {
        warn!("flash unique id unavailable");
    }

    let pipe = SerialPipe::new();
    let usb_future = Usb::new(&pipe).run(board.usb, Irqs, &unique_id);

    let config = unwrap!(mode.config());
    info!("{} mode, {} channels", mode, config.channels().len());

    let mut scheduler =
        SampleScheduler::new(config, inputs, SerialSink::new(&pipe, mode.format()));
    if let Some(banner) = mode.banner() {
        scheduler = scheduler.with_banner(banner);
    }

    // Never raised on hardware; the loop only ends with a reset.
    let stop = StopSignal::new();

    join3(
        usb_future,
        scheduler.run(&stop),
        watchdog::keep_alive(board.watchdog, board.led),
    )
    .await;
}
