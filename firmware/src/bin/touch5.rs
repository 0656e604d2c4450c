#![no_std]
#![no_main]

use defmt::unwrap;
use embassy_executor::Spawner;
use embassy_rp::gpio::Pin;
use touchsense::Mode;
use touchsense_firmware::app::{self, Board};
use touchsense_firmware::gpio_input::touch_inputs;

use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let inputs = unwrap!(touch_inputs(
        Mode::FiveTouch,
        [
            p.PIN_15.degrade(),
            p.PIN_4.degrade(),
            p.PIN_18.degrade(),
            p.PIN_19.degrade(),
            p.PIN_21.degrade(),
        ],
    ));

    let board = Board {
        usb: p.USB,
        flash: p.FLASH,
        watchdog: p.WATCHDOG,
        led: p.PIN_25,
    };

    app::run(board, Mode::FiveTouch, inputs).await;
}
