use embassy_rp::gpio::{self, AnyPin, Pin, Pull};
use touchsense::{Mode, PinBank, Result};

/// Configures `pin` as a touch sensor input.
///
/// The sensor modules drive the line push-pull, so no pull resistor is
/// enabled. The Schmitt trigger keeps slow edges from chattering.
pub fn touch_input(pin: AnyPin) -> gpio::Input<'static> {
    let mut input = gpio::Input::new(pin, Pull::None);
    input.set_schmitt(true);
    input
}

/// Builds the input bank for `mode`. `pins` must follow the mode's channel
/// order.
pub fn touch_inputs<const N: usize>(
    mode: Mode,
    pins: [AnyPin; N],
) -> Result<PinBank<gpio::Input<'static>, N>> {
    let channels = mode.channels();
    defmt::assert_eq!(channels.len(), N);

    let mut bank = PinBank::new();
    for (channel, pin) in channels.iter().zip(pins) {
        defmt::assert_eq!(channel.pin, pin.pin());
        bank.register(channel.id, touch_input(pin))?;
    }
    Ok(bank)
}
