use embedded_hal::digital::InputPin;
use heapless::Vec;

use crate::{Channel, Error, Result};

/// Source of instantaneous logic levels, one read per channel per tick.
pub trait DigitalInputSource {
    /// Returns `true` when the channel reads HIGH.
    ///
    /// Fails with [`Error::InvalidChannel`] when the channel was never
    /// registered with this source or its pin cannot be read.
    #[allow(async_fn_in_trait)]
    async fn read(&mut self, channel: &Channel) -> Result<bool>;
}

/// Input pins looked up by channel id.
pub struct PinBank<P: InputPin, const N: usize> {
    pins: Vec<(&'static str, P), N>,
}

impl<P: InputPin, const N: usize> PinBank<P, N> {
    pub fn new() -> Self {
        Self { pins: Vec::new() }
    }

    pub fn register(&mut self, channel_id: &'static str, pin: P) -> Result<()> {
        self.pins
            .push((channel_id, pin))
            .map_err(|_| Error::TooManyChannels(N + 1))
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

impl<P: InputPin, const N: usize> Default for PinBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin, const N: usize> DigitalInputSource for PinBank<P, N> {
    async fn read(&mut self, channel: &Channel) -> Result<bool> {
        let (_, pin) = self
            .pins
            .iter_mut()
            .find(|(id, _)| *id == channel.id)
            .ok_or(Error::InvalidChannel(channel.id))?;
        pin.is_high().map_err(|_| Error::InvalidChannel(channel.id))
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    use super::*;

    struct FakePin {
        level: bool,
    }

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
            Ok(self.level)
        }

        fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
            Ok(!self.level)
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> core::result::Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> core::result::Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    #[futures_test::test]
    async fn reads_registered_pins_by_id() {
        let mut bank = PinBank::<FakePin, 2>::new();
        bank.register("S1", FakePin { level: true }).unwrap();
        bank.register("S2", FakePin { level: false }).unwrap();

        assert_eq!(bank.read(&Channel::new("S1", 15)).await, Ok(true));
        assert_eq!(bank.read(&Channel::new("S2", 4)).await, Ok(false));
    }

    #[futures_test::test]
    async fn repeated_reads_agree() {
        let mut bank = PinBank::<FakePin, 1>::new();
        bank.register("S1", FakePin { level: true }).unwrap();
        let channel = Channel::new("S1", 15);

        let first = bank.read(&channel).await;
        let second = bank.read(&channel).await;
        assert_eq!(first, second);
    }

    #[futures_test::test]
    async fn unregistered_channel_is_invalid() {
        let mut bank = PinBank::<FakePin, 1>::new();
        bank.register("S1", FakePin { level: true }).unwrap();

        assert_eq!(
            bank.read(&Channel::new("S3", 18)).await,
            Err(Error::InvalidChannel("S3"))
        );
    }

    #[futures_test::test]
    async fn pin_fault_is_invalid_channel() {
        let mut bank = PinBank::<BrokenPin, 1>::new();
        bank.register("S1", BrokenPin).unwrap();

        assert_eq!(
            bank.read(&Channel::new("S1", 15)).await,
            Err(Error::InvalidChannel("S1"))
        );
    }

    #[test]
    fn bank_capacity_is_enforced() {
        let mut bank = PinBank::<FakePin, 1>::new();
        bank.register("S1", FakePin { level: true }).unwrap();
        assert_eq!(
            bank.register("S2", FakePin { level: true }),
            Err(Error::TooManyChannels(2))
        );
        assert_eq!(bank.len(), 1);
    }
}
