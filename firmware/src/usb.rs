use base64::{engine::general_purpose, Engine as _};
use defmt::{info, warn};
use embassy_futures::join::join;
use embassy_rp::interrupt::typelevel::Binding;
use embassy_rp::usb::{Driver, Instance, InterruptHandler};
use embassy_rp::Peripheral;
use embassy_usb::class::cdc_acm::{self, CdcAcmClass};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Config};
use heapless::String;

use crate::serial::{SerialDrain, SerialPipe};

const MAX_PACKET_SIZE: usize = 64;

// Short packets end the transfer without a trailing zero-length packet.
const CHUNK_LEN: usize = MAX_PACKET_SIZE - 1;

const SERIAL_NUMBER_LEN: usize = match base64::encoded_len(8, false) {
    Some(len) => len,
    None => 0,
};

/// USB CDC-ACM port that forwards queued lines to the host.
pub struct Usb<'p> {
    pipe: &'p SerialPipe,
}

impl<'p> Usb<'p> {
    pub fn new(pipe: &'p SerialPipe) -> Self {
        Self { pipe }
    }

    pub async fn run<'d, T: Instance>(
        self,
        usb_peripheral: impl Peripheral<P = T> + 'd,
        irq: impl Binding<T::Interrupt, InterruptHandler<T>>,
        unique_id: &[u8; 8],
    ) {
        let driver = Driver::new(usb_peripheral, irq);
        let serial = unique_id_string(unique_id);

        let mut config = Config::new(0xc0de, 0xcafe);
        config.manufacturer = Some("touchsense");
        config.product = Some("Touch Sensor Monitor");
        config.serial_number = Some(serial.as_str());
        config.max_power = 100;
        config.max_packet_size_0 = MAX_PACKET_SIZE as u8;

        // Required for windows compatibility.
        // https://developer.nordicsemi.com/nRF_Connect_SDK/doc/1.9.1/kconfig/CONFIG_CDC_ACM_IAD.html#help
        config.device_class = 0xef;
        config.device_sub_class = 0x02;
        config.device_protocol = 0x01;
        config.composite_with_iads = true;

        let mut config_descriptor = [0; 256];
        let mut bos_descriptor = [0; 256];
        let mut control_buf = [0; 64];

        let mut cdc_acm_state = cdc_acm::State::new();

        let mut builder = Builder::new(
            driver,
            config,
            &mut config_descriptor,
            &mut bos_descriptor,
            &mut [], // no msos descriptors
            &mut control_buf,
        );

        let mut class = CdcAcmClass::new(&mut builder, &mut cdc_acm_state, MAX_PACKET_SIZE as u16);

        let mut usb = builder.build();

        join(usb.run(), self.forward(&mut class)).await;
    }

    async fn forward<'d, T: Instance + 'd>(&self, class: &mut CdcAcmClass<'d, Driver<'d, T>>) {
        // Outlives each connection so a chunk the host never got is sent after reconnecting.
        let mut drain = SerialDrain::<CHUNK_LEN>::new(self.pipe);
        loop {
            class.wait_connection().await;
            info!("USB serial connected");
            if let Err(e) = Self::drain(class, &mut drain).await {
                warn!("USB endpoint error: {}", e);
            }
            info!("USB serial disconnected");
        }
    }

    async fn drain<'d, T: Instance + 'd>(
        class: &mut CdcAcmClass<'d, Driver<'d, T>>,
        drain: &mut SerialDrain<'_, CHUNK_LEN>,
    ) -> Result<(), EndpointError> {
        loop {
            let chunk = drain.next_chunk().await;
            class.write_packet(chunk).await?;
            drain.mark_sent();
        }
    }
}

fn unique_id_string(id: &[u8; 8]) -> String<SERIAL_NUMBER_LEN> {
    let mut buf = [0u8; SERIAL_NUMBER_LEN];
    let encoded = general_purpose::STANDARD_NO_PAD
        .encode_slice(id, &mut buf)
        .ok()
        .and_then(|len| core::str::from_utf8(&buf[..len]).ok())
        .and_then(|s| String::try_from(s).ok());
    match encoded {
        Some(serial) => serial,
        None => {
            warn!("USB serial number encoding failed, reporting an empty one");
            String::new()
        }
    }
}
