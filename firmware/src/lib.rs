#![no_std]

pub mod app;
pub mod gpio_input;
pub mod serial;
pub mod usb;
pub mod watchdog;
