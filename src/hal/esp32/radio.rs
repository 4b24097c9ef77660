//! ESP-NOW link to the vehicle.
//!
//! ESP-NOW rides on the WiFi driver without joining a network: the driver is
//! started in station mode, pinned to the configured channel, and frames go
//! straight to the vehicle's MAC (or broadcast until paired).
//!
//! Status frames from the vehicle arrive on the WiFi task; the receive
//! callback parses them into a single slot that
//! [`take_status`](crate::traits::Transmitter::take_status) drains.

use crate::config::RadioConfig;
use crate::packet::VehicleStatus;
use crate::traits::Transmitter;
use esp_idf_hal::modem::Modem;
use esp_idf_svc::espnow::{EspNow, PeerInfo};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sys::{
    esp, esp_wifi_set_channel, wifi_interface_t_WIFI_IF_STA,
    wifi_second_chan_t_WIFI_SECOND_CHAN_NONE, EspError,
};
use esp_idf_svc::wifi::{BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::{debug, info};
use std::sync::Mutex;

/// Latest status frame from the vehicle, written by the receive callback.
static LAST_STATUS: Mutex<Option<VehicleStatus>> = Mutex::new(None);

/// ESP-NOW transmitter.
///
/// # Example
///
/// ```ignore
/// use explorer_tx::hal::esp32::Esp32Radio;
/// use explorer_tx::traits::Transmitter;
///
/// let mut radio = Esp32Radio::new(peripherals.modem, sysloop, Some(nvs), &config.radio)?;
/// radio.init()?;
/// radio.transmit(&package.to_bytes())?;
/// ```
pub struct Esp32Radio<'a> {
    _wifi: BlockingWifi<EspWifi<'a>>,
    espnow: Option<EspNow<'static>>,
    peer: [u8; 6],
    channel: u8,
}

impl<'a> Esp32Radio<'a> {
    /// Starts the WiFi driver in station mode on the configured channel.
    ///
    /// ESP-NOW itself comes up in [`init`](Transmitter::init).
    ///
    /// # Errors
    ///
    /// Returns an error if the WiFi driver fails to start.
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
        config: &RadioConfig,
    ) -> Result<Self, EspError> {
        let esp_wifi = EspWifi::new(modem, sysloop.clone(), nvs)?;
        let mut wifi = BlockingWifi::wrap(esp_wifi, sysloop)?;

        wifi.set_configuration(&Configuration::Client(ClientConfiguration::default()))?;
        wifi.start()?;
        esp!(unsafe {
            esp_wifi_set_channel(config.channel, wifi_second_chan_t_WIFI_SECOND_CHAN_NONE)
        })?;
        info!("radio: wifi up on channel {}", config.channel);

        Ok(Self {
            _wifi: wifi,
            espnow: None,
            peer: config.peer_mac,
            channel: config.channel,
        })
    }
}

impl Transmitter for Esp32Radio<'_> {
    type Error = EspError;

    fn init(&mut self) -> Result<(), Self::Error> {
        let espnow = EspNow::take()?;
        espnow.add_peer(PeerInfo {
            peer_addr: self.peer,
            channel: self.channel,
            ifidx: wifi_interface_t_WIFI_IF_STA,
            encrypt: false,
            ..Default::default()
        })?;
        espnow.register_recv_cb(|_info, data: &[u8]| match VehicleStatus::from_bytes(data) {
            Some(status) => {
                if let Ok(mut slot) = LAST_STATUS.lock() {
                    *slot = Some(status);
                }
            }
            None => debug!("radio: ignored {} byte frame", data.len()),
        })?;
        info!("radio: ESP-NOW peer {:02x?}", self.peer);
        self.espnow = Some(espnow);
        Ok(())
    }

    fn transmit(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        match self.espnow.as_ref() {
            Some(espnow) => espnow.send(self.peer, payload),
            None => self.init().and_then(|()| self.transmit(payload)),
        }
    }

    fn take_status(&mut self) -> Option<VehicleStatus> {
        LAST_STATUS.lock().ok().and_then(|mut slot| slot.take())
    }
}
