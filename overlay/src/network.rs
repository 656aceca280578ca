use crate::config::AppConfig;
use log::{error, info, warn};
use reqwest::{Client, ClientBuilder};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracker_common::{
    settings::DisplaySettings,
    snapshot::DonationSnapshot,
    tracker::{RequestTarget, TrackerClient},
};

static CLIENT_CELL: OnceLock<Client> = OnceLock::new();

/// How often the companion settings service is re-read. Settings changes are
/// operator actions, so this cadence is independent of the donation polling
/// interval.
const SETTINGS_REFRESH_PERIOD: Duration = Duration::from_secs(5);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// One wholesale update from the companion settings service.
pub struct SettingsPacket {
    pub data: Option<DisplaySettings>,
    pub error: Option<String>,
}

/// A fetch request from the data provider. The generation tag lets the
/// provider recognize and drop replies to requests it has since abandoned.
pub struct FetchCommand {
    pub generation: u64,
    pub target: RequestTarget,
}

pub struct DonationReply {
    pub generation: u64,
    pub result: Result<DonationSnapshot, String>,
}

#[tokio::main]
pub async fn networking_thread(
    settings_tx: crossbeam_channel::Sender<SettingsPacket>,
    reply_tx: crossbeam_channel::Sender<DonationReply>,
    fetch_rx: crossbeam_channel::Receiver<FetchCommand>,
    config: AppConfig,
) {
    CLIENT_CELL
        .set(
            ClientBuilder::new()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .expect("Couldn't create HTTP client!"),
        )
        .unwrap();

    let tracker = Arc::new(
        TrackerClient::new(&config.api_url, CONNECT_TIMEOUT)
            .expect("Couldn't create fundraising API client!"),
    );

    let settings_url = config.settings_url.clone();
    tokio::spawn(async move {
        info!("Polling operator settings from {settings_url}");
        loop {
            let packet = match fetch_settings(&settings_url).await {
                Ok(settings) => SettingsPacket {
                    data: Some(settings),
                    error: None,
                },
                Err(e) => {
                    warn!("Settings request failed: {e}");
                    SettingsPacket {
                        data: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            if settings_tx.send(packet).is_err() {
                // Frame loop is gone, nothing left to feed.
                return;
            }
            tokio::time::sleep(SETTINGS_REFRESH_PERIOD).await;
        }
    });

    info!("Networking thread initialized!");
    loop {
        let command = match fetch_rx.recv() {
            Ok(command) => command,
            Err(_) => return,
        };
        let tracker = tracker.clone();
        let reply_tx = reply_tx.clone();
        tokio::spawn(async move {
            let result = tracker
                .fetch(&command.target)
                .await
                .map_err(|e| e.to_string());
            if let Err(e) = &result {
                warn!("Donation data request failed: {e}");
            }
            reply_tx
                .send(DonationReply {
                    generation: command.generation,
                    result,
                })
                .unwrap_or_else(|e| error!("Frontend could not receive donation data: {e}"));
        });
    }
}

async fn fetch_settings(url: &str) -> Result<DisplaySettings, reqwest::Error> {
    let client = CLIENT_CELL.get().unwrap();
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<DisplaySettings>()
        .await
}
