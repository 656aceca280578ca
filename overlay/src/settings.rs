use crate::network::SettingsPacket;
use crossbeam_channel::Receiver;
use tracker_common::settings::DisplaySettings;

/// Read side of the external configuration channel.
///
/// The state is replaced wholesale by every packet the settings poller
/// delivers; nothing here mutates it locally.
pub struct SettingsProvider {
    rx: Receiver<SettingsPacket>,
    data: Option<DisplaySettings>,
    error: Option<String>,
}

impl SettingsProvider {
    pub fn new(rx: Receiver<SettingsPacket>) -> Self {
        Self {
            rx,
            data: None,
            error: None,
        }
    }

    /// Drains pending packets; returns whether the observed state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(packet) = self.rx.try_recv() {
            changed |= packet.data != self.data || packet.error != self.error;
            self.data = packet.data;
            self.error = packet.error;
        }
        changed
    }

    pub fn data(&self) -> Option<&DisplaySettings> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crossbeam_channel::bounded;

    fn settings(lang: &str) -> DisplaySettings {
        DisplaySettings {
            lang: String::from(lang),
            theme: String::from("dark"),
            volume: None,
            border: None,
            participant_id: None,
            team_id: None,
        }
    }

    #[test]
    fn test_wholesale_replacement() {
        let (tx, rx) = bounded(3);
        let mut provider = SettingsProvider::new(rx);
        assert!(!provider.poll());

        tx.send(SettingsPacket {
            data: Some(settings("en")),
            error: None,
        })
        .unwrap();
        assert!(provider.poll());
        assert_eq!(provider.data().unwrap().lang, "en");
        assert_eq!(provider.error(), None);

        tx.send(SettingsPacket {
            data: None,
            error: Some(String::from("settings service unreachable")),
        })
        .unwrap();
        assert!(provider.poll());
        assert_eq!(provider.data(), None);
        assert_eq!(provider.error(), Some("settings service unreachable"));
    }

    #[test]
    fn test_identical_packet_reports_no_change() {
        let (tx, rx) = bounded(3);
        let mut provider = SettingsProvider::new(rx);

        for _ in 0..2 {
            tx.send(SettingsPacket {
                data: Some(settings("fr")),
                error: None,
            })
            .unwrap();
        }
        assert!(provider.poll());
        assert!(!provider.poll());
    }
}
