use crate::{settings::DisplaySettings, snapshot::DonationSnapshot};
use log::{info, warn};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("fundraising API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// The (entity kind, identifier) pair the overlay polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    Participant(String),
    Team(String),
}

impl RequestTarget {
    /// Derives the polled entity from the operator settings. An individual
    /// fundraiser belongs to a team but is queried individually, so a
    /// participant id wins over a team id.
    pub fn from_settings(settings: &DisplaySettings) -> Option<Self> {
        if let Some(id) = settings
            .participant_id
            .as_ref()
            .filter(|id| !id.is_empty())
        {
            Some(Self::Participant(id.clone()))
        } else {
            settings
                .team_id
                .as_ref()
                .filter(|id| !id.is_empty())
                .map(|id| Self::Team(id.clone()))
        }
    }
}

pub struct TrackerClient {
    base_url: String,
    client: Client,
}

impl TrackerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TrackerError> {
        let client = ClientBuilder::new().connect_timeout(timeout).build()?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { base_url, client })
    }

    pub async fn get_participant(&self, id: &str) -> Result<DonationSnapshot, TrackerError> {
        self.get_snapshot(format!("{}/api/participants/{id}", self.base_url))
            .await
    }

    pub async fn get_team(&self, id: &str) -> Result<DonationSnapshot, TrackerError> {
        self.get_snapshot(format!("{}/api/teams/{id}", self.base_url))
            .await
    }

    pub async fn fetch(&self, target: &RequestTarget) -> Result<DonationSnapshot, TrackerError> {
        match target {
            RequestTarget::Participant(id) => self.get_participant(id).await,
            RequestTarget::Team(id) => self.get_team(id).await,
        }
    }

    async fn get_snapshot(&self, url: String) -> Result<DonationSnapshot, TrackerError> {
        info!("Requesting fundraising totals from {url}");
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::OK {
            Ok(response.json::<DonationSnapshot>().await?)
        } else {
            warn!("Fundraising API request failed, response: {response:?}");
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(TrackerError::Status { status, body })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn settings(participant_id: Option<&str>, team_id: Option<&str>) -> DisplaySettings {
        DisplaySettings {
            lang: String::from("en"),
            theme: String::from("dark"),
            volume: None,
            border: None,
            participant_id: participant_id.map(String::from),
            team_id: team_id.map(String::from),
        }
    }

    #[test]
    fn test_participant_wins_over_team() {
        let target = RequestTarget::from_settings(&settings(Some("P1"), Some("T1")));
        assert_eq!(target, Some(RequestTarget::Participant(String::from("P1"))));
    }

    #[test]
    fn test_team_when_no_participant() {
        let target = RequestTarget::from_settings(&settings(None, Some("T1")));
        assert_eq!(target, Some(RequestTarget::Team(String::from("T1"))));
    }

    #[test]
    fn test_empty_participant_falls_through() {
        let target = RequestTarget::from_settings(&settings(Some(""), Some("T1")));
        assert_eq!(target, Some(RequestTarget::Team(String::from("T1"))));
    }

    #[test]
    fn test_no_ids_no_target() {
        assert_eq!(RequestTarget::from_settings(&settings(None, None)), None);
        assert_eq!(RequestTarget::from_settings(&settings(Some(""), Some(""))), None);
    }
}
