use serde::{Deserialize, Serialize};

/// Current fundraising totals for the tracked participant or team.
///
/// Replaced wholesale on each successful poll. The API reports more fields
/// than these; anything the overlay does not render is left out of the
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSnapshot {
    pub display_name: String,
    #[serde(default)]
    pub event_name: Option<String>,
    pub num_donations: u64,
    #[serde(default)]
    pub sum_donations: f64,
    #[serde(default)]
    pub fundraising_goal: f64,
}

impl DonationSnapshot {
    /// Fraction of the goal raised so far, clamped to the drawable range.
    /// A missing or zero goal reads as no progress rather than a full bar.
    pub fn goal_fraction(&self) -> f32 {
        if self.fundraising_goal > 0.0 {
            (self.sum_donations / self.fundraising_goal).clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deser_participant_snapshot() {
        let json = r#"{
            "displayName": "Jane Doe",
            "eventName": "Extra Life 2026",
            "fundraisingGoal": 1000.0,
            "numDonations": 10,
            "sumDonations": 250.0,
            "participantID": 478123,
            "isTeamCaptain": false
        }"#;
        let snapshot: DonationSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.display_name, "Jane Doe");
        assert_eq!(snapshot.num_donations, 10);
        assert_eq!(snapshot.sum_donations, 250.0);
        assert_eq!(snapshot.goal_fraction(), 0.25);
    }

    #[test]
    fn test_deser_team_snapshot_without_goal() {
        let json = r#"{"displayName": "Team Rocket", "numDonations": 3}"#;
        let snapshot: DonationSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.event_name, None);
        assert_eq!(snapshot.goal_fraction(), 0.0);
    }

    #[test]
    fn test_goal_fraction_clamped() {
        let snapshot = DonationSnapshot {
            display_name: String::from("Over Achiever"),
            event_name: None,
            num_donations: 99,
            sum_donations: 2500.0,
            fundraising_goal: 1000.0,
        };
        assert_eq!(snapshot.goal_fraction(), 1.0);
    }
}
