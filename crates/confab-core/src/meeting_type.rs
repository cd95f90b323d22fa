use serde::{Deserialize, Serialize};

/// Meeting category inferred from the meeting title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingType {
    DailyStandup,
    WeeklySync,
    Planning,
    Retrospective,
    OneOnOne,
    Interview,
    Demo,
    Review,
    ClientMeeting,
    SalesMeeting,
    AllHands,
    General,
}

impl MeetingType {
    /// Classify a meeting by title keywords. First matching rule wins.
    pub fn detect(title: &str) -> MeetingType {
        let title = title.to_lowercase();
        let has = |needle: &str| title.contains(needle);

        if has("daily") || has("standup") {
            MeetingType::DailyStandup
        } else if has("weekly") || has("week") {
            MeetingType::WeeklySync
        } else if has("planning") || has("sprint") {
            MeetingType::Planning
        } else if has("retro") || has("retrospective") {
            MeetingType::Retrospective
        } else if has("1:1") || has("one-on-one") {
            MeetingType::OneOnOne
        } else if has("interview") {
            MeetingType::Interview
        } else if has("demo") || has("presentation") {
            MeetingType::Demo
        } else if has("review") {
            MeetingType::Review
        } else if has("client") || has("customer") {
            MeetingType::ClientMeeting
        } else if has("sales") || has("pitch") {
            MeetingType::SalesMeeting
        } else if has("all hands") || has("town hall") {
            MeetingType::AllHands
        } else {
            MeetingType::General
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingType::DailyStandup => "daily_standup",
            MeetingType::WeeklySync => "weekly_sync",
            MeetingType::Planning => "planning",
            MeetingType::Retrospective => "retrospective",
            MeetingType::OneOnOne => "one_on_one",
            MeetingType::Interview => "interview",
            MeetingType::Demo => "demo",
            MeetingType::Review => "review",
            MeetingType::ClientMeeting => "client_meeting",
            MeetingType::SalesMeeting => "sales_meeting",
            MeetingType::AllHands => "all_hands",
            MeetingType::General => "general",
        }
    }
}

impl std::fmt::Display for MeetingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
