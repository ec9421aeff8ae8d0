use chrono::NaiveDate;
use serde::Serialize;

use crate::dto::{in_time_dto::InTimeRecord, team_dto::TeamRecord};

/// Change events pushed to a session's subscribers, one per mutation.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormUpdate {
    DateUpdate { date: NaiveDate },
    TeamUpdate { index: usize, team: TeamRecord },
    InTimeUpdate { index: usize, in_time: InTimeRecord },
    TeamsResized { len: usize },
    InTimesResized { len: usize },
}
