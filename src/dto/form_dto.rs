use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dto::{in_time_dto::InTimeRecord, team_dto::TeamRecord};

/**
 * Everything one schedule is generated from: the day, who arrives when,
 * and the team assignments, both lists in creation order.
 */
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScheduleForm {
    pub date: NaiveDate,
    pub in_times: Vec<InTimeRecord>,
    pub teams: Vec<TeamRecord>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CreateSession {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub id: String,
    pub form: ScheduleForm,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetDate {
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListLength {
    pub len: usize,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoveLast {
    pub len: usize,
    pub removed: bool,
}
