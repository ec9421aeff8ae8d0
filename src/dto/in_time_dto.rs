use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::dto::time_dto::{MIDNIGHT, wall_clock};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct InTimeRecord {
    #[serde(with = "wall_clock")]
    pub time: NaiveTime,
    pub members: Vec<String>,
}

impl Default for InTimeRecord {
    fn default() -> Self {
        Self {
            time: MIDNIGHT,
            members: vec![],
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct InTimePatch {
    #[serde(deserialize_with = "wall_clock::deserialize_optional")]
    pub time: Option<NaiveTime>,
    pub members: Option<Vec<String>>,
}
