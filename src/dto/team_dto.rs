use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::dto::catalog_dto::Role;
use crate::dto::time_dto::{MIDNIGHT, wall_clock};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MaterialLine {
    pub material: String,
    pub quantity: u32,
}

/**
 * One crew assignment. The "Team N" label comes from the record's position
 * in the form, so it is not stored here.
 */
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TeamRecord {
    pub roles: Vec<Role>,
    pub names: Vec<String>,
    pub team_leads: Vec<String>,
    pub members: Vec<String>,
    pub trucks: Vec<String>,
    pub move_from: String,
    pub move_to: String,
    pub client: String,
    pub contact: String,
    #[serde(with = "wall_clock")]
    pub leave_by: NaiveTime,
    pub materials: Vec<MaterialLine>,
    pub notes: String,
}

impl Default for TeamRecord {
    fn default() -> Self {
        Self {
            roles: vec![],
            names: vec![],
            team_leads: vec![],
            members: vec![],
            trucks: vec![],
            move_from: String::new(),
            move_to: String::new(),
            client: String::new(),
            contact: String::new(),
            leave_by: MIDNIGHT,
            materials: vec![],
            notes: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MaterialSelection {
    pub material: String,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Field edits for one team; absent fields are left untouched.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct TeamPatch {
    pub roles: Option<Vec<Role>>,
    pub names: Option<Vec<String>>,
    pub team_leads: Option<Vec<String>>,
    pub members: Option<Vec<String>>,
    pub trucks: Option<Vec<String>>,
    pub move_from: Option<String>,
    pub move_to: Option<String>,
    pub client: Option<String>,
    pub contact: Option<String>,
    #[serde(deserialize_with = "wall_clock::deserialize_optional")]
    pub leave_by: Option<NaiveTime>,
    pub materials: Option<Vec<MaterialSelection>>,
    pub notes: Option<String>,
}
