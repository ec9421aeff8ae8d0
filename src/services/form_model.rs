use chrono::NaiveDate;
use tracing::debug;

use crate::dto::{
    catalog_dto::{Role, is_material, is_person, is_truck},
    form_dto::ScheduleForm,
    in_time_dto::{InTimePatch, InTimeRecord},
    team_dto::{MaterialLine, MaterialSelection, TeamPatch, TeamRecord},
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Team {index} does not exist, the form has {len} teams.")]
    TeamOutOfRange { index: usize, len: usize },

    #[error("In-time {index} does not exist, the form has {len} in-times.")]
    InTimeOutOfRange { index: usize, len: usize },

    #[error("\"{0}\" is not on the crew list.")]
    UnknownPerson(String),

    #[error("\"{0}\" is not a truck or trailer.")]
    UnknownTruck(String),

    #[error("\"{0}\" is not a known material.")]
    UnknownMaterial(String),

    #[error("Amount for {0} must be at least 1.")]
    ZeroQuantity(String),

    #[error("{0} was selected more than once.")]
    DuplicateMaterial(String),

    #[error("{0} was picked more than once.")]
    DuplicatePerson(String),

    #[error("Truck {0} was picked more than once.")]
    DuplicateTruck(String),

    #[error("{0} role was picked more than once.")]
    DuplicateRole(String),

    #[error("A schedule needs at least one team.")]
    NoTeams,

    #[error("A schedule needs at least one in-time.")]
    NoInTimes,
}

/// Multi-selects hold sets; the first value seen twice, if any.
fn first_repeat<T: PartialEq>(values: &[T]) -> Option<&T> {
    values
        .iter()
        .enumerate()
        .find(|(position, value)| values[..*position].contains(*value))
        .map(|(_, value)| value)
}

fn check_people(names: &[String]) -> Result<(), FormError> {
    if let Some(name) = names.iter().find(|name| !is_person(name)) {
        return Err(FormError::UnknownPerson(name.clone()));
    }
    match first_repeat(names) {
        Some(name) => Err(FormError::DuplicatePerson(name.clone())),
        None => Ok(()),
    }
}

fn check_trucks(trucks: &[String]) -> Result<(), FormError> {
    if let Some(truck) = trucks.iter().find(|truck| !is_truck(truck)) {
        return Err(FormError::UnknownTruck(truck.clone()));
    }
    match first_repeat(trucks) {
        Some(truck) => Err(FormError::DuplicateTruck(truck.clone())),
        None => Ok(()),
    }
}

fn check_roles(roles: &[Role]) -> Result<(), FormError> {
    match first_repeat(roles) {
        Some(role) => Err(FormError::DuplicateRole(role.label().to_string())),
        None => Ok(()),
    }
}

fn check_materials(lines: &[MaterialLine]) -> Result<(), FormError> {
    for (position, line) in lines.iter().enumerate() {
        if !is_material(&line.material) {
            return Err(FormError::UnknownMaterial(line.material.clone()));
        }
        if line.quantity == 0 {
            return Err(FormError::ZeroQuantity(line.material.clone()));
        }
        if lines[..position].iter().any(|earlier| earlier.material == line.material) {
            return Err(FormError::DuplicateMaterial(line.material.clone()));
        }
    }
    Ok(())
}

/// Turns a material selection into quantity lines. A material that was
/// already selected keeps its amount unless a new one is given.
fn resolve_materials(previous: &[MaterialLine], selections: Vec<MaterialSelection>) -> Vec<MaterialLine> {
    selections
        .into_iter()
        .map(|selection| {
            let quantity = selection.quantity.unwrap_or_else(|| {
                previous
                    .iter()
                    .find(|line| line.material == selection.material)
                    .map_or(1, |line| line.quantity)
            });
            MaterialLine {
                material: selection.material,
                quantity,
            }
        })
        .collect()
}

fn check_team(team: &TeamRecord) -> Result<(), FormError> {
    check_roles(&team.roles)?;
    check_people(&team.names)?;
    check_people(&team.team_leads)?;
    check_people(&team.members)?;
    check_trucks(&team.trucks)?;
    check_materials(&team.materials)
}

impl ScheduleForm {
    /// A fresh form for `date`. Both lists are kept at one record minimum.
    pub fn new(date: NaiveDate, team_count: usize, in_time_count: usize) -> Self {
        Self {
            date,
            in_times: vec![InTimeRecord::default(); in_time_count.max(1)],
            teams: vec![TeamRecord::default(); team_count.max(1)],
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn add_team(&mut self) -> usize {
        self.teams.push(TeamRecord::default());
        self.teams.len()
    }

    /// Returns `false` without touching the list when only one team is left.
    pub fn remove_last_team(&mut self) -> bool {
        if self.teams.len() <= 1 {
            debug!("Refusing to remove the only team.");
            return false;
        }
        self.teams.pop();
        true
    }

    pub fn add_in_time(&mut self) -> usize {
        self.in_times.push(InTimeRecord::default());
        self.in_times.len()
    }

    /// Returns `false` without touching the list when only one in-time is left.
    pub fn remove_last_in_time(&mut self) -> bool {
        if self.in_times.len() <= 1 {
            debug!("Refusing to remove the only in-time.");
            return false;
        }
        self.in_times.pop();
        true
    }

    /**
     * Applies the fields present in `patch` to the team at `index`.
     * The edit is checked as a whole first, so a rejected patch leaves
     * the team exactly as it was.
     */
    pub fn edit_team(&mut self, index: usize, patch: TeamPatch) -> Result<&TeamRecord, FormError> {
        let len = self.teams.len();
        let current = self
            .teams
            .get_mut(index)
            .ok_or(FormError::TeamOutOfRange { index, len })?;

        let mut edited = current.clone();
        if let Some(roles) = patch.roles {
            edited.roles = roles;
        }
        if let Some(names) = patch.names {
            edited.names = names;
        }
        if let Some(team_leads) = patch.team_leads {
            edited.team_leads = team_leads;
        }
        if let Some(members) = patch.members {
            edited.members = members;
        }
        if let Some(trucks) = patch.trucks {
            edited.trucks = trucks;
        }
        if let Some(move_from) = patch.move_from {
            edited.move_from = move_from;
        }
        if let Some(move_to) = patch.move_to {
            edited.move_to = move_to;
        }
        if let Some(client) = patch.client {
            edited.client = client;
        }
        if let Some(contact) = patch.contact {
            edited.contact = contact;
        }
        if let Some(leave_by) = patch.leave_by {
            edited.leave_by = leave_by;
        }
        if let Some(selections) = patch.materials {
            edited.materials = resolve_materials(&current.materials, selections);
        }
        if let Some(notes) = patch.notes {
            edited.notes = notes;
        }

        check_team(&edited)?;
        *current = edited;
        Ok(&*current)
    }

    pub fn edit_in_time(&mut self, index: usize, patch: InTimePatch) -> Result<&InTimeRecord, FormError> {
        let len = self.in_times.len();
        let current = self
            .in_times
            .get_mut(index)
            .ok_or(FormError::InTimeOutOfRange { index, len })?;

        if let Some(members) = &patch.members {
            check_people(members)?;
        }
        if let Some(time) = patch.time {
            current.time = time;
        }
        if let Some(members) = patch.members {
            current.members = members;
        }
        Ok(&*current)
    }

    /// Checks a form that arrived whole rather than through edits.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.teams.is_empty() {
            return Err(FormError::NoTeams);
        }
        if self.in_times.is_empty() {
            return Err(FormError::NoInTimes);
        }
        for in_time in &self.in_times {
            check_people(&in_time.members)?;
        }
        self.teams.iter().try_for_each(check_team)
    }
}
