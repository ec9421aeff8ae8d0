use serde::{Deserialize, Serialize};

pub const PEOPLE: [&str; 11] = [
    "Lulu", "Yeni", "Angelo", "Jeremiah", "Alonso", "Keaneu",
    "Jackson", "Alex", "Walker", "Dayanna", "Sophia",
];

pub const MATERIALS: [&str; 18] = [
    "1.5 Boxes",
    "3.0 Boxes",
    "4.5 Boxes (Tall)",
    "4.5 Boxes (Long)",
    "2 PC Mirror",
    "Tape (Pack)",
    "Stretch wrap (Roll)",
    "Big Bubble Wrap (Feet)",
    "Small Bubble Wrap (Feet)",
    "Paper Pad (Brown Paper)",
    "Mattress Bag",
    "TV Mount (Small)",
    "TV Mount (Large)",
    "Felt Pad (Pack)",
    "Newsprint (White Paper)",
    "Clear Trash Bags (Box)",
    "Black Trash Bags (Box)",
    "Rug Gripper Thick Pads",
];

pub const TRUCKS: [&str; 15] = [
    "10", "11", "30", "31", "32", "33", "50", "51", "52", "53", "54", "55", "56", "57", "59",
];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "Project Manager")]
    ProjectManager,
    #[serde(rename = "Client Manager")]
    ClientManager,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::ProjectManager, Role::ClientManager];

    pub fn label(self) -> &'static str {
        match self {
            Role::ProjectManager => "Project Manager",
            Role::ClientManager => "Client Manager",
        }
    }
}

pub fn is_person(name: &str) -> bool {
    PEOPLE.contains(&name)
}

pub fn is_material(name: &str) -> bool {
    MATERIALS.contains(&name)
}

pub fn is_truck(id: &str) -> bool {
    TRUCKS.contains(&id)
}

/// Option lists a view needs to populate its multi-selects.
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub people: Vec<&'static str>,
    pub materials: Vec<&'static str>,
    pub trucks: Vec<&'static str>,
    pub roles: Vec<Role>,
}

impl Catalog {
    pub fn reference() -> Self {
        Self {
            people: PEOPLE.to_vec(),
            materials: MATERIALS.to_vec(),
            trucks: TRUCKS.to_vec(),
            roles: Role::ALL.to_vec(),
        }
    }
}
