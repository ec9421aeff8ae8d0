use chrono::{NaiveDate, NaiveTime};

use crate::dto::{
    in_time_dto::InTimeRecord,
    team_dto::{MaterialLine, TeamRecord},
};

pub const DIVIDER: &str = "—————————";
pub const GREETING: &str = "Hi everyone!";
pub const IN_TIMES_LABEL: &str = "In times are the following:";
pub const CLOSING_REMINDER: &str =
    "Friendly reminder, please clock in as soon as everyone is in the truck.";

/// "July 4": full month name, day without a leading zero, no year.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d").to_string()
}

/// 12-hour clock without a leading zero on the hour, e.g. "9:05 AM".
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

fn format_materials(materials: &[MaterialLine]) -> String {
    if materials.is_empty() {
        return "None".to_string();
    }
    materials
        .iter()
        .map(|line| format!("{} x {}", line.quantity, line.material))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_in_times(in_times: &[InTimeRecord]) -> String {
    let lines: Vec<String> = in_times
        .iter()
        .map(|in_time| format!("{} {}", format_time(in_time.time), in_time.members.join(", ")))
        .collect();
    lines.join("\n").trim().to_string()
}

fn format_team(position: usize, team: &TeamRecord) -> String {
    let roles: Vec<&str> = team.roles.iter().map(|role| role.label()).collect();

    format!(
        "Team {position}:\n\
         Role: {}\n\
         Name: {}\n\
         Team Lead (TL): {}\n\
         Team Members: {}\n\
         Trucks & Trailers: {}\n\
         Moving From: {}\n\
         Moving To: {}\n\
         Client Name: {}\n\
         Point of Contact: {}\n\
         🚨 Leave by {} 🚨\n\
         Materials:\n\
         {}\n\
         Notes: {}\n",
        roles.join(", "),
        team.names.join(", "),
        team.team_leads.join(", "),
        team.members.join(", "),
        team.trucks.join(", "),
        team.move_from,
        team.move_to,
        team.client,
        or_na(&team.contact),
        format_time(team.leave_by),
        format_materials(&team.materials),
        or_na(&team.notes),
    )
}

/**
 * Renders the plain-text daily schedule: date header, greeting, the in-time
 * block, one divided block per team in list order, then the closing reminder.
 * The output depends on nothing but the arguments.
 */
pub fn format_schedule(date: NaiveDate, in_times: &[InTimeRecord], teams: &[TeamRecord]) -> String {
    let mut schedule = format!(
        "{}\n\n{GREETING}\n{IN_TIMES_LABEL}\n\n{}\n\n",
        format_date(date),
        format_in_times(in_times),
    );

    for (index, team) in teams.iter().enumerate() {
        schedule.push_str(DIVIDER);
        schedule.push('\n');
        schedule.push_str(&format_team(index + 1, team));
        schedule.push('\n');
    }

    schedule.push_str(CLOSING_REMINDER);
    schedule
}
