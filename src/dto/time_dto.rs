use chrono::NaiveTime;

/// Time inputs start at midnight until the coordinator picks something else.
pub const MIDNIGHT: NaiveTime = NaiveTime::MIN;

const ACCEPTED_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

pub fn parse_wall_clock(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
}

/**
 * Serde adapter for wall-clock fields, written as "HH:MM" and read from
 * either "HH:MM" or "HH:MM:SS".
 */
pub mod wall_clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_clock(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid time \"{}\", expected HH:MM", raw)))
    }

    pub fn deserialize_optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|raw| {
            super::parse_wall_clock(&raw)
                .ok_or_else(|| D::Error::custom(format!("invalid time \"{}\", expected HH:MM", raw)))
        })
        .transpose()
    }
}
