//! Serde helpers shared by the config domains

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

/// `Duration` stored as whole seconds
pub mod secs {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

/// `Duration` stored as milliseconds
pub mod millis {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Timings {
        #[serde(with = "secs")]
        grace: Duration,
        #[serde(with = "millis")]
        tick: Duration,
    }

    #[test]
    fn test_durations_use_their_declared_units() {
        let parsed: Timings = serde_json::from_str(r#"{"grace": 3, "tick": 250}"#).unwrap();
        assert_eq!(parsed.grace, Duration::from_secs(3));
        assert_eq!(parsed.tick, Duration::from_millis(250));

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["tick"], 250);
    }
}
