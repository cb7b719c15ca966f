use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;

/// Social platform a discovery search runs against.
///
/// The platform is external context, not a filter slot: switching it
/// re-validates every staged and committed filter value against the new
/// platform's constraint profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Platform {
    Instagram,
    TikTok,
    YouTube,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_trips_through_serde_and_strum() {
        let json = serde_json::to_string(&Platform::TikTok).unwrap();
        assert_eq!(json, "\"tik_tok\"");
        assert_eq!(Platform::from_str("you_tube").unwrap(), Platform::YouTube);
        assert_eq!(Platform::Instagram.to_string(), "instagram");
    }
}
