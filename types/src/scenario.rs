use std::fmt;
use std::str::FromStr;

/// Identifier of a training scenario. The default is the cardiology
/// dose-comparison scenario, which the router falls back to whenever the
/// user returns to the landing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioId {
    Alex,
    Ena,
    Dat,
}

impl Default for ScenarioId {
    fn default() -> Self {
        ScenarioId::Alex
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioId::Alex => "alex",
            ScenarioId::Ena => "ena",
            ScenarioId::Dat => "dat",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScenario(pub String);

impl fmt::Display for UnknownScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scenario: {}", self.0)
    }
}

impl std::error::Error for UnknownScenario {}

impl FromStr for ScenarioId {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alex" => Ok(ScenarioId::Alex),
            "ena" => Ok(ScenarioId::Ena),
            "dat" => Ok(ScenarioId::Dat),
            other => Err(UnknownScenario(other.to_string())),
        }
    }
}

/// One selectable counterpart persona, including the capability-scoped URL
/// the provider renders the avatar from.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScenarioProfile {
    pub id: ScenarioId,
    pub doctor_name: String,
    pub specialty: String,
    pub description: String,
    pub embed_url: String,
}

/// Accent used when a script section is rendered. Stands in for the
/// original per-section styling without dragging presentation classes into
/// the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Blue,
    Green,
    Red,
    Orange,
    Purple,
    Teal,
    Indigo,
    Gray,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScriptSection {
    pub title: String,
    pub accent: Accent,
    pub content: String,
}

/// The scripted conversation the user rehearses from, immutable once
/// looked up.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScenarioScript {
    pub title: String,
    pub sections: Vec<ScriptSection>,
}
