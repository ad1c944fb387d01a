use serde::{Deserialize, Deserializer, Serialize};

pub const UNKNOWN_DESTINATION: &str = "Unknown Destination";

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripSource {
    Generated,
    Fallback,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Main,
    Food,
    Rest,
    Social,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Main => "main",
            ActivityKind::Food => "food",
            ActivityKind::Rest => "rest",
            ActivityKind::Social => "social",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Activity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    // Free string on the wire; see `kind()`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub activity_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
}

impl Activity {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        time: &str,
        kind: ActivityKind,
        location: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            time: time.to_string(),
            activity_type: kind.as_str().to_string(),
            location: location.to_string(),
        }
    }

    /// Known activity category, if the source used one of the conventional labels.
    pub fn kind(&self) -> Option<ActivityKind> {
        match self.activity_type.trim().to_ascii_lowercase().as_str() {
            "main" => Some(ActivityKind::Main),
            "food" => Some(ActivityKind::Food),
            "rest" => Some(ActivityKind::Rest),
            "social" => Some(ActivityKind::Social),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub id: String,
    pub date: String,
    pub vibe_label: String,
    pub summary: String,
    pub main_activities: Vec<Activity>,
    pub alternatives: Vec<Activity>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Trip {
    pub id: String,
    pub destination: String,
    pub days: Vec<DayPlan>,
    pub source: TripSource,
}

impl Trip {
    pub fn is_fallback(&self) -> bool {
        self.source == TripSource::Fallback
    }

    pub fn activity_count(&self) -> usize {
        self.days
            .iter()
            .map(|d| d.main_activities.len() + d.alternatives.len())
            .sum()
    }
}

/// Itinerary exactly as the generative service returned it. Nothing here is
/// trusted until it has been sanitized into a [`Trip`].
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GeneratedTrip {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub days: Option<Vec<GeneratedDayPlan>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDayPlan {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vibe_label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default)]
    pub main_activities: Option<Vec<Activity>>,
    #[serde(default)]
    pub alternatives: Option<Vec<Activity>>,
}

// Models occasionally emit explicit nulls for fields they could not fill.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value: Option<T> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

// Day ids are only hints, so an odd id drops the id rather than the day.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        _ => Ok(None),
    }
}
