use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{IgnoredAny, MapAccess, Visitor},
    ser::SerializeMap,
};
use std::fmt;

/// Successful payload of `GET /api/weather/`.
///
/// Temperatures arrive already converted to Fahrenheit by the backend.
/// Fields the client does not use are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothing_suggestions: Option<ClothingSuggestions>,
}

impl WeatherResult {
    /// The primary condition, i.e. the first entry of `weather`.
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp_f: f64,
    pub feels_like_f: f64,
    pub temp_min_f: f64,
    pub temp_max_f: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, deserialize_with = "lenient_code")]
    pub id: Option<ConditionCode>,
    #[serde(default)]
    pub description: String,
}

/// An `id` that is neither a number nor a string reads as absent.
fn lenient_code<'de, D>(deserializer: D) -> Result<Option<ConditionCode>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCode {
        Code(ConditionCode),
        Other(IgnoredAny),
    }

    Ok(match Option::<RawCode>::deserialize(deserializer)? {
        Some(RawCode::Code(code)) => Some(code),
        Some(RawCode::Other(_)) | None => None,
    })
}

/// Condition identifier as sent by the backend: usually a number, sometimes a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionCode {
    Number(f64),
    Text(String),
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionCode::Number(n) => write!(f, "{n}"),
            ConditionCode::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ConditionCode {
    fn from(value: i64) -> Self {
        ConditionCode::Number(value as f64)
    }
}

impl From<&str> for ConditionCode {
    fn from(value: &str) -> Self {
        ConditionCode::Text(value.to_string())
    }
}

/// Category-keyed clothing lists, kept in the order the backend sent them.
///
/// A repeated category replaces the earlier items but keeps its original
/// position, the same way a JSON object literal behaves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClothingSuggestions(Vec<(String, Vec<String>)>);

impl ClothingSuggestions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: String, items: Vec<String>) {
        match self.0.iter_mut().find(|(name, _)| *name == category) {
            Some((_, existing)) => *existing = items,
            None => self.0.push((category, items)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl<C, I> FromIterator<(C, I)> for ClothingSuggestions
where
    C: Into<String>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (C, I)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (category, items) in iter {
            out.insert(category.into(), items.into_iter().map(Into::into).collect());
        }
        out
    }
}

impl Serialize for ClothingSuggestions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, items) in &self.0 {
            map.serialize_entry(category, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClothingSuggestions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = ClothingSuggestions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of clothing category to a list of items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = ClothingSuggestions::new();
                while let Some((category, items)) = access.next_entry::<String, Vec<String>>()? {
                    out.insert(category, items);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Body of a non-2xx response from the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
