//! Pure mapping from a [`WeatherResult`] to the values a front end displays.

use std::{collections::HashMap, sync::LazyLock};

use crate::model::{ConditionCode, WeatherResult};

pub const DEFAULT_CONDITION_ICON: &str = "🌤️";
pub const DEFAULT_CATEGORY_ICON: &str = "👕";

/// Keyed by the first two characters of the condition code.
static CONDITION_ICONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("01", "☀️"),
        ("02", "⛅"),
        ("03", "☁️"),
        ("04", "☁️"),
        ("09", "🌧️"),
        ("10", "🌦️"),
        ("11", "⛈️"),
        ("13", "❄️"),
        ("50", "🌫️"),
    ])
});

static CATEGORY_ICONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("top", "👕"),
        ("bottom", "👖"),
        ("outerwear", "🧥"),
        ("accessories", "🧢"),
    ])
});

pub fn icon_for_condition(code: Option<&ConditionCode>) -> &'static str {
    let Some(code) = code else {
        return DEFAULT_CONDITION_ICON;
    };

    let text = code.to_string();
    let prefix: String = text.chars().take(2).collect();

    CONDITION_ICONS
        .get(prefix.as_str())
        .copied()
        .unwrap_or(DEFAULT_CONDITION_ICON)
}

pub fn icon_for_category(category: &str) -> &'static str {
    CATEGORY_ICONS
        .get(category)
        .copied()
        .unwrap_or(DEFAULT_CATEGORY_ICON)
}

/// Rounds to the nearest whole degree, halves going up.
pub fn display_temperature(value: f64) -> i64 {
    // Adding 0.5 before flooring would round 0.49999999999999994 up.
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// Uppercases the first character and leaves the rest untouched.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Everything a front end shows for one successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub city: String,
    pub icon: &'static str,
    pub temperature: i64,
    pub description: String,
    pub feels_like: i64,
    pub temp_min: i64,
    pub temp_max: i64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub clothing: Vec<ClothingSection>,
}

/// One clothing category, in the position the backend gave it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClothingSection {
    pub icon: &'static str,
    pub title: String,
    pub items: Vec<String>,
}

impl WeatherView {
    pub fn new(city: impl Into<String>, result: &WeatherResult) -> Self {
        let condition = result.primary_condition();

        let clothing = result
            .clothing_suggestions
            .iter()
            .flat_map(|suggestions| suggestions.iter())
            .map(|(category, items)| ClothingSection {
                icon: icon_for_category(category),
                title: title_case(category),
                items: items.to_vec(),
            })
            .collect();

        Self {
            city: city.into(),
            icon: icon_for_condition(condition.and_then(|c| c.id.as_ref())),
            temperature: display_temperature(result.main.temp_f),
            description: condition.map(|c| c.description.clone()).unwrap_or_default(),
            feels_like: display_temperature(result.main.feels_like_f),
            temp_min: display_temperature(result.main.temp_min_f),
            temp_max: display_temperature(result.main.temp_max_f),
            humidity: result.main.humidity,
            wind_speed: result.wind.speed,
            clothing,
        }
    }

    pub fn has_clothing(&self) -> bool {
        !self.clothing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClothingSuggestions, Condition, MainReadings, Wind};

    fn result_with(temp_f: f64, clothing: Option<ClothingSuggestions>) -> WeatherResult {
        WeatherResult {
            main: MainReadings {
                temp_f,
                feels_like_f: 70.5,
                temp_min_f: 68.4,
                temp_max_f: 75.0,
                humidity: 40.0,
            },
            wind: Wind { speed: 3.6 },
            weather: vec![Condition { id: Some("10d".into()), description: "light rain".into() }],
            clothing_suggestions: clothing,
        }
    }

    #[test]
    fn every_known_condition_prefix_has_its_icon() {
        let expected = [
            ("01", "☀️"),
            ("02", "⛅"),
            ("03", "☁️"),
            ("04", "☁️"),
            ("09", "🌧️"),
            ("10", "🌦️"),
            ("11", "⛈️"),
            ("13", "❄️"),
            ("50", "🌫️"),
        ];

        for (prefix, icon) in expected {
            let code = ConditionCode::from(format!("{prefix}d").as_str());
            assert_eq!(icon_for_condition(Some(&code)), icon, "prefix {prefix}");
        }
    }

    #[test]
    fn unknown_or_missing_condition_uses_default() {
        assert_eq!(icon_for_condition(None), DEFAULT_CONDITION_ICON);
        assert_eq!(icon_for_condition(Some(&ConditionCode::from(""))), DEFAULT_CONDITION_ICON);
        assert_eq!(icon_for_condition(Some(&ConditionCode::from("7"))), DEFAULT_CONDITION_ICON);
        assert_eq!(icon_for_condition(Some(&ConditionCode::from(800))), DEFAULT_CONDITION_ICON);
    }

    #[test]
    fn numeric_codes_use_their_leading_digits() {
        assert_eq!(icon_for_condition(Some(&ConditionCode::from(1001))), "🌦️");
        assert_eq!(icon_for_condition(Some(&ConditionCode::from(502))), "🌫️");
        assert_eq!(icon_for_condition(Some(&ConditionCode::from(13))), "❄️");
    }

    #[test]
    fn multibyte_code_prefix_does_not_panic() {
        let code = ConditionCode::from("é☀x");
        assert_eq!(icon_for_condition(Some(&code)), DEFAULT_CONDITION_ICON);
    }

    #[test]
    fn category_icons() {
        assert_eq!(icon_for_category("top"), "👕");
        assert_eq!(icon_for_category("bottom"), "👖");
        assert_eq!(icon_for_category("outerwear"), "🧥");
        assert_eq!(icon_for_category("accessories"), "🧢");
        assert_eq!(icon_for_category("footwear"), DEFAULT_CATEGORY_ICON);
        assert_eq!(icon_for_category("Top"), DEFAULT_CATEGORY_ICON);
    }

    #[test]
    fn temperatures_round_to_whole_degrees() {
        assert_eq!(display_temperature(72.6), 73);
        assert_eq!(display_temperature(72.4), 72);
        assert_eq!(display_temperature(72.5), 73);
        assert_eq!(display_temperature(-2.5), -2);
        assert_eq!(display_temperature(-2.6), -3);
        assert_eq!(display_temperature(0.49999999999999994), 0);
        assert_eq!(display_temperature(-0.5), 0);
    }

    #[test]
    fn title_case_touches_only_the_first_character() {
        assert_eq!(title_case("outerwear"), "Outerwear");
        assert_eq!(title_case("top hats"), "Top hats");
        assert_eq!(title_case("aCCESSORIES"), "ACCESSORIES");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn view_keeps_clothing_in_backend_order() {
        let clothing: ClothingSuggestions =
            [("top", vec!["T-shirt"]), ("bottom", vec!["Jeans"])].into_iter().collect();
        let view = WeatherView::new("Springfield", &result_with(72.6, Some(clothing)));

        let titles: Vec<&str> = view.clothing.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Top", "Bottom"]);
        assert_eq!(view.clothing[1].icon, "👖");
        assert_eq!(view.clothing[1].items, ["Jeans"]);
    }

    #[test]
    fn view_does_not_sort_categories() {
        let clothing: ClothingSuggestions = [
            ("outerwear", vec!["Coat"]),
            ("accessories", vec!["Scarf", "Gloves"]),
            ("bottom", vec![]),
        ]
        .into_iter()
        .collect();
        let view = WeatherView::new("Oslo", &result_with(20.0, Some(clothing)));

        let titles: Vec<&str> = view.clothing.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Outerwear", "Accessories", "Bottom"]);
        assert_eq!(view.clothing[1].items, ["Scarf", "Gloves"]);
    }

    #[test]
    fn view_fields() {
        let view = WeatherView::new("Springfield", &result_with(72.6, None));

        assert_eq!(view.city, "Springfield");
        assert_eq!(view.icon, "🌦️");
        assert_eq!(view.temperature, 73);
        assert_eq!(view.feels_like, 71);
        assert_eq!(view.temp_min, 68);
        assert_eq!(view.temp_max, 75);
        assert_eq!(view.description, "light rain");
        assert!(!view.has_clothing());
    }

    #[test]
    fn view_without_conditions_uses_defaults() {
        let mut result = result_with(50.0, None);
        result.weather.clear();

        let view = WeatherView::new("Nowhere", &result);
        assert_eq!(view.icon, DEFAULT_CONDITION_ICON);
        assert_eq!(view.description, "");
    }
}
