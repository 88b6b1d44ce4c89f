//! Rider demand estimate from current weather and nearby events.
//!
//! A coarse heuristic: bad weather and big events push demand up.

use serde::{Deserialize, Serialize};

/// Weather codes treated as bad enough to keep people off the street.
const BAD_WEATHER_CODES: [u32; 3] = [3, 4, 5];
const COLD_F: f64 = 40.0;
const HOT_F: f64 = 90.0;
const BUSY_EVENT_COUNT: usize = 5;
const MAJOR_EVENT_KEYWORDS: [&str; 2] = ["concert", "game"];

/// Current conditions as reported by Open-Meteo's `current_weather` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(rename = "weathercode")]
    pub weather_code: u32,
    /// Degrees Fahrenheit.
    pub temperature: f64,
    #[serde(default, rename = "windspeed")]
    pub wind_speed: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DemandLevel {
    Low,
    Moderate,
    High,
}

impl DemandLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            3.. => DemandLevel::High,
            1..=2 => DemandLevel::Moderate,
            0 => DemandLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DemandLevel::Low => "Low",
            DemandLevel::Moderate => "Moderate",
            DemandLevel::High => "High",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            DemandLevel::High => "Expect surge pricing and high rider volume.",
            DemandLevel::Moderate => "Steady business expected with some peak hours.",
            DemandLevel::Low => {
                "Demand is currently low. Wait for events to start or weather to change."
            }
        }
    }
}

fn weather_score(weather: &CurrentWeather) -> u32 {
    if BAD_WEATHER_CODES.contains(&weather.weather_code) {
        2
    } else if weather.temperature < COLD_F || weather.temperature > HOT_F {
        1
    } else {
        0
    }
}

fn is_major_event(title: &str) -> bool {
    let title = title.to_lowercase();
    MAJOR_EVENT_KEYWORDS.iter().any(|keyword| title.contains(keyword))
}

fn events_score<T: AsRef<str>>(event_titles: &[T]) -> u32 {
    if event_titles.len() > BUSY_EVENT_COUNT {
        2
    } else if event_titles.iter().any(|title| is_major_event(title.as_ref())) {
        3
    } else if !event_titles.is_empty() {
        1
    } else {
        0
    }
}

pub fn demand_score<T: AsRef<str>>(weather: &CurrentWeather, event_titles: &[T]) -> u32 {
    weather_score(weather) + events_score(event_titles)
}

/// Without weather data there is nothing to go on, so demand is Moderate.
pub fn estimate_demand<T: AsRef<str>>(
    weather: Option<&CurrentWeather>,
    event_titles: &[T],
) -> DemandLevel {
    match weather {
        Some(weather) => DemandLevel::from_score(demand_score(weather, event_titles)),
        None => DemandLevel::Moderate,
    }
}
