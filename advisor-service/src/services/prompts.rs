//! Prompt construction for the generative-language API.

use crate::models::SensorReading;

const EXPERT_PERSONA: &str = "As a water quality and plant health expert";

const NO_MARKDOWN: &str =
    "Do not use any asterisks, bullet points, or markdown formatting in your response.";

pub const RECOMMENDATION_WORD_LIMIT: u32 = 150;
pub const SEARCH_WORD_LIMIT: u32 = 200;

/// `pH: 6.50, TDS: 450.00 ppm, Temperature: 24.00°C, Humidity: 60.00%.`
fn format_reading(reading: &SensorReading) -> String {
    format!(
        "pH: {:.2}, TDS: {:.2} ppm, Temperature: {:.2}°C, Humidity: {:.2}%.",
        reading.ph, reading.tds, reading.temperature, reading.humidity
    )
}

/// Prompt asking for an actionable recommendation for the given readings.
pub fn build_recommendation_prompt(reading: &SensorReading) -> String {
    format!(
        "{EXPERT_PERSONA}, provide a concise practical recommendation based on these sensor readings: \
         {} Focus on immediate actions needed for optimal water quality and plant health. \
         Keep response under {RECOMMENDATION_WORD_LIMIT} words. {NO_MARKDOWN}",
        format_reading(reading)
    )
}

/// Prompt asking about `term` in the context of the given readings.
///
/// The term is embedded verbatim.
pub fn build_search_prompt(term: &str, reading: &SensorReading) -> String {
    format!(
        "{EXPERT_PERSONA}, provide specific information about '{term}' \
         in the context of current sensor readings: {} \
         Focus on practical advice related to the search term. \
         Keep response under {SEARCH_WORD_LIMIT} words. {NO_MARKDOWN}",
        format_reading(reading)
    )
}
