//! Training summary messages and their renderings

use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::{settings::Style, Table, Tabled};

use crate::error::FitStatsError;

/// Summary of a completed training, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoMessage {
    pub training_type: String,
    /// Hours
    pub duration: f64,
    /// Kilometres
    pub distance: f64,
    /// km/h
    pub speed: f64,
    pub calories: f64,
}

impl InfoMessage {
    pub fn get_message(&self) -> String {
        format!(
            "Training type: {}; Duration: {:.3} h.; Distance: {:.3} km; \
             Mean speed: {:.3} km/h; Calories burned: {:.3}.",
            self.training_type, self.duration, self.distance, self.speed, self.calories
        )
    }
}

impl fmt::Display for InfoMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_message())
    }
}

/// How the driver prints summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One summary sentence per training
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// A single table for the whole batch
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Training type")]
    training_type: String,
    #[tabled(rename = "Duration (h)")]
    duration: String,
    #[tabled(rename = "Distance (km)")]
    distance: String,
    #[tabled(rename = "Mean speed (km/h)")]
    speed: String,
    #[tabled(rename = "Calories")]
    calories: String,
}

impl From<&InfoMessage> for SummaryRow {
    fn from(message: &InfoMessage) -> Self {
        Self {
            training_type: message.training_type.clone(),
            duration: format!("{:.3}", message.duration),
            distance: format!("{:.3}", message.distance),
            speed: format!("{:.3}", message.speed),
            calories: format!("{:.3}", message.calories),
        }
    }
}

/// Render a batch of summaries in the requested format.
///
/// Returns one string per output line for `Text` and `Json`, and a single
/// multi-line string for `Table`. An empty batch renders nothing.
pub fn render(messages: &[InfoMessage], format: OutputFormat) -> Result<Vec<String>, FitStatsError> {
    match format {
        OutputFormat::Text => Ok(messages.iter().map(InfoMessage::get_message).collect()),
        OutputFormat::Json => messages
            .iter()
            .map(|message| serde_json::to_string(message).map_err(FitStatsError::from))
            .collect(),
        OutputFormat::Table => {
            if messages.is_empty() {
                return Ok(Vec::new());
            }
            let rows: Vec<SummaryRow> = messages.iter().map(SummaryRow::from).collect();
            let mut table = Table::new(rows);
            table.with(Style::modern());
            Ok(vec![table.to_string()])
        }
    }
}
