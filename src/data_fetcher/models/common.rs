use super::game::Game;
use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Envelope every game-data endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamesResponse {
    #[serde(default)]
    pub games: Vec<Value>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

/// A single upstream game row that knows how to become a [`Game`].
pub trait WireGame: DeserializeOwned {
    fn into_game(self) -> Result<Game, AppError>;
}

/// Decodes and normalizes every row of a response.
///
/// Rows that fail to decode are logged and skipped so one bad entry does not
/// blank the whole widget.
pub fn normalize_rows<W: WireGame>(rows: Vec<Value>) -> Vec<Game> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            match serde_json::from_value::<W>(row)
                .map_err(AppError::from)
                .and_then(WireGame::into_game)
            {
                Ok(game) => Some(game),
                Err(e) => {
                    warn!("Skipping game row {index}: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Reads a score that may arrive as an integer, a float, a numeric string,
/// a placeholder dash or null.
pub fn score_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Reads an id that may arrive as a string or a number.
pub fn id_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
