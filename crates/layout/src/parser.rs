//! Story JSON parsing

use crate::{Block, LayoutError, Result};

/// Parse a story (a JSON array of blocks)
pub fn parse_story(json: &str) -> Result<Vec<Block>> {
    serde_json::from_str(json).map_err(|e| LayoutError::ParseError(e.to_string()))
}

/// Serialize a story back to pretty-printed JSON
pub fn story_to_json(story: &[Block]) -> Result<String> {
    Ok(serde_json::to_string_pretty(story)?)
}
