//! File I/O for level packs.
//!
//! Packs are stored as pretty-printed JSON:
//!
//! ```json
//! {
//!   "shapes": [{ "name": "O", "pattern": [[1, 1], [1, 1]], "color": 7 }],
//!   "levels": [{
//!     "rows": 2, "cols": 4,
//!     "locked_pieces": [{ "shape": 0, "anchor": { "row": 0, "col": 0 }, "rotation": 0 }],
//!     "available_shapes": [0]
//!   }]
//! }
//! ```
//!
//! Every pack is validated on the way in.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::levels::{LevelError, LevelPack};

#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("cannot access level pack: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed level pack: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid level pack: {0}")]
    Invalid(#[from] LevelError),
}

/// Parses and validates a pack from JSON text.
pub fn from_json_str(text: &str) -> Result<LevelPack, PackError> {
    let pack: LevelPack = serde_json::from_str(text)?;
    if let Err(err) = pack.validate() {
        warn!("rejecting level pack: {err}");
        return Err(err.into());
    }
    Ok(pack)
}

/// Serializes a pack as pretty-printed JSON.
pub fn to_json_string(pack: &LevelPack) -> Result<String, PackError> {
    Ok(serde_json::to_string_pretty(pack)?)
}

/// Loads and validates a pack from `path`.
pub fn load(path: &Path) -> Result<LevelPack, PackError> {
    let text = fs::read_to_string(path)?;
    let pack = from_json_str(&text)?;
    info!(
        "loaded {} levels and {} shapes from {}",
        pack.levels.len(),
        pack.shapes.len(),
        path.display()
    );
    Ok(pack)
}

/// Writes `pack` to `path`, replacing any existing file.
pub fn save(pack: &LevelPack, path: &Path) -> Result<(), PackError> {
    let mut text = to_json_string(pack)?;
    text.push('\n');
    fs::write(path, text)?;
    info!("wrote {} levels to {}", pack.levels.len(), path.display());
    Ok(())
}
