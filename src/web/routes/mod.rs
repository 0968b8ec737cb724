//! Route handlers organized by functionality.

pub mod data;
pub mod health;
pub mod scenes;

use crate::scenes::parse_scene_index;
use crate::web::error::{WebError, WebResult};

/// Scene index from a path segment, saturated before clamping
fn scene_index(raw: &str) -> WebResult<i64> {
    parse_scene_index(raw)
        .ok_or_else(|| WebError::BadRequest(format!("Scene index '{}' is not an integer", raw)))
}
