//! Map configuration.

use realm_spatial::DEFAULT_ZONE_SIZE;
use serde::Deserialize;

use crate::{MapError, MapResult};

/// Side length of one map tile in pixels.
pub const TILE_SIZE: u32 = 32;

/// Largest number of zones a map may be split into.
pub const MAX_ZONES: u64 = 1 << 20;

/// Dimensions of a map and of its zones.
///
/// ```json
/// { "width": 3200, "height": 2400, "zone_size": 256 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MapConfig {
    /// Map width in pixels.
    pub width: u32,
    /// Map height in pixels.
    pub height: u32,
    /// Zone side length in pixels.
    #[serde(default = "default_zone_size")]
    pub zone_size: u32,
}

const fn default_zone_size() -> u32 {
    DEFAULT_ZONE_SIZE
}

impl MapConfig {
    /// Config for a map of `width` x `height` pixels with default zones.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            zone_size: DEFAULT_ZONE_SIZE,
        }
    }

    /// Config for a map measured in tiles.
    ///
    /// Sizes past `u32::MAX` pixels saturate and are then rejected by
    /// [`MapConfig::validate`].
    #[must_use]
    pub const fn from_tiles(width: u32, height: u32) -> Self {
        Self::new(width.saturating_mul(TILE_SIZE), height.saturating_mul(TILE_SIZE))
    }

    /// Same map with another zone side length.
    #[must_use]
    pub const fn with_zone_size(mut self, zone_size: u32) -> Self {
        self.zone_size = zone_size;
        self
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> MapResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty maps, empty zones and grids of more than [`MAX_ZONES`].
    pub fn validate(&self) -> MapResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidConfig(format!(
                "map must not be empty ({}x{})",
                self.width, self.height
            )));
        }
        if self.zone_size == 0 {
            return Err(MapError::InvalidConfig("zone size must be positive".into()));
        }

        let columns = u64::from(self.width.div_ceil(self.zone_size));
        let rows = u64::from(self.height.div_ceil(self.zone_size));
        match columns.checked_mul(rows) {
            Some(zones) if zones <= MAX_ZONES => Ok(()),
            _ => Err(MapError::InvalidConfig(format!(
                "{columns}x{rows} zones of {} px exceed the limit of {MAX_ZONES}",
                self.zone_size
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_default_zone_size() {
        let config = MapConfig::from_json(r#"{ "width": 1024, "height": 512 }"#).unwrap();
        assert_eq!(config, MapConfig::new(1024, 512));
        assert_eq!(config.zone_size, 256);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            MapConfig::from_json(r#"{ "width": 0, "height": 512 }"#),
            Err(MapError::InvalidConfig(_))
        ));
        assert!(matches!(
            MapConfig::from_json(r#"{ "width": 10, "height": 10, "zone_size": 0 }"#),
            Err(MapError::InvalidConfig(_))
        ));
        assert!(matches!(
            MapConfig::from_json("{ \"width\": 10 }"),
            Err(MapError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_rejects_too_many_zones() {
        let huge = r#"{ "width": 4294967295, "height": 4294967295, "zone_size": 1 }"#;
        assert!(matches!(MapConfig::from_json(huge), Err(MapError::InvalidConfig(_))));

        // 1024 x 1024 zones is the largest grid accepted
        assert!(MapConfig::new(1024, 1024).with_zone_size(1).validate().is_ok());
        assert!(matches!(
            MapConfig::new(1025, 1024).with_zone_size(1).validate(),
            Err(MapError::InvalidConfig(_))
        ));
        assert!(MapConfig::new(u32::MAX, 1).with_zone_size(u32::MAX).validate().is_ok());
    }

    #[test]
    fn test_from_tiles_saturates() {
        let config = MapConfig::from_tiles(u32::MAX, 10);
        assert_eq!(config.width, u32::MAX);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_tiles() {
        let config = MapConfig::from_tiles(100, 20).with_zone_size(128);
        assert_eq!((config.width, config.height, config.zone_size), (3200, 640, 128));
    }
}
