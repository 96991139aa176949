//! Zone grid covering a whole map.

use realm_thing::{Point, Rectangle};

use crate::{Region, Zone, ZoneId};

/// Default zone side length in pixels.
///
/// Zones must be large enough that a moving thing cannot cross more than
/// one of them in a single tick. Smaller zones mean fewer candidates per
/// query but more zone changes to book-keep; larger ones regress toward
/// scanning the whole map.
pub const DEFAULT_ZONE_SIZE: u32 = 256;

/// A 2D grid of zones.
#[derive(Debug)]
pub struct ZoneGrid {
    /// Grid width in zones.
    width: u32,
    /// Grid height in zones.
    height: u32,
    /// Zone side length in pixels.
    zone_size: u32,
    /// All zones, row-major.
    zones: Vec<Zone>,
}

impl ZoneGrid {
    /// Create a grid covering a `map_width` x `map_height` pixel map.
    ///
    /// Each dimension is rounded up to a whole number of zones, and is at
    /// least one zone. Callers bound the zone count beforehand; zone IDs
    /// are `u32`.
    #[must_use]
    pub fn new(map_width: u32, map_height: u32, zone_size: u32) -> Self {
        let zone_size = zone_size.max(1);
        let width = map_width.div_ceil(zone_size).max(1);
        let height = map_height.div_ceil(zone_size).max(1);

        let count = width as usize * height as usize;
        let mut zones = Vec::with_capacity(count);
        zones.resize_with(count, Zone::new);

        Self {
            width,
            height,
            zone_size,
            zones,
        }
    }

    /// Grid width in zones.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in zones.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Zone side length in pixels.
    #[must_use]
    pub const fn zone_size(&self) -> u32 {
        self.zone_size
    }

    /// Zone containing a pixel position.
    ///
    /// Positions outside the map are clamped to the nearest border zone.
    #[must_use]
    pub fn zone_at(&self, position: Point) -> ZoneId {
        let x = self.column(position.x);
        let y = self.row(position.y);
        ZoneId::from_coords(x, y, self.width)
    }

    /// Zone by ID. Panics on an ID outside the grid.
    #[must_use]
    pub fn zone(&self, id: ZoneId) -> &Zone {
        &self.zones[id.0 as usize]
    }

    /// Zone by ID, mutably. Panics on an ID outside the grid.
    #[must_use]
    pub fn zone_mut(&mut self, id: ZoneId) -> &mut Zone {
        &mut self.zones[id.0 as usize]
    }

    /// Zone by ID, if inside the grid.
    #[must_use]
    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.0 as usize)
    }

    /// Add every zone overlapping the square of side `2 * radius` centered on
    /// `center`.
    ///
    /// The square over-approximates the circle of the same radius: corner
    /// zones outside the circle are included.
    pub fn fill_region(&self, region: &mut Region, center: Point, radius: u32) {
        let radius = i64::from(radius);
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));
        self.fill_box(region, cx - radius, cy - radius, cx + radius, cy + radius);
    }

    /// Add every zone overlapping a rectangle.
    pub fn fill_region_rect(&self, region: &mut Region, rect: &Rectangle) {
        let (x, y) = (i64::from(rect.x), i64::from(rect.y));
        self.fill_box(region, x, y, x + i64::from(rect.w), y + i64::from(rect.h));
    }

    /// Clear the per-tick destination sets of every zone.
    pub fn clear_destinations(&mut self) {
        for zone in &mut self.zones {
            zone.clear_destinations();
        }
    }

    /// Total number of zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Every zone with its ID, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, &Zone)> {
        self.zones
            .iter()
            .enumerate()
            .map(|(index, zone)| (ZoneId(index as u32), zone))
    }

    /// Add the zones covering the pixel box `[ax, bx] x [ay, by]`, clamped
    /// to the grid.
    fn fill_box(&self, region: &mut Region, ax: i64, ay: i64, bx: i64, by: i64) {
        let (x0, x1) = (self.column_wide(ax), self.column_wide(bx));
        let (y0, y1) = (self.row_wide(ay), self.row_wide(by));

        for y in y0..=y1 {
            for x in x0..=x1 {
                region.insert(ZoneId::from_coords(x, y, self.width));
            }
        }
    }

    fn column(&self, x: i32) -> u32 {
        self.column_wide(i64::from(x))
    }

    fn row(&self, y: i32) -> u32 {
        self.row_wide(i64::from(y))
    }

    fn column_wide(&self, x: i64) -> u32 {
        (x.max(0) / i64::from(self.zone_size)).min(i64::from(self.width) - 1) as u32
    }

    fn row_wide(&self, y: i64) -> u32 {
        (y.max(0) / i64::from(self.zone_size)).min(i64::from(self.height) - 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_4x4() -> ZoneGrid {
        ZoneGrid::new(1024, 1024, 256)
    }

    #[test]
    fn test_dimensions_round_up() {
        let grid = grid_4x4();
        assert_eq!((grid.width(), grid.height()), (4, 4));
        assert_eq!(grid.len(), 16);

        let grid = ZoneGrid::new(1025, 100, 256);
        assert_eq!((grid.width(), grid.height()), (5, 1));
    }

    #[test]
    fn test_zone_at_position() {
        let grid = grid_4x4();

        assert_eq!(grid.zone_at(Point::new(10, 10)), ZoneId(0));
        assert_eq!(grid.zone_at(Point::new(1000, 1000)), ZoneId(15));
        assert_eq!(grid.zone_at(Point::new(255, 0)), ZoneId(0));
        assert_eq!(grid.zone_at(Point::new(256, 0)), ZoneId(1));
        assert_eq!(grid.zone_at(Point::new(0, 256)), ZoneId(4));
    }

    #[test]
    fn test_zone_at_clamps_outside_points() {
        let grid = grid_4x4();

        assert_eq!(grid.zone_at(Point::new(-5, -5)), ZoneId(0));
        assert_eq!(grid.zone_at(Point::new(5000, 10)), ZoneId(3));
        assert_eq!(grid.zone_at(Point::new(10, 5000)), ZoneId(12));
    }

    #[test]
    fn test_fill_region_covers_bounding_box() {
        let grid = grid_4x4();

        for (center, radius) in [
            (Point::new(10, 10), 0),
            (Point::new(300, 300), 100),
            (Point::new(512, 512), 1),
            (Point::new(1000, 20), 300),
            (Point::new(600, 700), 900),
        ] {
            let mut region = Region::new();
            grid.fill_region(&mut region, center, radius);

            assert!(region.contains(grid.zone_at(center)));

            // Every zone whose footprint meets the box is present
            let r = radius as i32;
            for (id, _) in grid.iter() {
                let zx = (id.x(grid.width()) * 256) as i32;
                let zy = (id.y(grid.width()) * 256) as i32;
                let overlaps = zx <= center.x + r
                    && zx + 255 >= center.x - r
                    && zy <= center.y + r
                    && zy + 255 >= center.y - r;
                assert_eq!(region.contains(id), overlaps, "{id:?} for {center} r={radius}");
            }
        }
    }

    #[test]
    fn test_fill_region_includes_corners() {
        let grid = grid_4x4();
        let mut region = Region::new();

        // Square footprint reaches into all four diagonal neighbours
        grid.fill_region(&mut region, Point::new(384, 384), 200);
        assert_eq!(region.len(), 9);
        assert!(region.contains(ZoneId(0)));
        assert!(region.contains(ZoneId(10)));
    }

    #[test]
    fn test_fill_region_rect() {
        let grid = grid_4x4();
        let mut region = Region::new();

        grid.fill_region_rect(&mut region, &Rectangle::new(200, 10, 100, 300));
        let ids: Vec<_> = region.iter().map(|z| z.0).collect();
        assert_eq!(ids, vec![0, 1, 4, 5]);

        // Clamped to the grid
        let mut region = Region::new();
        grid.fill_region_rect(&mut region, &Rectangle::new(-50, -50, 5000, 10));
        let ids: Vec<_> = region.iter().map(|z| z.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}
