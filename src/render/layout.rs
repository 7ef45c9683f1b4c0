//! Plan-space to drawing-space projection
//!
//! Plan space is meters with x growing east and y growing south. Drawing
//! space is pixels: `(x - min_x) * scale + padding`.

use crate::core::config::RenderConfig;
use crate::core::types::{Point, Rect};
use crate::model::{FloorPlan, Room, Side, WindowPlacement};

/// Axis-aligned bounding box over room rectangles (meters)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounding box of all rooms; an empty slice gives a zero box at the origin
    pub fn of(rooms: &[Room]) -> Self {
        let mut iter = rooms.iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };

        iter.fold(
            Self {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x + first.width,
                max_y: first.y + first.height,
            },
            |b, room| Self {
                min_x: b.min_x.min(room.x),
                min_y: b.min_y.min(room.y),
                max_x: b.max_x.max(room.x + room.width),
                max_y: b.max_y.max(room.y + room.height),
            },
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Linear projection from plan meters to drawing pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub bounds: Bounds,
    pub scale: f64,
    pub padding: f64,
}

impl Projection {
    pub fn new(bounds: Bounds, scale: f64, padding: f64) -> Self {
        Self {
            bounds,
            scale,
            padding,
        }
    }

    pub fn for_plan(plan: &FloorPlan, config: &RenderConfig) -> Self {
        Self::new(Bounds::of(&plan.rooms), config.scale, config.padding)
    }

    pub fn point(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.bounds.min_x) * self.scale + self.padding,
            (p.y - self.bounds.min_y) * self.scale + self.padding,
        )
    }

    pub fn rect(&self, r: Rect) -> Rect {
        let origin = self.point(Point::new(r.x, r.y));
        Rect::new(origin.x, origin.y, r.width * self.scale, r.height * self.scale)
    }

    /// Canvas (width, height) in pixels
    pub fn canvas_size(&self) -> (f64, f64) {
        (
            self.bounds.width() * self.scale + 2.0 * self.padding,
            self.bounds.height() * self.scale + 2.0 * self.padding,
        )
    }
}

/// End points of a window on its wall (plan meters)
///
/// `position` is clamped to 0..1 and the opening is clipped to the wall.
pub fn window_segment(room: &Room, window: &WindowPlacement) -> (Point, Point) {
    let t = window.position.clamp(0.0, 1.0);
    let half = window.width.max(0.0) / 2.0;

    match window.side {
        Side::North | Side::South => {
            let y = if window.side == Side::North {
                room.y
            } else {
                room.y + room.height
            };
            let center = room.x + t * room.width;
            let start = (center - half).max(room.x);
            let end = (center + half).min(room.x + room.width);
            (Point::new(start, y), Point::new(end, y))
        }
        Side::West | Side::East => {
            let x = if window.side == Side::West {
                room.x
            } else {
                room.x + room.width
            };
            let center = room.y + t * room.height;
            let start = (center - half).max(room.y);
            let end = (center + half).min(room.y + room.height);
            (Point::new(x, start), Point::new(x, end))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoomCategory;
    use proptest::prelude::*;

    fn room(x: f64, y: f64, width: f64, height: f64) -> Room {
        Room {
            id: String::new(),
            name: "R".into(),
            category: RoomCategory::Living,
            x,
            y,
            width,
            height,
            windows: Vec::new(),
            rationale: String::new(),
        }
    }

    #[test]
    fn test_bounds_of_two_rooms() {
        let rooms = vec![room(2.0, 1.0, 4.0, 3.0), room(-1.0, 5.0, 2.0, 2.0)];
        let bounds = Bounds::of(&rooms);
        assert_eq!(
            bounds,
            Bounds {
                min_x: -1.0,
                min_y: 1.0,
                max_x: 6.0,
                max_y: 7.0
            }
        );
    }

    #[test]
    fn test_empty_plan_canvas_is_padding_only() {
        let projection = Projection::new(Bounds::of(&[]), 40.0, 40.0);
        assert_eq!(projection.canvas_size(), (80.0, 80.0));
    }

    #[test]
    fn test_projection_offsets_by_min_corner() {
        let rooms = vec![room(2.0, 3.0, 4.0, 2.0)];
        let projection = Projection::new(Bounds::of(&rooms), 10.0, 5.0);
        let drawn = projection.rect(rooms[0].rect());
        assert_eq!(drawn, Rect::new(5.0, 5.0, 40.0, 20.0));
        assert_eq!(projection.canvas_size(), (50.0, 30.0));
    }

    #[test]
    fn test_window_segment_on_each_side() {
        let r = room(0.0, 0.0, 4.0, 2.0);
        let north = WindowPlacement {
            side: Side::North,
            position: 0.5,
            width: 1.0,
            shaded: false,
        };
        assert_eq!(
            window_segment(&r, &north),
            (Point::new(1.5, 0.0), Point::new(2.5, 0.0))
        );

        let east = WindowPlacement {
            side: Side::East,
            position: 0.0,
            width: 1.0,
            shaded: false,
        };
        // Clipped at the wall start
        assert_eq!(
            window_segment(&r, &east),
            (Point::new(4.0, 0.0), Point::new(4.0, 0.5))
        );
    }

    fn arb_room() -> impl Strategy<Value = Room> {
        (-50.0..50.0f64, -50.0..50.0f64, 0.5..20.0f64, 0.5..20.0f64)
            .prop_map(|(x, y, w, h)| room(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_bounds_contain_every_room(rooms in prop::collection::vec(arb_room(), 1..20)) {
            let b = Bounds::of(&rooms);
            for r in &rooms {
                prop_assert!(b.min_x <= r.x);
                prop_assert!(b.min_y <= r.y);
                prop_assert!(b.max_x >= r.x + r.width);
                prop_assert!(b.max_y >= r.y + r.height);
            }
        }

        #[test]
        fn prop_canvas_matches_bounds(
            rooms in prop::collection::vec(arb_room(), 1..20),
            scale in 1.0..100.0f64,
            padding in 0.0..80.0f64,
        ) {
            let projection = Projection::new(Bounds::of(&rooms), scale, padding);
            let b = projection.bounds;
            let (w, h) = projection.canvas_size();
            prop_assert!((w - ((b.max_x - b.min_x) * scale + 2.0 * padding)).abs() < 1e-9);
            prop_assert!((h - ((b.max_y - b.min_y) * scale + 2.0 * padding)).abs() < 1e-9);

            // Every projected room stays inside the canvas
            for r in &rooms {
                let d = projection.rect(r.rect());
                prop_assert!(d.x >= padding - 1e-9);
                prop_assert!(d.max_x() <= w - padding + 1e-6);
            }
        }
    }
}
