//! Default instances for each entity kind.
//!
//! Fixed placement reproduces the classic toolbar coordinates; scatter
//! placement moves the entity's anchor to a random point inside the canvas
//! margins, keeping the shape of line-like entities.

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use rand::Rng;

use crate::model::{Arrow, ArrowStyle, Ball, Pick, Player, Point, Team, Zone};
use crate::settings::Placement;

/// Vertical gap between successive fixed-placement players of one team.
const PLAYER_STAGGER: f32 = 40.0;
const DEFAULT_ZONE_RADIUS: f32 = 50.0;
const DEFAULT_PICK_LENGTH: f32 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

pub struct Factory<R> {
    placement: Placement,
    bounds: Bounds,
    rng: R,
}

impl<R: Rng> Factory<R> {
    pub fn new(placement: Placement, bounds: Bounds, rng: R) -> Self {
        Self {
            placement,
            bounds,
            rng,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// `index` is the number of players the team already has.
    pub fn player(&mut self, team: Team, index: usize) -> Player {
        let home = team.home();
        let fixed = Point::new(home.x, home.y + PLAYER_STAGGER * index as f32);
        let pos = self.place(fixed);
        Player::new(team, pos, format!("{}{}", team.label_prefix(), index + 1))
    }

    pub fn ball(&mut self) -> Ball {
        Ball {
            pos: self.place(Point::new(300.0, 100.0)),
        }
    }

    pub fn arrow(&mut self, style: ArrowStyle) -> Arrow {
        let (start, end) = match style {
            ArrowStyle::Solid => (Point::new(400.0, 100.0), Point::new(500.0, 150.0)),
            ArrowStyle::Dashed => (Point::new(400.0, 200.0), Point::new(500.0, 250.0)),
            ArrowStyle::Emphasis => (Point::new(400.0, 300.0), Point::new(500.0, 350.0)),
        };
        let shift = self.place(start) - start;
        Arrow::straight(start + shift, end + shift, style)
    }

    pub fn pick(&mut self) -> Pick {
        let start = Point::new(700.0, 200.0);
        let end = Point::new(start.x + DEFAULT_PICK_LENGTH, start.y);
        let shift = self.place(start) - start;
        Pick::new(start + shift, end + shift)
    }

    pub fn zone(&mut self) -> Zone {
        Zone::new(self.place(Point::new(600.0, 300.0)), DEFAULT_ZONE_RADIUS)
    }

    fn place(&mut self, fixed: Point) -> Point {
        match self.placement {
            Placement::Fixed => fixed,
            Placement::Scatter => Point::new(
                self.scatter_axis(self.bounds.width, fixed.x),
                self.scatter_axis(self.bounds.height, fixed.y),
            ),
        }
    }

    fn scatter_axis(&mut self, extent: f32, fallback: f32) -> f32 {
        let lo = self.bounds.margin;
        let hi = extent - self.bounds.margin;
        if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            fallback
        }
    }
}
