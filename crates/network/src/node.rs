//! Drifting anchor points.

use glam::DVec2;
use quiet_drift_core::{DriftError, Surface, Xorshift64};

use crate::style::Style;

/// Identity of a node, unique across every node a [`Field`](crate::Field)
/// has ever created. Resizing hands out fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// A point drifting at constant velocity and bouncing off the viewport edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    pub position: DVec2,
    pub velocity: DVec2,
}

impl Node {
    pub fn new(id: NodeId, position: DVec2, velocity: DVec2) -> Self {
        Self {
            id,
            position,
            velocity,
        }
    }

    /// Places a node uniformly inside `[0, width) x [0, height)` with each
    /// velocity component uniform in `[-drift/2, drift/2)`.
    ///
    /// A zero-sized viewport collapses every node onto that axis' origin.
    pub fn random(id: NodeId, width: f64, height: f64, drift: f64, rng: &mut Xorshift64) -> Self {
        let x = rng.next_f64() * width;
        let y = rng.next_f64() * height;
        let vx = rng.next_centered(drift);
        let vy = rng.next_centered(drift);
        Self::new(id, DVec2::new(x, y), DVec2::new(vx, vy))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// One Euler step of unit length, then reflection.
    ///
    /// Each axis is checked on its own: leaving `[0, width]` (or
    /// `[0, height]`) negates that velocity component. Position is not
    /// clamped, so a node may sit up to one step outside the bounds for a
    /// frame before it heads back in.
    pub fn update(&mut self, width: f64, height: f64) {
        self.position += self.velocity;
        if self.position.x < 0.0 || self.position.x > width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > height {
            self.velocity.y = -self.velocity.y;
        }
    }

    pub fn distance(&self, other: &Node) -> f64 {
        self.position.distance(other.position)
    }

    pub fn draw(&self, surface: &mut dyn Surface, style: &Style) -> Result<(), DriftError> {
        surface.fill_circle(self.position, style.node_radius, style.node_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiet_drift_core::{DrawCommand, RecordingSurface};

    fn node(x: f64, y: f64, vx: f64, vy: f64) -> Node {
        Node::new(NodeId(0), DVec2::new(x, y), DVec2::new(vx, vy))
    }

    #[test]
    fn update_moves_by_velocity() {
        let mut n = node(10.0, 10.0, 0.5, -0.25);
        n.update(100.0, 100.0);
        assert_eq!(n.position, DVec2::new(10.5, 9.75));
        assert_eq!(n.velocity, DVec2::new(0.5, -0.25));
    }

    #[test]
    fn crossing_left_edge_flips_vx_once_and_returns() {
        let mut n = node(0.05, 50.0, -0.1, 0.0);
        n.update(100.0, 100.0);
        assert!(n.position.x < 0.0);
        assert_eq!(n.velocity.x, 0.1);
        let outside = n.position.x;
        n.update(100.0, 100.0);
        assert!(n.position.x > outside, "node should head back inside");
        assert_eq!(n.velocity.x, 0.1);
    }

    #[test]
    fn crossing_right_edge_flips_vx() {
        let mut n = node(99.95, 50.0, 0.1, 0.0);
        n.update(100.0, 100.0);
        assert!(n.position.x > 100.0);
        assert_eq!(n.velocity.x, -0.1);
    }

    #[test]
    fn corner_crossing_flips_both_axes_in_one_step() {
        let mut n = node(0.0, 0.0, -0.1, -0.1);
        n.update(100.0, 100.0);
        assert_eq!(n.velocity, DVec2::new(0.1, 0.1));
    }

    #[test]
    fn sitting_exactly_on_the_edge_does_not_reflect() {
        let mut n = node(99.0, 50.0, 1.0, 0.0);
        n.update(100.0, 100.0);
        assert_eq!(n.position.x, 100.0);
        assert_eq!(n.velocity.x, 1.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = node(0.0, 0.0, 0.0, 0.0);
        let b = node(3.0, 4.0, 0.0, 0.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn random_node_lies_inside_bounds() {
        let mut rng = Xorshift64::new(9);
        for i in 0..500 {
            let n = Node::random(NodeId(i), 320.0, 200.0, 0.2, &mut rng);
            assert!((0.0..=320.0).contains(&n.position.x));
            assert!((0.0..=200.0).contains(&n.position.y));
            assert!(n.velocity.x.abs() <= 0.1 && n.velocity.y.abs() <= 0.1);
        }
    }

    #[test]
    fn random_node_in_zero_viewport_sits_at_origin() {
        let mut rng = Xorshift64::new(9);
        let n = Node::random(NodeId(0), 0.0, 0.0, 0.2, &mut rng);
        assert_eq!(n.position, DVec2::ZERO);
        assert!(n.velocity.is_finite());
    }

    #[test]
    fn draw_fills_one_circle_in_node_style() {
        let style = Style::default();
        let mut surface = RecordingSurface::new(10.0, 10.0);
        node(2.0, 3.0, 0.0, 0.0).draw(&mut surface, &style).unwrap();
        assert_eq!(
            surface.commands(),
            &[DrawCommand::Circle {
                center: DVec2::new(2.0, 3.0),
                radius: style.node_radius,
                color: style.node_color,
                glow: None,
            }]
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn overshoot_is_bounded_by_one_step(
                seed: u64,
                width in 0.0_f64..500.0,
                height in 0.0_f64..500.0,
                steps in 1_usize..2000,
            ) {
                let mut rng = Xorshift64::new(seed);
                let mut n = Node::random(NodeId(0), width, height, 0.2, &mut rng);
                let (vx, vy) = (n.velocity.x.abs(), n.velocity.y.abs());
                for _ in 0..steps {
                    n.update(width, height);
                    prop_assert!(n.position.x >= -vx - 1e-9 && n.position.x <= width + vx + 1e-9,
                        "x = {} escaped [-{vx}, {}]", n.position.x, width + vx);
                    prop_assert!(n.position.y >= -vy - 1e-9 && n.position.y <= height + vy + 1e-9,
                        "y = {} escaped [-{vy}, {}]", n.position.y, height + vy);
                }
            }
        }
    }
}
