//! Transient markers travelling along connections.

use glam::DVec2;
use quiet_drift_core::{DriftError, Surface, Xorshift64};

use crate::node::Node;
use crate::style::Style;

/// A marker moving from one node to another.
///
/// Endpoints are indices into the owning Field's node arena. The Field
/// drops every signal when it rebuilds its nodes, so indices never outlive
/// the nodes they were taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    start: usize,
    end: usize,
    progress: f64,
    speed: f64,
    updates: u32,
    alive: bool,
}

impl Signal {
    /// Creates a live signal at the `start` end with a fixed `speed`.
    pub fn new(start: usize, end: usize, speed: f64) -> Self {
        Self {
            start,
            end,
            progress: 0.0,
            speed,
            updates: 0,
            alive: true,
        }
    }

    /// Creates a signal whose speed is uniform in `[min_speed, max_speed)`.
    pub fn spawn(
        start: usize,
        end: usize,
        min_speed: f64,
        max_speed: f64,
        rng: &mut Xorshift64,
    ) -> Self {
        Self::new(start, end, rng.next_range(min_speed, max_speed))
    }

    /// Node indices of the start and end of the connection.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Fraction of the way from start to end. Reaches at least 1 on death.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Advances progress by `speed`; the first time it reaches 1 the signal dies.
    ///
    /// Progress is recomputed from the update count rather than summed, so
    /// a signal with speed `s` dies after exactly `ceil(1 / s)` updates.
    pub fn update(&mut self) {
        if !self.alive {
            return;
        }
        self.updates = self.updates.saturating_add(1);
        self.progress = f64::from(self.updates) * self.speed;
        if self.progress >= 1.0 {
            self.alive = false;
        }
    }

    /// Interpolated position between the endpoints' *current* positions.
    ///
    /// Returns `None` if either index is outside `nodes`.
    pub fn position(&self, nodes: &[Node]) -> Option<DVec2> {
        let a = nodes.get(self.start)?.position;
        let b = nodes.get(self.end)?.position;
        Some(a.lerp(b, self.progress))
    }

    /// Draws the glowing marker. Dead or detached signals draw nothing.
    ///
    /// The glow is reset even when the fill fails.
    pub fn draw(
        &self,
        nodes: &[Node],
        surface: &mut dyn Surface,
        style: &Style,
    ) -> Result<(), DriftError> {
        if !self.alive {
            return Ok(());
        }
        let Some(at) = self.position(nodes) else {
            return Ok(());
        };
        surface.set_glow(style.signal_glow)?;
        let filled = surface.fill_circle(at, style.signal_radius, style.signal_color);
        surface.reset_glow()?;
        filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;
    use quiet_drift_core::{DrawCommand, Glow, RecordingSurface, Rgba, Stroke};

    fn pair() -> Vec<Node> {
        vec![
            Node::new(NodeId(0), DVec2::new(0.0, 0.0), DVec2::ZERO),
            Node::new(NodeId(1), DVec2::new(100.0, 0.0), DVec2::ZERO),
        ]
    }

    #[test]
    fn new_signal_starts_alive_at_zero() {
        let s = Signal::new(0, 1, 0.03);
        assert_eq!(s.progress(), 0.0);
        assert!(s.is_alive());
        assert_eq!(s.endpoints(), (0, 1));
    }

    #[test]
    fn half_speed_dies_after_exactly_two_updates() {
        let mut s = Signal::new(0, 1, 0.5);
        s.update();
        assert_eq!(s.progress(), 0.5);
        assert!(s.is_alive());
        s.update();
        assert_eq!(s.progress(), 1.0);
        assert!(!s.is_alive());
    }

    #[test]
    fn progress_grows_by_exactly_speed() {
        let mut s = Signal::new(0, 1, 0.125);
        let mut expected = 0.0;
        while s.is_alive() {
            s.update();
            expected += 0.125;
            assert_eq!(s.progress(), expected);
        }
    }

    #[test]
    fn lifetime_is_ceil_of_inverse_speed() {
        for &speed in &[0.5, 0.25, 0.375, 0.0625, 0.3, 0.1, 0.2, 0.05, 0.02, 0.025, 0.04] {
            let mut s = Signal::new(0, 1, speed);
            let mut updates = 0;
            while s.is_alive() {
                s.update();
                updates += 1;
            }
            assert_eq!(updates, (1.0_f64 / speed).ceil() as usize, "speed {speed}");
        }
    }

    #[test]
    fn tenth_speed_dies_on_the_tenth_update() {
        let mut s = Signal::new(0, 1, 0.1);
        for _ in 0..9 {
            s.update();
        }
        assert!(s.is_alive());
        assert!(s.progress() < 1.0);
        s.update();
        assert_eq!(s.progress(), 1.0);
        assert!(!s.is_alive());
    }

    #[test]
    fn steps_differ_by_speed() {
        let mut s = Signal::new(0, 1, 0.03);
        let mut previous = s.progress();
        while s.is_alive() {
            s.update();
            assert!((s.progress() - previous - 0.03).abs() < 1e-12);
            previous = s.progress();
        }
    }

    #[test]
    fn dead_signal_does_not_move_further() {
        let mut s = Signal::new(0, 1, 0.75);
        s.update();
        s.update();
        let frozen = s.progress();
        s.update();
        assert_eq!(s.progress(), frozen);
        assert!(!s.is_alive());
    }

    #[test]
    fn spawn_speed_within_range() {
        let mut rng = Xorshift64::new(1);
        for _ in 0..1000 {
            let s = Signal::spawn(0, 1, 0.02, 0.04, &mut rng);
            assert!((0.02..0.04).contains(&s.speed()));
        }
    }

    #[test]
    fn position_follows_live_node_positions() {
        let mut nodes = pair();
        let mut s = Signal::new(0, 1, 0.25);
        s.update();
        assert_eq!(s.position(&nodes), Some(DVec2::new(25.0, 0.0)));
        nodes[1].position = DVec2::new(100.0, 40.0);
        assert_eq!(s.position(&nodes), Some(DVec2::new(25.0, 10.0)));
    }

    #[test]
    fn position_with_stale_index_is_none() {
        assert_eq!(Signal::new(0, 5, 0.1).position(&pair()), None);
    }

    #[test]
    fn draw_sets_and_resets_glow() {
        let style = Style::default();
        let mut surface = RecordingSurface::new(100.0, 100.0);
        Signal::new(0, 1, 0.1)
            .draw(&pair(), &mut surface, &style)
            .unwrap();
        assert_eq!(
            surface.commands(),
            &[DrawCommand::Circle {
                center: DVec2::ZERO,
                radius: style.signal_radius,
                color: style.signal_color,
                glow: Some(style.signal_glow),
            }]
        );
        assert!(surface.active_glow().is_none());
    }

    #[test]
    fn dead_signal_is_not_drawn() {
        let mut s = Signal::new(0, 1, 1.5);
        s.update();
        let mut surface = RecordingSurface::new(100.0, 100.0);
        s.draw(&pair(), &mut surface, &Style::default()).unwrap();
        assert!(surface.commands().is_empty());
    }

    /// Fails every fill so the glow reset path can be observed.
    struct BrokenFill(RecordingSurface);

    impl Surface for BrokenFill {
        fn width(&self) -> f64 {
            self.0.width()
        }
        fn height(&self) -> f64 {
            self.0.height()
        }
        fn clear(&mut self) -> Result<(), DriftError> {
            self.0.clear()
        }
        fn fill_circle(&mut self, _: DVec2, _: f64, _: Rgba) -> Result<(), DriftError> {
            Err(DriftError::Surface("fill rejected".into()))
        }
        fn stroke_line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) -> Result<(), DriftError> {
            self.0.stroke_line(from, to, stroke)
        }
        fn set_glow(&mut self, glow: Glow) -> Result<(), DriftError> {
            self.0.set_glow(glow)
        }
        fn reset_glow(&mut self) -> Result<(), DriftError> {
            self.0.reset_glow()
        }
    }

    #[test]
    fn failed_fill_still_resets_glow() {
        let mut surface = BrokenFill(RecordingSurface::new(100.0, 100.0));
        let result = Signal::new(0, 1, 0.1).draw(&pair(), &mut surface, &Style::default());
        assert!(matches!(result, Err(DriftError::Surface(_))));
        assert!(surface.0.active_glow().is_none());
    }
}
