#![deny(unsafe_code)]
//! Drifting node network with travelling signals.
//!
//! A sparse set of nodes drifts across the viewport and bounces off its
//! edges. Every frame, nodes closer than a threshold are joined by a faint
//! line, and each such connection has a small chance of launching a glowing
//! signal that slides from one end to the other. The result reads as a
//! schematic network pulsing with quiet activity.
//!
//! [`Field`] owns all of it and implements [`Animation`], so any driver
//! (the CLI's raster loop, the browser's `requestAnimationFrame` loop) can
//! run it against any [`Surface`].

pub mod node;
pub mod signal;
pub mod style;

use log::{debug, trace};
use quiet_drift_core::params::{param_f64_clamped, param_usize};
use quiet_drift_core::{Animation, DVec2, DriftError, Surface, Xorshift64};
use serde_json::{json, Value};

pub use node::{Node, NodeId};
pub use signal::Signal;
pub use style::Style;

/// Nodes per viewport. Low for a sparse, schematic look.
const DEFAULT_NODE_COUNT: usize = 40;
/// Nodes strictly closer than this are connected.
const DEFAULT_CONNECTION_DISTANCE: f64 = 200.0;
/// Per connected pair, per frame.
const DEFAULT_SPAWN_CHANCE: f64 = 0.0005;
/// Velocity components are uniform in `[-drift/2, drift/2)`.
const DEFAULT_DRIFT: f64 = 0.2;
const DEFAULT_SIGNAL_SPEED_MIN: f64 = 0.02;
const DEFAULT_SIGNAL_SPEED_MAX: f64 = 0.04;
/// Upper bound on `node_count`; the pair pass is quadratic.
const MAX_NODE_COUNT: usize = 2000;

/// Tunables for a [`Field`]. [`Default`] gives the "quiet drift" look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Nodes created on every (re)size.
    pub node_count: usize,
    /// Pairs strictly closer than this are connected.
    pub connection_distance: f64,
    /// Chance per connection per frame of launching a signal.
    pub spawn_chance: f64,
    /// Velocity span; each component is uniform in `[-drift/2, drift/2)`.
    pub drift: f64,
    /// Inclusive lower bound of a new signal's speed.
    pub signal_speed_min: f64,
    /// Exclusive upper bound of a new signal's speed.
    pub signal_speed_max: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            connection_distance: DEFAULT_CONNECTION_DISTANCE,
            spawn_chance: DEFAULT_SPAWN_CHANCE,
            drift: DEFAULT_DRIFT,
            signal_speed_min: DEFAULT_SIGNAL_SPEED_MIN,
            signal_speed_max: DEFAULT_SIGNAL_SPEED_MAX,
        }
    }
}

impl FieldParams {
    /// Extracts parameters from a JSON object, falling back to defaults and
    /// clamping each value into its schema range.
    pub fn from_json(params: &Value) -> Self {
        Self {
            node_count: param_usize(params, "node_count", DEFAULT_NODE_COUNT).min(MAX_NODE_COUNT),
            connection_distance: param_f64_clamped(
                params,
                "connection_distance",
                DEFAULT_CONNECTION_DISTANCE,
                0.0,
                f64::MAX,
            ),
            spawn_chance: param_f64_clamped(params, "spawn_chance", DEFAULT_SPAWN_CHANCE, 0.0, 1.0),
            drift: param_f64_clamped(params, "drift", DEFAULT_DRIFT, 0.0, 100.0),
            signal_speed_min: param_f64_clamped(
                params,
                "signal_speed_min",
                DEFAULT_SIGNAL_SPEED_MIN,
                1e-6,
                1.0,
            ),
            signal_speed_max: param_f64_clamped(
                params,
                "signal_speed_max",
                DEFAULT_SIGNAL_SPEED_MAX,
                1e-6,
                1.0,
            ),
        }
    }
}

/// The owning aggregate of one animation: nodes, signals, RNG and viewport.
///
/// Signals refer to nodes by index into `nodes`; every operation that
/// rebuilds the node arena also drops all signals.
pub struct Field {
    width: f64,
    height: f64,
    nodes: Vec<Node>,
    signals: Vec<Signal>,
    params: FieldParams,
    style: Style,
    rng: Xorshift64,
    next_id: u64,
    frame: u64,
}

impl Field {
    /// Creates a field for a `width` x `height` viewport and seeds its nodes.
    ///
    /// Zero, negative or non-finite dimensions are treated as zero: every
    /// node then sits on the origin until the next [`resize`](Animation::resize).
    pub fn new(width: f64, height: f64, seed: u64, params: FieldParams) -> Self {
        let mut field = Self {
            width: 0.0,
            height: 0.0,
            nodes: Vec::new(),
            signals: Vec::new(),
            params,
            style: Style::default(),
            rng: Xorshift64::new(seed),
            next_id: 0,
            frame: 0,
        };
        field.reseed(width, height);
        field
    }

    /// Creates a field from a JSON params object (see [`FieldParams::from_json`]).
    pub fn from_json(width: f64, height: f64, seed: u64, params: &Value) -> Self {
        Self::new(width, height, seed, FieldParams::from_json(params))
    }

    /// Replaces the default [`Style`] used for every draw call.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Sanitized viewport width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Sanitized viewport height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The current node arena, indexed by the signals.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Signals still in flight.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn field_params(&self) -> &FieldParams {
        &self.params
    }

    /// Replaces the node arena with nodes at explicit positions and
    /// velocities. Fresh ids are assigned and all signals are dropped.
    pub fn place_nodes(&mut self, placements: impl IntoIterator<Item = (DVec2, DVec2)>) {
        self.signals.clear();
        let nodes: Vec<Node> = placements
            .into_iter()
            .map(|(position, velocity)| Node::new(self.fresh_id(), position, velocity))
            .collect();
        self.nodes = nodes;
    }

    /// Whether nodes `a` and `b` are currently joined by a connection.
    ///
    /// Symmetric in its arguments. A node is never connected to itself,
    /// and out-of-range indices are never connected.
    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        match (self.nodes.get(a), self.nodes.get(b)) {
            (Some(na), Some(nb)) => na.distance(nb) < self.params.connection_distance,
            _ => false,
        }
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Stores sanitized bounds, rebuilds every node and drops every signal.
    fn reseed(&mut self, width: f64, height: f64) {
        self.width = viewport_extent(width);
        self.height = viewport_extent(height);
        self.signals.clear();
        let mut nodes = Vec::with_capacity(self.params.node_count);
        for _ in 0..self.params.node_count {
            let id = self.fresh_id();
            nodes.push(Node::random(
                id,
                self.width,
                self.height,
                self.params.drift,
                &mut self.rng,
            ));
        }
        self.nodes = nodes;
        debug!(
            "seeded {} nodes for {}x{} viewport",
            self.nodes.len(),
            self.width,
            self.height
        );
    }

    /// Moves every node one step and draws it.
    fn advance_nodes(&mut self, surface: &mut dyn Surface) -> Result<(), DriftError> {
        let (width, height) = (self.width, self.height);
        for node in &mut self.nodes {
            node.update(width, height);
            node.draw(surface, &self.style)?;
        }
        Ok(())
    }

    /// Draws a line for each connected unordered pair `i < j` and rolls
    /// the spawn chance once per drawn line. Returns the number of signals
    /// spawned.
    fn connect_pairs(&mut self, surface: &mut dyn Surface) -> Result<usize, DriftError> {
        let Self {
            nodes,
            signals,
            params,
            style,
            rng,
            ..
        } = self;
        let mut spawned = 0;
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let (a, b) = (&nodes[i], &nodes[j]);
                if a.distance(b) >= params.connection_distance {
                    continue;
                }
                surface.stroke_line(a.position, b.position, style.connection)?;
                if rng.chance(params.spawn_chance) {
                    trace!("signal spawned on {:?} -> {:?}", a.id(), b.id());
                    signals.push(Signal::spawn(
                        i,
                        j,
                        params.signal_speed_min,
                        params.signal_speed_max,
                        rng,
                    ));
                    spawned += 1;
                }
            }
        }
        Ok(spawned)
    }

    /// Updates and draws every signal, then drops the ones that died.
    ///
    /// All signals advance even if a draw fails; the first failure is
    /// returned afterwards.
    fn advance_signals(&mut self, surface: &mut dyn Surface) -> Result<(), DriftError> {
        let Self {
            nodes,
            signals,
            style,
            ..
        } = self;
        let nodes: &[Node] = nodes;
        let style: &Style = style;
        let mut failure = None;
        signals.retain_mut(|signal| {
            signal.update();
            if failure.is_none() {
                failure = signal.draw(nodes, &mut *surface, style).err();
            }
            signal.is_alive()
        });
        failure.map_or(Ok(()), Err)
    }
}

impl Animation for Field {
    /// Clear, move and draw nodes, connect pairs and maybe spawn, then
    /// advance signals. Connections use post-update positions.
    fn step(&mut self, surface: &mut dyn Surface) -> Result<(), DriftError> {
        surface.clear()?;
        self.advance_nodes(surface)?;
        self.connect_pairs(surface)?;
        self.advance_signals(surface)?;
        self.frame += 1;
        Ok(())
    }

    /// Full rebuild: previous nodes and all in-flight signals are discarded.
    fn resize(&mut self, width: f64, height: f64) {
        self.reseed(width, height);
    }

    fn frame(&self) -> u64 {
        self.frame
    }

    fn params(&self) -> Value {
        json!({
            "node_count": self.params.node_count,
            "connection_distance": self.params.connection_distance,
            "spawn_chance": self.params.spawn_chance,
            "drift": self.params.drift,
            "signal_speed_min": self.params.signal_speed_min,
            "signal_speed_max": self.params.signal_speed_max,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "node_count": {
                "type": "integer",
                "default": DEFAULT_NODE_COUNT,
                "min": 0,
                "max": MAX_NODE_COUNT,
                "description": "Nodes created on every resize"
            },
            "connection_distance": {
                "type": "number",
                "default": DEFAULT_CONNECTION_DISTANCE,
                "min": 0.0,
                "description": "Nodes closer than this are joined by a line"
            },
            "spawn_chance": {
                "type": "number",
                "default": DEFAULT_SPAWN_CHANCE,
                "min": 0.0,
                "max": 1.0,
                "description": "Chance per connection per frame of launching a signal"
            },
            "drift": {
                "type": "number",
                "default": DEFAULT_DRIFT,
                "min": 0.0,
                "max": 100.0,
                "description": "Span of each node velocity component, centred on zero"
            },
            "signal_speed_min": {
                "type": "number",
                "default": DEFAULT_SIGNAL_SPEED_MIN,
                "min": 0.000001,
                "max": 1.0,
                "description": "Lowest signal speed, in path fractions per frame"
            },
            "signal_speed_max": {
                "type": "number",
                "default": DEFAULT_SIGNAL_SPEED_MAX,
                "min": 0.000001,
                "max": 1.0,
                "description": "Exclusive upper bound of signal speed"
            }
        })
    }
}

fn viewport_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}
