//! Walk-cycle animation shared by every layer of a character.
//!
//! All body-part layers use the same frame grid, so each facing direction
//! keeps one authoritative frame counter. Sprites never animate on their own;
//! they receive whatever frame their direction is currently showing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::SpriteId;

/// Facing directions, in the row order of the spritesheet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Direction {
    /// Facing the viewer.
    #[default]
    Down,
    Left,
    Right,
    /// Facing away from the viewer.
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    /// Spritesheet row holding this direction's poses.
    pub fn row(self) -> usize {
        match self {
            Direction::Down => 0,
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
        }
    }
}

/// Fixed frame grid of a character spritesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Poses per direction.
    pub columns: u32,
    /// One row per direction.
    pub rows: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            frame_width: 48,
            frame_height: 60,
            columns: 3,
            rows: 4,
        }
    }
}

impl SheetLayout {
    pub fn sheet_width(&self) -> u32 {
        self.frame_width * self.columns
    }

    pub fn sheet_height(&self) -> u32 {
        self.frame_height * self.rows
    }

    pub fn frame_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    /// Absolute atlas index for a pose of a direction.
    pub fn frame_index(&self, direction: Direction, pose: usize) -> usize {
        direction.row() * self.columns as usize + pose
    }
}

/// Frame sequence and playback rate for one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionAnimation {
    /// Pose indices played in order, then looped.
    pub sequence: Vec<usize>,
    /// Frames per second.
    pub frame_rate: f32,
}

impl Default for DirectionAnimation {
    fn default() -> Self {
        Self {
            // Ping-pong walk: left foot, stand, right foot, stand
            sequence: vec![0, 1, 2, 1],
            frame_rate: 6.0,
        }
    }
}

/// Animation settings for all directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationSettings {
    #[serde(default)]
    pub default: DirectionAnimation,
    #[serde(default)]
    pub overrides: HashMap<Direction, DirectionAnimation>,
}

impl AnimationSettings {
    pub fn for_direction(&self, direction: Direction) -> &DirectionAnimation {
        self.overrides.get(&direction).unwrap_or(&self.default)
    }
}

/// Frame counter for a single direction.
#[derive(Debug, Clone)]
struct DirectionClock {
    sequence: Vec<usize>,
    period: f32,
    index: usize,
    elapsed: f32,
}

impl DirectionClock {
    fn new(animation: &DirectionAnimation) -> Self {
        let sequence = if animation.sequence.is_empty() {
            vec![0]
        } else {
            animation.sequence.clone()
        };
        let frame_rate = if animation.frame_rate.is_finite() && animation.frame_rate > 0.0 {
            animation.frame_rate
        } else {
            DirectionAnimation::default().frame_rate
        };

        Self {
            sequence,
            period: 1.0 / frame_rate,
            index: 0,
            elapsed: 0.0,
        }
    }

    fn reset(&mut self) {
        self.index = 0;
        self.elapsed = 0.0;
    }

    fn advance_by(&mut self, steps: usize) {
        self.index = (self.index + steps % self.sequence.len()) % self.sequence.len();
    }

    /// Accumulate time and return how many periods elapsed.
    fn accumulate(&mut self, dt: f32) -> usize {
        self.elapsed += dt;
        if self.elapsed < self.period {
            return 0;
        }
        let steps = (self.elapsed / self.period).floor();
        self.elapsed -= steps * self.period;
        steps as usize
    }

    fn pose(&self) -> usize {
        self.sequence[self.index]
    }
}

/// A sprite that follows a direction's clock.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Registration {
    layer: String,
    sprite: SpriteId,
}

/// New frame for a registered sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameUpdate {
    pub sprite: SpriteId,
    pub frame: usize,
}

/// One logical clock driving four per-direction frame counters.
///
/// `tick` is called once per app update with the frame delta; each direction
/// advances by however many of its periods fit into the accumulated time and
/// reports the new frame for every sprite registered to it.
#[derive(Debug, Clone)]
pub struct AnimationSynchronizer {
    sheet: SheetLayout,
    clocks: [DirectionClock; 4],
    members: [Vec<Registration>; 4],
    running: bool,
}

impl AnimationSynchronizer {
    pub fn new(sheet: SheetLayout, settings: &AnimationSettings) -> Self {
        Self {
            sheet,
            clocks: Direction::ALL.map(|d| DirectionClock::new(settings.for_direction(d))),
            members: Default::default(),
            running: false,
        }
    }

    /// Start (or restart) every direction from the first frame of its sequence.
    pub fn start(&mut self) {
        for clock in &mut self.clocks {
            clock.reset();
        }
        self.running = true;
    }

    /// Stop all clocks. Registrations are kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance all running clocks by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Vec<FrameUpdate> {
        if !self.running || dt <= 0.0 {
            return Vec::new();
        }

        let mut updates = Vec::new();
        for direction in Direction::ALL {
            let steps = self.clocks[direction.row()].accumulate(dt);
            if steps > 0 {
                self.clocks[direction.row()].advance_by(steps);
                updates.extend(self.frames_for(direction));
            }
        }
        updates
    }

    /// Fire one period of a direction's clock immediately.
    pub fn advance(&mut self, direction: Direction) -> Vec<FrameUpdate> {
        self.clocks[direction.row()].advance_by(1);
        self.frames_for(direction)
    }

    /// Current frame for every sprite registered to `direction`.
    pub fn frames_for(&self, direction: Direction) -> Vec<FrameUpdate> {
        let frame = self.current_frame(direction);
        self.members[direction.row()]
            .iter()
            .map(|r| FrameUpdate {
                sprite: r.sprite,
                frame,
            })
            .collect()
    }

    /// Position within the direction's sequence.
    pub fn current_index(&self, direction: Direction) -> usize {
        self.clocks[direction.row()].index
    }

    /// Absolute atlas frame the direction is showing.
    pub fn current_frame(&self, direction: Direction) -> usize {
        let pose = self.clocks[direction.row()].pose();
        self.sheet.frame_index(direction, pose)
    }

    pub fn sequence_len(&self, direction: Direction) -> usize {
        self.clocks[direction.row()].sequence.len()
    }

    /// Add a sprite to a direction's fan-out and return the frame it should
    /// display right now, so sprites created mid-animation join in phase.
    pub fn register_late(
        &mut self,
        layer: &str,
        direction: Direction,
        sprite: SpriteId,
    ) -> usize {
        let members = &mut self.members[direction.row()];
        if !members.iter().any(|r| r.sprite == sprite) {
            members.push(Registration {
                layer: layer.to_string(),
                sprite,
            });
        }
        self.current_frame(direction)
    }

    /// Remove every sprite of a layer from all directions.
    pub fn unregister_layer(&mut self, layer: &str) {
        for members in &mut self.members {
            members.retain(|r| r.layer != layer);
        }
    }

    pub fn clear(&mut self) {
        for members in &mut self.members {
            members.clear();
        }
    }

    pub fn registered(&self, direction: Direction) -> Vec<SpriteId> {
        self.members[direction.row()]
            .iter()
            .map(|r| r.sprite)
            .collect()
    }
}
