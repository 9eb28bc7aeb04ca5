//! Presentation boundary
//!
//! The simulation never touches the renderer or the DOM. After each tick,
//! `sync` drains the state's events into a `Scene` (3D surface) and pushes
//! label text into an `Overlay` (health/score/energy readouts).

use glam::Vec3;
use serde::Serialize;

use crate::sim::{EntityKind, GameEvent, GameState};

/// Rendering surface owned by the host
pub trait Scene {
    fn add_entity(&mut self, id: u32, kind: EntityKind, pos: Vec3);
    fn remove_entity(&mut self, id: u32);
    fn set_position(&mut self, id: u32, pos: Vec3);
    fn render_frame(&mut self);
}

/// On-screen counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Health,
    Score,
    Energy,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Health, Label::Score, Label::Energy];

    /// Display text for this label
    pub fn text(self, state: &GameState) -> String {
        match self {
            Label::Health => format!("Health: {}%", state.health),
            Label::Score => format!("Score: {}", state.score),
            Label::Energy => format!("Energy: {}", state.energy),
        }
    }
}

/// Text overlay owned by the host
pub trait Overlay {
    fn set_label(&mut self, label: Label, text: &str);

    /// Run ended; hosts show their game-over screen here
    fn game_over(&mut self, _score: u32) {}
}

/// Push the current state to the presentation surfaces and render
pub fn sync<S, O>(state: &mut GameState, scene: &mut S, overlay: &mut O)
where
    S: Scene + ?Sized,
    O: Overlay + ?Sized,
{
    let mut final_score = None;
    for event in state.drain_events() {
        match event {
            GameEvent::Spawned { id, kind, pos } => scene.add_entity(id, kind, pos),
            GameEvent::Despawned { id, .. } => scene.remove_entity(id),
            GameEvent::GameOver { score } => final_score = Some(score),
            _ => {}
        }
    }

    scene.set_position(state.craft.id, state.craft.pos);
    for o in &state.obstacles {
        scene.set_position(o.id, o.pos);
    }
    for p in &state.pickups {
        scene.set_position(p.id, p.pos);
    }
    for p in &state.projectiles {
        scene.set_position(p.id, p.pos);
    }

    for label in Label::ALL {
        overlay.set_label(label, &label.text(state));
    }

    scene.render_frame();

    // Labels first so the final counters are visible behind the notice
    if let Some(score) = final_score {
        overlay.game_over(score);
    }
}

/// An entity added to the scene this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneEntity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: [f32; 3],
}

/// One frame of scene operations, batched for an out-of-process renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneFrame {
    pub added: Vec<SceneEntity>,
    pub removed: Vec<u32>,
    pub positions: Vec<(u32, [f32; 3])>,
    /// Set once `render_frame` has been called
    pub complete: bool,
}

impl SceneFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Hand out the finished frame and start a new one
    pub fn take(&mut self) -> SceneFrame {
        std::mem::take(self)
    }
}

impl Scene for SceneFrame {
    fn add_entity(&mut self, id: u32, kind: EntityKind, pos: Vec3) {
        self.added.push(SceneEntity {
            id,
            kind,
            pos: pos.to_array(),
        });
    }

    fn remove_entity(&mut self, id: u32) {
        // An entity born and removed within one frame never reaches the host
        if let Some(i) = self.added.iter().position(|e| e.id == id) {
            self.added.remove(i);
        } else {
            self.removed.push(id);
        }
        self.positions.retain(|(pid, _)| *pid != id);
    }

    fn set_position(&mut self, id: u32, pos: Vec3) {
        self.positions.push((id, pos.to_array()));
    }

    fn render_frame(&mut self) {
        self.complete = true;
    }
}

/// Overlay that just keeps the latest label text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudText {
    pub health: String,
    pub score: String,
    pub energy: String,
    pub final_score: Option<u32>,
}

impl Overlay for HudText {
    fn set_label(&mut self, label: Label, text: &str) {
        let slot = match label {
            Label::Health => &mut self.health,
            Label::Score => &mut self.score,
            Label::Energy => &mut self.energy,
        };
        if slot.as_str() != text {
            *slot = text.to_string();
        }
    }

    fn game_over(&mut self, score: u32) {
        self.final_score = Some(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::{OBSTACLE_COUNT, PICKUP_COUNT};
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_first_sync_adds_every_entity() {
        let mut state = GameState::new(GameConfig::default(), 5);
        let mut frame = SceneFrame::new();
        let mut hud = HudText::default();

        sync(&mut state, &mut frame, &mut hud);

        assert!(frame.complete);
        assert_eq!(frame.added.len(), 1 + OBSTACLE_COUNT + PICKUP_COUNT);
        assert_eq!(frame.added[0].kind, EntityKind::Craft);
        assert_eq!(frame.positions.len(), frame.added.len());
        assert_eq!(hud.health, "Health: 100%");
        assert_eq!(hud.score, "Score: 0");
        assert_eq!(hud.energy, "Energy: 0");
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_destroyed_entities_are_removed() {
        let mut state = GameState::new(GameConfig::default(), 5);
        sync(&mut state, &mut SceneFrame::new(), &mut HudText::default());

        let rock = state.obstacles[0].id;
        state.obstacles[0].pos = glam::Vec3::new(4.0, 0.0, -3.0);
        let laser = state.spawn_projectile_at(glam::Vec3::new(4.0, 0.0, -3.0));
        tick(&mut state, &TickInput::default(), 0.0);

        let mut frame = SceneFrame::new();
        let mut hud = HudText::default();
        sync(&mut state, &mut frame, &mut hud);

        // Laser was added and removed in the same frame
        assert!(frame.added.iter().all(|e| e.id != laser));
        assert_eq!(frame.removed, vec![rock]);
        assert_eq!(hud.score, "Score: 1");
    }

    #[test]
    fn test_game_over_notifies_overlay() {
        let mut state = GameState::new(GameConfig::default(), 5);
        state.score = 3;
        state.obstacles[0].pos = glam::Vec3::new(0.0, 0.0, -0.1);
        tick(&mut state, &TickInput::default(), 0.0);

        let mut hud = HudText::default();
        sync(&mut state, &mut SceneFrame::new(), &mut hud);

        assert_eq!(hud.final_score, Some(4));
        assert_eq!(hud.health, "Health: 0%");
    }

    #[test]
    fn test_frame_json_shape() {
        let mut frame = SceneFrame::new();
        frame.add_entity(7, EntityKind::Pickup, glam::Vec3::new(1.0, 2.0, 3.0));
        frame.render_frame();

        let json = frame.to_json().unwrap();
        assert!(json.contains(r#""kind":"Pickup""#));
        assert!(json.contains(r#""pos":[1.0,2.0,3.0]"#));

        let taken = frame.take();
        assert!(taken.complete);
        assert_eq!(frame, SceneFrame::default());
    }
}
