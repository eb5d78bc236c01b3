//! Fighter state: kinematics, animation mode, attacks and transformation.
//!
//! Every mode change goes through [`Fighter::switch_mode`], which refuses to
//! interrupt an attack, a hit reaction or a death animation before its last
//! frame. Attacks and hit reactions are requests to that guard, not separate
//! code paths.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{AnimationMode, AnimationTable, Animator};
use super::health::HealthComponent;
use crate::config::{ConfigError, FighterConfig, WorldConfig};
use crate::input::FighterInput;

/// Simulation tick counter (60 per second by default)
pub type Tick = u64;

/// Which side of the arena a fighter belongs to. The two are not interchangeable:
/// each side has its own moveset and key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn both() -> [Side; 2] {
        [Side::Left, Side::Right]
    }

    /// Player label shown in the HUD and the combat log
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Player 1",
            Side::Right => "Player 2",
        }
    }
}

/// Per-tick physics inputs derived from the world config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub gravity: f32,
    pub ground_y: f32,
    pub max_x: f32,
}

impl From<&WorldConfig> for Arena {
    fn from(world: &WorldConfig) -> Self {
        Self {
            gravity: world.gravity,
            ground_y: world.ground_y(),
            max_x: world.max_x(),
        }
    }
}

/// Limits and values applied by [`Fighter::transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct TransformRules {
    scale: f32,
    damage: f32,
    duration_ticks: u64,
    max_uses: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct TransformState {
    active: bool,
    count: u32,
    end_tick: Option<Tick>,
}

/// One combatant.
#[derive(Debug, Clone, PartialEq)]
pub struct Fighter {
    side: Side,
    name: String,

    /// Top-left corner of the body box
    pub position: Vec2,
    pub velocity: Vec2,

    base_scale: f32,
    current_scale: f32,
    sprite_width: f32,
    sprite_height: f32,
    draw_offset: Vec2,

    animations: AnimationTable,
    animator: Animator,

    attack_box_offset: Vec2,
    attack_box_size: Vec2,
    attack_box_position: Vec2,
    is_attacking: bool,
    active_frame: u32,
    base_damage: f32,
    damage: f32,

    pub health: HealthComponent,
    jumps_left: u32,
    max_jumps: u32,
    is_dead: bool,

    transform_rules: TransformRules,
    transform: TransformState,
}

impl Fighter {
    /// Build a fighter from a moveset. Fails if the moveset is incomplete or inconsistent.
    pub fn new(side: Side, config: &FighterConfig, world: &WorldConfig) -> Result<Self, ConfigError> {
        world.validate()?;
        config.validate()?;
        let animations = config.animation_table()?;
        let idle = *animations.clip(AnimationMode::Idle);
        let position = config.start_position();
        let attack_box_offset = Vec2::new(config.attack_box.offset.0, config.attack_box.offset.1);

        Ok(Self {
            side,
            name: config.name.clone(),
            position,
            velocity: Vec2::ZERO,
            base_scale: config.base_scale,
            current_scale: config.base_scale,
            sprite_width: idle.frame_width,
            sprite_height: config.sprite_height,
            draw_offset: Vec2::new(config.draw_offset.0, config.draw_offset.1),
            animator: Animator::new(AnimationMode::Idle, idle.frames_max, world.frame_hold_ticks),
            animations,
            attack_box_offset,
            attack_box_size: Vec2::new(config.attack_box.width, config.attack_box.height),
            attack_box_position: position + attack_box_offset,
            is_attacking: false,
            active_frame: config.active_frame,
            base_damage: config.damage,
            damage: config.damage,
            health: HealthComponent::new(world.max_hp),
            jumps_left: world.max_jumps,
            max_jumps: world.max_jumps,
            is_dead: false,
            transform_rules: TransformRules {
                scale: world.transform_scale,
                damage: world.transform_damage,
                duration_ticks: world.transform_duration_ticks,
                max_uses: world.max_transforms,
            },
            transform: TransformState::default(),
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> AnimationMode {
        self.animator.mode()
    }

    pub fn frame_index(&self) -> u32 {
        self.animator.frame_index()
    }

    pub fn frames_max(&self) -> u32 {
        self.animator.frames_max()
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_attacking(&self) -> bool {
        self.is_attacking
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn active_frame(&self) -> u32 {
        self.active_frame
    }

    pub fn jumps_left(&self) -> u32 {
        self.jumps_left
    }

    pub fn max_jumps(&self) -> u32 {
        self.max_jumps
    }

    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    pub fn current_scale(&self) -> f32 {
        self.current_scale
    }

    pub fn sprite_width(&self) -> f32 {
        self.sprite_width
    }

    pub fn sprite_height(&self) -> f32 {
        self.sprite_height
    }

    pub fn draw_offset(&self) -> Vec2 {
        self.draw_offset
    }

    pub fn attack_box_position(&self) -> Vec2 {
        self.attack_box_position
    }

    pub fn attack_box_size(&self) -> Vec2 {
        self.attack_box_size
    }

    pub fn transform_active(&self) -> bool {
        self.transform.active
    }

    pub fn transform_count(&self) -> u32 {
        self.transform.count
    }

    pub fn transform_end_tick(&self) -> Option<Tick> {
        self.transform.end_tick
    }

    /// Body height used for floor contact: scaled only while transformed.
    pub fn effective_height(&self) -> f32 {
        if self.transform.active {
            self.sprite_height * self.current_scale
        } else {
            self.sprite_height
        }
    }

    // ------------------------------------------------------------------
    // Physics
    // ------------------------------------------------------------------

    /// Advance one tick of animation and physics.
    ///
    /// Returns true if the transformation wore off during this tick.
    pub fn advance(&mut self, arena: &Arena, now: Tick) -> bool {
        if !self.is_dead {
            self.animator.advance();
        }

        self.attack_box_position = self.position + self.attack_box_offset;
        self.position += self.velocity;
        self.position.x = self.position.x.clamp(0.0, arena.max_x);

        let height = self.effective_height();
        if self.position.y + height >= arena.ground_y {
            self.velocity.y = 0.0;
            self.position.y = arena.ground_y - height;
            self.jumps_left = self.max_jumps;
        } else {
            self.velocity.y += arena.gravity;
        }

        match self.transform.end_tick {
            Some(end) if self.transform.active && now >= end => {
                self.revert_to_base(arena.ground_y);
                true
            }
            _ => false,
        }
    }

    /// Start a jump if any remain. Returns true if the jump happened.
    pub fn jump(&mut self, jump_velocity: f32) -> bool {
        if self.is_dead || self.jumps_left == 0 {
            return false;
        }
        self.velocity.y = jump_velocity;
        self.jumps_left -= 1;
        true
    }

    /// Pick Run/Idle from held input, then let vertical motion override with Jump/Fall.
    ///
    /// Horizontal velocity is reset every tick; only a held direction that
    /// matches the last pressed one moves the fighter.
    pub fn apply_movement(&mut self, input: &FighterInput, move_speed: f32) {
        self.velocity.x = 0.0;
        if self.is_dead {
            return;
        }

        match input.active_direction() {
            Some(direction) => {
                self.velocity.x = direction.sign() * move_speed;
                self.switch_mode(AnimationMode::Run);
            }
            None => {
                self.switch_mode(AnimationMode::Idle);
            }
        }

        if self.velocity.y < 0.0 {
            self.switch_mode(AnimationMode::Jump);
        } else if self.velocity.y > 0.0 {
            self.switch_mode(AnimationMode::Fall);
        }
    }

    // ------------------------------------------------------------------
    // Mode state machine
    // ------------------------------------------------------------------

    /// Request a mode change. Returns true if the mode actually changed.
    ///
    /// Locked modes (Attack, TakeHit, Death) refuse until their last frame is
    /// showing. Reaching the last Death frame marks the fighter dead for good.
    pub fn switch_mode(&mut self, requested: AnimationMode) -> bool {
        let current = self.animator.mode();
        let finished = self.animator.on_last_frame();

        if current == AnimationMode::Death {
            if finished {
                self.is_dead = true;
            }
            return false;
        }
        if current.locks_until_finished() && !finished {
            return false;
        }
        if self.is_dead || requested == current {
            return false;
        }

        let clip = *self.animations.clip(requested);
        self.animator.play(requested, clip.frames_max);
        self.sprite_width = clip.frame_width;
        if current == AnimationMode::Attack {
            self.is_attacking = false;
        }
        true
    }

    // ------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------

    /// Begin (or keep) a swing. Returns true if a new swing started this call.
    pub fn attack(&mut self) -> bool {
        if self.is_dead {
            return false;
        }
        let started = self.switch_mode(AnimationMode::Attack);
        if self.animator.mode() == AnimationMode::Attack {
            self.is_attacking = true;
        }
        started
    }

    /// True on the tick(s) where this fighter's swing can connect.
    pub fn strike_ready(&self) -> bool {
        self.is_attacking
            && self.animator.mode() == AnimationMode::Attack
            && self.animator.frame_index() == self.active_frame
    }

    /// Close the strike window once the active frame has been checked, hit or miss.
    pub fn end_strike(&mut self) {
        if self.is_attacking && self.animator.frame_index() == self.active_frame {
            self.is_attacking = false;
        }
    }

    /// Receive a hit. Returns true if the damage went through (false if invincible).
    pub fn take_hit(&mut self, amount: f32) -> bool {
        let applied = self.health.take_damage(amount);
        if self.health.is_depleted() {
            self.switch_mode(AnimationMode::Death);
        } else {
            self.switch_mode(AnimationMode::TakeHit);
        }
        applied
    }

    // ------------------------------------------------------------------
    // Transformation
    // ------------------------------------------------------------------

    /// Activate the timed power-up. Returns false if none remain, one is active, or the fighter is dead.
    pub fn transform(&mut self, now: Tick) -> bool {
        if self.is_dead
            || self.transform.active
            || self.transform.count >= self.transform_rules.max_uses
        {
            return false;
        }

        self.current_scale = self.transform_rules.scale;
        self.damage = self.transform_rules.damage;
        self.health.invincible = true;
        self.transform.active = true;
        self.transform.end_tick = Some(now + self.transform_rules.duration_ticks);
        self.transform.count += 1;
        true
    }

    /// Drop back to base size and damage, and re-snap above the floor so shrinking doesn't clip.
    pub fn revert_to_base(&mut self, ground_y: f32) {
        self.current_scale = self.base_scale;
        self.damage = self.base_damage;
        self.transform.active = false;
        self.transform.end_tick = None;
        self.health.invincible = false;
        self.position.y = ground_y - self.sprite_height * self.current_scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    fn fighter() -> Fighter {
        Fighter::new(Side::Left, &FighterConfig::samurai_mack(), &WorldConfig::default())
            .expect("valid moveset")
    }

    fn arena() -> Arena {
        Arena::from(&WorldConfig::default())
    }

    /// Tick the animation until the current clip shows its last frame.
    fn run_to_last_frame(f: &mut Fighter) {
        let arena = arena();
        let mut guard = 0;
        while !f.animator.on_last_frame() {
            f.advance(&arena, 0);
            guard += 1;
            assert!(guard < 1000, "animation never reached its last frame");
        }
    }

    #[test]
    fn test_new_fighter_starts_idle() {
        let f = fighter();
        assert_eq!(f.mode(), AnimationMode::Idle);
        assert_eq!(f.frames_max(), 8);
        assert_eq!(f.jumps_left(), 2);
        assert_eq!(f.health.current(), 100.0);
        assert_eq!(f.attack_box_position(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_horizontal_clamp() {
        let mut f = fighter();
        let arena = arena();
        f.position = Vec2::new(940.0, 0.0);
        f.velocity.x = 50.0;
        f.advance(&arena, 1);
        assert_eq!(f.position.x, 950.0);

        f.position.x = 2.0;
        f.velocity.x = -10.0;
        f.advance(&arena, 2);
        assert_eq!(f.position.x, 0.0);
    }

    #[test]
    fn test_gravity_accumulates_while_airborne() {
        let mut f = fighter();
        f.advance(&arena(), 1);
        assert!((f.velocity.y - 0.7).abs() < 1e-6);
        f.advance(&arena(), 2);
        assert!((f.velocity.y - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_jump_consumes_budget() {
        let mut f = fighter();
        assert!(f.jump(-30.0));
        assert!(f.jump(-30.0));
        assert!(!f.jump(-30.0));
        assert_eq!(f.jumps_left(), 0);
        assert_eq!(f.velocity.y, -30.0);
    }

    #[test]
    fn test_attack_locks_mode_until_last_frame() {
        let mut f = fighter();
        assert!(f.attack());
        assert!(f.is_attacking());
        assert!(!f.switch_mode(AnimationMode::Run));
        assert_eq!(f.mode(), AnimationMode::Attack);

        run_to_last_frame(&mut f);
        assert!(f.switch_mode(AnimationMode::Run));
        assert_eq!(f.frame_index(), 0);
        assert!(!f.is_attacking());
    }

    #[test]
    fn test_switch_updates_sprite_metadata() {
        let mut config = FighterConfig::samurai_mack();
        if let Some(run) = config.animations.run.as_mut() {
            run.frame_width = 180.0;
        }
        let mut f = Fighter::new(Side::Left, &config, &WorldConfig::default()).unwrap();
        f.switch_mode(AnimationMode::Run);
        assert_eq!(f.sprite_width(), 180.0);
        assert_eq!(f.frames_max(), 8);
    }

    #[test]
    fn test_death_is_terminal() {
        let mut f = fighter();
        f.take_hit(100.0);
        assert_eq!(f.mode(), AnimationMode::Death);
        assert!(!f.is_dead());

        run_to_last_frame(&mut f);
        assert!(!f.switch_mode(AnimationMode::Idle));
        assert!(f.is_dead());

        let frame = f.frame_index();
        f.advance(&arena(), 100);
        assert_eq!(f.frame_index(), frame, "dead fighters stop animating");
        assert!(!f.switch_mode(AnimationMode::Run));
        assert_eq!(f.mode(), AnimationMode::Death);
        assert!(!f.attack());
        assert!(!f.jump(-30.0));
    }

    #[test]
    fn test_movement_uses_last_direction() {
        let mut f = fighter();
        let input = FighterInput {
            left_held: true,
            right_held: true,
            last_direction: Direction::Right,
            ..Default::default()
        };
        f.apply_movement(&input, 5.0);
        assert_eq!(f.velocity.x, 5.0);
        assert_eq!(f.mode(), AnimationMode::Run);

        let stale = FighterInput {
            left_held: true,
            right_held: false,
            last_direction: Direction::Right,
            ..Default::default()
        };
        f.apply_movement(&stale, 5.0);
        assert_eq!(f.velocity.x, 0.0);
        assert_eq!(f.mode(), AnimationMode::Idle);
    }

    #[test]
    fn test_vertical_motion_overrides_run() {
        let mut f = fighter();
        f.velocity.y = -3.0;
        let input = FighterInput {
            left_held: true,
            last_direction: Direction::Left,
            ..Default::default()
        };
        f.apply_movement(&input, 5.0);
        assert_eq!(f.velocity.x, -5.0);
        assert_eq!(f.mode(), AnimationMode::Jump);

        f.velocity.y = 2.0;
        f.switch_mode(AnimationMode::Idle);
        f.apply_movement(&FighterInput::default(), 5.0);
        assert_eq!(f.mode(), AnimationMode::Fall);
    }

    #[test]
    fn test_transform_and_revert() {
        let mut f = fighter();
        assert!(f.transform(10));
        assert_eq!(f.current_scale(), 3.0);
        assert_eq!(f.damage(), 10.0);
        assert!(f.health.invincible);
        assert_eq!(f.transform_end_tick(), Some(310));
        assert!(!f.transform(11), "already active");

        f.revert_to_base(536.0);
        assert_eq!(f.current_scale(), 2.5);
        assert_eq!(f.damage(), 20.0);
        assert!(!f.health.invincible);
        assert!(!f.transform_active());
        assert_eq!(f.position.y, 536.0 - 200.0 * 2.5);
    }

    #[test]
    fn test_transform_expires_on_tick() {
        let mut f = fighter();
        let arena = arena();
        f.transform(0);
        assert!(!f.advance(&arena, 299));
        assert!(f.transform_active());
        assert!(f.advance(&arena, 300));
        assert!(!f.transform_active());
    }

    #[test]
    fn test_transformed_floor_contact_uses_scaled_height() {
        let mut f = fighter();
        let arena = arena();
        f.transform(0);
        f.position.y = 0.0;
        f.advance(&arena, 1);
        assert_eq!(f.velocity.y, 0.0);
        assert_eq!(f.position.y, arena.ground_y - 200.0 * 3.0);
    }

    #[test]
    fn test_invincible_hit_still_staggers() {
        let mut f = fighter();
        f.transform(0);
        assert!(!f.take_hit(20.0));
        assert_eq!(f.health.current(), 100.0);
        assert_eq!(f.mode(), AnimationMode::TakeHit);
    }
}
