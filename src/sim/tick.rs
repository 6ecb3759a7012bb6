//! Per-tick locomotion update
//!
//! One call advances the player by `dt`: forces, friction, jump resolution,
//! state-dependent integration (ground/air or rail), the trick overlay and
//! coin pickups, in that order.

use glam::DVec2;

use super::collectible::Coin;
use super::events::EventSink;
use super::rail::{Rail, nearest_rail};
use super::state::{GrindState, LocomotionState, Player};
use super::terrain::Terrain;
use super::trick::{TrickKind, TrickOutcome, TrickState};
use crate::consts::MIN_SEGMENT_LENGTH;
use crate::tuning::{GrindSnapPolicy, Tuning};
use crate::{angle_of, normalize_angle};

/// Resolved input for a single tick
///
/// `jump` and `trick` are edge-triggered: set only on the tick the button
/// went down. The rest are held states.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    /// Jump pressed this tick
    pub jump: bool,
    /// Crouch held
    pub crouch: bool,
    /// Trick requested this tick
    pub trick: Option<TrickKind>,
    /// Manual air rotation axis, -1..=1
    pub rotate: f64,
}

impl InputSnapshot {
    /// Horizontal axis: -1, 0 or +1
    pub fn horizontal(&self) -> f64 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Drop the edge-triggered parts (used between substeps of one frame)
    pub fn held_only(&self) -> Self {
        Self {
            jump: false,
            trick: None,
            ..*self
        }
    }
}

/// Clamp a frame delta to something the integrator can digest
#[inline]
pub fn sanitize_dt(dt: f64, max_dt: f64) -> f64 {
    if dt.is_finite() {
        dt.clamp(0.0, max_dt.max(0.0))
    } else {
        0.0
    }
}

/// Advance the player by one step
#[allow(clippy::too_many_arguments)]
pub fn update(
    player: &mut Player,
    terrain: &Terrain,
    rails: &[Rail],
    coins: &mut [Coin],
    input: &InputSnapshot,
    dt: f64,
    tuning: &Tuning,
    events: &mut dyn EventSink,
) {
    let dt = sanitize_dt(dt, tuning.max_dt);

    // Timers
    player.rail_cooldown = (player.rail_cooldown - dt).max(0.0);
    if player.is_airborne() {
        player.coyote_time = (player.coyote_time - dt).max(0.0);
    }
    if input.jump {
        player.jump_buffer = tuning.jump_buffer;
    }

    let axis = input.horizontal();
    if axis != 0.0 {
        player.facing = axis;
    } else if player.velocity.x.abs() > 1.0 {
        player.facing = player.velocity.x.signum();
    }

    apply_forces(player, input, axis, dt, tuning);
    apply_friction(player, terrain, dt, tuning);
    clamp_speed(player, tuning);

    resolve_jump(player, rails, tuning, events);
    player.jump_buffer = (player.jump_buffer - dt).max(0.0);

    match player.state {
        LocomotionState::Grinding(grind) => {
            integrate_grind(player, grind, rails, dt, tuning, events)
        }
        LocomotionState::Grounded | LocomotionState::Airborne => {
            integrate_free(player, terrain, rails, input, dt, tuning, events)
        }
    }

    update_air_rotation(player, input, dt, tuning);
    clamp_speed(player, tuning);

    collect_coins(player, coins, tuning, events);
}

/// Gravity and horizontal push
fn apply_forces(player: &mut Player, input: &InputSnapshot, axis: f64, dt: f64, tuning: &Tuning) {
    let airborne = player.is_airborne();
    if airborne {
        player.velocity.y += tuning.gravity * dt;
    }

    if axis != 0.0 {
        let opposing = player.velocity.x * axis < 0.0;
        let mut accel = if opposing {
            tuning.brake_accel
        } else {
            tuning.push_accel
        };
        if input.crouch {
            accel *= tuning.crouch_accel_scale;
        }
        if airborne {
            accel *= tuning.air_control;
        }
        player.velocity.x += axis * accel * dt;
    }
}

/// Slope assist + ground friction on the ground, air drag in the air
fn apply_friction(player: &mut Player, terrain: &Terrain, dt: f64, tuning: &Tuning) {
    match player.state {
        LocomotionState::Grounded => {
            // Normal leans downhill, so its x component pulls the player downhill
            let normal = terrain.normal_at(player.position.x);
            player.velocity.x += normal.x * tuning.gravity * tuning.slope_assist * dt;
            player.velocity *= (-tuning.ground_friction * dt).exp();
        }
        LocomotionState::Airborne => {
            player.velocity *= (-tuning.air_drag * dt).exp();
        }
        // Rail friction acts along the rail during integration
        LocomotionState::Grinding(_) => {}
    }
}

fn clamp_speed(player: &mut Player, tuning: &Tuning) {
    if !player.velocity.is_finite() {
        player.velocity = DVec2::ZERO;
    }
    player.velocity = player.velocity.clamp_length_max(tuning.max_speed.max(0.0));
}

/// Consume a buffered jump if the player is allowed to jump right now
fn resolve_jump(player: &mut Player, rails: &[Rail], tuning: &Tuning, events: &mut dyn EventSink) {
    if player.jump_buffer <= 0.0 {
        return;
    }

    let can_jump = match player.state {
        LocomotionState::Grounded | LocomotionState::Grinding(_) => true,
        LocomotionState::Airborne => player.coyote_time > 0.0,
    };
    if !can_jump {
        return;
    }

    if let LocomotionState::Grinding(grind) = player.state {
        if let Some(rail) = rails.get(grind.rail) {
            // Carry the grind speed into the jump
            player.velocity = rail.tangent() * player.velocity.dot(rail.tangent());
        }
        leave_rail(player, grind, tuning, events);
    }

    player.jump_buffer = 0.0;
    player.coyote_time = 0.0;
    player.airtime = 0.0;
    player.velocity.y = tuning.jump_impulse;
    player.state = LocomotionState::Airborne;
    log::debug!("Jump at ({:.1}, {:.1})", player.position.x, player.position.y);
}

/// Ground following and free flight
fn integrate_free(
    player: &mut Player,
    terrain: &Terrain,
    rails: &[Rail],
    input: &InputSnapshot,
    dt: f64,
    tuning: &Tuning,
    events: &mut dyn EventSink,
) {
    player.position += player.velocity * dt;

    if player.is_grounded() {
        let ground = terrain.height_at(player.position.x);
        if player.position.y >= ground - tuning.ground_stick {
            stick_to_ground(player, terrain, ground);
            return;
        }
        // Surface dropped away faster than the player follows it
        player.state = LocomotionState::Airborne;
        player.coyote_time = tuning.coyote_time;
        player.airtime = 0.0;
        log::debug!("Left the ground at x = {:.1}", player.position.x);
    }

    player.airtime += dt;

    let snap_allowed = match tuning.snap_policy {
        GrindSnapPolicy::Proximity => true,
        GrindSnapPolicy::CrouchHeld => input.crouch,
    };
    if snap_allowed && try_grind_snap(player, rails, tuning, events) {
        return;
    }

    let ground = terrain.height_at(player.position.x);
    if player.position.y >= ground {
        land(player, terrain, ground, tuning, events);
        // A jump queued in the air fires on the touchdown tick
        resolve_jump(player, rails, tuning, events);
        let crouch_snap = tuning.snap_policy == GrindSnapPolicy::CrouchHeld && input.crouch;
        if crouch_snap && player.is_grounded() {
            try_grind_snap(player, rails, tuning, events);
        }
    }
}

/// Keep a grounded player on the surface, moving along it
fn stick_to_ground(player: &mut Player, terrain: &Terrain, ground: f64) {
    let tangent = terrain.tangent_at(player.position.x);
    player.position.y = ground;
    player.velocity = tangent * player.velocity.dot(tangent);
    player.board_angle = angle_of(tangent);
    player.angular_velocity = 0.0;
}

/// Airborne -> Grounded transition
fn land(player: &mut Player, terrain: &Terrain, ground: f64, tuning: &Tuning, events: &mut dyn EventSink) {
    let normal = terrain.normal_at(player.position.x);
    // Speed into the surface; the normal component is discarded on contact
    let impact_speed = (-player.velocity.dot(normal)).max(0.0);

    stick_to_ground(player, terrain, ground);
    resolve_trick(player, tuning, events);
    player.state = LocomotionState::Grounded;
    player.coyote_time = tuning.coyote_time;
    player.airtime = 0.0;

    if impact_speed > tuning.hard_landing_speed {
        events.on_hard_landing(player.position, impact_speed);
    }
    log::debug!(
        "Landed at ({:.1}, {:.1}), impact {:.0}",
        player.position.x,
        player.position.y,
        impact_speed
    );
}

/// Attach to the nearest rail if close enough. Returns true on snap.
///
/// The rail the player just left is skipped until `rail_cooldown` runs out.
fn try_grind_snap(
    player: &mut Player,
    rails: &[Rail],
    tuning: &Tuning,
    events: &mut dyn EventSink,
) -> bool {
    let blocked = player.last_rail.filter(|_| player.rail_cooldown > 0.0);
    let nearest = match blocked {
        Some(skip) => rails
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(i, rail)| (i, rail.distance_to_point(player.position)))
            .min_by(|a, b| a.1.total_cmp(&b.1)),
        None => nearest_rail(rails, player.position),
    };
    let Some((index, distance)) = nearest else {
        return false;
    };
    if distance > tuning.snap_distance {
        return false;
    }

    let rail = &rails[index];
    let t = rail.param_at(player.position);
    let contact = rail.point_at(t);
    // Passing the rail well above or below its height is not a grind
    if (contact.y - player.position.y).abs() > tuning.snap_vertical_tolerance {
        return false;
    }

    let tangent = rail.tangent();
    let mut speed_along = player.velocity.dot(tangent);
    if speed_along.abs() < tuning.min_grind_speed {
        speed_along = tuning.min_grind_speed * player.facing;
    }

    resolve_trick(player, tuning, events);
    player.position = contact;
    player.velocity = tangent * speed_along;
    player.board_angle = rail.angle();
    player.angular_velocity = 0.0;
    player.coyote_time = 0.0;
    player.airtime = 0.0;
    player.state = LocomotionState::Grinding(GrindState {
        rail: index,
        t,
        elapsed: 0.0,
    });
    log::debug!("Grind start on rail {} at t = {:.2}, speed {:.0}", index, t, speed_along);
    true
}

/// Constrained motion along the active rail
fn integrate_grind(
    player: &mut Player,
    grind: GrindState,
    rails: &[Rail],
    dt: f64,
    tuning: &Tuning,
    events: &mut dyn EventSink,
) {
    let Some(rail) = rails.get(grind.rail) else {
        log::warn!("Grinding on missing rail {}, dropping to airborne", grind.rail);
        player.state = LocomotionState::Airborne;
        return;
    };

    let tangent = rail.tangent();
    let mut speed_along = player.velocity.dot(tangent);
    // Gravity still pulls down a sloped rail
    speed_along += tuning.gravity * tangent.y * dt;
    speed_along *= (-tuning.grind_friction * dt).exp();
    let max_speed = tuning.max_speed.max(0.0);
    speed_along = speed_along.clamp(-max_speed, max_speed);

    let length = rail.length().max(MIN_SEGMENT_LENGTH);
    let t = grind.t + speed_along * dt / length;
    let elapsed = grind.elapsed + dt;

    if !(0.0..=1.0).contains(&t) {
        let t = if t.is_nan() { grind.t } else { t.clamp(0.0, 1.0) };
        player.position = rail.point_at(t);
        player.velocity = tangent * speed_along + DVec2::new(0.0, tuning.grind_pop);
        let grind = GrindState { t, elapsed, ..grind };
        leave_rail(player, grind, tuning, events);
        log::debug!("Rolled off rail {} at t = {:.2}", grind.rail, t);
        return;
    }

    player.position = rail.point_at(t);
    player.velocity = tangent * speed_along;
    player.board_angle = rail.angle();
    player.state = LocomotionState::Grinding(GrindState { t, elapsed, ..grind });
}

/// Grinding -> Airborne bookkeeping shared by jumps and end-of-rail ejection
fn leave_rail(player: &mut Player, grind: GrindState, tuning: &Tuning, events: &mut dyn EventSink) {
    let points = (grind.elapsed * tuning.grind_points_per_sec).round();
    if points >= 1.0 {
        events.on_trick("Grind", points as u32);
    }
    player.state = LocomotionState::Airborne;
    player.rail_cooldown = tuning.rail_cooldown;
    player.last_rail = Some(grind.rail);
    player.coyote_time = 0.0;
    player.airtime = 0.0;
}

/// Settle the trick overlay on touching a surface
fn resolve_trick(player: &mut Player, tuning: &Tuning, events: &mut dyn EventSink) {
    let Some(trick) = player.trick.take() else {
        return;
    };
    match trick.resolve(tuning.trick_duration) {
        TrickOutcome::Landed { name, points } => {
            log::debug!("Landed {} for {}", name, points);
            events.on_trick(name, points);
        }
        TrickOutcome::Failed { name } => {
            log::debug!("Failed {} at {:.0}%", name, trick.fraction(tuning.trick_duration) * 100.0);
            events.on_trick_failed(name);
        }
    }
}

/// Trick overlay and manual board rotation (airborne only)
fn update_air_rotation(player: &mut Player, input: &InputSnapshot, dt: f64, tuning: &Tuning) {
    if !player.is_airborne() {
        player.trick = None;
        player.angular_velocity = 0.0;
        return;
    }

    if let Some(kind) = input.trick {
        match player.trick {
            None => {
                player.trick = Some(TrickState::new(kind));
                log::debug!("Trick start: {}", kind.name());
            }
            Some(active) => {
                log::debug!("Ignoring {}, {} in progress", kind.name(), active.kind.name());
            }
        }
    }

    let duration = tuning.trick_duration;
    let spinning = player
        .trick
        .is_some_and(|t| t.kind.spins_board() && !t.is_complete(duration));

    if let Some(trick) = player.trick.as_mut() {
        player.board_angle += trick.advance(dt, duration, tuning.trick_spin_rate());
    }

    if spinning {
        player.angular_velocity = tuning.trick_spin_rate();
    } else {
        player.angular_velocity = input.rotate.clamp(-1.0, 1.0) * tuning.air_spin_rate;
        player.board_angle += player.angular_velocity * dt;
    }
    player.board_angle = normalize_angle(player.board_angle);
}

fn collect_coins(player: &Player, coins: &mut [Coin], tuning: &Tuning, events: &mut dyn EventSink) {
    let bounds = player.aabb(tuning.player_size);
    for coin in coins.iter_mut() {
        if coin.try_collect(&bounds) {
            events.on_coin_collected(coin.points, coin.position);
        }
    }
}
