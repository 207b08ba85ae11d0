//! Rigid-body world behind the gravity overlay
//!
//! Page elements are represented as dynamic cuboids that fall under gravity
//! and bounce off four fixed walls placed on the viewport edges. A single
//! pointer drag constraint lets the user pull bodies around.

use crate::config::PhysicsConfig;
use crate::geometry::{Rect, Viewport};
use nalgebra::Point2;
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;

/// The four screen edges a wall can sit on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Top,
    Bottom,
    Left,
    Right,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Top, Wall::Bottom, Wall::Left, Wall::Right];

    /// Centre and full size of the wall for a viewport
    fn placement(self, viewport: Viewport, thickness: f32) -> (Point2<f32>, f32, f32) {
        let (w, h) = (viewport.width, viewport.height);
        match self {
            Wall::Top => (Point2::new(w / 2.0, 0.0), w, thickness),
            Wall::Bottom => (Point2::new(w / 2.0, h), w, thickness),
            Wall::Left => (Point2::new(0.0, h / 2.0), thickness, h),
            Wall::Right => (Point2::new(w, h / 2.0), thickness, h),
        }
    }
}

/// What a body in the world stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Follows a page element
    Tracked,
    /// Immovable screen boundary
    Boundary(Wall),
}

/// Snapshot of a body used to position its element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Centre x
    pub x: f32,
    /// Centre y
    pub y: f32,
    /// Rotation in radians
    pub angle: f32,
    /// Width of the axis-aligned bounds of the rotated body
    pub bounds_width: f32,
    /// Height of the axis-aligned bounds of the rotated body
    pub bounds_height: f32,
}

#[derive(Debug, Clone, Copy)]
struct Grab {
    body: RigidBodyHandle,
    /// Grabbed point in body-local coordinates
    local_point: Point<Real>,
    /// Where the pointer currently is
    target: Point<Real>,
}

/// Spring pulling a grabbed point toward the pointer
#[derive(Debug, Clone)]
struct DragConstraint {
    stiffness: f32,
    grab: Option<Grab>,
}

/// Physics world for the page overlay
pub struct PhysicsWorld {
    physics_pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    /// Dynamic bodies in creation order
    tracked: Vec<RigidBodyHandle>,
    walls: Vec<(Wall, RigidBodyHandle)>,

    drag: DragConstraint,

    restitution: f32,
    friction: f32,
    linear_damping: f32,
    angular_damping: f32,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new(config: &PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / config.step_hz;

        Self {
            physics_pipeline: PhysicsPipeline::new(),
            // Screen coordinates: +y points down
            gravity: vector![0.0, config.gravity],
            integration_parameters,
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            tracked: Vec::new(),
            walls: Vec::new(),
            drag: DragConstraint {
                stiffness: config.drag_stiffness,
                grab: None,
            },
            restitution: config.restitution,
            friction: config.friction,
            linear_damping: config.linear_damping,
            angular_damping: config.angular_damping,
        }
    }

    /// Add a dynamic body covering `rect` exactly
    pub fn add_tracked(&mut self, rect: Rect) -> RigidBodyHandle {
        let (cx, cy) = rect.center();
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![cx, cy])
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .ccd_enabled(true)
            .build();
        let handle = self.rigid_body_set.insert(rigid_body);

        // Bounce off anything at full restitution, slide at the lower friction
        let collider = ColliderBuilder::cuboid(rect.width / 2.0, rect.height / 2.0)
            .restitution(self.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .friction(self.friction)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .build();
        self.collider_set.insert_with_parent(collider, handle, &mut self.rigid_body_set);

        self.tracked.push(handle);
        handle
    }

    /// Add the four fixed walls flush with the viewport edges
    pub fn add_walls(&mut self, viewport: Viewport, thickness: f32) -> Vec<RigidBodyHandle> {
        Wall::ALL
            .iter()
            .map(|&wall| {
                let (center, width, height) = wall.placement(viewport, thickness);
                let rigid_body = RigidBodyBuilder::fixed()
                    .translation(center.coords)
                    .build();
                let handle = self.rigid_body_set.insert(rigid_body);
                let collider = ColliderBuilder::cuboid(width / 2.0, height / 2.0).build();
                self.collider_set.insert_with_parent(collider, handle, &mut self.rigid_body_set);
                self.walls.push((wall, handle));
                handle
            })
            .collect()
    }

    /// Advance the simulation by one fixed timestep
    pub fn step(&mut self) {
        self.apply_drag();
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Current pose and bounds of a body
    pub fn body_state(&self, handle: RigidBodyHandle) -> Option<BodyState> {
        let body = self.rigid_body_set.get(handle)?;
        let collider = body
            .colliders()
            .first()
            .and_then(|&c| self.collider_set.get(c))?;
        let aabb = collider.compute_aabb();
        let pos = body.translation();

        Some(BodyState {
            x: pos.x,
            y: pos.y,
            angle: body.rotation().angle(),
            bounds_width: aabb.maxs.x - aabb.mins.x,
            bounds_height: aabb.maxs.y - aabb.mins.y,
        })
    }

    /// Full width and height the body was created with
    pub fn body_size(&self, handle: RigidBodyHandle) -> Option<(f32, f32)> {
        let body = self.rigid_body_set.get(handle)?;
        let collider = self.collider_set.get(*body.colliders().first()?)?;
        let cuboid = collider.shape().as_cuboid()?;
        Some((cuboid.half_extents.x * 2.0, cuboid.half_extents.y * 2.0))
    }

    pub fn body_kind(&self, handle: RigidBodyHandle) -> Option<BodyKind> {
        if self.tracked.contains(&handle) {
            return Some(BodyKind::Tracked);
        }
        self.walls
            .iter()
            .find(|(_, h)| *h == handle)
            .map(|(wall, _)| BodyKind::Boundary(*wall))
    }

    /// Handles of the dynamic bodies in creation order
    pub fn tracked_handles(&self) -> &[RigidBodyHandle] {
        &self.tracked
    }

    pub fn wall_handle(&self, wall: Wall) -> Option<RigidBodyHandle> {
        self.walls.iter().find(|(w, _)| *w == wall).map(|(_, h)| *h)
    }

    /// Number of movable bodies in the world
    pub fn dynamic_body_count(&self) -> usize {
        self.rigid_body_set.iter().filter(|(_, b)| b.is_dynamic()).count()
    }

    /// Number of immovable bodies in the world
    pub fn fixed_body_count(&self) -> usize {
        self.rigid_body_set.iter().filter(|(_, b)| b.is_fixed()).count()
    }

    /// Grab the topmost dynamic body under the pointer, if any
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<RigidBodyHandle> {
        let point = point![x, y];
        let handle = self.tracked.iter().rev().copied().find(|&handle| {
            self.rigid_body_set.get(handle).map_or(false, |body| {
                body.colliders().iter().any(|&c| {
                    self.collider_set
                        .get(c)
                        .map_or(false, |collider| collider.shape().contains_point(collider.position(), &point))
                })
            })
        })?;

        let body = self.rigid_body_set.get(handle)?;
        let local_point = body.position().inverse_transform_point(&point);
        self.drag.grab = Some(Grab {
            body: handle,
            local_point,
            target: point,
        });
        log::debug!("Grabbed body {:?} at ({}, {})", handle, x, y);
        Some(handle)
    }

    /// Move the drag target
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(grab) = self.drag.grab.as_mut() {
            grab.target = point![x, y];
        }
    }

    /// Release whatever is grabbed
    pub fn pointer_up(&mut self) {
        if let Some(grab) = self.drag.grab.take() {
            log::debug!("Released body {:?}", grab.body);
        }
    }

    /// Body currently held by the pointer
    pub fn dragged(&self) -> Option<RigidBodyHandle> {
        self.drag.grab.map(|grab| grab.body)
    }

    /// Pull the grabbed point a stiffness-sized fraction toward the pointer
    fn apply_drag(&mut self) {
        let Some(grab) = self.drag.grab else {
            return;
        };
        let Some(body) = self.rigid_body_set.get_mut(grab.body) else {
            self.drag.grab = None;
            return;
        };

        let dt = self.integration_parameters.dt;
        let stiffness = self.drag.stiffness;
        let anchor = body.position().transform_point(&grab.local_point);
        let error = grab.target - anchor;

        let arm = anchor - *body.center_of_mass();
        let angvel = body.angvel();
        let point_velocity = *body.linvel() + vector![-angvel * arm.y, angvel * arm.x];

        let correction = error * (stiffness / dt) - point_velocity;
        let impulse = correction * (body.mass() * stiffness);
        body.apply_impulse_at_point(impulse, anchor, true);
    }
}
