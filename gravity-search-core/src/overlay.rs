//! Physics overlay: ties page elements to bodies in a [`PhysicsWorld`]
//!
//! Each tracked element is measured once, gets a body of exactly its size,
//! and from then on follows that body. The overlay never paints anything
//! itself; its only output is the transform handed to the [`ElementHost`]
//! for each element on every frame.

use crate::config::PageConfig;
use crate::error::Result;
use crate::frame::{ElementTransform, StepClock};
use crate::geometry::{Rect, Viewport};
use crate::physics::PhysicsWorld;
use rapier2d::prelude::RigidBodyHandle;

/// Page surface the overlay measures and moves
pub trait ElementHost {
    /// Bounding rectangle of the element with `id`
    fn measure(&self, id: &str) -> Result<Rect>;

    /// Current viewport size
    fn viewport(&self) -> Result<Viewport>;

    /// Write a frame's position and rotation onto the element with `id`
    fn apply_transform(&mut self, id: &str, transform: &ElementTransform) -> Result<()>;
}

/// A page element paired with its body
#[derive(Debug, Clone)]
pub struct TrackedElement {
    pub id: String,
    /// Bounds measured at initialization
    pub rect: Rect,
    pub body: RigidBodyHandle,
}

pub struct PhysicsOverlay {
    world: PhysicsWorld,
    elements: Vec<TrackedElement>,
    clock: StepClock,
    viewport: Viewport,
}

impl PhysicsOverlay {
    /// Measure the tracked elements and build the world around them
    pub fn init<H: ElementHost>(host: &H, config: &PageConfig) -> Result<Self> {
        // All measurements happen before the first body exists
        let measured = config
            .tracked
            .ids()
            .iter()
            .map(|id| host.measure(id).map(|rect| (id.to_string(), rect)))
            .collect::<Result<Vec<_>>>()?;
        let viewport = host.viewport()?;

        let physics = &config.physics;
        let mut world = PhysicsWorld::new(physics);
        let elements = measured
            .into_iter()
            .map(|(id, rect)| {
                let body = world.add_tracked(rect);
                TrackedElement { id, rect, body }
            })
            .collect::<Vec<_>>();
        world.add_walls(viewport, physics.wall_thickness);

        log::info!(
            "Physics overlay ready: {} bodies in a {}x{} viewport",
            elements.len(),
            viewport.width,
            viewport.height
        );

        Ok(Self {
            world,
            elements,
            clock: StepClock::new(physics.step_hz, physics.max_substeps),
            viewport,
        })
    }

    /// Run the simulation steps due by `timestamp_ms`; returns how many ran
    pub fn advance(&mut self, timestamp_ms: f64) -> u32 {
        let steps = self.clock.advance(timestamp_ms);
        for _ in 0..steps {
            self.world.step();
        }
        steps
    }

    /// Run exactly one simulation step
    pub fn step(&mut self) {
        self.world.step();
    }

    /// Copy every body's pose onto its element
    pub fn sync<H: ElementHost>(&self, host: &mut H) -> Result<()> {
        for (id, transform) in self.transforms() {
            host.apply_transform(id, &transform)?;
        }
        Ok(())
    }

    /// Current transform of every tracked element, in creation order
    pub fn transforms(&self) -> Vec<(&str, ElementTransform)> {
        self.elements
            .iter()
            .filter_map(|element| {
                self.world
                    .body_state(element.body)
                    .map(|state| (element.id.as_str(), ElementTransform::from_body(&state)))
            })
            .collect()
    }

    /// Start dragging whatever tracked element is under the pointer
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<&str> {
        let handle = self.world.pointer_down(x, y)?;
        self.elements
            .iter()
            .find(|element| element.body == handle)
            .map(|element| element.id.as_str())
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.world.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.world.pointer_up();
    }

    pub fn elements(&self) -> &[TrackedElement] {
        &self.elements
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
