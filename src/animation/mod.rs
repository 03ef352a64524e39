//! Scroll-triggered entrance animations and looping decorations.
//!
//! Animations are registered per section through an [`AnimationContext`].
//! Everything a context registered is reverted as one unit, either by
//! [`AnimationContext::revert`] or when the context is dropped, so
//! re-mounting a section never leaves orphaned handles behind.
//!
//! Two kinds of animation exist:
//!
//! - [`Entrance`]: plays when its trigger enters the viewport and reverses
//!   when it leaves again (`play none none reverse`).
//! - [`Loop`]: an infinite yoyo cycle, independent of scroll position.
//!
//! Motion is purely cosmetic. When the [`MotionPolicy`] disables it, or a
//! backend refuses a registration, the animation is skipped and nothing else
//! changes.
//!
//! The backend is a trait so the controller stays independent of how motion
//! is realized; the generator uses [`markup::MarkupBackend`], which turns
//! registrations into `data-anim` attributes for the page runtime.

pub mod markup;
pub mod plans;

pub use markup::{MarkupBackend, SectionMotion};

use log::debug;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnimationError {
    #[error("animation unsupported: {0}")]
    Unsupported(String),
}

/// Starting pose of an entrance, or the excursion of a loop.
///
/// Unset fields keep the element's natural value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pose {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(rename = "scaleX", skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f32>,
    #[serde(rename = "scaleY", skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f32>,
    #[serde(rename = "rotateX", skip_serializing_if = "Option::is_none")]
    pub rotate_x: Option<f32>,
    #[serde(rename = "rotateY", skip_serializing_if = "Option::is_none")]
    pub rotate_y: Option<f32>,
}

impl Pose {
    /// Fully transparent, otherwise untouched.
    pub fn hidden() -> Self {
        Self {
            opacity: Some(0.0),
            ..Self::default()
        }
    }

    pub fn opacity(mut self, v: f32) -> Self {
        self.opacity = Some(v);
        self
    }

    pub fn x(mut self, v: f32) -> Self {
        self.x = Some(v);
        self
    }

    pub fn y(mut self, v: f32) -> Self {
        self.y = Some(v);
        self
    }

    pub fn scale(mut self, v: f32) -> Self {
        self.scale = Some(v);
        self
    }

    pub fn scale_x(mut self, v: f32) -> Self {
        self.scale_x = Some(v);
        self
    }

    pub fn scale_y(mut self, v: f32) -> Self {
        self.scale_y = Some(v);
        self
    }

    pub fn rotate(mut self, deg: f32) -> Self {
        self.rotate = Some(deg);
        self
    }

    pub fn rotate_x(mut self, deg: f32) -> Self {
        self.rotate_x = Some(deg);
        self
    }

    pub fn rotate_y(mut self, deg: f32) -> Self {
        self.rotate_y = Some(deg);
        self
    }
}

/// Easing curves, rendered as CSS timing functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Power2Out,
    Power3Out,
    Power4Out,
    Power2InOut,
    /// Overshoot ("back"); the value is the overshoot amount.
    BackOut(f32),
    Elastic,
    Bounce,
}

impl Ease {
    pub fn to_css(self) -> String {
        match self {
            Ease::Power2Out => "cubic-bezier(0.25, 0.46, 0.45, 0.94)".into(),
            Ease::Power3Out => "cubic-bezier(0.22, 0.61, 0.36, 1)".into(),
            Ease::Power4Out => "cubic-bezier(0.17, 0.84, 0.44, 1)".into(),
            Ease::Power2InOut => "cubic-bezier(0.45, 0.03, 0.52, 0.96)".into(),
            Ease::BackOut(overshoot) => {
                let y1 = 1.0 + overshoot / 3.0;
                format!("cubic-bezier(0.34, {y1:.2}, 0.64, 1)")
            }
            Ease::Elastic => "cubic-bezier(0.68, -0.6, 0.32, 1.6)".into(),
            Ease::Bounce => "cubic-bezier(0.34, 1.8, 0.64, 1)".into(),
        }
    }
}

impl Serialize for Ease {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

/// Viewport thresholds in "<element edge> <viewport offset>" form,
/// e.g. `"top 80%"`: fires when the element's top crosses 80% of the
/// viewport height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trigger {
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl Trigger {
    pub fn at(start: &str) -> Self {
        Self {
            start: start.to_string(),
            end: None,
        }
    }

    pub fn between(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: Some(end.to_string()),
        }
    }
}

/// Plays on enter, reverses on leave-back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entrance {
    pub from: Pose,
    #[serde(rename = "duration")]
    pub duration_ms: u32,
    pub ease: Ease,
    #[serde(flatten)]
    pub trigger: Trigger,
    /// Animate the target's children one after another, this far apart.
    #[serde(rename = "stagger", skip_serializing_if = "Option::is_none")]
    pub stagger_ms: Option<u32>,
    pub toggle: &'static str,
}

impl Entrance {
    pub const TOGGLE_ACTIONS: &'static str = "play none none reverse";

    pub fn new(from: Pose, duration_ms: u32, ease: Ease, trigger: Trigger) -> Self {
        Self {
            from,
            duration_ms,
            ease,
            trigger,
            stagger_ms: None,
            toggle: Self::TOGGLE_ACTIONS,
        }
    }

    pub fn stagger(mut self, ms: u32) -> Self {
        self.stagger_ms = Some(ms);
        self
    }
}

/// Infinite yoyo excursion applied to every element matching `selector`
/// inside the section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loop {
    pub selector: String,
    pub to: Pose,
    #[serde(rename = "duration")]
    pub duration_ms: u32,
    pub ease: Ease,
    #[serde(rename = "stagger", skip_serializing_if = "Option::is_none")]
    pub stagger_ms: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    Entrance(Entrance),
    Loop(Loop),
}

/// What a registration attaches to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Target {
    /// A single node, addressed by its `data-anim-id`.
    Node(String),
    /// The section element itself (loops attach here).
    Section,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationHandle(pub u64);

/// Something that can realize animations.
pub trait AnimationBackend {
    fn register(
        &mut self,
        scope: &str,
        target: &Target,
        animation: &Animation,
    ) -> Result<AnimationHandle, AnimationError>;

    fn revert(&mut self, handle: AnimationHandle);
}

/// When motion is allowed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionPolicy {
    pub reduced_motion: bool,
    /// Viewports this narrow or narrower get no motion.
    pub min_viewport_px: u32,
}

impl Default for MotionPolicy {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            min_viewport_px: 768,
        }
    }
}

impl MotionPolicy {
    /// `viewport_px` is `None` when the width is not known yet (build time);
    /// the width check is then left to the page runtime.
    pub fn allows(&self, viewport_px: Option<u32>) -> bool {
        if self.reduced_motion {
            return false;
        }
        viewport_px.is_none_or(|w| w > self.min_viewport_px)
    }
}

/// Registrations scoped to one mounted section.
pub struct AnimationContext<'b, B: AnimationBackend> {
    backend: &'b mut B,
    scope: String,
    enabled: bool,
    handles: Vec<AnimationHandle>,
}

impl<'b, B: AnimationBackend> AnimationContext<'b, B> {
    pub fn new(
        backend: &'b mut B,
        scope: &str,
        policy: &MotionPolicy,
        viewport_px: Option<u32>,
    ) -> Self {
        Self {
            backend,
            scope: scope.to_string(),
            enabled: policy.allows(viewport_px),
            handles: Vec::new(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of live registrations owned by this context.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Register an entrance on a node. Returns whether it was attached.
    pub fn entrance(&mut self, node: &str, entrance: Entrance) -> bool {
        self.register(Target::Node(node.to_string()), Animation::Entrance(entrance))
    }

    /// Register a looping decoration for the whole section.
    pub fn looping(&mut self, decoration: Loop) -> bool {
        self.register(Target::Section, Animation::Loop(decoration))
    }

    fn register(&mut self, target: Target, animation: Animation) -> bool {
        if !self.enabled {
            return false;
        }
        match self.backend.register(&self.scope, &target, &animation) {
            Ok(handle) => {
                self.handles.push(handle);
                true
            }
            Err(e) => {
                debug!("{}: skipping animation on {target:?}: {e}", self.scope);
                false
            }
        }
    }

    /// Revert every registration made through this context.
    pub fn revert(&mut self) {
        for handle in self.handles.drain(..) {
            self.backend.revert(handle);
        }
    }

    pub fn backend(&self) -> &B {
        &*self.backend
    }
}

impl<B: AnimationBackend> Drop for AnimationContext<'_, B> {
    fn drop(&mut self) {
        self.revert();
    }
}
