//! Animation backend that compiles registrations into markup attributes.
//!
//! Entrances end up as `data-anim` JSON on their node, loops as a
//! `data-anim-loops` JSON array on the section element. The page runtime
//! (`static/site.js`) reads both.

use super::{Animation, AnimationBackend, AnimationContext, AnimationError, AnimationHandle, Target};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Registration {
    scope: String,
    target: Target,
    animation: Animation,
}

#[derive(Debug, Default)]
pub struct MarkupBackend {
    next: u64,
    live: BTreeMap<AnimationHandle, Registration>,
}

impl MarkupBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations not yet reverted, across all scopes.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn snapshot(&self, scope: &str) -> SectionMotion {
        let mut nodes: BTreeMap<String, Vec<&super::Entrance>> = BTreeMap::new();
        let mut loops = Vec::new();
        for reg in self.live.values().filter(|r| r.scope == scope) {
            match (&reg.target, &reg.animation) {
                (Target::Node(id), Animation::Entrance(e)) => {
                    nodes.entry(id.clone()).or_default().push(e)
                }
                (_, Animation::Loop(l)) => loops.push(l),
                (Target::Section, Animation::Entrance(_)) => {}
            }
        }

        SectionMotion {
            nodes: nodes
                .into_iter()
                .filter_map(|(id, entrances)| {
                    // One entrance per node is the norm; keep the latest.
                    let last = entrances.last()?;
                    serde_json::to_string(last).ok().map(|json| (id, json))
                })
                .collect(),
            loops: if loops.is_empty() {
                None
            } else {
                serde_json::to_string(&loops).ok()
            },
        }
    }
}

impl AnimationBackend for MarkupBackend {
    fn register(
        &mut self,
        scope: &str,
        target: &Target,
        animation: &Animation,
    ) -> Result<AnimationHandle, AnimationError> {
        if let (Target::Section, Animation::Entrance(_)) = (target, animation) {
            return Err(AnimationError::Unsupported(
                "entrances need a node target".into(),
            ));
        }
        self.next += 1;
        let handle = AnimationHandle(self.next);
        self.live.insert(
            handle,
            Registration {
                scope: scope.to_string(),
                target: target.clone(),
                animation: animation.clone(),
            },
        );
        Ok(handle)
    }

    fn revert(&mut self, handle: AnimationHandle) {
        self.live.remove(&handle);
    }
}

impl AnimationContext<'_, MarkupBackend> {
    /// Attributes for everything currently registered in this scope.
    pub fn motion(&self) -> SectionMotion {
        self.backend().snapshot(self.scope())
    }
}

/// Per-section animation attributes, ready to splice into markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMotion {
    nodes: BTreeMap<String, String>,
    loops: Option<String>,
}

impl SectionMotion {
    /// No motion at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// `data-anim` value for a node.
    pub fn node(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(String::as_str)
    }

    /// `data-anim-loops` value for the section element.
    pub fn loops(&self) -> Option<&str> {
        self.loops.as_deref()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Ease, Entrance, Loop, MotionPolicy, Pose, Trigger};

    fn entrance() -> Entrance {
        Entrance::new(Pose::hidden(), 800, Ease::Power2Out, Trigger::at("top 70%"))
    }

    fn badge_loop() -> Loop {
        Loop {
            selector: ".vintage-badge".into(),
            to: Pose::default().y(-5.0),
            duration_ms: 1500,
            ease: Ease::Power2InOut,
            stagger_ms: Some(100),
        }
    }

    #[test]
    fn motion_exposes_node_and_loop_attributes() {
        let mut backend = MarkupBackend::new();
        let mut ctx = AnimationContext::new(&mut backend, "experience", &MotionPolicy::default(), None);
        ctx.entrance("experience-current", entrance());
        ctx.looping(badge_loop());

        let motion = ctx.motion();
        let node = motion.node("experience-current").unwrap();
        assert!(node.contains(r#""start":"top 70%""#));
        assert!(motion.loops().unwrap().contains(".vintage-badge"));
        assert_eq!(motion.node("missing"), None);
    }

    #[test]
    fn scopes_do_not_leak_into_each_other() {
        let mut backend = MarkupBackend::new();
        let mut about = AnimationContext::new(&mut backend, "about", &MotionPolicy::default(), None);
        about.entrance("about-masthead", entrance());
        let motion = about.motion();
        drop(about);

        let skills = AnimationContext::new(&mut backend, "skills", &MotionPolicy::default(), None);
        assert_eq!(skills.motion(), SectionMotion::none());
        assert_eq!(motion.node_count(), 1);
    }

    #[test]
    fn dropping_context_empties_backend() {
        let mut backend = MarkupBackend::new();
        {
            let mut ctx = AnimationContext::new(&mut backend, "about", &MotionPolicy::default(), None);
            ctx.entrance("about-masthead", entrance());
            ctx.looping(badge_loop());
        }
        assert_eq!(backend.live_count(), 0);
    }

    #[test]
    fn section_entrance_is_refused() {
        let mut backend = MarkupBackend::new();
        let result = backend.register(
            "about",
            &Target::Section,
            &Animation::Entrance(entrance()),
        );
        assert!(result.is_err());
    }
}
