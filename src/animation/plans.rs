//! Per-section choreography.
//!
//! Node ids are `<section>-<part>`; the section renderers put the same ids on
//! their elements as `data-anim-id`.

use super::{AnimationBackend, AnimationContext, Ease, Entrance, Loop, Pose, Trigger};

/// Register the plan for whatever section `ctx` is scoped to. Sections
/// without motion register nothing.
pub fn mount<B: AnimationBackend>(ctx: &mut AnimationContext<'_, B>) {
    match ctx.scope() {
        "about" => about(ctx),
        "experience" => experience(ctx),
        "projects" => projects(ctx),
        "skills" => skills(ctx),
        "education" => education(ctx),
        "contact" => contact(ctx),
        _ => {}
    }
}

fn masthead_trigger() -> Trigger {
    Trigger::between("top 80%", "bottom 20%")
}

fn float(selector: &str, to: Pose, duration_ms: u32, stagger_ms: Option<u32>) -> Loop {
    Loop {
        selector: selector.to_string(),
        to,
        duration_ms,
        ease: Ease::Power2InOut,
        stagger_ms,
    }
}

fn about<B: AnimationBackend>(ctx: &mut AnimationContext<'_, B>) {
    ctx.entrance(
        "about-masthead",
        Entrance::new(
            Pose::hidden().y(-50.0).scale(0.9),
            1200,
            Ease::Power3Out,
            masthead_trigger(),
        ),
    );
    ctx.entrance(
        "about-article",
        Entrance::new(
            Pose::hidden().x(-100.0).rotate_y(-15.0),
            1500,
            Ease::Power4Out,
            Trigger::at("top 75%"),
        ),
    );
    ctx.entrance(
        "about-sidebar",
        Entrance::new(
            Pose::hidden().x(100.0).scale(0.8),
            1000,
            Ease::BackOut(1.7),
            Trigger::at("top 70%"),
        )
        .stagger(200),
    );
    ctx.entrance(
        "about-philosophy",
        Entrance::new(
            Pose::hidden().y(50.0).scale(0.95),
            1500,
            Ease::Elastic,
            Trigger::at("top 80%"),
        ),
    );
    ctx.looping(float(".ornament", Pose::default().y(-10.0), 2000, None));
}

fn experience<B: AnimationBackend>(ctx: &mut AnimationContext<'_, B>) {
    ctx.entrance(
        "experience-masthead",
        Entrance::new(
            Pose::hidden().y(-80.0).rotate_x(-90.0),
            1400,
            Ease::Bounce,
            masthead_trigger(),
        ),
    );
    ctx.entrance(
        "experience-current",
        Entrance::new(
            Pose::hidden().rotate_y(-180.0).scale(0.5),
            1600,
            Ease::BackOut(1.7),
            Trigger::at("top 75%"),
        ),
    );
    ctx.entrance(
        "experience-opportunities",
        Entrance::new(
            Pose::hidden().scale(0.3).rotate(-10.0),
            1800,
            Ease::Elastic,
            Trigger::at("top 80%"),
        ),
    );
    ctx.looping(float(".vintage-badge", Pose::default().y(-5.0), 1500, Some(100)));
}

fn projects<B: AnimationBackend>(ctx: &mut AnimationContext<'_, B>) {
    ctx.entrance(
        "projects-masthead",
        Entrance::new(
            Pose::hidden().scale(0.3).rotate(180.0),
            2500,
            Ease::Elastic,
            masthead_trigger(),
        ),
    );
    ctx.entrance(
        "projects-grid",
        Entrance::new(
            Pose::hidden().x(-400.0).rotate_y(90.0).scale(0.5),
            2000,
            Ease::Power3Out,
            Trigger::at("top 70%"),
        )
        .stagger(400),
    );
    ctx.entrance(
        "projects-future",
        Entrance::new(
            Pose::hidden().y(200.0).rotate_x(-90.0),
            2500,
            Ease::Bounce,
            Trigger::at("top 80%"),
        ),
    );
    ctx.looping(float(
        ".project-badge",
        Pose::default().y(-5.0).rotate(2.0),
        2500,
        Some(200),
    ));
    ctx.looping(float(".tech-badge", Pose::default().x(2.0), 1800, Some(100)));
}

fn skills<B: AnimationBackend>(ctx: &mut AnimationContext<'_, B>) {
    ctx.entrance(
        "skills-masthead",
        Entrance::new(
            Pose::hidden().scale_x(0.0),
            1500,
            Ease::Power4Out,
            masthead_trigger(),
        ),
    );
    ctx.entrance(
        "skills-grid",
        Entrance::new(
            Pose::hidden().rotate_y(-90.0).x(-50.0),
            1200,
            Ease::Power3Out,
            Trigger::at("top 75%"),
        )
        .stagger(200),
    );
    ctx.entrance(
        "skills-levels",
        Entrance::new(
            Pose::default().scale_x(0.0),
            2000,
            Ease::Power2Out,
            Trigger::at("top 60%"),
        )
        .stagger(100),
    );
    ctx.entrance(
        "skills-additional",
        Entrance::new(
            Pose::hidden().y(30.0).scale(0.8),
            800,
            Ease::BackOut(1.7),
            Trigger::at("top 80%"),
        )
        .stagger(150),
    );
    ctx.looping(float(".skill-badge", Pose::default().y(-3.0), 2000, Some(100)));
}

fn education<B: AnimationBackend>(ctx: &mut AnimationContext<'_, B>) {
    ctx.entrance(
        "education-masthead",
        Entrance::new(
            Pose::hidden().y(-60.0).rotate(-5.0),
            1400,
            Ease::Elastic,
            masthead_trigger(),
        ),
    );
    ctx.entrance(
        "education-card",
        Entrance::new(
            Pose::hidden().rotate_y(-90.0),
            1600,
            Ease::Power3Out,
            Trigger::at("top 75%"),
        ),
    );
    ctx.entrance(
        "education-coursework",
        Entrance::new(
            Pose::hidden().scale_y(0.0),
            1200,
            Ease::Power4Out,
            Trigger::at("top 80%"),
        ),
    );
    ctx.entrance(
        "education-courses",
        Entrance::new(
            Pose::hidden().x(-30.0),
            800,
            Ease::Power2Out,
            Trigger::at("top 70%"),
        )
        .stagger(100),
    );
}

fn contact<B: AnimationBackend>(ctx: &mut AnimationContext<'_, B>) {
    ctx.entrance(
        "contact-section",
        Entrance::new(
            Pose::hidden().y(50.0),
            1000,
            Ease::Power2Out,
            Trigger::at("top 80%"),
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tests::RecordingBackend;
    use crate::animation::{MarkupBackend, MotionPolicy, Target};

    fn count(scope: &str) -> usize {
        let mut backend = RecordingBackend::default();
        let mut ctx = AnimationContext::new(&mut backend, scope, &MotionPolicy::default(), None);
        mount(&mut ctx);
        ctx.len()
    }

    #[test]
    fn each_animated_section_registers_its_plan() {
        assert_eq!(count("about"), 5);
        assert_eq!(count("experience"), 4);
        assert_eq!(count("projects"), 5);
        assert_eq!(count("skills"), 5);
        assert_eq!(count("education"), 4);
        assert_eq!(count("contact"), 1);
    }

    #[test]
    fn static_sections_register_nothing() {
        assert_eq!(count("hero"), 0);
        assert_eq!(count("resume"), 0);
        assert_eq!(count("footer"), 0);
    }

    #[test]
    fn node_ids_are_prefixed_with_their_section() {
        let mut backend = RecordingBackend::default();
        for scope in ["about", "experience", "projects", "skills", "education", "contact"] {
            let mut ctx = AnimationContext::new(&mut backend, scope, &MotionPolicy::default(), None);
            mount(&mut ctx);
        }
        for (scope, target) in &backend.registered {
            if let Target::Node(id) = target {
                assert!(id.starts_with(&format!("{scope}-")), "{id} in {scope}");
            }
        }
        assert!(backend.live.is_empty());
    }

    #[test]
    fn sidebar_children_are_staggered() {
        let mut backend = MarkupBackend::new();
        let mut ctx = AnimationContext::new(&mut backend, "about", &MotionPolicy::default(), None);
        mount(&mut ctx);
        let motion = ctx.motion();
        assert!(motion.node("about-sidebar").unwrap().contains(r#""stagger":200"#));
        assert!(motion.loops().unwrap().contains(".ornament"));
    }
}
