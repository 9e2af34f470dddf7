//! View transforms: pure functions from engine state to render commands.

pub mod backdrop;
pub mod hud;
pub mod illustration;
pub mod splash;

use phasefolio_protocol::{RenderCommand, Viewport};

use crate::engine::Controller;

pub use backdrop::{render_backdrop, stage_rect};
pub use hud::render_hud;
pub use illustration::{illustration_rect, render_illustration};
pub use splash::{enter_button_rect, render_splash};

/// Everything on screen for the current frame, back to front. The splash
/// covers the scene until the visitor enters.
pub fn render_scene(controller: &Controller, viewport: &Viewport) -> Vec<RenderCommand> {
    let frame = controller.frame();
    if !frame.boot.is_entered() {
        return render_splash(&frame, viewport);
    }

    let mut commands = render_backdrop(controller.particles(), &controller.outline(), viewport);
    commands.extend(render_illustration(
        &frame,
        controller.active_phase(),
        viewport,
    ));
    commands.extend(render_hud(&frame, &controller.config().phases, viewport));
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortfolioConfig;

    fn group_ids(cmds: &[RenderCommand]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::BeginGroup { id } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn splash_until_entered_then_scene() {
        let vp = Viewport::new(1280.0, 800.0);
        let mut c = Controller::new(PortfolioConfig::load_default().unwrap_or_else(|e| panic!("{e}")));
        c.resize(&vp);
        assert_eq!(group_ids(&render_scene(&c, &vp)), ["splash"]);

        c.tick(2.5);
        assert!(c.enter());
        let cmds = render_scene(&c, &vp);
        let ids = group_ids(&cmds);
        assert!(ids.contains(&"particles"));
        assert!(ids.contains(&"illustration-hero"));
        assert!(ids.contains(&"hud-terminal"));
    }

    #[test]
    fn push_and_pop_are_balanced() {
        let vp = Viewport::new(1280.0, 800.0);
        let mut c = Controller::new(PortfolioConfig::load_default().unwrap_or_else(|e| panic!("{e}")));
        c.resize(&vp);
        c.tick(2.5);
        c.enter();
        for progress in [0.0, 0.2, 0.4, 0.55, 0.7, 0.9] {
            c.set_progress(progress);
            c.tick(0.3);
            let cmds = render_scene(&c, &vp);
            let count = |f: fn(&RenderCommand) -> bool| cmds.iter().filter(|c| f(c)).count();
            assert_eq!(
                count(|c| matches!(c, RenderCommand::PushOpacity { .. })),
                count(|c| matches!(c, RenderCommand::PopOpacity))
            );
            assert_eq!(
                count(|c| matches!(c, RenderCommand::PushTransform { .. })),
                count(|c| matches!(c, RenderCommand::PopTransform))
            );
            assert_eq!(
                count(|c| matches!(c, RenderCommand::BeginGroup { .. })),
                count(|c| matches!(c, RenderCommand::EndGroup))
            );
        }
    }
}
