use crate::coords::Viewport;
use crate::device::GlApi;
use crate::paint::Color;

/// Something that can show the frame that was just drawn.
pub trait Present {
    /// Presents the back buffer. May block for vsync.
    fn present(&mut self) -> anyhow::Result<()>;
}

/// Clears to `clear`, runs `draw`, then presents exactly once.
pub fn render_frame<G, P, F>(gl: &G, presenter: &mut P, clear: Color, draw: F) -> anyhow::Result<()>
where
    G: GlApi,
    P: Present,
    F: FnOnce(&G),
{
    gl.clear_color(clear);
    gl.clear_color_buffer();
    draw(gl);
    presenter.present()
}

/// Sets the viewport to cover `(0, 0, width, height)`.
///
/// Returns `None` and leaves GL untouched when either side is zero.
pub fn apply_viewport<G: GlApi>(gl: &G, width: u32, height: u32) -> Option<Viewport> {
    let viewport = Viewport::from_size(width, height);
    if !viewport.is_valid() {
        return None;
    }
    gl.viewport(viewport);
    Some(viewport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mock::{Call, MockGl};

    #[derive(Default)]
    struct CountingPresenter {
        presents: usize,
    }

    impl Present for CountingPresenter {
        fn present(&mut self) -> anyhow::Result<()> {
            self.presents += 1;
            Ok(())
        }
    }

    struct FailingPresenter;

    impl Present for FailingPresenter {
        fn present(&mut self) -> anyhow::Result<()> {
            anyhow::bail!("surface lost")
        }
    }

    #[test]
    fn frame_clears_then_draws_then_presents_once() {
        let gl = MockGl::new();
        let mut presenter = CountingPresenter::default();
        let clear = Color::BACKGROUND;

        render_frame(&gl, &mut presenter, clear, |gl| gl.draw_triangles(0, 6)).unwrap();

        assert_eq!(
            gl.calls(),
            vec![
                Call::ClearColor(clear),
                Call::Clear,
                Call::DrawTriangles { first: 0, count: 6 },
            ]
        );
        assert_eq!(presenter.presents, 1);
    }

    #[test]
    fn present_failure_propagates() {
        let gl = MockGl::new();
        let err = render_frame(&gl, &mut FailingPresenter, Color::default(), |_| {}).unwrap_err();
        assert_eq!(err.to_string(), "surface lost");
    }

    #[test]
    fn resize_sets_full_window_viewport_only() {
        let gl = MockGl::new();

        let viewport = apply_viewport(&gl, 800, 600).unwrap();

        assert_eq!(viewport, Viewport::new(0, 0, 800, 600));
        assert_eq!(gl.calls(), vec![Call::Viewport(Viewport::new(0, 0, 800, 600))]);
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let gl = MockGl::new();
        assert_eq!(apply_viewport(&gl, 0, 600), None);
        assert!(gl.calls().is_empty());
    }
}
