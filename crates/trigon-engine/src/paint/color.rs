/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
///
/// Matches what `glClearColor` expects; no premultiplication is applied.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Dark teal the window is cleared to every frame.
    pub const BACKGROUND: Self = Self::from_rgba(0.2, 0.3, 0.3, 1.0);

    #[inline]
    pub const fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}
