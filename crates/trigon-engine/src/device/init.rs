/// Initialization parameters for the GL layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or driver requirement exists.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested context version as `(major, minor)`.
    pub version: (u8, u8),

    /// Request a core profile context. Compatibility profile otherwise.
    pub core_profile: bool,

    /// Synchronize presentation with the display refresh (swap interval 1).
    ///
    /// Drivers that refuse the interval only produce a warning.
    pub vsync: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (4, 6),
            core_profile: true,
            vsync: true,
        }
    }
}
