use super::api::GlApi;

/// Driver strings that can be queried with `glGetString`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverString {
    Version,
    ShadingLanguageVersion,
    Vendor,
    Renderer,
}

impl DriverString {
    pub(crate) const fn gl_enum(self) -> u32 {
        match self {
            DriverString::Version => glow::VERSION,
            DriverString::ShadingLanguageVersion => glow::SHADING_LANGUAGE_VERSION,
            DriverString::Vendor => glow::VENDOR,
            DriverString::Renderer => glow::RENDERER,
        }
    }
}

/// Snapshot of the driver identification strings, taken once after the
/// context becomes current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlInfo {
    pub version: String,
    pub shading_language: String,
    pub vendor: String,
    pub renderer: String,
}

impl GlInfo {
    pub fn query<G: GlApi>(gl: &G) -> Self {
        Self {
            version: gl.driver_string(DriverString::Version),
            shading_language: gl.driver_string(DriverString::ShadingLanguageVersion),
            vendor: gl.driver_string(DriverString::Vendor),
            renderer: gl.driver_string(DriverString::Renderer),
        }
    }

    /// Writes the snapshot to the `info` log.
    pub fn log(&self) {
        log::info!("OpenGL version: {}", self.version);
        log::info!("GLSL version: {}", self.shading_language);
        log::info!("Vendor: {}", self.vendor);
        log::info!("Renderer: {}", self.renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mock::MockGl;

    #[test]
    fn query_reads_every_driver_string() {
        let gl = MockGl::new();
        let info = GlInfo::query(&gl);

        assert_eq!(info.version, "4.6.0 Mock");
        assert_eq!(info.shading_language, "4.60 Mock");
        assert_eq!(info.vendor, "Trigon");
        assert_eq!(info.renderer, "MockGl");
    }
}
