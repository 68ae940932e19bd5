use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;

use trigon_engine::core::{App, AppControl, FrameCtx};
use trigon_engine::device::{GlApi, GlDevice, NativeGl};
use trigon_engine::paint::Color;
use trigon_engine::render::{Vertex2, VertexArray};
use trigon_engine::shader::{self, ShaderProgram};

/// Two triangles meeting at the center: one on the bottom edge, one on the top.
pub const VERTICES: [Vertex2; 6] = [
    Vertex2::new(-1.0, -1.0),
    Vertex2::new(1.0, -1.0),
    Vertex2::new(0.0, 0.0),
    Vertex2::new(-1.0, 1.0),
    Vertex2::new(1.0, 1.0),
    Vertex2::new(0.0, 0.0),
];

/// Locations of the vertex and fragment shader sources.
#[derive(Debug, Clone)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ShaderPaths {
    /// Directory the shipped shaders are read from, relative to the working
    /// directory.
    pub const BUNDLED_DIR: &'static str = "resources/shaders";

    /// `shader.vert` and `shader.frag` under [`Self::BUNDLED_DIR`].
    pub fn bundled() -> Self {
        Self::in_dir(Self::BUNDLED_DIR)
    }

    /// `shader.vert` and `shader.frag` under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vertex: dir.join("shader.vert"),
            fragment: dir.join("shader.frag"),
        }
    }
}

/// GL resources for the demo.
///
/// Field order is release order: vertex array and buffer, then the program.
pub struct Scene<G: GlApi> {
    mesh: VertexArray<G>,
    program: ShaderProgram<G>,
}

impl<G: GlApi> fmt::Debug for Scene<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("mesh", &self.mesh)
            .field("program", &self.program)
            .finish()
    }
}

impl<G: GlApi> Scene<G> {
    /// Builds the program, makes it current, and uploads the triangles.
    pub fn build(gl: &Rc<G>, paths: &ShaderPaths) -> Result<Self> {
        let program = shader::link(gl, &paths.vertex, &paths.fragment)?;
        program.bind();

        let mesh = VertexArray::upload(Rc::clone(gl), &VERTICES)?;
        Ok(Self { mesh, program })
    }

    pub fn program(&self) -> &ShaderProgram<G> {
        &self.program
    }

    pub fn draw(&self) {
        self.mesh.draw();
    }
}

pub struct TrianglesApp {
    paths: ShaderPaths,
    scene: Option<Scene<NativeGl>>,
}

impl TrianglesApp {
    pub fn new(paths: ShaderPaths) -> Self {
        Self { paths, scene: None }
    }
}

impl App for TrianglesApp {
    fn on_init(&mut self, device: &GlDevice) -> Result<()> {
        let scene = Scene::build(device.gl(), &self.paths)?;
        log::info!(
            "scene ready: program {:?}, {} vertices",
            scene.program().raw(),
            VERTICES.len()
        );
        self.scene = Some(scene);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> Result<AppControl> {
        let Some(scene) = &self.scene else {
            return Ok(AppControl::Exit);
        };
        ctx.render(Color::BACKGROUND, |_| scene.draw())?;
        Ok(AppControl::Continue)
    }

    fn on_exit(&mut self) {
        if self.scene.take().is_some() {
            log::debug!("scene released");
        }
    }
}
