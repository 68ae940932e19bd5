use std::path::Path;
use std::rc::Rc;

use crate::device::GlApi;

use super::compiler::compile_bounded;
use super::error::ShaderError;
use super::info_log::{InfoLog, LOG_CAPACITY};
use super::object::{ShaderObject, ShaderProgram};
use super::source::ShaderSource;
use super::stage::ShaderStage;

/// Progress of a program build.
///
/// `Unbuilt -> Compiling(Vertex) -> Compiling(Fragment) -> Linking -> Ready`,
/// with any failure ending in `Aborted`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BuildState {
    Unbuilt,
    Compiling(ShaderStage),
    Linking,
    Ready,
    Aborted,
}

/// Compiles shader stages and links them into a [`ShaderProgram`].
///
/// Every call allocates fresh GL objects. Stage objects never outlive the
/// build: they are detached and released once linking finishes, successful or
/// not.
pub struct ProgramBuilder<G: GlApi> {
    gl: Rc<G>,
    state: BuildState,
    log_capacity: usize,
    #[cfg(test)]
    history: Vec<BuildState>,
}

impl<G: GlApi> ProgramBuilder<G> {
    pub fn new(gl: Rc<G>) -> Self {
        Self {
            gl,
            state: BuildState::Unbuilt,
            log_capacity: LOG_CAPACITY,
            #[cfg(test)]
            history: Vec::new(),
        }
    }

    /// Overrides the compiler/linker log capacity (terminator included).
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// State reached by the most recent build.
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Loads, compiles and links a vertex + fragment pair from disk.
    ///
    /// The fragment file is not read until the vertex stage has compiled.
    pub fn link_files(
        &mut self,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<ShaderProgram<G>, ShaderError> {
        self.transition(BuildState::Unbuilt);

        let vertex = self.stage_from_file(ShaderStage::Vertex, vertex_path)?;
        let fragment = self.stage_from_file(ShaderStage::Fragment, fragment_path)?;

        self.link_objects(&[vertex, fragment])
    }

    /// Compiles `sources`, then links them.
    ///
    /// A vertex and a fragment stage are required. The vertex stage compiles
    /// first and the fragment stage second, whatever the slice order; other
    /// stages follow in the order given. Compilation stops at the first failing
    /// stage and no program object is created.
    pub fn link_sources(
        &mut self,
        sources: &[ShaderSource],
    ) -> Result<ShaderProgram<G>, ShaderError> {
        self.transition(BuildState::Unbuilt);

        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if !sources.iter().any(|s| s.stage() == stage) {
                return self.abort(ShaderError::MissingStage { stage });
            }
        }

        let mut ordered: Vec<&ShaderSource> = sources.iter().collect();
        ordered.sort_by_key(|s| compile_rank(s.stage()));

        let mut objects = Vec::with_capacity(ordered.len());
        for source in ordered {
            objects.push(self.compile_stage(source)?);
        }

        self.link_objects(&objects)
    }

    fn stage_from_file(
        &mut self,
        stage: ShaderStage,
        path: &Path,
    ) -> Result<ShaderObject<G>, ShaderError> {
        self.transition(BuildState::Compiling(stage));
        let source = match ShaderSource::load(stage, path) {
            Ok(source) => source,
            Err(e) => return self.abort(e),
        };
        self.compile_stage(&source)
    }

    fn compile_stage(&mut self, source: &ShaderSource) -> Result<ShaderObject<G>, ShaderError> {
        let next = BuildState::Compiling(source.stage());
        if self.state != next {
            self.transition(next);
        }
        match compile_bounded(&self.gl, source.stage(), source.text(), self.log_capacity) {
            Ok(shader) => Ok(shader),
            Err(e) => self.abort(e),
        }
    }

    fn link_objects(
        &mut self,
        shaders: &[ShaderObject<G>],
    ) -> Result<ShaderProgram<G>, ShaderError> {
        self.transition(BuildState::Linking);

        let gl = Rc::clone(&self.gl);
        let raw = match gl.create_program() {
            Ok(raw) => raw,
            Err(message) => return self.abort(ShaderError::CreateProgram { message }),
        };
        let program = ShaderProgram::from_raw(Rc::clone(&gl), raw);

        for shader in shaders {
            gl.attach_shader(raw, shader.raw());
        }
        gl.link_program(raw);
        let linked = gl.program_link_status(raw);

        // Stages are only needed for linking; detached so they can be freed.
        for shader in shaders {
            gl.detach_shader(raw, shader.raw());
        }

        if !linked {
            let log = InfoLog::from_driver(gl.program_info_log(raw), self.log_capacity);
            return self.abort(ShaderError::Link { log });
        }

        self.transition(BuildState::Ready);
        Ok(program)
    }

    fn transition(&mut self, next: BuildState) {
        log::debug!("shader build: {:?} -> {:?}", self.state, next);
        self.state = next;
        #[cfg(test)]
        self.history.push(next);
    }

    fn abort<T>(&mut self, err: ShaderError) -> Result<T, ShaderError> {
        self.transition(BuildState::Aborted);
        Err(err)
    }
}

/// Position of `stage` in the compile sequence; the sort is stable, so equal
/// ranks keep their input order.
fn compile_rank(stage: ShaderStage) -> u8 {
    match stage {
        ShaderStage::Vertex => 0,
        ShaderStage::Fragment => 1,
        ShaderStage::Geometry => 2,
    }
}

/// Builds a program from a vertex and a fragment shader file.
pub fn link<G: GlApi>(
    gl: &Rc<G>,
    vertex_path: impl AsRef<Path>,
    fragment_path: impl AsRef<Path>,
) -> Result<ShaderProgram<G>, ShaderError> {
    ProgramBuilder::new(Rc::clone(gl)).link_files(vertex_path.as_ref(), fragment_path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mock::{Call, MockGl};
    use std::io::Write;

    const VERT: &str = "#version 460 core\nlayout (location = 0) in vec2 aPos;\nvoid main() { gl_Position = vec4(aPos, 0.0, 1.0); }\n";
    const FRAG: &str = "#version 460 core\nout vec4 FragColor;\nvoid main() { FragColor = vec4(1.0, 0.5, 0.2, 1.0); }\n";

    fn pair() -> Vec<ShaderSource> {
        vec![
            ShaderSource::new(ShaderStage::Vertex, VERT),
            ShaderSource::new(ShaderStage::Fragment, FRAG),
        ]
    }

    fn write_temp(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    // ── success ───────────────────────────────────────────────────────────

    #[test]
    fn valid_pair_links_and_reaches_ready() {
        let gl = Rc::new(MockGl::new());
        let mut builder = ProgramBuilder::new(Rc::clone(&gl));

        let program = builder.link_sources(&pair()).unwrap();

        assert_eq!(builder.state(), BuildState::Ready);
        assert_eq!(gl.count(|c| matches!(c, Call::LinkProgram(p) if *p == program.raw())), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::AttachShader { .. })), 2);
    }

    #[test]
    fn stage_objects_are_released_after_link() {
        let gl = Rc::new(MockGl::new());
        let program = ProgramBuilder::new(Rc::clone(&gl)).link_sources(&pair()).unwrap();

        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::DetachShader { .. })), 2);

        drop(program);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn link_compiles_vertex_before_fragment() {
        let gl = Rc::new(MockGl::new());
        let _program = ProgramBuilder::new(Rc::clone(&gl)).link_sources(&pair()).unwrap();

        let stages: Vec<_> = gl
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateShader(stage, _) => Some(stage),
                _ => None,
            })
            .collect();
        assert_eq!(stages, vec![ShaderStage::Vertex, ShaderStage::Fragment]);
    }

    #[test]
    fn reversed_sources_still_compile_vertex_first() {
        let gl = Rc::new(MockGl::new().fail_compile(ShaderStage::Vertex, "0:1: syntax error"));
        let mut builder = ProgramBuilder::new(Rc::clone(&gl));
        let sources = [
            ShaderSource::new(ShaderStage::Fragment, FRAG),
            ShaderSource::new(ShaderStage::Vertex, VERT),
        ];

        let err = builder.link_sources(&sources).unwrap_err();

        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Vertex, .. }));
        assert_eq!(builder.state(), BuildState::Aborted);
        assert_eq!(
            gl.calls().first(),
            Some(&Call::CreateShader(ShaderStage::Vertex, 1))
        );
        assert_eq!(gl.count(|c| matches!(c, Call::CreateShader(..))), 1);
    }

    #[test]
    fn reversed_sources_link_in_pipeline_order() {
        let gl = Rc::new(MockGl::new());
        let sources = [
            ShaderSource::new(ShaderStage::Fragment, FRAG),
            ShaderSource::new(ShaderStage::Vertex, VERT),
        ];

        let _program = ProgramBuilder::new(Rc::clone(&gl)).link_sources(&sources).unwrap();

        let stages: Vec<_> = gl
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateShader(stage, _) => Some(stage),
                _ => None,
            })
            .collect();
        assert_eq!(stages, vec![ShaderStage::Vertex, ShaderStage::Fragment]);
    }

    #[test]
    fn link_files_reads_both_stages() {
        let vert = write_temp(VERT);
        let frag = write_temp(FRAG);
        let gl = Rc::new(MockGl::new());

        let program = link(&gl, vert.path(), frag.path()).unwrap();

        assert_eq!(gl.live_programs(), 1);
        assert!(gl.calls().contains(&Call::ShaderSource(1, VERT.to_owned())));
        drop(program);
    }

    #[test]
    fn link_files_visits_each_state_once() {
        let vert = write_temp(VERT);
        let frag = write_temp(FRAG);
        let gl = Rc::new(MockGl::new());
        let mut builder = ProgramBuilder::new(Rc::clone(&gl));

        let _program = builder.link_files(vert.path(), frag.path()).unwrap();

        assert_eq!(
            builder.history,
            vec![
                BuildState::Unbuilt,
                BuildState::Compiling(ShaderStage::Vertex),
                BuildState::Compiling(ShaderStage::Fragment),
                BuildState::Linking,
                BuildState::Ready,
            ]
        );
    }

    // ── compile failures ──────────────────────────────────────────────────

    #[test]
    fn vertex_compile_failure_short_circuits() {
        let gl = Rc::new(MockGl::new().fail_compile(ShaderStage::Vertex, "0:1: syntax error"));
        let mut builder = ProgramBuilder::new(Rc::clone(&gl));

        let err = builder.link_sources(&pair()).unwrap_err();

        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Vertex, .. }));
        assert_eq!(builder.state(), BuildState::Aborted);
        // The fragment stage is never touched, and no program exists.
        assert_eq!(gl.count(|c| matches!(c, Call::CreateShader(..))), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::CreateProgram(_))), 0);
        assert_eq!(gl.count(|c| matches!(c, Call::LinkProgram(_))), 0);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn fragment_compile_failure_never_links() {
        let gl = Rc::new(MockGl::new().fail_compile(ShaderStage::Fragment, "0:3: undeclared"));
        let mut builder = ProgramBuilder::new(Rc::clone(&gl));

        let err = builder.link_sources(&pair()).unwrap_err();

        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Fragment, .. }));
        assert_eq!(gl.count(|c| matches!(c, Call::CreateProgram(_))), 0);
        assert_eq!(gl.count(|c| matches!(c, Call::LinkProgram(_))), 0);
        // The already compiled vertex stage is released too.
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn missing_vertex_file_never_reads_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let frag = write_temp(FRAG);
        let gl = Rc::new(MockGl::new());
        let mut builder = ProgramBuilder::new(Rc::clone(&gl));

        let err = builder
            .link_files(&dir.path().join("nope.vert"), frag.path())
            .unwrap_err();

        assert!(matches!(err, ShaderError::Io { .. }));
        assert_eq!(builder.state(), BuildState::Aborted);
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn missing_fragment_file_releases_compiled_vertex() {
        let dir = tempfile::tempdir().unwrap();
        let vert = write_temp(VERT);
        let gl = Rc::new(MockGl::new());
        let mut builder = ProgramBuilder::new(Rc::clone(&gl));

        let err = builder
            .link_files(vert.path(), &dir.path().join("nope.frag"))
            .unwrap_err();

        assert!(matches!(err, ShaderError::Io { .. }));
        assert_eq!(builder.state(), BuildState::Aborted);
        assert_eq!(gl.count(|c| matches!(c, Call::CompileShader(_))), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::CreateProgram(_))), 0);
        assert_eq!(gl.live_shaders(), 0);
    }

    // ── link failures ─────────────────────────────────────────────────────

    #[test]
    fn mismatched_stages_fail_at_link_not_compile() {
        let gl = Rc::new(MockGl::new().fail_link("error: vColor not written by vertex shader"));
        let mut builder = ProgramBuilder::new(Rc::clone(&gl));

        let err = builder.link_sources(&pair()).unwrap_err();

        match &err {
            ShaderError::Link { log } => {
                assert_eq!(log.as_str(), "error: vColor not written by vertex shader");
            }
            other => panic!("expected Link, got {other:?}"),
        }
        assert_eq!(builder.state(), BuildState::Aborted);
        assert_eq!(gl.live_programs(), 0);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn link_log_is_bounded() {
        let gl = Rc::new(MockGl::new().fail_link("L".repeat(4096)));
        let err = ProgramBuilder::new(Rc::clone(&gl)).link_sources(&pair()).unwrap_err();

        let log = err.info_log().unwrap();
        assert_eq!(log.len(), LOG_CAPACITY - 1);
    }

    // ── input checks ──────────────────────────────────────────────────────

    #[test]
    fn sources_without_fragment_stage_are_rejected() {
        let gl = Rc::new(MockGl::new());
        let err = ProgramBuilder::new(Rc::clone(&gl))
            .link_sources(&[ShaderSource::new(ShaderStage::Vertex, VERT)])
            .unwrap_err();

        assert!(matches!(err, ShaderError::MissingStage { stage: ShaderStage::Fragment }));
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn builder_can_run_again_after_abort() {
        let gl = Rc::new(MockGl::new());
        let mut builder = ProgramBuilder::new(Rc::clone(&gl));

        let _ = builder.link_sources(&[]).unwrap_err();
        assert_eq!(builder.state(), BuildState::Aborted);

        let _program = builder.link_sources(&pair()).unwrap();
        assert_eq!(builder.state(), BuildState::Ready);
    }
}
