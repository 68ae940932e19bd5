mod scene;

use trigon_engine::device::GlInit;
use trigon_engine::logging::{LoggingConfig, init_logging};
use trigon_engine::window::{Runtime, RuntimeConfig};

use crate::scene::{ShaderPaths, TrianglesApp};

fn main() {
    init_logging(LoggingConfig::default());

    let app = TrianglesApp::new(ShaderPaths::bundled());

    if let Err(err) = Runtime::run(RuntimeConfig::default(), GlInit::default(), app) {
        log::error!("aborting: startup or rendering failed");
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
