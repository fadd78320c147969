// cli.rs - Command-line interface configuration
use clap::Parser;

use crate::scenes::DEFAULT_SCENE;

#[derive(Parser, Debug, Clone)]
#[command(name = "shadowbox")]
#[command(about = "Declarative shadow-staging scenes", long_about = None)]
pub struct Cli {
    /// Scene version to stage: baked, accumulative, contact or staged
    #[arg(long = "scene")]
    pub scene: Option<String>,

    /// Disable the perf overlay and control panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Print the first composed frame snapshot as JSON and exit
    #[arg(long = "describe", default_value = "false")]
    pub describe: bool,

    /// Tick N headless frames without a window, then exit
    #[arg(long = "frames")]
    pub frames: Option<u32>,
}

impl Cli {
    /// Scene choice, falling back to the SCENE env var, then the default.
    pub fn scene_name(&self) -> String {
        self.scene
            .clone()
            .or_else(|| std::env::var("SCENE").ok())
            .unwrap_or_else(|| DEFAULT_SCENE.to_string())
    }
}
