pub mod camera;
pub mod cli;
pub mod composer;
pub mod core;
pub mod error;
pub mod graph;
pub mod node;
pub mod overlay;
pub mod panel;
pub mod params;
pub mod renderer;
pub mod rig;
pub mod scenes;
pub mod traits;
pub mod types;

// Re-export scene functions for backward compatibility
pub use scenes::{
    create_accumulative_scene, create_baked_scene, create_contact_scene, create_staged_scene,
};
