//! Two hardcoded triangles through two fragment shaders in an OpenGL 3.3
//! core-profile window, with an optionally orbiting camera.
//!
//! Run as `trivis` (or `trivis orbit`) for the orbiting camera, or
//! `trivis static` for the fixed-transform variant.

use std::time::Duration;

use anyhow::{Context, bail};

use crate::abs::App;
use crate::driver::{Driver, DriverConfig};
use crate::scene::GlScene;

mod abs;
mod camera;
mod driver;
mod scene;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let animate_camera = match std::env::args().nth(1).as_deref() {
        None | Some("orbit") => true,
        Some("static") => false,
        Some(other) => bail!("unknown mode {other:?}, expected \"orbit\" or \"static\""),
    };

    let app = App::new("trivis", 1024, 768).context("failed to set up the window")?;
    let scene = GlScene::new(app).context("failed to build the scene")?;

    let mut driver = Driver::new(DriverConfig {
        animate_camera,
        frame_interval: animate_camera.then(|| Duration::from_millis(50)),
    });
    driver.run(scene);

    Ok(())
}
