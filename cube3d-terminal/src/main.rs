/// cube3d terminal viewer
///
/// Usage: cube3d-terminal [SCRIPT]
///
/// SCRIPT is an optional command script applied before the first frame.
/// Controls:
///   - Arrows / WASD: Move up, down, left, right
///   - F/B or PageUp/PageDown: Move forward, backward
///   - x/y/z: Rotate, shifted to rotate the other way
///   - +/-: Scale up, down
///   - R: Reset
///   - Q/ESC: Quit
use cube3d_core::{parse_script, Scene};
use cube3d_terminal::TerminalApp;
use std::env;
use std::fs;
use std::io;

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut scene = Scene::default();

    if let Some(script_path) = env::args().nth(1) {
        log::info!("Loading command script {script_path}");

        let script = fs::read_to_string(&script_path).map_err(|e| {
            io::Error::new(io::ErrorKind::NotFound, format!("Failed to read script: {}", e))
        })?;
        let commands = parse_script(&script).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse script: {}", e))
        })?;

        log::info!("Applying {} commands", commands.len());
        scene.apply_all(commands);
    }

    let mut app = TerminalApp::new(scene)?;
    app.run()
}
