//! AreaDraw headless driver
//!
//! Loads a session file, replays its pointer script against the router and
//! writes the image under every resulting path.
//!
//! ```json
//! {
//!   "image": "photo.png",
//!   "displayWidth": 800,
//!   "displayHeight": 600,
//!   "config": { "allowDelete": true },
//!   "paths": [{ "name": "rectangle", "points": [[0.1, 0.1], [0.4, 0.5]] }],
//!   "script": [
//!     { "type": "start_drawing" },
//!     { "type": "up", "x": 100, "y": 100 }
//!   ]
//! }
//! ```
//!
//! Usage: `areadraw <session.json> [output-dir]`

use anyhow::{Context, Result, bail};
use areadraw_core::{InteractionRouter, MemorySurface, PathData, PointerEvent, RouterConfig};
use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::Size;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One scripted input step.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ScriptStep {
    Down { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Leave,
    StartDrawing,
    /// Activate a path by index, or clear the selection.
    Activate { index: Option<usize> },
    DeletePath,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    image: PathBuf,
    /// Display size; defaults to the image's own size.
    display_width: Option<f64>,
    display_height: Option<f64>,
    #[serde(default)]
    config: RouterConfig,
    #[serde(default)]
    paths: Vec<PathData>,
    #[serde(default)]
    script: Vec<ScriptStep>,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(session_path) = args.next().map(PathBuf::from) else {
        bail!("usage: areadraw <session.json> [output-dir]");
    };
    let output_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);

    let json = std::fs::read_to_string(&session_path)
        .with_context(|| format!("reading {}", session_path.display()))?;
    let session: Session = serde_json::from_str(&json)
        .with_context(|| format!("parsing {}", session_path.display()))?;

    // Image paths are relative to the session file.
    let image_path = match session_path.parent() {
        Some(dir) if session.image.is_relative() => dir.join(&session.image),
        _ => session.image.clone(),
    };
    let pixels = image::open(&image_path)
        .with_context(|| format!("opening {}", image_path.display()))?
        .to_rgba8();
    let display = Size::new(
        session.display_width.unwrap_or(f64::from(pixels.width())),
        session.display_height.unwrap_or(f64::from(pixels.height())),
    );
    log::info!("Session {} with {} paths", session_path.display(), session.paths.len());

    let surface = Rc::new(MemorySurface::new());
    let mut router = InteractionRouter::new(surface, session.config);
    router.set_image_url(Some(image_path.display().to_string()));
    router.on_image_loaded(pixels, display);

    for data in session.paths {
        router.add_path(data, false).context("adding session path")?;
    }
    for step in session.script {
        replay(&mut router, step);
    }

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    write_outputs(&router, &output_dir)
}

fn replay(router: &mut InteractionRouter, step: ScriptStep) {
    log::debug!("Replaying {:?}", step);
    match step {
        ScriptStep::Down { x, y } => {
            router.handle_pointer_event(PointerEvent::down(x, y));
        }
        ScriptStep::Up { x, y } => {
            router.handle_pointer_event(PointerEvent::up(x, y));
        }
        ScriptStep::Move { x, y } => {
            router.handle_pointer_event(PointerEvent::moved(x, y));
        }
        ScriptStep::Leave => {
            router.handle_pointer_event(PointerEvent::Leave);
        }
        ScriptStep::StartDrawing => {
            if !router.start_drawing() {
                log::warn!("Drawing refused");
            }
        }
        ScriptStep::Activate { index } => router.activate(index),
        ScriptStep::DeletePath => {
            router.delete_path();
        }
    }
}

fn write_outputs(router: &InteractionRouter, output_dir: &Path) -> Result<()> {
    let extension = router.config().export.format.extension();
    for position in 0..router.paths().len() {
        let Some(uri) = router.get_path_image(position) else {
            log::warn!("No image for path {}", position);
            continue;
        };
        let Some((_, payload)) = uri.split_once(";base64,") else {
            log::warn!("Path {} has an empty region", position);
            continue;
        };
        let bytes = STANDARD
            .decode(payload)
            .context("decoding extracted image")?;
        let file = output_dir.join(format!("path-{position}.{extension}"));
        std::fs::write(&file, bytes).with_context(|| format!("writing {}", file.display()))?;
        println!("{}", file.display());
    }

    let paths_file = output_dir.join("paths.json");
    let json = serde_json::to_string_pretty(&router.path_data())?;
    std::fs::write(&paths_file, json)
        .with_context(|| format!("writing {}", paths_file.display()))?;
    println!("{}", paths_file.display());
    Ok(())
}
