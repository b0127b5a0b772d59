#![deny(unsafe_code)]
//! CLI binary for quiet-drift.
//!
//! Subcommands:
//! - `render`: run the node network N frames, write the last one as PNG
//! - `sequence`: write every k-th frame as a numbered PNG
//! - `replay <scene.json>`: render a saved scene
//! - `params`: print the parameter schema

mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use log::info;
use quiet_drift_core::{Animation, Scene, Srgb};
use quiet_drift_network::{Field, FieldParams};
use quiet_drift_raster::snapshot::write_png;
use quiet_drift_raster::{render_scene, SceneRenderer};

#[derive(Parser)]
#[command(name = "quiet-drift", about = "Ambient node-network animation renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SceneArgs {
    /// Viewport width in pixels.
    #[arg(short = 'W', long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(short = 'H', long, default_value_t = 720)]
    height: u32,

    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 600)]
    frames: usize,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Background color behind the transparent animation.
    #[arg(long, default_value = "#101418")]
    background: String,

    /// Field parameters as a JSON object.
    #[arg(long, default_value = "{}")]
    params: String,
}

impl SceneArgs {
    fn into_scene(self) -> Result<Scene, CliError> {
        let params: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let background = Srgb::from_hex(&self.background)?;
        let scene = Scene {
            width: self.width,
            height: self.height,
            seed: self.seed,
            frames: self.frames,
            params,
            background: Some(background),
        };
        scene.validate()?;
        Ok(scene)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Simulate N frames and write the last one as a PNG.
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// Write every k-th frame as frame_00000.png, frame_00001.png, ...
    Sequence {
        #[command(flatten)]
        scene: SceneArgs,

        /// Keep one frame out of this many.
        #[arg(long, default_value_t = 1)]
        every: usize,

        /// Directory for the numbered frames (created if missing).
        #[arg(short, long, default_value = "frames")]
        out_dir: PathBuf,
    },
    /// Render a scene described by a JSON file.
    Replay {
        /// Path to the scene file.
        scene: PathBuf,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// Print the parameter schema with defaults.
    Params,
}

fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{index:05}.png"))
}

fn render_to(scene: &Scene, output: &Path) -> Result<(), CliError> {
    let raster = render_scene(scene)?;
    let background = scene
        .background
        .unwrap_or_else(quiet_drift_raster::default_background);
    write_png(&raster, background, output)?;
    Ok(())
}

fn report(json: bool, scene: &Scene, output: &Path, written: usize) -> Result<(), CliError> {
    if json {
        let info = serde_json::json!({
            "width": scene.width,
            "height": scene.height,
            "frames": scene.frames,
            "seed": scene.seed,
            "written": written,
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {}x{} ({} frames, seed {}) -> {} ({written} file(s))",
            scene.width,
            scene.height,
            scene.frames,
            scene.seed,
            output.display()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let field = Field::new(0.0, 0.0, 0, FieldParams::default());
            println!("{}", serde_json::to_string_pretty(&field.param_schema())?);
        }
        Command::Render { scene, output } => {
            let scene = scene.into_scene()?;
            render_to(&scene, &output)?;
            report(cli.json, &scene, &output, 1)?;
        }
        Command::Replay { scene, output } => {
            let scene = Scene::load(&scene)?;
            info!("replaying scene with seed {}", scene.seed);
            render_to(&scene, &output)?;
            report(cli.json, &scene, &output, 1)?;
        }
        Command::Sequence {
            scene,
            every,
            out_dir,
        } => {
            let scene = scene.into_scene()?;
            fs::create_dir_all(&out_dir)
                .map_err(|e| CliError::Io(format!("{}: {e}", out_dir.display())))?;
            let mut renderer = SceneRenderer::new(&scene)?;
            let background = renderer.background();
            let mut written = 0;
            renderer.run(scene.frames, every, |_, raster| {
                let path = frame_path(&out_dir, written);
                written += 1;
                write_png(raster, background, &path)
            })?;
            report(cli.json, &scene, &out_dir, written)?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("quiet-drift").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_defaults() {
        let Command::Render { scene, output } = parse(&["render"]).command else {
            panic!("expected render");
        };
        assert_eq!((scene.width, scene.height), (1280, 720));
        assert_eq!(scene.frames, 600);
        assert_eq!(output, PathBuf::from("output.png"));
    }

    #[test]
    fn scene_args_reject_bad_params_json() {
        let Command::Render { scene, .. } = parse(&["render", "--params", "{nope"]).command else {
            panic!("expected render");
        };
        assert_eq!(scene.into_scene().err().map(|e| e.exit_code()), Some(12));
    }

    #[test]
    fn scene_args_reject_bad_background() {
        let Command::Render { scene, .. } =
            parse(&["render", "--background", "purple"]).command
        else {
            panic!("expected render");
        };
        assert_eq!(scene.into_scene().err().map(|e| e.exit_code()), Some(12));
    }

    #[test]
    fn scene_args_reject_zero_width() {
        let Command::Render { scene, .. } = parse(&["render", "-W", "0"]).command else {
            panic!("expected render");
        };
        assert_eq!(scene.into_scene().err().map(|e| e.exit_code()), Some(10));
    }

    #[test]
    fn render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("still.png");
        let cli = parse(&[
            "render",
            "-W",
            "64",
            "-H",
            "48",
            "-f",
            "5",
            "-o",
            out.to_str().unwrap(),
        ]);
        run(cli).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn sequence_writes_numbered_frames() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames");
        let cli = parse(&[
            "sequence",
            "-W",
            "32",
            "-H",
            "32",
            "-f",
            "6",
            "--every",
            "2",
            "-o",
            frames.to_str().unwrap(),
        ]);
        run(cli).unwrap();
        assert!(frames.join("frame_00000.png").exists());
        for i in 0..3 {
            assert!(frame_path(&frames, i).exists(), "missing frame {i}");
        }
        assert!(!frame_path(&frames, 3).exists());
    }

    #[test]
    fn replay_renders_scene_file() {
        let dir = tempfile::tempdir().unwrap();
        let scene_path = dir.path().join("scene.json");
        let out = dir.path().join("replay.png");
        fs::write(
            &scene_path,
            r##"{"width": 40, "height": 30, "seed": 5, "frames": 3, "background": "#000000"}"##,
        )
        .unwrap();
        run(parse(&[
            "replay",
            scene_path.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ]))
        .unwrap();
        assert!(out.exists());
    }

    #[test]
    fn replay_of_missing_file_is_io_error() {
        let err = run(parse(&["replay", "/no/such/scene.json"])).err().unwrap();
        assert_eq!(err.exit_code(), 11);
    }
}
