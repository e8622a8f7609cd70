// Allow unused code for designed-but-not-yet-used APIs
// Remove these as the codebase matures
#![allow(dead_code)]

mod capture;
mod config;
mod display;
mod input;
mod magnifier;
mod view;

use clap::Parser;
use config::Config;
use display::{Display, InputEvent, PixelBuffer, RenderTarget, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use input::Command;
use magnifier::{Focus, Magnifier};

/// Keyboard-driven magnifier over a snapshot of the current screen
#[derive(Parser, Debug)]
#[command(name = "screenloupe", version, about)]
struct Cli {
    /// Path to a JSON settings file
    #[arg(short, long, default_value = "screenloupe.json")]
    config: String,

    /// Window width when not starting fullscreen
    #[arg(long)]
    width: Option<u32>,

    /// Window height when not starting fullscreen
    #[arg(long)]
    height: Option<u32>,

    /// Start fullscreen, whatever the settings file says
    #[arg(long, conflicts_with = "windowed")]
    fullscreen: bool,

    /// Start in a regular window, whatever the settings file says
    #[arg(long)]
    windowed: bool,

    /// Zoom toward the mouse pointer instead of the window center
    #[arg(long)]
    follow_mouse: bool,

    /// Initial magnification factor
    #[arg(short, long)]
    scale: Option<f64>,

    /// Largest magnification factor reachable by zooming in
    #[arg(long)]
    max_scale: Option<f64>,

    /// Scale change per zoom step
    #[arg(long)]
    scale_step: Option<f64>,

    /// Pixels moved per pan step
    #[arg(long)]
    pan_step: Option<i32>,
}

/// Window point that stays over the same content during a zoom step
fn focal_point(focus: Focus, display: &Display, window: (u32, u32)) -> (i32, i32) {
    match focus {
        Focus::Pointer => display.pointer_position(),
        Focus::WindowCenter => (window.0 as i32 / 2, window.1 as i32 / 2),
    }
}

fn main() -> Result<(), String> {
    env_logger::init();
    let cli = Cli::parse();

    // Settings file is optional; defaults fill in whatever is missing
    let mut config = Config::load(&cli.config).unwrap_or_else(|e| {
        log::debug!("using default settings ({}: {})", cli.config, e);
        Config::default()
    });

    // Command line flags win over the file
    if cli.fullscreen {
        config.start_fullscreen = true;
    }
    if cli.windowed {
        config.start_fullscreen = false;
    }
    if cli.follow_mouse {
        config.center_on_mouse = true;
    }
    if let Some(scale) = cli.scale {
        config.default_scale = scale;
    }
    if let Some(max_scale) = cli.max_scale {
        config.max_scale = max_scale;
    }
    if let Some(step) = cli.scale_step {
        config.scale_increment = step;
    }
    if let Some(step) = cli.pan_step {
        config.pan_increment = step;
    }
    let config = config.normalized();

    let focus = if config.center_on_mouse {
        Focus::Pointer
    } else {
        Focus::WindowCenter
    };

    // Snapshot first, before the magnifier window appears and covers the
    // screen it is supposed to magnify
    let captured = capture::capture_screen().map_err(|e| e.to_string())?;
    log::info!(
        "captured a {}x{} screen image",
        captured.width(),
        captured.height()
    );
    let mut magnifier = Magnifier::new(captured, &config).map_err(|e| e.to_string())?;

    let (mut display, texture_creator) = Display::with_options(
        "screenloupe",
        cli.width.unwrap_or(DEFAULT_WIDTH),
        cli.height.unwrap_or(DEFAULT_HEIGHT),
        config.start_fullscreen,
    )?;
    let mut window = display
        .output_size()
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
    let mut target = RenderTarget::with_size(&texture_creator, window.0, window.1)?;
    let mut frame = PixelBuffer::with_size(window.0, window.1);

    // The viewport starts unplaced, so the first recenter runs against the
    // neutral prior scale 1.0
    magnifier.recenter_initial(focal_point(focus, &display, window), window);
    magnifier.render_into(&mut frame);
    display.present(&mut target, &frame)?;

    println!("=== screenloupe ===");
    println!(
        "Scale: {}x (max {}x, step {})",
        magnifier.scale(),
        config.max_scale,
        config.scale_increment
    );
    println!("Use --help for command line options.");
    println!("Controls:");
    println!("  + / = / PageUp - Zoom in");
    println!("  - / PageDown   - Zoom out");
    println!("  Arrows / WASD  - Pan (hold Shift to pan x4)");
    println!("  F11            - Toggle fullscreen");
    println!("  Escape / Q     - Quit");

    'main: loop {
        for event in display.wait_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::Redraw => {},
                InputEvent::KeyDown { key, keymod } => {
                    let Some(command) = Command::from_key(key, keymod) else {
                        continue;
                    };
                    match command {
                        Command::Quit => break 'main,
                        Command::ZoomIn => {
                            let focal = focal_point(focus, &display, window);
                            match magnifier.zoom_in(focal, window) {
                                Ok(true) => log::debug!("scale now {}", magnifier.scale()),
                                Ok(false) => {},
                                Err(e) => eprintln!("Zoom in failed: {}", e),
                            }
                        },
                        Command::ZoomOut => {
                            let focal = focal_point(focus, &display, window);
                            match magnifier.zoom_out(focal, window) {
                                Ok(true) => log::debug!("scale now {}", magnifier.scale()),
                                Ok(false) => {},
                                Err(e) => eprintln!("Zoom out failed: {}", e),
                            }
                        },
                        Command::Pan { direction, fast } => {
                            magnifier.pan(direction, fast);
                        },
                        Command::ToggleFullscreen => {
                            let enable = !display.is_fullscreen();
                            if let Err(e) = display.set_fullscreen(enable) {
                                log::warn!("fullscreen toggle failed: {}", e);
                            }
                        },
                    }
                },
            }
        }

        // One repaint per batch of events. The window may have been resized
        // underneath us; when the geometry query fails, clamp against the
        // last known size instead of guessing
        match display.output_size() {
            Some(size) if size != window => {
                window = size;
                target = RenderTarget::with_size(&texture_creator, size.0, size.1)?;
                frame = PixelBuffer::with_size(size.0, size.1);
            },
            Some(_) => {},
            None => log::warn!(
                "window geometry unavailable, keeping {}x{}",
                window.0,
                window.1
            ),
        }
        magnifier.render_into(&mut frame);
        display.present(&mut target, &frame)?;
    }

    Ok(())
}
