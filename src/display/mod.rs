mod pixel_buffer;

pub use pixel_buffer::{PixelBuffer, ResampleError};

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::{Keycode, Mod};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{FullscreenType, Window, WindowContext};
use sdl2::EventPump;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

/// Events the main loop cares about; everything else stays inside SDL
#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown { key: Keycode, keymod: Mod },
    /// The window was exposed, resized, or restored and needs a repaint
    Redraw,
}

impl Display {
    /// Create the view window. `fullscreen` opens it in desktop fullscreen
    /// right away; otherwise it is a centered window of the given size.
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        fullscreen: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let mut window_builder = video_subsystem.window(title, width, height);
        window_builder.position_centered();
        if fullscreen {
            window_builder.fullscreen_desktop();
        }
        let window = window_builder.build().map_err(|e| e.to_string())?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((Self { canvas, event_pump }, texture_creator))
    }

    /// Current drawable size, or None while the window has no usable
    /// geometry (minimized on some platforms reports zero area).
    pub fn output_size(&self) -> Option<(u32, u32)> {
        match self.canvas.output_size() {
            Ok((w, h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }

    /// Last known pointer position in window coordinates
    pub fn pointer_position(&self) -> (i32, i32) {
        let state = self.event_pump.mouse_state();
        (state.x(), state.y())
    }

    pub fn set_fullscreen(&mut self, on: bool) -> Result<(), String> {
        let state = if on {
            FullscreenType::Desktop
        } else {
            FullscreenType::Off
        };
        self.canvas.window_mut().set_fullscreen(state)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.canvas.window().fullscreen_state() != FullscreenType::Off
    }

    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &PixelBuffer,
    ) -> Result<(), String> {
        target
            .texture
            .update(None, buffer.as_bytes(), buffer.width() as usize * 4)
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    /// Block until at least one event arrives, then drain whatever queued up
    /// behind it. The magnifier renders on demand, so between inputs the
    /// process sleeps here instead of spinning a frame loop.
    pub fn wait_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let first = self.event_pump.wait_event();
        if let Some(input) = translate_event(first) {
            events.push(input);
        }
        while let Some(event) = self.event_pump.poll_event() {
            if let Some(input) = translate_event(event) {
                events.push(input);
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Create a streaming texture matched to the window size
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

fn translate_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::KeyDown {
            keycode: Some(key),
            keymod,
            ..
        } => Some(InputEvent::KeyDown { key, keymod }),
        Event::Window { win_event, .. } => match win_event {
            WindowEvent::Exposed
            | WindowEvent::SizeChanged(..)
            | WindowEvent::Restored
            | WindowEvent::Maximized => Some(InputEvent::Redraw),
            _ => None,
        },
        _ => None,
    }
}
