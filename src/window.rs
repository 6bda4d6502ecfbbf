//! SDL2 host window: presents an ARGB8888 pixel buffer and translates SDL
//! events into [`InputEvent`]s.

use sdl2::event::{Event, WindowEvent as SdlWindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::config::{Viewport, FRAME_TARGET_TIME};
use crate::interaction::{InputEvent, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    /// Wheel steps, positive away from the user.
    Scroll(i32),
    Input(InputEvent),
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Sleeps out the rest of the frame budget and returns milliseconds since
    /// the previous call.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let target = FRAME_TARGET_TIME as u64;
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < target {
            std::thread::sleep(std::time::Duration::from_millis(target - delta_time));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

pub struct Window {
    // Fields drop in declaration order: the texture must go before its creator.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        let texture = Self::create_texture(&texture_creator, width, height)?;

        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    fn create_texture(
        creator: &sdl2::render::TextureCreator<sdl2::video::WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<sdl2::render::Texture<'static>, String> {
        // SAFETY: the creator is boxed and owned by the same Window as the
        // texture, and the texture field is dropped first.
        let creator: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(creator as *const _) };
        creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())
    }

    /// Drains pending SDL events. Escape counts as a quit request.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            let translated = match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => Some(WindowEvent::Quit),
                Event::Window {
                    win_event: SdlWindowEvent::Resized(w, h),
                    ..
                } => Some(WindowEvent::Resize(w as u32, h as u32)),
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => map_key(keycode).map(|key| WindowEvent::Input(InputEvent::KeyPressed(key))),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => Some(WindowEvent::Input(InputEvent::MousePressed { x, y })),
                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    ..
                } => Some(WindowEvent::Input(InputEvent::MouseReleased)),
                Event::MouseMotion {
                    mousestate, x, y, ..
                } if mousestate.left() => Some(WindowEvent::Input(InputEvent::MouseDragged { x, y })),
                Event::MouseWheel { y, .. } => Some(WindowEvent::Scroll(y)),
                _ => None,
            };
            events.extend(translated);
        }
        events
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

fn map_key(keycode: Keycode) -> Option<Key> {
    let key = match keycode {
        Keycode::R => Key::R,
        Keycode::W => Key::W,
        Keycode::B => Key::B,
        Keycode::Z => Key::Z,
        Keycode::P => Key::P,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        _ => return None,
    };
    Some(key)
}
