use super::r#trait::{WindowEngine, WindowSignal};
use anyhow::{anyhow, Result};
use glfw::{Action, Context, Key};
use log::info;

use crate::renderer_engine::tools::{setup_opengl_debug, show_opengl_context_info};

pub struct GlfwWindowEngine {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    // dernière position connue du curseur, en coordonnées logiques
    cursor_pos: (f32, f32),
}

impl WindowEngine for GlfwWindowEngine {
    fn init(width: i32, height: i32, title: &str) -> Result<Self> {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|_| anyhow!("Impossible d'initialiser GLFW"))?;

        glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
        glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));

        // L'absence de surface de dessin est une erreur fatale de
        // configuration, remontée ici et jamais par frame.
        let (mut window, events) = glfw
            .create_window(
                width as u32,
                height as u32,
                title,
                glfw::WindowMode::Windowed,
            )
            .ok_or_else(|| anyhow!("Erreur création fenêtre GLFW '{}'", title))?;

        window.make_current();
        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_content_scale_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);

        // une frame par rafraîchissement écran
        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        info!("✅ OpenGL context ready for '{}'", title);

        // load OpenGL function pointers
        gl::load_with(|s| window.get_proc_address(s) as *const _);

        unsafe {
            show_opengl_context_info();
            setup_opengl_debug();
            gl::Enable(gl::PROGRAM_POINT_SIZE);
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }

        Ok(Self {
            glfw,
            window,
            events,
            cursor_pos: (0.0, 0.0),
        })
    }

    fn drain_signals(&mut self) -> Vec<WindowSignal> {
        self.glfw.poll_events();

        // Collect events into a Vec to avoid borrow checker issues
        let events: Vec<_> = glfw::flush_messages(&self.events).collect();

        let mut signals = Vec::new();
        for (_, event) in events {
            match event {
                glfw::WindowEvent::FramebufferSize(w, h) => {
                    signals.push(WindowSignal::SurfaceResized {
                        width_px: w,
                        height_px: h,
                    });
                }
                glfw::WindowEvent::ContentScale(x, y) => {
                    signals.push(WindowSignal::ScaleChanged { x, y });
                }
                glfw::WindowEvent::CursorPos(x, y) => {
                    self.cursor_pos = (x as f32, y as f32);
                }
                glfw::WindowEvent::MouseButton(glfw::MouseButtonLeft, Action::Press, _) => {
                    signals.push(WindowSignal::PointerPressed {
                        x: self.cursor_pos.0,
                        y: self.cursor_pos.1,
                    });
                }
                glfw::WindowEvent::Key(Key::Space, _, Action::Press, _) => {
                    signals.push(WindowSignal::ToggleRequested);
                }
                glfw::WindowEvent::Key(Key::R, _, Action::Press, _) => {
                    signals.push(WindowSignal::ReloadConfigRequested);
                }
                glfw::WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                    signals.push(WindowSignal::CloseRequested);
                }
                _ => {}
            }
        }
        signals
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, value: bool) {
        self.window.set_should_close(value);
    }

    fn get_size(&self) -> (i32, i32) {
        self.window.get_size()
    }

    fn get_framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }

    fn get_content_scale(&self) -> (f32, f32) {
        self.window.get_content_scale()
    }
}
