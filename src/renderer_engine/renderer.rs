use anyhow::{anyhow, Result};
use log::{debug, info, warn};

use crate::cstr;
use crate::physic_engine::PhysicEngineIterator;
use crate::renderer_engine::config::RendererConfig;
use crate::renderer_engine::shader::compile_shader_program;
use crate::renderer_engine::types::SparkleGPU;
use crate::renderer_engine::RendererEngine;

/// Renderer OpenGL des étincelles.
///
/// Deux passes par frame, toutes deux dans une cible d'accumulation
/// hors écran :
/// 1. un quad plein écran couleur de fond à faible alpha (le voile de
///    traînée, jamais d'effacement dur) ;
/// 2. les particules en `GL_POINTS` avec halo doux, en mélange additif.
///
/// La cible d'accumulation est ensuite recopiée vers le backbuffer.
/// Avec le double buffering, c'est elle qui porte la persistance dont
/// l'effet de traînée a besoin d'une frame à l'autre.
pub struct Renderer {
    // Programmes
    sparkle_program: u32,
    overlay_program: u32,

    // Buffer de particules, mappé de manière persistante
    vao_sparkles: u32,
    vbo_sparkles: u32,
    mapped_ptr: *mut SparkleGPU,
    max_sparkles_on_gpu: usize,

    // Quad plein écran pour le voile
    vao_overlay: u32,
    vbo_overlay: u32,

    // Cible d'accumulation
    accum_fbo: u32,
    accum_tex: u32,

    // Uniforms
    loc_size: i32,
    loc_point_scale: i32,
    loc_overlay_color: i32,

    // État de la surface
    surface_size_px: (i32, i32),
    window_size_f32: (f32, f32),
    pixel_scale: f32,

    config: RendererConfig,
}

impl Renderer {
    /// `width`/`height` en pixels physiques. Le contexte OpenGL doit
    /// être prêt (fenêtre initialisée) avant l'appel.
    pub fn new(width: i32, height: i32, config: &RendererConfig) -> Result<Self> {
        let (vertex_src, fragment_src) = src_shaders_sparkles();
        let sparkle_program = unsafe { compile_shader_program(vertex_src, fragment_src) }
            .map_err(|e| anyhow!("Sparkle shader: {}", e))?;

        let (vertex_src, fragment_src) = src_shaders_overlay();
        let overlay_program = unsafe { compile_shader_program(vertex_src, fragment_src) }
            .map_err(|e| anyhow!("Overlay shader: {}", e))?;

        let loc_size = unsafe { gl::GetUniformLocation(sparkle_program, cstr!("uSize")) };
        let loc_point_scale =
            unsafe { gl::GetUniformLocation(sparkle_program, cstr!("uPointScale")) };
        let loc_overlay_color =
            unsafe { gl::GetUniformLocation(overlay_program, cstr!("uColor")) };

        unsafe {
            let (vao_sparkles, vbo_sparkles, mapped_ptr) =
                setup_sparkle_buffers(config.max_sparkles_on_gpu);
            let (vao_overlay, vbo_overlay) = setup_overlay_quad();
            let (accum_fbo, accum_tex) = create_accum_target(width, height);

            let mut renderer = Self {
                sparkle_program,
                overlay_program,
                vao_sparkles,
                vbo_sparkles,
                mapped_ptr,
                max_sparkles_on_gpu: config.max_sparkles_on_gpu,
                vao_overlay,
                vbo_overlay,
                accum_fbo,
                accum_tex,
                loc_size,
                loc_point_scale,
                loc_overlay_color,
                surface_size_px: (width, height),
                window_size_f32: (width as f32, height as f32),
                pixel_scale: 1.0,
                config: config.clone(),
            };
            renderer.clear_accum_target();
            Ok(renderer)
        }
    }

    /// Voile de traînée : un quad plein écran couleur de fond à alpha
    /// faible, en mélange alpha classique.
    unsafe fn draw_trail_overlay(&self) {
        gl::UseProgram(self.overlay_program);
        let [r, g, b] = self.config.background_color;
        gl::Uniform4f(self.loc_overlay_color, r, g, b, self.config.trail_alpha);
        gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        gl::BindVertexArray(self.vao_overlay);
        gl::DrawArrays(gl::TRIANGLE_STRIP, 0, 4);
    }

    /// Remplit directement le buffer GPU mappé avec les particules
    /// vivantes.
    ///
    /// Le zip se fait du slice gpu vers l'itérateur de particules, la
    /// capacité du buffer ne peut donc jamais être dépassée. Les
    /// particules non dessinables (position non finie) sont sautées,
    /// jamais propagées.
    fn fill_sparkle_data_direct(&mut self, physic: &dyn PhysicEngineIterator) -> usize {
        let mut count = 0;

        unsafe {
            // Slice Rust mutable mappé directement sur la mémoire GPU
            let gpu_slice =
                std::slice::from_raw_parts_mut(self.mapped_ptr, self.max_sparkles_on_gpu);

            for (i, (dst, p)) in gpu_slice
                .iter_mut()
                .zip(physic.iter_live_particles().filter(|p| p.is_drawable()))
                .enumerate()
            {
                *dst = SparkleGPU {
                    pos_x: p.pos.x,
                    pos_y: p.pos.y,
                    col_r: p.color.x,
                    col_g: p.color.y,
                    col_b: p.color.z,
                    radius: p.radius,
                    alpha: p.paint_alpha() * p.color.w,
                };
                count = i + 1;
            }
            // MAP_COHERENT_BIT : pas de flush explicite nécessaire
        }

        count
    }

    /// Dessine `count` particules depuis le buffer persistant.
    ///
    /// # Safety
    /// Le contexte OpenGL et les ressources (VAO, VBO, shader) doivent
    /// être valides.
    unsafe fn render_sparkles_with_persistent_buffer(&self, count: usize) {
        // Si aucune particule, on ne fait rien
        if count == 0 {
            return;
        }

        gl::UseProgram(self.sparkle_program);
        gl::Uniform2f(
            self.loc_size,
            self.window_size_f32.0,
            self.window_size_f32.1,
        );
        gl::Uniform1f(
            self.loc_point_scale,
            self.config.point_scale * self.pixel_scale,
        );

        // halo additif sur fond sombre
        gl::BlendFunc(gl::SRC_ALPHA, gl::ONE);
        gl::BindVertexArray(self.vao_sparkles);
        gl::DrawArrays(gl::POINTS, 0, count as i32);
        gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
    }

    unsafe fn clear_accum_target(&mut self) {
        gl::BindFramebuffer(gl::FRAMEBUFFER, self.accum_fbo);
        let [r, g, b] = self.config.background_color;
        gl::ClearColor(r, g, b, 1.0);
        gl::Clear(gl::COLOR_BUFFER_BIT);
        gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
    }

    /// Recrée le buffer de particules avec une nouvelle capacité.
    ///
    /// # Safety
    /// Manipule directement des ressources OpenGL, le contexte doit
    /// être valide.
    unsafe fn recreate_sparkle_buffers(&mut self, new_max: usize) {
        gl::DeleteVertexArrays(1, &self.vao_sparkles);
        gl::DeleteBuffers(1, &self.vbo_sparkles);

        let (vao, vbo, mapped_ptr) = setup_sparkle_buffers(new_max);

        self.vao_sparkles = vao;
        self.vbo_sparkles = vbo;
        self.mapped_ptr = mapped_ptr;
        self.max_sparkles_on_gpu = new_max;
    }
}

impl RendererEngine for Renderer {
    fn render_frame(&mut self, physic: &dyn PhysicEngineIterator) -> usize {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, self.accum_fbo);
            gl::Viewport(0, 0, self.surface_size_px.0, self.surface_size_px.1);

            self.draw_trail_overlay();
            let count = self.fill_sparkle_data_direct(physic);
            self.render_sparkles_with_persistent_buffer(count);

            // Recopie de la cible d'accumulation vers le backbuffer
            gl::BindFramebuffer(gl::READ_FRAMEBUFFER, self.accum_fbo);
            gl::BindFramebuffer(gl::DRAW_FRAMEBUFFER, 0);
            gl::BlitFramebuffer(
                0,
                0,
                self.surface_size_px.0,
                self.surface_size_px.1,
                0,
                0,
                self.surface_size_px.0,
                self.surface_size_px.1,
                gl::COLOR_BUFFER_BIT,
                gl::NEAREST,
            );
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);

            count
        }
    }

    fn set_surface_size(&mut self, width_px: i32, height_px: i32, scale: (f32, f32)) {
        let (sx, sy) = (scale.0.max(f32::EPSILON), scale.1.max(f32::EPSILON));
        self.surface_size_px = (width_px, height_px);
        self.pixel_scale = sx;
        // taille logique : pixels physiques ramenés au device pixel ratio
        self.window_size_f32 = (width_px as f32 / sx, height_px as f32 / sy);

        unsafe {
            gl::Viewport(0, 0, width_px, height_px);

            // La cible d'accumulation suit la taille de la surface ; la
            // traînée en cours est perdue, repart du fond uni.
            gl::DeleteFramebuffers(1, &self.accum_fbo);
            gl::DeleteTextures(1, &self.accum_tex);
            let (fbo, tex) = create_accum_target(width_px, height_px);
            self.accum_fbo = fbo;
            self.accum_tex = tex;
            self.clear_accum_target();
        }

        debug!(
            "🖥️ Surface resized: {} x {} px (scale {:.2})",
            width_px, height_px, sx
        );
    }

    fn reload_config(&mut self, config: &RendererConfig) {
        if config.max_sparkles_on_gpu != self.max_sparkles_on_gpu {
            info!(
                "🔁 GPU buffer reallocation required ({} → {})",
                self.max_sparkles_on_gpu, config.max_sparkles_on_gpu
            );
            unsafe {
                self.recreate_sparkle_buffers(config.max_sparkles_on_gpu);
            }
        }
        self.config = config.clone();
    }

    fn close(&mut self) {
        unsafe {
            if self.vbo_sparkles != 0 {
                gl::DeleteBuffers(1, &self.vbo_sparkles);
                self.vbo_sparkles = 0;
            }
            if self.vao_sparkles != 0 {
                gl::DeleteVertexArrays(1, &self.vao_sparkles);
                self.vao_sparkles = 0;
            }
            if self.vbo_overlay != 0 {
                gl::DeleteBuffers(1, &self.vbo_overlay);
                self.vbo_overlay = 0;
            }
            if self.vao_overlay != 0 {
                gl::DeleteVertexArrays(1, &self.vao_overlay);
                self.vao_overlay = 0;
            }
            if self.accum_fbo != 0 {
                gl::DeleteFramebuffers(1, &self.accum_fbo);
                self.accum_fbo = 0;
            }
            if self.accum_tex != 0 {
                gl::DeleteTextures(1, &self.accum_tex);
                self.accum_tex = 0;
            }
            if self.sparkle_program != 0 {
                gl::DeleteProgram(self.sparkle_program);
                self.sparkle_program = 0;
            }
            if self.overlay_program != 0 {
                gl::DeleteProgram(self.overlay_program);
                self.overlay_program = 0;
            }
        }
        debug!("Renderer closed and reset.");
    }
}

/// Alloue le VBO de particules en mapping persistant (AZDO).
///
/// # Safety
/// Le contexte OpenGL doit être valide et actif.
unsafe fn setup_sparkle_buffers(max_sparkles_on_gpu: usize) -> (u32, u32, *mut SparkleGPU) {
    let (mut vao, mut vbo) = (0u32, 0u32);

    gl::GenVertexArrays(1, &mut vao);
    gl::BindVertexArray(vao);

    gl::GenBuffers(1, &mut vbo);
    gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

    let buffer_size = (max_sparkles_on_gpu * std::mem::size_of::<SparkleGPU>()) as isize;
    info!(
        "🎮 Allocating sparkle buffer: {} particles → {} bytes",
        max_sparkles_on_gpu, buffer_size
    );

    // Allocation persistante
    gl::BufferStorage(
        gl::ARRAY_BUFFER,
        buffer_size,
        std::ptr::null(),
        gl::MAP_WRITE_BIT | gl::MAP_PERSISTENT_BIT | gl::MAP_COHERENT_BIT,
    );

    // Mapping CPU → GPU
    let mapped_ptr = gl::MapBufferRange(
        gl::ARRAY_BUFFER,
        0,
        buffer_size,
        gl::MAP_WRITE_BIT | gl::MAP_PERSISTENT_BIT | gl::MAP_COHERENT_BIT,
    ) as *mut SparkleGPU;

    SparkleGPU::setup_vertex_attribs();
    gl::BindVertexArray(0);

    (vao, vbo, mapped_ptr)
}

/// Quad plein écran statique pour le voile de traînée.
///
/// # Safety
/// Le contexte OpenGL doit être valide et actif.
unsafe fn setup_overlay_quad() -> (u32, u32) {
    const QUAD_VERTICES: [f32; 8] = [
        -1.0, -1.0, // bottom-left
        1.0, -1.0, // bottom-right
        -1.0, 1.0, // top-left
        1.0, 1.0, // top-right
    ];

    let (mut vao, mut vbo) = (0u32, 0u32);
    gl::GenVertexArrays(1, &mut vao);
    gl::BindVertexArray(vao);

    gl::GenBuffers(1, &mut vbo);
    gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
    gl::BufferData(
        gl::ARRAY_BUFFER,
        (QUAD_VERTICES.len() * std::mem::size_of::<f32>()) as isize,
        QUAD_VERTICES.as_ptr() as *const _,
        gl::STATIC_DRAW,
    );

    gl::EnableVertexAttribArray(0);
    gl::VertexAttribPointer(
        0,
        2,
        gl::FLOAT,
        gl::FALSE,
        2 * std::mem::size_of::<f32>() as i32,
        std::ptr::null(),
    );

    gl::BindVertexArray(0);
    (vao, vbo)
}

/// Crée la texture d'accumulation et son framebuffer.
///
/// # Safety
/// Le contexte OpenGL doit être valide et actif.
unsafe fn create_accum_target(width: i32, height: i32) -> (u32, u32) {
    let (mut fbo, mut tex) = (0u32, 0u32);

    gl::GenFramebuffers(1, &mut fbo);
    gl::BindFramebuffer(gl::FRAMEBUFFER, fbo);

    gl::GenTextures(1, &mut tex);
    gl::BindTexture(gl::TEXTURE_2D, tex);
    gl::TexImage2D(
        gl::TEXTURE_2D,
        0,
        gl::RGBA8 as i32,
        width.max(1),
        height.max(1),
        0,
        gl::RGBA,
        gl::UNSIGNED_BYTE,
        std::ptr::null(),
    );
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32);
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
    gl::FramebufferTexture2D(
        gl::FRAMEBUFFER,
        gl::COLOR_ATTACHMENT0,
        gl::TEXTURE_2D,
        tex,
        0,
    );

    if gl::CheckFramebufferStatus(gl::FRAMEBUFFER) != gl::FRAMEBUFFER_COMPLETE {
        warn!("Accumulation framebuffer incomplete ({} x {})", width, height);
    }

    gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
    (fbo, tex)
}

pub fn src_shaders_sparkles() -> (&'static str, &'static str) {
    let vertex_src = r#"
        #version 330 core
        layout(location = 0) in vec2 aPos;
        layout(location = 1) in vec3 aColor;
        layout(location = 2) in vec2 aRadiusAlpha;

        out vec3 vColor;
        out float vAlpha;

        uniform vec2 uSize;
        uniform float uPointScale;

        void main() {
            vColor = aColor;
            vAlpha = clamp(aRadiusAlpha.y, 0.0, 1.0);

            // coordonnees logiques, y vers le bas comme la surface d'origine
            float x = aPos.x / uSize.x * 2.0 - 1.0;
            float y = 1.0 - aPos.y / uSize.y * 2.0;
            gl_Position = vec4(x, y, 0.0, 1.0);

            gl_PointSize = max(aRadiusAlpha.x * uPointScale, 1.0);
        }
        "#;

    let fragment_src = r#"
        #version 330 core
        in vec3 vColor;
        in float vAlpha;
        out vec4 FragColor;

        void main() {
            vec2 uv = gl_PointCoord - vec2(0.5);
            float dist = dot(uv, uv);
            if(dist > 0.25) discard;
            float falloff = smoothstep(0.25, 0.0, dist);
            FragColor = vec4(vColor, vAlpha * falloff * falloff);
        }
        "#;
    (vertex_src, fragment_src)
}

fn src_shaders_overlay() -> (&'static str, &'static str) {
    let vertex_src = r#"
        #version 330 core
        layout(location = 0) in vec2 aPos;

        void main() {
            gl_Position = vec4(aPos, 0.0, 1.0);
        }
        "#;

    let fragment_src = r#"
        #version 330 core
        uniform vec4 uColor;
        out vec4 FragColor;

        void main() {
            FragColor = uColor;
        }
        "#;
    (vertex_src, fragment_src)
}
