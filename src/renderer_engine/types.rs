use bytemuck::{Pod, Zeroable};
use gl::types::*;
use memoffset::offset_of;
use std::mem;

/// Structure envoyée au GPU représentant une étincelle.
///
/// Chaque instance correspond à un point (`GL_POINTS`) stockée dans un
/// VBO mappé de manière persistante et lue par le vertex shader.
///
/// # Attributs GPU
///
/// | Location | Type   | Champs               |
/// |:--------:|:-------|:---------------------|
/// | `0`      | `vec2` | `pos_x`, `pos_y`     |
/// | `1`      | `vec3` | `col_r`, `col_g`, `col_b` |
/// | `2`      | `vec2` | `radius`, `alpha`    |
#[repr(C)] // garantit un layout C-compatible pour l'envoi GPU
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct SparkleGPU {
    pub pos_x: f32,
    pub pos_y: f32,

    pub col_r: f32,
    pub col_g: f32,
    pub col_b: f32,

    /// Rayon en unités logiques, converti en taille de point au rendu.
    pub radius: f32,

    /// Alpha de peinture, déjà borné dans [0, 1].
    pub alpha: f32,
}

impl SparkleGPU {
    /// Configure les attributs de sommets pour OpenGL.
    ///
    /// Pré-requis : un VAO doit déjà être lié avant l'appel.
    pub fn setup_vertex_attribs() {
        let stride = mem::size_of::<Self>() as GLsizei;

        unsafe {
            // Attribut 0 : position (x, y)
            gl::VertexAttribPointer(
                0,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset_of!(Self, pos_x) as *const _,
            );
            gl::EnableVertexAttribArray(0);

            // Attribut 1 : couleur (r, g, b)
            gl::VertexAttribPointer(
                1,
                3,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset_of!(Self, col_r) as *const _,
            );
            gl::EnableVertexAttribArray(1);

            // Attribut 2 : rayon, alpha
            gl::VertexAttribPointer(
                2,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset_of!(Self, radius) as *const _,
            );
            gl::EnableVertexAttribArray(2);
        }
    }
}
