use gl::types::*;
use std::{ffi::CString, ptr};

/// Compile et lie un programme shader à partir des sources GLSL.
///
/// Retourne `Ok(program_id)` si la compilation réussit, `Err(message)`
/// sinon, avec un extrait du source autour de la ligne fautive quand le
/// log du driver permet de la retrouver.
///
/// # Safety
/// Cette fonction est unsafe car elle interagit directement avec des
/// pointeurs OpenGL. Le contexte doit être valide et actif.
pub unsafe fn compile_shader_program(
    vertex_src: &str,
    fragment_src: &str,
) -> Result<u32, String> {
    fn try_compile_shader(src: &str, ty: GLenum) -> Result<u32, String> {
        let shader = unsafe { gl::CreateShader(ty) };
        let c_str = CString::new(src).map_err(|e| format!("CString error: {}", e))?;

        unsafe {
            gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
            gl::CompileShader(shader);

            let mut success = gl::FALSE as GLint;
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
            if success != gl::TRUE as GLint {
                let mut len = 0;
                gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
                let mut buf = Vec::with_capacity(len as usize);
                gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf.as_mut_ptr() as *mut _);
                buf.set_len(len as usize);
                let log_cow = String::from_utf8_lossy(&buf);
                let log = log_cow.trim_matches(char::from(0));

                gl::DeleteShader(shader);

                let mut error_msg = format!("Shader compilation failed:\n{}", log);
                if let Some(line) = parse_glsl_error_line(log) {
                    error_msg.push_str(&format_glsl_error_context(src, line));
                }

                return Err(error_msg);
            }
        }
        Ok(shader)
    }

    let vs = try_compile_shader(vertex_src, gl::VERTEX_SHADER)?;
    let fs = try_compile_shader(fragment_src, gl::FRAGMENT_SHADER)?;

    let program = gl::CreateProgram();
    gl::AttachShader(program, vs);
    gl::AttachShader(program, fs);
    gl::LinkProgram(program);

    let mut success = gl::FALSE as GLint;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
    if success != gl::TRUE as GLint {
        let mut len = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = Vec::with_capacity(len as usize);
        gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf.as_mut_ptr() as *mut _);
        buf.set_len(len as usize);
        let log = String::from_utf8_lossy(&buf);

        gl::DeleteShader(vs);
        gl::DeleteShader(fs);
        gl::DeleteProgram(program);
        return Err(format!("Shader link failed:\n{}", log));
    }

    gl::DeleteShader(vs);
    gl::DeleteShader(fs);

    Ok(program)
}

/// Essaie d'extraire le numéro de ligne de l'erreur GLSL.
/// Supporte plusieurs formats :
/// - "0:12(105): ..." (Standard/Intel)
/// - "0(12) : error ..." (NVIDIA)
/// - "ERROR: 0:12: ..." (AMD/ATI)
fn parse_glsl_error_line(log: &str) -> Option<usize> {
    // 1. Format Standard/Intel: 0:12(105)
    let re_standard = regex::Regex::new(r"(\d+):(\d+)\((\d+)\)").ok()?;
    if let Some(cap) = re_standard.captures(log) {
        if let Ok(line) = cap[2].parse::<usize>() {
            return Some(line);
        }
    }

    // 2. Format NVIDIA: 0(12) : error ...
    let re_nvidia = regex::Regex::new(r"(\d+)\((\d+)\)\s*:").ok()?;
    if let Some(cap) = re_nvidia.captures(log) {
        if let Ok(line) = cap[2].parse::<usize>() {
            return Some(line);
        }
    }

    // 3. Format AMD/ATI: ERROR: 0:12: ...
    let re_amd = regex::Regex::new(r":\s*(\d+):(\d+):").ok()?;
    if let Some(cap) = re_amd.captures(log) {
        if let Ok(line) = cap[2].parse::<usize>() {
            return Some(line);
        }
    }

    None
}

/// Formate un extrait du code GLSL autour de la ligne fautive
fn format_glsl_error_context(src: &str, line_number: usize) -> String {
    let lines: Vec<&str> = src.lines().collect();
    let mut output = String::new();

    if lines.is_empty() || line_number == 0 {
        return output;
    }

    let context_range = 2; // nb de lignes avant/après à afficher

    output.push_str(&format!("\n🔍 Error context (line {}):\n", line_number));

    let start = line_number.saturating_sub(1 + context_range).min(lines.len());
    let end = (line_number + context_range).min(lines.len());

    for (i, line) in lines[start..end].iter().enumerate() {
        let current = start + i + 1;
        if current == line_number {
            output.push_str(&format!("> {:>3} | {}\n", current, line));
        } else {
            output.push_str(&format!("  {:>3} | {}\n", current, line));
        }
    }
    output
}
