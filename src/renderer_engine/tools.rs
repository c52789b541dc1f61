use gl::types::*;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGED_IDS: Mutex<HashSet<u32>> = Mutex::new(HashSet::new());
}

#[macro_export]
macro_rules! cstr {
    ($s:expr) => {
        concat!($s, "\0").as_ptr() as *const i8
    };
}

/// Affiche les informations OpenGL / GPU du contexte actuel
/// # Safety
///
/// L'appelant doit s'assurer que le contexte OpenGL est valide et actif.
pub unsafe fn show_opengl_context_info() {
    let vendor = CStr::from_ptr(gl::GetString(gl::VENDOR) as *const i8)
        .to_str()
        .unwrap_or("Unknown");
    let renderer = CStr::from_ptr(gl::GetString(gl::RENDERER) as *const i8)
        .to_str()
        .unwrap_or("Unknown");
    let version = CStr::from_ptr(gl::GetString(gl::VERSION) as *const i8)
        .to_str()
        .unwrap_or("Unknown");
    let glsl_version = CStr::from_ptr(gl::GetString(gl::SHADING_LANGUAGE_VERSION) as *const i8)
        .to_str()
        .unwrap_or("Unknown");

    info!("🖥 OpenGL context info:");
    info!("  Vendor   : {}", vendor);
    info!("  Renderer : {}", renderer);
    info!("  OpenGL   : {}", version);
    info!("  GLSL     : {}", glsl_version);

    // Consommer le glerror si nécessaire
    let err = gl::GetError();
    if err != gl::NO_ERROR {
        warn!("glerror consumed after getting context info: 0x{:X}", err);
    }
}

/// Callback OpenGL debug, safe pour Rust
extern "system" fn gl_debug_callback(
    source: GLenum,
    type_: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const i8,
    _user_param: *mut c_void,
) {
    // Unsafe uniquement pour lire le C string
    let msg = unsafe { CStr::from_ptr(message).to_string_lossy() };

    if severity == gl::DEBUG_SEVERITY_NOTIFICATION {
        return; // ignore notifications
    }

    // Ne logue qu'une fois par ID
    let mut logged = LOGGED_IDS.lock().unwrap();
    if !logged.insert(id) {
        return;
    }

    let src_str = match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        gl::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other",
    };

    let type_str = match type_ {
        gl::DEBUG_TYPE_ERROR => "Error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behavior",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        gl::DEBUG_TYPE_PERFORMANCE => "Performance",
        _ => "Other",
    };

    let sev_str = match severity {
        gl::DEBUG_SEVERITY_HIGH => "High",
        gl::DEBUG_SEVERITY_MEDIUM => "Medium",
        gl::DEBUG_SEVERITY_LOW => "Low",
        _ => "Unknown",
    };

    warn!(
        "GL[{}/{}/{}] id={} : {}",
        src_str, type_str, sev_str, id, msg
    );
}

/// Installe le callback de debug KHR si le driver l'expose.
/// # Safety
///
/// L'appelant doit s'assurer que le contexte OpenGL est valide et actif.
pub unsafe fn setup_opengl_debug() {
    if !gl::DebugMessageCallback::is_loaded() {
        debug!("KHR_debug not available, skipping GL debug callback");
        return;
    }

    gl::Enable(gl::DEBUG_OUTPUT);
    gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
    gl::DebugMessageCallback(Some(gl_debug_callback), std::ptr::null());
    debug!("GL debug callback installed");
}
