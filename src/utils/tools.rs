use log::info;

/// Affiche les informations Rust et les dépendances principales de la
/// compilation. Les versions GL/GLFW sont injectées par build.rs.
pub fn show_rust_core_dependencies() {
    info!(
        "Rust compiler version: {}",
        rustc_version_runtime::version()
    );
    info!("  Platform    : {}", std::env::consts::OS);
    info!("  Arch        : {}", std::env::consts::ARCH);

    info!("Rust core dependancies");
    info!("  GL   version: {}", option_env!("GL").unwrap_or("Unknown"));
    info!(
        "  GLFW version: {}",
        option_env!("GLFW").unwrap_or("Unknown")
    );
}
