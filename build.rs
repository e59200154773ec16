/// Glance build script.
///
/// The window layer is Win32-only. Other targets still build (the input
/// pipeline and its tests are portable) but the binary cannot open a window,
/// so say so at build time instead of surprising the user at run time.
fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" {
        println!(
            "cargo:warning=glance only presents its window on Windows \
             (CARGO_CFG_TARGET_OS = {target_os:?})"
        );
    }

    println!("cargo:rerun-if-changed=build.rs");
}
