use cfg_aliases::cfg_aliases;

fn main() {
    // The script doesn't depend on our code.
    println!("cargo:rerun-if-changed=build.rs");

    // Setup cfg aliases.
    cfg_aliases! {
        // Systems with a native input source registry.
        macos_platform: { target_os = "macos" },
        windows_platform: { target_os = "windows" },
        // Everything else only has the headless registry.
        headless_only: { not(any(macos_platform, windows_platform)) },
    }
}
