use std::env;
use std::path::PathBuf;

macro_rules! println_build {
    ($($tokens:tt)*) => {
        println!("cargo:warning=\r\x1b[32;1m   {}", format!($($tokens)*))
    }
}

fn main() {
    println!("cargo:rerun-if-changed=wrapper/");
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-env-changed=LIBREALSENSE_ROOT");

    let project_root = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    let wrapper_dir = project_root.join("wrapper");

    println_build!("Checking for librealsense2...");
    let includes = resolve_realsense();

    build_with_autocxx(&wrapper_dir, &includes);
}

/// Locate librealsense2, emit the link directives and return its include paths.
///
/// `LIBREALSENSE_ROOT` takes precedence (expects `include/` and `lib/` below it).
/// Otherwise, with the `native` feature, `pkg-config` is asked for `realsense2`.
fn resolve_realsense() -> Vec<PathBuf> {
    if let Ok(root) = env::var("LIBREALSENSE_ROOT") {
        let root = PathBuf::from(root);
        if root.exists() {
            println_build!("Using librealsense2 from LIBREALSENSE_ROOT: {}", root.display());
            println!("cargo:rustc-link-search=native={}", root.join("lib").display());
            println!("cargo:rustc-link-lib=dylib=realsense2");
            return vec![root.join("include")];
        }
        println_build!(
            "LIBREALSENSE_ROOT is set but the path does not exist: {}",
            root.display()
        );
    }

    probe_pkg_config()
}

#[cfg(feature = "native")]
fn probe_pkg_config() -> Vec<PathBuf> {
    match pkg_config::Config::new().atleast_version("2.50").probe("realsense2") {
        Ok(lib) => {
            println_build!("Found realsense2 {} via pkg-config", lib.version);
            lib.include_paths
        }
        Err(err) => panic!(
            "librealsense2 not found via pkg-config ({err}); install the SDK or set LIBREALSENSE_ROOT"
        ),
    }
}

#[cfg(not(feature = "native"))]
fn probe_pkg_config() -> Vec<PathBuf> {
    println_build!("`native` feature disabled, assuming librealsense2 headers are on the default include path");
    println!("cargo:rustc-link-lib=dylib=realsense2");
    Vec::new()
}

fn build_with_autocxx(wrapper_dir: &PathBuf, includes: &[PathBuf]) {
    println_build!("Building with autocxx...");

    let mut include_dirs = vec![wrapper_dir.clone()];
    include_dirs.extend(includes.iter().cloned());
    for include in &include_dirs {
        println_build!("Adding include path: {}", include.display());
    }

    let mut build = autocxx_build::Builder::new("src/lib.rs", &include_dirs)
        .extra_clang_args(&["-std=c++17"])
        .build()
        .expect("Failed to create autocxx builder");

    build
        .file(wrapper_dir.join("rs2_shim.cpp"))
        .flag_if_supported("-std=c++17")
        .compile("realsense-smoke-shim");

    println_build!("autocxx build completed successfully");
}
