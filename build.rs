#[cfg(feature = "r")]
use std::env;
#[cfg(feature = "r")]
use std::path::PathBuf;
#[cfg(feature = "r")]
use std::process::Command;

fn main() {
    #[cfg(feature = "r")]
    generate_r_bindings();
}

/// Finds `R_HOME`, either from the environment or by asking the `R` binary.
#[cfg(feature = "r")]
fn r_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("R_HOME") {
        return Some(PathBuf::from(home));
    }
    let output = Command::new("R").args(&["RHOME"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let home = String::from_utf8(output.stdout).ok()?;
    Some(PathBuf::from(home.trim()))
}

#[cfg(feature = "r")]
fn generate_r_bindings() {
    println!("cargo:rerun-if-changed=r_wrapper.h");
    println!("cargo:rerun-if-env-changed=R_HOME");
    println!("cargo:rerun-if-env-changed=R_INCLUDE_DIR");

    let home = r_home();
    let include_dir = env::var("R_INCLUDE_DIR")
        .map(PathBuf::from)
        .ok()
        .or_else(|| home.as_ref().map(|home| home.join("include")));

    if let Some(home) = &home {
        println!("cargo:rustc-link-search=native={}", home.join("lib").display());
    }
    println!("cargo:rustc-link-lib=R");

    let mut bindings = bindgen::Builder::default()
        .header("r_wrapper.h")
        .allowlist_function("Rdqags")
        .allowlist_function("Rdqagi")
        .allowlist_type("integr_fn");
    if let Some(dir) = include_dir {
        bindings = bindings.clang_arg(format!("-I{}", dir.display()));
    }

    let out_path = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    bindings.generate()
            .expect("Error generating bindings for <R_ext/Applic.h>")
            .write_to_file(out_path.join("applic_bindings.rs"))
            .expect("Error writing bindings");
}
