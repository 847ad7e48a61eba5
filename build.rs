//! Build script for route switch firmware
//!
//! Handles:
//! - Memory layout configuration (RP2040 with second-stage bootloader)

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    // Tell Cargo to re-run this if the linker script changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Host test builds have no linker script to provide
    if env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    // Copy memory.x into OUT_DIR so cortex-m-rt's link.x can find it
    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let manifest = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));
    fs::copy(manifest.join("memory.x"), out.join("memory.x")).expect("memory.x must exist");
    println!("cargo:rustc-link-search={}", out.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
