use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Put the linker script somewhere the linker can find it.
fn main() {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("No out dir"));

    File::create(out_dir.join("memory.x"))
        .expect("Could not create file")
        .write_all(include_bytes!("memory.x"))
        .expect("Could not write file");
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
