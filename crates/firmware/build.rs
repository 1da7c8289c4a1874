use std::io;

/// Put `memory.x` (STM32F103C8 flash/RAM layout) on the linker search path.
#[cfg(feature = "hardware")]
fn stage_memory_layout() -> io::Result<()> {
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    let out = PathBuf::from(env::var_os("OUT_DIR").ok_or_else(|| io::Error::other("OUT_DIR not set"))?);
    fs::write(out.join("memory.x"), include_bytes!("../../memory.x"))?;

    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=../../memory.x");
    Ok(())
}

#[cfg(not(feature = "hardware"))]
#[allow(clippy::unnecessary_wraps)]
fn stage_memory_layout() -> io::Result<()> {
    Ok(())
}

fn main() -> io::Result<()> {
    // Only hardware builds link against memory.x
    stage_memory_layout()?;
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
