use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() -> std::io::Result<()> {
    // Produce the blocking monitor from the async one
    println!("cargo:rerun-if-changed=src/async.rs");
    let asynced = std::fs::read_to_string("src/async.rs")?;

    let blocking = asynced
        .replace("embedded_hal_async", "embedded_hal")
        .replace("async", "")
        .replace(".await", "");

    let mut out_path = PathBuf::from(env::var("OUT_DIR").expect("cargo always sets OUT_DIR"));
    out_path.push("de-asynced.rs");

    File::create(out_path)?.write_all(blocking.as_bytes())?;

    Ok(())
}
