use std::{env, fs, path::Path};

// Copy config.json next to the built binary so `cargo run` and the
// target/ executables find it without --config.
fn main() {
    println!("cargo:rerun-if-changed=config.json");

    // OUT_DIR = target/<profile>/build/<crate>/out
    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };

    // Move up 3 directories to reach target/<profile>
    let Some(exe_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        return;
    };

    let src = Path::new("config.json");
    let dst = exe_dir.join("config.json");

    if let Err(e) = fs::copy(src, &dst) {
        println!("cargo:warning=Could not copy config.json to {}: {}", dst.display(), e);
    }
}
