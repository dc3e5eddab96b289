use std::env;
use std::fs;
use std::path::Path;

// Puts the workspace config.toml next to the built binary, where the backend looks for it.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let (Ok(out_dir), Ok(profile)) = (env::var("OUT_DIR"), env::var("PROFILE")) else {
        println!("cargo:warning=OUT_DIR/PROFILE not set, config.toml is not copied");
        return;
    };

    // OUT_DIR looks like target/<profile>/build/backend-xxx/out
    let Some(target_dir) = Path::new(&out_dir).ancestors().find(|p| p.ends_with(&profile)) else {
        println!("cargo:warning=profile directory not found in {}", out_dir);
        return;
    };

    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if !source.exists() {
        println!("cargo:warning=config.toml not found, the embedded default is used");
        return;
    }

    let dest = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source, &dest) {
        println!("cargo:warning=Failed to copy config.toml to {:?}: {}", dest, e);
    }
}
