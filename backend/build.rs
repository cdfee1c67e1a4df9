use std::fs;
use std::path::Path;

/// Embeds the trunk output: `../frontend/dist` is copied to `static/dist`,
/// which `include_dir!` bakes into the binary. Without a frontend build the
/// placeholder page already in `static/dist` is served.
fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.join("index.html").exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).expect("create static dir");
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true),
        )
        .expect("copy frontend dist");
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
