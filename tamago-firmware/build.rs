//! Build script for tamago-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates tamago.toml and embeds it as postcard data
//! - Validates (or generates) the sprite sheet

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tamago_core::animation::{DEFAULT_CATALOG, NUM_OF_FRAMES};
use tamago_core::config::DeviceConfig;
use tamago_core::display::FRAME_SIZE;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    setup_linker(&out_dir);
    embed_config(&out_dir);
    embed_sprites(&out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate tamago.toml, then write config.bin
fn embed_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=tamago.toml");

    let config_path = Path::new("tamago.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: tamago.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a tamago.toml configuration file.         ║\n\
            ║  Please create one in the tamago-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read tamago.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: DeviceConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid tamago.toml                                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: tamago.toml failed validation                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&format!("{:?}", e))
        );
    }

    let blob = postcard::to_allocvec(&config).unwrap();
    fs::write(out_dir.join("config.bin"), blob).unwrap();

    println!("cargo:warning=tamago.toml validated successfully");
}

/// Check assets/sprites.bin against the catalog and copy it to OUT_DIR
///
/// Without a sheet a test pattern is generated so the firmware still links.
fn embed_sprites(out_dir: &Path) {
    println!("cargo:rerun-if-changed=assets/sprites.bin");

    let expected = NUM_OF_FRAMES * FRAME_SIZE;
    let sprite_path = Path::new("assets/sprites.bin");

    let sheet = if sprite_path.exists() {
        let sheet = fs::read(sprite_path).unwrap();
        if sheet.len() != expected {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: assets/sprites.bin has the wrong size                    ║\n\
                ║                                                                  ║\n\
                ║  Expected {:>6} bytes ({} frames of {} bytes), found {:<6}    ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                expected,
                NUM_OF_FRAMES,
                FRAME_SIZE,
                sheet.len()
            );
        }
        sheet
    } else {
        println!(
            "cargo:warning=assets/sprites.bin not found, embedding a test pattern sheet"
        );
        test_pattern()
    };

    if let Err(e) = DEFAULT_CATALOG.validate(sheet.len() / FRAME_SIZE) {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: animation catalog does not fit the sprite sheet          ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&format!("{:?}", e))
        );
    }

    fs::write(out_dir.join("sprites.bin"), sheet).unwrap();
}

/// Diagonal stripes that move one row per frame
fn test_pattern() -> Vec<u8> {
    let mut sheet = vec![0u8; NUM_OF_FRAMES * FRAME_SIZE];
    for (index, frame) in sheet.chunks_exact_mut(FRAME_SIZE).enumerate() {
        for (i, byte) in frame.iter_mut().enumerate() {
            let row = i / 4;
            let shift = (row + index) % 8;
            *byte = 0x80 >> shift;
        }
    }
    sheet
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
