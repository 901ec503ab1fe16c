//! Scene build binary — builds an octree scene and exports the packed array.
//!
//! Usage: cargo run --release --bin build_scene -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>    Scene JSON (default: built-in terrain scene)
//!   --size <UNITS>     Root cube edge length (default: 1.0)
//!   --depth <N>        Max subdivision depth (default: 8)
//!   --seed <SEED>      Terrain seed (default: 12345)
//!   --frequency <F>    Terrain noise frequency (default: 8.0)
//!   --octaves <N>      Terrain FBM octaves (default: 8)
//!   --height <H>       Terrain height divisor (default: 16.0)
//!   --format <64|32>   Packed word width (default: 64)
//!   --out <DIR>        Output directory (default: "out")
//!
//! Output structure:
//!   <out>/
//!     manifest.json    # scene + buffer metadata
//!     svo.bin          # packed node array

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::json;

use voxmarch::export;
use voxmarch::generation::{self, SceneParams};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().collect();
    let format = parse_u32_arg(&args, "--format").unwrap_or(64);
    if format != 64 && format != 32 {
        eprintln!("--format must be 64 or 32");
        std::process::exit(1);
    }
    let out_dir = PathBuf::from(
        parse_str_arg(&args, "--out").unwrap_or_else(|| "out".to_string()),
    );

    let mut params = match parse_str_arg(&args, "--config") {
        Some(path) => match SceneParams::from_json_file(Path::new(&path)) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SceneParams::default(),
    };

    // CLI flags override the configured scene
    if let Some(size) = parse_f32_arg(&args, "--size") {
        params.size = size;
    }
    if let Some(depth) = parse_u32_arg(&args, "--depth") {
        params.max_depth = depth as u8;
    }
    if let Some(terrain) = params.terrain.as_mut() {
        if let Some(seed) = parse_u32_arg(&args, "--seed") {
            terrain.seed = seed;
        }
        if let Some(frequency) = parse_f32_arg(&args, "--frequency") {
            terrain.frequency = frequency;
        }
        if let Some(octaves) = parse_u32_arg(&args, "--octaves") {
            terrain.octaves = octaves;
        }
        if let Some(height) = parse_f32_arg(&args, "--height") {
            terrain.height_scale = height;
        }
    }

    println!("=== Voxmarch Scene Builder ===");
    println!("Size:    {} world units, depth {}", params.size, params.max_depth);
    println!("Terrain: {}", if params.terrain.is_some() { "yes" } else { "no" });
    println!("Spheres: {}", params.spheres.len());
    println!("Format:  u{}", format);
    println!("Output:  {}", out_dir.display());
    println!();

    let start = Instant::now();
    let octree = match generation::build_scene(&params) {
        Ok(octree) => octree,
        Err(e) => {
            eprintln!("scene build failed: {}", e);
            std::process::exit(1);
        }
    };
    let build_elapsed = start.elapsed();

    let flat = octree.flatten();
    log::info!("flattened {} records", flat.len());

    std::fs::create_dir_all(&out_dir).expect("Failed to create output directory");
    let buffer_path = out_dir.join("svo.bin");

    let buffer_bytes = if format == 64 {
        let words: Vec<u64> = flat.iter().map(|n| n.packed64()).collect();
        export::write_packed_u64(&buffer_path, &words).expect("Failed to write packed buffer");
        words.len() * 8
    } else {
        let words: Vec<u32> = flat.iter().map(|n| n.packed32()).collect();
        export::write_packed_u32(&buffer_path, &words).expect("Failed to write packed buffer");
        words.len() * 4
    };

    let leaf_count = flat.iter().filter(|n| n.is_leaf).count();
    let manifest = json!({
        "version": 1,
        "format": format!("u{}", format),
        "buffer": "svo.bin",
        "node_count": flat.len(),
        "leaf_count": leaf_count,
        "buffer_bytes": buffer_bytes,
        "scene": params,
    });
    std::fs::write(
        out_dir.join("manifest.json"),
        serde_json::to_string_pretty(&manifest).expect("Failed to encode manifest"),
    )
    .expect("Failed to write manifest");

    println!();
    println!("=== Build Complete ===");
    println!("Nodes:  {} ({} leaves)", flat.len(), leaf_count);
    println!("Build:  {:.2}s", build_elapsed.as_secs_f64());
    println!(
        "Buffer: {:.1} KB ({})",
        buffer_bytes as f64 / 1024.0,
        buffer_path.display()
    );
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
