//! Command-line host for the tree tools
//!
//! Runs one operation against a block world loaded from (and optionally saved
//! back to) JSON.
//!
//! Usage:
//!     grow_tree [OPTIONS]
//!
//! Options:
//!     --options <FILE>        Tree options as JSON (default: built-in defaults)
//!     --world <FILE>          World to load (default: empty world)
//!     --out <FILE>            Save the resulting world here
//!     --seed <SEED>           RNG seed (default: 12345)
//!     --origin <X,Y,Z>        Seed block / trunk base (default: 0,0,0)
//!     --operation <NAME>      Override the "Operation" option
//!     --max-attempts <N>      Give up direction sampling after N rejections
//!     -h, --help              Show this help message

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use glam::IVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use voxel_arbor::generation::options::keys;
use voxel_arbor::generation::{run, Operation, OperationStats, TreeConfig, TreeOptions};
use voxel_arbor::math::BlockBox;
use voxel_arbor::voxel::BlockWorld;

fn print_help() {
    eprintln!("grow_tree - Grow, delete or prune voxel trees");
    eprintln!();
    eprintln!("Usage: grow_tree [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    --options <FILE>        Tree options as JSON (default: built-in defaults)");
    eprintln!("    --world <FILE>          World to load (default: empty world)");
    eprintln!("    --out <FILE>            Save the resulting world here");
    eprintln!("    --seed <SEED>           RNG seed (default: 12345)");
    eprintln!("    --origin <X,Y,Z>        Seed block / trunk base (default: 0,0,0)");
    eprintln!("    --operation <NAME>      Operation to run (default: from options)");
    eprintln!("                            \"Create Tree\", \"Delete Tree\" or \"Remove Decay-able Leaves\"");
    eprintln!("    --max-attempts <N>      Give up direction sampling after N rejections");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    grow_tree --seed 42 --out tree.json");
    eprintln!("    grow_tree --world tree.json --operation \"Delete Tree\" --out empty.json");
}

#[derive(Debug)]
struct Args {
    options: Option<PathBuf>,
    world: Option<PathBuf>,
    out: Option<PathBuf>,
    seed: u64,
    origin: IVec3,
    operation: Option<Operation>,
    max_attempts: Option<u32>,
}

fn parse_origin(text: &str) -> Result<IVec3, String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("Invalid origin: {} (expected X,Y,Z)", text));
    }
    let mut coords = [0i32; 3];
    for (c, part) in coords.iter_mut().zip(&parts) {
        *c = part.parse().map_err(|_| format!("Invalid origin coordinate: {}", part))?;
    }
    Ok(IVec3::from_array(coords))
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut parsed = Args {
        options: None,
        world: None,
        out: None,
        seed: 12345,
        origin: IVec3::ZERO,
        operation: None,
        max_attempts: None,
    };

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "-h" || flag == "--help" {
            print_help();
            std::process::exit(0);
        }
        if !flag.starts_with('-') {
            return Err(format!("Unexpected argument: {}", flag));
        }

        i += 1;
        let value = args.get(i).ok_or_else(|| format!("Missing value for {}", flag))?;
        match flag {
            "--options" => parsed.options = Some(PathBuf::from(value)),
            "--world" => parsed.world = Some(PathBuf::from(value)),
            "--out" => parsed.out = Some(PathBuf::from(value)),
            "--seed" => {
                parsed.seed = value.parse().map_err(|_| format!("Invalid seed: {}", value))?;
            }
            "--origin" => parsed.origin = parse_origin(value)?,
            "--operation" => {
                parsed.operation = Some(value.parse().map_err(|e| format!("{}", e))?);
            }
            "--max-attempts" => {
                let n = value.parse().map_err(|_| format!("Invalid max-attempts: {}", value))?;
                parsed.max_attempts = Some(n);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(parsed)
}

fn execute(args: &Args) -> voxel_arbor::core::Result<()> {
    let mut options = match &args.options {
        Some(path) => TreeOptions::load(path)?,
        None => TreeOptions::defaults(),
    };
    if let Some(op) = args.operation {
        options.set(keys::OPERATION, op.label());
    }

    let mut config = TreeConfig::from_options(&options)?;
    if let Some(n) = args.max_attempts {
        config = config.with_sampling_limit(n);
    }

    let mut world = match &args.world {
        Some(path) => BlockWorld::load_sync(path)?,
        None => BlockWorld::new(),
    };
    println!("World blocks before: {}", world.block_count());

    let start = Instant::now();
    let region = BlockBox::from_point(args.origin);
    let report = run(&mut world, region, &config, ChaCha8Rng::seed_from_u64(args.seed))?;
    let elapsed = start.elapsed();

    println!();
    println!("Summary:");
    println!("  Operation: {}", report.operation);
    match report.stats {
        OperationStats::Growth(s) => {
            println!("  Cells processed: {}", s.cells_processed);
            println!("  Splits / curves: {} / {}", s.splits, s.curves);
            println!("  Branches / leaves spawned: {} / {}", s.branches, s.leaves);
            println!("  Block writes: {}", s.voxels_written);
        }
        OperationStats::Deletion(s) => {
            println!("  Positions visited: {}", s.visited);
            println!("  Blocks deleted: {}", s.voxels_deleted);
        }
        OperationStats::Decay(s) => {
            println!("  Edge logs: {}", s.edge_logs);
            println!("  Leaves measured: {}", s.leaves_measured);
            println!("  Removed (too far): {}", s.removed_distant);
            println!("  Removed (orphaned): {}", s.removed_orphans);
        }
    }
    println!("  World blocks after: {}", world.block_count());
    if let Some(bounds) = world.bounds() {
        println!("  Bounds: {} .. {}", bounds.min, bounds.max);
    }
    println!("  Time: {:.3}s", elapsed.as_secs_f64());

    if let Some(out) = &args.out {
        world.save_sync(out)?;
        println!("  Output: {}", out.display());
    }
    Ok(())
}

fn main() {
    voxel_arbor::core::logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = execute(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
