#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use mapview_blocks::{Block, BlockFactory, BlockRegistry};
use mapview_geom::{Model, Tint};
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "mapview", version, about = "Inspect block models built from the block catalogue")]
struct Cli {
    /// Block definitions
    #[arg(long, default_value = "assets/blocks.toml")]
    blocks: PathBuf,

    /// Texture catalogue
    #[arg(long, default_value = "assets/textures.toml")]
    textures: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered block types with their legacy ids and state axes
    List,
    /// Print the model of one block state
    Dump {
        /// Block name, e.g. `snow_layer`
        block: String,
        /// Axis assignment `name=value`; repeatable
        #[arg(long = "state", value_parser = parse_prop)]
        state: Vec<(String, String)>,
        /// Decode the state from legacy data instead of `--state`
        #[arg(long, conflicts_with = "state")]
        legacy: Option<u8>,
    },
    /// Build every model of every block in parallel and report cache stats
    Warm {
        /// Worker threads; defaults to the number of CPUs
        #[arg(long)]
        threads: Option<usize>,
    },
}

fn parse_prop(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `name=value`, got `{s}`"))?;
    Ok((k.trim().to_string(), v.trim().to_string()))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let cli = Cli::parse();
    let reg = BlockRegistry::load_from_paths(&cli.textures, &cli.blocks)?;
    match cli.command {
        Command::List => list(&reg),
        Command::Dump {
            block,
            state,
            legacy,
        } => dump(&reg, &block, state, legacy)?,
        Command::Warm { threads } => warm(&reg, threads)?,
    }
    Ok(())
}

fn list(reg: &BlockRegistry) {
    for factory in reg.iter() {
        let axes: Vec<String> = factory
            .schema()
            .axes()
            .iter()
            .map(|a| {
                let range = a.domain.raw_range();
                format!(
                    "{}[{}..={}]",
                    a.name,
                    a.domain.format(*range.start()),
                    a.domain.format(*range.end())
                )
            })
            .collect();
        println!(
            "{:>4}  {:<16} legacy={:<4} states={:<3} {}",
            factory.id(),
            factory.name(),
            factory.legacy_id(),
            factory.schema().state_count(),
            axes.join(" ")
        );
    }
}

fn dump(
    reg: &BlockRegistry,
    name: &str,
    props: Vec<(String, String)>,
    legacy: Option<u8>,
) -> Result<(), Box<dyn Error>> {
    let block: Block = match legacy {
        Some(data) => {
            let factory = reg
                .by_name(name)
                .ok_or_else(|| format!("unknown block `{name}`"))?;
            reg.block_from_legacy(factory.legacy_id(), data)?
        }
        None => {
            let props: HashMap<String, String> = props.into_iter().collect();
            reg.make_block_by_name(name, Some(&props))?
        }
    };
    let factory = reg
        .get(block.id())
        .ok_or_else(|| format!("block id {} not registered", block.id()))?;
    let model = factory.model(&block)?;
    let (legacy_id, data) = reg.legacy_of(&block)?;
    println!(
        "{} [{}] legacy={}:{}",
        factory.name(),
        factory.schema().describe(block.state()),
        legacy_id,
        data
    );
    print_model(reg, &model);
    Ok(())
}

fn print_model(reg: &BlockRegistry, model: &Model) {
    for face in model.faces() {
        let texture = reg
            .textures
            .get(face.texture())
            .map(|t| t.name.as_str())
            .unwrap_or("?");
        let tint = match face.tint() {
            Tint::Fixed([r, g, b]) => format!("rgb({r},{g},{b})"),
            Tint::Grass { .. } => "grass".to_string(),
            Tint::Foliage { .. } => "foliage".to_string(),
        };
        println!(
            "  {:<6} tex={:<16} tint={:<16} cullable={}",
            face.facing().name(),
            texture,
            tint,
            face.is_cullable()
        );
        face.for_each(|v| {
            println!(
                "    pos=({:.4}, {:.4}, {:.4}) uv=({:.4}, {:.4})",
                v.x, v.y, v.z, v.u, v.v
            );
        });
    }
}

fn warm(reg: &BlockRegistry, threads: Option<usize>) -> Result<(), Box<dyn Error>> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    let pool = builder.build()?;
    let start = Instant::now();
    let jobs: Vec<(&BlockFactory, _)> = reg
        .iter()
        .flat_map(|f| f.schema().all_states().into_iter().map(move |s| (f, s)))
        .collect();
    let models: Vec<Arc<Model>> = pool.install(|| {
        jobs.par_iter()
            .map(|(factory, state)| factory.model_for_state(state))
            .collect::<Result<_, _>>()
    })?;
    log::info!(
        "warmed {} models on {} threads in {:.2?}",
        models.len(),
        pool.current_num_threads(),
        start.elapsed()
    );
    for factory in reg.iter() {
        let s = factory.cache_stats();
        log::info!(
            "{:<16} entries={} builds={} discarded={} hits={} misses={}",
            factory.name(),
            s.entries,
            s.builds,
            s.discarded,
            s.hits,
            s.misses
        );
    }
    Ok(())
}
