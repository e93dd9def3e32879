use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use tmap_engine::{export_to_folder, read_map, save_map, save_padded, LoadOptions, MapDocument, MapOptions, SaveOptions};
use tmap_engine_edit::EditState;

#[derive(Parser)]
#[command(version, about = "Tile map tool for tmap files")]
pub struct Cli {
    #[arg(help = "Options file (TOML). Defaults to the user options.", long, global = true)]
    options: Option<PathBuf>,

    #[arg(help = "Root folder tile paths are relative to.", long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Prints header, tiles, attributes and layer usage of a map")]
    Info { map: PathBuf },

    #[command(about = "Writes the map centered in a larger map")]
    Pad {
        map: PathBuf,
        out: PathBuf,
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
    },

    #[command(about = "Copies the map and every image it uses into a folder")]
    Export { map: PathBuf, dir: PathBuf },

    #[command(about = "Rewrites a map, optionally changing the row order")]
    Convert {
        map: PathBuf,
        out: PathBuf,
        #[arg(help = "Rows of the input are stored bottom-up.", long)]
        flip_in: Option<bool>,
        #[arg(help = "Store rows of the output bottom-up.", long)]
        flip_out: Option<bool>,
    },

    #[command(about = "Creates an empty map")]
    New {
        out: PathBuf,
        #[arg(long)]
        width: Option<i32>,
        #[arg(long)]
        height: Option<i32>,
        #[arg(help = "Tile image path; repeat for more tiles.", long = "tile", required = true)]
        tiles: Vec<String>,
        #[arg(help = "Number of layers.", long, default_value_t = 1)]
        layers: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let _logger = Logger::try_with_env_or_str("info")?.log_to_stderr().start()?;
    let args = Cli::parse();
    let mut options = load_options(&args)?;
    let user_options = args.options.is_none();

    match args.command {
        Commands::Info { map } => {
            let doc = read_tracked(&map, &mut options, user_options)?;
            print!("{}", describe(&doc));
            Ok(())
        }
        Commands::Pad { map, out, width, height } => {
            let doc = read_tracked(&map, &mut options, user_options)?;
            save_padded(&doc, &out, (width, height), &options.save_options())?;
            Ok(())
        }
        Commands::Export { map, dir } => {
            let doc = read_tracked(&map, &mut options, user_options)?;
            let resolver = options.asset_resolver(Some(&map));
            let summary = export_to_folder(&doc, &resolver, &dir, &options.save_options())?;
            println!("exported {} tiles and {} animation frames to {}", summary.tiles, summary.animation_frames, dir.display());
            Ok(())
        }
        Commands::Convert { map, out, flip_in, flip_out } => {
            let load = LoadOptions {
                flip_y: flip_in.unwrap_or(options.flip_y_in_file),
                ..options.load_options()
            };
            let save = SaveOptions {
                flip_y: flip_out.unwrap_or(options.flip_y_in_file),
            };
            let doc = read_map(&map, &load).with_context(|| format!("reading {}", map.display()))?;
            save_map(&doc, &out, &save)?;
            Ok(())
        }
        Commands::New {
            out,
            width,
            height,
            tiles,
            layers,
        } => {
            options.max_canvas_width = width.unwrap_or(options.max_canvas_width);
            options.max_canvas_height = height.unwrap_or(options.max_canvas_height);
            let mut state = EditState::new_map(options)?;
            for tile in &tiles {
                state.add_tile(tile)?;
            }
            for _ in 1..layers {
                state.add_layer();
            }
            state.save_as(&out)?;
            Ok(())
        }
    }
}

fn load_options(args: &Cli) -> anyhow::Result<MapOptions> {
    let mut options = match &args.options {
        Some(path) => MapOptions::load_from_file(path).with_context(|| format!("reading options {}", path.display()))?,
        None => MapOptions::load_user_options(),
    };
    if let Some(root) = &args.root {
        options.root_dir = Some(root.clone());
    }
    Ok(options)
}

/// Reads a map as stored. A map larger than the configured canvas raises it,
/// and with user options in effect the raised canvas is stored for the next run.
fn read_tracked(path: &Path, options: &mut MapOptions, user_options: bool) -> anyhow::Result<MapDocument> {
    let doc = read_map(path, &options.load_options()).with_context(|| format!("reading {}", path.display()))?;
    if options.grow_max_canvas(doc.canvas_size()) && user_options {
        options.store_user_options();
    }
    Ok(doc)
}

fn describe(doc: &MapDocument) -> String {
    let mut out = String::new();
    out.push_str(&format!("map size:   {}\n", doc.canvas_size()));
    out.push_str(&format!("tile size:  {}\n", doc.tile_size()));
    out.push_str(&format!("prop layer: {}\n", doc.prop_layer().map_or_else(|| "none".to_string(), |l| l.to_string())));

    out.push_str(&format!("tiles:      {}\n", doc.tile_count()));
    for (id, path) in doc.tile_paths().iter().enumerate() {
        let id = id as u32;
        out.push_str(&format!("  {id:>4} {path}"));
        let attributes = doc.tile_attributes(id);
        if !attributes.is_empty() {
            out.push_str(&format!(" [{}]", attributes.join(", ")));
        }
        if let Some(anim) = doc.animation(id) {
            out.push_str(&format!(" anim {} ({} frames, {} ms)", anim.folder, anim.frame_count, anim.frame_ms));
        }
        out.push('\n');
    }

    out.push_str(&format!("layers:     {}\n", doc.layer_count()));
    for (i, layer) in doc.layers().iter().enumerate() {
        out.push_str(&format!("  {i:>4} {}/{} cells used\n", layer.used_cells(), layer.len()));
    }
    out
}
