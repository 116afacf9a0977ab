use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;

use chessgif::{FsSpriteCache, PgnGame, RenderConfig, Renderer, color};

#[derive(Parser, Debug)]
#[command(name = "chessgif", version, about = "Render PGN chess games as animated GIFs")]
struct Cli {
    /// Path to the pgn file(s).
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Duration between moves in seconds.
    #[arg(short, long, default_value_t = 0.4)]
    duration: f64,

    /// Output directory (defaults to the current directory).
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Reverse the board (view from black's side).
    #[arg(short, long)]
    reverse: bool,

    /// Color of white squares in hex or by name.
    #[arg(long, default_value = "#f0d9b5")]
    white_square_color: String,

    /// Color of black squares in hex or by name.
    #[arg(long, default_value = "#b58863")]
    black_square_color: String,

    /// Draw an arrow on the board showing the last move.
    #[arg(long)]
    arrow: bool,

    /// Directory containing the piece sprite images.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = RenderConfig {
        reversed: cli.reverse,
        light: color::parse(&cli.white_square_color).context("--white-square-color")?,
        dark: color::parse(&cli.black_square_color).context("--black-square-color")?,
        duration: cli.duration,
        arrow: cli.arrow,
    };
    let mut renderer = Renderer::new(config, FsSpriteCache::new(&cli.assets));

    let out_dir = match cli.out {
        Some(dir) => dir,
        None => std::env::current_dir().context("resolve current directory")?,
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output directory '{}'", out_dir.display()))?;

    // One output per input; a failing input is reported and skipped so the
    // rest of the batch still renders.
    let mut failures = 0usize;
    for path in &cli.paths {
        match render_one(&mut renderer, path, &out_dir) {
            Ok(out_path) => eprintln!("wrote {}", out_path.display()),
            Err(err) => {
                failures += 1;
                eprintln!("error: {}: {:#}", path.display(), err);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} input(s) failed", cli.paths.len());
    }
    Ok(())
}

fn render_one(
    renderer: &mut Renderer<FsSpriteCache>,
    pgn_path: &Path,
    out_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let stem = pgn_path
        .file_stem()
        .with_context(|| format!("input '{}' has no file name", pgn_path.display()))?;
    let out_path = out_dir.join(Path::new(stem).with_extension("gif"));

    let mut game = PgnGame::from_path(pgn_path)?;
    renderer.render_gif(&mut game, &out_path)?;
    Ok(out_path)
}
