use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mdlrender", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a script to an image or an animated GIF.
    Run(RunArgs),
    /// Parse and analyze a script without rendering.
    Check(InputArgs),
    /// Print the parsed command list as JSON.
    Dump(InputArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input MDL script.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input MDL script.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Render config JSON (missing keys keep their defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for animation frames and the assembled GIF.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Check(args) => cmd_check(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let script = mdlrender::Script::from_path(&args.in_path)?;

    let mut config = match &args.config {
        Some(path) => mdlrender::RenderConfig::from_path(path)?,
        None => mdlrender::RenderConfig::default(),
    };
    if let Some(dir) = args.out_dir {
        config.frames_dir = dir.join(&config.frames_dir);
        config.animation_dir = dir;
    }
    if args.parallel {
        config.threading.parallel = true;
    }
    if args.threads.is_some() {
        config.threading.threads = args.threads;
    }

    let mut sink = mdlrender::FileSink::new(&config.animation_dir, config.frame_delay_ms);
    let stats = mdlrender::render_script(&script, &config, &mut sink)
        .with_context(|| format!("render '{}'", args.in_path.display()))?;

    match &stats.animation {
        Some(path) => eprintln!(
            "wrote {} ({} frames)",
            path.display(),
            stats.frames_rendered
        ),
        None => eprintln!("rendered {} image(s)", stats.images_saved),
    }
    Ok(())
}

fn cmd_check(args: InputArgs) -> anyhow::Result<()> {
    let script = mdlrender::Script::from_path(&args.in_path)?;
    let analysis = mdlrender::analyze(&script)
        .with_context(|| format!("analyze '{}'", args.in_path.display()))?;

    println!("basename: {}", analysis.metadata.base_name);
    println!("frames:   {}", analysis.metadata.num_frames);
    let knobs: Vec<&str> = analysis.knobs.knob_names().collect();
    if knobs.is_empty() {
        println!("knobs:    (none)");
    } else {
        println!("knobs:    {}", knobs.join(", "));
    }
    Ok(())
}

fn cmd_dump(args: InputArgs) -> anyhow::Result<()> {
    let script = mdlrender::Script::from_path(&args.in_path)?;
    let json = serde_json::to_string_pretty(&script.commands).context("serialize commands")?;
    println!("{json}");
    Ok(())
}
