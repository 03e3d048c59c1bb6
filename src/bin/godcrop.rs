use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "godcrop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a crop job to an image file.
    Render(RenderArgs),
    /// Print the clip boundary of a shape as SVG path data.
    Shape(ShapeArgs),
    /// List the aspect ratio presets.
    Presets,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input crop job JSON.
    #[arg(long)]
    job: PathBuf,

    /// Output image path. A recognized extension overrides the job's export format.
    #[arg(long)]
    out: PathBuf,

    /// Override the job's device pixel density.
    #[arg(long)]
    density: Option<f64>,
}

#[derive(Parser, Debug)]
struct ShapeArgs {
    /// Shape descriptor JSON, e.g. '{"kind":"star","points":5,"inner_radius_ratio":0.5}'.
    #[arg(long)]
    shape: String,

    /// Frame width in logical pixels.
    #[arg(long, default_value_t = 400.0)]
    width: f64,

    /// Frame height in logical pixels.
    #[arg(long, default_value_t = 400.0)]
    height: f64,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Shape(args) => cmd_shape(args),
        Command::Presets => cmd_presets(),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut job = godcrop::CropJob::from_path(&args.job)?;
    if let Some(d) = args.density {
        job.density = d;
    }
    if let Some(format) = godcrop::ExportFormat::from_path(&args.out) {
        job.export.format = format;
    }

    let mut sink = godcrop::FileExportSink::new(&args.out);
    let out = job
        .render_to(&mut sink)
        .with_context(|| format!("render job '{}'", args.job.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {})",
        args.out.display(),
        out.width,
        out.height,
        job.export.format.mime_type()
    );
    Ok(())
}

fn cmd_shape(args: ShapeArgs) -> anyhow::Result<()> {
    let shape: godcrop::ShapeDescriptor =
        serde_json::from_str(&args.shape).context("parse shape descriptor JSON")?;
    let frame = godcrop::FrameGeometry::new(args.width, args.height)?;
    let path = godcrop::build_path(&shape, frame);
    println!("{}", path.to_svg());
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for category in godcrop::AspectCategory::ALL {
        println!("{}", category.label());
        for p in godcrop::scene::presets::presets_in(category) {
            if p.value == godcrop::scene::presets::FREE_ASPECT_RATIO {
                println!("  {:<10} source", p.label);
            } else {
                println!("  {:<10} {:.4}", p.label, p.value);
            }
        }
    }
    Ok(())
}
