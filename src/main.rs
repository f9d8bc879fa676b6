use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, ArgGroup, Parser, Subcommand};

use sketchrefine::{
    Config, Studio,
    input::{DrawingSurface, load_script},
    refine::{GeminiTransport, RefineClient, RefineManager, RefineOutcome, Style},
    studio::file,
};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SKETCHREFINE_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "sketchrefine")]
#[command(version = VERSION, about = "Turn rough sketches into finished artwork with an image model")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw a stroke script and save the sketch as PNG
    Export {
        /// JSON stroke script to replay
        #[arg(long, value_name = "FILE")]
        strokes: PathBuf,

        /// Output file (defaults to the configured sketch filename)
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Draw straight segments instead of smoothed curves
        #[arg(long, action = ArgAction::SetTrue)]
        no_smooth: bool,
    },

    /// Refine a sketch in one or more styles
    #[command(group(ArgGroup::new("input").required(true).args(["image", "strokes"])))]
    Refine {
        /// PNG or JPEG sketch to refine
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,

        /// JSON stroke script to draw and refine
        #[arg(long, value_name = "FILE")]
        strokes: Option<PathBuf>,

        /// Art style; repeat to refine once per style
        #[arg(long, short = 's', value_name = "STYLE")]
        style: Vec<String>,

        /// Extra guidance appended to the style prompt
        #[arg(long, short = 'd', value_name = "TEXT")]
        details: Option<String>,

        /// Output file (defaults to the configured result filename)
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// API key for the image model
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// List the available styles and their prompts
    Styles,

    /// Write a documented config file to the config directory
    InitConfig,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::get_config_path()?,
    };

    match cli.command {
        Command::Export {
            strokes,
            output,
            no_smooth,
        } => run_export(&config_path, &strokes, output, no_smooth),
        Command::Refine {
            image,
            strokes,
            style,
            details,
            output,
            api_key,
        } => run_refine(&config_path, RefineArgs {
            image,
            strokes,
            styles: style,
            details,
            output,
            api_key,
        }),
        Command::Styles => {
            for style in Style::ALL {
                println!("{:<11} {}", style.as_str(), style.prompt_fragment());
            }
            Ok(())
        }
        Command::InitConfig => {
            Config::create_default_file(&config_path)?;
            println!("Wrote {}", config_path.display());
            Ok(())
        }
    }
}

fn run_export(
    config_path: &Path,
    strokes: &Path,
    output: Option<PathBuf>,
    no_smooth: bool,
) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let script = load_script(strokes)?;

    let mut surface = DrawingSurface::from_config(&config.canvas);
    if no_smooth && surface.smoothing {
        surface.toggle_smoothing();
    }
    surface.replay(&script);

    let path =
        output.unwrap_or_else(|| file::output_path(&config.output, &config.output.sketch_filename));
    let image = surface
        .export_raster()
        .context("Failed to render sketch")?;
    let written = file::save_data_url(&image, &path)?;
    println!(
        "Saved {} stroke(s) to {}",
        surface.stroke_count(),
        written.display()
    );
    Ok(())
}

struct RefineArgs {
    image: Option<PathBuf>,
    strokes: Option<PathBuf>,
    styles: Vec<String>,
    details: Option<String>,
    output: Option<PathBuf>,
    api_key: Option<String>,
}

fn run_refine(config_path: &Path, args: RefineArgs) -> Result<()> {
    let config = Config::load_from(config_path)?;

    let Some(api_key) = args
        .api_key
        .or_else(|| config.refine.api_key.clone())
        .filter(|key| !key.trim().is_empty())
    else {
        bail!(
            "no API key: pass --api-key, set GEMINI_API_KEY, or add api_key under [refine] in {}",
            config_path.display()
        );
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let timeout = config.refine_timeout();
    let transport = GeminiTransport::new(&config.refine, api_key, timeout)?;
    let client = RefineClient::new(Arc::new(transport)).with_timeout(timeout);
    let manager = RefineManager::new(runtime.handle(), client);
    let mut studio = Studio::new(&config, manager);

    if let Some(image) = &args.image {
        studio.upload(image)?;
    } else if let Some(strokes) = &args.strokes {
        let script = load_script(strokes)?;
        studio.surface_mut().replay(&script);
        studio.use_sketch()?;
    }

    if let Some(details) = args.details {
        studio.set_details(details);
    }

    let styles: Vec<Style> = if args.styles.is_empty() {
        vec![studio.state().selected_style]
    } else {
        Style::resolve_all(args.styles.as_slice())
    };

    let base_path = args
        .output
        .unwrap_or_else(|| file::output_path(&config.output, &config.output.result_filename));

    let mut succeeded = 0;
    for &style in &styles {
        studio.set_style(style);
        studio.request_refine()?;
        println!("Refining as {}...", style);

        match runtime.block_on(studio.wait_for_refine()) {
            Some(RefineOutcome::Success { .. }) => {
                let path = if styles.len() > 1 {
                    styled_path(&base_path, style)
                } else {
                    base_path.clone()
                };
                let written = studio.download_result(Some(&path))?;
                println!("Saved {} refinement to {}", style, written.display());
                succeeded += 1;
            }
            Some(RefineOutcome::Failed(message)) => {
                eprintln!("{} refinement failed: {}", style, message);
            }
            None => {}
        }
    }

    log::info!(
        "{} of {} refinement(s) succeeded; gallery holds {}",
        succeeded,
        styles.len(),
        studio.gallery().len()
    );

    if succeeded == 0 {
        bail!("all refinements failed");
    }
    Ok(())
}

fn styled_path(base: &Path, style: Style) -> PathBuf {
    let name = base
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.with_file_name(file::styled_filename(&name, style.as_str()))
}
