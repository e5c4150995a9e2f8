//! Hex Space command-line front end.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};

use hexspace::config::AppConfig;
use hexspace::grid::{Point, generate_neighbors};
use hexspace::search::parse_search;
use hexspace::{AppError, HexSpaceApp};

#[derive(Parser)]
#[command(name = "hexspace")]
#[command(about = "Explore and annotate colors on a hexagonal grid")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Annotation store file, overriding the configuration
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the neighborhood of a color to a PNG file
    Render {
        /// Color as rrggbb or #rrggbb
        color: String,

        /// Output file path
        #[arg(short, long, default_value = "hexspace.png")]
        out: PathBuf,

        /// Zoom level
        #[arg(short, long)]
        zoom: Option<f64>,
    },
    /// Print the generated neighbors of a color
    Neighbors {
        /// Color as rrggbb or #rrggbb
        color: String,
    },
    /// Name a color and tag it
    Annotate {
        /// Color as rrggbb or #rrggbb
        color: String,

        /// Display name
        name: String,

        /// Comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,
    },
    /// Report the color under a canvas pixel
    Pick {
        /// Color at the center of the canvas
        color: String,
        x: f64,
        y: f64,

        /// Zoom level
        #[arg(short, long)]
        zoom: Option<f64>,
    },
    /// Print all saved colors
    List,
}

fn load_config(cli: &Cli) -> Result<AppConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_from_default_path().unwrap_or_default(),
    };
    if let Some(store) = &cli.store {
        config.store_path = store.clone();
    }
    Ok(config)
}

fn run(cli: Cli, config: AppConfig) -> Result<(), AppError> {
    let mut app = HexSpaceApp::new(config);
    if let Some(warning) = app.store_warning() {
        eprintln!("Warning: {}", warning);
    }

    match cli.command {
        Commands::Render { color, out, zoom } => {
            if let Some(zoom) = zoom {
                app.set_zoom_level(zoom);
            }
            app.search(&color)?;
            app.export_png(&out)?;
            if let Some(scene) = app.scene() {
                println!(
                    "{} hexagon(s) written to {}",
                    scene.cells().len(),
                    out.display()
                );
            }
        }
        Commands::Neighbors { color } => {
            let color = parse_search(&color)?;
            for n in generate_neighbors(color, &app.config().neighbors) {
                println!("{} {} {}", n.color, n.offset.dx, n.offset.dy);
            }
        }
        Commands::Annotate { color, name, tags } => {
            let color = parse_search(&color)?;
            if app.annotate(color, &name, &tags)? {
                if let Some(record) = app.store().get(color) {
                    println!(
                        "Color {} named '{}' with tags {:?}.",
                        color, record.name, record.tags
                    );
                }
            } else {
                warn!("Empty name, nothing saved");
            }
        }
        Commands::Pick { color, x, y, zoom } => {
            if let Some(zoom) = zoom {
                app.set_zoom_level(zoom);
            }
            app.search(&color)?;
            match app.click(Point::new(x, y)) {
                Some(hit) => match app.store().get(hit) {
                    Some(record) => println!("{} {} {:?}", hit, record.name, record.tags),
                    None => println!("{}", hit),
                },
                None => println!("No hexagon at ({}, {})", x, y),
            }
        }
        Commands::List => {
            println!("{}", app.saved_colors_text().map_err(hexspace::format::StoreError::from)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Verbose wins over the configured level; RUST_LOG wins over both.
    let config = load_config(&cli);
    let level = match (&config, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Ok(config), false) => config.log_level.to_level_filter().to_string().to_lowercase(),
        (Err(_), false) => "info".to_string(),
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let result = config.and_then(|config| {
        info!("Using annotation store {:?}", config.store_path);
        run(cli, config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
