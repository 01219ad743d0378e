//! Command line interface.

use anyhow::{Context, Result};
use clap::Parser;
use handtrace_camtools::{FixedModel, HandDrawnGenerator, HandDrawnModel, StrokeModel};
use handtrace_profiles::{DrawingOverrides, DrawingStyle, MachineKind};
use handtrace_settings::{ConfigOverrides, GeneratorConfig, LoadedConfig};
use std::path::{Path, PathBuf};

const DEFAULT_PROFILE: &str = "artistic";

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

#[derive(Parser, Debug, Clone)]
#[command(name = "handtrace")]
#[command(about = "Convert images into hand-drawn looking G-code for CNC machines, plotters and lasers")]
#[command(version, long_version = LONG_VERSION)]
#[command(after_help = "Examples:\n  \
    handtrace image.jpg\n  \
    handtrace image.jpg --machine grbl --profile artistic\n  \
    handtrace logo.png --machine plotter --profile technical --width 100\n  \
    handtrace drawing.jpg --machine laser --profile engraving --z-base 0")]
pub struct Cli {
    /// Input image
    #[arg(required_unless_present_any = ["list_machines", "list_profiles"])]
    pub input: Option<PathBuf>,

    /// Output G-code file [default: <stem>_<machine>_<profile>.gcode]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Machine type (grbl, marlin, linuxcnc, plotter, laser)
    #[arg(long, default_value = "grbl")]
    pub machine: String,

    /// Drawing profile (artistic, technical, sketch, calligraphy, engraving)
    /// [default: artistic, or the drawing table of the config file]
    #[arg(long)]
    pub profile: Option<String>,

    /// Canvas width (mm)
    #[arg(long)]
    pub width: Option<f64>,

    /// Canvas height (mm)
    #[arg(long)]
    pub height: Option<f64>,

    /// Safe height for travel moves (mm)
    #[arg(long)]
    pub z_safe: Option<f64>,

    /// Base drawing height (mm)
    #[arg(long)]
    pub z_base: Option<f64>,

    /// Z variation, overrides the profile (mm)
    #[arg(long)]
    pub z_variation: Option<f64>,

    /// Drawing feed rate, overrides the profile (mm/min)
    #[arg(long)]
    pub feed_rate: Option<u32>,

    /// Tremor amplitude, overrides the profile (mm)
    #[arg(long)]
    pub tremor: Option<f64>,

    /// Pressure variation, overrides the profile (0-1)
    #[arg(long)]
    pub pressure_variation: Option<f64>,

    /// Speed variation, overrides the profile (fraction)
    #[arg(long)]
    pub speed_variation: Option<f64>,

    /// Travel feed rate (mm/min)
    #[arg(long)]
    pub travel_speed: Option<u32>,

    /// Smoothing kernel size before edge detection (odd, pixels)
    #[arg(long)]
    pub blur: Option<u32>,

    /// Plain output: no tremor, constant height and feed rate
    #[arg(long)]
    pub plain: bool,

    /// Seed for reproducible hand-drawn output
    #[arg(long, conflicts_with = "plain")]
    pub seed: Option<u64>,

    /// Base configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List available machines and exit
    #[arg(long)]
    pub list_machines: bool,

    /// List available drawing profiles and exit
    #[arg(long)]
    pub list_profiles: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Explicit values given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            canvas_width: self.width,
            canvas_height: self.height,
            z_safe: self.z_safe,
            z_draw_base: self.z_base,
            travel_speed: self.travel_speed,
            blur_kernel: self.blur,
            drawing: DrawingOverrides {
                z_variation: self.z_variation,
                feed_rate: self.feed_rate,
                tremor_amplitude: self.tremor,
                pressure_variation: self.pressure_variation,
                speed_variation: self.speed_variation,
            },
        }
    }

    /// Output path, derived from the input name when not given.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        PathBuf::from(format!(
            "{}_{}_{}.gcode",
            stem,
            self.machine,
            self.profile_name()
        ))
    }

    /// Profile name used for display and the default output name.
    pub fn profile_name(&self) -> &str {
        self.profile.as_deref().unwrap_or(DEFAULT_PROFILE)
    }

    /// Preset to fold over the base configuration.
    ///
    /// A `[drawing]` table in the config file stands in for the default
    /// profile; an explicit `--profile` always wins.
    pub fn drawing_style(&self, base: &LoadedConfig) -> Option<DrawingStyle> {
        match &self.profile {
            Some(name) => DrawingStyle::lookup(name),
            None if base.has_drawing => None,
            None => DrawingStyle::lookup(DEFAULT_PROFILE),
        }
    }

    /// Base configuration: `--config`, else the user config file if present,
    /// else built-in defaults.
    pub fn base_config(&self) -> Result<LoadedConfig> {
        if let Some(path) = &self.config {
            return GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()));
        }

        match GeneratorConfig::default_path().filter(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!("Using user config {}", path.display());
                GeneratorConfig::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))
            }
            None => Ok(LoadedConfig {
                config: GeneratorConfig::default(),
                has_drawing: false,
            }),
        }
    }
}

/// Execute one CLI invocation.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.list_machines || cli.list_profiles {
        if cli.list_machines {
            print!("{}", machine_listing());
        }
        if cli.list_profiles {
            print!("{}", profile_listing());
        }
        return Ok(());
    }

    let input = cli
        .input
        .as_deref()
        .context("No input image given")?;

    let machine = MachineKind::resolve(&cli.machine);
    let base = cli.base_config()?;
    let style = cli.drawing_style(&base);
    let config = base.config.resolve(style, &cli.overrides());
    let output = cli.output_path(input);

    tracing::info!(
        "Machine: {}, profile: {}",
        machine.profile().name,
        style.map_or("from config", |s| s.key())
    );

    let generator = HandDrawnGenerator::new(config.clone(), machine)
        .context("Invalid generator configuration")?;

    let mut model: Box<dyn StrokeModel> = if cli.plain {
        Box::new(FixedModel::new(&config))
    } else if let Some(seed) = cli.seed {
        Box::new(HandDrawnModel::seeded(&config, seed))
    } else {
        Box::new(HandDrawnModel::from_entropy(&config))
    };

    let report = generator
        .convert_file(input, &output, model.as_mut())
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!("{}", report);
    for note in machine.profile().notes {
        tracing::info!("{}", note);
    }

    Ok(())
}

/// Text printed by `--list-machines`.
pub fn machine_listing() -> String {
    let mut out = String::from("Available machines:\n");
    for kind in MachineKind::ALL {
        let profile = kind.profile();
        out.push_str(&format!(
            "  {:<10} {} - {}\n",
            kind.key(),
            profile.name,
            profile.description
        ));
        out.push_str(&format!(
            "  {:<10} tool on: {}, tool off: {}\n",
            "", profile.tool_on, profile.tool_off
        ));
    }
    out
}

/// Text printed by `--list-profiles`.
pub fn profile_listing() -> String {
    let mut out = String::from("Available drawing profiles:\n");
    for style in DrawingStyle::ALL {
        let p = style.parameters();
        out.push_str(&format!("  {:<12} {}\n", style.key(), style.description()));
        out.push_str(&format!(
            "  {:<12} z variation {}mm, feed {}mm/min, tremor {}mm, pressure {}, speed {}\n",
            "",
            p.z_variation,
            p.feed_rate,
            p.tremor_amplitude,
            p.pressure_variation,
            p.speed_variation
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("handtrace").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["photo.png"]);
        assert_eq!(cli.machine, "grbl");
        assert_eq!(cli.profile, None);
        assert_eq!(cli.profile_name(), "artistic");
        assert!(!cli.plain);
        assert!(cli.overrides().drawing.is_empty());
        assert_eq!(
            cli.output_path(Path::new("pics/photo.png")),
            PathBuf::from("photo_grbl_artistic.gcode")
        );
    }

    #[test]
    fn test_input_required_unless_listing() {
        assert!(Cli::try_parse_from(["handtrace"]).is_err());
        assert!(Cli::try_parse_from(["handtrace", "--list-machines"]).is_ok());
        assert!(Cli::try_parse_from(["handtrace", "--list-profiles"]).is_ok());
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&[
            "in.jpg",
            "--width",
            "100",
            "--z-base",
            "0",
            "--feed-rate",
            "900",
            "--tremor",
            "0.05",
            "--blur",
            "3",
            "-o",
            "out.nc",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.canvas_width, Some(100.0));
        assert_eq!(overrides.canvas_height, None);
        assert_eq!(overrides.z_draw_base, Some(0.0));
        assert_eq!(overrides.blur_kernel, Some(3));
        assert_eq!(overrides.drawing.feed_rate, Some(900));
        assert_eq!(overrides.drawing.tremor_amplitude, Some(0.05));
        assert_eq!(cli.output_path(Path::new("in.jpg")), PathBuf::from("out.nc"));
    }

    #[test]
    fn test_drawing_style_selection() {
        let from_file = LoadedConfig {
            config: GeneratorConfig::default(),
            has_drawing: true,
        };
        let defaults = LoadedConfig {
            has_drawing: false,
            ..from_file.clone()
        };

        let cli = parse(&["a.png"]);
        assert_eq!(cli.drawing_style(&defaults), Some(DrawingStyle::Artistic));
        assert_eq!(cli.drawing_style(&from_file), None);

        let cli = parse(&["a.png", "--profile", "sketch"]);
        assert_eq!(cli.drawing_style(&from_file), Some(DrawingStyle::Sketch));
        assert_eq!(
            cli.output_path(Path::new("a.png")),
            PathBuf::from("a_grbl_sketch.gcode")
        );
    }

    #[test]
    fn test_seed_conflicts_with_plain() {
        assert!(Cli::try_parse_from(["handtrace", "a.png", "--plain", "--seed", "3"]).is_err());
    }

    #[test]
    fn test_listings() {
        let machines = machine_listing();
        for kind in MachineKind::ALL {
            assert!(machines.contains(kind.key()));
        }
        assert!(machines.contains("tool on: M3 S1000, tool off: M5"));

        let profiles = profile_listing();
        assert!(profiles.contains("calligraphy"));
        assert!(profiles.contains("feed 400mm/min"));
    }
}
