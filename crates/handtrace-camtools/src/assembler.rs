//! Program assembly.
//!
//! Stitches the preamble, the machine header, one commented block per
//! contour and the machine footer into a single G-code program, and writes
//! it to disk.

use crate::contour_source::{CannyContourSource, ContourSource};
use crate::emitter::{MotionCommand, ToolpathEmitter};
use crate::error::{CamToolError, CamToolResult};
use crate::humanize::StrokeModel;
use crate::mapper::CoordinateMapper;
use crate::simplify::simplify_contour;
use handtrace_core::Contour;
use handtrace_profiles::{MachineKind, MachineProfile};
use handtrace_settings::GeneratorConfig;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A generated program, one entry per output line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GcodeProgram {
    lines: Vec<String>,
    contours_found: usize,
    contours_emitted: usize,
    drawn_length: f64,
}

impl GcodeProgram {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Contours handed to the generator.
    pub fn contours_found(&self) -> usize {
        self.contours_found
    }

    /// Contours that produced a stroke.
    pub fn contours_emitted(&self) -> usize {
        self.contours_emitted
    }

    /// Total length of all drawing moves (mm).
    pub fn drawn_length(&self) -> f64 {
        self.drawn_length
    }
}

impl fmt::Display for GcodeProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

/// Summary of a completed file conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub contours_found: usize,
    pub contours_emitted: usize,
    pub line_count: usize,
    pub drawn_length: f64,
    pub output_path: PathBuf,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} contours ({} drawn), {} lines, {:.1}mm of strokes -> {}",
            self.contours_found,
            self.contours_emitted,
            self.line_count,
            self.drawn_length,
            self.output_path.display()
        )
    }
}

/// Hand-drawn G-code generator for one machine and configuration.
#[derive(Debug, Clone)]
pub struct HandDrawnGenerator<S = CannyContourSource> {
    config: GeneratorConfig,
    machine: &'static MachineProfile,
    source: S,
}

impl HandDrawnGenerator<CannyContourSource> {
    /// Generator using Canny contour extraction with the configured blur.
    pub fn new(config: GeneratorConfig, machine: MachineKind) -> CamToolResult<Self> {
        let source = CannyContourSource::new(config.blur_kernel);
        Self::with_source(config, machine, source)
    }
}

impl<S: ContourSource> HandDrawnGenerator<S> {
    pub fn with_source(
        config: GeneratorConfig,
        machine: MachineKind,
        source: S,
    ) -> CamToolResult<Self> {
        config.validate()?;
        if let Some(warning) = config.safety_warning() {
            tracing::warn!("{}", warning);
        }
        Ok(Self {
            config,
            machine: machine.profile(),
            source,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn machine(&self) -> &'static MachineProfile {
        self.machine
    }

    /// Generator preamble followed by the machine header.
    pub fn header_lines(&self) -> Vec<String> {
        let c = &self.config;
        let mut lines = vec![
            format!("; G-code generated for {}", self.machine.name),
            "; Hand-drawn stroke generator".to_string(),
            format!("; Canvas: {}x{}mm", c.canvas_width, c.canvas_height),
            format!(
                "; Z safe: {:.2}mm, Z draw: {:.2}-{:.2}mm",
                c.z_safe,
                c.z_draw_base,
                c.max_draw_height()
            ),
            String::new(),
        ];
        lines.extend(self.machine.header.iter().map(|l| l.to_string()));
        lines.push(String::new());
        lines
    }

    pub fn footer_lines(&self) -> Vec<String> {
        let mut lines = vec![String::new()];
        lines.extend(self.machine.footer.iter().map(|l| l.to_string()));
        lines
    }

    /// Assemble a program from contours of a `width` x `height` image.
    ///
    /// Contours are emitted in the given order; every contour gets a
    /// `; Contour {i}` marker even when it is too small to draw.
    pub fn generate_from_contours<M: StrokeModel + ?Sized>(
        &self,
        contours: &[Contour],
        width: u32,
        height: u32,
        model: &mut M,
    ) -> CamToolResult<GcodeProgram> {
        if width == 0 || height == 0 {
            return Err(CamToolError::EmptyImage { width, height });
        }

        let mapper = CoordinateMapper::new(
            width,
            height,
            self.config.canvas_width,
            self.config.canvas_height,
        );
        let emitter = ToolpathEmitter::new(mapper, self.config.z_safe, self.config.travel_speed);

        let mut program = GcodeProgram {
            lines: self.header_lines(),
            contours_found: contours.len(),
            ..Default::default()
        };

        for (i, contour) in contours.iter().enumerate() {
            let path = simplify_contour(contour);
            let commands = emitter.emit(&path, model);
            if !commands.is_empty() {
                program.contours_emitted += 1;
            }
            program.drawn_length += drawn_length(&commands);

            program
                .lines
                .push(MotionCommand::Comment(format!("Contour {}", i + 1)).to_string());
            program
                .lines
                .extend(commands.iter().map(|c| c.to_string()));
            program.lines.push(String::new());
        }

        program.lines.extend(self.footer_lines());
        Ok(program)
    }

    /// Extract contours from encoded image bytes and assemble a program.
    pub fn generate_from_bytes<M: StrokeModel + ?Sized>(
        &self,
        bytes: &[u8],
        model: &mut M,
    ) -> CamToolResult<GcodeProgram> {
        let extraction = self.source.extract(bytes)?;
        self.generate_from_contours(
            &extraction.contours,
            extraction.width,
            extraction.height,
            model,
        )
    }

    /// Convert an image file into a G-code file.
    ///
    /// The output is written to a temporary file next to `output` and moved
    /// into place only once complete.
    pub fn convert_file<M: StrokeModel + ?Sized>(
        &self,
        input: &Path,
        output: &Path,
        model: &mut M,
    ) -> CamToolResult<ConversionReport> {
        if !input.exists() {
            return Err(CamToolError::InputNotFound(input.to_path_buf()));
        }

        tracing::info!("Processing image: {}", input.display());
        let bytes = std::fs::read(input).map_err(|source| CamToolError::ReadFailure {
            path: input.to_path_buf(),
            source,
        })?;

        let program = self.generate_from_bytes(&bytes, model)?;
        tracing::info!("Found {} contours", program.contours_found());

        write_atomically(output, &program.to_string())?;
        tracing::info!(
            "G-code written to {} ({} lines)",
            output.display(),
            program.line_count()
        );

        Ok(ConversionReport {
            contours_found: program.contours_found(),
            contours_emitted: program.contours_emitted(),
            line_count: program.line_count(),
            drawn_length: program.drawn_length(),
            output_path: output.to_path_buf(),
        })
    }
}

fn drawn_length(commands: &[MotionCommand]) -> f64 {
    let mut length = 0.0;
    let mut position = None;
    for command in commands {
        if let Some(target) = command.target() {
            match position {
                Some(from) if command.is_draw() => length += target.distance_to(&from),
                _ => {}
            }
            position = Some(target);
        }
    }
    length
}

fn write_atomically(path: &Path, content: &str) -> CamToolResult<()> {
    let failure = |source: io::Error| CamToolError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(dir).map_err(failure)?;
    file.write_all(content.as_bytes()).map_err(failure)?;
    file.persist(path).map_err(|e| failure(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::humanize::FixedModel;
    use handtrace_core::PixelPoint;

    fn square(x: i32, y: i32, side: i32) -> Contour {
        Contour::new(vec![
            PixelPoint::new(x, y),
            PixelPoint::new(x + side, y),
            PixelPoint::new(x + side, y + side),
            PixelPoint::new(x, y + side),
        ])
    }

    fn generator() -> HandDrawnGenerator {
        HandDrawnGenerator::new(GeneratorConfig::default(), MachineKind::Grbl).unwrap()
    }

    #[test]
    fn test_header_and_footer() {
        let gen = generator();
        let header = gen.header_lines();
        assert_eq!(header[0], "; G-code generated for Grbl CNC");
        assert_eq!(header[2], "; Canvas: 200x200mm");
        assert_eq!(header[3], "; Z safe: 5.00mm, Z draw: 0.20-1.00mm");
        assert_eq!(header.last().map(String::as_str), Some(""));
        assert!(header.iter().any(|l| l.starts_with("G21")));

        let footer = gen.footer_lines();
        assert_eq!(footer[0], "");
        assert!(footer.last().unwrap().starts_with("M30"));
    }

    #[test]
    fn test_program_layout() {
        let gen = generator();
        let contours = vec![square(10, 10, 40), square(60, 60, 20)];
        let mut model = FixedModel::new(gen.config());
        let program = gen
            .generate_from_contours(&contours, 100, 100, &mut model)
            .unwrap();

        assert_eq!(program.contours_found(), 2);
        assert_eq!(program.contours_emitted(), 2);

        let text = program.to_string();
        assert!(!text.ends_with('\n'));
        let first = text.find("; Contour 1").unwrap();
        let second = text.find("; Contour 2").unwrap();
        assert!(first < second);

        // The closing edge is never drawn: three edges per square.
        assert!((program.drawn_length() - (3.0 * 80.0 + 3.0 * 40.0)).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_contour_keeps_marker() {
        let gen = generator();
        let contours = vec![Contour::new(vec![PixelPoint::new(5, 5)])];
        let mut model = FixedModel::new(gen.config());
        let program = gen
            .generate_from_contours(&contours, 10, 10, &mut model)
            .unwrap();
        assert_eq!(program.contours_found(), 1);
        assert_eq!(program.contours_emitted(), 0);

        let lines = program.lines();
        let marker = lines.iter().position(|l| l == "; Contour 1").unwrap();
        assert_eq!(lines[marker + 1], "");
    }

    #[test]
    fn test_zero_sized_image_rejected() {
        let gen = generator();
        let mut model = FixedModel::new(gen.config());
        let result = gen.generate_from_contours(&[], 0, 10, &mut model);
        assert!(matches!(result, Err(CamToolError::EmptyImage { .. })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GeneratorConfig::default();
        config.blur_kernel = 6;
        assert!(matches!(
            HandDrawnGenerator::new(config, MachineKind::Grbl),
            Err(CamToolError::Config(_))
        ));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let gen = generator();
        let mut model = FixedModel::new(gen.config());
        let result = gen.convert_file(
            &dir.path().join("nope.png"),
            &dir.path().join("out.gcode"),
            &mut model,
        );
        assert!(matches!(result, Err(CamToolError::InputNotFound(_))));
        assert!(!dir.path().join("out.gcode").exists());
    }

    #[test]
    fn test_write_atomically_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.gcode");
        let result = write_atomically(&target, "G0 X0");
        assert!(matches!(result, Err(CamToolError::WriteFailure { .. })));
        assert!(!target.exists());
    }

    #[test]
    fn test_drawn_length_ignores_travel() {
        let commands = vec![
            MotionCommand::Lift { z: 5.0 },
            MotionCommand::Travel {
                x: 100.0,
                y: 100.0,
                feed: 3000,
            },
            MotionCommand::Draw {
                x: 103.0,
                y: 104.0,
                z: 0.2,
                feed: 1000,
            },
        ];
        assert!((drawn_length(&commands) - 5.0).abs() < 1e-12);
    }
}
