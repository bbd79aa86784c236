//! Generate command implementation
//!
//! Renders one card to a file. Flags are turned into the same name/value
//! pairs an HTTP query carries, so both surfaces validate identically.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use relcard_render::{FontStack, GenerateError, GeneratedImage, ImageGenerator};
use relcard_spec::{options_from_params, ImageGeneratorOptions, ParamError};

use super::json_output::{error_codes, GenerateOutput, GenerateResult, JsonError};

/// Flags for `relcard generate`.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Headline text
    #[arg(long)]
    pub text: Option<String>,

    /// Label shown in a pill above the headline
    #[arg(long)]
    pub label: Option<String>,

    /// Canvas width in pixels (100-4000, default 1920)
    #[arg(long)]
    pub width: Option<String>,

    /// Canvas height in pixels (100-4000, default 1080)
    #[arg(long)]
    pub height: Option<String>,

    /// Headline font family (default readexpro)
    #[arg(long)]
    pub font_family: Option<String>,

    /// Headline font weight: bold, medium, light
    #[arg(long)]
    pub font_weight: Option<String>,

    /// Label font family (defaults to the headline's)
    #[arg(long)]
    pub label_font_family: Option<String>,

    /// Label font weight (defaults to the headline's)
    #[arg(long)]
    pub label_font_weight: Option<String>,

    /// Primary color: hex, rgb(), hsl(), oklch() or a color name
    #[arg(long)]
    pub primary_color: Option<String>,

    /// Output format: png, jpeg, jpg, webp
    #[arg(long)]
    pub format: Option<String>,

    /// Pattern overlay (random when omitted)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Grain strength: low, medium, high
    #[arg(long)]
    pub noise_level: Option<String>,

    /// Seed for reproducible output (default: current time)
    #[arg(long)]
    pub seed: Option<String>,

    /// Output file path
    #[arg(short, long)]
    pub out: PathBuf,

    /// Directory containing {family}-{weight}.ttf files
    #[arg(long, default_value = "./fonts")]
    pub fonts_dir: PathBuf,

    /// Output machine-readable JSON (no colored output)
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Flags as request parameter pairs.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let fields = [
            ("text", &self.text),
            ("label", &self.label),
            ("width", &self.width),
            ("height", &self.height),
            ("fontFamily", &self.font_family),
            ("fontWeight", &self.font_weight),
            ("labelFontFamily", &self.label_font_family),
            ("labelFontWeight", &self.label_font_weight),
            ("primaryColor", &self.primary_color),
            ("imageFormat", &self.format),
            ("patternType", &self.pattern),
            ("noiseLevel", &self.noise_level),
            ("seed", &self.seed),
        ];
        fields
            .into_iter()
            .filter_map(|(name, value)| value.clone().map(|value| (name, value)))
            .collect()
    }

    pub fn to_options(&self) -> Result<ImageGeneratorOptions, ParamError> {
        options_from_params(&self.to_params())
    }
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 invalid flags or generation failure
pub fn run(args: &GenerateArgs) -> Result<ExitCode> {
    if args.json {
        run_json(args)
    } else {
        run_human(args)
    }
}

fn render(args: &GenerateArgs, options: &ImageGeneratorOptions) -> Result<GeneratedImage, GenerateError> {
    let fonts = FontStack::for_directory(&args.fonts_dir);
    ImageGenerator::new(options, &fonts).generate_image()
}

fn write_output(path: &Path, image: &GeneratedImage) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, &image.bytes)
        .with_context(|| format!("Failed to write image: {}", path.display()))
}

fn run_human(args: &GenerateArgs) -> Result<ExitCode> {
    let start = Instant::now();
    let options = match args.to_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{} {} ({:?})", "Rejected:".red().bold(), e, e.value());
            return Ok(ExitCode::from(1));
        }
    };

    println!(
        "{} {}x{} {}",
        "Generating".cyan().bold(),
        options.width,
        options.height,
        options.image_format
    );

    let image = match render(args, &options) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("{} [{}] {}", "Generation failed:".red().bold(), e.code(), e);
            return Ok(ExitCode::from(1));
        }
    };
    write_output(&args.out, &image)?;

    println!("{} {}", "Wrote:".green().bold(), args.out.display());
    println!("  {} {}", "size:".dimmed(), format_size(image.bytes.len()));
    println!("  {} {}", "seed:".dimmed(), image.seed);
    println!("  {} {}", "pattern:".dimmed(), image.pattern);
    println!("  {} {}", "hash:".dimmed(), &image.hash[..16]);
    println!("{} {:.2?}", "Done in".dimmed(), start.elapsed());

    Ok(ExitCode::SUCCESS)
}

fn run_json(args: &GenerateArgs) -> Result<ExitCode> {
    let (output, code) = match generate_json(args) {
        Ok(result) => (GenerateOutput::success(result), ExitCode::SUCCESS),
        Err(error) => (GenerateOutput::failure(vec![error]), ExitCode::from(1)),
    };

    let json = serde_json::to_string_pretty(&output).with_context(|| {
        format!("{}: failed to serialize output", error_codes::JSON_SERIALIZE)
    })?;
    println!("{}", json);
    Ok(code)
}

fn generate_json(args: &GenerateArgs) -> Result<GenerateResult, JsonError> {
    let options = args
        .to_options()
        .map_err(|e| JsonError::new(e.code(), e.to_string()).with_param(e.param()))?;
    let image = render(args, &options).map_err(|e| JsonError::new(e.code(), e.to_string()))?;
    write_output(&args.out, &image)
        .map_err(|e| JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e)))?;

    Ok(GenerateResult {
        path: args.out.display().to_string(),
        width: options.width,
        height: options.height,
        format: image.format.to_string(),
        seed: image.seed,
        pattern: image.pattern.to_string(),
        hash: image.hash,
        bytes: image.bytes.len(),
    })
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
