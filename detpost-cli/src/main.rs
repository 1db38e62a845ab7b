use clap::Parser;
use detpost::{
    Dequantization, Detection, ImageSize, PostprocessConfig, Postprocessor, QuantizedOutput,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "detpost CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for each post-processing stage.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
enum DequantizationConfig {
    Normalized,
    Affine { scale: f32, zero_point: i32 },
}

impl From<DequantizationConfig> for Dequantization {
    fn from(value: DequantizationConfig) -> Self {
        match value {
            DequantizationConfig::Normalized => Dequantization::Normalized,
            DequantizationConfig::Affine { scale, zero_point } => {
                Dequantization::affine(scale, zero_point)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PostprocessConfigJson {
    confidence_threshold: f32,
    iou_threshold: f32,
    image_width: u32,
    image_height: u32,
    num_classes: usize,
    parallel: bool,
    dequantization: DequantizationConfig,
}

impl Default for PostprocessConfigJson {
    fn default() -> Self {
        let cfg = PostprocessConfig::default();
        Self {
            confidence_threshold: cfg.confidence_threshold,
            iou_threshold: cfg.iou_threshold,
            image_width: cfg.image.width,
            image_height: cfg.image.height,
            num_classes: cfg.num_classes,
            parallel: cfg.parallel,
            dequantization: DequantizationConfig::Normalized,
        }
    }
}

impl From<PostprocessConfigJson> for PostprocessConfig {
    fn from(value: PostprocessConfigJson) -> Self {
        Self {
            confidence_threshold: value.confidence_threshold,
            iou_threshold: value.iou_threshold,
            image: ImageSize::new(value.image_width, value.image_height),
            num_classes: value.num_classes,
            dequantization: value.dequantization.into(),
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    tensor_path: String,
    output_path: Option<String>,
    num_anchors: Option<usize>,
    postprocess: PostprocessConfigJson,
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    corners: [f32; 4],
    confidence: f32,
    class_id: Option<usize>,
    class_confidence: Option<f32>,
}

impl DetectionRecord {
    fn new(detection: Detection, image: ImageSize) -> Self {
        let p = &detection.prediction;
        Self {
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
            corners: p.to_box(image).to_array(),
            confidence: p.confidence,
            class_id: detection.class_id,
            class_confidence: detection.class_confidence,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    num_anchors: usize,
    classes: Vec<usize>,
    detections: Vec<DetectionRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("detpost=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.tensor_path.is_empty() {
        return Err("tensor_path must be set in the config".into());
    }

    let post_cfg: PostprocessConfig = config.postprocess.into();
    let postprocessor = Postprocessor::new(post_cfg)?;

    let raw = fs::read(&config.tensor_path)?;
    let view = match config.num_anchors {
        Some(expected) => QuantizedOutput::with_anchors(&raw, expected, post_cfg.layout())?,
        None => QuantizedOutput::new(&raw, post_cfg.layout())?,
    };
    tracing::info!(
        anchors = view.num_anchors(),
        classes = post_cfg.num_classes,
        "loaded detector output"
    );

    let detections = postprocessor.run(view.as_slice())?;
    let classes = detections.iter().filter_map(|d| d.class_id).collect();
    let output = Output {
        num_anchors: view.num_anchors(),
        classes,
        detections: detections
            .into_iter()
            .map(|d| DetectionRecord::new(d, post_cfg.image))
            .collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
