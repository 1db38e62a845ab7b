//! Python bindings for the detpost post-processing library.
//!
//! This module exposes the dequantize/suppress/classify pipeline to Python via PyO3.

use numpy::PyReadonlyArrayDyn;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use detpost::{
    DetPostError, Dequantization, Detection as RustDetection, ImageSize, NmsParams,
    PostprocessConfig as RustPostprocessConfig, Postprocessor as RustPostprocessor,
    Prediction as RustPrediction,
};

/// Convert a DetPostError to a Python exception.
fn to_py_err(err: DetPostError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_dequantization(scale: Option<f32>, zero_point: i32) -> Dequantization {
    match scale {
        Some(scale) => Dequantization::affine(scale, zero_point),
        None => Dequantization::Normalized,
    }
}

/// One anchor's detection candidate with normalized center/extent.
#[pyclass]
#[derive(Clone)]
pub struct Prediction {
    #[pyo3(get, set)]
    pub x: f32,
    #[pyo3(get, set)]
    pub y: f32,
    #[pyo3(get, set)]
    pub width: f32,
    #[pyo3(get, set)]
    pub height: f32,
    /// Objectness score.
    #[pyo3(get, set)]
    pub confidence: f32,
    /// Per-class scores (may be empty).
    #[pyo3(get, set)]
    pub class_confidences: Vec<f32>,
}

#[pymethods]
impl Prediction {
    #[new]
    #[pyo3(signature = (x, y, width, height, confidence, class_confidences = Vec::new()))]
    fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        confidence: f32,
        class_confidences: Vec<f32>,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            confidence,
            class_confidences,
        }
    }

    /// Pixel-space corners `(x1, y1, x2, y2)` for the given image size.
    fn to_box(&self, image_width: u32, image_height: u32) -> (f32, f32, f32, f32) {
        let image = ImageSize::new(image_width, image_height);
        let b = RustPrediction::from(self.clone()).to_box(image);
        (b.x1, b.y1, b.x2, b.y2)
    }

    fn __repr__(&self) -> String {
        format!(
            "Prediction(x={:.4}, y={:.4}, width={:.4}, height={:.4}, confidence={:.4}, classes={})",
            self.x,
            self.y,
            self.width,
            self.height,
            self.confidence,
            self.class_confidences.len()
        )
    }
}

impl From<Prediction> for RustPrediction {
    fn from(p: Prediction) -> Self {
        RustPrediction::new(p.x, p.y, p.width, p.height, p.confidence, p.class_confidences)
    }
}

impl From<RustPrediction> for Prediction {
    fn from(p: RustPrediction) -> Self {
        Self {
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
            confidence: p.confidence,
            class_confidences: p.class_confidences,
        }
    }
}

/// A surviving prediction and the class extracted for it, if any.
#[pyclass]
#[derive(Clone)]
pub struct Detection {
    #[pyo3(get)]
    pub prediction: Prediction,
    #[pyo3(get)]
    pub class_id: Option<usize>,
    #[pyo3(get)]
    pub class_confidence: Option<f32>,
}

#[pymethods]
impl Detection {
    fn __repr__(&self) -> String {
        format!(
            "Detection(confidence={:.4}, class_id={:?})",
            self.prediction.confidence, self.class_id
        )
    }
}

impl From<RustDetection> for Detection {
    fn from(d: RustDetection) -> Self {
        Self {
            prediction: d.prediction.into(),
            class_id: d.class_id,
            class_confidence: d.class_confidence,
        }
    }
}

/// Configuration for a full post-processing pass.
#[pyclass]
#[derive(Clone)]
pub struct PostprocessConfig {
    inner: RustPostprocessConfig,
}

#[pymethods]
impl PostprocessConfig {
    /// Create a new PostprocessConfig.
    ///
    /// Args:
    ///     confidence_threshold: Minimum objectness and class score (default: 0.5)
    ///     iou_threshold: IoU above which boxes are suppressed (default: 0.5)
    ///     image_width: Model input width in pixels (default: 416)
    ///     image_height: Model input height in pixels (default: 416)
    ///     num_classes: Class scores per anchor record (default: 3)
    ///     scale: Affine dequantization scale; None selects v / 255 (default: None)
    ///     zero_point: Affine dequantization zero point (default: 0)
    ///     parallel: Decode anchors in parallel (default: False)
    #[new]
    #[pyo3(signature = (
        confidence_threshold = 0.5,
        iou_threshold = 0.5,
        image_width = 416,
        image_height = 416,
        num_classes = 3,
        scale = None,
        zero_point = 0,
        parallel = false
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        confidence_threshold: f32,
        iou_threshold: f32,
        image_width: u32,
        image_height: u32,
        num_classes: usize,
        scale: Option<f32>,
        zero_point: i32,
        parallel: bool,
    ) -> PyResult<Self> {
        let inner = RustPostprocessConfig {
            confidence_threshold,
            iou_threshold,
            image: ImageSize::new(image_width, image_height),
            num_classes,
            dequantization: parse_dequantization(scale, zero_point),
            parallel,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn __repr__(&self) -> String {
        let policy = match self.inner.dequantization {
            Dequantization::Normalized => "normalized".to_string(),
            Dequantization::Affine(q) => format!("affine({}, {})", q.scale, q.zero_point),
        };
        format!(
            "PostprocessConfig(confidence_threshold={}, iou_threshold={}, image={}x{}, num_classes={}, dequantization={})",
            self.inner.confidence_threshold,
            self.inner.iou_threshold,
            self.inner.image.width,
            self.inner.image.height,
            self.inner.num_classes,
            policy
        )
    }
}

/// Runs dequantization, suppression, and classification on raw output.
#[pyclass]
pub struct Postprocessor {
    inner: RustPostprocessor,
}

#[pymethods]
impl Postprocessor {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PostprocessConfig>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        let inner = RustPostprocessor::new(cfg).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Post-process a uint8 output tensor of any shape (read in C order).
    fn run(&self, output: PyReadonlyArrayDyn<'_, u8>) -> PyResult<Vec<Detection>> {
        let data = output.as_slice()?;
        let detections = self.inner.run(data).map_err(to_py_err)?;
        Ok(detections.into_iter().map(Detection::from).collect())
    }

    /// Return only the extracted class indices for a uint8 output tensor.
    fn classes(&self, output: PyReadonlyArrayDyn<'_, u8>) -> PyResult<Vec<usize>> {
        let data = output.as_slice()?;
        self.inner.classes(data).map_err(to_py_err)
    }

    /// Dequantize a uint8 output tensor without filtering.
    fn decode(&self, output: PyReadonlyArrayDyn<'_, u8>) -> PyResult<Vec<Prediction>> {
        let data = output.as_slice()?;
        let predictions = self.inner.decode(data).map_err(to_py_err)?;
        Ok(predictions.into_iter().map(Prediction::from).collect())
    }

    fn __repr__(&self) -> String {
        let cfg = self.inner.config();
        format!(
            "Postprocessor(image={}x{}, num_classes={})",
            cfg.image.width, cfg.image.height, cfg.num_classes
        )
    }
}

/// Intersection-over-union of two predictions on an image of the given size.
#[pyfunction]
#[pyo3(signature = (a, b, image_width = 416, image_height = 416))]
fn iou(a: Prediction, b: Prediction, image_width: u32, image_height: u32) -> f32 {
    let image = ImageSize::new(image_width, image_height);
    detpost::iou(&a.into(), &b.into(), image)
}

/// Greedy non-maximum suppression, returning survivors by descending confidence.
#[pyfunction]
#[pyo3(signature = (
    predictions,
    confidence_threshold = 0.5,
    iou_threshold = 0.5,
    image_width = 416,
    image_height = 416
))]
fn non_maximum_suppression(
    predictions: Vec<Prediction>,
    confidence_threshold: f32,
    iou_threshold: f32,
    image_width: u32,
    image_height: u32,
) -> PyResult<Vec<Prediction>> {
    let params = NmsParams {
        confidence_threshold,
        iou_threshold,
        image: ImageSize::new(image_width, image_height),
    };
    params.validate().map_err(to_py_err)?;
    let input: Vec<RustPrediction> = predictions.into_iter().map(Into::into).collect();
    let kept = detpost::non_maximum_suppression(&input, params);
    Ok(kept.into_iter().map(Prediction::from).collect())
}

/// Best class index per prediction whose top class score reaches the threshold.
#[pyfunction]
#[pyo3(signature = (predictions, confidence_threshold = 0.5))]
fn detection_classes(predictions: Vec<Prediction>, confidence_threshold: f32) -> Vec<usize> {
    let input: Vec<RustPrediction> = predictions.into_iter().map(Into::into).collect();
    detpost::detection_classes(&input, confidence_threshold)
}

/// Python module for detpost.
#[pymodule]
fn _detpost(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Prediction>()?;
    m.add_class::<Detection>()?;
    m.add_class::<PostprocessConfig>()?;
    m.add_class::<Postprocessor>()?;
    m.add_function(wrap_pyfunction!(iou, m)?)?;
    m.add_function(wrap_pyfunction!(non_maximum_suppression, m)?)?;
    m.add_function(wrap_pyfunction!(detection_classes, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
