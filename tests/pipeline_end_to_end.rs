use detpost::{
    contains_class, decode_predictions, Dequantization, DetPostError, ImageSize, OutputLayout,
    PostprocessConfig, Postprocessor, QuantizedOutput,
};

const TOLERANCE: f32 = 1e-5;

fn config() -> PostprocessConfig {
    PostprocessConfig {
        confidence_threshold: 0.5,
        iou_threshold: 0.3,
        image: ImageSize::new(96, 96),
        num_classes: 3,
        dequantization: Dequantization::Normalized,
        parallel: false,
    }
}

/// Six anchors: two overlapping, one separate, one degenerate, one below the
/// objectness threshold, and one whose class scores are all weak.
fn frame() -> Vec<u8> {
    vec![
        128, 128, 40, 40, 230, 10, 200, 50, //
        130, 128, 40, 40, 200, 10, 180, 60, //
        40, 40, 30, 30, 180, 220, 10, 10, //
        200, 200, 0, 30, 255, 10, 250, 10, //
        200, 60, 30, 30, 100, 10, 250, 10, //
        220, 220, 20, 20, 140, 50, 60, 70,
    ]
}

#[test]
fn raw_records_decode_with_normalized_policy() {
    let dut = [
        16u8, 16, 40, 29, 5, 209, 30, 36, 16, 16, 46, 33, 5, 198, 32, 33, 16, 8, 85, 79, 2, 154,
        26, 41, 32, 16, 40, 44, 21, 253, 7, 17,
    ];
    let view = QuantizedOutput::with_anchors(&dut, 4, OutputLayout::new(3)).unwrap();
    let predictions = decode_predictions(view, Dequantization::Normalized);
    assert_eq!(predictions.len(), 4);

    for (b, p) in predictions.iter().enumerate() {
        let rec = &dut[b * 8..(b + 1) * 8];
        let expect = |i: usize| rec[i] as f32 / 255.0;
        assert!((p.x - expect(0)).abs() < TOLERANCE);
        assert!((p.y - expect(1)).abs() < TOLERANCE);
        assert!((p.width - expect(2)).abs() < TOLERANCE);
        assert!((p.height - expect(3)).abs() < TOLERANCE);
        assert!((p.confidence - expect(4)).abs() < TOLERANCE);
        assert_eq!(p.class_confidences.len(), 3);
        for (c, value) in p.class_confidences.iter().enumerate() {
            assert!((value - expect(5 + c)).abs() < TOLERANCE);
        }
    }
}

#[test]
fn declared_anchor_count_must_match_buffer() {
    let dut = [0u8; 16];
    let err = QuantizedOutput::with_anchors(&dut, 3, OutputLayout::new(3)).unwrap_err();
    assert_eq!(
        err,
        DetPostError::AnchorCountMismatch {
            expected: 3,
            got: 2
        }
    );
}

#[test]
fn affine_policy_is_applied_to_every_field() {
    let post = Postprocessor::new(PostprocessConfig {
        dequantization: Dequantization::affine(0.5, 100),
        num_classes: 1,
        ..config()
    })
    .unwrap();
    let predictions = post.decode(&[100, 102, 104, 106, 108, 90]).unwrap();
    assert_eq!(predictions.len(), 1);
    let p = &predictions[0];
    assert_eq!(
        [p.x, p.y, p.width, p.height, p.confidence],
        [0.0, 1.0, 2.0, 3.0, 4.0]
    );
    assert_eq!(p.class_confidences, vec![-5.0]);
}

#[test]
fn frame_produces_ranked_labeled_detections() {
    let post = Postprocessor::new(config()).unwrap();
    let raw = frame();

    let detections = post.run(&raw).unwrap();
    assert_eq!(detections.len(), 3);

    let confidences: Vec<f32> = detections
        .iter()
        .map(|d| d.prediction.confidence)
        .collect();
    let expected = [230.0 / 255.0, 180.0 / 255.0, 140.0 / 255.0];
    for (value, want) in confidences.iter().zip(expected.iter()) {
        assert!((value - want).abs() < TOLERANCE);
    }

    let class_ids: Vec<Option<usize>> = detections.iter().map(|d| d.class_id).collect();
    assert_eq!(class_ids, vec![Some(1), Some(0), None]);
    assert!((detections[0].class_confidence.unwrap() - 200.0 / 255.0).abs() < TOLERANCE);

    let classes = post.classes(&raw).unwrap();
    assert_eq!(classes, vec![1, 0]);
    assert!(contains_class(&classes, 0));
    assert!(!contains_class(&classes, 2));
}

#[test]
fn repeated_runs_are_identical() {
    let post = Postprocessor::new(config()).unwrap();
    let raw = frame();
    assert_eq!(post.run(&raw).unwrap(), post.run(&raw).unwrap());
}

#[test]
fn truncated_frame_is_rejected() {
    let post = Postprocessor::new(config()).unwrap();
    let mut raw = frame();
    raw.pop();
    assert_eq!(
        post.run(&raw).unwrap_err(),
        DetPostError::LengthMismatch {
            len: 47,
            record_len: 8
        }
    );
}
