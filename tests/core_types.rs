use detpost::color::rgb565_to_rgb888;
use detpost::{
    DetPostError, Dequantization, ImageSize, NmsParams, OutputLayout, PostprocessConfig,
    Prediction, QuantizedOutput,
};

#[test]
fn output_view_rejects_partial_records() {
    let data = [0u8; 10];
    let view = QuantizedOutput::new(&data, OutputLayout::new(0)).unwrap();
    assert_eq!(view.num_anchors(), 2);

    let err = QuantizedOutput::new(&data, OutputLayout::new(2)).err().unwrap();
    assert_eq!(
        err,
        DetPostError::LengthMismatch {
            len: 10,
            record_len: 7
        }
    );
}

#[test]
fn output_view_without_class_head_yields_empty_class_vectors() {
    let data = [255u8, 255, 51, 51, 255];
    let view = QuantizedOutput::new(&data, OutputLayout::new(0)).unwrap();
    let preds = detpost::decode_predictions(view, Dequantization::Normalized);
    assert_eq!(preds.len(), 1);
    assert!(preds[0].class_confidences.is_empty());
}

#[test]
fn nms_params_reject_invalid_thresholds() {
    let base = NmsParams::default();
    assert!(base.validate().is_ok());

    let err = NmsParams {
        confidence_threshold: -0.1,
        ..base
    }
    .validate()
    .err()
    .unwrap();
    assert_eq!(
        err,
        DetPostError::InvalidThreshold {
            name: "confidence_threshold",
            value: -0.1
        }
    );

    let err = NmsParams {
        image: ImageSize::new(96, 0),
        ..base
    }
    .validate()
    .err()
    .unwrap();
    assert_eq!(
        err,
        DetPostError::InvalidImageSize {
            width: 96,
            height: 0
        }
    );
}

#[test]
fn postprocess_config_rejects_bad_quantization() {
    let cfg = PostprocessConfig {
        dequantization: Dequantization::affine(f32::INFINITY, 0),
        ..PostprocessConfig::default()
    };
    assert_eq!(
        cfg.validate().err().unwrap(),
        DetPostError::InvalidQuantization {
            reason: "scale must be finite"
        }
    );
}

#[test]
fn prediction_box_helper_matches_free_function() {
    let p = Prediction::new(0.25, 0.75, 0.5, 0.5, 0.9, vec![0.1]);
    let image = ImageSize::new(64, 32);
    assert_eq!(p.to_box(image), detpost::lowlevel::decode_box(&p, image));
    assert_eq!(p.to_box(image).to_array(), [0.0, 16.0, 32.0, 32.0]);
}

#[test]
fn rgb565_frame_matches_reference_bytes() {
    let rgb565 = [
        0x28u8, 0xc4, 0x28, 0xe4, 0x20, 0xc5, 0x21, 0x05, 0x28, 0xc5, 0x28, 0xc5, 0x30, 0xc2,
        0x30, 0xc1,
    ];
    let expected = [
        0x29u8, 0x18, 0x21, 0x29, 0x1c, 0x21, 0x21, 0x18, 0x29, 0x21, 0x20, 0x29, 0x29, 0x18,
        0x29, 0x29, 0x18, 0x29, 0x31, 0x18, 0x10, 0x31, 0x18, 0x08,
    ];
    let rgb888 = rgb565_to_rgb888(&rgb565, 4, 2).unwrap();
    assert_eq!(rgb888, expected);
}

#[test]
fn error_messages_name_the_offending_values() {
    let err = DetPostError::LengthMismatch {
        len: 9,
        record_len: 8,
    };
    assert_eq!(
        err.to_string(),
        "buffer length 9 is not a multiple of the record length 8"
    );
}
