use super::*;
use crate::core::config::{ModelInferenceConfig, OrtSessionConfig};
use crate::core::inference::test_models;
use ndarray::{Array2, array};

#[test]
fn test_new_caches_model_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_models::write_single_input(dir.path(), "gesture.onnx");

    let infer = OrtInfer::new(&path).unwrap();
    assert_eq!(infer.input_names(), ["point_history".to_string()]);
    assert_eq!(infer.input_shapes(), [vec![-1i64, 32]]);
    assert_eq!(infer.output_names(), ["scores".to_string()]);
    assert_eq!(infer.active_provider(), &OrtExecutionProvider::CPU);
    assert_eq!(infer.model_name(), "gesture");
    assert_eq!(infer.model_path(), path.as_path());
    assert_eq!(infer.pool_size(), 1);
}

#[test]
fn test_infer_2d_returns_first_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_models::write_single_input(dir.path(), "gesture.onnx");
    let infer = OrtInfer::new(&path).unwrap();

    let mut batch = Array2::<f32>::zeros((2, test_models::FEATURES));
    batch.row_mut(0).assign(&ndarray::aview1(&test_models::row(&[0.9, 0.05, 0.05])));
    batch.row_mut(1).assign(&ndarray::aview1(&test_models::row(&[0.1, 0.8, 0.1])));

    let scores = infer.infer_2d(batch.view()).unwrap();
    assert_eq!(scores, array![[0.9f32, 0.05, 0.05], [0.1, 0.8, 0.1]]);
}

#[test]
fn test_infer_2d_accepts_non_standard_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_models::write_single_input(dir.path(), "gesture.onnx");
    let infer = OrtInfer::new(&path).unwrap();

    let mut columns = Array2::<f32>::zeros((test_models::FEATURES, 2));
    columns[[0, 0]] = 0.7;
    columns[[1, 1]] = 0.6;
    let scores = infer.infer_2d(columns.t()).unwrap();
    assert_eq!(scores, array![[0.7f32, 0.0, 0.0], [0.0, 0.6, 0.0]]);
}

#[test]
fn test_same_batch_is_fed_to_every_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_models::write_dual_input(dir.path(), "dual.onnx");
    let infer = OrtInfer::new(&path).unwrap();
    assert_eq!(
        infer.input_names(),
        ["history_a".to_string(), "history_b".to_string()]
    );

    let batch = Array2::from_shape_vec(
        (1, test_models::FEATURES),
        test_models::row(&[0.25, 0.5, 1.0]),
    )
    .unwrap();
    let scores = infer.infer_2d(batch.view()).unwrap();
    assert_eq!(scores, array![[0.5f32, 1.0, 2.0]]);
}

#[test]
fn test_shape_mismatch_is_inference_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_models::write_single_input(dir.path(), "gesture.onnx");
    let infer = OrtInfer::new(&path).unwrap();

    let batch = Array2::<f32>::zeros((2, 31));
    let err = infer.infer_2d(batch.view()).unwrap_err();
    assert!(err.is_inference_error(), "unexpected error: {err}");
}

#[test]
fn test_session_pool_round_robin() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_models::write_single_input(dir.path(), "gesture.onnx");
    let config = ModelInferenceConfig::new()
        .session_pool_size(3)
        .execution_providers(vec![OrtExecutionProvider::CPU]);
    let infer = OrtInfer::from_config(&config, &path).unwrap();
    assert_eq!(infer.pool_size(), 3);

    let batch = Array2::from_shape_vec(
        (1, test_models::FEATURES),
        test_models::row(&[0.3, 0.2, 0.1]),
    )
    .unwrap();
    let first = infer.infer_2d(batch.view()).unwrap();
    for _ in 0..5 {
        assert_eq!(infer.infer_2d(batch.view()).unwrap(), first);
    }
}

#[test]
fn test_config_model_name_overrides_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_models::write_single_input(dir.path(), "gesture.onnx");
    let config = ModelInferenceConfig::new()
        .model_name("point_history")
        .execution_providers(vec![OrtExecutionProvider::CPU]);
    let infer = OrtInfer::from_config(&config, &path).unwrap();
    assert_eq!(infer.model_name(), "point_history");
}

#[test]
fn test_session_options_are_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_models::write_single_input(dir.path(), "gesture.onnx");
    let session = OrtSessionConfig::new()
        .with_intra_threads(1)
        .with_inter_threads(1)
        .with_execution_providers(vec![OrtExecutionProvider::CPU]);
    let infer = OrtInfer::with_session_config(&path, session).unwrap();
    assert_eq!(infer.active_provider(), &OrtExecutionProvider::CPU);
}

#[test]
fn test_missing_model_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = OrtInfer::new(dir.path().join("absent.onnx")).unwrap_err();
    assert!(err.is_load_error());
}

#[test]
fn test_corrupt_model_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_models::write(dir.path(), "corrupt.onnx", b"definitely not protobuf");
    let err = OrtInfer::new(&path).unwrap_err();
    assert!(err.is_load_error(), "unexpected error: {err}");
}

#[cfg(not(feature = "cuda"))]
#[test]
fn test_unregistered_providers_are_backend_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_models::write_single_input(dir.path(), "gesture.onnx");
    let config = ModelInferenceConfig::new().execution_providers(vec![OrtExecutionProvider::cuda()]);

    match OrtInfer::from_config(&config, &path).unwrap_err() {
        ClassifierError::BackendUnavailable { attempts } => {
            assert_eq!(attempts.len(), 1);
            assert!(attempts[0].starts_with("CUDAExecutionProvider"));
        }
        other => panic!("expected BackendUnavailable, got {other}"),
    }
}

#[cfg(not(any(feature = "cuda", feature = "tensorrt")))]
#[test]
fn test_default_preference_falls_back_to_cpu() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_models::write_single_input(dir.path(), "gesture.onnx");
    let infer = OrtInfer::from_config(&ModelInferenceConfig::new(), &path).unwrap();
    assert_eq!(infer.active_provider(), &OrtExecutionProvider::CPU);
}
