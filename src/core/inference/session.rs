//! Helpers for creating ONNX Runtime sessions.
//!
//! Sessions are created from an ordered execution provider list: each provider
//! is registered on its own copy of the session builder and the first one that
//! registers and loads the model wins.

use crate::core::config::{OrtExecutionProvider, OrtGraphOptimizationLevel, OrtSessionConfig};
use crate::core::errors::ClassifierError;
use ort::execution_providers::{
    CPUExecutionProvider, CUDAExecutionProvider, CoreMLExecutionProvider,
    DirectMLExecutionProvider, ExecutionProviderDispatch, OpenVINOExecutionProvider,
    TensorRTExecutionProvider, WebGPUExecutionProvider,
};
use ort::logging::LogLevel;
use ort::session::{Session, builder::GraphOptimizationLevel, builder::SessionBuilder};
use std::path::Path;
use tracing::{debug, info};

const SESSION_CREATION_FAILURE: &str = "failed to create ONNX session";
const SESSION_CONFIGURATION_FAILURE: &str = "failed to configure session";

/// Loads a session on the CPU provider with Error-level ORT logging.
pub fn load_session(model_path: impl AsRef<Path>) -> Result<Session, ClassifierError> {
    let path = model_path.as_ref();
    ensure_model_file(path)?;
    let builder = base_builder(path, &OrtSessionConfig::new())?;
    let (session, _) = commit_with_fallback(path, &builder, &[OrtExecutionProvider::CPU])?;
    Ok(session)
}

/// Fails with a `ModelLoad` error if `path` is not an existing file.
pub(crate) fn ensure_model_file(path: &Path) -> Result<(), ClassifierError> {
    if path.is_file() {
        Ok(())
    } else if path.exists() {
        Err(ClassifierError::model_load_error(
            path,
            "model path is not a file",
            Some("point model_path at an .onnx file"),
            None::<std::io::Error>,
        ))
    } else {
        Err(ClassifierError::model_load_error(
            path,
            "model file not found",
            Some("verify model file exists and is readable"),
            None::<std::io::Error>,
        ))
    }
}

/// Creates a session builder with every option in `cfg` except the execution providers.
///
/// ORT rejecting an option is reported as `ModelLoad` for `path`.
pub(crate) fn base_builder(
    path: &Path,
    cfg: &OrtSessionConfig,
) -> Result<SessionBuilder, ClassifierError> {
    configure(cfg).map_err(|e| configuration_error(path, e))
}

fn configure(cfg: &OrtSessionConfig) -> ort::Result<SessionBuilder> {
    let mut builder = Session::builder()?.with_log_level(log_level(cfg.get_log_severity_level()))?;
    if let Some(intra) = cfg.intra_threads {
        builder = builder.with_intra_threads(intra)?;
    }
    if let Some(inter) = cfg.inter_threads {
        builder = builder.with_inter_threads(inter)?;
    }
    if let Some(par) = cfg.parallel_execution {
        builder = builder.with_parallel_execution(par)?;
    }
    if let Some(level) = cfg.optimization_level {
        builder = builder.with_optimization_level(optimization_level(level))?;
    }
    Ok(builder)
}

fn configuration_error(path: &Path, e: ort::Error) -> ClassifierError {
    ClassifierError::model_load_error(
        path,
        SESSION_CONFIGURATION_FAILURE,
        Some("check the ort_session thread, execution and optimization settings"),
        Some(e),
    )
}

/// Tries `providers` in order and returns the first session that loads.
///
/// A provider that fails to register is skipped. A provider that registers
/// but cannot load the model is also skipped; if every registered provider
/// fails that way the last load error is returned as `ModelLoad`. If no
/// provider registers at all the result is `BackendUnavailable`.
pub(crate) fn commit_with_fallback(
    path: &Path,
    base: &SessionBuilder,
    providers: &[OrtExecutionProvider],
) -> Result<(Session, OrtExecutionProvider), ClassifierError> {
    let mut attempts: Vec<(&'static str, String)> = Vec::with_capacity(providers.len());
    let mut load_failure: Option<ort::Error> = None;

    for provider in providers {
        let builder = match base
            .clone()
            .with_execution_providers([execution_provider(provider).error_on_failure()])
        {
            Ok(builder) => builder,
            Err(e) => {
                debug!(provider = provider.name(), error = %e, "execution provider unavailable");
                attempts.push((provider.name(), e.to_string()));
                continue;
            }
        };

        match builder.commit_from_file(path) {
            Ok(session) => {
                info!(
                    provider = provider.name(),
                    model = %path.display(),
                    "session created"
                );
                return Ok((session, provider.clone()));
            }
            Err(e) => {
                debug!(
                    provider = provider.name(),
                    error = %e,
                    "model failed to load on execution provider"
                );
                attempts.push((provider.name(), e.to_string()));
                load_failure = Some(e);
            }
        }
    }

    match load_failure {
        Some(e) => Err(ClassifierError::model_load_error(
            path,
            SESSION_CREATION_FAILURE,
            Some("verify the file is a valid ONNX model compatible with the selected execution providers"),
            Some(e),
        )),
        None => Err(ClassifierError::backend_unavailable(attempts)),
    }
}

/// Builds the ORT dispatch for one configured provider.
pub(crate) fn execution_provider(provider: &OrtExecutionProvider) -> ExecutionProviderDispatch {
    use OrtExecutionProvider as EP;
    match provider {
        EP::CPU => CPUExecutionProvider::default().build(),
        EP::CUDA { device_id } => {
            let mut cuda = CUDAExecutionProvider::default();
            if let Some(id) = device_id {
                cuda = cuda.with_device_id(*id);
            }
            cuda.build()
        }
        EP::TensorRT {
            device_id,
            fp16_enable,
            engine_cache_enable,
            engine_cache_path,
            max_workspace_size,
        } => {
            let mut trt = TensorRTExecutionProvider::default();
            if let Some(id) = device_id {
                trt = trt.with_device_id(*id);
            }
            if let Some(fp16) = fp16_enable {
                trt = trt.with_fp16(*fp16);
            }
            if let Some(enable) = engine_cache_enable {
                trt = trt.with_engine_cache(*enable);
            }
            if let Some(path) = engine_cache_path {
                trt = trt.with_engine_cache_path(path);
            }
            if let Some(workspace) = max_workspace_size {
                trt = trt.with_max_workspace_size(*workspace);
            }
            trt.build()
        }
        EP::DirectML { device_id } => {
            let mut dml = DirectMLExecutionProvider::default();
            if let Some(id) = device_id {
                dml = dml.with_device_id(*id);
            }
            dml.build()
        }
        EP::CoreML { subgraphs } => {
            let mut coreml = CoreMLExecutionProvider::default();
            if let Some(sub) = subgraphs {
                coreml = coreml.with_subgraphs(*sub);
            }
            coreml.build()
        }
        EP::OpenVINO { device_type } => {
            let mut openvino = OpenVINOExecutionProvider::default();
            if let Some(device) = device_type {
                openvino = openvino.with_device_type(device);
            }
            openvino.build()
        }
        EP::WebGPU => WebGPUExecutionProvider::default().build(),
    }
}

fn log_level(severity: i32) -> LogLevel {
    match severity {
        i32::MIN..=0 => LogLevel::Verbose,
        1 => LogLevel::Info,
        2 => LogLevel::Warning,
        3 => LogLevel::Error,
        _ => LogLevel::Fatal,
    }
}

fn optimization_level(level: OrtGraphOptimizationLevel) -> GraphOptimizationLevel {
    use OrtGraphOptimizationLevel as OG;
    match level {
        OG::DisableAll => GraphOptimizationLevel::Disable,
        OG::Level1 => GraphOptimizationLevel::Level1,
        OG::Level2 => GraphOptimizationLevel::Level2,
        OG::Level3 => GraphOptimizationLevel::Level3,
    }
}
