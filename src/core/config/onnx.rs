//! ONNX Runtime configuration types and utilities.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Graph optimization levels for ONNX Runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrtGraphOptimizationLevel {
    /// Disable all optimizations.
    DisableAll,
    /// Enable basic optimizations.
    #[default]
    Level1,
    /// Enable extended optimizations.
    Level2,
    /// Enable all optimizations.
    Level3,
}

/// Execution providers for ONNX Runtime.
///
/// In configuration files a provider is either a bare name (`"CUDA"`) or a
/// single-key map from name to options (`{"CUDA": {"device_id": 1}}`). Both the
/// short names and ONNX Runtime's own identifiers (`"CUDAExecutionProvider"`)
/// are accepted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ProviderEntry")]
pub enum OrtExecutionProvider {
    /// CPU execution provider (always available)
    #[default]
    CPU,
    /// NVIDIA CUDA execution provider
    CUDA {
        /// CUDA device ID (default: 0)
        device_id: Option<i32>,
    },
    /// TensorRT execution provider
    TensorRT {
        /// TensorRT device ID (default: 0)
        device_id: Option<i32>,
        /// FP16 enable flag
        fp16_enable: Option<bool>,
        /// Cache built engines on disk
        engine_cache_enable: Option<bool>,
        /// Directory for cached engines
        engine_cache_path: Option<String>,
        /// Maximum workspace size in bytes
        max_workspace_size: Option<usize>,
    },
    /// DirectML execution provider (Windows only)
    DirectML {
        /// DirectML device ID (default: 0)
        device_id: Option<i32>,
    },
    /// CoreML execution provider (macOS/iOS only)
    CoreML {
        /// Enable subgraphs
        subgraphs: Option<bool>,
    },
    /// OpenVINO execution provider
    OpenVINO {
        /// Device type (e.g., "CPU", "GPU", "NPU")
        device_type: Option<String>,
    },
    /// WebGPU execution provider
    WebGPU,
}

impl OrtExecutionProvider {
    /// Returns the identifier ONNX Runtime uses for this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CPU => "CPUExecutionProvider",
            Self::CUDA { .. } => "CUDAExecutionProvider",
            Self::TensorRT { .. } => "TensorrtExecutionProvider",
            Self::DirectML { .. } => "DmlExecutionProvider",
            Self::CoreML { .. } => "CoreMLExecutionProvider",
            Self::OpenVINO { .. } => "OpenVINOExecutionProvider",
            Self::WebGPU => "WebGpuExecutionProvider",
        }
    }

    /// CUDA on the default device.
    pub fn cuda() -> Self {
        Self::CUDA { device_id: None }
    }

    /// TensorRT with FP16 and an engine cache in `cache_path`.
    pub fn tensorrt_cached(cache_path: impl Into<String>) -> Self {
        Self::TensorRT {
            device_id: None,
            fp16_enable: Some(true),
            engine_cache_enable: Some(true),
            engine_cache_path: Some(cache_path.into()),
            max_workspace_size: None,
        }
    }

    /// The preference list used when none is configured:
    /// cached FP16 TensorRT, then CUDA, then CPU.
    pub fn default_preference() -> Vec<Self> {
        vec![Self::tensorrt_cached("."), Self::cuda(), Self::CPU]
    }
}

/// Options accepted in the map form of a provider entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProviderOptions {
    device_id: Option<i32>,
    fp16_enable: Option<bool>,
    engine_cache_enable: Option<bool>,
    engine_cache_path: Option<String>,
    max_workspace_size: Option<usize>,
    subgraphs: Option<bool>,
    device_type: Option<String>,
}

impl ProviderOptions {
    fn set_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.device_id.is_some() {
            fields.push("device_id");
        }
        if self.fp16_enable.is_some() {
            fields.push("fp16_enable");
        }
        if self.engine_cache_enable.is_some() {
            fields.push("engine_cache_enable");
        }
        if self.engine_cache_path.is_some() {
            fields.push("engine_cache_path");
        }
        if self.max_workspace_size.is_some() {
            fields.push("max_workspace_size");
        }
        if self.subgraphs.is_some() {
            fields.push("subgraphs");
        }
        if self.device_type.is_some() {
            fields.push("device_type");
        }
        fields
    }
}

/// Wire form of a provider: a name, or a name mapped to its options.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProviderEntry {
    Name(String),
    Configured(std::collections::BTreeMap<String, ProviderOptions>),
}

impl TryFrom<ProviderEntry> for OrtExecutionProvider {
    type Error = super::ConfigError;

    fn try_from(entry: ProviderEntry) -> Result<Self, Self::Error> {
        match entry {
            ProviderEntry::Name(name) => name.parse(),
            ProviderEntry::Configured(map) => {
                let count = map.len();
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((name, options)), None) => Self::with_options(&name, options),
                    _ => Err(super::ConfigError::InvalidConfig {
                        message: format!(
                            "execution provider entry must have exactly one name, got {count}"
                        ),
                    }),
                }
            }
        }
    }
}

impl OrtExecutionProvider {
    fn with_options(name: &str, options: ProviderOptions) -> Result<Self, super::ConfigError> {
        let base: Self = name.parse()?;
        let allowed: &[&str] = match base {
            Self::CPU | Self::WebGPU => &[],
            Self::CUDA { .. } | Self::DirectML { .. } => &["device_id"],
            Self::TensorRT { .. } => &[
                "device_id",
                "fp16_enable",
                "engine_cache_enable",
                "engine_cache_path",
                "max_workspace_size",
            ],
            Self::CoreML { .. } => &["subgraphs"],
            Self::OpenVINO { .. } => &["device_type"],
        };
        if let Some(field) = options
            .set_fields()
            .into_iter()
            .find(|field| !allowed.contains(field))
        {
            return Err(super::ConfigError::InvalidConfig {
                message: format!("option '{field}' does not apply to {}", base.name()),
            });
        }

        Ok(match base {
            Self::CPU => Self::CPU,
            Self::WebGPU => Self::WebGPU,
            Self::CUDA { .. } => Self::CUDA {
                device_id: options.device_id,
            },
            Self::DirectML { .. } => Self::DirectML {
                device_id: options.device_id,
            },
            Self::TensorRT { .. } => Self::TensorRT {
                device_id: options.device_id,
                fp16_enable: options.fp16_enable,
                engine_cache_enable: options.engine_cache_enable,
                engine_cache_path: options.engine_cache_path,
                max_workspace_size: options.max_workspace_size,
            },
            Self::CoreML { .. } => Self::CoreML {
                subgraphs: options.subgraphs,
            },
            Self::OpenVINO { .. } => Self::OpenVINO {
                device_type: options.device_type,
            },
        })
    }
}

impl std::fmt::Display for OrtExecutionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrtExecutionProvider {
    type Err = super::ConfigError;

    /// Parses a provider name with default options.
    ///
    /// Both the short names (`"CUDA"`) and ONNX Runtime identifiers
    /// (`"CUDAExecutionProvider"`) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CPU" | "CPUExecutionProvider" => Ok(Self::CPU),
            "CUDA" | "CUDAExecutionProvider" => Ok(Self::cuda()),
            "TensorRT" | "TensorrtExecutionProvider" => Ok(Self::TensorRT {
                device_id: None,
                fp16_enable: None,
                engine_cache_enable: None,
                engine_cache_path: None,
                max_workspace_size: None,
            }),
            "DirectML" | "DmlExecutionProvider" => Ok(Self::DirectML { device_id: None }),
            "CoreML" | "CoreMLExecutionProvider" => Ok(Self::CoreML { subgraphs: None }),
            "OpenVINO" | "OpenVINOExecutionProvider" => Ok(Self::OpenVINO { device_type: None }),
            "WebGPU" | "WebGpuExecutionProvider" => Ok(Self::WebGPU),
            other => Err(super::ConfigError::InvalidConfig {
                message: format!("unknown execution provider '{other}'"),
            }),
        }
    }
}

/// Configuration for ONNX Runtime sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrtSessionConfig {
    /// Number of threads used to parallelize execution within nodes
    pub intra_threads: Option<usize>,
    /// Number of threads used to parallelize execution across nodes
    pub inter_threads: Option<usize>,
    /// Enable parallel execution mode
    pub parallel_execution: Option<bool>,
    /// Graph optimization level
    pub optimization_level: Option<OrtGraphOptimizationLevel>,
    /// Execution providers in order of preference
    pub execution_providers: Option<Vec<OrtExecutionProvider>>,
    /// Log severity level (0=Verbose, 1=Info, 2=Warning, 3=Error, 4=Fatal)
    pub log_severity_level: Option<i32>,
}

impl OrtSessionConfig {
    /// Creates a new OrtSessionConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of intra-op threads.
    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = Some(threads);
        self
    }

    /// Sets the number of inter-op threads.
    pub fn with_inter_threads(mut self, threads: usize) -> Self {
        self.inter_threads = Some(threads);
        self
    }

    /// Enables or disables parallel execution.
    pub fn with_parallel_execution(mut self, enabled: bool) -> Self {
        self.parallel_execution = Some(enabled);
        self
    }

    /// Sets the graph optimization level.
    pub fn with_optimization_level(mut self, level: OrtGraphOptimizationLevel) -> Self {
        self.optimization_level = Some(level);
        self
    }

    /// Sets the execution providers, in order of preference.
    pub fn with_execution_providers(mut self, providers: Vec<OrtExecutionProvider>) -> Self {
        self.execution_providers = Some(providers);
        self
    }

    /// Appends a single execution provider to the preference list.
    pub fn add_execution_provider(mut self, provider: OrtExecutionProvider) -> Self {
        if let Some(ref mut providers) = self.execution_providers {
            providers.push(provider);
        } else {
            self.execution_providers = Some(vec![provider]);
        }
        self
    }

    /// Sets the log severity level (0=Verbose, 1=Info, 2=Warning, 3=Error, 4=Fatal).
    pub fn with_log_severity_level(mut self, level: i32) -> Self {
        self.log_severity_level = Some(level);
        self
    }

    /// Gets the effective graph optimization level.
    pub fn get_optimization_level(&self) -> OrtGraphOptimizationLevel {
        self.optimization_level.unwrap_or_default()
    }

    /// Gets the execution providers, falling back to
    /// [`OrtExecutionProvider::default_preference`] when unset.
    pub fn get_execution_providers(&self) -> Vec<OrtExecutionProvider> {
        self.execution_providers
            .clone()
            .unwrap_or_else(OrtExecutionProvider::default_preference)
    }

    /// Gets the effective log severity level; Error (3) when unset.
    pub fn get_log_severity_level(&self) -> i32 {
        self.log_severity_level.unwrap_or(3)
    }
}
