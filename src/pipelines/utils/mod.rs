use candle_core::Device;

use crate::error::{PipelineError, Result};

/// Which device a builder should load its model on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceRequest {
    /// Run on the CPU (default).
    #[default]
    Cpu,
    /// Run on the CUDA GPU with this index.
    Cuda(usize),
}

impl DeviceRequest {
    /// Resolve the request into a candle [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Device`] if the GPU cannot be initialized,
    /// including when the crate was built without the `cuda` feature.
    pub fn resolve(self) -> Result<Device> {
        match self {
            DeviceRequest::Cpu => Ok(Device::Cpu),
            DeviceRequest::Cuda(i) => Device::new_cuda(i).map_err(|e| {
                PipelineError::Device(format!(
                    "Failed to init CUDA device {i}: {e}. Try CPU as fallback."
                ))
            }),
        }
    }
}

macro_rules! impl_device_methods {
    ($builder:ident) => {
        impl $builder {
            /// Use CPU for inference (default).
            pub fn cpu(mut self) -> Self {
                self.device_request = crate::pipelines::utils::DeviceRequest::Cpu;
                self
            }

            /// Use a specific CUDA GPU for inference.
            pub fn cuda(mut self, index: usize) -> Self {
                self.device_request = crate::pipelines::utils::DeviceRequest::Cuda(index);
                self
            }
        }
    };
}

pub(crate) use impl_device_methods;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_is_default() {
        assert_eq!(DeviceRequest::default(), DeviceRequest::Cpu);
        assert!(DeviceRequest::Cpu.resolve().unwrap().is_cpu());
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn cuda_without_feature_is_a_device_error() {
        let err = DeviceRequest::Cuda(0).resolve().unwrap_err();
        assert!(matches!(err, PipelineError::Device(_)));
    }
}
