//! Dataset configuration

use crate::error::DatasetError;
use radiant_data::{DataError, Split};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Storage location the consumer should place query results in.
///
/// The dataset itself is host-resident; the device is carried on the dataset
/// and on every ray container so a trainer can route uploads without relying
/// on a global execution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    /// Accelerator with the given ordinal.
    Cuda(usize),
}

impl Device {
    pub fn is_host(&self) -> bool {
        matches!(self, Device::Cpu)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => f.write_str("cpu"),
            Device::Cuda(ordinal) => write!(f, "cuda:{ordinal}"),
        }
    }
}

/// Configuration for loading a [`crate::CameraDataset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory holding `transforms_{split}.json` and the images.
    pub data_dir: PathBuf,
    /// Manifest to read.
    pub split: Split,
    /// Extension appended to each manifest `file_path`.
    pub image_extension: String,
    /// Where query results should live.
    pub device: Device,
    /// Keep every n-th manifest frame.
    pub frame_stride: usize,
}

impl DatasetConfig {
    /// Create a config for a dataset directory with default settings.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Set the manifest split.
    pub fn with_split(mut self, split: Split) -> Self {
        self.split = split;
        self
    }

    /// Set the image extension.
    pub fn with_image_extension(mut self, extension: impl Into<String>) -> Self {
        self.image_extension = extension.into();
        self
    }

    /// Set the result device.
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Set the frame stride.
    pub fn with_frame_stride(mut self, stride: usize) -> Self {
        self.frame_stride = stride;
        self
    }

    /// Read a config from a JSON document. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DatasetConfig =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| DataError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(DatasetError::InvalidConfig("data_dir is not set".to_string()));
        }
        if self.frame_stride == 0 {
            return Err(DatasetError::InvalidConfig(
                "frame_stride must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            split: Split::Train,
            image_extension: "png".to_string(),
            device: Device::Cpu,
            frame_stride: 1,
        }
    }
}
