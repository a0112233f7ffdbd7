use crate::core::fractals::formula::errors::ConfigurationFault;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not read config file {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationFault),

    #[error("render {generation} stopped before completing")]
    RenderIncomplete { generation: u64 },

    #[error("nothing has been rendered yet")]
    NothingRendered,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
