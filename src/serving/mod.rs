// SPDX-License-Identifier: Apache-2.0

//! Minimal model-serving component: artifact download, predictor loading,
//! and the prediction HTTP endpoint.

pub mod loader;
pub mod predictor;
pub mod server;
pub mod storage;

pub use loader::{ModelService, ServingConfig};
pub use predictor::{Predictor, PredictorRegistry};
pub use storage::{ArtifactStore, HttpArtifactStore};
