//! Model artifacts for cardiovascular risk scoring
//!
//! A trained classifier and its fitted scaler are shipped together as one
//! JSON artifact, loaded once at startup and shared read-only afterwards.

pub mod artifact;
pub mod backend;
pub mod backends;
pub mod metadata;
pub mod scaler;

pub use artifact::{
    default_search_dirs, resolve_artifact_path, ArtifactError, ModelArtifact,
    DEFAULT_ARTIFACT_FILE,
};
pub use backend::{BackendError, Classifier, DECISION_THRESHOLD};
pub use backends::{ClassifierArtifact, LogisticRegression};
pub use metadata::{ModelMetadata, ModelVersion};
pub use scaler::StandardScaler;
