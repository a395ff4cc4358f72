// SPDX-License-Identifier: Apache-2.0

/// Environment variable names injected into the serving container
pub mod env_keys {
    pub const MODEL_FILE_NAME: &str = "MODEL_FILE_NAME";
    pub const TRAINING_ID: &str = "TRAINING_ID";
    pub const BUCKET_NAME: &str = "BUCKET_NAME";
    pub const BUCKET_ENDPOINT_URL: &str = "BUCKET_ENDPOINT_URL";
    pub const BUCKET_KEY: &str = "BUCKET_KEY";
    pub const BUCKET_SECRET: &str = "BUCKET_SECRET";
    pub const MODEL_CLASS_NAME: &str = "MODEL_CLASS_NAME";
    pub const MODEL_CLASS_FILE: &str = "MODEL_CLASS_FILE";
}

/// Credential files mounted into the pipeline-step container
pub mod secret_files {
    pub const BASE_DIR: &str = "/app/secrets";
    pub const S3_URL: &str = "s3_url";
    pub const RESULT_BUCKET: &str = "result_bucket";
    pub const S3_ACCESS_KEY_ID: &str = "s3_access_key_id";
    pub const S3_SECRET_ACCESS_KEY: &str = "s3_secret_access_key";
    pub const KNATIVE_INGRESS: &str = "knative_ingress";
    pub const KNATIVE_CUSTOM_DOMAIN: &str = "knative_custom_domain";
    pub const LOCAL_CLUSTER_DEPLOYMENT: &str = "local_cluster_deployment";
    pub const KFSERVING_URL: &str = "kfserving_url";
}

/// JSON pointer to the serving container within the InferenceService spec
pub const CONTAINER_POINTER: &str = "/spec/default/custom/container";

/// JSON pointer to the reconciliation state reported by KFServing
pub const STATE_POINTER: &str = "/status/state";

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_TEMPLATE_PATH: &str = "kube/kfserving.json";
pub const DEFAULT_CUSTOM_DOMAIN: &str = "example.com";
pub const DEFAULT_PORT: u16 = 8080;
