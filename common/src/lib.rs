//! FloraScan Common Library
//!
//! CLIとWeb(WASM)で共有される型とロジック

pub mod types;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod store;
pub mod dataset;
pub mod preview;
pub mod sample;
pub mod identify;
pub mod capture;
pub mod data_url;

pub use types::{PlantRecord, IdentificationResult};
pub use error::{Error, Result};
pub use normalize::{normalize_plant, normalize_value};
pub use parser::{parse_csv, parse_json_dataset, is_csv_file_name};
pub use store::{KeyValueStore, MemoryStore, DATASET_KEY, RESULT_KEY};
pub use dataset::{DatasetManager, ResultSlot, saved_message};
pub use preview::{DatasetView, PreviewItem, PREVIEW_LIMIT};
pub use sample::{sample_dataset, sample_dataset_json, SAMPLE_FILE_NAME};
pub use identify::{identify, identify_and_store, fallback_result, from_response, IdentificationClient, IdentifyResponse, IdentifyRequest};
pub use capture::{CaptureMode, CaptureSession, CameraOutcome, ImageSource, acquire_camera, is_mobile_user_agent};
pub use data_url::{to_data_url, is_image_mime_type};
