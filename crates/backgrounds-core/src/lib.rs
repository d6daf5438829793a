pub mod config;
pub mod logging;

pub mod descriptor;
pub mod downloader;
pub mod error;
pub mod http;
pub mod page;
pub mod pipeline;

pub use descriptor::{ImageDescriptor, RawCandidate};
pub use downloader::{DownloadOutcome, Downloader};
pub use error::{DiscoveryError, DownloadError, FormatError, TitleError};
pub use http::{CurlTransport, HttpResponse, Transport};
pub use page::{Discovery, PageFetcher};
pub use pipeline::{run_pipeline, RunSummary};
