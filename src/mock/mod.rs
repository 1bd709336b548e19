pub mod data;
pub mod service;

pub use data::{AtsJob, JobStatus, SyncedJob};
pub use service::{
    ApplicationPayload, AtsApiResponse, AtsGateway, AtsJobStatus, IdMapping, MockAtsService,
    RejectReason,
};
