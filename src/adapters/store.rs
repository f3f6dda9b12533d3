//! Reading store adapters.
//!
//! On the device, readings go to the backend ingest endpoint as JSON over
//! HTTP; the endpoint URL is supplied out-of-band at provisioning time.
//! The backend inserts the row transactionally and answers with the
//! assigned id, so either the full row exists afterwards or nothing does.
//!
//! On host targets an in-memory store stands in for the backend.

use crate::app::ports::{ReadingStorePort, StoreError};
use crate::app::service::Reading;

// ───────────────────────────────────────────────────────────────
// HTTP backend store (device)
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use self::http::HttpReadingStore;

#[cfg(target_os = "espidf")]
mod http {
    use esp_idf_svc::http::Method;
    use esp_idf_svc::http::client::{Configuration, EspHttpConnection};
    use esp_idf_svc::io::{Read, Write};
    use log::debug;

    use super::{Reading, ReadingStorePort, StoreError};

    /// POSTs each reading to the backend ingest endpoint.
    pub struct HttpReadingStore {
        connection: EspHttpConnection,
        endpoint: heapless::String<128>,
    }

    impl HttpReadingStore {
        pub fn new(endpoint: heapless::String<128>) -> Result<Self, StoreError> {
            let connection = EspHttpConnection::new(&Configuration {
                timeout: Some(core::time::Duration::from_secs(10)),
                ..Default::default()
            })
            .map_err(|_| StoreError::Unavailable)?;
            Ok(Self {
                connection,
                endpoint,
            })
        }
    }

    impl ReadingStorePort for HttpReadingStore {
        fn append(&mut self, reading: &Reading) -> Result<u64, StoreError> {
            let body = serde_json::to_string(reading).map_err(|_| StoreError::Rejected)?;

            let headers = [("content-type", "application/json")];
            self.connection
                .initiate_request(Method::Post, self.endpoint.as_str(), &headers)
                .map_err(|_| StoreError::Unavailable)?;
            self.connection
                .write(body.as_bytes())
                .map_err(|_| StoreError::IoError)?;
            self.connection
                .initiate_response()
                .map_err(|_| StoreError::Unavailable)?;

            let status = self.connection.status();
            if !(200..300).contains(&status) {
                debug!("store: ingest answered {status}");
                return Err(StoreError::Rejected);
            }

            // Body is the assigned row id as decimal ASCII.
            let mut buf = [0u8; 32];
            let n = self
                .connection
                .read(&mut buf)
                .map_err(|_| StoreError::IoError)?;
            let text = core::str::from_utf8(&buf[..n]).map_err(|_| StoreError::IoError)?;
            text.trim().parse::<u64>().map_err(|_| StoreError::IoError)
        }
    }
}

// ───────────────────────────────────────────────────────────────
// In-memory store (host / simulation)
// ───────────────────────────────────────────────────────────────

/// Host-side stand-in for the backend: appends into a `Vec` and assigns
/// sequential ids.  Can be switched into a failing mode to exercise the
/// submit error paths.
#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
pub struct MemoryReadingStore {
    pub rows: Vec<Reading>,
    pub fail_with: Option<StoreError>,
}

#[cfg(not(target_os = "espidf"))]
impl MemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(target_os = "espidf"))]
impl ReadingStorePort for MemoryReadingStore {
    fn append(&mut self, reading: &Reading) -> Result<u64, StoreError> {
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.rows.push(reading.clone());
        Ok(self.rows.len() as u64)
    }
}
