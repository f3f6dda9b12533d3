//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements        | Connects to                |
//! |---------------|-------------------|----------------------------|
//! | `hardware`    | SensorPort        | TCS3200 + DHT11 on GPIO    |
//! | `credentials` | CredentialPort    | Provisioned HMAC record    |
//! | `store`       | ReadingStorePort  | Backend ingest endpoint    |
//! | `log_sink`    | EventSink         | Serial log output          |
//! | `time`        | Monotonic         | ESP32 system timer         |

pub mod credentials;
pub mod hardware;
pub mod log_sink;
pub mod store;
pub mod time;
