//! Controller drivers
//!
//! - [`logix`] - Logix controllers over EtherNet/IP
//! - [`snapshot`] - recorded controller loaded from YAML
//!
//! Both implement [`PlcDriver`]; [`create_driver`] picks one from the
//! connection path.

pub mod factory;
pub mod logix;
pub mod snapshot;
pub mod traits;

pub use factory::create_driver;
pub use logix::LogixDriver;
pub use snapshot::{ControllerSnapshot, RecordedValue, SnapshotDriver};
pub use traits::{PlcDriver, TagDatabase, TagDefinition, TagReading};
