mod address;
mod data;
mod data_coding;
mod flags;
mod header;
mod part;
mod protocol_id;
mod timestamp;
mod validity;

pub use address::{Address, AddressType, NumberingPlan, TypeOfNumber};
pub use data::Data;
pub use data_coding::{Alphabet, DataCodingScheme};
pub use flags::{MessageType, PduFlags};
pub use header::{ConcatInfo, InformationElement, UserDataHeader};
pub use part::Part;
pub use protocol_id::ProtocolIdentifier;
pub use timestamp::Timestamp;
pub use validity::{ValidityPeriod, ValidityPeriodFormat};
