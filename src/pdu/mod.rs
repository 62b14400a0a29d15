mod deliver;
mod report;
mod submit;

pub use deliver::Deliver;
pub use report::Report;
pub use submit::Submit;

use crate::datatypes::Data;

/// A parsed message of any of the three kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pdu {
    Deliver(Deliver),
    Submit(Submit),
    Report(Report),
}

impl Pdu {
    /// The text payload; reports carry none.
    pub fn text(&self) -> Option<&str> {
        self.data().map(Data::text)
    }

    pub fn data(&self) -> Option<&Data> {
        match self {
            Pdu::Deliver(deliver) => Some(&deliver.data),
            Pdu::Submit(submit) => Some(&submit.data),
            Pdu::Report(_) => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut Data> {
        match self {
            Pdu::Deliver(deliver) => Some(&mut deliver.data),
            Pdu::Submit(submit) => Some(&mut submit.data),
            Pdu::Report(_) => None,
        }
    }
}
