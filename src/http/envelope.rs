use crate::records::AnswerRecord;
use serde::Serialize;

/// The PowerDNS remote-backend reply shape: `result` is either an array of
/// record objects (never empty — "no answer" uses the other variant) or the
/// literal boolean `false`. A single record is still wrapped in an array.
#[derive(Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Records { result: Vec<AnswerRecord> },
    NoAnswer { result: bool },
}

impl Envelope {
    pub fn from_records(records: Vec<AnswerRecord>) -> Self {
        if records.is_empty() {
            Envelope::NoAnswer { result: false }
        } else {
            Envelope::Records { result: records }
        }
    }

    pub fn no_answer() -> Self {
        Envelope::NoAnswer { result: false }
    }
}
