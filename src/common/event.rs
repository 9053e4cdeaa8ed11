use chrono::{DateTime, Local};
use uuid::Uuid;

/// Represents an operator action that is sent to the worker for processing.
/// Counter values travel as raw strings so the tolerant numeric parsing is
/// applied in exactly one place.
#[derive(Debug)]
pub enum OperatorEvent {
    AddDevice {
        name: String,
        ip: String,
        model: Option<String>,
    },
    EditDevice {
        id: Uuid,
        name: Option<String>,
        ip: Option<String>,
        model: Option<String>,
    },
    RemoveDevice {
        id: Uuid,
    },
    SetReading {
        id: Uuid,
        value: String,
    },
    SetBaseline {
        id: Uuid,
        value: String,
    },
    ImportCsv {
        text: String,
    },
    ClosePeriod {
        now: DateTime<Local>,
        overwrite: bool,
    },
}
