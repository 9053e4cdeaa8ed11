use uuid::Uuid;

use crate::{
    common::{error::AppError, event::OperatorEvent},
    domain::workspace::Workspace,
    worker::handlers::{
        add,
        close::{self, CloseOutcome},
        edit,
        import::{self, ImportSummary},
        reading::{self, CounterField},
        remove,
    },
};

/// What a processed event produced, for the caller to report to the operator.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    DeviceAdded(Uuid),
    DeviceUpdated(Uuid),
    DeviceRemoved(Uuid),
    CounterSet { id: Uuid, value: u64 },
    Imported(ImportSummary),
    Close(CloseOutcome),
}

#[derive(Debug, Default)]
pub struct Processor {}

impl Processor {
    pub fn new() -> Self {
        Self {}
    }

    pub fn process(
        &mut self,
        workspace: &mut Workspace,
        event: OperatorEvent,
    ) -> Result<Outcome, AppError> {
        match event {
            OperatorEvent::AddDevice { name, ip, model } => {
                let id = add::handle(&mut workspace.fleet, name, ip, model)?;
                Ok(Outcome::DeviceAdded(id))
            }
            OperatorEvent::EditDevice {
                id,
                name,
                ip,
                model,
            } => {
                edit::handle(&mut workspace.fleet, id, name, ip, model)?;
                Ok(Outcome::DeviceUpdated(id))
            }
            OperatorEvent::RemoveDevice { id } => {
                remove::handle(&mut workspace.fleet, id)?;
                Ok(Outcome::DeviceRemoved(id))
            }
            OperatorEvent::SetReading { id, value } => {
                let value =
                    reading::handle(&mut workspace.fleet, id, &value, CounterField::Current)?;
                Ok(Outcome::CounterSet { id, value })
            }
            OperatorEvent::SetBaseline { id, value } => {
                let value =
                    reading::handle(&mut workspace.fleet, id, &value, CounterField::Baseline)?;
                Ok(Outcome::CounterSet { id, value })
            }
            OperatorEvent::ImportCsv { text } => {
                let summary = import::handle(&mut workspace.fleet, &text)?;
                Ok(Outcome::Imported(summary))
            }
            OperatorEvent::ClosePeriod { now, overwrite } => {
                let outcome = close::handle(workspace, now, overwrite)?;
                Ok(Outcome::Close(outcome))
            }
        }
    }
}
