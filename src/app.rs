use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::{
    common::{error::AppError, event::OperatorEvent},
    domain::{totals::Totals, workspace::Workspace},
    io::{report, store::Store},
    worker::{
        handlers::close::CloseOutcome,
        processor::{Outcome, Processor},
    },
};

#[derive(Parser, Debug)]
#[command(
    name = "meter_billing",
    version,
    about = "Contador mensal de impressões com faturamento por franquia"
)]
pub struct Cli {
    /// Directory holding the JSON store
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new device
    Add {
        name: String,
        ip: String,
        #[arg(long)]
        model: Option<String>,
    },
    /// Update a device's fields
    Edit {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        ip: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },
    /// Remove a device
    Remove { id: Uuid },
    /// Record the current reading for a device
    Reading { id: Uuid, value: String },
    /// Overwrite the start-of-period baseline for a device
    Baseline { id: Uuid, value: String },
    /// Show the fleet and the derived totals for the open period
    List,
    /// Show or update the billing contract
    Config {
        #[arg(long)]
        franquia: Option<u64>,
        #[arg(long)]
        valor_copia: Option<String>,
    },
    /// Merge a CSV meter export into the fleet
    Import { file: PathBuf },
    /// Close the current month into the history ledger
    Close {
        /// Replace an existing closing for the same period
        #[arg(long)]
        overwrite: bool,
    },
    /// Render the printable report, live or for a closed period
    Report {
        /// A closed period ("MM/YYYY") instead of the live state
        #[arg(long)]
        period: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List closed periods, most recent first
    History,
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    let store = Store::open(&cli.data_dir)?;
    let mut workspace = store.load()?;

    match cli.command {
        Command::List => list(&workspace),
        Command::History => history(&workspace),
        Command::Report { period, out } => render_report(&workspace, period, out),
        Command::Config {
            franquia,
            valor_copia,
        } => configure(&store, &mut workspace, franquia, valor_copia),
        Command::Add { name, ip, model } => mutate(
            &store,
            &mut workspace,
            OperatorEvent::AddDevice { name, ip, model },
        ),
        Command::Edit {
            id,
            name,
            ip,
            model,
        } => mutate(
            &store,
            &mut workspace,
            OperatorEvent::EditDevice {
                id,
                name,
                ip,
                model,
            },
        ),
        Command::Remove { id } => mutate(
            &store,
            &mut workspace,
            OperatorEvent::RemoveDevice { id },
        ),
        Command::Reading { id, value } => mutate(
            &store,
            &mut workspace,
            OperatorEvent::SetReading { id, value },
        ),
        Command::Baseline { id, value } => mutate(
            &store,
            &mut workspace,
            OperatorEvent::SetBaseline { id, value },
        ),
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            mutate(&store, &mut workspace, OperatorEvent::ImportCsv { text })
        }
        Command::Close { overwrite } => mutate(
            &store,
            &mut workspace,
            OperatorEvent::ClosePeriod {
                now: Local::now(),
                overwrite,
            },
        ),
    }
}

// Process one mutating event, persist the whole workspace, then report.
// Persisting before announcing keeps the "durably observable after the call
// returns" contract.
fn mutate(store: &Store, workspace: &mut Workspace, event: OperatorEvent) -> Result<(), AppError> {
    let outcome = Processor::new().process(workspace, event)?;
    store.save(workspace)?;
    announce(&outcome);
    Ok(())
}

fn announce(outcome: &Outcome) {
    match outcome {
        Outcome::DeviceAdded(id) => println!("equipamento cadastrado: {id}"),
        Outcome::DeviceUpdated(id) => println!("equipamento atualizado: {id}"),
        Outcome::DeviceRemoved(id) => println!("equipamento removido: {id}"),
        Outcome::CounterSet { id, value } => println!("contador de {id} ajustado para {value}"),
        Outcome::Imported(s) => println!(
            "importação concluída: {} atualizados, {} novos, {} linhas ignoradas",
            s.updated, s.added, s.skipped
        ),
        Outcome::Close(CloseOutcome::Closed {
            period,
            overwritten: false,
        }) => println!("Mês {period} fechado! Arquivo de histórico atualizado na pasta."),
        Outcome::Close(CloseOutcome::Closed {
            period,
            overwritten: true,
        }) => println!("Mês {period} fechado! Registro anterior foi sobrescrito."),
        Outcome::Close(CloseOutcome::Collision { period }) => {
            println!("Já existe um fechamento para {period}. Use --overwrite para sobrescrever.")
        }
    }
}

fn list(workspace: &Workspace) -> Result<(), AppError> {
    let totals = Totals::compute(workspace.fleet.devices(), &workspace.config);

    let stdout = stdout();
    let mut w = BufWriter::new(stdout.lock());
    writeln!(
        w,
        "{:<36} {:<22} {:<16} {:>10} {:>10} {:>10}",
        "ID", "EQUIPAMENTO", "IP", "ANTERIOR", "ATUAL", "PRODUÇÃO"
    )?;
    for device in workspace.fleet.devices() {
        writeln!(
            w,
            "{:<36} {:<22} {:<16} {:>10} {:>10} {:>10}",
            device.id.to_string(),
            device.name,
            device.ip,
            device.last_month_counter,
            device.current_counter,
            device.production(),
        )?;
    }
    writeln!(w)?;
    writeln!(
        w,
        "volume total: {}  excedente: {}  total a pagar: R$ {}",
        totals.total_copias,
        totals.excedente,
        totals.total_pagar.to_string_2dp()
    )?;
    Ok(())
}

fn history(workspace: &Workspace) -> Result<(), AppError> {
    if workspace.history.is_empty() {
        println!("Nenhum fechamento registrado");
        return Ok(());
    }
    for record in workspace.history.records() {
        println!(
            "{}  {} equipamentos  {} páginas  R$ {}",
            record.period,
            record.devices.len(),
            record.totals.total_copias,
            record.totals.total_pagar.to_string_2dp()
        );
    }
    Ok(())
}

fn render_report(
    workspace: &Workspace,
    period: Option<String>,
    out: Option<PathBuf>,
) -> Result<(), AppError> {
    let now = Local::now();
    let live_totals;

    // Live state and history records feed the renderer through the same
    // read-only tuple.
    let (devices, totals, config, label) = match &period {
        Some(p) => {
            let record = workspace
                .history
                .find_period(p)
                .ok_or_else(|| AppError::PeriodNotFound(p.clone()))?;
            (
                record.devices.as_slice(),
                &record.totals,
                &record.config,
                record.period.clone(),
            )
        }
        None => {
            live_totals = Totals::compute(workspace.fleet.devices(), &workspace.config);
            (
                workspace.fleet.devices(),
                &live_totals,
                &workspace.config,
                now.format("%m/%Y").to_string(),
            )
        }
    };

    match out {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            report::render(BufWriter::new(file), devices, totals, config, &label, now)?;
            println!("relatório salvo em {}", path.display());
        }
        None => {
            let stdout = stdout();
            report::render(
                BufWriter::new(stdout.lock()),
                devices,
                totals,
                config,
                &label,
                now,
            )?;
        }
    }
    Ok(())
}

fn configure(
    store: &Store,
    workspace: &mut Workspace,
    franquia: Option<u64>,
    valor_copia: Option<String>,
) -> Result<(), AppError> {
    let mut changed = false;
    if let Some(franquia) = franquia {
        workspace.config.franquia = franquia;
        changed = true;
    }
    if let Some(raw) = valor_copia {
        workspace.config.valor_copia = raw.parse().map_err(|_| AppError::Amount(raw.clone()))?;
        changed = true;
    }
    if changed {
        store.save(workspace)?;
    }

    println!(
        "franquia: {}  valor da cópia: R$ {}",
        workspace.config.franquia,
        workspace.config.valor_copia.to_string_2dp()
    );
    Ok(())
}
