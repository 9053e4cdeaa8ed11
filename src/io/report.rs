use std::io::Write;

use chrono::{DateTime, Local};

use crate::domain::{config::BillingConfig, device::Device, totals::Totals};

/// Writes the printable meter report.
///
/// Takes the same read-only tuple whether it is fed from the live fleet or a
/// history record, so callers re-open closed months through the exact same
/// path.
///
/// # Errors
///
/// Returns the underlying `std::io::Error` if writing fails.
pub fn render<W: Write>(
    mut w: W,
    devices: &[Device],
    totals: &Totals,
    config: &BillingConfig,
    period: &str,
    generated_at: DateTime<Local>,
) -> std::io::Result<()> {
    writeln!(w, "RELATÓRIO DE MEDIÇÃO")?;
    writeln!(w, "Competência: {period}")?;
    writeln!(w)?;

    writeln!(
        w,
        "{:<30} {:<16} {:>10} {:>10} {:>10}",
        "EQUIPAMENTO", "IP REDE", "ANTERIOR", "ATUAL", "PRODUÇÃO"
    )?;
    for device in devices {
        writeln!(
            w,
            "{:<30} {:<16} {:>10} {:>10} {:>10}",
            format!("{} ({})", device.name, device.model),
            device.ip,
            device.last_month_counter,
            device.current_counter,
            device.production(),
        )?;
    }
    writeln!(w)?;

    writeln!(w, "APURAÇÃO")?;
    writeln!(w, "  {:<18} {:>12}", "Franquia", config.franquia)?;
    writeln!(w, "  {:<18} {:>12}", "Medido", totals.total_copias)?;
    writeln!(w, "  {:<18} {:>12}", "Excedente", totals.excedente)?;
    writeln!(w)?;

    writeln!(w, "TOTAL A FATURAR")?;
    writeln!(
        w,
        "  {:<18} R$ {:>12}",
        "Valor Mínimo",
        totals.valor_franquia.to_string_2dp()
    )?;
    writeln!(
        w,
        "  {:<18} R$ {:>12}",
        "Valor Excedente",
        totals.valor_excedente.to_string_2dp()
    )?;
    writeln!(
        w,
        "  {:<18} R$ {:>12}",
        "Total",
        totals.total_pagar.to_string_2dp()
    )?;
    writeln!(w)?;

    writeln!(w, "Gerado em: {}", generated_at.format("%d/%m/%Y %H:%M:%S"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(devices: &[Device], config: &BillingConfig) -> String {
        let totals = Totals::compute(devices, config);
        let mut out = Vec::new();
        render(&mut out, devices, &totals, config, "06/2024", Local::now()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn report_names_the_period_and_the_devices() {
        let mut device = Device::new("HP1", "10.0.0.1", "LaserJet");
        device.last_month_counter = 1000;
        device.current_counter = 1200;

        let s = render_to_string(&[device], &BillingConfig::default());

        assert!(s.contains("Competência: 06/2024"));
        assert!(s.contains("HP1 (LaserJet)"));
        assert!(s.contains("10.0.0.1"));
    }

    #[test]
    fn report_shows_the_billing_breakdown() {
        let mut device = Device::new("HP1", "10.0.0.1", "LaserJet");
        device.current_counter = 61_000;

        let s = render_to_string(&[device], &BillingConfig::default());

        assert!(s.contains("2610.00"), "quota value missing: {s}");
        assert!(s.contains("440.00"), "overage value missing: {s}");
        assert!(s.contains("3050.00"), "grand total missing: {s}");
    }
}
