use serde::{Deserialize, Serialize};

use crate::common::money::Money;
use crate::domain::{config::BillingConfig, device::Device};

/// Derived billing totals. Never stored as a source of truth: always
/// recomputed from the fleet and config, except inside a frozen
/// `HistoryRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_copias: u64,
    pub excedente: u64,
    pub valor_franquia: Money,
    pub valor_excedente: Money,
    pub total_pagar: Money,
}

impl Totals {
    pub fn compute(devices: &[Device], config: &BillingConfig) -> Self {
        // Saturating fold: the tolerant parser lets absurdly large counters
        // through, and a clamped total beats a wraparound in the invoice.
        let total_copias = devices
            .iter()
            .map(Device::production)
            .fold(0u64, u64::saturating_add);
        let excedente = total_copias.saturating_sub(config.franquia);
        let valor_franquia = config.valor_copia * config.franquia;
        let valor_excedente = config.valor_copia * excedente;
        let total_pagar = valor_franquia + valor_excedente;

        Self {
            total_copias,
            excedente,
            valor_franquia,
            valor_excedente,
            total_pagar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(last: u64, current: u64) -> Device {
        let mut d = Device::new("HP1", "10.0.0.1", "LaserJet");
        d.last_month_counter = last;
        d.current_counter = current;
        d
    }

    #[test]
    fn single_device_under_quota() {
        // 200 pages against a 52200-page quota at R$ 0.05
        let devices = vec![device(1000, 1200)];
        let totals = Totals::compute(&devices, &BillingConfig::default());

        assert_eq!(totals.total_copias, 200);
        assert_eq!(totals.excedente, 0);
        assert_eq!(totals.valor_franquia.to_string_2dp(), "2610.00");
        assert_eq!(totals.valor_excedente.to_string_2dp(), "0.00");
        assert_eq!(totals.total_pagar.to_string_2dp(), "2610.00");
    }

    #[test]
    fn overage_is_billed_per_page() {
        // 61000 pages combined, 8800 over the quota
        let devices = vec![device(0, 60_000), device(500, 1500)];
        let totals = Totals::compute(&devices, &BillingConfig::default());

        assert_eq!(totals.total_copias, 61_000);
        assert_eq!(totals.excedente, 8800);
        assert_eq!(totals.valor_excedente.to_string_2dp(), "440.00");
        assert_eq!(totals.total_pagar.to_string_2dp(), "3050.00");
    }

    #[test]
    fn total_pagar_is_quota_plus_overage() {
        let devices = vec![device(0, 70_000), device(100, 50)];
        let config = BillingConfig::default();
        let totals = Totals::compute(&devices, &config);

        let expected = config.valor_copia * config.franquia
            + config.valor_copia * totals.excedente;
        assert_eq!(totals.total_pagar, expected);
    }

    #[test]
    fn regressed_counters_do_not_subtract() {
        let devices = vec![device(1000, 500), device(0, 300)];
        let totals = Totals::compute(&devices, &BillingConfig::default());
        assert_eq!(totals.total_copias, 300);
    }

    #[test]
    fn absurd_counters_clamp_instead_of_overflowing() {
        // Counters this large only arrive through the tolerant parser, but
        // they must clamp rather than wrap the billing figures.
        let devices = vec![device(0, u64::MAX), device(0, u64::MAX)];
        let totals = Totals::compute(&devices, &BillingConfig::default());

        assert_eq!(totals.total_copias, u64::MAX);
        assert_eq!(totals.excedente, u64::MAX - 52_200);
        assert_eq!(totals.valor_excedente.as_i64(), i64::MAX);
        assert_eq!(totals.total_pagar.as_i64(), i64::MAX);
    }

    #[test]
    fn empty_fleet_still_bills_the_quota() {
        let totals = Totals::compute(&[], &BillingConfig::default());
        assert_eq!(totals.total_copias, 0);
        assert_eq!(totals.total_pagar.to_string_2dp(), "2610.00");
    }
}
