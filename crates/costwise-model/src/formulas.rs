//! Conversion of a network volume into time, CO2, and price.
//!
//! Pure and exactly linear: scaling the volume by `k` scales every derived
//! metric by `k`. The operators compute a volume; this module never decides
//! anything.

use costwise_core::config::{
    BYTES_PER_GB, CO2_PER_GB, CPU_THROUGHPUT_BPS, NETWORK_THROUGHPUT_BPS, PRICE_PER_GB,
};

use serde::{Deserialize, Serialize};

/// Derived metrics for one query's network volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireCost {
    /// Seconds to move the volume at network throughput.
    pub time_network: f64,
    /// Seconds to stream the same volume through memory.
    pub time_cpu: f64,
    pub time_total: f64,
    /// kg CO2-eq for the gigabytes moved.
    pub co2: f64,
    /// Monetary cost for the gigabytes moved; tracks `co2` by construction.
    pub price: f64,
}

pub fn wire_cost(vol_network: f64) -> WireCost {
    let time_network = vol_network / NETWORK_THROUGHPUT_BPS;
    let time_cpu = vol_network / CPU_THROUGHPUT_BPS;
    let gb = vol_network / BYTES_PER_GB;
    WireCost {
        time_network,
        time_cpu,
        time_total: time_network + time_cpu,
        co2: gb * CO2_PER_GB,
        price: gb * PRICE_PER_GB,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_use_the_fixed_throughputs() {
        let c = wire_cost(100.0 * 1024.0 * 1024.0);
        assert_eq!(c.time_network, 1.0);
        assert_eq!(c.time_cpu, 1.0 / 256.0);
        assert_eq!(c.time_total, c.time_network + c.time_cpu);
    }

    #[test]
    fn co2_and_price_are_identical_per_gb() {
        let c = wire_cost(BYTES_PER_GB);
        assert_eq!(c.co2, 0.011);
        assert_eq!(c.price, c.co2);
    }

    #[test]
    fn every_metric_is_linear_in_volume() {
        let base = wire_cost(1234.0);
        // powers of two scale exactly even in floating point
        for k in [2.0, 0.5, 1024.0] {
            let scaled = wire_cost(1234.0 * k);
            assert_eq!(scaled.time_network, base.time_network * k);
            assert_eq!(scaled.time_cpu, base.time_cpu * k);
            assert_eq!(scaled.co2, base.co2 * k);
            assert_eq!(scaled.price, base.price * k);
        }
        let scaled = wire_cost(1234.0 * 3.0);
        assert!((scaled.time_total - base.time_total * 3.0).abs() < 1e-15);
        assert!((scaled.co2 - base.co2 * 3.0).abs() < 1e-15);
    }

    #[test]
    fn zero_volume_costs_nothing() {
        let c = wire_cost(0.0);
        assert_eq!(c.time_total, 0.0);
        assert_eq!(c.co2, 0.0);
    }
}
