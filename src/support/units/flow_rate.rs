use uom::si::{f64::VolumeRate, volume_rate::cubic_meter_per_second};

/// Cubic meters per second in one liter per minute.
const M3_PER_S_PER_L_PER_MIN: f64 = 1.0 / 60_000.0;

/// Creates a [`VolumeRate`] from a value in liters per minute.
#[must_use]
pub fn liters_per_minute(value: f64) -> VolumeRate {
    VolumeRate::new::<cubic_meter_per_second>(value * M3_PER_S_PER_L_PER_MIN)
}

/// Reads a [`VolumeRate`] back in liters per minute.
pub trait LitersPerMinute {
    fn as_liters_per_minute(&self) -> f64;
}

impl LitersPerMinute for VolumeRate {
    fn as_liters_per_minute(&self) -> f64 {
        self.get::<cubic_meter_per_second>() / M3_PER_S_PER_L_PER_MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn ten_liters_per_minute() {
        let flow = liters_per_minute(10.0);
        assert_relative_eq!(flow.get::<cubic_meter_per_second>(), 1.0 / 6000.0);
        assert_relative_eq!(flow.as_liters_per_minute(), 10.0, max_relative = 1e-12);
    }
}
