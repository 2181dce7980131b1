/// Linear transfer function of an analog temperature sensor read through an ADC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    /// Voltage at the converter's reference pin.
    pub reference_volts: f32,
    /// Full-scale digital count (`2^bits`).
    pub adc_range: u16,
    /// Sensor output at 0 °C.
    pub offset_volts: f32,
    pub volts_per_degree: f32,
}

impl Transfer {
    /// TMP36 on a 10-bit converter with a 3.3 V reference.
    pub const TMP36: Transfer = Transfer {
        reference_volts: 3.3,
        adc_range: 1024,
        offset_volts: 0.5,
        volts_per_degree: 0.01,
    };

    pub fn volts(&self, raw: u16) -> f32 {
        raw as f32 * self.reference_volts / self.adc_range as f32
    }

    pub fn celsius(&self, raw: u16) -> f32 {
        (self.volts(raw) - self.offset_volts) / self.volts_per_degree
    }
}
