//! CF-convention decoding of packed and masked values.
//!
//! Raw values are compared against `_FillValue` and `missing_value` before
//! unpacking, so masked elements become NaN regardless of packing.

#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    pub fill_values: Vec<f64>,
    pub scale_factor: f64,
    pub add_offset: f64,
}

impl Default for Packing {
    fn default() -> Self {
        Packing {
            fill_values: vec![],
            scale_factor: 1.0,
            add_offset: 0.0,
        }
    }
}

impl Packing {
    fn is_identity(&self) -> bool {
        self.scale_factor == 1.0 && self.add_offset == 0.0
    }

    fn is_fill(&self, raw: f64) -> bool {
        self.fill_values.iter().any(|&f| f == raw || (f.is_nan() && raw.is_nan()))
    }
}

/// Decodes raw values in place: fill values become NaN, the rest are unpacked.
pub fn decode(values: &mut [f64], packing: &Packing) {
    if packing.fill_values.is_empty() && packing.is_identity() {
        return;
    }

    for v in values.iter_mut() {
        if packing.is_fill(*v) {
            *v = f64::NAN;
        } else {
            *v = *v * packing.scale_factor + packing.add_offset;
        }
    }
}

// -- Tests -------------------------------------------------------------------
