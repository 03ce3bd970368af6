use serde::Serialize;

use super::Number;

/// Result of one fetch-merge round for a category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowReport {
    pub window_prev_state: Vec<Number>,
    pub window_curr_state: Vec<Number>,
    pub numbers: Vec<Number>,
    pub avg: f64,
}

impl WindowReport {
    pub fn new(
        window_prev_state: Vec<Number>,
        window_curr_state: Vec<Number>,
        numbers: Vec<Number>,
    ) -> Self {
        let avg = average(&window_curr_state);
        Self {
            window_prev_state,
            window_curr_state,
            numbers,
            avg,
        }
    }
}

/// Arithmetic mean rounded to two decimal places, exact ties to even; 0.0 for an empty slice
pub fn average(values: &[Number]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().map(Number::as_f64).sum();
    let mean = sum / values.len() as f64;
    (mean * 100.0).round_ties_even() / 100.0
}
