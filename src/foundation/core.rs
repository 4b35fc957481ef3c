/// Bytes per kilobyte used for every size threshold in reports.
pub const BYTES_PER_KB: f64 = 1024.0;

/// Frame rate assumed when a document does not declare one.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Convert a byte count to kilobytes.
pub fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_KB
}

/// Timeline length in seconds; zero when the frame rate is not positive.
pub fn duration_secs(in_point: f64, out_point: f64, frame_rate: f64) -> f64 {
    if frame_rate > 0.0 {
        (out_point - in_point) / frame_rate
    } else {
        0.0
    }
}

/// Decoded size of a base64 payload with `encoded_len` characters, rounded up.
pub fn base64_decoded_len(encoded_len: usize) -> u64 {
    (encoded_len as u64 * 3).div_ceil(4)
}

/// Render a JSON-sourced number without a trailing `.0` for integral values.
pub(crate) fn fmt_num(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
